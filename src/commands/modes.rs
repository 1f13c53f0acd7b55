//! # modes 命令实现
//!
//! 打印输出文件中的振动模式表，可选导出为 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/modes.rs` 定义的参数
//! - 使用 `parsers/` 读取振动数据
//! - 使用 `tabled` 打印表格，`csv` 导出

use crate::cli::modes::ModesArgs;
use crate::error::{Result, VibspecError};
use crate::models::Mode;
use crate::parsers;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 模式表格行
#[derive(Debug, Clone, Tabled)]
struct ModeRow {
    #[tabled(rename = "Mode")]
    number: usize,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Freq (cm-1)")]
    frequency: String,
    #[tabled(rename = "IR act")]
    ir: String,
    #[tabled(rename = "Raman act")]
    raman: String,
}

impl From<&Mode> for ModeRow {
    fn from(m: &Mode) -> Self {
        let fmt_opt = |v: Option<f64>| v.map(|x| format!("{:.4}", x)).unwrap_or_else(|| "-".to_string());
        ModeRow {
            number: m.index + 1,
            label: m.symmetry.clone(),
            frequency: format!("{:.4}", m.frequency),
            ir: fmt_opt(m.ir_activity),
            raman: fmt_opt(m.raman_activity),
        }
    }
}

/// 执行 modes 命令
pub fn execute(args: ModesArgs) -> Result<()> {
    output::print_header("Vibrational Modes");

    let data = parsers::parse_vibrational_file(&args.input)?;
    let modes = data.modes();
    output::print_success(&format!(
        "Loaded {} vibrational modes from '{}'",
        modes.len(),
        args.input.display()
    ));

    let imaginary = modes.iter().filter(|m| m.frequency < 0.0).count();
    if imaginary > 0 {
        output::print_warning(&format!("{} imaginary frequencies", imaginary));
    }

    let rows: Vec<ModeRow> = modes.iter().map(ModeRow::from).collect();
    println!("{}", Table::new(&rows));

    if let Some(ref csv_path) = args.csv {
        export_csv(&modes, csv_path)?;
        output::print_written("modes", &csv_path.display().to_string());
    }

    Ok(())
}

/// 导出模式列表为 CSV
fn export_csv(modes: &[Mode], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    for mode in modes {
        wtr.serialize(mode)?;
    }
    wtr.flush().map_err(|e| VibspecError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    Ok(())
}
