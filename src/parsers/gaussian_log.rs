//! # Gaussian 输出文件解析器
//!
//! 从 Gaussian 频率计算的 .log/.out 文件中提取振动频率、对称性标签、
//! IR 强度和 Raman 活性。
//!
//! 频率块格式：
//! ```text
//!                       1                      2                      3
//!                      A1                     A1                     B2
//!  Frequencies --   1639.4301              3813.1504              3920.0148
//!  Red. masses --      1.0825                 1.0453                 1.0810
//!  IR Inten    --     67.7860                 3.4127                23.7470
//!  Raman Activ --      5.2937               107.3427                48.9817
//! ```
//!
//! 每遇到新的 "Harmonic frequencies" 段即清空已读数据（取最后一次频率计算）。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 调用
//! - 使用 `models/vibration.rs`

use crate::error::{Result, VibspecError};
use crate::models::{SpectralKind, VibrationalData};

use regex::Regex;
use std::path::Path;

const FORMAT: &str = "Gaussian";

/// 判断内容是否为 Gaussian 输出
pub fn is_gaussian_output(content: &str) -> bool {
    content
        .lines()
        .take(200)
        .any(|l| l.contains("Gaussian, Inc.") || l.contains("Entering Gaussian System"))
}

/// 解析已读入内存的 Gaussian 输出文件
pub fn parse_gaussian_output(content: &str, path: &Path) -> Result<VibrationalData> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    parse_gaussian_content(content, &name).map_err(|e| match e {
        VibspecError::ParseError { format, reason, .. } => VibspecError::ParseError {
            format,
            path: path.display().to_string(),
            reason,
        },
        other => other,
    })
}

/// 已读取的频率段
#[derive(Default)]
struct FrequencySection {
    frequencies: Vec<f64>,
    symmetries: Vec<String>,
    symmetries_complete: bool,
    ir: Vec<f64>,
    raman: Vec<f64>,
}

/// 从字符串内容解析
pub fn parse_gaussian_content(content: &str, name: &str) -> Result<VibrationalData> {
    // "Frequencies --" 恰好两个短横线；HPModes 的 "---" 不匹配
    let row_re = Regex::new(r"^\s*(Frequencies|IR Inten|Raman Activ)\s+--\s+(.*)$")
        .map_err(|e| parse_error(name, e.to_string()))?;

    let mut section = FrequencySection::default();
    let mut prev_line = "";

    for (lineno, line) in content.lines().enumerate() {
        if line.contains("Harmonic frequencies (cm**-1)") {
            section = FrequencySection {
                symmetries_complete: true,
                ..Default::default()
            };
            prev_line = line;
            continue;
        }

        if let Some(caps) = row_re.captures(line) {
            let values = parse_values(&caps[2]).ok_or_else(|| {
                parse_error(
                    name,
                    format!("unreadable {} values on line {}", &caps[1], lineno + 1),
                )
            })?;

            match &caps[1] {
                "Frequencies" => {
                    let labels: Vec<&str> = prev_line.split_whitespace().collect();
                    if labels.len() == values.len() && !looks_numeric(&labels) {
                        section
                            .symmetries
                            .extend(labels.iter().map(|s| s.to_string()));
                    } else {
                        section.symmetries_complete = false;
                    }
                    section.frequencies.extend(values);
                }
                "IR Inten" => section.ir.extend(values),
                "Raman Activ" => section.raman.extend(values),
                _ => {}
            }
        }

        prev_line = line;
    }

    if section.frequencies.is_empty() {
        return Err(parse_error(name, "no vibrational frequencies found".to_string()));
    }

    let mut data = VibrationalData::new(name, section.frequencies);
    if section.symmetries_complete && !section.symmetries.is_empty() {
        data = data.with_symmetries(section.symmetries)?;
    }
    if !section.ir.is_empty() {
        data = data.with_activities(SpectralKind::Ir, section.ir)?;
    }
    if !section.raman.is_empty() {
        data = data.with_activities(SpectralKind::Raman, section.raman)?;
    }

    Ok(data)
}

fn parse_values(s: &str) -> Option<Vec<f64>> {
    s.split_whitespace().map(|w| w.parse::<f64>().ok()).collect()
}

/// 模式编号行（"1  2  3"）不是对称性标签
fn looks_numeric(tokens: &[&str]) -> bool {
    tokens.iter().all(|t| t.parse::<f64>().is_ok())
}

fn parse_error(name: &str, reason: String) -> VibspecError {
    VibspecError::ParseError {
        format: FORMAT.to_string(),
        path: name.to_string(),
        reason,
    }
}
