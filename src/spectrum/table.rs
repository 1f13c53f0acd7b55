//! # 光谱输出表
//!
//! 制表符分隔的光谱表：两行表头，之后每个采样点一行。前若干行在光谱列之后
//! 附带逐模式注释列（模式号、标签、缩放频率、活性、[强度]、缩放因子、
//! 未缩放频率）。
//!
//! 该格式同时也是单独缩放因子的输入格式：`read_scale_factors` 读取
//! 上一次运行写出的表中的 "Scaling factors" 列，列位置由 `TableLayout` 给出。
//!
//! ## 依赖关系
//! - 被 `spectrum/pipeline.rs` 写出
//! - 被 `spectrum/scaling.rs` 读取
//! - 使用 `csv` 库写入

use crate::error::{Result, VibspecError};
use crate::models::SpectralKind;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 表头行数
pub const HEADER_LINES: usize = 2;

/// 数据行至少需要超过该列数才视为带注释的模式行
pub const MIN_ANNOTATED_FIELDS: usize = 6;

/// 缩放因子列名
const SCALE_FACTOR_COLUMN: &str = "Scaling factors";

/// 某一光谱类型的列布局
#[derive(Debug, Clone, Copy)]
pub struct TableLayout {
    kind: SpectralKind,
}

impl TableLayout {
    pub fn for_kind(kind: SpectralKind) -> Self {
        Self { kind }
    }

    pub fn has_intensity(&self) -> bool {
        self.kind == SpectralKind::Raman
    }

    fn spectrum_columns(&self) -> Vec<String> {
        let mut cols = vec![
            "Freq (cm-1)".to_string(),
            format!("{} act", self.kind.name()),
        ];
        if self.has_intensity() {
            cols.push("Intensity".to_string());
        }
        cols
    }

    fn mode_columns(&self) -> Vec<String> {
        let mut cols = vec![
            "Mode".to_string(),
            "Label".to_string(),
            "Freq (cm-1)".to_string(),
            format!("{} act", self.kind.name()),
        ];
        if self.has_intensity() {
            cols.push("Intensity".to_string());
        }
        cols.push(SCALE_FACTOR_COLUMN.to_string());
        cols.push("Unscaled freq".to_string());
        cols
    }

    /// 两行表头
    ///
    /// 第一行标出光谱区和模式区，第二行为列名；两区之间隔一个空列。
    pub fn header(&self) -> [Vec<String>; HEADER_LINES] {
        let spectrum = self.spectrum_columns();

        let mut banner = vec![String::new(); spectrum.len() + 2];
        banner[0] = "Spectrum".to_string();
        banner[spectrum.len() + 1] = "Normal Modes".to_string();

        let mut names = spectrum;
        names.push(String::new());
        names.extend(self.mode_columns());

        [banner, names]
    }

    /// 缩放因子列在数据行中的位置（与列名行对齐）
    pub fn scale_factor_column(&self) -> usize {
        let [_, names] = self.header();
        names
            .iter()
            .position(|c| c == SCALE_FACTOR_COLUMN)
            .unwrap_or(names.len() - 2)
    }
}

/// 逐模式注释
#[derive(Debug, Clone, PartialEq)]
pub struct ModeAnnotation {
    /// 模式号（从 1 开始）
    pub number: usize,
    pub label: String,
    /// 缩放后频率
    pub frequency: f64,
    pub activity: f64,
    /// Raman 强度（仅 Raman）
    pub intensity: Option<f64>,
    pub scale_factor: f64,
    pub unscaled_frequency: f64,
}

/// 输出表的一行
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumRow {
    pub x: f64,
    pub activity: f64,
    pub intensity: Option<f64>,
    pub mode: Option<ModeAnnotation>,
}

impl SpectrumRow {
    /// 序列化为字段列表
    pub fn fields(&self) -> Vec<String> {
        let mut fields = vec![format_float(self.x), format_float(self.activity)];
        if let Some(i) = self.intensity {
            fields.push(format_fixed(i));
        }

        if let Some(mode) = &self.mode {
            fields.push(String::new());
            fields.push(mode.number.to_string());
            fields.push(mode.label.clone());
            fields.push(format_float(mode.frequency));
            fields.push(format_float(mode.activity));
            if let Some(i) = mode.intensity {
                fields.push(format_fixed(i));
            }
            fields.push(format_float(mode.scale_factor));
            fields.push(format_float(mode.unscaled_frequency));
        }

        fields
    }
}

/// 最短往返表示，始终带小数点或指数（98.0, 1e-7）
pub fn format_float(v: f64) -> String {
    format!("{:?}", v)
}

/// 六位小数定点表示
fn format_fixed(v: f64) -> String {
    format!("{:.6}", v)
}

/// 写出光谱表
pub fn write_table(path: &Path, layout: &TableLayout, rows: &[SpectrumRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)?;

    for line in layout.header() {
        wtr.write_record(&line)?;
    }

    for row in rows {
        wtr.write_record(row.fields())?;
    }

    wtr.flush().map_err(|e| VibspecError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 从已有光谱表中读取单独缩放因子
///
/// `factors` 预先填充通用缩放因子，表中非空的缩放因子覆盖对应位置。
/// 缩放因子所在列由 `layout` 决定。跳过两行表头，遇到字段数不超过 6 的行
/// （或文件结束）即停止。返回处理过的模式行数。
pub fn read_scale_factors(
    path: &Path,
    layout: &TableLayout,
    factors: &mut [f64],
) -> Result<usize> {
    let column = layout.scale_factor_column();

    let file = File::open(path).map_err(|e| VibspecError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let reader = BufReader::new(file);

    let mut index = 0;
    for (lineno, line) in reader.lines().enumerate().skip(HEADER_LINES) {
        let line = line.map_err(|e| VibspecError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() <= MIN_ANNOTATED_FIELDS {
            break;
        }

        let value = fields.get(column).copied().unwrap_or("");
        if !value.is_empty() && index < factors.len() {
            factors[index] =
                value
                    .trim()
                    .parse()
                    .map_err(|_| VibspecError::InvalidScaleFactor {
                        path: path.display().to_string(),
                        line: lineno + 1,
                        value: value.to_string(),
                    })?;
        }
        index += 1;
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn annotated(number: usize, scale: f64) -> SpectrumRow {
        SpectrumRow {
            x: 100.0 * number as f64,
            activity: 0.5,
            intensity: None,
            mode: Some(ModeAnnotation {
                number,
                label: "A'".to_string(),
                frequency: 950.0,
                activity: 0.5,
                intensity: None,
                scale_factor: scale,
                unscaled_frequency: 1000.0,
            }),
        }
    }

    #[test]
    fn test_ir_header() {
        let [banner, names] = TableLayout::for_kind(SpectralKind::Ir).header();
        assert_eq!(banner.join("\t"), "Spectrum\t\t\tNormal Modes");
        assert_eq!(
            names.join("\t"),
            "Freq (cm-1)\tIR act\t\tMode\tLabel\tFreq (cm-1)\tIR act\tScaling factors\tUnscaled freq"
        );
    }

    #[test]
    fn test_raman_header() {
        let [banner, names] = TableLayout::for_kind(SpectralKind::Raman).header();
        assert_eq!(banner.join("\t"), "Spectrum\t\t\t\tNormal Modes");
        assert_eq!(names[2], "Intensity");
        assert_eq!(names[names.len() - 2], "Scaling factors");
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn test_row_fields() {
        let row = annotated(1, 0.98);
        let fields = row.fields();
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[2], "");
        assert_eq!(fields[3], "1");
        assert_eq!(fields[7], "0.98");

        let bare = SpectrumRow {
            x: 1200.0,
            activity: 0.0,
            intensity: Some(1.5),
            mode: None,
        };
        assert_eq!(bare.fields(), vec!["1200.0", "0.0", "1.500000"]);
    }

    #[test]
    fn test_read_scale_factors_from_written_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("h2oIR.txt");
        let rows = vec![
            annotated(1, 0.95),
            annotated(2, 0.96),
            annotated(3, 0.97),
            SpectrumRow {
                x: 400.0,
                activity: 0.0,
                intensity: None,
                mode: None,
            },
        ];
        write_table(&path, &TableLayout::for_kind(SpectralKind::Ir), &rows).unwrap();

        let mut factors = vec![1.0; 3];
        let n = read_scale_factors(&path, &TableLayout::for_kind(SpectralKind::Ir), &mut factors).unwrap();
        assert_eq!(n, 3);
        assert_eq!(factors, vec![0.95, 0.96, 0.97]);
    }

    #[test]
    fn test_scale_factor_column_follows_layout() {
        assert_eq!(TableLayout::for_kind(SpectralKind::Ir).scale_factor_column(), 7);
        assert_eq!(TableLayout::for_kind(SpectralKind::Raman).scale_factor_column(), 9);
    }

    #[test]
    fn test_read_scale_factors_from_raman_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("h2oRaman.txt");
        let rows: Vec<SpectrumRow> = [0.91, 0.92]
            .iter()
            .enumerate()
            .map(|(i, &scale)| SpectrumRow {
                x: 100.0 * (i + 1) as f64,
                activity: 0.5,
                intensity: Some(3.25),
                mode: Some(ModeAnnotation {
                    number: i + 1,
                    label: "A1".to_string(),
                    frequency: 950.0,
                    activity: 0.5,
                    intensity: Some(3.25),
                    scale_factor: scale,
                    unscaled_frequency: 1000.0,
                }),
            })
            .collect();
        let layout = TableLayout::for_kind(SpectralKind::Raman);
        write_table(&path, &layout, &rows).unwrap();

        let mut factors = vec![1.0; 2];
        let n = read_scale_factors(&path, &layout, &mut factors).unwrap();
        assert_eq!(n, 2);
        assert_eq!(factors, vec![0.91, 0.92]);
    }

    #[test]
    fn test_empty_scale_field_keeps_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edited.txt");
        let content = "h1\nh2\n\
            100.0\t0.1\t\t1\tA\t98.0\t0.1\t0.98\t100.0\n\
            200.0\t0.2\t\t2\tA\t490.0\t0.5\t\t500.0\n\
            300.0\t0.3\t\t3\tA\t900.0\t1.0\t0.9\t1000.0\n\
            400.0\t0.0\n\
            500.0\t0.0\t\t4\tA\t1.0\t1.0\t0.5\t1.0\n";
        fs::write(&path, content).unwrap();

        let mut factors = vec![0.97; 4];
        let n = read_scale_factors(&path, &TableLayout::for_kind(SpectralKind::Ir), &mut factors).unwrap();
        assert_eq!(n, 3);
        // 第 4 个模式位于短行之后，不会被读取
        assert_eq!(factors, vec![0.98, 0.97, 0.9, 0.97]);
    }

    #[test]
    fn test_invalid_scale_factor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "h1\nh2\n1.0\t0.1\t\t1\tA\t98.0\t0.1\tabc\t100.0\n").unwrap();

        let mut factors = vec![1.0; 1];
        let err = read_scale_factors(&path, &TableLayout::for_kind(SpectralKind::Ir), &mut factors).unwrap_err();
        assert!(matches!(err, VibspecError::InvalidScaleFactor { line: 3, .. }));
    }
}
