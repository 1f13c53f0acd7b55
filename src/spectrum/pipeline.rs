//! # 振动光谱处理流程
//!
//! 对记录中存在的每种光谱类型（IR、Raman）独立执行：
//! 1. 复制原始频率和标签
//! 2. 解析缩放因子（通用或单独）
//! 3. 缩放频率
//! 4. 卷积活性光谱；Raman 额外换算强度并卷积第二通道
//! 5. 数值噪声置零
//! 6. 写出光谱表（可选绘图）
//!
//! 输出目录由调用方显式传入，所有光谱类型共用。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `spectrum/` 下的全部子模块
//! - 使用 `models/vibration.rs` 的 VibrationalData

use crate::error::{Result, VibspecError};
use crate::models::{SpectralKind, VibrationalData};
use crate::spectrum::lineshape::{LineShape, Lorentzian};
use crate::spectrum::plot::{self, PlotOptions};
use crate::spectrum::raman::{self, RamanConditions};
use crate::spectrum::scaling::{ScaleFactorSet, ScaleMode, ScaleSource};
use crate::spectrum::synthesizer::{self, PeakList, SampledAxis};
use crate::spectrum::table::{self, ModeAnnotation, SpectrumRow, TableLayout};

use std::fs;
use std::path::{Path, PathBuf};

/// 输出子目录名
pub const OUTPUT_FOLDER: &str = "gausssum3";

/// 低于该绝对值的采样值视为数值噪声
pub const NOISE_FLOOR: f64 = 1e-20;

/// 展宽与换算参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumSettings {
    /// 谱线半高全宽 (cm⁻¹)
    pub width: f64,
    pub scale_mode: ScaleMode,
    /// 通用缩放因子
    pub scale_factor: f64,
    pub raman: RamanConditions,
}

impl Default for SpectrumSettings {
    fn default() -> Self {
        SpectrumSettings {
            width: 10.0,
            scale_mode: ScaleMode::General,
            scale_factor: 1.0,
            raman: RamanConditions::default(),
        }
    }
}

/// 单次运行的完整配置
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub start: f64,
    pub end: f64,
    pub numpts: usize,
    pub settings: SpectrumSettings,
    /// 光谱表输出目录
    pub output_dir: PathBuf,
    /// 输出文件名前缀（通常为输入文件名）
    pub basename: String,
    pub plot: Option<PlotOptions>,
}

impl PipelineConfig {
    /// 以默认参数为输入文件创建配置，输出目录为输入文件旁的 `gausssum3`
    pub fn for_input(input: &Path, start: f64, end: f64, numpts: usize) -> Self {
        let basename = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());

        PipelineConfig {
            start,
            end,
            numpts,
            settings: SpectrumSettings::default(),
            output_dir: output_dir_for(input),
            basename,
            plot: None,
        }
    }

    /// 某一光谱类型的输出表路径
    pub fn table_path(&self, kind: SpectralKind) -> PathBuf {
        self.output_dir
            .join(format!("{}{}.txt", self.basename, kind.name()))
    }
}

/// 输入文件对应的输出目录
pub fn output_dir_for(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(OUTPUT_FOLDER)
}

/// 单个光谱类型的处理结果
#[derive(Debug, Clone)]
pub struct KindReport {
    pub kind: SpectralKind,
    pub table_path: PathBuf,
    pub plot_path: Option<PathBuf>,
    pub scale_source: ScaleSource,
    pub num_modes: usize,
}

/// 一次运行的处理结果
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub created_output_dir: bool,
    pub kinds: Vec<KindReport>,
}

/// 执行完整流程
///
/// 记录中没有任何活性数据时返回空报告，不创建输出目录。
pub fn run(data: &VibrationalData, config: &PipelineConfig) -> Result<PipelineReport> {
    let axis = SampledAxis::new(config.start, config.end, config.numpts)?;

    let kinds = data.available_kinds();
    let mut report = PipelineReport::default();
    if kinds.is_empty() {
        return Ok(report);
    }

    if data.num_modes() > axis.numpts() {
        return Err(VibspecError::DomainError(format!(
            "{} modes cannot be annotated on {} sample points; increase the number of points",
            data.num_modes(),
            axis.numpts()
        )));
    }

    report.created_output_dir = ensure_output_dir(&config.output_dir)?;

    for kind in kinds {
        report.kinds.push(process_kind(data, kind, &axis, config)?);
    }

    Ok(report)
}

/// 幂等地创建输出目录，返回是否新建
pub fn ensure_output_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|e| VibspecError::DirectoryCreateError {
        path: dir.display().to_string(),
        source: e,
    })?;
    Ok(true)
}

fn process_kind(
    data: &VibrationalData,
    kind: SpectralKind,
    axis: &SampledAxis,
    config: &PipelineConfig,
) -> Result<KindReport> {
    let settings = &config.settings;
    let activities = match data.activities(kind) {
        Some(a) => a.to_vec(),
        None => {
            return Err(VibspecError::InconsistentRecord(format!(
                "no {} activities in {}",
                kind, data.name
            )))
        }
    };
    let unscaled = data.frequencies().to_vec();
    let labels = data.symmetries_or_placeholder();

    let table_path = config.table_path(kind);
    let scale = ScaleFactorSet::resolve(
        settings.scale_mode,
        settings.scale_factor,
        unscaled.len(),
        &table_path,
        kind,
    )?;
    let scaled = scale.apply(&unscaled);

    let mut channels: Vec<PeakList> = vec![scaled
        .iter()
        .copied()
        .zip(activities.iter().copied())
        .collect()];

    let intensities = match kind {
        SpectralKind::Raman => {
            let values = scaled
                .iter()
                .zip(&activities)
                .map(|(&f, &a)| raman::activity_to_intensity(a, f, &settings.raman))
                .collect::<Result<Vec<f64>>>()?;
            channels.push(scaled.iter().copied().zip(values.iter().copied()).collect());
            Some(values)
        }
        SpectralKind::Ir => None,
    };

    let shape = Lorentzian;
    let spectrum = synthesizer::synthesize(axis, &channels, settings.width, &shape)?
        .clamp_noise(NOISE_FLOOR);

    let rows: Vec<SpectrumRow> = (0..axis.numpts())
        .map(|i| SpectrumRow {
            x: axis.row_position(i),
            activity: spectrum.value(i, 0),
            intensity: intensities.as_ref().map(|_| spectrum.value(i, 1)),
            mode: (i < unscaled.len()).then(|| ModeAnnotation {
                number: i + 1,
                label: labels[i].clone(),
                frequency: scaled[i],
                activity: activities[i],
                intensity: intensities.as_ref().map(|v| v[i]),
                scale_factor: scale.factors()[i],
                unscaled_frequency: unscaled[i],
            }),
        })
        .collect();

    table::write_table(&table_path, &TableLayout::for_kind(kind), &rows)?;

    let plot_path = match &config.plot {
        Some(options) => {
            let path = config.output_dir.join(format!(
                "{}{}.{}",
                config.basename,
                kind.name(),
                options.format.extension()
            ));
            let title = plot_title(kind, shape.name(), settings.width, scale.source());
            plot::plot_spectrum(&spectrum, kind, &title, &path, options)?;
            Some(path)
        }
        None => None,
    };

    Ok(KindReport {
        kind,
        table_path,
        plot_path,
        scale_source: scale.source().clone(),
        num_modes: unscaled.len(),
    })
}

fn plot_title(kind: SpectralKind, shape: &str, width: f64, source: &ScaleSource) -> String {
    let scaling = match source {
        ScaleSource::General(f) | ScaleSource::Fallback { factor: f, .. } => format!("scaled by {}", f),
        ScaleSource::Individual { .. } => "individual scaling factors".to_string(),
    };
    format!("{} spectrum ({}, FWHM {} cm⁻¹, {})", kind, shape, width, scaling)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_mode_ir() -> VibrationalData {
        VibrationalData::new("mol.log", vec![100.0, 500.0, 1000.0])
            .with_activities(SpectralKind::Ir, vec![0.1, 0.5, 1.0])
            .unwrap()
    }

    fn config_in(dir: &Path, start: f64, end: f64, numpts: usize) -> PipelineConfig {
        let input = dir.join("mol.log");
        PipelineConfig::for_input(&input, start, end, numpts)
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_output_dir_next_to_input() {
        let dir = output_dir_for(Path::new("/data/calcs/h2o.log"));
        assert_eq!(dir, PathBuf::from("/data/calcs/gausssum3"));
    }

    #[test]
    fn test_three_mode_ir_end_to_end() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_in(tmp.path(), 0.0, 1200.0, 13);
        config.settings.scale_factor = 0.98;

        let data = three_mode_ir();
        let report = run(&data, &config).unwrap();

        assert!(report.created_output_dir);
        assert_eq!(report.kinds.len(), 1);
        let ir = &report.kinds[0];
        assert_eq!(ir.kind, SpectralKind::Ir);
        assert_eq!(ir.table_path, tmp.path().join("gausssum3").join("mol.logIR.txt"));
        assert_eq!(ir.scale_source, ScaleSource::General(0.98));

        let lines = read_lines(&ir.table_path);
        assert_eq!(lines.len(), 2 + 13);

        let data_rows: Vec<Vec<&str>> = lines[2..].iter().map(|l| l.split('\t').collect()).collect();
        for (i, fields) in data_rows.iter().enumerate() {
            if i < 3 {
                assert_eq!(fields.len(), 9, "row {}", i);
                assert_eq!(fields[3], (i + 1).to_string());
                assert_eq!(fields[4], "?");
                assert_eq!(fields[7], "0.98");
            } else {
                assert_eq!(fields.len(), 2, "row {}", i);
            }
        }

        // 缩放频率和未缩放频率
        assert_eq!(data_rows[0][5], "98.0");
        assert_eq!(data_rows[1][5], "490.0");
        assert_eq!(data_rows[2][5], "980.0");
        assert_eq!(data_rows[2][8], "1000.0");

        // 第一行横坐标为 1200/13，最后一行为 1200
        let x0: f64 = data_rows[0][0].parse().unwrap();
        assert!((x0 - 1200.0 / 13.0).abs() < 1e-9);
        let x_last: f64 = data_rows[12][0].parse().unwrap();
        assert!((x_last - 1200.0).abs() < 1e-9);

        // 采样点 x=100 处的卷积值
        let y1: f64 = data_rows[1][1].parse().unwrap();
        assert!((y1 - 0.0863213478361067).abs() < 1e-12);

        // 原始记录不被修改
        assert_eq!(data.frequencies(), &[100.0, 500.0, 1000.0]);
    }

    #[test]
    fn test_noise_written_as_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path(), 0.0, 1.0e7, 3);
        let data = VibrationalData::new("mol.log", vec![0.0])
            .with_activities(SpectralKind::Ir, vec![1.0e-9])
            .unwrap();

        let report = run(&data, &config).unwrap();
        let lines = read_lines(&report.kinds[0].table_path);
        let last: Vec<&str> = lines[4].split('\t').collect();
        assert_eq!(last, vec!["10000000.0", "0.0"]);
    }

    #[test]
    fn test_raman_two_channels() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path(), 400.0, 1600.0, 25);
        let data = VibrationalData::new("mol.log", vec![800.0, 1000.0])
            .with_symmetries(vec!["A1".into(), "B2".into()])
            .unwrap()
            .with_activities(SpectralKind::Raman, vec![2.0, 1.0])
            .unwrap();

        let report = run(&data, &config).unwrap();
        assert_eq!(report.kinds.len(), 1);
        let raman_report = &report.kinds[0];
        assert_eq!(raman_report.kind, SpectralKind::Raman);

        let lines = read_lines(&raman_report.table_path);
        assert_eq!(lines.len(), 27);
        let second: Vec<&str> = lines[3].split('\t').collect();
        assert_eq!(second.len(), 11);
        assert_eq!(second[5], "B2");

        let expected =
            raman::activity_to_intensity(1.0, 1000.0, &RamanConditions::default()).unwrap();
        assert_eq!(second[8], format!("{:.6}", expected));
        assert_eq!(second[9], "1.0");
    }

    #[test]
    fn test_individual_scaling_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let data = three_mode_ir();

        let mut first = config_in(tmp.path(), 0.0, 1200.0, 13);
        first.settings.scale_factor = 0.9;
        run(&data, &first).unwrap();

        let mut second = config_in(tmp.path(), 0.0, 1200.0, 13);
        second.settings.scale_mode = ScaleMode::Individual;
        second.settings.scale_factor = 1.0;
        let report = run(&data, &second).unwrap();

        let ir = &report.kinds[0];
        assert!(matches!(ir.scale_source, ScaleSource::Individual { rows: 3, .. }));
        assert!(!report.created_output_dir);

        let lines = read_lines(&ir.table_path);
        let row: Vec<&str> = lines[4].split('\t').collect();
        assert_eq!(row[7], "0.9");
        assert_eq!(row[5], "900.0");
    }

    #[test]
    fn test_individual_without_table_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_in(tmp.path(), 0.0, 1200.0, 13);
        config.settings.scale_mode = ScaleMode::Individual;
        config.settings.scale_factor = 0.97;

        let report = run(&three_mode_ir(), &config).unwrap();
        assert!(matches!(
            report.kinds[0].scale_source,
            ScaleSource::Fallback { factor, .. } if factor == 0.97
        ));
    }

    #[test]
    fn test_more_modes_than_points_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path(), 0.0, 1200.0, 2);
        let err = run(&three_mode_ir(), &config).unwrap_err();
        assert!(matches!(err, VibspecError::DomainError(_)));
        assert!(!tmp.path().join("gausssum3").exists());
    }

    #[test]
    fn test_no_activities_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path(), 0.0, 1200.0, 13);
        let data = VibrationalData::new("mol.log", vec![100.0]);

        let report = run(&data, &config).unwrap();
        assert!(report.kinds.is_empty());
        assert!(!tmp.path().join("gausssum3").exists());
    }

    #[test]
    fn test_no_activities_skipped_before_point_check() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path(), 0.0, 100.0, 2);
        let data = VibrationalData::new("mol.log", vec![1.0, 2.0, 3.0]);

        let report = run(&data, &config).unwrap();
        assert!(report.kinds.is_empty());
        assert!(!report.created_output_dir);
        assert!(!tmp.path().join("gausssum3").exists());
    }

    #[test]
    fn test_zero_frequency_raman_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path(), 0.0, 1200.0, 13);
        let data = VibrationalData::new("mol.log", vec![0.0, 500.0])
            .with_activities(SpectralKind::Raman, vec![1.0, 1.0])
            .unwrap();

        assert!(matches!(
            run(&data, &config),
            Err(VibspecError::DomainError(_))
        ));
    }
}
