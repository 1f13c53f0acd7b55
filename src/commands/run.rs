//! # run 命令实现
//!
//! 读取量子化学输出文件，卷积 IR/Raman 光谱并写出光谱表。
//!
//! ## 功能
//! - 单文件模式：逐步打印处理信息
//! - 目录模式：并行批量处理（rayon），汇总成功/跳过/失败
//!
//! ## 依赖关系
//! - 使用 `cli/run.rs` 定义的 RunArgs
//! - 使用 `parsers/` 读取振动数据
//! - 使用 `spectrum/pipeline.rs` 执行卷积
//! - 使用 `batch/` 模块进行批量处理

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::run::RunArgs;
use crate::error::{Result, VibspecError};
use crate::models::VibrationalData;
use crate::parsers;
use crate::spectrum::pipeline::{self, KindReport};
use crate::spectrum::{PipelineConfig, PlotOptions, RamanConditions, ScaleSource, SpectrumSettings};
use crate::utils::output;

use std::path::{Path, PathBuf};

/// 执行 run 命令
pub fn execute(args: RunArgs) -> Result<()> {
    output::print_header("Vibrational Spectrum Convolution");

    if args.input.is_file() {
        execute_single_file(&args)
    } else if args.input.is_dir() {
        execute_batch(&args)
    } else {
        Err(VibspecError::FileNotFound {
            path: args.input.display().to_string(),
        })
    }
}

/// 由命令行参数构造流程配置
fn build_config(input: &Path, args: &RunArgs) -> PipelineConfig {
    let mut config = PipelineConfig::for_input(input, args.start, args.end, args.numpoints);
    config.settings = SpectrumSettings {
        width: args.width,
        scale_mode: args.scale.into(),
        scale_factor: args.scale_factor,
        raman: RamanConditions {
            excitation_nm: args.excitation,
            temperature_k: args.temperature,
        },
    };
    config.plot = args.plot.then(|| PlotOptions {
        format: args.plot_format.into(),
        width: args.plot_width,
        height: args.plot_height,
    });
    config
}

/// 单文件模式
fn execute_single_file(args: &RunArgs) -> Result<()> {
    output::print_info(&format!("Reading '{}'", args.input.display()));

    let data = parsers::parse_vibrational_file(&args.input)?;
    output::print_success(&format!(
        "Loaded {} vibrational modes ({})",
        data.num_modes(),
        describe_kinds(&data)
    ));

    let config = build_config(&args.input, args);
    output::print_info(&format!(
        "Axis: {} to {} cm-1, {} points, FWHM = {} cm-1",
        config.start, config.end, config.numpts, config.settings.width
    ));

    if data.available_kinds().is_empty() {
        output::print_warning("No IR or Raman activities found, nothing to convolute");
        return Ok(());
    }

    let report = pipeline::run(&data, &config)?;

    if report.created_output_dir {
        output::print_info(&format!(
            "Created new output folder '{}'",
            config.output_dir.display()
        ));
    }

    for kind in &report.kinds {
        print_kind_report(kind);
    }

    output::print_done("Finished");
    Ok(())
}

/// 打印单个光谱类型的处理信息
fn print_kind_report(report: &KindReport) {
    match &report.scale_source {
        ScaleSource::General(factor) => output::print_info(&format!(
            "{}: scaled with a general scaling factor of {}",
            report.kind, factor
        )),
        ScaleSource::Individual { path, rows } => output::print_info(&format!(
            "{}: read individual scaling factors for {} of {} modes from '{}'",
            report.kind,
            rows.min(&report.num_modes),
            report.num_modes,
            path.display()
        )),
        ScaleSource::Fallback { path, factor } => output::print_warning(&format!(
            "{}: no scaling factors found at '{}', using general scaling factor of {} instead",
            report.kind,
            path.display(),
            factor
        )),
    }

    output::print_written(
        &format!("{} spectrum", report.kind),
        &report.table_path.display().to_string(),
    );
    if let Some(plot) = &report.plot_path {
        output::print_written(
            &format!("{} plot", report.kind),
            &plot.display().to_string(),
        );
    }
}

fn describe_kinds(data: &VibrationalData) -> String {
    let kinds: Vec<&str> = data.available_kinds().iter().map(|k| k.name()).collect();
    if kinds.is_empty() {
        "no IR or Raman activities".to_string()
    } else {
        format!("{} activities", kinds.join(" + "))
    }
}

/// 批量处理模式
fn execute_batch(args: &RunArgs) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", args.input.display()));

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} output files", files.len()));

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} parallel jobs", runner.jobs()));

    let result = runner.run(&files, |file| process_batch_file(file, args))?;

    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} success, {} skipped, {} failed",
        result.success, result.skipped, result.failed
    ));

    for msg in result.successes.iter().take(10) {
        output::print_success(msg);
    }
    if result.successes.len() > 10 {
        output::print_info(&format!("  ... and {} more", result.successes.len() - 10));
    }

    for msg in result.skips.iter().take(10) {
        output::print_skip(msg);
    }

    if !result.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
        return Err(VibspecError::Other(format!(
            "{} of {} files failed",
            result.failed,
            result.total()
        )));
    }

    Ok(())
}

/// 处理批量模式中的单个文件
fn process_batch_file(input: &PathBuf, args: &RunArgs) -> ProcessResult {
    let data = match parsers::parse_vibrational_file(input) {
        Ok(d) => d,
        Err(e) => return ProcessResult::Failed(input.display().to_string(), e.to_string()),
    };

    if data.available_kinds().is_empty() {
        return ProcessResult::Skipped(format!(
            "{}: no IR or Raman activities",
            input.display()
        ));
    }

    let config = build_config(input, args);
    match pipeline::run(&data, &config) {
        Ok(report) => {
            let outputs: Vec<String> = report
                .kinds
                .iter()
                .map(|k| k.table_path.display().to_string())
                .collect();
            ProcessResult::Success(format!("{}: {}", input.display(), outputs.join(", ")))
        }
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}
