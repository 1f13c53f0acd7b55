//! # run 子命令 CLI 定义
//!
//! 输入为单个量子化学输出文件，或包含多个输出文件的目录（批量模式）。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/run.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::spectrum::{PlotFormat, ScaleMode};

/// 频率缩放方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum ScaleType {
    /// One scaling factor for every mode
    #[default]
    General,
    /// Per-mode scaling factors read from a previous output table
    Individual,
}

impl std::fmt::Display for ScaleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleType::General => write!(f, "general"),
            ScaleType::Individual => write!(f, "individual"),
        }
    }
}

impl From<ScaleType> for ScaleMode {
    fn from(t: ScaleType) -> Self {
        match t {
            ScaleType::General => ScaleMode::General,
            ScaleType::Individual => ScaleMode::Individual,
        }
    }
}

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PlotOutputFormat {
    /// PNG image
    Png,
    /// SVG vector image
    Svg,
}

impl From<PlotOutputFormat> for PlotFormat {
    fn from(f: PlotOutputFormat) -> Self {
        match f {
            PlotOutputFormat::Png => PlotFormat::Png,
            PlotOutputFormat::Svg => PlotFormat::Svg,
        }
    }
}

/// run 子命令参数
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input: quantum chemistry output file (Gaussian .log/.out) or a directory of them
    pub input: PathBuf,

    /// Start of the frequency axis (cm-1)
    #[arg(allow_negative_numbers = true)]
    pub start: f64,

    /// End of the frequency axis (cm-1)
    #[arg(allow_negative_numbers = true)]
    pub end: f64,

    /// Number of sample points on the frequency axis
    pub numpoints: usize,

    /// Full Width at Half Maximum (FWHM) of the Lorentzian line shape (cm-1)
    #[arg(long, env = "VIBSPEC_WIDTH", default_value_t = 10.0)]
    pub width: f64,

    /// Frequency scaling mode
    #[arg(long, value_enum, default_value = "general")]
    pub scale: ScaleType,

    /// General scaling factor (also used for modes without an individual factor)
    #[arg(long, default_value_t = 1.0)]
    pub scale_factor: f64,

    /// Raman excitation wavelength (nm)
    #[arg(long, env = "VIBSPEC_EXCITATION", default_value_t = 785.0)]
    pub excitation: f64,

    /// Temperature for the Raman intensity conversion (K)
    #[arg(long, env = "VIBSPEC_TEMPERATURE", default_value_t = 293.15)]
    pub temperature: f64,

    // ─────────────────────────────────────────────────────────────
    // 绘图参数
    // ─────────────────────────────────────────────────────────────
    /// Also save a plot of each spectrum next to the output tables
    #[arg(long, default_value_t = false)]
    pub plot: bool,

    /// Plot image format
    #[arg(long, value_enum, default_value = "png")]
    pub plot_format: PlotOutputFormat,

    /// Plot width in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 1200)]
    pub plot_width: u32,

    /// Plot height in pixels (PNG) or points (SVG)
    #[arg(long, default_value_t = 800)]
    pub plot_height: u32,

    // ─────────────────────────────────────────────────────────────
    // 批量处理参数
    // ─────────────────────────────────────────────────────────────
    /// Glob pattern for input files (batch mode, e.g., "*.log,*.out")
    #[arg(long, default_value = "*.log,*.out")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto, batch mode only)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories (batch mode)
    #[arg(long, default_value_t = false)]
    pub recursive: bool,
}
