//! # 统一错误处理模块
//!
//! 定义 vibspec 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 输入错误：日志解析失败、缩放因子文件格式错误
//! - 定义域错误：非法的展宽/采样/Raman 换算参数
//! - I/O 错误：输出目录或文件创建失败
//!
//! 缺失的单独缩放因子文件不是错误，由 `spectrum::scaling` 降级处理。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// vibspec 统一错误类型
#[derive(Error, Debug)]
pub enum VibspecError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory: {path}")]
    DirectoryCreateError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 输入错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Inconsistent vibrational data: {0}")]
    InconsistentRecord(String),

    #[error("Invalid scaling factor '{value}' in {path} (line {line})")]
    InvalidScaleFactor {
        path: String,
        line: usize,
        value: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 定义域错误
    // ─────────────────────────────────────────────────────────────
    #[error("Domain error: {0}")]
    DomainError(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV / 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot error: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, VibspecError>;
