//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `run`: 卷积 IR/Raman 光谱并写出光谱表
//! - `modes`: 列出振动模式
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: run, modes

pub mod modes;
pub mod run;

use clap::{Parser, Subcommand};

/// vibspec - 振动光谱卷积工具
#[derive(Parser)]
#[command(name = "vibspec")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Convolute computed IR and Raman vibrational modes into continuous spectra",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Convolute IR/Raman spectra from a quantum chemistry output file (or a directory of them)
    Run(run::RunArgs),

    /// List the vibrational modes found in a quantum chemistry output file
    Modes(modes::ModesArgs),
}
