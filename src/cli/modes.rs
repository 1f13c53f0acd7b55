//! # modes 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/modes.rs`

use clap::Args;
use std::path::PathBuf;

/// modes 子命令参数
#[derive(Args, Debug)]
pub struct ModesArgs {
    /// Quantum chemistry output file (Gaussian .log/.out)
    pub input: PathBuf,

    /// Also write the mode list to a CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}
