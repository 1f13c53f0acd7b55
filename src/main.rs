//! # vibspec - 振动光谱卷积工具
//!
//! 将量子化学计算得到的离散振动模式（频率 + IR/Raman 活性）卷积为
//! 可直接作图的连续光谱，支持频率缩放和 Raman 活性到强度的换算。
//!
//! ## 子命令
//! - `run`   - 卷积 IR/Raman 光谱并写出光谱表（单文件或批量目录）
//! - `modes` - 列出振动模式
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (输出文件解析器)
//!   │     ├── spectrum/  (卷积、缩放、Raman 换算、光谱表)
//!   │     ├── batch/     (批量处理)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod spectrum;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
