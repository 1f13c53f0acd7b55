//! # 解析器模块
//!
//! 提供量子化学输出文件的振动数据解析器。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: gaussian_log

pub mod gaussian_log;

use crate::error::{Result, VibspecError};
use crate::models::VibrationalData;
use std::fs;
use std::path::Path;

/// 根据文件内容识别程序并解析振动数据
pub fn parse_vibrational_file(path: &Path) -> Result<VibrationalData> {
    if !path.is_file() {
        return Err(VibspecError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let bytes = fs::read(path).map_err(|e| VibspecError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    let content = String::from_utf8_lossy(&bytes);

    if gaussian_log::is_gaussian_output(&content) {
        return gaussian_log::parse_gaussian_output(&content, path);
    }

    Err(VibspecError::ParseError {
        format: "quantum chemistry output".to_string(),
        path: path.display().to_string(),
        reason: "unrecognised program (only Gaussian output is supported)".to_string(),
    })
}
