//! # 数据模型模块
//!
//! 定义振动模式数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `spectrum/` 和 `commands/` 使用
//! - 子模块: vibration

pub mod vibration;

pub use vibration::{Mode, SpectralKind, VibrationalData};
