//! # 振动光谱模块
//!
//! 将离散的振动模式（频率 + IR/Raman 活性）卷积为连续光谱。
//!
//! ## 子模块
//! - `lineshape`: 谱线线型（Lorentz）
//! - `synthesizer`: 采样轴与卷积
//! - `scaling`: 频率缩放因子
//! - `raman`: Raman 活性到强度换算
//! - `table`: 光谱表读写
//! - `plot`: 图表生成
//! - `pipeline`: 完整处理流程
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 使用 `models/vibration.rs`

pub mod lineshape;
pub mod pipeline;
pub mod plot;
pub mod raman;
pub mod scaling;
pub mod synthesizer;
pub mod table;

pub use pipeline::{PipelineConfig, SpectrumSettings};
pub use plot::{PlotFormat, PlotOptions};
pub use raman::RamanConditions;
pub use scaling::{ScaleMode, ScaleSource};
