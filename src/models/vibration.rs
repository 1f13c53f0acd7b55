//! # 振动模式数据模型
//!
//! 存储从量子化学输出中提取的振动频率、对称性标签和 IR/Raman 活性。
//!
//! ## 依赖关系
//! - 被 `parsers/gaussian_log.rs` 构造
//! - 被 `spectrum/pipeline.rs`, `commands/modes.rs` 使用

use crate::error::{Result, VibspecError};
use serde::{Deserialize, Serialize};

/// 缺失对称性标签时的占位符
pub const UNKNOWN_SYMMETRY: &str = "?";

/// 光谱类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectralKind {
    Ir,
    Raman,
}

impl SpectralKind {
    /// 所有支持的光谱类型（按处理顺序）
    pub const ALL: [SpectralKind; 2] = [SpectralKind::Ir, SpectralKind::Raman];

    /// 输出文件名和表头中使用的名称
    pub fn name(&self) -> &'static str {
        match self {
            SpectralKind::Ir => "IR",
            SpectralKind::Raman => "Raman",
        }
    }
}

impl std::fmt::Display for SpectralKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 单个振动简正模式
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    /// 模式序号（从 0 开始）
    pub index: usize,

    /// 未缩放频率 (cm⁻¹)，虚频为负
    pub frequency: f64,

    /// 对称性标签
    pub symmetry: String,

    /// IR 强度
    pub ir_activity: Option<f64>,

    /// Raman 活性
    pub raman_activity: Option<f64>,
}

/// 振动数据记录
///
/// 所有可选序列与频率序列等长，由构造方法保证。
#[derive(Debug, Clone)]
pub struct VibrationalData {
    /// 来源名称（通常为日志文件名）
    pub name: String,

    frequencies: Vec<f64>,
    symmetries: Option<Vec<String>>,
    ir_activities: Option<Vec<f64>>,
    raman_activities: Option<Vec<f64>>,
}

impl VibrationalData {
    pub fn new(name: impl Into<String>, frequencies: Vec<f64>) -> Self {
        VibrationalData {
            name: name.into(),
            frequencies,
            symmetries: None,
            ir_activities: None,
            raman_activities: None,
        }
    }

    /// 附加对称性标签
    pub fn with_symmetries(mut self, symmetries: Vec<String>) -> Result<Self> {
        self.check_len("symmetry labels", symmetries.len())?;
        self.symmetries = Some(symmetries);
        Ok(self)
    }

    /// 附加某一光谱类型的活性
    pub fn with_activities(mut self, kind: SpectralKind, activities: Vec<f64>) -> Result<Self> {
        self.check_len(&format!("{} activities", kind), activities.len())?;
        match kind {
            SpectralKind::Ir => self.ir_activities = Some(activities),
            SpectralKind::Raman => self.raman_activities = Some(activities),
        }
        Ok(self)
    }

    fn check_len(&self, what: &str, len: usize) -> Result<()> {
        if len != self.frequencies.len() {
            return Err(VibspecError::InconsistentRecord(format!(
                "{} has {} {} but {} frequencies",
                self.name,
                len,
                what,
                self.frequencies.len()
            )));
        }
        Ok(())
    }

    /// 模式数
    pub fn num_modes(&self) -> usize {
        self.frequencies.len()
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn symmetries(&self) -> Option<&[String]> {
        self.symmetries.as_deref()
    }

    /// 对称性标签，缺失时以 "?" 填充
    pub fn symmetries_or_placeholder(&self) -> Vec<String> {
        match self.symmetries() {
            Some(s) => s.to_vec(),
            None => vec![UNKNOWN_SYMMETRY.to_string(); self.frequencies.len()],
        }
    }

    /// 指定光谱类型的活性（不存在时返回 None）
    pub fn activities(&self, kind: SpectralKind) -> Option<&[f64]> {
        match kind {
            SpectralKind::Ir => self.ir_activities.as_deref(),
            SpectralKind::Raman => self.raman_activities.as_deref(),
        }
    }

    /// 记录中存在的光谱类型
    pub fn available_kinds(&self) -> Vec<SpectralKind> {
        SpectralKind::ALL
            .into_iter()
            .filter(|k| self.activities(*k).is_some())
            .collect()
    }

    /// 展开为逐模式视图
    pub fn modes(&self) -> Vec<Mode> {
        let labels = self.symmetries_or_placeholder();
        self.frequencies
            .iter()
            .enumerate()
            .map(|(i, &frequency)| Mode {
                index: i,
                frequency,
                symmetry: labels[i].clone(),
                ir_activity: self.ir_activities.as_ref().map(|a| a[i]),
                raman_activity: self.raman_activities.as_ref().map(|a| a[i]),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_activities_rejected() {
        let data = VibrationalData::new("h2o", vec![1600.0, 3700.0, 3800.0]);
        let err = data.with_activities(SpectralKind::Ir, vec![1.0, 2.0]);
        assert!(matches!(err, Err(VibspecError::InconsistentRecord(_))));
    }

    #[test]
    fn test_placeholder_symmetries() {
        let data = VibrationalData::new("h2o", vec![1600.0, 3700.0]);
        assert_eq!(data.symmetries_or_placeholder(), vec!["?", "?"]);
        assert!(data.available_kinds().is_empty());
    }

    #[test]
    fn test_modes_view() {
        let data = VibrationalData::new("h2o", vec![1600.0, 3700.0])
            .with_symmetries(vec!["A1".into(), "B2".into()])
            .unwrap()
            .with_activities(SpectralKind::Raman, vec![5.0, 80.0])
            .unwrap();

        let modes = data.modes();
        assert_eq!(modes.len(), 2);
        assert_eq!(modes[1].index, 1);
        assert_eq!(modes[1].symmetry, "B2");
        assert_eq!(modes[1].ir_activity, None);
        assert_eq!(modes[1].raman_activity, Some(80.0));
        assert_eq!(data.available_kinds(), vec![SpectralKind::Raman]);
    }
}
