//! # 频率缩放因子
//!
//! 两种模式：
//! - 通用：所有模式使用同一个缩放因子
//! - 单独：从上一次运行写出的光谱表中读取逐模式缩放因子，
//!   文件不存在时退回通用缩放因子
//!
//! ## 依赖关系
//! - 被 `spectrum/pipeline.rs` 调用
//! - 使用 `spectrum/table.rs` 读取缩放因子列

use crate::error::Result;
use crate::models::SpectralKind;
use crate::spectrum::table::{self, TableLayout};

use std::path::{Path, PathBuf};

/// 缩放模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    #[default]
    General,
    Individual,
}

/// 实际使用的缩放因子来源
#[derive(Debug, Clone, PartialEq)]
pub enum ScaleSource {
    /// 通用缩放因子
    General(f64),
    /// 从光谱表读取
    Individual { path: PathBuf, rows: usize },
    /// 未找到单独缩放因子文件，退回通用缩放因子
    Fallback { path: PathBuf, factor: f64 },
}

/// 逐模式缩放因子
#[derive(Debug, Clone)]
pub struct ScaleFactorSet {
    factors: Vec<f64>,
    source: ScaleSource,
}

impl ScaleFactorSet {
    /// 所有模式使用同一缩放因子
    pub fn uniform(factor: f64, num_modes: usize) -> Self {
        Self {
            factors: vec![factor; num_modes],
            source: ScaleSource::General(factor),
        }
    }

    /// 按模式解析缩放因子
    ///
    /// `table_path` 为单独模式下要查找的 `kind` 类型光谱表。
    pub fn resolve(
        mode: ScaleMode,
        general: f64,
        num_modes: usize,
        table_path: &Path,
        kind: SpectralKind,
    ) -> Result<Self> {
        match mode {
            ScaleMode::General => Ok(Self::uniform(general, num_modes)),
            ScaleMode::Individual => {
                if !table_path.is_file() {
                    return Ok(Self {
                        factors: vec![general; num_modes],
                        source: ScaleSource::Fallback {
                            path: table_path.to_path_buf(),
                            factor: general,
                        },
                    });
                }

                let mut factors = vec![general; num_modes];
                let rows = table::read_scale_factors(
                    table_path,
                    &TableLayout::for_kind(kind),
                    &mut factors,
                )?;
                Ok(Self {
                    factors,
                    source: ScaleSource::Individual {
                        path: table_path.to_path_buf(),
                        rows,
                    },
                })
            }
        }
    }

    pub fn factors(&self) -> &[f64] {
        &self.factors
    }

    pub fn source(&self) -> &ScaleSource {
        &self.source
    }

    /// 缩放频率：scaled[i] = raw[i] · scale[i]
    ///
    /// 返回新的向量，不修改输入。
    pub fn apply(&self, raw: &[f64]) -> Vec<f64> {
        raw.iter()
            .zip(&self.factors)
            .map(|(f, s)| f * s)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_general_scaling() {
        let set = ScaleFactorSet::resolve(
            ScaleMode::General,
            0.98,
            3,
            Path::new("unused"),
            SpectralKind::Ir,
        )
        .unwrap();
        assert_eq!(set.factors(), &[0.98, 0.98, 0.98]);
        assert_eq!(set.source(), &ScaleSource::General(0.98));

        let raw = [100.0, 500.0, 1000.0];
        assert_eq!(set.apply(&raw), vec![98.0, 490.0, 980.0]);
    }

    #[test]
    fn test_per_mode_scaling_is_independent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("molIR.txt");
        fs::write(
            &path,
            "h1\nh2\n\
             1\t0\t\t1\tA\t0\t0\t0.5\t0\n\
             2\t0\t\t2\tA\t0\t0\t2.0\t0\n\
             3\t0\t\t3\tA\t0\t0\t1.0\t0\n",
        )
        .unwrap();

        let set = ScaleFactorSet::resolve(
            ScaleMode::Individual,
            1.0,
            3,
            &path,
            SpectralKind::Ir,
        )
        .unwrap();
        let raw = [-120.0, 500.0, 1000.0];
        let scaled = set.apply(&raw);
        for i in 0..3 {
            assert_eq!(scaled[i], raw[i] * set.factors()[i]);
        }
        assert_eq!(scaled, vec![-60.0, 1000.0, 1000.0]);
        assert!(matches!(set.source(), ScaleSource::Individual { rows: 3, .. }));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missingRaman.txt");

        let set = ScaleFactorSet::resolve(
            ScaleMode::Individual,
            0.96,
            4,
            &path,
            SpectralKind::Raman,
        )
        .unwrap();
        assert_eq!(set.factors(), &[0.96; 4]);
        assert!(matches!(set.source(), ScaleSource::Fallback { factor, .. } if *factor == 0.96));
    }

    #[test]
    fn test_short_table_leaves_trailing_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("molIR.txt");
        fs::write(&path, "h1\nh2\n1\t0\t\t1\tA\t0\t0\t0.9\t0\n2\t0\n").unwrap();

        let set = ScaleFactorSet::resolve(
            ScaleMode::Individual,
            0.97,
            3,
            &path,
            SpectralKind::Ir,
        )
        .unwrap();
        assert_eq!(set.factors(), &[0.9, 0.97, 0.97]);
        assert_eq!(
            set.source(),
            &ScaleSource::Individual {
                path: path.clone(),
                rows: 1
            }
        );
    }
}
