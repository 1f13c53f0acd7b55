//! # Raman 活性到强度换算
//!
//! 按 Krishnakumar et al., J. Mol. Struct. 702, 9 (2004) 将计算得到的
//! Raman 散射活性换算为给定激发波长和温度下的相对强度。
//!
//! ## 依赖关系
//! - 被 `spectrum/pipeline.rs` 调用

use crate::error::{Result, VibspecError};

/// 普朗克常数 (J·s)
const PLANCK: f64 = 6.626068e-34;
/// 光速 (m/s)
const SPEED_OF_LIGHT: f64 = 299792458.0;
/// 玻尔兹曼常数 (J/K)
const BOLTZMANN: f64 = 1.3806503e-23;
/// 比例常数
const PREFACTOR: f64 = 1e-13;

/// Raman 测量条件
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RamanConditions {
    /// 激发波长 (nm)
    pub excitation_nm: f64,
    /// 温度 (K)
    pub temperature_k: f64,
}

impl Default for RamanConditions {
    fn default() -> Self {
        RamanConditions {
            excitation_nm: 785.0,
            temperature_k: 293.15,
        }
    }
}

impl RamanConditions {
    pub fn validate(&self) -> Result<()> {
        if !(self.excitation_nm > 0.0) || !self.excitation_nm.is_finite() {
            return Err(VibspecError::DomainError(format!(
                "excitation wavelength must be positive (got {} nm)",
                self.excitation_nm
            )));
        }
        if !(self.temperature_k > 0.0) || !self.temperature_k.is_finite() {
            return Err(VibspecError::DomainError(format!(
                "temperature must be positive (got {} K)",
                self.temperature_k
            )));
        }
        Ok(())
    }
}

/// 将 Raman 活性换算为强度
///
/// `frequency` 为 (已缩放的) 振动频率 (cm⁻¹)。频率为零或 Boltzmann
/// 因子退化时返回 `DomainError`。
pub fn activity_to_intensity(
    activity: f64,
    frequency: f64,
    conditions: &RamanConditions,
) -> Result<f64> {
    conditions.validate()?;

    if frequency == 0.0 {
        return Err(VibspecError::DomainError(
            "cannot convert Raman activity of a zero-frequency mode".to_string(),
        ));
    }

    let excite_cm = 1e7 / conditions.excitation_nm;
    let numerator = PREFACTOR * (excite_cm - frequency).powi(4) * activity;
    let exponent = -(PLANCK * SPEED_OF_LIGHT * frequency) / (BOLTZMANN * conditions.temperature_k);
    let denominator = frequency * (1.0 - exponent.exp());

    if denominator == 0.0 {
        return Err(VibspecError::DomainError(format!(
            "degenerate Boltzmann factor at {:e} cm-1",
            frequency
        )));
    }

    let intensity = numerator / denominator;
    if !intensity.is_finite() {
        return Err(VibspecError::DomainError(format!(
            "non-finite Raman intensity at {:e} cm-1 (activity {:e})",
            frequency, activity
        )));
    }

    Ok(intensity)
}
