//! # 谱线线型
//!
//! 把单个 (峰位, 峰高) 展宽为连续曲线上某点的贡献值。
//!
//! ## 依赖关系
//! - 被 `spectrum/synthesizer.rs` 使用

/// 谱线线型函数
///
/// `width` 为半高全宽 (FWHM)，与 `x`, `peak` 同单位 (cm⁻¹)。
pub trait LineShape {
    /// 线型名称
    fn name(&self) -> &'static str;

    /// 计算峰 `(peak, height)` 在 `x` 处的贡献
    fn evaluate(&self, x: f64, peak: f64, height: f64, width: f64) -> f64;
}

/// 归一化到峰高的 Lorentz 线型
///
/// f(x) = height · a / ((peak − x)² + a)，其中 a = FWHM² / 4
#[derive(Debug, Clone, Copy, Default)]
pub struct Lorentzian;

impl LineShape for Lorentzian {
    fn name(&self) -> &'static str {
        "lorentzian"
    }

    fn evaluate(&self, x: f64, peak: f64, height: f64, width: f64) -> f64 {
        let a = width * width / 4.0;
        let delta = peak - x;
        // a / a == 1 保证峰顶处严格等于 height
        height * (a / (delta * delta + a))
    }
}
