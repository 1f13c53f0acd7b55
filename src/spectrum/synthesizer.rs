//! # 光谱卷积
//!
//! 在等间距采样轴上对一组或多组峰列表求和线型贡献，得到连续光谱。
//!
//! ## 算法
//! S[i][c] = Σ shape(x_i, pos, height, width)，对通道 c 中的所有峰求和，
//! x_i = start + i·(end − start)/(numpts − 1)。
//!
//! 复杂度 O(numpts × 峰总数)。振动模式通常只有几十到几百个，直接求和即可。
//!
//! ## 依赖关系
//! - 被 `spectrum/pipeline.rs` 调用
//! - 使用 `spectrum/lineshape.rs`

use crate::error::{Result, VibspecError};
use crate::spectrum::lineshape::LineShape;

/// 峰列表: [(峰位, 峰高), ...]
pub type PeakList = Vec<(f64, f64)>;

/// 等间距采样轴
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampledAxis {
    start: f64,
    end: f64,
    numpts: usize,
}

impl SampledAxis {
    /// 创建采样轴，要求 numpts > 1 且 start != end
    pub fn new(start: f64, end: f64, numpts: usize) -> Result<Self> {
        if numpts <= 1 {
            return Err(VibspecError::DomainError(format!(
                "number of points must be greater than 1 (got {})",
                numpts
            )));
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(VibspecError::DomainError(format!(
                "axis bounds must be finite (got {} to {})",
                start, end
            )));
        }
        if start == end {
            return Err(VibspecError::DomainError(format!(
                "axis start and end are identical ({})",
                start
            )));
        }
        Ok(Self { start, end, numpts })
    }

    pub fn numpts(&self) -> usize {
        self.numpts
    }

    /// 第 i 个采样点（闭区间线性采样）
    pub fn position(&self, i: usize) -> f64 {
        i as f64 * (self.end - self.start) / (self.numpts - 1) as f64 + self.start
    }

    /// 所有采样点
    pub fn positions(&self) -> Vec<f64> {
        (0..self.numpts).map(|i| self.position(i)).collect()
    }

    /// 输出表中第 i 行的横坐标
    ///
    /// 与采样点公式不同：(end − start)·(i + 1)/numpts + start，
    /// 输出文件格式沿用此约定。
    pub fn row_position(&self, i: usize) -> f64 {
        (self.end - self.start) * (i + 1) as f64 / self.numpts as f64 + self.start
    }
}

/// 卷积得到的光谱（numpts × 通道数）
#[derive(Debug, Clone)]
pub struct Spectrum {
    xvalues: Vec<f64>,
    /// values[i][c]
    values: Vec<Vec<f64>>,
    num_channels: usize,
}

impl Spectrum {
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// 第 i 个采样点、第 c 个通道的值
    pub fn value(&self, i: usize, channel: usize) -> f64 {
        self.values[i][channel]
    }

    /// 取出一个通道的 (x, y) 曲线
    pub fn curve(&self, channel: usize) -> Vec<(f64, f64)> {
        self.xvalues
            .iter()
            .zip(&self.values)
            .map(|(&x, row)| (x, row[channel]))
            .collect()
    }

    /// 将绝对值低于 `floor` 的数值噪声置零
    pub fn clamp_noise(mut self, floor: f64) -> Self {
        for row in &mut self.values {
            for v in row.iter_mut() {
                if v.abs() < floor {
                    *v = 0.0;
                }
            }
        }
        self
    }
}

/// 卷积峰列表
///
/// 每个通道对应 `channels` 中的一组峰，所有通道共享采样轴和线宽。
pub fn synthesize<S: LineShape + ?Sized>(
    axis: &SampledAxis,
    channels: &[PeakList],
    width: f64,
    shape: &S,
) -> Result<Spectrum> {
    if !(width > 0.0) || !width.is_finite() {
        return Err(VibspecError::DomainError(format!(
            "line width must be positive (got {})",
            width
        )));
    }

    let xvalues = axis.positions();
    let values: Vec<Vec<f64>> = xvalues
        .iter()
        .map(|&x| {
            channels
                .iter()
                .map(|peaks| {
                    peaks
                        .iter()
                        .map(|&(pos, height)| shape.evaluate(x, pos, height, width))
                        .sum::<f64>()
                })
                .collect()
        })
        .collect();

    Ok(Spectrum {
        xvalues,
        values,
        num_channels: channels.len(),
    })
}
