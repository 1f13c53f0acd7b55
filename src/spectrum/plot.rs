//! # 光谱图生成
//!
//! 使用 `plotters` 库将卷积后的光谱输出为静态 PNG/SVG 图。
//!
//! ## 功能
//! - IR: 单幅活性曲线
//! - Raman: 上下两幅，分别为活性和强度曲线
//!
//! ## 依赖关系
//! - 被 `spectrum/pipeline.rs` 调用
//! - 使用 `spectrum/synthesizer.rs` 的 Spectrum 结构
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, VibspecError};
use crate::models::SpectralKind;
use crate::spectrum::synthesizer::Spectrum;

use plotters::prelude::*;
use std::path::Path;

/// 图像格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotFormat {
    #[default]
    Png,
    Svg,
}

impl PlotFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            PlotFormat::Png => "png",
            PlotFormat::Svg => "svg",
        }
    }
}

/// 绘图选项
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotOptions {
    pub format: PlotFormat,
    /// 图像宽度（像素）
    pub width: u32,
    /// 图像高度（像素）
    pub height: u32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions {
            format: PlotFormat::Png,
            width: 1200,
            height: 800,
        }
    }
}

/// 绘制光谱图
pub fn plot_spectrum(
    spectrum: &Spectrum,
    kind: SpectralKind,
    title: &str,
    output_path: &Path,
    options: &PlotOptions,
) -> Result<()> {
    let size = (options.width, options.height);
    match options.format {
        PlotFormat::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            draw_panels(&root, spectrum, kind, title)?;
            root.present()
                .map_err(|e| VibspecError::PlotError(e.to_string()))?;
        }
        PlotFormat::Png => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            draw_panels(&root, spectrum, kind, title)?;
            root.present()
                .map_err(|e| VibspecError::PlotError(e.to_string()))?;
        }
    }
    Ok(())
}

/// 按光谱类型划分子图
fn draw_panels<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    spectrum: &Spectrum,
    kind: SpectralKind,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| VibspecError::PlotError(format!("{:?}", e)))?;

    match kind {
        SpectralKind::Ir => {
            draw_curve(root, &spectrum.curve(0), title, "IR activity", IR_COLOR)?;
        }
        SpectralKind::Raman => {
            let panels = root.split_evenly((2, 1));
            draw_curve(
                &panels[0],
                &spectrum.curve(0),
                title,
                "Raman activity",
                RAMAN_COLOR,
            )?;
            if spectrum.num_channels() > 1 {
                draw_curve(
                    &panels[1],
                    &spectrum.curve(1),
                    title,
                    "Raman intensity",
                    RAMAN_COLOR,
                )?;
            }
        }
    }

    Ok(())
}

const IR_COLOR: RGBColor = RGBColor(204, 51, 0);
const RAMAN_COLOR: RGBColor = RGBColor(0, 102, 204);

/// 绘制单条连续曲线
fn draw_curve<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    data: &[(f64, f64)],
    title: &str,
    y_desc: &str,
    color: RGBColor,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let (x_first, x_last) = match (data.first(), data.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => return Ok(()),
    };
    let x_min = x_first.min(x_last);
    let x_max = x_first.max(x_last);

    let y_low = data.iter().map(|(_, y)| *y).fold(0.0_f64, f64::min);
    let y_high = data.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max);
    let y_max = if y_high > 0.0 { y_high * 1.1 } else { 1.0 };
    let y_min = if y_low < 0.0 { y_low * 1.1 } else { 0.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| VibspecError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Frequency (cm⁻¹)")
        .y_desc(y_desc)
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| VibspecError::PlotError(format!("{:?}", e)))?;

    chart
        .draw_series(LineSeries::new(
            data.iter().map(|(x, y)| (*x, *y)),
            color.stroke_width(2),
        ))
        .map_err(|e| VibspecError::PlotError(format!("{:?}", e)))?;

    chart
        .draw_series(AreaSeries::new(
            data.iter().map(|(x, y)| (*x, *y)),
            0.0,
            color.mix(0.2),
        ))
        .map_err(|e| VibspecError::PlotError(format!("{:?}", e)))?;

    Ok(())
}
