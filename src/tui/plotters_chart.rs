//! Plotters-powered rating-per-sign bar chart for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A render-only chart description.
///
/// Bars are computed outside the render call so `render()` only draws.
pub struct SignRatingChart<'a> {
    /// `(short label, rating)` per bar, left to right.
    pub bars: &'a [(String, u32)],
    /// Top of the y axis.
    pub y_max: u32,
}

impl<'a> Widget for SignRatingChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }
        if self.bars.is_empty() {
            return;
        }

        let n = self.bars.len();
        let x0 = -0.5_f64;
        let x1 = n as f64 - 0.5;
        let y1 = f64::from(self.y_max.max(1)) + 0.5;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 4)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(x0..x1, 0.0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(n)
                .y_labels(self.y_max.clamp(1, 6) as usize)
                .x_label_formatter(&|v| bar_label(self.bars, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            // Highest-rated bar stands out; the rest share one colour.
            let top_color = RGBColor(0, 255, 0);
            let bar_color = RGBColor(0, 255, 255);

            chart.draw_series(self.bars.iter().enumerate().map(|(i, (_, rating))| {
                let x = i as f64;
                let color = if i == 0 { top_color } else { bar_color };
                Rectangle::new([(x - 0.35, 0.0), (x + 0.35, f64::from(*rating))], color.filled())
            }))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Label for the bar nearest `v`, blank between bars.
fn bar_label(bars: &[(String, u32)], v: f64) -> String {
    let idx = v.round();
    if (v - idx).abs() > 0.01 || idx < 0.0 {
        return String::new();
    }
    bars.get(idx as usize)
        .map(|(label, _)| label.clone())
        .unwrap_or_default()
}
