//! # exitrank-viz
//!
//! Horizontal bar chart rendering for course rankings.
//!
//! One bar per course, top to bottom in ranking order, each bar's length
//! proportional to the course's mean rating. Output is a [`PixelBuffer`]
//! that can be encoded with [`exitrank_png`].

use std::path::Path;

use exitrank_png::{write_png, PixelBuffer, PngError, Rgb};
use exitrank_survey::CourseRating;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while drawing a chart
#[derive(Error, Debug)]
pub enum VizError {
    #[error("No data available for chart generation")]
    NoData,

    #[error("Invalid chart options: {0}")]
    InvalidOptions(String),

    #[error("PNG error: {0}")]
    Png(#[from] PngError),
}

/// Result type for chart operations
pub type Result<T> = std::result::Result<T, VizError>;

/// Chart geometry and colors, in pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Canvas width
    pub width: u32,
    /// Margin above the first bar
    pub top: u32,
    /// Margin below the last bar
    pub bottom: u32,
    /// Margin left of the bars; the axis sits in its last column
    pub left: u32,
    /// Margin right of the longest bar
    pub right: u32,
    pub bar_height: u32,
    /// Space between bars
    pub gap: u32,
    /// How far the axis extends above the first bar
    pub axis_overhang: u32,
    pub background: Rgb,
    pub bar_color: Rgb,
    pub axis_color: Rgb,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            width: 1200,
            top: 40,
            bottom: 30,
            left: 200,
            right: 40,
            bar_height: 36,
            gap: 16,
            axis_overhang: 10,
            background: [250, 250, 250],
            bar_color: [67, 97, 238],
            axis_color: [80, 80, 80],
        }
    }
}

impl ChartOptions {
    /// Set the canvas width
    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the bar height and the gap between bars
    #[must_use]
    pub fn with_bars(mut self, bar_height: u32, gap: u32) -> Self {
        self.bar_height = bar_height;
        self.gap = gap;
        self
    }

    /// Set the bar color
    #[must_use]
    pub fn with_bar_color(mut self, color: Rgb) -> Self {
        self.bar_color = color;
        self
    }

    /// Check that the margins leave room for the axis and the bars.
    pub fn validate(&self) -> Result<()> {
        if self.left == 0 {
            return Err(VizError::InvalidOptions(
                "left margin must be at least 1 pixel to hold the axis".to_string(),
            ));
        }
        if u64::from(self.left) + u64::from(self.right) >= u64::from(self.width) {
            return Err(VizError::InvalidOptions(format!(
                "margins {} + {} leave no room in a {} pixel wide chart",
                self.left, self.right, self.width
            )));
        }
        if self.bar_height == 0 {
            return Err(VizError::InvalidOptions("bar height must be positive".to_string()));
        }
        Ok(())
    }

    /// Horizontal space available to the longest bar
    fn plot_width(&self) -> u32 {
        self.width - self.left - self.right
    }

    /// Height of the bar area for `bars` bars
    fn chart_height(&self, bars: usize) -> Option<u32> {
        let bars = u32::try_from(bars).ok()?;
        bars.checked_mul(self.bar_height.checked_add(self.gap)?)?
            .checked_sub(self.gap)
    }
}

/// Horizontal bar chart renderer.
#[derive(Debug, Clone, Default)]
pub struct BarChart {
    options: ChartOptions,
}

impl BarChart {
    #[must_use]
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Draw one bar per ranked course, in the given order.
    pub fn render(&self, ratings: &[CourseRating]) -> Result<PixelBuffer> {
        let means: Vec<f64> = ratings.iter().map(|r| r.mean_rating).collect();
        self.render_values(&means)
    }

    /// Draw one bar per value, in the given order.
    ///
    /// Bars are scaled so the largest value spans the plot width. Every bar
    /// is at least one pixel wide; zero and negative values get exactly one.
    pub fn render_values(&self, values: &[f64]) -> Result<PixelBuffer> {
        if values.is_empty() {
            return Err(VizError::NoData);
        }
        let opts = &self.options;
        opts.validate()?;

        let too_tall = || VizError::InvalidOptions(format!("{} bars do not fit in one image", values.len()));
        let chart_h = opts.chart_height(values.len()).ok_or_else(too_tall)?;
        let height = opts
            .top
            .checked_add(chart_h)
            .and_then(|h| h.checked_add(opts.bottom))
            .ok_or_else(too_tall)?;

        let mut canvas = PixelBuffer::filled(opts.width, height, opts.background)?;

        let axis_x = opts.left - 1;
        let axis_top = opts.top.saturating_sub(opts.axis_overhang);
        let axis_bottom = opts.top.saturating_add(chart_h).saturating_add(1);
        canvas.fill_rect(axis_x, axis_top, axis_x + 1, axis_bottom, opts.axis_color);

        let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let plot_width = opts.plot_width();
        let scale = if max_value == 0.0 {
            1.0
        } else {
            f64::from(plot_width) / max_value
        };
        debug!(bars = values.len(), width = opts.width, height, scale, "rendering bar chart");

        let x_limit = opts.width - opts.right;
        let mut y0 = opts.top;
        for &value in values {
            // `as` truncates toward zero and maps NaN to 0
            let bar_width = ((value.max(0.0) * scale) as i64).max(1);
            let bar_width = u32::try_from(bar_width).unwrap_or(plot_width);
            let x1 = opts.left.saturating_add(bar_width).min(x_limit);

            let y1 = y0.saturating_add(opts.bar_height);
            canvas.fill_rect(opts.left, y0, x1, y1, opts.bar_color);
            y0 = y1.saturating_add(opts.gap);
        }

        Ok(canvas)
    }

    /// Render the ranking and write it as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, ratings: &[CourseRating], path: P) -> Result<()> {
        let canvas = self.render(ratings)?;
        write_png(path.as_ref(), &canvas)?;
        info!(
            path = %path.as_ref().display(),
            bars = ratings.len(),
            "wrote bar chart"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb = [250, 250, 250];
    const BAR: Rgb = [67, 97, 238];
    const AXIS: Rgb = [80, 80, 80];

    fn chart() -> BarChart {
        BarChart::default()
    }

    #[test]
    fn test_canvas_size() {
        let canvas = chart().render_values(&[4.0, 2.0, 1.0]).unwrap();
        // 3 * (36 + 16) - 16 = 140 for the bars, plus margins
        assert_eq!(canvas.width(), 1200);
        assert_eq!(canvas.height(), 40 + 140 + 30);

        let single = chart().render_values(&[3.0]).unwrap();
        assert_eq!(single.height(), 40 + 36 + 30);
    }

    #[test]
    fn test_background_and_axis() {
        let canvas = chart().render_values(&[4.0, 2.0, 1.0]).unwrap();

        assert_eq!(canvas.get_pixel(0, 0), Some(BG));
        assert_eq!(canvas.get_pixel(1199, 209), Some(BG));

        // Axis spans top - 10 through top + chart height, inclusive
        assert_eq!(canvas.get_pixel(199, 29), Some(BG));
        assert_eq!(canvas.get_pixel(199, 30), Some(AXIS));
        assert_eq!(canvas.get_pixel(199, 100), Some(AXIS));
        assert_eq!(canvas.get_pixel(199, 180), Some(AXIS));
        assert_eq!(canvas.get_pixel(199, 181), Some(BG));
        assert_eq!(canvas.get_pixel(198, 100), Some(BG));
    }

    #[test]
    fn test_bar_lengths_scale_to_max() {
        let canvas = chart().render_values(&[4.0, 2.0, 1.0]).unwrap();

        // Longest bar fills the plot width: 1200 - 200 - 40 = 960
        assert_eq!(canvas.get_pixel(200, 40), Some(BAR));
        assert_eq!(canvas.get_pixel(1159, 75), Some(BAR));
        assert_eq!(canvas.get_pixel(1160, 40), Some(BG));
        // Gap below the first bar
        assert_eq!(canvas.get_pixel(300, 76), Some(BG));
        assert_eq!(canvas.get_pixel(300, 91), Some(BG));

        // Second bar at y 92, half as long
        assert_eq!(canvas.get_pixel(679, 92), Some(BAR));
        assert_eq!(canvas.get_pixel(680, 92), Some(BG));

        // Third bar at y 144, a quarter
        assert_eq!(canvas.get_pixel(439, 144), Some(BAR));
        assert_eq!(canvas.get_pixel(440, 144), Some(BG));
    }

    #[test]
    fn test_bar_width_truncates() {
        // scale = 960 / 3; 1.01 * 320 = 323.2, 1.0 * 320 = 320
        let canvas = chart().render_values(&[3.0, 1.01, 1.0]).unwrap();
        assert_eq!(canvas.get_pixel(200 + 322, 92), Some(BAR));
        assert_eq!(canvas.get_pixel(200 + 323, 92), Some(BG));
        assert_eq!(canvas.get_pixel(200 + 319, 144), Some(BAR));
        assert_eq!(canvas.get_pixel(200 + 320, 144), Some(BG));
    }

    #[test]
    fn test_all_zero_values_get_one_pixel() {
        let canvas = chart().render_values(&[0.0, 0.0]).unwrap();
        assert_eq!(canvas.get_pixel(200, 40), Some(BAR));
        assert_eq!(canvas.get_pixel(201, 40), Some(BG));
        assert_eq!(canvas.get_pixel(200, 92), Some(BAR));
    }

    #[test]
    fn test_negative_values_get_one_pixel() {
        let canvas = chart().render_values(&[4.0, -2.0]).unwrap();
        assert_eq!(canvas.get_pixel(200, 92), Some(BAR));
        assert_eq!(canvas.get_pixel(201, 92), Some(BG));

        let canvas = chart().render_values(&[-1.0]).unwrap();
        assert_eq!(canvas.get_pixel(201, 40), Some(BG));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(chart().render_values(&[]), Err(VizError::NoData)));
        assert!(matches!(chart().render(&[]), Err(VizError::NoData)));
    }

    #[test]
    fn test_small_top_margin_clips_axis() {
        let options = ChartOptions {
            top: 4,
            ..ChartOptions::default()
        };
        let canvas = BarChart::new(options).render_values(&[1.0]).unwrap();
        assert_eq!(canvas.get_pixel(199, 0), Some(AXIS));
    }

    #[test]
    fn test_invalid_options() {
        let no_axis = ChartOptions {
            left: 0,
            ..ChartOptions::default()
        };
        assert!(matches!(
            BarChart::new(no_axis).render_values(&[1.0]),
            Err(VizError::InvalidOptions(_))
        ));

        let too_narrow = ChartOptions::default().with_width(240);
        assert!(matches!(
            BarChart::new(too_narrow).render_values(&[1.0]),
            Err(VizError::InvalidOptions(_))
        ));

        let flat = ChartOptions::default().with_bars(0, 16);
        assert!(BarChart::new(flat).render_values(&[1.0]).is_err());
    }

    #[test]
    fn test_custom_colors() {
        let options = ChartOptions::default().with_bar_color([1, 2, 3]);
        let canvas = BarChart::new(options).render_values(&[1.0]).unwrap();
        assert_eq!(canvas.get_pixel(200, 40), Some([1, 2, 3]));
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: ChartOptions =
            serde_json::from_str(r#"{"width": 800, "bar_color": [0, 0, 0]}"#).unwrap();
        assert_eq!(options.width, 800);
        assert_eq!(options.bar_color, [0, 0, 0]);
        assert_eq!(options.left, 200);
        assert_eq!(options.background, BG);
    }
}
