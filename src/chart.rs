//! Score/pixel coordinate conversions for the scatter chart.
//!
//! The chart is a square of `canvas_size` CSS pixels. The score domain
//! `[min_score, max_score]` is laid out linearly inside
//! `[padding, canvas_size - padding]` on both axes. Screen Y grows downward
//! while the Y score grows upward, so the vertical axis is flipped at the
//! point level ([`ChartScale::scores_to_point`] / [`ChartScale::point_to_scores`]);
//! the scalar functions are axis-agnostic.

#[cfg(test)]
#[path = "chart_test.rs"]
mod chart_test;

use crate::config::ConfigError;
use crate::consts::{CHART_PADDING_PX, CHART_SIZE_PX, MAX_SCORE, MIN_SCORE};
use crate::roster::Scores;

/// A point in chart-local or client space, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Affine mapping between the score domain and chart pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    canvas_size: f64,
    padding: f64,
    min_score: f64,
    max_score: f64,
}

impl Default for ChartScale {
    fn default() -> Self {
        Self { canvas_size: CHART_SIZE_PX, padding: CHART_PADDING_PX, min_score: MIN_SCORE, max_score: MAX_SCORE }
    }
}

impl ChartScale {
    /// Build a scale, rejecting geometry that would leave no plot area or an empty domain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any value is non-finite, the padding is
    /// negative, `canvas_size <= 2 * padding`, or `max_score <= min_score`.
    pub fn new(canvas_size: f64, padding: f64, min_score: f64, max_score: f64) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("canvas_size", canvas_size),
            ("padding", padding),
            ("min_score", min_score),
            ("max_score", max_score),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        if padding < 0.0 || canvas_size <= 2.0 * padding {
            return Err(ConfigError::InvalidCanvas { size: canvas_size, padding });
        }
        if max_score <= min_score {
            return Err(ConfigError::InvalidScoreDomain { min: min_score, max: max_score });
        }
        Ok(Self { canvas_size, padding, min_score, max_score })
    }

    #[must_use]
    pub fn canvas_size(&self) -> f64 {
        self.canvas_size
    }

    #[must_use]
    pub fn padding(&self) -> f64 {
        self.padding
    }

    #[must_use]
    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    #[must_use]
    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    fn plot_span(&self) -> f64 {
        self.canvas_size - 2.0 * self.padding
    }

    fn score_span(&self) -> f64 {
        self.max_score - self.min_score
    }

    /// Pixel offset of `score` along one axis. Scores outside the domain are not clamped.
    #[must_use]
    pub fn score_to_pixel(&self, score: f64) -> f64 {
        self.padding + (score - self.min_score) * self.plot_span() / self.score_span()
    }

    /// Score at pixel offset `pixel` along one axis, clamped to the domain.
    #[must_use]
    pub fn pixel_to_score(&self, pixel: f64) -> f64 {
        let raw = self.min_score + (pixel - self.padding) * self.score_span() / self.plot_span();
        raw.clamp(self.min_score, self.max_score)
    }

    /// Clamp a pixel offset into the plot area `[padding, canvas_size - padding]`.
    #[must_use]
    pub fn clamp_pixel(&self, pixel: f64) -> f64 {
        pixel.clamp(self.padding, self.canvas_size - self.padding)
    }

    /// Chart-local position of a student's center.
    #[must_use]
    pub fn scores_to_point(&self, scores: Scores) -> Point {
        Point { x: self.score_to_pixel(scores.x), y: self.canvas_size - self.score_to_pixel(scores.y) }
    }

    /// Scores at a chart-local position, flipping Y back into score orientation.
    #[must_use]
    pub fn point_to_scores(&self, point: Point) -> Scores {
        Scores { x: self.pixel_to_score(point.x), y: self.pixel_to_score(self.canvas_size - point.y) }
    }
}

/// Format a score with two decimals and a comma separator (`15.5` → `"15,50"`).
#[must_use]
pub fn format_score(value: f64) -> String {
    format!("{value:.2}").replace('.', ",")
}
