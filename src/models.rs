use serde_derive::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

mod border_side;
pub use border_side::*;

mod layouts;
pub use layouts::*;

mod leds;
pub use leds::*;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("invalid frame topology: {0}")]
    Topology(ValidationErrors),
    #[error("invalid sampling parameters: {0}")]
    Sampling(ValidationErrors),
}

/// Arrangement of the LEDs around the screen bezel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
#[validate(schema(function = "validate_topology", message = "invalid frame topology"))]
pub struct FrameTopology {
    /// Sequence numbers increase clockwise if true, counter-clockwise otherwise
    pub clockwise: bool,
    pub top_left_corner: bool,
    pub top_right_corner: bool,
    pub bottom_left_corner: bool,
    pub bottom_right_corner: bool,
    /// Number of LEDs along the top edge, corners excluded
    pub top_count: u32,
    /// Number of LEDs along the bottom edge. The bottom edge reuses the top edge spacing, so this
    /// can't exceed `top_count`.
    pub bottom_count: u32,
    pub left_count: u32,
    pub right_count: u32,
    /// Clockwise position, starting from the top-left corner, of the LED numbered 0
    pub first_led_offset: i32,
}

impl FrameTopology {
    /// Number of enabled corner LEDs
    pub fn corner_count(&self) -> u64 {
        [
            self.top_left_corner,
            self.top_right_corner,
            self.bottom_left_corner,
            self.bottom_right_corner,
        ]
        .iter()
        .filter(|&&enabled| enabled)
        .count() as u64
    }

    /// Total number of LEDs in the frame
    pub fn total_count(&self) -> u64 {
        u64::from(self.top_count)
            + u64::from(self.bottom_count)
            + u64::from(self.left_count)
            + u64::from(self.right_count)
            + self.corner_count()
    }

    /// Enable or disable all four corners at once
    pub fn set_corners(&mut self, enabled: bool) {
        self.top_left_corner = enabled;
        self.top_right_corner = enabled;
        self.bottom_left_corner = enabled;
        self.bottom_right_corner = enabled;
    }
}

impl Default for FrameTopology {
    fn default() -> Self {
        Self {
            clockwise: true,
            top_left_corner: true,
            top_right_corner: true,
            bottom_left_corner: true,
            bottom_right_corner: true,
            top_count: 16,
            bottom_count: 16,
            left_count: 8,
            right_count: 8,
            first_led_offset: 0,
        }
    }
}

fn validate_topology(topology: &FrameTopology) -> Result<(), ValidationError> {
    if topology.bottom_count > topology.top_count {
        return Err(ValidationError::new("bottom_exceeds_top"));
    }

    // Sequence numbers are u32
    if topology.total_count() > u64::from(u32::MAX) {
        return Err(ValidationError::new("too_many_leds"));
    }

    Ok(())
}

/// Image integration settings
///
/// The horizontal values apply to the top and bottom LEDs, the vertical ones to the left and
/// right LEDs. Gaps are insets from the nearest image border, depths are measured from the gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
#[validate(schema(function = "validate_sampling", message = "invalid sampling parameters"))]
pub struct SamplingParameters {
    #[validate(range(max = 1.))]
    pub horizontal_depth: f64,
    #[validate(range(max = 1.))]
    pub vertical_depth: f64,
    #[validate(range(min = 0.))]
    pub horizontal_gap: f64,
    #[validate(range(min = 0.))]
    pub vertical_gap: f64,
    /// Fraction by which each LED area is widened towards its neighbors
    #[validate(range(max = 1.))]
    pub overlap_fraction: f64,
}

impl Default for SamplingParameters {
    fn default() -> Self {
        Self {
            horizontal_depth: 0.08,
            vertical_depth: 0.05,
            horizontal_gap: 0.,
            vertical_gap: 0.,
            overlap_fraction: 0.,
        }
    }
}

/// Checks the exclusive bounds, which the range validator can't express, and rejects NaNs
fn validate_sampling(sampling: &SamplingParameters) -> Result<(), ValidationError> {
    let values = [
        sampling.horizontal_depth,
        sampling.vertical_depth,
        sampling.horizontal_gap,
        sampling.vertical_gap,
        sampling.overlap_fraction,
    ];

    if values.iter().any(|v| !v.is_finite()) {
        return Err(ValidationError::new("not_finite"));
    }

    if sampling.horizontal_depth <= 0. || sampling.vertical_depth <= 0. {
        return Err(ValidationError::new("empty_depth"));
    }

    if sampling.horizontal_gap >= 0.5 || sampling.vertical_gap >= 0.5 {
        return Err(ValidationError::new("gap_too_large"));
    }

    if sampling.overlap_fraction <= -1. {
        return Err(ValidationError::new("empty_overlap"));
    }

    Ok(())
}

/// Fractional position in the picture, (0, 0) being the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Normalized area of the picture sampled for one LED
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SampleRect {
    /// Build a rectangle from its bounds, clamped to the unit square
    pub fn from_bounds(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        let xmin = xmin.clamp(0., 1.);
        let xmax = xmax.clamp(xmin, 1.);
        let ymin = ymin.clamp(0., 1.);
        let ymax = ymax.clamp(ymin, 1.);

        Self {
            x: xmin,
            y: ymin,
            width: xmax - xmin,
            height: ymax - ymin,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Resolved position and sampling area of a single LED
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedPlacement {
    /// Position of the LED in the chain, as seen by the device
    pub sequence_number: u32,
    pub side: BorderSide,
    /// Nominal position of the LED on the border, for display purposes
    pub location: Location,
    pub sample_rect: SampleRect,
}
