use serde_derive::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::LedPlacement;

/// Trait for converting resolved placements to the daemon LED list
pub trait ToLeds {
    fn to_leds(&self) -> Leds;
}

/// Floating-point range in a picture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_scan_range", message = "invalid range"))]
pub struct ScanRange {
    #[validate(range(min = 0., max = 1.))]
    pub minimum: f32,
    #[validate(range(min = 0., max = 1.))]
    pub maximum: f32,
}

impl Default for ScanRange {
    fn default() -> Self {
        Self {
            minimum: 0.,
            maximum: 1.,
        }
    }
}

/// Validate the bounds of a scan range
fn validate_scan_range(scan_range: &ScanRange) -> Result<(), ValidationError> {
    if scan_range.minimum > scan_range.maximum {
        return Err(ValidationError::new("invalid_range"));
    }

    Ok(())
}

/// LED entry of the daemon configuration
///
/// `hscan` and `vscan` are the horizontal and vertical extents of the picture area averaged to
/// compute the color of the LED at `index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Led {
    pub index: u32,
    #[validate(nested)]
    pub hscan: ScanRange,
    #[validate(nested)]
    pub vscan: ScanRange,
}

impl Led {
    fn round(x: f64) -> f32 {
        let factor = 1e4;
        ((x * factor).round() / factor) as f32
    }
}

impl From<&LedPlacement> for Led {
    fn from(led: &LedPlacement) -> Self {
        let rect = &led.sample_rect;

        Self {
            index: led.sequence_number,
            hscan: ScanRange {
                minimum: Self::round(rect.x),
                maximum: Self::round(rect.right()),
            },
            vscan: ScanRange {
                minimum: Self::round(rect.y),
                maximum: Self::round(rect.bottom()),
            },
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Validate)]
pub struct Leds {
    #[validate(nested)]
    pub leds: Vec<Led>,
}

impl Leds {
    /// Render the `leds` section of the daemon configuration
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Section<'l> {
            leds: &'l Leds,
        }

        serde_json::to_string_pretty(&Section { leds: self })
    }
}

impl serde::Serialize for Leds {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.leds.len()))?;
        for led in &self.leds {
            seq.serialize_element(led)?;
        }
        seq.end()
    }
}

impl<'de> serde::Deserialize<'de> for Leds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Leds {
            leds: <Vec<Led> as serde::Deserialize>::deserialize(deserializer)?,
        })
    }
}

impl ToLeds for [LedPlacement] {
    fn to_leds(&self) -> Leds {
        Leds {
            leds: self.iter().map(Led::from).collect(),
        }
    }
}
