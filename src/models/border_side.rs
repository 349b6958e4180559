use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Placement class of a LED on the screen border
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BorderSide {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl BorderSide {
    /// Outward-facing angle of this side in degrees, 0 pointing right and 90 pointing up
    pub fn angle_degrees(self) -> f64 {
        match self {
            Self::TopLeft => 135.,
            Self::Top => 90.,
            Self::TopRight => 45.,
            Self::Right => 0.,
            Self::BottomRight => -45.,
            Self::Bottom => 270.,
            Self::BottomLeft => -135.,
            Self::Left => 180.,
        }
    }

    /// Outward-facing angle of this side in radians
    pub fn angle(self) -> f64 {
        self.angle_degrees().to_radians()
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomRight | Self::BottomLeft
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn corner_angles_are_diagonal() {
        for side in BorderSide::iter() {
            let quarter = side.angle_degrees() / 45.;
            assert_eq!(quarter.fract(), 0.);
            assert_eq!(side.is_corner(), (quarter as i64) % 2 != 0, "{}", side);
        }
    }

    #[test]
    fn angles_point_outwards() {
        assert!(BorderSide::Top.angle().sin() > 0.99);
        assert!(BorderSide::Bottom.angle().sin() < -0.99);
        assert!(BorderSide::Left.angle().cos() < -0.99);
        assert!(BorderSide::Right.angle().cos() > 0.99);
        assert!(BorderSide::BottomLeft.angle().cos() < 0.);
        assert!(BorderSide::BottomLeft.angle().sin() < 0.);
    }

    #[test]
    fn parse_side_names() {
        assert_eq!("top_left".parse::<BorderSide>().ok(), Some(BorderSide::TopLeft));
        assert_eq!(BorderSide::BottomRight.to_string(), "bottom_right");

        let name: &'static str = BorderSide::Left.into();
        assert_eq!(name, "left");
    }
}
