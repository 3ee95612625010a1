//! Drawer direction and the sign conventions derived from it.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Screen axis a drawer moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The coordinate of `point` along this axis.
    pub fn coord(self, point: Point) -> f64 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    /// The extent of `size` along this axis.
    pub fn extent(self, size: Size) -> f64 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// A translation of `amount` along this axis.
    pub fn translation(self, amount: f64) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::new(amount, 0.0),
            Axis::Vertical => Vec2::new(0.0, amount),
        }
    }
}

/// The screen edge a drawer is attached to.
///
/// A `Bottom` drawer slides up from the bottom edge and is dismissed by
/// dragging down; the other directions mirror that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Top,
    #[default]
    #[serde(alias = "y")]
    Bottom,
    Left,
    #[serde(alias = "x")]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
    ];

    /// The axis tracked for this direction.
    pub fn axis(self) -> Axis {
        match self {
            Direction::Top | Direction::Bottom => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// Sign of the pointer movement that pushes the panel toward its
    /// hidden side.
    pub fn closing_sign(self) -> f64 {
        match self {
            Direction::Bottom | Direction::Right => 1.0,
            Direction::Top | Direction::Left => -1.0,
        }
    }

    /// Offset of a fully open, non-dragged panel.
    pub fn rest_offset(self, panel_extent: f64) -> f64 {
        match self {
            Direction::Right => panel_extent,
            _ => 0.0,
        }
    }

    /// Offset that puts the panel entirely off-screen.
    pub fn hidden_offset(self, panel_extent: f64, viewport_extent: f64) -> f64 {
        self.rest_offset(panel_extent) + viewport_extent
    }

    /// Signed displacement between two axis samples, positive when the
    /// pointer moved toward the hidden side.
    pub fn closing_displacement(self, from: f64, to: f64) -> f64 {
        (to - from) * self.closing_sign()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown direction name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown drawer direction: {0}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Direction::Top),
            "bottom" => Ok(Direction::Bottom),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            // Older configurations named the axis only.
            "y" => Ok(Direction::Bottom),
            "x" => Ok(Direction::Right),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_selection() {
        assert_eq!(Direction::Top.axis(), Axis::Vertical);
        assert_eq!(Direction::Bottom.axis(), Axis::Vertical);
        assert_eq!(Direction::Left.axis(), Axis::Horizontal);
        assert_eq!(Direction::Right.axis(), Axis::Horizontal);
    }

    #[test]
    fn test_axis_coord() {
        let p = Point::new(12.0, 34.0);
        assert!((Axis::Horizontal.coord(p) - 12.0).abs() < f64::EPSILON);
        assert!((Axis::Vertical.coord(p) - 34.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rest_offsets() {
        assert!((Direction::Bottom.rest_offset(300.0)).abs() < f64::EPSILON);
        assert!((Direction::Top.rest_offset(300.0)).abs() < f64::EPSILON);
        assert!((Direction::Left.rest_offset(300.0)).abs() < f64::EPSILON);
        assert!((Direction::Right.rest_offset(300.0) - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_closing_displacement_signs() {
        // Bottom closes when dragged down.
        assert!(Direction::Bottom.closing_displacement(0.0, 90.0) > 0.0);
        // Top closes when dragged up.
        assert!(Direction::Top.closing_displacement(200.0, 100.0) > 0.0);
        // Left closes when dragged left.
        assert!(Direction::Left.closing_displacement(200.0, 100.0) > 0.0);
        // Right closes when dragged right.
        assert!(Direction::Right.closing_displacement(100.0, 200.0) > 0.0);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("top".parse::<Direction>(), Ok(Direction::Top));
        assert_eq!("right".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!("y".parse::<Direction>(), Ok(Direction::Bottom));
        assert_eq!("x".parse::<Direction>(), Ok(Direction::Right));
        assert!("diagonal".parse::<Direction>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "\"left\"");
        let parsed: Direction = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(parsed, Direction::Right);
        let legacy: Direction = serde_json::from_str("\"y\"").unwrap();
        assert_eq!(legacy, Direction::Bottom);
    }
}
