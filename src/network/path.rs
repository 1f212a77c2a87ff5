//! Cubic-bezier curve record and its SVG path string form.
//!
//! Curves travel through the pipeline as structured points and are only turned
//! into `"M x1 y1 C cp1x cp1y, cp2x cp2y, x2 y2"` at the output boundary.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use thiserror::Error;

static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"M ([\d.-]+) ([\d.-]+) C ([\d.-]+) ([\d.-]+), ([\d.-]+) ([\d.-]+), ([\d.-]+) ([\d.-]+)")
		.expect("path pattern is valid")
});

/// Point in canvas px.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal.
	pub x: f64,
	/// Vertical, growing downwards.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A single cubic-bezier segment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Curve {
	/// `M` point.
	pub start: Point,
	/// First `C` control point.
	pub control1: Point,
	/// Second `C` control point.
	pub control2: Point,
	/// End of the segment.
	pub end: Point,
}

impl Curve {
	/// Horizontal-tangent curve between two points: both control points are
	/// pulled `|dx| * curvature` inwards along x and keep their endpoint's y.
	pub fn horizontal(start: Point, end: Point, curvature: f64) -> Self {
		let c = (end.x - start.x).abs() * curvature;
		Self {
			start,
			control1: Point::new(start.x + c, start.y),
			control2: Point::new(end.x - c, end.y),
			end,
		}
	}

	/// Shift the end point by `offset` and the second control point by half of it.
	pub fn shift_end(self, offset: f64) -> Self {
		Self {
			control2: Point::new(self.control2.x, self.control2.y + offset * 0.5),
			end: Point::new(self.end.x, self.end.y + offset),
			..self
		}
	}
}

/// Why a string is not a [`Curve`].
#[derive(Debug, Error, PartialEq)]
pub enum ParsePathError {
	/// No `M .. C ..` segment found.
	#[error("not a single cubic-bezier path: {0:?}")]
	Pattern(String),
	/// Matched, but a coordinate is not a number.
	#[error("invalid coordinate {0:?}")]
	Coordinate(String),
}

impl FromStr for Curve {
	type Err = ParsePathError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let caps = PATH_PATTERN
			.captures(s)
			.ok_or_else(|| ParsePathError::Pattern(s.to_owned()))?;
		let mut v = [0.0; 8];
		for (i, slot) in v.iter_mut().enumerate() {
			let raw = &caps[i + 1];
			*slot = raw
				.parse()
				.map_err(|_| ParsePathError::Coordinate(raw.to_owned()))?;
		}
		Ok(Self {
			start: Point::new(v[0], v[1]),
			control1: Point::new(v[2], v[3]),
			control2: Point::new(v[4], v[5]),
			end: Point::new(v[6], v[7]),
		})
	}
}

/// Formats a coordinate the way a JavaScript number prints.
struct Coord(f64);

impl fmt::Display for Coord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.0 {
			v if v == 0.0 => f.write_str("0"),
			v if v.is_infinite() => f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" }),
			v => write!(f, "{v}"),
		}
	}
}

impl fmt::Display for Curve {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let Self {
			start,
			control1,
			control2,
			end,
		} = self;
		write!(
			f,
			"M {} {} C {} {}, {} {}, {} {}",
			Coord(start.x),
			Coord(start.y),
			Coord(control1.x),
			Coord(control1.y),
			Coord(control2.x),
			Coord(control2.y),
			Coord(end.x),
			Coord(end.y),
		)
	}
}

impl Serialize for Curve {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}
