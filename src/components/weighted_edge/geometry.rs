//! Screen-space geometry for edge annotations.
//!
//! Everything here works on pixel coordinates that the host has already
//! transformed from world space. Nothing is cached between frames.

use std::ops::{Add, Mul, Sub};

/// A 2D coordinate on the canvas, after pan and zoom have been applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
	pub x: f64,
	pub y: f64,
}

impl ScreenPoint {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	pub fn distance(self, other: Self) -> f64 {
		(self - other).length()
	}
}

impl Add for ScreenPoint {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for ScreenPoint {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for ScreenPoint {
	type Output = Self;

	fn mul(self, rhs: f64) -> Self {
		Self::new(self.x * rhs, self.y * rhs)
	}
}

/// Filled triangle pointing at the destination of an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowHead {
	/// Always the destination endpoint.
	pub tip: ScreenPoint,
	pub left: ScreenPoint,
	pub right: ScreenPoint,
	/// Distance from the tip back to the base, after clamping.
	pub length: f64,
}

impl ArrowHead {
	pub fn points(&self) -> [ScreenPoint; 3] {
		[self.tip, self.left, self.right]
	}
}

/// Anchor for the weight label.
pub fn midpoint(p1: ScreenPoint, p2: ScreenPoint) -> ScreenPoint {
	ScreenPoint::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0)
}

/// Anchor for an in-flight message label: the midpoint pulled a quarter of
/// the edge back toward the sender `p1`.
pub fn message_anchor(p1: ScreenPoint, p2: ScreenPoint) -> ScreenPoint {
	midpoint(p1, p2) - (p2 - p1) * 0.25
}

/// Computes the arrowhead for an edge running from `from` to `to`.
///
/// The unzoomed base length and width are scaled by `zoom` and
/// `size_factor`. When the head would take up half the edge or more, its
/// length is cut to a third of the edge so it never runs past the source.
///
/// Returns `None` for coincident endpoints, where there is no direction to
/// point in.
pub fn arrow_head(
	from: ScreenPoint,
	to: ScreenPoint,
	zoom: f64,
	base_length: f64,
	base_width: f64,
	size_factor: f64,
) -> Option<ArrowHead> {
	let mut length = base_length * zoom * size_factor;
	let width = base_width * zoom * size_factor;
	let line_length = from.distance(to);
	if line_length == 0.0 || !line_length.is_finite() {
		return None;
	}

	if 2.0 * length >= line_length {
		length = line_length / 3.0;
	}

	// unit vector from the tip back toward the source
	let u = ScreenPoint::new((from.x - to.x) / line_length, (from.y - to.y) / line_length);
	let base = to + u * length;
	let perp = ScreenPoint::new(u.y, -u.x);

	Some(ArrowHead {
		tip: to,
		left: base + perp * width,
		right: base - perp * width,
		length,
	})
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: ScreenPoint, a: ScreenPoint, b: ScreenPoint) -> f64 {
	let ab = b - a;
	let len_sq = ab.x * ab.x + ab.y * ab.y;
	if len_sq == 0.0 {
		return p.distance(a);
	}
	let ap = p - a;
	let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
	p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn pt(x: f64, y: f64) -> ScreenPoint {
		ScreenPoint::new(x, y)
	}

	#[test]
	fn horizontal_edge_arrow_head() {
		let head = arrow_head(pt(0.0, 0.0), pt(100.0, 0.0), 1.0, 10.0, 5.0, 1.0).unwrap();
		assert_eq!(head.length, 10.0);
		assert_eq!(head.points(), [pt(100.0, 0.0), pt(90.0, 5.0), pt(90.0, -5.0)]);
	}

	#[test]
	fn short_edge_clamps_to_a_third() {
		let head = arrow_head(pt(0.0, 0.0), pt(30.0, 0.0), 1.0, 10.0, 1.0, 4.5).unwrap();
		assert_eq!(head.length, 10.0);
		assert_eq!(head.tip, pt(30.0, 0.0));
		assert_eq!(head.left.x, 20.0);
		assert_eq!(head.right.x, 20.0);
	}

	#[test]
	fn clamp_triggers_at_exactly_half() {
		// 2 * 20 == 40, so the head is cut even though it would just fit
		let head = arrow_head(pt(0.0, 0.0), pt(0.0, 40.0), 2.0, 10.0, 1.0, 1.0).unwrap();
		assert_eq!(head.length, 40.0 / 3.0);
	}

	#[test]
	fn zoom_scales_width() {
		let head = arrow_head(pt(0.0, 0.0), pt(0.0, 200.0), 2.0, 8.0, 1.0, 1.0).unwrap();
		// edge points down, so the perpendicular is horizontal
		assert_eq!(head.left, pt(-2.0, 184.0));
		assert_eq!(head.right, pt(2.0, 184.0));
	}

	#[test]
	fn coincident_endpoints_have_no_arrow_head() {
		assert_eq!(arrow_head(pt(4.0, 4.0), pt(4.0, 4.0), 1.0, 10.0, 5.0, 4.5), None);
	}

	#[test]
	fn message_anchor_leans_toward_sender() {
		let anchor = message_anchor(pt(0.0, 0.0), pt(100.0, 40.0));
		assert_eq!(anchor, pt(25.0, 10.0));
		assert_eq!(message_anchor(pt(100.0, 40.0), pt(0.0, 0.0)), pt(75.0, 30.0));
	}

	#[test]
	fn segment_distance() {
		let (a, b) = (pt(0.0, 0.0), pt(10.0, 0.0));
		assert_eq!(distance_to_segment(pt(5.0, 3.0), a, b), 3.0);
		assert_eq!(distance_to_segment(pt(-4.0, 3.0), a, b), 5.0);
		assert_eq!(distance_to_segment(pt(1.0, 1.0), a, a), 2.0_f64.sqrt());
	}

	fn point() -> impl Strategy<Value = ScreenPoint> {
		(-5000.0..5000.0_f64, -5000.0..5000.0_f64).prop_map(|(x, y)| pt(x, y))
	}

	proptest! {
		#[test]
		fn tip_is_destination(from in point(), to in point(), zoom in 0.1..10.0_f64) {
			prop_assume!(from != to);
			let head = arrow_head(from, to, zoom, 8.0, 1.0, 4.5).unwrap();
			prop_assert_eq!(head.tip, to);
			for p in head.points() {
				prop_assert!(p.x.is_finite() && p.y.is_finite());
			}
		}

		#[test]
		fn clamped_length_is_a_third(from in point(), to in point(), zoom in 0.1..10.0_f64) {
			prop_assume!(from != to);
			let line_length = from.distance(to);
			let head = arrow_head(from, to, zoom, 8.0, 1.0, 4.5).unwrap();
			if 2.0 * (8.0 * zoom * 4.5) >= line_length {
				prop_assert_eq!(head.length, line_length / 3.0);
			} else {
				prop_assert_eq!(head.length, 8.0 * zoom * 4.5);
			}
		}

		#[test]
		fn midpoint_is_symmetric(p1 in point(), p2 in point()) {
			prop_assert_eq!(midpoint(p1, p2), midpoint(p2, p1));
		}

		#[test]
		fn message_anchor_flips_with_direction(p1 in point(), p2 in point()) {
			prop_assume!(p1.distance(p2) > 1.0);
			prop_assert_ne!(message_anchor(p1, p2), message_anchor(p2, p1));
		}
	}
}
