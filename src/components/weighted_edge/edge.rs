//! A directed, weighted edge that annotates itself on a canvas.

use std::fmt;

use log::trace;

use super::geometry::{self, ScreenPoint};
use super::message::Message;
use super::style::{EdgeStyle, format_weight};

/// Drawing primitives the host canvas provides.
pub trait EdgeCanvas {
	fn set_color(&self, color: &str);
	fn fill_polygon(&self, points: &[ScreenPoint]);
	fn draw_text(&self, text: &str, at: ScreenPoint);
}

/// World-to-screen mapping owned by the host (pan and zoom).
pub trait ScreenTransform {
	fn to_screen(&self, x: f64, y: f64) -> ScreenPoint;
	fn zoom_factor(&self) -> f64;
}

/// Which annotations an edge draws. Fixed when the edge is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeDisplay {
	pub show_weight: bool,
	pub show_arrowhead: bool,
}

impl EdgeDisplay {
	pub const ALL: Self = Self {
		show_weight: true,
		show_arrowhead: true,
	};
}

/// Per-frame input from the host: world positions of both endpoints, how many
/// messages are on the edge this round, and the colour the edge is drawn in.
#[derive(Clone, Copy, Debug)]
pub struct EdgeFrame<'a> {
	pub from: (f64, f64),
	pub to: (f64, f64),
	pub messages_on_edge: u32,
	pub color: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedEdge {
	from: String,
	to: String,
	weight: i32,
	display: EdgeDisplay,
	message_label: String,
	previous_message_count: Option<u32>,
}

impl WeightedEdge {
	pub fn new(from: impl Into<String>, to: impl Into<String>, weight: i32, display: EdgeDisplay) -> Self {
		Self {
			from: from.into(),
			to: to.into(),
			weight,
			display,
			message_label: String::new(),
			previous_message_count: None,
		}
	}

	pub fn from(&self) -> &str {
		&self.from
	}

	pub fn to(&self) -> &str {
		&self.to
	}

	pub fn weight(&self) -> i32 {
		self.weight
	}

	pub fn set_weight(&mut self, weight: i32) {
		self.weight = weight;
	}

	pub fn display(&self) -> EdgeDisplay {
		self.display
	}

	/// Text of the last message placed on this edge, empty when none.
	pub fn message_label(&self) -> &str {
		&self.message_label
	}

	/// First non-zero message count seen, `None` until traffic is observed.
	pub fn previous_message_count(&self) -> Option<u32> {
		self.previous_message_count
	}

	/// Replaces the message label. Only the most recent message is shown.
	pub fn on_message_attached(&mut self, text: impl Into<String>) {
		self.message_label = text.into();
	}

	pub fn attach(&mut self, msg: &dyn Message) {
		self.on_message_attached(msg.label());
	}

	/// Updates the message label from the host's count for this frame.
	///
	/// An empty edge drops the label. The recorded count latches on the first
	/// frame with traffic and is not updated afterward.
	pub fn on_draw_tick(&mut self, messages_on_edge: u32) {
		if messages_on_edge == 0 && self.previous_message_count != Some(0) {
			self.message_label.clear();
		}
		if self.previous_message_count.is_none() && messages_on_edge > 0 {
			self.previous_message_count = Some(messages_on_edge);
		}
	}

	/// Draws the weight, arrowhead and message label, in that order, so later
	/// annotations land on top of earlier ones.
	pub fn draw<C, T>(&mut self, canvas: &C, transform: &T, frame: EdgeFrame<'_>, style: &EdgeStyle)
	where
		C: EdgeCanvas + ?Sized,
		T: ScreenTransform + ?Sized,
	{
		let from = transform.to_screen(frame.from.0, frame.from.1);
		let to = transform.to_screen(frame.to.0, frame.to.1);

		if self.weight != 0 && self.display.show_weight {
			canvas.set_color(&style.weight_color);
			canvas.draw_text(&style.format_weight(self.weight), geometry::midpoint(from, to));
		}

		if self.display.show_arrowhead {
			match geometry::arrow_head(
				from,
				to,
				transform.zoom_factor(),
				style.arrow_length,
				style.arrow_width,
				style.head_size_factor,
			) {
				Some(head) => {
					canvas.set_color(frame.color);
					canvas.fill_polygon(&head.points());
				}
				None => trace!("{self}: endpoints coincide, no arrowhead"),
			}
		}

		self.on_draw_tick(frame.messages_on_edge);
		if !self.message_label.is_empty() {
			canvas.set_color(&style.message_color);
			canvas.draw_text(&self.message_label, geometry::message_anchor(from, to));
		}

		trace!("messages on {self}: {}", frame.messages_on_edge);
	}
}

impl fmt::Display for WeightedEdge {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"WeightedEdge({}, {}, {})",
			format_weight(self.weight, ','),
			self.from,
			self.to
		)
	}
}
