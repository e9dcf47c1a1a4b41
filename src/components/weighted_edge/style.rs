/// Rendering settings shared by every edge on a canvas.
///
/// Arrow dimensions are unzoomed pixel sizes; the renderer multiplies them by
/// the current zoom factor and `head_size_factor`.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
	pub arrow_length: f64,
	pub arrow_width: f64,
	pub head_size_factor: f64,
	pub weight_separator: char,
	pub font: String,
	pub edge_color: String,
	pub highlight_color: String,
	pub weight_color: String,
	pub message_color: String,
}

impl Default for EdgeStyle {
	fn default() -> Self {
		Self {
			arrow_length: 8.0,
			arrow_width: 1.0,
			head_size_factor: 4.5,
			weight_separator: ',',
			font: "12px sans-serif".into(),
			edge_color: "#555555".into(),
			highlight_color: "#d62728".into(),
			weight_color: "black".into(),
			message_color: "blue".into(),
		}
	}
}

impl EdgeStyle {
	pub fn format_weight(&self, weight: i32) -> String {
		format_weight(weight, self.weight_separator)
	}
}

/// Formats `weight` with `separator` between groups of three digits.
pub fn format_weight(weight: i32, separator: char) -> String {
	let digits = weight.unsigned_abs().to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
	if weight < 0 {
		out.push('-');
	}
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(separator);
		}
		out.push(ch);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn groups_thousands() {
		assert_eq!(format_weight(1234567, ','), "1,234,567");
		assert_eq!(format_weight(123456, ','), "123,456");
		assert_eq!(format_weight(1000, '.'), "1.000");
		assert_eq!(format_weight(999, ','), "999");
		assert_eq!(format_weight(0, ','), "0");
	}

	#[test]
	fn keeps_sign() {
		assert_eq!(format_weight(-45000, ','), "-45,000");
		assert_eq!(format_weight(i32::MIN, ','), "-2,147,483,648");
	}

	#[test]
	fn style_uses_configured_separator() {
		let style = EdgeStyle {
			weight_separator: '\u{202f}',
			..EdgeStyle::default()
		};
		assert_eq!(style.format_weight(12345), "12\u{202f}345");
		assert_eq!(EdgeStyle::default().format_weight(12345), "12,345");
	}
}
