use std::fmt;

/// A message a host can place on an edge. Its label is the text shown on the
/// edge while the message is in flight.
pub trait Message: fmt::Display {
	fn label(&self) -> String {
		self.to_string()
	}
}

/// Acknowledgement sent back over an edge once a connection is accepted.
///
/// Carries no payload, so every copy is identical and it can be shared freely
/// once sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConnectOk;

impl fmt::Display for ConnectOk {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("ConnectOKMsg")
	}
}

impl Message for ConnectOk {}
