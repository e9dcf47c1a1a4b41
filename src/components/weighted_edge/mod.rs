//! Directed, weighted edges and the canvas that hosts them.

mod component;
pub mod edge;
pub mod geometry;
pub mod message;
mod render;
mod state;
pub mod style;
mod types;

pub use component::WeightedGraphCanvas;
pub use edge::{EdgeCanvas, EdgeDisplay, EdgeFrame, ScreenTransform, WeightedEdge};
pub use message::{ConnectOk, Message};
pub use style::EdgeStyle;
pub use types::{GraphData, GraphLink, GraphNode};
