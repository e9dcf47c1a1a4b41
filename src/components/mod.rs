//! Reusable view components.

pub mod weighted_edge;
