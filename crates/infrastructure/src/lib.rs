//! Ferrous Route Infrastructure Layer
pub mod dns;
pub mod graph;

pub use graph::ResolverGraph;
