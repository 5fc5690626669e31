/// Module with conversion to graphviz dot format
#[cfg(feature = "dot_writer")]
pub(crate) mod dot;

/// Module with the string algebra of regular expressions.
pub(crate) mod expression;

/// Module for several ID types.
mod ids;
pub use ids::{GroupID, GroupIDBase, StateID, StateIDBase};
