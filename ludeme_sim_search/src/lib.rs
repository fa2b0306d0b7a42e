/// Tree node statistics and the read-only view over them
pub mod node;

/// Random playouts driven by apply/undo
pub mod playout;

/// Implementation for Monte-Carlo Tree Search with UCB1 selection
pub mod uct;

pub use node::{NodeData, NodeRef, SearchNode};
pub use uct::{SearchLimits, SearchResult, Uct, UctConfig};
