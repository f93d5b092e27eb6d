#![forbid(unsafe_code)]

//! Headless concentric-ring layout for topic graphs.
//!
//! Topics are placed depth-first from a root onto rings of radius `level * ring_unit`, avoiding
//! edge crossings where the sampler can, and then relaxed by a force simulation that keeps every
//! node on its ring and inside the quadrant it started in. Runs are deterministic for a given
//! `random_seed`.
//!
//! ```
//! use orrery::{LayoutConfig, TopicEdge, TopicNode, compute_layout};
//!
//! let nodes = vec![
//!     TopicNode::new("algebra").with_children(["calculus"]),
//!     TopicNode::new("calculus").with_prereqs(["algebra"]),
//! ];
//! let edges = vec![TopicEdge::new("algebra", "calculus")];
//! let layout = compute_layout(&nodes, &edges, "algebra", LayoutConfig::default()).unwrap();
//! assert_eq!(layout.positions["calculus"].level, 1);
//! ```

pub mod config;
pub mod error;
pub mod geom;
pub mod graph;
mod placement;
pub mod relax;
mod rng;
pub mod session;

pub use config::{LayoutConfig, ORIENTATION_EPSILON, UpdateOrder};
pub use error::{Error, Result, Warning};
pub use geom::{Orientation, Vec2, orientation, segments_intersect};
pub use graph::{Graph, GraphEdge, GraphNode, TopicEdge, TopicNode};
pub use relax::RelaxationOutcome;
pub use session::{Layout, LayoutSession, LayoutStats, NodePosition, compute_layout, place_only};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
