//! Render signed graphs as 2-D diagrams.
//!
//! The pipeline has three stages: a layout computed from the graph's
//! unsigned projection, an edge style derived from each weight's sign, and a
//! compositor that draws nodes, edges and labels onto a [`Canvas`].
//!
//! ```
//! use signdraw::{draw, DrawOptions, SignedGraph};
//!
//! let graph: SignedGraph<&str> = [("A", "B", 1.0), ("B", "C", -1.0)].into_iter().collect();
//! let canvas = draw(&graph, None, None, &DrawOptions::default()).unwrap();
//! assert_eq!(canvas.node_markers().count(), 3);
//! let svg = canvas.to_svg();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod canvas;
pub mod draw;
pub mod edge_style;
pub mod error;
pub mod graph;
pub mod layout;
pub mod style;
pub mod xml;

pub use canvas::{Canvas, Mark};
pub use draw::{Labels, draw, draw_on, draw_with};
pub use edge_style::{EdgeSign, EdgeStyle, EdgeStyleConfig, LineStyle, resolve_edge_style};
pub use error::{DrawError, StyleError};
pub use graph::{NodeId, SignedGraph, Topology};
pub use layout::{CircularLayout, KamadaKawai, Layout, LayoutAlgorithm, Point, compute_layout};
pub use style::DrawOptions;
