use std::borrow::Cow;
use std::collections::HashMap;

use tracing::debug;

use crate::canvas::{Canvas, EdgeMark, LabelMark, NodeStyle};
use crate::error::DrawError;
use crate::graph::{NodeId, SignedGraph};
use crate::layout::{KamadaKawai, Layout, LayoutAlgorithm, Point};
use crate::style::DrawOptions;

/// Display text per node; nodes without an entry show their identifier.
pub type Labels<N = String> = HashMap<N, String>;

/// Renders `graph` onto a fresh canvas sized by `options`.
pub fn draw<N: NodeId>(
    graph: &SignedGraph<N>,
    layout: Option<&Layout<N>>,
    labels: Option<&Labels<N>>,
    options: &DrawOptions,
) -> Result<Canvas, DrawError> {
    let mut canvas = options.new_canvas();
    draw_on(&mut canvas, graph, layout, labels, options)?;
    Ok(canvas)
}

/// Renders `graph` onto a caller-owned canvas.
pub fn draw_on<N: NodeId>(
    canvas: &mut Canvas,
    graph: &SignedGraph<N>,
    layout: Option<&Layout<N>>,
    labels: Option<&Labels<N>>,
    options: &DrawOptions,
) -> Result<(), DrawError> {
    draw_with(
        canvas,
        graph,
        layout,
        labels,
        options,
        &KamadaKawai::default(),
    )
}

/// Like [`draw_on`], computing missing layouts with `algorithm`.
///
/// Nodes are drawn first, then edges, then labels. On error the canvas keeps
/// whatever was drawn before the failure.
pub fn draw_with<N: NodeId, A: LayoutAlgorithm<N> + ?Sized>(
    canvas: &mut Canvas,
    graph: &SignedGraph<N>,
    layout: Option<&Layout<N>>,
    labels: Option<&Labels<N>>,
    options: &DrawOptions,
    algorithm: &A,
) -> Result<(), DrawError> {
    let layout: Cow<'_, Layout<N>> = match layout {
        Some(supplied) => Cow::Borrowed(supplied),
        None => Cow::Owned(algorithm.layout(&graph.unsigned_projection())),
    };

    let edge_styles: Vec<_> = graph
        .signed_edges()
        .iter()
        .map(|edge| options.edges.resolve(edge.weight))
        .collect();

    let centers = node_positions(graph, &layout)?;
    canvas.draw_nodes(
        centers.iter().copied(),
        &NodeStyle {
            size: options.node_size,
            fill: options.node_color.clone(),
            stroke: options.node_edge_color.clone(),
        },
    );

    for (edge, style) in graph.signed_edges().iter().zip(edge_styles) {
        canvas.draw_edge(EdgeMark {
            from: centers[edge.u],
            to: centers[edge.v],
            color: style.color,
            line_style: style.line_style,
            width: style.width,
        });
    }

    for (node, position) in graph.nodes().zip(centers) {
        let text = labels
            .and_then(|l| l.get(node))
            .cloned()
            .unwrap_or_else(|| node.to_string());
        canvas.draw_label(LabelMark {
            position,
            text,
            font_size: options.font_size,
            font_family: options.font_family.clone(),
            color: options.font_color.clone(),
        });
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "drew signed graph"
    );
    Ok(())
}

/// Positions in node order, failing on the first node the layout lacks.
fn node_positions<N: NodeId>(
    graph: &SignedGraph<N>,
    layout: &Layout<N>,
) -> Result<Vec<Point>, DrawError> {
    graph
        .nodes()
        .map(|node| {
            layout.get(node).ok_or_else(|| DrawError::MissingLayoutEntry {
                node: node.to_string(),
            })
        })
        .collect()
}
