use crate::edge_style::LineStyle;
use crate::layout::Point;
use crate::xml::escape_xml;

/// Pixels per typographic point at 100 dpi.
pub const PX_PER_POINT: f64 = 100.0 / 72.0;

const DEFAULT_WIDTH: f64 = 1000.0;
const DEFAULT_HEIGHT: f64 = 1000.0;
const DEFAULT_BACKGROUND: &str = "white";
const DEFAULT_MARGIN_PX: f64 = 10.0;
const NODE_OUTLINE_PT: f64 = 1.0;

/// Marker radius in pixels for a marker area given in square points.
pub fn node_radius_px(size: f64) -> f64 {
    size.max(0.0).sqrt() / 2.0 * PX_PER_POINT
}

/// Shared appearance for a batch of node markers.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    pub size: f64,
    pub fill: String,
    pub stroke: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeMarker {
    pub center: Point,
    pub style: NodeStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeMark {
    pub from: Point,
    pub to: Point,
    pub color: String,
    pub line_style: LineStyle,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelMark {
    pub position: Point,
    pub text: String,
    pub font_size: f64,
    pub font_family: String,
    pub color: String,
}

/// One primitive on the canvas, in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Node(NodeMarker),
    Edge(EdgeMark),
    Label(LabelMark),
}

impl Mark {
    /// Paint layer: edges under nodes, labels on top.
    pub fn z_order(&self) -> u8 {
        match self {
            Mark::Edge(_) => 1,
            Mark::Node(_) => 2,
            Mark::Label(_) => 3,
        }
    }

    fn points(&self) -> Vec<Point> {
        match self {
            Mark::Node(n) => vec![n.center],
            Mark::Edge(e) => vec![e.from, e.to],
            Mark::Label(l) => vec![l.position],
        }
    }
}

/// A retained drawing surface.
///
/// Marks are kept in the order they were drawn and only turned into pixels
/// by [`Canvas::to_svg`], which fits their bounding box to the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: f64,
    height: f64,
    background: String,
    margin: f64,
    marks: Vec<Mark>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: DEFAULT_BACKGROUND.to_string(),
            margin: DEFAULT_MARGIN_PX,
            marks: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// Pixels kept clear beyond the largest node marker on every side.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn node_markers(&self) -> impl Iterator<Item = &NodeMarker> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Node(n) => Some(n),
            _ => None,
        })
    }

    pub fn edge_marks(&self) -> impl Iterator<Item = &EdgeMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Edge(e) => Some(e),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &LabelMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Label(l) => Some(l),
            _ => None,
        })
    }

    /// Draws every center with the same marker style.
    pub fn draw_nodes<I>(&mut self, centers: I, style: &NodeStyle)
    where
        I: IntoIterator<Item = Point>,
    {
        self.marks.extend(centers.into_iter().map(|center| {
            Mark::Node(NodeMarker {
                center,
                style: style.clone(),
            })
        }));
    }

    pub fn draw_edge(&mut self, edge: EdgeMark) {
        self.marks.push(Mark::Edge(edge));
    }

    pub fn draw_label(&mut self, label: LabelMark) {
        self.marks.push(Mark::Label(label));
    }

    /// Serializes the canvas as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let viewport = Viewport::fit(self);
        let mut content = String::new();

        let mut ordered: Vec<&Mark> = self.marks.iter().collect();
        ordered.sort_by_key(|m| m.z_order());

        for mark in ordered {
            match mark {
                Mark::Edge(edge) => content.push_str(&render_edge(edge, &viewport)),
                Mark::Node(node) => content.push_str(&render_node(node, &viewport)),
                Mark::Label(label) => content.push_str(&render_label(label, &viewport)),
            }
        }

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}"><rect width="100%" height="100%" fill="{bg}" />{content}</svg>"#,
            w = self.width,
            h = self.height,
            bg = escape_xml(&self.background),
            content = content,
        )
    }
}

/// Maps data coordinates to pixels with a uniform scale and y pointing up.
struct Viewport {
    center_data: Point,
    center_px: Point,
    scale: f64,
}

impl Viewport {
    fn fit(canvas: &Canvas) -> Self {
        let center_px = Point::new(canvas.width / 2.0, canvas.height / 2.0);
        let points: Vec<Point> = canvas.marks.iter().flat_map(Mark::points).collect();
        if points.is_empty() {
            return Self {
                center_data: Point::default(),
                center_px,
                scale: 1.0,
            };
        }

        let mut min = Point::new(f64::MAX, f64::MAX);
        let mut max = Point::new(f64::MIN, f64::MIN);
        for p in &points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        let largest_radius = canvas
            .node_markers()
            .map(|n| node_radius_px(n.style.size))
            .fold(0.0, f64::max);
        let pad = largest_radius + canvas.margin;
        let avail_w = (canvas.width - 2.0 * pad).max(1.0);
        let avail_h = (canvas.height - 2.0 * pad).max(1.0);

        let span_x = max.x - min.x;
        let span_y = max.y - min.y;
        let scale = match (span_x > 0.0, span_y > 0.0) {
            (true, true) => (avail_w / span_x).min(avail_h / span_y),
            (true, false) => avail_w / span_x,
            (false, true) => avail_h / span_y,
            (false, false) => 1.0,
        };

        Self {
            center_data: Point::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0),
            center_px,
            scale,
        }
    }

    fn to_px(&self, p: Point) -> (f64, f64) {
        (
            self.center_px.x + (p.x - self.center_data.x) * self.scale,
            self.center_px.y - (p.y - self.center_data.y) * self.scale,
        )
    }
}

fn render_node(node: &NodeMarker, viewport: &Viewport) -> String {
    let (cx, cy) = viewport.to_px(node.center);
    format!(
        r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" stroke="{}" stroke-width="{:.2}" />"#,
        cx,
        cy,
        node_radius_px(node.style.size),
        escape_xml(&node.style.fill),
        escape_xml(&node.style.stroke),
        NODE_OUTLINE_PT * PX_PER_POINT,
    )
}

fn render_edge(edge: &EdgeMark, viewport: &Viewport) -> String {
    let (x1, y1) = viewport.to_px(edge.from);
    let (x2, y2) = viewport.to_px(edge.to);
    let width = edge.width * PX_PER_POINT;
    let dash = edge
        .line_style
        .dasharray(width)
        .map(|d| format!(r#" stroke-dasharray="{}""#, d))
        .unwrap_or_default();

    format!(
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}" stroke-linecap="round"{} />"#,
        x1,
        y1,
        x2,
        y2,
        escape_xml(&edge.color),
        width,
        dash,
    )
}

fn render_label(label: &LabelMark, viewport: &Viewport) -> String {
    let (x, y) = viewport.to_px(label.position);
    format!(
        r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
        x,
        y,
        escape_xml(&label.font_family),
        label.font_size * PX_PER_POINT,
        escape_xml(&label.color),
        escape_xml(&label.text),
    )
}
