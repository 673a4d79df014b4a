use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use resvg::usvg;
use serde::Deserialize;
use signdraw::{DrawOptions, Labels, Layout, SignedGraph, StyleError, draw};
use tiny_skia::{Pixmap, Transform};
use tracing_subscriber::EnvFilter;

/// Render a signed graph to SVG, PNG or PDF
#[derive(Parser, Debug)]
#[command(name = "signdraw")]
#[command(version)]
#[command(about = "Render signed graphs with sign-coded edges", long_about = None)]
struct Args {
    /// Input JSON graph file (use "-" for stdin)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file path (extension determines format: .svg, .png or .pdf)
    #[arg(short, long, value_name = "OUTPUT")]
    output: PathBuf,

    /// Style file (TOML or YAML) or built-in style name
    #[arg(short, long, value_name = "STYLE")]
    style: Option<String>,

    /// Canvas width in pixels (overrides the style)
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height in pixels (overrides the style)
    #[arg(long)]
    height: Option<f64>,

    /// Pixels kept clear between the drawing and the canvas border
    /// (overrides the style)
    #[arg(long)]
    padding: Option<f64>,

    /// Raster scale multiplier for PNG output
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,
}

/// Node ids may be written as JSON strings or integers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl RawId {
    fn into_id(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Int(i) => i.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphFile {
    #[serde(default)]
    nodes: Vec<RawId>,
    #[serde(default)]
    edges: Vec<(RawId, RawId, f64)>,
    #[serde(default)]
    labels: HashMap<String, String>,
    #[serde(default)]
    positions: Option<HashMap<String, (f64, f64)>>,
}

fn main() -> Result<(), String> {
    init_tracing();
    let args = Args::parse();

    let mut options = match args.style.as_deref() {
        Some(style) => load_style(style)?,
        None => DrawOptions::default(),
    };
    if let Some(width) = args.width {
        options.canvas_width = width;
    }
    if let Some(height) = args.height {
        options.canvas_height = height;
    }
    if let Some(padding) = args.padding {
        options.margin = padding;
    }
    options
        .validate()
        .map_err(|e| format!("Invalid style: {}", e))?;

    let source = if args.input.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        buffer
    } else {
        std::fs::read_to_string(&args.input)
            .map_err(|e| format!("Failed to read input file: {}", e))?
    };

    let file: GraphFile =
        serde_json::from_str(&source).map_err(|e| format!("Failed to parse graph JSON: {}", e))?;

    let mut graph = SignedGraph::new();
    for node in file.nodes {
        graph.add_node(node.into_id());
    }
    for (u, v, weight) in file.edges {
        graph.add_edge(u.into_id(), v.into_id(), weight);
    }
    let labels: Labels = file.labels;
    let layout: Option<Layout> = file.positions.map(|p| p.into_iter().collect());

    let canvas = draw(&graph, layout.as_ref(), Some(&labels), &options)
        .map_err(|e| format!("Failed to draw graph: {}", e))?;
    let svg = canvas.to_svg();

    let output_ext = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .ok_or("Output file has no extension")?
        .to_ascii_lowercase();

    match output_ext.as_str() {
        "svg" => {
            std::fs::write(&args.output, &svg)
                .map_err(|e| format!("Failed to write SVG: {}", e))?;
        }
        "png" => {
            let png_data = svg_to_png(&svg, args.png_scale)?;
            std::fs::write(&args.output, png_data)
                .map_err(|e| format!("Failed to write PNG: {}", e))?;
        }
        "pdf" => {
            let pdf_data = svg_to_pdf(&svg)?;
            std::fs::write(&args.output, pdf_data)
                .map_err(|e| format!("Failed to write PDF: {}", e))?;
        }
        _ => {
            return Err(format!(
                "Unsupported output format: .{} (use .svg, .png or .pdf)",
                output_ext
            ));
        }
    }

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        output = %args.output.display(),
        "rendered signed graph"
    );
    eprintln!("Saved to: {}", args.output.display());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads a style file, trying TOML first and then YAML; anything that is not
/// a file is looked up among the built-in styles. Only a TOML syntax error
/// falls through to YAML, so out-of-range values report their own message.
fn load_style(style: &str) -> Result<DrawOptions, String> {
    let path = Path::new(style);
    if !path.is_file() {
        return DrawOptions::from_builtin(style).map_err(|e| e.to_string());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read style file: {}", e))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let parsed = if is_yaml {
        DrawOptions::from_yaml(&content)
    } else {
        DrawOptions::from_toml(&content).or_else(|e| match e {
            StyleError::Toml(_) => DrawOptions::from_yaml(&content),
            invalid => Err(invalid),
        })
    };
    parsed.map_err(|e| format!("Failed to load style {}: {}", path.display(), e))
}

fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>, String> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(format!("Invalid --png-scale value: {}", scale));
    }

    let mut opts = usvg::Options::default();
    {
        let fontdb = opts.fontdb_mut();
        fontdb.load_system_fonts();
        let family = sans_family(fontdb.faces().flat_map(|f| f.families.iter()));
        if let Some(family) = family {
            fontdb.set_sans_serif_family(family);
        }
    }

    let tree =
        usvg::Tree::from_str(svg, &opts).map_err(|e| format!("Failed to parse SVG: {}", e))?;

    let width = (tree.size().width() * scale).ceil() as u32;
    let height = (tree.size().height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or("Failed to create pixmap")?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| format!("Failed to encode PNG: {}", e))
}

fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, String> {
    use svg2pdf::usvg::fontdb;

    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();
    let family = sans_family(fontdb.faces().flat_map(|f| f.families.iter()));
    if let Some(family) = family {
        fontdb.set_sans_serif_family(family);
    }

    let opts = svg2pdf::usvg::Options {
        fontdb: std::sync::Arc::new(fontdb),
        ..Default::default()
    };
    let tree = svg2pdf::usvg::Tree::from_str(svg, &opts)
        .map_err(|e| format!("Failed to parse SVG: {}", e))?;

    // Labels as paths, so PDFs render without embedded fonts.
    let options = svg2pdf::ConversionOptions {
        embed_text: false,
        ..Default::default()
    };
    svg2pdf::to_pdf(&tree, options, svg2pdf::PageOptions::default())
        .map_err(|e| format!("Failed to convert SVG to PDF: {}", e))
}

/// First installed family with "sans" in its name, else the first family.
fn sans_family<'a, L: 'a>(families: impl Iterator<Item = &'a (String, L)>) -> Option<String> {
    let mut first: Option<String> = None;
    for (family, _) in families {
        if family.to_ascii_lowercase().contains("sans") {
            return Some(family.clone());
        }
        first.get_or_insert_with(|| family.clone());
    }
    first
}
