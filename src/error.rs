use thiserror::Error;

/// Errors surfaced by the composite renderer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DrawError {
    /// A caller-supplied layout has no coordinate for a graph node.
    #[error("layout has no position for node '{node}'")]
    MissingLayoutEntry { node: String },
}

/// Errors raised while loading or validating render options.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("Failed to parse style TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse style YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("node_size must be finite and non-negative, got {0}")]
    InvalidNodeSize(f64),

    #[error("canvas size must be finite and positive, got {width}x{height}")]
    InvalidCanvasSize { width: f64, height: f64 },

    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidEdgeWidth { field: &'static str, value: f64 },

    #[error("font_size must be finite and non-negative, got {0}")]
    InvalidFontSize(f64),

    #[error("margin must be finite and non-negative, got {0}")]
    InvalidMargin(f64),

    #[error("Unknown built-in style '{name}'. Available: {available}")]
    UnknownStyle { name: String, available: String },
}
