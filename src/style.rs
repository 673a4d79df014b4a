use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::edge_style::EdgeStyleConfig;
use crate::error::StyleError;

const NODE_SIZE: f64 = 500.0;
const NODE_COLOR: &str = "white";
const NODE_EDGE_COLOR: &str = "black";
const FONT_SIZE: f64 = 12.0;
const FONT_COLOR: &str = "black";
const FONT_FAMILY: &str = "sans-serif";
const CANVAS_SIZE: f64 = 1000.0;
const BACKGROUND: &str = "white";
const MARGIN: f64 = 10.0;

const BUILTIN_STYLES: &[(&str, &str)] = &[
    ("classic", include_str!("../styles/classic.toml")),
    ("colorblind", include_str!("../styles/colorblind.toml")),
    ("grayscale", include_str!("../styles/grayscale.toml")),
];

/// Styling for one render call.
///
/// Every field has a default, so a style file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawOptions {
    /// Node marker area in square points.
    #[serde(default = "default_node_size")]
    pub node_size: f64,
    #[serde(default = "default_node_color")]
    pub node_color: String,
    #[serde(default = "default_node_edge_color")]
    pub node_edge_color: String,

    #[serde(default)]
    pub edges: EdgeStyleConfig,

    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_color")]
    pub font_color: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,

    #[serde(default = "default_canvas_size")]
    pub canvas_width: f64,
    #[serde(default = "default_canvas_size")]
    pub canvas_height: f64,
    #[serde(default = "default_background")]
    pub background: String,
    /// Pixels kept clear between the outermost node marker and the border.
    #[serde(default = "default_margin")]
    pub margin: f64,
}

fn default_node_size() -> f64 {
    NODE_SIZE
}
fn default_node_color() -> String {
    NODE_COLOR.to_string()
}
fn default_node_edge_color() -> String {
    NODE_EDGE_COLOR.to_string()
}
fn default_font_size() -> f64 {
    FONT_SIZE
}
fn default_font_color() -> String {
    FONT_COLOR.to_string()
}
fn default_font_family() -> String {
    FONT_FAMILY.to_string()
}
fn default_canvas_size() -> f64 {
    CANVAS_SIZE
}
fn default_background() -> String {
    BACKGROUND.to_string()
}
fn default_margin() -> f64 {
    MARGIN
}

fn finite_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            node_size: NODE_SIZE,
            node_color: default_node_color(),
            node_edge_color: default_node_edge_color(),
            edges: EdgeStyleConfig::default(),
            font_size: FONT_SIZE,
            font_color: default_font_color(),
            font_family: default_font_family(),
            canvas_width: CANVAS_SIZE,
            canvas_height: CANVAS_SIZE,
            background: default_background(),
            margin: MARGIN,
        }
    }
}

impl DrawOptions {
    pub fn from_builtin(name: &str) -> Result<Self, StyleError> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        let content = BUILTIN_STYLES
            .iter()
            .find(|(n, _)| *n == normalized)
            .map(|(_, c)| *c)
            .ok_or_else(|| StyleError::UnknownStyle {
                name: name.to_string(),
                available: Self::list_builtins().join(", "),
            })?;
        Self::from_toml(content)
    }

    pub fn list_builtins() -> Vec<&'static str> {
        BUILTIN_STYLES.iter().map(|(n, _)| *n).collect()
    }

    pub fn from_toml(content: &str) -> Result<Self, StyleError> {
        let options: DrawOptions = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_yaml(content: &str) -> Result<Self, StyleError> {
        let options: DrawOptions = serde_yaml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    /// Rejects values that would serialize to an invalid SVG document.
    ///
    /// Loading from TOML/YAML validates automatically; call this again after
    /// overriding fields by hand.
    pub fn validate(&self) -> Result<(), StyleError> {
        if !finite_non_negative(self.node_size) {
            return Err(StyleError::InvalidNodeSize(self.node_size));
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.canvas_width) || !positive(self.canvas_height) {
            return Err(StyleError::InvalidCanvasSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        for (field, value) in [
            ("edges.positive_width", self.edges.positive_width),
            ("edges.negative_width", self.edges.negative_width),
        ] {
            if !finite_non_negative(value) {
                return Err(StyleError::InvalidEdgeWidth { field, value });
            }
        }
        if !finite_non_negative(self.font_size) {
            return Err(StyleError::InvalidFontSize(self.font_size));
        }
        if !finite_non_negative(self.margin) {
            return Err(StyleError::InvalidMargin(self.margin));
        }
        Ok(())
    }

    /// A blank canvas with the configured size, background and margin.
    pub fn new_canvas(&self) -> Canvas {
        Canvas::new(self.canvas_width, self.canvas_height)
            .with_background(&self.background)
            .with_margin(self.margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge_style::LineStyle;

    #[test]
    fn defaults_match_documented_values() {
        let options = DrawOptions::default();
        assert_eq!(options.node_size, 500.0);
        assert_eq!(options.node_color, "white");
        assert_eq!(options.node_edge_color, "black");
        assert_eq!(options.edges, EdgeStyleConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let options = DrawOptions::from_toml(
            r#"
node_size = 300.0

[edges]
negative_line_style = "dotted"
"#,
        )
        .expect("valid toml");

        assert_eq!(options.node_size, 300.0);
        assert_eq!(options.node_color, "white");
        assert_eq!(options.edges.negative_line_style, LineStyle::Dotted);
        assert_eq!(options.edges.positive_color, "darkgreen");
    }

    #[test]
    fn yaml_is_accepted() {
        let options = DrawOptions::from_yaml("node_color: \"#eeeeee\"\ncanvas_width: 640\n")
            .expect("valid yaml");
        assert_eq!(options.node_color, "#eeeeee");
        assert_eq!(options.canvas_width, 640.0);
    }

    #[test]
    fn negative_node_size_is_rejected() {
        let err = DrawOptions::from_toml("node_size = -1.0").unwrap_err();
        assert!(matches!(err, StyleError::InvalidNodeSize(_)));
    }

    #[test]
    fn degenerate_canvas_size_is_rejected() {
        let err = DrawOptions::from_toml("canvas_width = -10.0").unwrap_err();
        assert!(matches!(err, StyleError::InvalidCanvasSize { width, .. } if width == -10.0));

        let err = DrawOptions::from_yaml("canvas_height: 0").unwrap_err();
        assert!(matches!(err, StyleError::InvalidCanvasSize { .. }));
    }

    #[test]
    fn negative_edge_width_is_rejected() {
        let err = DrawOptions::from_toml("[edges]\npositive_width = -3.0").unwrap_err();
        assert!(matches!(
            err,
            StyleError::InvalidEdgeWidth { field: "edges.positive_width", .. }
        ));

        let err = DrawOptions::from_toml("[edges]\nnegative_width = inf").unwrap_err();
        assert!(matches!(
            err,
            StyleError::InvalidEdgeWidth { field: "edges.negative_width", .. }
        ));
    }

    #[test]
    fn non_finite_font_size_is_rejected() {
        let err = DrawOptions::from_toml("font_size = nan").unwrap_err();
        assert!(matches!(err, StyleError::InvalidFontSize(v) if v.is_nan()));
    }

    #[test]
    fn negative_margin_is_rejected() {
        let err = DrawOptions::from_toml("margin = -1.0").unwrap_err();
        assert!(matches!(err, StyleError::InvalidMargin(_)));
    }

    #[test]
    fn hand_edited_options_can_be_revalidated() {
        let options = DrawOptions {
            canvas_width: f64::NAN,
            ..DrawOptions::default()
        };
        assert!(options.validate().is_err());
        assert!(DrawOptions::default().validate().is_ok());
    }

    #[test]
    fn unknown_builtin_lists_available_styles() {
        let err = DrawOptions::from_builtin("neon").unwrap_err();
        assert!(matches!(err, StyleError::UnknownStyle { ref name, .. } if name == "neon"));
        assert!(err.to_string().contains("classic, colorblind, grayscale"));
    }

    #[test]
    fn unknown_line_style_is_a_parse_error() {
        let err = DrawOptions::from_toml("[edges]\npositive_line_style = \"wavy\"").unwrap_err();
        assert!(matches!(err, StyleError::Toml(_)));
    }

    #[test]
    fn builtins_parse_and_accept_loose_names() {
        for name in DrawOptions::list_builtins() {
            DrawOptions::from_builtin(name).expect("built-in style must parse");
        }
        let classic = DrawOptions::from_builtin("Classic").expect("case-insensitive");
        assert_eq!(classic, DrawOptions::default());

        let gray = DrawOptions::from_builtin("grayscale").unwrap();
        assert_eq!(gray.edges.negative_line_style, LineStyle::Dashed);
        assert!(DrawOptions::from_builtin("neon").is_err());
    }

    #[test]
    fn canvas_follows_options() {
        let options = DrawOptions {
            canvas_width: 320.0,
            canvas_height: 240.0,
            background: "black".to_string(),
            ..DrawOptions::default()
        };
        let canvas = options.new_canvas();
        assert_eq!((canvas.width(), canvas.height()), (320.0, 240.0));
        assert_eq!(canvas.background(), "black");
        assert_eq!(canvas.margin(), 10.0);
    }
}
