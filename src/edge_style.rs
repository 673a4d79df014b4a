use serde::{Deserialize, Serialize};

const POSITIVE_COLOR: &str = "darkgreen";
const NEGATIVE_COLOR: &str = "red";
const EDGE_WIDTH: f64 = 2.0;

/// Which side of zero an edge weight falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeSign {
    Positive,
    NonPositive,
}

impl EdgeSign {
    /// Strictly positive weights are `Positive`; zero and NaN are not.
    pub fn of(weight: f64) -> Self {
        if weight > 0.0 {
            EdgeSign::Positive
        } else {
            EdgeSign::NonPositive
        }
    }
}

/// Stroke pattern for an edge line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// SVG `stroke-dasharray` for this pattern at the given stroke width.
    pub fn dasharray(&self, width: f64) -> Option<String> {
        let w = width.max(1.0);
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some(format!("{:.2},{:.2}", 3.7 * w, 1.6 * w)),
            LineStyle::Dotted => Some(format!("{:.2},{:.2}", w, 1.65 * w)),
            LineStyle::DashDot => Some(format!(
                "{:.2},{:.2},{:.2},{:.2}",
                6.4 * w,
                1.6 * w,
                w,
                1.6 * w
            )),
        }
    }
}

/// Visual attributes resolved for one edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStyle {
    pub sign: EdgeSign,
    pub color: String,
    pub line_style: LineStyle,
    pub width: f64,
}

/// Per-sign edge appearance.
///
/// Both branches share line style and width by default; they are kept
/// separate so a style file can tell them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyleConfig {
    #[serde(default = "default_positive_color")]
    pub positive_color: String,
    #[serde(default = "default_negative_color")]
    pub negative_color: String,
    #[serde(default)]
    pub positive_line_style: LineStyle,
    #[serde(default)]
    pub negative_line_style: LineStyle,
    #[serde(default = "default_width")]
    pub positive_width: f64,
    #[serde(default = "default_width")]
    pub negative_width: f64,
}

fn default_positive_color() -> String {
    POSITIVE_COLOR.to_string()
}
fn default_negative_color() -> String {
    NEGATIVE_COLOR.to_string()
}
fn default_width() -> f64 {
    EDGE_WIDTH
}

impl Default for EdgeStyleConfig {
    fn default() -> Self {
        Self {
            positive_color: default_positive_color(),
            negative_color: default_negative_color(),
            positive_line_style: LineStyle::Solid,
            negative_line_style: LineStyle::Solid,
            positive_width: EDGE_WIDTH,
            negative_width: EDGE_WIDTH,
        }
    }
}

impl EdgeStyleConfig {
    pub fn resolve(&self, weight: f64) -> EdgeStyle {
        let sign = EdgeSign::of(weight);
        let color = match sign {
            EdgeSign::Positive => &self.positive_color,
            EdgeSign::NonPositive => &self.negative_color,
        };
        let line_style = match sign {
            EdgeSign::Positive => self.positive_line_style,
            EdgeSign::NonPositive => self.negative_line_style,
        };
        let width = match sign {
            EdgeSign::Positive => self.positive_width,
            EdgeSign::NonPositive => self.negative_width,
        };

        EdgeStyle {
            sign,
            color: color.clone(),
            line_style,
            width,
        }
    }
}

/// Resolves an edge's style with the default palette.
///
/// Zero counts as non-positive. NaN fails the `> 0` test and is styled as
/// non-positive as well.
pub fn resolve_edge_style(weight: f64) -> EdgeStyle {
    EdgeStyleConfig::default().resolve(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_is_non_positive() {
        let style = resolve_edge_style(0.0);
        assert_eq!(style.sign, EdgeSign::NonPositive);
        assert_eq!(style.color, "red");

        assert_eq!(resolve_edge_style(-0.0).sign, EdgeSign::NonPositive);
    }

    #[test]
    fn extreme_weights() {
        assert_eq!(resolve_edge_style(f64::MIN_POSITIVE).color, "darkgreen");
        assert_eq!(resolve_edge_style(f64::INFINITY).color, "darkgreen");
        assert_eq!(resolve_edge_style(f64::NEG_INFINITY).color, "red");
        assert_eq!(resolve_edge_style(f64::NAN).sign, EdgeSign::NonPositive);
    }

    #[test]
    fn both_signs_share_line_style_and_width_by_default() {
        let pos = resolve_edge_style(1.0);
        let neg = resolve_edge_style(-1.0);
        assert_eq!(pos.line_style, LineStyle::Solid);
        assert_eq!(pos.line_style, neg.line_style);
        assert_eq!(pos.width, 2.0);
        assert_eq!(pos.width, neg.width);
    }

    #[test]
    fn custom_config_differentiates_branches() {
        let config = EdgeStyleConfig {
            negative_line_style: LineStyle::Dashed,
            negative_width: 1.0,
            ..EdgeStyleConfig::default()
        };
        let neg = config.resolve(-2.0);
        assert_eq!(neg.line_style, LineStyle::Dashed);
        assert_eq!(neg.width, 1.0);
        assert_eq!(config.resolve(2.0).line_style, LineStyle::Solid);
    }

    #[test]
    fn dasharray_only_for_broken_lines() {
        assert_eq!(LineStyle::Solid.dasharray(2.0), None);
        assert_eq!(LineStyle::Dashed.dasharray(2.0).as_deref(), Some("7.40,3.20"));
        assert_eq!(LineStyle::DashDot.dasharray(1.0).as_deref(), Some("6.40,1.60,1.00,1.60"));
    }

    proptest! {
        #[test]
        fn color_follows_strict_sign(weight in prop::num::f64::ANY) {
            let style = resolve_edge_style(weight);
            if weight > 0.0 {
                prop_assert_eq!(style.color, "darkgreen");
            } else {
                prop_assert_eq!(style.color, "red");
            }
        }
    }
}
