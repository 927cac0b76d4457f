//! Display themes for the Sankey figure
//!
//! A theme carries styling that is passed through to the charting library
//! untouched: node and link keyword maps, plus optional CSS snippets applied
//! to node labels and the figure title.

use serde_json::{Map, Value, json};

use crate::{Error, Result};

/// Names accepted by [`Theme::load`]
pub const THEME_NAMES: &[&str] = &["default", "d3", "simple"];

/// Pass-through styling for the rendered diagram
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    /// CSS applied to node labels
    pub label_style: Option<String>,
    /// CSS applied to the figure title
    pub title_style: Option<String>,
    /// Extra keyword arguments merged into the chart's node object
    pub node_style: Map<String, Value>,
    /// Extra keyword arguments merged into the chart's link object
    pub link_style: Map<String, Value>,
}

impl Theme {
    /// Load a built-in theme by name
    pub fn load(name: &str) -> Result<Theme> {
        match name {
            "default" => Ok(default_theme()),
            "d3" => Ok(d3()),
            "simple" => Ok(simple()),
            _ => Err(Error::Config(format!(
                "Theme `{}` not found. Choose from {:?}.",
                name, THEME_NAMES
            ))),
        }
    }
}

fn style(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn default_theme() -> Theme {
    Theme {
        label_style: Some(
            "color: #fff; font-weight: 600; letter-spacing: -1px; \
             text-shadow: 0 0 4px black, -1px 1px 0 #76777a, 1px 1px 0 #76777a, \
             1px -1px 0 #76777a, -1px -1px 0 #76777a;"
                .to_string(),
        ),
        title_style: Some(
            "color: #fff; font-weight: 900; word-spacing: 10px; letter-spacing: 3px; \
             text-shadow: 0 0 1px black, 0 0 2px black, 0 0 4px black;"
                .to_string(),
        ),
        node_style: style(json!({
            "pad": 30,
            "thickness": 10,
            "line": { "color": "#505050", "width": 1.5 },
        })),
        link_style: style(json!({
            "line": { "color": "#909090", "width": 1 },
        })),
    }
}

fn d3() -> Theme {
    Theme {
        label_style: None,
        title_style: None,
        node_style: style(json!({
            "pad": 20,
            "thickness": 15,
            "line": { "width": 1 },
        })),
        link_style: style(json!({
            "color": "rgba(120, 120, 120, 0.25)",
        })),
    }
}

fn simple() -> Theme {
    Theme {
        label_style: Some("color: #666666; font-size: 18px;".to_string()),
        title_style: Some("color: #666666; font-size: 24px; font-weight: 900;".to_string()),
        node_style: style(json!({
            "pad": 60,
            "thickness": 30,
            "line": { "width": 0 },
        })),
        link_style: style(json!({
            "color": "rgba(120, 120, 120, 0.25)",
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builtin_themes() {
        for name in THEME_NAMES {
            assert!(Theme::load(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_unknown_theme_fails() {
        let err = Theme::load("neon").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("neon"));
    }

    #[test]
    fn test_default_theme_styling() {
        let theme = Theme::load("default").unwrap();
        assert!(theme.label_style.is_some());
        assert_eq!(theme.node_style["pad"], json!(30));
        assert_eq!(theme.link_style["line"]["width"], json!(1));
    }
}
