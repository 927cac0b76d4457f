//! Diagram adapter - translate a flow graph into charting-library arguments
//!
//! The charting library consumes parallel arrays: one entry per node for
//! labels and colors, one entry per link for source/target indices, values,
//! colors, and hover text. Nothing here draws anything; the figure document
//! is handed to an external renderer.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::cli::LabelType;
use crate::sankey::graph::FlowGraph;
use crate::sankey::themes::Theme;

/// Parallel arrays describing the assembled diagram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyParameters {
    /// Node labels, rendered according to the selected label type
    pub labels: Vec<String>,
    pub node_colors: Vec<String>,
    /// Node hover text (the step label)
    pub node_hover: Vec<String>,
    /// Link source node positions
    pub sources: Vec<usize>,
    /// Link target node positions
    pub targets: Vec<usize>,
    /// Link weights
    pub values: Vec<u64>,
    pub link_colors: Vec<String>,
    /// Link hover text describing the change
    pub link_labels: Vec<String>,
}

impl SankeyParameters {
    /// Flatten a flow graph into the arrays the charting library expects
    pub fn from_graph(graph: &FlowGraph, label_type: LabelType) -> Self {
        let mut step_totals = vec![0u64; graph.step_count()];
        for node in graph.nodes() {
            step_totals[node.step] += node.occurrence;
        }

        let mut labels = Vec::with_capacity(graph.node_count());
        let mut node_colors = Vec::with_capacity(graph.node_count());
        let mut node_hover = Vec::with_capacity(graph.node_count());
        for node in graph.nodes() {
            labels.push(match label_type {
                LabelType::Class => node.display_label(),
                LabelType::Percent => {
                    let share = node.occurrence as f64 / step_totals[node.step] as f64;
                    format!("{:.0}%", share * 100.0)
                }
                LabelType::Count => node.occurrence.to_string(),
                LabelType::Hidden => String::new(),
            });
            node_colors.push(node.color.clone());
            node_hover.push(node.step_label.clone());
        }

        let mut sources = Vec::with_capacity(graph.edge_count());
        let mut targets = Vec::with_capacity(graph.edge_count());
        let mut values = Vec::with_capacity(graph.edge_count());
        let mut link_colors = Vec::with_capacity(graph.edge_count());
        let mut link_labels = Vec::with_capacity(graph.edge_count());
        for (source, target, edge) in graph.edges() {
            sources.push(source);
            targets.push(target);
            values.push(edge.count);
            link_colors.push(edge.color.clone());
            link_labels.push(edge.label.clone());
        }

        Self {
            labels,
            node_colors,
            node_hover,
            sources,
            targets,
            values,
            link_colors,
            link_labels,
        }
    }
}

/// Build the full figure document for the charting library.
///
/// Theme node/link styling is merged over the generated arguments; the title
/// and style snippets are pass-through configuration.
pub fn to_figure(params: &SankeyParameters, theme: &Theme, title: Option<&str>) -> Value {
    let labels: Vec<String> = match &theme.label_style {
        Some(style) => params
            .labels
            .iter()
            .map(|label| format!("<span style='{}'>{}</span>", style, label))
            .collect(),
        None => params.labels.clone(),
    };

    let mut node = Map::new();
    node.insert("customdata".to_string(), json!(params.node_hover));
    node.insert(
        "hovertemplate".to_string(),
        json!("<b>%{customdata}</b><extra></extra>"),
    );
    node.insert("label".to_string(), json!(labels));
    node.insert("color".to_string(), json!(params.node_colors));
    node.extend(theme.node_style.clone());

    let mut link = Map::new();
    link.insert("source".to_string(), json!(params.sources));
    link.insert("target".to_string(), json!(params.targets));
    link.insert("value".to_string(), json!(params.values));
    link.insert("color".to_string(), json!(params.link_colors));
    link.insert("customdata".to_string(), json!(params.link_labels));
    link.insert(
        "hovertemplate".to_string(),
        json!("%{customdata} <extra></extra>"),
    );
    link.extend(theme.link_style.clone());

    let mut layout = Map::new();
    layout.insert("font_size".to_string(), json!(16));
    layout.insert("title_x".to_string(), json!(0.5));
    layout.insert("paper_bgcolor".to_string(), json!("rgba(0, 0, 0, 0)"));
    if let Some(title) = title {
        let styled = match &theme.title_style {
            Some(style) => format!("<span style='{}'>{}</span>", style, title),
            None => title.to_string(),
        };
        layout.insert("title_text".to_string(), json!(styled));
    }

    json!({
        "data": [{
            "type": "sankey",
            "arrangement": "snap",
            "node": node,
            "link": link,
        }],
        "layout": layout,
    })
}
