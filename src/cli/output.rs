//! Output formatting module
//!
//! This module handles formatting the assembled flow graph for different
//! output formats.

use serde_json::Value;

use crate::Result;
use crate::sankey::FlowGraph;

/// Write the figure document as pretty-printed JSON
pub fn output_json(w: &mut impl std::io::Write, figure: &Value) -> Result<()> {
    serde_json::to_writer_pretty(&mut *w, figure)?;
    writeln!(w)?; // Add trailing newline
    Ok(())
}

/// Write a plain text summary of the flow graph
pub fn output_table(w: &mut impl std::io::Write, graph: &FlowGraph) -> Result<()> {
    let stats = graph.stats();

    writeln!(w, "Land Cover Flow Visualization - Transition Summary")?;
    writeln!(w, "{}", "=".repeat(80))?;
    writeln!(w)?;

    writeln!(w, "Summary:")?;
    writeln!(w, "  Steps:        {}", stats.steps)?;
    writeln!(w, "  Nodes:        {}", stats.total_nodes)?;
    writeln!(w, "  Transitions:  {}", stats.total_edges)?;
    writeln!(w, "  Total weight: {}", stats.total_weight)?;
    writeln!(w)?;

    writeln!(w, "Classes per step:")?;
    for (step, label) in graph.step_labels.iter().enumerate() {
        let classes: Vec<String> = graph
            .nodes()
            .filter(|n| n.step == step)
            .map(|n| format!("{} ({})", n.class_label, n.occurrence))
            .collect();
        writeln!(w, "  {:<12} {}", label, classes.join(", "))?;
    }
    writeln!(w)?;

    writeln!(w, "Transitions:")?;
    writeln!(w, "{:-<80}", "")?;
    writeln!(
        w,
        "{:<12} {:<22} {:<22} {:>8} {:>8}",
        "Step", "From", "To", "Weight", "Share"
    )?;
    writeln!(w, "{:-<80}", "")?;

    let nodes: Vec<_> = graph.nodes().collect();
    for (source, target, edge) in graph.edges() {
        let from = nodes[source];
        let to = nodes[target];
        writeln!(
            w,
            "{:<12} {:<22} {:<22} {:>8} {:>7.0}%",
            from.step_label,
            from.class_label,
            to.class_label,
            edge.count,
            edge.proportion * 100.0
        )?;
    }
    writeln!(w)?;

    Ok(())
}

/// Write a standalone HTML page embedding the figure.
///
/// The page only carries the payload; all drawing happens in the external
/// charting library loaded by the page.
pub fn output_html(
    w: &mut impl std::io::Write,
    figure: &Value,
    title: Option<&str>,
) -> Result<()> {
    let title = title.unwrap_or("Land Cover Flow");
    let payload = serde_json::to_string(figure)?;

    writeln!(w, "<!DOCTYPE html>")?;
    writeln!(w, "<html>")?;
    writeln!(w, "<head>")?;
    writeln!(w, "  <meta charset=\"utf-8\">")?;
    writeln!(w, "  <title>{}</title>", title)?;
    writeln!(
        w,
        "  <script src=\"https://cdn.plot.ly/plotly-2.35.2.min.js\"></script>"
    )?;
    writeln!(w, "</head>")?;
    writeln!(w, "<body>")?;
    writeln!(w, "  <div id=\"sankey\"></div>")?;
    writeln!(w, "  <script>")?;
    writeln!(w, "    const figure = {};", payload)?;
    writeln!(
        w,
        "    Plotly.newPlot(\"sankey\", figure.data, figure.layout);"
    )?;
    writeln!(w, "  </script>")?;
    writeln!(w, "</body>")?;
    writeln!(w, "</html>")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryRegistry;
    use crate::data_source::{SampleRow, SampleTable};
    use crate::sankey::aggregate;
    use std::collections::HashMap;

    fn test_graph() -> FlowGraph {
        let table = SampleTable::new(
            vec![
                SampleRow::new(vec![Some(1), Some(1)]),
                SampleRow::new(vec![Some(1), Some(2)]),
            ],
            Some(vec!["1985".to_string(), "2010".to_string()]),
        )
        .unwrap();

        let labels = HashMap::from([(1, "Forest".to_string()), (2, "Developed".to_string())]);
        let palette = HashMap::from([(1, "#1b9d0c".to_string()), (2, "#ff2ff8".to_string())]);
        let registry = CategoryRegistry::build(&table.observed_codes(), &labels, &palette).unwrap();

        FlowGraph::assemble(&aggregate(&table), &registry, table.step_labels()).unwrap()
    }

    #[test]
    fn test_output_json() {
        let figure = serde_json::json!({ "data": [], "layout": {} });
        let mut output = Vec::new();
        output_json(&mut output, &figure).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.ends_with('\n'));
        assert!(text.contains("\"data\""));
    }

    #[test]
    fn test_output_table() {
        let graph = test_graph();
        let mut output = Vec::new();
        output_table(&mut output, &graph).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Transition Summary"));
        assert!(text.contains("1985"));
        assert!(text.contains("Forest"));
        assert!(text.contains("Developed"));
    }

    #[test]
    fn test_output_html() {
        let figure = serde_json::json!({ "data": [], "layout": {} });
        let mut output = Vec::new();
        output_html(&mut output, &figure, Some("Change 1985-2010")).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("<title>Change 1985-2010</title>"));
        assert!(text.contains("Plotly.newPlot"));
    }
}
