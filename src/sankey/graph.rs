//! Layered flow graph assembly

use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::{NodeIndex, StableGraph};
use serde::Serialize;

use crate::catalog::{CategoryRegistry, ClassCode};
use crate::sankey::aggregate::TransitionTable;
use crate::{Error, Result};

/// A class at one time step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowNode {
    pub step: usize,
    pub code: ClassCode,
    pub class_label: String,
    pub step_label: String,
    pub color: String,
    /// Valid-sample count at this step: outgoing flow, or incoming for nodes
    /// with no outgoing edges
    pub occurrence: u64,
    /// Total incident edge weight
    pub flow: u64,
}

impl FlowNode {
    /// Display label combining the step and class labels, so the same class
    /// at different steps stays distinguishable despite sharing a color
    pub fn display_label(&self) -> String {
        format!("{}: {}", self.step_label, self.class_label)
    }
}

/// Weighted flow between a class at step k and a class at step k + 1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    pub count: u64,
    /// Share of the source node's outgoing flow carried by this edge
    pub proportion: f64,
    /// Human-readable change description
    pub label: String,
    /// Source node color
    pub color: String,
}

/// A directed layered graph of class membership flows across time steps.
///
/// Nodes are grouped by step and numbered contiguously from zero in
/// step-major order; every edge connects a node at step k to a node at
/// step k + 1. Built once per diagram request and immutable afterwards.
#[derive(Debug)]
pub struct FlowGraph {
    /// The underlying graph structure.
    /// Nodes represent a class at a step, edges the flow between them.
    pub graph: StableGraph<FlowNode, FlowEdge>,

    /// Lookup table mapping (step, class code) to the internal graph index.
    pub node_index: HashMap<(usize, ClassCode), NodeIndex>,

    /// Display label for each time step, in step order.
    pub step_labels: Vec<String>,
}

impl FlowGraph {
    /// Assemble the layered graph from aggregated transition counts.
    ///
    /// Only (step, class) pairs participating in at least one nonzero
    /// transition produce a node; a class with no valid transition at a step
    /// has nothing to show in a flow diagram. Node numbering iterates steps
    /// in order and, within a step, classes in the order they were first
    /// observed in the transition data.
    ///
    /// Fails with [`Error::EmptyGraph`] when no edges would be produced.
    pub fn assemble(
        transitions: &TransitionTable,
        registry: &CategoryRegistry,
        step_labels: &[String],
    ) -> Result<Self> {
        if transitions.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let pair_count = transitions.step_pair_count();
        if step_labels.len() != pair_count + 1 {
            return Err(Error::schema(format!(
                "expected {} step labels, got {}",
                pair_count + 1,
                step_labels.len()
            )));
        }

        // First pass: per-step class lists in first-observed order. The
        // transition counts are pair-major, so one scan visits steps in order.
        let mut step_classes: Vec<Vec<ClassCode>> = vec![Vec::new(); pair_count + 1];
        let mut seen: HashSet<(usize, ClassCode)> = HashSet::new();
        for tc in transitions.counts() {
            if seen.insert((tc.step, tc.from)) {
                step_classes[tc.step].push(tc.from);
            }
            if seen.insert((tc.step + 1, tc.to)) {
                step_classes[tc.step + 1].push(tc.to);
            }
        }

        let mut out_totals: HashMap<(usize, ClassCode), u64> = HashMap::new();
        let mut in_totals: HashMap<(usize, ClassCode), u64> = HashMap::new();
        for tc in transitions.counts() {
            *out_totals.entry((tc.step, tc.from)).or_default() += tc.count;
            *in_totals.entry((tc.step + 1, tc.to)).or_default() += tc.count;
        }

        // Second pass: add nodes step-major. A fresh StableGraph assigns
        // indices in insertion order, which downstream code relies on.
        let mut graph: StableGraph<FlowNode, FlowEdge> = StableGraph::new();
        let mut node_index: HashMap<(usize, ClassCode), NodeIndex> = HashMap::new();
        for (step, classes) in step_classes.iter().enumerate() {
            for &code in classes {
                let category = registry
                    .get(code)
                    .ok_or_else(|| Error::missing_labels(vec![code]))?;

                let out = out_totals.get(&(step, code)).copied().unwrap_or(0);
                let inc = in_totals.get(&(step, code)).copied().unwrap_or(0);
                let occurrence = if out > 0 { out } else { inc };

                let idx = graph.add_node(FlowNode {
                    step,
                    code,
                    class_label: category.label.clone(),
                    step_label: step_labels[step].clone(),
                    color: category.color.clone(),
                    occurrence,
                    flow: out + inc,
                });
                node_index.insert((step, code), idx);
            }
        }

        // Third pass: one edge per nonzero count, in transition order.
        for tc in transitions.counts() {
            let source = node_index[&(tc.step, tc.from)];
            let target = node_index[&(tc.step + 1, tc.to)];

            let out_total = out_totals[&(tc.step, tc.from)];
            let proportion = tc.count as f64 / out_total as f64;

            let (from_label, color) = {
                let node = &graph[source];
                (node.class_label.clone(), node.color.clone())
            };
            let to_label = graph[target].class_label.clone();
            let verb = if tc.from == tc.to { "remained" } else { "became" };
            let label = format!(
                "{:.0}% of {} {} {}",
                proportion * 100.0,
                from_label,
                verb,
                to_label
            );

            graph.add_edge(
                source,
                target,
                FlowEdge {
                    count: tc.count,
                    proportion,
                    label,
                    color,
                },
            );
        }

        Ok(Self {
            graph,
            node_index,
            step_labels: step_labels.to_vec(),
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn step_count(&self) -> usize {
        self.step_labels.len()
    }

    /// Get the node for a class at a step
    pub fn node(&self, step: usize, code: ClassCode) -> Option<&FlowNode> {
        self.node_index
            .get(&(step, code))
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// All nodes in index order
    pub fn nodes(&self) -> impl Iterator<Item = &FlowNode> {
        self.graph.node_indices().filter_map(|i| self.graph.node_weight(i))
    }

    /// All edges in insertion order as (source index, target index, edge)
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, &FlowEdge)> {
        self.graph.edge_indices().filter_map(|i| {
            let (source, target) = self.graph.edge_endpoints(i)?;
            let edge = self.graph.edge_weight(i)?;
            Some((source.index(), target.index(), edge))
        })
    }

    /// Get graph statistics
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            total_nodes: self.node_count(),
            total_edges: self.edge_count(),
            steps: self.step_count(),
            total_weight: self
                .edges()
                .map(|(_, _, e)| e.count)
                .sum(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub steps: usize,
    pub total_weight: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryRegistry;
    use crate::data_source::{SampleRow, SampleTable};
    use crate::sankey::aggregate::aggregate;
    use std::collections::HashMap;

    fn fixture() -> (TransitionTable, CategoryRegistry, Vec<String>) {
        let table = SampleTable::new(
            vec![
                SampleRow::new(vec![Some(1), Some(1)]),
                SampleRow::new(vec![Some(1), Some(2)]),
                SampleRow::new(vec![Some(2), Some(2)]),
                SampleRow::new(vec![Some(1), Some(1)]),
            ],
            None,
        )
        .unwrap();

        let labels = HashMap::from([(1, "A".to_string()), (2, "B".to_string())]);
        let palette = HashMap::from([(1, "#111".to_string()), (2, "#222".to_string())]);
        let registry = CategoryRegistry::build(&table.observed_codes(), &labels, &palette).unwrap();
        let step_labels = table.step_labels().to_vec();

        (aggregate(&table), registry, step_labels)
    }

    #[test]
    fn test_assemble_nodes_and_edges() {
        let (transitions, registry, step_labels) = fixture();
        let graph = FlowGraph::assemble(&transitions, &registry, &step_labels).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);

        // Step-major numbering, first-observed order within a step
        let nodes: Vec<(usize, ClassCode)> = graph.nodes().map(|n| (n.step, n.code)).collect();
        assert_eq!(nodes, vec![(0, 1), (0, 2), (1, 1), (1, 2)]);

        let edges: Vec<(usize, usize, u64)> =
            graph.edges().map(|(s, t, e)| (s, t, e.count)).collect();
        assert_eq!(edges, vec![(0, 2, 2), (0, 3, 1), (1, 3, 1)]);
    }

    #[test]
    fn test_every_edge_spans_exactly_one_step() {
        let (transitions, registry, step_labels) = fixture();
        let graph = FlowGraph::assemble(&transitions, &registry, &step_labels).unwrap();

        for (source, target, _) in graph.edges() {
            let source_step = graph.nodes().nth(source).unwrap().step;
            let target_step = graph.nodes().nth(target).unwrap().step;
            assert_eq!(source_step + 1, target_step);
        }
    }

    #[test]
    fn test_no_node_has_zero_incident_flow() {
        let (transitions, registry, step_labels) = fixture();
        let graph = FlowGraph::assemble(&transitions, &registry, &step_labels).unwrap();

        for node in graph.nodes() {
            assert!(node.flow > 0);
        }
    }

    #[test]
    fn test_node_labels_and_colors() {
        let (transitions, registry, step_labels) = fixture();
        let graph = FlowGraph::assemble(&transitions, &registry, &step_labels).unwrap();

        let node = graph.node(0, 1).unwrap();
        assert_eq!(node.display_label(), "0: A");
        assert_eq!(node.color, "#111");

        let node = graph.node(1, 2).unwrap();
        assert_eq!(node.display_label(), "1: B");
    }

    #[test]
    fn test_edge_labels_and_proportions() {
        let (transitions, registry, step_labels) = fixture();
        let graph = FlowGraph::assemble(&transitions, &registry, &step_labels).unwrap();

        let labels: Vec<&str> = graph.edges().map(|(_, _, e)| e.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "67% of A remained A",
                "33% of A became B",
                "100% of B remained B",
            ]
        );

        let edge = graph.edges().next().unwrap().2;
        assert!((edge.proportion - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(edge.color, "#111");
    }

    #[test]
    fn test_empty_transitions_fail() {
        let (_, registry, step_labels) = fixture();
        let empty = aggregate(
            &SampleTable::new(
                vec![SampleRow::new(vec![Some(1), None])],
                None,
            )
            .unwrap(),
        );
        let err = FlowGraph::assemble(&empty, &registry, &step_labels).unwrap_err();
        assert!(matches!(err, Error::EmptyGraph));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let (transitions, registry, step_labels) = fixture();
        let a = FlowGraph::assemble(&transitions, &registry, &step_labels).unwrap();
        let b = FlowGraph::assemble(&transitions, &registry, &step_labels).unwrap();

        let nodes_a: Vec<_> = a.nodes().cloned().collect();
        let nodes_b: Vec<_> = b.nodes().cloned().collect();
        assert_eq!(nodes_a, nodes_b);

        let edges_a: Vec<_> = a.edges().map(|(s, t, e)| (s, t, e.clone())).collect();
        let edges_b: Vec<_> = b.edges().map(|(s, t, e)| (s, t, e.clone())).collect();
        assert_eq!(edges_a, edges_b);
    }

    #[test]
    fn test_stats() {
        let (transitions, registry, step_labels) = fixture();
        let graph = FlowGraph::assemble(&transitions, &registry, &step_labels).unwrap();

        let stats = graph.stats();
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.total_edges, 3);
        assert_eq!(stats.steps, 2);
        assert_eq!(stats.total_weight, 4);
    }
}
