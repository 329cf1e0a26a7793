// Graph model: normalized node/edge view of the current objective set.
//
// - One synthesized TARGET node, always the unique sink
// - Prerequisite edges validated against the node set (dangling ids and
//   self-references are filtered here, not during traversal)
// - Objectives no other objective depends on get an implicit edge into TARGET
// - Degree table for link-force strength

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Reserved id of the synthesized TARGET node. Wizard-created objective ids
/// are UUIDs, so no collision is possible.
pub const TARGET_ID: &str = "target";

/// An intermediate objective as supplied by the wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    pub id: String,
    pub text: String,
    /// Ids of objectives that must complete before this one. May reference
    /// deleted ids or form cycles while the tree is mid-edit.
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Target,
    Io,
}

/// A graph vertex: the TARGET or one intermediate objective.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub text: String,
    pub kind: NodeKind,
}

/// Directed prerequisite relation between node indices: `from` must complete
/// before `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

/// Normalized view of the tree, rebuilt from scratch on every structural
/// edit. Pure function of the objective list; owns nothing mutable.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    /// TARGET first, then objectives in insertion order.
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Undirected edge count per node, used by the link force.
    pub degree: Vec<usize>,
    index: HashMap<String, usize>,
}

impl GraphModel {
    pub fn build(target_text: &str, objectives: &[Objective]) -> Self {
        if objectives.is_empty() {
            return Self::default();
        }

        let mut nodes = Vec::with_capacity(objectives.len() + 1);
        nodes.push(Node {
            id: TARGET_ID.to_string(),
            text: target_text.to_string(),
            kind: NodeKind::Target,
        });
        for io in objectives {
            nodes.push(Node {
                id: io.id.clone(),
                text: io.text.clone(),
                kind: NodeKind::Io,
            });
        }

        let index: HashMap<String, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();

        // The raw flattened prerequisite set decides which objectives anchor
        // directly to TARGET, before any validity filtering.
        let all_prereq_ids: HashSet<&str> = objectives
            .iter()
            .flat_map(|io| io.prerequisites.iter().map(String::as_str))
            .collect();

        let target = 0usize;
        let mut edges = Vec::new();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        for io in objectives {
            let to = index[&io.id];
            if !all_prereq_ids.contains(io.id.as_str()) {
                if seen.insert((to, target)) {
                    edges.push(Edge { from: to, to: target });
                }
            }
            for pre in &io.prerequisites {
                // Only follow ids present in the node set; a node is never
                // its own prerequisite.
                let Some(&from) = index.get(pre) else { continue };
                if from == to {
                    continue;
                }
                if seen.insert((from, to)) {
                    edges.push(Edge { from, to });
                }
            }
        }

        let mut degree = vec![0usize; nodes.len()];
        for e in &edges {
            degree[e.from] += 1;
            degree[e.to] += 1;
        }

        Self { nodes, edges, degree, index }
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io(id: &str, prereqs: &[&str]) -> Objective {
        Objective {
            id: id.to_string(),
            text: format!("objective {id}"),
            prerequisites: prereqs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_input_builds_empty_graph() {
        let g = GraphModel::build("goal", &[]);
        assert!(g.is_empty());
        assert!(g.edges.is_empty());
    }

    #[test]
    fn test_target_is_first_node() {
        let g = GraphModel::build("goal", &[io("a", &[])]);
        assert_eq!(g.nodes[0].id, TARGET_ID);
        assert_eq!(g.nodes[0].kind, NodeKind::Target);
        assert_eq!(g.nodes[0].text, "goal");
        assert_eq!(g.nodes[1].kind, NodeKind::Io);
    }

    #[test]
    fn test_non_prerequisites_anchor_to_target() {
        // b depends on a, so only b anchors to TARGET.
        let g = GraphModel::build("goal", &[io("a", &[]), io("b", &["a"])]);
        let a = g.node_index("a").unwrap();
        let b = g.node_index("b").unwrap();
        let t = g.node_index(TARGET_ID).unwrap();

        assert!(g.edges.contains(&Edge { from: b, to: t }));
        assert!(!g.edges.contains(&Edge { from: a, to: t }));
        assert!(g.edges.contains(&Edge { from: a, to: b }));
        assert_eq!(g.edges.len(), 2);
    }

    #[test]
    fn test_dangling_and_self_references_filtered() {
        let g = GraphModel::build("goal", &[io("a", &["ghost", "a"])]);
        let a = g.node_index("a").unwrap();
        let t = g.node_index(TARGET_ID).unwrap();
        // "ghost" and the self-reference vanish; the self-reference still
        // keeps a out of the TARGET anchor set (raw flattened ids decide).
        assert!(!g.edges.iter().any(|e| e.from == a && e.to == a));
        assert!(!g.edges.contains(&Edge { from: a, to: t }));
        assert!(g.edges.is_empty());
    }

    #[test]
    fn test_duplicate_prerequisites_deduplicated() {
        let g = GraphModel::build("goal", &[io("a", &[]), io("b", &["a", "a"])]);
        let a = g.node_index("a").unwrap();
        let b = g.node_index("b").unwrap();
        let n = g
            .edges
            .iter()
            .filter(|e| e.from == a && e.to == b)
            .count();
        assert_eq!(n, 1);
    }

    #[test]
    fn test_degree_counts_both_endpoints() {
        let g = GraphModel::build("goal", &[io("a", &[]), io("b", &["a"])]);
        let a = g.node_index("a").unwrap();
        let b = g.node_index("b").unwrap();
        let t = g.node_index(TARGET_ID).unwrap();
        // Edges: a -> b, b -> target.
        assert_eq!(g.degree[a], 1);
        assert_eq!(g.degree[b], 2);
        assert_eq!(g.degree[t], 1);
    }

    #[test]
    fn test_cycle_edges_are_kept() {
        // Cycles are a layout/ordering concern, not a modeling error.
        let g = GraphModel::build("goal", &[io("a", &["b"]), io("b", &["a"])]);
        let a = g.node_index("a").unwrap();
        let b = g.node_index("b").unwrap();
        assert!(g.edges.contains(&Edge { from: a, to: b }));
        assert!(g.edges.contains(&Edge { from: b, to: a }));
    }
}
