// Level assigner: longest-path layering measured from the TARGET.
//
// Bellman-Ford-style relaxation over a graph that may contain cycles, so the
// pass cap is what guarantees termination, not convergence. Under a cycle
// the levels are approximate but always bounded; acyclic regions settle to
// the true longest path well before the cap.

use crate::graph::{GraphModel, NodeKind};

/// Relaxation passes before giving up on a fixed point. Matches the layer
/// depth any real tree stays far below.
const LEVEL_PASS_CAP: usize = 100;

/// Per-node layer index, aligned with `graph.nodes`. TARGET sits at level 0;
/// causally earlier objectives get higher levels. Nodes unreachable from the
/// TARGET default to 0.
pub fn assign_levels(graph: &GraphModel) -> Vec<i32> {
    if graph.is_empty() {
        return Vec::new();
    }

    let mut levels: Vec<Option<i32>> = vec![None; graph.nodes.len()];
    for (i, node) in graph.nodes.iter().enumerate() {
        if node.kind == NodeKind::Target {
            levels[i] = Some(0);
        }
    }

    for _pass in 0..LEVEL_PASS_CAP {
        let mut changed = false;
        for e in &graph.edges {
            let Some(to_level) = levels[e.to] else { continue };
            let candidate = to_level + 1;
            if levels[e.from].is_none_or(|l| l < candidate) {
                levels[e.from] = Some(candidate);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    levels.into_iter().map(|l| l.unwrap_or(0)).collect()
}
