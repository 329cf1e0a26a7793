// Topological sequencer: the linear order objectives are presented for
// execution planning.
//
// Depth-first post-order from each objective in insertion order, with two
// marks per node: "on current recursion path" and "finalized". A back-edge
// into the current path aborts that branch silently -- the violated
// prerequisite is dropped for this resolution and the node that introduced
// the cycle is still emitted exactly once. Dangling ids are never followed
// because traversal only resolves ids present in the objective map.

use std::collections::{HashMap, HashSet};

use crate::graph::Objective;

/// Order the objectives so every prerequisite not involved in a cycle comes
/// before its dependents. Every input objective appears exactly once; the
/// TARGET is not part of the sequence.
pub fn sequence(objectives: &[Objective]) -> Vec<&Objective> {
    let by_id: HashMap<&str, &Objective> = objectives
        .iter()
        .map(|io| (io.id.as_str(), io))
        .collect();

    let mut on_path: HashSet<&str> = HashSet::new();
    let mut finalized: HashSet<&str> = HashSet::new();
    let mut out: Vec<&Objective> = Vec::with_capacity(objectives.len());

    for io in objectives {
        visit(io.id.as_str(), &by_id, &mut on_path, &mut finalized, &mut out);
    }
    out
}

fn visit<'a>(
    id: &'a str,
    by_id: &HashMap<&'a str, &'a Objective>,
    on_path: &mut HashSet<&'a str>,
    finalized: &mut HashSet<&'a str>,
    out: &mut Vec<&'a Objective>,
) {
    if on_path.contains(id) {
        // Back-edge into an ancestor: treat the edge as absent.
        return;
    }
    if finalized.contains(id) {
        return;
    }

    on_path.insert(id);
    if let Some(&io) = by_id.get(id) {
        for pre in &io.prerequisites {
            visit(pre.as_str(), by_id, on_path, finalized, out);
        }
        out.push(io);
    }
    on_path.remove(id);
    finalized.insert(id);
}
