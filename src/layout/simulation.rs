// The alpha-driven integrator behind the layout.
//
// An owned simulator object with an explicit state machine:
// - Idle: parked; stepping is a no-op until a restart or a pin wakes it
// - Running: relaxing toward rest while alpha decays toward zero
// - Dragging: one node pinned; alpha is held warm so neighbors keep
//   responding to the pointer
//
// Restarts happen on structural graph change only. Surviving nodes keep
// their positions so small edits stay visually stable; inserted nodes are
// seeded near the current centroid and relaxed in.

use std::collections::HashMap;

use crate::graph::GraphModel;

use super::forces;
use super::{LayoutConfig, PointF, SimLink, SimNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Idle,
    Running,
    Dragging,
}

#[derive(Debug)]
pub struct Simulator {
    cfg: LayoutConfig,
    nodes: Vec<SimNode>,
    links: Vec<SimLink>,
    alpha: f32,
    alpha_target: f32,
    state: SimState,
}

impl Simulator {
    pub fn new(cfg: LayoutConfig) -> Self {
        Self {
            cfg,
            nodes: Vec::new(),
            links: Vec::new(),
            alpha: 0.0,
            alpha_target: 0.0,
            state: SimState::Idle,
        }
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[SimLink] {
        &self.links
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Rebuild simulation state from a changed graph. Nodes that survive the
    /// edit keep their position (and any active pin); new nodes are seeded
    /// near the centroid of the survivors.
    pub fn restart(&mut self, graph: &GraphModel, levels: &[i32]) {
        let prev: HashMap<String, (PointF, Option<PointF>)> = self
            .nodes
            .drain(..)
            .map(|n| (n.id.clone(), (PointF { x: n.x, y: n.y }, n.fixed)))
            .collect();

        let surviving: Vec<PointF> = graph
            .nodes
            .iter()
            .filter_map(|n| prev.get(&n.id).map(|(p, _)| *p))
            .collect();
        let origin = if surviving.is_empty() {
            PointF {
                x: self.cfg.width / 2.0,
                y: self.cfg.height / 2.0,
            }
        } else {
            let n = surviving.len() as f32;
            PointF {
                x: surviving.iter().map(|p| p.x).sum::<f32>() / n,
                y: surviving.iter().map(|p| p.y).sum::<f32>() / n,
            }
        };

        let mut fresh = 0usize;
        self.nodes = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let (pos, fixed) = match prev.get(&n.id) {
                    Some(&(p, fixed)) => (p, fixed),
                    None => {
                        let p = forces::seed_position(fresh, origin);
                        fresh += 1;
                        (p, None)
                    }
                };
                SimNode {
                    id: n.id.clone(),
                    x: pos.x,
                    y: pos.y,
                    vx: 0.0,
                    vy: 0.0,
                    fixed,
                    level: levels.get(i).copied().unwrap_or(0),
                }
            })
            .collect();

        self.links = graph
            .edges
            .iter()
            .map(|e| {
                let ds = graph.degree[e.from].max(1) as f32;
                let dt = graph.degree[e.to].max(1) as f32;
                SimLink {
                    source: e.from,
                    target: e.to,
                    strength: 1.0 / ds.min(dt),
                    bias: ds / (ds + dt),
                }
            })
            .collect();

        if self.nodes.is_empty() {
            self.alpha = 0.0;
            self.alpha_target = 0.0;
            self.state = SimState::Idle;
        } else if self.nodes.iter().any(SimNode::pinned) {
            self.alpha = 1.0;
            self.alpha_target = self.cfg.drag_alpha_target;
            self.state = SimState::Dragging;
        } else {
            self.alpha = 1.0;
            self.alpha_target = 0.0;
            self.state = SimState::Running;
        }
    }

    /// One synchronous relaxation step. Returns whether the simulation is
    /// still active; once alpha decays below the minimum the simulator parks
    /// in Idle until restarted or pinned.
    pub fn step(&mut self) -> bool {
        if self.state == SimState::Idle {
            return false;
        }

        self.alpha += (self.alpha_target - self.alpha) * self.cfg.alpha_decay;
        if self.alpha < self.cfg.alpha_min && self.alpha_target < self.cfg.alpha_min {
            self.state = SimState::Idle;
            return false;
        }

        forces::apply_link_force(
            &mut self.nodes,
            &self.links,
            self.cfg.link_distance,
            self.alpha,
        );
        forces::apply_charge(&mut self.nodes, self.cfg.charge_strength, self.alpha);
        forces::apply_axis_springs(&mut self.nodes, &self.cfg, self.alpha);
        forces::apply_collision(&mut self.nodes, self.cfg.collide_radius);

        let damping = 1.0 - self.cfg.velocity_decay;
        for node in &mut self.nodes {
            if let Some(f) = node.fixed {
                node.x = f.x;
                node.y = f.y;
                node.vx = 0.0;
                node.vy = 0.0;
            } else {
                node.vx *= damping;
                node.vy *= damping;
                node.x += node.vx;
                node.y += node.vy;
            }
        }
        true
    }

    /// Pin a node to a position (drag). Boosts the energy floor so the rest
    /// of the graph keeps reacting while the pointer moves.
    pub fn pin(&mut self, id: &str, x: f32, y: f32) {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return;
        };
        node.x = x;
        node.y = y;
        node.vx = 0.0;
        node.vy = 0.0;
        node.fixed = Some(PointF { x, y });
        self.alpha_target = self.cfg.drag_alpha_target;
        self.state = SimState::Dragging;
    }

    /// Release a pinned node back to force-driven movement.
    pub fn unpin(&mut self, id: &str) {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return;
        };
        node.fixed = None;
        self.alpha_target = 0.0;
        if self.state == SimState::Dragging {
            self.state = SimState::Running;
        }
    }
}
