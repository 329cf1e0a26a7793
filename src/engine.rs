// Engine facade: owns the graph model, the simulator, the view transform and
// the highlight state, and assembles the outputs the frontend consumes.
//
// Structural edits replace the whole tree and bump a version counter; the
// simulator restarts when `tick` observes a stale version, never because a
// render happened. Hover and view changes touch no structural state.

use crate::graph::{GraphModel, Objective};
use crate::layout::{LayoutConfig, PointF, SimState, Simulator};
use crate::levels::assign_levels;
use crate::output::{EdgeOutput, NodeOutput, SceneOutput, SequenceEntry};
use crate::sequence::sequence;
use crate::text::{HeuristicMeasure, TextMeasure, block_offset, wrap_label};
use crate::view::View;

pub struct Engine {
    cfg: LayoutConfig,
    objectives: Vec<Objective>,
    graph: GraphModel,
    levels: Vec<i32>,
    sim: Simulator,
    view: View,
    active_id: Option<String>,
    dragging: Option<String>,
    measure: Box<dyn TextMeasure>,
    version: u64,
    applied_version: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_measure(LayoutConfig::default(), Box::new(HeuristicMeasure::default()))
    }

    pub fn with_measure(cfg: LayoutConfig, measure: Box<dyn TextMeasure>) -> Self {
        Self {
            sim: Simulator::new(cfg.clone()),
            cfg,
            objectives: Vec::new(),
            graph: GraphModel::default(),
            levels: Vec::new(),
            view: View::new(),
            active_id: None,
            dragging: None,
            measure,
            version: 0,
            applied_version: 0,
        }
    }

    /// Replace the tree. Atomic from the engine's perspective: the simulator
    /// sees the new graph as a whole at the next `tick`, never partially.
    pub fn set_tree(&mut self, target_text: &str, objectives: Vec<Objective>) {
        self.graph = GraphModel::build(target_text, &objectives);
        self.levels = assign_levels(&self.graph);
        self.objectives = objectives;
        self.version += 1;
    }

    /// Advance the engine by one frame: apply a pending structural change,
    /// run one simulation step, advance the view tween. Returns whether
    /// anything is still in motion.
    pub fn tick(&mut self) -> bool {
        if self.applied_version != self.version {
            self.sim.restart(&self.graph, &self.levels);
            self.applied_version = self.version;
        }
        let simulating = self.sim.step();
        self.view.tick();
        simulating || self.view.animating()
    }

    /// The positioned scene as of the last `tick`. Between an edit and the
    /// next `tick` the simulator may still hold the previous node set, so
    /// positions are matched by id; a node the simulator has not adopted yet
    /// renders at the canvas center until the restart places it.
    pub fn scene(&self) -> SceneOutput {
        let active = self.active_id.as_deref();
        let budget = self.cfg.node_width - self.cfg.label_inset;
        let sim_by_id: std::collections::HashMap<&str, &crate::layout::SimNode> = self
            .sim
            .nodes()
            .iter()
            .map(|n| (n.id.as_str(), n))
            .collect();

        let nodes = self
            .graph
            .nodes
            .iter()
            .map(|node| {
                let sim_node = sim_by_id.get(node.id.as_str()).copied();
                let (x, y) = sim_node
                    .map(|s| (s.x, s.y))
                    .unwrap_or((self.cfg.width / 2.0, self.cfg.height / 2.0));
                let lines = wrap_label(&node.text, budget, self.measure.as_ref());
                let label_offset_y =
                    block_offset(lines.len(), self.cfg.line_height_em, self.cfg.font_size);
                NodeOutput {
                    id: node.id.clone(),
                    kind: node.kind,
                    x,
                    y,
                    width: self.cfg.node_width,
                    height: self.cfg.node_height,
                    text: node.text.clone(),
                    lines,
                    label_offset_y,
                    pinned: sim_node.is_some_and(|s| s.pinned()),
                    highlighted: active == Some(node.id.as_str()),
                }
            })
            .collect();

        let edges = self
            .graph
            .edges
            .iter()
            .map(|e| {
                let from = self.graph.nodes[e.from].id.as_str();
                let to = self.graph.nodes[e.to].id.as_str();
                EdgeOutput {
                    from: from.to_string(),
                    to: to.to_string(),
                    highlighted: active == Some(from) || active == Some(to),
                }
            })
            .collect();

        SceneOutput {
            nodes,
            edges,
            transform: self.view.transform,
        }
    }

    /// The cycle-safe execution order, for the action-plan and export views.
    pub fn sequence(&self) -> Vec<SequenceEntry> {
        sequence(&self.objectives)
            .into_iter()
            .map(|io| SequenceEntry {
                id: io.id.clone(),
                text: io.text.clone(),
            })
            .collect()
    }

    /// Begin dragging a node: pins it at its current position. Only one drag
    /// at a time; a new pointer-down releases the previous one.
    pub fn drag_start(&mut self, id: &str) {
        if let Some(prev) = self.dragging.take() {
            if prev != id {
                self.sim.unpin(&prev);
            }
        }
        let Some(pos) = self
            .sim
            .nodes()
            .iter()
            .find(|n| n.id == id)
            .map(|n| (n.x, n.y))
        else {
            return;
        };
        self.sim.pin(id, pos.0, pos.1);
        self.dragging = Some(id.to_string());
    }

    /// Move the active drag to a screen-space pointer position.
    pub fn drag_move(&mut self, screen_x: f32, screen_y: f32) {
        let Some(id) = self.dragging.clone() else { return };
        let p = self.view.transform.to_scene(PointF {
            x: screen_x,
            y: screen_y,
        });
        self.sim.pin(&id, p.x, p.y);
    }

    /// End the drag: the node re-integrates from its released position.
    pub fn drag_end(&mut self) {
        if let Some(id) = self.dragging.take() {
            self.sim.unpin(&id);
        }
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.view.pan_by(dx, dy);
    }

    pub fn zoom_by(&mut self, factor: f32, anchor_x: f32, anchor_y: f32) {
        self.view.zoom_by(factor, PointF { x: anchor_x, y: anchor_y });
    }

    pub fn reset_view(&mut self) {
        self.view.reset();
    }

    /// Set or clear the hover highlight. Cosmetic only: no restart, no
    /// version bump.
    pub fn set_active(&mut self, id: Option<String>) {
        self.active_id = id;
    }

    pub fn sim_state(&self) -> SimState {
        self.sim.state()
    }
}
