//! WASM bindings for the tatree-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.
//! The wizard feeds the tree in as JSON, drives `tick` from its animation
//! frame, and reads the scene and sequence back as JSON.

use serde::Deserialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::engine::Engine;
use crate::graph::Objective;
use crate::layout::LayoutConfig;
use crate::text::{HeuristicMeasure, TextMeasure};

#[wasm_bindgen]
extern "C" {
    pub fn alert(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = log)]
    pub fn console_log(s: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

/// The tree as the wizard holds it: target text plus intermediate
/// objectives with raw prerequisite id lists.
#[derive(Debug, Clone, Deserialize)]
struct TreeInput {
    #[serde(default)]
    target: String,
    #[serde(default)]
    ios: Vec<Objective>,
}

/// Text measurer backed by a detached canvas 2d context, so wrapping uses
/// the same glyph metrics the renderer does.
struct CanvasMeasure {
    ctx: CanvasRenderingContext2d,
}

impl CanvasMeasure {
    fn try_new(font: &str) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let canvas = document
            .create_element("canvas")
            .ok()?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        ctx.set_font(font);
        Some(Self { ctx })
    }
}

impl TextMeasure for CanvasMeasure {
    fn width(&self, text: &str) -> f32 {
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width() as f32,
            Err(_) => HeuristicMeasure::default().width(text),
        }
    }
}

#[wasm_bindgen]
pub struct TreeEngine {
    inner: Engine,
}

#[wasm_bindgen]
impl TreeEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TreeEngine {
        let measure: Box<dyn TextMeasure> = match CanvasMeasure::try_new("700 12px sans-serif") {
            Some(m) => Box::new(m),
            None => Box::new(HeuristicMeasure::default()),
        };
        TreeEngine {
            inner: Engine::with_measure(LayoutConfig::default(), measure),
        }
    }

    /// Replace the tree from wizard JSON: `{target, ios: [{id, text,
    /// prerequisites}]}`. Malformed input is logged and the previous tree
    /// stays in place.
    pub fn set_tree(&mut self, json: &str) {
        match serde_json::from_str::<TreeInput>(json) {
            Ok(input) => self.inner.set_tree(&input.target, input.ios),
            Err(e) => console_error(&format!("Error parsing tree input: {e:?}")),
        }
    }

    /// Advance one animation frame. Returns whether another frame should be
    /// requested.
    pub fn tick(&mut self) -> bool {
        self.inner.tick()
    }

    /// The positioned scene as a JSON string.
    pub fn scene(&self) -> String {
        serde_json::to_string(&self.inner.scene()).unwrap_or_else(|e| {
            console_error(&format!("Error serializing scene: {e:?}"));
            "{}".to_string()
        })
    }

    /// The execution order as a JSON array of `{id, text}`.
    pub fn sequence(&self) -> String {
        serde_json::to_string(&self.inner.sequence()).unwrap_or_else(|e| {
            console_error(&format!("Error serializing sequence: {e:?}"));
            "[]".to_string()
        })
    }

    pub fn drag_start(&mut self, id: &str) {
        self.inner.drag_start(id);
    }

    pub fn drag_move(&mut self, x: f32, y: f32) {
        self.inner.drag_move(x, y);
    }

    pub fn drag_end(&mut self) {
        self.inner.drag_end();
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.inner.pan_by(dx, dy);
    }

    pub fn zoom_by(&mut self, factor: f32, anchor_x: f32, anchor_y: f32) {
        self.inner.zoom_by(factor, anchor_x, anchor_y);
    }

    pub fn reset_view(&mut self) {
        self.inner.reset_view();
    }

    /// Hover highlight from the sequencing step; pass null to clear.
    pub fn set_active(&mut self, id: Option<String>) {
        self.inner.set_active(id);
    }
}

impl Default for TreeEngine {
    fn default() -> Self {
        Self::new()
    }
}
