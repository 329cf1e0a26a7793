pub mod engine;
pub mod graph;
pub mod layout;
pub mod levels;
pub mod output;
pub mod sequence;
pub mod text;
pub mod view;
pub mod wasm;

pub use engine::Engine;
pub use graph::{Objective, TARGET_ID};
pub use layout::{LayoutConfig, SimState, Simulator};
