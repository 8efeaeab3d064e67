pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod model;
pub mod placement;
pub mod simulation;
pub mod source;
pub mod transform;
pub mod viewport;

pub use config::EngineConfig;
pub use engine::LayoutEngine;
pub use error::{LayoutError, Result};
pub use index::GraphIndex;
pub use model::{Edge, Vertex, VertexId};
pub use source::GraphDefinition;
pub use transform::{Viewport, Zoom};
pub use viewport::{DisplaySize, FitMode};
