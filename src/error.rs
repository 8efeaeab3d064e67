use thiserror::Error;

use crate::model::VertexId;

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("zoom must be finite and greater than zero, got {0}")]
    InvalidZoom(f64),
    #[error("tick rate must be finite and greater than zero, got {0} Hz")]
    InvalidTickRate(f64),
    #[error("config field `{field}` must be finite and greater than zero, got {value}")]
    InvalidConfig { field: &'static str, value: f64 },
    #[error("display size must be finite and positive, got {width}x{height}")]
    InvalidDisplaySize { width: f64, height: f64 },
    #[error("cannot fit a viewport around an empty vertex set")]
    EmptyGraph,
    #[error(
        "degenerate layout: farthest offset from centroid is ({farthest_x}, {farthest_y}), \
         zoom would be unbounded"
    )]
    DegenerateLayout { farthest_x: f64, farthest_y: f64 },
    #[error("edge #{edge} references unknown vertex {id}")]
    UnknownVertex { id: VertexId, edge: usize },
    #[error("vertex id {id} appears more than once")]
    DuplicateVertex { id: VertexId },
    #[error("no vertex with id {id}")]
    NoSuchVertex { id: VertexId },
}
