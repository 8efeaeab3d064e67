use serde::{Deserialize, Serialize};

pub type VertexId = u32;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    pub name: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub fixed: bool,
}

impl Vertex {
    pub fn new(id: VertexId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            x: 0.0,
            y: 0.0,
            fixed: false,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    #[serde(default)]
    pub directed: bool,
}

impl Edge {
    pub fn undirected(from: VertexId, to: VertexId) -> Self {
        Self {
            from,
            to,
            directed: false,
        }
    }

    pub fn other(&self, id: VertexId) -> Option<VertexId> {
        if self.from == id {
            Some(self.to)
        } else if self.to == id {
            Some(self.from)
        } else {
            None
        }
    }
}
