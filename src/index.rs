use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{LayoutError, Result};
use crate::model::{Edge, Vertex, VertexId};

#[derive(Clone, Debug, Default)]
pub struct GraphIndex {
    vertex_slots: HashMap<VertexId, usize>,
    adjacency: HashMap<VertexId, IndexMap<VertexId, usize>>,
}

impl GraphIndex {
    pub fn build(vertices: &[Vertex], edges: &[Edge]) -> Result<Self> {
        let mut vertex_slots = HashMap::with_capacity(vertices.len());
        for (slot, vertex) in vertices.iter().enumerate() {
            if vertex_slots.insert(vertex.id, slot).is_some() {
                return Err(LayoutError::DuplicateVertex { id: vertex.id });
            }
        }

        let mut adjacency: HashMap<VertexId, IndexMap<VertexId, usize>> = HashMap::new();
        for (slot, edge) in edges.iter().enumerate() {
            for id in [edge.from, edge.to] {
                if !vertex_slots.contains_key(&id) {
                    return Err(LayoutError::UnknownVertex { id, edge: slot });
                }
            }

            // a repeated pair keeps its position, the last edge slot wins
            adjacency.entry(edge.from).or_default().insert(edge.to, slot);
            adjacency.entry(edge.to).or_default().insert(edge.from, slot);
        }

        Ok(Self {
            vertex_slots,
            adjacency,
        })
    }

    pub fn slot_of(&self, id: VertexId) -> Option<usize> {
        self.vertex_slots.get(&id).copied()
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.vertex_slots.contains_key(&id)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_slots.len()
    }

    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = (VertexId, usize)> + '_ {
        self.adjacency
            .get(&id)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().map(|(&other, &edge)| (other, edge)))
    }

    pub fn degree(&self, id: VertexId) -> usize {
        self.adjacency.get(&id).map_or(0, IndexMap::len)
    }

    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<usize> {
        self.adjacency
            .get(&a)
            .and_then(|neighbors| neighbors.get(&b))
            .or_else(|| self.adjacency.get(&b).and_then(|neighbors| neighbors.get(&a)))
            .copied()
    }

    pub fn is_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        self.edge_between(a, b).is_some()
    }
}
