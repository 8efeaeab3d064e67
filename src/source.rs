use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::config::EngineConfig;
use crate::engine::LayoutEngine;
use crate::model::{Edge, Vertex};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphDefinition {
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphDefinition {
    pub fn sample() -> Self {
        let vertices = (0..7)
            .map(|id| Vertex::new(id, format!("Node {id}")))
            .collect();
        let edges = [(0, 1), (0, 2), (0, 3), (1, 4), (1, 5), (2, 6), (3, 6)]
            .into_iter()
            .map(|(from, to)| Edge::undirected(from, to))
            .collect();

        Self { vertices, edges }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let definition: Self =
            serde_json::from_str(raw).context("invalid graph definition JSON")?;
        if definition.vertices.is_empty() {
            return Err(anyhow!("graph definition has no vertices"));
        }
        Ok(definition)
    }

    pub fn into_engine(self, config: EngineConfig) -> Result<LayoutEngine> {
        LayoutEngine::new(self.vertices, self.edges, config)
            .context("graph definition is inconsistent")
    }
}

pub fn load_definition(path: Option<&Path>) -> Result<GraphDefinition> {
    let Some(path) = path else {
        return Ok(GraphDefinition::sample());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph file {}", path.display()))?;
    GraphDefinition::from_json(&raw)
        .with_context(|| format!("failed to parse graph file {}", path.display()))
}

pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_graph_is_consistent() {
        let definition = GraphDefinition::sample();
        assert_eq!(definition.vertices.len(), 7);
        assert_eq!(definition.edges.len(), 7);

        let engine = definition.into_engine(EngineConfig::default()).unwrap();
        assert!(engine.index().is_adjacent(6, 3));
    }

    #[test]
    fn optional_fields_default() {
        let definition = GraphDefinition::from_json(
            r#"{
                "vertices": [{ "id": 0, "name": "a" }, { "id": 1, "name": "b", "x": 2.5 }],
                "edges": [{ "from": 0, "to": 1 }]
            }"#,
        )
        .unwrap();

        assert_eq!(definition.vertices[0].position(), (0.0, 0.0));
        assert!(!definition.vertices[0].fixed);
        assert_eq!(definition.vertices[1].x, 2.5);
        assert!(!definition.edges[0].directed);
    }

    #[test]
    fn rejects_empty_and_malformed_definitions() {
        assert!(GraphDefinition::from_json(r#"{ "vertices": [] }"#).is_err());
        assert!(GraphDefinition::from_json("not json").is_err());
    }

    #[test]
    fn phantom_endpoint_fails_engine_construction() {
        let definition = GraphDefinition::from_json(
            r#"{ "vertices": [{ "id": 0, "name": "a" }], "edges": [{ "from": 0, "to": 3 }] }"#,
        )
        .unwrap();
        let error = definition.into_engine(EngineConfig::default()).unwrap_err();

        assert!(format!("{error:#}").contains("unknown vertex 3"));
    }

    #[test]
    fn missing_paths_fall_back_to_defaults() {
        assert_eq!(load_definition(None).unwrap(), GraphDefinition::sample());
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
        assert!(load_definition(Some(Path::new("/nonexistent/graph.json"))).is_err());
    }
}
