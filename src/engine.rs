use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{LayoutError, Result};
use crate::index::GraphIndex;
use crate::model::{Edge, Vertex, VertexId};
use crate::placement::{PlacementParams, PlacementSummary, place_initial};
use crate::simulation::{TickSummary, tick};
use crate::transform::{Viewport, Zoom, pixel_to_virtual};
use crate::viewport::{DisplaySize, FitMode, FitParams, fit_viewport};

#[derive(Clone, Debug)]
pub struct LayoutEngine {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    index: GraphIndex,
    viewport: Viewport,
    display: Option<DisplaySize>,
    config: EngineConfig,
}

impl LayoutEngine {
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>, config: EngineConfig) -> Result<Self> {
        validate_tick_rate(config.tick_rate_hz)?;
        validate_layout_config(&config)?;
        let default_zoom = Zoom::new(config.default_zoom)?;
        let min_zoom = Zoom::new(config.min_zoom)?;
        if min_zoom > Zoom::new(config.max_zoom)? {
            return Err(LayoutError::InvalidZoom(config.min_zoom));
        }

        let index = GraphIndex::build(&vertices, &edges)?;
        info!(
            "graph loaded: {} vertices, {} edges",
            vertices.len(),
            edges.len()
        );

        Ok(Self {
            vertices,
            edges,
            index,
            viewport: Viewport::new(default_zoom, [0.0, 0.0]),
            display: None,
            config,
        })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn display(&self) -> Option<DisplaySize> {
        self.display
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.index.slot_of(id).map(|slot| &self.vertices[slot])
    }

    pub fn place_initial(&mut self) -> PlacementSummary {
        place_initial(
            &mut self.vertices,
            &self.index,
            PlacementParams::from(&self.config),
        )
    }

    pub fn set_edges(&mut self, edges: Vec<Edge>) -> Result<PlacementSummary> {
        self.index = GraphIndex::build(&self.vertices, &edges)?;
        self.edges = edges;
        Ok(self.place_initial())
    }

    pub fn fit_viewport(&mut self, display: DisplaySize) -> Result<Viewport> {
        let viewport = fit_viewport(&mut self.vertices, display, FitParams::from(&self.config))?;
        self.viewport = viewport;
        self.display = Some(display);
        Ok(viewport)
    }

    pub fn fit_or_default(&mut self, display: DisplaySize) -> Result<Viewport> {
        match self.fit_viewport(display) {
            Ok(viewport) => Ok(viewport),
            Err(error @ (LayoutError::EmptyGraph | LayoutError::DegenerateLayout { .. })) => {
                warn!("{error}; using default zoom {}", self.config.default_zoom);
                let zoom = Zoom::new(self.config.default_zoom)?;
                let (center_x, center_y) = display.center();
                let (mean_x, mean_y) = self.centroid().unwrap_or((0.0, 0.0));
                self.viewport = Viewport::new(
                    zoom,
                    [
                        center_x - zoom.get() * mean_x,
                        center_y - zoom.get() * mean_y,
                    ],
                );
                self.display = Some(display);
                Ok(self.viewport)
            }
            Err(error) => Err(error),
        }
    }

    pub fn resize(&mut self, display: DisplaySize) -> Result<Viewport> {
        if self.display == Some(display) {
            return Ok(self.viewport);
        }
        debug!("display resized to {}x{}", display.width, display.height);
        self.fit_or_default(display)
    }

    pub fn tick(&mut self) -> Result<TickSummary> {
        tick(&mut self.vertices, &self.index, self.config.tick_rate_hz)
    }

    pub fn set_tick_rate(&mut self, tick_rate_hz: f64) -> Result<()> {
        validate_tick_rate(tick_rate_hz)?;
        self.config.tick_rate_hz = tick_rate_hz;
        Ok(())
    }

    pub fn set_fit_mode(&mut self, mode: FitMode) {
        self.config.fit_mode = mode;
    }

    pub fn pin(&mut self, id: VertexId) -> Result<()> {
        self.vertex_mut(id)?.fixed = true;
        Ok(())
    }

    pub fn unpin(&mut self, id: VertexId) -> Result<()> {
        self.vertex_mut(id)?.fixed = false;
        Ok(())
    }

    pub fn nudge(&mut self, id: VertexId, dx_px: f64, dy_px: f64) -> Result<()> {
        let zoom = self.viewport.zoom;
        let vertex = self.vertex_mut(id)?;
        vertex.x += pixel_to_virtual(dx_px, zoom);
        vertex.y += pixel_to_virtual(dy_px, zoom);
        Ok(())
    }

    pub fn pan_by(&mut self, dx_px: f64, dy_px: f64) {
        self.viewport.pan[0] += dx_px;
        self.viewport.pan[1] += dy_px;
    }

    pub fn zoom_at(&mut self, pixel: (f64, f64), factor: f64) -> Result<Zoom> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(LayoutError::InvalidZoom(factor));
        }

        let (anchor_x, anchor_y) = self.viewport.to_virtual(pixel.0, pixel.1);
        let zoom = Zoom::clamped(
            self.viewport.zoom.get() * factor,
            self.config.min_zoom,
            self.config.max_zoom,
        )?;
        self.viewport = Viewport::new(
            zoom,
            [
                pixel.0 - zoom.get() * anchor_x,
                pixel.1 - zoom.get() * anchor_y,
            ],
        );
        Ok(zoom)
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        self.viewport.to_pixel(x, y)
    }

    pub fn to_virtual(&self, px: f64, py: f64) -> (f64, f64) {
        self.viewport.to_virtual(px, py)
    }

    pub fn vertex_at(&self, pixel: (f64, f64), radius_px: f64) -> Option<VertexId> {
        let radius_sq = radius_px * radius_px;
        self.vertices
            .iter()
            .filter_map(|vertex| {
                let (px, py) = self.to_pixel(vertex.x, vertex.y);
                let distance_sq = (px - pixel.0).powi(2) + (py - pixel.1).powi(2);
                (distance_sq <= radius_sq).then_some((vertex.id, distance_sq))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    fn centroid(&self) -> Option<(f64, f64)> {
        if self.vertices.is_empty() {
            return None;
        }
        let n = self.vertices.len() as f64;
        let (sum_x, sum_y) = self
            .vertices
            .iter()
            .fold((0.0, 0.0), |(x, y), vertex| (x + vertex.x, y + vertex.y));
        Some((sum_x / n, sum_y / n))
    }

    fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex> {
        let slot = self
            .index
            .slot_of(id)
            .ok_or(LayoutError::NoSuchVertex { id })?;
        Ok(&mut self.vertices[slot])
    }
}

fn validate_layout_config(config: &EngineConfig) -> Result<()> {
    let positive = [
        ("child_distance", config.child_distance),
        ("fit_margin", config.fit_margin),
    ];
    for (field, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(LayoutError::InvalidConfig { field, value });
        }
    }
    if let Some(&value) = config.seed.iter().find(|value| !value.is_finite()) {
        return Err(LayoutError::InvalidConfig {
            field: "seed",
            value,
        });
    }
    Ok(())
}

fn validate_tick_rate(tick_rate_hz: f64) -> Result<()> {
    if tick_rate_hz.is_finite() && tick_rate_hz > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidTickRate(tick_rate_hz))
    }
}
