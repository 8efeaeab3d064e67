use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::Deserialize;

use crate::config::EngineConfig;
use crate::error::{LayoutError, Result};
use crate::model::Vertex;
use crate::transform::{Viewport, Zoom, to_virtual};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let valid = |value: f64| value.is_finite() && value > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(LayoutError::InvalidDisplaySize { width, height })
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    #[default]
    Cover,
    Contain,
}

impl FitMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
        }
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FitMode {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "cover" => Ok(Self::Cover),
            "contain" => Ok(Self::Contain),
            other => Err(format!("unknown fit mode {other:?}, expected cover or contain")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitParams {
    pub margin: f64,
    pub mode: FitMode,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for FitParams {
    fn from(config: &EngineConfig) -> Self {
        Self {
            margin: config.fit_margin,
            mode: config.fit_mode,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
        }
    }
}

// float noise allowed on an axis before it counts as flat
const FLAT_SPREAD_ULPS: f64 = 64.0;

pub fn fit_viewport(
    vertices: &mut [Vertex],
    display: DisplaySize,
    params: FitParams,
) -> Result<Viewport> {
    if !params.margin.is_finite() || params.margin <= 0.0 {
        return Err(LayoutError::InvalidConfig {
            field: "fit_margin",
            value: params.margin,
        });
    }
    if vertices.is_empty() {
        return Err(LayoutError::EmptyGraph);
    }

    let inverse_len = 1.0 / vertices.len() as f64;
    let (mut mean_x, mut mean_y) = (0.0, 0.0);
    for vertex in vertices.iter() {
        mean_x += vertex.x;
        mean_y += vertex.y;
    }
    mean_x *= inverse_len;
    mean_y *= inverse_len;

    let (mut farthest_x, mut farthest_y) = (0.0_f64, 0.0_f64);
    for vertex in vertices.iter() {
        farthest_x = farthest_x.max((vertex.x - mean_x).abs());
        farthest_y = farthest_y.max((vertex.y - mean_y).abs());
    }

    let magnitude = farthest_x
        .max(farthest_y)
        .max(mean_x.abs())
        .max(mean_y.abs())
        .max(1.0);
    let flat = magnitude * f64::EPSILON * FLAT_SPREAD_ULPS;
    if farthest_x <= flat || farthest_y <= flat {
        return Err(LayoutError::DegenerateLayout {
            farthest_x,
            farthest_y,
        });
    }

    let zoom_x = display.width / (farthest_x * params.margin);
    let zoom_y = display.height / (farthest_y * params.margin);
    let fitted = match params.mode {
        FitMode::Cover => zoom_x.max(zoom_y),
        FitMode::Contain => zoom_x.min(zoom_y),
    };
    Zoom::new(fitted)?;
    let zoom = Zoom::clamped(fitted, params.min_zoom, params.max_zoom)?;
    if zoom.get() != fitted {
        debug!("fitted zoom {fitted:.3} clamped to {:.3}", zoom.get());
    }

    let (center_x, center_y) = display.center();
    let (shift_x, shift_y) = to_virtual(center_x, center_y, zoom, [0.0, 0.0]);
    for vertex in vertices.iter_mut() {
        vertex.x -= mean_x;
        vertex.y -= mean_y;
        vertex.x += shift_x;
        vertex.y += shift_y;
    }

    debug!(
        "fitted {} vertices into {}x{} at zoom {:.3} ({})",
        vertices.len(),
        display.width,
        display.height,
        zoom.get(),
        params.mode
    );
    Ok(Viewport::new(zoom, [0.0, 0.0]))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::index::GraphIndex;
    use crate::model::Edge;
    use crate::placement::{PlacementParams, place_initial};

    fn square() -> Vec<Vertex> {
        vec![
            Vertex::new(0, "a").at(0.0, 0.0),
            Vertex::new(1, "b").at(2.0, 0.0),
            Vertex::new(2, "c").at(0.0, 2.0),
            Vertex::new(3, "d").at(2.0, 2.0),
        ]
    }

    fn elongated() -> Vec<Vertex> {
        vec![
            Vertex::new(0, "a").at(0.0, 0.0),
            Vertex::new(1, "b").at(10.0, 0.0),
            Vertex::new(2, "c").at(0.0, 1.0),
            Vertex::new(3, "d").at(10.0, 1.0),
        ]
    }

    fn on_screen(viewport: &Viewport, vertex: &Vertex, display: DisplaySize) -> bool {
        let (px, py) = viewport.to_pixel(vertex.x, vertex.y);
        (0.0..=display.width).contains(&px) && (0.0..=display.height).contains(&py)
    }

    #[test]
    fn cover_uses_the_larger_ratio() {
        let mut vertices = square();
        let display = DisplaySize::new(900.0, 600.0).unwrap();
        let viewport = fit_viewport(&mut vertices, display, FitParams::default()).unwrap();

        assert_relative_eq!(viewport.zoom.get(), 300.0);
        assert_eq!(viewport.pan, [0.0, 0.0]);
        assert_relative_eq!(vertices[0].x, 0.5);
        assert_relative_eq!(vertices[0].y, 0.0);
    }

    #[test]
    fn contain_uses_the_smaller_ratio() {
        let mut vertices = square();
        let display = DisplaySize::new(900.0, 600.0).unwrap();
        let params = FitParams {
            mode: FitMode::Contain,
            ..FitParams::default()
        };
        let viewport = fit_viewport(&mut vertices, display, params).unwrap();

        assert_relative_eq!(viewport.zoom.get(), 200.0);
    }

    #[test]
    fn centroid_lands_on_display_center() {
        let mut vertices = square();
        let display = DisplaySize::new(1280.0, 720.0).unwrap();
        let viewport = fit_viewport(&mut vertices, display, FitParams::default()).unwrap();

        let n = vertices.len() as f64;
        let mean_x = vertices.iter().map(|v| v.x).sum::<f64>() / n;
        let mean_y = vertices.iter().map(|v| v.y).sum::<f64>() / n;
        let (px, py) = viewport.to_pixel(mean_x, mean_y);
        assert_relative_eq!(px, 640.0, max_relative = 1e-12);
        assert_relative_eq!(py, 360.0, max_relative = 1e-12);
    }

    #[test]
    fn balanced_graph_stays_on_screen_in_both_modes() {
        let display = DisplaySize::new(800.0, 800.0).unwrap();
        for mode in [FitMode::Cover, FitMode::Contain] {
            let mut vertices = square();
            let params = FitParams {
                mode,
                ..FitParams::default()
            };
            let viewport = fit_viewport(&mut vertices, display, params).unwrap();
            assert!(vertices.iter().all(|v| on_screen(&viewport, v, display)));
        }
    }

    #[test]
    fn contain_keeps_elongated_graph_on_screen() {
        let display = DisplaySize::new(800.0, 800.0).unwrap();

        let mut covered = elongated();
        let viewport = fit_viewport(&mut covered, display, FitParams::default()).unwrap();
        assert!(!covered.iter().all(|v| on_screen(&viewport, v, display)));

        let mut contained = elongated();
        let params = FitParams {
            mode: FitMode::Contain,
            ..FitParams::default()
        };
        let viewport = fit_viewport(&mut contained, display, params).unwrap();
        assert!(contained.iter().all(|v| on_screen(&viewport, v, display)));
    }

    #[test]
    fn single_vertex_is_degenerate_and_untouched() {
        let mut vertices = vec![Vertex::new(0, "solo").at(3.0, 4.0)];
        let display = DisplaySize::new(640.0, 480.0).unwrap();
        let error = fit_viewport(&mut vertices, display, FitParams::default()).unwrap_err();

        assert_eq!(
            error,
            LayoutError::DegenerateLayout {
                farthest_x: 0.0,
                farthest_y: 0.0
            }
        );
        assert_eq!(vertices[0].position(), (3.0, 4.0));
    }

    #[test]
    fn axis_aligned_line_is_degenerate() {
        let mut vertices = vec![
            Vertex::new(0, "a").at(0.0, 1.0),
            Vertex::new(1, "b").at(4.0, 1.0),
        ];
        let display = DisplaySize::new(640.0, 480.0).unwrap();
        let error = fit_viewport(&mut vertices, display, FitParams::default()).unwrap_err();

        assert!(matches!(error, LayoutError::DegenerateLayout { farthest_y, .. } if farthest_y == 0.0));
    }

    fn placed_path(len: u32) -> Vec<Vertex> {
        let mut vertices = (0..len)
            .map(|id| Vertex::new(id, format!("p{id}")))
            .collect::<Vec<_>>();
        let edges = (1..len)
            .map(|id| Edge::undirected(id - 1, id))
            .collect::<Vec<_>>();
        let index = GraphIndex::build(&vertices, &edges).unwrap();
        place_initial(&mut vertices, &index, PlacementParams::default());
        vertices
    }

    #[test]
    fn placed_paths_are_degenerate_despite_float_noise() {
        let display = DisplaySize::new(800.0, 600.0).unwrap();
        for len in [2, 3, 5] {
            let mut vertices = placed_path(len);
            let before = vertices.clone();
            let error = fit_viewport(&mut vertices, display, FitParams::default()).unwrap_err();

            assert!(matches!(error, LayoutError::DegenerateLayout { .. }), "{len}: {error}");
            assert_eq!(vertices, before);
        }
    }

    #[test]
    fn fitted_zoom_is_clamped_to_range() {
        let display = DisplaySize::new(800.0, 800.0).unwrap();
        let mut vertices = vec![
            Vertex::new(0, "a").at(0.0, 0.0),
            Vertex::new(1, "b").at(1.0, 0.0),
            Vertex::new(2, "c").at(0.0, 1e-6),
        ];
        let params = FitParams {
            max_zoom: 5_000.0,
            ..FitParams::default()
        };
        let viewport = fit_viewport(&mut vertices, display, params).unwrap();

        assert_eq!(viewport.zoom.get(), 5_000.0);
    }

    #[test]
    fn non_positive_margin_is_a_config_error() {
        let mut vertices = square();
        let display = DisplaySize::new(640.0, 480.0).unwrap();
        let params = FitParams {
            margin: 0.0,
            ..FitParams::default()
        };

        assert_eq!(
            fit_viewport(&mut vertices, display, params),
            Err(LayoutError::InvalidConfig {
                field: "fit_margin",
                value: 0.0
            })
        );
    }

    #[test]
    fn empty_set_is_rejected() {
        let display = DisplaySize::new(640.0, 480.0).unwrap();
        assert_eq!(
            fit_viewport(&mut [], display, FitParams::default()),
            Err(LayoutError::EmptyGraph)
        );
    }

    #[test]
    fn display_size_must_be_positive() {
        assert!(DisplaySize::new(0.0, 480.0).is_err());
        assert!(DisplaySize::new(640.0, f64::NAN).is_err());
        assert!(DisplaySize::new(640.0, 480.0).is_ok());
    }

    #[test]
    fn fit_mode_parses_case_insensitively() {
        assert_eq!("Contain".parse::<FitMode>(), Ok(FitMode::Contain));
        assert_eq!("cover".parse::<FitMode>(), Ok(FitMode::Cover));
        assert!("stretch".parse::<FitMode>().is_err());
    }
}
