use crate::error::{LayoutError, Result};

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Zoom(f64);

impl Zoom {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(LayoutError::InvalidZoom(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub(crate) fn clamped(value: f64, min: f64, max: f64) -> Result<Self> {
        if !(min <= max) {
            return Err(LayoutError::InvalidZoom(min));
        }
        Self::new(value.clamp(min, max))
    }
}

impl TryFrom<f64> for Zoom {
    type Error = LayoutError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub zoom: Zoom,
    pub pan: [f64; 2],
}

impl Viewport {
    pub fn new(zoom: Zoom, pan: [f64; 2]) -> Self {
        Self { zoom, pan }
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        to_pixel(x, y, self.zoom, self.pan)
    }

    pub fn to_virtual(&self, px: f64, py: f64) -> (f64, f64) {
        to_virtual(px, py, self.zoom, self.pan)
    }
}

pub fn to_pixel(x: f64, y: f64, zoom: Zoom, pan: [f64; 2]) -> (f64, f64) {
    (zoom.0 * x + pan[0], zoom.0 * y + pan[1])
}

pub fn to_virtual(px: f64, py: f64, zoom: Zoom, pan: [f64; 2]) -> (f64, f64) {
    ((px - pan[0]) / zoom.0, (py - pan[1]) / zoom.0)
}

pub fn scalar_to_pixel(d: f64, zoom: Zoom) -> f64 {
    zoom.0 * d
}

pub fn pixel_to_virtual(d: f64, zoom: Zoom) -> f64 {
    d / zoom.0
}
