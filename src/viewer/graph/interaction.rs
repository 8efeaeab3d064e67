use eframe::egui::{self, PointerButton, Rect, Ui};
use log::{debug, warn};

use super::super::ViewModel;
use super::super::render_utils::to_local;

pub(super) const HIT_RADIUS_PX: f64 = 16.0;

impl ViewModel {
    pub(in crate::viewer) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let factor = (1.0 + (scroll as f64 * 0.0018)).clamp(0.85, 1.15);
        if let Err(error) = self.engine.zoom_at(to_local(rect, pointer), factor) {
            warn!("zoom rejected: {error}");
        }
    }

    pub(in crate::viewer) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(PointerButton::Secondary)
            || response.dragged_by(PointerButton::Middle)
        {
            let delta = response.drag_delta();
            self.engine.pan_by(delta.x as f64, delta.y as f64);
        }
    }

    pub(in crate::viewer) fn handle_vertex_drag(&mut self, rect: Rect, response: &egui::Response) {
        if response.drag_started_by(PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
            && let Some(id) = self.engine.vertex_at(to_local(rect, pointer), HIT_RADIUS_PX)
        {
            match self.engine.pin(id) {
                Ok(()) => {
                    debug!("drag start on vertex {id}");
                    self.dragging = Some(id);
                    self.selected = Some(id);
                }
                Err(error) => warn!("cannot pin vertex {id}: {error}"),
            }
        }

        let Some(id) = self.dragging else {
            return;
        };

        if response.dragged_by(PointerButton::Primary) {
            let delta = response.drag_delta();
            if let Err(error) = self.engine.nudge(id, delta.x as f64, delta.y as f64) {
                warn!("cannot move vertex {id}: {error}");
            }
        }

        if response.drag_stopped() || !response.dragged_by(PointerButton::Primary) {
            if let Err(error) = self.engine.unpin(id) {
                warn!("cannot unpin vertex {id}: {error}");
            }
            debug!("drag end on vertex {id}");
            self.dragging = None;
        }
    }

    pub(in crate::viewer) fn update_hover(&mut self, ui: &Ui, rect: Rect) {
        self.hovered = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pointer| rect.contains(*pointer))
            .and_then(|pointer| self.engine.vertex_at(to_local(rect, pointer), HIT_RADIUS_PX));
    }

    pub(in crate::viewer) fn handle_graph_click(&mut self, response: &egui::Response) {
        if response.clicked_by(PointerButton::Primary) {
            self.selected = self.hovered;
        }
    }
}
