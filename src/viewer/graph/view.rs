use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};
use graph_relax::DisplaySize;
use log::{error, warn};

use super::super::ViewModel;
use super::super::render_utils::{
    circle_visible, draw_background, edge_visible, to_screen, trim_segment, vertex_color,
};

const VERTEX_RADIUS_PX: f32 = 11.0;

impl ViewModel {
    fn run_ticks(&mut self, frame_delta_seconds: f64) {
        self.tick_backlog += frame_delta_seconds * self.engine.config().tick_rate_hz;
        let due = self.tick_backlog.floor().max(0.0) as usize;
        let ticks = due.min(self.max_ticks_per_frame);
        self.tick_backlog = if due > ticks {
            0.0
        } else {
            self.tick_backlog - ticks as f64
        };

        self.ticks_last_frame = 0;
        for _ in 0..ticks {
            match self.engine.tick() {
                Ok(summary) => {
                    self.last_tick = summary;
                    self.ticks_last_frame += 1;
                }
                Err(tick_error) => {
                    error!("simulation stopped: {tick_error}");
                    self.live_physics = false;
                    break;
                }
            }
        }
    }

    pub(in crate::viewer) fn step_once(&mut self) {
        match self.engine.tick() {
            Ok(summary) => self.last_tick = summary,
            Err(tick_error) => error!("tick failed: {tick_error}"),
        }
    }

    pub(in crate::viewer) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        if let Ok(display) = DisplaySize::new(rect.width() as f64, rect.height() as f64) {
            let fitted = if self.needs_fit {
                self.needs_fit = false;
                self.engine.fit_or_default(display)
            } else {
                self.engine.resize(display)
            };
            if let Err(fit_error) = fitted {
                warn!("viewport fit failed: {fit_error}");
            }
        }

        draw_background(&painter, rect, self.engine.viewport());

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);
        self.handle_vertex_drag(rect, &response);
        self.update_hover(ui, rect);
        self.handle_graph_click(&response);

        if self.live_physics {
            let frame_delta_seconds = ui
                .ctx()
                .input(|input| input.stable_dt)
                .clamp(1.0 / 240.0, 1.0 / 20.0) as f64;
            self.run_ticks(frame_delta_seconds);
            ui.ctx().request_repaint();
        } else {
            self.ticks_last_frame = 0;
            if self.dragging.is_some() {
                ui.ctx().request_repaint();
            }
        }

        if self.hovered.is_some() || self.dragging.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = if self.dragging.is_some() {
                    egui::CursorIcon::Grabbing
                } else {
                    egui::CursorIcon::PointingHand
                };
            });
        }

        let index = self.engine.index();
        let vertices = self.engine.vertices();
        let screen_positions = vertices
            .iter()
            .map(|vertex| to_screen(rect, self.engine.to_pixel(vertex.x, vertex.y)))
            .collect::<Vec<_>>();

        let edge_stroke = Stroke::new(1.6, Color32::from_rgba_unmultiplied(150, 160, 175, 200));
        for edge in self.engine.edges() {
            let (Some(from), Some(to)) = (index.slot_of(edge.from), index.slot_of(edge.to)) else {
                continue;
            };
            let (start, end) = (screen_positions[from], screen_positions[to]);
            if !edge_visible(rect, start, end, VERTEX_RADIUS_PX) {
                continue;
            }
            let Some((start, end)) = trim_segment(start, end, VERTEX_RADIUS_PX) else {
                continue;
            };

            if edge.directed {
                painter.arrow(start, end - start, edge_stroke);
            } else {
                painter.line_segment([start, end], edge_stroke);
            }
        }

        for (vertex, &position) in vertices.iter().zip(&screen_positions) {
            if !circle_visible(rect, position, VERTEX_RADIUS_PX) {
                continue;
            }

            let is_hovered = self.hovered == Some(vertex.id);
            let is_selected = self.selected == Some(vertex.id);
            painter.circle_filled(
                position,
                VERTEX_RADIUS_PX,
                vertex_color(vertex.fixed, is_hovered, is_selected),
            );
            painter.circle_stroke(
                position,
                VERTEX_RADIUS_PX,
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190)),
            );

            if self.show_labels || is_hovered || is_selected {
                painter.text(
                    position + vec2(VERTEX_RADIUS_PX + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    &vertex.name,
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if let Some(vertex) = self.hovered.and_then(|id| self.engine.vertex(id)) {
            let panel_text = format!(
                "#{}  {}  |  ({:.3}, {:.3})  |  links {}{}",
                vertex.id,
                vertex.name,
                vertex.x,
                vertex.y,
                index.degree(vertex.id),
                if vertex.fixed { "  |  pinned" } else { "" }
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                panel_text,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        painter.text(
            rect.right_bottom() - vec2(10.0, 10.0),
            Align2::RIGHT_BOTTOM,
            format!("zoom {:.1}", self.engine.viewport().zoom.get()),
            FontId::proportional(12.0),
            Color32::from_gray(170),
        );
    }
}
