use eframe::egui::{self, RichText, Ui};
use graph_relax::FitMode;
use log::warn;

use super::super::ViewModel;

const TICK_RATE_RANGE: std::ops::RangeInclusive<f64> = 30.0..=4000.0;

impl ViewModel {
    pub(in crate::viewer) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Layout Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.checkbox(&mut self.live_physics, "Live simulation")
            .on_hover_text("Run force ticks every frame.");
        if ui
            .add_enabled(!self.live_physics, egui::Button::new("Step one tick"))
            .clicked()
        {
            self.step_once();
        }

        let mut tick_rate = self.engine.config().tick_rate_hz;
        let tick_rate_response = ui
            .add(
                egui::Slider::new(&mut tick_rate, TICK_RATE_RANGE)
                    .logarithmic(true)
                    .text("tick rate (Hz)"),
            )
            .on_hover_text("Each tick advances the simulation by 1 / rate seconds.");
        if tick_rate_response.changed()
            && let Err(error) = self.engine.set_tick_rate(tick_rate)
        {
            warn!("rejected tick rate: {error}");
        }

        ui.add(
            egui::Slider::new(&mut self.max_ticks_per_frame, 1..=Self::MAX_TICKS_PER_FRAME * 4)
                .text("max ticks / frame"),
        );

        ui.separator();

        let mut fit_mode = self.engine.config().fit_mode;
        egui::ComboBox::from_label("fit mode")
            .selected_text(fit_mode.label())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut fit_mode, FitMode::Cover, FitMode::Cover.label());
                ui.selectable_value(&mut fit_mode, FitMode::Contain, FitMode::Contain.label());
            });
        if fit_mode != self.engine.config().fit_mode {
            self.engine.set_fit_mode(fit_mode);
            self.needs_fit = true;
        }

        ui.horizontal_wrapped(|ui| {
            if ui.button("Re-run placement").clicked() {
                self.engine.place_initial();
                self.needs_fit = true;
            }
            if ui.button("Fit to view").clicked() {
                self.needs_fit = true;
            }
        });

        ui.checkbox(&mut self.show_labels, "Vertex labels");
        ui.checkbox(&mut self.show_frame_timing, "Frame timing");

        ui.separator();
        self.draw_vertex_list(ui);
    }

    fn draw_vertex_list(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Vertices").strong());
        ui.label("Toggle a pin to hold a vertex in place.");

        let mut pin_toggle = None;
        let mut selection = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for vertex in self.engine.vertices() {
                    ui.horizontal(|ui| {
                        let mut pinned = vertex.fixed;
                        if ui.checkbox(&mut pinned, "").changed() {
                            pin_toggle = Some((vertex.id, pinned));
                        }

                        let is_selected = self.selected == Some(vertex.id);
                        let label = format!(
                            "#{} {}  ({} links)",
                            vertex.id,
                            vertex.name,
                            self.engine.index().degree(vertex.id)
                        );
                        if ui.selectable_label(is_selected, label).clicked() {
                            selection = Some(if is_selected { None } else { Some(vertex.id) });
                        }
                    });
                }
            });

        if let Some((id, pinned)) = pin_toggle {
            let result = if pinned {
                self.engine.pin(id)
            } else {
                self.engine.unpin(id)
            };
            if let Err(error) = result {
                warn!("pin toggle failed: {error}");
            }
        }
        if let Some(selected) = selection {
            self.selected = selected;
        }
    }
}
