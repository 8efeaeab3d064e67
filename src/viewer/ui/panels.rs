use std::collections::VecDeque;

use eframe::egui::{self, Align, Context, Layout};
use graph_relax::LayoutEngine;
use graph_relax::simulation::TickSummary;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::viewer) const MAX_TICKS_PER_FRAME: usize = 64;

    pub(in crate::viewer) fn new(engine: LayoutEngine) -> Self {
        Self {
            engine,
            live_physics: true,
            tick_backlog: 0.0,
            max_ticks_per_frame: Self::MAX_TICKS_PER_FRAME,
            ticks_last_frame: 0,
            last_tick: TickSummary::default(),
            needs_fit: true,
            dragging: None,
            hovered: None,
            selected: None,
            show_labels: true,
            show_frame_timing: true,
            frame_samples: VecDeque::new(),
        }
    }

    pub(in crate::viewer) fn show(
        &mut self,
        ctx: &Context,
        source_label: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("graph-relax");
                    ui.separator();
                    ui.label(format!("source: {source_label}"));
                    ui.label(format!("vertices: {}", self.engine.vertices().len()));
                    ui.label(format!("edges: {}", self.engine.edges().len()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload graph"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.status_text());
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading graph...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });

        self.record_frame(ctx);
    }
}
