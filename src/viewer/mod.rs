use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use graph_relax::simulation::TickSummary;
use graph_relax::source::load_definition;
use graph_relax::{EngineConfig, LayoutEngine, VertexId};
use log::info;

mod graph;
mod render_utils;
mod ui;

type LoadResult = Result<LayoutEngine, String>;

pub struct GraphViewerApp {
    graph_path: Option<PathBuf>,
    config: EngineConfig,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    engine: LayoutEngine,
    live_physics: bool,
    tick_backlog: f64,
    max_ticks_per_frame: usize,
    ticks_last_frame: usize,
    last_tick: TickSummary,
    needs_fit: bool,
    dragging: Option<VertexId>,
    hovered: Option<VertexId>,
    selected: Option<VertexId>,
    show_labels: bool,
    show_frame_timing: bool,
    frame_samples: VecDeque<FrameSample>,
}

struct FrameSample {
    frame_seconds: f32,
    ticks: usize,
}

impl GraphViewerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        graph_path: Option<PathBuf>,
        config: EngineConfig,
    ) -> Self {
        let state = AppState::Loading {
            rx: Self::spawn_load(graph_path.clone(), config.clone()),
        };
        Self {
            graph_path,
            config,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(graph_path: Option<PathBuf>, config: EngineConfig) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_definition(graph_path.as_deref())
                .and_then(|definition| definition.into_engine(config))
                .map(|mut engine| {
                    engine.place_initial();
                    engine
                })
                .map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn source_label(&self) -> String {
        self.graph_path
            .as_ref()
            .map_or_else(|| "built-in sample".to_owned(), |path| path.display().to_string())
    }

    fn poll_load(rx: &Receiver<LoadResult>) -> Option<AppState> {
        match rx.try_recv() {
            Ok(result) => Some(Self::ready_state(result)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::error!("background load worker exited without a result");
                Some(AppState::Error(
                    "Background load worker disconnected".to_owned(),
                ))
            }
        }
    }

    fn ready_state(result: LoadResult) -> AppState {
        match result {
            Ok(engine) => {
                info!("layout engine ready");
                AppState::Ready(Box::new(ViewModel::new(engine)))
            }
            Err(error) => {
                log::error!("failed to load graph: {error}");
                AppState::Error(error)
            }
        }
    }
}

impl eframe::App for GraphViewerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let source_label = self.source_label();

        match &mut self.state {
            AppState::Loading { rx } => {
                transition = Self::poll_load(rx);

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint();
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(AppState::Loading {
                            rx: Self::spawn_load(self.graph_path.clone(), self.config.clone()),
                        });
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &source_label, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(
                        self.graph_path.clone(),
                        self.config.clone(),
                    ));
                }

                if let Some(rx) = &self.reload_rx {
                    transition = Self::poll_load(rx);
                    if transition.is_none() {
                        ctx.request_repaint();
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
