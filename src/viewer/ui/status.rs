use eframe::egui::Context;

use super::super::{FrameSample, ViewModel};

const FRAME_WINDOW: usize = 240;

impl ViewModel {
    pub(in crate::viewer) fn record_frame(&mut self, ctx: &Context) {
        let frame_seconds = ctx.input(|input| input.stable_dt);
        if frame_seconds <= f32::EPSILON {
            return;
        }

        self.frame_samples.push_back(FrameSample {
            frame_seconds,
            ticks: self.ticks_last_frame,
        });
        if self.frame_samples.len() > FRAME_WINDOW {
            self.frame_samples.pop_front();
        }
    }

    fn frame_timing_text(&self) -> Option<String> {
        if !self.show_frame_timing || self.frame_samples.is_empty() {
            return None;
        }

        let wall = self
            .frame_samples
            .iter()
            .map(|sample| f64::from(sample.frame_seconds))
            .sum::<f64>();
        let worst_ms = self
            .frame_samples
            .iter()
            .map(|sample| sample.frame_seconds * 1000.0)
            .fold(0.0_f32, f32::max);
        let mean_ms = wall * 1000.0 / self.frame_samples.len() as f64;

        let ticks = self.frame_samples.iter().map(|sample| sample.ticks).sum::<usize>();
        let simulated = ticks as f64 / self.engine.config().tick_rate_hz;

        Some(format!(
            "frame {mean_ms:.1} ms (worst {worst_ms:.1}) | sim speed {:.2}x",
            simulated / wall
        ))
    }

    pub(in crate::viewer) fn status_text(&self) -> String {
        let simulation = if self.live_physics {
            format!(
                "{} ticks/frame @ {:.0} Hz | {} interacting pairs",
                self.ticks_last_frame,
                self.engine.config().tick_rate_hz,
                self.last_tick.interacting_pairs
            )
        } else {
            "simulation paused".to_owned()
        };

        match self.frame_timing_text() {
            Some(timing) => format!("{simulation} | {timing}"),
            None => simulation,
        }
    }
}
