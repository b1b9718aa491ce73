//! Stats panel, fitness-history plot, and keyboard control signals.

use egui_macroquad::egui;
use egui_plot::{Line, Plot, PlotPoints};
use macroquad::prelude::{KeyCode, is_key_pressed};

use neuroprey::simulation::agent::Role;
use neuroprey::simulation::evolution::{FitnessHistory, FitnessRecord};
use neuroprey::simulation::params::Params;
use neuroprey::simulation::snapshot::WorldSnapshot;

/// Control signals collected from the input layer each frame.
#[derive(Debug, Default)]
pub struct UiState {
    /// Tick advancement frozen; state stays renderable.
    pub paused: bool,
    /// Discard population and environment, reinitialize from scratch.
    pub reset_requested: bool,
    /// Terminate the run.
    pub quit_requested: bool,
}

/// Maps keyboard input to control signals: Space pauses, R resets, Q or
/// Escape quits.
pub fn handle_keys(state: &mut UiState) {
    if is_key_pressed(KeyCode::Space) {
        state.paused = !state.paused;
    }
    if is_key_pressed(KeyCode::R) {
        state.reset_requested = true;
    }
    if is_key_pressed(KeyCode::Q) || is_key_pressed(KeyCode::Escape) {
        state.quit_requested = true;
    }
}

fn fitness_line(records: &[FitnessRecord], pick: fn(&FitnessRecord) -> f32) -> Line {
    let points: PlotPoints = records
        .iter()
        .enumerate()
        .map(|(i, record)| [i as f64, pick(record) as f64])
        .collect();
    Line::new(points)
}

/// Draws the side panel with run stats and the per-generation fitness plot.
pub fn draw_stats_panel(
    egui_ctx: &egui::Context,
    state: &mut UiState,
    snapshot: &WorldSnapshot,
    history: &FitnessHistory,
    params: &Params,
) {
    egui::SidePanel::right("stats_panel")
        .default_width(260.0)
        .resizable(true)
        .show(egui_ctx, |ui| {
            ui.heading("Simulation");
            ui.separator();

            ui.horizontal(|ui| {
                let pause_label = if state.paused { "Resume" } else { "Pause" };
                if ui.button(pause_label).clicked() {
                    state.paused = !state.paused;
                }
                if ui.button("Reset").clicked() {
                    state.reset_requested = true;
                }
            });

            ui.separator();
            ui.label(format!("Generation: {}", snapshot.generation));
            ui.label(format!("Tick: {}", snapshot.tick));

            let living = |role: Role| {
                snapshot
                    .agents
                    .iter()
                    .filter(|a| a.role == role && a.alive)
                    .count()
            };
            ui.label(format!(
                "Prey alive: {}/{}",
                living(Role::Prey),
                params.prey_count
            ));
            if params.predator_count > 0 {
                ui.label(format!(
                    "Predators alive: {}/{}",
                    living(Role::Predator),
                    params.predator_count
                ));
            }
            ui.label(format!("Food: {}", snapshot.foods.len()));

            if let Some(best) = snapshot
                .agents
                .iter()
                .map(|a| a.fitness)
                .max_by(f32::total_cmp)
            {
                ui.label(format!("Best fitness (current): {:.1}", best));
            }

            ui.separator();
            ui.label("Fitness per generation");
            Plot::new("fitness_history")
                .height(180.0)
                .legend(egui_plot::Legend::default())
                .show(ui, |plot_ui| {
                    plot_ui.line(fitness_line(&history.prey, |r| r.best).name("prey best"));
                    plot_ui.line(fitness_line(&history.prey, |r| r.average).name("prey avg"));
                    if !history.predators.is_empty() {
                        plot_ui.line(
                            fitness_line(&history.predators, |r| r.best).name("predator best"),
                        );
                    }
                });
        });
}
