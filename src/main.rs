//! Neuroprey binary: simulation loop plus macroquad/egui presentation.

use macroquad::prelude::*;

use neuroprey::simulation::engine::MlpEngine;
use neuroprey::simulation::params::Params;
use neuroprey::simulation::sensor;
use neuroprey::simulation::world::World;

mod graphics;
mod ui;

const HIDDEN_LAYER: usize = 12;
const INIT_WEIGHT_SCALE: f32 = 0.5;
const MUTATION_SCALE: f32 = 0.1;

fn build_engine(params: &Params) -> MlpEngine {
    // two outputs: turn and throttle
    MlpEngine::new(
        vec![sensor::input_len(params), HIDDEN_LAYER, 2],
        INIT_WEIGHT_SCALE,
        MUTATION_SCALE,
    )
}

#[macroquad::main("Neuroprey")]
async fn main() {
    env_logger::init();

    let params = match std::env::args().nth(1) {
        Some(path) => Params::from_json_file(&path),
        None => Ok(Params::default()),
    };
    let params = match params {
        Ok(params) => params,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let mut world = match World::new(&params, build_engine(&params), ::rand::random()) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("failed to start simulation: {e}");
            std::process::exit(1);
        }
    };

    let mut ui_state = ui::UiState::default();

    loop {
        ui::handle_keys(&mut ui_state);
        if ui_state.quit_requested {
            break;
        }
        if ui_state.reset_requested {
            ui_state.reset_requested = false;
            world = match World::new(&params, build_engine(&params), ::rand::random()) {
                Ok(world) => world,
                Err(e) => {
                    eprintln!("reset failed: {e}");
                    break;
                }
            };
        }

        if !ui_state.paused {
            if let Err(e) = world.step(&params) {
                eprintln!("engine failure: {e}");
                break;
            }
        }

        clear_background(Color::from_rgba(18, 18, 24, 255));

        let snapshot = world.snapshot();
        graphics::draw_world(&snapshot, &params);

        egui_macroquad::ui(|ctx| {
            ui::draw_stats_panel(ctx, &mut ui_state, &snapshot, &world.history, &params);
        });
        egui_macroquad::draw();

        next_frame().await;
    }
}
