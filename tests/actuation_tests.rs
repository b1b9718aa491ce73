#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use ndarray::Array1;

use neuroprey::simulation::agent::{Agent, Role};
use neuroprey::simulation::engine::{MlpEngine, MlpGenome, MlpNetwork, NetworkEngine};
use neuroprey::simulation::params::Params;
use neuroprey::simulation::sensor;

fn test_params() -> Params {
    Params::default()
}

fn test_agent(role: Role, x: f32, y: f32, params: &Params) -> Agent<MlpGenome, MlpNetwork> {
    let mut engine = MlpEngine::new(vec![sensor::input_len(params), 8, 2], 0.1, 0.05);
    let genome = engine.new_genome(0).unwrap();
    let network = engine.build_network(&genome).unwrap();
    Agent::new(role, Array1::from_vec(vec![x, y]), genome, network, params)
}

fn outputs(turn: f32, throttle: f32) -> Array1<f32> {
    Array1::from_vec(vec![turn, throttle])
}

#[test]
fn centered_turn_output_keeps_heading() {
    let params = test_params();
    let mut agent = test_agent(Role::Prey, 400.0, 300.0, &params);

    agent.act(&outputs(0.5, 1.0), &params);

    assert_eq!(agent.heading, 0.0);
    assert_eq!(agent.speed, params.prey.max_speed);
    assert!((agent.pos[0] - (400.0 + params.prey.max_speed)).abs() < 1e-5);
    assert_eq!(agent.pos[1], 300.0);
}

#[test]
fn full_turn_output_rotates_half_pi() {
    let params = test_params();
    let mut agent = test_agent(Role::Prey, 400.0, 300.0, &params);

    agent.act(&outputs(1.0, 0.0), &params);
    assert!((agent.heading - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

    agent.act(&outputs(0.0, 0.0), &params);
    assert!(agent.heading.abs() < 1e-6);
}

#[test]
fn heading_stays_in_unit_circle_range() {
    let params = test_params();
    let mut agent = test_agent(Role::Prey, 400.0, 300.0, &params);

    for _ in 0..20 {
        agent.act(&outputs(1.0, 0.0), &params);
        assert!((0.0..std::f32::consts::TAU).contains(&agent.heading));
    }
}

#[test]
fn throttle_is_clamped_before_scaling() {
    let params = test_params();
    let mut agent = test_agent(Role::Prey, 400.0, 300.0, &params);

    agent.act(&outputs(0.5, 2.0), &params);
    assert_eq!(agent.speed, params.prey.max_speed);

    agent.act(&outputs(0.5, -1.0), &params);
    assert_eq!(agent.speed, 0.0);
}

#[test]
fn position_clamps_to_world_rectangle() {
    let params = test_params();
    let mut agent = test_agent(Role::Prey, params.prey.radius + 1.0, 300.0, &params);
    agent.heading = std::f32::consts::PI; // facing the left wall

    for _ in 0..10 {
        agent.act(&outputs(0.5, 1.0), &params);
    }

    assert_eq!(agent.pos[0], params.prey.radius);
    assert!(agent.pos[1] >= params.prey.radius);
    assert!(agent.pos[1] <= params.world_height - params.prey.radius);
}

#[test]
fn energy_decays_every_tick_regardless_of_action() {
    let params = test_params();
    let mut agent = test_agent(Role::Prey, 400.0, 300.0, &params);
    let start = agent.energy;

    agent.act(&outputs(0.5, 0.0), &params);
    assert_eq!(agent.energy, start - params.energy_decay);

    agent.act(&outputs(0.5, 1.0), &params);
    assert_eq!(agent.energy, start - 2.0 * params.energy_decay);
}

#[test]
fn starving_agent_dies_and_ignores_further_actions() {
    let params = test_params(); // decay 0.1
    let mut agent = test_agent(Role::Prey, 400.0, 300.0, &params);
    agent.energy = 0.05;

    agent.act(&outputs(0.5, 1.0), &params);
    assert!(!agent.alive);
    assert_eq!(agent.energy, 0.0);

    let pos = agent.pos.clone();
    agent.act(&outputs(1.0, 1.0), &params);
    assert_eq!(agent.pos, pos);
    assert_eq!(agent.energy, 0.0);
    assert!(!agent.alive);
}

#[test]
fn eating_is_capped_at_role_max_energy() {
    let params = test_params();
    let mut agent = test_agent(Role::Prey, 400.0, 300.0, &params);

    agent.energy = 80.0;
    agent.eat(&params);
    assert_eq!(agent.energy, params.prey.max_energy);
    assert_eq!(agent.fitness, 1.0);

    agent.energy = 20.0;
    agent.eat(&params);
    assert_eq!(agent.energy, 20.0 + params.food_energy);
    assert_eq!(agent.fitness, 2.0);
}

#[test]
fn capture_reward_uses_bonus_and_caps_energy() {
    let params = test_params();
    let mut predator = test_agent(Role::Predator, 400.0, 300.0, &params);

    predator.energy = 90.0;
    predator.reward_capture(&params);
    assert_eq!(predator.energy, params.predator.max_energy);
    assert_eq!(predator.fitness, params.capture_bonus);
}

#[test]
fn actions_are_recorded_in_memory() {
    let params = test_params(); // memory_size 4
    let mut agent = test_agent(Role::Prey, 400.0, 300.0, &params);

    agent.act(&outputs(0.7, 0.3), &params);
    assert_eq!(agent.memory.as_slice(), &[0.0, 0.0, 0.7, 0.3]);

    agent.act(&outputs(0.1, 0.9), &params);
    assert_eq!(agent.memory.as_slice(), &[0.7, 0.3, 0.1, 0.9]);
}

#[test]
fn fresh_agents_start_at_role_max_energy() {
    let params = test_params();
    let prey = test_agent(Role::Prey, 100.0, 100.0, &params);
    let predator = test_agent(Role::Predator, 100.0, 100.0, &params);

    assert_eq!(prey.energy, params.prey.max_energy);
    assert_eq!(predator.energy, params.predator.max_energy);
    assert!(prey.alive && predator.alive);
    assert_eq!(prey.fitness, 0.0);
}
