//! The world: population, environment, and the synchronous tick loop.
//!
//! Everything runs single-threaded. One [`World::step`] performs, in order:
//! environment update (consumption, purge, respawn), sensing and actuation
//! for every agent in index order, predation resolution, and, if every prey
//! is dead, the atomic generation turnover. Sensing reads a snapshot of agent
//! state frozen at the start of the phase, so no agent observes a peer's
//! same-tick update.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use super::agent::{Agent, Role};
use super::engine::{EngineError, Network, NetworkEngine};
use super::environment::{Environment, resolve_predation};
use super::evolution::{FitnessHistory, all_prey_dead, turnover};
use super::params::{ConfigError, Params};
use super::sensor::{self, FoodIndex};
use super::snapshot::{AgentView, FoodView, WorldSnapshot};

/// Errors raised while standing up a world.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The genome engine failed while creating the initial population.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Full simulation state for one run.
#[derive(Debug)]
pub struct World<E: NetworkEngine> {
    /// The population: prey first, then predators. Order is the fixed
    /// enumeration order for sensing, actuation, and interaction resolution.
    pub agents: Vec<Agent<E::Genome, E::Network>>,
    /// Owner of the live food set.
    pub environment: Environment,
    /// Best/average fitness per completed generation.
    pub history: FitnessHistory,
    /// Completed generations. Observability only.
    pub generation: u32,
    /// Ticks stepped so far.
    pub tick: u64,
    engine: E,
    rng: StdRng,
}

impl<E: NetworkEngine> World<E> {
    /// Validates the configuration, then builds the initial population and
    /// environment from the given seed. Fails before any state exists if the
    /// configuration is invalid.
    pub fn new(params: &Params, mut engine: E, seed: u64) -> Result<Self, SimError> {
        params.validate()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut agents = Vec::with_capacity(params.prey_count + params.predator_count);
        for i in 0..params.prey_count {
            let genome = engine.new_genome(i as u64)?;
            let network = engine.build_network(&genome)?;
            agents.push(Agent::spawn_random(
                Role::Prey,
                genome,
                network,
                &mut rng,
                params,
            ));
        }
        for i in 0..params.predator_count {
            let genome = engine.new_genome((params.prey_count + i) as u64)?;
            let network = engine.build_network(&genome)?;
            agents.push(Agent::spawn_random(
                Role::Predator,
                genome,
                network,
                &mut rng,
                params,
            ));
        }

        let environment = Environment::new(&mut rng, params);

        debug!(
            "world ready: {} prey, {} predators, {} food, seed {}",
            params.prey_count, params.predator_count, params.food_count, seed
        );

        Ok(Self {
            agents,
            environment,
            history: FitnessHistory::default(),
            generation: 0,
            tick: 0,
            engine,
            rng,
        })
    }

    /// Advances the simulation by one tick.
    ///
    /// An engine failure during activation or turnover propagates; a failed
    /// turnover leaves the previous generation's population in place.
    pub fn step(&mut self, params: &Params) -> Result<(), EngineError> {
        self.tick += 1;

        self.environment
            .update(&mut self.agents, &mut self.rng, params);

        let views: Vec<AgentView> = self.agents.iter().map(AgentView::of).collect();
        let index =
            FoodIndex::build(&self.environment.foods).expect("failed to build food index");

        for i in 0..self.agents.len() {
            if !self.agents[i].alive {
                continue;
            }
            let observation = sensor::observe(
                &self.agents[i],
                &self.environment.foods,
                &views,
                &index,
                params,
            );
            let outputs = self.agents[i].network.activate(&observation)?;
            self.agents[i].act(&outputs, params);
        }

        resolve_predation(&mut self.agents, params);

        if all_prey_dead(&self.agents) {
            self.history.record_generation(&self.agents);
            turnover(&mut self.agents, &mut self.engine, &mut self.rng, params)?;
            self.environment.reset(&mut self.rng, params);
            self.generation += 1;

            if let Some(record) = self.history.prey.last() {
                info!(
                    "generation {} done at tick {}: prey best {:.1}, average {:.2}",
                    self.generation, self.tick, record.best, record.average
                );
            }
        }

        Ok(())
    }

    /// Captures a read-only frame for the presentation layer.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            generation: self.generation,
            agents: self.agents.iter().map(AgentView::of).collect(),
            foods: self.environment.foods.iter().map(FoodView::of).collect(),
        }
    }

    /// Count of living agents of one role.
    pub fn living(&self, role: Role) -> usize {
        self.agents
            .iter()
            .filter(|a| a.role == role && a.alive)
            .count()
    }
}
