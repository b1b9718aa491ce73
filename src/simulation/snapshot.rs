//! Read-only view types served to the presentation layer.
//!
//! Rendering, plotting, and input live outside the core; they consume these
//! snapshots and can never mutate simulation state through them. The agent
//! views double as the frozen start-of-tick state the sensor model reads, so
//! no agent observes a peer's same-tick update.

use serde::Serialize;

use super::agent::{Agent, Role};
use super::environment::Food;

/// Frozen per-agent state.
#[derive(Debug, Clone, Serialize)]
pub struct AgentView {
    /// Role tag.
    pub role: Role,
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
    /// Heading angle in `[0, 2pi)`.
    pub heading: f32,
    /// Current speed.
    pub speed: f32,
    /// Current energy.
    pub energy: f32,
    /// Fitness accumulated this generation.
    pub fitness: f32,
    /// Alive flag.
    pub alive: bool,
}

impl AgentView {
    /// Captures an agent's externally visible state.
    pub fn of<G, N>(agent: &Agent<G, N>) -> Self {
        Self {
            role: agent.role,
            x: agent.pos[0],
            y: agent.pos[1],
            heading: agent.heading,
            speed: agent.speed,
            energy: agent.energy,
            fitness: agent.fitness,
            alive: agent.alive,
        }
    }
}

/// Frozen per-food state.
#[derive(Debug, Clone, Serialize)]
pub struct FoodView {
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
}

impl FoodView {
    /// Captures a food item's position.
    pub fn of(food: &Food) -> Self {
        Self {
            x: food.pos[0],
            y: food.pos[1],
        }
    }
}

/// One frame of world state for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    /// Ticks elapsed since the last reset.
    pub tick: u64,
    /// Generation counter. Observability only; never read back into the
    /// simulation.
    pub generation: u32,
    /// All agents, dead ones included until the generation boundary.
    pub agents: Vec<AgentView>,
    /// All live food.
    pub foods: Vec<FoodView>,
}
