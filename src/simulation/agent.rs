//! Agent state, actuation, and the action-memory ring.
//!
//! An agent is one prey or predator: a position, heading, and speed driven by
//! its network's two outputs, an energy reserve drained every tick, and a
//! fitness accumulator that only ever grows within a generation. The genome
//! and the network built from it are owned exclusively by the agent for its
//! whole lifetime; the network is built once at construction and never
//! mutated in place.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use super::params::{Params, RoleParams};

/// Whether an agent hunts or forages. Immutable for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Forages for food; a generation ends when every prey is dead.
    Prey,
    /// Hunts prey; earns the capture bonus per kill.
    Predator,
}

impl Role {
    /// Physical constants for this role.
    pub fn params(self, params: &Params) -> &RoleParams {
        match self {
            Role::Prey => &params.prey,
            Role::Predator => &params.predator,
        }
    }

    /// The role this one senses as its target or threat.
    pub fn opposite(self) -> Role {
        match self {
            Role::Prey => Role::Predator,
            Role::Predator => Role::Prey,
        }
    }
}

/// Fixed-capacity ring of recent action scalars, oldest first.
///
/// Starts zero-filled at full length; every push evicts the oldest entry so
/// the length never changes.
#[derive(Debug, Clone)]
pub struct ActionMemory {
    values: Vec<f32>,
}

impl ActionMemory {
    /// Creates a zero-filled ring of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            values: vec![0.0; capacity],
        }
    }

    /// Appends a value, dropping the oldest one.
    pub fn push(&mut self, value: f32) {
        if self.values.is_empty() {
            return;
        }
        self.values.remove(0);
        self.values.push(value);
    }

    /// Contents oldest to newest.
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Ring capacity (and length; they are always equal).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for a zero-capacity ring.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One prey or predator instance.
#[derive(Debug, Clone)]
pub struct Agent<G, N> {
    /// Role tag, fixed at construction.
    pub role: Role,
    /// Position, always within `[radius, dimension - radius]` per axis.
    pub pos: Array1<f32>,
    /// Heading angle in `[0, 2pi)`.
    pub heading: f32,
    /// Current scalar speed, capped at the role maximum.
    pub speed: f32,
    /// Energy in `[0, role max]`. Death at zero is terminal.
    pub energy: f32,
    /// One-way flag; flips to `false` when energy runs out or a predator
    /// strikes, and never back.
    pub alive: bool,
    /// Survival reward accumulated this generation. Non-decreasing.
    pub fitness: f32,
    /// Exclusively owned genome handle.
    pub genome: G,
    /// Network derived from the genome at construction.
    pub network: N,
    /// Recent action scalars (vision variant input).
    pub memory: ActionMemory,
}

impl<G, N> Agent<G, N> {
    /// Creates an agent at an explicit position with full energy.
    pub fn new(role: Role, pos: Array1<f32>, genome: G, network: N, params: &Params) -> Self {
        Self {
            role,
            pos,
            heading: 0.0,
            speed: 0.0,
            energy: role.params(params).max_energy,
            alive: true,
            fitness: 0.0,
            genome,
            network,
            memory: ActionMemory::new(params.memory_size),
        }
    }

    /// Creates an agent at a uniformly random position within the role's
    /// legal spawn bounds.
    pub fn spawn_random<R: Rng>(
        role: Role,
        genome: G,
        network: N,
        rng: &mut R,
        params: &Params,
    ) -> Self {
        let radius = role.params(params).radius;
        let x = rng.random_range(radius..=params.world_width - radius);
        let y = rng.random_range(radius..=params.world_height - radius);
        Self::new(role, Array1::from_vec(vec![x, y]), genome, network, params)
    }

    /// Collision radius for this agent's role.
    pub fn radius(&self, params: &Params) -> f32 {
        self.role.params(params).radius
    }

    /// Checks the terminal alive flag.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Applies one tick of network output to the agent's kinematic and
    /// vitality state. A dead agent ignores the call entirely.
    ///
    /// `outputs[0]` turns: the full per-tick range is `[-pi/2, pi/2]`,
    /// centered so 0.5 means no turn. `outputs[1]` throttles: clamped to
    /// `[0, 1]` before scaling by the role's speed cap. The position update
    /// hard-clamps to the world rectangle, and the decay constant drains
    /// energy regardless of what the network chose.
    pub fn act(&mut self, outputs: &Array1<f32>, params: &Params) {
        if !self.alive {
            return;
        }

        let role = *self.role.params(params);

        let turn = outputs[0];
        let throttle = outputs[1].clamp(0.0, 1.0);

        self.heading = (self.heading + (turn - 0.5) * PI).rem_euclid(TAU);
        self.speed = throttle * role.max_speed;

        self.pos[0] = (self.pos[0] + self.heading.cos() * self.speed)
            .clamp(role.radius, params.world_width - role.radius);
        self.pos[1] = (self.pos[1] + self.heading.sin() * self.speed)
            .clamp(role.radius, params.world_height - role.radius);

        self.memory.push(turn);
        self.memory.push(throttle);

        self.energy -= params.energy_decay;
        if self.energy <= 0.0 {
            self.energy = 0.0;
            self.alive = false;
        }
    }

    /// Consumes one food item: energy up by `food_energy` capped at the role
    /// maximum, fitness up by one.
    pub fn eat(&mut self, params: &Params) {
        let max_energy = self.role.params(params).max_energy;
        self.energy = (self.energy + params.food_energy).min(max_energy);
        self.fitness += 1.0;
    }

    /// Rewards a predator for a kill: capture bonus to fitness, food energy
    /// to the reserve (capped).
    pub fn reward_capture(&mut self, params: &Params) {
        let max_energy = self.role.params(params).max_energy;
        self.energy = (self.energy + params.food_energy).min(max_energy);
        self.fitness += params.capture_bonus;
    }

    /// Kills the agent outright, independent of its energy.
    pub fn kill(&mut self) {
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_starts_zeroed_at_full_length() {
        let memory = ActionMemory::new(4);
        assert_eq!(memory.as_slice(), &[0.0; 4]);
    }

    #[test]
    fn memory_evicts_oldest_on_push() {
        let mut memory = ActionMemory::new(3);
        memory.push(1.0);
        memory.push(2.0);
        assert_eq!(memory.as_slice(), &[0.0, 1.0, 2.0]);
        memory.push(3.0);
        memory.push(4.0);
        assert_eq!(memory.as_slice(), &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn zero_capacity_memory_ignores_pushes() {
        let mut memory = ActionMemory::new(0);
        memory.push(1.0);
        assert!(memory.is_empty());
    }

    #[test]
    fn opposite_roles() {
        assert_eq!(Role::Prey.opposite(), Role::Predator);
        assert_eq!(Role::Predator.opposite(), Role::Prey);
    }
}
