//! Food lifecycle and proximity interaction resolution.
//!
//! The environment owns every live food item and enforces one invariant:
//! after each [`Environment::update`], exactly `food_count` non-eaten items
//! exist. Eaten food is purged and replaced within the same pass.

use log::trace;
use ndarray::Array1;
use rand::Rng;

use super::agent::{Agent, Role};
use super::geometry::distance;
use super::params::Params;

/// A spawnable resource agents eat for energy.
#[derive(Debug, Clone)]
pub struct Food {
    /// Position in the world rectangle.
    pub pos: Array1<f32>,
    /// One-way flag; set when some agent consumes this item.
    pub eaten: bool,
}

impl Food {
    /// Creates a food item at a uniformly random position. Overlap with
    /// agents or other food is permitted.
    pub fn new_random<R: Rng>(rng: &mut R, params: &Params) -> Self {
        let r = params.food_radius;
        let x = rng.random_range(r..=params.world_width - r);
        let y = rng.random_range(r..=params.world_height - r);
        Self {
            pos: Array1::from_vec(vec![x, y]),
            eaten: false,
        }
    }
}

/// Owner of the live food set.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Live food items. All non-eaten between updates.
    pub foods: Vec<Food>,
}

impl Environment {
    /// Creates an environment stocked to the food quota.
    pub fn new<R: Rng>(rng: &mut R, params: &Params) -> Self {
        let mut env = Self { foods: Vec::new() };
        env.spawn_to_quota(rng, params);
        env
    }

    fn spawn_to_quota<R: Rng>(&mut self, rng: &mut R, params: &Params) {
        while self.foods.len() < params.food_count {
            self.foods.push(Food::new_random(rng, params));
        }
    }

    /// Resolves agent-food consumption, then restores the food quota.
    ///
    /// Agents and food are scanned in enumeration order; the first agent to
    /// satisfy the proximity test wins the item, later agents see it already
    /// eaten. Afterwards eaten items are purged and fresh ones spawned so the
    /// live count returns to quota.
    pub fn update<G, N, R: Rng>(
        &mut self,
        agents: &mut [Agent<G, N>],
        rng: &mut R,
        params: &Params,
    ) {
        for agent in agents.iter_mut() {
            if !agent.alive {
                continue;
            }
            let reach = agent.radius(params) + params.food_radius;
            for food in &mut self.foods {
                if food.eaten {
                    continue;
                }
                if distance(&agent.pos, &food.pos) < reach {
                    agent.eat(params);
                    food.eaten = true;
                    trace!(
                        "{:?} at ({:.0}, {:.0}) ate food, energy now {:.1}",
                        agent.role, agent.pos[0], agent.pos[1], agent.energy
                    );
                }
            }
        }

        self.foods.retain(|food| !food.eaten);
        self.spawn_to_quota(rng, params);
    }

    /// Discards all food and restocks to quota. Called at every turnover.
    pub fn reset<R: Rng>(&mut self, rng: &mut R, params: &Params) {
        self.foods.clear();
        self.spawn_to_quota(rng, params);
    }

    /// Number of live, non-eaten food items.
    pub fn live_food(&self) -> usize {
        self.foods.iter().filter(|food| !food.eaten).count()
    }
}

/// Resolves predator-prey contact for one tick.
///
/// Every living predator is checked against every living prey in enumeration
/// order. On radii overlap the prey dies immediately (independent of its
/// energy), the predator earns the capture bonus and the food-energy refill.
/// A prey killed earlier in the pass is skipped, so no kill is double-counted.
pub fn resolve_predation<G, N>(agents: &mut [Agent<G, N>], params: &Params) {
    let predators: Vec<usize> = (0..agents.len())
        .filter(|&i| agents[i].role == Role::Predator && agents[i].alive)
        .collect();
    let prey: Vec<usize> = (0..agents.len())
        .filter(|&i| agents[i].role == Role::Prey && agents[i].alive)
        .collect();

    let reach = params.predator.radius + params.prey.radius;
    for &p in &predators {
        for &q in &prey {
            if !agents[q].alive {
                continue;
            }
            if distance(&agents[p].pos, &agents[q].pos) < reach {
                agents[q].kill();
                agents[p].reward_capture(params);
                trace!(
                    "predator at ({:.0}, {:.0}) caught prey at ({:.0}, {:.0})",
                    agents[p].pos[0], agents[p].pos[1], agents[q].pos[0], agents[q].pos[1]
                );
            }
        }
    }
}
