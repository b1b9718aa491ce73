//! Generational turnover: fitness ranking, truncation selection, breeding.
//!
//! A generation ends when every prey is dead. Turnover then replaces the
//! whole population atomically: offspring for every role are fully
//! constructed before the old generation is touched, so an engine failure
//! leaves the previous population intact.

use rand::Rng;
use serde::Serialize;

use super::agent::{Agent, Role};
use super::engine::{EngineError, NetworkEngine};
use super::params::Params;

/// Best and average fitness of one role for one completed generation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FitnessRecord {
    /// Highest fitness in the role's population.
    pub best: f32,
    /// Mean fitness across the role's population.
    pub average: f32,
}

/// Per-generation fitness records, one entry per completed generation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FitnessHistory {
    /// Prey records.
    pub prey: Vec<FitnessRecord>,
    /// Predator records. Empty in the single-role variant.
    pub predators: Vec<FitnessRecord>,
}

impl FitnessHistory {
    /// Appends the closing generation's best/average per role. Called right
    /// before the population is replaced.
    pub fn record_generation<G, N>(&mut self, agents: &[Agent<G, N>]) {
        if let Some(record) = summarize(agents, Role::Prey) {
            self.prey.push(record);
        }
        if let Some(record) = summarize(agents, Role::Predator) {
            self.predators.push(record);
        }
    }
}

fn summarize<G, N>(agents: &[Agent<G, N>], role: Role) -> Option<FitnessRecord> {
    let scores: Vec<f32> = agents
        .iter()
        .filter(|a| a.role == role)
        .map(|a| a.fitness)
        .collect();
    if scores.is_empty() {
        return None;
    }
    let best = scores.iter().copied().fold(f32::MIN, f32::max);
    let average = scores.iter().sum::<f32>() / scores.len() as f32;
    Some(FitnessRecord { best, average })
}

/// The turnover trigger: no living prey remain.
///
/// Predators dying never ends a generation; only prey exhaustion does. With
/// zero predators configured this degenerates to "every agent is dead".
pub fn all_prey_dead<G, N>(agents: &[Agent<G, N>]) -> bool {
    !agents
        .iter()
        .any(|agent| agent.role == Role::Prey && agent.alive)
}

/// Replaces the population with a freshly bred generation.
///
/// Per role: rank (genome, fitness) pairs by fitness descending (stable, so
/// ties keep input order), breed from the top-half truncation pool (never
/// smaller than one parent), each child produced by engine self-crossover of
/// a uniformly drawn parent followed by mutation. New agents spawn at random
/// positions with full energy. Population sizes per role are exactly
/// preserved.
pub fn turnover<E, R>(
    agents: &mut Vec<Agent<E::Genome, E::Network>>,
    engine: &mut E,
    rng: &mut R,
    params: &Params,
) -> Result<(), EngineError>
where
    E: NetworkEngine,
    R: Rng,
{
    let new_prey = breed_role(Role::Prey, agents, params.prey_count, engine, rng, params)?;
    let new_predators = if params.predator_count > 0 {
        breed_role(
            Role::Predator,
            agents,
            params.predator_count,
            engine,
            rng,
            params,
        )?
    } else {
        Vec::new()
    };

    agents.clear();
    agents.extend(new_prey);
    agents.extend(new_predators);
    Ok(())
}

fn breed_role<E, R>(
    role: Role,
    agents: &[Agent<E::Genome, E::Network>],
    count: usize,
    engine: &mut E,
    rng: &mut R,
    params: &Params,
) -> Result<Vec<Agent<E::Genome, E::Network>>, EngineError>
where
    E: NetworkEngine,
    R: Rng,
{
    let mut scored: Vec<(&E::Genome, f32)> = agents
        .iter()
        .filter(|a| a.role == role)
        .map(|a| (&a.genome, a.fitness))
        .collect();
    // Stable sort keeps input order on fitness ties.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    debug_assert!(!scored.is_empty(), "breeding an absent role");

    let pool = &scored[..(scored.len() / 2).max(1)];

    let mut children = Vec::with_capacity(count);
    for _ in 0..count {
        let (parent, _) = pool[rng.random_range(0..pool.len())];
        let mut child = engine.crossover(parent, parent)?;
        engine.mutate(&mut child)?;
        let network = engine.build_network(&child)?;
        children.push(Agent::spawn_random(role, child, network, rng, params));
    }
    Ok(children)
}
