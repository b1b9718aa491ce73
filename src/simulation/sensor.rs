//! Observation vector construction.
//!
//! For a fixed world state the observation is a pure function of the querying
//! agent, the live food set, and the frozen agent views: no hidden state, no
//! randomness. Nearest-candidate scans run in enumeration order so exact
//! distance ties resolve to the first candidate encountered, keeping the
//! output reproducible.

use kdtree::KdTree;
use kdtree::distance::squared_euclidean;
use ndarray::Array1;

use super::agent::Agent;
use super::environment::Food;
use super::geometry::{distance, line_circle_distance};
use super::params::{Params, SensorMode};
use super::snapshot::AgentView;

/// Observation vector length for a configuration. Constant across calls.
pub fn input_len(params: &Params) -> usize {
    match params.sensor_mode {
        // nearest food (2) + energy, speed, heading, wall distance
        SensorMode::Basic => 6,
        // nearest food (2) + nearest opponent (2) + rays + memory + energy, speed
        SensorMode::Vision => 4 + params.ray_count + params.memory_size + 2,
    }
}

/// Spatial index over the food set, rebuilt once per tick and used to
/// prefilter ray candidates.
pub struct FoodIndex {
    tree: KdTree<f32, usize, Vec<f32>>,
}

impl FoodIndex {
    /// Builds the index. Every food item is inserted under its vec index;
    /// eaten items are filtered at query resolution, not here.
    pub fn build(foods: &[Food]) -> Result<Self, kdtree::ErrorKind> {
        let mut tree = KdTree::with_capacity(2, foods.len().max(1));
        for (i, food) in foods.iter().enumerate() {
            tree.add(food.pos.to_vec(), i)?;
        }
        Ok(Self { tree })
    }

    /// Food indices within `radius` of `pos`, sorted ascending so downstream
    /// scans stay order-stable regardless of tree internals.
    fn within(&self, pos: &Array1<f32>, radius: f32) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .tree
            .within(&pos.to_vec(), radius * radius, &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(_, &id)| id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// Folds a `[-0.5, 0.5)` bearing fraction into `[0, 1)`.
fn fold_bearing(fraction: f32) -> f32 {
    fraction.rem_euclid(1.0)
}

/// Normalized bearing from `from` toward `to`: `atan2 / 2pi`, folded.
fn bearing(from: &Array1<f32>, to: &Array1<f32>) -> f32 {
    let dy = to[1] - from[1];
    let dx = to[0] - from[0];
    fold_bearing(dy.atan2(dx) / std::f32::consts::TAU)
}

/// Builds the observation vector for one agent.
///
/// Construction order is fixed: nearest non-eaten food (distance, bearing),
/// then for the vision variant the nearest opposite-role agent, the ray fan,
/// and the action memory, and finally proprioception. Missing targets
/// substitute the sentinel (distance 1.0, bearing 0.0) rather than failing.
pub fn observe<G, N>(
    agent: &Agent<G, N>,
    foods: &[Food],
    views: &[AgentView],
    index: &FoodIndex,
    params: &Params,
) -> Array1<f32> {
    let diagonal = params.world_diagonal();
    let role = *agent.role.params(params);
    let mut inputs = Vec::with_capacity(input_len(params));

    // Nearest non-eaten food, first-encountered wins on ties.
    let mut nearest_food: Option<(f32, &Food)> = None;
    for food in foods {
        if food.eaten {
            continue;
        }
        let d = distance(&agent.pos, &food.pos);
        if nearest_food.is_none_or(|(best, _)| d < best) {
            nearest_food = Some((d, food));
        }
    }
    match nearest_food {
        Some((d, food)) => {
            inputs.push(d / diagonal);
            inputs.push(bearing(&agent.pos, &food.pos));
        }
        None => {
            inputs.push(1.0);
            inputs.push(0.0);
        }
    }

    if params.sensor_mode == SensorMode::Vision {
        // Nearest living agent of the opposite role.
        let target_role = agent.role.opposite();
        let mut nearest_opponent: Option<(f32, &AgentView)> = None;
        for view in views {
            if view.role != target_role || !view.alive {
                continue;
            }
            let d = (view.x - agent.pos[0]).hypot(view.y - agent.pos[1]);
            if nearest_opponent.is_none_or(|(best, _)| d < best) {
                nearest_opponent = Some((d, view));
            }
        }
        match nearest_opponent {
            Some((d, view)) => {
                let target = Array1::from_vec(vec![view.x, view.y]);
                inputs.push(d / diagonal);
                inputs.push(bearing(&agent.pos, &target));
            }
            None => {
                inputs.push(1.0);
                inputs.push(0.0);
            }
        }

        // Ray fan across the vision cone, both edge angles included. Each ray
        // reports the normalized distance to the closest food it crosses
        // within range, 1.0 when none does.
        let candidates = index.within(&agent.pos, params.vision_range + params.food_radius);
        let step = params.vision_angle / (params.ray_count as f32 - 1.0);
        for i in 0..params.ray_count {
            let angle = agent.heading - params.vision_angle / 2.0 + i as f32 * step;
            let end = Array1::from_vec(vec![
                agent.pos[0] + angle.cos() * params.vision_range,
                agent.pos[1] + angle.sin() * params.vision_range,
            ]);

            let mut hit = 1.0_f32;
            for &id in &candidates {
                let food = &foods[id];
                if food.eaten {
                    continue;
                }
                if line_circle_distance(&agent.pos, &end, &food.pos) < params.food_radius {
                    let d = (distance(&agent.pos, &food.pos) / params.vision_range).min(1.0);
                    if d < hit {
                        hit = d;
                    }
                }
            }
            inputs.push(hit);
        }

        // Action memory, oldest to newest.
        inputs.extend_from_slice(agent.memory.as_slice());

        inputs.push(agent.energy / role.max_energy);
        inputs.push(agent.speed / role.max_speed);
    } else {
        inputs.push(agent.energy / role.max_energy);
        inputs.push(agent.speed / role.max_speed);
        inputs.push(agent.heading / std::f32::consts::TAU);

        // Distance to the closest of the four walls, normalized by the half
        // of the smaller world dimension so a centered agent reads 1.0.
        let wall = (agent.pos[0])
            .min(params.world_width - agent.pos[0])
            .min(agent.pos[1])
            .min(params.world_height - agent.pos[1]);
        let half_min = 0.5 * params.world_width.min(params.world_height);
        inputs.push((wall / half_min).clamp(0.0, 1.0));
    }

    debug_assert_eq!(inputs.len(), input_len(params));
    Array1::from_vec(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearing_folds_negative_angles_into_unit_range() {
        let origin = Array1::from_vec(vec![0.0, 0.0]);
        // Straight down: atan2(-1, 0) = -pi/2, folded to 0.75.
        let below = Array1::from_vec(vec![0.0, -1.0]);
        assert!((bearing(&origin, &below) - 0.75).abs() < 1e-6);
        // Straight right stays 0.
        let right = Array1::from_vec(vec![1.0, 0.0]);
        assert!(bearing(&origin, &right).abs() < 1e-6);
    }

    #[test]
    fn fold_is_identity_on_unit_range() {
        assert_eq!(fold_bearing(0.25), 0.25);
        assert!((fold_bearing(-0.25) - 0.75).abs() < 1e-6);
    }
}
