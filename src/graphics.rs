//! World rendering from read-only snapshots.

use macroquad::prelude::*;

use neuroprey::simulation::agent::Role;
use neuroprey::simulation::params::Params;
use neuroprey::simulation::snapshot::WorldSnapshot;

trait ToScreen {
    type Output;
    fn to_screen(&self, params: &Params) -> Self::Output;
}

impl ToScreen for (f32, f32) {
    type Output = (f32, f32);
    fn to_screen(&self, params: &Params) -> (f32, f32) {
        let scale_x = screen_width() / params.world_width;
        let scale_y = screen_height() / params.world_height;
        (self.0 * scale_x, self.1 * scale_y)
    }
}

impl ToScreen for f32 {
    type Output = f32;
    fn to_screen(&self, params: &Params) -> f32 {
        let scale_x = screen_width() / params.world_width;
        let scale_y = screen_height() / params.world_height;
        self * scale_x.min(scale_y)
    }
}

/// Draws food, then agents, onto the current frame.
pub fn draw_world(snapshot: &WorldSnapshot, params: &Params) {
    for food in &snapshot.foods {
        let (x, y) = (food.x, food.y).to_screen(params);
        let radius = params.food_radius.to_screen(params);
        draw_circle(x, y, radius, Color::from_rgba(220, 60, 60, 255));
    }

    for agent in &snapshot.agents {
        if !agent.alive {
            continue;
        }

        let role_params = agent.role.params(params);
        let (x, y) = (agent.x, agent.y).to_screen(params);
        let radius = role_params.radius.to_screen(params);

        let body = match agent.role {
            Role::Prey => Color::from_rgba(60, 200, 90, 255),
            Role::Predator => Color::from_rgba(240, 160, 40, 255),
        };
        draw_circle(x, y, radius, body);

        // heading indicator
        let tip_x = x + agent.heading.cos() * radius;
        let tip_y = y + agent.heading.sin() * radius;
        draw_line(x, y, tip_x, tip_y, 2.0, Color::from_rgba(40, 40, 40, 255));

        // energy bar
        let bar_width = 20.0;
        let bar_height = 3.0;
        let bar_x = x - bar_width / 2.0;
        let bar_y = y - radius - bar_height - 3.0;
        draw_rectangle(
            bar_x,
            bar_y,
            bar_width,
            bar_height,
            Color::from_rgba(100, 100, 100, 200),
        );
        let fill = (agent.energy / role_params.max_energy).clamp(0.0, 1.0);
        draw_rectangle(
            bar_x,
            bar_y,
            bar_width * fill,
            bar_height,
            Color::from_rgba(255, 230, 60, 255),
        );
    }
}
