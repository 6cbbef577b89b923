use wavedash_core::geometry::GeometryProvider;

use crate::collision::{Contacts, resolve_collisions};
use crate::config::PhysicsConfig;
use crate::player::Player;

/// Outcome of a single [`advance`] step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub contacts: Contacts,
    /// The air dodge ran out this tick.
    pub dodge_expired: bool,
}

/// Advance the player by one fixed step of `dt_ms` milliseconds.
///
/// Order matters: jerk feeds acceleration, friction adjusts it, position moves
/// with the velocity from *before* this tick's acceleration, then velocity
/// integrates. The dodge timer runs before collisions so a dodge that expires
/// this tick lands without a wavedash.
pub fn advance(
    player: &mut Player,
    geometry: &impl GeometryProvider,
    config: &PhysicsConfig,
    dt_ms: u32,
) -> TickReport {
    let prev = player.edges();
    let dt = f64::from(dt_ms);

    let jerk = player.x_jrk(config);
    if (player.x_spd > config.speed_cap && jerk > 0.0)
        || (player.x_spd < -config.speed_cap && jerk < 0.0)
    {
        player.x_acc = 0.0;
    } else {
        player.x_acc += jerk;
    }
    apply_friction(player, config, dt_ms);

    player.x += player.x_spd;
    player.y += player.y_spd;
    player.x_spd += player.x_acc * dt / 1000.0;
    player.y_spd += player.y_acc * dt / 1000.0;

    let mut dodge_expired = false;
    if let Some(dodge) = player.air_dodge.as_mut() {
        dodge.elapsed_ticks += 1;
        if dodge.elapsed_ticks >= config.air_dodge_ticks {
            player.end_air_dodge(config);
            dodge_expired = true;
        }
    }

    let contacts = resolve_collisions(player, geometry, config, prev);

    TickReport {
        contacts,
        dodge_expired,
    }
}

/// Decelerate toward rest when no single direction is held and the player
/// isn't dodging. Magnitude follows `|-a * v^2 + b|`, which dips to zero
/// near `sqrt(b / a)` and grows again past it. Clamps to a dead stop instead
/// of letting this tick's velocity cross zero.
pub fn apply_friction(player: &mut Player, config: &PhysicsConfig, dt_ms: u32) {
    if player.movement.is_accelerating() || player.is_air_dodging() {
        return;
    }

    let dt = f64::from(dt_ms);
    let magnitude =
        (-config.friction_quadratic * player.x_spd.powi(2) + config.friction_constant).abs();

    if player.x_spd > 0.0 {
        player.x_acc -= magnitude;
        if player.x_spd + player.x_acc * dt / 1000.0 <= 0.0 {
            player.x_spd = 0.0;
            player.x_acc = 0.0;
        }
    } else if player.x_spd < 0.0 {
        player.x_acc += magnitude;
        if player.x_spd + player.x_acc * dt / 1000.0 >= 0.0 {
            player.x_spd = 0.0;
            player.x_acc = 0.0;
        }
    }
}
