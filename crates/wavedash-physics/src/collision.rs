use wavedash_core::geometry::{GeometryProvider, LightFloor, Rect};

use crate::config::PhysicsConfig;
use crate::player::{Edges, Player};

/// Contacts resolved during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contacts {
    /// Snapped onto a rect top or light floor this tick.
    pub landed: bool,
    /// Stopped by a rect's underside.
    pub head_bump: bool,
    /// Stopped by a rect's side.
    pub wall_hit: bool,
    /// Horizontal speed gained from landings made while air-dodging.
    pub wavedash_gain: Option<f64>,
}

/// Resolve the player against every solid rect, then every light floor, in
/// list order. Each check reads the position left by the previous one, so
/// overlapping colliders resolve order-dependently.
///
/// `prev` holds the player's edges from the start of the tick and decides
/// which side a collider was approached from. Resets and re-derives
/// `player.grounded`.
pub fn resolve_collisions(
    player: &mut Player,
    geometry: &impl GeometryProvider,
    config: &PhysicsConfig,
    prev: Edges,
) -> Contacts {
    let mut contacts = Contacts::default();
    player.grounded = false;

    for rect in geometry.solid_rects() {
        resolve_rect(player, rect, config, prev, &mut contacts);
    }
    for floor in geometry.light_floors() {
        resolve_light_floor(player, floor, config, prev, &mut contacts);
    }

    contacts
}

fn resolve_rect(
    player: &mut Player,
    rect: &Rect,
    config: &PhysicsConfig,
    prev: Edges,
    contacts: &mut Contacts,
) {
    let length = f64::from(player.length);

    // Overlap on the other axis decides whether a side or top/bottom hit is
    // even possible.
    let can_hit_wall = !(player.top_y() > rect.bottom() || player.bottom_y() < rect.y);
    let can_hit_floor = !(player.right_x() < rect.x || player.left_x() > rect.right());

    let wall_reach = (length + f64::from(rect.width)) / 2.0 + 1.0;
    if can_hit_wall && (rect.center_x() - player.center_x()).abs() < wall_reach {
        if prev.right < rect.x {
            player.x = f64::from(rect.x - player.length - 1);
            stop_horizontal(player);
            contacts.wall_hit = true;
        } else if prev.left > rect.right() {
            player.x = f64::from(rect.right() + 1);
            stop_horizontal(player);
            contacts.wall_hit = true;
        }
        // Already overlapping at tick start: no side to push out of.
    }

    let floor_reach = (length + f64::from(rect.height)) / 2.0 + 1.0;
    if can_hit_floor && (rect.center_y() - player.center_y()).abs() < floor_reach {
        if prev.top > rect.bottom() {
            player.y = f64::from(rect.bottom() + 1);
            player.y_spd = 0.0;
            contacts.head_bump = true;
        } else if prev.bottom <= rect.y {
            player.y = f64::from(rect.y - player.length - 1);
            land(player, config, contacts);
        }
    }

    if can_hit_floor && player.bottom_y() + 1 == rect.y {
        player.grounded = true;
    }
}

fn resolve_light_floor(
    player: &mut Player,
    floor: &LightFloor,
    config: &PhysicsConfig,
    prev: Edges,
    contacts: &mut Contacts,
) {
    if player.right_x() < floor.left || player.left_x() > floor.right {
        return;
    }

    if player.bottom_y() >= floor.top && prev.bottom < floor.top {
        player.y = f64::from(floor.top - player.length - 1);
        land(player, config, contacts);
    }

    if player.bottom_y() + 1 == floor.top {
        player.grounded = true;
    }
}

fn stop_horizontal(player: &mut Player) {
    player.x_spd = 0.0;
    player.x_acc = 0.0;
}

/// Kill vertical speed on touchdown. Mid-dodge, first convert it into
/// horizontal speed in the direction of travel (the wavedash). A stationary
/// player is pushed left.
fn land(player: &mut Player, config: &PhysicsConfig, contacts: &mut Contacts) {
    if player.is_air_dodging() {
        let boost = if player.x_spd > 0.0 {
            config.wavedash_factor * player.y_spd
        } else {
            -config.wavedash_factor * player.y_spd
        };
        player.x_spd += boost;
        *contacts.wavedash_gain.get_or_insert(0.0) += boost;

        if config.cancel_dodge_on_land {
            player.air_dodge = None;
            player.y_acc = config.gravity;
        }
    }
    player.y_spd = 0.0;
    contacts.landed = true;
}
