pub mod collision;
pub mod config;
pub mod level;
pub mod physics;
pub mod player;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use wavedash_core::geometry::{GeometryProvider, Level};
use wavedash_core::input::Command;

use config::PhysicsConfig;
use physics::{TickReport, advance};
use player::{Player, RenderRect};

/// Notable things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    Jumped,
    AirDodgeStarted { x_spd: f64, y_spd: f64 },
    AirDodgeEnded,
    /// Grounded this tick after being airborne last tick.
    Landed,
    Wavedash { gained_x_speed: f64 },
    WallHit,
    HeadBump,
}

/// Point-in-time view of the simulation for logging or the render shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSnapshot {
    pub tick: u64,
    pub player: Player,
    pub render: RenderRect,
}

/// Apply one input command to the player. Returns the event it triggered, if
/// the command changed anything beyond held-key state.
pub fn apply_command(
    player: &mut Player,
    command: Command,
    config: &PhysicsConfig,
) -> Option<SimEvent> {
    match command {
        Command::StartMoveRight => player.move_right(),
        Command::StopMoveRight => player.stop_moving_right(),
        Command::StartMoveLeft => player.move_left(),
        Command::StopMoveLeft => player.stop_moving_left(),
        Command::Jump { speed } => {
            if player.jump(speed) {
                return Some(SimEvent::Jumped);
            }
            tracing::warn!(grounded = player.grounded, "jump ignored");
        },
        Command::AirDodge => {
            if player.air_dodge(config) {
                return Some(SimEvent::AirDodgeStarted {
                    x_spd: player.x_spd,
                    y_spd: player.y_spd,
                });
            }
            tracing::warn!("air dodge ignored while grounded");
        },
    }
    None
}

/// Pure step: apply `commands` in order, then advance one tick.
pub fn step(
    mut player: Player,
    commands: &[Command],
    geometry: &impl GeometryProvider,
    config: &PhysicsConfig,
) -> (Player, TickReport) {
    for &command in commands {
        apply_command(&mut player, command, config);
    }
    let report = advance(&mut player, geometry, config, config.tick_ms);
    (player, report)
}

/// A single-player session: geometry, the player, and the commands waiting
/// for the next tick.
pub struct WavedashSim<G = Level> {
    geometry: G,
    player: Player,
    config: PhysicsConfig,
    pending: VecDeque<Command>,
    tick: u64,
}

impl<G: GeometryProvider> WavedashSim<G> {
    pub fn new(geometry: G, config: PhysicsConfig, spawn_x: f64, spawn_y: f64) -> Self {
        let player = Player::new(spawn_x, spawn_y, &config);
        tracing::info!(spawn_x, spawn_y, tick_ms = config.tick_ms, "session created");
        Self {
            geometry,
            player,
            config,
            pending: VecDeque::new(),
            tick: 0,
        }
    }

    /// Queue a command; it takes effect at the start of the next tick.
    pub fn queue(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    /// Drain pending commands, then advance one fixed step.
    pub fn tick(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        while let Some(command) = self.pending.pop_front() {
            tracing::debug!(tick = self.tick, ?command, "applying command");
            events.extend(apply_command(&mut self.player, command, &self.config));
        }

        let was_grounded = self.player.grounded;
        let was_dodging = self.player.is_air_dodging();
        let report = advance(
            &mut self.player,
            &self.geometry,
            &self.config,
            self.config.tick_ms,
        );
        self.tick += 1;

        let contacts = &report.contacts;
        if contacts.wall_hit {
            events.push(SimEvent::WallHit);
        }
        if contacts.head_bump {
            events.push(SimEvent::HeadBump);
        }
        if let Some(gained_x_speed) = contacts.wavedash_gain {
            tracing::debug!(tick = self.tick, gained_x_speed, "wavedash");
            events.push(SimEvent::Wavedash { gained_x_speed });
        }
        if was_dodging && !self.player.is_air_dodging() {
            events.push(SimEvent::AirDodgeEnded);
        }
        if self.player.grounded && !was_grounded {
            events.push(SimEvent::Landed);
        }

        tracing::trace!(
            tick = self.tick,
            x = self.player.x,
            y = self.player.y,
            x_spd = self.player.x_spd,
            y_spd = self.player.y_spd,
            grounded = self.player.grounded,
            "tick"
        );
        events
    }

    /// Run `n` ticks, collecting every event.
    pub fn run_ticks(&mut self, n: usize) -> Vec<SimEvent> {
        let mut all = Vec::new();
        for _ in 0..n {
            all.extend(self.tick());
        }
        all
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            tick: self.tick,
            player: self.player.clone(),
            render: self.player.render_rect(),
        }
    }
}
