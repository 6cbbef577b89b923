use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use wavedash_core::geometry::GeometryProvider;
use wavedash_core::input::{KeyBindings, KeyTracker, KeyTransition};
use wavedash_physics::{SimEvent, SimSnapshot, WavedashSim};

use crate::script::{InputScript, ScriptCursor};

/// Commands sent into a running session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShellCommand {
    /// A raw key event, as a keyboard would deliver it (repeats included).
    Key {
        key: char,
        transition: KeyTransition,
    },
    Stop,
}

/// What a render shell receives after every tick.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub snapshot: SimSnapshot,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub ticks: u64,
    pub realtime: bool,
    pub keys: KeyBindings,
}

/// End-of-session report printed by the runner.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub ticks_run: u64,
    pub stopped_early: bool,
    pub jumps: u32,
    pub air_dodges: u32,
    pub wavedashes: u32,
    pub total_wavedash_gain: f64,
    pub landings: u32,
    pub wall_hits: u32,
    pub head_bumps: u32,
    pub max_x_speed: f64,
    pub final_state: SimSnapshot,
}

/// Handle to a spawned session task.
pub struct SessionHandle {
    pub cmd_tx: mpsc::UnboundedSender<ShellCommand>,
    pub frame_rx: mpsc::UnboundedReceiver<Frame>,
    pub task: JoinHandle<SessionSummary>,
}

/// Spawn the session loop as a tokio task.
pub fn spawn_session<G>(
    sim: WavedashSim<G>,
    script: InputScript,
    settings: SessionSettings,
) -> SessionHandle
where
    G: GeometryProvider + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (frame_tx, frame_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run_session(sim, script, settings, cmd_rx, frame_tx));
    SessionHandle {
        cmd_tx,
        frame_rx,
        task,
    }
}

/// Drive `sim` for `settings.ticks` ticks, feeding it scripted and live key
/// events. Realtime sessions tick every `tick_ms`; otherwise ticks run back
/// to back, yielding between them. Frames are dropped if nobody listens.
pub async fn run_session<G: GeometryProvider>(
    sim: WavedashSim<G>,
    script: InputScript,
    settings: SessionSettings,
    mut cmd_rx: mpsc::UnboundedReceiver<ShellCommand>,
    frame_tx: mpsc::UnboundedSender<Frame>,
) -> SessionSummary {
    let tick_interval = Duration::from_millis(u64::from(sim.config().tick_ms.max(1)));
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!(
        ticks = settings.ticks,
        realtime = settings.realtime,
        scripted_events = script.events().len(),
        "session started"
    );

    let mut session = Session::new(sim, settings.keys.clone());
    let mut cursor = ScriptCursor::new(&script);
    let mut shell_open = true;
    let mut stopped_early = false;

    'ticks: while session.sim.tick_count() < settings.ticks {
        if settings.realtime {
            loop {
                tokio::select! {
                    biased;
                    cmd = cmd_rx.recv(), if shell_open => match cmd {
                        Some(ShellCommand::Stop) => {
                            stopped_early = true;
                            break 'ticks;
                        },
                        Some(cmd) => session.on_shell_command(cmd),
                        None => shell_open = false,
                    },
                    _ = interval.tick() => break,
                }
            }
        } else {
            while shell_open {
                match cmd_rx.try_recv() {
                    Ok(ShellCommand::Stop) => {
                        stopped_early = true;
                        break 'ticks;
                    },
                    Ok(cmd) => session.on_shell_command(cmd),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => shell_open = false,
                }
            }
            tokio::task::yield_now().await;
        }

        let tick = session.sim.tick_count();
        for scripted in cursor.due(tick) {
            session.on_key(scripted.key, scripted.transition);
        }
        let frame = session.tick();
        // Listener may have gone away.
        let _ = frame_tx.send(frame);
    }

    let summary = session.finish(stopped_early);
    tracing::info!(
        ticks_run = summary.ticks_run,
        stopped_early,
        wavedashes = summary.wavedashes,
        max_x_speed = summary.max_x_speed,
        "session ended"
    );
    summary
}

/// Session state owned by the loop task.
struct Session<G> {
    sim: WavedashSim<G>,
    keys: KeyBindings,
    tracker: KeyTracker,
    stats: Stats,
}

#[derive(Debug, Default)]
struct Stats {
    jumps: u32,
    air_dodges: u32,
    wavedashes: u32,
    total_wavedash_gain: f64,
    landings: u32,
    wall_hits: u32,
    head_bumps: u32,
    max_x_speed: f64,
}

impl Stats {
    fn record(&mut self, events: &[SimEvent], x_spd: f64) {
        for event in events {
            match event {
                SimEvent::Jumped => self.jumps += 1,
                SimEvent::AirDodgeStarted { .. } => self.air_dodges += 1,
                SimEvent::Wavedash { gained_x_speed } => {
                    self.wavedashes += 1;
                    self.total_wavedash_gain += gained_x_speed.abs();
                },
                SimEvent::Landed => self.landings += 1,
                SimEvent::WallHit => self.wall_hits += 1,
                SimEvent::HeadBump => self.head_bumps += 1,
                SimEvent::AirDodgeEnded => {},
            }
        }
        self.max_x_speed = self.max_x_speed.max(x_spd.abs());
    }
}

impl<G: GeometryProvider> Session<G> {
    fn new(sim: WavedashSim<G>, keys: KeyBindings) -> Self {
        Self {
            sim,
            keys,
            tracker: KeyTracker::new(),
            stats: Stats::default(),
        }
    }

    fn on_shell_command(&mut self, cmd: ShellCommand) {
        if let ShellCommand::Key { key, transition } = cmd {
            self.on_key(key, transition);
        }
    }

    fn on_key(&mut self, key: char, transition: KeyTransition) {
        if let Some(command) = self.tracker.on_key(&self.keys, key, transition) {
            self.sim.queue(command);
        }
    }

    fn tick(&mut self) -> Frame {
        let events = self.sim.tick();
        let player = self.sim.player();
        self.stats.record(&events, player.x_spd);

        if !events.is_empty() {
            tracing::debug!(
                tick = self.sim.tick_count(),
                ?events,
                x = player.x,
                y = player.y,
                x_spd = player.x_spd,
                "tick events"
            );
        }

        Frame {
            snapshot: self.sim.snapshot(),
            events,
        }
    }

    fn finish(self, stopped_early: bool) -> SessionSummary {
        let stats = self.stats;
        SessionSummary {
            ticks_run: self.sim.tick_count(),
            stopped_early,
            jumps: stats.jumps,
            air_dodges: stats.air_dodges,
            wavedashes: stats.wavedashes,
            total_wavedash_gain: stats.total_wavedash_gain,
            landings: stats.landings,
            wall_hits: stats.wall_hits,
            head_bumps: stats.head_bumps,
            max_x_speed: stats.max_x_speed,
            final_state: self.sim.snapshot(),
        }
    }
}
