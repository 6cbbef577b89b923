use std::path::Path;

use tracing_subscriber::EnvFilter;

use wavedash_physics::WavedashSim;
use wavedash_runner::{RunnerConfig, RunnerError, SessionSettings, ShellCommand, spawn_session};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        tracing::error!("wavedash runner failed: {e}");
        std::process::exit(1);
    }
}

fn arg_value(prefix: &str) -> Option<String> {
    std::env::args()
        .skip(1)
        .find_map(|a| a.strip_prefix(prefix).map(String::from))
}

async fn run() -> Result<(), RunnerError> {
    let mut config = match arg_value("--config=") {
        Some(path) => RunnerConfig::load_from(Path::new(&path))?,
        None => RunnerConfig::load(),
    };
    if let Some(ticks) = arg_value("--ticks=").and_then(|t| t.parse::<u64>().ok()) {
        config.ticks = ticks;
    }
    if let Some(path) = arg_value("--level=") {
        config.level_path = Some(path);
    }
    if let Some(path) = arg_value("--script=") {
        config.script_path = Some(path);
    }
    if std::env::args().any(|a| a == "--fast") {
        config.realtime = false;
    }

    let level = config.load_level()?;
    let script = config.load_script()?;
    let sim = WavedashSim::new(level, config.physics.clone(), config.spawn_x, config.spawn_y);

    let mut handle = spawn_session(
        sim,
        script,
        SessionSettings {
            ticks: config.ticks,
            realtime: config.realtime,
            keys: config.keys.clone(),
        },
    );

    let stop_tx = handle.cmd_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, stopping session");
            let _ = stop_tx.send(ShellCommand::Stop);
        }
    });

    // Headless render shell: log what a window would draw.
    while let Some(frame) = handle.frame_rx.recv().await {
        let render = &frame.snapshot.render;
        tracing::trace!(
            tick = frame.snapshot.tick,
            x = render.x,
            y = render.y,
            size = render.size,
            "draw player"
        );
        if !frame.events.is_empty() {
            tracing::info!(tick = frame.snapshot.tick, events = ?frame.events, "sim events");
        }
    }

    let summary = handle.task.await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
