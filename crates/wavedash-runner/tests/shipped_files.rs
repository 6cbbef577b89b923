use std::path::PathBuf;

use tokio::sync::mpsc;

use wavedash_core::geometry::GeometryProvider;
use wavedash_physics::WavedashSim;
use wavedash_physics::SimEvent;
use wavedash_runner::session::run_session;
use wavedash_runner::{RunnerConfig, SessionSettings};

fn repo_file(relative: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../..");
    path.push(relative);
    path.to_string_lossy().into_owned()
}

fn practice_config() -> RunnerConfig {
    RunnerConfig {
        level_path: Some(repo_file("levels/practice.toml")),
        script_path: Some(repo_file("scripts/wavedash_left.toml")),
        ticks: 120,
        realtime: false,
        spawn_x: 600.0,
        spawn_y: 600.0,
        ..Default::default()
    }
}

#[test]
fn practice_level_loads() {
    let level = practice_config().load_level().unwrap();
    assert_eq!(level.solid_rects().len(), 3);
    assert_eq!(level.light_floors().len(), 2);
}

#[tokio::test]
async fn left_wavedash_script_slides_left() {
    let config = practice_config();
    let level = config.load_level().unwrap();
    let script = config.load_script().unwrap();
    let sim = WavedashSim::new(level, config.physics.clone(), config.spawn_x, config.spawn_y);

    let (_cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (frame_tx, mut frame_rx) = mpsc::unbounded_channel();
    let settings = SessionSettings {
        ticks: config.ticks,
        realtime: config.realtime,
        keys: config.keys.clone(),
    };
    let summary = run_session(sim, script, settings, cmd_rx, frame_tx).await;

    let mut gains = Vec::new();
    while let Some(frame) = frame_rx.recv().await {
        for event in frame.events {
            if let SimEvent::Wavedash { gained_x_speed } = event {
                gains.push(gained_x_speed);
            }
        }
    }

    assert_eq!(summary.wavedashes, 1);
    assert_eq!(gains.len(), 1);
    assert!(gains[0] < -3.5);
    assert!(summary.max_x_speed > 8.0);
    assert!(summary.final_state.player.x < 600.0);
    assert!(summary.final_state.player.grounded);
}
