//! Game loop thread — runs the engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for
//! ownership. Commands arrive via `mpsc` channel. Snapshots are stored in
//! shared state for synchronous polling and forwarded to an optional
//! subscriber channel (the rendering frontend's feed).

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use deadeye_core::constants::TICK_RATE;
use deadeye_core::state::GameStateSnapshot;
use deadeye_sim::engine::{GameEngine, SimConfig};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the host to use.
pub fn spawn_game_loop(
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    snapshot_tx: Option<mpsc::Sender<GameStateSnapshot>>,
) -> mpsc::Sender<GameLoopCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("deadeye-game-loop".into())
        .spawn(move || {
            run_game_loop(cmd_rx, &latest_snapshot, snapshot_tx);
        })
        .expect("Failed to spawn game loop thread");

    cmd_tx
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    mut snapshot_tx: Option<mpsc::Sender<GameStateSnapshot>>,
) {
    let mut engine = GameEngine::new(SimConfig::default());
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (the engine handles pause semantics internally)
        let snapshot = engine.tick();

        // 3. Forward to the subscriber, dropping the feed if it went away
        if let Some(tx) = &snapshot_tx {
            if tx.send(snapshot.clone()).is_err() {
                log::warn!("snapshot subscriber disconnected");
                snapshot_tx = None;
            }
        }

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind — reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadeye_core::commands::PlayerCommand;
    use deadeye_core::enums::GamePhase;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Player(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Player(PlayerCommand::StartGame)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Player(PlayerCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_pause_resume_via_commands() {
        let mut engine = GameEngine::new(SimConfig::default());

        engine.queue_command(PlayerCommand::StartGame);
        engine.queue_command(PlayerCommand::SelectLevel { level_id: 1 });
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Playing);

        engine.queue_command(PlayerCommand::Pause);
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Paused);
        let paused_tick = snap.time.tick;

        // Tick while paused — time should not advance
        let snap = engine.tick();
        assert_eq!(snap.time.tick, paused_tick);

        engine.queue_command(PlayerCommand::Resume);
        let snap = engine.tick();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert!(snap.time.tick > paused_tick);
    }

    #[test]
    fn test_snapshot_stream_reaches_subscriber() {
        let latest = Arc::new(Mutex::new(None));
        let (snap_tx, snap_rx) = mpsc::channel();
        let cmd_tx = spawn_game_loop(Arc::clone(&latest), Some(snap_tx));

        cmd_tx
            .send(GameLoopCommand::Player(PlayerCommand::StartGame))
            .unwrap();

        // The loop runs in real time; a few snapshots arrive quickly.
        let snapshot = snap_rx
            .recv_timeout(Duration::from_secs(2))
            .expect("snapshot should arrive");
        assert!(snapshot.level_count > 0);

        cmd_tx.send(GameLoopCommand::Shutdown).unwrap();
        // After shutdown the sender side closes.
        while snap_rx.recv_timeout(Duration::from_millis(500)).is_ok() {}
        assert!(latest.lock().unwrap().is_some());
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
