//! Headless DEADEYE host.
//!
//! Bridges a frontend process over stdio: one JSON `PlayerCommand` per
//! stdin line in, one JSON `GameStateSnapshot` per tick out on stdout.

use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use deadeye_core::commands::PlayerCommand;
use deadeye_app::game_loop::spawn_game_loop;
use deadeye_app::state::GameLoopCommand;

fn main() {
    env_logger::init();

    let latest_snapshot = Arc::new(Mutex::new(None));
    let (snapshot_tx, snapshot_rx) = mpsc::channel();
    let command_tx = spawn_game_loop(Arc::clone(&latest_snapshot), Some(snapshot_tx));

    // Writer thread: one JSON snapshot per line.
    let writer = std::thread::spawn(move || {
        let stdout = io::stdout();
        for snapshot in snapshot_rx {
            let mut out = stdout.lock();
            if serde_json::to_writer(&mut out, &snapshot).is_err() {
                break;
            }
            if out.write_all(b"\n").is_err() {
                break;
            }
        }
    });

    // Reader: parse commands until stdin closes.
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<PlayerCommand>(line) {
            Ok(command) => {
                if command_tx.send(GameLoopCommand::Player(command)).is_err() {
                    break;
                }
            }
            Err(err) => log::warn!("ignoring malformed command: {err}"),
        }
    }

    let _ = command_tx.send(GameLoopCommand::Shutdown);
    let _ = writer.join();
}
