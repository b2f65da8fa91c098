//! Reversi MCTS agent: reads the opponent's moves on stdin, writes its own on stdout

use reversi_mcts::logging::setup_logging;
use reversi_mcts::protocol::{GameConfig, GameLoop};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let _logger = match setup_logging() {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("logging disabled: {}", e);
            None
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut game = GameLoop::new(GameConfig::default());
    match game.run(stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
