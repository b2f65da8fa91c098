use log::{debug, info, warn};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::core::board::{Board, Color};
use crate::core::moves::Location;
use crate::engine::search::{Clock, SearchConfig, Searcher, SystemClock};
use crate::engine::time::{TimeControl, TimeManager};
use crate::error::GameError;

/// First token telling the engine to open the game
pub const START_TOKEN: &str = "Start";

#[derive(Clone, Debug, Default)]
pub struct GameConfig {
    pub search: SearchConfig,
    pub time: TimeControl,
}

/// One game against one opponent.
///
/// `begin` and `respond` form the turn-by-turn API; `run` wires them to a
/// reader and writer.
pub struct GameLoop<C: Clock = SystemClock> {
    searcher: Searcher<C>,
    time: TimeManager,
    engine_color: Option<Color>,
}

impl GameLoop<SystemClock> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> GameLoop<C> {
    pub fn with_clock(config: GameConfig, clock: C) -> Self {
        GameLoop {
            searcher: Searcher::with_clock(Board::initial(), Color::White, config.search, clock),
            time: TimeManager::new(config.time),
            engine_color: None,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        self.searcher.root_state()
    }

    #[inline]
    pub fn engine_color(&self) -> Option<Color> {
        self.engine_color
    }

    #[inline]
    pub fn searcher(&self) -> &Searcher<C> {
        &self.searcher
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.board().is_terminal()
    }

    /// Handle the first token of the game.
    ///
    /// `Start` makes the engine open as White; any other token is the
    /// opponent's opening move and the engine plays Black. Returns the
    /// engine's reply.
    pub fn begin(&mut self, first: &str) -> Result<Option<Location>, GameError> {
        if first == START_TOKEN {
            self.start_as(Color::White);
            return self.engine_turn();
        }
        let opening = Location::from_token(first)?;
        self.start_as(Color::Black);
        self.respond_to(opening)
    }

    /// Apply the opponent's move and return the engine's reply, or `None`
    /// once the board is full.
    pub fn respond(&mut self, token: &str) -> Result<Option<Location>, GameError> {
        if self.engine_color.is_none() {
            return self.begin(token);
        }
        let mv = Location::from_token(token)?;
        self.respond_to(mv)
    }

    fn start_as(&mut self, color: Color) {
        info!("new game, engine plays {}", color);
        self.engine_color = Some(color);
        self.searcher.reset(Board::initial(), color);
    }

    fn respond_to(&mut self, mv: Location) -> Result<Option<Location>, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        self.searcher.advance(mv)?;
        debug!("opponent played {}\n{}", mv, self.board().render_with_hints());
        self.engine_turn()
    }

    fn engine_turn(&mut self) -> Result<Option<Location>, GameError> {
        if self.is_over() {
            return Ok(None);
        }

        let budget = self.time.allocate(self.board());
        let started = self.searcher.clock().now();
        self.searcher.run(started + budget);
        let mv = self.searcher.best_move().ok_or(GameError::GameOver)?;
        let spent = self.searcher.clock().now().saturating_duration_since(started);
        self.time.record(spent);

        self.searcher.advance(mv)?;
        info!(
            "ply {}: engine plays {} after {} iterations ({} ms of {} ms)",
            self.board().move_count(),
            mv,
            self.searcher.stats().iterations,
            spent.as_millis(),
            budget.as_millis()
        );
        debug!("\n{}", self.board().render_with_hints());
        Ok(Some(mv))
    }

    /// Play one game over `input`/`output` until the board is full.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<(), GameError> {
        let mut tokens = Tokens::new(input);
        let first = tokens.next_token()?.ok_or(GameError::UnexpectedEof)?;
        let mut reply = self.begin(&first)?;

        loop {
            if let Some(mv) = reply {
                writeln!(output, "{}", mv)?;
                output.flush()?;
            }
            if self.is_over() {
                break;
            }
            let Some(token) = tokens.next_token()? else {
                warn!("input closed at ply {}", self.board().move_count());
                return Err(GameError::UnexpectedEof);
            };
            reply = self.respond(&token)?;
        }

        let board = self.board();
        info!(
            "game over: black {} white {}, winner {}",
            board.stone_count(Color::Black),
            board.stone_count(Color::White),
            board
                .winner()
                .map_or_else(|| "none".to_string(), |c| c.to_string())
        );
        Ok(())
    }
}

/// Whitespace separated tokens from a line reader
struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Tokens {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}
