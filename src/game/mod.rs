//! Game driver: pairs two players over one authoritative board.
//!
//! Each move, the side to play gets a deep copy of the position and a wall
//! clock budget; its answer is validated against the legal move list and
//! pushed onto the authoritative board. The driver detects game end,
//! produces a PGN record, and treats a missing or illegal answer as a
//! forfeit.

use std::time::{Duration, Instant};

use rand::prelude::*;

use crate::board::{san, Board, FenError, Move, Outcome};
use crate::eval::Evaluator;
use crate::search::Engine;

/// Opening positions used to vary self-play games, a few plies into common
/// openings.
pub const OPENING_POOL: [&str; 11] = [
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    "rnbqkb1r/pppp1ppp/5n2/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    "rnbqkbnr/ppp2ppp/8/3pp3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq d6 0 3",
    "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2",
    "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
    "rnbqkbnr/pp1ppppp/2p5/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
    "rnbqkbnr/ppp1pppp/8/3p4/3P4/8/PPP1PPPP/RNBQKBNR w KQkq d6 0 2",
    "rnbqkbnr/pppppp1p/6p1/8/3P4/8/PPP1PPPP/RNBQKBNR w KQkq - 0 2",
    "rnbqkbnr/pppp1ppp/8/4p3/2P5/8/PP1PPPPP/RNBQKBNR w KQkq e6 0 2",
    "rnbqkbnr/pppp1ppp/8/4p3/8/5N2/PPPPPPPP/RNBQKB1R w KQkq e6 0 2",
    "rnbqkbnr/pppp1ppp/4p3/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
];

/// Pick one of the pooled openings.
#[must_use]
pub fn random_opening(rng: &mut StdRng) -> &'static str {
    OPENING_POOL[rng.gen_range(0..OPENING_POOL.len())]
}

/// Something that can pick a move when handed a position and a budget.
pub trait Player {
    /// Pick a move, or `None` to forfeit.
    fn choose_move(&mut self, board: &Board, budget: Duration) -> Option<Move>;

    /// Display name for game records.
    fn name(&self) -> String {
        "engine".to_string()
    }
}

impl<E: Evaluator> Player for Engine<E> {
    fn choose_move(&mut self, board: &Board, budget: Duration) -> Option<Move> {
        Engine::choose_move(self, board, budget).map(|report| report.best_move)
    }

    fn name(&self) -> String {
        "fianchetto".to_string()
    }
}

/// Plays a uniformly random legal move. The weakest possible baseline.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        RandomPlayer {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn choose_move(&mut self, board: &Board, _budget: Duration) -> Option<Move> {
        let mut board = board.clone();
        let moves = board.legal_moves();
        if moves.is_empty() {
            return None;
        }
        Some(moves[self.rng.gen_range(0..moves.len())])
    }

    fn name(&self) -> String {
        "random".to_string()
    }
}

/// The record of one finished game.
#[derive(Clone, Debug)]
pub struct GameRecord {
    /// How the game ended; `None` when the move limit cut it short.
    pub outcome: Option<Outcome>,
    /// Fullmove counter at the end of the game.
    pub fullmove_number: u32,
    /// Wall clock spent on the whole game.
    pub elapsed: Duration,
    /// The game as PGN, headers included.
    pub pgn: String,
}

/// A game between two players.
pub struct Game<W: Player, B: Player> {
    pub white: W,
    pub black: B,
    move_limit: Option<u32>,
}

impl<W: Player, B: Player> Game<W, B> {
    #[must_use]
    pub fn new(white: W, black: B) -> Self {
        Game {
            white,
            black,
            move_limit: None,
        }
    }

    /// Stop an unfinished game once the fullmove counter passes `limit`.
    #[must_use]
    pub fn with_move_limit(mut self, limit: u32) -> Self {
        self.move_limit = Some(limit);
        self
    }

    /// Play out a game from `start_fen` with `budget` per move.
    pub fn play(&mut self, start_fen: &str, budget: Duration) -> Result<GameRecord, FenError> {
        let mut board = Board::try_from_fen(start_fen)?;
        let standard_start = start_fen == Board::new().to_fen();
        let mut movetext: Vec<String> = Vec::new();
        let started = Instant::now();

        let outcome = loop {
            if let Some(outcome) = board.check_game_over() {
                break Some(outcome);
            }
            if let Some(limit) = self.move_limit {
                if board.fullmove_number() > limit {
                    break None;
                }
            }

            let white_to_move = board.white_to_move();
            let reply = if white_to_move {
                self.white.choose_move(&board, budget)
            } else {
                self.black.choose_move(&board, budget)
            };

            let accepted = reply.filter(|&mv| board.legal_moves().contains(mv));
            let mv = match accepted {
                Some(mv) => mv,
                None => {
                    // No answer inside the budget, or an illegal one: the
                    // side to move forfeits.
                    log::warn!(
                        "{} forfeits: {:?} in {}",
                        if white_to_move { "White" } else { "Black" },
                        reply.map(|m| m.to_string()),
                        board.to_fen()
                    );
                    break Some(if white_to_move {
                        Outcome::BlackWin
                    } else {
                        Outcome::WhiteWin
                    });
                }
            };

            if white_to_move {
                movetext.push(format!("{}.", board.fullmove_number()));
            } else if movetext.is_empty() {
                movetext.push(format!("{}...", board.fullmove_number()));
            }
            movetext.push(san(&mut board, mv));
            log::info!("move {} {}", board.fullmove_number(), mv);
            board.push(mv);
        };

        let pgn = render_pgn(
            &self.white.name(),
            &self.black.name(),
            if standard_start { None } else { Some(start_fen) },
            &movetext,
            outcome,
        );

        Ok(GameRecord {
            outcome,
            fullmove_number: board.fullmove_number(),
            elapsed: started.elapsed(),
            pgn,
        })
    }
}

fn render_pgn(
    white: &str,
    black: &str,
    start_fen: Option<&str>,
    movetext: &[String],
    outcome: Option<Outcome>,
) -> String {
    let result = outcome.map_or("*", Outcome::as_pgn);
    let mut pgn = String::new();
    pgn.push_str("[Event \"engine match\"]\n");
    pgn.push_str(&format!("[White \"{white}\"]\n"));
    pgn.push_str(&format!("[Black \"{black}\"]\n"));
    if let Some(fen) = start_fen {
        pgn.push_str("[SetUp \"1\"]\n");
        pgn.push_str(&format!("[FEN \"{fen}\"]\n"));
    }
    pgn.push_str(&format!("[Result \"{result}\"]\n\n"));
    pgn.push_str(&movetext.join(" "));
    if !movetext.is_empty() {
        pgn.push(' ');
    }
    pgn.push_str(result);
    pgn.push('\n');
    pgn
}
