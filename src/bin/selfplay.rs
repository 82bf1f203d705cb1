//! Plays a batch of engine-vs-engine games and prints aggregate statistics.
//!
//! Usage: selfplay [games] [seconds-per-move] [move-limit]

use std::time::Duration;

use rand::prelude::*;

use fianchetto::game::{random_opening, Game};
use fianchetto::search::Engine;
use fianchetto::{Outcome, PositionalEvaluator, TacticalEvaluator};

fn main() {
    let mut args = std::env::args().skip(1);
    let games: u32 = args
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let seconds: f64 = args
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0.3);
    let move_limit: u32 = args
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or(200);
    let budget = Duration::from_secs_f64(seconds);

    let mut rng = StdRng::seed_from_u64(games as u64);
    let mut white_score = 0.0f64;
    let mut fullmoves = 0u64;
    let mut elapsed = Duration::ZERO;
    let mut white_nodes = 0u64;
    let mut white_depth = 0u64;

    for game_idx in 0..games {
        let white = Engine::new(TacticalEvaluator::new()).with_seed(u64::from(game_idx));
        let black = Engine::new(PositionalEvaluator::new()).with_seed(u64::from(game_idx));
        let mut game = Game::new(white, black).with_move_limit(move_limit);

        let opening = random_opening(&mut rng);
        let record = game.play(opening, budget).expect("valid opening FEN");

        let score = match record.outcome {
            Some(Outcome::WhiteWin) => 1.0,
            Some(Outcome::BlackWin) => 0.0,
            _ => 0.5,
        };
        white_score += score;
        fullmoves += u64::from(record.fullmove_number);
        elapsed += record.elapsed;
        white_nodes += game.white.total_nodes();
        white_depth += game.white.total_depth();

        println!("game {game_idx}: {score} in {} moves", record.fullmove_number);
    }

    let moves = fullmoves.max(1) as f64;
    println!();
    println!(
        "match result: {white_score} : {}, elapsed: {:.1}s, fullmoves: {fullmoves}, \
         time per move: {:.3}s, nodes per move: {:.0}, average depth: {:.2}",
        f64::from(games) - white_score,
        elapsed.as_secs_f64(),
        elapsed.as_secs_f64() / moves,
        white_nodes as f64 / moves,
        white_depth as f64 / moves,
    );
}
