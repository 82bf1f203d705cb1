//! Searches a single position and prints the chosen move.
//!
//! Usage: solve "<fen>" [seconds]

use std::time::Duration;

use fianchetto::search::Engine;
use fianchetto::{Board, PositionalEvaluator};

fn main() {
    let mut args = std::env::args().skip(1);
    let fen = match args.next() {
        Some(fen) => fen,
        None => {
            eprintln!("usage: solve \"<fen>\" [seconds]");
            std::process::exit(2);
        }
    };
    let seconds: f64 = args
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1.0);

    let board = match Board::try_from_fen(&fen) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("bad FEN: {err}");
            std::process::exit(2);
        }
    };

    let mut engine = Engine::new(PositionalEvaluator::new());
    match engine.choose_move(&board, Duration::from_secs_f64(seconds)) {
        Some(report) => {
            let pv: Vec<String> = report.pv.iter().map(ToString::to_string).collect();
            println!("bestmove {}", report.best_move);
            println!(
                "score {:.3}, depth {}, {} nodes, pv {}",
                report.score,
                report.achieved_depths.last().copied().unwrap_or(0),
                report.nodes,
                pv.join(" ")
            );
        }
        None => println!("no move available"),
    }
}
