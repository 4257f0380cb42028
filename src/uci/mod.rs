//! Universal Chess Interface front-end.
//!
//! A line-oriented loop over an injected reader and writer; the engine
//! core performs no I/O of its own. Only the small command subset a
//! minimal engine needs is consumed; everything else is ignored, and
//! malformed `position` input is handled leniently: a bad FEN keeps the
//! previous position, an unmatched move token is skipped.

pub mod command;
pub mod time;

use std::fmt;
use std::io::{BufRead, Write};

use log::{debug, warn};

use crate::board::{Board, FenError};
use crate::search::{
    think_depth, think_time, Clock, IterationInfo, MonotonicClock, SearchReporter,
};

use command::{parse_go_params, parse_uci_command, GoParams, UciCommand};

const ENGINE_NAME: &str = concat!("Minnow ", env!("CARGO_PKG_VERSION"));
const ENGINE_AUTHOR: &str = "the Minnow authors";

/// Error type for structurally broken `position` commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciError {
    /// The FEN payload did not parse
    InvalidFen(FenError),
    /// The command is missing its position source
    MissingPosition,
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "invalid FEN: {e}"),
            UciError::MissingPosition => {
                write!(f, "position command needs 'startpos' or 'fen'")
            }
        }
    }
}

impl std::error::Error for UciError {}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

/// Apply a `position` command to the board.
///
/// On a structural error the board is left untouched. Move tokens that do
/// not match a legal move are logged and skipped; the remaining tokens are
/// still applied.
pub fn apply_position(board: &mut Board, parts: &[&str]) -> Result<(), UciError> {
    let mut i = 1;
    let new_board = match parts.get(i) {
        Some(&"startpos") => {
            i += 1;
            Board::new()
        }
        Some(&"fen") => {
            i += 1;
            let fen_end = parts[i..]
                .iter()
                .position(|p| *p == "moves")
                .map_or(parts.len(), |offset| i + offset);
            let fen = parts[i..fen_end].join(" ");
            i = fen_end;
            Board::try_from_fen(&fen)?
        }
        _ => return Err(UciError::MissingPosition),
    };
    *board = new_board;

    if parts.get(i) == Some(&"moves") {
        for token in &parts[i + 1..] {
            match board.find_move(token) {
                Ok(mv) => {
                    if board.try_make(mv).is_none() {
                        warn!("generated move {mv} was not legal; skipping");
                    }
                }
                Err(e) => warn!("ignoring move token '{token}': {e}"),
            }
        }
    }
    Ok(())
}

/// Prints `info` lines for completed deepening iterations.
struct UciReporter<'a, W: Write> {
    out: &'a mut W,
}

impl<W: Write> SearchReporter for UciReporter<'_, W> {
    fn iteration(&mut self, info: &IterationInfo) {
        let pv = info
            .best_move
            .map_or_else(|| "0000".to_string(), |mv| mv.to_string());
        let _ = writeln!(
            self.out,
            "info depth {} score cp {} nodes {} time {} pv {}",
            info.depth, info.score, info.nodes, info.elapsed_ms, pv
        );
    }
}

/// Run a `go` command and answer with `bestmove`.
fn handle_go<W: Write>(board: &mut Board, parts: &[&str], out: &mut W) -> std::io::Result<()> {
    let params: GoParams = parse_go_params(parts);
    let clock = MonotonicClock::new();

    let result = {
        let mut reporter = UciReporter { out: &mut *out };
        if let Some(depth) = params.depth {
            think_depth(board, &clock, depth, &mut reporter)
        } else {
            let budget = params
                .movetime
                .unwrap_or_else(|| time::move_time_ms(&params, board.side_to_move()));
            think_time(board, &clock, budget, &mut reporter)
        }
    };

    match result.best_move {
        Some(mv) => writeln!(out, "bestmove {mv}"),
        None => writeln!(out, "bestmove 0000"),
    }
}

/// Drive the engine over a line-oriented channel until `quit` or EOF.
pub fn run<R: BufRead, W: Write>(input: R, mut output: W) -> std::io::Result<()> {
    let mut board = Board::new();

    for line in input.lines() {
        let line = line?;
        let Some(cmd) = parse_uci_command(&line) else {
            continue;
        };

        match cmd {
            UciCommand::Uci => {
                writeln!(output, "id name {ENGINE_NAME}")?;
                writeln!(output, "id author {ENGINE_AUTHOR}")?;
                writeln!(output, "uciok")?;
            }
            UciCommand::IsReady => writeln!(output, "readyok")?,
            UciCommand::UciNewGame => board = Board::new(),
            UciCommand::Position(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                if let Err(e) = apply_position(&mut board, &parts) {
                    warn!("position command rejected: {e}");
                }
            }
            UciCommand::Go(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                handle_go(&mut board, &parts, &mut output)?;
            }
            UciCommand::Perft(depth) => {
                let clock = MonotonicClock::new();
                let start = clock.now_ms();
                let nodes = board.perft(depth);
                writeln!(
                    output,
                    "perft {depth}: {nodes} nodes in {} ms",
                    clock.now_ms() - start
                )?;
            }
            UciCommand::Quit => break,
            UciCommand::Unknown(cmd) => debug!("ignoring unknown command '{cmd}'"),
        }
        output.flush()?;
    }
    Ok(())
}
