//! UCI command parsing.

/// Commands the engine consumes from the GUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    /// The raw whitespace-split tokens of a `position` line.
    Position(Vec<String>),
    /// The raw whitespace-split tokens of a `go` line.
    Go(Vec<String>),
    /// Debug helper: count leaf nodes at the given depth.
    Perft(usize),
    Quit,
    Unknown(String),
}

/// Parsed arguments of a `go` command. Absent fields stay `None`.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u32>,
    pub movetime: Option<u64>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub movestogo: Option<u64>,
}

/// Parse the value following a keyword, if it parses as `T`.
#[inline]
fn parse_next<T: std::str::FromStr>(parts: &[&str], i: usize) -> Option<T> {
    parts.get(i + 1).and_then(|v| v.parse::<T>().ok())
}

/// Parse the tail of a `go` line. Unknown tokens are skipped, per the
/// protocol's "ignore what you do not understand" rule.
#[must_use]
pub fn parse_go_params(parts: &[&str]) -> GoParams {
    let mut params = GoParams::default();
    let mut i = 1;
    while i < parts.len() {
        let consumed = match parts[i] {
            "depth" => {
                params.depth = parse_next(parts, i);
                2
            }
            "movetime" => {
                params.movetime = parse_next(parts, i);
                2
            }
            "wtime" => {
                params.wtime = parse_next(parts, i);
                2
            }
            "btime" => {
                params.btime = parse_next(parts, i);
                2
            }
            "movestogo" => {
                params.movestogo = parse_next(parts, i);
                2
            }
            _ => 1,
        };
        i += consumed;
    }
    params
}

/// Classify one input line. Returns `None` for blank lines.
#[must_use]
pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let trimmed = line.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let first = parts.first()?;

    let owned_parts = || parts.iter().map(|p| (*p).to_string()).collect::<Vec<_>>();

    let cmd = match *first {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(owned_parts()),
        "go" => UciCommand::Go(owned_parts()),
        "perft" => {
            let depth = parts
                .get(1)
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(1);
            UciCommand::Perft(depth)
        }
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(trimmed.to_string()),
    };
    Some(cmd)
}
