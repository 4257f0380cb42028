use std::io;

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    minnow::uci::run(stdin.lock(), stdout.lock())
}
