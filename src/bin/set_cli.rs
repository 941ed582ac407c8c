//! set-cli - play Set in the terminal.
//!
//! A line-oriented front end: the table is printed as a grid of card ids and
//! commands are read from stdin. All game logic lives in the library; this
//! binary only turns lines into `GameCommands` calls and reports into text.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use clap::Parser;
use set_engine::board::Board;
use set_engine::core::{Card, ContradictionPolicy, GameConfig};
use set_engine::game::{
    GameCommands, GameController, NoSetOutcome, NoSetReport, PickReport, Resolution,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "set-cli")]
#[command(about = "Play the card game Set in the terminal")]
struct Args {
    /// Deck seed (for replaying a deal)
    #[arg(short, long)]
    seed: Option<u64>,

    /// End the game on a wrong "no set" call
    #[arg(long)]
    strict: bool,
}

fn main() -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();
    let mut config = GameConfig::new();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.strict {
        config = config.with_contradiction_policy(ContradictionPolicy::EndGame);
    }

    let mut game = GameController::new(config);
    let mut clock = Clock::start();
    match game.on_start_game() {
        Ok(report) => info!(cards_remaining = report.cards_remaining, "dealt"),
        Err(err) => {
            eprintln!("could not start: {err}");
            return Ok(());
        }
    }

    let stdin = io::stdin();
    let mut out = io::stdout();
    print_table(&mut out, &game, &clock)?;
    print_help(&mut out)?;

    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "" => continue,
            "q" | "quit" => break,
            "h" | "help" => print_help(&mut out)?,
            "n" => match game.on_no_set_declared() {
                Ok(report) => print_no_set(&mut out, &report)?,
                Err(err) => writeln!(out, "{err}")?,
            },
            "r" => match game.on_new_game() {
                Ok(_) => {
                    clock = Clock::start();
                    writeln!(out, "new game")?;
                }
                Err(err) => writeln!(out, "{err}")?,
            },
            other => match other.parse::<u8>() {
                Ok(id) => match game.on_card_picked(id) {
                    Ok(report) => print_pick(&mut out, &report)?,
                    Err(err) => {
                        warn!(%err, "pick rejected");
                        writeln!(out, "{err}")?;
                    }
                },
                Err(_) => writeln!(out, "unknown command: {other}")?,
            },
        }

        if game.is_finished() && !clock.is_stopped() {
            clock.stop();
        }
        print_table(&mut out, &game, &clock)?;
        if game.is_finished() {
            let stats = game.stats();
            writeln!(out, "game over: {} sets in {}", stats.sets_found, clock)?;
            writeln!(out, "r for a new game, q to quit")?;
        }
    }

    Ok(())
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "<id> pick/unpick a card | n no set | r new game | q quit")
}

fn print_table(out: &mut impl Write, game: &GameController, clock: &Clock) -> io::Result<()> {
    write_board(out, game.board(), game.selection().current())?;
    if let Some([a, b, c]) = game.selection().previous() {
        writeln!(out, "previous: {a} {b} {c}")?;
    }
    writeln!(out, "cards left: {}   time: {clock}", game.cards_remaining())
}

fn write_board(out: &mut impl Write, board: &Board, selected: &[Card]) -> io::Result<()> {
    for row in board.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|slot| match slot {
                Some(card) if selected.contains(card) => format!("[{:>2}]", card.id()),
                Some(card) => format!(" {:>2} ", card.id()),
                None => " .. ".to_string(),
            })
            .collect();
        writeln!(out, "{}", cells.join(" "))?;
    }
    Ok(())
}

fn print_pick(out: &mut impl Write, report: &PickReport) -> io::Result<()> {
    match (report.resolution, report.resolved) {
        (Resolution::SetAccepted, Some(triple)) => {
            writeln!(out, "set! {} {} {}", triple[0], triple[1], triple[2])
        }
        (Resolution::NotASet, Some(triple)) => {
            writeln!(out, "not a set: {} {} {}", triple[0], triple[1], triple[2])
        }
        _ => Ok(()),
    }
}

fn print_no_set(out: &mut impl Write, report: &NoSetReport) -> io::Result<()> {
    match &report.outcome {
        NoSetOutcome::Contradiction(triple) => {
            writeln!(out, "there is a set: {} {} {}", triple[0], triple[1], triple[2])
        }
        NoSetOutcome::ExtraCardsDealt(placed) => {
            writeln!(out, "indeed no set; dealt {} more cards", placed.len())
        }
        NoSetOutcome::GameOver => writeln!(out, "indeed no set, and the deck is empty"),
    }
}

/// Game timer; stops when the game ends.
struct Clock {
    started: Instant,
    stopped: Option<Duration>,
}

impl Clock {
    fn start() -> Self {
        Self {
            started: Instant::now(),
            stopped: None,
        }
    }

    fn stop(&mut self) {
        self.stopped = Some(self.started.elapsed());
    }

    fn is_stopped(&self) -> bool {
        self.stopped.is_some()
    }

    fn elapsed(&self) -> Duration {
        self.stopped.unwrap_or_else(|| self.started.elapsed())
    }
}

/// Elapsed time as `m:ss`.
impl std::fmt::Display for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secs = self.elapsed().as_secs();
        write!(f, "{}:{:02}", secs / 60, secs % 60)
    }
}
