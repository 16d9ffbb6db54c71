//! Card Match - Main Binary
//!
//! Text front end for the card-match engine: play interactively on stdin or
//! apply a scripted list of selections.

use card_match::{
    core::CardId,
    game::{ActionOutcome, GameLogger, InitialLayout, OutputFormat, Session, VerbosityLevel},
    Result,
};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "cardmatch")]
#[command(about = "Card Match - two-zone card-matching solitaire", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(Args)]
struct GameOptions {
    /// Layout file (JSON array of {rank, suit, zone, position})
    #[arg(long, value_name = "LAYOUT_FILE", conflicts_with = "deal")]
    layout: Option<PathBuf>,

    /// Deal a random layout from this seed instead of the fixed demo layout
    #[arg(long, value_name = "SEED")]
    deal: Option<u64>,

    /// Playfield cards to deal with --deal
    #[arg(long, default_value_t = 6)]
    playfield: usize,

    /// Stack cards to deal with --deal
    #[arg(long, default_value_t = 3)]
    stack: usize,

    /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, default_value = "normal", short = 'v')]
    verbosity: VerbosityArg,

    /// Emit log lines and board output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively, reading commands from stdin
    Play {
        #[command(flatten)]
        options: GameOptions,
    },

    /// Apply a scripted list of commands and print the final board
    Run {
        #[command(flatten)]
        options: GameOptions,

        /// Commands to apply in order (card ids, "u" for undo)
        #[arg(value_name = "COMMANDS")]
        commands: Vec<String>,
    },
}

/// One line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Select(CardId),
    Undo,
    Show,
    Json,
    Help,
    Quit,
}

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let head = parts.next().ok_or_else(|| "empty command".to_string())?;
        let parse_id = |raw: &str| {
            raw.parse::<u32>()
                .map(CardId::new)
                .map_err(|_| format!("invalid card id '{raw}'"))
        };

        match head.to_lowercase().as_str() {
            "u" | "undo" => Ok(Command::Undo),
            "s" | "show" => Ok(Command::Show),
            "json" => Ok(Command::Json),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            "select" | "sel" => {
                let raw = parts.next().ok_or_else(|| "select needs a card id".to_string())?;
                parse_id(raw).map(Command::Select)
            }
            other => parse_id(other).map(Command::Select),
        }
    }
}

const HELP: &str = "Commands: <id> | select <id>, u/undo, s/show, json, h/help, q/quit";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { options } => run_play(options)?,
        Commands::Run { options, commands } => run_script(options, commands)?,
    }

    Ok(())
}

fn build_session(options: &GameOptions) -> Result<Session> {
    let layout = match (&options.layout, options.deal) {
        (Some(path), _) => InitialLayout::load(path)?,
        (None, Some(seed)) => InitialLayout::deal(seed, options.playfield, options.stack)?,
        (None, None) => InitialLayout::fixture(),
    };

    let mut logger = GameLogger::with_verbosity(options.verbosity.into());
    if options.json {
        logger.set_output_format(OutputFormat::Json);
    }

    let mut session = Session::with_logger(logger);
    session.start_new_game(&layout);
    Ok(session)
}

fn print_board(session: &Session, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&session.board_view())?);
    } else {
        print!("{}", session.render_text());
    }
    Ok(())
}

fn describe(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Matched { card, discarded } => {
            format!("matched {card}, discarded {discarded}")
        }
        ActionOutcome::Promoted { card, from_index } => {
            format!("promoted {card} from index {from_index}")
        }
        ActionOutcome::Rejected(reason) => format!("rejected: {reason}"),
    }
}

/// Apply one command. Returns false when the session should end.
fn apply(session: &mut Session, command: Command, options: &GameOptions) -> Result<bool> {
    match command {
        Command::Select(card_id) => {
            let outcome = session.on_card_selected(card_id);
            if !options.json {
                println!("{}", describe(&outcome));
            }
        }
        Command::Undo => {
            if !session.on_undo_requested() && !options.json {
                println!("nothing to undo");
            }
        }
        Command::Show => print_board(session, options.json)?,
        Command::Json => print_board(session, true)?,
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(false),
    }

    if VerbosityLevel::from(options.verbosity) >= VerbosityLevel::Verbose {
        if let Err(err) = session.check_invariants() {
            eprintln!("{err}");
        }
    }
    Ok(true)
}

fn run_play(options: GameOptions) -> Result<()> {
    let mut session = build_session(&options)?;
    print_board(&session, options.json)?;
    if !options.json {
        println!("{HELP}");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match line.trim().parse::<Command>() {
            Ok(command) => {
                let is_selection = matches!(command, Command::Select(_) | Command::Undo);
                if !apply(&mut session, command, &options)? {
                    break;
                }
                if is_selection {
                    print_board(&session, options.json)?;
                }
            }
            Err(err) => println!("{err} ({HELP})"),
        }
    }

    Ok(())
}

fn run_script(options: GameOptions, commands: Vec<String>) -> Result<()> {
    let mut session = build_session(&options)?;

    for raw in &commands {
        match raw.parse::<Command>() {
            Ok(command) => {
                if !apply(&mut session, command, &options)? {
                    break;
                }
            }
            Err(err) => eprintln!("skipping '{raw}': {err}"),
        }
    }

    print_board(&session, options.json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!("7".parse::<Command>(), Ok(Command::Select(CardId::new(7))));
        assert_eq!("select 3".parse::<Command>(), Ok(Command::Select(CardId::new(3))));
        assert_eq!("U".parse::<Command>(), Ok(Command::Undo));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
        assert!("select".parse::<Command>().is_err());
        assert!("fly".parse::<Command>().is_err());
    }

    #[test]
    fn test_verbosity_arg() {
        let arg: VerbosityArg = "3".parse().unwrap();
        assert_eq!(VerbosityLevel::from(arg), VerbosityLevel::Verbose);
        assert!("loud".parse::<VerbosityArg>().is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
