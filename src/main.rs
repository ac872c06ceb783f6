//! hilite - highlight lines of text with regex rules

use std::io::{self, BufWriter, ErrorKind};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;

use hilite::config::{ColorMode, Config};
use hilite::output::Output;
use hilite::{highlight_lines, init_tracing, input, Highlighter, HiliteError, Result, RuleSet};

#[derive(Parser, Debug)]
#[command(name = "hilite")]
#[command(version = hilite::VERSION)]
#[command(about = "Highlight lines of text with regex rules")]
#[command(
    long_about = "Highlight lines of text with an ordered list of regex rules.\n\
\n\
Rules are read from a JSON array or a TOML file of [[rule]] tables. Each rule\n\
has a pattern and a color, and may color only one capture group or let other\n\
rules highlight inside its capture.\n\
\n\
Examples:\n  \
hilite rules.json app.log\n  \
tail -f app.log | hilite -n rules.toml"
)]
struct Cli {
    /// Rule file (.json or .toml)
    rules: PathBuf,

    /// Input file; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Prefix each line with its line number
    #[arg(short = 'n', long)]
    line_numbers: bool,

    /// When to color output
    #[arg(long, value_enum, value_name = "WHEN")]
    color: Option<ColorMode>,

    /// Settings file (default: ~/.hilite.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        if let HiliteError::Io(io_err) = &e {
            // Downstream closed the pipe (e.g. `| head`); not an error
            if io_err.kind() == ErrorKind::BrokenPipe {
                process::exit(0);
            }
        }
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let line_numbers = cli.line_numbers || config.line_numbers;
    let color = cli.color.unwrap_or(config.color);

    let rules = RuleSet::load(&cli.rules)?;
    let highlighter = Highlighter::new(rules).with_color(color.enabled());

    let reader = input::open(cli.input.as_deref())?;
    let stdout = io::stdout();
    let mut out = Output::new(BufWriter::new(stdout.lock()), line_numbers);

    let lines = highlight_lines(&highlighter, reader, &mut out)?;
    info!(lines, "done");
    Ok(())
}
