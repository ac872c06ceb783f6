//! hilite - rule-driven line highlighter
//!
//! Each input line is matched against an ordered list of regex rules,
//! overlapping matches are resolved by declaration order, captured ranges
//! are re-highlighted with nested rules, and the result is written with ANSI
//! color sequences. Stripping those sequences always gives back the input.

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod syntax;

use std::io::{BufRead, Write};

use tracing::debug;

pub use error::{ConfigError, HiliteError, Result};
pub use syntax::{Color, Highlighter, Match, Rule, RuleSet, Segment};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the stderr log subscriber
///
/// `RUST_LOG` takes precedence; otherwise `verbosity` picks the level
/// (0 = warn, 1 = info, 2 = debug, 3+ = trace).
pub fn init_tracing(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hilite={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .init();
}

/// Highlight every line of `reader` into `out`, returning the line count
pub fn highlight_lines<R: BufRead, W: Write>(
    highlighter: &Highlighter,
    reader: R,
    out: &mut output::Output<W>,
) -> Result<usize> {
    for line in input::Lines::new(reader) {
        let line = line?;
        out.write_line(&highlighter.highlight_line(&line))?;
    }
    out.flush()?;
    debug!(lines = out.lines_written(), "input exhausted");
    Ok(out.lines_written())
}
