use std::env;
use std::io::{self, Write};
use std::process;
use std::str::FromStr;

use anyhow::{bail, Context};
use static_regex::{ParseOptions, Regex, UnclosedGroups};

const USAGE: &str = "usage: static-regex [--permissive] [--max-nesting N] -E <pattern>";

struct Args {
    pattern: String,
    options: ParseOptions,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut pattern = None;
    let mut options = ParseOptions::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-E" => pattern = Some(args.next().context("expected a pattern after '-E'")?),
            "--permissive" => options = options.unclosed_groups(UnclosedGroups::Accept),
            "--max-nesting" => {
                let limit = args.next().context("expected a number after '--max-nesting'")?;
                let limit = limit
                    .parse()
                    .with_context(|| format!("invalid nesting limit {limit:?}"))?;
                options = options.max_nesting(limit);
            }
            other => bail!("unexpected argument {other:?}"),
        }
    }
    let pattern = pattern.context("expected first argument to be '-E'")?;
    Ok(Args { pattern, options })
}

/// Level for a `RUST_LOG` value. Only a bare level is understood; anything
/// else, such as a per-module filter, falls back to `warn`.
fn log_level(requested: Option<&str>) -> log::LevelFilter {
    requested
        .and_then(|level| log::LevelFilter::from_str(level).ok())
        .unwrap_or(log::LevelFilter::Warn)
}

fn init_logging() -> anyhow::Result<()> {
    let requested = env::var("RUST_LOG").ok();
    let level = log_level(requested.as_deref());

    simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_time_format_custom(&[])
            .build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Never,
    )?;

    if let Some(requested) = requested {
        if log::LevelFilter::from_str(&requested).is_err() {
            log::warn!("ignoring RUST_LOG={requested:?}, expected a level such as 'debug'");
        }
    }
    Ok(())
}

/// Runs the command line and returns the process exit code: 0 when the
/// pattern parses, 1 when it does not, 2 on bad arguments.
fn run(
    args: impl Iterator<Item = String>,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<i32> {
    let args = match parse_args(args) {
        Ok(args) => args,
        Err(e) => {
            writeln!(err, "{e:#}\n{USAGE}")?;
            return Ok(2);
        }
    };

    match Regex::with_options(&args.pattern, &args.options) {
        Ok(regex) => {
            log::info!("parsed {} top-level node(s)", regex.len());
            write!(out, "{}", regex.pretty())?;
            Ok(0)
        }
        Err(e) => {
            writeln!(err, "{:?}: {e}", args.pattern)?;
            Ok(1)
        }
    }
}

// Usage: static-regex -E <pattern>
fn main() {
    if let Err(err) = init_logging() {
        eprintln!("failed to start logging: {err:#}");
    }

    let code = match run(env::args().skip(1), &mut io::stdout(), &mut io::stderr()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    };
    process::exit(code)
}
