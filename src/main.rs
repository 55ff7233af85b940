//! Command line front end: pick the most readable style for a background.
//!
//! # Usage
//!
//! ```text
//! matchstyle [--no-color] <background> [name=color ...]
//! ```
//!
//! The program prints the name of the matched style, followed by its color
//! and contrast ratio (tab-separated) unless `--no-color` is given. Without
//! any `name=color` argument the `basic-light` / `basic-dark` pair is used.
//!
//! Exit codes:
//! - 0: A style was matched
//! - 1: Usage error or invalid style declaration
//! - 2: Invalid background color (prints `no-style`)
//!
//! # Environment Variables
//!
//! - `DEBUG`: When set, enables debug output to stderr showing the parsed
//!   background, each candidate's contrast, and the selected style.

use std::env;
use std::process;

use anyhow::{Context, Result, anyhow, bail};
use matchstyle::{ColorInput, ResolvedStyle, Styles, debug, select};

const USAGE: &str = "usage: matchstyle [--no-color] <background> [name=color ...]";

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct Args {
    background: String,
    styles: Styles,
    set_color: bool,
}

/// Parse the command line arguments, program name excluded.
///
/// Returns `None` when help was requested.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Option<Args>> {
    let mut background = None;
    let mut styles = Styles::new();
    let mut set_color = true;

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--no-color" => set_color = false,
            flag if flag.starts_with("--") => bail!("unknown option: {flag}"),
            value if background.is_none() => background = Some(value.to_owned()),
            declaration => {
                let (name, color) = declaration
                    .split_once('=')
                    .ok_or_else(|| anyhow!("expected name=color, got: {declaration}"))?;
                if name.is_empty() {
                    bail!("missing style name in: {declaration}");
                }
                styles.insert(name, color);
            }
        }
    }

    let background = background.context("missing background color")?;
    Ok(Some(Args {
        background,
        styles,
        set_color,
    }))
}

/// Render the selected style as one output line.
fn render(style: &ResolvedStyle, set_color: bool) -> String {
    if set_color && !style.is_no_style() {
        format!("{}\t{}\t{:.2}", style.name(), style.color(), style.contrast())
    } else {
        style.name().to_owned()
    }
}

/// Run the program and return its exit code.
fn run(args: impl IntoIterator<Item = String>) -> Result<i32> {
    let Some(args) = parse_args(args)? else {
        println!("{USAGE}");
        return Ok(0);
    };
    debug!("args={args:?}");

    let styles = (!args.styles.is_empty()).then_some(&args.styles);
    let background = ColorInput::from(args.background);
    let style = select(Some(&background), styles).context("Invalid style declaration")?;
    debug!("style={style:?}");

    println!("{}", render(&style, args.set_color));
    Ok(if style.is_no_style() { 2 } else { 0 })
}

/// Main entry point for the matchstyle utility.
fn main() {
    match run(env::args().skip(1)) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("matchstyle: {err:#}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    }
}
