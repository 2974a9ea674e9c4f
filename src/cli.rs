// src/cli.rs
use std::{
    env,
    io::{self, BufRead, Write},
    path::PathBuf,
    time::Duration,
};

use log::LevelFilter;

use crate::browser::ChromeLauncher;
use crate::config::options::AppOptions;
use crate::error::TrackerError;
use crate::progress::ConsoleProgress;
use crate::runner;

/// Parsed flags. `None` means "not decided on the command line".
#[derive(Clone, Debug, Default)]
pub struct Args {
    pub opts: AppOptions,
    pub headless: Option<bool>,
    pub filter: Option<bool>,
    pub min_price: Option<String>,
    pub min_change: Option<String>,
    pub batch: bool,
    pub help: bool,
}

pub fn run() -> Result<(), TrackerError> {
    let args = parse_args(env::args().skip(1))?;
    if args.help {
        eprintln!(include_str!("cli_help.txt"));
        return Ok(());
    }

    let level = if args.opts.debug { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(e) = crate::logger::init(&crate::logger::log_path(), level) {
        eprintln!("Warning: debug log unavailable: {e}");
    }

    println!("=== Crypto Price Tracker V2 ===");

    let stdin = io::stdin();
    let opts = resolve(args, &mut stdin.lock(), &mut io::stdout())?;
    log::info!("Options: {opts:?}");

    runner::run(&ChromeLauncher, &opts, &mut ConsoleProgress)?;
    println!("\nDONE ✅");
    Ok(())
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args, TrackerError> {
    let mut out = Args::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| TrackerError::InvalidArgument(format!("Missing value for {name}")))
        };
        match a.as_str() {
            "--headless" => out.headless = Some(true),
            "--headed" => out.headless = Some(false),
            "--filter" => out.filter = Some(true),
            "--no-filter" => out.filter = Some(false),
            "--min-price" => {
                out.min_price = Some(value("--min-price")?);
                out.filter.get_or_insert(true);
            }
            "--min-change" => {
                out.min_change = Some(value("--min-change")?);
                out.filter.get_or_insert(true);
            }
            "-o" | "--out" => out.opts.export.out_path = PathBuf::from(value("--out")?),
            "--driver" => out.opts.browser.driver_bin = PathBuf::from(value("--driver")?),
            "--port" => out.opts.browser.port = parse_num(&value("--port")?, "--port")?,
            "--driver-url" => out.opts.browser.driver_url = Some(value("--driver-url")?),
            "--runs" => {
                let n: u32 = parse_num(&value("--runs")?, "--runs")?;
                if n == 0 {
                    return Err(TrackerError::InvalidArgument(s!("--runs must be at least 1")));
                }
                out.opts.schedule.runs = n;
            }
            "--interval" => {
                let secs: u64 = parse_num(&value("--interval")?, "--interval")?;
                out.opts.schedule.interval = Duration::from_secs(secs);
            }
            "--batch" => out.batch = true,
            "--debug" => out.opts.debug = true,
            "-h" | "--help" => out.help = true,
            _ => return Err(TrackerError::InvalidArgument(format!("Unknown arg: {a}"))),
        }
    }
    Ok(out)
}

fn parse_num<T: std::str::FromStr>(v: &str, flag: &str) -> Result<T, TrackerError> {
    v.trim()
        .parse()
        .map_err(|_| TrackerError::InvalidArgument(format!("{flag} expects a number, got {v:?}")))
}

/// Fold flags and prompt answers into the final options.
/// Prompts (in order): headless, apply filter, minimum price, minimum change.
/// With `batch`, nothing is asked and defaults apply.
pub fn resolve<R: BufRead, W: Write>(args: Args, input: &mut R, output: &mut W) -> io::Result<AppOptions> {
    let mut opts = args.opts;
    let mut ask = |q: &str| -> io::Result<String> {
        if args.batch { return Ok(s!()); }
        prompt(input, output, q)
    };

    opts.browser.headless = match args.headless {
        Some(h) => h,
        None if args.batch => opts.browser.headless,
        None => is_yes(&ask("Headless mode (y/n): ")?),
    };

    let enabled = match args.filter {
        Some(f) => f,
        None => is_yes(&ask("\nApply filter? (y/n): ")?),
    };
    opts.filter.enabled = enabled;

    if enabled {
        opts.filter.min_price = match args.min_price {
            Some(v) => v,
            None => ask("Minimum Price ($): ")?,
        };
        opts.filter.min_change = match args.min_change {
            Some(v) => v,
            None => ask("Minimum 24h change (%) : ")?,
        };
    }

    Ok(opts)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = s!();
    input.read_line(&mut line)?;
    Ok(s!(line.trim_end_matches(['\r', '\n'])))
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
