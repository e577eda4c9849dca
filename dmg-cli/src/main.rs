//! Entrypoint for the DMG window.
use std::{env, error::Error};

use dmg::JoypadState;
use dmg_win::{AppError, Frontend, WindowConf};
use log::{error, info};
use slog::{o, Drain};

static USAGE: &str = r#"
usage: dmg [--config FILE] [--verbose]

options:
    --config FILE   Window configuration in YAML
    --verbose       Log at trace level

examples:
    dmg
    dmg --config window.yaml
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let args = match parse_args(env::args().skip(1)) {
        Some(args) => args,
        None => {
            print_usage();
            // FreeBSD EX_USAGE (64)
            std::process::exit(64)
        }
    };

    let result = {
        // Dropping the guard flushes the async drain, so it must go
        // before the process exits.
        let _scope_guard = init_logging(args.verbose)?;

        let result = run(&args);
        if let Err(err) = &result {
            error!("{err}");
        }
        result
    };

    if result.is_err() {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) -> Result<slog_scope::GlobalLoggerGuard, log::SetLoggerError> {
    let level = if verbose {
        log::Level::Trace
    } else {
        log::Level::Info
    };

    let decorator = slog_term::PlainDecorator::new(std::io::stdout());
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let logger = slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")));

    let scope_guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init_with_level(level)?;

    Ok(scope_guard)
}

/// Open the window and run until the user closes it.
fn run(args: &Args) -> Result<(), AppError> {
    info!("starting...");

    let conf = match &args.config {
        Some(filepath) => WindowConf::from_file(filepath)?,
        None => WindowConf::default(),
    };

    let frontend = Frontend::initialize(&conf)?;

    let mut joypad = JoypadState::new();
    let mut last = joypad;

    frontend.run(&mut joypad, |joypad| {
        if *joypad != last {
            log::debug!("joypad: [{joypad}]");
            last = *joypad;
        }
    });

    info!("done");

    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<String>,
    verbose: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Option<Args> {
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(args.next()?),
            "--verbose" | "-v" => parsed.verbose = true,
            _ => return None,
        }
    }

    Some(parsed)
}

fn print_usage() {
    println!("DMG v{}", env!("CARGO_PKG_VERSION"));
    println!("{USAGE}");
}
