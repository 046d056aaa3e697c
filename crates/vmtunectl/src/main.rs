//! vmtunectl - report and tune Linux virtual memory
//!
//! Reads /proc/meminfo, drops caches, compacts memory and sets swappiness.

use clap::{CommandFactory, Parser};
use std::io::{self, Write};
use tokio::sync::watch;
use tracing::debug;

use vmtune_common::{ProcFs, VmTuneConfig};
use vmtunectl::app::App;
use vmtunectl::cli::{parse_error_exit_code, Action, Cli};
use vmtunectl::display::{render_banner, Theme};
use vmtunectl::errors::{exit_code, report_error, EXIT_GENERAL_ERROR};
use vmtunectl::{logging, privilege};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    std::process::exit(run().await);
}

async fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = parse_error_exit_code(&e);
            let _ = e.print();
            return code;
        }
    };

    logging::init(cli.verbose);

    let config = match VmTuneConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let _ = report_error(&e, Theme::plain(), &mut io::stderr());
            return EXIT_GENERAL_ERROR;
        }
    };

    let theme = if cli.no_color {
        Theme::plain()
    } else {
        Theme::from_mode(config.output.color)
    };

    let Some(action) = cli.action() else {
        let mut stdout = io::stdout();
        let _ = render_banner(&mut stdout, theme);
        let _ = Cli::command().print_help();
        let _ = writeln!(stdout);
        return EXIT_GENERAL_ERROR;
    };

    let mut config = config;
    if let Some(secs) = cli.interval {
        config.monitor.interval_secs = secs;
    }

    let is_root = privilege::is_root();
    debug!(?action, is_root, "dispatching");

    let app = App::new(&ProcFs, &config, theme, is_root);
    let mut options = app.monitor_options();
    options.clear_screen = console::Term::stdout().is_term();

    let (stop_tx, stop_rx) = watch::channel(false);
    if action == Action::Monitor {
        // Only the monitor turns Ctrl+C into a clean stop; everything else dies on it.
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = stop_tx.send(true);
            }
        });
    }

    let mut stdout = io::stdout();
    let result = app.run(action, &mut stdout, &options, stop_rx).await;
    let _ = stdout.flush();

    if let Err(e) = &result {
        let _ = report_error(e, theme, &mut io::stderr());
    }
    exit_code(&result)
}
