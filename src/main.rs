mod catalog;
mod cli;
mod client;
mod config;
mod controller;
mod editor;
mod output;
mod printer;
mod tui;
mod utils;

use std::io::{self, Read};
use std::sync::Arc;

use anyhow::{bail, Result};
use client::HttpExecutionService;
use config::Config;
use controller::ExecutionController;
use editor::{Editor, EditorSurface};
use is_terminal::IsTerminal;
use output::Category;
use printer::{LogPrinter, MarkdownPrinter};
use utils::LogTarget;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // CLI flags override config
    let mut cfg = Config::load();
    if let Some(url) = &args.server {
        cfg.set("POKE_SERVER_URL", url.as_str());
    }
    if let Some(secs) = args.timeout {
        cfg.set("REQUEST_TIMEOUT", secs.to_string());
    }

    if args.list_examples {
        for example in catalog::all() {
            println!("{} - {}", example.name, example.description);
        }
        return Ok(());
    }
    if args.docs {
        MarkdownPrinter::default().print(&printer::guide());
        return Ok(());
    }

    // The TUI owns the terminal, so it only logs to a file
    let log_target = match cfg.get_path("LOG_FILE") {
        Some(path) => LogTarget::File(path),
        None if args.run => LogTarget::Stderr,
        None => LogTarget::Off,
    };
    utils::init_tracing(&cfg.log_level(), log_target)?;

    let service = HttpExecutionService::from_config(&cfg)?;
    let endpoint = service.url().to_string();
    tracing::info!(%endpoint, config = %cfg.config_path.display(), "starting playground");
    let editor = match &args.file {
        Some(path) => Editor::with_text(utils::read_source(path)?),
        None => Editor::new(),
    };
    let mut controller = ExecutionController::new(editor, Arc::new(service));

    if let Some(name) = &args.example {
        if !controller.load_example_ignore_case(name) {
            bail!("unknown example: {name} (see --list-examples)");
        }
    }

    if args.run {
        return run_headless(controller, &args).await;
    }

    if !io::stdout().is_terminal() {
        bail!("the playground needs a terminal; use --run for headless execution");
    }
    tui::run_tui(tui::app::App::new(controller, endpoint)).await
}

/// Submit once, print the resulting log, and fail if it ended in an error.
async fn run_headless(mut controller: ExecutionController<Editor>, args: &cli::Cli) -> Result<()> {
    if args.file.is_none() && args.example.is_none() {
        if io::stdin().is_terminal() {
            bail!("--run needs --file, --example or code on stdin");
        }
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        controller.editor_mut().set_text(buf);
    }

    controller.submit().await;

    let printer = LogPrinter {
        color: !args.no_color && io::stdout().is_terminal(),
    };
    printer.print_all(&mut io::stdout().lock(), controller.log().entries())?;

    let failed = controller
        .log()
        .latest()
        .is_some_and(|entry| entry.category == Category::Error);
    if failed {
        std::process::exit(1);
    }
    Ok(())
}
