use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "poke-playground", about = "Poke language playground", version)]
#[command(group(ArgGroup::new("source").args(["file", "example"]).multiple(false)))]
#[command(group(ArgGroup::new("info").args(["list_examples", "docs"]).multiple(false)))]
pub struct Cli {
    /// Base URL of the execution service (overrides POKE_SERVER_URL).
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Request timeout in seconds; 0 waits forever (overrides REQUEST_TIMEOUT).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Load source from a file into the editor.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Load a named example (hello, factorial, fibonacci, calculator).
    #[arg(long, value_name = "NAME")]
    pub example: Option<String>,

    /// Run once without the TUI and print the output log.
    ///
    /// Source comes from --file, --example or stdin.
    #[arg(long)]
    pub run: bool,

    /// Disable colors in headless output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// List the bundled examples.
    #[arg(short = 'l', long = "list-examples")]
    pub list_examples: bool,

    /// Print the playground guide.
    #[arg(long)]
    pub docs: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
