//! Printers for headless mode: colored log entries and Markdown (termimad).

use std::io::{self, Write};

use owo_colors::OwoColorize;
use termimad::MadSkin;

use crate::output::{Category, LogEntry};

pub struct LogPrinter {
    pub color: bool,
}

impl LogPrinter {
    pub fn format(&self, entry: &LogEntry) -> String {
        if !self.color {
            return format!("[{}] {}", entry.category.as_str(), entry.text);
        }
        match entry.category {
            Category::Info => format!("{}", entry.text.cyan()),
            Category::Success => format!("{}", entry.text.green()),
            Category::Error => format!("{}", entry.text.red()),
        }
    }

    pub fn print_all<'a>(
        &self,
        out: &mut impl Write,
        entries: impl IntoIterator<Item = &'a LogEntry>,
    ) -> io::Result<()> {
        for entry in entries {
            writeln!(out, "{}", self.format(entry))?;
        }
        Ok(())
    }
}

pub struct MarkdownPrinter {
    pub skin: MadSkin,
}

impl Default for MarkdownPrinter {
    fn default() -> Self {
        Self { skin: MadSkin::default() }
    }
}

impl MarkdownPrinter {
    pub fn print(&self, text: &str) { self.skin.print_text(text); println!(); }
}

/// Guide printed by `--docs`.
pub fn guide() -> String {
    let mut md = String::from(
        "# Poke Playground\n\n\
         Write Poke code in the editor and run it on the execution service. \
         Results appear in the output pane: *info* notices, *success* output \
         and *error* messages.\n\n\
         ## Keys\n\n\
         | Key | Action |\n\
         |:-|:-|\n\
         | Ctrl/Cmd+Enter / F5 | Run code |\n\
         | Ctrl/Cmd+K | Clear output |\n\
         | F6 | Clear editor |\n\
         | F7 | Example menu |\n\
         | Tab | Insert 4 spaces |\n\
         | F1 | Help |\n\
         | Ctrl+C | Quit |\n\n\
         ## Examples\n\n",
    );
    for example in crate::catalog::all() {
        md.push_str(&format!("* **{}** - {}\n", example.name, example.description));
    }
    md.push_str(
        "\n## Headless use\n\n\
         `poke-playground --run --file script.poke` or pipe code on stdin. \
         The exit status is non-zero when the run ends in an error.\n",
    );
    md
}
