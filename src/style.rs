//! Coloured terminal output shared by the commands.

use colored::Colorize;
use crossterm::style::Color;
use std::io::{self, IsTerminal, Write};
use termimad::{MadSkin, StyledChar};

/// `error:` line on stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Dimmed follow-up advice on stderr.
pub fn hint(msg: &str) {
    eprintln!("{} {}", "hint:".dimmed(), msg.dimmed());
}

/// Progress line on stderr, so stdout stays clean for piped output.
pub fn status(msg: &str) {
    eprintln!("{} {}", "→".blue(), msg);
}

pub fn path(p: &std::path::Path) -> String {
    p.display().to_string().bright_white().to_string()
}

pub fn url(u: &str) -> String {
    u.bright_blue().underline().to_string()
}

/// Indented `label: value` pair.
pub fn metric(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {}: {}", label.dimmed(), value.to_string().cyan())
}

pub fn section(title: &str) {
    println!("\n{}", title.bold());
}

/// Write Markdown styled for the terminal, or verbatim when stdout is not a TTY.
pub fn render_markdown(markdown: &str, output: &mut dyn Write) -> io::Result<()> {
    if io::stdout().is_terminal() {
        write!(output, "{}", skin().term_text(markdown))
    } else {
        writeln!(output, "{}", markdown)
    }
}

fn skin() -> MadSkin {
    let mut skin = MadSkin::default();
    skin.set_headers_fg(Color::Cyan);
    skin.bold.set_fg(Color::White);
    skin.italic.set_fg(Color::Magenta);
    skin.bullet = StyledChar::from_fg_char(Color::Blue, '•');
    skin.inline_code.set_fg(Color::Yellow);
    skin.code_block.set_fg(Color::Yellow);
    skin.horizontal_rule = StyledChar::from_fg_char(Color::DarkGrey, '─');
    skin
}
