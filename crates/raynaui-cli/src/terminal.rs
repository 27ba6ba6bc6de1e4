use std::io::{self, IsTerminal};
use std::time::Duration;

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

/// Interactive fallbacks and styled output.
///
/// Prompts are only shown when stdin and stderr are terminals; otherwise
/// every question is answered with "no value".
pub struct Terminal {
    term: Term,
    interactive: bool,
}

impl Terminal {
    pub fn detect() -> Self {
        let term = Term::stderr();
        let interactive = io::stdin().is_terminal() && term.is_term();
        Self { term, interactive }
    }

    pub fn ask_secret(&self, question: &str) -> io::Result<Option<String>> {
        if !self.interactive {
            return Ok(None);
        }
        self.term.write_str(&format!("{} ", style(question).bold()))?;
        Ok(non_empty(self.term.read_secure_line()?))
    }

    pub fn ask_line(&self, question: &str) -> io::Result<Option<String>> {
        if !self.interactive {
            return Ok(None);
        }
        self.term.write_str(&format!("{} ", style(question).bold()))?;
        Ok(non_empty(self.term.read_line()?))
    }

    /// Yes/no question; an empty answer picks `default`.
    pub fn confirm(&self, question: &str, default: bool) -> io::Result<bool> {
        if !self.interactive {
            return Ok(false);
        }
        let hint = if default { "Y/n" } else { "y/N" };
        self.term
            .write_str(&format!("{} ({hint}) ", style(question).bold()))?;
        let answer = self.term.read_line()?;
        Ok(match answer.trim().to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }

    pub fn spinner(&self, message: impl Into<String>) -> ProgressBar {
        if !self.term.is_term() {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        let template = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(template);
        spinner.set_message(message.into());
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn success(message: &str) {
    println!("{}", style(format!("✅ {message}")).green());
}

pub fn info(message: &str) {
    println!("{}", style(message).cyan());
}

pub fn warning(message: &str) {
    eprintln!("{}", style(format!("⚠️  {message}")).yellow());
}

pub fn failure(message: &str) {
    eprintln!("{}", style(format!("❌ {message}")).red());
}

pub fn bullet(item: &str) {
    println!("   - {item}");
}

pub fn error_bullet(item: &str) {
    eprintln!("   - {item}");
}
