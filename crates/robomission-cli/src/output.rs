//! Styled terminal output

use console::{style, Term};
use robomission::IssueSeverity;

/// Status line printer for command results
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a reporter writing to stderr
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.line(&self.prefix("✓", "OK", Tone::Good), message);
    }

    /// Print a failure message, even in quiet mode
    pub fn failure(&self, message: &str) {
        self.line(&self.prefix("✗", "FAIL", Tone::Bad), message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.line(&self.prefix("⚠", "WARN", Tone::Warn), message);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.line(&self.prefix("ℹ", "INFO", Tone::Info), message);
    }

    /// Print an analysis finding with a severity-dependent prefix
    pub fn issue(&self, severity: IssueSeverity, message: &str) {
        match severity {
            IssueSeverity::Error => self.failure(message),
            IssueSeverity::Warning => self.warning(message),
            IssueSeverity::Info => self.info(message),
        }
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }
        let styled = if self.use_color {
            style(title).for_stderr().bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };
        let _ = self.term.write_line(&styled);
    }

    fn prefix(&self, symbol: &str, plain: &str, tone: Tone) -> String {
        if !self.use_color {
            return plain.to_string();
        }
        let styled = style(symbol).for_stderr().bold();
        match tone {
            Tone::Good => styled.green(),
            Tone::Bad => styled.red(),
            Tone::Warn => styled.yellow(),
            Tone::Info => styled.blue(),
        }
        .to_string()
    }

    fn line(&self, prefix: &str, message: &str) {
        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Good,
    Bad,
    Warn,
    Info,
}
