//! Console messages for the command-line front end.
//!
//! Progress and results go to stdout and follow the configured
//! [`Verbosity`]. Warnings and errors go to stderr and are never suppressed,
//! so a `--json` document on stdout is the only thing there.
//!
//! # Examples
//!
//! ```
//! use pdfsplice::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Reading 3 file(s)...");
//! formatter.success("Merged 3 file(s) into merged.pdf");
//! formatter.error("Merging failed. Please check your files and page ranges.");
//! ```

use crate::config::Config;
use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

/// How much the formatter prints to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Only warnings and errors.
    Quiet,
    /// Progress and results.
    #[default]
    Normal,
    /// Everything, including per-document details.
    Verbose,
}

/// Kind of message, which picks its marker, colour and stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Progress.
    Info,
    /// A finished step.
    Success,
    /// Something the user should look at.
    Warning,
    /// A failure.
    Error,
    /// Diagnostics for `--verbose`.
    Debug,
}

impl MessageLevel {
    fn marker(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "✓ ",
            Self::Warning => "⚠ ",
            Self::Error => "✗ ",
            Self::Debug => "→ ",
        }
    }

    fn ansi(self) -> Option<&'static str> {
        match self {
            Self::Info => None,
            Self::Success => Some("\x1b[32m"),
            Self::Warning => Some("\x1b[33m"),
            Self::Error => Some("\x1b[31m"),
            Self::Debug => Some("\x1b[36m"),
        }
    }

    /// Lowest verbosity at which the message is printed.
    fn threshold(self) -> Verbosity {
        match self {
            Self::Warning | Self::Error => Verbosity::Quiet,
            Self::Info | Self::Success => Verbosity::Normal,
            Self::Debug => Verbosity::Verbose,
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Prints status lines, plans and summaries.
#[derive(Debug, Clone, Default)]
pub struct OutputFormatter {
    verbosity: Verbosity,
    colored: bool,
}

impl OutputFormatter {
    /// Formatter for the `--quiet`/`--verbose` flags. Quiet wins if both are set.
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let verbosity = match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        };
        Self::with_verbosity(verbosity)
    }

    /// Formatter at an explicit level. Colour is detected from the terminal.
    pub fn with_verbosity(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            colored: color_enabled(),
        }
    }

    /// Formatter matching the run configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet, config.verbose)
    }

    /// Formatter that only reports warnings and errors.
    pub fn quiet() -> Self {
        Self::with_verbosity(Verbosity::Quiet)
    }

    /// Formatter that reports everything.
    pub fn verbose() -> Self {
        Self::with_verbosity(Verbosity::Verbose)
    }

    /// Current level.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Whether per-document details are printed.
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Whether only warnings and errors are printed.
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    fn shows(&self, at_least: Verbosity) -> bool {
        self.verbosity >= at_least
    }

    /// Print a progress message.
    pub fn info(&self, message: &str) {
        self.emit(MessageLevel::Info, message);
    }

    /// Print a completed step.
    pub fn success(&self, message: &str) {
        self.emit(MessageLevel::Success, message);
    }

    /// Print a warning to stderr.
    pub fn warning(&self, message: &str) {
        self.emit(MessageLevel::Warning, message);
    }

    /// Print an error to stderr.
    pub fn error(&self, message: &str) {
        self.emit(MessageLevel::Error, message);
    }

    /// Print a diagnostic line in verbose mode.
    pub fn debug(&self, message: &str) {
        self.emit(MessageLevel::Debug, message);
    }

    fn emit(&self, level: MessageLevel, message: &str) {
        if !self.shows(level.threshold()) {
            return;
        }

        let line = self.render(level, message);
        if level.to_stderr() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// The text printed for `message` at `level`, with marker and colour.
    pub fn render(&self, level: MessageLevel, message: &str) -> String {
        let marker = level.marker();
        match level.ansi() {
            Some(code) if self.colored => format!("{code}{marker}{message}{RESET}"),
            _ => format!("{marker}{message}"),
        }
    }

    /// Heading before a block such as the merge plan.
    pub fn section(&self, title: &str) {
        if self.shows(Verbosity::Normal) {
            println!("\n{title}");
        }
    }

    /// Numbered line, 1-based as passed in.
    pub fn list_item(&self, number: usize, message: &str) {
        if self.shows(Verbosity::Normal) {
            println!("  {number}. {message}");
        }
    }

    /// Indented `label: value` line, verbose only.
    pub fn detail(&self, label: &str, value: &str) {
        if self.shows(Verbosity::Verbose) {
            println!("     {label}: {value}");
        }
    }

    /// Empty line between blocks.
    pub fn blank_line(&self) {
        if self.shows(Verbosity::Normal) {
            println!();
        }
    }
}

/// Colour needs both streams on a terminal, no `NO_COLOR`, and a real `TERM`.
fn color_enabled() -> bool {
    io::stdout().is_terminal()
        && io::stderr().is_terminal()
        && std::env::var_os("NO_COLOR").is_none()
        && std::env::var("TERM").is_ok_and(|term| term != "dumb")
}
