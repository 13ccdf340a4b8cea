//! Output formatting
//!
//! Status prefixes, quiet/JSON handling and error display. Human-readable
//! status goes to stdout; errors and logs go to stderr.

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";
}

/// Output settings from the global CLI flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress everything but errors
    pub quiet: bool,
    /// Emit machine-readable JSON instead of status lines
    pub json: bool,
    /// Verbosity level (number of -v flags)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create output settings
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self {
            quiet,
            json,
            verbose,
        }
    }

    /// Tracing filter directive matching the flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Whether human-readable status lines should be printed
    pub fn show_status(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Print a success line
    pub fn success(&self, message: &str) {
        if self.show_status() {
            println!("{} {message}", status::SUCCESS);
        }
    }

    /// Print a warning line
    pub fn warning(&self, message: &str) {
        if self.show_status() {
            println!("{} {message}", status::WARNING);
        }
    }

    /// Print a JSON value when in JSON mode
    pub fn json_value(&self, value: &serde_json::Value) {
        if self.json {
            println!("{value}");
        }
    }
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} Error: {error:#}", status::ERROR);
}
