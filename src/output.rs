//! # Output Configuration
//!
//! Controls how the CLI presents its results: status markers are emoji when
//! color is enabled and bracketed words otherwise, and headings are bolded
//! through `console` only when the terminal supports it.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```
//! use docpub::output::{Marker, OutputConfig};
//!
//! let out = OutputConfig::from_env_and_flag("never");
//! assert_eq!(out.status(Marker::Ok, "Documentation built"), "[OK] Documentation built");
//! ```

use std::env;
use std::fmt;

use console::style;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

/// Status markers printed in front of CLI messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Ok,
    Info,
    Warn,
    Build,
    Publish,
    Upload,
    Link,
}

impl Marker {
    fn emoji(self) -> &'static str {
        match self {
            Marker::Ok => "✅",
            Marker::Info => "📊",
            Marker::Warn => "⚠️",
            Marker::Build => "🔨",
            Marker::Publish => "🚀",
            Marker::Upload => "📦",
            Marker::Link => "🔗",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Marker::Ok => "[OK]",
            Marker::Info => "[INFO]",
            Marker::Warn => "[WARN]",
            Marker::Build => "[BUILD]",
            Marker::Publish => "[PUBLISH]",
            Marker::Upload => "[UPLOAD]",
            Marker::Link => "[LINK]",
        }
    }
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `color_flag` is the value of `--color`: `always` forces color on (even
    /// over `NO_COLOR`), `never` forces it off and anything else detects
    /// support from the environment and the terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }

    /// The marker text for this configuration.
    pub fn marker(&self, marker: Marker) -> &'static str {
        if self.use_color {
            marker.emoji()
        } else {
            marker.plain()
        }
    }

    /// `message` prefixed with a status marker.
    pub fn status(&self, marker: Marker, message: impl fmt::Display) -> String {
        format!("{} {}", self.marker(marker), message)
    }

    /// `title` in bold when color is enabled.
    pub fn heading(&self, title: &str) -> String {
        if self.use_color {
            style(title).bold().force_styling(true).to_string()
        } else {
            title.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
