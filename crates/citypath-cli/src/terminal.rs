//! Terminal styling, color detection and the loading indicator.

use std::io::{self, IsTerminal, Write};

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bright bold white for emphasis (city and intersection labels).
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary text (footers, hints).
    pub const GRAY: &str = "\x1b[90m";
    /// Cyan for prompts.
    pub const CYAN: &str = "\x1b[36m";
    /// Green for written files.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow for warnings.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red for errors.
    pub const RED: &str = "\x1b[31m";
    /// Return to column 0 and erase the whole line.
    pub const CLEAR_LINE: &str = "\r\x1b[2K";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
    pub yellow: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            cyan: colors::CYAN,
            green: colors::GREEN,
            yellow: colors::YELLOW,
            red: colors::RED,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            white_bold: "",
            gray: "",
            cyan: "",
            green: "",
            yellow: "",
            red: "",
        }
    }

    /// Create a palette based on terminal capabilities.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Palette for the `--no-color` flag, falling back to detection.
    #[must_use]
    pub fn for_flag(no_color: bool) -> Self {
        if no_color {
            Self::plain()
        } else {
            Self::detect()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects `NO_COLOR` (https://no-color.org/) and `TERM=dumb`, and only
/// enables colors when stdout is a terminal.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    io::stdout().is_terminal()
}

/// Format a number with thousand separators (commas).
///
/// ```
/// # use citypath_cli::terminal::format_with_separators;
/// assert_eq!(format_with_separators(999), "999");
/// assert_eq!(format_with_separators(12_345), "12,345");
/// ```
#[must_use]
pub fn format_with_separators(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Message shown while a long operation runs.
///
/// The message is written when the indicator is created and erased again when
/// it is dropped, whether the operation succeeded or failed. On a terminal the
/// message stays on one line and is cleared in place; otherwise it is written
/// as a plain line and nothing is erased.
pub struct LoadingIndicator<W: Write> {
    sink: W,
    in_place: bool,
}

impl LoadingIndicator<io::Stderr> {
    /// Show `message` on stderr.
    pub fn stderr(message: &str) -> Self {
        let stderr = io::stderr();
        let in_place = stderr.is_terminal();
        Self::start(stderr, message, in_place)
    }
}

impl<W: Write> LoadingIndicator<W> {
    pub fn start(mut sink: W, message: &str, in_place: bool) -> Self {
        // Failing to draw the indicator must not fail the operation it wraps.
        let _ = if in_place {
            write!(sink, "{message}")
        } else {
            writeln!(sink, "{message}")
        };
        let _ = sink.flush();
        Self { sink, in_place }
    }
}

impl<W: Write> Drop for LoadingIndicator<W> {
    fn drop(&mut self) {
        if self.in_place {
            let _ = write!(self.sink, "{}", colors::CLEAR_LINE);
            let _ = self.sink.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_separators() {
        assert_eq!(format_with_separators(0), "0");
        assert_eq!(format_with_separators(999), "999");
        assert_eq!(format_with_separators(1000), "1,000");
        assert_eq!(format_with_separators(123_456), "123,456");
        assert_eq!(format_with_separators(1_234_567), "1,234,567");
        assert_eq!(
            format_with_separators(u64::MAX),
            "18,446,744,073,709,551,615"
        );
    }

    #[test]
    fn test_color_palette_colored() {
        let p = ColorPalette::colored();
        assert!(!p.reset.is_empty());
        assert!(!p.red.is_empty());
    }

    #[test]
    fn test_color_palette_plain() {
        let p = ColorPalette::plain();
        assert!(p.reset.is_empty());
        assert!(p.red.is_empty());
        assert!(ColorPalette::for_flag(true).green.is_empty());
    }

    #[test]
    fn loading_indicator_clears_line_on_drop() {
        let mut buffer = Vec::new();
        {
            let _loading = LoadingIndicator::start(&mut buffer, "Downloading map...", true);
        }
        let text = String::from_utf8(buffer).expect("utf-8");
        assert_eq!(text, format!("Downloading map...{}", colors::CLEAR_LINE));
    }

    #[test]
    fn loading_indicator_is_cleared_when_operation_fails() {
        fn failing(sink: &mut Vec<u8>) -> Result<(), &'static str> {
            let _loading = LoadingIndicator::start(sink, "Working...", true);
            Err("boom")
        }

        let mut buffer = Vec::new();
        assert!(failing(&mut buffer).is_err());
        let text = String::from_utf8(buffer).expect("utf-8");
        assert!(text.ends_with(colors::CLEAR_LINE));
    }

    #[test]
    fn loading_indicator_writes_plain_line_when_not_a_terminal() {
        let mut buffer = Vec::new();
        drop(LoadingIndicator::start(&mut buffer, "Working...", false));
        assert_eq!(String::from_utf8(buffer).expect("utf-8"), "Working...\n");
    }

    use std::sync::Mutex;

    /// Serializes tests that modify environment variables.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        use std::env;

        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let saved: Vec<_> = vars.iter().map(|(k, _)| (*k, env::var_os(k))).collect();
        for (key, value) in vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        let result = f();

        for (key, value) in saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
        result
    }

    #[test]
    fn test_supports_color_no_color_set() {
        with_env_vars(&[("NO_COLOR", Some("1")), ("TERM", None)], || {
            assert!(!supports_color(), "NO_COLOR=1 should disable colors");
        });
    }

    #[test]
    fn test_supports_color_term_dumb() {
        with_env_vars(&[("NO_COLOR", None), ("TERM", Some("dumb"))], || {
            assert!(!supports_color(), "TERM=dumb should disable colors");
        });
    }
}
