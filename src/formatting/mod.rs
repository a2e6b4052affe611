pub mod numbers;

use colored::*;
use std::env;
use std::io::IsTerminal;

pub use numbers::{format_count, format_currency, format_percent, format_ratio, format_thousands};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiMode {
    Auto,   // Use emoji if terminal supports Unicode
    Always, // Always use emoji
    Never,  // Never use emoji
}

impl EmojiMode {
    pub fn should_use_emoji(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub emoji: EmojiMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            emoji: EmojiMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, emoji: EmojiMode) -> Self {
        Self { color, emoji }
    }

    /// Honour `NO_COLOR`, `CLICOLOR` and `CLICOLOR_FORCE`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// ASCII-only, no colors, no emoji
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            emoji: EmojiMode::Never,
        }
    }

    /// Resolve `--plain` and the `[output] use_color` setting against the environment.
    pub fn resolve(plain: bool, use_color: Option<bool>) -> Self {
        if plain {
            return Self::plain();
        }
        let mut config = Self::from_env();
        match use_color {
            Some(true) => config.color = ColorMode::Always,
            Some(false) => config.color = ColorMode::Never,
            None => {}
        }
        config
    }
}

/// Styling hooks used by the terminal writer and the interactive session.
pub trait OutputFormatter {
    fn success(&self, text: &str) -> String;
    fn error(&self, text: &str) -> String;
    fn header(&self, text: &str) -> String;
    fn emoji(&self, emoji: &str, fallback: &str) -> String;
    fn bold(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;

    /// Green for gains, red for losses.
    fn money(&self, value: f64) -> String {
        let text = format_currency(value);
        if value < 0.0 {
            self.error(&text)
        } else {
            self.success(&text)
        }
    }
}

pub struct ColoredFormatter {
    config: FormattingConfig,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        colored::control::set_override(config.color.should_use_color());
        Self { config }
    }

    fn colors(&self) -> bool {
        self.config.color.should_use_color()
    }
}

impl OutputFormatter for ColoredFormatter {
    fn success(&self, text: &str) -> String {
        if self.colors() {
            text.green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(&self, text: &str) -> String {
        if self.colors() {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn header(&self, text: &str) -> String {
        if self.colors() {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn emoji(&self, emoji: &str, fallback: &str) -> String {
        if self.config.emoji.should_use_emoji() {
            emoji.to_string()
        } else {
            fallback.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.colors() {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.colors() {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn success(&self, text: &str) -> String {
        text.to_string()
    }

    fn error(&self, text: &str) -> String {
        text.to_string()
    }

    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn emoji(&self, _emoji: &str, fallback: &str) -> String {
        fallback.to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Pick the formatter for a configuration.
pub fn formatter_for(config: FormattingConfig) -> Box<dyn OutputFormatter> {
    if config == FormattingConfig::plain() {
        Box::new(PlainFormatter)
    } else {
        Box::new(ColoredFormatter::new(config))
    }
}

fn detect_color_support() -> bool {
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}
