//! ANSI colors for terminal output

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const CYAN: &'static str = "\x1b[36m";

    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";
    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
    pub const BRIGHT_WHITE: &'static str = "\x1b[97m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Bold, colored section title
pub fn heading(text: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}{}", Colors::BOLD, Colors::BRIGHT_CYAN, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Color a rate in `[0, 1]`: green from 0.8, yellow from 0.5, red below
pub fn rate_color(rate: f64) -> &'static str {
    if rate >= 0.8 {
        Colors::BRIGHT_GREEN
    } else if rate >= 0.5 {
        Colors::YELLOW
    } else {
        Colors::RED
    }
}

/// Terminal capability detection honouring `NO_COLOR` and `FORCE_COLOR`
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Disable formatting when running tests
    if cfg!(test) || env::var("RUST_TEST_TIME_UNIT").is_ok() {
        return false;
    }

    if !std::io::stdout().is_terminal() {
        return false;
    }

    match env::var("TERM") {
        Ok(term) => !(term.is_empty() || term == "dumb"),
        // Windows consoles usually leave TERM unset
        Err(_) => cfg!(windows),
    }
}
