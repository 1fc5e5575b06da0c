//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::{Color, ColoredString, Colorize};

use crate::domain::{Stat, StatTier, STAT_BAR_MAX};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data lines)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Terminal color for an elemental type.
pub fn type_color(kind: &str) -> Color {
    match kind {
        "fire" => Color::BrightRed,
        "water" => Color::Blue,
        "electric" => Color::BrightYellow,
        "grass" => Color::Green,
        "ice" => Color::BrightCyan,
        "fighting" => Color::Red,
        "poison" => Color::Magenta,
        "ground" => Color::Yellow,
        "flying" => Color::BrightBlue,
        "psychic" => Color::BrightMagenta,
        "bug" => Color::BrightGreen,
        "rock" => Color::Yellow,
        "ghost" => Color::Magenta,
        "dragon" => Color::Blue,
        "dark" => Color::BrightBlack,
        "steel" => Color::White,
        "fairy" => Color::BrightMagenta,
        _ => Color::BrightBlack,
    }
}

/// Type name rendered as a colored badge.
pub fn type_badge(kind: &str) -> ColoredString {
    format!(" {} ", kind).color(Color::Black).on_color(type_color(kind))
}

fn tier_color(tier: StatTier) -> Color {
    match tier {
        StatTier::Low => Color::Red,
        StatTier::Fair => Color::BrightRed,
        StatTier::Good => Color::Yellow,
        StatTier::Great => Color::Green,
    }
}

/// Width of the stat bar in characters.
const BAR_WIDTH: u32 = 30;

/// One stat as `Label          base ██████`.
pub fn stat_line(stat: &Stat) -> String {
    let filled = (stat.bar_value() * BAR_WIDTH / STAT_BAR_MAX) as usize;
    let bar = "█".repeat(filled).color(tier_color(stat.tier()));
    format!("{:<16}{:>4} {}", stat.label(), stat.base, bar)
}
