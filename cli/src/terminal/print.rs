//! Raw terminal output, routed through tracing on [`PRINT_TARGET`] so the
//! formatter can keep it clear of the spinner.

use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::format::Detail;
use crate::terminal::{banner, colors};

pub const TOTAL_WIDTH: usize = 64;
pub const PRINT_TARGET: &str = "intake::print";
const TREE_KEY_WIDTH: usize = 13;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn blank() {
    print("");
}

/// A full-width rule of `fill` with `title` centered on it.
fn rule(title: &str, fill: &str, title_color: Color) {
    let width = console::measure_text_width(title);
    let left = TOTAL_WIDTH.saturating_sub(width) / 2;
    let right = TOTAL_WIDTH.saturating_sub(width + left);
    print(&format!(
        "{}{}{}",
        fill.repeat(left).color(colors::SEPARATOR),
        title.color(title_color).bold(),
        fill.repeat(right).color(colors::SEPARATOR)
    ));
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }
    rule(&format!("⟦ INTAKE v{} ⟧", env!("CARGO_PKG_VERSION")), "═", Color::BrightGreen);
    banner::print();
}

pub fn header(msg: &str, q_level: u8) {
    if q_level == 0 {
        rule(&format!("⟦ {} ⟧", msg.to_uppercase()), "─", Color::BrightGreen);
    }
}

pub fn separator() {
    rule("", "═", colors::SEPARATOR);
}

pub fn end_of_program(q_level: u8) {
    if q_level == 0 {
        separator();
    }
}

/// Dots filling the gap between `key` and a column `width` cells wide.
fn leader(key: &str, width: usize) -> String {
    ".".repeat(width.saturating_sub(key.width()))
}

/// `[idx] name` followed by one branch per detail.
pub fn host_tree(idx: usize, name: &str, details: &[Detail]) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));

    for (i, (key, value)) in details.iter().enumerate() {
        let branch = if i + 1 == details.len() { "└─" } else { "├─" };
        let dots = leader(key, TREE_KEY_WIDTH);
        print(&format!(
            " {} {}{}{} {}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

/// `> key...: value` lines, keys padded to the longest one.
pub fn fields(rows: &[(&str, ColoredString)]) {
    let width = rows.iter().map(|(key, _)| key.width()).max().unwrap_or(0);
    for (key, value) in rows {
        let dots = leader(key, width + 1);
        status(&format!(
            "{}{}{} {}",
            key.color(colors::PRIMARY),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

pub fn status(msg: &str) {
    print(&format!("{} {}", ">".color(colors::SEPARATOR), msg));
}

pub fn centered(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{space}{msg}"));
}

pub fn no_results() {
    print(&"Nothing was imported".red().bold().to_string());
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leader_pads_to_the_column() {
        assert_eq!(leader("Token", 9), "....");
        assert_eq!(leader("Organization", TREE_KEY_WIDTH), ".");
    }

    #[test]
    fn leader_never_underflows() {
        assert_eq!(leader("Organization", 4), "");
    }

    #[test]
    fn leader_counts_display_cells() {
        assert_eq!(leader("ü", 3), "..");
    }
}
