use crate::output::is_quiet;
use crate::ui::{Icons, theme};
use owo_colors::OwoColorize;

/// Banner line, e.g. at server start
pub fn header(text: &str) {
    if !is_quiet() {
        println!("{} {}", Icons::BUILDING, text.style(theme().banner));
    }
}

pub fn success(message: &str) {
    if !is_quiet() {
        println!("{} {}", Icons::CHECK, message.style(theme().ok));
    }
}

/// Warnings go to stderr and ignore quiet mode
pub fn warn(message: &str) {
    eprintln!("{} {}", Icons::WARN, message.style(theme().caution));
}

/// `label: value` status line
pub fn info(label: &str, value: &str) {
    if !is_quiet() {
        println!(
            "{} {}: {}",
            Icons::INFO.style(theme().accent),
            label.style(theme().label),
            value
        );
    }
}

pub fn section(title: &str) {
    if !is_quiet() {
        println!();
        println!("{}", title.style(theme().banner));
    }
}
