//! Plain-CLI output helpers.
//!
//! ANSI styling for the non-TUI commands (`projects`, `describe`,
//! `simulate`). The dashboard renders through ratatui and does not use
//! these.

use crate::viewmodel::Tone;
use terminal_size::{terminal_size, Width};

// ANSI color codes
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const RED: &str = "\x1b[31m";
pub const GRAY: &str = "\x1b[90m";

const DEFAULT_TERMINAL_WIDTH: usize = 80;
const MIN_BANNER_WIDTH: usize = 20;
const MAX_BANNER_WIDTH: usize = 80;

/// ANSI code for a semantic tone.
pub fn tone_code(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => GRAY,
        Tone::Accent => CYAN,
        Tone::Success => GREEN,
        Tone::Danger => RED,
        Tone::Warning => YELLOW,
    }
}

fn banner_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
        .clamp(MIN_BANNER_WIDTH, MAX_BANNER_WIDTH)
}

/// Print a width-clamped phase banner: `━━━ NAME ━━━`.
pub fn print_phase_banner(name: &str, tone: Tone) {
    let width = banner_width();
    let titled = format!(" {} ", name);
    let titled_len = titled.chars().count();

    let remaining = width.saturating_sub(titled_len);
    let left = remaining / 2;
    let right = remaining - left;

    println!(
        "{}{BOLD}{}{}{}{RESET}",
        tone_code(tone),
        "━".repeat(left),
        titled,
        "━".repeat(right),
    );
}

pub fn print_header() {
    println!("{CYAN}{BOLD}fwdash{RESET} {GRAY}— firmware workflow dashboard{RESET}");
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{RED}{BOLD}error:{RESET} {message}");
}

pub fn print_success(message: &str) {
    println!("{GREEN}✓{RESET} {message}");
}

pub fn print_info(message: &str) {
    println!("{BLUE}•{RESET} {message}");
}

/// Aligned `LABEL  value` detail row used by `describe`.
pub fn print_detail_row(label: &str, value: &str) {
    println!("  {GRAY}{label:<18}{RESET}{value}");
}
