// src/util/helper.rs
use itertools::Itertools;
use std::io::{self, IsTerminal, Write};

/// Split a comma separated id list, trimming entries and dropping blanks and repeats
pub fn parse_id_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unique()
        .map(str::to_string)
        .collect()
}

/// Interactive confirmation prompt on stderr; anything but y/yes declines
pub fn confirm(prompt: &str) -> io::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{} (y/N): ", prompt)?;
    stderr.flush()?;

    let mut user_input = String::new();
    io::stdin().read_line(&mut user_input)?;

    Ok(matches!(
        user_input.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

pub fn is_stdin_piped() -> bool {
    !io::stdin().is_terminal()
}

/// Shorten `text` to `max_chars` characters, keeping both ends
pub fn truncate_middle(text: &str, max_chars: usize) -> String {
    let length = text.chars().count();
    if length <= max_chars || max_chars < 5 {
        return text.to_string();
    }
    let keep = max_chars - 3;
    let head = keep / 2 + keep % 2;
    let tail = keep / 2;
    let start: String = text.chars().take(head).collect();
    let end: String = text.chars().skip(length - tail).collect();
    format!("{}...{}", start, end)
}
