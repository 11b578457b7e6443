//! # Output Formatting
//!
//! Colored, emoji-prefixed terminal messages and small formatters for tracker
//! records.

use owo_colors::OwoColorize;
use {clap, emojis};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply the mode to owo-colors' global override.
  pub fn apply(self) {
    match self {
      Self::Always | Self::Yes => owo_colors::set_override(true),
      Self::Never | Self::No => owo_colors::set_override(false),
      Self::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", cross.red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Print a section header
pub fn print_header(header: &str) {
  println!("\n{}", header.blue().bold());
}

/// Format an issue key or id
pub fn format_issue_key(key: &str) -> String {
  key.bright_blue().bold().to_string()
}

/// Format a workflow status by its usual meaning.
pub fn format_issue_state(state: Option<&str>) -> String {
  let Some(state) = state else {
    return "unknown".dimmed().to_string();
  };

  match state.to_ascii_lowercase().as_str() {
    "done" | "closed" | "resolved" => state.green().to_string(),
    "in progress" | "in review" => state.yellow().to_string(),
    "open" | "to do" | "reopened" | "backlog" => state.blue().to_string(),
    _ => state.to_string(),
  }
}

/// Format a label list as `[a, b]`, or a dimmed dash when empty.
pub fn format_labels(labels: &[String]) -> String {
  if labels.is_empty() {
    "-".dimmed().to_string()
  } else {
    format!("[{}]", labels.join(", ")).cyan().to_string()
  }
}

/// Format a timestamp
pub fn format_timestamp(timestamp: &str) -> String {
  timestamp.yellow().to_string()
}

/// Format a command or command example
pub fn format_command(cmd: &str) -> String {
  cmd.purple().to_string()
}
