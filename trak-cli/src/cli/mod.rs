//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the trak tool.

mod comment;
mod config;
mod creds;
mod filters;
mod issue;
mod project;
mod render;
mod search;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use trak_core::ColorMode;

/// Top-level CLI command for the trak tool
#[derive(Parser)]
#[command(name = "trak")]
#[command(about = "Work with Jira issues from the terminal")]
#[command(
  long_about = "Trak talks to Jira Cloud or a self-hosted Jira through one uniform issue\n\
        tracker interface: view, search, file, edit and comment on issues without\n\
        leaving the terminal."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightBlue.on_default().bold().underline())
    .usage(AnsiColor::Blue.on_default().bold())
    .literal(AnsiColor::BrightBlue.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the trak tool
#[derive(Subcommand)]
pub enum Commands {
  /// Comments on an issue
  #[command(long_about = "List the comments on an issue or add a new one.")]
  Comment(comment::CommentArgs),

  /// Tracker configuration
  #[command(long_about = "Show or change tracker.toml.\n\n\
            The file selects the adapter (jira or jira_enterprise), the REST base URL,\n\
            the browser-facing URL used for issue links, the default project and the\n\
            page size. $JIRA_HOST overrides the configured base URL.")]
  #[command(arg_required_else_help = true)]
  Config(config::ConfigArgs),

  /// Credential management
  #[command(long_about = "Check and store Jira credentials.\n\n\
            Credentials come from the [authentication] table of tracker.toml when\n\
            present, and otherwise from your .netrc file, looked up by the Jira host\n\
            and falling back to machine 'atlassian.net'.")]
  #[command(arg_required_else_help = true)]
  Creds(creds::CredsArgs),

  /// Issue operations
  #[command(long_about = "View, list, open, edit and browse issues.")]
  #[command(alias = "i")]
  Issue(issue::IssueArgs),

  /// Projects visible to you
  #[command(alias = "p")]
  Project(project::ProjectArgs),

  /// Search issues by field filters or raw JQL
  #[command(long_about = "Search issues.\n\n\
            Field filters are translated to JQL and combined with AND. Values are passed\n\
            through verbatim, so quote them yourself when they contain spaces. Use --jql\n\
            to send an expression as-is.")]
  #[command(alias = "s")]
  Search(search::SearchArgs),
}

/// Handle the CLI command
pub fn handle_cli(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Comment(comment) => comment::handle_comment_command(comment),
    Commands::Config(config) => config::handle_config_command(config),
    Commands::Creds(creds) => creds::handle_creds_command(creds),
    Commands::Issue(issue) => issue::handle_issue_command(issue),
    Commands::Project(project) => project::handle_project_command(project),
    Commands::Search(search) => search::handle_search_command(search),
  }
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn verify_cli() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["trak", "issue", "view", "PROJ-1", "-vv", "--colors", "never"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.colors, ColorMode::Never);
  }
}
