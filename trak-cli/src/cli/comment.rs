//! # Comment Command

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use trak_core::output::format_issue_key;
use trak_core::{IssueTracker, print_info, print_success};

use super::render::{print_comments, print_json};
use crate::clients;

/// Command for issue comments
#[derive(Args)]
pub struct CommentArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: CommentSubcommands,
}

/// Subcommands for the comment command
#[derive(Subcommand)]
pub enum CommentSubcommands {
  /// Add a comment to an issue
  Add {
    /// The issue key (e.g. PROJ-123) or id
    #[arg(required = true, index = 1)]
    issue_key: String,

    /// Comment text
    #[arg(required = true, index = 2)]
    body: String,
  },

  /// List the comments on an issue
  #[command(alias = "ls")]
  List {
    /// The issue key (e.g. PROJ-123) or id
    #[arg(required = true, index = 1)]
    issue_key: String,

    /// Print the normalized records as JSON
    #[arg(long)]
    json: bool,
  },
}

/// Handle the comment command
pub(crate) fn handle_comment_command(comment: CommentArgs) -> Result<()> {
  let (rt, tracker) = clients::create_tracker_runtime()?;

  match comment.subcommand {
    CommentSubcommands::Add { issue_key, body } => {
      let url = rt
        .block_on(tracker.create_comment(&issue_key, &body))
        .with_context(|| format!("Failed to comment on {issue_key}"))?;
      print_success(&format!("Commented on {}", format_issue_key(&issue_key)));
      println!("{url}");
      Ok(())
    }
    CommentSubcommands::List { issue_key, json } => {
      let comments = rt
        .block_on(tracker.get_comments(&issue_key))
        .with_context(|| format!("Failed to fetch comments for {issue_key}"))?;
      if json {
        print_json(&comments)
      } else if comments.is_empty() {
        print_info(&format!("{issue_key} has no comments."));
        Ok(())
      } else {
        print_comments(&comments);
        Ok(())
      }
    }
  }
}
