//! # Issue Command
//!
//! View, list, open, edit, close and browse issues through the tracker
//! facade.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use trak_core::output::{format_command, format_issue_key};
use trak_core::{IssueOptions, IssueTracker, IssueUpdate, VendorResponse, print_info, print_success, print_warning};

use super::filters::{FilterArgs, PageArgs};
use super::render::{print_issue, print_issue_table, print_json, print_vendor_error};
use crate::clients;

/// Command for issue operations
#[derive(Args)]
pub struct IssueArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: IssueSubcommands,
}

/// Subcommands for the issue command
#[derive(Subcommand)]
pub enum IssueSubcommands {
  /// View an issue
  View {
    /// The issue key (e.g. PROJ-123) or id
    #[arg(required = true, index = 1)]
    issue_key: String,

    /// Print the normalized record as JSON
    #[arg(long)]
    json: bool,
  },

  /// List issues matching field filters
  #[command(alias = "ls")]
  List {
    #[command(flatten)]
    filters: FilterArgs,

    #[command(flatten)]
    page: PageArgs,

    /// Print the normalized records as JSON
    #[arg(long)]
    json: bool,
  },

  /// Open (file) a new issue
  #[command(long_about = "File a new issue and print its key.\n\n\
                       The issue goes to --project, or to the project configured in\n\
                       tracker.toml. The issue type defaults to Task.")]
  Open {
    /// Issue summary
    #[arg(required = true, index = 1)]
    title: String,

    /// Issue description
    #[arg(long, short = 'b', default_value = "")]
    body: String,

    /// Project key
    #[arg(long, short = 'p')]
    project: Option<String>,

    /// Issue type name
    #[arg(long = "type", short = 't')]
    issue_type: Option<String>,

    /// Label (repeatable)
    #[arg(long = "label", short = 'l')]
    labels: Vec<String>,

    /// Assignee username
    #[arg(long, short = 'a')]
    assignee: Option<String>,
  },

  /// Edit an issue's fields
  Update {
    /// The issue key (e.g. PROJ-123) or id
    #[arg(required = true, index = 1)]
    issue_key: String,

    /// New summary
    #[arg(long)]
    title: Option<String>,

    /// New description
    #[arg(long, short = 'b')]
    body: Option<String>,

    /// Replace the labels (repeatable)
    #[arg(long = "label", short = 'l', conflicts_with = "clear_labels")]
    labels: Vec<String>,

    /// Remove every label
    #[arg(long)]
    clear_labels: bool,

    /// New assignee username
    #[arg(long, short = 'a')]
    assignee: Option<String>,
  },

  /// Close an issue
  #[command(long_about = "Close an issue.\n\n\
                       Jira closes issues through workflow transitions that differ per\n\
                       project, so this reports why it cannot close the issue for you.")]
  Close {
    /// The issue key (e.g. PROJ-123) or id
    #[arg(required = true, index = 1)]
    issue_key: String,
  },

  /// Open an issue in the browser
  Browse {
    /// The issue key (e.g. PROJ-123) or id
    #[arg(required = true, index = 1)]
    issue_key: String,

    /// Print the URL instead of opening it
    #[arg(long)]
    print: bool,
  },
}

/// Handle the issue command
pub(crate) fn handle_issue_command(issue: IssueArgs) -> Result<()> {
  match issue.subcommand {
    IssueSubcommands::View { issue_key, json } => handle_view_command(&issue_key, json),
    IssueSubcommands::List { filters, page, json } => handle_list_command(&filters, &page, json),
    IssueSubcommands::Open {
      title,
      body,
      project,
      issue_type,
      labels,
      assignee,
    } => {
      let options = IssueOptions {
        project,
        issue_type,
        labels,
        assignee,
      };
      handle_open_command(&title, &body, &options)
    }
    IssueSubcommands::Update {
      issue_key,
      title,
      body,
      labels,
      clear_labels,
      assignee,
    } => {
      let labels = if clear_labels {
        Some(Vec::new())
      } else if labels.is_empty() {
        None
      } else {
        Some(labels)
      };
      let update = IssueUpdate {
        title,
        body,
        labels,
        assignee,
      };
      handle_update_command(&issue_key, &update)
    }
    IssueSubcommands::Close { issue_key } => handle_close_command(&issue_key),
    IssueSubcommands::Browse { issue_key, print } => handle_browse_command(&issue_key, print),
  }
}

fn handle_view_command(issue_key: &str, json: bool) -> Result<()> {
  let (rt, tracker) = clients::create_tracker_runtime()?;

  let issue = rt
    .block_on(tracker.get_issue(issue_key))
    .with_context(|| format!("Failed to fetch issue {issue_key}"))?;

  if json {
    print_json(&issue)
  } else {
    print_issue(&issue, &tracker.issue_url(issue_key));
    Ok(())
  }
}

fn handle_list_command(filters: &FilterArgs, page: &PageArgs, json: bool) -> Result<()> {
  let (rt, tracker) = clients::create_tracker_runtime()?;
  let page = page.to_page(tracker.default_issue_page().limit);

  let reply = rt
    .block_on(tracker.get_issues(&filters.to_criteria(), page))
    .context("Failed to list issues")?;

  match reply {
    VendorResponse::Data(issues) if json => print_json(&issues),
    VendorResponse::Data(issues) => {
      print_issue_table(&issues);
      print_info(&format!(
        "Showing {} issues from #{}. Next page: {}",
        issues.len(),
        page.start,
        format_command(&format!("--start {}", page.next().start))
      ));
      Ok(())
    }
    VendorResponse::Empty if json => print_json(&Vec::<()>::new()),
    VendorResponse::Empty => {
      print_info("No issues found.");
      Ok(())
    }
    VendorResponse::VendorError(messages) => {
      print_vendor_error(&messages);
      Ok(())
    }
  }
}

fn handle_open_command(title: &str, body: &str, options: &IssueOptions) -> Result<()> {
  let (rt, tracker) = clients::create_tracker_runtime()?;

  let key = rt
    .block_on(tracker.open_issue(title, body, options))
    .context("Failed to open issue")?;

  print_success(&format!("Opened {}", format_issue_key(&key)));
  println!("{}", tracker.issue_url(&key));
  Ok(())
}

fn handle_update_command(issue_key: &str, update: &IssueUpdate) -> Result<()> {
  if update.is_empty() {
    print_warning("Nothing to update. Pass --title, --body, --label, --clear-labels or --assignee.");
    return Ok(());
  }

  let (rt, tracker) = clients::create_tracker_runtime()?;
  rt.block_on(tracker.update_issue(issue_key, update))
    .with_context(|| format!("Failed to update issue {issue_key}"))?;

  print_success(&format!("Updated {}", format_issue_key(issue_key)));
  Ok(())
}

fn handle_close_command(issue_key: &str) -> Result<()> {
  let (rt, tracker) = clients::create_tracker_runtime()?;
  rt.block_on(tracker.close_issue(issue_key))
    .with_context(|| format!("Cannot close issue {issue_key}"))?;

  print_success(&format!("Closed {}", format_issue_key(issue_key)));
  Ok(())
}

fn handle_browse_command(issue_key: &str, print_only: bool) -> Result<()> {
  let url = clients::create_tracker()?.issue_url(issue_key);

  if print_only {
    println!("{url}");
    return Ok(());
  }

  print_info(&format!("Opening {url}"));
  open::that(&url).with_context(|| format!("Failed to open {url} in the browser"))?;
  Ok(())
}
