//! # Config Command
//!
//! Shows and edits `tracker.toml`.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use trak_core::output::format_command;
use trak_core::{AdapterKind, IssueTracker, TrackerConfig, print_info, print_success, print_warning};
use trak_jira::JiraVariant;

use crate::clients;

/// Command for tracker configuration
#[derive(Args)]
pub struct ConfigArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: ConfigSubcommands,
}

/// Subcommands for the config command
#[derive(Subcommand)]
pub enum ConfigSubcommands {
  /// Show the current configuration
  Show,

  /// Change configuration values
  #[command(arg_required_else_help = true)]
  Set {
    /// Which Jira flavour to talk to
    #[arg(long, value_enum)]
    adapter: Option<AdapterArg>,

    /// REST base URL (e.g. https://company.atlassian.net)
    #[arg(long)]
    base_url: Option<String>,

    /// Browser-facing URL for issue links, if different from the base URL
    #[arg(long)]
    repo_domain_url: Option<String>,

    /// Default project key for new issues
    #[arg(long)]
    project: Option<String>,

    /// Page size for project and search listings
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
    page_size: Option<u32>,
  },

  /// Check whether a git remote belongs to the configured tracker
  Supports {
    /// Remote URL (https or scp-style)
    #[arg(required = true, index = 1)]
    remote_url: String,
  },
}

/// Adapter argument for CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum AdapterArg {
  /// Jira Cloud (*.atlassian.net)
  Jira,
  /// Self-hosted Jira Server / Data Center
  JiraEnterprise,
}

impl From<AdapterArg> for AdapterKind {
  fn from(arg: AdapterArg) -> Self {
    match arg {
      AdapterArg::Jira => AdapterKind::Jira,
      AdapterArg::JiraEnterprise => AdapterKind::JiraEnterprise,
    }
  }
}

/// Handle the config command
pub(crate) fn handle_config_command(config: ConfigArgs) -> Result<()> {
  match config.subcommand {
    ConfigSubcommands::Show => handle_show_command(),
    ConfigSubcommands::Set {
      adapter,
      base_url,
      repo_domain_url,
      project,
      page_size,
    } => {
      let (dirs, mut current) = clients::load_config()?;
      apply_changes(
        &mut current,
        adapter.map(Into::into),
        base_url,
        repo_domain_url,
        project,
        page_size,
      );
      dirs.save_tracker_config(&current)?;
      print_success(&format!("Saved {}", dirs.tracker_config_path().display()));
      Ok(())
    }
    ConfigSubcommands::Supports { remote_url } => {
      let tracker = clients::create_tracker()?;
      if tracker.supports_repository(&remote_url) {
        print_success(&format!("{remote_url} belongs to this {} tracker.", tracker.variant().display_name()));
        Ok(())
      } else {
        bail!("{remote_url} does not belong to the configured {} tracker", tracker.variant().display_name())
      }
    }
  }
}

fn apply_changes(
  config: &mut TrackerConfig,
  adapter: Option<AdapterKind>,
  base_url: Option<String>,
  repo_domain_url: Option<String>,
  project: Option<String>,
  page_size: Option<u32>,
) {
  if let Some(adapter) = adapter {
    config.adapter = adapter;
  }
  if base_url.is_some() {
    config.base_url = base_url;
  }
  if repo_domain_url.is_some() {
    config.repo_domain_url = repo_domain_url;
  }
  if project.is_some() {
    config.project = project;
  }
  if let Some(page_size) = page_size {
    config.page_size = page_size;
  }
}

fn handle_show_command() -> Result<()> {
  let (dirs, config) = clients::load_config()?;
  let path = dirs.tracker_config_path();

  println!("{}", "Tracker configuration".bold().underline());
  if path.exists() {
    println!("  {:<16} {}", "File:", path.display());
  } else {
    println!("  {:<16} {} (not created yet)", "File:", path.display());
  }

  let unset = || "(unset)".dimmed().to_string();
  println!(
    "  {:<16} {}",
    "Adapter:",
    JiraVariant::from_adapter(config.adapter).display_name()
  );
  match config.resolved_base_url() {
    Ok(url) => println!("  {:<16} {}", "Base URL:", url),
    Err(_) => println!("  {:<16} {}", "Base URL:", unset()),
  }
  println!(
    "  {:<16} {}",
    "Issue links:",
    config.resolved_repo_domain_url().unwrap_or_else(|_| unset())
  );
  println!("  {:<16} {}", "Project:", config.project.clone().unwrap_or_else(unset));
  println!("  {:<16} {}", "Page size:", config.page_size);

  match &config.authentication {
    Some(auth) => println!(
      "  {:<16} {:?} as {} (secret hidden)",
      "Authentication:",
      auth.http_auth_type,
      auth.username.as_deref().unwrap_or("token")
    ),
    None => println!("  {:<16} from .netrc", "Authentication:"),
  }

  if config.base_url.is_none() {
    println!();
    print_warning("No base URL configured.");
    print_info(&format!(
      "Set one with {}",
      format_command("trak config set --base-url https://company.atlassian.net")
    ));
  }
  Ok(())
}
