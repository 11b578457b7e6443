//! # Credentials Command
//!
//! Checks and stores Jira credentials in `.netrc`.

use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use tokio::runtime::Runtime;
use trak_core::creds::FALLBACK_MACHINE;
use trak_core::creds::netrc::{get_netrc_path, normalize_host, write_netrc_entry};
use trak_core::output::format_command;
use trak_core::{IssueTracker, print_error, print_info, print_success, print_warning};
use trak_jira::auth::check_jira_credentials;
use trak_jira::create_jira_client;

use crate::clients;

/// Command for credential management
#[derive(Args)]
pub struct CredsArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: CredsSubcommands,
}

/// Subcommands for the creds command
#[derive(Subcommand)]
pub enum CredsSubcommands {
  /// Check if credentials are properly configured
  #[command(long_about = "Checks that credentials for the configured Jira host are available.\n\n\
                      Looks at the [authentication] table of tracker.toml and at your .netrc\n\
                      file, and checks the .netrc permissions. With --verify the credentials\n\
                      are also sent to Jira.")]
  Check {
    /// Ask Jira whether the credentials are accepted
    #[arg(long)]
    verify: bool,
  },

  /// Store credentials in .netrc
  #[command(long_about = "Stores a username and API token in your .netrc file.\n\n\
                      The entry is written for the configured Jira host unless --machine\n\
                      is given. The token is read from standard input when --token is\n\
                      omitted. The credentials are validated against Jira first unless\n\
                      --skip-verify is passed.")]
  Set {
    /// Atlassian account email or Jira username
    #[arg(long, short = 'u')]
    username: String,

    /// API token or password
    #[arg(long)]
    token: Option<String>,

    /// .netrc machine name (defaults to the configured Jira host)
    #[arg(long)]
    machine: Option<String>,

    /// Store without checking the credentials against Jira
    #[arg(long)]
    skip_verify: bool,
  },
}

/// Handle the creds command
pub(crate) fn handle_creds_command(creds: CredsArgs) -> Result<()> {
  match creds.subcommand {
    CredsSubcommands::Check { verify } => handle_check_command(verify),
    CredsSubcommands::Set {
      username,
      token,
      machine,
      skip_verify,
    } => handle_set_command(&username, token, machine, skip_verify),
  }
}

fn handle_check_command(verify: bool) -> Result<()> {
  let (_, config) = clients::load_config()?;
  let home = clients::get_home_dir()?;
  let base_url = config.resolved_base_url()?;

  if config.authentication.is_some() {
    print_success("Credentials configured in tracker.toml.");
  } else {
    let netrc_path = get_netrc_path(&home);
    if !netrc_path.exists() {
      print_error("No .netrc file found.");
      println!("Create a .netrc file at {} with your credentials.", netrc_path.display());
      return Ok(());
    }
    warn_on_insecure_permissions(&netrc_path)?;

    if check_jira_credentials(&home, &base_url)? {
      print_success("Jira credentials found.");
    } else {
      print_warning("No Jira credentials found.");
      println!(
        "Add credentials for machine '{}' or '{FALLBACK_MACHINE}' to your .netrc file, or run {}.",
        normalize_host(&base_url),
        format_command("trak creds set --username <email>")
      );
      return Ok(());
    }
  }

  if verify {
    let (rt, tracker) = clients::create_tracker_runtime()?;
    if rt.block_on(tracker.is_authenticated())? {
      print_success(&format!("Jira accepted the credentials for {base_url}."));
    } else {
      bail!("Jira rejected the credentials for {base_url}");
    }
  }
  Ok(())
}

#[cfg(unix)]
fn warn_on_insecure_permissions(path: &std::path::Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let mode = std::fs::metadata(path)?.permissions().mode();
  if mode & 0o077 != 0 {
    print_warning("Your .netrc file has insecure permissions.");
    println!(
      "For security, change permissions to 600: {}",
      format_command(&format!("chmod 600 {}", path.display()))
    );
  } else {
    print_success(".netrc file has secure permissions.");
  }
  Ok(())
}

#[cfg(not(unix))]
fn warn_on_insecure_permissions(_path: &std::path::Path) -> Result<()> {
  Ok(())
}

fn read_token() -> Result<String> {
  print!("Enter your Jira API token: ");
  io::stdout().flush()?;
  let mut token = String::new();
  io::stdin().read_line(&mut token)?;
  Ok(token.trim().to_string())
}

fn handle_set_command(username: &str, token: Option<String>, machine: Option<String>, skip_verify: bool) -> Result<()> {
  let (_, config) = clients::load_config()?;
  let home = clients::get_home_dir()?;
  let base_url = config.resolved_base_url()?;

  let token = match token {
    Some(token) => token,
    None => read_token()?,
  };
  if token.is_empty() {
    bail!("API token cannot be empty");
  }

  if !skip_verify {
    print_info("Validating Jira credentials...");
    let rt = Runtime::new().context("Failed to create async runtime")?;
    let client = create_jira_client(&base_url, username, &token);
    if !rt.block_on(client.test_connection())? {
      print_info("Common issues:");
      println!("  • Make sure your email is correct");
      println!("  • Verify your API token is valid and not expired");
      println!("  • Check that the base URL is correct (e.g., https://mycompany.atlassian.net)");
      bail!("Jira rejected the credentials for {base_url}");
    }
    print_success("Jira credentials validated successfully!");
  }

  let machine = machine.unwrap_or_else(|| normalize_host(&base_url));
  let netrc_path = get_netrc_path(&home);
  write_netrc_entry(&netrc_path, &machine, username, &token)?;
  print_success(&format!("Stored credentials for '{machine}' in {}", netrc_path.display()));
  Ok(())
}
