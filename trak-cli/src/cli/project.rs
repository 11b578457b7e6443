//! # Project Command

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use trak_core::{VendorResponse, print_info};
use trak_jira::PagedService;

use super::filters::PageArgs;
use super::render::{print_json, print_project_table, print_vendor_error};
use crate::clients;

/// Command for projects
#[derive(Args)]
pub struct ProjectArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: ProjectSubcommands,
}

/// Subcommands for the project command
#[derive(Subcommand)]
pub enum ProjectSubcommands {
  /// List the projects visible to you
  #[command(alias = "ls")]
  List {
    #[command(flatten)]
    page: PageArgs,

    /// Print the normalized records as JSON
    #[arg(long)]
    json: bool,
  },

  /// Show one project
  View {
    /// Project key or id
    #[arg(required = true, index = 1)]
    project: String,

    /// Print the normalized record as JSON
    #[arg(long)]
    json: bool,
  },
}

/// Handle the project command
pub(crate) fn handle_project_command(project: ProjectArgs) -> Result<()> {
  let (rt, tracker) = clients::create_tracker_runtime()?;
  let mut service = tracker.client().projects();

  match project.subcommand {
    ProjectSubcommands::List { page, json } => {
      service.set_page(page.to_page(service.limit()));
      let reply = rt.block_on(service.get_all()).context("Failed to list projects")?;
      match reply {
        VendorResponse::VendorError(messages) => print_vendor_error(&messages),
        reply if json => print_json(&reply.into_records())?,
        VendorResponse::Empty => print_info("No projects visible with these credentials."),
        VendorResponse::Data(projects) => print_project_table(&projects),
      }
      Ok(())
    }
    ProjectSubcommands::View { project, json } => {
      let reply = rt
        .block_on(service.get_by_id(&project))
        .with_context(|| format!("Failed to fetch project {project}"))?;
      match reply {
        VendorResponse::Data(found) if json => print_json(&found)?,
        VendorResponse::Data(found) => {
          println!("{} {}", found.key.bright_blue().bold(), found.name.bold());
          println!("  {:<5} {}", "Id:", found.id);
          if let Some(url) = &found.url {
            println!("  {:<5} {}", "URL:", url.dimmed());
          }
        }
        VendorResponse::Empty => print_info(&format!("Project {project} returned no data.")),
        VendorResponse::VendorError(messages) => print_vendor_error(&messages),
      }
      Ok(())
    }
  }
}
