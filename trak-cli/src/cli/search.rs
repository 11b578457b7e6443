//! # Search Command

use anyhow::{Context, Result};
use clap::Args;
use trak_core::{FilterCriteria, NormalizedIssue, TrackerResult, VendorResponse, print_info};
use trak_jira::{PagedService, SearchService, build_jql};

use super::filters::{FilterArgs, PageArgs};
use super::render::{print_issue_table, print_json, print_vendor_error};
use crate::clients;

/// Command for searching issues
#[derive(Args)]
pub struct SearchArgs {
  #[command(flatten)]
  filters: FilterArgs,

  /// Raw JQL expression, sent as-is (field filters are ignored)
  #[arg(long)]
  jql: Option<String>,

  #[command(flatten)]
  page: PageArgs,

  /// Print the JQL that would be sent and exit
  #[arg(long)]
  dry_run: bool,

  /// Print the normalized records as JSON
  #[arg(long)]
  json: bool,
}

/// Handle the search command
pub(crate) fn handle_search_command(args: SearchArgs) -> Result<()> {
  let criteria = args.filters.to_criteria();

  if args.dry_run {
    println!("{}", args.jql.clone().unwrap_or_else(|| build_jql(&criteria)));
    return Ok(());
  }

  let (rt, tracker) = clients::create_tracker_runtime()?;
  let mut search = tracker.client().search();
  search.set_page(args.page.to_page(search.limit()));

  let reply = rt
    .block_on(run_search(&search, args.jql.as_deref(), &criteria))
    .context("Search failed")?;

  match reply {
    VendorResponse::VendorError(messages) => print_vendor_error(&messages),
    reply if args.json => print_json(&reply.into_records())?,
    VendorResponse::Empty => print_info("No issues found."),
    VendorResponse::Data(issues) => print_issue_table(&issues),
  }
  Ok(())
}

async fn run_search(
  search: &SearchService<'_>,
  jql: Option<&str>,
  criteria: &FilterCriteria,
) -> TrackerResult<VendorResponse<Vec<NormalizedIssue>>> {
  match jql {
    Some(jql) => search.search_jql(jql).await,
    None => search.search(criteria).await,
  }
}
