//! Terminal and JSON rendering of tracker records.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use trak_core::output::{format_issue_key, format_issue_state, format_labels, format_timestamp, print_header};
use trak_core::{NormalizedComment, NormalizedIssue, NormalizedProject, print_warning};

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")?;
  println!("{json}");
  Ok(())
}

/// Shorten `text` to `max` characters, marking the cut with an ellipsis.
pub fn truncate_string(text: &str, max: usize) -> String {
  if text.chars().count() <= max {
    return text.to_string();
  }
  let kept: String = text.chars().take(max.saturating_sub(1)).collect();
  format!("{kept}…")
}

pub fn format_date(date: Option<&DateTime<FixedOffset>>) -> String {
  date
    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
    .unwrap_or_else(|| "-".to_string())
}

/// The key when Jira sent one, the id otherwise.
pub fn issue_ref(issue: &NormalizedIssue) -> &str {
  issue.key.as_deref().unwrap_or(&issue.number)
}

pub fn print_vendor_error(messages: &[String]) {
  print_warning("Jira reported an error:");
  for message in messages {
    println!("  {message}");
  }
}

/// Detailed view of one issue.
pub fn print_issue(issue: &NormalizedIssue, browse_url: &str) {
  println!("\n{} {}", format_issue_key(issue_ref(issue)), issue.title.bold());
  println!("  {:<10} {}", "Status:", format_issue_state(issue.state.as_deref()));
  println!("  {:<10} {}", "Reporter:", issue.user);
  println!(
    "  {:<10} {}",
    "Assignee:",
    issue.assignee.as_deref().unwrap_or("Unassigned")
  );
  println!("  {:<10} {}", "Labels:", format_labels(&issue.labels));
  if let Some(milestone) = &issue.milestone {
    println!("  {:<10} {}", "Version:", milestone);
  }
  println!(
    "  {:<10} {}",
    "Created:",
    format_timestamp(&format_date(issue.created_at.as_ref()))
  );
  println!(
    "  {:<10} {}",
    "Updated:",
    format_timestamp(&format_date(issue.updated_at.as_ref()))
  );
  println!("  {:<10} {}", "URL:", browse_url.dimmed());

  if !issue.body.trim().is_empty() {
    print_header("Description");
    for line in issue.body.lines() {
      println!("  {line}");
    }
  }
  println!();
}

pub fn print_issue_table(issues: &[NormalizedIssue]) {
  #[derive(Tabled)]
  struct IssueRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Summary")]
    summary: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Updated")]
    updated: String,
  }

  let rows: Vec<IssueRow> = issues
    .iter()
    .map(|issue| IssueRow {
      key: issue_ref(issue).to_string(),
      summary: truncate_string(&issue.title, 50),
      status: issue.state.clone().unwrap_or_else(|| "-".to_string()),
      assignee: issue.assignee.clone().unwrap_or_else(|| "Unassigned".to_string()),
      updated: format_date(issue.updated_at.as_ref()),
    })
    .collect();

  println!("{}", Table::new(rows).with(Style::sharp()));
}

pub fn print_comments(comments: &[NormalizedComment]) {
  for comment in comments {
    println!(
      "\n{} {} {}",
      comment.user.bold(),
      format_timestamp(&format_date(comment.created_at.as_ref())),
      format!("#{}", comment.id).dimmed()
    );
    for line in comment.body.lines() {
      println!("  {line}");
    }
  }
  println!();
}

pub fn print_project_table(projects: &[NormalizedProject]) {
  #[derive(Tabled)]
  struct ProjectRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Id")]
    id: String,
  }

  let rows: Vec<ProjectRow> = projects
    .iter()
    .map(|project| ProjectRow {
      key: project.key.clone(),
      name: truncate_string(&project.name, 60),
      id: project.id.clone(),
    })
    .collect();

  println!("{}", Table::new(rows).with(Style::sharp()));
}
