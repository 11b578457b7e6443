//! Helpers for reading and writing credentials stored in `.netrc` files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::creds::Credentials;

/// Returns the path to the `.netrc` file for the provided home directory.
///
/// ```
/// use std::path::Path;
/// use trak_core::creds::netrc::get_netrc_path;
///
/// let path = get_netrc_path(Path::new("/home/user"));
/// assert_eq!(path, Path::new("/home/user/.netrc"));
/// ```
pub fn get_netrc_path(home: &Path) -> PathBuf {
  home.join(".netrc")
}

/// One `machine` (or `default`) block.
#[derive(Debug, Default)]
struct NetrcEntry {
  machine: Option<String>,
  login: Option<String>,
  password: Option<String>,
}

impl NetrcEntry {
  fn credentials(&self) -> Option<Credentials> {
    match (&self.login, &self.password) {
      (Some(username), Some(password)) => Some(Credentials {
        username: username.clone(),
        password: password.clone(),
      }),
      _ => None,
    }
  }
}

/// Whether a line is a `#` comment. A `#` inside a token is part of it.
fn is_comment(line: &str) -> bool {
  line.trim_start().starts_with('#')
}

/// Tokenize netrc content, dropping comment lines.
fn tokens(content: &str) -> impl Iterator<Item = &str> {
  content
    .lines()
    .filter(|line| !is_comment(line))
    .flat_map(str::split_whitespace)
}

fn parse_entries(content: &str) -> Vec<NetrcEntry> {
  let mut entries = Vec::new();
  let mut current: Option<NetrcEntry> = None;
  let mut tokens = tokens(content);

  while let Some(token) = tokens.next() {
    match token {
      "machine" => {
        entries.extend(current.take());
        current = Some(NetrcEntry {
          machine: tokens.next().map(str::to_string),
          ..Default::default()
        });
      }
      "default" => {
        entries.extend(current.take());
        current = Some(NetrcEntry::default());
      }
      "login" => {
        if let Some(entry) = current.as_mut() {
          entry.login = tokens.next().map(str::to_string);
        }
      }
      "password" => {
        if let Some(entry) = current.as_mut() {
          entry.password = tokens.next().map(str::to_string);
        }
      }
      "account" | "macdef" => {
        tokens.next();
      }
      _ => {}
    }
  }
  entries.extend(current);
  entries
}

/// Parses a `.netrc` file and returns credentials for the requested machine.
///
/// Both single-line and multi-line layouts are accepted. Returns `Ok(None)`
/// when the machine is absent or its entry lacks a login or password. A
/// `default` block is not consulted; callers decide on their own fallbacks.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> Result<Option<Credentials>> {
  let content = fs::read_to_string(path).context("Failed to open .netrc file")?;

  Ok(
    parse_entries(&content)
      .iter()
      .find(|entry| entry.machine.as_deref() == Some(target_machine))
      .and_then(NetrcEntry::credentials),
  )
}

fn render_entry(machine: &str, username: &str, password: &str) -> String {
  format!("machine {machine}\n  login {username}\n  password {password}\n")
}

/// Writes or updates a `.netrc` entry for the given machine.
///
/// The existing block for the machine is replaced in place, wherever it ends:
/// at the next `machine` or `default` token, on the same line or a later one.
/// Lines without a token of that block are kept as written. Without an
/// existing block a new one is appended. On Unix the file mode is tightened to
/// `600`.
pub fn write_netrc_entry(path: &Path, machine: &str, username: &str, password: &str) -> Result<()> {
  let existing = if path.exists() {
    fs::read_to_string(path).context("Failed to read existing .netrc file")?
  } else {
    String::new()
  };

  let entry = render_entry(machine, username, password);
  let mut output = String::new();
  let mut replaced = false;
  let mut skipping = false;
  let mut takes_value = false;

  for line in existing.lines() {
    if is_comment(line) {
      if !skipping {
        push_line(&mut output, line);
      }
      continue;
    }

    let mut kept: Vec<&str> = Vec::new();
    let mut altered = false;
    let mut words = line.split_whitespace().peekable();
    while let Some(word) = words.next() {
      if takes_value {
        takes_value = false;
      } else {
        match word {
          "machine" => {
            skipping = words.peek() == Some(&machine);
            if skipping && !replaced {
              if !kept.is_empty() {
                push_line(&mut output, &kept.join(" "));
                kept.clear();
              }
              output.push_str(&entry);
              replaced = true;
            }
            takes_value = true;
          }
          "default" => skipping = false,
          "login" | "password" | "account" => takes_value = true,
          _ => {}
        }
      }

      if skipping {
        altered = true;
      } else {
        kept.push(word);
      }
    }

    if !altered {
      push_line(&mut output, line);
    } else if !kept.is_empty() {
      push_line(&mut output, &kept.join(" "));
    }
  }

  if !replaced {
    if !output.is_empty() && !output.ends_with("\n\n") {
      output.push('\n');
    }
    output.push_str(&entry);
  }

  fs::write(path, output).context("Failed to write .netrc file")?;

  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).context("Failed to restrict .netrc permissions")?;
  }

  Ok(())
}

fn push_line(output: &mut String, line: &str) {
  output.push_str(line);
  output.push('\n');
}

/// Normalizes a host URL by removing protocol prefixes and trailing slashes.
///
/// ```
/// use trak_core::creds::netrc::normalize_host;
///
/// assert_eq!(normalize_host("https://company.atlassian.net/"), "company.atlassian.net");
/// assert_eq!(normalize_host("http://jira.example.com"), "jira.example.com");
/// assert_eq!(normalize_host("my-jira-instance.com"), "my-jira-instance.com");
/// ```
pub fn normalize_host(raw_host: &str) -> String {
  raw_host
    .trim()
    .trim_start_matches("https://")
    .trim_start_matches("http://")
    .trim_end_matches('/')
    .to_string()
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;
  use trak_test_utils::NetrcGuard;

  use super::*;

  #[test]
  fn test_parse_multiple_machines() {
    let guard = NetrcGuard::new(
      r#"machine example.com
  login user1
  password pass1

machine jira.example.com login user2 password pass2
"#,
    );

    let creds = parse_netrc_file(guard.netrc_path(), "example.com").unwrap().unwrap();
    assert_eq!(creds.username, "user1");
    assert_eq!(creds.password, "pass1");

    let creds = parse_netrc_file(guard.netrc_path(), "jira.example.com").unwrap().unwrap();
    assert_eq!(creds.username, "user2");
    assert_eq!(creds.password, "pass2");

    assert!(parse_netrc_file(guard.netrc_path(), "missing.com").unwrap().is_none());
  }

  #[test]
  fn test_parse_incomplete_and_commented_entries() {
    let guard = NetrcGuard::new(
      r#"# tracker credentials
machine jira.example.com
  login someone@example.com
  # password still to be added

machine atlassian.net
  # the shared account
  login net@example.com
  password net-token
  account ignored

default login anonymous password guest
"#,
    );

    assert!(parse_netrc_file(guard.netrc_path(), "jira.example.com").unwrap().is_none());

    let creds = parse_netrc_file(guard.netrc_path(), "atlassian.net").unwrap().unwrap();
    assert_eq!(creds.username, "net@example.com");
    assert_eq!(creds.password, "net-token");
  }

  #[test]
  fn test_parse_empty_file() {
    let guard = NetrcGuard::new("");
    assert!(parse_netrc_file(guard.netrc_path(), "example.com").unwrap().is_none());
  }

  #[test]
  fn test_write_netrc_entry_new_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".netrc");

    write_netrc_entry(&path, "jira.example.com", "user", "token").unwrap();

    let creds = parse_netrc_file(&path, "jira.example.com").unwrap().unwrap();
    assert_eq!(creds.username, "user");
    assert_eq!(creds.password, "token");

    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      let mode = fs::metadata(&path).unwrap().permissions().mode();
      assert_eq!(mode & 0o077, 0);
    }
  }

  #[test]
  fn test_write_netrc_entry_replaces_existing_block() {
    let guard = NetrcGuard::new(
      r#"machine jira.example.com
  login olduser
  password oldpass

machine github.com
  login user2
  password pass2
"#,
    );

    write_netrc_entry(guard.netrc_path(), "jira.example.com", "newuser", "newpass").unwrap();
    write_netrc_entry(guard.netrc_path(), "atlassian.net", "cloud", "cloud-token").unwrap();

    let creds = parse_netrc_file(guard.netrc_path(), "jira.example.com").unwrap().unwrap();
    assert_eq!(creds.username, "newuser");
    assert_eq!(creds.password, "newpass");

    let creds = parse_netrc_file(guard.netrc_path(), "github.com").unwrap().unwrap();
    assert_eq!(creds.username, "user2");

    let creds = parse_netrc_file(guard.netrc_path(), "atlassian.net").unwrap().unwrap();
    assert_eq!(creds.password, "cloud-token");

    let content = fs::read_to_string(guard.netrc_path()).unwrap();
    assert_eq!(content.matches("machine jira.example.com").count(), 1);
  }

  #[test]
  fn test_hash_inside_password_survives_write_and_parse() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".netrc");

    write_netrc_entry(&path, "jira.example.com", "u", "abc#123").unwrap();

    let creds = parse_netrc_file(&path, "jira.example.com").unwrap().unwrap();
    assert_eq!(creds.username, "u");
    assert_eq!(creds.password, "abc#123");

    let guard = NetrcGuard::new("machine atlassian.net login net@example.com password to#ken#\n");
    let creds = parse_netrc_file(guard.netrc_path(), "atlassian.net").unwrap().unwrap();
    assert_eq!(creds.password, "to#ken#");
  }

  #[test]
  fn test_write_netrc_entry_keeps_default_block() {
    let guard = NetrcGuard::new(
      r#"machine jira.example.com
  login olduser
  password oldpass
default
  login anonymous
  password guest
"#,
    );

    write_netrc_entry(guard.netrc_path(), "jira.example.com", "newuser", "newpass").unwrap();

    let creds = parse_netrc_file(guard.netrc_path(), "jira.example.com").unwrap().unwrap();
    assert_eq!(creds.username, "newuser");

    let content = fs::read_to_string(guard.netrc_path()).unwrap();
    assert!(content.contains("default\n  login anonymous\n  password guest\n"));
    assert!(!content.contains("olduser"));
  }

  #[test]
  fn test_write_netrc_entry_single_line_layout() {
    let guard = NetrcGuard::new(
      "machine a.example.com login ua password pa machine b.example.com login ub password pb\n",
    );

    write_netrc_entry(guard.netrc_path(), "b.example.com", "new-b", "token-b").unwrap();

    let creds = parse_netrc_file(guard.netrc_path(), "b.example.com").unwrap().unwrap();
    assert_eq!(creds.username, "new-b");
    assert_eq!(creds.password, "token-b");

    let creds = parse_netrc_file(guard.netrc_path(), "a.example.com").unwrap().unwrap();
    assert_eq!(creds.username, "ua");

    let content = fs::read_to_string(guard.netrc_path()).unwrap();
    assert_eq!(content.matches("b.example.com").count(), 1);
    assert!(!content.contains("ub"));
  }

  #[test]
  fn test_write_netrc_entry_value_named_like_keyword() {
    let guard = NetrcGuard::new("machine jira.example.com login machine password default\n");

    write_netrc_entry(guard.netrc_path(), "atlassian.net", "cloud", "cloud-token").unwrap();

    let creds = parse_netrc_file(guard.netrc_path(), "jira.example.com").unwrap().unwrap();
    assert_eq!(creds.username, "machine");
    assert_eq!(creds.password, "default");
  }

  #[test]
  fn test_normalize_host_removes_scheme_and_trailing_slash() {
    assert_eq!(normalize_host("https://api.example.com/"), "api.example.com");
    assert_eq!(normalize_host("http://localhost:8080/"), "localhost:8080");
  }
}
