// src/roster.rs
// =============================================================================
// The master-submitter roster: a plain text file listing users who submitted
// to the master repository, one `username,provider` pair per line.
//
// --report-master-submitters writes it after a run.
// --batch reads it back and re-runs extraction once per listed user.
//
// Blank lines and lines starting with '#' are ignored when reading. Lines
// that do not parse are skipped with a warning. A missing file simply
// means there is no roster yet.
// =============================================================================

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

use crate::forge::Provider;
use crate::submission::Submission;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RosterEntry {
    pub username: String,
    pub provider: Provider,
}

impl RosterEntry {
    fn parse(line: &str) -> Option<Self> {
        let (username, provider) = line.split_once(',')?;
        let username = username.trim();
        if username.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            provider: provider.parse().ok()?,
        })
    }
}

// Users with at least one submission recorded in the master repository,
// in order of first appearance
pub fn master_submitters(submissions: &[Submission], provider: Provider) -> Vec<RosterEntry> {
    let mut seen = HashSet::new();
    submissions
        .iter()
        .filter(|s| s.is_codepath_submission())
        .filter(|s| seen.insert(s.student.to_lowercase()))
        .map(|s| RosterEntry {
            username: s.student.clone(),
            provider,
        })
        .collect()
}

pub fn write_roster(path: &Path, entries: &[RosterEntry]) -> Result<()> {
    let mut contents = String::new();
    for entry in entries {
        // Writing into a String cannot fail
        let _ = writeln!(contents, "{},{}", entry.username, entry.provider);
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write roster to {}", path.display()))
}

// Reads the roster back
//
// A file that does not exist yet is Ok(None): no run has written it.
pub fn read_roster(path: &Path) -> Result<Option<Vec<RosterEntry>>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read roster from {}", path.display()))
        }
    };

    let mut entries = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match RosterEntry::parse(line) {
            Some(entry) => entries.push(entry),
            None => warn!(line = index + 1, content = line, "skipping malformed roster line"),
        }
    }
    Ok(Some(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::{Issue, MergeRequest};
    use crate::submission::{Attribution, CommentId, Placement};

    fn who(student: &str) -> Attribution {
        Attribution {
            student: student.into(),
            owner_name: student.into(),
            repo_name: "chatbox".into(),
        }
    }

    #[test]
    fn test_master_submitters_unique_in_order() {
        let to_master = |student: &str| {
            Submission::pull_request(
                &who(student),
                Placement::master("codepath/chatbox", &format!("{student}/chatbox")),
                &MergeRequest::default(),
            )
        };
        let in_fork = Submission::comment(
            &who("carol"),
            Placement::fork("carol/chatbox"),
            &Issue::default(),
            CommentId::Note(1),
            None,
            None,
        );

        let subs = vec![to_master("bob"), in_fork, to_master("alice"), to_master("Bob")];
        let names: Vec<String> = master_submitters(&subs, Provider::Gitlab)
            .into_iter()
            .map(|e| e.username)
            .collect();
        assert_eq!(names, vec!["bob", "alice"]);
    }

    #[test]
    fn test_roster_file_round_trip_and_tolerance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("master_submitters.txt");

        let entries = vec![
            RosterEntry {
                username: "alice".into(),
                provider: Provider::Gitlab,
            },
            RosterEntry {
                username: "bob".into(),
                provider: Provider::Github,
            },
        ];
        write_roster(&path, &entries).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "alice,gitlab\nbob,github\n"
        );

        fs::write(
            &path,
            "# generated\nalice,gitlab\n\nnot-a-pair\n,gitlab\ncarol,bitbucket\n bob , GitHub \n",
        )
        .unwrap();
        assert_eq!(read_roster(&path).unwrap(), Some(entries));
    }

    #[test]
    fn test_missing_roster_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_roster(&dir.path().join("absent.txt")).unwrap(), None);
    }

    #[test]
    fn test_unreadable_roster_is_an_error() {
        // A directory exists but cannot be read as a file
        let dir = tempfile::tempdir().unwrap();
        assert!(read_roster(dir.path()).is_err());
    }
}
