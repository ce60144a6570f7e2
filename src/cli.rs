// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There are no subcommands: one invocation scans the forks of one master
// project. Everything else is a flag that narrows or widens the scan, or
// changes how the result is printed.
//
// --master-project is optional at the parser level on purpose: when it is
// missing we print a short usage guide and exit with code 1 instead of
// clap's generic error (see main.rs).
// =============================================================================

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::forge::Provider;

#[derive(Parser, Debug)]
#[command(
    name = "submission-scout",
    version = "0.1.0",
    about = "Collect and grade student submissions from the forks of a course project",
    long_about = "submission-scout walks the forks of a master project on GitLab or GitHub, \
                  turns student comments and merge requests into submissions, checks each one \
                  for an attachment and issue references, and prints a grouped report."
)]
pub struct Cli {
    /// Path of the master project, e.g. "codepath/chatbox" or a full project URL
    #[arg(long, value_name = "PATH")]
    pub master_project: Option<String>,

    /// Only report the fork owned by this user
    #[arg(long, value_name = "USERNAME")]
    pub student: Option<String>,

    /// API token. Falls back to GITLAB_TOKEN or GITHUB_TOKEN
    #[arg(long)]
    pub token: Option<String>,

    /// Hosting platform to query
    #[arg(long, value_enum, default_value_t = Provider::Gitlab)]
    pub provider: Provider,

    /// API root, for self-hosted instances (defaults to the public service)
    ///
    /// For GitLab this is the instance root (the /api/v4 suffix is added).
    /// For GitHub Enterprise this is the API root, e.g. https://ghe.example.com/api/v3
    #[arg(long, alias = "gitlab-url", value_name = "URL", env = "SCOUT_BASE_URL")]
    pub base_url: Option<String>,

    /// Keep submissions dated on or after this day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<NaiveDate>,

    /// Keep submissions dated on or before this day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end_date: Option<NaiveDate>,

    /// Also list closed issues and closed/merged merge requests
    #[arg(long)]
    pub include_closed: bool,

    /// Also collect comments and merge requests recorded in the master project
    #[arg(long)]
    pub include_master: bool,

    /// Count an issue description with an attachment as a comment submission
    #[arg(long)]
    pub include_descriptions: bool,

    /// Write the users who submitted to the master project to the roster file
    #[arg(long)]
    pub report_master_submitters: bool,

    /// Re-run the scan once for every user listed in the roster file
    #[arg(long)]
    pub batch: bool,

    /// Roster file used by --report-master-submitters and --batch
    #[arg(long, value_name = "PATH", default_value = "master_repo_submitters.txt")]
    pub roster: PathBuf,

    /// Output results in JSON format instead of the text report
    #[arg(long)]
    pub json: bool,
}


// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is master_project an Option?
//    - clap would reject a missing required flag with its own message
//    - We want our own usage guide and a specific exit code, so we take
//      the value as optional and check it ourselves
//
// 2. How do typed flags work?
//    - clap calls FromStr on the raw text, so NaiveDate parses "2024-01-31"
//      and a bad date is rejected before our code runs
//    - value_enum uses the ValueEnum derive on Provider to list the choices
//
// 3. What is env = "..."?
//    - With the 'env' feature, a flag can fall back to an environment variable
//    - The token is resolved in config.rs instead, because the variable
//      name depends on the provider
// -----------------------------------------------------------------------------
