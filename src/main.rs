// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load .env, set up logging, parse command-line arguments
// 2. Resolve them into a Config (token, base URL, project path)
// 3. Look up the master project (fatal if it cannot be found)
// 4. Extract submissions from its forks, once or once per roster user
// 5. Apply the date filter and print the report
// 6. Exit with proper code (0 = success, 1 = missing project or lookup failed)
//
// Progress and warnings are logged to stderr through `tracing`. The report
// itself is the only thing written to stdout, so it can be piped.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod api; // src/api/ - HTTP client, pagination, API errors
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - resolved settings
mod dates; // src/dates/ - date parsing, filtering, per-student ranges
mod detect; // src/detect/ - media and issue-reference detection
mod forge; // src/forge/ - platform-neutral records and the source trait
mod github; // src/github/ - GitHub adapter
mod gitlab; // src/gitlab/ - GitLab adapter
mod report; // src/report/ - text and JSON output
mod roster; // src/roster.rs - master-submitter side file
mod submission; // src/submission/ - extraction and validation

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use std::io::{self, Write};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use api::log_api_error;
use cli::Cli;
use config::{Config, ConfigError, OutputFormat};
use forge::{ForgeSource, Provider};
use github::GitHubSource;
use gitlab::GitLabSource;
use report::ReportContext;
use submission::{extract_submissions, ForkScan, MasterProject, Submission};

// Current-thread runtime: every request is awaited one after another
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is not an error
    dotenvy::dotenv().ok();
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG overrides the default filter, e.g. RUST_LOG=submission_scout=debug
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("submission_scout=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

// This is the main application logic
// Returns:
//   Ok(0) = report printed
//   Ok(1) = no master project given, or it could not be fetched
//   Err   = unexpected error (also exit code 1)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let config = match Config::from_cli(cli, |key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(ConfigError::MissingMasterProject) => {
            print_usage_guide();
            return Ok(1);
        }
    };

    if config.token.is_none() {
        warn!(
            variable = config.provider.token_env_var(),
            "no token configured, only public projects will be visible"
        );
    }

    let source = build_source(&config)?;

    info!(project = %config.master_project, provider = %config.provider, "looking up master project");
    let master = match source.project(&config.master_project).await {
        Ok(project) => project,
        Err(e) => {
            log_api_error(&e);
            if e.is_not_found() {
                error!(project = %config.master_project, "master project not found");
            } else {
                error!(project = %config.master_project, "master project could not be fetched");
            }
            return Ok(1);
        }
    };
    let Some(master) = MasterProject::new(master) else {
        error!(project = %config.master_project, "master project has no id");
        return Ok(1);
    };

    let submissions = if config.batch {
        run_batch(source.as_ref(), &master, &config).await
    } else {
        extract_submissions(source.as_ref(), &master, &config.extract).await
    };

    if config.report_master_submitters {
        let entries = roster::master_submitters(&submissions, source.provider());
        match roster::write_roster(&config.roster, &entries) {
            Ok(()) => info!(
                count = entries.len(),
                path = %config.roster.display(),
                "wrote master repository submitters"
            ),
            Err(e) => warn!("{:#}", e),
        }
    }

    let submissions = if config.start_date.is_some() || config.end_date.is_some() {
        let filtered = dates::filter_by_date(&submissions, config.start_date, config.end_date);
        info!(
            kept = filtered.len(),
            total = submissions.len(),
            "applied date filter"
        );
        filtered
    } else {
        submissions
    };

    print_report(&submissions, &config)?;
    Ok(0)
}

fn build_source(config: &Config) -> Result<Box<dyn ForgeSource>> {
    let token = config.token.as_deref();
    let source: Box<dyn ForgeSource> = match config.provider {
        Provider::Gitlab => Box::new(
            GitLabSource::new(&config.base_url, token).context("failed to set up GitLab client")?,
        ),
        Provider::Github => Box::new(
            GitHubSource::new(&config.base_url, token).context("failed to set up GitHub client")?,
        ),
    };
    Ok(source)
}

// Re-runs extraction once for every roster user on this provider
//
// Forks and master activity are loaded once and shared by every user.
// Without a usable roster this is a single normal run.
async fn run_batch(
    source: &dyn ForgeSource,
    master: &MasterProject,
    config: &Config,
) -> Vec<Submission> {
    let entries = match roster::read_roster(&config.roster) {
        Ok(Some(entries)) => entries,
        Ok(None) => {
            warn!(path = %config.roster.display(), "no roster file found, running a single scan");
            Vec::new()
        }
        Err(e) => {
            warn!("{:#}, running a single scan", e);
            Vec::new()
        }
    };
    let users: Vec<_> = entries
        .into_iter()
        .filter(|entry| entry.provider == config.provider)
        .collect();

    let scan = ForkScan::load(source, master, &config.extract).await;

    if users.is_empty() {
        warn!(path = %config.roster.display(), "roster lists no users for this provider");
        return scan.submissions_for(config.extract.student.as_deref()).await;
    }

    info!(users = users.len(), "running batch extraction");
    let mut all = Vec::new();
    for entry in users {
        all.extend(scan.submissions_for(Some(&entry.username)).await);
    }
    all
}

// Prints results either as the text report or JSON
fn print_report(submissions: &[Submission], config: &Config) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.output {
        OutputFormat::Json => report::write_json(&mut out, submissions)?,
        OutputFormat::Text => {
            let context = ReportContext {
                provider: config.provider,
                web_base: config.web_base(),
            };
            report::write_text(&mut out, submissions, &context)
                .context("failed to write report")?;
        }
    }
    out.flush().context("failed to flush stdout")?;
    Ok(())
}

fn print_usage_guide() {
    println!("❌ --master-project is required");
    println!();
    println!("Usage:");
    println!("  submission-scout --master-project <PATH> [OPTIONS]");
    println!();
    println!("Examples:");
    println!("  submission-scout --master-project codepath/chatbox");
    println!("  submission-scout --master-project codepath/chatbox --student alice --include-master");
    println!("  submission-scout --master-project codepath/chatbox --start-date 2024-01-01 --end-date 2024-01-31");
    println!("  submission-scout --provider github --master-project codepath/chatbox --json");
    println!();
    println!("Set GITLAB_TOKEN or GITHUB_TOKEN (or pass --token) to read private projects.");
    println!("Run with --help for every option.");
}


// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Box<dyn ForgeSource>?
//    - GitLabSource and GitHubSource are different types
//    - A trait object lets one variable hold either, chosen at runtime
//    - source.as_ref() turns the Box into the &dyn ForgeSource the
//      extractor takes
//
// 2. What is let-else?
//    - `let Some(x) = value else { ... };` binds x or runs the else block,
//      which must leave the function (here with return)
//
// 3. Why lock stdout?
//    - println! locks stdout on every call
//    - Locking once and writing through the handle is faster for long reports
// -----------------------------------------------------------------------------
