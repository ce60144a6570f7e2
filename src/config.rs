// src/config.rs
// =============================================================================
// Turns parsed CLI flags into one resolved configuration.
//
// Resolution happens once, here, so the rest of the program never looks at
// the environment:
// - token:    --token > GITLAB_TOKEN / GITHUB_TOKEN > none
// - base URL: --base-url > the provider's public API
// - project:  a full project URL is reduced to its "owner/name" path
//
// The environment lookup is passed in as a closure so tests can resolve a
// config without touching the process environment.
// =============================================================================

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::cli::Cli;
use crate::forge::Provider;
use crate::submission::ExtractOptions;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--master-project is required")]
    MissingMasterProject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub base_url: String,
    pub token: Option<String>,
    pub master_project: String,
    pub extract: ExtractOptions,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub output: OutputFormat,
    pub roster: PathBuf,
    pub report_master_submitters: bool,
    pub batch: bool,
}

impl Config {
    // Parameters:
    //   cli: parsed command-line flags
    //   env: environment lookup, usually |key| std::env::var(key).ok()
    pub fn from_cli<F>(cli: Cli, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let master_project = cli
            .master_project
            .as_deref()
            .map(normalize_project_path)
            .filter(|path| !path.is_empty())
            .ok_or(ConfigError::MissingMasterProject)?;

        let base_url = cli
            .base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .unwrap_or(cli.provider.default_base_url())
            .to_string();

        Ok(Self {
            provider: cli.provider,
            base_url,
            token: resolve_token(cli.token.as_deref(), cli.provider, env),
            master_project,
            extract: ExtractOptions {
                student: cli.student.filter(|s| !s.trim().is_empty()),
                include_master: cli.include_master,
                include_closed: cli.include_closed,
                include_descriptions: cli.include_descriptions,
            },
            start_date: cli.start_date,
            end_date: cli.end_date,
            output: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            roster: cli.roster,
            report_master_submitters: cli.report_master_submitters,
            batch: cli.batch,
        })
    }

    /// Root of the web UI, used to build links in the report
    pub fn web_base(&self) -> String {
        match self.provider {
            Provider::Gitlab => self.base_url.clone(),
            Provider::Github => {
                if self.base_url == Provider::Github.default_base_url() {
                    "https://github.com".to_string()
                } else {
                    // GitHub Enterprise serves its API under /api/v3
                    self.base_url.trim_end_matches("/api/v3").to_string()
                }
            }
        }
    }
}

// Picks the token to authenticate with
//
// An empty flag or empty variable counts as absent.
pub fn resolve_token<F>(flag: Option<&str>, provider: Provider, env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    flag.map(str::to_string)
        .filter(|t| !t.trim().is_empty())
        .or_else(|| env(provider.token_env_var()).filter(|t| !t.trim().is_empty()))
        .map(|t| t.trim().to_string())
}

// Reduces whatever the user typed to a project path
//
// Accepts "owner/name", "https://gitlab.com/owner/name",
// "github.com/owner/name.git" and similar.
pub fn normalize_project_path(input: &str) -> String {
    let trimmed = input.trim();
    let without_scheme = trimmed
        .trim_start_matches("https://")
        .trim_start_matches("http://");

    // Only strip a host when a scheme was given or the first segment looks
    // like one ("gitlab.com/...")
    let path = match without_scheme.split_once('/') {
        Some((first, rest)) if without_scheme != trimmed || first.contains('.') => rest,
        _ => without_scheme,
    };

    path.trim_matches('/')
        .trim_end_matches(".git")
        .trim_end_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rstest::rstest;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["submission-scout"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[rstest]
    #[case("codepath/chatbox", "codepath/chatbox")]
    #[case("https://gitlab.com/codepath/chatbox", "codepath/chatbox")]
    #[case("https://gitlab.com/group/sub/chatbox/", "group/sub/chatbox")]
    #[case("github.com/codepath/chatbox.git", "codepath/chatbox")]
    #[case("http://git.example.edu/course/lab1", "course/lab1")]
    #[case("  /codepath/chatbox/  ", "codepath/chatbox")]
    fn test_normalize_project_path(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_project_path(input), expected);
    }

    #[test]
    fn test_token_flag_beats_environment() {
        let env = |key: &str| (key == "GITLAB_TOKEN").then(|| "from-env".to_string());
        assert_eq!(
            resolve_token(Some("from-flag"), Provider::Gitlab, env),
            Some("from-flag".to_string())
        );
        assert_eq!(
            resolve_token(None, Provider::Gitlab, env),
            Some("from-env".to_string())
        );
        assert_eq!(resolve_token(Some(""), Provider::Gitlab, env), Some("from-env".to_string()));
        // The GitHub variable is a different one
        assert_eq!(resolve_token(None, Provider::Github, env), None);
    }

    #[test]
    fn test_missing_master_project() {
        let result = Config::from_cli(parse(&[]), no_env);
        assert_eq!(result.unwrap_err(), ConfigError::MissingMasterProject);

        let result = Config::from_cli(parse(&["--master-project", "https://gitlab.com/"]), no_env);
        assert_eq!(result.unwrap_err(), ConfigError::MissingMasterProject);
    }

    #[test]
    fn test_defaults_per_provider() {
        let config = Config::from_cli(parse(&["--master-project", "a/b"]), no_env).unwrap();
        assert_eq!(config.base_url, "https://gitlab.com");
        assert_eq!(config.web_base(), "https://gitlab.com");
        assert_eq!(config.output, OutputFormat::Text);
        assert_eq!(config.token, None);

        let config = Config::from_cli(
            parse(&["--master-project", "a/b", "--provider", "github", "--json"]),
            no_env,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://api.github.com");
        assert_eq!(config.web_base(), "https://github.com");
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_self_hosted_base_urls() {
        let config = Config::from_cli(
            parse(&["--master-project", "a/b", "--base-url", "https://git.example.edu/"]),
            no_env,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://git.example.edu");
        assert_eq!(config.web_base(), "https://git.example.edu");

        let config = Config::from_cli(
            parse(&[
                "--master-project",
                "a/b",
                "--provider",
                "github",
                "--base-url",
                "https://ghe.example.com/api/v3",
            ]),
            no_env,
        )
        .unwrap();
        assert_eq!(config.web_base(), "https://ghe.example.com");
    }

    #[test]
    fn test_extract_options_from_flags() {
        let config = Config::from_cli(
            parse(&[
                "--master-project",
                "a/b",
                "--student",
                "alice",
                "--include-master",
                "--include-descriptions",
            ]),
            no_env,
        )
        .unwrap();
        assert_eq!(
            config.extract,
            ExtractOptions {
                student: Some("alice".into()),
                include_master: true,
                include_closed: false,
                include_descriptions: true,
            }
        );
    }
}
