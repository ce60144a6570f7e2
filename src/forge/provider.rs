// src/forge/provider.rs
// =============================================================================
// Which hosting platform we are talking to.
// =============================================================================

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gitlab,
    Github,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Gitlab => "gitlab",
            Provider::Github => "github",
        }
    }

    /// Public API root used when no --base-url is given
    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::Gitlab => "https://gitlab.com",
            Provider::Github => "https://api.github.com",
        }
    }

    /// Environment variable consulted for a token when --token is absent
    pub fn token_env_var(self) -> &'static str {
        match self {
            Provider::Gitlab => "GITLAB_TOKEN",
            Provider::Github => "GITHUB_TOKEN",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gitlab" => Ok(Provider::Gitlab),
            "github" => Ok(Provider::Github),
            other => Err(format!("unknown provider '{other}'")),
        }
    }
}
