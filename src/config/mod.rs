pub mod toml_config;

use crate::domain::model::ProfileRequest;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::collections::HashMap;
use std::time::Duration;
use toml_config::{
    timeout_from_secs, TomlConfig, DEFAULT_BASE_URL, DEFAULT_OUTPUT_PATH,
    DEFAULT_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS,
};

#[cfg(feature = "cli")]
use clap::{Args, Parser};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "career-helper")]
#[command(about = "Submit a career profile and render the suggested roadmaps as HTML")]
pub struct CliConfig {
    /// TOML configuration file; flags given here override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Backend base URL, e.g. http://localhost:5000
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Directory the rendered pages are written to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Request timeout in seconds; 0 waits indefinitely
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Print this results page to stdout instead of only writing files
    #[arg(long)]
    pub page: Option<usize>,

    /// Only check that the backend is up
    #[arg(long)]
    pub health: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Args)]
pub struct ProfileArgs {
    #[arg(long, default_value = "")]
    pub skills: String,
    #[arg(long, default_value = "")]
    pub interests: String,
    #[arg(long, default_value = "")]
    pub strengths: String,
    #[arg(long, default_value = "")]
    pub personality_traits: String,
    #[arg(long, default_value = "")]
    pub work_style: String,
    #[arg(long, default_value = "")]
    pub education: String,
    #[arg(long, default_value = "")]
    pub salary_expectations: String,
    #[arg(long, default_value = "")]
    pub tech_preference: String,
    #[arg(long, default_value = "")]
    pub learning_ability: String,
    #[arg(long, default_value = "")]
    pub past_projects: String,
}

#[cfg(feature = "cli")]
impl From<ProfileArgs> for ProfileRequest {
    fn from(args: ProfileArgs) -> Self {
        ProfileRequest {
            skills: args.skills,
            interests: args.interests,
            strengths: args.strengths,
            personality_traits: args.personality_traits,
            work_style: args.work_style,
            education: args.education,
            salary_expectations: args.salary_expectations,
            tech_preference: args.tech_preference,
            learning_ability: args.learning_ability,
            past_projects: args.past_projects,
        }
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file if one was named, then layers the flags on top.
    pub fn into_settings(self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };
        Ok(self.merge(file))
    }

    pub fn merge(self, file: Option<TomlConfig>) -> Settings {
        let mut settings = file.map(Settings::from).unwrap_or_default();

        if let Some(base_url) = self.api_base_url {
            settings.base_url = base_url;
        }
        if let Some(output_path) = self.output_path {
            settings.output_path = output_path;
        }
        if let Some(seconds) = self.timeout_seconds {
            settings.timeout_seconds = seconds;
        }
        settings.profile.merge_from(&self.profile.into());
        settings
    }
}

/// Effective settings after merging the config file and command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub output_path: String,
    pub timeout_seconds: u64,
    pub headers: HashMap<String, String>,
    pub write_all_pages: bool,
    pub profile: ProfileRequest,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            headers: HashMap::new(),
            write_all_pages: true,
            profile: ProfileRequest::default(),
        }
    }
}

impl From<TomlConfig> for Settings {
    fn from(config: TomlConfig) -> Self {
        Self {
            timeout_seconds: config.timeout_seconds(),
            headers: config.headers(),
            base_url: config.client.base_url,
            output_path: config.output.path,
            write_all_pages: config.output.write_all_pages,
            profile: config.profile,
        }
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn timeout(&self) -> Option<Duration> {
        timeout_from_secs(self.timeout_seconds)
    }

    fn headers(&self) -> HashMap<String, String> {
        self.headers.clone()
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_base_url", &self.base_url)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 0, MAX_TIMEOUT_SECONDS)?;
        for name in self.headers.keys() {
            validation::validate_header_name("headers", name)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_values() {
        let file = TomlConfig::from_toml_str(
            r#"
[client]
base_url = "https://file.example.com"
timeout_seconds = 60

[profile]
skills = "Go"
interests = "Distributed systems"
"#,
        )
        .unwrap();

        let cli = CliConfig::parse_from([
            "career-helper",
            "--api-base-url",
            "http://localhost:9000",
            "--skills",
            "Rust",
        ]);
        let settings = cli.merge(Some(file));

        assert_eq!(settings.base_url, "http://localhost:9000");
        assert_eq!(settings.timeout_seconds, 60);
        assert_eq!(settings.profile.skills, "Rust");
        assert_eq!(settings.profile.interests, "Distributed systems");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn defaults_apply_without_file() {
        let cli = CliConfig::parse_from(["career-helper", "--timeout-seconds", "0"]);
        let settings = cli.merge(None);

        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.output_path, DEFAULT_OUTPUT_PATH);
        assert_eq!(settings.timeout(), None);
        assert!(settings.profile.is_blank());
    }

    #[test]
    fn invalid_flag_values_fail_validation() {
        let cli = CliConfig::parse_from(["career-helper", "--api-base-url", "not a url"]);
        assert!(cli.merge(None).validate().is_err());

        let cli = CliConfig::parse_from(["career-helper", "--timeout-seconds", "99999"]);
        assert!(cli.merge(None).validate().is_err());
    }
}
