use crate::config::defaults;
use crate::core::convention::SourceClassifier;
use crate::core::fetcher::FetcherConfig;
use crate::core::harvest::HarvestSettings;
use crate::core::matcher::KeywordMatcher;
use crate::core::pipeline::OutputSettings;
use crate::domain::model::SourceEntry;
use crate::utils::error::{HarvestError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const OUTPUT_FORMATS: &[&str] = &["csv", "json"];

/// Whole run configuration. Every section is optional in the file and
/// falls back to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub http: HttpConfig,
    pub harvest: HarvestOptions,
    pub output: OutputConfig,
    pub sources: Vec<SourceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: defaults::DEFAULT_TIMEOUT_SECONDS,
            user_agent: defaults::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestOptions {
    pub max_listings_per_source: usize,
    pub courtesy_delay_ms: u64,
    pub ats_domains: Vec<String>,
    pub keywords: Vec<String>,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            max_listings_per_source: defaults::DEFAULT_MAX_LISTINGS_PER_SOURCE,
            courtesy_delay_ms: defaults::DEFAULT_COURTESY_DELAY_MS,
            ats_domains: defaults::default_ats_domains(),
            keywords: defaults::default_keywords(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_path: String,
    pub file_prefix: String,
    pub output_formats: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_path: defaults::DEFAULT_OUTPUT_PATH.to_string(),
            file_prefix: defaults::DEFAULT_FILE_PREFIX.to_string(),
            output_formats: vec!["csv".to_string()],
        }
    }
}

impl HarvestConfig {
    /// Built-in registry and keyword set.
    pub fn builtin() -> Self {
        Self {
            sources: defaults::default_sources(),
            ..Self::default()
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HarvestError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| HarvestError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(HarvestError::MissingConfigError {
                field: "sources".to_string(),
            });
        }
        for source in &self.sources {
            validation::validate_non_empty_string("sources.name", &source.name)?;
            validation::validate_url("sources.url", &source.url)?;
        }
        validation::validate_unique_names(
            "sources.name",
            self.sources.iter().map(|s| s.name.as_str()),
        )?;

        if self.keyword_matcher().terms().is_empty() {
            return Err(HarvestError::InvalidConfigValueError {
                field: "harvest.keywords".to_string(),
                value: format!("{:?}", self.harvest.keywords),
                reason: "At least one non-blank keyword is required".to_string(),
            });
        }

        validation::validate_positive_number(
            "http.timeout_seconds",
            self.http.timeout_seconds as usize,
            1,
        )?;
        validation::validate_non_empty_string("http.user_agent", &self.http.user_agent)?;
        validation::validate_positive_number(
            "harvest.max_listings_per_source",
            self.harvest.max_listings_per_source,
            1,
        )?;

        validation::validate_path("output.output_path", &self.output.output_path)?;
        validation::validate_non_empty_string("output.file_prefix", &self.output.file_prefix)?;
        validation::validate_allowed_values(
            "output.output_formats",
            &self.output.output_formats,
            OUTPUT_FORMATS,
        )?;

        Ok(())
    }

    pub fn keyword_matcher(&self) -> KeywordMatcher {
        KeywordMatcher::new(&self.harvest.keywords)
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            timeout: Duration::from_secs(self.http.timeout_seconds),
            user_agent: self.http.user_agent.clone(),
        }
    }

    pub fn harvest_settings(&self) -> HarvestSettings {
        HarvestSettings {
            sources: self.sources.clone(),
            matcher: self.keyword_matcher(),
            classifier: SourceClassifier::new(&self.harvest.ats_domains),
            max_listings_per_source: self.harvest.max_listings_per_source,
            courtesy_delay: Duration::from_millis(self.harvest.courtesy_delay_ms),
        }
    }

    pub fn output_settings(&self) -> OutputSettings {
        OutputSettings {
            output_path: self.output.output_path.clone(),
            file_prefix: self.output.file_prefix.clone(),
            write_json: self.output.output_formats.iter().any(|f| f == "json"),
        }
    }
}

impl Validate for HarvestConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
