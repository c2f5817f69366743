pub mod cli;
pub mod defaults;
pub mod toml_config;

pub use toml_config::HarvestConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "job-harvest")]
#[command(about = "Polls employer career pages and reports relevant job listings")]
pub struct CliConfig {
    /// TOML configuration file; the built-in registry is used when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory for the report, overriding the configured one
    #[arg(long)]
    pub output_path: Option<String>,

    /// Extra keyword, may be repeated; replaces the configured keyword set
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(long, help = "Log process CPU and memory per phase")]
    pub monitor: bool,

    /// Show which parser each source would use, without fetching anything
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the file (or built-in defaults) and applies command-line overrides.
    pub fn load_harvest_config(&self) -> crate::utils::error::Result<HarvestConfig> {
        let mut config = match &self.config {
            Some(path) => HarvestConfig::from_file(path)?,
            None => HarvestConfig::builtin(),
        };

        if let Some(output_path) = &self.output_path {
            config.output.output_path = output_path.clone();
        }
        if !self.keywords.is_empty() {
            config.harvest.keywords = self.keywords.clone();
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_builtin_config() {
        let cli = CliConfig::parse_from([
            "job-harvest",
            "--output-path",
            "/tmp/reports",
            "-k",
            "privacy",
            "--keyword",
            "grc",
        ]);

        let config = cli.load_harvest_config().unwrap();

        assert_eq!(config.output.output_path, "/tmp/reports");
        assert_eq!(config.harvest.keywords, vec!["privacy", "grc"]);
        assert_eq!(config.sources.len(), 13);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = CliConfig::parse_from(["job-harvest", "--config", "/nonexistent/harvest.toml"]);
        assert!(cli.load_harvest_config().is_err());
    }
}
