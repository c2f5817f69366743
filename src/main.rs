use clap::Parser;
use job_harvest::config::HarvestConfig;
use job_harvest::core::convention::SourceKind;
use job_harvest::utils::{logger, validation::Validate};
use job_harvest::{
    CliConfig, HarvestCoordinator, HarvestEngine, HarvestError, HarvestPipeline, HttpFetcher,
    LocalStorage,
};

const EMPTY_RESULT_HINT: &str = "No matches today. Edit KEYWORDS or add more companies.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.load_harvest_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if cli.dry_run {
        print_plan(&config);
        return Ok(());
    }

    let fetcher = match HttpFetcher::new(&config.fetcher_config()) {
        Ok(fetcher) => fetcher,
        Err(e) => exit_with(&e),
    };
    let coordinator = HarvestCoordinator::new(fetcher, config.harvest_settings());
    let storage = LocalStorage::new(config.output.output_path.clone());
    let pipeline = HarvestPipeline::new(storage, coordinator, config.output_settings());
    let engine = HarvestEngine::new_with_monitoring(pipeline, cli.monitor);

    match engine.run().await {
        Ok(summary) => {
            if !summary.warnings.is_empty() {
                tracing::info!("{} sources could not be fetched", summary.warnings.len());
            }
            if summary.unresolved_count > 0 {
                tracing::warn!(
                    "{} listings have relative links that could not be resolved",
                    summary.unresolved_count
                );
            }
            println!("Saved {} jobs -> {}", summary.listing_count, summary.output_path);
            if summary.listing_count == 0 {
                println!("{}", EMPTY_RESULT_HINT);
            }
            Ok(())
        }
        Err(e) => exit_with(&e),
    }
}

fn print_plan(config: &HarvestConfig) {
    let settings = config.harvest_settings();
    println!(
        "{} sources, {} keywords, cap {} per source",
        settings.sources.len(),
        settings.matcher.terms().len(),
        settings.max_listings_per_source
    );
    for source in &settings.sources {
        let parser = match settings.classifier.classify(&source.url) {
            SourceKind::Greenhouse => "greenhouse",
            SourceKind::Generic => "generic",
        };
        println!("  {:<10} {} ({})", parser, source.name, source.url);
    }
}

fn exit_with(e: &HarvestError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(if e.is_config_error() { 2 } else { 1 });
}
