use clap::Parser;
use microsite_pages::core::catalog::descriptor;
use microsite_pages::utils::error::ErrorSeverity;
use microsite_pages::utils::{logger, validation::Validate};
use microsite_pages::{classify, CliConfig, PageRenderer, RenderOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(e.severity()));
        }
    };

    // 初始化日誌
    let level = if cli.verbose { "debug" } else { config.log_level() };
    if config.json_logging() {
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(level);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(e.severity()));
    }

    let route = cli.route();
    tracing::info!("🚀 Resolving route {:?} (category {:?})", route.slug, route.category);

    if cli.dry_run {
        let decision = classify(&route);
        let query = descriptor(decision.query);
        tracing::info!("🔍 DRY RUN MODE - no content will be fetched");
        println!("{}", serde_json::to_string_pretty(&decision)?);
        println!("{}", query.document());
        return Ok(());
    }

    let fetcher = match config.build_fetcher() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::error!(
                "❌ Could not set up content source: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(e.severity()));
        }
    };
    let renderer = PageRenderer::from_config(fetcher, &config);

    match renderer.render(route).await {
        RenderOutcome::Rendered(view) => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        RenderOutcome::Discarded { route } => {
            tracing::warn!("Render for {:?} was superseded", route.slug);
        }
    }

    Ok(())
}

/// Exit status for a fatal error, by severity.
fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
