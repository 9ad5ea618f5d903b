use anyhow::Context;
use career_helper::core::controller::{StateObserver, SubmissionState};
use career_helper::core::ConfigProvider;
use career_helper::utils::error::ErrorSeverity;
use career_helper::utils::{logger, validation::Validate};
use career_helper::{
    CliConfig, HttpRecommendationClient, LocalStorage, RecommendationSession, SubmissionController,
};
use clap::Parser;
use std::sync::Arc;

/// Stands in for the spinner: one log line per state change.
struct ConsoleStatus;

impl StateObserver for ConsoleStatus {
    fn on_state(&self, state: &SubmissionState) {
        match state {
            SubmissionState::Busy => tracing::info!("🤔 Analyzing your profile..."),
            SubmissionState::Succeeded => tracing::info!("✅ Recommendations received"),
            SubmissionState::Failed(message) => tracing::warn!("❌ {}", message),
            SubmissionState::Idle => tracing::debug!("Ready"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting career-helper CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let page = cli.page;
    let health_only = cli.health;

    let settings = match cli.into_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let client = HttpRecommendationClient::from_config(&settings);

    if health_only {
        let health = client
            .health()
            .await
            .with_context(|| format!("Health check against {} failed", settings.base_url))?;
        println!("{} ({}) - {}", health.status, health.version, health.message);
        if !health.is_active() {
            std::process::exit(2);
        }
        return Ok(());
    }

    let controller = SubmissionController::new(client)
        .with_timeout(settings.timeout())
        .with_observer(Arc::new(ConsoleStatus));

    let cancel = controller.cancel_handle();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if cancel.cancel() {
                tracing::warn!("Interrupted, cancelling request");
            } else {
                tracing::warn!("Interrupted");
                std::process::exit(130);
            }
        }
    });

    let storage = LocalStorage::new(settings.output_path.clone());
    let mut session = RecommendationSession::new(storage, controller, settings.output_path.clone())
        .with_all_pages(settings.write_all_pages);

    match session.run(&settings.profile).await {
        Ok(mut report) => {
            if report.fallback {
                println!("ℹ️  The backend answered without a roadmap list; showing its reply as-is");
            } else {
                println!("✅ {} career roadmap(s) rendered", report.card_count);
            }
            println!("📁 Output saved to: {}", report.output_path);
            for file in &report.files {
                tracing::debug!("  {}", file);
            }
            if let Some(page) = page {
                println!("{}", report.render_page(page));
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Recommendation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
