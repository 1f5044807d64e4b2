use avalia_scores::{app_state::AppState, config::Config, models::domain::ClassConfig};

/// On-demand score reconciliation job. Rebuilds every student's unified
/// score record from the raw activity stores and prints the resulting
/// class rankings. Idempotent: running it twice changes nothing.
///
/// Set RECONCILE_CLASS_ID to limit the run to one class.
#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let state = match AppState::new(config).await {
        Ok(state) => state,
        Err(err) => {
            log::error!("Failed to initialize: {}", err);
            return std::process::ExitCode::FAILURE;
        }
    };

    match run(&state).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Reconciliation failed: {}", err);
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(state: &AppState) -> avalia_scores::errors::AppResult<()> {
    let class_ids = match std::env::var("RECONCILE_CLASS_ID") {
        Ok(class_id) => vec![class_id],
        Err(_) => state.roster.list_class_ids().await?,
    };

    for class_id in class_ids {
        let class_config = state
            .class_configs
            .find_by_class(&class_id)
            .await?
            .unwrap_or_else(|| ClassConfig::fallback(&class_id, &state.config.default_modules));

        let students = state.roster.find_by_class(&class_id).await?;
        log::info!(
            "Reconciling class '{}' ({} student(s), {} eligible module(s))",
            class_id,
            students.len(),
            class_config.eligible_module_count()
        );

        let summary = state
            .unified_score_service
            .reconcile_students(&students, &class_config)
            .await?;

        log::info!(
            "Class '{}': processed {}, written {}, failed {}",
            class_id,
            summary.students_processed,
            summary.records_written,
            summary.students_failed
        );

        let ranking = state.ranking_service.class_ranking(&class_id).await?;
        for entry in &ranking {
            log::info!(
                "  #{} {} total {:.1} ({} completed)",
                entry.position,
                entry.display_name,
                entry.total_score,
                entry.completed_module_count
            );
        }
    }

    Ok(())
}
