use crate::db;
use crate::forms::ParseSource;
use crate::parser::ParseRunner;
use sqlx::SqlitePool;

/// Background ingestion task. Rows already written stay committed when a
/// later row or group fails.
#[tracing::instrument(name = "Run catalog ingestion.", skip(pool, runner))]
pub async fn run_ingestion(
    pool: SqlitePool,
    runner: ParseRunner,
    group_ids: Vec<i64>,
    source: ParseSource,
) {
    let builds = match runner.parse_groups(&group_ids, source).await {
        Ok(builds) => builds,
        Err(err) => {
            tracing::error!("Ingestion failed: {}", err);
            return;
        }
    };

    let mut saved = 0;
    let mut failed = 0;
    for build in &builds {
        match db::build::upsert(&pool, build).await {
            Ok(()) => saved += 1,
            Err(err) => {
                tracing::error!("Failed to save build {}: {}", build.id, err);
                failed += 1;
            }
        }
    }

    tracing::info!(saved, failed, "Ingestion finished");
}
