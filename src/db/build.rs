use crate::forms;
use crate::models;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::Instrument;

pub async fn fetch(pool: &SqlitePool, id: &str) -> Result<Option<models::Build>, String> {
    tracing::info!("Fetch build {}", id);
    sqlx::query_as::<_, models::Build>("SELECT * FROM pc_build WHERE id = ? LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch build, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

pub async fn fetch_our(pool: &SqlitePool) -> Result<Vec<models::Build>, String> {
    let query_span = tracing::info_span!("Fetch reference catalog builds.");
    sqlx::query_as::<_, models::Build>(
        "SELECT * FROM pc_build WHERE is_our_build = 1 ORDER BY price",
    )
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch builds, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Builds from the open catalog whose price falls inside `[baseline - range, baseline + range]`,
/// the baseline itself excluded.
pub async fn fetch_price_band(
    pool: &SqlitePool,
    baseline: &models::Build,
    range: i64,
    limit: i64,
) -> Result<Vec<models::Build>, String> {
    let query_span = tracing::info_span!("Fetch builds in price band.");
    sqlx::query_as::<_, models::Build>(
        r#"
        SELECT * FROM pc_build
        WHERE is_our_build = 0
          AND id != ?
          AND price BETWEEN ? AND ?
        ORDER BY price
        LIMIT ?
        "#,
    )
    .bind(&baseline.id)
    .bind(baseline.price - range)
    .bind(baseline.price + range)
    .bind(limit)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch price band, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

/// Builds from the open catalog whose CPU and GPU both equal the baseline's
/// after trimming and case folding.
pub async fn fetch_spec_match(
    pool: &SqlitePool,
    baseline: &models::Build,
    limit: i64,
) -> Result<Vec<models::Build>, String> {
    let query_span = tracing::info_span!("Fetch builds with matching specs.");
    sqlx::query_as::<_, models::Build>(
        r#"
        SELECT * FROM pc_build
        WHERE is_our_build = 0
          AND id != ?
          AND lower(trim(cpu)) = lower(trim(?))
          AND lower(trim(gpu)) = lower(trim(?))
        ORDER BY price
        LIMIT ?
        "#,
    )
    .bind(&baseline.id)
    .bind(&baseline.cpu)
    .bind(&baseline.gpu)
    .bind(limit)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch spec matches, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}

pub async fn search(
    pool: &SqlitePool,
    filters: &forms::SearchQuery,
) -> Result<Vec<models::Build>, String> {
    let query_span = tracing::info_span!("Search catalog.");
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM pc_build WHERE 1=1");

    if let Some(q) = &filters.q {
        builder
            .push(" AND (instr(lower(title), lower(")
            .push_bind(q)
            .push(")) > 0 OR instr(lower(description), lower(")
            .push_bind(q)
            .push(")) > 0)");
    }
    if let Some(cpu) = &filters.cpu {
        builder
            .push(" AND instr(lower(cpu), lower(")
            .push_bind(cpu)
            .push(")) > 0");
    }
    if let Some(gpu) = &filters.gpu {
        builder
            .push(" AND instr(lower(gpu), lower(")
            .push_bind(gpu)
            .push(")) > 0");
    }
    if let Some(company) = &filters.company {
        builder
            .push(" AND instr(lower(company), lower(")
            .push_bind(company)
            .push(")) > 0");
    }
    if let Some(min_price) = filters.min_price {
        builder.push(" AND price >= ").push_bind(min_price);
    }
    if let Some(max_price) = filters.max_price {
        builder.push(" AND price <= ").push_bind(max_price);
    }
    builder.push(" ORDER BY price");

    builder
        .build_query_as::<models::Build>()
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to search builds, error: {:?}", err);
            "Could not fetch data".to_string()
        })
}

/// Insert or refresh a catalog row. `is_our_build` is only set on first
/// insert so a manual re-flag survives later ingestion runs.
pub async fn upsert(pool: &SqlitePool, build: &models::Build) -> Result<(), String> {
    let query_span = tracing::info_span!("Upsert catalog build.");
    sqlx::query(
        r#"
        INSERT INTO pc_build (
            id, company, title, description, price, cpu, gpu, ram,
            case_color, photo_url, vk_url, is_our_build, parsed_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            company = excluded.company,
            title = excluded.title,
            description = excluded.description,
            price = excluded.price,
            cpu = excluded.cpu,
            gpu = excluded.gpu,
            ram = excluded.ram,
            case_color = excluded.case_color,
            photo_url = excluded.photo_url,
            vk_url = excluded.vk_url,
            parsed_at = excluded.parsed_at
        "#,
    )
    .bind(&build.id)
    .bind(&build.company)
    .bind(&build.title)
    .bind(&build.description)
    .bind(build.price)
    .bind(&build.cpu)
    .bind(&build.gpu)
    .bind(&build.ram)
    .bind(build.case_color)
    .bind(&build.photo_url)
    .bind(&build.vk_url)
    .bind(build.is_our_build)
    .bind(build.parsed_at)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to upsert build, error: {:?}", err);
        "Failed to save build".to_string()
    })
}

pub async fn stats(pool: &SqlitePool) -> Result<models::CatalogStats, String> {
    let query_span = tracing::info_span!("Fetch catalog statistics.");
    async {
        let total_builds: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pc_build")
            .fetch_one(pool)
            .await?;
        let our_builds: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM pc_build WHERE is_our_build = 1")
                .fetch_one(pool)
                .await?;
        let last_update: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT MAX(parsed_at) FROM pc_build")
                .fetch_one(pool)
                .await?;

        Ok::<_, sqlx::Error>(models::CatalogStats {
            total_builds,
            our_builds,
            other_builds: total_builds - our_builds,
            last_update,
        })
    }
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch statistics, error: {:?}", err);
        "Could not fetch data".to_string()
    })
}
