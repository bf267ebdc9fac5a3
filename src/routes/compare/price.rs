use crate::configuration::Settings;
use crate::db;
use crate::forms;
use crate::models;
use crate::routes::errors::ApiError;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::SqlitePool;

/// Builds priced within the configured band around the baseline,
/// each tagged relative to the baseline price.
#[tracing::instrument(name = "Compare by price.", skip(pool, settings))]
#[post("/price")]
pub async fn by_price(
    form: web::Json<forms::Comparison>,
    pool: web::Data<SqlitePool>,
    settings: web::Data<Settings>,
) -> Result<impl Responder, ApiError> {
    form.validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    let baseline = db::build::fetch(pool.get_ref(), &form.build_id)
        .await
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::NotFound(format!("build {}", form.build_id)))?;

    let matches = db::build::fetch_price_band(
        pool.get_ref(),
        &baseline,
        settings.comparison.price_range,
        settings.comparison.result_limit,
    )
    .await
    .map_err(ApiError::Database)?;

    let matches: Vec<models::Build> = matches
        .into_iter()
        .map(|build| build.tag_against(baseline.price).with_formatted_price())
        .collect();

    Ok(web::Json(matches))
}
