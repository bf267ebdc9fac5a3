use crate::configuration::Settings;
use crate::db;
use crate::forms;
use crate::models;
use crate::routes::errors::ApiError;
use actix_web::{post, web, Responder, Result};
use serde_valid::Validate;
use sqlx::SqlitePool;

/// Builds whose CPU and GPU both match the baseline's. No price tag
/// is attached in this mode.
#[tracing::instrument(name = "Compare by specs.", skip(pool, settings))]
#[post("/specs")]
pub async fn by_specs(
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

    let matches = db::build::fetch_spec_match(
        pool.get_ref(),
        &baseline,
        settings.comparison.result_limit,
    )
    .await
    .map_err(ApiError::Database)?;

    let matches: Vec<models::Build> = matches
        .into_iter()
        .map(models::Build::with_formatted_price)
        .collect();

    Ok(web::Json(matches))
}
