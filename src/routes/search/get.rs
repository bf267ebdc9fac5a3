use crate::db;
use crate::forms;
use crate::models;
use crate::routes::errors::ApiError;
use actix_web::{get, web, Responder, Result};
use sqlx::SqlitePool;

#[tracing::instrument(name = "Search catalog.", skip(pool))]
#[get("/search")]
pub async fn search(
    filters: web::Query<forms::SearchQuery>,
    pool: web::Data<SqlitePool>,
) -> Result<impl Responder, ApiError> {
    let builds = db::build::search(pool.get_ref(), &filters)
        .await
        .map_err(ApiError::Database)?;

    let builds: Vec<models::Build> = builds
        .into_iter()
        .map(models::Build::with_formatted_price)
        .collect();

    Ok(web::Json(builds))
}
