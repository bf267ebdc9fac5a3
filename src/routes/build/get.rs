use crate::db;
use crate::models;
use crate::routes::errors::ApiError;
use actix_web::{get, web, Responder, Result};
use sqlx::SqlitePool;

#[tracing::instrument(name = "Get reference builds.")]
#[get("/our")]
pub async fn our(pool: web::Data<SqlitePool>) -> Result<impl Responder, ApiError> {
    let builds = db::build::fetch_our(pool.get_ref())
        .await
        .map_err(ApiError::Database)?;

    let builds: Vec<models::Build> = builds
        .into_iter()
        .map(models::Build::with_formatted_price)
        .collect();

    Ok(web::Json(builds))
}

#[tracing::instrument(name = "Get build.")]
#[get("/{id}")]
pub async fn item(
    path: web::Path<(String,)>,
    pool: web::Data<SqlitePool>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner().0;
    let build = db::build::fetch(pool.get_ref(), &id)
        .await
        .map_err(ApiError::Database)?
        .ok_or_else(|| ApiError::NotFound(format!("build {}", id)))?;

    Ok(web::Json(build.with_formatted_price()))
}
