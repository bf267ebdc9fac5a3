use crate::db;
use crate::routes::errors::ApiError;
use actix_web::{get, web, Responder, Result};
use sqlx::SqlitePool;

#[tracing::instrument(name = "Get catalog statistics.")]
#[get("/stats")]
pub async fn stats(pool: web::Data<SqlitePool>) -> Result<impl Responder, ApiError> {
    db::build::stats(pool.get_ref())
        .await
        .map(web::Json)
        .map_err(ApiError::Database)
}
