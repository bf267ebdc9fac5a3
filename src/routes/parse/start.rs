use crate::configuration::Settings;
use crate::forms;
use crate::parser;
use crate::routes::errors::ApiError;
use crate::services;
use actix_web::{post, web, Responder, Result};
use serde_json::json;
use serde_valid::Validate;
use sqlx::SqlitePool;

/// Kick off catalog ingestion in the background and return immediately.
#[tracing::instrument(name = "Start parsing.", skip(pool, settings))]
#[post("/start")]
pub async fn start(
    form: web::Json<forms::Parse>,
    pool: web::Data<SqlitePool>,
    settings: web::Data<Settings>,
) -> Result<impl Responder, ApiError> {
    form.validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    if settings.vk.token.is_empty() {
        return Err(ApiError::Internal("VK token is not configured".to_string()));
    }

    let vk = parser::VkClient::new(
        settings.vk.token.clone(),
        settings.vk.api_version.clone(),
    );
    let runner = parser::ParseRunner::new(
        vk,
        settings.ingestion.min_price,
        settings.ingestion.item_limit,
    );

    let group_ids = form.group_ids.clone();
    let source = form.source;
    let response = json!({
        "status": "parsing_started",
        "groups": &group_ids,
        "source": source,
    });
    tokio::spawn(services::run_ingestion(
        pool.get_ref().clone(),
        runner,
        group_ids,
        source,
    ));

    Ok(web::Json(response))
}
