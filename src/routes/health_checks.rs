use actix_web::{get, HttpResponse};
use serde_json::json;

#[get("/")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "PC Build Comparator",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
