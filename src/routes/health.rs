use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Liveness probe. Reports the service name and version alongside the
/// current server time; bypasses the session gate.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "ticklist",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now()
    }))
}
