use actix_web::HttpResponse;

/// `GET /health_check`
///
/// Used by the load balancer / container orchestrator
///
/// Note: viewing http response requires `curl -v`
pub async fn health_check() -> HttpResponse { HttpResponse::Ok().finish() }
