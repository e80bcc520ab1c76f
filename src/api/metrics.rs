use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder,
};

use super::error::{ApiError, ApiResult};

pub static DOCUMENTS_RENDERED: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "documents_rendered_total",
        "PDFs entregues com sucesso, por tipo de documento",
        &["kind"]
    )
    .expect("metric can be registered")
});

pub static RENDER_ERRORS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "document_render_errors_total",
        "Falhas de renderização, por tipo de documento",
        &["kind"]
    )
    .expect("metric can be registered")
});

pub static RENDER_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "document_render_seconds",
        "Tempo de desenho e serialização do PDF",
        &["kind"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("metric can be registered")
});

/// Força o registro das métricas para que apareçam em `/metrics` antes do
/// primeiro documento.
pub fn init() {
    Lazy::force(&DOCUMENTS_RENDERED);
    Lazy::force(&RENDER_ERRORS);
    Lazy::force(&RENDER_SECONDS);
}

pub async fn metrics_endpoint() -> ApiResult<HttpResponse> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];

    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| ApiError::internal_server_error(format!("Failed to encode metrics: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer))
}
