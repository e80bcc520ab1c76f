use actix_web::web;

use super::error::ApiError;
use super::handlers;
use super::metrics::metrics_endpoint;

/// Malformed query strings and JSON bodies get the same JSON error shape as
/// validation failures.
fn extractor_configs() -> (web::QueryConfig, web::JsonConfig) {
    let query = web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(format!("Parâmetros inválidos: {}", err)).into());

    let json = web::JsonConfig::default()
        .limit(1_048_576)
        .error_handler(|err, _req| ApiError::bad_request(format!("JSON inválido: {}", err)).into());

    (query, json)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let (query_config, json_config) = extractor_configs();

    cfg.app_data(query_config)
        .app_data(json_config)
        .route("/", web::get().to(handlers::home))
        .route("/health", web::get().to(handlers::health))
        .route("/metrics", web::get().to(metrics_endpoint))
        // documentos: GET com query string, POST com JSON
        .service(
            web::resource("/gerar-pdf")
                .route(web::get().to(handlers::budget_get))
                .route(web::post().to(handlers::budget_post)),
        )
        .service(
            web::resource("/orcamento")
                .route(web::get().to(handlers::budget_get))
                .route(web::post().to(handlers::budget_post)),
        )
        .service(
            web::resource("/nota-fiscal")
                .route(web::get().to(handlers::invoice_get))
                .route(web::post().to(handlers::invoice_post)),
        )
        .service(
            web::resource("/contrato")
                .route(web::get().to(handlers::contract_get))
                .route(web::post().to(handlers::contract_post)),
        )
        .service(
            web::resource("/recibo")
                .route(web::get().to(handlers::receipt_get))
                .route(web::post().to(handlers::receipt_post)),
        )
        .service(
            web::resource("/carta")
                .route(web::get().to(handlers::letter_get))
                .route(web::post().to(handlers::letter_post)),
        )
        .service(
            web::resource("/certificado")
                .route(web::get().to(handlers::certificate_get))
                .route(web::post().to(handlers::certificate_post)),
        );
}
