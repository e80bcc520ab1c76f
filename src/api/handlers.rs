use actix_web::{http::header, web, HttpResponse};
use chrono::Local;
use serde_json::json;
use std::time::Instant;

use super::error::ApiResult;
use super::metrics::{DOCUMENTS_RENDERED, RENDER_ERRORS, RENDER_SECONDS};
use super::params::QueryParams;
use super::payloads::{CartaBody, CertificadoBody, ContratoBody, NotaFiscalBody, OrcamentoBody, ReciboBody};
use super::state::ApiState;
use crate::layouts::{self, RenderContext};
use crate::models::DocumentRequest;

type Query = web::Query<Vec<(String, String)>>;

pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "API HelpTech Antunes rodando com Rust + PDF"
    }))
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "time": Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }))
}

/// Validates, renders off the async executor and sends the PDF as a download.
pub async fn render_response(request: DocumentRequest, state: &ApiState) -> ApiResult<HttpResponse> {
    let kind = request.kind();
    if let Err(e) = request.validate(state.max_items()) {
        tracing::warn!(kind = %kind, "Requisição rejeitada: {}", e);
        return Err(e.into());
    }

    let ctx = RenderContext::now(state.company.clone());
    let started = Instant::now();
    let result = web::block(move || layouts::render(&request, &ctx)).await;
    RENDER_SECONDS
        .with_label_values(&[kind.as_str()])
        .observe(started.elapsed().as_secs_f64());

    let rendered = match result {
        Ok(Ok(rendered)) => rendered,
        Ok(Err(e)) => {
            if e.is_client_error() {
                tracing::warn!(kind = %kind, "Dados inválidos para o documento: {}", e);
            } else {
                RENDER_ERRORS.with_label_values(&[kind.as_str()]).inc();
                tracing::error!(kind = %kind, "Falha ao gerar documento: {:?}", e);
            }
            return Err(e.into());
        }
        Err(e) => {
            RENDER_ERRORS.with_label_values(&[kind.as_str()]).inc();
            tracing::error!(kind = %kind, "Falha na tarefa de renderização: {:?}", e);
            return Err(e.into());
        }
    };

    DOCUMENTS_RENDERED.with_label_values(&[kind.as_str()]).inc();
    tracing::info!(
        kind = %kind,
        filename = %rendered.filename,
        pages = rendered.pages,
        size = rendered.bytes.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "PDF gerado"
    );

    if let Some(archive) = &state.archive {
        // a cópia em disco não impede a entrega
        if let Err(e) = archive.put_object(&rendered.filename, &rendered.bytes).await {
            tracing::error!(filename = %rendered.filename, "Falha ao arquivar PDF: {}", e);
        }
    }

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", rendered.filename),
        ))
        .body(rendered.bytes))
}

pub async fn budget_get(query: Query, state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    let request = QueryParams::from(query.into_inner()).budget()?;
    render_response(request, &state).await
}

pub async fn budget_post(body: web::Json<OrcamentoBody>, state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    render_response(body.into_inner().into_request()?, &state).await
}

pub async fn invoice_get(query: Query, state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    let request = QueryParams::from(query.into_inner()).invoice()?;
    render_response(request, &state).await
}

pub async fn invoice_post(body: web::Json<NotaFiscalBody>, state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    render_response(body.into_inner().into_request()?, &state).await
}

pub async fn contract_get(query: Query, state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    let request = QueryParams::from(query.into_inner()).contract()?;
    render_response(request, &state).await
}

pub async fn contract_post(body: web::Json<ContratoBody>, state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    render_response(body.into_inner().into_request()?, &state).await
}

pub async fn receipt_get(query: Query, state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    let request = QueryParams::from(query.into_inner()).receipt()?;
    render_response(request, &state).await
}

pub async fn receipt_post(body: web::Json<ReciboBody>, state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    render_response(body.into_inner().into_request()?, &state).await
}

pub async fn letter_get(query: Query, state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    let request = QueryParams::from(query.into_inner()).letter()?;
    render_response(request, &state).await
}

pub async fn letter_post(body: web::Json<CartaBody>, state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    render_response(body.into_inner().into_request()?, &state).await
}

pub async fn certificate_get(query: Query, state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    let request = QueryParams::from(query.into_inner()).certificate()?;
    render_response(request, &state).await
}

pub async fn certificate_post(
    body: web::Json<CertificadoBody>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    render_response(body.into_inner().into_request()?, &state).await
}
