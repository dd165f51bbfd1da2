// src/handlers/orders.rs

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::order::{ServiceOrder, ServiceOrderPayload},
};

// POST /os
#[utoipa::path(
    post,
    path = "/os",
    tag = "Ordens de Serviço",
    request_body = ServiceOrderPayload,
    responses(
        (status = 201, description = "OS criada", body = ServiceOrder),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    Json(payload): Json<ServiceOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.create_order(payload).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

// PUT /os/{id}
#[utoipa::path(
    put,
    path = "/os/{id}",
    tag = "Ordens de Serviço",
    request_body = ServiceOrderPayload,
    responses(
        (status = 200, description = "OS atualizada", body = ServiceOrder),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "OS não encontrada")
    ),
    params(("id" = i32, Path, description = "Número da OS")),
    security(("api_jwt" = []))
)]
pub async fn update_order(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ServiceOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.update_order(id, payload).await?;

    Ok((StatusCode::OK, Json(order)))
}

// GET /os
#[utoipa::path(
    get,
    path = "/os",
    tag = "Ordens de Serviço",
    responses(
        (status = 200, description = "Lista de OS", body = Vec<ServiceOrder>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state.order_service.list_orders().await?;

    Ok((StatusCode::OK, Json(orders)))
}

// GET /os/{id}
#[utoipa::path(
    get,
    path = "/os/{id}",
    tag = "Ordens de Serviço",
    responses(
        (status = 200, description = "Detalhes da OS", body = ServiceOrder),
        (status = 404, description = "OS não encontrada")
    ),
    params(("id" = i32, Path, description = "Número da OS")),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.find_order(id).await?;

    Ok((StatusCode::OK, Json(order)))
}

// GET /os/{id}/pdf
#[utoipa::path(
    get,
    path = "/os/{id}/pdf",
    tag = "Ordens de Serviço",
    responses(
        (status = 200, description = "Documento da OS", content_type = "application/pdf"),
        (status = 404, description = "OS não encontrada"),
        (status = 500, description = "Falha na geração do documento")
    ),
    params(("id" = i32, Path, description = "Número da OS")),
    security(("api_jwt" = []))
)]
pub async fn print_order(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.find_order(id).await?;
    let pdf = app_state.report_service.render_order(&order).await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/pdf")],
        pdf,
    ))
}
