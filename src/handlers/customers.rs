// src/handlers/customers.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError,
    config::AppState,
    models::customer::{Customer, CustomerPayload},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCustomersQuery {
    /// Busca por nome, documento ou telefone
    pub search: Option<String>,
}

// POST /client
#[utoipa::path(
    post,
    path = "/client",
    tag = "Clientes",
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Cliente criado", body = Customer),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.customer_service.create_customer(payload).await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

// PUT /client/{id}
#[utoipa::path(
    put,
    path = "/client/{id}",
    tag = "Clientes",
    request_body = CustomerPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    ),
    params(("id" = i32, Path, description = "ID do cliente")),
    security(("api_jwt" = []))
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .customer_service
        .update_customer(id, payload)
        .await?;

    Ok((StatusCode::OK, Json(customer)))
}

// GET /client
#[utoipa::path(
    get,
    path = "/client",
    tag = "Clientes",
    params(ListCustomersQuery),
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Customer>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    Query(query): Query<ListCustomersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state
        .customer_service
        .list_customers(query.search.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(customers)))
}

// GET /client/{id}
#[utoipa::path(
    get,
    path = "/client/{id}",
    tag = "Clientes",
    responses(
        (status = 200, description = "Detalhes do cliente", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    ),
    params(("id" = i32, Path, description = "ID do cliente")),
    security(("api_jwt" = []))
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.customer_service.find_customer(id).await?;

    Ok((StatusCode::OK, Json(customer)))
}
