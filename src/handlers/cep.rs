// src/handlers/cep.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{common::br, common::error::AppError, config::AppState};

// GET /cep/{cep}
// Proxy do diretório de CEPs para o formulário pré-preencher o endereço.
#[utoipa::path(
    get,
    path = "/cep/{cep}",
    tag = "CEP",
    responses(
        (status = 200, description = "Endereço do CEP"),
        (status = 404, description = "CEP não encontrado"),
        (status = 502, description = "Diretório de CEPs indisponível")
    ),
    params(("cep" = String, Path, description = "CEP com 8 dígitos, com ou sem máscara")),
    security(("api_jwt" = []))
)]
pub async fn lookup_cep(
    State(app_state): State<AppState>,
    Path(cep): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let digits = br::only_digits(&cep);

    let address = app_state
        .cep_service
        .lookup(&digits)
        .await?
        .ok_or(AppError::CepNotFound)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "cep": digits,
            "endereco": address.logradouro,
            "bairro": address.bairro,
            "cidade": address.localidade,
            "uf": address.uf,
        })),
    ))
}
