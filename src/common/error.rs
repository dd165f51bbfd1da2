// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Cliente não encontrado")]
    CustomerNotFound,

    #[error("Ordem de serviço não encontrada")]
    OrderNotFound,

    #[error("CEP não encontrado")]
    CepNotFound,

    // Falha de rede ao consultar o diretório de CEPs
    #[error("Erro ao consultar serviço externo: {0}")]
    UpstreamError(#[from] reqwest::Error),

    // O logotipo precisa estar embutido antes da montagem do documento;
    // sem ele a geração é abortada, nunca sai um PDF parcial.
    #[error("Recurso não encontrado: {0}")]
    AssetNotFound(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro na geração do documento: {0}")]
    DocumentError(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // O corpo de erro usa a chave `message`, que é o que o console lê
        // para exibir o toast. Erros de validação levam também um mapa
        // campo -> mensagens, renderizado abaixo de cada input.
        let (status, message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "message": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail já está em uso."),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.")
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuário não encontrado."),
            AppError::CustomerNotFound => (StatusCode::NOT_FOUND, "Cliente não encontrado."),
            AppError::OrderNotFound => {
                (StatusCode::NOT_FOUND, "Ordem de serviço não encontrada.")
            }
            AppError::CepNotFound => (StatusCode::NOT_FOUND, "CEP não encontrado."),
            AppError::UpstreamError(ref e) => {
                tracing::warn!("Falha ao consultar serviço externo: {}", e);
                (StatusCode::BAD_GATEWAY, "Falha ao consultar serviço externo.")
            }
            ref e @ (AppError::AssetNotFound(_)
            | AppError::FontNotFound(_)
            | AppError::DocumentError(_)) => {
                tracing::error!("Falha na geração do documento: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Não foi possível gerar o documento da OS.",
                )
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}
