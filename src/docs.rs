// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Clientes ---
        handlers::customers::create_customer,
        handlers::customers::update_customer,
        handlers::customers::list_customers,
        handlers::customers::get_customer,

        // --- Ordens de Serviço ---
        handlers::orders::create_order,
        handlers::orders::update_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::print_order,

        // --- CEP ---
        handlers::cep::lookup_cep,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Clientes ---
            models::customer::Customer,
            models::customer::CustomerPayload,

            // --- Ordens de Serviço ---
            models::order::ServiceType,
            models::order::CustomerSnapshot,
            models::order::ServiceOrder,
            models::order::ServiceOrderPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Clientes", description = "Cadastro e consulta de clientes"),
        (name = "Ordens de Serviço", description = "Criação, acompanhamento e impressão de OS"),
        (name = "CEP", description = "Consulta ao diretório de CEPs")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
