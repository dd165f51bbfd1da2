// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Tudo que o console usa depois do login fica atrás do auth_guard
    let protected_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route(
            "/client",
            post(handlers::customers::create_customer).get(handlers::customers::list_customers),
        )
        .route(
            "/client/{id}",
            put(handlers::customers::update_customer).get(handlers::customers::get_customer),
        )
        .route(
            "/os",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route(
            "/os/{id}",
            put(handlers::orders::update_order).get(handlers::orders::get_order),
        )
        .route("/os/{id}/pdf", get(handlers::orders::print_order))
        .route("/cep/{cep}", get(handlers::cep::lookup_cep))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .merge(auth_routes)
        .merge(protected_routes)
        .with_state(app_state);

    // Inicia o servidor (a porta 3333 é a que o console espera)
    let port = std::env::var("PORT").unwrap_or_else(|_| "3333".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
