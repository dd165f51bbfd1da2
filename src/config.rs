// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    db::{CustomerRepository, OrderRepository, UserRepository},
    services::{
        auth::AuthService, cep::CepService, customer_service::CustomerService,
        order_service::OrderService, report_service::ReportService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub customer_service: CustomerService,
    pub order_service: OrderService,
    pub cep_service: CepService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Colaboradores externos e recursos locais, com padrões sensatos.
        let viacep_url =
            env::var("VIACEP_URL").unwrap_or_else(|_| "https://viacep.com.br".to_string());
        let logo_path = env::var("LOGO_PATH").unwrap_or_else(|_| "./assets/logo.jpg".to_string());
        let fonts_dir = env::var("FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string());

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let customer_repo = CustomerRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());

        let cep_service = CepService::new(viacep_url);
        let auth_service = AuthService::new(user_repo, jwt_secret);
        let customer_service = CustomerService::new(customer_repo.clone(), cep_service.clone());
        let order_service = OrderService::new(order_repo, customer_repo);
        let report_service =
            ReportService::new(PathBuf::from(logo_path), PathBuf::from(fonts_dir));

        Ok(Self {
            db_pool,
            auth_service,
            customer_service,
            order_service,
            cep_service,
            report_service,
        })
    }
}
