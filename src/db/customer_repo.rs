// src/db/customer_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::customer::{Customer, NewCustomer},
};

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, novo: &NewCustomer) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO clients (
                nome, telefone, cpf, cnpj, cep,
                endereco, numero, bairro, cidade, uf
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                id, nome, telefone, cpf, cnpj, cep,
                endereco, numero, bairro, cidade, uf,
                created_at, updated_at
            "#,
        )
        .bind(&novo.nome)
        .bind(&novo.telefone)
        .bind(&novo.cpf)
        .bind(&novo.cnpj)
        .bind(&novo.cep)
        .bind(&novo.endereco)
        .bind(&novo.numero)
        .bind(&novo.bairro)
        .bind(&novo.cidade)
        .bind(&novo.uf)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    // CPF e CNPJ ficam congelados após a criação: a atualização
    // deliberadamente não toca nessas colunas.
    pub async fn update(&self, id: i32, novo: &NewCustomer) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE clients SET
                nome = $1, telefone = $2, cep = $3,
                endereco = $4, numero = $5, bairro = $6,
                cidade = $7, uf = $8, updated_at = NOW()
            WHERE id = $9
            RETURNING
                id, nome, telefone, cpf, cnpj, cep,
                endereco, numero, bairro, cidade, uf,
                created_at, updated_at
            "#,
        )
        .bind(&novo.nome)
        .bind(&novo.telefone)
        .bind(&novo.cep)
        .bind(&novo.endereco)
        .bind(&novo.numero)
        .bind(&novo.bairro)
        .bind(&novo.cidade)
        .bind(&novo.uf)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        customer.ok_or(AppError::CustomerNotFound)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT
                id, nome, telefone, cpf, cnpj, cep,
                endereco, numero, bairro, cidade, uf,
                created_at, updated_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn list(&self) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT
                id, nome, telefone, cpf, cnpj, cep,
                endereco, numero, bairro, cidade, uf,
                created_at, updated_at
            FROM clients
            ORDER BY nome ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    // Busca da listagem: nome, documento ou telefone.
    pub async fn search(&self, query: &str) -> Result<Vec<Customer>, AppError> {
        let search_term = format!("%{}%", query);

        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT
                id, nome, telefone, cpf, cnpj, cep,
                endereco, numero, bairro, cidade, uf,
                created_at, updated_at
            FROM clients
            WHERE
                nome ILIKE $1
                OR cpf ILIKE $1
                OR cnpj ILIKE $1
                OR telefone ILIKE $1
            ORDER BY nome ASC
            LIMIT 50
            "#,
        )
        .bind(&search_term)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }
}
