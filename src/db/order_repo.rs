// src/db/order_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::{
        customer::Customer,
        order::{ServiceOrder, ServiceOrderPayload},
    },
};

// Todas as colunas que montam o ServiceOrder, incluindo o retrato do
// cliente gravado na própria linha da OS.
const ORDER_COLUMNS: &str = r#"
    id, contato, hora_chegada, hora_saida,
    modelo_equipamento, defeito, defeito_constatado, solucao,
    tipo_servico, val_servico, val_material, total,
    garantia_peca, garantia_servico, created_at,
    cliente_id, cliente_nome, cliente_telefone, cliente_cpf, cliente_cnpj,
    cliente_cep, cliente_endereco, cliente_numero, cliente_bairro,
    cliente_cidade, cliente_uf
"#;

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Cria a OS copiando os dados do cliente para a linha da ordem.
    /// O `total` chega já calculado pelo serviço.
    pub async fn create(
        &self,
        payload: &ServiceOrderPayload,
        total: Decimal,
        cliente: &Customer,
    ) -> Result<ServiceOrder, AppError> {
        let sql = format!(
            r#"
            INSERT INTO service_orders (
                contato, hora_chegada, hora_saida,
                modelo_equipamento, defeito, defeito_constatado, solucao,
                tipo_servico, val_servico, val_material, total,
                garantia_peca, garantia_servico,
                cliente_id, cliente_nome, cliente_telefone, cliente_cpf,
                cliente_cnpj, cliente_cep, cliente_endereco, cliente_numero,
                cliente_bairro, cliente_cidade, cliente_uf
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24
            )
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let order = sqlx::query_as::<_, ServiceOrder>(&sql)
            .bind(&payload.contato)
            .bind(&payload.hora_chegada)
            .bind(&payload.hora_saida)
            .bind(&payload.modelo_equipamento)
            .bind(&payload.defeito)
            .bind(&payload.defeito_constatado)
            .bind(&payload.solucao)
            .bind(payload.tipo_servico)
            .bind(payload.val_servico)
            .bind(payload.val_material)
            .bind(total)
            .bind(&payload.garantia_peca)
            .bind(&payload.garantia_servico)
            .bind(cliente.id)
            .bind(&cliente.nome)
            .bind(&cliente.telefone)
            .bind(&cliente.cpf)
            .bind(&cliente.cnpj)
            .bind(&cliente.cep)
            .bind(&cliente.endereco)
            .bind(&cliente.numero)
            .bind(&cliente.bairro)
            .bind(&cliente.cidade)
            .bind(&cliente.uf)
            .fetch_one(&self.pool)
            .await?;

        Ok(order)
    }

    /// Atualiza somente os campos próprios da ordem. O retrato do cliente
    /// nunca é reescrito aqui.
    pub async fn update(
        &self,
        id: i32,
        payload: &ServiceOrderPayload,
        total: Decimal,
    ) -> Result<ServiceOrder, AppError> {
        let sql = format!(
            r#"
            UPDATE service_orders SET
                contato = $1, hora_chegada = $2, hora_saida = $3,
                modelo_equipamento = $4, defeito = $5,
                defeito_constatado = $6, solucao = $7,
                tipo_servico = $8, val_servico = $9, val_material = $10,
                total = $11, garantia_peca = $12, garantia_servico = $13,
                updated_at = NOW()
            WHERE id = $14
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let order = sqlx::query_as::<_, ServiceOrder>(&sql)
            .bind(&payload.contato)
            .bind(&payload.hora_chegada)
            .bind(&payload.hora_saida)
            .bind(&payload.modelo_equipamento)
            .bind(&payload.defeito)
            .bind(&payload.defeito_constatado)
            .bind(&payload.solucao)
            .bind(payload.tipo_servico)
            .bind(payload.val_servico)
            .bind(payload.val_material)
            .bind(total)
            .bind(&payload.garantia_peca)
            .bind(&payload.garantia_servico)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        order.ok_or(AppError::OrderNotFound)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ServiceOrder>, AppError> {
        let sql = format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM service_orders
            WHERE id = $1
            "#
        );

        let order = sqlx::query_as::<_, ServiceOrder>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    pub async fn list(&self) -> Result<Vec<ServiceOrder>, AppError> {
        let sql = format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM service_orders
            ORDER BY created_at DESC
            "#
        );

        let orders = sqlx::query_as::<_, ServiceOrder>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }
}
