// src/services/order_service.rs

use validator::Validate;

use crate::{
    common::error::AppError,
    db::{CustomerRepository, OrderRepository},
    models::order::{ServiceOrder, ServiceOrderPayload},
};

#[derive(Clone)]
pub struct OrderService {
    repo: OrderRepository,
    customer_repo: CustomerRepository,
}

impl OrderService {
    pub fn new(repo: OrderRepository, customer_repo: CustomerRepository) -> Self {
        Self { repo, customer_repo }
    }

    pub async fn create_order(&self, payload: ServiceOrderPayload) -> Result<ServiceOrder, AppError> {
        payload.validate()?;

        let cliente = self
            .customer_repo
            .find_by_id(payload.cliente_id)
            .await?
            .ok_or(AppError::CustomerNotFound)?;

        // Invariante: total = serviço + material, sempre calculado aqui.
        let total = payload.val_servico + payload.val_material;

        self.repo.create(&payload, total, &cliente).await
    }

    pub async fn update_order(
        &self,
        id: i32,
        payload: ServiceOrderPayload,
    ) -> Result<ServiceOrder, AppError> {
        payload.validate()?;

        let total = payload.val_servico + payload.val_material;

        self.repo.update(id, &payload, total).await
    }

    pub async fn find_order(&self, id: i32) -> Result<ServiceOrder, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::OrderNotFound)
    }

    pub async fn list_orders(&self) -> Result<Vec<ServiceOrder>, AppError> {
        self.repo.list().await
    }
}
