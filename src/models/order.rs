// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::common::br;

// --- ENUMS ---

// Mapeia o CREATE TYPE tipo_servico do banco. Qualquer valor fora da
// enumeração é erro de dado, rejeitado já na desserialização.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tipo_servico", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceType {
    ForaDeGarantia,
    Garantia,
    Orcamento,
    Contrato,
}

// --- ORDEM DE SERVIÇO ---

// O retrato do cliente congelado no momento da criação da OS. O relatório
// imprime estes campos, não o cadastro atual; editar o cliente depois não
// altera uma OS já emitida.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CustomerSnapshot {
    #[sqlx(rename = "cliente_id")]
    pub id: i32,
    #[sqlx(rename = "cliente_nome")]
    pub nome: String,
    #[sqlx(rename = "cliente_telefone")]
    pub telefone: String,
    #[sqlx(rename = "cliente_cpf")]
    pub cpf: String,
    #[sqlx(rename = "cliente_cnpj")]
    pub cnpj: String,
    #[sqlx(rename = "cliente_cep")]
    pub cep: String,
    #[sqlx(rename = "cliente_endereco")]
    pub endereco: String,
    #[sqlx(rename = "cliente_numero")]
    pub numero: String,
    #[sqlx(rename = "cliente_bairro")]
    pub bairro: String,
    #[sqlx(rename = "cliente_cidade")]
    pub cidade: String,
    #[sqlx(rename = "cliente_uf")]
    pub uf: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrder {
    pub id: i32,
    pub contato: String,
    pub hora_chegada: String,
    pub hora_saida: String,
    pub modelo_equipamento: String,
    pub defeito: String,
    pub defeito_constatado: String,
    pub solucao: String,
    pub tipo_servico: ServiceType,

    // Valores como NUMERIC(12,2); `total` é sempre calculado pelo backend.
    pub val_servico: Decimal,
    pub val_material: Decimal,
    pub total: Decimal,

    pub garantia_peca: String,
    pub garantia_servico: String,

    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,

    #[sqlx(flatten)]
    #[serde(rename = "client")]
    pub cliente: CustomerSnapshot,
}

// O formulário da OS como o console envia.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrderPayload {
    #[serde(rename = "cliente_id")]
    #[schema(example = 1)]
    pub cliente_id: i32,

    #[validate(length(min = 1, message = "Contato é obrigatório"))]
    #[schema(example = "Fulano")]
    pub contato: String,

    #[validate(custom(function = validate_hora))]
    #[schema(example = "08:20")]
    pub hora_chegada: String,

    // Hora de saída é opcional (variante leniente); quando vier, precisa
    // ser um horário válido.
    #[serde(default)]
    #[validate(custom(function = validate_hora_opcional))]
    #[schema(example = "11:55")]
    pub hora_saida: String,

    #[validate(length(min = 1, message = "Modelo do equipamento é obrigatório"))]
    #[schema(example = "Notebook Dell Inspiron 15")]
    pub modelo_equipamento: String,

    #[validate(length(min = 1, message = "Defeito é obrigatório"))]
    #[schema(example = "Não liga")]
    pub defeito: String,

    #[serde(default)]
    #[schema(example = "Fonte em curto")]
    pub defeito_constatado: String,

    #[serde(default)]
    #[schema(example = "Troca da fonte")]
    pub solucao: String,

    pub tipo_servico: ServiceType,

    #[serde(default)]
    #[schema(value_type = String, example = "100.00")]
    pub val_servico: Decimal,

    #[serde(default)]
    #[schema(value_type = String, example = "50.00")]
    pub val_material: Decimal,

    #[serde(default)]
    #[schema(example = "90 dias")]
    pub garantia_peca: String,

    #[serde(default)]
    #[schema(example = "90 dias")]
    pub garantia_servico: String,
}

fn validate_hora(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(hora_error("Hora de chegada é obrigatória"))
    } else if br::is_valid_hora(value) {
        Ok(())
    } else {
        Err(hora_error("Hora de chegada inválida"))
    }
}

fn validate_hora_opcional(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || br::is_valid_hora(value) {
        Ok(())
    } else {
        Err(hora_error("Hora inválida"))
    }
}

fn hora_error(message: &str) -> ValidationError {
    let mut error = ValidationError::new("hora_invalida");
    error.message = Some(message.to_string().into());
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use validator::Validate;

    fn payload() -> ServiceOrderPayload {
        ServiceOrderPayload {
            cliente_id: 1,
            contato: "Fulano".to_string(),
            hora_chegada: "08:20".to_string(),
            hora_saida: String::new(),
            modelo_equipamento: "Notebook Dell".to_string(),
            defeito: "Não liga".to_string(),
            defeito_constatado: String::new(),
            solucao: String::new(),
            tipo_servico: ServiceType::Orcamento,
            val_servico: Decimal::from_str("100.00").unwrap(),
            val_material: Decimal::from_str("50.00").unwrap(),
            garantia_peca: String::new(),
            garantia_servico: String::new(),
        }
    }

    #[test]
    fn payload_minimo_valido() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn hora_de_saida_vazia_e_aceita() {
        let mut p = payload();
        p.hora_saida = String::new();
        assert!(p.validate().is_ok());
    }

    #[test]
    fn hora_de_saida_fora_do_formato_falha() {
        let mut p = payload();
        p.hora_saida = "25:00".to_string();
        assert!(p.validate().is_err());
    }

    fn field_messages(errors: validator::ValidationErrors, field: &str) -> Vec<String> {
        errors
            .field_errors()
            .get(field)
            .map(|list| {
                list.iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn hora_de_chegada_e_obrigatoria() {
        let mut p = payload();
        p.hora_chegada = String::new();
        let errors = p.validate().unwrap_err();
        assert_eq!(
            field_messages(errors, "hora_chegada"),
            vec!["Hora de chegada é obrigatória"]
        );
    }

    #[test]
    fn hora_de_chegada_fora_do_formato_tem_mensagem_propria() {
        let mut p = payload();
        p.hora_chegada = "25:00".to_string();
        let errors = p.validate().unwrap_err();
        assert_eq!(
            field_messages(errors, "hora_chegada"),
            vec!["Hora de chegada inválida"]
        );
    }

    #[test]
    fn contato_e_defeito_obrigatorios() {
        let mut p = payload();
        p.contato = String::new();
        assert!(p.validate().is_err());

        let mut p = payload();
        p.defeito = String::new();
        assert!(p.validate().is_err());
    }

    #[test]
    fn tipo_de_servico_fora_da_enumeracao_e_erro_de_dado() {
        let erro = serde_json::from_str::<ServiceType>("\"REVISAO\"");
        assert!(erro.is_err());
        let ok: ServiceType = serde_json::from_str("\"FORADEGARANTIA\"").unwrap();
        assert_eq!(ok, ServiceType::ForaDeGarantia);
    }
}
