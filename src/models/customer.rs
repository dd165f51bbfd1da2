// src/models/customer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::{br, error::AppError};

// Representa um cliente vindo do banco de dados. Telefone, CPF, CNPJ e CEP
// já estão normalizados (somente dígitos).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i32,
    pub nome: String,
    pub telefone: String,
    pub cpf: String,
    pub cnpj: String,
    pub cep: String,
    pub endereco: String,
    pub numero: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,

    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

// O formulário cru, como o console envia. Os nomes de campo seguem o
// contrato da API original (português, camelCase).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    #[validate(length(min = 3, message = "Nome deve ter no mínimo 3 caracteres"))]
    #[schema(example = "Maria da Silva")]
    pub nome: String,

    #[validate(custom(function = validate_telefone))]
    #[schema(example = "(81) 99726-8290")]
    pub telefone: String,

    // CPF e CNPJ são individualmente opcionais; a regra cruzada
    // "pelo menos um" fica em `into_normalized`.
    #[serde(default)]
    #[validate(custom(function = validate_cpf))]
    #[schema(example = "123.456.789-09")]
    pub cpf: String,

    #[serde(default)]
    #[validate(custom(function = validate_cnpj))]
    #[schema(example = "08.546.821/0001-30")]
    pub cnpj: String,

    #[validate(custom(function = validate_cep))]
    #[schema(example = "50100-240")]
    pub cep: String,

    #[validate(length(min = 3, message = "Endereço é obrigatório"))]
    #[schema(example = "Rua Tupiniquins")]
    pub endereco: String,

    #[validate(length(min = 1, message = "Número é obrigatório"))]
    #[schema(example = "447")]
    pub numero: String,

    #[validate(length(min = 2, message = "Bairro é obrigatório"))]
    #[schema(example = "Santo Amaro")]
    pub bairro: String,

    #[validate(length(min = 2, message = "Cidade é obrigatória"))]
    #[schema(example = "Recife")]
    pub cidade: String,

    #[validate(custom(function = validate_uf))]
    #[schema(example = "PE")]
    pub uf: String,
}

// O payload validado e canônico, pronto para persistir: campos de texto
// aparados, documentos e telefone só com dígitos, UF maiúscula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub nome: String,
    pub telefone: String,
    pub cpf: String,
    pub cnpj: String,
    pub cep: String,
    pub endereco: String,
    pub numero: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
}

impl CustomerPayload {
    /// Passo único de validação + normalização. Falha com o conjunto de
    /// erros por campo; nunca chega à rede um registro fora do contrato.
    pub fn into_normalized(mut self) -> Result<NewCustomer, AppError> {
        // Apara antes de validar: "  Jo  " não pode passar no mínimo de 3.
        self.nome = self.nome.trim().to_string();
        self.endereco = self.endereco.trim().to_string();
        self.numero = self.numero.trim().to_string();
        self.bairro = self.bairro.trim().to_string();
        self.cidade = self.cidade.trim().to_string();
        self.uf = self.uf.trim().to_string();

        self.validate()?;

        let cpf = br::only_digits(&self.cpf);
        let cnpj = br::only_digits(&self.cnpj);

        // Regra cruzada: pelo menos um documento. O erro é anexado ao
        // campo `cpf`, que é onde o formulário o exibe.
        if cpf.is_empty() && cnpj.is_empty() {
            let mut errors = ValidationErrors::new();
            let mut error = ValidationError::new("documento_obrigatorio");
            error.message = Some("CPF ou CNPJ é obrigatório".into());
            errors.add("cpf", error);
            return Err(AppError::ValidationError(errors));
        }

        Ok(NewCustomer {
            nome: self.nome,
            telefone: br::only_digits(&self.telefone),
            cpf,
            cnpj,
            cep: br::only_digits(&self.cep),
            endereco: self.endereco,
            numero: self.numero,
            bairro: self.bairro,
            cidade: self.cidade,
            uf: self.uf.to_uppercase(),
        })
    }
}

fn validation_error(code: &'static str, message: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.to_string().into());
    error
}

fn validate_telefone(value: &str) -> Result<(), ValidationError> {
    if br::matches_mask(value, br::PHONE_MASK) {
        Ok(())
    } else {
        Err(validation_error("telefone_invalido", "Telefone inválido"))
    }
}

// Aceita a forma mascarada ou os dígitos puros; vazio é permitido aqui
// porque a obrigatoriedade é a regra cruzada CPF/CNPJ.
fn validate_cpf(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || br::only_digits(value).len() == 11 {
        Ok(())
    } else {
        Err(validation_error("cpf_invalido", "CPF inválido"))
    }
}

fn validate_cnpj(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || br::only_digits(value).len() == 14 {
        Ok(())
    } else {
        Err(validation_error("cnpj_invalido", "CNPJ inválido"))
    }
}

fn validate_cep(value: &str) -> Result<(), ValidationError> {
    if br::only_digits(value).len() == 8 {
        Ok(())
    } else {
        Err(validation_error("cep_invalido", "CEP inválido"))
    }
}

fn validate_uf(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() == 2 {
        Ok(())
    } else {
        Err(validation_error("uf_invalida", "UF é obrigatória"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CustomerPayload {
        CustomerPayload {
            nome: "Joao".to_string(),
            telefone: "(81) 99726-8290".to_string(),
            cpf: "123.456.789-09".to_string(),
            cnpj: String::new(),
            cep: "50100-240".to_string(),
            endereco: "Rua Tupiniquins".to_string(),
            numero: "447".to_string(),
            bairro: "Santo Amaro".to_string(),
            cidade: "Recife".to_string(),
            uf: "pe".to_string(),
        }
    }

    fn field_messages(err: AppError, field: &str) -> Vec<String> {
        match err {
            AppError::ValidationError(errors) => errors
                .field_errors()
                .get(field)
                .map(|list| {
                    list.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect()
                })
                .unwrap_or_default(),
            other => panic!("esperava erro de validação, veio {:?}", other),
        }
    }

    #[test]
    fn normaliza_telefone_e_documentos_para_digitos() {
        let novo = payload().into_normalized().unwrap();
        assert_eq!(novo.telefone, "81997268290");
        assert_eq!(novo.telefone.len(), 11);
        assert_eq!(novo.cpf, "12345678909");
        assert_eq!(novo.cpf.len(), 11);
        assert_eq!(novo.cep, "50100240");
        assert_eq!(novo.cep.len(), 8);
    }

    #[test]
    fn cnpj_mascarado_normaliza_para_14_digitos() {
        let mut p = payload();
        p.cpf = String::new();
        p.cnpj = "08.546.821/0001-30".to_string();
        let novo = p.into_normalized().unwrap();
        assert_eq!(novo.cnpj, "08546821000130");
        assert_eq!(novo.cnpj.len(), 14);
    }

    #[test]
    fn uf_minuscula_e_normalizada_para_maiuscula() {
        let novo = payload().into_normalized().unwrap();
        assert_eq!(novo.uf, "PE");
    }

    #[test]
    fn uf_com_tres_letras_falha() {
        let mut p = payload();
        p.uf = "per".to_string();
        let err = p.into_normalized().unwrap_err();
        assert_eq!(field_messages(err, "uf"), vec!["UF é obrigatória"]);
    }

    #[test]
    fn nome_curto_falha_nome_valido_passa() {
        let mut p = payload();
        p.nome = "Jo".to_string();
        let err = p.into_normalized().unwrap_err();
        assert_eq!(
            field_messages(err, "nome"),
            vec!["Nome deve ter no mínimo 3 caracteres"]
        );

        let mut p = payload();
        p.nome = "Joao".to_string();
        assert!(p.into_normalized().is_ok());
    }

    #[test]
    fn nome_curto_acolchoado_com_espacos_falha() {
        // O mínimo de 3 vale para o valor aparado
        let mut p = payload();
        p.nome = "  Jo  ".to_string();
        let err = p.into_normalized().unwrap_err();
        assert_eq!(
            field_messages(err, "nome"),
            vec!["Nome deve ter no mínimo 3 caracteres"]
        );
    }

    #[test]
    fn sem_cpf_e_sem_cnpj_falha_no_campo_cpf() {
        let mut p = payload();
        p.cpf = String::new();
        p.cnpj = String::new();
        let err = p.into_normalized().unwrap_err();
        assert_eq!(field_messages(err, "cpf"), vec!["CPF ou CNPJ é obrigatório"]);
    }

    #[test]
    fn telefone_fora_da_mascara_falha() {
        let mut p = payload();
        p.telefone = "81997268290".to_string();
        let err = p.into_normalized().unwrap_err();
        assert_eq!(field_messages(err, "telefone"), vec!["Telefone inválido"]);
    }

    #[test]
    fn cep_com_sete_digitos_falha() {
        let mut p = payload();
        p.cep = "5010-240".to_string();
        let err = p.into_normalized().unwrap_err();
        assert_eq!(field_messages(err, "cep"), vec!["CEP inválido"]);
    }

    #[test]
    fn campos_de_texto_sao_aparados() {
        let mut p = payload();
        p.nome = "  Maria da Silva  ".to_string();
        p.cidade = " Recife ".to_string();
        let novo = p.into_normalized().unwrap();
        assert_eq!(novo.nome, "Maria da Silva");
        assert_eq!(novo.cidade, "Recife");
    }
}
