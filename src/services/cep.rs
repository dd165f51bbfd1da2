// src/services/cep.rs

use serde::Deserialize;

use crate::common::error::AppError;

// Endereço devolvido pelo diretório de CEPs (ViaCEP). O serviço responde
// `{"erro": true}` para códigos bem-formados que não existem.
#[derive(Debug, Clone, Deserialize)]
pub struct CepAddress {
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,

    #[serde(default)]
    erro: Option<serde_json::Value>,
}

impl CepAddress {
    fn is_not_found(&self) -> bool {
        self.erro.is_some()
    }
}

#[derive(Clone)]
pub struct CepService {
    http: reqwest::Client,
    base_url: String,
}

impl CepService {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Consulta um CEP de 8 dígitos. `Ok(None)` cobre tanto o código
    /// malformado quanto o "não encontrado" do diretório; erro de rede
    /// sobe como `UpstreamError` e o chamador decide se é fatal.
    pub async fn lookup(&self, cep: &str) -> Result<Option<CepAddress>, AppError> {
        if cep.len() != 8 || !cep.chars().all(|c| c.is_ascii_digit()) {
            return Ok(None);
        }

        let url = format!("{}/ws/{}/json/", self.base_url, cep);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            tracing::warn!("Diretório de CEPs respondeu {}", response.status());
            return Ok(None);
        }

        let address: CepAddress = response.json().await?;
        if address.is_not_found() {
            return Ok(None);
        }

        Ok(Some(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resposta_de_sucesso_do_diretorio() {
        let address: CepAddress = serde_json::from_str(
            r#"{
                "cep": "50100-240",
                "logradouro": "Rua Tupiniquins",
                "bairro": "Santo Amaro",
                "localidade": "Recife",
                "uf": "PE"
            }"#,
        )
        .unwrap();

        assert!(!address.is_not_found());
        assert_eq!(address.logradouro, "Rua Tupiniquins");
        assert_eq!(address.localidade, "Recife");
        assert_eq!(address.uf, "PE");
    }

    #[test]
    fn resposta_de_nao_encontrado() {
        let address: CepAddress = serde_json::from_str(r#"{"erro": true}"#).unwrap();
        assert!(address.is_not_found());
    }
}
