// src/services/customer_service.rs

use crate::{
    common::error::AppError,
    db::CustomerRepository,
    models::customer::{Customer, CustomerPayload, NewCustomer},
    services::cep::{CepAddress, CepService},
};

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
    cep: CepService,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository, cep: CepService) -> Self {
        Self { repo, cep }
    }

    pub async fn create_customer(&self, payload: CustomerPayload) -> Result<Customer, AppError> {
        let mut novo = payload.into_normalized()?;
        enrich_address(&self.cep, &mut novo).await;
        self.repo.create(&novo).await
    }

    pub async fn update_customer(
        &self,
        id: i32,
        mut payload: CustomerPayload,
    ) -> Result<Customer, AppError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::CustomerNotFound)?;

        // Política: documentos são imutáveis após a criação. Os valores
        // armazenados substituem o que veio no formulário antes da
        // validação, e a query de update não escreve nessas colunas.
        payload.cpf = existing.cpf.clone();
        payload.cnpj = existing.cnpj.clone();

        let mut novo = payload.into_normalized()?;
        enrich_address(&self.cep, &mut novo).await;
        self.repo.update(id, &novo).await
    }

    pub async fn find_customer(&self, id: i32) -> Result<Customer, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::CustomerNotFound)
    }

    pub async fn list_customers(&self, search: Option<&str>) -> Result<Vec<Customer>, AppError> {
        match search {
            Some(query) if !query.trim().is_empty() => self.repo.search(query.trim()).await,
            _ => self.repo.list().await,
        }
    }

}

// Enriquecimento de melhor esforço: um CEP válido substitui os campos
// derivados pelo que o diretório devolve. Falha de rede ou CEP
// inexistente deixam os valores enviados intactos; isso nunca bloqueia
// o cadastro.
async fn enrich_address(cep: &CepService, novo: &mut NewCustomer) {
    match cep.lookup(&novo.cep).await {
        Ok(Some(address)) => apply_address(novo, address),
        Ok(None) => {
            tracing::warn!("CEP {} não encontrado no diretório", novo.cep);
        }
        Err(e) => {
            tracing::warn!("Falha ao consultar CEP {}: {}", novo.cep, e);
        }
    }
}

// Só campos que o diretório devolveu preenchidos substituem o que o
// formulário enviou.
fn apply_address(novo: &mut NewCustomer, address: CepAddress) {
    if !address.logradouro.is_empty() {
        novo.endereco = address.logradouro;
    }
    if !address.bairro.is_empty() {
        novo.bairro = address.bairro;
    }
    if !address.localidade.is_empty() {
        novo.cidade = address.localidade;
    }
    if !address.uf.is_empty() {
        novo.uf = address.uf.to_uppercase();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn novo() -> NewCustomer {
        NewCustomer {
            nome: "Maria da Silva".to_string(),
            telefone: "81997268290".to_string(),
            cpf: "12345678909".to_string(),
            cnpj: String::new(),
            cep: "50100240".to_string(),
            endereco: "Rua Digitada".to_string(),
            numero: "447".to_string(),
            bairro: "Bairro Digitado".to_string(),
            cidade: "Cidade Digitada".to_string(),
            uf: "PE".to_string(),
        }
    }

    fn address(json: &str) -> CepAddress {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn consulta_com_sucesso_substitui_os_campos_derivados() {
        let mut n = novo();
        apply_address(
            &mut n,
            address(
                r#"{
                    "logradouro": "Rua Tupiniquins",
                    "bairro": "Santo Amaro",
                    "localidade": "Recife",
                    "uf": "pe"
                }"#,
            ),
        );

        assert_eq!(n.endereco, "Rua Tupiniquins");
        assert_eq!(n.bairro, "Santo Amaro");
        assert_eq!(n.cidade, "Recife");
        assert_eq!(n.uf, "PE");
        // O número da porta não vem do diretório
        assert_eq!(n.numero, "447");
    }

    #[test]
    fn campos_vazios_do_diretorio_nao_apagam_o_que_foi_enviado() {
        let mut n = novo();
        apply_address(&mut n, address(r#"{"logradouro": "Rua Tupiniquins"}"#));

        assert_eq!(n.endereco, "Rua Tupiniquins");
        assert_eq!(n.bairro, "Bairro Digitado");
        assert_eq!(n.cidade, "Cidade Digitada");
        assert_eq!(n.uf, "PE");
    }

    #[tokio::test]
    async fn falha_de_rede_deixa_o_endereco_intacto() {
        // Porta fechada: o lookup falha sem sair da máquina
        let cep = CepService::new("http://127.0.0.1:1".to_string());
        let mut n = novo();
        let antes = n.clone();

        enrich_address(&cep, &mut n).await;

        assert_eq!(n, antes);
    }

    #[tokio::test]
    async fn cep_fora_do_formato_deixa_o_endereco_intacto() {
        // Comprimento errado: o lookup devolve Ok(None) sem consultar a rede
        let cep = CepService::new("http://127.0.0.1:1".to_string());
        let mut n = novo();
        n.cep = "123".to_string();
        let antes = n.clone();

        enrich_address(&cep, &mut n).await;

        assert_eq!(n, antes);
    }
}
