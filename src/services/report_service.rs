// src/services/report_service.rs

//! Gera o documento imprimível da Ordem de Serviço. O layout é fixo e
//! precisa bater com o formulário impresso já em uso na bancada: cabeçalho
//! com logotipo e dados da empresa, blocos de identificação, diagnóstico e
//! valores, cláusulas de garantia e o rodapé de assinaturas.

use std::path::PathBuf;

use genpdf::{Alignment, Element, elements, style};

use crate::{
    common::{br, error::AppError},
    models::order::ServiceOrder,
};

const DOCUMENT_TITLE: &str = "OS - ORDEM DE SERVIÇO EXTERNA";

// Constantes da empresa, não são dados do usuário.
const COMPANY_LINES: [&str; 5] = [
    "Manutenção Preventiva, Corretiva em equipamento de informática.",
    "CNPJ: 08.546.821/0001-30 INSC. Municipal: 377.346-9",
    "Rua Tupiniquins 447 Santo Amaro CEP: 50100-240",
    "Fone: (81) - 9972-6829 Recife PE.",
    "Nosso Site: www.werknet.com.br",
];

// Texto legal literal, reproduzido sem alteração.
const LEGAL_CLAUSES: [&str; 4] = [
    "01 - O prazo de cobertura da garantia de serviço será contado a partir da data de saída, somente terá validade mediante a apresentação deste documento.",
    "02 - Não nos responsabilizamos por falha causada por agentes da natureza, por mau uso dos componentes por usuário não classificados, e programas ou arquivos de dados que estejam dentro do computador.",
    "03 - Esta garantia será considerada nula de pleno direito, na hipótese de abertura de um dos equipamentos, quer para conserto, por técnico não autorizado.",
    "04 - Restringimos nossa responsabilidade à substituição de peças defeituosas, desde que a critério de nosso Dep.Técnico, se constatar falhas em condições normais de uso. Neste caso o prazo para a substituição será de 08 (oito) dias úteis a contar da data de recepção em nossa Empresa.",
];

const RETENTION_NOTICE: &str = "Obs.: O cliente terá prazo de 90 dias para a retirada do(s) equipamento(s), na aprovação ou não do orçamento pelo cliente, e passado do prazo o equipamento será vendido para pagar despesas e serviços da empresa.";

const SIGNATURE_LINE: &str = "____________________________";
const SIGNATURE_CAPTIONS: [&str; 3] = ["Técnico", "Recepção", "Cliente"];

/// Os textos do corpo, na ordem vertical fixa do formulário. Cada item é
/// uma linha; linhas com mais de uma célula viram colunas. Separado da
/// montagem do PDF para que o conteúdo seja verificável sem renderizar.
pub fn body_cells(order: &ServiceOrder) -> Vec<Vec<String>> {
    let cliente = &order.cliente;
    vec![
        vec![
            format!("DATA: {}", order.created_at.format("%d/%m/%Y")),
            format!("CONTATO: {}", order.contato.to_uppercase()),
        ],
        vec![
            format!("HORA DE CHEGADA: {}", order.hora_chegada),
            format!("HORA DE SAÍDA: {}", order.hora_saida),
        ],
        vec![
            format!("CLIENTE: {}", cliente.nome.to_uppercase()),
            format!("FONE: {}", br::format_telefone(&cliente.telefone)),
        ],
        vec![format!("ENDEREÇO: {}", cliente.endereco.to_uppercase())],
        vec![
            format!("NÚMERO: {}", cliente.numero),
            format!("BAIRRO: {}", cliente.bairro.to_uppercase()),
            format!("CIDADE: {}", cliente.cidade),
            format!("UF: {}", cliente.uf),
        ],
        vec![
            format!("CPF: {}", br::format_cpf(&cliente.cpf)),
            format!("CNPJ: {}", br::format_cnpj(&cliente.cnpj)),
        ],
        vec![format!("MODELO DO EQUIPAMENTO: {}", order.modelo_equipamento)],
        vec![format!("DEFEITO: {}", order.defeito)],
        vec![format!("DEFEITO CONSTATADO: {}", order.defeito_constatado)],
        vec![format!("SOLUÇÃO: {}", order.solucao)],
        vec![
            format!("VALOR SERVIÇO: {}", br::format_brl(order.val_servico)),
            format!("VALOR MATERIAL: {}", br::format_brl(order.val_material)),
            format!("TOTAL: {}", br::format_brl(order.total)),
        ],
        vec![
            format!("GARANTIA DE PEÇA: {}", order.garantia_peca.to_uppercase()),
            format!(
                "GARANTIA DE SERVIÇO: {}",
                order.garantia_servico.to_uppercase()
            ),
        ],
    ]
}

#[derive(Clone)]
pub struct ReportService {
    logo_path: PathBuf,
    fonts_dir: PathBuf,
}

impl ReportService {
    pub fn new(logo_path: PathBuf, fonts_dir: PathBuf) -> Self {
        Self { logo_path, fonts_dir }
    }

    /// Renderiza a OS em PDF (A4). O logotipo é lido e decodificado antes
    /// da montagem; se faltar, a geração inteira é abortada.
    pub async fn render_order(&self, order: &ServiceOrder) -> Result<Vec<u8>, AppError> {
        let logo = self.load_logo().await?;
        let doc = self.build_document(order, logo)?;

        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::DocumentError(e.to_string()))?;

        Ok(buffer)
    }

    async fn load_logo(&self) -> Result<image::DynamicImage, AppError> {
        let bytes = tokio::fs::read(&self.logo_path).await.map_err(|e| {
            AppError::AssetNotFound(format!("logotipo em {:?}: {}", self.logo_path, e))
        })?;

        image::load_from_memory(&bytes)
            .map_err(|e| AppError::AssetNotFound(format!("logotipo inválido: {}", e)))
    }

    fn build_document(
        &self,
        order: &ServiceOrder,
        logo: image::DynamicImage,
    ) -> Result<genpdf::Document, AppError> {
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None)
            .map_err(|_| {
                AppError::FontNotFound(format!("fonte Roboto ausente em {:?}", self.fonts_dir))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("OS N.º {}", order.id));

        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO: logotipo + dados da empresa ---
        let pdf_logo = elements::Image::from_dynamic_image(logo)
            .map_err(|e| AppError::DocumentError(e.to_string()))?
            .with_alignment(Alignment::Center)
            .with_scale(genpdf::Scale::new(0.5, 0.5));

        let small = style::Style::new().with_font_size(10);
        let mut company = elements::LinearLayout::vertical();
        for line in COMPANY_LINES {
            company.push(elements::Paragraph::new(line).styled(small));
        }

        let mut header = elements::TableLayout::new(vec![2, 3]);
        header
            .row()
            .element(pdf_logo)
            .element(company)
            .push()
            .map_err(|e| AppError::DocumentError(e.to_string()))?;
        doc.push(header);
        doc.push(elements::Break::new(1));

        // Linha de título em duas células com moldura
        let title_style = style::Style::new().with_font_size(12);
        let mut title = elements::TableLayout::new(vec![1, 1]);
        title.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        title
            .row()
            .element(
                elements::Paragraph::new(DOCUMENT_TITLE)
                    .aligned(Alignment::Center)
                    .styled(title_style),
            )
            .element(
                elements::Paragraph::new(format!("N.º {}", order.id))
                    .aligned(Alignment::Center)
                    .styled(title_style),
            )
            .push()
            .map_err(|e| AppError::DocumentError(e.to_string()))?;
        doc.push(title);
        doc.push(elements::Break::new(1));

        // --- CORPO ---
        for cells in body_cells(order) {
            push_text_row(&mut doc, &cells)?;
        }

        // --- CLÁUSULAS DE GARANTIA ---
        // Tabela de coluna única, só com a borda externa.
        doc.push(elements::Break::new(2));
        let mut clauses = elements::TableLayout::new(vec![1]);
        clauses.set_cell_decorator(elements::FrameCellDecorator::new(false, true, false));
        for clause in LEGAL_CLAUSES {
            clauses
                .row()
                .element(elements::Paragraph::new(clause).styled(small).padded(1))
                .push()
                .map_err(|e| AppError::DocumentError(e.to_string()))?;
        }
        doc.push(clauses);

        doc.push(elements::Break::new(1));
        doc.push(elements::Paragraph::new(RETENTION_NOTICE));

        // --- RODAPÉ DE ASSINATURAS ---
        doc.push(elements::Break::new(3));
        let mut lines = elements::TableLayout::new(vec![1, 1, 1]);
        let mut row = lines.row();
        for _ in SIGNATURE_CAPTIONS {
            row = row.element(elements::Paragraph::new(SIGNATURE_LINE).aligned(Alignment::Center));
        }
        row.push()
            .map_err(|e| AppError::DocumentError(e.to_string()))?;
        doc.push(lines);

        let mut captions = elements::TableLayout::new(vec![1, 1, 1]);
        let mut row = captions.row();
        for caption in SIGNATURE_CAPTIONS {
            row = row.element(elements::Paragraph::new(caption).aligned(Alignment::Center));
        }
        row.push()
            .map_err(|e| AppError::DocumentError(e.to_string()))?;
        doc.push(captions);

        Ok(doc)
    }
}

// Linha do corpo: célula única vira parágrafo; múltiplas células viram
// colunas de mesmo peso com a primeira à esquerda e a última à direita.
fn push_text_row(doc: &mut genpdf::Document, cells: &[String]) -> Result<(), AppError> {
    if cells.len() == 1 {
        doc.push(elements::Paragraph::new(cells[0].clone()));
        return Ok(());
    }

    let mut table = elements::TableLayout::new(vec![1; cells.len()]);
    let mut row = table.row();
    let last = cells.len() - 1;
    for (i, text) in cells.iter().enumerate() {
        let alignment = if i == 0 {
            Alignment::Left
        } else if i == last {
            Alignment::Right
        } else {
            Alignment::Center
        };
        row = row.element(elements::Paragraph::new(text.clone()).aligned(alignment));
    }
    row.push()
        .map_err(|e| AppError::DocumentError(e.to_string()))?;
    doc.push(table);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{CustomerSnapshot, ServiceOrder, ServiceType};
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn order() -> ServiceOrder {
        ServiceOrder {
            id: 42,
            contato: "Fulano".to_string(),
            hora_chegada: "08:20".to_string(),
            hora_saida: "11:55".to_string(),
            modelo_equipamento: "Notebook Dell".to_string(),
            defeito: "Não liga".to_string(),
            defeito_constatado: "Fonte em curto".to_string(),
            solucao: "Troca da fonte".to_string(),
            tipo_servico: ServiceType::Orcamento,
            val_servico: Decimal::from_str("100.00").unwrap(),
            val_material: Decimal::from_str("50.00").unwrap(),
            total: Decimal::from_str("150.00").unwrap(),
            garantia_peca: "90 dias".to_string(),
            garantia_servico: "90 dias".to_string(),
            created_at: DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            cliente: CustomerSnapshot {
                id: 7,
                nome: "Maria da Silva".to_string(),
                telefone: "81997268290".to_string(),
                cpf: "12345678909".to_string(),
                cnpj: String::new(),
                cep: "50100240".to_string(),
                endereco: "Rua Tupiniquins".to_string(),
                numero: "447".to_string(),
                bairro: "Santo Amaro".to_string(),
                cidade: "Recife".to_string(),
                uf: "PE".to_string(),
            },
        }
    }

    #[test]
    fn corpo_segue_a_ordem_vertical_fixa() {
        let cells = body_cells(&order());
        assert_eq!(cells.len(), 12);
        assert!(cells[0][0].starts_with("DATA: "));
        assert!(cells[3][0].starts_with("ENDEREÇO: "));
        assert!(cells[6][0].starts_with("MODELO DO EQUIPAMENTO: "));
        assert!(cells[10][2].starts_with("TOTAL: "));
        assert!(cells[11][1].starts_with("GARANTIA DE SERVIÇO: "));
    }

    #[test]
    fn data_e_contato_formatados() {
        let cells = body_cells(&order());
        assert_eq!(cells[0][0], "DATA: 01/03/2024");
        assert_eq!(cells[0][1], "CONTATO: FULANO");
    }

    #[test]
    fn valores_em_moeda_pt_br_com_total_do_backend() {
        let cells = body_cells(&order());
        assert_eq!(
            cells[10],
            vec![
                "VALOR SERVIÇO: R$ 100,00".to_string(),
                "VALOR MATERIAL: R$ 50,00".to_string(),
                "TOTAL: R$ 150,00".to_string(),
            ]
        );
    }

    #[test]
    fn garantias_em_maiusculas() {
        let cells = body_cells(&order());
        assert_eq!(cells[11][0], "GARANTIA DE PEÇA: 90 DIAS");
        assert_eq!(cells[11][1], "GARANTIA DE SERVIÇO: 90 DIAS");
    }

    #[test]
    fn telefone_e_cpf_saem_mascarados() {
        let cells = body_cells(&order());
        assert_eq!(cells[2][1], "FONE: (81) 99726-8290");
        assert_eq!(cells[5][0], "CPF: 123.456.789-09");
        assert_eq!(cells[5][1], "CNPJ: ");
    }

    #[test]
    fn campos_opcionais_vazios_rendem_vazio_sem_erro() {
        let mut o = order();
        o.solucao = String::new();
        o.hora_saida = String::new();
        let cells = body_cells(&o);
        assert_eq!(cells[9][0], "SOLUÇÃO: ");
        assert_eq!(cells[1][1], "HORA DE SAÍDA: ");
    }

    #[test]
    fn conteudo_e_deterministico_entre_invocacoes() {
        let o = order();
        assert_eq!(body_cells(&o), body_cells(&o));
    }

    #[test]
    fn clausulas_legais_sao_literais() {
        assert!(LEGAL_CLAUSES[0].starts_with("01 - "));
        assert!(LEGAL_CLAUSES[3].contains("08 (oito) dias úteis"));
        assert!(RETENTION_NOTICE.contains("prazo de 90 dias"));
    }
}
