// src/common/br.rs

//! Regras de formato brasileiras compartilhadas: máscaras de CPF/CNPJ,
//! telefone e CEP, e formatação de moeda (pt-BR).

use rust_decimal::Decimal;

pub const PHONE_MASK: &str = "(99) 99999-9999";
pub const CPF_MASK: &str = "999.999.999-99";
pub const CNPJ_MASK: &str = "99.999.999/9999-99";
pub const CEP_MASK: &str = "99999-999";

/// Remove tudo que não for dígito. É a normalização aplicada a telefone,
/// CPF, CNPJ e CEP antes de persistir.
pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Compara o valor com uma máscara onde '9' casa com um dígito e qualquer
/// outro caractere é literal.
pub fn matches_mask(value: &str, mask: &str) -> bool {
    let value: Vec<char> = value.chars().collect();
    let mask: Vec<char> = mask.chars().collect();
    if value.len() != mask.len() {
        return false;
    }
    value.iter().zip(mask.iter()).all(|(v, m)| {
        if *m == '9' {
            v.is_ascii_digit()
        } else {
            v == m
        }
    })
}

/// Valida um horário no formato `HH:MM` (24h).
pub fn is_valid_hora(value: &str) -> bool {
    if !matches_mask(value, "99:99") {
        return false;
    }
    let hora: u32 = value[0..2].parse().unwrap_or(99);
    let minuto: u32 = value[3..5].parse().unwrap_or(99);
    hora < 24 && minuto < 60
}

/// Aplica uma máscara de exibição sobre uma string de dígitos. Se a
/// quantidade de dígitos não corresponder à máscara, devolve o valor cru.
fn apply_mask(digits: &str, mask: &str) -> String {
    let expected = mask.chars().filter(|c| *c == '9').count();
    if digits.len() != expected || !digits.chars().all(|c| c.is_ascii_digit()) {
        return digits.to_string();
    }
    let mut out = String::with_capacity(mask.len());
    let mut source = digits.chars();
    for m in mask.chars() {
        if m == '9' {
            // Seguro: contamos os '9' acima
            out.push(source.next().unwrap_or('0'));
        } else {
            out.push(m);
        }
    }
    out
}

/// Telefone para exibição: 11 dígitos viram `(DD) DDDDD-DDDD`,
/// 10 dígitos viram `(DD) DDDD-DDDD` (linha fixa antiga).
pub fn format_telefone(digits: &str) -> String {
    match digits.len() {
        11 => apply_mask(digits, PHONE_MASK),
        10 => apply_mask(digits, "(99) 9999-9999"),
        _ => digits.to_string(),
    }
}

pub fn format_cpf(digits: &str) -> String {
    apply_mask(digits, CPF_MASK)
}

pub fn format_cnpj(digits: &str) -> String {
    apply_mask(digits, CNPJ_MASK)
}

/// Formata um valor monetário na convenção pt-BR: `R$ 1.234,56`.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative();
    let plain = format!("{:.2}", rounded.abs());
    let (inteiro, centavos) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    // Agrupa milhares com ponto, da direita para a esquerda.
    let mut agrupado = String::new();
    for (i, c) in inteiro.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(c);
    }
    let inteiro: String = agrupado.chars().rev().collect();

    if negative {
        format!("-R$ {},{}", inteiro, centavos)
    } else {
        format!("R$ {},{}", inteiro, centavos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn only_digits_remove_mascara_do_telefone() {
        assert_eq!(only_digits("(81) 99726-8290"), "81997268290");
        assert_eq!(only_digits("(81) 99726-8290").len(), 11);
    }

    #[test]
    fn only_digits_remove_mascara_de_cpf_e_cnpj() {
        assert_eq!(only_digits("123.456.789-09").len(), 11);
        assert_eq!(only_digits("08.546.821/0001-30").len(), 14);
        assert_eq!(only_digits("08.546.821/0001-30"), "08546821000130");
    }

    #[test]
    fn mascara_de_telefone_exige_formato_exato() {
        assert!(matches_mask("(81) 99726-8290", PHONE_MASK));
        assert!(!matches_mask("81997268290", PHONE_MASK));
        assert!(!matches_mask("(81) 9972-8290", PHONE_MASK));
        assert!(!matches_mask("(8a) 99726-8290", PHONE_MASK));
    }

    #[test]
    fn mascara_de_cep() {
        assert!(matches_mask("50100-240", CEP_MASK));
        assert!(!matches_mask("50100240", CEP_MASK));
    }

    #[test]
    fn hora_valida_e_invalida() {
        assert!(is_valid_hora("08:20"));
        assert!(is_valid_hora("23:59"));
        assert!(!is_valid_hora("24:00"));
        assert!(!is_valid_hora("08:60"));
        assert!(!is_valid_hora("8:20"));
        assert!(!is_valid_hora("0820"));
    }

    #[test]
    fn exibicao_de_telefone_celular_e_fixo() {
        assert_eq!(format_telefone("81997268290"), "(81) 99726-8290");
        assert_eq!(format_telefone("8139726829"), "(81) 3972-6829");
        // Fora do padrão: devolve cru, nunca inventa dígitos
        assert_eq!(format_telefone("123"), "123");
    }

    #[test]
    fn exibicao_de_documentos() {
        assert_eq!(format_cpf("12345678909"), "123.456.789-09");
        assert_eq!(format_cnpj("08546821000130"), "08.546.821/0001-30");
        assert_eq!(format_cpf(""), "");
    }

    #[test]
    fn moeda_pt_br() {
        assert_eq!(format_brl(Decimal::from_str("150.00").unwrap()), "R$ 150,00");
        assert_eq!(format_brl(Decimal::from_str("1234.5").unwrap()), "R$ 1.234,50");
        assert_eq!(
            format_brl(Decimal::from_str("1234567.89").unwrap()),
            "R$ 1.234.567,89"
        );
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_brl(Decimal::from_str("-10").unwrap()), "-R$ 10,00");
    }
}
