// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// FORMATAÇÃO DE EXIBIÇÃO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Funções puras de formatação pt-BR. Pontuação de CNPJ/CEP é sempre uma
// visão derivada do valor cru; nada aqui é armazenado de volta.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use chrono::{DateTime, NaiveDate};

/// Insere a pontuação de exibição em um CNPJ cru de 14 dígitos.
///
/// `12345678000195` → `12.345.678/0001-95`.
///
/// Entrada suportada: exatamente 14 dígitos ASCII. Qualquer outra coisa
/// (inclusive um CNPJ já pontuado) é devolvida sem alteração — reaplicar o
/// formatador sobre a própria saída não é um uso suportado.
pub fn format_cnpj(cnpj: &str) -> String {
    if cnpj.len() != 14 || !cnpj.bytes().all(|b| b.is_ascii_digit()) {
        return cnpj.to_string();
    }
    format!(
        "{}.{}.{}/{}-{}",
        &cnpj[0..2],
        &cnpj[2..5],
        &cnpj[5..8],
        &cnpj[8..12],
        &cnpj[12..14]
    )
}

/// Insere a pontuação de exibição em um CEP cru de 8 dígitos.
///
/// `01310100` → `01310-100`. Outros formatos são devolvidos sem alteração.
pub fn format_cep(cep: &str) -> String {
    if cep.len() != 8 || !cep.bytes().all(|b| b.is_ascii_digit()) {
        return cep.to_string();
    }
    format!("{}-{}", &cep[0..5], &cep[5..8])
}

/// Rótulo fixo da situação cadastral para exportação.
pub fn status_label(ativa: bool) -> &'static str {
    if ativa {
        "ATIVA"
    } else {
        "INATIVA"
    }
}

/// Formata um valor monetário em moeda pt-BR: `R$ 1.234,56`.
pub fn format_capital(valor: f64) -> String {
    let negativo = valor < 0.0;
    let centavos = (valor.abs() * 100.0).round() as u64;
    let inteiro = centavos / 100;
    let fracao = centavos % 100;

    let digitos = inteiro.to_string();
    let mut agrupado = String::with_capacity(digitos.len() + digitos.len() / 3);
    for (i, c) in digitos.chars().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(c);
    }

    let sinal = if negativo { "-" } else { "" };
    format!("{}R$ {},{:02}", sinal, agrupado, fracao)
}

/// Formata uma data ISO 8601 como `DD/MM/AAAA`.
///
/// Aceita tanto `2020-05-17` quanto um timestamp RFC 3339. Se nada parsear,
/// devolve a string original.
pub fn format_data(iso: &str) -> String {
    if let Ok(data) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        return data.format("%d/%m/%Y").to_string();
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(iso) {
        return ts.format("%d/%m/%Y").to_string();
    }
    iso.to_string()
}

/// Formata um número em notação compacta pt-BR: `1,2 mil`, `3,4 mi`, `1,1 bi`.
///
/// No máximo uma casa decimal, com vírgula como separador.
pub fn format_compact(valor: f64) -> String {
    let abs = valor.abs();
    let (escala, sufixo) = if abs >= 1_000_000_000.0 {
        (1_000_000_000.0, " bi")
    } else if abs >= 1_000_000.0 {
        (1_000_000.0, " mi")
    } else if abs >= 1_000.0 {
        (1_000.0, " mil")
    } else {
        (1.0, "")
    };

    let reduzido = valor / escala;
    let arredondado = (reduzido * 10.0).round() / 10.0;
    if (arredondado.fract()).abs() < f64::EPSILON {
        format!("{}{}", arredondado as i64, sufixo)
    } else {
        format!("{}{}", format!("{:.1}", arredondado).replace('.', ","), sufixo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cnpj() {
        assert_eq!(format_cnpj("12345678000195"), "12.345.678/0001-95");
        assert_eq!(format_cnpj("11222333000181"), "11.222.333/0001-81");
    }

    #[test]
    fn test_format_cnpj_entrada_nao_suportada() {
        // Entrada fora do formato cru é devolvida sem alteração
        assert_eq!(format_cnpj("12.345.678/0001-95"), "12.345.678/0001-95");
        assert_eq!(format_cnpj("123"), "123");
        assert_eq!(format_cnpj(""), "");
        assert_eq!(format_cnpj("1234567800019X"), "1234567800019X");
    }

    #[test]
    fn test_format_cnpj_idempotencia_sobre_o_cru() {
        let cru = "12345678000195";
        assert_eq!(format_cnpj(cru), format_cnpj(cru));
    }

    #[test]
    fn test_format_cep() {
        assert_eq!(format_cep("01310100"), "01310-100");
        assert_eq!(format_cep("01310-100"), "01310-100");
        assert_eq!(format_cep(""), "");
    }

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(true), "ATIVA");
        assert_eq!(status_label(false), "INATIVA");
    }

    #[test]
    fn test_format_capital() {
        assert_eq!(format_capital(0.0), "R$ 0,00");
        assert_eq!(format_capital(1234.56), "R$ 1.234,56");
        assert_eq!(format_capital(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_capital(999.9), "R$ 999,90");
        assert_eq!(format_capital(-50.25), "-R$ 50,25");
    }

    #[test]
    fn test_format_data() {
        assert_eq!(format_data("2020-05-17"), "17/05/2020");
        assert_eq!(format_data("2020-05-17T12:30:00Z"), "17/05/2020");
        assert_eq!(format_data("nada-a-ver"), "nada-a-ver");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(950.0), "950");
        assert_eq!(format_compact(1_200.0), "1,2 mil");
        assert_eq!(format_compact(3_400_000.0), "3,4 mi");
        assert_eq!(format_compact(1_100_000_000.0), "1,1 bi");
        assert_eq!(format_compact(2_000_000.0), "2 mi");
    }
}
