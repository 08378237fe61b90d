// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// EXPORTAÇÃO DE RESULTADOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Converte uma lista ordenada de empresas em bytes CSV (BOM + ';' + CRLF)
// ou em uma planilha .xls (tabela HTML com namespaces de spreadsheet).
// A ordem das colunas e os cabeçalhos são fixos.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::io::Write;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;

use crate::format::{format_capital, format_cep, format_cnpj, format_data, status_label};
use crate::types::{Empresa, Socio};

/// Nome-base padrão dos arquivos exportados.
pub const DEFAULT_BASENAME: &str = "z-dados-leads";

/// Erros de exportação.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Erro de serialização CSV.
    #[error("Erro ao gerar CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Erro de E/S ao gravar o arquivo.
    #[error("Erro ao gravar arquivo: {0}")]
    Io(#[from] std::io::Error),
}

/// Formato de exportação escolhido pelo usuário.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// CSV com BOM, separador ';' e linhas CRLF.
    Csv,
    /// Tabela HTML servida como planilha Excel (.xls).
    Excel,
}

impl ExportFormat {
    /// Converte o texto da linha de comando em formato.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().trim() {
            "csv" => Some(Self::Csv),
            "xls" | "excel" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Extensão de arquivo do formato.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xls",
        }
    }

    /// Content type equivalente ao download no navegador.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8;",
            Self::Excel => "application/vnd.ms-excel;charset=utf-8;",
        }
    }
}

struct Coluna {
    titulo: &'static str,
    valor: fn(&Empresa) -> String,
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Tabela fixa de colunas: cabeçalho legível + transformação de valor.
static COLUNAS: Lazy<Vec<Coluna>> = Lazy::new(|| {
    vec![
        Coluna {
            titulo: "CNPJ",
            valor: |e| format_cnpj(&e.cnpj),
        },
        Coluna {
            titulo: "Razão Social",
            valor: |e| e.razao_social.clone(),
        },
        Coluna {
            titulo: "Nome Fantasia",
            valor: |e| opt(&e.nome_fantasia),
        },
        Coluna {
            titulo: "CNAE Principal",
            valor: |e| opt(&e.cnae_principal),
        },
        Coluna {
            titulo: "Situação",
            valor: |e| status_label(e.status_ativa).to_string(),
        },
        Coluna {
            titulo: "UF",
            valor: |e| opt(&e.uf),
        },
        Coluna {
            titulo: "Município",
            valor: |e| opt(&e.municipio),
        },
        Coluna {
            titulo: "Bairro",
            valor: |e| opt(&e.bairro),
        },
        Coluna {
            titulo: "Logradouro",
            valor: |e| opt(&e.logradouro),
        },
        Coluna {
            titulo: "Número",
            valor: |e| opt(&e.numero),
        },
        Coluna {
            titulo: "CEP",
            valor: |e| opt(&e.cep),
        },
        Coluna {
            titulo: "Telefone",
            valor: |e| opt(&e.telefone_real),
        },
        Coluna {
            titulo: "E-mail",
            valor: |e| opt(&e.email_real),
        },
        Coluna {
            titulo: "Site",
            valor: |e| opt(&e.site),
        },
        Coluna {
            titulo: "Capital Social",
            valor: |e| e.capital_social.map(format_capital).unwrap_or_default(),
        },
        Coluna {
            titulo: "Data de Abertura",
            valor: |e| e.data_abertura.as_deref().map(format_data).unwrap_or_default(),
        },
    ]
});

/// Deriva o nome do arquivo exportado, sempre com a extensão do formato.
pub fn export_filename(base: Option<&str>, format: ExportFormat) -> String {
    format!("{}.{}", base.unwrap_or(DEFAULT_BASENAME), format.extension())
}

/// Gera os bytes CSV de uma lista de empresas.
///
/// UTF-8 com BOM (para detecção automática em planilhas), separador ';',
/// linhas CRLF, células entre aspas somente quando contêm separador, aspas
/// ou quebra de linha (aspas internas duplicadas). Lista vazia produz BOM +
/// linha de cabeçalho + CRLF, nada mais.
pub fn to_csv(empresas: &[Empresa]) -> Result<Vec<u8>, ExportError> {
    let mut buf: Vec<u8> = vec![0xEF, 0xBB, 0xBF];
    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .terminator(csv::Terminator::CRLF)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(&mut buf);

        writer.write_record(COLUNAS.iter().map(|c| c.titulo))?;
        for empresa in empresas {
            writer.write_record(COLUNAS.iter().map(|c| (c.valor)(empresa)))?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

fn escape_html(texto: &str) -> String {
    texto
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Gera os bytes da planilha .xls (tabela HTML com namespaces de Office).
///
/// Cabeçalhos com o fundo fixo `#4F46E5`, mesmo conteúdo das colunas do CSV.
pub fn to_excel(empresas: &[Empresa]) -> Vec<u8> {
    let cabecalhos: String = COLUNAS
        .iter()
        .map(|c| {
            format!(
                "<th style=\"background:#4F46E5;color:white;font-weight:bold;padding:8px\">{}</th>",
                escape_html(c.titulo)
            )
        })
        .collect();

    let linhas: String = empresas
        .iter()
        .map(|empresa| {
            let celulas: String = COLUNAS
                .iter()
                .map(|c| format!("<td>{}</td>", escape_html(&(c.valor)(empresa))))
                .collect();
            format!("<tr>{}</tr>", celulas)
        })
        .collect();

    let html = format!(
        concat!(
            "<html xmlns:o=\"urn:schemas-microsoft-com:office:office\"\n",
            "      xmlns:x=\"urn:schemas-microsoft-com:office:spreadsheet\"\n",
            "      xmlns=\"http://www.w3.org/TR/REC-html40\">\n",
            "<head><meta charset=\"UTF-8\"></head>\n",
            "<body>\n",
            "<table border=\"1\">\n",
            "<thead><tr>{}</tr></thead>\n",
            "<tbody>{}</tbody>\n",
            "</table>\n",
            "</body>\n",
            "</html>\n"
        ),
        cabecalhos, linhas
    );

    html.into_bytes()
}

/// Exporta a lista no formato escolhido e grava em `dir`.
///
/// A gravação passa por um arquivo temporário no mesmo diretório que é
/// persistido (renomeado) no destino final, liberando o recurso transitório
/// incondicionalmente.
pub fn save_export(
    dir: &Path,
    base: Option<&str>,
    format: ExportFormat,
    empresas: &[Empresa],
) -> Result<PathBuf, ExportError> {
    let bytes = match format {
        ExportFormat::Csv => to_csv(empresas)?,
        ExportFormat::Excel => to_excel(empresas),
    };

    let path = dir.join(export_filename(base, format));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.persist(&path).map_err(|e| ExportError::Io(e.error))?;

    log::info!("Exportado {} registro(s) para {}", empresas.len(), path.display());
    Ok(path)
}

/// Profundidade do dossiê impresso de uma empresa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DossierDepth {
    /// Dados básicos de contato e endereço condensado.
    Simples,
    /// Todos os detalhes, incluindo abertura, capital e quadro societário.
    Completo,
}

/// Monta o dossiê em texto puro de uma empresa, para impressão ou `.txt`.
pub fn dossier(empresa: &Empresa, socios: &[Socio], depth: DossierDepth) -> String {
    let mut out = String::new();
    let situacao = if empresa.status_ativa { "ATIVA" } else { "BAIXADA" };

    out.push_str(&"━".repeat(66));
    out.push('\n');
    out.push_str(&format!(" {}\n", empresa.display_name()));
    out.push_str(&format!(" CNPJ {}  [{}]\n", format_cnpj(&empresa.cnpj), situacao));
    if empresa.nome_fantasia.is_some() {
        out.push_str(&format!(" Razão social: {}\n", empresa.razao_social));
    }
    out.push_str(&"━".repeat(66));
    out.push('\n');

    out.push_str("\nContato\n");
    out.push_str(&format!(
        "  Telefone: {}\n",
        empresa.telefone_real.as_deref().unwrap_or("Não informado")
    ));
    out.push_str(&format!(
        "  E-mail:   {}\n",
        empresa.email_real.as_deref().unwrap_or("Não informado")
    ));
    if let Some(site) = empresa.site.as_deref() {
        out.push_str(&format!("  Site:     {}\n", site));
    }
    if let Some(instagram) = empresa.instagram.as_deref() {
        out.push_str(&format!("  Instagram: {}\n", instagram));
    }
    if let Some(link) = empresa.whatsapp_link() {
        out.push_str(&format!("  WhatsApp: {}\n", link));
    }

    out.push_str("\nEndereço\n");
    let cep = empresa
        .cep
        .as_deref()
        .map(format_cep)
        .unwrap_or_else(|| "Não informado".into());
    out.push_str(&format!("  CEP: {}\n", cep));
    out.push_str(&format!(
        "  {} - {}\n",
        empresa.municipio.as_deref().unwrap_or("?"),
        empresa.uf.as_deref().unwrap_or("?")
    ));
    if depth == DossierDepth::Completo {
        if let Some(logradouro) = empresa.logradouro.as_deref() {
            out.push_str(&format!(
                "  {}, {}",
                logradouro,
                empresa.numero.as_deref().unwrap_or("s/n")
            ));
            if let Some(bairro) = empresa.bairro.as_deref() {
                out.push_str(&format!(" - {}", bairro));
            }
            out.push('\n');
        }
    }

    if depth == DossierDepth::Completo {
        out.push_str("\nRegistro\n");
        out.push_str(&format!(
            "  Data de abertura: {}\n",
            empresa
                .data_abertura
                .as_deref()
                .map(format_data)
                .unwrap_or_else(|| "Não informada".into())
        ));
        out.push_str(&format!(
            "  Capital social:   {}\n",
            empresa
                .capital_social
                .map(format_capital)
                .unwrap_or_else(|| "Não informado".into())
        ));
        out.push_str(&format!(
            "  CNAE principal:   {}\n",
            empresa.cnae_principal.as_deref().unwrap_or("Não informada")
        ));

        out.push_str("\nQuadro Societário\n");
        if socios.is_empty() {
            out.push_str("  Nenhum sócio registrado nesta empresa.\n");
        } else {
            for socio in socios {
                out.push_str(&format!(
                    "  - {} ({})\n",
                    socio.nome_socio,
                    socio.qualificacao.as_deref().unwrap_or("SÓCIO")
                ));
            }
        }
    }

    out
}
