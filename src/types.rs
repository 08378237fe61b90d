// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TIPOS DO MODELO DE DADOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Estruturas tipadas contra o formato de resposta do backend Z Dados.
// Todos os campos seguem os nomes do wire format; nomes camelCase são
// renomeados via serde.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use serde::{Deserialize, Serialize};

/// Registro de uma empresa na base.
///
/// O CNPJ é sempre a string crua de 14 dígitos; a pontuação de exibição
/// (`NN.NNN.NNN/NNNN-NN`) é derivada em [`crate::format::format_cnpj`] e
/// nunca armazenada.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Empresa {
    /// Identificador interno do registro
    pub id: String,
    /// CNPJ cru, 14 dígitos
    pub cnpj: String,
    /// Razão social
    pub razao_social: String,
    /// Nome fantasia (quando registrado)
    pub nome_fantasia: Option<String>,
    /// Código CNAE da atividade principal
    pub cnae_principal: Option<String>,
    /// Data de abertura (ISO 8601)
    pub data_abertura: Option<String>,
    /// Capital social registrado
    pub capital_social: Option<f64>,
    /// Situação cadastral (ativa/baixada)
    pub status_ativa: bool,
    /// CEP cru, 8 dígitos
    pub cep: Option<String>,
    /// Unidade federativa
    pub uf: Option<String>,
    /// Município
    pub municipio: Option<String>,
    /// Logradouro
    pub logradouro: Option<String>,
    /// Número do endereço
    pub numero: Option<String>,
    /// Bairro
    pub bairro: Option<String>,
    /// Telefone obtido por enriquecimento
    pub telefone_real: Option<String>,
    /// E-mail obtido por enriquecimento
    pub email_real: Option<String>,
    /// Website
    pub site: Option<String>,
    /// Handle do Instagram
    pub instagram: Option<String>,
    /// Se o registro ainda aguarda enriquecimento de contato
    pub necessita_enriquecimento: bool,
    /// Timestamp de criação do registro
    pub created_at: String,
}

impl Empresa {
    /// Nome de exibição: nome fantasia quando existe, senão razão social.
    pub fn display_name(&self) -> &str {
        self.nome_fantasia.as_deref().unwrap_or(&self.razao_social)
    }

    /// Se o registro tem contato enriquecido confirmado.
    pub fn is_enriched(&self) -> bool {
        !self.necessita_enriquecimento
            && (self.telefone_real.is_some() || self.email_real.is_some())
    }

    /// Link de conversa no WhatsApp derivado do telefone enriquecido.
    ///
    /// Remove tudo que não for dígito e prefixa o DDI 55.
    pub fn whatsapp_link(&self) -> Option<String> {
        let telefone = self.telefone_real.as_deref()?;
        let digitos: String = telefone.chars().filter(|c| c.is_ascii_digit()).collect();
        if digitos.is_empty() {
            return None;
        }
        Some(format!("https://wa.me/55{}", digitos))
    }
}

/// Sócio registrado de uma empresa.
///
/// Vários sócios se relacionam a uma empresa via `cnpj_empresa`; não existe
/// posse além da relação.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Socio {
    /// Identificador interno do registro
    pub id: String,
    /// CNPJ da empresa dona da relação
    pub cnpj_empresa: String,
    /// Nome do sócio
    pub nome_socio: String,
    /// Qualificação (cargo/papel) quando informada
    pub qualificacao: Option<String>,
    /// Timestamp de criação do registro
    pub created_at: String,
}

/// Resposta do endpoint de detalhe: empresa + quadro societário.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmpresaDetail {
    /// A empresa consultada
    pub empresa: Empresa,
    /// Sócios relacionados
    pub socios: Vec<Socio>,
}

/// Uma página de resultados de busca.
///
/// Substituída por inteiro a cada requisição; páginas nunca são mescladas
/// com resultados anteriores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    /// Registros da página
    pub data: Vec<Empresa>,
    /// Número da página (1-based)
    pub page: u32,
    /// Se existe próxima página
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
}

/// Contagem de empresas por UF (ranking do dashboard).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UfCount {
    /// Unidade federativa
    pub uf: String,
    /// Quantidade de empresas
    pub count: u64,
}

/// Contagem de empresas por CNAE (ranking do dashboard).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CnaeCount {
    /// Código/descrição do CNAE
    pub cnae: String,
    /// Quantidade de empresas
    pub count: u64,
}

/// Snapshot de estatísticas agregadas da base.
///
/// Buscado uma única vez por visita ao dashboard; somente leitura.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total de empresas na base
    #[serde(rename = "totalEmpresas")]
    pub total_empresas: u64,
    /// Empresas ativas
    pub ativas: u64,
    /// Empresas inativas/baixadas
    pub inativas: u64,
    /// Capital social médio
    #[serde(rename = "mediaCapital")]
    pub media_capital: f64,
    /// Ranking de UFs por quantidade de empresas
    #[serde(rename = "topUFs")]
    pub top_ufs: Vec<UfCount>,
    /// Ranking de CNAEs por quantidade de empresas
    #[serde(rename = "topCNAEs")]
    pub top_cnaes: Vec<CnaeCount>,
}

impl DashboardStats {
    /// Percentual de empresas ativas (0.0 - 100.0).
    pub fn percentual_ativas(&self) -> f64 {
        if self.total_empresas == 0 {
            return 0.0;
        }
        (self.ativas as f64 / self.total_empresas as f64) * 100.0
    }
}

/// Metadados retornados pelo endpoint de prospecção por IA.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProspectingMetadata {
    /// Provedor do modelo
    pub provider: String,
    /// Repositório HuggingFace consultado
    pub hf_repo_id: String,
    /// Se o cache do dataset já está pronto
    pub hf_cache_ready: bool,
}

/// Resposta do endpoint de prospecção por IA.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProspectingAnswer {
    /// Pergunta recebida pelo backend
    pub pergunta: String,
    /// Resposta gerada
    pub resposta: String,
    /// Registros que fundamentam a resposta (shape livre)
    pub resultados: Vec<serde_json::Value>,
    /// Fontes citadas
    pub fontes: Vec<String>,
    /// Metadados do provedor
    pub metadata: ProspectingMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empresa_base() -> Empresa {
        Empresa {
            id: "1".into(),
            cnpj: "12345678000195".into(),
            razao_social: "Padaria Pão Quente LTDA".into(),
            status_ativa: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_display_name_prefere_fantasia() {
        let mut empresa = empresa_base();
        assert_eq!(empresa.display_name(), "Padaria Pão Quente LTDA");

        empresa.nome_fantasia = Some("Pão Quente".into());
        assert_eq!(empresa.display_name(), "Pão Quente");
    }

    #[test]
    fn test_is_enriched() {
        let mut empresa = empresa_base();
        empresa.necessita_enriquecimento = true;
        empresa.telefone_real = Some("11 99999-0000".into());
        assert!(!empresa.is_enriched());

        empresa.necessita_enriquecimento = false;
        assert!(empresa.is_enriched());

        empresa.telefone_real = None;
        empresa.email_real = None;
        assert!(!empresa.is_enriched());
    }

    #[test]
    fn test_whatsapp_link() {
        let mut empresa = empresa_base();
        assert_eq!(empresa.whatsapp_link(), None);

        empresa.telefone_real = Some("(11) 98765-4321".into());
        assert_eq!(
            empresa.whatsapp_link().as_deref(),
            Some("https://wa.me/5511987654321")
        );
    }

    #[test]
    fn test_search_page_wire_format() {
        let json = r#"{"data":[],"page":2,"hasNextPage":true}"#;
        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 2);
        assert!(page.has_next_page);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_dashboard_stats_wire_format() {
        let json = r#"{
            "totalEmpresas": 100,
            "ativas": 75,
            "inativas": 25,
            "mediaCapital": 5000.5,
            "topUFs": [{"uf": "SP", "count": 40}],
            "topCNAEs": [{"cnae": "5611201", "count": 12}]
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_empresas, 100);
        assert_eq!(stats.top_ufs[0].uf, "SP");
        assert!((stats.percentual_ativas() - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentual_ativas_base_vazia() {
        let stats = DashboardStats::default();
        assert_eq!(stats.percentual_ativas(), 0.0);
    }
}
