// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CLIENTE DA API Z DADOS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Trait e implementações para os endpoints do backend: busca paginada,
// detalhe de empresa, estatísticas agregadas e prospecção por IA.
// Todas as chamadas são GET; a query string é montada a partir da
// serialização explícita dos filtros.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use async_trait::async_trait;

use crate::filters::SearchFilters;
use crate::types::{DashboardStats, EmpresaDetail, ProspectingAnswer, SearchPage};

/// Tamanho fixo de página usado em toda busca.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Erros do cliente da API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Falha de transporte (DNS, conexão, timeout do SO).
    #[error("Erro de rede: {0}")]
    Network(String),

    /// Status HTTP de erro sem corpo estruturado.
    #[error("Erro na API ({0})")]
    Http(u16),

    /// Mensagem estruturada vinda do campo `detail` de um corpo JSON de erro.
    #[error("{0}")]
    Detail(String),

    /// Empresa inexistente no endpoint de detalhe.
    #[error("Empresa não encontrada")]
    NotFound,

    /// Corpo de resposta que não é JSON, ou é JSON com formato inesperado.
    #[error("Resposta inválida da API ({0})")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// Trait principal do cliente da API.
///
/// Os controladores de página dependem apenas desta interface; a
/// implementação real usa reqwest e a de teste devolve respostas prontas.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Busca paginada de empresas.
    ///
    /// `q` é o termo livre (pode ser vazio quando a busca é só por filtros);
    /// `filters` são os critérios avançados; `page` é 1-based.
    async fn search(
        &self,
        q: &str,
        filters: &SearchFilters,
        page: u32,
    ) -> Result<SearchPage, ApiError>;

    /// Detalhe de uma empresa + quadro societário, pelo CNPJ cru.
    async fn get_empresa(&self, cnpj: &str) -> Result<EmpresaDetail, ApiError>;

    /// Snapshot de estatísticas agregadas da base.
    async fn get_stats(&self) -> Result<DashboardStats, ApiError>;

    /// Pergunta em linguagem natural ao endpoint de prospecção por IA.
    async fn ask_prospecting(&self, pergunta: &str) -> Result<ProspectingAnswer, ApiError>;
}

/// Monta a query string da busca: termo livre + paginação + filtros.
///
/// O termo é sempre transmitido (mesmo vazio, como `q=`), seguido de
/// `page` e `limit` fixos e de cada par produzido por
/// [`SearchFilters::to_query_pairs`].
pub fn build_search_query(q: &str, filters: &SearchFilters, page: u32, limit: u32) -> String {
    let mut parts = vec![
        format!("q={}", urlencoding::encode(q.trim())),
        format!("page={}", page),
        format!("limit={}", limit),
    ];
    for (name, value) in filters.to_query_pairs() {
        parts.push(format!("{}={}", name, urlencoding::encode(&value)));
    }
    parts.join("&")
}

/// Interpreta a resposta crua do endpoint de prospecção.
///
/// A degradação em três estágios é proposital e deve ser mantida nesta
/// ordem: o corpo chega como TEXTO (um gateway intermediário pode devolver
/// uma página HTML de erro com status 502), então:
///
/// 1. status de erro → prefere o campo `detail` se o corpo parsear como
///    JSON, senão mensagem genérica com o status;
/// 2. corpo que não é JSON válido → erro de resposta inválida;
/// 3. JSON que não é um objeto com o shape esperado → erro de formato.
pub fn parse_prospecting_body(status: u16, body: &str) -> Result<ProspectingAnswer, ApiError> {
    if !(200..300).contains(&status) {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
                return Err(ApiError::Detail(detail.to_string()));
            }
        }
        return Err(ApiError::Http(status));
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|_| ApiError::InvalidResponse("não é um JSON válido".into()))?;

    if !value.is_object() {
        return Err(ApiError::InvalidResponse("formato inesperado".into()));
    }

    serde_json::from_value(value)
        .map_err(|_| ApiError::InvalidResponse("formato inesperado".into()))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// IMPLEMENTAÇÃO HTTP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Cliente HTTP do backend Z Dados.
pub struct ZDadosClient {
    base_url: String,
    ia_base_url: String,
    page_size: u32,
    client: reqwest::Client,
}

impl ZDadosClient {
    /// Cria um cliente apontando para a URL base do backend.
    ///
    /// O gateway de prospecção usa a mesma base por padrão; ajuste com
    /// [`ZDadosClient::with_ia_base_url`] quando ele vive em outro host.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into().trim_end_matches('/').to_string();
        Self {
            ia_base_url: base.clone(),
            base_url: base,
            page_size: DEFAULT_PAGE_SIZE,
            client: reqwest::Client::new(),
        }
    }

    /// Define a URL base do gateway de prospecção por IA.
    pub fn with_ia_base_url(mut self, url: impl Into<String>) -> Self {
        self.ia_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Define o tamanho de página transmitido em `limit`.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

#[async_trait]
impl ApiClient for ZDadosClient {
    async fn search(
        &self,
        q: &str,
        filters: &SearchFilters,
        page: u32,
    ) -> Result<SearchPage, ApiError> {
        let query = build_search_query(q, filters, page, self.page_size);
        let url = format!("{}/search?{}", self.base_url, query);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }

        // Corpo de sucesso é confiado ao shape esperado
        Ok(response.json::<SearchPage>().await?)
    }

    async fn get_empresa(&self, cnpj: &str) -> Result<EmpresaDetail, ApiError> {
        let url = format!(
            "{}/empresa?cnpj={}",
            self.base_url,
            urlencoding::encode(cnpj.trim())
        );
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::NotFound);
        }

        Ok(response.json::<EmpresaDetail>().await?)
    }

    async fn get_stats(&self) -> Result<DashboardStats, ApiError> {
        let url = format!("{}/stats", self.base_url);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }

        Ok(response.json::<DashboardStats>().await?)
    }

    async fn ask_prospecting(&self, pergunta: &str) -> Result<ProspectingAnswer, ApiError> {
        let url = format!(
            "{}/api/ia-prospeccao?pergunta={}",
            self.ia_base_url,
            urlencoding::encode(pergunta.trim())
        );
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status().as_u16();

        // Lemos como texto primeiro: um 502 do gateway devolve HTML e
        // chamar .json() direto mascararia o status real com um erro de parse
        let body = response.text().await?;
        parse_prospecting_body(status, &body)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// IMPLEMENTAÇÃO MOCK PARA TESTES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Registro de uma chamada de busca feita ao mock.
#[derive(Debug, Clone)]
pub struct SearchCall {
    /// Termo livre transmitido
    pub q: String,
    /// Filtros transmitidos
    pub filters: SearchFilters,
    /// Página solicitada
    pub page: u32,
}

/// Cliente mock para testes unitários e de integração.
///
/// Devolve respostas configuradas e registra as buscas recebidas.
#[derive(Default)]
pub struct MockApiClient {
    /// Páginas de busca, indexadas por `page - 1`
    pub search_pages: Vec<SearchPage>,
    /// Resposta do endpoint de detalhe (None → NotFound)
    pub detail: Option<EmpresaDetail>,
    /// Resposta do endpoint de estatísticas
    pub stats: Option<DashboardStats>,
    /// Resposta do endpoint de prospecção
    pub prospecting: Option<ProspectingAnswer>,
    /// Se toda chamada deve falhar com erro de rede
    pub fail_all: bool,
    /// Buscas recebidas, na ordem
    pub search_calls: std::sync::Mutex<Vec<SearchCall>>,
}

impl MockApiClient {
    /// Mock vazio (busca devolve páginas vazias).
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock com páginas de busca prontas.
    pub fn with_pages(pages: Vec<SearchPage>) -> Self {
        Self {
            search_pages: pages,
            ..Default::default()
        }
    }

    /// Mock com resposta de detalhe pronta.
    pub fn with_detail(detail: EmpresaDetail) -> Self {
        Self {
            detail: Some(detail),
            ..Default::default()
        }
    }

    /// Mock em que toda chamada falha com erro de rede.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn search(
        &self,
        q: &str,
        filters: &SearchFilters,
        page: u32,
    ) -> Result<SearchPage, ApiError> {
        self.search_calls.lock().unwrap().push(SearchCall {
            q: q.to_string(),
            filters: filters.clone(),
            page,
        });

        if self.fail_all {
            return Err(ApiError::Network("mock: falha simulada".into()));
        }

        let index = page.saturating_sub(1) as usize;
        Ok(self
            .search_pages
            .get(index)
            .cloned()
            .unwrap_or(SearchPage {
                data: vec![],
                page,
                has_next_page: false,
            }))
    }

    async fn get_empresa(&self, _cnpj: &str) -> Result<EmpresaDetail, ApiError> {
        if self.fail_all {
            return Err(ApiError::Network("mock: falha simulada".into()));
        }
        self.detail.clone().ok_or(ApiError::NotFound)
    }

    async fn get_stats(&self) -> Result<DashboardStats, ApiError> {
        if self.fail_all {
            return Err(ApiError::Network("mock: falha simulada".into()));
        }
        Ok(self.stats.clone().unwrap_or_default())
    }

    async fn ask_prospecting(&self, pergunta: &str) -> Result<ProspectingAnswer, ApiError> {
        if self.fail_all {
            return Err(ApiError::Network("mock: falha simulada".into()));
        }
        Ok(self.prospecting.clone().unwrap_or(ProspectingAnswer {
            pergunta: pergunta.to_string(),
            ..Default::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterField;
    use crate::types::Empresa;

    #[test]
    fn test_build_search_query_sem_filtros() {
        let filters = SearchFilters::new();
        assert_eq!(
            build_search_query("padaria", &filters, 1, 50),
            "q=padaria&page=1&limit=50"
        );
    }

    #[test]
    fn test_build_search_query_termo_vazio() {
        let mut filters = SearchFilters::new();
        filters.set_field(FilterField::Uf, "SP");
        assert_eq!(
            build_search_query("", &filters, 3, 50),
            "q=&page=3&limit=50&uf=SP"
        );
    }

    #[test]
    fn test_build_search_query_codifica_valores() {
        let mut filters = SearchFilters::new();
        filters.set_field(FilterField::Municipio, "São Paulo");
        let query = build_search_query("pão & cia", &filters, 1, 50);
        assert!(query.starts_with("q=p%C3%A3o%20%26%20cia&page=1&limit=50"));
        assert!(query.contains("municipio=S%C3%A3o%20Paulo"));
    }

    #[test]
    fn test_prospecting_502_com_html() {
        // Gateway fora do ar devolve página HTML; a mensagem vem do status
        let body = "<html><body><h1>502 Bad Gateway</h1></body></html>";
        let err = parse_prospecting_body(502, body).unwrap_err();
        assert_eq!(err.to_string(), "Erro na API (502)");
    }

    #[test]
    fn test_prospecting_400_com_detail() {
        let err = parse_prospecting_body(400, r#"{"detail":"missing pergunta"}"#).unwrap_err();
        assert_eq!(err.to_string(), "missing pergunta");
    }

    #[test]
    fn test_prospecting_sucesso_nao_json() {
        let err = parse_prospecting_body(200, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
        assert_eq!(err.to_string(), "Resposta inválida da API (não é um JSON válido)");
    }

    #[test]
    fn test_prospecting_sucesso_json_nao_objeto() {
        let err = parse_prospecting_body(200, "[1,2,3]").unwrap_err();
        assert_eq!(err.to_string(), "Resposta inválida da API (formato inesperado)");
    }

    #[test]
    fn test_prospecting_sucesso() {
        let body = r#"{
            "pergunta": "padarias em SP",
            "resposta": "Encontrei 3 padarias.",
            "resultados": [{"cnpj": "12345678000195"}],
            "fontes": ["hf://dataset"],
            "metadata": {"provider": "hf", "hf_repo_id": "zdados/empresas", "hf_cache_ready": true}
        }"#;
        let answer = parse_prospecting_body(200, body).unwrap();
        assert_eq!(answer.resposta, "Encontrei 3 padarias.");
        assert_eq!(answer.resultados.len(), 1);
        assert!(answer.metadata.hf_cache_ready);
    }

    #[tokio::test]
    async fn test_mock_search_registra_chamadas() {
        let mock = MockApiClient::with_pages(vec![SearchPage {
            data: vec![Empresa::default()],
            page: 1,
            has_next_page: false,
        }]);

        let page = mock.search("padaria", &SearchFilters::new(), 1).await.unwrap();
        assert_eq!(page.data.len(), 1);

        let calls = mock.search_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].q, "padaria");
        assert_eq!(calls[0].page, 1);
    }

    #[tokio::test]
    async fn test_mock_detail_not_found() {
        let mock = MockApiClient::new();
        let err = mock.get_empresa("00000000000000").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(err.to_string(), "Empresa não encontrada");
    }
}
