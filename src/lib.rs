//! # Z Dados - Cliente de terminal
//!
//! Este crate implementa o cliente **Z Dados**: busca, inspeção e exportação
//! de dados públicos de empresas brasileiras servidos por um backend HTTP
//! externo. Todo o trabalho pesado (indexação, persistência, agregação)
//! acontece no backend; este repositório é orquestração pura de interface.
//!
//! ## O que dá para fazer?
//!
//! 1. Buscar empresas por termo livre e/ou filtros avançados, com paginação
//! 2. Inspecionar o perfil de uma empresa com seu quadro societário
//! 3. Ver estatísticas agregadas da base (dashboard)
//! 4. Perguntar em linguagem natural ao endpoint de prospecção por IA
//! 5. Exportar resultados para CSV ou planilha `.xls`
//!
//! ## Arquitetura Principal
//!
//! O sistema é composto por camadas bem separadas:
//!
//! ### 1. Cliente da API (`api`)
//! Trait [`api::ApiClient`] com a implementação reqwest e um mock para
//! testes. Inclui a degradação em três estágios (texto → JSON → shape) do
//! endpoint de prospecção, tolerante a páginas HTML de gateway.
//!
//! ### 2. Controladores de página (`pages`)
//! Cada página tem seu estado em uma struct explícita, transicionada apenas
//! por métodos nomeados. A busca carrega números de sequência que descartam
//! respostas atrasadas.
//!
//! ### 3. Exportação (`export`)
//! CSV com BOM/';'/CRLF e planilha `.xls` em HTML, com colunas e cabeçalhos
//! fixos, mais o dossiê em texto puro de uma empresa.
//!
//! ### 4. Interface de terminal (`tui`)
//! ratatui + crossterm; loop síncrono alimentado por um canal de eventos,
//! rede em tasks Tokio.
//!
//! ## Exemplo de Uso
//!
//! ```rust,ignore
//! use z_dados::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = ZDadosClient::new("http://localhost:8000");
//!     let page = client.search("padaria", &SearchFilters::new(), 1).await.unwrap();
//!     println!("{} resultado(s)", page.data.len());
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Tipos do modelo de dados, serializados contra o wire format do backend.
///
/// - [`Empresa`]: registro de empresa com CNPJ cru de 14 dígitos
/// - [`Socio`]: sócio relacionado a uma empresa
/// - [`SearchPage`]: página de resultados substituída por inteiro
/// - [`DashboardStats`]: snapshot agregado somente leitura
/// - [`ProspectingAnswer`]: resposta do endpoint de prospecção por IA
pub mod types;

/// Modelo de filtros da busca avançada.
///
/// Objeto-valor [`SearchFilters`] com serialização explícita e enumerada
/// ([`filters::FilterField`]) de cada critério reconhecido.
pub mod filters;

/// Formatação de exibição pt-BR (CNPJ, CEP, moeda, datas, números
/// compactos). Funções puras; nada é armazenado formatado.
pub mod format;

/// Cliente da API Z Dados.
///
/// Contém a trait [`api::ApiClient`], a implementação HTTP
/// [`api::ZDadosClient`] e o [`api::MockApiClient`] de testes.
pub mod api;

/// Exportação de resultados para CSV, `.xls` e dossiê em texto.
pub mod export;

/// Controladores de página: busca, detalhe, dashboard e prospecção.
pub mod pages;

/// Interface de terminal rica (TUI).
pub mod tui;

/// Configuração do runtime, do backend e utilitários de ambiente.
///
/// Fornece configuração dinâmica via variáveis de ambiente:
///
/// - `ZDADOS_API_URL`: URL base do backend
/// - `ZDADOS_IA_URL`: URL base do gateway de prospecção
/// - `ZDADOS_PAGE_SIZE`: tamanho de página da busca
/// - `TOKIO_THREADS` / `TOKIO_MAX_THREADS`: dimensionamento do runtime
pub mod config;

// Re-exports principais
pub use api::{ApiClient, ApiError, MockApiClient, ZDadosClient};
pub use config::{load_api_config, load_runtime_config, ApiConfig};
pub use filters::{SearchFilters, StatusFilter};
pub use types::*;

/// Versão da biblioteca.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude com imports comuns para uso rápido.
///
/// ```rust,ignore
/// use z_dados::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{ApiClient, ApiError, MockApiClient, ZDadosClient};
    pub use crate::export::{DossierDepth, ExportFormat};
    pub use crate::filters::{FilterField, SearchFilters, StatusFilter};
    pub use crate::pages::{DashboardPage, DetailPage, ProspectingPage, SearchState};
    pub use crate::types::*;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
