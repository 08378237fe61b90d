//! Orquestrador da busca.
//!
//! Estado explícito da página inicial: termo digitado, filtros aplicados,
//! página corrente e resultados. Toda transição passa por um método nomeado
//! (`submit_search`, `apply_filters`, `next_page`, `prev_page`) e cada
//! requisição emitida carrega um número de sequência monotônico; respostas
//! que não são da última requisição emitida são descartadas, eliminando a
//! corrida de sobrescrita por resposta atrasada.

use crate::api::ApiError;
use crate::filters::SearchFilters;
use crate::types::{Empresa, SearchPage};

/// Requisição de busca emitida pelo orquestrador.
///
/// O chamador (TUI ou CLI) executa a chamada HTTP e devolve o resultado em
/// [`SearchState::on_response`] / [`SearchState::on_error`] com o mesmo `seq`.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Número de sequência desta requisição
    pub seq: u64,
    /// Termo livre
    pub q: String,
    /// Filtros avançados transmitidos
    pub filters: SearchFilters,
    /// Página solicitada (1-based)
    pub page: u32,
}

/// Estado da página de busca.
#[derive(Debug, Default)]
pub struct SearchState {
    /// Texto digitado no campo de busca
    pub query: String,
    applied_filters: SearchFilters,
    results: Vec<Empresa>,
    page: u32,
    has_next_page: bool,
    is_loading: bool,
    has_searched: bool,
    next_seq: u64,
    latest_seq: Option<u64>,
}

impl SearchState {
    /// Estado inicial pristino (nenhuma busca feita).
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Default::default()
        }
    }

    /// Resultados da última página recebida.
    pub fn results(&self) -> &[Empresa] {
        &self.results
    }

    /// Página corrente (1-based).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Filtros atualmente aplicados.
    pub fn applied_filters(&self) -> &SearchFilters {
        &self.applied_filters
    }

    /// Se há requisição em andamento.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Se alguma busca já foi disparada nesta sessão.
    ///
    /// Distingue a tela pristina inicial de um resultado vazio ou de erro.
    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    /// Se o controle "próxima página" está habilitado.
    pub fn can_go_next(&self) -> bool {
        self.has_next_page
    }

    /// Se o controle "página anterior" está habilitado.
    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    /// Submete o termo livre digitado.
    ///
    /// Termo vazio (após trim) é um no-op: nenhuma requisição, estado
    /// intocado. Caso contrário volta à página 1 e dispara a busca com um
    /// conjunto de filtros VAZIO — busca simples sempre limpa os filtros
    /// avançados aplicados antes; os dois caminhos nunca se compõem.
    pub fn submit_search(&mut self) -> Option<SearchRequest> {
        if self.query.trim().is_empty() {
            return None;
        }
        Some(self.issue(SearchFilters::new(), 1))
    }

    /// Aplica o conjunto completo de filtros avançados.
    ///
    /// Volta à página 1 e transmite o termo corrente junto com o objeto de
    /// filtros recebido (substituído por inteiro, nunca mesclado).
    pub fn apply_filters(&mut self, filters: SearchFilters) -> SearchRequest {
        self.issue(filters, 1)
    }

    /// Limpa os filtros avançados, reaplicando o conjunto vazio.
    pub fn clear_filters(&mut self) -> SearchRequest {
        self.issue(SearchFilters::new(), 1)
    }

    /// Avança uma página reutilizando termo e filtros da última busca.
    ///
    /// `None` quando a última resposta indicou que não há próxima página.
    pub fn next_page(&mut self) -> Option<SearchRequest> {
        if !self.can_go_next() {
            return None;
        }
        let filters = self.applied_filters.clone();
        let page = self.page + 1;
        Some(self.issue(filters, page))
    }

    /// Retrocede uma página reutilizando termo e filtros da última busca.
    ///
    /// `None` na página 1.
    pub fn prev_page(&mut self) -> Option<SearchRequest> {
        if !self.can_go_prev() {
            return None;
        }
        let filters = self.applied_filters.clone();
        let page = self.page - 1;
        Some(self.issue(filters, page))
    }

    fn issue(&mut self, filters: SearchFilters, page: u32) -> SearchRequest {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest_seq = Some(seq);

        self.applied_filters = filters.clone();
        self.page = page;
        self.is_loading = true;
        self.has_searched = true;

        SearchRequest {
            seq,
            q: self.query.trim().to_string(),
            filters,
            page,
        }
    }

    fn is_current(&self, seq: u64) -> bool {
        self.latest_seq == Some(seq)
    }

    /// Recebe a resposta de uma requisição.
    ///
    /// Substitui a página de resultados por inteiro. Respostas cujo `seq`
    /// não é o da última requisição emitida são descartadas em silêncio;
    /// devolve `true` quando a resposta foi aplicada.
    pub fn on_response(&mut self, seq: u64, page: SearchPage) -> bool {
        if !self.is_current(seq) {
            log::debug!("Descartando resposta obsoleta (seq {})", seq);
            return false;
        }
        self.results = page.data;
        self.has_next_page = page.has_next_page;
        self.is_loading = false;
        true
    }

    /// Recebe a falha de uma requisição.
    ///
    /// Loga o erro e limpa o flag de carregamento; o conjunto de resultados
    /// anterior é mantido e `has_searched` continua verdadeiro. Falhas
    /// obsoletas são descartadas como as respostas; devolve `true` quando a
    /// falha era da requisição corrente.
    pub fn on_error(&mut self, seq: u64, err: &ApiError) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        log::error!("Erro na busca: {}", err);
        self.is_loading = false;
        true
    }
}
