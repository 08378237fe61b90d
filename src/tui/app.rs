//! Estado da aplicação TUI

use crate::api::ApiError;
use crate::filters::{FilterField, SearchFilters};
use crate::pages::{DashboardPage, DetailPage, ProspectingPage, ProspectingRequest, SearchRequest, SearchState};
use crate::types::{DashboardStats, EmpresaDetail, ProspectingAnswer, SearchPage};

/// Tela ativa da aplicação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    /// Busca (tela inicial)
    Busca,
    /// Detalhe de uma empresa
    Detalhe,
    /// Dashboard de estatísticas
    Dashboard,
    /// Prospecção por IA
    Prospeccao,
    /// Guia de uso
    Guia,
}

/// Requisições despachadas para o worker de API.
#[derive(Debug)]
pub enum ApiRequest {
    /// Busca paginada
    Search(SearchRequest),
    /// Detalhe de empresa
    Detail {
        /// CNPJ cru consultado
        cnpj: String,
    },
    /// Estatísticas do dashboard
    Stats,
    /// Pergunta de prospecção
    Prospecting(ProspectingRequest),
}

/// Eventos devolvidos pelo worker de API para a TUI.
#[derive(Debug)]
pub enum AppEvent {
    /// Página de busca carregada
    SearchLoaded {
        /// Sequência da requisição
        seq: u64,
        /// Página recebida
        page: SearchPage,
    },
    /// Busca falhou
    SearchFailed {
        /// Sequência da requisição
        seq: u64,
        /// Erro ocorrido
        error: ApiError,
    },
    /// Detalhe carregado
    DetailLoaded(EmpresaDetail),
    /// Detalhe falhou
    DetailFailed(ApiError),
    /// Estatísticas carregadas
    StatsLoaded(DashboardStats),
    /// Estatísticas falharam
    StatsFailed(ApiError),
    /// Resposta de prospecção
    ProspectingLoaded {
        /// Sequência da requisição
        seq: u64,
        /// Resposta recebida
        answer: ProspectingAnswer,
    },
    /// Prospecção falhou
    ProspectingFailed {
        /// Sequência da requisição
        seq: u64,
        /// Mensagem de erro exibível
        message: String,
    },
}

/// Linha de status exibida no rodapé.
#[derive(Debug, Clone)]
pub struct StatusLine {
    /// Texto da mensagem
    pub message: String,
    /// Se deve ser estilizada como erro
    pub is_error: bool,
}

/// Gaveta de filtros avançados.
///
/// Um valor textual por campo de [`FilterField::ALL`]; o objeto
/// [`SearchFilters`] é reconstruído do zero a cada "aplicar".
#[derive(Debug)]
pub struct FilterDrawer {
    /// Texto cru de cada campo, na ordem de `FilterField::ALL`
    pub values: Vec<String>,
    /// Índice do campo selecionado
    pub selected: usize,
}

impl Default for FilterDrawer {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterDrawer {
    /// Gaveta vazia, primeiro campo selecionado.
    pub fn new() -> Self {
        Self {
            values: vec![String::new(); FilterField::ALL.len()],
            selected: 0,
        }
    }

    /// Campo atualmente selecionado.
    pub fn current_field(&self) -> FilterField {
        FilterField::ALL[self.selected]
    }

    /// Move a seleção para o próximo campo.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % FilterField::ALL.len();
    }

    /// Move a seleção para o campo anterior.
    pub fn select_prev(&mut self) {
        self.selected = (self.selected + FilterField::ALL.len() - 1) % FilterField::ALL.len();
    }

    /// Digita um caractere no campo selecionado.
    pub fn type_char(&mut self, c: char) {
        self.values[self.selected].push(c);
    }

    /// Apaga o último caractere do campo selecionado.
    pub fn backspace(&mut self) {
        self.values[self.selected].pop();
    }

    /// Limpa todos os campos.
    pub fn clear(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
    }

    /// Constrói o objeto de filtros a partir dos textos digitados.
    pub fn build_filters(&self) -> SearchFilters {
        let mut filters = SearchFilters::new();
        for (field, raw) in FilterField::ALL.iter().zip(&self.values) {
            filters.set_field(*field, raw);
        }
        filters
    }
}

/// Estado completo da aplicação TUI.
pub struct App {
    /// Tela ativa
    pub screen: AppScreen,
    /// Estado da busca
    pub search: SearchState,
    /// Índice do resultado selecionado na lista
    pub selected_result: usize,
    /// Página de detalhe aberta (se houver)
    pub detail: Option<DetailPage>,
    /// Página do dashboard
    pub dashboard: DashboardPage,
    /// Página de prospecção
    pub prospecting: ProspectingPage,
    /// Gaveta de filtros (aberta quando `Some`)
    pub drawer: Option<FilterDrawer>,
    /// Linha de status do rodapé
    pub status: Option<StatusLine>,
    /// Se o usuário pediu para sair
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Aplicação pristina na tela de busca.
    pub fn new() -> Self {
        Self {
            screen: AppScreen::Busca,
            search: SearchState::new(),
            selected_result: 0,
            detail: None,
            dashboard: DashboardPage::new(),
            prospecting: ProspectingPage::new(),
            drawer: None,
            status: None,
            should_quit: false,
        }
    }

    /// Define a mensagem de status do rodapé.
    pub fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.status = Some(StatusLine {
            message: message.into(),
            is_error,
        });
    }

    /// Processa um evento vindo do worker de API.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SearchLoaded { seq, page } => {
                if self.search.on_response(seq, page) {
                    self.selected_result = 0;
                }
            }
            AppEvent::SearchFailed { seq, error } => {
                let message = error.to_string();
                if self.search.on_error(seq, &error) {
                    self.set_status(message, true);
                }
            }
            AppEvent::DetailLoaded(detail) => {
                if let Some(page) = &mut self.detail {
                    page.on_response(detail);
                }
            }
            AppEvent::DetailFailed(error) => {
                if let Some(page) = &mut self.detail {
                    page.on_error(&error);
                }
            }
            AppEvent::StatsLoaded(stats) => self.dashboard.on_response(stats),
            AppEvent::StatsFailed(error) => self.dashboard.on_error(&error),
            AppEvent::ProspectingLoaded { seq, answer } => {
                self.prospecting.on_answer(seq, answer);
            }
            AppEvent::ProspectingFailed { seq, message } => {
                self.prospecting.on_error(seq, message);
            }
        }
    }

    /// Submete o termo livre da busca.
    pub fn submit_search(&mut self) -> Option<ApiRequest> {
        self.status = None;
        self.search.submit_search().map(ApiRequest::Search)
    }

    /// Aplica os filtros da gaveta e a fecha imediatamente,
    /// independentemente do resultado da requisição.
    pub fn apply_drawer_filters(&mut self) -> Option<ApiRequest> {
        let drawer = self.drawer.take()?;
        self.status = None;
        Some(ApiRequest::Search(
            self.search.apply_filters(drawer.build_filters()),
        ))
    }

    /// Limpa os filtros (gaveta + busca com conjunto vazio) e fecha a gaveta.
    pub fn clear_drawer_filters(&mut self) -> Option<ApiRequest> {
        self.drawer.take()?;
        self.status = None;
        Some(ApiRequest::Search(self.search.clear_filters()))
    }

    /// Avança uma página.
    pub fn next_page(&mut self) -> Option<ApiRequest> {
        self.search.next_page().map(ApiRequest::Search)
    }

    /// Retrocede uma página.
    pub fn prev_page(&mut self) -> Option<ApiRequest> {
        self.search.prev_page().map(ApiRequest::Search)
    }

    /// Move a seleção de resultado para baixo.
    pub fn select_next_result(&mut self) {
        let len = self.search.results().len();
        if len > 0 && self.selected_result + 1 < len {
            self.selected_result += 1;
        }
    }

    /// Move a seleção de resultado para cima.
    pub fn select_prev_result(&mut self) {
        self.selected_result = self.selected_result.saturating_sub(1);
    }

    /// Abre o detalhe do resultado selecionado.
    pub fn open_selected_detail(&mut self) -> Option<ApiRequest> {
        let empresa = self.search.results().get(self.selected_result)?;
        let cnpj = empresa.cnpj.clone();
        self.detail = Some(DetailPage::new(cnpj.clone()));
        self.screen = AppScreen::Detalhe;
        Some(ApiRequest::Detail { cnpj })
    }

    /// Volta do detalhe para a busca.
    pub fn close_detail(&mut self) {
        self.detail = None;
        self.screen = AppScreen::Busca;
    }

    /// Entra no dashboard, disparando uma nova busca de estatísticas.
    ///
    /// Cada entrada na tela refaz a busca; o snapshot não é cacheado.
    pub fn open_dashboard(&mut self) -> ApiRequest {
        self.dashboard = DashboardPage::new();
        self.screen = AppScreen::Dashboard;
        ApiRequest::Stats
    }

    /// Submete a pergunta de prospecção digitada.
    pub fn submit_prospecting(&mut self) -> Option<ApiRequest> {
        self.prospecting.submit().map(ApiRequest::Prospecting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Empresa;

    fn pagina(quantos: usize, has_next: bool) -> SearchPage {
        SearchPage {
            data: (0..quantos)
                .map(|i| Empresa {
                    cnpj: format!("{:014}", i),
                    razao_social: format!("Empresa {}", i),
                    status_ativa: true,
                    ..Default::default()
                })
                .collect(),
            page: 1,
            has_next_page: has_next,
        }
    }

    #[test]
    fn test_drawer_constroi_filtros() {
        let mut drawer = FilterDrawer::new();
        assert_eq!(drawer.current_field(), FilterField::RazaoSocial);

        for c in "Padaria".chars() {
            drawer.type_char(c);
        }
        drawer.select_next();
        drawer.select_prev();
        assert_eq!(drawer.current_field(), FilterField::RazaoSocial);

        let filters = drawer.build_filters();
        assert_eq!(filters.razao_social.as_deref(), Some("Padaria"));

        drawer.clear();
        assert!(drawer.build_filters().is_empty());
    }

    #[test]
    fn test_aplicar_filtros_fecha_gaveta() {
        let mut app = App::new();
        app.drawer = Some(FilterDrawer::new());

        let req = app.apply_drawer_filters();
        assert!(req.is_some());
        assert!(app.drawer.is_none());

        // sem gaveta aberta, aplicar é no-op
        assert!(app.apply_drawer_filters().is_none());
    }

    #[test]
    fn test_selecao_acompanha_resultados() {
        let mut app = App::new();
        app.search.query = "padaria".into();
        let req = match app.submit_search() {
            Some(ApiRequest::Search(r)) => r,
            other => panic!("requisição inesperada: {:?}", other),
        };

        app.handle_event(AppEvent::SearchLoaded {
            seq: req.seq,
            page: pagina(2, false),
        });

        app.select_next_result();
        assert_eq!(app.selected_result, 1);
        app.select_next_result();
        assert_eq!(app.selected_result, 1);
        app.select_prev_result();
        assert_eq!(app.selected_result, 0);
    }

    #[test]
    fn test_abrir_detalhe_do_selecionado() {
        let mut app = App::new();
        app.search.query = "padaria".into();
        let req = match app.submit_search() {
            Some(ApiRequest::Search(r)) => r,
            other => panic!("requisição inesperada: {:?}", other),
        };
        app.handle_event(AppEvent::SearchLoaded {
            seq: req.seq,
            page: pagina(1, false),
        });

        let detail_req = app.open_selected_detail();
        assert!(matches!(detail_req, Some(ApiRequest::Detail { .. })));
        assert_eq!(app.screen, AppScreen::Detalhe);

        app.close_detail();
        assert_eq!(app.screen, AppScreen::Busca);
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_falha_de_busca_vira_status() {
        let mut app = App::new();
        app.search.query = "padaria".into();
        let req = match app.submit_search() {
            Some(ApiRequest::Search(r)) => r,
            other => panic!("requisição inesperada: {:?}", other),
        };

        app.handle_event(AppEvent::SearchFailed {
            seq: req.seq,
            error: ApiError::Http(500),
        });

        let status = app.status.as_ref().unwrap();
        assert!(status.is_error);
        assert_eq!(status.message, "Erro na API (500)");
        assert!(app.search.has_searched());
    }
}
