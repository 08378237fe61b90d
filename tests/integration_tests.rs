//! # Testes de Integração
//!
//! Validam o fluxo completo do cliente contra o `MockApiClient`:
//! - Busca → Orquestrador: requisições, respostas e paginação
//! - Orquestrador → Exportação: resultados em tela viram CSV/planilha
//! - Detalhe: fluxo de empresa não encontrada
//! - Prospecção: pergunta → resposta tipada

use z_dados::api::{ApiClient, ApiError, MockApiClient};
use z_dados::export::{self, ExportFormat};
use z_dados::filters::{FilterField, SearchFilters};
use z_dados::pages::{DetailPage, DetailState, ProspectingPage, SearchState};
use z_dados::types::{Empresa, ProspectingAnswer, SearchPage};

fn empresa(i: usize, uf: &str) -> Empresa {
    Empresa {
        id: format!("id-{}", i),
        cnpj: format!("{:014}", 10_000_000_000_000u64 + i as u64),
        razao_social: format!("Padaria {} LTDA", i),
        nome_fantasia: Some(format!("Padaria {}", i)),
        uf: Some(uf.to_string()),
        municipio: Some("São Paulo".to_string()),
        status_ativa: true,
        ..Default::default()
    }
}

fn pagina(n: u32, registros: Vec<Empresa>, has_next: bool) -> SearchPage {
    SearchPage {
        data: registros,
        page: n,
        has_next_page: has_next,
    }
}

/// Executa uma requisição do orquestrador contra o mock e devolve o
/// resultado para o estado, como o worker da TUI faria.
async fn despacha(mock: &MockApiClient, state: &mut SearchState, req: z_dados::pages::SearchRequest) {
    match mock.search(&req.q, &req.filters, req.page).await {
        Ok(page) => {
            state.on_response(req.seq, page);
        }
        Err(err) => {
            state.on_error(req.seq, &err);
        }
    }
}

// ============================================================================
// TESTE 1: Busca com filtro → estado do orquestrador
// ============================================================================

#[tokio::test]
async fn test_busca_com_filtro_ate_o_estado_final() {
    let mock = MockApiClient::with_pages(vec![pagina(
        1,
        vec![empresa(1, "SP"), empresa(2, "SP")],
        false,
    )]);

    let mut state = SearchState::new();
    state.query = "padaria".into();

    let mut filters = SearchFilters::new();
    filters.set_field(FilterField::Uf, "SP");
    let req = state.apply_filters(filters);

    despacha(&mock, &mut state, req).await;

    // Estado final: {results: [r1, r2], page: 1}, próxima desabilitada
    assert_eq!(state.results().len(), 2);
    assert_eq!(state.page(), 1);
    assert!(!state.can_go_next());
    assert!(!state.can_go_prev());
    assert!(!state.is_loading());

    // O mock recebeu o termo, a página e o filtro serializável
    let calls = mock.search_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].q, "padaria");
    assert_eq!(calls[0].page, 1);
    assert_eq!(
        calls[0].filters.to_query_pairs(),
        vec![("uf", "SP".to_string())]
    );
}

// ============================================================================
// TESTE 2: Paginação para frente e para trás
// ============================================================================

#[tokio::test]
async fn test_paginacao_completa() {
    let mock = MockApiClient::with_pages(vec![
        pagina(1, (0..50).map(|i| empresa(i, "SP")).collect(), true),
        pagina(2, (50..60).map(|i| empresa(i, "SP")).collect(), false),
    ]);

    let mut state = SearchState::new();
    state.query = "padaria".into();

    let req = state.submit_search().unwrap();
    despacha(&mock, &mut state, req).await;
    assert_eq!(state.results().len(), 50);
    assert!(state.can_go_next());
    assert!(!state.can_go_prev());

    let req = state.next_page().unwrap();
    assert_eq!(req.page, 2);
    despacha(&mock, &mut state, req).await;
    assert_eq!(state.results().len(), 10);
    assert!(!state.can_go_next());
    assert!(state.can_go_prev());

    let req = state.prev_page().unwrap();
    assert_eq!(req.page, 1);
    despacha(&mock, &mut state, req).await;
    assert_eq!(state.results().len(), 50);
    assert!(!state.can_go_prev());
}

// ============================================================================
// TESTE 3: Resposta atrasada nunca sobrescreve a mais nova
// ============================================================================

#[tokio::test]
async fn test_resposta_atrasada_descartada() {
    let mock = MockApiClient::new();
    let mut state = SearchState::new();
    state.query = "padaria".into();

    let primeira = state.submit_search().unwrap();
    let segunda = state.submit_search().unwrap();

    // A segunda resolve primeiro; a primeira chega atrasada
    let _ = mock.search(&segunda.q, &segunda.filters, segunda.page).await;
    assert!(state.on_response(segunda.seq, pagina(1, vec![empresa(1, "SP")], false)));
    assert!(!state.on_response(primeira.seq, pagina(1, vec![], true)));

    assert_eq!(state.results().len(), 1);
    assert!(!state.can_go_next());
}

// ============================================================================
// TESTE 4: Falha de rede mantém resultados e marca a sessão como buscada
// ============================================================================

#[tokio::test]
async fn test_falha_de_rede_preserva_estado() {
    let ok = MockApiClient::with_pages(vec![pagina(1, vec![empresa(1, "RJ")], false)]);
    let falho = MockApiClient::failing();

    let mut state = SearchState::new();
    state.query = "mercado".into();

    let req = state.submit_search().unwrap();
    despacha(&ok, &mut state, req).await;
    assert_eq!(state.results().len(), 1);

    let req = state.submit_search().unwrap();
    despacha(&falho, &mut state, req).await;

    assert_eq!(state.results().len(), 1);
    assert!(state.has_searched());
    assert!(!state.is_loading());
}

// ============================================================================
// TESTE 5: Resultados em tela → exportação CSV e planilha
// ============================================================================

#[tokio::test]
async fn test_exportacao_dos_resultados_buscados() {
    let mock = MockApiClient::with_pages(vec![pagina(
        1,
        vec![empresa(1, "SP"), empresa(2, "MG")],
        false,
    )]);

    let mut state = SearchState::new();
    state.query = "padaria".into();
    let req = state.submit_search().unwrap();
    despacha(&mock, &mut state, req).await;

    let bytes = export::to_csv(state.results()).unwrap();
    assert_eq!(&bytes[0..3], &[0xEF, 0xBB, 0xBF]);

    let texto = String::from_utf8(bytes[3..].to_vec()).unwrap();
    let linhas: Vec<&str> = texto.trim_end().split("\r\n").collect();
    assert_eq!(linhas.len(), 3); // cabeçalho + 2 registros
    assert!(linhas[0].starts_with("CNPJ;Razão Social;"));
    assert!(linhas[1].contains("Padaria 1"));

    let dir = tempfile::tempdir().unwrap();
    let path = export::save_export(dir.path(), None, ExportFormat::Excel, state.results()).unwrap();
    assert!(path.to_string_lossy().ends_with(".xls"));
    let html = std::fs::read_to_string(&path).unwrap();
    assert!(html.contains("urn:schemas-microsoft-com:office:spreadsheet"));
}

// ============================================================================
// TESTE 6: Detalhe de empresa inexistente
// ============================================================================

#[tokio::test]
async fn test_detalhe_nao_encontrado() {
    let mock = MockApiClient::new();

    let mut page = DetailPage::new("00000000000000");
    match mock.get_empresa(&page.cnpj).await {
        Ok(detail) => page.on_response(detail),
        Err(err) => {
            assert!(matches!(err, ApiError::NotFound));
            page.on_error(&err);
        }
    }

    assert!(matches!(page.state, DetailState::NotFound));
}

// ============================================================================
// TESTE 7: Prospecção ponta a ponta com resposta tipada
// ============================================================================

#[tokio::test]
async fn test_prospeccao_fluxo_completo() {
    let mock = MockApiClient {
        prospecting: Some(ProspectingAnswer {
            pergunta: "padarias em SP".into(),
            resposta: "Encontrei 42 padarias ativas.".into(),
            fontes: vec!["hf://zdados/empresas".into()],
            ..Default::default()
        }),
        ..Default::default()
    };

    let mut page = ProspectingPage::new();
    page.pergunta = "padarias em SP".into();
    let req = page.submit().unwrap();

    match mock.ask_prospecting(&req.pergunta).await {
        Ok(answer) => page.on_answer(req.seq, answer),
        Err(err) => page.on_error(req.seq, err.to_string()),
    }

    match &page.state {
        z_dados::pages::ProspectingState::Answered(answer) => {
            assert_eq!(answer.resposta, "Encontrei 42 padarias ativas.");
            assert_eq!(answer.fontes.len(), 1);
        }
        other => panic!("estado inesperado: {:?}", other),
    }
}
