//! Runner que conecta a TUI ao cliente da API

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::api::ApiClient;
use crate::export::{self, DossierDepth, ExportFormat};
use crate::pages::dashboard::counter_tick_interval;
use crate::pages::DetailState;

use super::app::{ApiRequest, App, AppEvent, AppScreen, FilterDrawer};
use super::ui;

/// Cria o canal de eventos do worker para a TUI.
pub fn create_event_channel() -> (Sender<AppEvent>, Receiver<AppEvent>) {
    mpsc::channel()
}

/// Worker assíncrono: consome requisições e devolve eventos tipados.
///
/// Cada requisição roda em sua própria task; não há cancelamento — respostas
/// atrasadas são descartadas pelos controladores via número de sequência.
pub async fn api_worker(
    client: Arc<dyn ApiClient>,
    mut requests: UnboundedReceiver<ApiRequest>,
    events: Sender<AppEvent>,
) {
    while let Some(request) = requests.recv().await {
        let client = Arc::clone(&client);
        let events = events.clone();
        tokio::spawn(async move {
            let event = match request {
                ApiRequest::Search(req) => {
                    match client.search(&req.q, &req.filters, req.page).await {
                        Ok(page) => AppEvent::SearchLoaded { seq: req.seq, page },
                        Err(error) => AppEvent::SearchFailed { seq: req.seq, error },
                    }
                }
                ApiRequest::Detail { cnpj } => match client.get_empresa(&cnpj).await {
                    Ok(detail) => AppEvent::DetailLoaded(detail),
                    Err(error) => AppEvent::DetailFailed(error),
                },
                ApiRequest::Stats => match client.get_stats().await {
                    Ok(stats) => AppEvent::StatsLoaded(stats),
                    Err(error) => AppEvent::StatsFailed(error),
                },
                ApiRequest::Prospecting(req) => {
                    match client.ask_prospecting(&req.pergunta).await {
                        Ok(answer) => AppEvent::ProspectingLoaded { seq: req.seq, answer },
                        Err(error) => AppEvent::ProspectingFailed {
                            seq: req.seq,
                            message: error.to_string(),
                        },
                    }
                }
            };
            let _ = events.send(event);
        });
    }
}

/// Executa a TUI até o usuário sair.
///
/// Bloqueia a thread corrente; as chamadas de rede acontecem no
/// [`api_worker`] espelhando eventos de volta pelo canal.
pub fn run_tui(
    requests: UnboundedSender<ApiRequest>,
    events: Receiver<AppEvent>,
) -> io::Result<App> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run_app(&mut terminal, &mut app, &requests, &events);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result?;
    Ok(app)
}

/// Loop principal da TUI.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    requests: &UnboundedSender<ApiRequest>,
    events: &Receiver<AppEvent>,
) -> io::Result<()> {
    let tick_interval = counter_tick_interval();
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Eventos do worker (não bloqueante)
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        // Animação dos contadores do dashboard
        if last_tick.elapsed() >= tick_interval {
            app.dashboard.tick();
            last_tick = Instant::now();
        }

        // Input do usuário (com timeout para manter a renderização viva)
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(request) = handle_key(app, key.code, key.modifiers) {
                        let _ = requests.send(request);
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Trata uma tecla; devolve a requisição a despachar, se houver.
fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Option<ApiRequest> {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    // Atalhos globais
    if ctrl && matches!(code, KeyCode::Char('q') | KeyCode::Char('c')) {
        app.should_quit = true;
        return None;
    }
    match code {
        KeyCode::F(1) => {
            app.drawer = None;
            app.screen = AppScreen::Guia;
            return None;
        }
        KeyCode::F(2) => {
            app.drawer = None;
            app.screen = AppScreen::Busca;
            return None;
        }
        KeyCode::F(3) => {
            app.drawer = None;
            return Some(app.open_dashboard());
        }
        KeyCode::F(4) => {
            app.drawer = None;
            app.screen = AppScreen::Prospeccao;
            return None;
        }
        _ => {}
    }

    match app.screen {
        AppScreen::Busca => handle_key_busca(app, code, ctrl),
        AppScreen::Detalhe => handle_key_detalhe(app, code, ctrl),
        AppScreen::Prospeccao => handle_key_prospeccao(app, code),
        AppScreen::Dashboard | AppScreen::Guia => {
            if code == KeyCode::Esc {
                app.screen = AppScreen::Busca;
            }
            None
        }
    }
}

fn handle_key_busca(app: &mut App, code: KeyCode, ctrl: bool) -> Option<ApiRequest> {
    // Gaveta aberta captura o teclado
    if app.drawer.is_some() {
        return handle_key_drawer(app, code, ctrl);
    }

    if ctrl {
        return match code {
            KeyCode::Char('f') => {
                // Filtros recomeçam do zero a cada sessão da gaveta
                app.drawer = Some(FilterDrawer::new());
                None
            }
            KeyCode::Char('d') => app.open_selected_detail(),
            KeyCode::Char('e') => {
                export_results(app, ExportFormat::Csv);
                None
            }
            KeyCode::Char('x') => {
                export_results(app, ExportFormat::Excel);
                None
            }
            _ => None,
        };
    }

    match code {
        KeyCode::Char(c) => {
            app.search.query.push(c);
            None
        }
        KeyCode::Backspace => {
            app.search.query.pop();
            None
        }
        KeyCode::Enter => app.submit_search(),
        KeyCode::Left => app.prev_page(),
        KeyCode::Right => app.next_page(),
        KeyCode::Up => {
            app.select_prev_result();
            None
        }
        KeyCode::Down => {
            app.select_next_result();
            None
        }
        KeyCode::Esc => {
            app.should_quit = true;
            None
        }
        _ => None,
    }
}

fn handle_key_drawer(app: &mut App, code: KeyCode, ctrl: bool) -> Option<ApiRequest> {
    if ctrl && code == KeyCode::Char('l') {
        return app.clear_drawer_filters();
    }

    match code {
        KeyCode::Esc => {
            app.drawer = None;
            None
        }
        KeyCode::Enter => app.apply_drawer_filters(),
        _ => {
            if let Some(drawer) = app.drawer.as_mut() {
                match code {
                    KeyCode::Up => drawer.select_prev(),
                    KeyCode::Down | KeyCode::Tab => drawer.select_next(),
                    KeyCode::Char(c) => drawer.type_char(c),
                    KeyCode::Backspace => drawer.backspace(),
                    _ => {}
                }
            }
            None
        }
    }
}

fn handle_key_detalhe(app: &mut App, code: KeyCode, ctrl: bool) -> Option<ApiRequest> {
    if ctrl {
        match code {
            KeyCode::Char('e') => export_detail(app),
            KeyCode::Char('p') => save_dossier(app),
            _ => {}
        }
        return None;
    }
    if code == KeyCode::Esc {
        app.close_detail();
    }
    None
}

fn handle_key_prospeccao(app: &mut App, code: KeyCode) -> Option<ApiRequest> {
    match code {
        KeyCode::Char(c) => {
            app.prospecting.pergunta.push(c);
            None
        }
        KeyCode::Backspace => {
            app.prospecting.pergunta.pop();
            None
        }
        KeyCode::Enter => app.submit_prospecting(),
        KeyCode::Esc => {
            app.screen = AppScreen::Busca;
            None
        }
        _ => None,
    }
}

/// Exporta a página de resultados corrente para o diretório atual.
fn export_results(app: &mut App, format: ExportFormat) {
    if app.search.results().is_empty() {
        app.set_status("Nada para exportar.", true);
        return;
    }
    match export::save_export(
        std::path::Path::new("."),
        None,
        format,
        app.search.results(),
    ) {
        Ok(path) => app.set_status(format!("Exportado para {}", path.display()), false),
        Err(err) => app.set_status(err.to_string(), true),
    }
}

/// Exporta a empresa aberta no detalhe como CSV de um registro.
fn export_detail(app: &mut App) {
    let Some(page) = &app.detail else { return };
    let Some(empresa) = page.empresa().cloned() else {
        return;
    };
    let base = format!("empresa-{}", empresa.cnpj);
    match export::save_export(
        std::path::Path::new("."),
        Some(&base),
        ExportFormat::Csv,
        &[empresa],
    ) {
        Ok(path) => app.set_status(format!("Exportado para {}", path.display()), false),
        Err(err) => app.set_status(err.to_string(), true),
    }
}

/// Salva o dossiê completo da empresa aberta como texto.
fn save_dossier(app: &mut App) {
    let Some(page) = &app.detail else { return };
    let DetailState::Loaded { empresa, socios } = &page.state else {
        return;
    };
    let texto = export::dossier(empresa, socios, DossierDepth::Completo);
    let path = std::path::PathBuf::from(format!("empresa-{}.txt", empresa.cnpj));
    match std::fs::write(&path, texto) {
        Ok(()) => app.set_status(format!("Dossiê salvo em {}", path.display()), false),
        Err(err) => app.set_status(err.to_string(), true),
    }
}
