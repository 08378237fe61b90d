//! Renderização da interface TUI

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::filters::FilterField;
use crate::format::{format_capital, format_cep, format_cnpj, format_compact, format_data};
use crate::pages::{DashboardState, DetailState, ProspectingState};
use crate::types::Empresa;

use super::app::{App, AppScreen};

/// Renderiza a interface completa.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    match app.screen {
        AppScreen::Busca => render_busca(frame, app),
        AppScreen::Detalhe => render_detalhe(frame, app),
        AppScreen::Dashboard => render_dashboard(frame, app),
        AppScreen::Prospeccao => render_prospeccao(frame, app),
        AppScreen::Guia => render_guia(frame),
    }

    if app.screen == AppScreen::Busca && app.drawer.is_some() {
        render_drawer(frame, app);
    }
}

fn title_line() -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        Span::styled("Z ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled("Dados", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
        Span::styled(
            "  ·  dados públicos de empresas do Brasil",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center)
}

fn render_footer(frame: &mut Frame<'_>, app: &App, area: Rect, help: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    if let Some(status) = &app.status {
        let style = if status.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        frame.render_widget(
            Paragraph::new(status.message.as_str()).style(style),
            chunks[0],
        );
    }

    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// TELA DE BUSCA
// ═══════════════════════════════════════════════════════════════════════════════

fn render_busca(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // título
            Constraint::Length(3), // campo de busca
            Constraint::Min(5),    // resultados
            Constraint::Length(1), // paginação
            Constraint::Length(2), // status + ajuda
        ])
        .margin(1)
        .split(area);

    frame.render_widget(title_line(), chunks[0]);

    // Campo de busca com cursor
    let input_block = Block::default()
        .title(" Pesquisar ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let input_line = if app.search.query.is_empty() {
        Line::from(Span::styled(
            "Digite um CNPJ, Razão Social ou Nome Fantasia...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw(app.search.query.clone()),
            Span::styled("│", Style::default().fg(Color::Magenta)),
        ])
    };
    frame.render_widget(Paragraph::new(input_line).block(input_block), chunks[1]);

    // Resultados
    if app.search.is_loading() {
        frame.render_widget(
            Paragraph::new("Buscando...")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center),
            chunks[2],
        );
    } else if !app.search.has_searched() {
        frame.render_widget(
            Paragraph::new("Inteligência de mercado em milissegundos.\n\nEnter pesquisa · Ctrl+F abre os filtros avançados")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            chunks[2],
        );
    } else if app.search.results().is_empty() {
        frame.render_widget(
            Paragraph::new("Nenhum resultado encontrado.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            chunks[2],
        );
    } else {
        let items: Vec<ListItem<'_>> = app
            .search
            .results()
            .iter()
            .enumerate()
            .map(|(i, empresa)| result_card(empresa, i == app.selected_result))
            .collect();
        let list = List::new(items).block(
            Block::default()
                .title(" Resultados ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(list, chunks[2]);
    }

    // Paginação: controles escurecidos quando desabilitados
    let prev_style = if app.search.can_go_prev() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let next_style = if app.search.can_go_next() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    if app.search.has_searched() {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("← anterior", prev_style),
                Span::styled(
                    format!("   Página {}   ", app.search.page()),
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                ),
                Span::styled("próxima →", next_style),
            ]))
            .alignment(Alignment::Center),
            chunks[3],
        );
    }

    render_footer(
        frame,
        app,
        chunks[4],
        "Enter pesquisa · Ctrl+F filtros · ↑↓ seleciona · Ctrl+D detalhe · ←→ páginas · Ctrl+E CSV · Ctrl+X XLS · F3 dashboard · F4 IA · F1 guia · Ctrl+Q sai",
    );
}

fn result_card(empresa: &Empresa, selected: bool) -> ListItem<'static> {
    let marker = if selected { "▶ " } else { "  " };
    let name_style = if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let status_span = if empresa.status_ativa {
        Span::styled(" ATIVA", Style::default().fg(Color::Green))
    } else {
        Span::styled(" INATIVA", Style::default().fg(Color::Red))
    };

    let localidade = match (empresa.municipio.as_deref(), empresa.uf.as_deref()) {
        (Some(municipio), Some(uf)) => format!("{} - {}", municipio, uf),
        (Some(municipio), None) => municipio.to_string(),
        (None, Some(uf)) => uf.to_string(),
        (None, None) => String::new(),
    };

    ListItem::new(vec![
        Line::from(vec![
            Span::raw(marker.to_string()),
            Span::styled(empresa.display_name().to_string(), name_style),
            status_span,
        ]),
        Line::from(Span::styled(
            format!("  {}  {}", format_cnpj(&empresa.cnpj), localidade),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

// ═══════════════════════════════════════════════════════════════════════════════
// GAVETA DE FILTROS
// ═══════════════════════════════════════════════════════════════════════════════

fn render_drawer(frame: &mut Frame<'_>, app: &App) {
    let Some(drawer) = &app.drawer else { return };
    let area = frame.area();

    // Gaveta ancorada à direita da tela
    let width = (area.width * 2 / 5).clamp(30, 60);
    let drawer_area = Rect {
        x: area.width.saturating_sub(width),
        y: 1,
        width: width.min(area.width),
        height: area.height.saturating_sub(2),
    };

    frame.render_widget(Clear, drawer_area);

    let items: Vec<ListItem<'_>> = FilterField::ALL
        .iter()
        .zip(&drawer.values)
        .enumerate()
        .map(|(i, (field, value))| {
            let selected = i == drawer.selected;
            let label_style = if selected {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let cursor = if selected { "│" } else { "" };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", field.label()), label_style),
                Span::raw(value.clone()),
                Span::styled(cursor, Style::default().fg(Color::Magenta)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Filtros Avançados ")
            .title_bottom(" Enter aplica · Ctrl+L limpa · Esc fecha ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );
    frame.render_widget(list, drawer_area);
}

// ═══════════════════════════════════════════════════════════════════════════════
// TELA DE DETALHE
// ═══════════════════════════════════════════════════════════════════════════════

fn render_detalhe(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let Some(page) = &app.detail else {
        return;
    };

    match &page.state {
        DetailState::Loading => {
            frame.render_widget(
                Paragraph::new("Carregando empresa...")
                    .style(Style::default().fg(Color::Yellow))
                    .alignment(Alignment::Center),
                area,
            );
        }
        DetailState::NotFound => {
            frame.render_widget(
                Paragraph::new("Empresa não encontrada\n\nEsc volta para a busca")
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center),
                area,
            );
        }
        DetailState::Loaded { empresa, socios } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5), // cabeçalho
                    Constraint::Length(5), // registro
                    Constraint::Length(8), // contato + endereço
                    Constraint::Min(4),    // sócios
                    Constraint::Length(2), // status + ajuda
                ])
                .margin(1)
                .split(area);

            let situacao = if empresa.status_ativa {
                Span::styled("ATIVA", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            } else {
                Span::styled("BAIXADA", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            };
            let mut header_lines = vec![
                Line::from(Span::styled(
                    empresa.display_name().to_string(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(
                        format_cnpj(&empresa.cnpj),
                        Style::default().fg(Color::Magenta),
                    ),
                    Span::raw("  "),
                    situacao,
                ]),
            ];
            if empresa.nome_fantasia.is_some() {
                header_lines.push(Line::from(Span::styled(
                    empresa.razao_social.clone(),
                    Style::default().fg(Color::Gray),
                )));
            }
            frame.render_widget(
                Paragraph::new(header_lines)
                    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray))),
                chunks[0],
            );

            let registro = vec![
                info_line("Data de Abertura", empresa.data_abertura.as_deref().map(format_data)),
                info_line("Capital Social", empresa.capital_social.map(format_capital)),
                info_line("CNAE Principal", empresa.cnae_principal.clone()),
            ];
            frame.render_widget(
                Paragraph::new(registro).block(
                    Block::default()
                        .title(" Registro ")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                ),
                chunks[1],
            );

            let mut contato = vec![
                info_line("Telefone", empresa.telefone_real.clone()),
                info_line("E-mail", empresa.email_real.clone()),
                info_line("Site", empresa.site.clone()),
                info_line("Instagram", empresa.instagram.clone()),
                info_line("CEP", empresa.cep.as_deref().map(format_cep)),
            ];
            if let Some(link) = empresa.whatsapp_link() {
                contato.push(info_line("WhatsApp", Some(link)));
            }
            let titulo_contato = if empresa.is_enriched() {
                " Contato · IA Enriched "
            } else {
                " Contato "
            };
            frame.render_widget(
                Paragraph::new(contato).block(
                    Block::default()
                        .title(titulo_contato)
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                ),
                chunks[2],
            );

            let socios_items: Vec<ListItem<'_>> = if socios.is_empty() {
                vec![ListItem::new(Span::styled(
                    "Nenhum sócio registrado nesta empresa.",
                    Style::default().fg(Color::DarkGray),
                ))]
            } else {
                socios
                    .iter()
                    .map(|socio| {
                        ListItem::new(Line::from(vec![
                            Span::styled(
                                socio.nome_socio.clone(),
                                Style::default().fg(Color::White),
                            ),
                            Span::styled(
                                format!("  {}", socio.qualificacao.as_deref().unwrap_or("SÓCIO")),
                                Style::default().fg(Color::DarkGray),
                            ),
                        ]))
                    })
                    .collect()
            };
            frame.render_widget(
                List::new(socios_items).block(
                    Block::default()
                        .title(" Quadro Societário ")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                ),
                chunks[3],
            );

            render_footer(
                frame,
                app,
                chunks[4],
                "Esc volta · Ctrl+E exporta CSV · Ctrl+P salva dossiê · Ctrl+Q sai",
            );
        }
    }
}

fn info_line(label: &str, value: Option<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<18}", label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            value.unwrap_or_else(|| "Não informado".into()),
            Style::default().fg(Color::White),
        ),
    ])
}

// ═══════════════════════════════════════════════════════════════════════════════
// TELA DE DASHBOARD
// ═══════════════════════════════════════════════════════════════════════════════

fn render_dashboard(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    match &app.dashboard.state {
        DashboardState::Loading => {
            frame.render_widget(
                Paragraph::new("Carregando estatísticas...")
                    .style(Style::default().fg(Color::Yellow))
                    .alignment(Alignment::Center),
                area,
            );
        }
        DashboardState::Failed => {
            frame.render_widget(
                Paragraph::new("Não foi possível carregar os dados.")
                    .style(Style::default().fg(Color::Red))
                    .alignment(Alignment::Center),
                area,
            );
        }
        DashboardState::Loaded {
            stats,
            total,
            ativas,
            inativas,
            media_capital,
        } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(2), // título
                    Constraint::Length(5), // cards
                    Constraint::Min(6),    // rankings
                    Constraint::Length(2), // status + ajuda
                ])
                .margin(1)
                .split(area);

            frame.render_widget(title_line(), chunks[0]);

            let cards = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(25),
                    Constraint::Percentage(25),
                    Constraint::Percentage(25),
                    Constraint::Percentage(25),
                ])
                .split(chunks[1]);

            stat_card(frame, cards[0], "Total", format_compact(total.value()), Color::Magenta);
            stat_card(frame, cards[1], "Ativas", format_compact(ativas.value()), Color::Green);
            stat_card(frame, cards[2], "Inativas", format_compact(inativas.value()), Color::Red);
            stat_card(
                frame,
                cards[3],
                "Capital Médio",
                format!("R$ {}", format_compact(media_capital.value())),
                Color::Yellow,
            );

            let rankings = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(chunks[2]);

            ranking(
                frame,
                rankings[0],
                " Top Estados (UF) ",
                stats.top_ufs.iter().map(|e| (e.uf.clone(), e.count)).collect(),
                Color::Cyan,
            );
            ranking(
                frame,
                rankings[1],
                " Top Atividades (CNAE) ",
                stats.top_cnaes.iter().map(|e| (e.cnae.clone(), e.count)).collect(),
                Color::Magenta,
            );

            render_footer(frame, app, chunks[3], "F2 busca · F4 IA · F1 guia · Ctrl+Q sai");
        }
    }
}

fn stat_card(frame: &mut Frame<'_>, area: Rect, titulo: &str, valor: String, cor: Color) {
    let card = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            valor,
            Style::default().fg(cor).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(format!(" {} ", titulo))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(card, area);
}

fn ranking(frame: &mut Frame<'_>, area: Rect, titulo: &str, entradas: Vec<(String, u64)>, cor: Color) {
    let block = Block::default()
        .title(titulo)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if entradas.is_empty() {
        frame.render_widget(
            Paragraph::new("Nenhum dado disponível.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    // Barras escalam contra o primeiro (maior) item do ranking
    let max = entradas[0].1.max(1);
    let linhas: Vec<Constraint> = entradas.iter().map(|_| Constraint::Length(1)).collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(linhas)
        .split(inner);

    for (row, (label, count)) in rows.iter().zip(&entradas) {
        let ratio = (*count as f64 / max as f64).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(cor))
            .ratio(ratio)
            .label(format!("{} · {}", label, format_compact(*count as f64)));
        frame.render_widget(gauge, *row);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TELA DE PROSPECÇÃO POR IA
// ═══════════════════════════════════════════════════════════════════════════════

fn render_prospeccao(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // título
            Constraint::Length(3), // pergunta
            Constraint::Min(5),    // resposta
            Constraint::Length(2), // status + ajuda
        ])
        .margin(1)
        .split(area);

    frame.render_widget(title_line(), chunks[0]);

    let input_block = Block::default()
        .title(" Pergunta de prospecção ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let input_line = if app.prospecting.pergunta.is_empty() {
        Line::from(Span::styled(
            "Ex: padarias ativas em São Paulo com capital acima de 100 mil",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::raw(app.prospecting.pergunta.clone()),
            Span::styled("│", Style::default().fg(Color::Magenta)),
        ])
    };
    frame.render_widget(Paragraph::new(input_line).block(input_block), chunks[1]);

    let corpo: Paragraph<'_> = match &app.prospecting.state {
        ProspectingState::Idle => Paragraph::new("Faça uma pergunta em linguagem natural sobre a base.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        ProspectingState::Loading => Paragraph::new("Consultando a IA...")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center),
        ProspectingState::Failed(message) => Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center),
        ProspectingState::Answered(answer) => {
            let mut lines = vec![Line::from(Span::styled(
                answer.resposta.clone(),
                Style::default().fg(Color::White),
            ))];
            if !answer.fontes.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Fontes:",
                    Style::default().fg(Color::DarkGray),
                )));
                for fonte in &answer.fontes {
                    lines.push(Line::from(Span::styled(
                        format!("  - {}", fonte),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
            if !answer.resultados.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("{} registro(s) fundamentam a resposta.", answer.resultados.len()),
                    Style::default().fg(Color::Cyan),
                )));
            }
            Paragraph::new(lines).wrap(Wrap { trim: false })
        }
    };
    frame.render_widget(
        corpo.block(
            Block::default()
                .title(" Resposta ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        chunks[2],
    );

    render_footer(frame, app, chunks[3], "Enter pergunta · F2 busca · Ctrl+Q sai");
}

// ═══════════════════════════════════════════════════════════════════════════════
// TELA DE GUIA
// ═══════════════════════════════════════════════════════════════════════════════

fn render_guia(frame: &mut Frame<'_>) {
    let area = frame.area();
    let texto = vec![
        Line::from(Span::styled(
            "Guia de uso",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Busca (F2): digite um CNPJ, razão social ou nome fantasia e pressione"),
        Line::from("Enter. A busca simples sempre parte de um conjunto de filtros vazio."),
        Line::from(""),
        Line::from("Filtros avançados (Ctrl+F): preencha os campos desejados e aplique com"),
        Line::from("Enter. O conjunto é substituído por inteiro a cada aplicação; Ctrl+L"),
        Line::from("limpa tudo."),
        Line::from(""),
        Line::from("Paginação: ← e → navegam entre páginas. A seta fica apagada quando não"),
        Line::from("há página naquela direção."),
        Line::from(""),
        Line::from("Detalhe (Ctrl+D): abre a empresa selecionada com quadro societário,"),
        Line::from("contato enriquecido e link de WhatsApp quando houver telefone."),
        Line::from(""),
        Line::from("Exportação: Ctrl+E gera CSV (separado por ';', compatível com Excel) e"),
        Line::from("Ctrl+X gera planilha .xls com os resultados da página atual."),
        Line::from(""),
        Line::from("Dashboard (F3): estatísticas agregadas da base. Prospecção (F4):"),
        Line::from("perguntas em linguagem natural respondidas pela IA do Z Dados."),
    ];
    frame.render_widget(
        Paragraph::new(texto)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title(" Guia ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        area,
    );
}
