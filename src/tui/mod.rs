//! Interface de terminal (TUI).
//!
//! Telas de busca, detalhe, dashboard, prospecção e guia sobre ratatui.
//! O loop de renderização é síncrono; as chamadas à API rodam em tasks
//! Tokio que devolvem eventos tipados por um canal mpsc.

/// Estado da aplicação TUI e eventos.
pub mod app;

/// Renderização das telas.
pub mod ui;

/// Loop principal, teclado e worker de requisições.
pub mod runner;

pub use app::{ApiRequest, App, AppEvent, AppScreen, FilterDrawer, StatusLine};
pub use runner::{api_worker, create_event_channel, run_tui};
