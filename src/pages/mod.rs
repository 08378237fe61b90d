// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CONTROLADORES DE PÁGINA
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Cada página tem seu estado em uma struct própria, transicionada apenas por
// métodos nomeados. Nenhum controlador faz I/O: eles emitem requisições e
// consomem respostas tipadas, o que os deixa testáveis sem rede.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Orquestrador da busca (termo livre, filtros, paginação).
pub mod search;

/// Visão de detalhe de uma empresa.
pub mod detail;

/// Dashboard de estatísticas com contadores animados.
pub mod dashboard;

/// Prospecção por IA (pergunta em linguagem natural).
pub mod prospecting;

pub use dashboard::{AnimatedCounter, DashboardPage, DashboardState};
pub use detail::{DetailPage, DetailState};
pub use prospecting::{ProspectingPage, ProspectingRequest, ProspectingState};
pub use search::{SearchRequest, SearchState};
