// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CONFIGURAÇÃO DO RUNTIME E DA API
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Configurações para o runtime Tokio e para o endereço do backend.
// Todas as configurações podem ser definidas via .env
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::path::PathBuf;

use crate::api::DEFAULT_PAGE_SIZE;

/// URL base padrão do backend em desenvolvimento local.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Configuração de acesso ao backend Z Dados.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// URL base dos endpoints de busca/detalhe/estatísticas.
    pub base_url: String,
    /// URL base do gateway de prospecção por IA.
    /// Por padrão é a mesma `base_url`.
    pub ia_base_url: String,
    /// Tamanho de página transmitido em `limit`.
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            ia_base_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Carrega a configuração da API a partir das variáveis de ambiente.
///
/// - `ZDADOS_API_URL`: URL base do backend (padrão: localhost:8000)
/// - `ZDADOS_IA_URL`: URL base do gateway de IA (padrão: mesma do backend)
/// - `ZDADOS_PAGE_SIZE`: tamanho de página (padrão: 50)
pub fn load_api_config() -> ApiConfig {
    let mut config = ApiConfig::default();

    if let Ok(url) = std::env::var("ZDADOS_API_URL") {
        if !url.trim().is_empty() {
            config.base_url = url.trim().trim_end_matches('/').to_string();
            config.ia_base_url = config.base_url.clone();
        }
    }

    if let Ok(url) = std::env::var("ZDADOS_IA_URL") {
        if !url.trim().is_empty() {
            config.ia_base_url = url.trim().trim_end_matches('/').to_string();
        }
    }

    if let Ok(size_str) = std::env::var("ZDADOS_PAGE_SIZE") {
        if let Ok(size) = size_str.parse::<u32>() {
            if size > 0 {
                config.page_size = size;
            }
        }
    }

    log::info!("🔌 Backend: {}", config.base_url);
    if config.ia_base_url != config.base_url {
        log::info!("🔌 Gateway IA: {}", config.ia_base_url);
    }

    config
}

/// Configuração do runtime Tokio.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Número de worker threads do Tokio.
    /// Se None, usa cálculo dinâmico: min(cpu_cores, max_threads).
    pub worker_threads: Option<usize>,

    /// Limite superior para o cálculo dinâmico de threads.
    pub max_threads: usize,

    /// Nome das threads do runtime.
    pub thread_name: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            worker_threads: None, // Dinâmico
            max_threads: 16,
            thread_name: "z-dados".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Calcula o número efetivo de worker threads.
    ///
    /// Se `worker_threads` está definido, usa esse valor.
    /// Senão, calcula: min(cpu_cores, max_threads)
    pub fn effective_worker_threads(&self) -> usize {
        if let Some(threads) = self.worker_threads {
            threads
        } else {
            std::cmp::min(num_cpus::get(), self.max_threads)
        }
    }
}

/// Carrega a configuração do runtime a partir das variáveis de ambiente.
///
/// - `TOKIO_THREADS`: número fixo de threads
/// - `TOKIO_MAX_THREADS`: limite superior do cálculo dinâmico
pub fn load_runtime_config() -> RuntimeConfig {
    let mut config = RuntimeConfig::default();

    if let Ok(threads_str) = std::env::var("TOKIO_THREADS") {
        if let Ok(threads) = threads_str.parse::<usize>() {
            if threads > 0 {
                config.worker_threads = Some(threads);
                log::info!("📦 TOKIO_THREADS={} (fixo)", threads);
            }
        }
    }

    if let Ok(max_str) = std::env::var("TOKIO_MAX_THREADS") {
        if let Ok(max) = max_str.parse::<usize>() {
            if max > 0 {
                config.max_threads = max;
            }
        }
    }

    config
}

/// Cria o runtime Tokio com a configuração dada.
///
/// Deve ser chamada no início do programa, antes de qualquer código async.
pub fn create_tokio_runtime(config: &RuntimeConfig) -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.effective_worker_threads())
        .thread_name(&config.thread_name)
        .enable_all()
        .build()
}

/// Tenta carregar o arquivo .env de múltiplos locais possíveis.
pub fn load_dotenv() {
    let possible_paths = [
        // Diretório atual
        PathBuf::from(".env"),
        // Diretório pai (quando executado de um subdiretório)
        PathBuf::from("../.env"),
    ];

    for path in &possible_paths {
        if path.exists() && dotenvy::from_path(path).is_ok() {
            log::debug!("Carregado .env de {:?}", path);
            return;
        }
    }

    // Última tentativa: dotenvy padrão
    let _ = dotenvy::dotenv();
}

/// Instala um panic hook que não corrompe o terminal da TUI.
///
/// Restaura o modo do terminal antes de logar o panic, para que a mensagem
/// não se perca dentro da alternate screen.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        // Melhor esforço: sair da alternate screen e do raw mode
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture
        );

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "local desconhecido".to_string());

        log::error!("[PANIC] em {}: {}", location, panic_info);

        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_default() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.ia_base_url, config.base_url);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_effective_worker_threads_fixo() {
        let config = RuntimeConfig {
            worker_threads: Some(4),
            ..Default::default()
        };
        assert_eq!(config.effective_worker_threads(), 4);
    }

    #[test]
    fn test_effective_worker_threads_dinamico() {
        let config = RuntimeConfig {
            worker_threads: None,
            max_threads: 2,
            ..Default::default()
        };
        assert!(config.effective_worker_threads() <= 2);
    }
}
