// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Z DADOS CLI
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Cliente de terminal da base Z Dados de empresas brasileiras.
//
// Uso:
//   z-dados "padaria"                 (busca simples, página 1)
//   z-dados --tui                     (interface interativa)
//   z-dados --empresa 12345678000195  (perfil de uma empresa)
//   z-dados --stats                   (estatísticas da base)
//   z-dados --ia "padarias em SP"     (prospecção por IA)
//   z-dados --export csv "padaria"    (busca e exporta os resultados)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::sync::Arc;

use z_dados::api::{ApiClient, ZDadosClient};
use z_dados::config;
use z_dados::export::{self, DossierDepth, ExportFormat};
use z_dados::filters::SearchFilters;
use z_dados::format::{format_capital, format_cnpj, format_compact};
use z_dados::tui::{api_worker, create_event_channel, run_tui};

fn usage(program: &str) {
    eprintln!("Z Dados CLI v{}", z_dados::VERSION);
    eprintln!();
    eprintln!("Uso: {} <termo de busca>", program);
    eprintln!();
    eprintln!("Opções:");
    eprintln!("  --tui                       Interface interativa no terminal");
    eprintln!("  --empresa <cnpj>            Perfil completo de uma empresa");
    eprintln!("  --empresa <cnpj> --simples  Perfil condensado");
    eprintln!("  --stats                     Estatísticas agregadas da base");
    eprintln!("  --ia \"<pergunta>\"           Prospecção por IA");
    eprintln!("  --export <csv|xls> <termo>  Busca e exporta os resultados");
    eprintln!();
    eprintln!("Exemplos:");
    eprintln!("  {} \"padaria pão quente\"", program);
    eprintln!("  {} --empresa 12345678000195", program);
    eprintln!("  {} --export csv \"restaurantes\"", program);
}

fn banner(titulo: &str) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(" {}", titulo);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

fn main() -> anyhow::Result<()> {
    // Carregar .env PRIMEIRO, antes de qualquer coisa
    config::load_dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
        std::process::exit(1);
    }

    let runtime = config::create_tokio_runtime(&config::load_runtime_config())?;
    runtime.block_on(run(&args))
}

async fn run(args: &[String]) -> anyhow::Result<()> {
    let api_config = config::load_api_config();
    let client = ZDadosClient::new(api_config.base_url.clone())
        .with_ia_base_url(api_config.ia_base_url.clone())
        .with_page_size(api_config.page_size);

    match args[1].as_str() {
        "--tui" => run_tui_mode(Arc::new(client)).await,
        "--empresa" => {
            let cnpj = args.get(2).map(String::as_str).unwrap_or_default();
            if cnpj.is_empty() {
                usage(&args[0]);
                std::process::exit(1);
            }
            let depth = if args.iter().any(|a| a == "--simples") {
                DossierDepth::Simples
            } else {
                DossierDepth::Completo
            };
            run_empresa(&client, cnpj, depth).await
        }
        "--stats" => run_stats(&client).await,
        "--ia" => {
            let pergunta = args[2..].join(" ");
            if pergunta.trim().is_empty() {
                usage(&args[0]);
                std::process::exit(1);
            }
            run_prospeccao(&client, &pergunta).await
        }
        "--export" => {
            let formato = args
                .get(2)
                .and_then(|f| ExportFormat::parse(f))
                .unwrap_or_else(|| {
                    eprintln!("✗ Formato inválido: use csv ou xls");
                    std::process::exit(1);
                });
            let termo = args[3..].join(" ");
            run_export(&client, formato, &termo).await
        }
        _ => {
            let termo = args[1..].join(" ");
            run_busca(&client, &termo).await
        }
    }
}

/// Busca simples de uma página, impressa como cartões de resultado.
async fn run_busca(client: &ZDadosClient, termo: &str) -> anyhow::Result<()> {
    if termo.trim().is_empty() {
        // Termo vazio é no-op, como na interface
        return Ok(());
    }

    banner(&format!("BUSCA: {}", termo.trim()));
    println!();

    let page = match client.search(termo, &SearchFilters::new(), 1).await {
        Ok(page) => page,
        Err(err) => {
            log::error!("Erro na busca: {}", err);
            eprintln!("✗ {}", err);
            return Ok(());
        }
    };

    if page.data.is_empty() {
        println!("Nenhum resultado encontrado.");
        return Ok(());
    }

    for empresa in &page.data {
        let situacao = if empresa.status_ativa { "ATIVA" } else { "INATIVA" };
        println!("• {} [{}]", empresa.display_name(), situacao);
        let localidade = match (empresa.municipio.as_deref(), empresa.uf.as_deref()) {
            (Some(m), Some(uf)) => format!("{} - {}", m, uf),
            _ => String::new(),
        };
        println!("  {}  {}", format_cnpj(&empresa.cnpj), localidade);
    }

    println!();
    println!(
        "Página {}{}",
        page.page,
        if page.has_next_page {
            " · há mais resultados (use --tui para navegar)"
        } else {
            ""
        }
    );

    Ok(())
}

/// Perfil de uma empresa impresso como dossiê.
async fn run_empresa(client: &ZDadosClient, cnpj: &str, depth: DossierDepth) -> anyhow::Result<()> {
    match client.get_empresa(cnpj).await {
        Ok(detail) => {
            print!("{}", export::dossier(&detail.empresa, &detail.socios, depth));
        }
        Err(err) => {
            eprintln!("✗ {}", err);
            eprintln!("  Verifique o CNPJ e tente novamente.");
        }
    }
    Ok(())
}

/// Snapshot de estatísticas da base.
async fn run_stats(client: &ZDadosClient) -> anyhow::Result<()> {
    let stats = match client.get_stats().await {
        Ok(stats) => stats,
        Err(err) => {
            eprintln!("✗ {}", err);
            return Ok(());
        }
    };

    banner("DASHBOARD Z DADOS");
    println!();
    println!("Total de empresas: {}", format_compact(stats.total_empresas as f64));
    println!(
        "Ativas:            {} ({:.1}% do total)",
        format_compact(stats.ativas as f64),
        stats.percentual_ativas()
    );
    println!("Inativas:          {}", format_compact(stats.inativas as f64));
    println!("Capital médio:     {}", format_capital(stats.media_capital));
    println!();

    print_ranking("Top Estados (UF)", stats.top_ufs.iter().map(|e| (e.uf.as_str(), e.count)));
    println!();
    print_ranking(
        "Top Atividades (CNAE)",
        stats.top_cnaes.iter().map(|e| (e.cnae.as_str(), e.count)),
    );

    Ok(())
}

fn print_ranking<'a>(titulo: &str, entradas: impl Iterator<Item = (&'a str, u64)>) {
    println!("{}", titulo);
    let entradas: Vec<_> = entradas.collect();
    if entradas.is_empty() {
        println!("  Nenhum dado disponível.");
        return;
    }
    let max = entradas[0].1.max(1);
    for (label, count) in entradas {
        let largura = ((count as f64 / max as f64) * 30.0).round() as usize;
        println!(
            "  {:<24} {} {}",
            label,
            "█".repeat(largura.max(1)),
            format_compact(count as f64)
        );
    }
}

/// Pergunta única ao endpoint de prospecção por IA.
async fn run_prospeccao(client: &ZDadosClient, pergunta: &str) -> anyhow::Result<()> {
    banner("PROSPECÇÃO POR IA");
    println!();
    println!("Pergunta: {}", pergunta.trim());
    println!();

    match client.ask_prospecting(pergunta).await {
        Ok(answer) => {
            println!("{}", answer.resposta);
            if !answer.fontes.is_empty() {
                println!();
                println!("Fontes:");
                for fonte in &answer.fontes {
                    println!("  - {}", fonte);
                }
            }
            if !answer.resultados.is_empty() {
                println!();
                println!("{} registro(s) fundamentam a resposta.", answer.resultados.len());
            }
        }
        Err(err) => {
            eprintln!("✗ {}", err);
        }
    }

    Ok(())
}

/// Busca uma página e grava o arquivo exportado no diretório atual.
async fn run_export(client: &ZDadosClient, formato: ExportFormat, termo: &str) -> anyhow::Result<()> {
    if termo.trim().is_empty() {
        eprintln!("✗ Informe um termo de busca para exportar.");
        std::process::exit(1);
    }

    let page = client.search(termo, &SearchFilters::new(), 1).await?;
    if page.data.is_empty() {
        println!("Nenhum resultado encontrado; nada exportado.");
        return Ok(());
    }

    let path = export::save_export(std::path::Path::new("."), None, formato, &page.data)?;
    println!("✓ {} registro(s) exportado(s) para {}", page.data.len(), path.display());
    Ok(())
}

/// Executa o modo TUI interativo.
async fn run_tui_mode(client: Arc<dyn ApiClient>) -> anyhow::Result<()> {
    config::install_panic_hook();

    let (event_tx, event_rx) = create_event_channel();
    let (request_tx, request_rx) = tokio::sync::mpsc::unbounded_channel();

    let worker = tokio::spawn(api_worker(client, request_rx, event_tx));

    // O loop da TUI bloqueia até o usuário sair
    let app = run_tui(request_tx, event_rx)?;

    // Fechar o canal encerra o worker
    worker.abort();

    if app.search.has_searched() {
        log::info!(
            "Sessão encerrada na página {} com {} resultado(s) em tela",
            app.search.page(),
            app.search.results().len()
        );
    }

    Ok(())
}
