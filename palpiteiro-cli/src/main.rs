//! palpiteiro — análise e palpites para as loterias da Caixa.

mod config;
mod display;
mod import;
mod rows;
mod simulate;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;

use palpiteiro_db::db::{
    count_draws, db_path, delete_prediction, fetch_draw, fetch_last_draws, fetch_predictions,
    fetch_predictions_for_contest, insert_draw, insert_prediction, latest_contest, migrate,
    open_db,
};
use palpiteiro_db::models::StoredDraw;
use palpiteiro_db::rusqlite::Connection;
use palpiteiro_engine::engines::EngineRegistry;
use palpiteiro_engine::strategy::{Candidate, Strategy};
use palpiteiro_engine::variant::VariantConfig;

use crate::config::{Catalog, load_catalog};
use crate::display::{
    DashboardCard, display_candidates, display_check, display_dashboard, display_draws,
    display_hot_cold, display_import_summary, display_predictions, display_signal,
    display_simulation, display_stats,
};
use crate::rows::{raw_row, raw_rows};
use crate::simulate::date_seed;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum StrategyArg {
    /// Evita as dezenas mais sorteadas
    Balance,
    /// Só as dezenas mais sorteadas
    Trend,
    /// Une as mais e as menos sorteadas
    #[default]
    Master,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Strategy {
        match arg {
            StrategyArg::Balance => Strategy::Balance,
            StrategyArg::Trend => Strategy::Trend,
            StrategyArg::Master => Strategy::Master,
        }
    }
}

#[derive(Parser)]
#[command(name = "palpiteiro", about = "Análise e palpites para as loterias da Caixa")]
struct Cli {
    /// Catálogo de loterias em JSON (padrão: catálogo embutido)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importar o histórico de uma loteria a partir de um CSV
    Import {
        /// Loteria de destino (ex: mega, lotofacil)
        lottery: String,

        /// Arquivo CSV separado por ponto e vírgula
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Listar os últimos concursos importados
    List {
        lottery: String,

        /// Quantos concursos exibir
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Frequências, atrasos e dezenas quentes/frias
    Stats {
        lottery: String,

        /// Janela de análise (número de concursos)
        #[arg(short, long, default_value = "100")]
        window: u32,
    },

    /// Painel com o sinal de cada loteria do catálogo
    Dashboard,

    /// Gerar palpites para o próximo concurso
    Predict {
        lottery: String,

        /// Estratégia de montagem do jogo
        #[arg(short, long, value_enum, default_value = "master")]
        strategy: StrategyArg,

        /// Quantos jogos gerar
        #[arg(short, long, default_value = "3")]
        count: usize,

        /// Janela de análise (número de concursos)
        #[arg(short, long, default_value = "100")]
        window: u32,

        /// Seed dos sorteios (padrão: data do dia, AAAAMMDD)
        #[arg(long)]
        seed: Option<u64>,

        /// Gravar os palpites para conferência futura
        #[arg(long)]
        save: bool,

        /// Concurso alvo ao gravar (padrão: último importado + 1)
        #[arg(long)]
        target: Option<i64>,
    },

    /// Listar palpites gravados
    Predictions {
        lottery: String,

        /// Quantos palpites exibir
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Apagar um palpite gravado
    DeletePrediction {
        /// Identificador do palpite (coluna # da listagem)
        id: i64,
    },

    /// Conferir os palpites gravados contra o resultado real
    Check {
        lottery: String,

        /// Concurso a conferir (padrão: último importado)
        #[arg(short, long)]
        contest: Option<i64>,
    },

    /// Comparar as estratégias contra o histórico (walk-forward)
    Simulate {
        lottery: String,

        /// Jogos por estratégia em cada concurso de teste
        #[arg(short, long, default_value = "50")]
        trials: usize,

        /// Janela de análise por concurso de teste
        #[arg(short, long, default_value = "100")]
        window: u32,

        /// Seed da simulação
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Registrar um concurso digitando os dados
    Add { lottery: String },

    /// Exibir o catálogo de loterias em JSON
    Catalog,

    /// Exibir o caminho do banco de dados
    DbPath,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let catalog = load_catalog(cli.config.as_deref())?;

    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { lottery, file } => cmd_import(&conn, &catalog, &lottery, &file),
        Command::List { lottery, last } => cmd_list(&conn, &catalog, &lottery, last),
        Command::Stats { lottery, window } => cmd_stats(&conn, &catalog, &lottery, window),
        Command::Dashboard => cmd_dashboard(&conn, &catalog),
        Command::Predict {
            lottery,
            strategy,
            count,
            window,
            seed,
            save,
            target,
        } => cmd_predict(&conn, &catalog, &lottery, strategy.into(), count, window, seed, save, target),
        Command::Predictions { lottery, last } => cmd_predictions(&conn, &catalog, &lottery, last),
        Command::DeletePrediction { id } => cmd_delete_prediction(&conn, id),
        Command::Check { lottery, contest } => cmd_check(&conn, &catalog, &lottery, contest),
        Command::Simulate {
            lottery,
            trials,
            window,
            seed,
        } => cmd_simulate(&conn, &catalog, &lottery, trials, window, seed),
        Command::Add { lottery } => cmd_add(&conn, &catalog, &lottery),
        Command::Catalog => cmd_catalog(&catalog),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn cmd_import(conn: &Connection, catalog: &Catalog, lottery: &str, file: &PathBuf) -> Result<()> {
    let config = catalog.find(lottery)?;
    let result = import::import_csv(conn, config, file)?;
    display_import_summary(&config.name, &result);
    Ok(())
}

fn cmd_list(conn: &Connection, catalog: &Catalog, lottery: &str, last: u32) -> Result<()> {
    let config = catalog.find(lottery)?;
    let n = count_draws(conn, &config.name)?;
    if n == 0 {
        println!(
            "Base vazia para {}. Rode antes: palpiteiro import {} --file <arquivo.csv>",
            config.name, lottery
        );
        return Ok(());
    }
    let draws = fetch_last_draws(conn, &config.name, last)?;
    display_draws(&config.name, &draws);
    Ok(())
}

fn cmd_stats(conn: &Connection, catalog: &Catalog, lottery: &str, window: u32) -> Result<()> {
    let config = catalog.find(lottery)?;
    let n = count_draws(conn, &config.name)?;
    if n == 0 {
        println!(
            "Base vazia para {}. Rode antes: palpiteiro import {} --file <arquivo.csv>",
            config.name, lottery
        );
        return Ok(());
    }
    let draws = fetch_last_draws(conn, &config.name, window)?;
    let rows = raw_rows(&draws, config);

    let registry = EngineRegistry::with_defaults();
    let engine = registry.engine_for(&config.name);
    let stats = engine.compute_stats(&rows, config);
    display_stats(config, &stats, rows.len() as u32);
    Ok(())
}

fn cmd_dashboard(conn: &Connection, catalog: &Catalog) -> Result<()> {
    let registry = EngineRegistry::with_defaults();
    let mut cards = Vec::new();

    for config in &catalog.lotteries {
        // O sinal olha só o concurso mais recente.
        let draws = fetch_last_draws(conn, &config.name, 1)?;
        let rows = raw_rows(&draws, config);
        let engine = registry.engine_for(&config.name);
        let signal = engine.detect_signal(&rows, config);

        cards.push(DashboardCard {
            lottery: config.name.clone(),
            engine: engine.name().to_string(),
            contest: draws.first().map(|d| d.contest),
            numbers: draws
                .first()
                .map(|d| d.numbers.join(" "))
                .unwrap_or_default(),
            signal,
        });
    }

    display_dashboard(&cards);
    Ok(())
}

fn cmd_predict(
    conn: &Connection,
    catalog: &Catalog,
    lottery: &str,
    strategy: Strategy,
    count: usize,
    window: u32,
    seed: Option<u64>,
    save: bool,
    target: Option<i64>,
) -> Result<()> {
    let config = catalog.find(lottery)?;
    if count_draws(conn, &config.name)? == 0 {
        println!("(Base vazia para {}: os jogos saem do universo inteiro.)", config.name);
    }
    let draws = fetch_last_draws(conn, &config.name, window)?;
    let rows = raw_rows(&draws, config);

    let registry = EngineRegistry::with_defaults();
    let engine = registry.engine_for(&config.name);

    let stats = engine.compute_stats(&rows, config);
    let signal = engine.detect_signal(&rows, config);
    display_signal(&config.name, engine.name(), &signal);
    display_hot_cold(&stats);

    let effective_seed = match seed {
        Some(s) => s,
        None => {
            let s = date_seed();
            println!("(Seed do dia: {s}. Use --seed para variar.)");
            s
        }
    };
    let mut rng = StdRng::seed_from_u64(effective_seed);

    let count = count.max(1);
    let candidates: Vec<Candidate> = (0..count)
        .map(|_| engine.generate(&rows, config, strategy, &mut rng))
        .collect();
    display_candidates(&candidates, strategy);

    if save {
        let target_contest = match target {
            Some(t) => t,
            None => latest_contest(conn, &config.name)?.map(|c| c + 1).unwrap_or(1),
        };
        for candidate in &candidates {
            insert_prediction(
                conn,
                &config.name,
                target_contest,
                &strategy.to_string(),
                &candidate.numbers,
            )?;
        }
        println!(
            "\n{} palpite(s) gravado(s) para o concurso {}. Confira depois com: palpiteiro check {}",
            candidates.len(),
            target_contest,
            lottery
        );
    }
    Ok(())
}

fn cmd_predictions(conn: &Connection, catalog: &Catalog, lottery: &str, last: u32) -> Result<()> {
    let config = catalog.find(lottery)?;
    let records = fetch_predictions(conn, &config.name, last)?;
    display_predictions(&config.name, &records);
    Ok(())
}

fn cmd_delete_prediction(conn: &Connection, id: i64) -> Result<()> {
    if delete_prediction(conn, id)? {
        println!("Palpite {} apagado.", id);
    } else {
        println!("Palpite {} não encontrado.", id);
    }
    Ok(())
}

fn cmd_check(conn: &Connection, catalog: &Catalog, lottery: &str, contest: Option<i64>) -> Result<()> {
    let config = catalog.find(lottery)?;
    let contest = match contest {
        Some(c) => c,
        None => latest_contest(conn, &config.name)?
            .with_context(|| format!("Base vazia para {}: nada a conferir", config.name))?,
    };

    let draw = fetch_draw(conn, &config.name, contest)?
        .with_context(|| format!("Concurso {} não está no histórico", contest))?;
    let actual = config.ball_values(&raw_row(&draw, config));
    if actual.is_empty() {
        bail!("Concurso {} sem dezenas legíveis", contest);
    }

    let records = fetch_predictions_for_contest(conn, &config.name, contest)?;
    if records.is_empty() {
        println!("Nenhum palpite gravado para o concurso {}.", contest);
        return Ok(());
    }
    display_check(contest, &actual, &records);
    Ok(())
}

fn cmd_simulate(
    conn: &Connection,
    catalog: &Catalog,
    lottery: &str,
    trials: usize,
    window: u32,
    seed: Option<u64>,
) -> Result<()> {
    let config = catalog.find(lottery)?;
    let total = count_draws(conn, &config.name)?;
    if total < 10 {
        bail!(
            "Histórico insuficiente para simular {} ({} concursos; mínimo 10)",
            config.name,
            total
        );
    }

    let draws = fetch_last_draws(conn, &config.name, total)?;
    let rows = raw_rows(&draws, config);
    let trials = trials.max(1);
    let effective_seed = seed.unwrap_or_else(date_seed);

    println!("Simulando {} com seed {}...", config.name, effective_seed);
    let report = simulate::run_simulation(&rows, config, trials, window as usize, effective_seed);
    display_simulation(&config.name, &report);
    Ok(())
}

fn cmd_add(conn: &Connection, catalog: &Catalog, lottery: &str) -> Result<()> {
    let config = catalog.find(lottery)?;
    println!("Registro manual de concurso — {}\n", config.name);

    let contest: i64 = prompt("Número do concurso: ")?
        .parse()
        .context("O concurso precisa ser um número inteiro")?;
    let date = import::normalize_date(&prompt("Data (DD/MM/AAAA, vazio se não souber): ")?);
    let numbers = prompt_numbers(config)?;
    let status = prompt("Status (ex: ACUMULOU; vazio se nada): ")?;

    let draw = StoredDraw {
        lottery: config.name.clone(),
        contest,
        date,
        numbers: numbers.iter().map(u8::to_string).collect(),
        status,
        estimated_prize: String::new(),
    };

    println!("\nConcurso a gravar:");
    display_draws(&config.name, &[draw.clone()]);

    let confirm = prompt("\nConfirmar? (s/n): ")?;
    if confirm.to_lowercase() == "s" {
        let inserted = insert_draw(conn, &draw)?;
        if inserted {
            println!("Concurso gravado.");
        } else {
            println!("O concurso {} já existe; nada foi alterado.", contest);
        }
    } else {
        println!("Registro cancelado.");
    }
    Ok(())
}

fn cmd_catalog(catalog: &Catalog) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog).context("Falha ao serializar o catálogo")?;
    println!("{json}");
    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Falha ao ler a entrada")?;
    Ok(input.trim().to_string())
}

fn prompt_numbers(config: &VariantConfig) -> Result<Vec<u8>> {
    loop {
        let input = prompt(&format!(
            "{} dezenas entre 1 e {}, separadas por espaço: ",
            config.draw_size, config.max_number
        ))?;
        let parsed: Result<Vec<u8>, _> = input.split_whitespace().map(str::parse).collect();
        match parsed {
            Ok(mut numbers) if numbers.len() == config.draw_size => {
                numbers.sort_unstable();
                let distinct = numbers.windows(2).all(|w| w[0] != w[1]);
                let in_range = numbers.iter().all(|&n| n >= 1 && n <= config.max_number);
                if distinct && in_range {
                    return Ok(numbers);
                }
                println!("Dezenas fora do universo ou repetidas. Tente de novo.");
            }
            _ => println!("Digite exatamente {} dezenas válidas. Tente de novo.", config.draw_size),
        }
    }
}
