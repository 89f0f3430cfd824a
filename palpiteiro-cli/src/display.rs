//! Saída formatada no terminal.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use palpiteiro_db::models::{PredictionRecord, StoredDraw};
use palpiteiro_engine::signal::{Signal, SignalKind};
use palpiteiro_engine::stats::FrequencyStats;
use palpiteiro_engine::strategy::{Candidate, Strategy};
use palpiteiro_engine::variant::VariantConfig;

use crate::import::ImportResult;
use crate::simulate::SimulationReport;

pub fn display_import_summary(lottery: &str, result: &ImportResult) {
    println!("\nImportação de {} concluída:", lottery);
    println!("  Linhas lidas         : {}", result.total_records);
    println!("  Inseridas            : {}", result.inserted);
    println!("  Duplicadas ignoradas : {}", result.skipped);
    if result.errors > 0 {
        println!("  Linhas com erro      : {}", result.errors);
    }
}

pub fn display_draws(lottery: &str, draws: &[StoredDraw]) {
    if draws.is_empty() {
        println!("Nenhum concurso para exibir.");
        return;
    }

    println!("\n🎱 {} — últimos {} concursos\n", lottery, draws.len());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Concurso", "Data", "Dezenas", "Status", "Estimativa"]);

    for draw in draws {
        table.add_row(vec![
            draw.contest.to_string(),
            draw.date.clone(),
            draw.numbers.join(" - "),
            draw.status.clone(),
            draw.estimated_prize.clone(),
        ]);
    }

    println!("{table}");
}

pub fn display_stats(config: &VariantConfig, stats: &FrequencyStats, window: u32) {
    println!("\n📊 {} — estatísticas dos últimos {} concursos\n", config.name, window);

    let mut order: Vec<u8> = (1..=config.max_number).collect();
    order.sort_by(|&a, &b| stats.count_of(b).cmp(&stats.count_of(a)).then(a.cmp(&b)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Dezena", "Frequência", "Atraso", "Situação"]);

    for number in order {
        let tag = if stats.hot.contains(&number) {
            Cell::new("QUENTE").fg(Color::Green)
        } else if stats.cold.contains(&number) {
            Cell::new("FRIA").fg(Color::Red)
        } else {
            Cell::new("-")
        };
        table.add_row(vec![
            Cell::new(format!("{:02}", number)),
            Cell::new(stats.count_of(number)),
            Cell::new(stats.gap_of(number)),
            tag,
        ]);
    }

    println!("{table}");
}

fn signal_marker(kind: SignalKind) -> &'static str {
    match kind {
        SignalKind::Actionable => "🟢",
        SignalKind::Neutral => "🟡",
        SignalKind::Unknown => "⚪",
    }
}

pub fn display_signal(lottery: &str, engine: &str, signal: &Signal) {
    println!(
        "\n{} {} [motor {}]: {} ({})",
        signal_marker(signal.kind),
        lottery,
        engine,
        signal.label,
        signal.kind
    );
}

/// Resumo de quentes e frias antes dos palpites. Sem histórico legível
/// não há o que resumir e a função fica quieta.
pub fn display_hot_cold(stats: &FrequencyStats) {
    if stats.is_empty() {
        return;
    }

    let join = |ns: &[u8]| {
        ns.iter().map(|n| format!("{:02}", n)).collect::<Vec<_>>().join(" ")
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![Cell::new("Quentes").fg(Color::Green), Cell::new(join(&stats.hot))]);
    table.add_row(vec![Cell::new("Frias").fg(Color::Red), Cell::new(join(&stats.cold))]);

    println!("{table}");
}

pub fn display_candidates(candidates: &[Candidate], strategy: Strategy) {
    println!("\n🎲 Palpites — estratégia {}\n", strategy);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Dezenas"]);

    for (i, candidate) in candidates.iter().enumerate() {
        let numbers = candidate
            .numbers
            .iter()
            .map(|n| format!("{:02}", n))
            .collect::<Vec<_>>()
            .join(" - ");
        table.add_row(vec![(i + 1).to_string(), numbers]);
    }

    println!("{table}");
}

pub struct DashboardCard {
    pub lottery: String,
    pub engine: String,
    pub contest: Option<i64>,
    pub numbers: String,
    pub signal: Signal,
}

pub fn display_dashboard(cards: &[DashboardCard]) {
    println!("\n🎰 Painel das loterias\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["", "Loteria", "Motor", "Último concurso", "Dezenas", "Sinal", "Ação"]);

    for card in cards {
        let signal_cell = match card.signal.kind {
            SignalKind::Actionable => Cell::new(card.signal.label).fg(Color::Green),
            SignalKind::Neutral => Cell::new(card.signal.label).fg(Color::Yellow),
            SignalKind::Unknown => Cell::new(card.signal.label),
        };
        table.add_row(vec![
            Cell::new(signal_marker(card.signal.kind)),
            Cell::new(&card.lottery),
            Cell::new(&card.engine),
            Cell::new(card.contest.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())),
            Cell::new(&card.numbers),
            signal_cell,
            Cell::new(card.signal.kind),
        ]);
    }

    println!("{table}");
}

pub fn display_predictions(lottery: &str, records: &[PredictionRecord]) {
    if records.is_empty() {
        println!("Nenhum palpite gravado para {}.", lottery);
        return;
    }

    println!("\n🗒️  Palpites gravados — {}\n", lottery);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Concurso alvo", "Estratégia", "Dezenas", "Gravado em"]);

    for record in records {
        let numbers = record
            .numbers
            .iter()
            .map(|n| format!("{:02}", n))
            .collect::<Vec<_>>()
            .join(" - ");
        table.add_row(vec![
            record.id.to_string(),
            record.target_contest.to_string(),
            record.strategy.clone(),
            numbers,
            record.created_at.clone(),
        ]);
    }

    println!("{table}");
}

pub fn display_check(contest: i64, actual: &[u8], records: &[PredictionRecord]) {
    let mut sorted = actual.to_vec();
    sorted.sort_unstable();
    let drawn = sorted
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" - ");

    println!("\n✅ Conferência do concurso {}\n", contest);
    println!("Resultado: {}\n", drawn);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Estratégia", "Dezenas", "Acertos"]);

    for record in records {
        let hits = record.numbers.iter().filter(|n| sorted.contains(n)).count();
        let numbers = record
            .numbers
            .iter()
            .map(|n| {
                if sorted.contains(n) {
                    format!("[{:02}]", n)
                } else {
                    format!(" {:02} ", n)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let hits_cell = if hits == record.numbers.len() && !record.numbers.is_empty() {
            Cell::new(hits).fg(Color::Green)
        } else {
            Cell::new(hits)
        };
        table.add_row(vec![
            Cell::new(record.id),
            Cell::new(&record.strategy),
            Cell::new(numbers),
            hits_cell,
        ]);
    }

    println!("{table}");
}

pub fn display_simulation(lottery: &str, report: &SimulationReport) {
    println!("\n📈 Simulação walk-forward — {}\n", lottery);
    println!(
        "{} concursos de teste, {} jogos por estratégia em cada um.",
        report.test_points, report.trials
    );
    println!("Média de acertos de um jogo ao acaso: {:.2}\n", report.expected_random);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Estratégia", "Média de acertos", "Melhor jogo"]);

    for score in &report.scores {
        let mean = format!("{:.3}", score.mean_hits);
        let mean_cell = if score.mean_hits > report.expected_random {
            Cell::new(mean).fg(Color::Green)
        } else {
            Cell::new(mean).fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(score.strategy.to_string()),
            mean_cell,
            Cell::new(score.best_hits),
        ]);
    }

    println!("{table}");
}
