//! Avaliação walk-forward das estratégias.
//!
//! Para cada concurso de teste t os jogos são gerados só com os concursos
//! estritamente anteriores (nunca com o futuro) e conferidos contra o
//! resultado real de t. Serve para comparar as estratégias com a média
//! esperada de um jogo ao acaso, não para prometer acerto.

use chrono::Datelike;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use palpiteiro_engine::engines::EngineRegistry;
use palpiteiro_engine::row::RawDraw;
use palpiteiro_engine::strategy::Strategy;
use palpiteiro_engine::variant::VariantConfig;

/// Máximo de concursos de teste; históricos longos pulam de stride.
const MAX_TEST_POINTS: usize = 50;

#[derive(Debug, Clone)]
pub struct StrategyScore {
    pub strategy: Strategy,
    pub mean_hits: f64,
    pub best_hits: u32,
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub test_points: usize,
    pub trials: usize,
    pub expected_random: f64,
    pub scores: Vec<StrategyScore>,
}

/// Seed determinística do dia (AAAAMMDD), para jogos reproduzíveis sem
/// pedir seed na linha de comando.
pub fn date_seed() -> u64 {
    let today = chrono::Local::now().date_naive();
    today.year() as u64 * 10_000 + u64::from(today.month()) * 100 + u64::from(today.day())
}

pub fn run_simulation(
    rows: &[RawDraw],
    config: &VariantConfig,
    trials: usize,
    window: usize,
    seed: u64,
) -> SimulationReport {
    // Cada ponto de teste precisa de ao menos um concurso anterior.
    let max_t = rows.len().saturating_sub(1);
    let stride = (max_t / MAX_TEST_POINTS).max(1);
    let points: Vec<usize> = (0..max_t).step_by(stride).collect();

    let pb = ProgressBar::new(points.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} concursos",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    let registry = EngineRegistry::with_defaults();
    let engine = registry.engine_for(&config.name);
    let strategies = Strategy::all();

    // Por ponto: (soma de acertos, melhor jogo) de cada estratégia.
    let per_point: Vec<Option<Vec<(u64, u32)>>> = points
        .par_iter()
        .map(|&t| {
            let actual = config.ball_values(&rows[t]);
            let out = if actual.is_empty() {
                None
            } else {
                let train_end = (t + 1 + window).min(rows.len());
                let train = &rows[t + 1..train_end];
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(t as u64));
                let mut scores = Vec::with_capacity(strategies.len());
                for strategy in strategies {
                    let mut sum_hits = 0u64;
                    let mut best = 0u32;
                    for _ in 0..trials {
                        let candidate = engine.generate(train, config, strategy, &mut rng);
                        let hits =
                            candidate.numbers.iter().filter(|n| actual.contains(n)).count() as u32;
                        sum_hits += u64::from(hits);
                        best = best.max(hits);
                    }
                    scores.push((sum_hits, best));
                }
                Some(scores)
            };
            pb.inc(1);
            out
        })
        .collect();

    pb.finish_and_clear();

    let valid: Vec<&Vec<(u64, u32)>> = per_point.iter().flatten().collect();
    let denom = (valid.len() * trials).max(1) as f64;

    let scores = strategies
        .iter()
        .enumerate()
        .map(|(i, &strategy)| StrategyScore {
            strategy,
            mean_hits: valid.iter().map(|p| p[i].0).sum::<u64>() as f64 / denom,
            best_hits: valid.iter().map(|p| p[i].1).max().unwrap_or(0),
        })
        .collect();

    SimulationReport {
        test_points: valid.len(),
        trials,
        // Acertos esperados de um jogo uniforme: draw_size² / max_number.
        expected_random: config.draw_size as f64 * config.draw_size as f64
            / f64::from(config.max_number),
        scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palpiteiro_engine::row::make_test_rows;

    fn historico() -> Vec<RawDraw> {
        let games: Vec<Vec<u8>> = (0..30u8)
            .map(|i| {
                vec![
                    1 + (i % 10),
                    11 + (i % 10),
                    21 + (i % 10),
                    31 + (i % 10),
                    41 + (i % 10),
                    51 + (i % 10),
                ]
            })
            .collect();
        let slices: Vec<&[u8]> = games.iter().map(|g| g.as_slice()).collect();
        make_test_rows(&slices)
    }

    #[test]
    fn test_relatorio_cobre_as_tres_estrategias() {
        let config = VariantConfig::new("Quina", 80, 5);
        let rows = historico();
        let report = run_simulation(&rows, &config, 5, 10, 42);

        assert_eq!(report.scores.len(), 3);
        assert!(report.test_points > 0);
        assert_eq!(report.trials, 5);
        for score in &report.scores {
            assert!(score.mean_hits >= 0.0);
            assert!(score.mean_hits <= config.draw_size as f64);
            assert!(score.best_hits <= config.draw_size as u32);
        }
    }

    #[test]
    fn test_simulacao_e_deterministica() {
        let config = VariantConfig::new("Mega-Sena", 60, 6);
        let rows = historico();

        let a = run_simulation(&rows, &config, 3, 10, 99);
        let b = run_simulation(&rows, &config, 3, 10, 99);
        for (x, y) in a.scores.iter().zip(&b.scores) {
            assert_eq!(x.mean_hits, y.mean_hits);
            assert_eq!(x.best_hits, y.best_hits);
        }
    }

    #[test]
    fn test_historico_curto_nao_quebra() {
        let config = VariantConfig::new("Mega-Sena", 60, 6);

        let report = run_simulation(&[], &config, 3, 10, 1);
        assert_eq!(report.test_points, 0);

        let rows = make_test_rows(&[&[1, 2, 3, 10, 20, 30]]);
        let report = run_simulation(&rows, &config, 3, 10, 1);
        assert_eq!(report.test_points, 0);
    }

    #[test]
    fn test_media_esperada_ao_acaso() {
        let mega = VariantConfig::new("Mega-Sena", 60, 6);
        let rows = historico();
        let report = run_simulation(&rows, &mega, 1, 5, 7);
        assert!((report.expected_random - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_date_seed_tem_oito_digitos() {
        let seed = date_seed();
        assert!(seed >= 19_70_01_01);
        assert!(seed <= 99_99_12_31);
    }
}
