//! Estratégias de montagem de jogo.
//!
//! Uma estratégia só decide de quais dezenas o sorteio pode tirar; o
//! sorteio em si é sempre uniforme e sem reposição dentro do pool.

use rand::Rng;
use rand::rngs::StdRng;

use crate::stats::FrequencyStats;
use crate::variant::VariantConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Balance,
    Trend,
    Master,
}

impl Strategy {
    pub fn all() -> [Strategy; 3] {
        [Strategy::Balance, Strategy::Trend, Strategy::Master]
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Balance => write!(f, "Equilíbrio"),
            Strategy::Trend => write!(f, "Tendência"),
            Strategy::Master => write!(f, "Mestre"),
        }
    }
}

/// Um jogo proposto: dezenas distintas em ordem crescente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub numbers: Vec<u8>,
}

/// Pool de dezenas da estratégia. Sem histórico legível, ou com pool menor
/// que o jogo, vale o universo inteiro: gerar nunca falha por falta de
/// candidatas.
pub fn build_pool(stats: &FrequencyStats, config: &VariantConfig, strategy: Strategy) -> Vec<u8> {
    if stats.is_empty() {
        return config.universe();
    }

    let pool = match strategy {
        Strategy::Trend => stats.hot.clone(),
        Strategy::Balance => {
            // Frias mais tudo que ficou fora das quentes.
            let mut pool = stats.cold.clone();
            for n in 1..=config.max_number {
                if !stats.hot.contains(&n) && !pool.contains(&n) {
                    pool.push(n);
                }
            }
            pool
        }
        Strategy::Master => {
            let mut pool = stats.hot.clone();
            for &n in &stats.cold {
                if !pool.contains(&n) {
                    pool.push(n);
                }
            }
            pool
        }
    };

    if pool.len() < config.draw_size {
        config.universe()
    } else {
        pool
    }
}

/// Sorteia `draw_size` dezenas distintas do pool e devolve em ordem
/// crescente. Com pool menor que o pedido, devolve o que houver.
pub fn sample_candidate(pool: &[u8], draw_size: usize, rng: &mut StdRng) -> Candidate {
    let mut available = pool.to_vec();
    let mut numbers = Vec::with_capacity(draw_size);

    let take = draw_size.min(available.len());
    for _ in 0..take {
        let idx = rng.random_range(0..available.len());
        numbers.push(available.swap_remove(idx));
    }

    numbers.sort_unstable();
    Candidate { numbers }
}

/// Gera um jogo da estratégia a partir das estatísticas já computadas.
pub fn generate(
    stats: &FrequencyStats,
    config: &VariantConfig,
    strategy: Strategy,
    rng: &mut StdRng,
) -> Candidate {
    let pool = build_pool(stats, config, strategy);
    sample_candidate(&pool, config.draw_size, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::make_test_rows;
    use crate::stats::compute_stats;
    use rand::SeedableRng;

    fn assert_valid(candidate: &Candidate, config: &VariantConfig) {
        assert_eq!(candidate.numbers.len(), config.draw_size);
        assert!(candidate.numbers.windows(2).all(|w| w[0] < w[1]), "{:?}", candidate.numbers);
        assert!(candidate.numbers.iter().all(|&n| n >= 1 && n <= config.max_number));
    }

    fn stats_fixture() -> FrequencyStats {
        FrequencyStats {
            counts: vec![3, 3, 3, 1, 1, 1, 0, 0, 0],
            gaps: vec![0; 9],
            hot: vec![1, 2, 3],
            cold: vec![7, 8, 9],
        }
    }

    #[test]
    fn test_pool_da_tendencia_sao_as_quentes() {
        let config = VariantConfig::new("Teste", 9, 3);
        let pool = build_pool(&stats_fixture(), &config, Strategy::Trend);
        assert_eq!(pool, vec![1, 2, 3]);
    }

    #[test]
    fn test_pool_do_equilibrio_exclui_so_as_quentes() {
        let config = VariantConfig::new("Teste", 9, 3);
        let mut pool = build_pool(&stats_fixture(), &config, Strategy::Balance);
        pool.sort_unstable();
        assert_eq!(pool, vec![4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_pool_do_mestre_une_os_extremos() {
        let config = VariantConfig::new("Teste", 9, 3);
        let pool = build_pool(&stats_fixture(), &config, Strategy::Master);
        assert_eq!(pool, vec![1, 2, 3, 7, 8, 9]);
    }

    #[test]
    fn test_dezena_quente_e_fria_ao_mesmo_tempo_fica_no_equilibrio() {
        let config = VariantConfig::new("Teste", 9, 2);
        let stats = FrequencyStats {
            counts: vec![1; 9],
            gaps: vec![0; 9],
            hot: vec![1, 2],
            cold: vec![2, 3],
        };
        let pool = build_pool(&stats, &config, Strategy::Balance);
        assert!(pool.contains(&2));
        assert!(!pool.contains(&1));

        // Na união do mestre ela entra uma vez só.
        let master = build_pool(&stats, &config, Strategy::Master);
        assert_eq!(master.iter().filter(|&&n| n == 2).count(), 1);
    }

    #[test]
    fn test_pool_menor_que_o_jogo_cai_no_universo() {
        let config = VariantConfig::new("Teste", 9, 5);
        let stats = FrequencyStats {
            counts: vec![1; 9],
            gaps: vec![0; 9],
            hot: vec![1, 2],
            cold: vec![8, 9],
        };
        let pool = build_pool(&stats, &config, Strategy::Trend);
        assert_eq!(pool, config.universe());
    }

    #[test]
    fn test_historico_vazio_usa_o_universo_em_todas_as_estrategias() {
        let config = VariantConfig::new("Mega-Sena", 60, 6);
        let stats = compute_stats(&[], &config);
        let mut rng = StdRng::seed_from_u64(7);

        for strategy in Strategy::all() {
            assert_eq!(build_pool(&stats, &config, strategy), config.universe());
            let candidate = generate(&stats, &config, strategy, &mut rng);
            assert_valid(&candidate, &config);
        }
    }

    #[test]
    fn test_jogo_valido_em_todas_as_estrategias() {
        let config = VariantConfig::new("Teste", 30, 5);
        let rows = make_test_rows(&[
            &[1, 5, 9, 13, 17],
            &[2, 5, 9, 21, 25],
            &[3, 9, 13, 25, 29],
            &[1, 5, 13, 21, 30],
        ]);
        let stats = compute_stats(&rows, &config);
        let mut rng = StdRng::seed_from_u64(99);

        for strategy in Strategy::all() {
            for _ in 0..50 {
                let candidate = generate(&stats, &config, strategy, &mut rng);
                assert_valid(&candidate, &config);
                let pool = build_pool(&stats, &config, strategy);
                assert!(candidate.numbers.iter().all(|n| pool.contains(n)));
            }
        }
    }

    #[test]
    fn test_mesma_seed_mesmo_jogo() {
        let config = VariantConfig::new("Mega-Sena", 60, 6);
        let rows = make_test_rows(&[&[4, 18, 29, 37, 44, 58], &[4, 18, 30, 37, 50, 58]]);
        let stats = compute_stats(&rows, &config);

        let mut a = StdRng::seed_from_u64(20240101);
        let mut b = StdRng::seed_from_u64(20240101);
        for strategy in Strategy::all() {
            assert_eq!(
                generate(&stats, &config, strategy, &mut a),
                generate(&stats, &config, strategy, &mut b)
            );
        }
    }

    #[test]
    fn test_nomes_de_exibicao() {
        assert_eq!(Strategy::Balance.to_string(), "Equilíbrio");
        assert_eq!(Strategy::Trend.to_string(), "Tendência");
        assert_eq!(Strategy::Master.to_string(), "Mestre");
    }
}
