//! Motor da Mega-Sena.
//!
//! Sorteios reais da Mega-Sena quase nunca trazem três dezenas seguidas
//! nem somas extremas. O motor rejeita jogos assim em vez de distribuir
//! pesos: sorteia do pool combinado e filtra.

use rand::rngs::StdRng;

use super::Engine;
use crate::row::RawDraw;
use crate::stats;
use crate::strategy::{self, Candidate, Strategy};
use crate::variant::VariantConfig;

/// Faixa de soma considerada típica num jogo de 6 dezenas em 1..=60.
const SUM_RANGE: std::ops::RangeInclusive<u32> = 140..=240;

/// Limite duro de tentativas antes de desistir dos filtros.
const MAX_ATTEMPTS: usize = 1000;

pub struct MegaSenaEngine;

impl Engine for MegaSenaEngine {
    fn name(&self) -> &str {
        "Mega-Sena"
    }

    /// O pool é sempre quentes ∪ frias, qualquer que seja a estratégia
    /// pedida; os filtros estruturais valem por cima.
    fn generate(
        &self,
        draws: &[RawDraw],
        config: &VariantConfig,
        _strategy: Strategy,
        rng: &mut StdRng,
    ) -> Candidate {
        let stats = stats::compute_stats(draws, config);
        let pool = strategy::build_pool(&stats, config, Strategy::Master);
        constrained_candidate(&pool, config, rng)
    }
}

/// Rejeita jogos com trinca seguida ou soma atípica. Os filtros são
/// preferência, não garantia: esgotadas as tentativas, devolve um sorteio
/// livre do universo inteiro.
fn constrained_candidate(pool: &[u8], config: &VariantConfig, rng: &mut StdRng) -> Candidate {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = strategy::sample_candidate(pool, config.draw_size, rng);
        if has_triple_run(&candidate.numbers) {
            continue;
        }
        let sum: u32 = candidate.numbers.iter().map(|&n| u32::from(n)).sum();
        if !SUM_RANGE.contains(&sum) {
            continue;
        }
        return candidate;
    }
    strategy::sample_candidate(&config.universe(), config.draw_size, rng)
}

/// Três dezenas consecutivas no jogo já ordenado.
fn has_triple_run(numbers: &[u8]) -> bool {
    numbers
        .windows(3)
        .any(|w| w[1] - w[0] == 1 && w[2] - w[1] == 1)
}
