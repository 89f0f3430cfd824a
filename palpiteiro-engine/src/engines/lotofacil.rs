//! Motor da Lotofácil.
//!
//! Na Lotofácil o concurso seguinte costuma repetir cerca de nove dezenas
//! do anterior. O motor explora isso: parte das dezenas que saíram e
//! completa com as ausentes, em vez de sortear do ranking.

use rand::rngs::StdRng;

use super::Engine;
use crate::row::RawDraw;
use crate::stats;
use crate::strategy::{self, Candidate, Strategy};
use crate::variant::VariantConfig;

/// Dezenas do concurso anterior mantidas no jogo.
const REPEATED_FROM_LAST: usize = 9;

pub struct LotofacilEngine;

impl Engine for LotofacilEngine {
    fn name(&self) -> &str {
        "Lotofácil"
    }

    /// Mestre e Equilíbrio seguem o padrão de repetição; Tendência, ou
    /// qualquer concurso recente ilegível, volta ao gerador genérico.
    fn generate(
        &self,
        draws: &[RawDraw],
        config: &VariantConfig,
        strategy: Strategy,
        rng: &mut StdRng,
    ) -> Candidate {
        if strategy == Strategy::Trend {
            return generic(draws, config, strategy, rng);
        }

        let Some(latest) = draws.first() else {
            return generic(draws, config, strategy, rng);
        };

        let last_numbers = config.ball_values(latest);
        if last_numbers.len() != config.draw_size {
            return generic(draws, config, strategy, rng);
        }

        let mut present = last_numbers;
        present.sort_unstable();
        present.dedup();
        let absent: Vec<u8> = (1..=config.max_number)
            .filter(|n| !present.contains(n))
            .collect();

        let from_absent = config.draw_size.saturating_sub(REPEATED_FROM_LAST);
        if present.len() < REPEATED_FROM_LAST || absent.len() < from_absent {
            return generic(draws, config, strategy, rng);
        }

        let mut numbers = strategy::sample_candidate(&present, REPEATED_FROM_LAST, rng).numbers;
        numbers.extend(strategy::sample_candidate(&absent, from_absent, rng).numbers);
        numbers.sort_unstable();
        Candidate { numbers }
    }
}

fn generic(
    draws: &[RawDraw],
    config: &VariantConfig,
    strategy: Strategy,
    rng: &mut StdRng,
) -> Candidate {
    let stats = stats::compute_stats(draws, config);
    strategy::generate(&stats, config, strategy, rng)
}
