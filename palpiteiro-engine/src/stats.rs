//! Frequências e atrasos sobre o histórico recebido.

use crate::row::RawDraw;
use crate::variant::VariantConfig;

/// Estatísticas do universo inteiro. `counts[i]` e `gaps[i]` valem para a
/// dezena i+1; os vetores cobrem 1..=max_number, nunca ficam esparsos.
#[derive(Debug, Clone)]
pub struct FrequencyStats {
    pub counts: Vec<u32>,
    pub gaps: Vec<u32>,
    pub hot: Vec<u8>,
    pub cold: Vec<u8>,
}

impl FrequencyStats {
    pub fn count_of(&self, number: u8) -> u32 {
        self.counts[(number - 1) as usize]
    }

    pub fn gap_of(&self, number: u8) -> u32 {
        self.gaps[(number - 1) as usize]
    }

    /// Histórico sem nenhuma célula legível não produz quentes nem frias.
    pub fn is_empty(&self) -> bool {
        self.hot.is_empty()
    }
}

/// Varre o histórico (linha 0 = concurso mais recente) e classifica o
/// universo. O atraso de uma dezena é o índice do concurso mais recente em
/// que ela saiu; dezena nunca vista fica com atraso = tamanho do histórico.
pub fn compute_stats(draws: &[RawDraw], config: &VariantConfig) -> FrequencyStats {
    let size = config.max_number as usize;
    let mut counts = vec![0u32; size];
    let mut gaps = vec![0u32; size];
    let mut seen = vec![false; size];

    for (i, row) in draws.iter().enumerate() {
        for n in config.ball_values(row) {
            let idx = (n - 1) as usize;
            counts[idx] += 1;
            if !seen[idx] {
                seen[idx] = true;
                gaps[idx] = i as u32;
            }
        }
    }
    for idx in 0..size {
        if !seen[idx] {
            gaps[idx] = draws.len() as u32;
        }
    }

    let total: u32 = counts.iter().sum();
    let (hot, cold) = if total == 0 {
        (Vec::new(), Vec::new())
    } else {
        rank(&counts, config.max_number)
    };

    FrequencyStats { counts, gaps, hot, cold }
}

/// Topo e fundo do ranking de frequência, cada lado com max_number/3
/// dezenas. Empates caem para a dezena menor, então a saída é sempre a
/// mesma para o mesmo histórico.
fn rank(counts: &[u32], max_number: u8) -> (Vec<u8>, Vec<u8>) {
    let cut = (max_number / 3) as usize;

    let mut hot: Vec<u8> = (1..=max_number).collect();
    hot.sort_by(|&a, &b| {
        counts[(b - 1) as usize]
            .cmp(&counts[(a - 1) as usize])
            .then(a.cmp(&b))
    });
    hot.truncate(cut);

    let mut cold: Vec<u8> = (1..=max_number).collect();
    cold.sort_by(|&a, &b| {
        counts[(a - 1) as usize]
            .cmp(&counts[(b - 1) as usize])
            .then(a.cmp(&b))
    });
    cold.truncate(cut);

    (hot, cold)
}
