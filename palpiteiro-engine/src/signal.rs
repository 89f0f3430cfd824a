//! Sinal de contexto do próximo concurso.
//!
//! Leitura heurística do momento da loteria a partir do concurso mais
//! recente: prêmio acumulado ou soma muito fora do esperado são convites
//! para jogar; o resto é espera.

use crate::row::RawDraw;
use crate::variant::VariantConfig;

/// Desvio relativo da soma esperada acima do qual se assume correção.
const DEVIATION_THRESHOLD: f64 = 0.4;

/// Marcadores de prêmio acumulado no texto de status, sem caixa.
const JACKPOT_MARKERS: [&str; 2] = ["ACUMULOU", "ACUMULADO"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Actionable,
    Neutral,
    Unknown,
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::Actionable => write!(f, "JOGAR"),
            SignalKind::Neutral => write!(f, "AGUARDAR"),
            SignalKind::Unknown => write!(f, "-"),
        }
    }
}

/// Estado detectado, com rótulo fixo para exibição e registro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal {
    pub label: &'static str,
    pub kind: SignalKind,
}

impl Signal {
    pub const NO_DATA: Signal = Signal {
        label: "No Data",
        kind: SignalKind::Unknown,
    };
    pub const JACKPOT_CARRIED: Signal = Signal {
        label: "Jackpot Carried",
        kind: SignalKind::Actionable,
    };
    pub const LIKELY_CORRECTION: Signal = Signal {
        label: "Likely Correction",
        kind: SignalKind::Actionable,
    };
    pub const NEUTRAL: Signal = Signal {
        label: "Neutral",
        kind: SignalKind::Neutral,
    };
}

/// Classifica o momento em três passos, sempre nesta ordem: sem dados
/// legíveis, prêmio acumulado, desvio da soma esperada. O concurso mais
/// recente é `draws[0]`.
pub fn detect_signal(draws: &[RawDraw], config: &VariantConfig) -> Signal {
    let Some(latest) = draws.first() else {
        return Signal::NO_DATA;
    };

    let numbers = config.ball_values(latest);
    if numbers.is_empty() {
        return Signal::NO_DATA;
    }

    let status = latest.status_text().to_uppercase();
    if JACKPOT_MARKERS.iter().any(|marker| status.contains(marker)) {
        return Signal::JACKPOT_CARRIED;
    }

    let expected = config.expected_sum();
    let actual: f64 = numbers.iter().map(|&n| f64::from(n)).sum();
    if (actual - expected).abs() > expected * DEVIATION_THRESHOLD {
        Signal::LIKELY_CORRECTION
    } else {
        Signal::NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{RawDraw, make_test_row, make_test_rows};

    fn mega() -> VariantConfig {
        VariantConfig::new("Mega-Sena", 60, 6)
    }

    #[test]
    fn test_historico_vazio_e_sem_dados() {
        let signal = detect_signal(&[], &mega());
        assert_eq!(signal, Signal::NO_DATA);
        assert_eq!(signal.kind, SignalKind::Unknown);
        assert_eq!(signal.label, "No Data");
    }

    #[test]
    fn test_linha_ilegivel_e_sem_dados_mesmo_acumulada() {
        let row = RawDraw::new(vec![
            ("D1".to_string(), "xx".to_string()),
            ("Status".to_string(), "ACUMULOU".to_string()),
        ]);
        assert_eq!(detect_signal(&[row], &mega()), Signal::NO_DATA);
    }

    #[test]
    fn test_acumulado_vence_o_desvio() {
        // Soma 30, bem abaixo do esperado, mas o acumulado fala primeiro.
        let row = make_test_row(&[1, 2, 3, 4, 9, 11], "ACUMULOU para o próximo concurso");
        let signal = detect_signal(&[row], &mega());
        assert_eq!(signal, Signal::JACKPOT_CARRIED);
        assert_eq!(signal.kind, SignalKind::Actionable);
    }

    #[test]
    fn test_marcadores_de_acumulado() {
        let casos = ["ACUMULOU", "Acumulou!", "PRÊMIO ACUMULADO", "acumulado"];
        for caso in casos {
            let row = make_test_row(&[20, 25, 30, 32, 35, 38], caso);
            assert_eq!(detect_signal(&[row], &mega()), Signal::JACKPOT_CARRIED, "{caso}");
        }
    }

    #[test]
    fn test_acumulado_na_coluna_status_simples() {
        let row = RawDraw::new(vec![
            ("D1".to_string(), "20".to_string()),
            ("D2".to_string(), "25".to_string()),
            ("D3".to_string(), "30".to_string()),
            ("D4".to_string(), "32".to_string()),
            ("D5".to_string(), "35".to_string()),
            ("D6".to_string(), "38".to_string()),
            ("Status".to_string(), "acumulou".to_string()),
        ]);
        assert_eq!(detect_signal(&[row], &mega()), Signal::JACKPOT_CARRIED);
    }

    #[test]
    fn test_soma_muito_baixa_sugere_correcao() {
        // Universo 60, jogo de 6: esperado 180, tolerância de 40% = 72.
        let rows = make_test_rows(&[&[1, 2, 3, 4, 9, 11]]);
        let signal = detect_signal(&rows, &mega());
        assert_eq!(signal, Signal::LIKELY_CORRECTION);
        assert_eq!(signal.kind, SignalKind::Actionable);
    }

    #[test]
    fn test_soma_muito_alta_sugere_correcao() {
        let rows = make_test_rows(&[&[55, 56, 57, 58, 59, 60]]);
        assert_eq!(detect_signal(&rows, &mega()), Signal::LIKELY_CORRECTION);
    }

    #[test]
    fn test_desvio_exatamente_no_limite_ainda_e_neutro() {
        // Soma 252 = 180 + 72: o limite é estrito.
        let rows = make_test_rows(&[&[32, 40, 42, 44, 46, 48]]);
        assert_eq!(detect_signal(&rows, &mega()), Signal::NEUTRAL);
    }

    #[test]
    fn test_soma_tipica_e_neutra() {
        let rows = make_test_rows(&[&[20, 25, 30, 32, 35, 38]]);
        let signal = detect_signal(&rows, &mega());
        assert_eq!(signal, Signal::NEUTRAL);
        assert_eq!(signal.kind, SignalKind::Neutral);
        assert_eq!(signal.label, "Neutral");
    }

    #[test]
    fn test_so_o_concurso_mais_recente_conta() {
        // O acumulado antigo (linha 1) não muda o sinal da linha 0.
        let antigo = make_test_row(&[1, 2, 3, 4, 9, 11], "ACUMULOU");
        let recente = make_test_row(&[20, 25, 30, 32, 35, 38], "3 ganhadores");
        assert_eq!(detect_signal(&[recente, antigo], &mega()), Signal::NEUTRAL);
    }
}
