//! Motores de palpite.
//!
//! O motor genérico serve qualquer loteria; Mega-Sena e Lotofácil têm
//! regras estruturais próprias e sobrescrevem só a geração. A fábrica
//! escolhe o motor pelo nome da loteria.

pub mod lotofacil;
pub mod mega_sena;

use rand::rngs::StdRng;

use crate::row::RawDraw;
use crate::signal::{self, Signal};
use crate::stats::{self, FrequencyStats};
use crate::strategy::{self, Candidate, Strategy};
use crate::variant::{VariantConfig, normalize_name};

/// Contrato de um motor. As implementações padrão cobrem o comportamento
/// genérico; `draws[0]` é sempre o concurso mais recente.
pub trait Engine: Send + Sync {
    fn name(&self) -> &str;

    fn compute_stats(&self, draws: &[RawDraw], config: &VariantConfig) -> FrequencyStats {
        stats::compute_stats(draws, config)
    }

    fn detect_signal(&self, draws: &[RawDraw], config: &VariantConfig) -> Signal {
        signal::detect_signal(draws, config)
    }

    fn generate(
        &self,
        draws: &[RawDraw],
        config: &VariantConfig,
        strategy: Strategy,
        rng: &mut StdRng,
    ) -> Candidate {
        let stats = self.compute_stats(draws, config);
        strategy::generate(&stats, config, strategy, rng)
    }
}

/// Motor sem regra estrutural própria.
pub struct GenericEngine {
    label: &'static str,
}

impl GenericEngine {
    pub fn new() -> Self {
        Self { label: "Genérico" }
    }

    /// Mesmo comportamento, nome próprio no painel.
    pub fn named(label: &'static str) -> Self {
        Self { label }
    }
}

impl Default for GenericEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for GenericEngine {
    fn name(&self) -> &str {
        self.label
    }
}

struct Registration {
    keywords: &'static [&'static str],
    engine: Box<dyn Engine>,
}

/// Fábrica de motores. O casamento é por palavras-chave no nome
/// normalizado (minúsculas, sem acento); a primeira entrada que casa
/// vence, e nome nenhum fica sem motor: sobra sempre o genérico.
pub struct EngineRegistry {
    entries: Vec<Registration>,
    fallback: GenericEngine,
}

impl EngineRegistry {
    /// Registro vazio, só com o genérico de reserva.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            fallback: GenericEngine::new(),
        }
    }

    /// As variantes conhecidas, em ordem fixa de prioridade. Quina, Dia de
    /// Sorte e Dupla Sena ainda não têm regra própria e entram como
    /// genéricos nomeados.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(&["mega"], Box::new(mega_sena::MegaSenaEngine));
        registry.register(&["facil"], Box::new(lotofacil::LotofacilEngine));
        registry.register(&["quina"], Box::new(GenericEngine::named("Quina")));
        registry.register(&["dia", "sorte"], Box::new(GenericEngine::named("Dia de Sorte")));
        registry.register(&["dupla"], Box::new(GenericEngine::named("Dupla Sena")));
        registry
    }

    /// Uma entrada casa quando todas as suas palavras-chave aparecem no
    /// nome da loteria.
    pub fn register(&mut self, keywords: &'static [&'static str], engine: Box<dyn Engine>) {
        self.entries.push(Registration { keywords, engine });
    }

    pub fn engine_for(&self, variant_name: &str) -> &dyn Engine {
        let name = normalize_name(variant_name);
        for entry in &self.entries {
            if entry.keywords.iter().all(|k| name.contains(k)) {
                return entry.engine.as_ref();
            }
        }
        &self.fallback
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::make_test_rows;
    use rand::SeedableRng;

    #[test]
    fn test_fabrica_escolhe_pelo_nome() {
        let registry = EngineRegistry::with_defaults();
        assert_eq!(registry.engine_for("Mega-Sena").name(), "Mega-Sena");
        assert_eq!(registry.engine_for("mega sena da virada").name(), "Mega-Sena");
        assert_eq!(registry.engine_for("Lotofácil").name(), "Lotofácil");
        assert_eq!(registry.engine_for("LOTOFACIL").name(), "Lotofácil");
        assert_eq!(registry.engine_for("Quina").name(), "Quina");
        assert_eq!(registry.engine_for("Dia de Sorte").name(), "Dia de Sorte");
        assert_eq!(registry.engine_for("Dupla Sena").name(), "Dupla Sena");
    }

    #[test]
    fn test_nome_desconhecido_cai_no_generico() {
        let registry = EngineRegistry::with_defaults();
        assert_eq!(registry.engine_for("Timemania").name(), "Genérico");
        assert_eq!(registry.engine_for("").name(), "Genérico");
        // "dia" sozinho não basta para o Dia de Sorte.
        assert_eq!(registry.engine_for("dia").name(), "Genérico");
    }

    #[test]
    fn test_primeira_entrada_vence() {
        let registry = EngineRegistry::with_defaults();
        assert_eq!(registry.engine_for("mega dupla especial").name(), "Mega-Sena");
    }

    #[test]
    fn test_registro_proprio_sem_tocar_nos_demais() {
        let mut registry = EngineRegistry::with_defaults();
        registry.register(&["teste"], Box::new(GenericEngine::named("Motor de Teste")));
        assert_eq!(registry.engine_for("Loteria Teste").name(), "Motor de Teste");
        assert_eq!(registry.engine_for("Mega-Sena").name(), "Mega-Sena");
    }

    #[test]
    fn test_motor_generico_gera_jogo_valido() {
        let config = VariantConfig::new("Quina", 80, 5);
        let rows = make_test_rows(&[&[3, 17, 42, 65, 78], &[3, 20, 42, 51, 78]]);
        let engine = GenericEngine::new();
        let mut rng = StdRng::seed_from_u64(11);

        for strategy in Strategy::all() {
            let candidate = engine.generate(&rows, &config, strategy, &mut rng);
            assert_eq!(candidate.numbers.len(), 5);
            assert!(candidate.numbers.windows(2).all(|w| w[0] < w[1]));
            assert!(candidate.numbers.iter().all(|&n| n >= 1 && n <= 80));
        }

        // Sem histórico também funciona (universo inteiro).
        let candidate = engine.generate(&[], &config, Strategy::Master, &mut rng);
        assert_eq!(candidate.numbers.len(), 5);
    }

    #[test]
    fn test_metodos_padrao_delegam() {
        let config = VariantConfig::new("Quina", 80, 5);
        let rows = make_test_rows(&[&[3, 17, 42, 65, 78]]);
        let engine = GenericEngine::new();

        let stats = engine.compute_stats(&rows, &config);
        assert_eq!(stats.counts.len(), 80);
        assert_eq!(stats.count_of(42), 1);

        let signal = engine.detect_signal(&[], &config);
        assert_eq!(signal, Signal::NO_DATA);
    }
}
