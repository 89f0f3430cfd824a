//! Catálogo de loterias ativas.
//!
//! Sem arquivo de configuração vale o catálogo embutido; com `--config`,
//! o JSON externo substitui tudo e é validado na carga.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use palpiteiro_engine::variant::{VariantConfig, normalize_name};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub lotteries: Vec<VariantConfig>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            lotteries: VariantConfig::builtin(),
        }
    }

    /// Busca por nome normalizado; aceita o nome completo ou um pedaço
    /// dele ("mega" encontra "Mega-Sena").
    pub fn find(&self, name: &str) -> Result<&VariantConfig> {
        let wanted = normalize_name(name.trim());
        if wanted.is_empty() {
            bail!("Nome de loteria vazio");
        }
        self.lotteries
            .iter()
            .find(|config| normalize_name(&config.name).contains(&wanted))
            .with_context(|| {
                format!(
                    "Loteria desconhecida: '{}'. Configuradas: {}",
                    name,
                    self.names().join(", ")
                )
            })
    }

    pub fn names(&self) -> Vec<String> {
        self.lotteries.iter().map(|c| c.name.clone()).collect()
    }
}

pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let catalog = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Não foi possível ler {:?}", path))?;
            serde_json::from_str::<Catalog>(&json)
                .with_context(|| format!("Catálogo inválido em {:?}", path))?
        }
        None => Catalog::builtin(),
    };

    if catalog.lotteries.is_empty() {
        bail!("Catálogo sem nenhuma loteria");
    }
    for config in &catalog.lotteries {
        config.validate()?;
    }
    Ok(catalog)
}
