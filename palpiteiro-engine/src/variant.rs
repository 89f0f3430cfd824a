//! Configuração das loterias.
//!
//! Cada variante é descrita por três números e uma convenção de coluna;
//! nada aqui depende de qual loteria é. A regra de coluna segue o padrão
//! das planilhas da Caixa: dezenas ficam em "D1", "D2", ..., e a coluna
//! "Data" nunca carrega dezena.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::row::{RawDraw, parse_cell};

fn default_ball_prefix() -> String {
    "D".to_string()
}

/// Parâmetros de uma loteria: universo, tamanho do jogo e o prefixo das
/// colunas de dezenas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    pub max_number: u8,
    pub draw_size: usize,
    #[serde(default = "default_ball_prefix")]
    pub ball_prefix: String,
}

impl VariantConfig {
    pub fn new(name: &str, max_number: u8, draw_size: usize) -> Self {
        Self {
            name: name.to_string(),
            max_number,
            draw_size,
            ball_prefix: default_ball_prefix(),
        }
    }

    /// As cinco loterias cobertas por padrão.
    pub fn builtin() -> Vec<VariantConfig> {
        vec![
            VariantConfig::new("Mega-Sena", 60, 6),
            VariantConfig::new("Lotofácil", 25, 15),
            VariantConfig::new("Quina", 80, 5),
            VariantConfig::new("Dia de Sorte", 31, 7),
            VariantConfig::new("Dupla Sena", 50, 6),
        ]
    }

    /// Configuração impossível é erro imediato, nunca degrada em silêncio.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("Loteria sem nome no catálogo");
        }
        if self.draw_size == 0 {
            bail!("{}: tamanho de jogo zero", self.name);
        }
        if (self.max_number as usize) < self.draw_size {
            bail!(
                "{}: universo de {} dezenas não comporta jogos de {}",
                self.name,
                self.max_number,
                self.draw_size
            );
        }
        if self.ball_prefix.is_empty() {
            bail!("{}: prefixo de coluna de dezena vazio", self.name);
        }
        Ok(())
    }

    /// Uma coluna carrega dezena se começa com o prefixo, contém algum
    /// dígito e não é coluna de data.
    pub fn is_ball_column(&self, column: &str) -> bool {
        column.starts_with(&self.ball_prefix)
            && column.chars().any(|c| c.is_ascii_digit())
            && !column.contains("Data")
    }

    /// Dezenas legíveis da linha, na ordem das colunas. Células ilegíveis
    /// ou fora de 1..=max_number são puladas.
    pub fn ball_values(&self, row: &RawDraw) -> Vec<u8> {
        row.columns()
            .filter(|(col, _)| self.is_ball_column(col))
            .filter_map(|(_, value)| parse_cell(value))
            .filter(|&n| n >= 1 && n <= self.max_number)
            .collect()
    }

    /// Todas as dezenas possíveis, 1..=max_number.
    pub fn universe(&self) -> Vec<u8> {
        (1..=self.max_number).collect()
    }

    /// Soma esperada de um jogo sorteado ao acaso.
    pub fn expected_sum(&self) -> f64 {
        self.max_number as f64 * self.draw_size as f64 / 2.0
    }
}

/// Minúsculas sem acento, para casar nomes vindos da linha de comando ou
/// de catálogos externos ("Lotofácil" e "LOTOFACIL" são a mesma loteria).
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}
