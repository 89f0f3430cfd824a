//! Ponte entre o banco e o motor: concursos armazenados viram linhas
//! cruas com a mesma convenção de colunas das planilhas da Caixa.

use palpiteiro_db::models::StoredDraw;
use palpiteiro_engine::row::{CONTEST_COLUMN, RawDraw, STATUS_COLUMNS};
use palpiteiro_engine::variant::VariantConfig;

pub fn raw_row(draw: &StoredDraw, config: &VariantConfig) -> RawDraw {
    let mut columns = vec![
        (CONTEST_COLUMN.to_string(), draw.contest.to_string()),
        ("Data".to_string(), draw.date.clone()),
    ];
    for (i, cell) in draw.numbers.iter().enumerate() {
        columns.push((format!("{}{}", config.ball_prefix, i + 1), cell.clone()));
    }
    columns.push((STATUS_COLUMNS[0].to_string(), draw.status.clone()));
    columns.push(("Estimativa de Prêmio".to_string(), draw.estimated_prize.clone()));
    RawDraw::new(columns)
}

/// Mantém a ordem recebida: o chamador busca do mais recente para o mais
/// antigo e o motor espera exatamente isso.
pub fn raw_rows(draws: &[StoredDraw], config: &VariantConfig) -> Vec<RawDraw> {
    draws.iter().map(|draw| raw_row(draw, config)).collect()
}
