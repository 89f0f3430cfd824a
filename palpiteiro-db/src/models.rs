//! Registros persistidos: concursos crus e palpites gravados.

/// Um concurso como importado: células de dezenas sem interpretação.
/// Quem decide o que é legível é o motor, na hora de usar.
#[derive(Debug, Clone)]
pub struct StoredDraw {
    pub lottery: String,
    pub contest: i64,
    pub date: String,
    pub numbers: Vec<String>,
    pub status: String,
    pub estimated_prize: String,
}

/// Palpite gravado para conferência futura.
#[derive(Debug, Clone)]
pub struct PredictionRecord {
    pub id: i64,
    pub lottery: String,
    pub target_contest: i64,
    pub strategy: String,
    pub numbers: Vec<u8>,
    pub created_at: String,
}

/// Células numa coluna de texto, separadas por espaço. As células vêm de
/// campos de planilha e não carregam espaço interno.
pub fn pack_cells(cells: &[String]) -> String {
    cells.join(" ")
}

pub fn split_cells(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

pub fn pack_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Leitura tolerante: tokens ilegíveis são pulados.
pub fn unpack_numbers(text: &str) -> Vec<u8> {
    text.split_whitespace()
        .filter_map(|token| token.parse().ok())
        .collect()
}
