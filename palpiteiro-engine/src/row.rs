//! Linhas cruas do histórico de concursos.
//!
//! O motor recebe os concursos exatamente como saem da planilha da Caixa:
//! pares (coluna, texto), sem nenhuma interpretação prévia. Toda a leitura
//! tolerante acontece aqui.

/// Colunas candidatas ao texto de status/premiação, na ordem de busca.
pub const STATUS_COLUMNS: [&str; 2] = ["Status / Premiação", "Status"];

/// Coluna do identificador sequencial do concurso.
pub const CONTEST_COLUMN: &str = "Concurso";

/// Um concurso cru: células na ordem original das colunas.
#[derive(Debug, Clone, Default)]
pub struct RawDraw {
    columns: Vec<(String, String)>,
}

impl RawDraw {
    pub fn new(columns: Vec<(String, String)>) -> Self {
        Self { columns }
    }

    /// Valor da primeira coluna com esse nome exato.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(col, value)| (col.as_str(), value.as_str()))
    }

    /// Texto de status da linha. Linha sem coluna de status vale "".
    pub fn status_text(&self) -> &str {
        STATUS_COLUMNS
            .iter()
            .find_map(|col| self.get(col))
            .unwrap_or("")
    }

    pub fn contest_text(&self) -> &str {
        self.get(CONTEST_COLUMN).unwrap_or("")
    }
}

/// Conversão tolerante de célula para dezena. Aceita inteiros e números
/// com vírgula ou ponto decimal de parte fracionária nula ("7", " 07 ",
/// "7,0"). Qualquer outra coisa vira `None`, nunca erro.
pub fn parse_cell(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<u8>() {
        return Some(n);
    }
    let value: f64 = trimmed.replace(',', ".").parse().ok()?;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u8::MAX) {
        return None;
    }
    Some(value as u8)
}

/// Monta linhas sintéticas com colunas Concurso/Data/D1..Dn, uma por jogo,
/// da mais recente para a mais antiga. Útil nos testes de todo o workspace.
pub fn make_test_rows(games: &[&[u8]]) -> Vec<RawDraw> {
    games
        .iter()
        .enumerate()
        .map(|(i, numbers)| {
            let mut columns = vec![
                (CONTEST_COLUMN.to_string(), (games.len() - i).to_string()),
                ("Data".to_string(), format!("2024-01-{:02}", (i % 28) + 1)),
            ];
            for (j, n) in numbers.iter().enumerate() {
                columns.push((format!("D{}", j + 1), n.to_string()));
            }
            RawDraw::new(columns)
        })
        .collect()
}

/// Linha única com status explícito, para testes de sinal.
pub fn make_test_row(numbers: &[u8], status: &str) -> RawDraw {
    let mut columns = vec![
        (CONTEST_COLUMN.to_string(), "1".to_string()),
        ("Data".to_string(), "2024-01-01".to_string()),
    ];
    for (j, n) in numbers.iter().enumerate() {
        columns.push((format!("D{}", j + 1), n.to_string()));
    }
    columns.push((STATUS_COLUMNS[0].to_string(), status.to_string()));
    RawDraw::new(columns)
}
