//! Importação do histórico em CSV.
//!
//! Os arquivos da Caixa vêm separados por ponto e vírgula, com colunas
//! que variam de loteria para loteria. A importação mapeia o cabeçalho
//! uma vez e guarda as células cruas; linha ruim não derruba o resto.

use std::path::Path;

use anyhow::{Context, Result, bail};

use palpiteiro_db::db::insert_draw;
use palpiteiro_db::models::StoredDraw;
use palpiteiro_db::rusqlite::Connection;
use palpiteiro_engine::row::{CONTEST_COLUMN, STATUS_COLUMNS};
use palpiteiro_engine::variant::{VariantConfig, normalize_name};

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

/// Posições das colunas de interesse no cabeçalho.
struct HeaderMap {
    contest: usize,
    date: Option<usize>,
    balls: Vec<usize>,
    status: Option<usize>,
    estimated_prize: Option<usize>,
}

fn map_header(header: &csv::StringRecord, config: &VariantConfig) -> Result<HeaderMap> {
    let mut contest = None;
    let mut date = None;
    let mut balls = Vec::new();
    let mut status = None;
    let mut estimated_prize = None;

    for (idx, name) in header.iter().enumerate() {
        let name = name.trim();
        if name == CONTEST_COLUMN {
            contest.get_or_insert(idx);
        } else if name == "Data" || name.starts_with("Data ") {
            date.get_or_insert(idx);
        } else if config.is_ball_column(name) {
            balls.push(idx);
        } else if STATUS_COLUMNS.contains(&name) {
            status.get_or_insert(idx);
        } else if normalize_name(name).contains("estimativa") {
            estimated_prize.get_or_insert(idx);
        }
    }

    let contest = contest.context("CSV sem a coluna 'Concurso'")?;
    if balls.is_empty() {
        bail!(
            "CSV sem colunas de dezenas ({}1, {}2, ...)",
            config.ball_prefix,
            config.ball_prefix
        );
    }
    Ok(HeaderMap {
        contest,
        date,
        balls,
        status,
        estimated_prize,
    })
}

fn parse_record(record: &csv::StringRecord, map: &HeaderMap, lottery: &str) -> Result<StoredDraw> {
    let get = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");

    let contest: i64 = get(map.contest)
        .parse()
        .with_context(|| format!("Concurso ilegível: '{}'", get(map.contest)))?;

    Ok(StoredDraw {
        lottery: lottery.to_string(),
        contest,
        date: map.date.map(|idx| normalize_date(get(idx))).unwrap_or_default(),
        numbers: map.balls.iter().map(|&idx| get(idx).to_string()).collect(),
        status: map.status.map(|idx| get(idx).to_string()).unwrap_or_default(),
        estimated_prize: map
            .estimated_prize
            .map(|idx| get(idx).to_string())
            .unwrap_or_default(),
    })
}

/// Datas DD/MM/AAAA viram AAAA-MM-DD, para ordenar como texto; qualquer
/// outro formato fica como está.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() == 3
        && parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    {
        format!("{}-{}-{}", parts[2], parts[1], parts[0])
    } else {
        raw.to_string()
    }
}

pub fn import_csv(conn: &Connection, config: &VariantConfig, path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Não foi possível abrir {:?}", path))?;

    let header = reader.headers().context("CSV sem cabeçalho")?.clone();
    let map = map_header(&header, config)?;

    let tx = conn
        .unchecked_transaction()
        .context("Não foi possível iniciar a transação")?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => match parse_record(&record, &map, &config.name) {
                Ok(draw) => match insert_draw(&tx, &draw) {
                    Ok(true) => result.inserted += 1,
                    Ok(false) => result.skipped += 1,
                    Err(e) => {
                        eprintln!("Erro ao inserir a linha {}: {}", result.total_records, e);
                        result.errors += 1;
                    }
                },
                Err(e) => {
                    eprintln!("Linha {} descartada: {}", result.total_records, e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                eprintln!("Erro de leitura na linha {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Falha ao confirmar a transação")?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mega() -> VariantConfig {
        VariantConfig::new("Mega-Sena", 60, 6)
    }

    fn mega_header() -> csv::StringRecord {
        csv::StringRecord::from(vec![
            "Concurso",
            "Data Sorteio",
            "D1",
            "D2",
            "D3",
            "D4",
            "D5",
            "D6",
            "Arrecadação",
            "Status / Premiação",
            "Estimativa de Prêmio",
        ])
    }

    #[test]
    fn test_mapeamento_do_cabecalho() {
        let map = map_header(&mega_header(), &mega()).unwrap();
        assert_eq!(map.contest, 0);
        assert_eq!(map.date, Some(1));
        assert_eq!(map.balls, vec![2, 3, 4, 5, 6, 7]);
        assert_eq!(map.status, Some(9));
        assert_eq!(map.estimated_prize, Some(10));
    }

    #[test]
    fn test_cabecalho_sem_concurso_e_erro() {
        let header = csv::StringRecord::from(vec!["Data", "D1", "D2"]);
        assert!(map_header(&header, &mega()).is_err());
    }

    #[test]
    fn test_cabecalho_sem_dezenas_e_erro() {
        let header = csv::StringRecord::from(vec!["Concurso", "Data", "Ganhadores"]);
        assert!(map_header(&header, &mega()).is_err());
    }

    #[test]
    fn test_leitura_de_uma_linha() {
        let map = map_header(&mega_header(), &mega()).unwrap();
        let record = csv::StringRecord::from(vec![
            "2700",
            "15/06/2024",
            "04",
            "17",
            "29",
            "38",
            "45",
            "58",
            "R$ 100",
            "ACUMULOU",
            "R$ 50.000.000,00",
        ]);

        let draw = parse_record(&record, &map, "Mega-Sena").unwrap();
        assert_eq!(draw.lottery, "Mega-Sena");
        assert_eq!(draw.contest, 2700);
        assert_eq!(draw.date, "2024-06-15");
        assert_eq!(draw.numbers, vec!["04", "17", "29", "38", "45", "58"]);
        assert_eq!(draw.status, "ACUMULOU");
        assert_eq!(draw.estimated_prize, "R$ 50.000.000,00");
    }

    #[test]
    fn test_linha_sem_concurso_legivel_e_erro() {
        let map = map_header(&mega_header(), &mega()).unwrap();
        let record = csv::StringRecord::from(vec!["???", "15/06/2024", "04", "17", "29", "38", "45", "58"]);
        assert!(parse_record(&record, &map, "Mega-Sena").is_err());
    }

    #[test]
    fn test_linha_curta_guarda_celulas_vazias() {
        // flexible(true): linhas podem ter menos campos que o cabeçalho.
        let map = map_header(&mega_header(), &mega()).unwrap();
        let record = csv::StringRecord::from(vec!["2700", "15/06/2024", "04", "17"]);

        let draw = parse_record(&record, &map, "Mega-Sena").unwrap();
        assert_eq!(draw.numbers, vec!["04", "17", "", "", "", ""]);
        assert_eq!(draw.status, "");
    }

    #[test]
    fn test_normalizacao_de_datas() {
        assert_eq!(normalize_date("15/06/2024"), "2024-06-15");
        assert_eq!(normalize_date(" 01/02/1996 "), "1996-02-01");
        assert_eq!(normalize_date("2024-06-15"), "2024-06-15");
        assert_eq!(normalize_date("junho"), "junho");
        assert_eq!(normalize_date(""), "");
        assert_eq!(normalize_date("15/06"), "15/06");
    }
}
