//! Acesso ao SQLite local.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::{Connection, params};

use crate::models::{PredictionRecord, StoredDraw, pack_cells, pack_numbers, split_cells, unpack_numbers};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    lottery         TEXT NOT NULL,
    contest         INTEGER NOT NULL,
    date            TEXT NOT NULL DEFAULT '',
    numbers         TEXT NOT NULL,
    status          TEXT NOT NULL DEFAULT '',
    estimated_prize TEXT NOT NULL DEFAULT '',
    PRIMARY KEY (lottery, contest)
);

CREATE TABLE IF NOT EXISTS predictions (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    lottery        TEXT NOT NULL,
    target_contest INTEGER NOT NULL,
    strategy       TEXT NOT NULL,
    numbers        TEXT NOT NULL,
    created_at     TEXT NOT NULL
);
";

/// Caminho padrão do banco: ./data/palpiteiro.db
pub fn db_path() -> PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("palpiteiro.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Não foi possível criar o diretório {:?}", parent))?;
    }
    Connection::open(path).with_context(|| format!("Não foi possível abrir o banco {:?}", path))
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).context("Falha ao criar as tabelas")?;
    Ok(())
}

/// Insere um concurso. Devolve false se (loteria, concurso) já existia.
pub fn insert_draw(conn: &Connection, draw: &StoredDraw) -> Result<bool> {
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO draws (lottery, contest, date, numbers, status, estimated_prize)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                draw.lottery,
                draw.contest,
                draw.date,
                pack_cells(&draw.numbers),
                draw.status,
                draw.estimated_prize,
            ],
        )
        .context("Falha ao inserir o concurso")?;
    Ok(changed > 0)
}

fn read_draw(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredDraw> {
    Ok(StoredDraw {
        lottery: row.get(0)?,
        contest: row.get(1)?,
        date: row.get(2)?,
        numbers: split_cells(&row.get::<_, String>(3)?),
        status: row.get(4)?,
        estimated_prize: row.get(5)?,
    })
}

/// Últimos concursos de uma loteria, do mais recente para o mais antigo.
pub fn fetch_last_draws(conn: &Connection, lottery: &str, limit: u32) -> Result<Vec<StoredDraw>> {
    let mut stmt = conn.prepare(
        "SELECT lottery, contest, date, numbers, status, estimated_prize
         FROM draws WHERE lottery = ?1
         ORDER BY contest DESC LIMIT ?2",
    )?;
    let draws = stmt
        .query_map(params![lottery, limit], read_draw)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Falha ao ler os concursos")?;
    Ok(draws)
}

pub fn fetch_draw(conn: &Connection, lottery: &str, contest: i64) -> Result<Option<StoredDraw>> {
    let mut stmt = conn.prepare(
        "SELECT lottery, contest, date, numbers, status, estimated_prize
         FROM draws WHERE lottery = ?1 AND contest = ?2",
    )?;
    let mut rows = stmt.query_map(params![lottery, contest], read_draw)?;
    match rows.next() {
        Some(draw) => Ok(Some(draw.context("Falha ao ler o concurso")?)),
        None => Ok(None),
    }
}

pub fn count_draws(conn: &Connection, lottery: &str) -> Result<u32> {
    let count = conn
        .query_row("SELECT COUNT(*) FROM draws WHERE lottery = ?1", [lottery], |row| row.get(0))
        .context("Falha ao contar os concursos")?;
    Ok(count)
}

/// Número do concurso mais recente, ou None com a base vazia.
pub fn latest_contest(conn: &Connection, lottery: &str) -> Result<Option<i64>> {
    let latest = conn
        .query_row("SELECT MAX(contest) FROM draws WHERE lottery = ?1", [lottery], |row| {
            row.get::<_, Option<i64>>(0)
        })
        .context("Falha ao buscar o concurso mais recente")?;
    Ok(latest)
}

/// Grava um palpite e devolve o identificador gerado.
pub fn insert_prediction(
    conn: &Connection,
    lottery: &str,
    target_contest: i64,
    strategy: &str,
    numbers: &[u8],
) -> Result<i64> {
    let created_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    conn.execute(
        "INSERT INTO predictions (lottery, target_contest, strategy, numbers, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![lottery, target_contest, strategy, pack_numbers(numbers), created_at],
    )
    .context("Falha ao gravar o palpite")?;
    Ok(conn.last_insert_rowid())
}

fn read_prediction(row: &rusqlite::Row<'_>) -> rusqlite::Result<PredictionRecord> {
    Ok(PredictionRecord {
        id: row.get(0)?,
        lottery: row.get(1)?,
        target_contest: row.get(2)?,
        strategy: row.get(3)?,
        numbers: unpack_numbers(&row.get::<_, String>(4)?),
        created_at: row.get(5)?,
    })
}

/// Palpites mais recentes de uma loteria.
pub fn fetch_predictions(conn: &Connection, lottery: &str, limit: u32) -> Result<Vec<PredictionRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, lottery, target_contest, strategy, numbers, created_at
         FROM predictions WHERE lottery = ?1
         ORDER BY id DESC LIMIT ?2",
    )?;
    let records = stmt
        .query_map(params![lottery, limit], read_prediction)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Falha ao ler os palpites")?;
    Ok(records)
}

/// Palpites gravados para um concurso específico, na ordem de gravação.
pub fn fetch_predictions_for_contest(
    conn: &Connection,
    lottery: &str,
    contest: i64,
) -> Result<Vec<PredictionRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, lottery, target_contest, strategy, numbers, created_at
         FROM predictions WHERE lottery = ?1 AND target_contest = ?2
         ORDER BY id",
    )?;
    let records = stmt
        .query_map(params![lottery, contest], read_prediction)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Falha ao ler os palpites do concurso")?;
    Ok(records)
}

/// Apaga um palpite. Devolve false se o identificador não existia.
pub fn delete_prediction(conn: &Connection, id: i64) -> Result<bool> {
    let changed = conn
        .execute("DELETE FROM predictions WHERE id = ?1", [id])
        .context("Falha ao apagar o palpite")?;
    Ok(changed > 0)
}
