use anyhow::{Context, Result};
use rusqlite::{Connection, Row};
use std::path::{Path, PathBuf};

use crate::models::Draw;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    date              TEXT PRIMARY KEY,
    main_1            INTEGER NOT NULL,
    main_2            INTEGER NOT NULL,
    main_3            INTEGER NOT NULL,
    main_4            INTEGER NOT NULL,
    main_5            INTEGER NOT NULL,
    euro_1            INTEGER NOT NULL,
    euro_2            INTEGER NOT NULL,
    weather           TEXT,
    daylight_minutes  INTEGER
);
";

const SELECT_DRAWS: &str = "
SELECT date, main_1, main_2, main_3, main_4, main_5, euro_1, euro_2, weather, daylight_minutes
FROM draws ORDER BY date DESC";

/// Chemin de la base : `JACKPOT_DB` si défini, sinon `./data/jackpot.db`.
pub fn db_path() -> PathBuf {
    if let Ok(path) = std::env::var("JACKPOT_DB") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("jackpot.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO draws (date, main_1, main_2, main_3, main_4, main_5, euro_1, euro_2, weather, daylight_minutes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        rusqlite::params![
            draw.date,
            draw.main[0],
            draw.main[1],
            draw.main[2],
            draw.main[3],
            draw.main[4],
            draw.euro[0],
            draw.euro[1],
            draw.weather,
            draw.daylight_minutes,
        ],
    ).context("Échec de l'insertion")?;
    Ok(changed > 0)
}

fn row_to_draw(row: &Row<'_>) -> rusqlite::Result<Draw> {
    Ok(Draw {
        date: row.get(0)?,
        main: [
            row.get::<_, u8>(1)?,
            row.get::<_, u8>(2)?,
            row.get::<_, u8>(3)?,
            row.get::<_, u8>(4)?,
            row.get::<_, u8>(5)?,
        ],
        euro: [
            row.get::<_, u8>(6)?,
            row.get::<_, u8>(7)?,
        ],
        weather: row.get(8)?,
        daylight_minutes: row.get(9)?,
    })
}

/// Tous les tirages, du plus récent au plus ancien.
pub fn fetch_draws(conn: &Connection) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(SELECT_DRAWS)?;
    let draws = stmt
        .query_map([], row_to_draw)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(&format!("{SELECT_DRAWS} LIMIT ?1"))?;
    let draws = stmt
        .query_map([limit], row_to_draw)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}
