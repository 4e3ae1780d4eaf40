use anyhow::{Context, Result};
use jackpot_db::rusqlite::Connection;
use std::path::Path;
use tracing::warn;

use jackpot_db::dataset::load_dataset;
use jackpot_db::db::insert_draw;

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

pub fn import_dataset(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let dataset = load_dataset(path)?;

    let tx = conn.unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult {
        total_records: dataset.draws.len() as u32 + dataset.rejected,
        inserted: 0,
        skipped: 0,
        errors: dataset.rejected,
    };

    for draw in &dataset.draws {
        match insert_draw(&tx, draw) {
            Ok(true) => result.inserted += 1,
            Ok(false) => result.skipped += 1,
            Err(e) => {
                warn!("Erreur insertion tirage du {}: {:#}", draw.date, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    Ok(result)
}
