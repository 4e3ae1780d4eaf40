use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::models::{validate_draw, Draw};

#[derive(Debug, Deserialize)]
struct RawWeather {
    condition: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    date: String,
    numbers: Vec<u8>,
    euro_numbers: Vec<u8>,
    weather: Option<RawWeather>,
    daylight_minutes: Option<i32>,
}

/// Résultat de lecture d'un fichier de tirages enrichis (météo, durée du jour).
#[derive(Debug, Default)]
pub struct Dataset {
    /// Tirages dans l'ordre du fichier.
    pub draws: Vec<Draw>,
    pub rejected: u32,
}

fn to_draw(raw: RawRecord) -> Result<Draw> {
    let main: [u8; 5] = raw
        .numbers
        .as_slice()
        .try_into()
        .with_context(|| format!("{}: 5 numéros attendus, {} reçus", raw.date, raw.numbers.len()))?;
    let euro: [u8; 2] = raw
        .euro_numbers
        .as_slice()
        .try_into()
        .with_context(|| format!("{}: 2 numéros Euro attendus, {} reçus", raw.date, raw.euro_numbers.len()))?;
    validate_draw(&main, &euro).with_context(|| format!("Tirage du {} invalide", raw.date))?;
    if raw.date.trim().is_empty() {
        bail!("Date manquante");
    }

    Ok(Draw {
        date: raw.date,
        main,
        euro,
        weather: raw.weather.and_then(|w| w.condition),
        daylight_minutes: raw.daylight_minutes,
    })
}

pub fn parse_dataset(json: &str) -> Result<Dataset> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(json).context("Le fichier de tirages doit être un tableau JSON")?;

    let mut dataset = Dataset::default();
    for (i, value) in records.into_iter().enumerate() {
        let parsed = serde_json::from_value::<RawRecord>(value)
            .map_err(anyhow::Error::from)
            .and_then(to_draw);
        match parsed {
            Ok(draw) => dataset.draws.push(draw),
            Err(e) => {
                warn!("Enregistrement {} ignoré : {:#}", i, e);
                dataset.rejected += 1;
            }
        }
    }
    Ok(dataset)
}

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    parse_dataset(&json).with_context(|| format!("Fichier {:?} illisible", path))
}
