use std::path::Path;

use serde::{Deserialize, Serialize};

/// Ordre chronologique du corpus tel que livré par la source de données.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Écart toléré (minutes) autour de la durée du jour demandée.
    pub daylight_tolerance: i32,
    /// Nombre de tirages récents utilisés quand aucun tirage ne correspond aux conditions.
    pub fallback_window: usize,
    /// Tirages maximum par grille avant d'abandonner le pool pondéré.
    pub max_attempts: usize,
    pub corpus_order: CorpusOrder,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            daylight_tolerance: 60,
            fallback_window: 100,
            max_attempts: 10_000,
            corpus_order: CorpusOrder::NewestFirst,
        }
    }
}

pub fn save_config(config: &SamplerConfig, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_config(path: &Path) -> anyhow::Result<SamplerConfig> {
    let json = std::fs::read_to_string(path)?;
    let config: SamplerConfig = serde_json::from_str(&json)?;
    Ok(config)
}
