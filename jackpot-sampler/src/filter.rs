use jackpot_db::models::Draw;
use tracing::debug;

use crate::conditions::Conditions;
use crate::config::{CorpusOrder, SamplerConfig};
use crate::error::{Result, SamplerError};

#[derive(Debug, Clone, PartialEq)]
pub struct DrawSelection<'a> {
    pub draws: Vec<&'a Draw>,
    /// Vrai si aucun tirage ne correspondait et que les plus récents ont été repris.
    pub fallback: bool,
}

fn weather_matches(draw: &Draw, wanted: &str) -> bool {
    draw.weather
        .as_deref()
        .is_some_and(|w| w.to_lowercase() == wanted.to_lowercase())
}

fn daylight_matches(draw: &Draw, target: i32, tolerance: i32) -> bool {
    draw.daylight_minutes
        .is_some_and(|d| d.abs_diff(target) <= tolerance.unsigned_abs())
}

/// Tirages correspondant aux conditions, sans repli.
pub fn matching_draws<'a>(corpus: &'a [Draw], conditions: &Conditions, config: &SamplerConfig) -> Vec<&'a Draw> {
    let weather = conditions.weather.as_deref().filter(|w| !w.is_empty());

    corpus
        .iter()
        .filter(|draw| weather.is_none_or(|w| weather_matches(draw, w)))
        .filter(|draw| {
            conditions
                .daylight_minutes
                .is_none_or(|target| daylight_matches(draw, target, config.daylight_tolerance))
        })
        .collect()
}

/// Les `window` tirages les plus récents, dans l'ordre du corpus.
pub fn most_recent<'a>(corpus: &'a [Draw], window: usize, order: CorpusOrder) -> Vec<&'a Draw> {
    let n = window.min(corpus.len());
    let recent = match order {
        CorpusOrder::NewestFirst => &corpus[..n],
        CorpusOrder::OldestFirst => &corpus[corpus.len() - n..],
    };
    recent.iter().collect()
}

/// Météo (insensible à la casse), puis durée du jour ± tolérance, puis repli sur les tirages récents.
pub fn filter_draws<'a>(
    corpus: &'a [Draw],
    conditions: &Conditions,
    config: &SamplerConfig,
) -> Result<DrawSelection<'a>> {
    if corpus.is_empty() {
        return Err(SamplerError::NoHistoricalData);
    }

    let matched = matching_draws(corpus, conditions, config);
    if !matched.is_empty() {
        debug!(matched = matched.len(), corpus = corpus.len(), "tirages correspondant aux conditions");
        return Ok(DrawSelection {
            draws: matched,
            fallback: false,
        });
    }

    let recent = most_recent(corpus, config.fallback_window, config.corpus_order);
    if recent.is_empty() {
        return Err(SamplerError::NoHistoricalData);
    }
    debug!(recent = recent.len(), "aucun tirage correspondant, repli sur les plus récents");
    Ok(DrawSelection {
        draws: recent,
        fallback: true,
    })
}
