use jackpot_db::models::{Draw, NumberSet, Pool, Ticket};
use rand::Rng;
use tracing::{info, warn};

use crate::conditions::Conditions;
use crate::config::SamplerConfig;
use crate::error::{Result, SamplerError};
use crate::filter::filter_draws;
use crate::frequency::accumulate;
use crate::prng::Mulberry32;
use crate::sampler::sample_weighted;
use crate::seed::date_seed;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Grille biaisée par l'historique, reproductible pour une même graine.
    Historical {
        seed: u32,
        draws_used: usize,
        fallback: bool,
    },
    /// Tirage uniforme non déterministe.
    Random { reason: Option<SamplerError> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub ticket: Ticket,
    pub source: Source,
}

/// Grille uniforme : 5 numéros parmi 50, 2 parmi 12.
pub fn random_ticket<R: Rng + ?Sized>(rng: &mut R) -> Ticket {
    fn pick<R: Rng + ?Sized>(rng: &mut R, pool: Pool) -> NumberSet {
        rand::seq::index::sample(rng, pool.size(), pool.pick_count())
            .into_iter()
            .map(|i| pool.min() + i as u8)
            .collect()
    }
    let main = pick(rng, Pool::Main);
    let euro = pick(rng, Pool::Euro);
    Ticket { main, euro }
}

pub fn random_generation() -> Generation {
    Generation {
        ticket: random_ticket(&mut rand::rng()),
        source: Source::Random { reason: None },
    }
}

pub struct Generator<'a> {
    corpus: &'a [Draw],
    config: SamplerConfig,
}

impl<'a> Generator<'a> {
    pub fn new(corpus: &'a [Draw], config: SamplerConfig) -> Self {
        Self { corpus, config }
    }

    /// Chemin historique complet : filtre, fréquences, graine, tirage pondéré.
    pub fn historical(&self, conditions: &Conditions) -> Result<Generation> {
        let selection = filter_draws(self.corpus, conditions, &self.config)?;

        let main_freq = accumulate(selection.draws.iter().copied(), Pool::Main);
        let euro_freq = accumulate(selection.draws.iter().copied(), Pool::Euro);

        let seed = date_seed(&conditions.date)?;
        let mut rng = Mulberry32::new(seed);

        let main = sample_weighted(&main_freq, Pool::Main.pick_count(), &mut rng, self.config.max_attempts)?;
        let euro = sample_weighted(&euro_freq, Pool::Euro.pick_count(), &mut rng, self.config.max_attempts)?;

        Ok(Generation {
            ticket: Ticket { main, euro },
            source: Source::Historical {
                seed,
                draws_used: selection.draws.len(),
                fallback: selection.fallback,
            },
        })
    }

    /// N'échoue jamais : toute erreur du chemin historique mène au tirage uniforme.
    pub fn generate(&self, conditions: Option<&Conditions>) -> Generation {
        let Some(conditions) = conditions else {
            return random_generation();
        };

        match self.historical(conditions) {
            Ok(generation) => {
                if let Source::Historical { seed, draws_used, fallback } = &generation.source {
                    info!(seed, draws_used, fallback, date = %conditions.date, "grille historique générée");
                }
                generation
            }
            Err(e) => {
                warn!("Génération historique impossible ({e}), tirage aléatoire");
                Generation {
                    ticket: random_ticket(&mut rand::rng()),
                    source: Source::Random { reason: Some(e) },
                }
            }
        }
    }
}

/// Raccourci avec la configuration par défaut.
pub fn generate(corpus: &[Draw], conditions: Option<&Conditions>) -> Ticket {
    Generator::new(corpus, SamplerConfig::default())
        .generate(conditions)
        .ticket
}
