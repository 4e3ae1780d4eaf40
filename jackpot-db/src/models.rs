use std::collections::BTreeSet;

use anyhow::{bail, Context, Result};

/// Un tirage historique. Les numéros sont stockés dans l'ordre publié.
#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    pub date: String,
    pub main: [u8; 5],
    pub euro: [u8; 2],
    pub weather: Option<String>,
    pub daylight_minutes: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Main,
    Euro,
}

impl Pool {
    pub fn min(&self) -> u8 {
        1
    }

    pub fn max(&self) -> u8 {
        match self {
            Pool::Main => 50,
            Pool::Euro => 12,
        }
    }

    pub fn size(&self) -> usize {
        (self.max() - self.min() + 1) as usize
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Pool::Main => 5,
            Pool::Euro => 2,
        }
    }

    pub fn numbers_from<'a>(&self, draw: &'a Draw) -> &'a [u8] {
        match self {
            Pool::Main => &draw.main,
            Pool::Euro => &draw.euro,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Pool::Main => "Numéros",
            Pool::Euro => "Euro",
        }
    }
}

/// Suite strictement croissante de numéros uniques.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NumberSet(Vec<u8>);

impl NumberSet {
    pub fn from_set(numbers: BTreeSet<u8>) -> Self {
        Self(numbers.into_iter().collect())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, number: u8) -> bool {
        self.0.binary_search(&number).is_ok()
    }
}

impl FromIterator<u8> for NumberSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self::from_set(iter.into_iter().collect())
    }
}

impl std::fmt::Display for NumberSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");
        write!(f, "{joined}")
    }
}

/// Une grille complète : numéros principaux + numéros Euro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub main: NumberSet,
    pub euro: NumberSet,
}

impl Ticket {
    /// Encode la grille pour la page d'affichage : `main=1,2,3,4,5&euro=1,2`.
    pub fn to_query(&self) -> String {
        fn join(set: &NumberSet) -> String {
            set.as_slice()
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(",")
        }
        format!("main={}&euro={}", join(&self.main), join(&self.euro))
    }

    pub fn from_query(query: &str) -> Result<Self> {
        let mut main = None;
        let mut euro = None;

        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let numbers = value
                .split(',')
                .map(|s| s.trim().parse::<u8>())
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("Valeur invalide pour '{}': '{}'", key, value))?;
            match key {
                "main" => main = Some(numbers),
                "euro" => euro = Some(numbers),
                _ => {}
            }
        }

        let (Some(main), Some(euro)) = (main, euro) else {
            bail!("Paramètres 'main' et 'euro' requis");
        };
        validate_numbers(Pool::Main, &main)?;
        validate_numbers(Pool::Euro, &euro)?;

        Ok(Self {
            main: main.into_iter().collect(),
            euro: euro.into_iter().collect(),
        })
    }
}

pub fn validate_numbers(pool: Pool, numbers: &[u8]) -> Result<()> {
    if numbers.len() != pool.pick_count() {
        bail!(
            "{} : {} valeurs attendues, {} reçues",
            pool.label(),
            pool.pick_count(),
            numbers.len()
        );
    }
    for &n in numbers {
        if n < pool.min() || n > pool.max() {
            bail!("{} {} hors limites ({}-{})", pool.label(), n, pool.min(), pool.max());
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("{} en double : {}", pool.label(), numbers[i]);
            }
        }
    }
    Ok(())
}

pub fn validate_draw(main: &[u8; 5], euro: &[u8; 2]) -> Result<()> {
    validate_numbers(Pool::Main, main)?;
    validate_numbers(Pool::Euro, euro)
}
