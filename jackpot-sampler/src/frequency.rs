use jackpot_db::models::{Draw, Pool};

/// Occurrences brutes par numéro sur un domaine [min, max]. Chaque numéro a une entrée.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    min: u8,
    max: u8,
    counts: Vec<u32>,
}

impl FrequencyTable {
    pub fn new(min: u8, max: u8) -> Self {
        let len = if max >= min { (max - min) as usize + 1 } else { 0 };
        Self {
            min,
            max,
            counts: vec![0; len],
        }
    }

    pub fn for_pool(pool: Pool) -> Self {
        Self::new(pool.min(), pool.max())
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    /// Ignore les numéros hors domaine.
    pub fn increment(&mut self, number: u8) {
        if number >= self.min && number <= self.max {
            self.counts[(number - self.min) as usize] += 1;
        }
    }

    pub fn count(&self, number: u8) -> Option<u32> {
        if number < self.min || number > self.max {
            return None;
        }
        self.counts.get((number - self.min) as usize).copied()
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// (numéro, occurrences) par numéro croissant.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(move |(i, &c)| (self.min + i as u8, c))
    }
}

pub fn accumulate<'a, I>(draws: I, pool: Pool) -> FrequencyTable
where
    I: IntoIterator<Item = &'a Draw>,
{
    let mut table = FrequencyTable::for_pool(pool);
    for draw in draws {
        for &n in pool.numbers_from(draw) {
            table.increment(n);
        }
    }
    table
}
