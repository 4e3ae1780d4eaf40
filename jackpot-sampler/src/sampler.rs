use std::collections::BTreeSet;

use jackpot_db::models::NumberSet;
use rand::RngCore;
use tracing::warn;

use crate::error::{Result, SamplerError};
use crate::frequency::FrequencyTable;
use crate::prng::unit_f64;

/// Multiensemble où chaque numéro apparaît `occurrences + 1` fois.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedPool {
    entries: Vec<u8>,
}

impl WeightedPool {
    pub fn from_table(table: &FrequencyTable) -> Self {
        let mut entries = Vec::with_capacity(table.total() as usize + table.len());
        for (number, count) in table.iter() {
            entries.extend(std::iter::repeat_n(number, count as usize + 1));
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn weight(&self, number: u8) -> usize {
        self.entries.iter().filter(|&&n| n == number).count()
    }

    pub fn pick<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<u8> {
        if self.entries.is_empty() {
            return Err(SamplerError::EmptyWeightedPool);
        }
        let idx = (unit_f64(rng) * self.entries.len() as f64) as usize;
        Ok(self.entries[idx.min(self.entries.len() - 1)])
    }
}

fn check_count(count: usize, min: u8, max: u8) -> Result<()> {
    let domain = if max >= min { (max - min) as usize + 1 } else { 0 };
    if count > domain {
        return Err(SamplerError::CountExceedsDomain { count, min, max });
    }
    Ok(())
}

/// `count` numéros uniques tirés uniformément dans [min, max].
pub fn sample_uniform<R: RngCore + ?Sized>(
    min: u8,
    max: u8,
    count: usize,
    rng: &mut R,
    max_attempts: usize,
) -> Result<NumberSet> {
    check_count(count, min, max)?;
    let span = max.saturating_sub(min) as f64 + 1.0;
    let mut selected = BTreeSet::new();

    for _ in 0..max_attempts {
        if selected.len() == count {
            break;
        }
        selected.insert(min + (unit_f64(rng) * span) as u8);
    }

    if selected.len() < count {
        return Err(SamplerError::RetryLimitExceeded {
            count,
            attempts: max_attempts,
        });
    }
    Ok(NumberSet::from_set(selected))
}

/// Tirage sans remise biaisé par la fréquence historique. Les doublons sont rejetés et retirés.
/// Repli sur un tirage uniforme du domaine, avec le même générateur, si `max_attempts` tirages
/// ne suffisent pas. Le pool n'est jamais vide une fois `count` validé ; la branche
/// `EmptyWeightedPool` reste pour les tables construites à la main.
pub fn sample_weighted<R: RngCore + ?Sized>(
    table: &FrequencyTable,
    count: usize,
    rng: &mut R,
    max_attempts: usize,
) -> Result<NumberSet> {
    check_count(count, table.min(), table.max())?;
    let pool = WeightedPool::from_table(table);
    let mut selected = BTreeSet::new();

    for _ in 0..max_attempts {
        if selected.len() == count {
            return Ok(NumberSet::from_set(selected));
        }
        match pool.pick(rng) {
            Ok(number) => {
                selected.insert(number);
            }
            Err(e) => {
                warn!("{e}, tirage uniforme sur {}-{}", table.min(), table.max());
                return sample_uniform(table.min(), table.max(), count, rng, max_attempts);
            }
        }
    }

    if selected.len() == count {
        return Ok(NumberSet::from_set(selected));
    }
    warn!(
        count,
        attempts = max_attempts,
        "limite de tirages atteinte, tirage uniforme sur {}-{}",
        table.min(),
        table.max()
    );
    sample_uniform(table.min(), table.max(), count, rng, max_attempts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::Mulberry32;

    fn table_with(min: u8, max: u8, hits: &[u8]) -> FrequencyTable {
        let mut table = FrequencyTable::new(min, max);
        for &n in hits {
            table.increment(n);
        }
        table
    }

    fn assert_valid(set: &NumberSet, count: usize, min: u8, max: u8) {
        let v = set.as_slice();
        assert_eq!(v.len(), count);
        assert!(v.windows(2).all(|w| w[0] < w[1]), "non strictement croissant : {v:?}");
        assert!(v.iter().all(|&n| n >= min && n <= max), "hors domaine : {v:?}");
    }

    #[test]
    fn test_pool_length_is_sum_of_weights() {
        let table = table_with(1, 50, &[1, 2, 3, 4, 5, 1, 7]);
        let pool = WeightedPool::from_table(&table);
        let expected: usize = table.iter().map(|(_, c)| c as usize + 1).sum();
        assert_eq!(pool.len(), expected);
        assert_eq!(pool.len(), 57);
        assert_eq!(pool.weight(1), 3);
        assert_eq!(pool.weight(2), 2);
        assert_eq!(pool.weight(50), 1);
    }

    #[test]
    fn test_empty_pool_pick_errors() {
        let pool = WeightedPool::from_table(&FrequencyTable::new(5, 1));
        assert!(pool.is_empty());
        let mut rng = Mulberry32::new(1);
        assert_eq!(pool.pick(&mut rng), Err(SamplerError::EmptyWeightedPool));
    }

    #[test]
    fn test_known_weighted_sample() {
        let main = table_with(1, 50, &[1, 2, 3, 4, 5]);
        let euro = table_with(1, 12, &[1, 2]);
        let mut rng = Mulberry32::new(2033);

        let main_set = sample_weighted(&main, 5, &mut rng, 10_000).unwrap();
        let euro_set = sample_weighted(&euro, 2, &mut rng, 10_000).unwrap();
        assert_eq!(main_set.as_slice(), &[4, 13, 14, 25, 47]);
        assert_eq!(euro_set.as_slice(), &[1, 3]);
    }

    #[test]
    fn test_known_unweighted_sample() {
        let table = FrequencyTable::new(1, 50);
        let mut rng = Mulberry32::new(2044);
        let set = sample_weighted(&table, 5, &mut rng, 10_000).unwrap();
        assert_eq!(set.as_slice(), &[9, 10, 14, 15, 32]);
    }

    #[test]
    fn test_sample_properties_across_seeds() {
        let main = table_with(1, 50, &[7, 7, 7, 7, 7, 7, 7, 7, 13, 21]);
        let euro = table_with(1, 12, &[3, 3, 3]);
        for seed in 0..500u32 {
            let mut rng = Mulberry32::new(seed);
            assert_valid(&sample_weighted(&main, 5, &mut rng, 10_000).unwrap(), 5, 1, 50);
            assert_valid(&sample_weighted(&euro, 2, &mut rng, 10_000).unwrap(), 2, 1, 12);
        }
    }

    #[test]
    fn test_full_domain_sample() {
        let table = FrequencyTable::new(1, 12);
        let mut rng = Mulberry32::new(99);
        let set = sample_weighted(&table, 12, &mut rng, 10_000).unwrap();
        assert_eq!(set.as_slice(), &(1..=12).collect::<Vec<u8>>()[..]);
    }

    #[test]
    fn test_heavy_weight_dominates() {
        let hits = vec![42u8; 1000];
        let table = table_with(1, 50, &hits);
        let mut chosen = 0;
        for seed in 0..200u32 {
            let mut rng = Mulberry32::new(seed);
            if sample_weighted(&table, 1, &mut rng, 10_000).unwrap().contains(42) {
                chosen += 1;
            }
        }
        assert!(chosen > 160, "42 choisi seulement {chosen} fois sur 200");
    }

    #[test]
    fn test_count_exceeds_domain() {
        let table = FrequencyTable::new(1, 12);
        let mut rng = Mulberry32::new(1);
        assert_eq!(
            sample_weighted(&table, 13, &mut rng, 10_000),
            Err(SamplerError::CountExceedsDomain { count: 13, min: 1, max: 12 })
        );
    }

    #[test]
    fn test_retry_cap_falls_back_then_errors() {
        let table = FrequencyTable::new(1, 50);
        let mut rng = Mulberry32::new(1);
        assert_eq!(
            sample_weighted(&table, 5, &mut rng, 2),
            Err(SamplerError::RetryLimitExceeded { count: 5, attempts: 2 })
        );
    }

    #[test]
    fn test_uniform_sample() {
        let mut rng = Mulberry32::new(2044);
        let set = sample_uniform(1, 50, 5, &mut rng, 10_000).unwrap();
        assert_valid(&set, 5, 1, 50);

        let mut again = Mulberry32::new(2044);
        assert_eq!(sample_uniform(1, 50, 5, &mut again, 10_000).unwrap(), set);
    }

    #[test]
    fn test_uniform_with_thread_rng() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            assert_valid(&sample_uniform(1, 12, 2, &mut rng, 10_000).unwrap(), 2, 1, 12);
        }
    }
}
