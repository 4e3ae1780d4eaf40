use crate::error::{Result, SamplerError};

/// Graine = année + mois + jour. Plusieurs dates partagent la même graine.
pub fn date_seed(date: &str) -> Result<u32> {
    let invalid = || SamplerError::InvalidDate(date.to_string());

    let parts: Vec<&str> = date.trim().split('-').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    parts.iter().try_fold(0u32, |acc, part| {
        let value = part.parse::<u32>().map_err(|_| invalid())?;
        acc.checked_add(value).ok_or_else(invalid)
    })
}
