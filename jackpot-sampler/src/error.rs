use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SamplerError {
    #[error("date invalide '{0}' (format attendu : AAAA-MM-JJ)")]
    InvalidDate(String),

    #[error("aucun tirage historique disponible")]
    NoHistoricalData,

    #[error("pool pondéré vide")]
    EmptyWeightedPool,

    #[error("{count} numéros demandés mais le domaine {min}-{max} est plus petit")]
    CountExceedsDomain { count: usize, min: u8, max: u8 },

    #[error("{count} numéros uniques non obtenus après {attempts} tirages")]
    RetryLimitExceeded { count: usize, attempts: usize },
}

pub type Result<T> = std::result::Result<T, SamplerError>;
