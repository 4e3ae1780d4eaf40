use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};

/// Contexte d'une génération : date, météo et durée du jour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditions {
    /// Date au format AAAA-MM-JJ.
    pub date: String,
    pub weather: Option<String>,
    pub daylight_minutes: Option<i32>,
}

impl Conditions {
    pub fn new(date: impl Into<String>, weather: Option<String>, daylight_minutes: Option<i32>) -> Self {
        Self {
            date: date.into(),
            weather,
            daylight_minutes,
        }
    }

    /// Conditions saisonnières approximatives pour une date donnée.
    pub fn for_date(date: NaiveDate) -> Self {
        let month = date.month();
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            weather: Some(seasonal_weather(month).to_string()),
            daylight_minutes: Some(approximate_daylight_minutes(month)),
        }
    }

    /// Date du jour en UTC, saison d'après le mois local.
    pub fn today() -> Self {
        let mut conditions = Self::for_date(Local::now().date_naive());
        conditions.date = utc_date(&Utc::now());
        conditions
    }
}

/// AAAA-MM-JJ de l'instant ramené en UTC.
pub fn utc_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant.with_timezone(&Utc).format("%Y-%m-%d").to_string()
}

/// Durée du jour grossière par saison (mois 1-12), sans géographie.
pub fn approximate_daylight_minutes(month: u32) -> i32 {
    match month {
        6..=8 => 900,
        12 | 1 | 2 => 500,
        3..=5 => 700,
        _ => 600,
    }
}

pub fn seasonal_weather(month: u32) -> &'static str {
    match month {
        6..=8 => "Sunny",
        12 | 1 | 2 => "Snowy",
        _ => "Cloudy",
    }
}
