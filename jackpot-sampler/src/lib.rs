pub mod conditions;
pub mod config;
pub mod error;
pub mod filter;
pub mod frequency;
pub mod generator;
pub mod prng;
pub mod sampler;
pub mod seed;

#[cfg(test)]
pub(crate) fn make_draw(main: [u8; 5], euro: [u8; 2], weather: Option<&str>, daylight: Option<i32>) -> jackpot_db::models::Draw {
    jackpot_db::models::Draw {
        date: "2024-01-01".to_string(),
        main,
        euro,
        weather: weather.map(str::to_string),
        daylight_minutes: daylight,
    }
}
