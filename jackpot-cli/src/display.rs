use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::import::ImportResult;
use jackpot_db::models::{Draw, NumberSet};
use jackpot_sampler::conditions::Conditions;
use jackpot_sampler::frequency::FrequencyTable;
use jackpot_sampler::generator::{Generation, Source};

fn sorted_numbers(numbers: &[u8]) -> String {
    numbers.iter().copied().collect::<NumberSet>().to_string()
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Numéros", "Euro", "Météo", "Durée du jour"]);

    for draw in draws {
        let daylight = draw
            .daylight_minutes
            .map(|m| format!("{}h{:02}", m / 60, m % 60))
            .unwrap_or_else(|| "—".to_string());

        table.add_row(vec![
            draw.date.clone(),
            sorted_numbers(&draw.main),
            sorted_numbers(&draw.euro),
            draw.weather.clone().unwrap_or_else(|| "—".to_string()),
            daylight,
        ]);
    }

    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total enregistrements : {}", result.total_records);
    println!("  Insérés               : {}", result.inserted);
    println!("  Doublons ignorés      : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs               : {}", result.errors);
    }
}

pub fn display_conditions(conditions: &Conditions) {
    println!(
        "Conditions : date {}, météo {}, durée du jour {}",
        conditions.date,
        conditions.weather.as_deref().unwrap_or("—"),
        conditions
            .daylight_minutes
            .map(|m| format!("{m} min"))
            .unwrap_or_else(|| "—".to_string()),
    );
}

pub fn display_generation(generation: &Generation) {
    let origin = match &generation.source {
        Source::Historical { seed, draws_used, fallback: false } => {
            format!("historique, {draws_used} tirages correspondants, graine {seed}")
        }
        Source::Historical { seed, draws_used, fallback: true } => {
            format!("historique, {draws_used} tirages récents (aucune correspondance), graine {seed}")
        }
        Source::Random { reason: None } => "aléatoire".to_string(),
        Source::Random { reason: Some(e) } => format!("aléatoire ({e})"),
    };

    println!("\n🎲 Grille générée — {origin}\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéros", "Euro"]);
    table.add_row(vec![
        Cell::new(generation.ticket.main.to_string()).fg(Color::Blue),
        Cell::new(generation.ticket.euro.to_string()).fg(Color::Yellow),
    ]);
    println!("{table}");
}

fn frequency_table(freq: &FrequencyTable) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Occurrences", "Poids"]);

    let mut rows: Vec<(u8, u32)> = freq.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    for (number, count) in rows {
        table.add_row(vec![
            format!("{:2}", number),
            count.to_string(),
            (count + 1).to_string(),
        ]);
    }
    table
}

pub fn display_frequencies(main: &FrequencyTable, euro: &FrequencyTable, draws_used: usize, fallback: bool) {
    if fallback {
        println!("\n📊 Aucun tirage ne correspond : {} tirages récents utilisés\n", draws_used);
    } else {
        println!("\n📊 Fréquences sur {} tirages correspondants\n", draws_used);
    }

    println!("── Numéros (1-50) ──");
    println!("{}", frequency_table(main));

    println!("\n── Euro (1-12) ──");
    println!("{}", frequency_table(euro));
}
