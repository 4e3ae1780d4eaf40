mod display;
mod import;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::display::{
    display_conditions, display_draws, display_frequencies, display_generation, display_import_summary,
};
use jackpot_db::dataset::load_dataset;
use jackpot_db::db::{count_draws, db_path, fetch_draws, fetch_last_draws, migrate, open_db};
use jackpot_db::models::{Draw, Pool};
use jackpot_sampler::conditions::Conditions;
use jackpot_sampler::config::{load_config, CorpusOrder, SamplerConfig};
use jackpot_sampler::filter::filter_draws;
use jackpot_sampler::frequency::accumulate;
use jackpot_sampler::generator::{random_generation, Generator};

#[derive(Parser)]
#[command(name = "jackpot", about = "Générateur de grilles Eurojackpot selon la météo et la durée du jour")]
struct Cli {
    /// Fichier de configuration JSON du tirage pondéré
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Niveau de log par défaut (surchargé par RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct ConditionArgs {
    /// Date AAAA-MM-JJ (défaut : aujourd'hui)
    #[arg(short, long)]
    date: Option<String>,

    /// Météo recherchée (ex: Sunny, Cloudy)
    #[arg(short, long)]
    weather: Option<String>,

    /// Durée du jour en minutes
    #[arg(short = 'l', long)]
    daylight: Option<i32>,

    /// Compléter météo et durée du jour selon la saison de la date
    #[arg(short, long)]
    season: bool,
}

#[derive(clap::Args)]
struct CorpusArgs {
    /// Lire les tirages depuis un fichier JSON au lieu de la base
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Le fichier JSON est trié du plus ancien au plus récent
    #[arg(long, requires = "dataset")]
    oldest_first: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Importer les tirages depuis un fichier JSON enrichi
    Import {
        /// Chemin vers le fichier JSON
        #[arg(short, long, default_value = "public/data/eurojackpot_context_dataset.json")]
        file: PathBuf,
    },

    /// Afficher le chemin de la base de données
    DbPath,

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Générer une grille
    Generate {
        #[command(flatten)]
        conditions: ConditionArgs,

        #[command(flatten)]
        corpus: CorpusArgs,

        /// Tirage uniforme, sans historique
        #[arg(short, long)]
        random: bool,

        /// Afficher la grille sous forme de paramètres d'URL
        #[arg(short, long)]
        query: bool,
    },

    /// Fréquences des numéros sur les tirages correspondant aux conditions
    Stats {
        #[command(flatten)]
        conditions: ConditionArgs,

        #[command(flatten)]
        corpus: CorpusArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Configuration illisible {:?}", path))?,
        None => SamplerConfig::default(),
    };

    match cli.command {
        Command::Import { file } => cmd_import(&file),
        Command::DbPath => {
            println!("{}", db_path().display());
            Ok(())
        }
        Command::List { last } => cmd_list(last),
        Command::Generate { conditions, corpus, random, query } => {
            cmd_generate(config, &conditions, &corpus, random, query)
        }
        Command::Stats { conditions, corpus } => cmd_stats(config, &conditions, &corpus),
    }
}

fn open_store() -> Result<jackpot_db::rusqlite::Connection> {
    let conn = open_db(&db_path())?;
    migrate(&conn)?;
    Ok(conn)
}

fn cmd_import(file: &Path) -> Result<()> {
    let conn = open_store()?;
    let result = import::import_dataset(&conn, file)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(last: u32) -> Result<()> {
    let conn = open_store()?;
    if count_draws(&conn)? == 0 {
        println!("Base vide. Lancez d'abord : jackpot import");
        return Ok(());
    }
    let draws = fetch_last_draws(&conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn build_conditions(args: &ConditionArgs) -> Conditions {
    let date = args.date.clone().unwrap_or_else(|| Conditions::today().date);
    let mut conditions = if args.season {
        NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map(Conditions::for_date)
            .unwrap_or_else(|_| Conditions::new(date, None, None))
    } else {
        Conditions::new(date, None, None)
    };

    if let Some(weather) = &args.weather {
        conditions.weather = Some(weather.clone());
    }
    if let Some(daylight) = args.daylight {
        conditions.daylight_minutes = Some(daylight);
    }
    conditions
}

/// La base est triée du plus récent au plus ancien ; un fichier JSON garde l'ordre configuré
/// sauf si `--oldest-first` est donné.
fn corpus_order(args: &CorpusArgs, configured: CorpusOrder) -> CorpusOrder {
    match &args.dataset {
        Some(_) if args.oldest_first => CorpusOrder::OldestFirst,
        Some(_) => configured,
        None => CorpusOrder::NewestFirst,
    }
}

fn read_corpus(args: &CorpusArgs) -> Result<Vec<Draw>> {
    match &args.dataset {
        Some(path) => Ok(load_dataset(path)?.draws),
        None => {
            let conn = open_store()?;
            fetch_draws(&conn)
        }
    }
}

/// Un corpus illisible équivaut à un corpus vide.
fn load_corpus(args: &CorpusArgs, config: &mut SamplerConfig) -> Vec<Draw> {
    config.corpus_order = corpus_order(args, config.corpus_order);
    match read_corpus(args) {
        Ok(draws) => {
            debug!(draws = draws.len(), order = ?config.corpus_order, "corpus chargé");
            draws
        }
        Err(e) => {
            warn!("Tirages indisponibles : {:#}", e);
            Vec::new()
        }
    }
}

fn cmd_generate(
    mut config: SamplerConfig,
    condition_args: &ConditionArgs,
    corpus_args: &CorpusArgs,
    random: bool,
    query: bool,
) -> Result<()> {
    let generation = if random {
        random_generation()
    } else {
        let corpus = load_corpus(corpus_args, &mut config);
        let conditions = build_conditions(condition_args);
        display_conditions(&conditions);
        Generator::new(&corpus, config).generate(Some(&conditions))
    };

    if query {
        println!("{}", generation.ticket.to_query());
    } else {
        display_generation(&generation);
    }
    Ok(())
}

fn cmd_stats(mut config: SamplerConfig, condition_args: &ConditionArgs, corpus_args: &CorpusArgs) -> Result<()> {
    let corpus = load_corpus(corpus_args, &mut config);
    let conditions = build_conditions(condition_args);
    display_conditions(&conditions);

    let selection = match filter_draws(&corpus, &conditions, &config) {
        Ok(selection) => selection,
        Err(e) => {
            println!("Statistiques indisponibles : {e}");
            return Ok(());
        }
    };

    let main = accumulate(selection.draws.iter().copied(), Pool::Main);
    let euro = accumulate(selection.draws.iter().copied(), Pool::Euro);
    display_frequencies(&main, &euro, selection.draws.len(), selection.fallback);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(date: Option<&str>, weather: Option<&str>, daylight: Option<i32>, season: bool) -> ConditionArgs {
        ConditionArgs {
            date: date.map(str::to_string),
            weather: weather.map(str::to_string),
            daylight,
            season,
        }
    }

    #[test]
    fn test_build_conditions_explicit() {
        let conditions = build_conditions(&args(Some("2026-03-15"), Some("Rainy"), Some(700), false));
        assert_eq!(conditions, Conditions::new("2026-03-15", Some("Rainy".to_string()), Some(700)));
    }

    #[test]
    fn test_build_conditions_season_defaults() {
        let conditions = build_conditions(&args(Some("2026-07-04"), None, None, true));
        assert_eq!(conditions.weather.as_deref(), Some("Sunny"));
        assert_eq!(conditions.daylight_minutes, Some(900));
    }

    #[test]
    fn test_build_conditions_flags_override_season() {
        let conditions = build_conditions(&args(Some("2026-01-10"), Some("Cloudy"), None, true));
        assert_eq!(conditions.weather.as_deref(), Some("Cloudy"));
        assert_eq!(conditions.daylight_minutes, Some(500));
    }

    #[test]
    fn test_build_conditions_without_season_leaves_blank() {
        let conditions = build_conditions(&args(Some("2026-01-10"), None, None, false));
        assert_eq!(conditions.weather, None);
        assert_eq!(conditions.daylight_minutes, None);
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "jackpot", "generate", "--date", "2026-06-01", "--weather", "Sunny", "--daylight", "900", "--query",
        ])
        .unwrap();
        match cli.command {
            Command::Generate { conditions, query, random, .. } => {
                assert_eq!(conditions.date.as_deref(), Some("2026-06-01"));
                assert_eq!(conditions.daylight, Some(900));
                assert!(query);
                assert!(!random);
            }
            _ => panic!("sous-commande inattendue"),
        }
    }

    #[test]
    fn test_cli_oldest_first_requires_dataset() {
        assert!(Cli::try_parse_from(["jackpot", "generate", "--oldest-first"]).is_err());
        assert!(Cli::try_parse_from(["jackpot", "stats", "--dataset", "d.json", "--oldest-first"]).is_ok());
    }

    fn corpus_args(dataset: Option<&str>, oldest_first: bool) -> CorpusArgs {
        CorpusArgs {
            dataset: dataset.map(PathBuf::from),
            oldest_first,
        }
    }

    #[test]
    fn test_corpus_order_dataset_keeps_config() {
        let args = corpus_args(Some("d.json"), false);
        assert_eq!(corpus_order(&args, CorpusOrder::OldestFirst), CorpusOrder::OldestFirst);
        assert_eq!(corpus_order(&args, CorpusOrder::NewestFirst), CorpusOrder::NewestFirst);
        let flagged = corpus_args(Some("d.json"), true);
        assert_eq!(corpus_order(&flagged, CorpusOrder::NewestFirst), CorpusOrder::OldestFirst);
    }

    #[test]
    fn test_corpus_order_database_is_newest_first() {
        let args = corpus_args(None, false);
        assert_eq!(corpus_order(&args, CorpusOrder::OldestFirst), CorpusOrder::NewestFirst);
    }

    #[test]
    fn test_load_corpus_applies_configured_order() {
        let path = std::env::temp_dir().join(format!("jackpot-corpus-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[
                {"date": "2019-01-04", "numbers": [1, 2, 3, 4, 5], "euro_numbers": [1, 2]},
                {"date": "2025-01-03", "numbers": [6, 7, 8, 9, 10], "euro_numbers": [3, 4]}
            ]"#,
        )
        .unwrap();

        let mut config = SamplerConfig {
            corpus_order: CorpusOrder::OldestFirst,
            fallback_window: 1,
            ..SamplerConfig::default()
        };
        let args = corpus_args(path.to_str(), false);
        let corpus = load_corpus(&args, &mut config);
        std::fs::remove_file(&path).ok();

        assert_eq!(corpus.len(), 2);
        assert_eq!(config.corpus_order, CorpusOrder::OldestFirst);

        let conditions = Conditions::new("2026-06-01", Some("Snowy".to_string()), None);
        let selection = filter_draws(&corpus, &conditions, &config).unwrap();
        assert!(selection.fallback);
        assert_eq!(selection.draws[0].date, "2025-01-03");
    }
}
