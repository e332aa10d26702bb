mod display;
mod import;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::warn;

use lejoker_analysis::consensus::composite_guess;
use lejoker_analysis::dataset::Dataset;
use lejoker_analysis::frequency::{FrequencyAnalysis, Scope};
use lejoker_analysis::markov::MarkovAnalysis;
use lejoker_analysis::monte_carlo::{MonteCarloAnalysis, DEFAULT_SAMPLES};
use lejoker_analysis::period::{Period, PeriodConfig};
use lejoker_db::db::{count_draws, db_path, fetch_all_draws, fetch_last_draws, insert_draw, migrate, open_db};
use lejoker_db::models::{validate_draw, Draw, Position, DIGIT_COUNT};

use crate::display::{
    display_chain, display_draws, display_guess, display_import_summary, display_ranked,
    display_simulation,
};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum PeriodArg {
    #[default]
    All,
    Year,
    Week,
    Day,
}

impl PeriodArg {
    fn to_period(self) -> Period {
        match self {
            PeriodArg::All => Period::All,
            PeriodArg::Year => Period::Year,
            PeriodArg::Week => Period::Week,
            PeriodArg::Day => Period::Day,
        }
    }
}

#[derive(Args, Debug, Clone, Copy)]
struct PeriodOpts {
    /// Année de référence pour la sélection
    #[arg(long, default_value = "2025")]
    year: i32,

    /// Semaine de référence (1-52)
    #[arg(long, default_value = "1")]
    week: u8,

    /// Jour de référence (1-4)
    #[arg(long, default_value = "1")]
    day: u8,
}

impl PeriodOpts {
    fn to_config(self) -> PeriodConfig {
        PeriodConfig::new(self.year, self.week, self.day)
    }
}

#[derive(Parser)]
#[command(name = "lejoker", about = "Analyse statistique des tirages du Joker")]
struct Cli {
    /// Verbosité du journal (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importer les tirages depuis un fichier CSV (year;week;day;d1..d7)
    Import {
        /// Chemin vers le fichier CSV
        #[arg(short, long, default_value = "assets/joker.csv")]
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

    /// Fréquences des chiffres (par position ou toutes positions réunies)
    Freq {
        /// Tranche analysée
        #[arg(short, long, default_value = "all")]
        period: PeriodArg,

        /// Position analysée (1-7) ; absente = positions réunies
        #[arg(long)]
        position: Option<u8>,

        #[command(flatten)]
        opts: PeriodOpts,
    },

    /// Chaîne de Markov extrapolée depuis un chiffre de départ
    Markov {
        /// Chiffre de départ (0-9)
        #[arg(short, long, default_value = "1")]
        first_digit: u8,

        /// Tranche analysée
        #[arg(short, long, default_value = "all")]
        period: PeriodArg,

        #[command(flatten)]
        opts: PeriodOpts,
    },

    /// Simulation Monte Carlo du chiffre modal par position
    Montecarlo {
        /// Tranche analysée
        #[arg(short, long, default_value = "all")]
        period: PeriodArg,

        /// Nombre d'échantillons par position
        #[arg(short, long, default_value = "10000")]
        samples: usize,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        opts: PeriodOpts,
    },

    /// Pronostic composite : vote majoritaire des moteurs statistiques
    Predict {
        /// Seed pour la reproductibilité (défaut : date du jour AAAAMMJJ)
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        opts: PeriodOpts,
    },

    /// Ajouter un tirage manuellement
    Add,
}

fn date_seed() -> u64 {
    let today = chrono::Local::now().date_naive();
    let y = today.year() as u64;
    let m = today.month() as u64;
    let d = today.day() as u64;
    y * 10_000 + m * 100 + d
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { file } => cmd_import(&conn, &file),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Freq {
            period,
            position,
            opts,
        } => cmd_freq(&conn, period.to_period(), position, opts.to_config()),
        Command::Markov {
            first_digit,
            period,
            opts,
        } => cmd_markov(&conn, first_digit, period.to_period(), opts.to_config()),
        Command::Montecarlo {
            period,
            samples,
            seed,
            opts,
        } => cmd_montecarlo(&conn, period.to_period(), samples, seed, opts.to_config()),
        Command::Predict { seed, opts } => cmd_predict(&conn, seed, opts.to_config()),
        Command::Add => cmd_add(&conn),
    }
}

fn load_dataset(conn: &lejoker_db::rusqlite::Connection) -> Result<Dataset> {
    let n = count_draws(conn)?;
    if n == 0 {
        bail!("Base vide. Lancez d'abord : lejoker import");
    }
    let draws = fetch_all_draws(conn)?;
    Ok(Dataset::new(draws))
}

fn cmd_import(conn: &lejoker_db::rusqlite::Connection, file: &PathBuf) -> Result<()> {
    let result = import::import_csv(conn, file)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(conn: &lejoker_db::rusqlite::Connection, last: u32) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : lejoker import");
        return Ok(());
    }
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_freq(
    conn: &lejoker_db::rusqlite::Connection,
    period: Period,
    position: Option<u8>,
    config: PeriodConfig,
) -> Result<()> {
    let freq = FrequencyAnalysis::new(load_dataset(conn)?, config);

    let (scope, title) = match position {
        Some(n) => {
            let position = Position::from_number(n)?;
            (Scope::Position(position), format!("Position {}", position))
        }
        None => (Scope::Pooled, "Positions réunies".to_string()),
    };

    let (values, probs) = match scope {
        Scope::Position(p) => freq.most_frequent_position(period, p)?,
        Scope::Pooled => freq.most_frequent_pooled(period)?,
    };
    display_ranked(&format!("{} : chiffres classés", title), &values, &probs);

    let (labels, probs) = freq.odd_even(period, scope)?;
    display_ranked(&format!("{} : impair/pair", title), &labels, &probs);

    let (labels, probs) = freq.high_low(period, scope)?;
    display_ranked(&format!("{} : haut/bas", title), &labels, &probs);

    Ok(())
}

fn cmd_markov(
    conn: &lejoker_db::rusqlite::Connection,
    first_digit: u8,
    period: Period,
    config: PeriodConfig,
) -> Result<()> {
    let markov = MarkovAnalysis::new(load_dataset(conn)?, config);
    let (sequence, probabilities) = markov.markov_chain(first_digit, period)?;
    display_chain(&sequence, &probabilities);
    Ok(())
}

fn cmd_montecarlo(
    conn: &lejoker_db::rusqlite::Connection,
    period: Period,
    samples: usize,
    seed: Option<u64>,
    config: PeriodConfig,
) -> Result<()> {
    let mut mc = MonteCarloAnalysis::new(load_dataset(conn)?, config).with_samples(samples);
    if let Some(s) = seed {
        mc = mc.with_seed(s);
    }
    let (digits, probs) = mc.simulate(period)?;
    display_simulation(&digits, &probs, samples);
    Ok(())
}

/// Rejoue l'assemblage d'origine : Monte Carlo et fréquences par position sur
/// les quatre tranches, une chaîne de Markov amorcée par le chiffre dominant
/// de la tranche jour, puis vote majoritaire position par position.
fn cmd_predict(
    conn: &lejoker_db::rusqlite::Connection,
    seed: Option<u64>,
    config: PeriodConfig,
) -> Result<()> {
    let dataset = load_dataset(conn)?;
    let seed = seed.unwrap_or_else(date_seed);
    let periods = [Period::All, Period::Year, Period::Week, Period::Day];

    let mut candidates: Vec<Vec<u8>> = Vec::new();

    let mc = MonteCarloAnalysis::new(dataset.clone(), config)
        .with_samples(DEFAULT_SAMPLES)
        .with_seed(seed);
    for period in periods {
        let (digits, _) = mc.simulate(period)?;
        candidates.push(digits);
    }

    let freq = FrequencyAnalysis::new(dataset.clone(), config);
    let mut first_digit = 1u8;
    for period in periods {
        let mut candidate = Vec::with_capacity(DIGIT_COUNT);
        for position in Position::ALL {
            let (values, _) = freq.most_frequent_position(period, position)?;
            candidate.push(values[0]);
        }
        if period == Period::Day {
            first_digit = candidate[0];
        }
        candidates.push(candidate);
    }

    let markov = MarkovAnalysis::new(dataset.clone(), config);
    let (chain, _) = markov.markov_chain(first_digit, Period::Year)?;
    candidates.push(chain);

    for period in periods {
        let (values, _) = freq.most_frequent_pooled(period)?;
        if values.len() >= DIGIT_COUNT {
            candidates.push(values[..DIGIT_COUNT].to_vec());
        } else {
            warn!(
                "Tranche {} : seulement {} chiffres distincts, candidat ignoré.",
                period,
                values.len()
            );
        }
    }

    let guess = composite_guess(&candidates)?;
    println!("{} séquences candidates (seed {}).", candidates.len(), seed);
    display_guess(&guess);
    Ok(())
}

fn cmd_add(conn: &lejoker_db::rusqlite::Connection) -> Result<()> {
    println!("Ajout d'un tirage manuellement\n");

    let year: i32 = prompt("Année (ex: 2025) : ")?
        .parse()
        .context("Année invalide")?;
    let week: u8 = prompt("Semaine (1-52) : ")?
        .parse()
        .context("Semaine invalide")?;
    let day: u8 = prompt("Jour (1-4) : ")?.parse().context("Jour invalide")?;
    let digits = prompt_digits()?;

    let draw = Draw {
        year,
        week,
        day,
        digits,
    };
    validate_draw(&draw)?;

    println!("\nTirage à insérer :");
    display_draws(&[draw.clone()]);

    let confirm = prompt("\nConfirmer l'insertion ? (o/n) : ")?;
    if confirm.trim().to_lowercase() == "o" {
        let inserted = insert_draw(conn, &draw)?;
        if inserted {
            println!("Tirage inséré avec succès.");
        } else {
            println!("Ce tirage existe déjà (doublon ignoré).");
        }
    } else {
        println!("Insertion annulée.");
    }

    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}

fn prompt_digits() -> Result<[u8; DIGIT_COUNT]> {
    loop {
        let input = prompt("7 chiffres (séparés par des espaces, 0-9) : ")?;
        let nums: Result<Vec<u8>, _> = input.split_whitespace().map(|s| s.parse::<u8>()).collect();
        match nums {
            Ok(v) if v.len() == DIGIT_COUNT && v.iter().all(|&d| d <= 9) => {
                let mut arr = [0u8; DIGIT_COUNT];
                arr.copy_from_slice(&v);
                return Ok(arr);
            }
            _ => println!("Entrez exactement 7 chiffres entre 0 et 9. Réessayez."),
        }
    }
}
