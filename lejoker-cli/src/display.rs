use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::import::ImportResult;
use lejoker_db::models::Draw;

fn base_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = base_table(vec!["Année", "Semaine", "Jour", "Chiffres"]);
    for draw in draws {
        let digits_str = draw
            .digits
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        table.add_row(vec![
            draw.year.to_string(),
            draw.week.to_string(),
            draw.day.to_string(),
            digits_str,
        ]);
    }
    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

/// Table générique valeur/probabilité, pour tous les résultats classés
/// (chiffres, impair/pair, haut/bas).
pub fn display_ranked<T: std::fmt::Display>(title: &str, values: &[T], probs: &[f64]) {
    println!("\n── {} ──", title);
    let mut table = base_table(vec!["Valeur", "Probabilité"]);
    for (value, prob) in values.iter().zip(probs.iter()) {
        table.add_row(vec![value.to_string(), format!("{:.4}", prob)]);
    }
    println!("{table}");
}

pub fn display_chain(sequence: &[u8], probabilities: &[f64]) {
    println!("\n🔗 Chaîne de Markov\n");
    let mut table = base_table(vec!["Pas", "Chiffre", "Probabilité de transition"]);
    for (i, (digit, prob)) in sequence.iter().zip(probabilities.iter()).enumerate() {
        let prob_str = if i == 0 {
            format!("{:.1} (amorce)", prob)
        } else {
            format!("{:.4}", prob)
        };
        table.add_row(vec![(i + 1).to_string(), digit.to_string(), prob_str]);
    }
    println!("{table}");
}

pub fn display_simulation(digits: &[u8], probs: &[f64], samples: usize) {
    println!("\n🎲 Monte Carlo ({} échantillons par position)\n", samples);
    let mut table = base_table(vec!["Position", "Chiffre modal", "Fréquence empirique"]);
    for (i, (digit, prob)) in digits.iter().zip(probs.iter()).enumerate() {
        table.add_row(vec![
            format!("d{}", i + 1),
            digit.to_string(),
            format!("{:.4}", prob),
        ]);
    }
    println!("{table}");
}

pub fn display_guess(digits: &[u8]) {
    let guess = digits
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("\n🎯 Pronostic final : {}", guess);
}
