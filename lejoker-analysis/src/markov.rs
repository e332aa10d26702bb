use anyhow::{bail, Result};

use lejoker_db::models::DIGIT_COUNT;

use crate::dataset::Dataset;
use crate::period::{Period, PeriodConfig};

/// Probabilité conventionnelle attachée au chiffre de départ d'une chaîne :
/// ce n'est pas une probabilité calculée.
pub const SEED_PROBABILITY: f64 = 0.1;

/// Chaîne de Markov d'ordre 1 sur les paires de chiffres adjacents du jeton
/// concaténé de chaque tirage.
pub struct MarkovAnalysis {
    dataset: Dataset,
    config: PeriodConfig,
}

impl MarkovAnalysis {
    pub fn new(dataset: Dataset, config: PeriodConfig) -> Self {
        config.sanity_check();
        Self { dataset, config }
    }

    /// Matrice 10×10 des comptages de transitions, accumulée sur toute la tranche.
    pub fn transition_matrix(&self, period: Period) -> Result<[[f64; 10]; 10]> {
        let slice = self.dataset.select(period, &self.config)?;
        if slice.is_empty() {
            bail!("Tranche vide : aucune transition observable.");
        }
        let mut matrix = [[0.0f64; 10]; 10];
        for draw in &slice {
            let token = draw.digit_string();
            let digits: Vec<usize> = token
                .bytes()
                .map(|b| (b - b'0') as usize)
                .collect();
            for pair in digits.windows(2) {
                matrix[pair[0]][pair[1]] += 1.0;
            }
        }
        Ok(matrix)
    }

    /// Normalise chaque ligne en probabilités. Une ligne sans aucune
    /// transition sortante reste entièrement nulle.
    pub fn probability_matrix(&self, period: Period) -> Result<[[f64; 10]; 10]> {
        let mut matrix = self.transition_matrix(period)?;
        for row in &mut matrix {
            let row_sum: f64 = row.iter().sum();
            if row_sum > 0.0 {
                for entry in row.iter_mut() {
                    *entry /= row_sum;
                }
            }
        }
        Ok(matrix)
    }

    /// Extrapole une séquence de 7 chiffres à partir d'un chiffre de départ.
    /// À chaque pas on prend le successeur le plus probable, sauf s'il est
    /// égal au chiffre courant : on prend alors le deuxième (évitement des
    /// boucles sur soi). À probabilité égale, le plus petit chiffre passe
    /// devant (choix d'implémentation).
    pub fn markov_chain(
        &self,
        first_digit: u8,
        period: Period,
    ) -> Result<(Vec<u8>, Vec<f64>)> {
        if first_digit > 9 {
            bail!("Chiffre de départ {} hors limites (0-9)", first_digit);
        }
        let matrix = self.probability_matrix(period)?;

        let mut sequence = vec![first_digit];
        let mut probabilities = vec![SEED_PROBABILITY];
        let mut current = first_digit as usize;

        for _ in 0..DIGIT_COUNT - 1 {
            let ranked = rank_row(&matrix[current]);
            let next = if ranked[0] == current {
                ranked[1]
            } else {
                ranked[0]
            };
            sequence.push(next as u8);
            probabilities.push(matrix[current][next]);
            current = next;
        }
        Ok((sequence, probabilities))
    }
}

/// Indices 0..9 triés par probabilité décroissante, tri stable :
/// les ex aequo (y compris une ligne entièrement nulle) restent en ordre
/// croissant de chiffre.
fn rank_row(row: &[f64; 10]) -> [usize; 10] {
    let mut indices = [0usize; 10];
    for (i, slot) in indices.iter_mut().enumerate() {
        *slot = i;
    }
    indices.sort_by(|&a, &b| {
        row[b].partial_cmp(&row[a]).unwrap_or(std::cmp::Ordering::Equal)
    });
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use lejoker_db::models::Draw;

    fn draw(digits: [u8; 7]) -> Draw {
        Draw {
            year: 2025,
            week: 1,
            day: 1,
            digits,
        }
    }

    fn analysis(draws: Vec<Draw>) -> MarkovAnalysis {
        MarkovAnalysis::new(Dataset::new(draws), PeriodConfig::default())
    }

    #[test]
    fn test_transition_matrix_counts() {
        let markov = analysis(vec![draw([1, 2, 1, 2, 1, 2, 1])]);
        let matrix = markov.transition_matrix(Period::All).unwrap();
        assert!((matrix[1][2] - 3.0).abs() < 1e-9);
        assert!((matrix[2][1] - 3.0).abs() < 1e-9);
        assert!(matrix[0].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_transition_matrix_accumulates_across_draws() {
        let markov = analysis(vec![draw([1, 2, 3, 4, 5, 6, 7]), draw([1, 2, 3, 4, 5, 6, 7])]);
        let matrix = markov.transition_matrix(Period::All).unwrap();
        assert!((matrix[1][2] - 2.0).abs() < 1e-9);
        assert!((matrix[6][7] - 2.0).abs() < 1e-9);
        // Pas de transition entre tirages : 7 -> 1 n'est jamais comptée.
        assert!(matrix[7][1].abs() < 1e-9);
    }

    #[test]
    fn test_probability_rows_sum_to_one_or_zero() {
        let markov = analysis(vec![
            draw([1, 2, 3, 4, 5, 6, 7]),
            draw([1, 2, 3, 4, 5, 6, 8]),
            draw([9, 8, 7, 6, 5, 4, 3]),
        ]);
        let matrix = markov.probability_matrix(Period::All).unwrap();
        for row in &matrix {
            let sum: f64 = row.iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-9 || sum.abs() < 1e-9,
                "Somme de ligne invalide : {}",
                sum
            );
        }
        // Le chiffre 0 n'est jamais observé : sa ligne reste nulle.
        assert!(matrix[0].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_draw_matrix() {
        let markov = analysis(vec![draw([1, 2, 3, 4, 5, 6, 7])]);
        let matrix = markov.probability_matrix(Period::All).unwrap();
        for current in 1..=6usize {
            assert!((matrix[current][current + 1] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_chain_shape_and_seed() {
        let markov = analysis(vec![draw([1, 2, 3, 4, 5, 6, 7])]);
        let (sequence, probabilities) = markov.markov_chain(1, Period::All).unwrap();
        assert_eq!(sequence.len(), 7);
        assert_eq!(probabilities.len(), 7);
        assert_eq!(sequence[0], 1);
        assert!((probabilities[0] - SEED_PROBABILITY).abs() < 1e-9);
    }

    #[test]
    fn test_chain_follows_dominant_transitions() {
        let markov = analysis(vec![draw([1, 2, 3, 4, 5, 6, 7])]);
        let (sequence, probabilities) = markov.markov_chain(1, Period::All).unwrap();
        assert_eq!(sequence, vec![1, 2, 3, 4, 5, 6, 7]);
        for &p in &probabilities[1..] {
            assert!((p - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_chain_avoids_self_loop() {
        // 2 -> 2 domine, mais la boucle sur soi est exclue : on prend le deuxième.
        let markov = analysis(vec![draw([2, 2, 2, 2, 2, 2, 3]), draw([3, 2, 2, 2, 2, 2, 2])]);
        let (sequence, _) = markov.markov_chain(2, Period::All).unwrap();
        assert_eq!(sequence[0], 2);
        for pair in sequence.windows(2) {
            assert_ne!(pair[0], pair[1], "Boucle sur soi dans {:?}", sequence);
        }
    }

    #[test]
    fn test_chain_seed_out_of_range() {
        let markov = analysis(vec![draw([1, 2, 3, 4, 5, 6, 7])]);
        assert!(markov.markov_chain(10, Period::All).is_err());
    }

    #[test]
    fn test_chain_on_empty_slice_fails() {
        let markov = analysis(vec![]);
        assert!(markov.markov_chain(1, Period::All).is_err());
    }

    #[test]
    fn test_chain_idempotent() {
        let markov = analysis(vec![
            draw([1, 2, 3, 4, 5, 6, 7]),
            draw([9, 8, 7, 6, 5, 4, 3]),
            draw([1, 2, 3, 4, 5, 6, 8]),
        ]);
        let first = markov.markov_chain(3, Period::All).unwrap();
        let second = markov.markov_chain(3, Period::All).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rank_row_stable_on_zero_row() {
        let ranked = rank_row(&[0.0; 10]);
        assert_eq!(ranked, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_rank_row_descending() {
        let mut row = [0.0f64; 10];
        row[4] = 0.5;
        row[7] = 0.3;
        row[1] = 0.2;
        let ranked = rank_row(&row);
        assert_eq!(&ranked[..3], &[4, 7, 1]);
    }
}
