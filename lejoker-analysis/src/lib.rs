pub mod consensus;
pub mod dataset;
pub mod frequency;
pub mod markov;
pub mod monte_carlo;
pub mod period;

use lejoker_db::models::Draw;

/// Vérifie qu'une séquence de probabilités forme bien une partition (somme = 1.0).
pub fn is_partition(probs: &[f64]) -> bool {
    if probs.iter().any(|&p| p < 0.0) {
        return false;
    }
    let sum: f64 = probs.iter().sum();
    (sum - 1.0).abs() < 1e-9
}

pub fn make_test_draws(n: usize) -> Vec<Draw> {
    (0..n)
        .map(|i| {
            let base = (i % 10) as u8;
            Draw {
                year: 2022 + (i % 4) as i32,
                week: (i % 52) as u8 + 1,
                day: (i % 4) as u8 + 1,
                digits: [
                    base,
                    (base + 1) % 10,
                    (base + 2) % 10,
                    (base + 3) % 10,
                    (base + 5) % 10,
                    (base + 7) % 10,
                    (base + 8) % 10,
                ],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_partition_valid() {
        assert!(is_partition(&[0.5, 0.25, 0.25]));
        assert!(is_partition(&[1.0]));
    }

    #[test]
    fn test_is_partition_wrong_sum() {
        assert!(!is_partition(&[0.5, 0.25]));
    }

    #[test]
    fn test_is_partition_negative() {
        assert!(!is_partition(&[1.5, -0.5]));
    }

    #[test]
    fn test_make_test_draws_in_range() {
        for draw in make_test_draws(40) {
            assert!(draw.digits.iter().all(|&d| d <= 9));
            assert!(draw.week >= 1 && draw.week <= 52);
            assert!(draw.day >= 1 && draw.day <= 4);
        }
    }
}
