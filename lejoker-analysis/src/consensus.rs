use anyhow::{bail, Result};

use lejoker_db::models::DIGIT_COUNT;

/// Vote majoritaire position par position sur des séquences candidates de
/// 7 chiffres. À voix égales, le candidat rencontré en premier l'emporte.
pub fn composite_guess(candidates: &[Vec<u8>]) -> Result<Vec<u8>> {
    if candidates.is_empty() {
        bail!("Aucune séquence candidate pour le vote.");
    }
    for candidate in candidates {
        if candidate.len() != DIGIT_COUNT {
            bail!(
                "Séquence candidate de longueur {} (7 attendue)",
                candidate.len()
            );
        }
        if let Some(&d) = candidate.iter().find(|&&d| d > 9) {
            bail!("Chiffre {} hors limites (0-9)", d);
        }
    }

    let mut guess = Vec::with_capacity(DIGIT_COUNT);
    for position in 0..DIGIT_COUNT {
        let mut votes: Vec<(u8, u32)> = Vec::new();
        for candidate in candidates {
            let digit = candidate[position];
            match votes.iter_mut().find(|(d, _)| *d == digit) {
                Some((_, c)) => *c += 1,
                None => votes.push((digit, 1)),
            }
        }
        votes.sort_by(|a, b| b.1.cmp(&a.1));
        guess.push(votes[0].0);
    }
    Ok(guess)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_per_position() {
        let candidates = vec![
            vec![1, 2, 3, 4, 5, 6, 7],
            vec![1, 2, 3, 4, 5, 6, 8],
            vec![9, 2, 0, 4, 5, 6, 8],
        ];
        let guess = composite_guess(&candidates).unwrap();
        assert_eq!(guess, vec![1, 2, 3, 4, 5, 6, 8]);
    }

    #[test]
    fn test_tie_first_seen_wins() {
        let candidates = vec![vec![5, 0, 0, 0, 0, 0, 0], vec![3, 0, 0, 0, 0, 0, 0]];
        let guess = composite_guess(&candidates).unwrap();
        assert_eq!(guess[0], 5);
    }

    #[test]
    fn test_single_candidate() {
        let candidates = vec![vec![1, 2, 3, 4, 5, 6, 7]];
        assert_eq!(composite_guess(&candidates).unwrap(), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_no_candidates_fails() {
        assert!(composite_guess(&[]).is_err());
    }

    #[test]
    fn test_wrong_length_fails() {
        assert!(composite_guess(&[vec![1, 2, 3]]).is_err());
    }

    #[test]
    fn test_out_of_range_digit_fails() {
        assert!(composite_guess(&[vec![1, 2, 3, 4, 5, 6, 12]]).is_err());
    }
}
