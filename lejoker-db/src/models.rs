use anyhow::{bail, Result};

pub const DIGIT_COUNT: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub year: i32,
    pub week: u8,
    pub day: u8,
    pub digits: [u8; DIGIT_COUNT],
}

impl Draw {
    /// Les sept chiffres concaténés en un seul jeton ("whole number").
    pub fn digit_string(&self) -> String {
        self.digits.iter().map(|d| d.to_string()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
}

impl Position {
    pub const ALL: [Position; DIGIT_COUNT] = [
        Position::D1,
        Position::D2,
        Position::D3,
        Position::D4,
        Position::D5,
        Position::D6,
        Position::D7,
    ];

    pub fn index(&self) -> usize {
        match self {
            Position::D1 => 0,
            Position::D2 => 1,
            Position::D3 => 2,
            Position::D4 => 3,
            Position::D5 => 4,
            Position::D6 => 5,
            Position::D7 => 6,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Position::D1 => "d1",
            Position::D2 => "d2",
            Position::D3 => "d3",
            Position::D4 => "d4",
            Position::D5 => "d5",
            Position::D6 => "d6",
            Position::D7 => "d7",
        }
    }

    pub fn digit_from(&self, draw: &Draw) -> u8 {
        draw.digits[self.index()]
    }

    pub fn from_number(n: u8) -> Result<Position> {
        match n {
            1 => Ok(Position::D1),
            2 => Ok(Position::D2),
            3 => Ok(Position::D3),
            4 => Ok(Position::D4),
            5 => Ok(Position::D5),
            6 => Ok(Position::D6),
            7 => Ok(Position::D7),
            _ => bail!("Position {} hors limites (1-7)", n),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub fn of(digit: u8) -> Parity {
        if digit % 2 == 1 {
            Parity::Odd
        } else {
            Parity::Even
        }
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Parity::Odd => write!(f, "odd"),
            Parity::Even => write!(f, "even"),
        }
    }
}

/// Haut si le chiffre est > 4, bas sinon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magnitude {
    High,
    Low,
}

impl Magnitude {
    pub fn of(digit: u8) -> Magnitude {
        if digit > 4 {
            Magnitude::High
        } else {
            Magnitude::Low
        }
    }
}

impl std::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Magnitude::High => write!(f, "high"),
            Magnitude::Low => write!(f, "low"),
        }
    }
}

pub fn validate_draw(draw: &Draw) -> Result<()> {
    if draw.week < 1 || draw.week > 52 {
        bail!("Semaine {} hors limites (1-52)", draw.week);
    }
    if draw.day < 1 || draw.day > 4 {
        bail!("Jour {} hors limites (1-4)", draw.day);
    }
    for &d in &draw.digits {
        if d > 9 {
            bail!("Chiffre {} hors limites (0-9)", d);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(digits: [u8; 7]) -> Draw {
        Draw {
            year: 2025,
            week: 1,
            day: 1,
            digits,
        }
    }

    #[test]
    fn test_validate_draw_ok() {
        assert!(validate_draw(&draw([0, 1, 2, 3, 4, 5, 9])).is_ok());
    }

    #[test]
    fn test_validate_draw_digit_out_of_range() {
        assert!(validate_draw(&draw([0, 1, 2, 3, 4, 5, 10])).is_err());
    }

    #[test]
    fn test_validate_draw_week_out_of_range() {
        let mut d = draw([1, 2, 3, 4, 5, 6, 7]);
        d.week = 0;
        assert!(validate_draw(&d).is_err());
        d.week = 53;
        assert!(validate_draw(&d).is_err());
    }

    #[test]
    fn test_validate_draw_day_out_of_range() {
        let mut d = draw([1, 2, 3, 4, 5, 6, 7]);
        d.day = 5;
        assert!(validate_draw(&d).is_err());
    }

    #[test]
    fn test_digit_string() {
        assert_eq!(draw([1, 2, 3, 4, 5, 6, 7]).digit_string(), "1234567");
        assert_eq!(draw([0, 0, 9, 0, 0, 0, 0]).digit_string(), "0090000");
    }

    #[test]
    fn test_position_from_number() {
        assert_eq!(Position::from_number(1).unwrap(), Position::D1);
        assert_eq!(Position::from_number(7).unwrap(), Position::D7);
        assert!(Position::from_number(0).is_err());
        assert!(Position::from_number(8).is_err());
    }

    #[test]
    fn test_position_digit_from() {
        let d = draw([9, 8, 7, 6, 5, 4, 3]);
        assert_eq!(Position::D1.digit_from(&d), 9);
        assert_eq!(Position::D7.digit_from(&d), 3);
    }

    #[test]
    fn test_parity_of() {
        assert_eq!(Parity::of(3), Parity::Odd);
        assert_eq!(Parity::of(0), Parity::Even);
        assert_eq!(Parity::of(4), Parity::Even);
    }

    #[test]
    fn test_magnitude_of() {
        assert_eq!(Magnitude::of(5), Magnitude::High);
        assert_eq!(Magnitude::of(9), Magnitude::High);
        assert_eq!(Magnitude::of(4), Magnitude::Low);
        assert_eq!(Magnitude::of(0), Magnitude::Low);
    }
}
