//! Arithmetic human-verification challenge asked before any write that
//! comes from a person (new business, review, deal).

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    a: u8,
    b: u8,
}

impl Challenge {
    /// Two operands drawn uniformly from 1–10.
    #[must_use]
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            a: rng.random_range(1..=10),
            b: rng.random_range(1..=10),
        }
    }

    #[must_use]
    pub fn new(a: u8, b: u8) -> Self {
        Self { a, b }
    }

    /// Prompt text, e.g. `"What is 3 + 4?"`.
    #[must_use]
    pub fn question(&self) -> String {
        format!("What is {} + {}?", self.a, self.b)
    }

    /// Compares the trimmed answer against the sum as text.
    #[must_use]
    pub fn check(&self, answer: &str) -> bool {
        answer.trim() == (u16::from(self.a) + u16::from(self.b)).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_correct_sum() {
        let c = Challenge::new(3, 4);
        assert!(c.check("7"));
        assert!(c.check(" 7\n"));
    }

    #[test]
    fn rejects_wrong_or_garbled_answer() {
        let c = Challenge::new(3, 4);
        assert!(!c.check("8"));
        assert!(!c.check("seven"));
        assert!(!c.check(""));
        assert!(!c.check("07"));
    }

    #[test]
    fn question_shows_operands() {
        assert_eq!(Challenge::new(2, 9).question(), "What is 2 + 9?");
    }

    #[test]
    fn random_operands_stay_in_range() {
        for _ in 0..100 {
            let c = Challenge::random();
            assert!((1..=10).contains(&c.a));
            assert!((1..=10).contains(&c.b));
        }
    }
}
