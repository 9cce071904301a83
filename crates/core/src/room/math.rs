//! Multiplication problems that gate damage inside a room.

use serde::Serialize;

use crate::error::SimError;
use crate::rng::{self, SimRng};

/// `a × b = answer`. Fields are private so the product invariant always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MathProblem {
    a: u32,
    b: u32,
    answer: u32,
}

impl MathProblem {
    pub fn new(a: u32, b: u32) -> Self {
        Self { a, b, answer: a * b }
    }

    /// Builds a problem from an externally supplied triple, rejecting bad products.
    pub fn checked(a: u32, b: u32, answer: u32) -> Result<Self, SimError> {
        if a.checked_mul(b) != Some(answer) {
            return Err(SimError::InconsistentMathProblem { a, b, answer });
        }
        Ok(Self { a, b, answer })
    }

    pub fn a(&self) -> u32 {
        self.a
    }

    pub fn b(&self) -> u32 {
        self.b
    }

    pub fn answer(&self) -> u32 {
        self.answer
    }

    pub fn is_solved_by(&self, attack_value: u32) -> bool {
        attack_value == self.answer
    }
}

/// Boss answers are `(level + 1) * 10 + d` for a random digit `d`, written as
/// a product of two single-digit factors when one exists.
pub fn boss_problem(level: u32, rng: &mut SimRng) -> MathProblem {
    let answer = (level + 1) * 10 + rng::range_u32(rng, 0, 9);
    let pairs: Vec<(u32, u32)> = (2..=9)
        .flat_map(|a| (2..=9).map(move |b| (a, b)))
        .filter(|(a, b)| a * b == answer)
        .collect();
    match rng::pick(rng, &pairs) {
        Some(&(a, b)) => MathProblem::new(a, b),
        None => MathProblem::new(1, answer),
    }
}

/// Every digit 0..=9 appears at least once when `count >= 10`; extra slots are
/// random digits. The deck is shuffled and truncated to `count`.
pub fn multiplier_deck(count: usize, rng: &mut SimRng) -> Vec<u32> {
    let mut deck: Vec<u32> = (0..=9).collect();
    while deck.len() < count {
        deck.push(rng::range_u32(rng, 0, 9));
    }
    rng::shuffle(rng, &mut deck);
    deck.truncate(count);
    deck
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::rng::seeded;

    #[test]
    fn checked_rejects_wrong_product() {
        let err = MathProblem::checked(3, 4, 13).expect_err("3x4 is not 13");
        assert!(matches!(err, SimError::InconsistentMathProblem { a: 3, b: 4, answer: 13 }));
        assert_eq!(MathProblem::checked(3, 4, 12).unwrap().answer(), 12);
    }

    #[test]
    fn deck_covers_every_digit_when_large_enough() {
        let mut deck = multiplier_deck(14, &mut seeded(3));
        assert_eq!(deck.len(), 14);
        deck.sort_unstable();
        deck.dedup();
        assert_eq!(deck, (0..=9).collect::<Vec<_>>());
    }

    #[test]
    fn small_deck_is_truncated() {
        assert_eq!(multiplier_deck(4, &mut seeded(3)).len(), 4);
    }

    proptest! {
        #[test]
        fn boss_problems_keep_product_and_tens_digit(level in 0_u32..9, seed in any::<u64>()) {
            let problem = boss_problem(level, &mut seeded(seed));
            prop_assert_eq!(problem.a() * problem.b(), problem.answer());
            prop_assert_eq!(problem.answer() / 10, level + 1);
            prop_assert!(problem.a() == 1 || (2..=9).contains(&problem.a()));
        }

        #[test]
        fn constructed_problems_are_consistent(a in 0_u32..100, b in 0_u32..100) {
            let problem = MathProblem::new(a, b);
            prop_assert_eq!(problem.answer(), a * b);
            prop_assert!(problem.is_solved_by(a * b));
        }
    }
}
