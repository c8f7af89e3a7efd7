//! Randomised question generators.
//!
//! Every generator is a plain `fn(&mut dyn RngCore) -> Generated`, so a
//! catalog is a table of function pointers and tests can drive any generator
//! with a seeded rng.

use rand::{Rng, RngCore};

use crate::model::{Generated, Question};

pub mod algebra;
mod diagram;
pub mod geometry;
pub mod measurement;
pub mod number;
pub mod statistics;

/// Signature shared by all generators.
pub type GenerateFn = fn(&mut dyn RngCore) -> Generated;

/// Attempts a generator makes to avoid a degenerate instance before skipping.
pub const RESAMPLE_ATTEMPTS: u32 = 20;

/// Generator used for retired skills: always signals skip.
#[must_use]
pub fn retired(_rng: &mut dyn RngCore) -> Generated {
    Generated::Skip
}

/// Uniform integer in `min..=max`; collapses to `min` for an empty range.
pub(crate) fn int(rng: &mut dyn RngCore, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

pub(crate) fn chance(rng: &mut dyn RngCore, probability: f64) -> bool {
    rng.random::<f64>() < probability
}

pub(crate) fn pick<'a, T>(rng: &mut dyn RngCore, items: &'a [T]) -> &'a T {
    let last = i64::try_from(items.len()).unwrap_or(i64::MAX) - 1;
    let idx = usize::try_from(int(rng, 0, last)).unwrap_or(0);
    &items[idx]
}

/// Resample until `attempt` yields a question, signalling skip when it never does.
pub(crate) fn resample(
    rng: &mut dyn RngCore,
    mut attempt: impl FnMut(&mut dyn RngCore) -> Option<Question>,
) -> Generated {
    for _ in 0..RESAMPLE_ATTEMPTS {
        if let Some(question) = attempt(rng) {
            return Generated::Ready(question);
        }
    }
    Generated::Skip
}

pub(crate) fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Lowest-terms fraction literal, or a whole number when it divides evenly.
///
/// Callers never pass a zero denominator.
pub(crate) fn simplify_fraction(numerator: i64, denominator: i64) -> String {
    if numerator == 0 {
        return "0".to_owned();
    }
    let divisor = gcd(numerator, denominator).max(1);
    let (mut num, mut den) = (numerator / divisor, denominator / divisor);
    if den < 0 {
        num = -num;
        den = -den;
    }
    if den == 1 {
        num.to_string()
    } else {
        format!("{num}/{den}")
    }
}

/// Decimal text rounded to `places`, trailing zeros removed.
pub(crate) fn decimal_text(value: f64, places: usize) -> String {
    let formatted = format!("{value:.places$}");
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// `+ 4` / `- 4` for writing a signed term after another term.
pub(crate) fn signed_term(value: i64) -> String {
    if value >= 0 {
        format!("+ {value}")
    } else {
        format!("- {}", value.abs())
    }
}

/// `12,345` style grouping used in place-value prompts.
pub(crate) fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplify_fraction_reduces_and_normalises_sign() {
        assert_eq!(simplify_fraction(2, 4), "1/2");
        assert_eq!(simplify_fraction(6, 3), "2");
        assert_eq!(simplify_fraction(0, 7), "0");
        assert_eq!(simplify_fraction(3, -6), "-1/2");
        assert_eq!(simplify_fraction(14, 8), "7/4");
    }

    #[test]
    fn decimal_text_trims() {
        assert_eq!(decimal_text(0.1 + 0.2, 5), "0.3");
        assert_eq!(decimal_text(45.0, 5), "45");
        assert_eq!(decimal_text(0.0234, 5), "0.0234");
    }

    #[test]
    fn group_thousands_inserts_commas() {
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-45_000), "-45,000");
    }

    #[test]
    fn signed_term_formats_both_signs() {
        assert_eq!(signed_term(4), "+ 4");
        assert_eq!(signed_term(-4), "- 4");
        assert_eq!(signed_term(0), "+ 0");
    }

    #[test]
    fn retired_generator_always_skips() {
        let mut rng = rand::rng();
        assert_eq!(retired(&mut rng), Generated::Skip);
    }
}
