//! Answer comparison strategies.
//!
//! Every checker is total: malformed input of any kind grades as incorrect.

use crate::model::Answer;

/// Fraction answers are compared as floats within this distance.
pub const FRACTION_EPSILON: f64 = 1e-4;

/// Comparison strategy selected per skill at registration time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerChecker {
    /// Both sides parse as numbers and are exactly equal.
    ExactNumeric,
    /// Both sides parse as numbers and differ by less than the epsilon.
    Tolerance(f64),
    /// Whitespace-stripped, lowercased strings are equal.
    NormalizedText,
    /// `n/d`, integer or decimal forms that denote the same value.
    FractionEquivalent,
}

/// Hint to the presentation layer about what kind of input a checker expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Numeric,
    Fraction,
    Text,
}

impl AnswerChecker {
    #[must_use]
    pub fn check(&self, user_input: &str, canonical: &Answer) -> bool {
        let canonical = canonical.as_check_text();
        match *self {
            Self::ExactNumeric => check_numeric(user_input, &canonical),
            Self::Tolerance(epsilon) => check_with_tolerance(user_input, &canonical, epsilon),
            Self::NormalizedText => check_normalized(user_input, &canonical),
            Self::FractionEquivalent => check_fraction(user_input, &canonical),
        }
    }

    #[must_use]
    pub fn input_kind(&self) -> InputKind {
        match self {
            Self::ExactNumeric | Self::Tolerance(_) => InputKind::Numeric,
            Self::FractionEquivalent => InputKind::Fraction,
            Self::NormalizedText => InputKind::Text,
        }
    }
}

#[must_use]
pub fn check_numeric(user_input: &str, canonical: &str) -> bool {
    match (leading_number(user_input), leading_number(canonical)) {
        (Some(user), Some(expected)) => user == expected,
        _ => false,
    }
}

#[must_use]
pub fn check_with_tolerance(user_input: &str, canonical: &str, epsilon: f64) -> bool {
    match (leading_number(user_input), leading_number(canonical)) {
        (Some(user), Some(expected)) => (user - expected).abs() < epsilon,
        _ => false,
    }
}

#[must_use]
pub fn check_normalized(user_input: &str, canonical: &str) -> bool {
    normalize(user_input) == normalize(canonical)
}

#[must_use]
pub fn check_fraction(user_input: &str, canonical: &str) -> bool {
    let Some(expected) = canonical_fraction_value(canonical) else {
        return false;
    };
    let user = if user_input.contains('/') {
        fraction_value(user_input)
    } else {
        leading_number(user_input)
    };
    user.is_some_and(|value| (value - expected).abs() < FRACTION_EPSILON)
}

fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn canonical_fraction_value(canonical: &str) -> Option<f64> {
    if canonical.contains('/') {
        fraction_value(canonical)
    } else {
        strict_number(canonical)
    }
}

/// `n/d` with exactly two strictly numeric parts and a non-zero denominator.
fn fraction_value(raw: &str) -> Option<f64> {
    let mut parts = raw.split('/');
    let numerator = strict_number(parts.next()?)?;
    let denominator = strict_number(parts.next()?)?;
    if parts.next().is_some() || denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

fn strict_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse the longest numeric prefix, so `"12.5 cm"` reads as `12.5`.
fn leading_number(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok().filter(|value| value.is_finite())
}
