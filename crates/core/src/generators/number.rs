//! Arithmetic, place value, fractions, decimals and percentages.

use rand::RngCore;

use super::{chance, decimal_text, group_thousands, int, pick, resample, simplify_fraction};
use crate::checker::AnswerChecker;
use crate::model::{Answer, Generated, Question};

const FRACTION_HINT: &str = "(Give answer as a fraction e.g. a/b or a whole number)";

/// `p%` of a round quantity, `p` a multiple of five.
pub fn percentage_of_quantity(rng: &mut dyn RngCore) -> Generated {
    let percent = int(rng, 1, 19) * 5;
    let quantity = int(rng, 2, 20) * 10;
    let value = percent as f64 / 100.0 * quantity as f64;
    Generated::Ready(Question::new(
        format!("Calculate {percent}% of {quantity}"),
        Answer::text(decimal_text(value, 5)),
    ))
}

/// Friendly percentages of quantities chosen so the result stays whole.
pub fn percentage_simple(rng: &mut dyn RngCore) -> Generated {
    let percent = *pick(rng, &[10, 20, 25, 50, 75]);
    let quantity = match percent {
        10 | 20 => int(rng, 2, 15) * 10,
        25 | 75 => int(rng, 2, 10) * 4,
        _ => int(rng, 2, 20) * 2,
    };
    Generated::Ready(Question::new(
        format!("Calculate {percent}% of {quantity}"),
        Answer::number((percent * quantity) as f64 / 100.0),
    ))
}

/// Two fractions over the same denominator; the sum may be improper.
pub fn fraction_addition_same_denominator(rng: &mut dyn RngCore) -> Generated {
    let d = int(rng, 3, 12);
    let n1 = int(rng, 1, d - 1);
    let n2 = int(rng, 1, d + 5);
    Generated::Ready(Question::new(
        format!("Calculate: {n1}/{d} + {n2}/{d}\n{FRACTION_HINT}"),
        Answer::text(simplify_fraction(n1 + n2, d)),
    ))
}

/// Signed products, mostly avoiding the trivial factors 0 and ±1.
pub fn integer_multiplication(rng: &mut dyn RngCore) -> Generated {
    let n1 = non_trivial_factor(rng);
    let n2 = non_trivial_factor(rng);
    Generated::Ready(Question::new(
        format!("Calculate: ({n1}) × ({n2})"),
        Answer::number((n1 * n2) as f64),
    ))
}

fn non_trivial_factor(rng: &mut dyn RngCore) -> i64 {
    let n = int(rng, -12, 12);
    if n.abs() <= 1 && chance(rng, 0.7) {
        let sign = if chance(rng, 0.5) { 1 } else { -1 };
        int(rng, 2, 12) * sign
    } else {
        n
    }
}

/// Digit or digit value at a named place in a large number.
///
/// The asked-about digit is unique within the number so the question has a
/// single reading.
pub fn place_value_large(rng: &mut dyn RngCore) -> Generated {
    resample(rng, |rng| {
        let place = *pick(rng, &[1_000_i64, 10_000, 100_000, 1_000_000]);
        let digit = int(rng, 1, 9);
        let number = digit * place + int(rng, 0, place - 1);
        let shown = group_thousands(number);
        let digit_char = char::from_digit(u32::try_from(digit).ok()?, 10)?;
        if shown.matches(digit_char).count() != 1 {
            return None;
        }
        let question = match place {
            1_000 => Question::new(
                format!("In {shown}, what digit is in the thousands place?"),
                Answer::number(digit as f64),
            ),
            10_000 => Question::new(
                format!("In {shown}, what digit is in the ten thousands place?"),
                Answer::number(digit as f64),
            ),
            _ => Question::new(
                format!("In {shown}, what is the value of the digit {digit}?"),
                Answer::number((digit * place) as f64),
            ),
        };
        Some(question)
    })
}

/// Multiply or divide by 10, 100 or 1000.
pub fn mult_div_powers_of_ten(rng: &mut dyn RngCore) -> Generated {
    let whole = int(rng, 1, 500);
    let value = if chance(rng, 0.5) { whole as f64 } else { whole as f64 / 10.0 };
    let power = 10_f64.powi(i32::try_from(int(rng, 1, 3)).unwrap_or(1));
    let shown = decimal_text(value, 5);
    let power_shown = decimal_text(power, 0);
    let (prompt, result) = if chance(rng, 0.5) {
        (format!("Calculate: {shown} × {power_shown}"), value * power)
    } else {
        (format!("Calculate: {shown} ÷ {power_shown}"), value / power)
    };
    Generated::Ready(Question::new(prompt, Answer::text(decimal_text(result, 5))))
}

/// Five-digit addition or subtraction with a non-negative result.
pub fn add_sub_large(rng: &mut dyn RngCore) -> Generated {
    let a = int(rng, 1_000, 99_999);
    let b = int(rng, 1_000, a);
    let (op, result) = if chance(rng, 0.5) { ('+', a + b) } else { ('-', a - b) };
    Generated::Ready(Question::new(
        format!("Calculate: {} {op} {}", group_thousands(a), group_thousands(b)),
        Answer::number(result as f64),
    ))
}

/// Three-digit by two-digit multiplication.
pub fn multiplication_multi_digit(rng: &mut dyn RngCore) -> Generated {
    let a = int(rng, 100, 999);
    let b = int(rng, 10, 99);
    Generated::Ready(Question::new(
        format!("Calculate: {a} × {b}"),
        Answer::number((a * b) as f64),
    ))
}

/// Exact division by a single digit.
pub fn division_simple(rng: &mut dyn RngCore) -> Generated {
    let divisor = int(rng, 2, 9);
    let quotient = int(rng, 20, 200);
    Generated::Ready(Question::new(
        format!("Calculate: {} ÷ {divisor}", divisor * quotient),
        Answer::number(quotient as f64),
    ))
}

/// Classify a number between 2 and 100.
pub fn prime_or_composite(rng: &mut dyn RngCore) -> Generated {
    let n = int(rng, 2, 100);
    let answer = if is_prime(n) { "prime" } else { "composite" };
    Generated::Ready(Question::new(
        format!("Is the number {n} prime or composite?"),
        Answer::text(answer),
    ))
}

fn is_prime(n: i64) -> bool {
    n > 1 && (2..).take_while(|i| i * i <= n).all(|i| n % i != 0)
}

/// `>`, `<` or `=` between fractions whose denominators are multiples.
pub fn compare_fractions_related(rng: &mut dyn RngCore) -> Generated {
    let factor = int(rng, 2, 4);
    let d1 = int(rng, 2, 6);
    let d2 = d1 * factor;
    let n1 = int(rng, 1, d1 - 1);
    let mut n2 = int(rng, 1, d2 - 1);
    // Equal pairs are valid but kept rare.
    if n1 * d2 == n2 * d1 && chance(rng, 0.7) {
        n2 = int(rng, 1, d2 - 1);
    }
    let answer = match (n1 * d2).cmp(&(n2 * d1)) {
        std::cmp::Ordering::Greater => ">",
        std::cmp::Ordering::Less => "<",
        std::cmp::Ordering::Equal => "=",
    };
    Generated::Ready(Question::new(
        format!("Compare the fractions: {n1}/{d1} and {n2}/{d2}. Enter >, <, or =."),
        Answer::text(answer),
    ))
}

/// Add or subtract fractions where one denominator divides the other.
///
/// Subtraction always puts the larger fraction first.
pub fn add_sub_fractions_related(rng: &mut dyn RngCore) -> Generated {
    let factor = int(rng, 2, 3);
    let d1 = int(rng, 2, 5);
    let d2 = d1 * factor;
    let n1 = int(rng, 1, d1 - 1);
    let n2 = int(rng, 1, d2 - 1);
    let n1_scaled = n1 * factor;
    let (prompt, numerator) = if chance(rng, 0.5) {
        (format!("Calculate: {n1}/{d1} + {n2}/{d2}"), n1_scaled + n2)
    } else if n1_scaled >= n2 {
        (format!("Calculate: {n1}/{d1} - {n2}/{d2}"), n1_scaled - n2)
    } else {
        (format!("Calculate: {n2}/{d2} - {n1}/{d1}"), n2 - n1_scaled)
    };
    Generated::Ready(Question::new(
        format!("{prompt}\n{FRACTION_HINT}"),
        Answer::text(simplify_fraction(numerator, d2)),
    ))
}

/// One-decimal-place number times a small whole number.
pub fn decimal_times_whole(rng: &mut dyn RngCore) -> Generated {
    let decimal = int(rng, 1, 99) as f64 / 10.0;
    let whole = int(rng, 2, 12);
    Generated::Ready(Question::new(
        format!("Calculate: {} × {whole}", decimal_text(decimal, 1)),
        Answer::number(decimal * whole as f64),
    ))
}

const FRACTION_DECIMAL_PAIRS: [(&str, f64); 9] = [
    ("1/2", 0.5),
    ("1/4", 0.25),
    ("3/4", 0.75),
    ("1/5", 0.2),
    ("2/5", 0.4),
    ("3/5", 0.6),
    ("4/5", 0.8),
    ("1/10", 0.1),
    ("3/10", 0.3),
];

/// Convert between a common fraction and its decimal in either direction.
///
/// The decimal-to-fraction direction overrides the skill's tolerance checker
/// with fraction equivalence.
pub fn fraction_decimal_conversion(rng: &mut dyn RngCore) -> Generated {
    let (fraction, decimal) = *pick(rng, &FRACTION_DECIMAL_PAIRS);
    let question = if chance(rng, 0.5) {
        Question::new(
            format!("Convert {fraction} to a decimal."),
            Answer::number(decimal),
        )
    } else {
        Question::new(
            format!("Convert {} to a simple fraction (e.g., a/b).", decimal_text(decimal, 2)),
            Answer::text(fraction),
        )
        .with_checker(AnswerChecker::FractionEquivalent)
    };
    Generated::Ready(question)
}
