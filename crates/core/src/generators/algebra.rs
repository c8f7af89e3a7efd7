//! Equations, expansion, sequences and order of operations.

use rand::RngCore;

use super::{chance, int, pick, resample, signed_term};
use crate::model::{Answer, Generated, Question};

/// `ax + b = c` with an integer solution.
pub fn linear_equation_simple(rng: &mut dyn RngCore) -> Generated {
    let a = int(rng, 2, 9);
    let b = int(rng, -10, 10);
    let x = int(rng, -5, 5);
    let c = a * x + b;
    Generated::Ready(Question::new(
        format!("Solve for x: {a}x {} = {c}", signed_term(b)),
        Answer::number(x as f64),
    ))
}

/// `ax + b = cx + d` with `a > c` so the x terms never cancel.
pub fn linear_equation_both_sides(rng: &mut dyn RngCore) -> Generated {
    let a = int(rng, 2, 9);
    let c = int(rng, 1, a - 1);
    let x = int(rng, -5, 5);
    let b = int(rng, -10, 10);
    let d = b + (a - c) * x;
    let rhs_constant = if d == 0 { String::new() } else { format!(" {}", signed_term(d)) };
    Generated::Ready(Question::new(
        format!(
            "Solve for x: {a}x {} = {}x{rhs_constant}",
            signed_term(b),
            coefficient(c)
        ),
        Answer::number(x as f64),
    ))
}

/// `a(bx + c)` expanded to `abx+ac`.
pub fn expand_single_bracket(rng: &mut dyn RngCore) -> Generated {
    resample(rng, |rng| {
        let a = int(rng, 2, 7);
        let b = int(rng, 1, 5);
        let c = int(rng, -7, 7);
        if c == 0 {
            return None;
        }
        let constant = a * c;
        let sign = if constant >= 0 { '+' } else { '-' };
        Some(Question::new(
            format!(
                "Expand: {a}({}x {})\n(Format: ax+b or ax-b, e.g., 6x+4)",
                coefficient(b),
                signed_term(c)
            ),
            Answer::text(format!("{}x{sign}{}", a * b, constant.abs())),
        ))
    })
}

/// Next term of an arithmetic sequence.
pub fn pattern_add_sub(rng: &mut dyn RngCore) -> Generated {
    let start = int(rng, 1, 50);
    let step = int(rng, 2, 15) * if chance(rng, 0.5) { 1 } else { -1 };
    let terms: Vec<String> = (0..4).map(|i| (start + i * step).to_string()).collect();
    let next = start + 4 * step;
    Generated::Ready(Question::new(
        format!("What is the next number in the pattern: {}, ...?", terms.join(", ")),
        Answer::number(next as f64),
    ))
}

/// Describe the rule of a sequence in words.
pub fn find_rule(rng: &mut dyn RngCore) -> Generated {
    let (terms, rule) = match *pick(rng, &[Rule::Add, Rule::Subtract, Rule::Multiply]) {
        Rule::Add => {
            let (start, step) = (int(rng, 1, 20), int(rng, 2, 9));
            let terms: Vec<i64> = (0..4).map(|i| start + i * step).collect();
            (terms, format!("add {step}"))
        }
        Rule::Subtract => {
            let (start, step) = (int(rng, 30, 60), int(rng, 2, 9));
            let terms: Vec<i64> = (0..4).map(|i| start - i * step).collect();
            (terms, format!("subtract {step}"))
        }
        Rule::Multiply => {
            let (start, factor) = (int(rng, 2, 5), int(rng, 2, 3));
            let terms: Vec<i64> = (0..4u32).map(|i| start * factor.pow(i)).collect();
            (terms, format!("multiply by {factor}"))
        }
    };
    let terms: Vec<String> = terms.iter().map(ToString::to_string).collect();
    Generated::Ready(Question::new(
        format!(
            "What is the rule for this pattern: {}, ...? (e.g., 'add 5')",
            terms.join(", ")
        ),
        Answer::text(rule),
    ))
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Add,
    Subtract,
    Multiply,
}

/// Mixed expression where precedence or brackets change the result.
pub fn order_of_operations(rng: &mut dyn RngCore) -> Generated {
    let (expression, value) = match int(rng, 0, 3) {
        0 => {
            let (a, b, c) = (int(rng, 2, 10), int(rng, 2, 10), int(rng, 2, 10));
            (format!("{a} + {b} × {c}"), a + b * c)
        }
        1 => {
            let (a, b, c) = (int(rng, 2, 10), int(rng, 2, 10), int(rng, 2, 10));
            (format!("({a} + {b}) × {c}"), (a + b) * c)
        }
        2 => {
            let (a, b) = (int(rng, 5, 12), int(rng, 5, 12));
            let c = int(rng, 2, a * b - 1);
            (format!("{a} × {b} - {c}"), a * b - c)
        }
        _ => {
            let (a, b, c) = (int(rng, 1, 10), int(rng, 2, 8), int(rng, 2, 8));
            let d = int(rng, 1, a + b * c);
            (format!("{a} + {b} × {c} - {d}"), a + b * c - d)
        }
    };
    Generated::Ready(Question::new(
        format!("Calculate: {expression}"),
        Answer::number(value as f64),
    ))
}

/// `x` rather than `1x`.
fn coefficient(value: i64) -> String {
    if value == 1 { String::new() } else { value.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testing::sample;

    fn parse_number(question: &Question) -> f64 {
        question
            .answer()
            .as_check_text()
            .parse()
            .expect("numeric answer")
    }

    #[test]
    fn simple_equation_answer_satisfies_prompt() {
        for question in sample(linear_equation_simple, 50) {
            let prompt = question.prompt().trim_start_matches("Solve for x: ");
            let (lhs, rhs) = prompt.split_once(" = ").expect("equation");
            let (a, rest) = lhs.split_once("x ").expect("x term");
            let b: i64 = rest.replace(' ', "").parse().expect("constant");
            let a: i64 = a.parse().expect("coefficient");
            let c: i64 = rhs.parse().expect("rhs");
            let x = parse_number(&question) as i64;
            assert_eq!(a * x + b, c, "{}", question.prompt());
        }
    }

    #[test]
    fn both_sides_solution_is_integer_in_range() {
        for question in sample(linear_equation_both_sides, 50) {
            let x = parse_number(&question);
            assert!((-5.0..=5.0).contains(&x));
            assert_eq!(x.fract(), 0.0);
        }
    }

    #[test]
    fn expansion_never_has_zero_constant() {
        for question in sample(expand_single_bracket, 50) {
            let answer = question.answer().as_check_text().into_owned();
            assert!(!answer.ends_with("+0") && !answer.ends_with("-0"), "{answer}");
            assert!(answer.contains('x'));
        }
    }

    #[test]
    fn rule_answers_use_known_phrasing() {
        for question in sample(find_rule, 40) {
            let answer = question.answer().as_check_text().into_owned();
            assert!(
                answer.starts_with("add ")
                    || answer.starts_with("subtract ")
                    || answer.starts_with("multiply by "),
                "{answer}"
            );
        }
    }

    #[test]
    fn order_of_operations_results_are_non_negative() {
        for question in sample(order_of_operations, 80) {
            assert!(parse_number(&question) >= 0.0, "{}", question.prompt());
        }
    }
}
