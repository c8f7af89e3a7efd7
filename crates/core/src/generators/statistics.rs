//! Averages, simple probability and data interpretation.

use rand::RngCore;

use super::diagram::{Anchor, Svg};
use super::{int, pick, simplify_fraction};
use crate::model::{Answer, Generated, Question};

/// Mean of four to seven values; left unrounded for a tolerance check.
pub fn mean(rng: &mut dyn RngCore) -> Generated {
    let count = int(rng, 4, 7);
    let values: Vec<i64> = (0..count).map(|_| int(rng, 1, 50)).collect();
    let sum: i64 = values.iter().sum();
    let listed = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Generated::Ready(Question::new(
        format!(
            "Calculate the mean (average) of the following numbers: {listed}.\n(Round to 2 decimal places if necessary)."
        ),
        Answer::number(sum as f64 / count as f64),
    ))
}

const DICE_EVENTS: [(&str, i64); 6] = [
    ("rolling an even number", 3),
    ("rolling a number greater than 4", 2),
    ("rolling a prime number (2, 3, 5)", 3),
    ("rolling a multiple of 3 (3, 6)", 2),
    ("rolling a 5", 1),
    ("rolling a number less than 3", 2),
];

/// Probability of a named event on one roll of a fair die.
pub fn dice_probability(rng: &mut dyn RngCore) -> Generated {
    let (event, favourable) = *pick(rng, &DICE_EVENTS);
    Generated::Ready(Question::new(
        format!(
            "A standard fair six-sided die is rolled once. What is the probability of {event}?\n(Give answer as a fraction e.g. a/b or a whole number)"
        ),
        Answer::text(simplify_fraction(favourable, 6)),
    ))
}

/// Probability of drawing a colour from a bag of marbles.
pub fn marble_probability(rng: &mut dyn RngCore) -> Generated {
    let total = int(rng, 8, 20);
    let favourable = int(rng, 1, total - 1);
    let colour = *pick(rng, &["red", "blue", "green", "yellow"]);
    Generated::Ready(Question::new(
        format!(
            "A bag contains {total} marbles. {favourable} are {colour}. What is the probability of picking a {colour} marble?\n(Give answer as a fraction e.g. a/b)"
        ),
        Answer::text(simplify_fraction(favourable, total)),
    ))
}

const PETS: [&str; 3] = ["Cats", "Dogs", "Birds"];

/// Read one bar of a small column graph.
pub fn interpret_column_graph(rng: &mut dyn RngCore) -> Generated {
    let values: Vec<i64> = PETS.iter().map(|_| int(rng, 2, 10)).collect();
    let asked = usize::try_from(int(rng, 0, 2)).unwrap_or(0);
    let data = PETS
        .iter()
        .zip(&values)
        .map(|(pet, value)| format!("{pet}={value}"))
        .collect::<Vec<_>>()
        .join(", ");

    let (bar, gap, base, unit) = (30.0, 20.0, 130.0, 10.0);
    let mut svg = Svg::new(170.0, 150.0, 200);
    svg.line(20.0, 10.0, 20.0, base).line(20.0, base, 160.0, base);
    for (i, (pet, value)) in PETS.iter().zip(&values).enumerate() {
        let x = 20.0 + gap / 2.0 + i as f64 * (bar + gap / 2.0 + 10.0);
        let h = *value as f64 * unit;
        svg.rect(x, base - h, bar, h, "rgba(0,123,255,0.3)")
            .text(x + bar / 2.0, base + 10.0, Anchor::Middle, pet);
    }
    Generated::Ready(
        Question::new(
            format!("How many people chose {}?\nGraph Data: {data}.", PETS[asked]),
            Answer::number(values[asked] as f64),
        )
        .with_diagram(svg.finish()),
    )
}

/// Every outcome of flipping a coin and spinning a small spinner.
pub fn list_outcomes(rng: &mut dyn RngCore) -> Generated {
    let sections = int(rng, 2, 4);
    let labels: Vec<String> = (1..=sections).map(|n| n.to_string()).collect();
    let outcomes = ["Head", "Tail"]
        .iter()
        .flat_map(|side| labels.iter().map(move |label| format!("{side}-{label}")))
        .collect::<Vec<_>>()
        .join(", ");
    Generated::Ready(Question::new(
        format!(
            "A coin is flipped and a {sections}-sided spinner ({}) is spun. List all outcomes (e.g., Head-1). Use comma+space separation.",
            labels.join(",")
        ),
        Answer::text(outcomes),
    ))
}
