//! Built-in year-level curricula.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, Category, Skill};
use crate::checker::AnswerChecker::{ExactNumeric, FractionEquivalent, NormalizedText, Tolerance};
use crate::generators::{algebra, geometry, measurement, number, statistics};
use crate::model::CategoryId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown grade {0:?}; expected year6 or year9")]
pub struct UnknownGrade(pub String);

/// Year level whose catalog a learner practises.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Year6,
    #[default]
    Year9,
}

impl Grade {
    /// # Errors
    ///
    /// Only fails if a built-in table is malformed.
    pub fn catalog(self) -> Result<Catalog, CatalogError> {
        match self {
            Grade::Year6 => year6(),
            Grade::Year9 => year9(),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::Year6 => "year6",
            Grade::Year9 => "year9",
        }
    }
}

impl FromStr for Grade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year6" | "6" => Ok(Grade::Year6),
            "year9" | "9" => Ok(Grade::Year9),
            other => Err(UnknownGrade(other.to_owned())),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn category(id: &'static str, name: &str, skills: Vec<Skill>) -> Category {
    Category::new(CategoryId::from_static(id), name, skills)
}

/// Year 9: algebra, number, mensuration including composites, Pythagoras,
/// mean and dice probability.
///
/// # Errors
///
/// Only fails if the table itself is malformed.
pub fn year9() -> Result<Catalog, CatalogError> {
    Catalog::new(vec![
        category(
            "algebra",
            "Algebra",
            vec![
                Skill::new("Simple Linear Equations (ax + b = c)", algebra::linear_equation_simple, ExactNumeric),
                Skill::new(
                    "Linear Equations with x on both sides (ax + b = cx + d)",
                    algebra::linear_equation_both_sides,
                    ExactNumeric,
                ),
                Skill::new("Expanding Single Brackets a(bx + c)", algebra::expand_single_bracket, NormalizedText),
            ],
        ),
        category(
            "number",
            "Number",
            vec![
                Skill::new("Percentage of a Quantity", number::percentage_of_quantity, ExactNumeric),
                Skill::new(
                    "Fraction Addition (Same Denominator)",
                    number::fraction_addition_same_denominator,
                    FractionEquivalent,
                ),
                Skill::new("Integer Multiplication", number::integer_multiplication, ExactNumeric),
            ],
        ),
        category(
            "measurement",
            "Measurement",
            vec![
                Skill::new("Area of Rectangle", measurement::area_rectangle, ExactNumeric),
                Skill::new("Perimeter of Rectangle", measurement::perimeter_rectangle, ExactNumeric),
                Skill::new("Area of Circle (given radius)", measurement::area_circle, Tolerance(0.1)),
                Skill::new("Area of L-Shape", measurement::area_l_shape, ExactNumeric),
                Skill::new("Perimeter of L-Shape", measurement::perimeter_l_shape, ExactNumeric),
                Skill::new("Area of Rect+SemiCircle", measurement::area_rect_semicircle, Tolerance(0.1)),
                Skill::new(
                    "Perimeter of Rect+SemiCircle",
                    measurement::perimeter_rect_semicircle,
                    Tolerance(0.1),
                ),
            ],
        ),
        category(
            "geometry",
            "Geometry",
            vec![
                Skill::new("Angles on a Straight Line", geometry::angles_on_straight_line, ExactNumeric),
                Skill::new("Pythagoras (Find Hypotenuse)", geometry::pythagoras_hypotenuse, Tolerance(0.1)),
            ],
        ),
        category(
            "statistics",
            "Statistics & Probability",
            vec![
                Skill::new("Calculate Mean", statistics::mean, Tolerance(0.01)),
                Skill::new("Simple Probability (Dice Roll)", statistics::dice_probability, FractionEquivalent),
            ],
        ),
    ])
}

/// Year 6: place value, fractions and decimals, patterns, everyday
/// measurement, basic geometry and chance.
///
/// Composite shapes and Pythagoras stay registered as retired skills.
///
/// # Errors
///
/// Only fails if the table itself is malformed.
pub fn year6() -> Result<Catalog, CatalogError> {
    Catalog::new(vec![
        category(
            "number",
            "Number & Place Value",
            vec![
                Skill::new("Identify Place Value (Large Numbers)", number::place_value_large, ExactNumeric),
                Skill::new("Multiply/Divide by Powers of 10", number::mult_div_powers_of_ten, ExactNumeric),
                Skill::new("Addition/Subtraction (Large Numbers)", number::add_sub_large, ExactNumeric),
                Skill::new(
                    "Multiplication (e.g., 3-digit x 2-digit)",
                    number::multiplication_multi_digit,
                    ExactNumeric,
                ),
                Skill::new("Division (e.g., 3-digit by 1-digit)", number::division_simple, ExactNumeric),
                Skill::new("Prime/Composite Numbers", number::prime_or_composite, NormalizedText),
            ],
        ),
        category(
            "fractions_decimals",
            "Fractions & Decimals",
            vec![
                Skill::new(
                    "Compare Fractions (Related Denominators)",
                    number::compare_fractions_related,
                    NormalizedText,
                ),
                Skill::new(
                    "Add/Sub Fractions (Related Denominators)",
                    number::add_sub_fractions_related,
                    FractionEquivalent,
                ),
                Skill::new("Multiply Decimals by Whole Number", number::decimal_times_whole, Tolerance(0.001)),
                Skill::new(
                    "Fraction/Decimal Conversion (Simple)",
                    number::fraction_decimal_conversion,
                    Tolerance(0.001),
                ),
                Skill::new("Percentage of Quantity (Simple %)", number::percentage_simple, ExactNumeric),
            ],
        ),
        category(
            "patterns_algebra",
            "Patterns & Algebra",
            vec![
                Skill::new(
                    "Continue Number Pattern (Addition/Subtraction)",
                    algebra::pattern_add_sub,
                    ExactNumeric,
                ),
                Skill::new("Find Rule for Pattern (Simple)", algebra::find_rule, NormalizedText),
                Skill::new("Order of Operations (BODMAS/PEMDAS)", algebra::order_of_operations, ExactNumeric),
            ],
        ),
        category(
            "measurement",
            "Measurement",
            vec![
                Skill::new("Convert Length Units (m, cm, mm)", measurement::convert_length, ExactNumeric),
                Skill::new("Convert Mass Units (kg, g)", measurement::convert_mass, ExactNumeric),
                Skill::new(
                    "Calculate Perimeter (Rectangle)",
                    measurement::perimeter_rectangle_small,
                    ExactNumeric,
                ),
                Skill::new("Calculate Area (Rectangle)", measurement::area_rectangle_small, ExactNumeric),
                Skill::new("Calculate Area (Triangle)", measurement::area_triangle, Tolerance(0.1)),
                Skill::new("Elapsed Time (Hours/Minutes)", measurement::elapsed_time, NormalizedText),
                Skill::new("Read 24-Hour Time", measurement::read_24_hour_time, NormalizedText),
                Skill::retired("Area of Circle (given radius)"),
                Skill::retired("Area of L-Shape"),
            ],
        ),
        category(
            "geometry",
            "Geometry",
            vec![
                Skill::new("Identify Angle Type", geometry::angle_type, NormalizedText),
                Skill::new("Angles on a Point/Line (Simple)", geometry::angles_point_line, ExactNumeric),
                Skill::new(
                    "Coordinates (First Quadrant)",
                    geometry::coordinates_first_quadrant,
                    NormalizedText,
                ),
                Skill::new(
                    "Describe Transformation (Simple)",
                    geometry::describe_transformation,
                    NormalizedText,
                ),
                Skill::retired("Pythagoras (Find Hypotenuse)"),
            ],
        ),
        category(
            "statistics_probability",
            "Statistics & Probability",
            vec![
                Skill::new(
                    "Interpret Column Graph (Simple)",
                    statistics::interpret_column_graph,
                    ExactNumeric,
                ),
                Skill::new(
                    "Calculate Simple Probability (Fraction)",
                    statistics::marble_probability,
                    FractionEquivalent,
                ),
                Skill::new("List Outcomes", statistics::list_outcomes, NormalizedText),
            ],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::model::Generated;

    #[test]
    fn built_in_catalogs_are_well_formed() {
        let year9 = year9().unwrap();
        let year6 = year6().unwrap();
        assert_eq!(year9.len(), 5);
        assert_eq!(year6.len(), 6);
        assert!(year9.categories().iter().all(|c| !c.skills().is_empty()));
    }

    #[test]
    fn every_live_skill_grades_its_own_answer_correct() {
        let mut rng = StdRng::seed_from_u64(11);
        for catalog in [year9().unwrap(), year6().unwrap()] {
            for category in catalog.categories() {
                for skill in category.skills() {
                    for _ in 0..25 {
                        let Generated::Ready(question) = skill.generate(&mut rng) else {
                            continue;
                        };
                        question.validate().unwrap();
                        let checker = question.checker_override().unwrap_or(skill.checker());
                        let canonical = question.answer();
                        assert!(
                            checker.check(&canonical.as_check_text(), canonical),
                            "{} rejected its own answer {:?}",
                            skill.name(),
                            canonical
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn year6_retires_composite_shapes() {
        let catalog = year6().unwrap();
        let measurement = catalog
            .category(&CategoryId::new("measurement").unwrap())
            .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let retired = measurement
            .skills()
            .iter()
            .find(|skill| skill.name() == "Area of L-Shape")
            .unwrap();
        assert_eq!(retired.generate(&mut rng), Generated::Skip);
    }

    #[test]
    fn grade_parses_case_insensitively() {
        assert_eq!("Year6".parse::<Grade>().unwrap(), Grade::Year6);
        assert_eq!("9".parse::<Grade>().unwrap(), Grade::Year9);
        assert!("year7".parse::<Grade>().is_err());
        assert_eq!(Grade::default().to_string(), "year9");
    }
}
