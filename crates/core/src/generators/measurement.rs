//! Area, perimeter, unit conversion and time.

use std::f64::consts::PI;

use rand::RngCore;

use super::diagram::{Anchor, Svg};
use super::{chance, decimal_text, int, pick};
use crate::model::{Answer, Diagram, Generated, Question};

const SHAPE_PADDING: f64 = 40.0;
const SHAPE_SPAN: f64 = 150.0;
const LABEL_OFFSET: f64 = 12.0;
const ROUND_ONE_DP: &str = "(Round final answer to 1 decimal place).";

// ─── RECTANGLES ──────────────────────────────────────────────────────────────

pub fn area_rectangle(rng: &mut dyn RngCore) -> Generated {
    rectangle_area(rng, 20)
}

/// Rectangle area with sides up to 15.
pub fn area_rectangle_small(rng: &mut dyn RngCore) -> Generated {
    rectangle_area(rng, 15)
}

pub fn perimeter_rectangle(rng: &mut dyn RngCore) -> Generated {
    rectangle_perimeter(rng, 20)
}

/// Rectangle perimeter with sides up to 15.
pub fn perimeter_rectangle_small(rng: &mut dyn RngCore) -> Generated {
    rectangle_perimeter(rng, 15)
}

fn rectangle_sides(rng: &mut dyn RngCore, max_length: i64) -> (i64, i64) {
    let length = int(rng, 5, max_length);
    let width = int(rng, 3, (length - 1).max(4));
    (length, width)
}

fn rectangle_area(rng: &mut dyn RngCore, max_length: i64) -> Generated {
    let (length, width) = rectangle_sides(rng, max_length);
    Generated::Ready(
        Question::new(
            "Calculate the area of the rectangle shown (in cm²).",
            Answer::number((length * width) as f64),
        )
        .with_diagram(rectangle_diagram(length, width, "cm")),
    )
}

fn rectangle_perimeter(rng: &mut dyn RngCore, max_length: i64) -> Generated {
    let (length, width) = rectangle_sides(rng, max_length);
    Generated::Ready(
        Question::new(
            "Calculate the perimeter of the rectangle shown (in m).",
            Answer::number((2 * (length + width)) as f64),
        )
        .with_diagram(rectangle_diagram(length, width, "m")),
    )
}

fn rectangle_diagram(length: i64, width: i64, unit: &str) -> Diagram {
    let scale = SHAPE_SPAN / length.max(width) as f64;
    let (w, h) = (length as f64 * scale, width as f64 * scale);
    let (x, y) = (SHAPE_PADDING, SHAPE_PADDING);
    let mut svg = Svg::new(w + SHAPE_PADDING * 2.0, h + SHAPE_PADDING * 2.0, 250);
    svg.rect(x, y, w, h, "rgba(0,123,255,0.1)")
        .text(x + w / 2.0, y - LABEL_OFFSET, Anchor::Middle, &format!("{length} {unit}"))
        .text(x - LABEL_OFFSET, y + h / 2.0, Anchor::End, &format!("{width} {unit}"));
    svg.finish()
}

// ─── CIRCLES AND COMPOSITES ──────────────────────────────────────────────────

/// Circle area from a radius; answer kept at full precision for a tolerance check.
pub fn area_circle(rng: &mut dyn RngCore) -> Generated {
    let radius = int(rng, 3, 15);
    let size = 200.0;
    let centre = size / 2.0;
    let shown_radius = centre - SHAPE_PADDING;
    let mut svg = Svg::new(size, size, 180);
    svg.circle(centre, centre, shown_radius, "rgba(40,167,69,0.1)")
        .dashed_line(centre, centre, centre + shown_radius, centre)
        .dot(centre, centre, 2.0)
        .text(centre + shown_radius / 2.0, centre - 10.0, Anchor::Middle, &format!("{radius} mm"));
    Generated::Ready(
        Question::new(
            format!("Calculate the area of the circle shown (in mm²). Use π ≈ 3.14159.\n{ROUND_ONE_DP}"),
            Answer::number(PI * (radius * radius) as f64),
        )
        .with_diagram(svg.finish()),
    )
}

/// Outer rectangle `W × H` with a `w × h` notch cut from one corner.
#[derive(Debug, Clone, Copy)]
struct LShape {
    outer_w: i64,
    outer_h: i64,
    notch_w: i64,
    notch_h: i64,
}

impl LShape {
    fn sample(rng: &mut dyn RngCore) -> Self {
        let outer_w = int(rng, 10, 20);
        let outer_h = int(rng, 10, 20);
        Self {
            outer_w,
            outer_h,
            notch_w: int(rng, 3, outer_w - 3),
            notch_h: int(rng, 3, outer_h - 3),
        }
    }

    fn area(self) -> i64 {
        self.outer_w * self.outer_h - self.notch_w * self.notch_h
    }

    /// Cutting a corner notch never changes the perimeter.
    fn perimeter(self) -> i64 {
        2 * (self.outer_w + self.outer_h)
    }

    fn diagram(self) -> Diagram {
        let scale = SHAPE_SPAN / self.outer_w.max(self.outer_h) as f64;
        let (big_w, big_h) = (self.outer_w as f64 * scale, self.outer_h as f64 * scale);
        let (small_w, small_h) = (self.notch_w as f64 * scale, self.notch_h as f64 * scale);
        let (ox, oy) = (SHAPE_PADDING, SHAPE_PADDING);
        let outline = format!(
            "M {ox},{oy} H {} V {} H {} V {} H {ox} Z",
            decimal_text(ox + big_w, 2),
            decimal_text(oy + big_h, 2),
            decimal_text(ox + small_w, 2),
            decimal_text(oy + small_h, 2),
        );
        let mut svg = Svg::new(big_w + SHAPE_PADDING * 2.0, big_h + SHAPE_PADDING * 2.0, 250);
        svg.path(&outline, "rgba(253,126,20,0.1)")
            .text(ox + big_w / 2.0, oy - LABEL_OFFSET, Anchor::Middle, &format!("{} u", self.outer_w))
            .text(ox + big_w + LABEL_OFFSET, oy + big_h / 2.0, Anchor::Start, &format!("{} u", self.outer_h))
            .text(
                ox + small_w + (big_w - small_w) / 2.0,
                oy + big_h + LABEL_OFFSET,
                Anchor::Middle,
                &format!("{} u", self.outer_w - self.notch_w),
            )
            .text(
                ox - LABEL_OFFSET,
                oy + small_h + (big_h - small_h) / 2.0,
                Anchor::End,
                &format!("{} u", self.outer_h - self.notch_h),
            );
        svg.finish()
    }
}

pub fn area_l_shape(rng: &mut dyn RngCore) -> Generated {
    let shape = LShape::sample(rng);
    Generated::Ready(
        Question::new(
            "Calculate the area of the L-shaped figure shown (in u²).",
            Answer::number(shape.area() as f64),
        )
        .with_diagram(shape.diagram()),
    )
}

pub fn perimeter_l_shape(rng: &mut dyn RngCore) -> Generated {
    let shape = LShape::sample(rng);
    Generated::Ready(
        Question::new(
            "Calculate the perimeter of the L-shaped figure shown (in u).",
            Answer::number(shape.perimeter() as f64),
        )
        .with_diagram(shape.diagram()),
    )
}

/// Rectangle `W × H` capped on its right edge by a semicircle of diameter `H`.
#[derive(Debug, Clone, Copy)]
struct RectSemicircle {
    width: i64,
    height: i64,
}

impl RectSemicircle {
    fn sample(rng: &mut dyn RngCore) -> Self {
        let mut height = int(rng, 6, 16);
        if height % 2 != 0 {
            height += 1;
        }
        Self {
            width: int(rng, height, 20),
            height,
        }
    }

    fn radius(self) -> f64 {
        self.height as f64 / 2.0
    }

    fn area(self) -> f64 {
        (self.width * self.height) as f64 + 0.5 * PI * self.radius() * self.radius()
    }

    /// Three straight sides plus the arc; the shared edge is interior.
    fn perimeter(self) -> f64 {
        (2 * self.height + self.width) as f64 + PI * self.radius()
    }

    fn diagram(self, filled: bool) -> Diagram {
        let padding = 35.0;
        let scale = SHAPE_SPAN / (self.width as f64 + self.radius());
        let (w, h, r) = (
            self.width as f64 * scale,
            self.height as f64 * scale,
            self.radius() * scale,
        );
        let (ox, oy) = (padding, padding);
        let arc = format!(
            "M {},{oy} A {},{} 0 0,1 {},{}",
            decimal_text(ox + w, 2),
            decimal_text(r, 2),
            decimal_text(r, 2),
            decimal_text(ox + w, 2),
            decimal_text(oy + h, 2),
        );
        let mut svg = Svg::new(w + r + padding * 2.0, h + padding * 2.0, 250);
        if filled {
            svg.rect(ox, oy, w, h, "rgba(0,123,255,0.1)")
                .path(&arc, "rgba(40,167,69,0.1)");
        } else {
            svg.line(ox, oy, ox + w, oy)
                .line(ox, oy, ox, oy + h)
                .line(ox, oy + h, ox + w, oy + h)
                .path(&arc, "none");
        }
        svg.text(ox + w / 2.0, oy - 10.0, Anchor::Middle, &format!("{} u", self.width))
            .text(ox - 10.0, oy + h / 2.0, Anchor::End, &format!("{} u", self.height));
        svg.finish()
    }
}

pub fn area_rect_semicircle(rng: &mut dyn RngCore) -> Generated {
    let shape = RectSemicircle::sample(rng);
    Generated::Ready(
        Question::new(
            format!(
                "Calculate the total area (rectangle + semi-circle) shown (in u²). Use π≈3.14159.\n{ROUND_ONE_DP}"
            ),
            Answer::number(shape.area()),
        )
        .with_diagram(shape.diagram(true)),
    )
}

pub fn perimeter_rect_semicircle(rng: &mut dyn RngCore) -> Generated {
    let shape = RectSemicircle::sample(rng);
    Generated::Ready(
        Question::new(
            format!(
                "Calculate the perimeter of the composite shape shown (in u). Use π≈3.14159.\n{ROUND_ONE_DP}"
            ),
            Answer::number(shape.perimeter()),
        )
        .with_diagram(shape.diagram(false)),
    )
}

/// Right triangle area from base and perpendicular height.
pub fn area_triangle(rng: &mut dyn RngCore) -> Generated {
    let base = int(rng, 4, 16);
    let height = int(rng, 3, 12);
    let padding = 35.0;
    let scale = SHAPE_SPAN / base.max(height) as f64;
    let (b, h) = (base as f64 * scale, height as f64 * scale);
    let (ox, oy) = (padding, h + padding);
    let mut svg = Svg::new(b + padding * 2.0, h + padding * 2.0, 200);
    svg.polygon(&[(ox, oy), (ox + b, oy), (ox, oy - h)], "rgba(0,180,90,0.1)")
        .right_angle_marker(ox, oy)
        .text(ox + b / 2.0, oy + LABEL_OFFSET, Anchor::Middle, &format!("{base} cm"))
        .text(ox - LABEL_OFFSET, oy - h / 2.0, Anchor::End, &format!("{height} cm"));
    Generated::Ready(
        Question::new(
            "Calculate the area of the triangle shown (in cm²).\n(Area = 1/2 × base × height)",
            Answer::number(0.5 * (base * height) as f64),
        )
        .with_diagram(svg.finish()),
    )
}

// ─── UNITS AND TIME ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Conversion {
    from: &'static str,
    to: &'static str,
    factor: f64,
    min: i64,
    max: i64,
}

const LENGTH_CONVERSIONS: [Conversion; 6] = [
    Conversion { from: "m", to: "cm", factor: 100.0, min: 1, max: 5000 },
    Conversion { from: "cm", to: "m", factor: 0.01, min: 100, max: 9000 },
    Conversion { from: "cm", to: "mm", factor: 10.0, min: 1, max: 5000 },
    Conversion { from: "mm", to: "cm", factor: 0.1, min: 10, max: 500 },
    Conversion { from: "m", to: "mm", factor: 1000.0, min: 1, max: 5 },
    Conversion { from: "mm", to: "m", factor: 0.001, min: 1000, max: 9000 },
];

/// Metric length conversion between m, cm and mm.
pub fn convert_length(rng: &mut dyn RngCore) -> Generated {
    let conversion = *pick(rng, &LENGTH_CONVERSIONS);
    let value = int(rng, conversion.min, conversion.max) as f64;
    Generated::Ready(conversion_question(conversion, value))
}

/// Kilograms (whole or half) to grams, or grams to kilograms.
pub fn convert_mass(rng: &mut dyn RngCore) -> Generated {
    let (conversion, value) = if chance(rng, 0.5) {
        let kg = int(rng, 1, 25) as f64 + if chance(rng, 0.5) { 0.5 } else { 0.0 };
        (Conversion { from: "kg", to: "g", factor: 1000.0, min: 1, max: 25 }, kg)
    } else {
        let grams = int(rng, 500, 9500) as f64;
        (Conversion { from: "g", to: "kg", factor: 0.001, min: 500, max: 9500 }, grams)
    };
    Generated::Ready(conversion_question(conversion, value))
}

fn conversion_question(conversion: Conversion, value: f64) -> Question {
    Question::new(
        format!("Convert {}{} to {}.", decimal_text(value, 1), conversion.from, conversion.to),
        Answer::text(decimal_text(value * conversion.factor, 5)),
    )
}

/// Length of a morning film, answered as `X hours Y minutes`.
pub fn elapsed_time(rng: &mut dyn RngCore) -> Generated {
    let start = int(rng, 7, 10) * 60 + int(rng, 0, 5) * 10;
    let duration = int(rng, 0, 3) * 60 + int(rng, 1, 5) * 10 + int(rng, 0, 5);
    let end = start + duration;
    Generated::Ready(Question::new(
        format!(
            "A movie starts at {} and finishes at {}. How long was the movie? (Format: X hours Y minutes)",
            twelve_hour(start),
            twelve_hour(end)
        ),
        Answer::text(format!("{} hours {} minutes", duration / 60, duration % 60)),
    ))
}

/// Convert a 24-hour clock reading to 12-hour form.
pub fn read_24_hour_time(rng: &mut dyn RngCore) -> Generated {
    let minutes = int(rng, 0, 23) * 60 + int(rng, 0, 59);
    Generated::Ready(Question::new(
        format!(
            "Convert the 24-hour time {:02}:{:02} to 12-hour time (e.g., 3:45 pm).",
            minutes / 60,
            minutes % 60
        ),
        Answer::text(twelve_hour(minutes)),
    ))
}

/// `h:mm am|pm` for minutes since midnight.
fn twelve_hour(minutes_since_midnight: i64) -> String {
    let minutes = minutes_since_midnight.rem_euclid(24 * 60);
    let (hour, minute) = (minutes / 60, minutes % 60);
    let suffix = if hour < 12 { "am" } else { "pm" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour}:{minute:02} {suffix}")
}
