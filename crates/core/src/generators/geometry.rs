//! Angles, right triangles, coordinates and transformations.

use rand::RngCore;

use super::diagram::{Anchor, Svg};
use super::{decimal_text, int, pick};
use crate::model::{Answer, Generated, Question};

/// Point at `radius` from `(cx, cy)` at `degrees` measured anticlockwise from
/// the positive x axis, in SVG coordinates (y grows downward).
fn polar(cx: f64, cy: f64, radius: f64, degrees: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    (cx + radius * radians.cos(), cy - radius * radians.sin())
}

/// Unknown angle adjacent to a given one on a straight line.
pub fn angles_on_straight_line(rng: &mut dyn RngCore) -> Generated {
    let known = int(rng, 30, 150);
    let unknown = 180 - known;
    let (width, height, padding) = (250.0, 150.0, 40.0);
    let (cx, cy) = (width / 2.0, height - padding);
    let arm = width / 2.0 - padding;
    // The known angle opens from the left half of the line.
    let (ex, ey) = polar(cx, cy, arm, 180.0 - known as f64);
    let (kx, ky) = polar(cx, cy, 45.0, 180.0 - known as f64 / 2.0);
    let (ux, uy) = polar(cx, cy, 45.0, unknown as f64 / 2.0);
    let mut svg = Svg::new(width, height, 250);
    svg.line(cx - arm, cy, cx + arm, cy)
        .line(cx, cy, ex, ey)
        .text(kx, ky, Anchor::Middle, &format!("{known}°"))
        .text(ux, uy, Anchor::Middle, "x°");
    Generated::Ready(
        Question::new(
            "Find the value of angle x° in the diagram.",
            Answer::number(unknown as f64),
        )
        .with_diagram(svg.finish()),
    )
}

const PYTHAGOREAN_TRIPLES: [(i64, i64, i64); 5] =
    [(3, 4, 5), (6, 8, 10), (5, 12, 13), (8, 15, 17), (7, 24, 25)];

/// Hypotenuse of a right triangle built from a scaled Pythagorean triple.
pub fn pythagoras_hypotenuse(rng: &mut dyn RngCore) -> Generated {
    let (a, b, c) = *pick(rng, &PYTHAGOREAN_TRIPLES);
    let multiplier = int(rng, 1, 2);
    let (mut a, mut b, c) = (a * multiplier, b * multiplier, c * multiplier);
    if int(rng, 0, 1) == 1 {
        std::mem::swap(&mut a, &mut b);
    }
    let padding = 40.0;
    let scale = 120.0 / a.max(b) as f64;
    let (w, h) = (a as f64 * scale, b as f64 * scale);
    let (ox, oy) = (padding, h + padding);
    let mut svg = Svg::new(w + padding * 2.0, h + padding * 2.0, 200);
    svg.line(ox, oy, ox + w, oy)
        .line(ox, oy, ox, oy - h)
        .line(ox + w, oy, ox, oy - h)
        .right_angle_marker(ox, oy)
        .text(ox + w / 2.0, oy + 12.0, Anchor::Middle, &format!("{a} cm"))
        .text(ox - 12.0, oy - h / 2.0, Anchor::End, &format!("{b} cm"))
        .text(ox + w / 2.0 + 8.0, oy - h / 2.0 - 8.0, Anchor::Start, "x cm");
    Generated::Ready(
        Question::new(
            "Find the length of the hypotenuse (x) in this right-angled triangle.",
            Answer::number(c as f64),
        )
        .with_diagram(svg.finish()),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AngleType {
    Acute,
    Right,
    Obtuse,
    Straight,
    Reflex,
}

impl AngleType {
    const ALL: [AngleType; 5] = [
        AngleType::Acute,
        AngleType::Right,
        AngleType::Obtuse,
        AngleType::Straight,
        AngleType::Reflex,
    ];

    fn name(self) -> &'static str {
        match self {
            AngleType::Acute => "acute",
            AngleType::Right => "right",
            AngleType::Obtuse => "obtuse",
            AngleType::Straight => "straight",
            AngleType::Reflex => "reflex",
        }
    }

    fn sample_degrees(self, rng: &mut dyn RngCore) -> i64 {
        match self {
            AngleType::Acute => int(rng, 10, 89),
            AngleType::Right => 90,
            AngleType::Obtuse => int(rng, 91, 179),
            AngleType::Straight => 180,
            AngleType::Reflex => int(rng, 181, 350),
        }
    }
}

/// Name the type of a drawn angle.
pub fn angle_type(rng: &mut dyn RngCore) -> Generated {
    let kind = *pick(rng, &AngleType::ALL);
    let degrees = kind.sample_degrees(rng) as f64;
    let (width, height) = (150.0, 100.0);
    let (cx, cy) = (width / 2.0, height * 0.8);
    let (arm, arc_radius) = (50.0, 20.0);
    let (ex, ey) = polar(cx, cy, arm, degrees);
    let (ax, ay) = polar(cx, cy, arc_radius, degrees);
    let large_arc = u8::from(degrees > 180.0);
    let arc = format!(
        "M {},{cy} A {arc_radius},{arc_radius} 0 {large_arc},0 {},{}",
        decimal_text(cx + arc_radius, 2),
        decimal_text(ax, 2),
        decimal_text(ay, 2)
    );
    let mut svg = Svg::new(width, height, 150);
    svg.line(cx, cy, cx + arm, cy).line(cx, cy, ex, ey);
    if kind == AngleType::Right {
        svg.path(
            &format!("M {},{cy} V {} H {cx}", decimal_text(cx + 8.0, 2), decimal_text(cy - 8.0, 2)),
            "none",
        );
    } else {
        svg.path(&arc, "none");
    }
    Generated::Ready(
        Question::new(
            "What type of angle is shown? (acute, right, obtuse, straight, reflex)",
            Answer::text(kind.name()),
        )
        .with_diagram(svg.finish()),
    )
}

/// Missing angle when three angles share a straight line or four share a point.
pub fn angles_point_line(rng: &mut dyn RngCore) -> Generated {
    let around_point = int(rng, 0, 1) == 0;
    let total: i64 = if around_point { 360 } else { 180 };
    let upper = total * 2 / 5;
    let first = int(rng, 40, upper);
    let second = int(rng, 40, upper);
    let unknown = total - first - second;

    let (width, radius) = (200.0, 60.0);
    let height = if around_point { 150.0 } else { 100.0 };
    let (cx, cy) = (width / 2.0, if around_point { height / 2.0 + 10.0 } else { height * 0.8 });
    let mut svg = Svg::new(width, height, 200);
    let mut heading = 180.0;
    let mut labels = Vec::with_capacity(3);
    for (size, label) in [
        (first, format!("{first}°")),
        (second, format!("{second}°")),
        (unknown, "x°".to_owned()),
    ] {
        let (x, y) = polar(cx, cy, radius, heading);
        svg.line(cx, cy, x, y);
        labels.push((heading - size as f64 / 2.0, label));
        heading -= size as f64;
    }
    if !around_point {
        svg.line(cx, cy, cx + radius, cy);
    }
    for (bisector, label) in labels {
        let (x, y) = polar(cx, cy, radius * 0.55, bisector);
        svg.text(x, y, Anchor::Middle, &label);
    }
    Generated::Ready(
        Question::new("Find the value of angle x°.", Answer::number(unknown as f64))
            .with_diagram(svg.finish()),
    )
}

/// Read a plotted point on a first-quadrant grid.
pub fn coordinates_first_quadrant(rng: &mut dyn RngCore) -> Generated {
    let (x, y) = (int(rng, 1, 10), int(rng, 1, 10));
    let (cells, cell, padding) = (11.0, 15.0, 25.0);
    let size = cells * cell + padding * 2.0;
    let (ox, oy) = (padding, size - padding);
    let mut svg = Svg::new(size, size, 200).with_stroke_width(0.5);
    for i in 1..=11 {
        let offset = f64::from(i) * cell;
        svg.dashed_line(ox + offset, oy, ox + offset, padding)
            .dashed_line(ox, oy - offset, ox + cells * cell, oy - offset);
    }
    let (px, py) = (ox + x as f64 * cell, oy - y as f64 * cell);
    svg.line(ox, padding, ox, oy)
        .line(ox, oy, ox + cells * cell, oy)
        .text(ox + cells * cell + 5.0, oy, Anchor::Start, "x")
        .text(ox, padding - 8.0, Anchor::Middle, "y")
        .dot(px, py, 3.0)
        .text(px + 5.0, py - 6.0, Anchor::Start, "P");
    Generated::Ready(
        Question::new(
            "What are the coordinates of point P? (Format: (x, y))",
            Answer::text(format!("({x}, {y})")),
        )
        .with_diagram(svg.finish()),
    )
}

/// Name the transformation that maps triangle A onto triangle B.
pub fn describe_transformation(rng: &mut dyn RngCore) -> Generated {
    let shape_a = [(0.0, 50.0), (20.0, 10.0), (40.0, 50.0)];
    let (name, verb, shape_b): (&str, &str, Vec<(f64, f64)>) = match int(rng, 0, 2) {
        0 => {
            let (dx, dy) = (int(rng, 60, 90) as f64, int(rng, 0, 20) as f64);
            let moved = shape_a.iter().map(|(x, y)| (x + dx, y + dy)).collect();
            ("translation", "moved", moved)
        }
        1 => {
            let axis = int(rng, 50, 80) as f64;
            let flipped = shape_a.iter().map(|(x, y)| (2.0 * axis - x, *y)).collect();
            ("reflection", "flipped", flipped)
        }
        _ => {
            // Quarter turn about (50, 50).
            let turned = shape_a
                .iter()
                .map(|(x, y)| (50.0 + (50.0 - y), 50.0 - (50.0 - x)))
                .collect();
            ("rotation", "turned", turned)
        }
    };
    let mut svg = Svg::new(170.0, 100.0, 200);
    svg.polygon(&shape_a, "rgba(0,123,255,0.3)")
        .text(20.0, 60.0, Anchor::Middle, "A")
        .polygon(&shape_b, "rgba(40,167,69,0.3)");
    if let Some((x, y)) = shape_b.get(1) {
        svg.text(*x, y - 6.0, Anchor::Middle, "B");
    }
    Generated::Ready(
        Question::new(
            format!(
                "Shape A has been {verb} to position B. What type of transformation is this? (translation, reflection, or rotation)"
            ),
            Answer::text(name),
        )
        .with_diagram(svg.finish()),
    )
}
