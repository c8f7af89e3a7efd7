use rand::{Rng, RngCore};

/// Placeholder replaced with the learner's display name.
const LEARNER: &str = "{learner}";

pub const MOTIVATIONAL_MESSAGES: [&str; 13] = [
    "Keep pushing, you're doing great!",
    "Every problem solved makes you stronger!",
    "Focus and determination lead to success!",
    "Believe in your ability to figure it out!",
    "Mistakes are learning opportunities. Keep trying!",
    "You've got this, {learner}!",
    "One question at a time.",
    "Embrace the challenge!",
    "Math power activated!",
    "Stay sharp, stay focused!",
    "Precision and practice make perfect.",
    "Excellent effort!",
    "Keep that brain working!",
];

/// Pick a message uniformly at random, personalised for `learner`.
#[must_use]
pub fn motivational_message(rng: &mut dyn RngCore, learner: &str) -> String {
    let index = rng.random_range(0..MOTIVATIONAL_MESSAGES.len());
    MOTIVATIONAL_MESSAGES[index].replace(LEARNER, learner)
}

/// `hudson` is greeted as `Hudson`.
pub(crate) fn learner_name(profile: &str) -> String {
    let mut chars = profile.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
