//! Keyword classifier and canned responses.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Returned verbatim whenever a self-harm phrase is detected.
pub const SAFE_SUPPORT_MESSAGE: &str = "I'm here with you, and I want to make sure you're safe. \n\nIf you're in immediate danger, please reach out to emergency services in your area right away. You can also contact a crisis helpline\u{2014}they're available 24/7 and ready to listen.\n\nYour wellbeing matters. Please reach out to someone you trust or a professional who can support you.";

/// Chance that a follow-up question is appended to a reply.
pub const FOLLOW_UP_PROBABILITY: f64 = 0.5;

const SELF_HARM_KEYWORDS: &[&str] = &[
    "kill myself",
    "suicide",
    "end it all",
    "hurt myself",
    "self harm",
    "cutting",
    "not want to live",
];

const OVERWHELM_KEYWORDS: &[&str] = &["overwhelm", "too much", "can't handle"];
const CLARITY_KEYWORDS: &[&str] = &["clarity", "confused", "understand", "unclear"];
const REFLECT_KEYWORDS: &[&str] = &["reflect", "think about", "process"];

const REFLECTIVE_RESPONSES: &[&str] = &[
    "That sounds heavy.",
    "What part feels hardest right now?",
    "We don't need to solve it\u{2014}let's understand it.",
    "Take your time. I'm here.",
    "What does that feel like in your body?",
    "What would it mean if you could let that go?",
    "You're doing the work of noticing. That matters.",
    "Sometimes just naming it helps.",
    "What's underneath that feeling?",
    "You don't have to have it all figured out.",
];

const CLARITY_RESPONSES: &[&str] = &[
    "Let's slow this down together.",
    "What's the one thing that feels most unclear?",
    "Sometimes clarity comes from asking the right questions.",
    "What would help you see this more clearly?",
    "Let's break this into smaller pieces.",
    "What's the first thing that comes to mind?",
    "There's no rush. We can explore this step by step.",
];

const OVERWHELM_RESPONSES: &[&str] = &[
    "I hear you. That's a lot to carry.",
    "Let's take this one thing at a time.",
    "What feels most overwhelming right now?",
    "You don't have to hold it all at once.",
    "Let's breathe together for a moment.",
    "What would help you feel a little lighter?",
    "One step. One breath. We're here.",
];

/// Questions that may trail a reply.
pub const FOLLOW_UPS: &[&str] = &[
    "What comes up when you sit with that?",
    "How does that land for you?",
    "What would it feel like to let that be?",
    "What's one small thing that might help?",
];

/// Coarse categorization of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Overwhelm,
    Clarity,
    Reflect,
    /// Nothing matched; answered from the reflective pool.
    General,
}

/// Case-insensitive check against the self-harm phrase list.
pub fn contains_self_harm_keywords(text: &str) -> bool {
    contains_any(&text.to_lowercase(), SELF_HARM_KEYWORDS)
}

/// Picks the first matching intent in priority order
/// overwhelm > clarity > reflect, falling back to `General`.
pub fn detect_intent(text: &str) -> Intent {
    let lower = text.to_lowercase();
    if contains_any(&lower, OVERWHELM_KEYWORDS) {
        Intent::Overwhelm
    } else if contains_any(&lower, CLARITY_KEYWORDS) {
        Intent::Clarity
    } else if contains_any(&lower, REFLECT_KEYWORDS) {
        Intent::Reflect
    } else {
        Intent::General
    }
}

/// Canned replies for an intent.
pub fn response_pool(intent: Intent) -> &'static [&'static str] {
    match intent {
        Intent::Overwhelm => OVERWHELM_RESPONSES,
        Intent::Clarity => CLARITY_RESPONSES,
        Intent::Reflect | Intent::General => REFLECTIVE_RESPONSES,
    }
}

/// Generates a reply using thread-local randomness.
pub fn generate_novi_response(user_message: &str) -> String {
    generate_novi_response_with(user_message, &mut rand::thread_rng())
}

/// Generates a reply drawing randomness from `rng`.
///
/// The reply is a uniform pick from the intent's pool, followed half of the
/// time by a blank line and a uniformly picked follow-up question.
pub fn generate_novi_response_with<R: Rng + ?Sized>(user_message: &str, rng: &mut R) -> String {
    if contains_self_harm_keywords(user_message) {
        return SAFE_SUPPORT_MESSAGE.to_string();
    }

    let pool = response_pool(detect_intent(user_message));
    let response = pick(pool, rng);

    if rng.gen_bool(FOLLOW_UP_PROBABILITY) {
        format!("{response}\n\n{}", pick(FOLLOW_UPS, rng))
    } else {
        response.to_string()
    }
}

fn pick<'a, R: Rng + ?Sized>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::{
        contains_self_harm_keywords, detect_intent, generate_novi_response_with, response_pool,
        Intent, FOLLOW_UPS, SAFE_SUPPORT_MESSAGE,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn base_reply(reply: &str) -> &str {
        reply.split("\n\n").next().unwrap_or(reply)
    }

    #[test]
    fn safety_override_wins_over_intents() {
        let mut rng = StdRng::seed_from_u64(7);
        for text in [
            "SUICIDE",
            "I feel overwhelmed and think about suicide",
            "I'm confused, I want to end it all",
        ] {
            assert!(contains_self_harm_keywords(text));
            assert_eq!(
                generate_novi_response_with(text, &mut rng),
                SAFE_SUPPORT_MESSAGE
            );
        }
    }

    #[test]
    fn intent_priority_is_overwhelm_clarity_reflect() {
        assert_eq!(detect_intent("It's all TOO MUCH and unclear"), Intent::Overwhelm);
        assert_eq!(detect_intent("I don't understand, let me reflect"), Intent::Clarity);
        assert_eq!(detect_intent("I want to process today"), Intent::Reflect);
        assert_eq!(detect_intent("hello"), Intent::General);
    }

    #[test]
    fn overwhelm_replies_come_from_overwhelm_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = response_pool(Intent::Overwhelm);
        for _ in 0..200 {
            let reply = generate_novi_response_with("I'm so overwhelmed", &mut rng);
            assert!(pool.contains(&base_reply(&reply)), "unexpected reply: {reply}");
        }
    }

    #[test]
    fn follow_up_is_appended_sometimes() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut with_follow_up = 0;
        for _ in 0..200 {
            let reply = generate_novi_response_with("hello", &mut rng);
            if let Some((_, follow_up)) = reply.split_once("\n\n") {
                assert!(FOLLOW_UPS.contains(&follow_up));
                with_follow_up += 1;
            }
        }
        assert!(with_follow_up > 0 && with_follow_up < 200);
    }
}
