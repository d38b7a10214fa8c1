//! Review queue assembly.
//!
//! Selection is priority ordered (lapsed cards first, then the most overdue),
//! presentation is fully random: the selected new and review cards are
//! shuffled together before they are handed out.

use crate::types::Card;
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Size limits for one review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueLimits {
    pub new_cards: usize,
    /// Review budget before the unused new-card budget is added to it.
    pub review_cards: usize,
    /// Look-ahead window used to pad the session with not-yet-due reviews.
    pub horizon_days: i64,
}

impl Default for QueueLimits {
    fn default() -> Self {
        Self {
            new_cards: 20,
            review_cards: 30,
            horizon_days: 7,
        }
    }
}

/// Review cards (repetition count > 0) that are due or fall inside the
/// horizon, in priority order.
///
/// Due and horizon cards are shuffled separately, concatenated, then stably
/// sorted: lapsed cards (interval 0) first, then by ascending due date. Ties
/// keep their shuffled order.
pub fn prioritize_reviews<R: Rng + ?Sized>(
    cards: &[Card],
    now: DateTime<Utc>,
    horizon_days: i64,
    rng: &mut R,
) -> Vec<Card> {
    let horizon = Duration::try_days(horizon_days)
        .and_then(|window| now.checked_add_signed(window))
        .unwrap_or(if horizon_days < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        });

    let (mut due, mut upcoming): (Vec<Card>, Vec<Card>) = cards
        .iter()
        .filter(|card| !card.is_new() && card.srs.next_review_date <= horizon)
        .cloned()
        .partition(|card| card.is_due(now));

    due.shuffle(rng);
    upcoming.shuffle(rng);

    let mut reviews = due;
    reviews.append(&mut upcoming);
    reviews.sort_by(review_priority);
    reviews
}

fn review_priority(a: &Card, b: &Card) -> Ordering {
    // false sorts before true, so lapsed cards lead.
    (!a.is_lapsed())
        .cmp(&!b.is_lapsed())
        .then_with(|| a.srs.next_review_date.cmp(&b.srs.next_review_date))
}

/// Build a shuffled review queue from the whole collection.
///
/// At most `limits.new_cards` new cards are taken at random; whatever part of
/// that budget goes unused is added to the review budget.
pub fn assemble_queue<R: Rng + ?Sized>(
    cards: &[Card],
    now: DateTime<Utc>,
    limits: &QueueLimits,
    rng: &mut R,
) -> Vec<Card> {
    let mut new_cards: Vec<Card> = cards.iter().filter(|card| card.is_new()).cloned().collect();
    new_cards.shuffle(rng);
    new_cards.truncate(limits.new_cards);

    let shortfall = limits.new_cards.saturating_sub(new_cards.len());

    let mut reviews = prioritize_reviews(cards, now, limits.horizon_days, rng);
    reviews.truncate(limits.review_cards.saturating_add(shortfall));

    let mut queue = new_cards;
    queue.append(&mut reviews);
    queue.shuffle(rng);
    queue
}
