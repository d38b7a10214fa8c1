//! Built-in starter deck.
//!
//! Used when the card store is empty or cannot be read. Ids are stable so a
//! session snapshot taken over the starter deck still matches after restart.

use chrono::{DateTime, Utc};
use flashcard_core::{Card, CardContent, Sm2, SpacedRepetitionAlgorithm};

const STARTER_DECK: &[(&str, &str, &[&str])] = &[
    ("hola", "hello", &["greeting", "hi"]),
    ("gracias", "thank you", &["thanks"]),
    ("casa", "house", &["home"]),
    ("perro", "dog", &[]),
    ("gato", "cat", &[]),
    ("agua", "water", &[]),
    ("libro", "book", &[]),
    ("comer", "to eat", &["to have lunch"]),
    ("beber", "to drink", &[]),
    ("hablar", "to speak", &["to talk"]),
    ("grande", "big", &["large", "great"]),
    ("pequeño", "small", &["little"]),
    ("amigo", "friend", &[]),
    ("ciudad", "city", &["town"]),
    ("tiempo", "time", &["weather"]),
];

/// Fresh copies of the starter deck, all new and due at `now`.
pub fn default_cards(now: DateTime<Utc>) -> Vec<Card> {
    let initial = Sm2::default().initial_state(now);

    STARTER_DECK
        .iter()
        .enumerate()
        .map(|(i, (word, translation, meanings))| {
            Card::new(
                format!("builtin-{:02}", i + 1),
                CardContent::new(*word, *translation).with_meanings(meanings.iter().copied()),
                initial.clone(),
            )
        })
        .collect()
}
