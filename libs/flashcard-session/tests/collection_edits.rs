//! Adding, editing and deleting cards, and how edits reach the live session.

mod common;

use pretty_assertions::assert_eq;

use common::{new_card, now, review_card, Harness};
use flashcard_core::CardContent;
use flashcard_session::{SessionError, SessionState, SessionStateStore};

#[tokio::test]
async fn test_add_card_assigns_id_and_initial_state() {
    let h = Harness::new(vec![new_card("uno")]);
    let mut manager = h.open().await;

    let card = manager
        .add_card(CardContent::new("Hola", "Hello").with_meanings(["hi"]))
        .await
        .unwrap();

    assert!(!card.id.is_empty());
    assert_eq!(card.srs.repetition_count, 0);
    assert_eq!(card.srs.ease_factor, 2.5);
    assert_eq!(card.srs.interval, 0);
    assert_eq!(card.srs.next_review_date, now());
    assert_eq!(manager.cards().len(), 2);
    assert!(h.cards.cards().iter().any(|c| c.id == card.id));
}

#[tokio::test]
async fn test_add_card_rejects_duplicate_word() {
    let h = Harness::new(vec![new_card("uno")]);
    let mut manager = h.open().await;

    manager
        .add_card(CardContent::new("Hola", "Hello"))
        .await
        .unwrap();
    let saves = h.cards.save_count();

    let result = manager.add_card(CardContent::new(" hola ", "hi")).await;

    assert_eq!(result, Err(SessionError::DuplicateContent("hola".to_string())));
    assert_eq!(manager.cards().len(), 2);
    assert_eq!(h.cards.save_count(), saves);
}

#[tokio::test]
async fn test_add_card_leaves_running_session_alone() {
    let h = Harness::new(vec![new_card("uno"), new_card("dos")]);
    let mut manager = h.open().await;

    manager.add_card(CardContent::new("tres", "three")).await.unwrap();

    assert_eq!(manager.session_cards().len(), 2);
}

#[tokio::test]
async fn test_update_card_keeps_schedule_and_patches_session() {
    let h = Harness::new(vec![review_card("perro", 6, -1), new_card("gato")]);
    let mut manager = h.open().await;
    let order: Vec<String> = manager.session_cards().iter().map(|c| c.id.clone()).collect();
    let before = manager.card("perro").unwrap().srs.clone();

    manager
        .update_card("perro", CardContent::new("perro", "dog").with_meanings(["hound"]))
        .await
        .unwrap();

    let updated = manager.card("perro").unwrap();
    assert_eq!(updated.content.translation, "dog");
    assert_eq!(updated.srs, before);

    let order_after: Vec<String> = manager.session_cards().iter().map(|c| c.id.clone()).collect();
    assert_eq!(order_after, order);
    let queued = manager.session_cards().iter().find(|c| c.id == "perro").unwrap();
    assert_eq!(queued.content.meanings, vec!["hound".to_string()]);

    let snapshot = h.session.load_snapshot().unwrap().unwrap();
    let persisted = snapshot.cards.iter().find(|c| c.id == "perro").unwrap();
    assert_eq!(persisted.content.translation, "dog");

    let stored = h.cards.cards();
    let stored = stored.iter().find(|c| c.id == "perro").unwrap();
    assert_eq!(stored.content.translation, "dog");
    assert_eq!(stored.srs, before);
}

#[tokio::test]
async fn test_update_card_rejects_word_of_another_card() {
    let h = Harness::new(vec![new_card("perro"), new_card("gato")]);
    let mut manager = h.open().await;
    let saves = h.cards.save_count();

    let result = manager
        .update_card("gato", CardContent::new(" PERRO ", "dog"))
        .await;

    assert_eq!(result, Err(SessionError::DuplicateContent("PERRO".to_string())));
    assert_eq!(manager.card("gato").unwrap().content.word, "gato");
    assert_eq!(h.cards.save_count(), saves);
}

#[tokio::test]
async fn test_update_card_trims_word_and_allows_recasing_itself() {
    let h = Harness::new(vec![new_card("perro"), new_card("gato")]);
    let mut manager = h.open().await;

    manager
        .update_card("gato", CardContent::new("  Gato ", "cat"))
        .await
        .unwrap();

    assert_eq!(manager.card("gato").unwrap().content.word, "Gato");
    let queued = manager.session_cards().iter().find(|c| c.id == "gato").unwrap();
    assert_eq!(queued.content.word, "Gato");
}

#[tokio::test]
async fn test_update_unknown_card() {
    let h = Harness::new(vec![new_card("uno")]);
    let mut manager = h.open().await;

    let result = manager.update_card("nope", CardContent::new("x", "y")).await;

    assert_eq!(result, Err(SessionError::NotFound("nope".to_string())));
}

#[tokio::test]
async fn test_delete_removes_from_collection_and_session() {
    let h = Harness::new(vec![new_card("a"), new_card("b"), new_card("c")]);
    let mut manager = h.open().await;

    manager.delete_card("b").await.unwrap();

    assert!(manager.card("b").is_none());
    assert!(manager.session_cards().iter().all(|c| c.id != "b"));
    assert!(h.cards.cards().iter().all(|c| c.id != "b"));

    let snapshot = h.session.load_snapshot().unwrap().unwrap();
    assert_eq!(snapshot.cards.len(), 2);

    let stats = manager.statistics();
    assert_eq!(stats.total_in_session, 2);
    assert_eq!(stats.completed_in_session, 0);
}

#[tokio::test]
async fn test_deleting_last_session_card_does_not_set_guard() {
    let h = Harness::new(vec![new_card("only"), review_card("far", 30, 24 * 30)]);
    let mut manager = h.open().await;
    assert_eq!(manager.session_cards().len(), 1);

    manager.delete_card("only").await.unwrap();

    assert_eq!(manager.state(), SessionState::NoSession);
    assert!(manager.session_cards().is_empty());
    assert!(h.session.load_snapshot().unwrap().is_none());
    assert!(h.session.load_completed_at().unwrap().is_none());
    assert_eq!(manager.cards().len(), 1);
}

#[tokio::test]
async fn test_delete_then_new_card_can_start_session_same_day() {
    let h = Harness::new(vec![new_card("only"), review_card("far", 30, 24 * 30)]);
    let mut manager = h.open().await;
    manager.delete_card("only").await.unwrap();

    manager.add_card(CardContent::new("nuevo", "new")).await.unwrap();

    assert!(manager.refresh_session());
    assert_eq!(manager.current_card().unwrap().card.content.word, "nuevo");
}

#[tokio::test]
async fn test_delete_unknown_card() {
    let h = Harness::new(vec![new_card("a")]);
    let mut manager = h.open().await;

    let result = manager.delete_card("zzz").await;

    assert_eq!(result, Err(SessionError::NotFound("zzz".to_string())));
    assert_eq!(manager.cards().len(), 1);
}
