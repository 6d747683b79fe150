use crate::common::{self, TestStateBuilder};
use axum::http::StatusCode;
use serde_json::json;
use vocab_api::card::model::CardDetails;
use vocab_srs::{Card, SchedulingState};

#[tokio::test]
async fn test_create_card() {
    let (_, client) = common::setup().await;

    let response = client
        .post_json(
            "/api/cards",
            &json!({
                "word": "  jabolko ",
                "translation": "Apfel",
                "grammar": "s. (srednji spol)",
                "example": "Jem jabolko.",
                "audio_url": "/audio_cache/jabolko.mp3"
            }),
        )
        .await;
    response.assert_status(StatusCode::CREATED);

    let card: Card = response.json();
    assert!(card.id > 0);
    assert_eq!(card.word, "jabolko");
    assert_eq!(card.translation, "Apfel");
    assert_eq!(card.grammar.as_deref(), Some("s. (srednji spol)"));
    assert_eq!(card.example.as_deref(), Some("Jem jabolko."));
    assert_eq!(card.audio_url.as_deref(), Some("/audio_cache/jabolko.mp3"));
    assert_eq!(card.scheduling_state, SchedulingState::New);
    assert_eq!(card.interval, 0);
    assert_eq!(card.repetitions, 0);
    assert_eq!(card.due_at, card.created_at);
    assert!(card.last_reviewed_at.is_none());
}

#[tokio::test]
async fn test_create_card_serializes_state_field() {
    let (_, client) = common::setup().await;

    let response = client
        .post_json("/api/cards", &json!({ "word": "sir", "translation": "Käse" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["scheduling_state"], "new");
    assert_eq!(body["ease_factor"], 2.5);
    assert!(body["grammar"].is_null());
    assert!(body["audio_url"].is_null());
    assert!(body["due_at"].is_string());
}

#[tokio::test]
async fn test_create_card_requires_word_and_translation() {
    let (_, client) = common::setup().await;

    let missing_translation = client
        .post_json("/api/cards", &json!({ "word": "miza" }))
        .await;
    missing_translation.assert_status(StatusCode::BAD_REQUEST);
    assert!(missing_translation.error().contains("translation"));

    let blank_word = client
        .post_json("/api/cards", &json!({ "word": "   ", "translation": "Tisch" }))
        .await;
    blank_word.assert_status(StatusCode::BAD_REQUEST);
    assert!(blank_word.error().contains("word"));

    let malformed = client.post_raw("/api/cards", "{not json").await;
    malformed.assert_status(StatusCode::BAD_REQUEST);

    // Nothing was stored.
    let cards: Vec<Card> = client.get("/api/cards").await.json();
    assert!(cards.is_empty());
}

#[tokio::test]
async fn test_list_cards_newest_first() {
    let (_, client) = common::setup().await;

    let first = client.create_card("ena", "eins").await;
    let second = client.create_card("dva", "zwei").await;
    let third = client.create_card("tri", "drei").await;

    let response = client.get("/api/cards").await;
    response.assert_status(StatusCode::OK);

    let ids: Vec<i64> = response.json::<Vec<Card>>().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[tokio::test]
async fn test_get_card() {
    let (_, client) = common::setup().await;
    let created = client.create_card("okno", "Fenster").await;

    let response = client.get(&format!("/api/cards/{}", created.id)).await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Card>(), created);

    client
        .get("/api/cards/9999")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    client
        .get("/api/cards/not-a-number")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_card_details_include_ordered_history() {
    let (_, client) = common::setup().await;
    let card = client.create_card("vrata", "Tür").await;

    for quality in [4, 1, 3] {
        client.review(card.id, quality).await.assert_status(StatusCode::OK);
    }

    let response = client.get(&format!("/api/cards/{}/details", card.id)).await;
    response.assert_status(StatusCode::OK);

    let details: CardDetails = response.json();
    assert_eq!(details.card.id, card.id);
    assert_eq!(details.card.word, "vrata");
    let qualities: Vec<u8> = details.history.iter().map(|h| h.quality.value()).collect();
    assert_eq!(qualities, vec![4, 1, 3]);
    assert!(
        details
            .history
            .windows(2)
            .all(|w| w[0].reviewed_at <= w[1].reviewed_at)
    );

    // Flattened card fields plus a history array.
    let raw: serde_json::Value = response.json();
    assert_eq!(raw["word"], "vrata");
    assert_eq!(raw["history"].as_array().unwrap().len(), 3);
    assert!(raw["history"][0]["reviewed_at"].is_string());
}

#[tokio::test]
async fn test_card_details_for_unreviewed_card() {
    let (_, client) = common::setup().await;
    let card = client.create_card("stol", "Stuhl").await;

    let details: CardDetails = client
        .get(&format!("/api/cards/{}/details", card.id))
        .await
        .json();
    assert!(details.history.is_empty());
    assert_eq!(details.card.scheduling_state, SchedulingState::New);
}

#[tokio::test]
async fn test_delete_card_removes_it_everywhere() {
    let (state, client) = common::setup().await;
    let keep = client.create_card("nebo", "Himmel").await;
    let gone = client.create_card("zemlja", "Erde").await;
    client.review(gone.id, 4).await.assert_status(StatusCode::OK);

    let response = client.delete(&format!("/api/cards/{}", gone.id)).await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], gone.id);

    let cards: Vec<Card> = client.get("/api/cards").await.json();
    assert_eq!(cards.iter().map(|c| c.id).collect::<Vec<_>>(), vec![keep.id]);

    let queue: Vec<Card> = client.get("/api/review").await.json();
    assert!(queue.iter().all(|c| c.id != gone.id));

    let stats: serde_json::Value = client.get("/api/stats").await.json();
    assert_eq!(stats["total"], 1);

    client
        .get(&format!("/api/cards/{}/details", gone.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let history = vocab_db::repositories::review::list_review_events(&state.pool, gone.id)
        .await
        .unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_delete_missing_card() {
    let (_, client) = common::setup().await;

    let response = client.delete("/api/cards/4242").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.error().contains("4242"));
}

#[tokio::test]
async fn test_custom_scheduler_config_applies_to_new_cards() {
    let state = TestStateBuilder::new()
        .scheduler(vocab_srs::SchedulerConfig {
            initial_ease: 2.0,
            ..Default::default()
        })
        .build()
        .await
        .expect("Failed to create test state");
    let client = common::TestClient::new(vocab_api::router::router().with_state(state));

    let card = client.create_card("luna", "Mond").await;
    assert!((card.ease_factor - 2.0).abs() < f64::EPSILON);
}
