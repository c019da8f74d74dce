//! Orchestration service tests against a scripted generator and a
//! throwaway document store

mod common;

use common::{
    MockGenerator, PARIS_ADJUSTED_RESPONSE, PARIS_FENCED_RESPONSE, blocked_response,
    paris_request, service_with, text_response,
};
use itinera::{ItineraError, ItineraryAdjustment};

#[tokio::test]
async fn test_generate_builds_itinerary_from_fenced_response() {
    let generator = MockGenerator::with_text(PARIS_FENCED_RESPONSE);
    let (service, _dir) = service_with(generator.clone());

    let itinerary = service.generate(paris_request()).await.unwrap();

    assert!(itinerary.id.is_none());
    assert_eq!(itinerary.destination, "Paris");
    assert_eq!(itinerary.days.len(), 2);
    assert_eq!(itinerary.days[0].activities, vec!["Louvre".to_string()]);
    assert_eq!(itinerary.days[1].activities, vec!["Market".to_string()]);

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Duration: 2 days"));
}

#[tokio::test]
async fn test_generate_accepts_empty_day_list() {
    let generator = MockGenerator::with_text(r#"{"days": []}"#);
    let (service, _dir) = service_with(generator);

    let itinerary = service.generate(paris_request()).await.unwrap();
    assert!(itinerary.days.is_empty());
}

#[tokio::test]
async fn test_generate_surfaces_block_reason() {
    let generator = MockGenerator::new(vec![blocked_response("SAFETY")]);
    let (service, _dir) = service_with(generator);

    let err = service.generate(paris_request()).await.unwrap_err();
    assert!(matches!(err, ItineraError::Generation { .. }));
    assert!(err.to_string().contains("SAFETY"));
}

#[tokio::test]
async fn test_generate_fails_on_unparseable_output() {
    let generator = MockGenerator::with_text("Here are some ideas for your trip!");
    let (service, _dir) = service_with(generator);

    let err = service.generate(paris_request()).await.unwrap_err();
    assert!(matches!(err, ItineraError::Extraction { .. }));
}

#[tokio::test]
async fn test_generate_rejects_inverted_dates() {
    let generator = MockGenerator::with_text(PARIS_FENCED_RESPONSE);
    let (service, _dir) = service_with(generator.clone());

    let mut request = paris_request();
    request.end_date = "2024-05-01".parse().unwrap();

    let err = service.generate(request).await.unwrap_err();
    assert!(matches!(err, ItineraError::Validation { .. }));
    // The provider must not be called for an invalid request.
    assert!(generator.prompts().is_empty());
}

#[tokio::test]
async fn test_save_then_get_round_trips() {
    let generator = MockGenerator::with_text(PARIS_FENCED_RESPONSE);
    let (service, _dir) = service_with(generator);

    let generated = service.generate(paris_request()).await.unwrap();
    let saved = service.save(generated).await.unwrap();
    let id = saved.id.clone().expect("save must assign an identifier");

    let loaded = service.get(&id).await.unwrap();
    assert_eq!(loaded, saved);
}

#[tokio::test]
async fn test_save_never_reassigns_identifier() {
    let generator = MockGenerator::with_text(PARIS_FENCED_RESPONSE);
    let (service, _dir) = service_with(generator);

    let saved = service
        .save(service.generate(paris_request()).await.unwrap())
        .await
        .unwrap();
    let id = saved.id.clone().unwrap();

    let resaved = service.save(saved).await.unwrap();
    assert_eq!(resaved.id.as_deref(), Some(id.as_str()));

    let all = service.list().await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let generator = MockGenerator::with_text(PARIS_FENCED_RESPONSE);
    let (service, _dir) = service_with(generator);

    let saved = service
        .save(service.generate(paris_request()).await.unwrap())
        .await
        .unwrap();
    let id = saved.id.unwrap();

    assert!(service.delete(&id).await.unwrap());
    let err = service.get(&id).await.unwrap_err();
    assert!(matches!(err, ItineraError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_unknown_id_is_false_not_error() {
    let generator = MockGenerator::with_text(PARIS_FENCED_RESPONSE);
    let (service, _dir) = service_with(generator);

    let unknown = uuid::Uuid::new_v4().to_string();
    assert!(!service.delete(&unknown).await.unwrap());
}

#[tokio::test]
async fn test_get_with_malformed_id_is_validation_error() {
    let generator = MockGenerator::with_text(PARIS_FENCED_RESPONSE);
    let (service, _dir) = service_with(generator);

    let err = service.get("definitely-not-a-uuid").await.unwrap_err();
    assert!(matches!(err, ItineraError::Validation { .. }));
}

#[tokio::test]
async fn test_adjust_replaces_days_and_preserves_identity() {
    let generator = MockGenerator::new(vec![
        text_response(PARIS_FENCED_RESPONSE),
        text_response(PARIS_ADJUSTED_RESPONSE),
    ]);
    let (service, _dir) = service_with(generator.clone());

    let saved = service
        .save(service.generate(paris_request()).await.unwrap())
        .await
        .unwrap();
    let id = saved.id.clone().unwrap();

    let adjusted = service
        .adjust(
            &id,
            ItineraryAdjustment {
                instruction: "more street food".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(adjusted.id, saved.id);
    assert_eq!(adjusted.destination, saved.destination);
    assert_eq!(adjusted.start_date, saved.start_date);
    assert_eq!(adjusted.end_date, saved.end_date);
    assert_eq!(adjusted.interests, saved.interests);
    assert_eq!(adjusted.days.len(), saved.days.len());
    assert_eq!(
        adjusted.days[0].activities,
        vec!["Street food tour".to_string()]
    );

    // The adjusted sequence must be persisted, not just returned.
    let loaded = service.get(&id).await.unwrap();
    assert_eq!(loaded.days, adjusted.days);

    let adjustment_prompt = &generator.prompts()[1];
    assert!(adjustment_prompt.contains("Day 1: Louvre"));
    assert!(adjustment_prompt.contains("\"more street food\""));
}

#[tokio::test]
async fn test_adjust_with_empty_extraction_keeps_current_days() {
    let generator = MockGenerator::new(vec![
        text_response(PARIS_FENCED_RESPONSE),
        text_response(r#"{"note": "nothing to change"}"#),
    ]);
    let (service, _dir) = service_with(generator);

    let saved = service
        .save(service.generate(paris_request()).await.unwrap())
        .await
        .unwrap();
    let id = saved.id.clone().unwrap();

    let adjusted = service
        .adjust(
            &id,
            ItineraryAdjustment {
                instruction: "surprise me".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(adjusted.days, saved.days);
}

#[tokio::test]
async fn test_adjust_unknown_id_is_not_found() {
    let generator = MockGenerator::with_text(PARIS_FENCED_RESPONSE);
    let (service, _dir) = service_with(generator.clone());

    let unknown = uuid::Uuid::new_v4().to_string();
    let err = service
        .adjust(
            &unknown,
            ItineraryAdjustment {
                instruction: "anything".to_string(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ItineraError::NotFound { .. }));
    // No itinerary, no provider call.
    assert!(generator.prompts().is_empty());
}

#[tokio::test]
async fn test_adjust_propagates_extraction_failure() {
    let generator = MockGenerator::new(vec![
        text_response(PARIS_FENCED_RESPONSE),
        text_response("```json\n{broken"),
    ]);
    let (service, _dir) = service_with(generator);

    let saved = service
        .save(service.generate(paris_request()).await.unwrap())
        .await
        .unwrap();
    let id = saved.id.clone().unwrap();

    let err = service
        .adjust(
            &id,
            ItineraryAdjustment {
                instruction: "more food".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ItineraError::Extraction { .. }));

    // A failed adjustment must leave the stored itinerary untouched.
    let loaded = service.get(&id).await.unwrap();
    assert_eq!(loaded.days, saved.days);
}
