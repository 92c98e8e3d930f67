//! Integration tests for the landmark pipeline.
//!
//! These drive `LandmarkOrchestrator::process` end to end against the mock
//! collaborators:
//! 1. Retrieval request shape
//! 2. Normalization and validation failures
//! 3. Acceptability policy
//! 4. Prompt assembly and image generation
//! 5. Concurrent runs

use landmark::{
    AcceptancePolicy, LandmarkError, LandmarkField, LandmarkOrchestrator, MockImageGenerator,
    MockLanguageModel, OrchestratorConfig, ValidationError, LANDMARK_SYSTEM_PROMPT, NO_VALUE,
};
use serde_json::json;
use std::collections::HashSet;
use std::path::PathBuf;

/// Helper to create a unique output directory for one test.
fn test_output_dir() -> PathBuf {
    std::env::temp_dir().join(format!("landmark-it-{}", uuid::Uuid::new_v4().simple()))
}

/// A payload with every field filled in.
fn eiffel_payload() -> serde_json::Value {
    json!({
        "description": "A wrought-iron lattice tower on the Champ de Mars.",
        "architects": ["Gustave Eiffel", "Stephen Sauvestre"],
        "construction_year": 1889,
        "materials": ["wrought iron"],
        "interesting_facts": "Repainted roughly every seven years.",
        "dimensions": {"height": "330 m", "base": "125 m"},
        "construction_cost": "7.8 million francs",
        "cultural_significance": "Global icon of France.",
        "geographical_location": "Paris, France",
        "image_generation_prompt": "The Eiffel Tower at sunset over the Seine"
    })
}

/// Helper to set up an orchestrator writing into its own directory.
fn setup(
    lm: &MockLanguageModel,
    generator: &MockImageGenerator,
) -> (LandmarkOrchestrator<MockLanguageModel, MockImageGenerator>, PathBuf) {
    let dir = test_output_dir();
    let orchestrator = LandmarkOrchestrator::new(
        lm.clone(),
        generator.clone(),
        OrchestratorConfig::default().with_output_dir(&dir),
    );
    (orchestrator, dir)
}

fn cleanup(dir: PathBuf) {
    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_process_generates_image_and_returns_record() {
    let lm = MockLanguageModel::new().with_json(eiffel_payload());
    let generator = MockImageGenerator::new();
    let (orchestrator, dir) = setup(&lm, &generator);

    let result = orchestrator.process("Eiffel Tower").await.unwrap();

    assert!(result.image.path.starts_with(&dir));
    assert_eq!(std::fs::read(&result.image.path).unwrap(), generator.image());
    assert_eq!(
        result.image.caption.as_deref(),
        Some("The Eiffel Tower at sunset over the Seine")
    );
    assert_eq!(
        result.record.get(LandmarkField::Architects),
        Some("Gustave Eiffel, Stephen Sauvestre")
    );
    assert_eq!(
        result.record.get(LandmarkField::Dimensions),
        Some("height: 330 m; base: 125 m")
    );

    cleanup(dir);
}

#[tokio::test]
async fn test_retrieval_request_shape() {
    let lm = MockLanguageModel::new().with_json(eiffel_payload());
    let generator = MockImageGenerator::new();
    let (orchestrator, dir) = setup(&lm, &generator);

    orchestrator.process("  Eiffel Tower ").await.unwrap();

    let calls = lm.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].user, "Landmark: Eiffel Tower json");
    assert_eq!(calls[0].system, LANDMARK_SYSTEM_PROMPT);
    assert_eq!(calls[0].model, "llama3-70b-8192");
    assert_eq!(calls[0].temperature, 0.7);

    cleanup(dir);
}

#[tokio::test]
async fn test_image_request_shape() {
    let lm = MockLanguageModel::new().with_json(eiffel_payload());
    let generator = MockImageGenerator::new();
    let (orchestrator, dir) = setup(&lm, &generator);

    orchestrator.process("Eiffel Tower").await.unwrap();

    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model, "black-forest-labs/flux-pro");
    assert_eq!((calls[0].width, calls[0].height), (1024, 1024));

    let lines: Vec<&str> = calls[0].prompt.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[2], "Construction Year: 1889");
    assert_eq!(
        lines[9],
        "Image Prompt: The Eiffel Tower at sunset over the Seine"
    );

    cleanup(dir);
}

#[tokio::test]
async fn test_upstream_error_stops_before_image_generation() {
    let lm = MockLanguageModel::new().with_json(json!({
        "error": "Landmark could not be identified",
        "description": NO_VALUE
    }));
    let generator = MockImageGenerator::new();
    let (orchestrator, dir) = setup(&lm, &generator);

    let err = orchestrator.process("Blorptown Spire").await.unwrap_err();

    match err {
        LandmarkError::UpstreamReported(msg) => assert_eq!(msg, "Landmark could not be identified"),
        other => panic!("expected UpstreamReported, got {other}"),
    }
    assert_eq!(generator.call_count(), 0);
    assert!(!dir.exists());
}

#[tokio::test]
async fn test_two_sentinels_rejected_one_accepted() {
    let mut two_missing = eiffel_payload();
    two_missing["construction_cost"] = json!(NO_VALUE);
    two_missing["architects"] = json!(NO_VALUE);

    let lm = MockLanguageModel::new().with_json(two_missing);
    let generator = MockImageGenerator::new();
    let (orchestrator, dir) = setup(&lm, &generator);

    let err = orchestrator.process("Eiffel Tower").await.unwrap_err();
    assert!(matches!(err, LandmarkError::InsufficientData { missing: 2 }));
    assert!(err.is_rejection());
    assert_eq!(generator.call_count(), 0);

    let mut one_missing = eiffel_payload();
    one_missing["construction_cost"] = json!(NO_VALUE);

    let lm = MockLanguageModel::new().with_json(one_missing);
    let (orchestrator, dir2) = setup(&lm, &generator);

    let result = orchestrator.process("Eiffel Tower").await.unwrap();
    assert_eq!(generator.call_count(), 1);
    assert!(generator.calls()[0]
        .prompt
        .contains("Construction Cost: no_value"));
    assert_eq!(result.record.sentinel_fields(), vec![LandmarkField::ConstructionCost]);

    cleanup(dir);
    cleanup(dir2);
}

#[tokio::test]
async fn test_sparse_payload_passes_by_default() {
    let lm = MockLanguageModel::new().with_json(json!({
        "description": ["Tall", "iconic"],
        "construction_year": 1889,
        "image_generation_prompt": "Eiffel Tower at sunset"
    }));
    let generator = MockImageGenerator::new();
    let (orchestrator, dir) = setup(&lm, &generator);

    let result = orchestrator.process("Eiffel Tower").await.unwrap();

    assert_eq!(result.record.get(LandmarkField::Description), Some("Tall, iconic"));
    assert_eq!(result.record.get(LandmarkField::ConstructionYear), Some("1889"));
    let calls = generator.calls();
    let prompt = &calls[0].prompt;
    assert!(prompt.contains("Architects: No architects available."));
    assert!(prompt.ends_with("Image Prompt: Eiffel Tower at sunset"));

    cleanup(dir);
}

#[tokio::test]
async fn test_sparse_payload_rejected_when_absence_counts() {
    let lm = MockLanguageModel::new().with_json(json!({
        "description": ["Tall", "iconic"],
        "construction_year": 1889,
        "image_generation_prompt": "Eiffel Tower at sunset"
    }));
    let generator = MockImageGenerator::new();
    let orchestrator = LandmarkOrchestrator::new(
        lm,
        generator.clone(),
        OrchestratorConfig::default()
            .with_output_dir(test_output_dir())
            .with_policy(AcceptancePolicy::default().with_count_absent_as_missing(true)),
    );

    let err = orchestrator.process("Eiffel Tower").await.unwrap_err();
    assert!(matches!(err, LandmarkError::InsufficientData { missing: 7 }));
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_retrieval_failure_is_distinct_from_validation() {
    let generator = MockImageGenerator::new();

    let unreachable = MockLanguageModel::new().failing("connection refused");
    let (orchestrator, _) = setup(&unreachable, &generator);
    let err = orchestrator.process("Eiffel Tower").await.unwrap_err();
    assert!(matches!(err, LandmarkError::Retrieval(_)));
    assert!(!err.is_rejection());

    let malformed = MockLanguageModel::new().with_default("Sure! Here is the tower: {");
    let (orchestrator, _) = setup(&malformed, &generator);
    let err = orchestrator.process("Eiffel Tower").await.unwrap_err();
    assert!(matches!(
        err,
        LandmarkError::Validation(ValidationError::MalformedJson(_))
    ));

    let nested = MockLanguageModel::new().with_json(json!({
        "interesting_facts": [{"year": 1889, "fact": "World's Fair"}]
    }));
    let (orchestrator, _) = setup(&nested, &generator);
    let err = orchestrator.process("Eiffel Tower").await.unwrap_err();
    assert!(matches!(
        err,
        LandmarkError::Validation(ValidationError::UnsupportedValue { .. })
    ));

    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn test_strict_schema_rejects_unknown_fields() {
    let mut payload = eiffel_payload();
    payload["visitors_per_year"] = json!(7_000_000);

    let lm = MockLanguageModel::new().with_json(payload);
    let generator = MockImageGenerator::new();
    let orchestrator = LandmarkOrchestrator::new(
        lm,
        generator.clone(),
        OrchestratorConfig::default()
            .with_output_dir(test_output_dir())
            .with_strict_schema(true),
    );

    let err = orchestrator.process("Eiffel Tower").await.unwrap_err();
    assert!(matches!(
        err,
        LandmarkError::Validation(ValidationError::UnknownField { .. })
    ));
}

#[tokio::test]
async fn test_generation_failure_is_reported_not_swallowed() {
    let lm = MockLanguageModel::new().with_json(eiffel_payload());
    let generator = MockImageGenerator::new().failing("model is cold, try later");
    let (orchestrator, dir) = setup(&lm, &generator);

    let err = orchestrator.process("Eiffel Tower").await.unwrap_err();

    match err {
        LandmarkError::Generation(source) => {
            assert_eq!(source.to_string(), "model is cold, try later")
        }
        other => panic!("expected Generation, got {other}"),
    }
    assert_eq!(generator.call_count(), 1);
    assert!(!dir.exists());
}

#[tokio::test]
async fn test_midstream_failure_leaves_no_file() {
    let lm = MockLanguageModel::new().with_json(eiffel_payload());
    let generator = MockImageGenerator::new().failing_midstream("connection reset");
    let (orchestrator, dir) = setup(&lm, &generator);

    let err = orchestrator.process("Eiffel Tower").await.unwrap_err();

    assert!(matches!(err, LandmarkError::Generation(_)));
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);

    cleanup(dir);
}

#[tokio::test]
async fn test_empty_image_is_generation_error() {
    let lm = MockLanguageModel::new().with_json(eiffel_payload());
    let generator = MockImageGenerator::new().with_image(Vec::new());
    let (orchestrator, dir) = setup(&lm, &generator);

    let err = orchestrator.process("Eiffel Tower").await.unwrap_err();

    assert!(matches!(err, LandmarkError::Generation(_)));
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);

    cleanup(dir);
}

#[tokio::test]
async fn test_output_path_collision_is_storage_error() {
    let lm = MockLanguageModel::new().with_json(eiffel_payload());
    let generator = MockImageGenerator::new();
    let blocker = test_output_dir();
    std::fs::write(&blocker, b"occupied").unwrap();
    let orchestrator = LandmarkOrchestrator::new(
        lm.clone(),
        generator.clone(),
        OrchestratorConfig::default().with_output_dir(&blocker),
    );

    let err = orchestrator.process("Eiffel Tower").await.unwrap_err();

    assert!(matches!(err, LandmarkError::Storage(_)));
    assert!(!err.is_rejection());
    assert_eq!(generator.call_count(), 1);

    std::fs::remove_file(blocker).unwrap();
}

#[tokio::test]
async fn test_blank_name_rejected_without_calls() {
    let lm = MockLanguageModel::new().with_json(eiffel_payload());
    let generator = MockImageGenerator::new();
    let (orchestrator, _) = setup(&lm, &generator);

    let err = orchestrator.process("   ").await.unwrap_err();

    assert!(matches!(err, LandmarkError::InvalidInput { .. }));
    assert_eq!(lm.call_count(), 0);
}

#[tokio::test]
async fn test_process_many_writes_distinct_files() {
    let lm = MockLanguageModel::new().with_json(eiffel_payload());
    let generator = MockImageGenerator::new();
    let (orchestrator, dir) = setup(&lm, &generator);

    let results = orchestrator.process_many("Eiffel Tower", 4).await;

    assert_eq!(results.len(), 4);
    let paths: HashSet<PathBuf> = results
        .into_iter()
        .map(|r| r.unwrap().image.path)
        .collect();
    assert_eq!(paths.len(), 4);
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 4);
    assert_eq!(lm.call_count(), 4);
    assert_eq!(generator.call_count(), 4);

    cleanup(dir);
}

#[tokio::test]
async fn test_process_many_failures_are_independent() {
    let lm = MockLanguageModel::new().with_json(eiffel_payload());
    let generator = MockImageGenerator::new().failing("quota exceeded");
    let (orchestrator, _) = setup(&lm, &generator);

    let results = orchestrator.process_many("Eiffel Tower", 3).await;

    assert_eq!(results.len(), 3);
    assert!(results
        .iter()
        .all(|r| matches!(r, Err(LandmarkError::Generation(_)))));
}
