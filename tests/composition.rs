// Composition tests: the engine and pipelines wired to a real directory
// store and SQLite log, with a deterministic encoder standing in for the
// ONNX model.

mod common;

use common::{doc, engine, failing_engine, FailingLog};
use draftcheck::corpus::{CorpusStore, DirectoryStore, Upload};
use draftcheck::db::{self, ResultLog};
use draftcheck::error::CheckError;
use draftcheck::pipeline::{check, compare, CheckOptions};
use draftcheck::text::document::DocumentMetadata;

const ESSAY: &str = "Photosynthesis converts light energy into chemical energy.\n\n\
    Plants absorb carbon dioxide through small pores in their leaves.";

fn options() -> CheckOptions {
    CheckOptions::default()
}

// ============================================================
// Engine
// ============================================================

#[tokio::test]
async fn check_against_empty_corpus_scores_zero() {
    let query = doc("q.txt", &["Some thoughts on rivers.", "More thoughts on lakes."]);
    let meta = DocumentMetadata::for_upload(&query, 48);
    let report = engine().check(&query, meta, &[]).await.unwrap();

    assert_eq!(report.lexical_score, 0.0);
    assert_eq!(report.semantic_score, 0.0);
    assert!(report.matches.is_empty());
    assert_eq!(report.corpus_size, 0);
    assert_eq!(report.style.metrics.len(), 2);
    assert_eq!(report.style.inconsistent.len(), 2);
}

#[tokio::test]
async fn check_reports_both_signals_separately() {
    let query = doc("q.txt", &["This is a test sentence."]);
    let corpus = vec![
        doc("a.txt", &["This is a different sentence."]),
        doc("b.txt", &["Another unique text."]),
    ];
    let meta = DocumentMetadata::for_upload(&query, 24);
    let report = engine().check(&query, meta, &corpus).await.unwrap();

    assert!(report.lexical_score > 0.0 && report.lexical_score < 100.0);
    assert!((0.0..=100.0).contains(&report.semantic_score));
    assert_eq!(report.corpus_size, 2);
}

#[tokio::test]
async fn empty_query_is_rejected_before_scoring() {
    let query = doc("q.txt", &["   "]);
    let meta = DocumentMetadata::for_upload(&query, 3);
    let result = failing_engine().check(&query, meta, &[]).await;
    // EmptyDocument wins over the encoder failure
    assert!(matches!(result, Err(CheckError::EmptyDocument)));
}

#[tokio::test]
async fn encoder_failure_fails_the_whole_check() {
    let query = doc("q.txt", &["Some text here."]);
    let corpus = vec![doc("a.txt", &["Some text here."])];
    let meta = DocumentMetadata::for_upload(&query, 15);
    let result = failing_engine().check(&query, meta, &corpus).await;
    assert!(matches!(result, Err(CheckError::EncoderUnavailable(_))));
}

#[tokio::test]
async fn report_serializes_with_flat_style_fields() {
    let query = doc("q.txt", &["One paragraph only."]);
    let meta = DocumentMetadata::for_upload(&query, 19);
    let report = engine().check(&query, meta, &[]).await.unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("lexical_score").is_some());
    assert!(json.get("semantic_score").is_some());
    assert_eq!(json["inconsistent"], serde_json::json!([false]));
    assert_eq!(json["metadata"]["identifier"], "q.txt");
}

#[tokio::test]
async fn flagged_paragraphs_point_at_the_drift() {
    let query = doc(
        "q.txt",
        &[
            "The garden is a wonderful, happy place. Neighbours love it.",
            "The new rules are terrible and cruel. Residents hate them.",
        ],
    );
    let meta = DocumentMetadata::for_upload(&query, 120);
    let report = engine().check(&query, meta, &[]).await.unwrap();

    let flagged: Vec<_> = report.flagged_paragraphs().collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].0, 1);
    assert!(flagged[0].1.starts_with("The new rules"));
}

// ============================================================
// Check pipeline
// ============================================================

#[tokio::test]
async fn first_upload_joins_corpus_and_second_copy_matches_it() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirectoryStore::new(dir.path());
    let log = db::in_memory().unwrap();
    let engine = engine();

    let first = Upload::new("first.txt", ESSAY);
    let report = check::run(&engine, &store, log.as_ref(), &first, options())
        .await
        .unwrap();
    assert_eq!(report.corpus_size, 0);
    assert_eq!(store.list_ids().await.unwrap(), vec!["first.txt"]);

    let copy = Upload::new("copy.txt", ESSAY);
    let report = check::run(&engine, &store, log.as_ref(), &copy, options())
        .await
        .unwrap();
    // Only first.txt, never copy.txt itself
    assert_eq!(report.corpus_size, 1);
    assert!((report.lexical_score - 100.0).abs() < 1e-6);
    assert!((report.semantic_score - 100.0).abs() < 1e-6);
    assert_eq!(report.matches.len(), 2);

    let logged = log.recent(10).await.unwrap();
    assert_eq!(logged.len(), 2);
    assert_eq!(logged[0].identifier, "copy.txt");
}

#[tokio::test]
async fn rechecking_the_same_file_excludes_itself() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirectoryStore::new(dir.path());
    let log = db::in_memory().unwrap();
    let engine = engine();
    let upload = Upload::new("essay.txt", ESSAY);

    check::run(&engine, &store, log.as_ref(), &upload, options())
        .await
        .unwrap();
    let report = check::run(&engine, &store, log.as_ref(), &upload, options())
        .await
        .unwrap();
    assert_eq!(report.corpus_size, 0);
    assert_eq!(report.lexical_score, 0.0);
}

#[tokio::test]
async fn dry_run_does_not_persist() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirectoryStore::new(dir.path());
    let log = db::in_memory().unwrap();
    let opts = CheckOptions {
        dry_run: true,
        ..options()
    };

    check::run(&engine(), &store, log.as_ref(), &Upload::new("a.txt", ESSAY), opts)
        .await
        .unwrap();
    assert!(store.list_ids().await.unwrap().is_empty());
    // Still logged
    assert_eq!(log.count().await.unwrap(), 1);
}

#[tokio::test]
async fn log_failure_does_not_fail_the_check() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirectoryStore::new(dir.path());
    let result = check::run(
        &engine(),
        &store,
        &FailingLog,
        &Upload::new("a.txt", ESSAY),
        options(),
    )
    .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn failed_check_leaves_the_corpus_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirectoryStore::new(dir.path());
    store.add_document("prior.txt", ESSAY.as_bytes()).await.unwrap();
    let log = db::in_memory().unwrap();

    let result = check::run(
        &failing_engine(),
        &store,
        log.as_ref(),
        &Upload::new("new.txt", ESSAY),
        options(),
    )
    .await;
    assert!(matches!(result, Err(CheckError::EncoderUnavailable(_))));
    assert_eq!(store.list_ids().await.unwrap(), vec!["prior.txt"]);
    assert_eq!(log.count().await.unwrap(), 0);
}

#[tokio::test]
async fn invalid_uploads_are_rejected_without_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirectoryStore::new(dir.path());
    let log = db::in_memory().unwrap();
    let engine = engine();

    let too_big = CheckOptions {
        max_upload_bytes: 10,
        ..options()
    };
    let result = check::run(&engine, &store, log.as_ref(), &Upload::new("a.txt", ESSAY), too_big).await;
    assert!(matches!(
        result,
        Err(CheckError::DocumentTooLarge { limit: 10, .. })
    ));

    let result = check::run(
        &engine,
        &store,
        log.as_ref(),
        &Upload::new("a.pdf", ESSAY),
        options(),
    )
    .await;
    assert!(matches!(result, Err(CheckError::UnsupportedFormat { .. })));

    let result = check::run(
        &engine,
        &store,
        log.as_ref(),
        &Upload::new("blank.txt", "\n\n  \n"),
        options(),
    )
    .await;
    assert!(matches!(result, Err(CheckError::EmptyDocument)));

    assert!(store.list_ids().await.unwrap().is_empty());
    assert_eq!(log.count().await.unwrap(), 0);
}

#[tokio::test]
async fn hand_placed_corpus_files_take_part_in_checks() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("My Essay.txt"), ESSAY).unwrap();
    let store = DirectoryStore::new(dir.path());
    let log = db::in_memory().unwrap();

    let report = check::run(
        &engine(),
        &store,
        log.as_ref(),
        &Upload::new("new.txt", ESSAY),
        options(),
    )
    .await
    .unwrap();
    assert_eq!(report.corpus_size, 1);
    assert!((report.lexical_score - 100.0).abs() < 1e-6);

    let compared = compare::run(&engine(), &store, "My Essay.txt", "new.txt")
        .await
        .unwrap();
    assert_eq!(compared.first.metadata.identifier, "My Essay.txt");
}

#[tokio::test]
async fn upload_names_are_sanitised() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirectoryStore::new(dir.path());
    let log = db::in_memory().unwrap();

    let report = check::run(
        &engine(),
        &store,
        log.as_ref(),
        &Upload::new("../My Essay.txt", ESSAY),
        options(),
    )
    .await
    .unwrap();
    assert_eq!(report.metadata.identifier, "My_Essay.txt");
    assert_eq!(store.list_ids().await.unwrap(), vec!["My_Essay.txt"]);
}

// ============================================================
// Compare pipeline
// ============================================================

#[tokio::test]
async fn compare_reports_pairs_and_deduplicated_sentences() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirectoryStore::new(dir.path());
    let shared = "Photosynthesis converts light energy into chemical energy.";
    store
        .add_document("one.txt", format!("{shared} Rivers flow to the sea.").as_bytes())
        .await
        .unwrap();
    store
        .add_document(
            "two.txt",
            format!("{shared}\n\nMountains rise slowly. {shared}").as_bytes(),
        )
        .await
        .unwrap();

    let report = compare::run(&engine(), &store, "one.txt", "two.txt")
        .await
        .unwrap();

    assert_eq!(report.pairs.len(), 2);
    assert_eq!(report.first.matched_sentences, vec![shared]);
    assert_eq!(report.second.matched_sentences, vec![shared]);
    assert_eq!(report.first.metadata.identifier, "one.txt");
    assert_eq!(report.second.paragraphs.len(), 2);
    assert!(report.lexical_score > 0.0);
}

#[tokio::test]
async fn compare_rejects_same_and_unknown_documents() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirectoryStore::new(dir.path());
    store.add_document("one.txt", ESSAY.as_bytes()).await.unwrap();

    assert!(matches!(
        compare::run(&engine(), &store, "one.txt", "one.txt").await,
        Err(CheckError::InvalidRequest(_))
    ));
    assert!(matches!(
        compare::run(&engine(), &store, "one.txt", "missing.txt").await,
        Err(CheckError::DocumentNotFound(id)) if id == "missing.txt"
    ));
}
