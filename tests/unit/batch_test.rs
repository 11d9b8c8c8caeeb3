//! Batch analysis tests

use reqgate::batch::{BatchItem, BatchOutcome, CancelToken};
use reqgate::engine::Engine;

fn engine() -> Engine {
    Engine::builtin().unwrap()
}

fn items() -> Vec<BatchItem> {
    vec![
        BatchItem::new("REQ-1", "The system should respond fast."),
        BatchItem::new("REQ-2", "   "),
        BatchItem::new("REQ-3", "It updates the record."),
    ]
}

#[test]
fn test_batch_isolates_per_item_errors() {
    let report = engine().analyze_batch(&items(), &CancelToken::new());

    assert_eq!(report.results.len(), 3);
    assert_eq!(report.analyzed(), 2);
    assert_eq!(report.failed(), 1);

    match &report.results[1] {
        BatchOutcome::Failed { error } => {
            assert_eq!(error.id, "REQ-2");
            assert_eq!(error.code, "EMPTY_INPUT");
        },
        BatchOutcome::Analyzed { .. } => panic!("whitespace item must fail"),
    }
}

#[test]
fn test_batch_preserves_submission_order_and_ids() {
    let report = engine().analyze_batch(&items(), &CancelToken::new());
    let ids: Vec<&str> = report.results.iter().map(BatchOutcome::id).collect();
    assert_eq!(ids, vec!["REQ-1", "REQ-2", "REQ-3"]);
}

#[test]
fn test_batch_results_match_single_analysis() {
    let engine = engine();
    let report = engine.analyze_batch(&items(), &CancelToken::new());

    let single = engine.analyze_as("It updates the record.", "REQ-3").unwrap();
    match &report.results[2] {
        BatchOutcome::Analyzed { analysis } => {
            assert_eq!(analysis.to_json().unwrap(), single.to_json().unwrap());
        },
        BatchOutcome::Failed { error } => panic!("unexpected failure: {}", error.message),
    }
}

#[test]
fn test_canceled_batch_skips_scheduling() {
    let token = CancelToken::new();
    token.cancel();
    let report = engine().analyze_batch(&items(), &token);

    assert_eq!(report.analyzed(), 0);
    for outcome in &report.results {
        match outcome {
            BatchOutcome::Failed { error } => assert_eq!(error.code, "CANCELED"),
            BatchOutcome::Analyzed { .. } => panic!("canceled batch must not analyze"),
        }
    }
}

#[test]
fn test_empty_batch() {
    let report = engine().analyze_batch(&[], &CancelToken::new());
    assert!(report.results.is_empty());
    assert_eq!(report.analyzed(), 0);
    assert_eq!(report.failed(), 0);
}

#[test]
fn test_large_batch_is_deterministic() {
    let engine = engine();
    let many: Vec<BatchItem> = (0..64)
        .map(|i| BatchItem::new(format!("REQ-{i}"), "The system should respond fast."))
        .collect();
    let report = engine.analyze_batch(&many, &CancelToken::new());
    assert_eq!(report.analyzed(), 64);

    let scores: Vec<String> = report
        .results
        .iter()
        .map(|r| match r {
            BatchOutcome::Analyzed { analysis } => format!("{:.1}", analysis.score),
            BatchOutcome::Failed { error } => panic!("unexpected failure: {}", error.message),
        })
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] == pair[1]));
}
