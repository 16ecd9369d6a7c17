//! End-to-end engine behaviour: load, factorize, persist.

use std::fs;

use super::common::{history, Stores};
use lzedit::{
    EditDistanceEngine, EditDistanceResult, ErrorKind, Factorization, Job, ResponseId,
    ResultStore, SuffixArrayStrategy,
};

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_no_content_gives_empty_record() {
    let stores = Stores::new();
    let id = ResponseId::new(1, 1, 1, 1);
    stores.add(id, &[None, None, None]);

    stores
        .engine()
        .run(&Job::for_response(stores.responses_root(), &id))
        .unwrap();

    let stored = stores.store().read(&id).unwrap().unwrap();
    assert_eq!(stored.factorization, Factorization::default());
    assert_eq!(stored.edit_distances, vec![0]);
    assert_eq!(stored.max, 0);

    let json = fs::read_to_string(stores.store().path_for(&id)).unwrap();
    assert_eq!(json, r#"{"factorization":[],"edit_distances":[0],"max":0}"#);
}

#[test]
fn test_empty_history_file_gives_empty_record() {
    let stores = Stores::new();
    let id = ResponseId::new(1, 1, 1, 2);
    stores.add(id, &[]);

    stores
        .engine()
        .run(&Job::for_response(stores.responses_root(), &id))
        .unwrap();
    assert_eq!(
        stores.store().read(&id).unwrap(),
        Some(EditDistanceResult::empty())
    );
}

#[test]
fn test_abab_ababab_hand_computed() {
    // corpus: a b a b ¹ a b a b a b ²
    //   v0: a | b | ab          3 phrases
    //   v1: abab | ab           2 phrases
    let stores = Stores::new();
    let id = ResponseId::new(2, 7, 1, 8);
    stores.add(id, &[Some("abab"), Some("ababab")]);

    for strategy in SuffixArrayStrategy::ALL {
        let engine = EditDistanceEngine::new(strategy, stores.store());
        engine
            .run(&Job::for_response(stores.responses_root(), &id))
            .unwrap();

        let stored = stores.store().read(&id).unwrap().unwrap();
        assert_eq!(
            stored.factorization,
            Factorization::new(vec![vec![1, 1, 2], vec![4, 2]])
        );
        assert_eq!(stored.edit_distances, vec![3, 2]);
        assert_eq!(stored.max, 3);
    }
}

#[test]
fn test_markup_only_changes_do_not_count() {
    let stores = Stores::new();
    let engine = EditDistanceEngine::new(SuffixArrayStrategy::RankDoubling, stores.store());

    let plain = engine
        .compute(
            "plain",
            &history(&[Some("<p>the answer is 42</p>"), Some("<p><b>the answer is 42</b></p>")]),
        )
        .unwrap();
    // Same text after stripping: the second version is one copied phrase
    assert_eq!(plain.edit_distances[1], 1);
}

// ============================================================================
// IDEMPOTENCE AND OVERWRITE
// ============================================================================

#[test]
fn test_rerun_is_byte_identical() {
    let stores = Stores::new();
    let id = ResponseId::new(5, 4, 3, 2);
    stores.add(
        id,
        &[
            Some("first draft of the essay"),
            None,
            Some("first draft of the long essay"),
            Some("second draft of the long essay"),
        ],
    );
    let engine = stores.engine();
    let job = Job::for_response(stores.responses_root(), &id);

    let path = engine.run(&job).unwrap();
    let first = fs::read(&path).unwrap();
    engine.run(&job).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_recompute_overwrites_instead_of_merging() {
    let stores = Stores::new();
    let id = ResponseId::new(5, 4, 3, 3);
    let job = Job::for_response(stores.responses_root(), &id);

    stores.add(id, &[Some("abab"), Some("ababab")]);
    stores.engine().run(&job).unwrap();

    // Re-fetch brings a shorter history
    stores.add(id, &[Some("xyz")]);
    stores.engine().run(&job).unwrap();

    let stored = stores.store().read(&id).unwrap().unwrap();
    assert_eq!(stored.factorization, Factorization::new(vec![vec![1, 1, 1]]));
    assert_eq!(stored.edit_distances, vec![3]);
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn test_missing_source_leaves_no_record() {
    let stores = Stores::new();
    let id = ResponseId::new(9, 9, 9, 9);

    let err = stores
        .engine()
        .run(&Job::for_response(stores.responses_root(), &id))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert!(!err.is_fatal());

    // "Not computed yet" reads as the default record
    assert_eq!(stores.store().read(&id).unwrap(), None);
    assert_eq!(stores.store().read_or_default(&id), EditDistanceResult::empty());
}

#[test]
fn test_malformed_history_leaves_old_record() {
    let stores = Stores::new();
    let id = ResponseId::new(9, 9, 9, 8);
    let job = Job::for_response(stores.responses_root(), &id);
    stores.add(id, &[Some("good")]);
    stores.engine().run(&job).unwrap();

    fs::write(job.source_path(), b"[{\"changes\": ").unwrap();
    let err = stores.engine().run(&job).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);

    let stored = stores.store().read(&id).unwrap().unwrap();
    assert_eq!(stored.edit_distances, vec![4]);
}

#[test]
fn test_unwritable_store_is_persist_failure() {
    let stores = Stores::new();
    let id = ResponseId::new(1, 2, 3, 4);
    stores.add(id, &[Some("abc")]);

    // A file where the results root should be
    let blocked = stores.results.path().join("blocked");
    fs::write(&blocked, b"").unwrap();
    let engine = EditDistanceEngine::new(SuffixArrayStrategy::Naive, ResultStore::new(&blocked));

    let err = engine
        .run(&Job::for_response(stores.responses_root(), &id))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PersistFailure);
}
