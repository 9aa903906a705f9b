use admission_core::{RatingError, RatingService, RatingStore, RatingSubmission};
use serde_json::json;
use tempfile::TempDir;

fn test_store() -> (TempDir, RatingStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = RatingStore::new(dir.path().join("submissions.json"));
    store.initialize().unwrap();
    (dir, store)
}

fn submission(body: serde_json::Value) -> RatingSubmission {
    RatingSubmission::from_json(body)
}

#[test]
fn boundary_ratings_are_stored() {
    let (_dir, store) = test_store();
    let service = RatingService::new(&store);

    let low = service.submit(submission(json!({"rating": 0}))).unwrap();
    let high = service
        .submit(submission(json!({"rating": 100, "comment": "top"})))
        .unwrap();

    assert_eq!(low.user, "User 1");
    assert_eq!(low.comment, "No comment provided.");
    assert_eq!(high.user, "User 2");
    assert_eq!(high.comment, "top");

    let entries = service.list().unwrap();
    assert_eq!(entries, vec![low, high]);
}

#[test]
fn out_of_range_or_missing_rating_writes_nothing() {
    let (_dir, store) = test_store();
    let service = RatingService::new(&store);

    for body in [
        json!({"rating": 101}),
        json!({"rating": -0.5}),
        json!({"comment": "no rating"}),
        json!({"rating": "80"}),
    ] {
        let err = service.submit(submission(body)).unwrap_err();
        assert!(matches!(err, RatingError::InvalidRating));
        assert_eq!(
            err.to_string(),
            "Invalid rating. Rating must be between 0 and 100."
        );
    }

    assert!(service.list().unwrap().is_empty());
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "[]");
}

#[test]
fn fractional_rating_keeps_its_value() {
    let (_dir, store) = test_store();
    let service = RatingService::new(&store);

    let entry = service.submit(submission(json!({"rating": 42.5}))).unwrap();
    let stored = serde_json::to_value(&entry).unwrap();
    assert_eq!(stored["rating"], json!(42.5));
}

#[test]
fn labels_continue_from_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("submissions.json");
    std::fs::write(
        &path,
        r#"[{"user": "User 1", "rating": 10, "comment": "earlier"}]"#,
    )
    .unwrap();

    let store = RatingStore::new(&path);
    store.initialize().unwrap();
    let entry = RatingService::new(&store)
        .submit(submission(json!({"rating": 55})))
        .unwrap();

    assert_eq!(entry.user, "User 2");
    assert_eq!(store.list_all().unwrap()[0].comment, "earlier");
}

#[test]
fn unwritable_ratings_file_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = RatingStore::new(dir.path().join("missing").join("submissions.json"));

    assert!(store.initialize().is_err());
    let err = RatingService::new(&store)
        .submit(submission(json!({"rating": 50})))
        .unwrap_err();
    assert!(matches!(err, RatingError::Storage(_)));
}
