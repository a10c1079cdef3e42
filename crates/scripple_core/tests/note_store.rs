use scripple_core::{NoteStore, StoreError, MAX_NOTE_BYTES, SNAPSHOT_VERSION};
use serde_json::json;

fn store_with(capacity: usize, texts: &[&str]) -> NoteStore {
    let mut store = NoteStore::new(capacity).unwrap();
    for text in texts {
        store.append(*text).unwrap();
    }
    store
}

#[test]
fn watch_session_scenario_with_capacity_three() {
    let mut store = NoteStore::new(3).unwrap();

    assert_eq!(store.append("buy milk").unwrap(), 0);
    assert_eq!(store.len(), 1);
    assert_eq!(store.append("walk dog").unwrap(), 1);
    assert_eq!(store.append("call mom").unwrap(), 2);

    let err = store.append("too many").unwrap_err();
    assert!(matches!(err, StoreError::CapacityExceeded { capacity: 3 }));
    assert_eq!(store.len(), 3);

    store.remove_at(0).unwrap();
    assert_eq!(store.texts(), vec!["walk dog", "call mom"]);

    let bytes = store.serialize().unwrap();
    let restored = NoteStore::deserialize(&bytes, 3).unwrap();
    assert_eq!(restored.texts(), vec!["walk dog", "call mom"]);
}

#[test]
fn length_never_exceeds_capacity() {
    for capacity in [1, 6, 10] {
        let mut store = NoteStore::new(capacity).unwrap();
        for attempt in 0..capacity * 2 {
            let result = store.append(format!("note {attempt}"));
            if attempt < capacity {
                assert_eq!(result.unwrap(), attempt);
            } else {
                assert!(matches!(result, Err(StoreError::CapacityExceeded { .. })));
            }
            assert!(store.len() <= capacity);
        }

        let before = store.texts();
        store.append("one more").unwrap_err();
        assert_eq!(store.texts(), before);
        assert!(store.is_full());
    }
}

#[test]
fn remove_at_shifts_later_notes_down() {
    let mut store = store_with(5, &["a", "b", "c"]);
    store.remove_at(1).unwrap();
    assert_eq!(store.texts(), vec!["a", "c"]);

    store.remove_at(1).unwrap();
    assert_eq!(store.texts(), vec!["a"]);
}

#[test]
fn remove_at_out_of_range_leaves_store_unchanged() {
    let mut store = store_with(5, &["a", "b", "c"]);
    let err = store.remove_at(3).unwrap_err();
    assert!(matches!(err, StoreError::IndexOutOfRange { index: 3, len: 3 }));
    assert_eq!(store.texts(), vec!["a", "b", "c"]);

    let mut empty = NoteStore::new(2).unwrap();
    assert!(empty.remove_at(0).is_err());
}

#[test]
fn get_returns_note_or_index_error() {
    let store = store_with(4, &["first", "second"]);
    assert_eq!(store.get(1).unwrap().as_str(), "second");
    assert!(matches!(
        store.get(2),
        Err(StoreError::IndexOutOfRange { index: 2, len: 2 })
    ));
}

#[test]
fn duplicate_texts_are_allowed() {
    let store = store_with(3, &["same", "same"]);
    assert_eq!(store.texts(), vec!["same", "same"]);
}

#[test]
fn append_truncates_long_text_and_succeeds() {
    let mut store = NoteStore::new(2).unwrap();
    let long = "abcdefghij".repeat(40);
    let index = store.append(long.clone()).unwrap();
    let stored = store.get(index).unwrap();
    assert_eq!(stored.len(), MAX_NOTE_BYTES);
    assert_eq!(stored.as_str(), &long[..MAX_NOTE_BYTES]);
}

#[test]
fn round_trip_after_mixed_mutations_keeps_order() {
    let mut store = store_with(6, &["one", "two", "three", "four"]);
    store.remove_at(0).unwrap();
    store.append("five").unwrap();
    store.remove_at(2).unwrap();
    store.append("six ✓").unwrap();

    let bytes = store.serialize().unwrap();
    let restored = NoteStore::deserialize(&bytes, 6).unwrap();
    assert_eq!(restored.texts(), store.texts());
    assert_eq!(restored.capacity(), 6);
}

#[test]
fn empty_store_round_trips() {
    let store = NoteStore::new(4).unwrap();
    let restored = NoteStore::deserialize(&store.serialize().unwrap(), 4).unwrap();
    assert!(restored.is_empty());
}

#[test]
fn serialized_layout_carries_version_and_count() {
    let store = store_with(3, &["x", "y"]);
    let value: serde_json::Value = serde_json::from_slice(&store.serialize().unwrap()).unwrap();
    assert_eq!(
        value,
        json!({ "version": SNAPSHOT_VERSION, "count": 2, "notes": ["x", "y"] })
    );
}

#[test]
fn deserialize_rejects_count_above_capacity() {
    let payload = json!({
        "version": SNAPSHOT_VERSION,
        "count": 4,
        "notes": ["a", "b", "c", "d"],
    });
    let err = NoteStore::deserialize(payload.to_string().as_bytes(), 3).unwrap_err();
    assert!(matches!(err, StoreError::CorruptData(_)), "{err}");
}

#[test]
fn deserialize_rejects_count_disagreeing_with_notes() {
    let payload = json!({ "version": SNAPSHOT_VERSION, "count": 3, "notes": ["a"] });
    let err = NoteStore::deserialize(payload.to_string().as_bytes(), 10).unwrap_err();
    assert!(matches!(err, StoreError::CorruptData(_)), "{err}");
}

#[test]
fn deserialize_rejects_oversize_note() {
    let payload = json!({
        "version": SNAPSHOT_VERSION,
        "count": 1,
        "notes": ["z".repeat(MAX_NOTE_BYTES + 1)],
    });
    let err = NoteStore::deserialize(payload.to_string().as_bytes(), 10).unwrap_err();
    assert!(matches!(err, StoreError::CorruptData(_)), "{err}");
}

#[test]
fn deserialize_rejects_unknown_version_before_parsing_body() {
    let payload = json!({ "version": SNAPSHOT_VERSION + 1, "items": { "unexpected": true } });
    let err = NoteStore::deserialize(payload.to_string().as_bytes(), 10).unwrap_err();
    match err {
        StoreError::UnsupportedVersion { found, supported } => {
            assert_eq!(found, SNAPSHOT_VERSION + 1);
            assert_eq!(supported, SNAPSHOT_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn deserialize_rejects_garbage_bytes() {
    for payload in [
        &b""[..],
        &b"not json"[..],
        &b"{\"count\":1}"[..],
        &b"\xff\xfe"[..],
    ] {
        let err = NoteStore::deserialize(payload, 10).unwrap_err();
        assert!(matches!(err, StoreError::CorruptData(_)), "{err}");
    }
}
