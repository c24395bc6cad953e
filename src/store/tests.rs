use super::{CommandRecord, CommandSet, CommandStore, DEBUG_STORE_FILENAME};
use crate::error::QuickError;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
    env::temp_dir().join(format!(
        "quickcmd_{prefix}_{}_{unique}_{seq}",
        std::process::id()
    ))
}

fn set_of(pairs: &[(i64, &str)]) -> CommandSet {
    CommandSet::from_records(pairs.iter().map(|(h, t)| CommandRecord::new(*h, *t)))
        .expect("valid records")
}

#[test]
fn next_handle_is_one_for_empty_collection() {
    assert_eq!(CommandSet::new().next_handle(), Some(1));
}

#[test]
fn next_handle_exceeds_every_existing_handle() {
    let cases: &[&[(i64, &str)]] = &[
        &[(1, "ls")],
        &[(3, "a"), (1, "b")],
        &[(7, "a"), (2, "b"), (40, "c"), (5, "d")],
    ];
    for pairs in cases {
        let set = set_of(pairs);
        let next = set.next_handle().expect("room above the max");
        assert!(set.iter().all(|(handle, _)| next > handle));
        assert_eq!(next, pairs.iter().map(|(h, _)| *h).max().unwrap() + 1);
    }
}

#[test]
fn iteration_is_sorted_and_repeatable() {
    let set = set_of(&[(9, "nine"), (2, "two"), (5, "five")]);
    let first: Vec<_> = set.iter().collect();
    let second: Vec<_> = set.iter().collect();
    assert_eq!(first, vec![(2, "two"), (5, "five"), (9, "nine")]);
    assert_eq!(first, second);
}

#[test]
fn from_records_rejects_duplicate_and_non_positive_handles() {
    let dup = CommandSet::from_records(vec![
        CommandRecord::new(1, "ls"),
        CommandRecord::new(1, "pwd"),
    ]);
    assert!(dup.unwrap_err().contains("more than once"));

    let zero = CommandSet::from_records(vec![CommandRecord::new(0, "ls")]);
    assert!(zero.is_err());

}

#[test]
fn from_records_keeps_blank_text_written_elsewhere() {
    let set = CommandSet::from_records(vec![CommandRecord::new(1, "   ")]).expect("blank text loads");
    assert_eq!(set.get(1), Some("   "));
}

#[test]
fn next_handle_is_none_once_the_last_handle_is_taken() {
    let set = set_of(&[(3, "a"), (i64::MAX, "b")]);
    assert_eq!(set.next_handle(), None);
    assert_eq!(set.max_handle(), Some(i64::MAX));
}

#[test]
fn load_missing_file_returns_empty_collection() {
    let dir = unique_temp_dir("missing");
    let store = CommandStore::in_dir(&dir, DEBUG_STORE_FILENAME);
    let set = store.load().expect("load missing");
    assert!(set.is_empty());
    assert!(!dir.exists(), "load must not create the directory");
}

#[test]
fn load_empty_file_returns_empty_collection() {
    let dir = unique_temp_dir("empty");
    fs::create_dir_all(&dir).unwrap();
    let store = CommandStore::in_dir(&dir, DEBUG_STORE_FILENAME);
    fs::write(store.path(), "").unwrap();
    assert!(store.load().expect("load empty").is_empty());
    fs::write(store.path(), "\n  \n").unwrap();
    assert!(store.load().expect("load blank").is_empty());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn load_unparseable_file_is_corrupt_data() {
    let dir = unique_temp_dir("corrupt");
    fs::create_dir_all(&dir).unwrap();
    let store = CommandStore::in_dir(&dir, DEBUG_STORE_FILENAME);
    fs::write(store.path(), "{ not json").unwrap();
    let err = store.load().unwrap_err();
    assert!(matches!(err, QuickError::CorruptData { .. }), "got {err:?}");

    fs::write(
        store.path(),
        r#"[{"command":"ls","id":1},{"command":"pwd","id":1}]"#,
    )
    .unwrap();
    let err = store.load().unwrap_err();
    assert!(matches!(err, QuickError::CorruptData { .. }), "got {err:?}");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn save_then_load_round_trips_regardless_of_insertion_order() {
    let dir = unique_temp_dir("roundtrip");
    let store = CommandStore::in_dir(&dir, DEBUG_STORE_FILENAME);
    let mut set = CommandSet::new();
    set.insert(4, "echo four".to_string());
    set.insert(1, "ls -la".to_string());
    set.insert(2, "git status && git log -1".to_string());

    store.save(&set).expect("save");
    let loaded = store.load().expect("load");
    assert_eq!(loaded, set);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn save_writes_sorted_pretty_json_and_leaves_no_temp_files() {
    let dir = unique_temp_dir("format");
    let store = CommandStore::in_dir(&dir, DEBUG_STORE_FILENAME);
    let set = set_of(&[(2, "pwd"), (1, "ls")]);
    store.save(&set).expect("save");

    let body = fs::read_to_string(store.path()).unwrap();
    let ls = body.find("\"ls\"").unwrap();
    let pwd = body.find("\"pwd\"").unwrap();
    assert!(ls < pwd, "records must be written by ascending handle");
    let command_key = body.find("\"command\"").unwrap();
    let id_key = body.find("\"id\"").unwrap();
    assert!(command_key < id_key, "keys must be written alphabetically");
    assert!(body.contains('\n'));

    let entries: Vec<_> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries.len(), 1, "unexpected files: {entries:?}");

    store.save(&set).expect("save again");
    assert_eq!(fs::read_to_string(store.path()).unwrap(), body);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn load_accepts_files_written_by_hand() {
    let dir = unique_temp_dir("hand");
    fs::create_dir_all(&dir).unwrap();
    let store = CommandStore::in_dir(&dir, DEBUG_STORE_FILENAME);
    fs::write(
        store.path(),
        "[\n  {\"id\": 3, \"command\": \"make test\"},\n  {\"command\": \"ls\", \"id\": 1}\n]\n",
    )
    .unwrap();
    let set = store.load().expect("load");
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![(1, "ls"), (3, "make test")]);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn save_into_unwritable_location_is_io_failure() {
    let dir = unique_temp_dir("blocked");
    fs::create_dir_all(dir.parent().unwrap()).unwrap();
    fs::write(&dir, "a file, not a directory").unwrap();
    let store = CommandStore::in_dir(&dir, DEBUG_STORE_FILENAME);
    let err = store.save(&set_of(&[(1, "ls")])).unwrap_err();
    assert!(matches!(err, QuickError::Io { .. }), "got {err:?}");
    let _ = fs::remove_file(&dir);
}
