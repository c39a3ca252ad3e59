use actlog_core::{ActionVocabulary, Error, Result, User};
use actlog_pipeline::{
    config::{Mode, PipelineConfig},
    pool::{Abort, run_pool, run_pool_with_abort},
    run,
    storage::{FileStore, UserStore},
};
use core::time::Duration;
use std::{
    collections::{HashMap, HashSet},
    io,
    path::Path,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

fn config(output_dir: &Path, tasks: u64, concurrency: usize) -> PipelineConfig {
    PipelineConfig {
        tasks,
        concurrency,
        queue_capacity: usize::try_from(tasks).unwrap().max(1),
        max_log_entries: 1000,
        save_delay: Duration::ZERO,
        generation_delay: Duration::ZERO,
        output_dir: output_dir.to_path_buf(),
        actions: ActionVocabulary::default(),
        truncate: false,
        mode: Mode::Pool,
    }
}

/// Wraps a [`FileStore`], remembering how many entries each user had.
struct RecordingStore {
    inner: FileStore,
    entries: Mutex<HashMap<u64, usize>>,
}

impl UserStore for RecordingStore {
    async fn save(&self, user: &User) -> Result<()> {
        self.inner.save(user).await?;
        let previous = self
            .entries
            .lock()
            .unwrap()
            .insert(user.id, user.logs.len());
        assert!(previous.is_none(), "user {} saved twice", user.id);
        Ok(())
    }
}

/// Counts saves in memory without touching the disk.
#[derive(Default)]
struct CountingStore {
    ids: Mutex<HashSet<u64>>,
}

impl UserStore for CountingStore {
    async fn save(&self, user: &User) -> Result<()> {
        assert!(self.ids.lock().unwrap().insert(user.id));
        Ok(())
    }
}

/// Fails to open the file for one user id and records every save attempt.
///
/// With an [`Abort`] attached, a save starting after that abort was triggered
/// is flagged; otherwise the flag tracks saves starting after the failure.
struct FailingStore {
    inner: FileStore,
    fail_id: u64,
    abort: Option<Abort>,
    failed: AtomicBool,
    attempts: Mutex<Vec<u64>>,
    started_after_failure: AtomicBool,
}

impl FailingStore {
    fn new(inner: FileStore, fail_id: u64) -> Self {
        Self {
            inner,
            fail_id,
            abort: None,
            failed: AtomicBool::new(false),
            attempts: Mutex::new(Vec::new()),
            started_after_failure: AtomicBool::new(false),
        }
    }

    fn with_abort(mut self, abort: Abort) -> Self {
        self.abort = Some(abort);
        self
    }
}

impl UserStore for FailingStore {
    async fn save(&self, user: &User) -> Result<()> {
        let aborted = match &self.abort {
            Some(abort) => abort.is_triggered(),
            None => self.failed.load(Ordering::SeqCst),
        };
        if aborted {
            self.started_after_failure.store(true, Ordering::SeqCst);
        }
        self.attempts.lock().unwrap().push(user.id);

        if user.id == self.fail_id {
            self.failed.store(true, Ordering::SeqCst);
            return Err(Error::FileOpen {
                path: self.inner.path_for(user.id),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "injected"),
            });
        }
        self.inner.save(user).await
    }
}

fn report_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn full_run_writes_one_file_per_user() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(RecordingStore {
        inner: FileStore::new(dir.path(), false),
        entries: Mutex::new(HashMap::new()),
    });

    let summary = run_pool(&config(dir.path(), 100, 20), Arc::clone(&store))
        .await
        .unwrap();

    assert_eq!(summary.users_generated, 100);
    assert_eq!(summary.users_saved, 100);

    let mut expected: Vec<_> = (1..=100).map(|id| format!("uid{id}.txt")).collect();
    expected.sort();
    assert_eq!(report_files(dir.path()), expected);

    let entries = store.entries.lock().unwrap();
    let mut total_entries = 0;
    for id in 1..=100_u64 {
        let content = std::fs::read_to_string(dir.path().join(format!("uid{id}.txt"))).unwrap();
        let mut lines = content.lines();

        assert_eq!(
            lines.next(),
            Some(format!("UID: {id}; Email: user{id}@company.com;").as_str())
        );
        assert_eq!(lines.next(), Some("Activity Log:"));

        let entry_lines: Vec<_> = lines.collect();
        assert_eq!(entry_lines.len(), entries[&id]);
        for (index, line) in entry_lines.iter().enumerate() {
            assert!(line.starts_with(&format!("{index}. [")), "bad line {line:?}");
        }
        total_entries += entries[&id] as u64;
    }
    assert_eq!(summary.log_entries_written, total_entries);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stress_run_completes_every_stage() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), 10_000, 64);
    config.max_log_entries = 4;
    let store = Arc::new(CountingStore::default());

    let summary = run_pool(&config, Arc::clone(&store)).await.unwrap();

    // Every save has completed by the time the coordinator returns.
    let ids = store.ids.lock().unwrap();
    assert_eq!(ids.len(), 10_000);
    assert!((1..=10_000).all(|id| ids.contains(&id)));
    assert_eq!(summary.users_generated, 10_000);
    assert_eq!(summary.users_saved, 10_000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn more_units_than_tasks() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(CountingStore::default());

    let summary = run_pool(&config(dir.path(), 3, 20), Arc::clone(&store))
        .await
        .unwrap();

    assert_eq!(summary.users_saved, 3);
    assert_eq!(store.ids.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn zero_tasks_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path(), false));

    let summary = run_pool(&config(dir.path(), 0, 4), store).await.unwrap();

    assert_eq!(summary.users_generated, 0);
    assert_eq!(summary.users_saved, 0);
    assert!(report_files(dir.path()).is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn open_failure_aborts_remaining_saves() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FailingStore::new(FileStore::new(dir.path(), false), 10));

    // A single worker and saver keep the save order equal to the id order.
    let err = run_pool(&config(dir.path(), 100, 1), Arc::clone(&store))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::FileOpen { .. }));
    assert_eq!(err.path(), Some(dir.path().join("uid10.txt").as_path()));
    assert_eq!(
        *store.attempts.lock().unwrap(),
        (1..=10).collect::<Vec<_>>()
    );
    assert!(!store.started_after_failure.load(Ordering::SeqCst));

    let mut expected: Vec<_> = (1..10).map(|id| format!("uid{id}.txt")).collect();
    expected.sort();
    assert_eq!(report_files(dir.path()), expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn open_failure_with_many_savers_returns_the_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), 100, 8);
    config.save_delay = Duration::from_millis(5);
    let abort = Abort::new();
    let store = Arc::new(
        FailingStore::new(FileStore::new(dir.path(), false), 1).with_abort(abort.clone()),
    );

    let err = run_pool_with_abort(&config, Arc::clone(&store), abort)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::FileOpen { .. }));
    assert!(!dir.path().join("uid1.txt").exists());
    assert!(report_files(dir.path()).len() < 100);
    assert!(!store.started_after_failure.load(Ordering::SeqCst));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn no_save_starts_after_the_abort() {
    for round in 0..20 {
        let dir = tempfile::tempdir().unwrap();
        // No write delay, so savers keep dequeueing while one of them fails.
        let config = config(dir.path(), 500, 32);
        let abort = Abort::new();
        let store = Arc::new(
            FailingStore::new(FileStore::new(dir.path(), false), 50).with_abort(abort.clone()),
        );

        let err = run_pool_with_abort(&config, Arc::clone(&store), abort.clone())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::FileOpen { .. }));
        assert!(abort.is_triggered());
        assert!(
            !store.started_after_failure.load(Ordering::SeqCst),
            "a save started after the abort in round {round}"
        );
        let attempts = store.attempts.lock().unwrap();
        assert_eq!(report_files(dir.path()).len(), attempts.len() - 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn external_abort_stops_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path(), 100, 4);
    let abort = Abort::new();
    abort.trigger().await;
    let store = Arc::new(CountingStore::default());

    let summary = run_pool_with_abort(&config, Arc::clone(&store), abort)
        .await
        .unwrap();

    assert_eq!(summary.users_saved, 0);
    assert!(store.ids.lock().unwrap().is_empty());
}

#[tokio::test]
async fn sequential_mode_saves_every_user() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), 5, 1);
    config.mode = Mode::Sequential;
    let store = Arc::new(FileStore::new(dir.path(), false));

    let summary = run(&config, store).await.unwrap();

    assert_eq!(summary.users_generated, 5);
    assert_eq!(summary.users_saved, 5);
    assert_eq!(
        report_files(dir.path()),
        vec!["uid1.txt", "uid2.txt", "uid3.txt", "uid4.txt", "uid5.txt"]
    );
}

#[tokio::test]
async fn sequential_mode_stops_at_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), 5, 1);
    config.mode = Mode::Sequential;
    let store = Arc::new(FailingStore::new(FileStore::new(dir.path(), false), 3));

    let err = run(&config, Arc::clone(&store)).await.unwrap_err();

    assert!(matches!(err, Error::FileOpen { .. }));
    assert_eq!(*store.attempts.lock().unwrap(), vec![1, 2, 3]);
    assert_eq!(report_files(dir.path()), vec!["uid1.txt", "uid2.txt"]);
}

#[tokio::test]
async fn custom_vocabulary_reaches_reports() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path(), 10, 2);
    config.actions = ActionVocabulary::new(["paid"]).unwrap();
    config.max_log_entries = 50;
    let store = Arc::new(FileStore::new(dir.path(), false));

    run(&config, store).await.unwrap();

    for id in 1..=10 {
        let content = std::fs::read_to_string(dir.path().join(format!("uid{id}.txt"))).unwrap();
        assert!(content.lines().skip(2).all(|line| line.contains(" [paid] at ")));
    }
}
