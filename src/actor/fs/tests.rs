use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::debouncer::{DEBOUNCE_MS, Debouncer, is_temp_file};
use super::watch_roots::WatchRoots;
use super::{debounce_loop, describe_changes};
use crate::core::WatchError;
use crate::reload::rebuild_channel;

fn make_event(paths: Vec<&str>, kind: notify::EventKind) -> notify::Event {
    notify::Event {
        kind,
        paths: paths.into_iter().map(PathBuf::from).collect(),
        attrs: Default::default(),
    }
}

fn modify_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Data(
        notify::event::DataChange::Any,
    ))
}

fn metadata_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Metadata(
        notify::event::MetadataKind::WriteTime,
    ))
}

fn create_kind() -> notify::EventKind {
    notify::EventKind::Create(notify::event::CreateKind::File)
}

fn remove_kind() -> notify::EventKind {
    notify::EventKind::Remove(notify::event::RemoveKind::File)
}

#[test]
fn test_debouncer_empty() {
    let debouncer = Debouncer::new();
    assert!(!debouncer.is_ready());
    assert!(debouncer.sleep_duration() >= Duration::from_secs(3600));
}

#[test]
fn test_qualifying_kinds() {
    let mut debouncer = Debouncer::new();

    assert!(debouncer.add_event(&make_event(vec!["/site/config/profile.toml"], modify_kind())));
    assert!(debouncer.add_event(&make_event(vec!["/site/assets/new.png"], create_kind())));
    assert!(debouncer.add_event(&make_event(vec!["/site/assets/old.png"], remove_kind())));
    assert!(!debouncer.add_event(&make_event(vec!["/site/assets/a.png"], metadata_kind())));
    assert!(!debouncer.add_event(&make_event(
        vec!["/site/assets/a.png"],
        notify::EventKind::Access(notify::event::AccessKind::Any)
    )));

    assert_eq!(debouncer.pending.len(), 3);
}

#[test]
fn test_temp_file_ignored() {
    let mut debouncer = Debouncer::new();

    let swap = make_event(vec!["/site/config/.profile.toml.swp"], modify_kind());
    assert!(!debouncer.add_event(&swap));
    assert!(!debouncer.add_event(&make_event(vec!["/site/config/profile.toml~"], modify_kind())));
    assert!(!debouncer.add_event(&make_event(vec!["/site/themes/default/x.tmp"], create_kind())));
    assert!(debouncer.last_event.is_none());
    assert!(debouncer.pending.is_empty());
}

#[test]
fn test_temp_file_patterns() {
    assert!(is_temp_file(&PathBuf::from("a.swo")));
    assert!(is_temp_file(&PathBuf::from("a.bak")));
    assert!(is_temp_file(&PathBuf::from(".DS_Store")));
    assert!(!is_temp_file(&PathBuf::from("template.html")));
    assert!(!is_temp_file(&PathBuf::from("styles/base.css")));
}

#[test]
fn test_output_tree_ignored() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("dist");
    std::fs::create_dir_all(&output).unwrap();
    let mut debouncer = Debouncer::new().ignoring(&output);

    let written = output.join("index.html");
    std::fs::write(&written, "").unwrap();
    assert!(!debouncer.add_event(&make_event(
        vec![written.to_str().unwrap()],
        modify_kind()
    )));

    let source = temp.path().join("profile.toml");
    std::fs::write(&source, "").unwrap();
    assert!(debouncer.add_event(&make_event(vec![source.to_str().unwrap()], modify_kind())));
}

#[test]
fn test_dedup_same_path() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(vec!["/site/a.css", "/site/a.css"], modify_kind()));
    debouncer.add_event(&make_event(vec!["/site/a.css"], modify_kind()));
    assert_eq!(debouncer.pending.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_sleep_duration_after_event() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(vec!["/site/a.css"], modify_kind()));
    assert_eq!(debouncer.sleep_duration(), Duration::from_millis(DEBOUNCE_MS));

    tokio::time::advance(Duration::from_millis(60)).await;
    assert_eq!(debouncer.sleep_duration(), Duration::from_millis(DEBOUNCE_MS - 60));
    assert!(!debouncer.is_ready());
    assert!(debouncer.take_if_ready().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_new_event_restarts_window() {
    let mut debouncer = Debouncer::new();
    debouncer.add_event(&make_event(vec!["/site/a.css"], modify_kind()));

    tokio::time::advance(Duration::from_millis(90)).await;
    debouncer.add_event(&make_event(vec!["/site/b.css"], modify_kind()));

    tokio::time::advance(Duration::from_millis(90)).await;
    assert!(!debouncer.is_ready());

    tokio::time::advance(Duration::from_millis(10)).await;
    let paths = debouncer.take_if_ready().unwrap();
    assert_eq!(paths, [PathBuf::from("/site/a.css"), PathBuf::from("/site/b.css")]);
    assert!(debouncer.last_event.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_burst_fires_exactly_once_after_quiet_period() {
    let (event_tx, mut event_rx) = mpsc::channel(8);
    let (signal, mut rebuild_rx) = rebuild_channel();

    let task = tokio::spawn(async move {
        let mut debouncer = Debouncer::new();
        debounce_loop(&mut event_rx, &mut debouncer, &signal, || {}).await;
    });

    let mut last = Instant::now();
    for name in ["/site/config/a.toml", "/site/config/b.toml", "/site/config/c.toml"] {
        event_tx.send(make_event(vec![name], modify_kind())).await.unwrap();
        last = Instant::now();
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    rebuild_rx.recv().await.unwrap();
    assert!(Instant::now() - last >= Duration::from_millis(DEBOUNCE_MS));

    let second = tokio::time::timeout(Duration::from_secs(1), rebuild_rx.recv()).await;
    assert!(second.is_err(), "burst must coalesce into one signal");

    drop(event_tx);
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_pending_signal_absorbs_later_windows() {
    let (event_tx, mut event_rx) = mpsc::channel(8);
    let (signal, mut rebuild_rx) = rebuild_channel();

    let task = tokio::spawn(async move {
        let mut debouncer = Debouncer::new();
        debounce_loop(&mut event_rx, &mut debouncer, &signal, || {}).await;
    });

    // Two separate windows while nobody consumes the signal.
    for name in ["/site/a.css", "/site/b.css"] {
        event_tx.send(make_event(vec![name], modify_kind())).await.unwrap();
        tokio::time::sleep(Duration::from_millis(DEBOUNCE_MS * 2)).await;
    }

    assert!(rebuild_rx.try_recv().is_ok());
    assert!(rebuild_rx.try_recv().is_err());

    drop(event_tx);
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_loop_stops_when_receiver_gone() {
    let (event_tx, mut event_rx) = mpsc::channel(8);
    let (signal, rebuild_rx) = rebuild_channel();
    drop(rebuild_rx);

    let task = tokio::spawn(async move {
        let mut debouncer = Debouncer::new();
        debounce_loop(&mut event_rx, &mut debouncer, &signal, || {}).await;
    });

    event_tx.send(make_event(vec!["/site/a.css"], modify_kind())).await.unwrap();
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("loop should exit")
        .unwrap();
}

#[test]
fn test_describe_changes() {
    assert_eq!(
        describe_changes(&[PathBuf::from("/site/config/profile.toml")]),
        "changed: profile.toml"
    );
    assert_eq!(
        describe_changes(&[PathBuf::from("/a/x.css"), PathBuf::from("/a/y.css")]),
        "changed: x.css (+1 more)"
    );
}

#[test]
fn test_missing_root_is_warning_and_reattached() {
    let temp = TempDir::new().unwrap();
    let present = temp.path().join("config");
    let missing = temp.path().join("assets");
    std::fs::create_dir_all(&present).unwrap();

    let mut watcher = notify::recommended_watcher(|_: notify::Result<notify::Event>| {}).unwrap();
    let mut roots = WatchRoots::new(vec![present, missing.clone()]);

    let warnings = roots.attach_existing(&mut watcher);
    assert_eq!(warnings.len(), 1);
    assert!(matches!(&warnings[0], WatchError::Missing(path) if *path == missing));
    assert_eq!(roots.attached_count(), 1);

    std::fs::create_dir_all(&missing).unwrap();
    roots.maintain(&mut watcher);
    assert_eq!(roots.attached_count(), 2);
}
