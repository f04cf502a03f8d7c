//! # Snapshots
//!
//! Async helpers that move a store across a process boundary as a JSON lines
//! file. Encoding and decoding run on tokio's blocking pool so the calling
//! runtime is never stalled by marshaling; file I/O goes through `tokio::fs`.
//!
//! ```rust,no_run
//! use seqstore::prelude::*;
//!
//! # async fn demo() -> StoreResult<()> {
//! let store: Store<u64> = (0..10).collect();
//! save_json_lines(&store, "readings.jsonl").await?;
//!
//! let restored: Store<u64> = load_json_lines("readings.jsonl", 16).await?;
//! assert_eq!(restored.get_all(), store.get_all());
//! # Ok(())
//! # }
//! ```

use crate::codec::CodecConfig;
use crate::error::{StoreError, StoreResult};
use crate::store::Store;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;

#[cfg(feature = "tracing")]
use tracing::{debug, instrument};

/// Write `store` to `path` in JSON lines form, replacing any existing file
///
/// The data is written to a sibling temporary file, synced, then renamed over
/// `path`, so readers never see a half-written snapshot. If any step after
/// creating the temporary file fails, it is removed before the error is
/// returned. Returns the number of records written.
#[cfg_attr(feature = "tracing", instrument(skip(store, path), fields(path = %path.as_ref().display())))]
pub async fn save_json_lines<T, P>(store: &Store<T>, path: P) -> StoreResult<usize>
where
    T: Serialize + Send + Sync + 'static,
    P: AsRef<Path>,
{
    save_json_lines_with(store, path, CodecConfig::default()).await
}

/// Like [`save_json_lines`] with an explicit codec config
pub async fn save_json_lines_with<T, P>(
    store: &Store<T>,
    path: P,
    config: CodecConfig,
) -> StoreResult<usize>
where
    T: Serialize + Send + Sync + 'static,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let snapshot = store.clone();
    let (bytes, count) = tokio::task::spawn_blocking(move || snapshot.encode_lines(&config))
        .await
        .map_err(|err| StoreError::worker(format!("encode task failed: {err}")))??;

    let tmp = temp_path(path);
    let written = async {
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp, path).await
    }
    .await;

    if let Err(err) = written {
        // The temp file may not exist if creating it was what failed
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(err.into());
    }

    #[cfg(feature = "tracing")]
    debug!(records = count, bytes = bytes.len(), "snapshot saved");

    Ok(count)
}

/// Read a JSON lines snapshot from `path` into a fresh store
///
/// `capacity` is the allocation hint for the new store. Any read or decode
/// failure is returned and no store is produced.
#[cfg_attr(feature = "tracing", instrument(skip(path), fields(path = %path.as_ref().display())))]
pub async fn load_json_lines<T, P>(path: P, capacity: usize) -> StoreResult<Store<T>>
where
    T: DeserializeOwned + Send + Sync + 'static,
    P: AsRef<Path>,
{
    let bytes = tokio::fs::read(path.as_ref()).await?;

    let store = tokio::task::spawn_blocking(move || -> StoreResult<Store<T>> {
        let store = Store::new(capacity);
        store.from_json_lines(&bytes)?;
        Ok(store)
    })
    .await
    .map_err(|err| StoreError::worker(format!("decode task failed: {err}")))??;

    #[cfg(feature = "tracing")]
    debug!(records = store.len(), "snapshot loaded");

    Ok(store)
}

/// Sibling of `path` named uniquely per save, so concurrent saves to the
/// same target never share a temp file
fn temp_path(path: &Path) -> PathBuf {
    static SEQUENCE: AtomicU64 = AtomicU64::new(0);

    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let mut name = std::ffi::OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.{seq}.tmp", std::process::id()));
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Job {
        id: u32,
        name: String,
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jobs.jsonl");

        let store: Store<Job> = (0..50)
            .map(|id| Job {
                id,
                name: format!("job-{id}"),
            })
            .collect();

        assert_eq!(save_json_lines(&store, &path).await.unwrap(), 50);
        assert_eq!(entries(&dir), vec!["jobs.jsonl".to_string()]);

        let loaded: Store<Job> = load_json_lines(&path, 64).await.unwrap();
        assert_eq!(loaded.get_all(), store.get_all());
    }

    fn entries(dir: &TempDir) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_save_failure_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a rename
        let path = dir.path().join("occupied");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep.txt"), b"x").unwrap();

        let store: Store<u32> = (0..5).collect();
        match save_json_lines(&store, &path).await {
            Err(StoreError::Io(_)) => {}
            other => panic!("Expected Io error, got {other:?}"),
        }

        assert_eq!(entries(&dir), vec!["occupied".to_string()]);
        assert!(path.join("keep.txt").exists());
    }

    #[tokio::test]
    async fn test_concurrent_saves_use_distinct_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shared.jsonl");

        let first: Store<u32> = (0..500).collect();
        let second: Store<u32> = (500..1000).collect();
        let (a, b) = tokio::join!(save_json_lines(&first, &path), save_json_lines(&second, &path));
        assert_eq!(a.unwrap(), 500);
        assert_eq!(b.unwrap(), 500);

        // Whichever rename landed last wins, and it is a complete snapshot
        let loaded: Store<u32> = load_json_lines(&path, 500).await.unwrap();
        let all = loaded.get_all();
        assert!(all == first.get_all() || all == second.get_all());
        assert_eq!(entries(&dir), vec!["shared.jsonl".to_string()]);
    }

    #[test]
    fn test_temp_path_is_unique_sibling() {
        let path = Path::new("/data/values.jsonl");
        let a = temp_path(path);
        let b = temp_path(path);

        assert_ne!(a, b);
        assert_eq!(a.parent(), path.parent());
        assert!(a.file_name().unwrap().to_string_lossy().starts_with(".values.jsonl."));
    }

    #[tokio::test]
    async fn test_save_empty_store_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.jsonl");

        let store: Store<Job> = Store::new(0);
        assert_eq!(save_json_lines(&store, &path).await.unwrap(), 0);
        assert_eq!(tokio::fs::read(&path).await.unwrap().len(), 0);

        let loaded: Store<Job> = load_json_lines(&path, 0).await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("values.jsonl");

        let store: Store<u32> = (0..10).collect();
        save_json_lines(&store, &path).await.unwrap();

        store.set(vec![42]);
        save_json_lines_with(&store, &path, CodecConfig::new().with_workers(1))
            .await
            .unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "42\n");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result: StoreResult<Store<Job>> =
            load_json_lines(dir.path().join("missing.jsonl"), 0).await;

        match result {
            Err(StoreError::Io(_)) => {}
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_corrupt_file_is_encoding_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("corrupt.jsonl");
        tokio::fs::write(&path, b"{\"id\":1,\"name\":\"ok\"}\n{broken\n")
            .await
            .unwrap();

        let result: StoreResult<Store<Job>> = load_json_lines(&path, 0).await;
        match result {
            Err(StoreError::Encoding(msg)) => assert!(msg.starts_with("line 2:")),
            other => panic!("Expected Encoding error, got {other:?}"),
        }
    }
}
