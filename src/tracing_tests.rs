#[cfg(feature = "tracing")]
mod tracing_tests {
    use crate::prelude::*;
    use tracing::info_span;

    fn init_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn test_enumerate_within_span() {
        init_subscriber();
        let span = info_span!("enumerate_test", test_id = "enumerate_span_test");
        let _guard = span.enter();

        let store: Store<u32> = (0..20).collect();
        let visited = store
            .enumerate(
                |idx, _| -> StoreResult<Action> {
                    Ok(if idx % 2 == 0 {
                        Action::Delete
                    } else {
                        Action::Continue
                    })
                },
                true,
            )
            .unwrap();

        assert_eq!(visited, 20);
        assert_eq!(store.len(), 10);
    }

    #[test]
    fn test_shared_delete_is_reported_not_applied() {
        init_subscriber();
        let store: Store<u32> = (0..3).collect();
        store
            .enumerate(|_, _| -> StoreResult<Action> { Ok(Action::Delete) }, false)
            .unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_json_lines_within_span() {
        init_subscriber();
        let span = info_span!("codec_test", test_id = "json_lines_span_test");
        let _guard = span.enter();

        let store: Store<String> = (0..64).map(|i| format!("value_{i}")).collect();
        let bytes = store
            .to_json_lines_with(&CodecConfig::new().with_workers(4))
            .unwrap();

        let restored: Store<String> = Store::default();
        assert_eq!(restored.from_json_lines(&bytes).unwrap(), 64);
        assert_eq!(restored.get_all(), store.get_all());
    }

    #[tokio::test]
    async fn test_snapshot_within_span() {
        init_subscriber();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("traced.jsonl");

        let store: Store<u64> = (0..8).collect();
        assert_eq!(save_json_lines(&store, &path).await.unwrap(), 8);

        let loaded: Store<u64> = load_json_lines(&path, 8).await.unwrap();
        assert_eq!(loaded.get_all(), store.get_all());
    }
}
