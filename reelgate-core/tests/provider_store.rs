use std::sync::Arc;

use reelgate_core::playback::resolve;
use reelgate_core::registry::STORAGE_KEY;
use reelgate_core::storage::{FileStore, KeyValueStore};
use reelgate_core::{ProviderStore, Registry, RegistryError};
use reelgate_model::{PlaybackRequest, Provider};

fn custom() -> Provider {
    Provider::new(
        "Custom",
        "https://custom.test/movie/{id}",
        "https://custom.test/tv/{id}/{season}/{episode}",
    )
    .unwrap()
}

#[tokio::test]
async fn state_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStore::new(dir.path()));

    let mut store = ProviderStore::initialize(storage.clone()).await;
    assert_eq!(store.registry(), &Registry::default());
    store.add(custom()).unwrap();
    store.set_active("Custom").unwrap();
    store.remove("Vidsrc.vip").unwrap();
    store.close().await;

    let on_disk = std::fs::read_to_string(dir.path().join("stream-storage.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&on_disk).unwrap();
    assert_eq!(value["activeProvider"]["name"], "Custom");
    assert_eq!(value["providers"].as_array().unwrap().len(), 2);

    let store = ProviderStore::initialize(storage).await;
    let names: Vec<_> = store
        .registry()
        .providers()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, ["2Embed.cc", "Custom"]);

    let request = PlaybackRequest::episode("1399", Some("2".into()), None, store.active());
    assert_eq!(resolve(&request), "https://custom.test/tv/1399/2/1");
}

#[tokio::test]
async fn last_provider_cannot_be_removed() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = ProviderStore::initialize(Arc::new(FileStore::new(dir.path()))).await;

    store.remove("Vidsrc.vip").unwrap();
    let before = store.registry().clone();
    assert_eq!(
        store.remove("2Embed.cc").unwrap_err(),
        RegistryError::LastProviderProtected("2Embed.cc".into())
    );
    assert_eq!(store.registry(), &before);
}

#[tokio::test]
async fn dangling_active_provider_is_repaired() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStore::new(dir.path());
    storage
        .set(
            STORAGE_KEY,
            r#"{
                "providers": [
                    {"name": "A", "url": "https://a.test/{id}", "tv_url": "https://a.test/{id}/{season}/{episode}"},
                    {"name": "B", "url": "https://b.test/{id}", "tv_url": "https://b.test/{id}/{season}/{episode}"}
                ],
                "activeProvider": {"name": "Gone", "url": "x", "tv_url": "y"}
            }"#,
        )
        .await
        .unwrap();

    let store = ProviderStore::initialize(Arc::new(storage)).await;
    assert_eq!(store.registry().len(), 2);
    assert_eq!(store.active().name, "A");
}
