use hearth_storage::testing::FlakyStore;
use hearth_storage::{HostStore, MemoryStore};
use hearth_vault::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Answers {
    frequency: String,
    notes: Option<String>,
}

fn sample() -> Answers {
    Answers { frequency: "often".into(), notes: Some("private".into()) }
}

fn vault_over(store: &MemoryStore) -> Vault {
    Vault::builder().store(store.clone()).build().unwrap()
}

#[tokio::test]
async fn test_values_are_encrypted_at_rest() {
    let store = MemoryStore::new();
    let vault = vault_over(&store);

    assert_eq!(vault.set("sexual-health.data", &sample()).await, WriteOutcome::Encrypted);

    let raw = store.get("sexual-health.data").unwrap().unwrap();
    assert!(PackedValue::is_packed(&raw));
    assert!(!raw.contains("private"));
    assert!(store.get(DEFAULT_KEY_ID).unwrap().is_some());

    assert_eq!(vault.get::<Answers>("sexual-health.data").await, Some(sample()));
}

#[tokio::test]
async fn test_same_value_gets_fresh_iv_every_write() {
    let store = MemoryStore::new();
    let vault = vault_over(&store);

    let mut ivs = HashSet::new();
    for _ in 0..64 {
        vault.set("recovery.consent", &true).await;
        let raw = store.get("recovery.consent").unwrap().unwrap();
        let packed = PackedValue::decode(&raw).unwrap();
        assert!(ivs.insert(packed.iv), "IV reused");
    }
}

#[tokio::test]
async fn test_reads_do_not_create_a_key() {
    let store = MemoryStore::new();
    let vault = vault_over(&store);

    assert_eq!(vault.get::<bool>("recovery.consent").await, None);
    assert!(store.get(DEFAULT_KEY_ID).unwrap().is_none());
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn test_remove_then_get_is_none() {
    let store = MemoryStore::new();
    let vault = vault_over(&store);

    vault.set("recovery.data", &sample()).await;
    assert!(vault.remove("recovery.data").await);
    assert_eq!(vault.get::<Answers>("recovery.data").await, None);
    assert!(vault.remove("recovery.data").await);
}

#[tokio::test]
async fn test_legacy_plaintext_is_readable() {
    let store = MemoryStore::new();
    store.set("recovery.data", include_str!("fixtures/legacy_recovery.json")).unwrap();
    store.set("recovery.consent", "true").unwrap();
    let vault = vault_over(&store);

    let data: serde_json::Value = vault.get("recovery.data").await.unwrap();
    assert_eq!(data["records"]["alcohol"]["frequency"], "daily");
    assert_eq!(vault.get::<bool>("recovery.consent").await, Some(true));
}

#[tokio::test]
async fn test_unavailable_crypto_falls_back_to_plaintext() {
    let store = MemoryStore::new();
    let vault = Vault::builder().store(store.clone()).crypto(UnavailableCrypto).build().unwrap();

    assert!(!vault.crypto_available());
    assert_eq!(vault.set("recovery.data", &sample()).await, WriteOutcome::Plaintext);

    let raw = store.get("recovery.data").unwrap().unwrap();
    assert_eq!(serde_json::from_str::<Answers>(&raw).unwrap(), sample());
    assert_eq!(vault.get::<Answers>("recovery.data").await, Some(sample()));
}

#[tokio::test]
async fn test_plaintext_then_encrypted_upgrade() {
    let store = MemoryStore::new();
    let plain = Vault::builder().store(store.clone()).crypto(UnavailableCrypto).build().unwrap();
    plain.set("recovery.data", &sample()).await;

    let vault = vault_over(&store);
    assert_eq!(vault.get::<Answers>("recovery.data").await, Some(sample()));
    assert_eq!(vault.set("recovery.data", &sample()).await, WriteOutcome::Encrypted);
    assert!(hearth_vault::is_packed(&store.get("recovery.data").unwrap().unwrap()));
}

#[tokio::test]
async fn test_rejected_writes_report_failure() {
    let flaky = FlakyStore::new(MemoryStore::new());
    let vault = Vault::builder().store(flaky.clone()).build().unwrap();

    flaky.fail_writes(true);
    assert_eq!(vault.set("recovery.data", &sample()).await, WriteOutcome::Failed);
    assert_eq!(flaky.inner().len(), 0);

    flaky.fail_writes(false);
    assert_eq!(vault.set("recovery.data", &sample()).await, WriteOutcome::Encrypted);
}

#[tokio::test]
async fn test_data_write_rejected_after_key_write() {
    let flaky = FlakyStore::new(MemoryStore::new());
    let vault = Vault::builder().store(flaky.clone()).build().unwrap();

    flaky.fail_writes_after(1);
    assert_eq!(vault.set("recovery.data", &sample()).await, WriteOutcome::Failed);
    assert!(flaky.inner().get(DEFAULT_KEY_ID).unwrap().is_some());
    assert!(flaky.inner().get("recovery.data").unwrap().is_none());
}

#[tokio::test]
async fn test_read_failures_are_none_or_reported() {
    let flaky = FlakyStore::new(MemoryStore::new());
    let vault = Vault::builder().store(flaky.clone()).build().unwrap();
    vault.set("recovery.consent", &true).await;

    flaky.fail_reads(true);
    assert_eq!(vault.get::<bool>("recovery.consent").await, None);
    assert!(matches!(vault.get_checked::<bool>("recovery.consent").await, Err(VaultError::Storage { .. })));

    flaky.fail_reads(false);
    assert_eq!(vault.get_checked::<bool>("recovery.consent").await.unwrap(), Some(true));
}

#[tokio::test]
async fn test_value_moved_to_another_key_does_not_decrypt() {
    let store = MemoryStore::new();
    let vault = vault_over(&store);

    vault.set("sexual-health.data", &sample()).await;
    let raw = store.get("sexual-health.data").unwrap().unwrap();
    store.set("recovery.data", &raw).unwrap();

    assert_eq!(vault.get::<Answers>("recovery.data").await, None);
}

#[tokio::test]
async fn test_lost_key_makes_values_unreadable() {
    let store = MemoryStore::new();
    let vault = vault_over(&store);

    vault.set("recovery.data", &sample()).await;
    vault.keys().forget().unwrap();

    assert_eq!(vault.get::<Answers>("recovery.data").await, None);
}

#[tokio::test]
async fn test_corrupt_key_is_regenerated_on_write() {
    let store = MemoryStore::new();
    store.set(DEFAULT_KEY_ID, "bm90LWEta2V5").unwrap();
    let vault = vault_over(&store);

    assert_eq!(vault.set("recovery.consent", &true).await, WriteOutcome::Encrypted);
    assert_ne!(store.get(DEFAULT_KEY_ID).unwrap().as_deref(), Some("bm90LWEta2V5"));
    assert_eq!(vault.get::<bool>("recovery.consent").await, Some(true));
}

#[tokio::test]
async fn test_concurrent_writes_to_one_key_keep_last_and_share_key() {
    let store = MemoryStore::new();
    let vault = vault_over(&store);

    let (a, b, c) = tokio::join!(
        vault.set("recovery.data", &1u32),
        vault.set("recovery.data", &2u32),
        vault.set("recovery.data", &3u32),
    );
    assert_eq!([a, b, c], [WriteOutcome::Encrypted; 3]);
    assert_eq!(vault.get::<u32>("recovery.data").await, Some(3));

    let (x, y) = tokio::join!(vault.set("a.data", &"x"), vault.set("b.data", &"y"));
    assert!(x.is_persisted() && y.is_persisted());
    assert_eq!(vault.get::<String>("a.data").await.as_deref(), Some("x"));
    assert_eq!(vault.get::<String>("b.data").await.as_deref(), Some("y"));
}

#[tokio::test]
async fn test_custom_key_id() {
    let store = MemoryStore::new();
    let vault = Vault::builder().store(store.clone()).key_id("profile.key").build().unwrap();

    vault.set("recovery.consent", &true).await;
    assert!(store.get("profile.key").unwrap().is_some());
    assert!(store.get(DEFAULT_KEY_ID).unwrap().is_none());
}
