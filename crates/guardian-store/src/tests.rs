use crate::credentials::*;
use crate::settings::*;
use guardian_core::types::Provider;

// ========== Credential Migration ==========

#[test]
fn test_migrate_legacy_string() {
    let record = CredentialRecord::migrate(serde_json::json!("sk-legacy")).unwrap();
    assert_eq!(record.version, CREDENTIAL_VERSION);
    assert_eq!(record.key, "sk-legacy");
    assert!(record.label.is_none());
}

#[test]
fn test_migrate_versioned_object_passthrough() {
    let original = CredentialRecord::new("sk-new").with_label("prod");
    let raw = serde_json::to_value(&original).unwrap();
    let record = CredentialRecord::migrate(raw).unwrap();
    assert_eq!(record, original);
}

#[test]
fn test_migrate_rejects_garbage() {
    assert!(CredentialRecord::migrate(serde_json::json!(42)).is_err());
}

#[tokio::test]
async fn test_store_migrates_once_on_read() {
    let store = InMemoryCredentialStore::new();
    store.insert_legacy("u1", Provider::OpenAi, "sk-old");

    let first = store.get("u1", Provider::OpenAi).await.unwrap().unwrap();
    assert_eq!(first.key, "sk-old");
    assert_eq!(first.version, CREDENTIAL_VERSION);

    // Second read sees the migrated record, timestamp included.
    let second = store.get("u1", Provider::OpenAi).await.unwrap().unwrap();
    assert_eq!(second, first);
}

// ========== Available Providers ==========

#[tokio::test]
async fn test_available_providers() {
    let store = InMemoryCredentialStore::new();
    store.put("u1", Provider::OpenAi, CredentialRecord::new("sk-a")).await.unwrap();
    store.put("u1", Provider::Claude, CredentialRecord::new("sk-b")).await.unwrap();

    let available = store.available_providers("u1").await.unwrap();
    assert_eq!(available, vec![Provider::OpenAi, Provider::Claude]);
}

#[tokio::test]
async fn test_no_credentials_no_providers() {
    let store = InMemoryCredentialStore::new();
    assert!(store.available_providers("nobody").await.unwrap().is_empty());
}

// ========== Settings ==========

#[tokio::test]
async fn test_settings_roundtrip() {
    let store = InMemorySettingsStore::new();
    assert!(store.get("org1").await.unwrap().is_none());

    let settings = NotificationSettings {
        alerts_enabled: true,
        monthly_budget_usd: Some(500.0),
        thresholds: vec![0.8, 1.0],
    };
    store.put("org1", settings.clone()).await.unwrap();
    assert_eq!(store.get("org1").await.unwrap(), Some(settings));
}

#[test]
fn test_provider_names_roundtrip() {
    // Stored keys are slotted by provider name; the mapping must be total.
    for provider in Provider::ALL {
        assert_eq!(Provider::parse(provider.as_str()), Some(provider));
    }
    assert_eq!(Provider::parse("aol"), None);
}

#[test]
fn test_settings_defaults() {
    let s = NotificationSettings::default();
    assert!(s.alerts_enabled);
    assert_eq!(s.thresholds, vec![0.5, 0.8, 1.0]);
}
