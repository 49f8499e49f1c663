//! Behaviour of the account service over the in-memory store and local cache.

use std::sync::Arc;
use std::time::Duration;

use hobbyhub_auth::{PasswordConfig, PasswordHasher, PasswordScheme};
use hobbyhub_db_memory::InMemoryAccountStorage;
use hobbyhub_server::{
    AccountError, AccountService, AccountSettings, CacheBackend, LoginSource, UserSnapshot,
};
use hobbyhub_storage::AccountStorage;

struct Harness {
    storage: Arc<InMemoryAccountStorage>,
    service: AccountService,
}

fn harness() -> Harness {
    let storage = Arc::new(InMemoryAccountStorage::new());
    let hasher = PasswordHasher::new(PasswordConfig {
        scheme: PasswordScheme::Bcrypt,
        bcrypt_cost: 4,
    });
    let service = AccountService::new(
        storage.clone(),
        CacheBackend::new_local(),
        hasher,
        AccountSettings::default(),
    );
    Harness { storage, service }
}

async fn cached(service: &AccountService, username: &str) -> Option<UserSnapshot> {
    let data = service
        .cache()
        .get(&format!("user:{username}"))
        .await
        .expect("cache get")?;
    Some(UserSnapshot::from_bytes(&data).expect("decode snapshot"))
}

async fn stored_hobbies(storage: &InMemoryAccountStorage, username: &str) -> Vec<String> {
    storage
        .find(username)
        .await
        .expect("find")
        .expect("account exists")
        .hobbies
}

#[tokio::test]
async fn register_then_login_returns_empty_hobbies() {
    let h = harness();
    h.service.register("alice", "pw1").await.expect("register");

    // Registration does not touch the cache.
    assert!(cached(&h.service, "alice").await.is_none());

    let outcome = h.service.login("alice", "pw1").await.expect("login");
    assert!(outcome.hobbies.is_empty());
    assert_eq!(outcome.source, LoginSource::Store);
}

#[tokio::test]
async fn stored_password_is_hashed() {
    let h = harness();
    h.service.register("alice", "pw1").await.unwrap();

    let account = h.storage.find("alice").await.unwrap().unwrap();
    assert_ne!(account.password_hash, "pw1");
    assert!(account.password_hash.starts_with("$2b$"));
}

#[tokio::test]
async fn duplicate_registration_keeps_original_hash() {
    let h = harness();
    h.service.register("alice", "pw1").await.unwrap();
    let original = h.storage.find("alice").await.unwrap().unwrap().password_hash;

    let err = h.service.register("alice", "other").await.unwrap_err();
    assert!(matches!(err, AccountError::AlreadyExists { .. }));

    let after = h.storage.find("alice").await.unwrap().unwrap().password_hash;
    assert_eq!(original, after);
    assert!(h.service.login("alice", "pw1").await.is_ok());
}

#[tokio::test]
async fn concurrent_registrations_create_one_account() {
    let h = harness();
    let service = Arc::new(h.service);

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.register("racer", &format!("pw{i}")).await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => created += 1,
            Err(AccountError::AlreadyExists { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(h.storage.len(), 1);
}

#[tokio::test]
async fn login_unknown_user_and_wrong_password() {
    let h = harness();
    assert!(matches!(
        h.service.login("nobody", "pw").await,
        Err(AccountError::NotFound { .. })
    ));

    h.service.register("alice", "pw1").await.unwrap();
    assert!(matches!(
        h.service.login("alice", "nope").await,
        Err(AccountError::WrongPassword)
    ));
    // A rejected store login does not populate the cache.
    assert!(cached(&h.service, "alice").await.is_none());
}

#[tokio::test]
async fn wrong_password_on_cache_hit_skips_store() {
    let h = harness();
    h.service.register("alice", "pw1").await.unwrap();
    h.service.login("alice", "pw1").await.unwrap();

    let before = h.storage.operation_counts();
    let err = h.service.login("alice", "wrong").await.unwrap_err();
    assert!(matches!(err, AccountError::WrongPassword));
    assert_eq!(h.storage.operation_counts().finds, before.finds);
}

#[tokio::test]
async fn warm_login_is_served_from_cache() {
    let h = harness();
    h.service.register("alice", "pw1").await.unwrap();
    h.service.login("alice", "pw1").await.unwrap();

    let before = h.storage.operation_counts();
    let outcome = h.service.login("alice", "pw1").await.unwrap();
    assert_eq!(outcome.source, LoginSource::Cache);
    assert_eq!(h.storage.operation_counts(), before);
}

#[tokio::test]
async fn login_after_flush_matches_warm_login() {
    let h = harness();
    h.service.register("bob", "pw").await.unwrap();
    h.service.add_hobby("bob", "run").await.unwrap();
    h.service.add_hobby("bob", "chess").await.unwrap();

    let warm = h.service.login("bob", "pw").await.unwrap();
    assert_eq!(warm.source, LoginSource::Cache);

    h.service.clear_cache().await.unwrap();
    assert!(cached(&h.service, "bob").await.is_none());

    let cold = h.service.login("bob", "pw").await.unwrap();
    assert_eq!(cold.source, LoginSource::Store);
    assert_eq!(cold.hobbies, warm.hobbies);

    // The store-backed login repopulated the cache.
    let snapshot = cached(&h.service, "bob").await.expect("repopulated");
    assert_eq!(snapshot.hobbies, vec!["run", "chess"]);
}

#[tokio::test]
async fn deleting_absent_label_resyncs_cache() {
    let h = harness();
    h.service.register("carol", "pw").await.unwrap();
    h.service.add_hobby("carol", "art").await.unwrap();
    h.service.clear_cache().await.unwrap();

    let hobbies = h.service.remove_hobby("carol", "missing").await.unwrap();
    assert_eq!(hobbies, vec!["art"]);
    assert_eq!(stored_hobbies(&h.storage, "carol").await, vec!["art"]);

    let snapshot = cached(&h.service, "carol").await.expect("cache written");
    assert_eq!(snapshot.hobbies, vec!["art"]);
}

#[tokio::test]
async fn add_then_remove_restores_list() {
    let h = harness();
    h.service.register("dave", "pw").await.unwrap();
    h.service.add_hobby("dave", "run").await.unwrap();

    let added = h.service.add_hobby("dave", "chess").await.unwrap();
    assert_eq!(added, vec!["run", "chess"]);

    let removed = h.service.remove_hobby("dave", "chess").await.unwrap();
    assert_eq!(removed, vec!["run"]);
    assert_eq!(cached(&h.service, "dave").await.unwrap().hobbies, vec!["run"]);
}

#[tokio::test]
async fn rename_preserves_length_and_position() {
    let h = harness();
    h.service.register("erin", "pw").await.unwrap();
    for label in ["run", "chess", "art"] {
        h.service.add_hobby("erin", label).await.unwrap();
    }

    let renamed = h.service.rename_hobby("erin", "chess", "go").await.unwrap();
    assert_eq!(renamed, vec!["run", "go", "art"]);
    assert_eq!(
        stored_hobbies(&h.storage, "erin").await,
        vec!["run", "go", "art"]
    );
    assert_eq!(
        cached(&h.service, "erin").await.unwrap().hobbies,
        vec!["run", "go", "art"]
    );
}

#[tokio::test]
async fn duplicates_are_kept_and_removed_together() {
    let h = harness();
    h.service.register("fay", "pw").await.unwrap();
    h.service.add_hobby("fay", "chess").await.unwrap();
    h.service.add_hobby("fay", "run").await.unwrap();
    let hobbies = h.service.add_hobby("fay", "chess").await.unwrap();
    assert_eq!(hobbies, vec!["chess", "run", "chess"]);

    let hobbies = h.service.remove_hobby("fay", "chess").await.unwrap();
    assert_eq!(hobbies, vec!["run"]);
}

#[tokio::test]
async fn mutation_snapshot_keeps_login_working_from_cache() {
    let h = harness();
    h.service.register("gus", "pw").await.unwrap();
    h.service.add_hobby("gus", "reading").await.unwrap();

    // The snapshot written after a mutation carries the hash, so the next
    // login is a cache hit that still verifies.
    let snapshot = cached(&h.service, "gus").await.unwrap();
    assert_eq!(snapshot.name.as_deref(), Some("gus"));
    assert!(snapshot.password.starts_with("$2b$"));

    let outcome = h.service.login("gus", "pw").await.unwrap();
    assert_eq!(outcome.source, LoginSource::Cache);
    assert_eq!(outcome.hobbies, vec!["reading"]);
}

#[tokio::test]
async fn full_scenario() {
    let h = harness();

    h.service.register("alice", "pw1").await.unwrap();
    let outcome = h.service.login("alice", "pw1").await.unwrap();
    assert!(outcome.hobbies.is_empty());

    let hobbies = h.service.add_hobby("alice", "reading").await.unwrap();
    assert_eq!(hobbies, vec!["reading"]);
    let snapshot = cached(&h.service, "alice").await.unwrap();
    assert_eq!(snapshot.hobbies, vec!["reading"]);
    let ttl = h
        .service
        .cache()
        .ttl("user:alice")
        .await
        .unwrap()
        .expect("entry has a ttl");
    assert!(ttl > Duration::from_secs(3590) && ttl <= Duration::from_secs(3600));

    let hobbies = h
        .service
        .rename_hobby("alice", "reading", "hiking")
        .await
        .unwrap();
    assert_eq!(hobbies, vec!["hiking"]);

    let hobbies = h.service.remove_hobby("alice", "hiking").await.unwrap();
    assert!(hobbies.is_empty());
    assert!(cached(&h.service, "alice").await.unwrap().hobbies.is_empty());
}
