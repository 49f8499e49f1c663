//! Integration tests for the Redis-backed login cache.
//!
//! Tests use testcontainers to spin up a real Redis instance.

use std::sync::Arc;
use std::time::Duration;

use hobbyhub_auth::{PasswordConfig, PasswordHasher};
use hobbyhub_db_memory::InMemoryAccountStorage;
use hobbyhub_server::{
    AccountService, AccountSettings, CacheBackend, LoginSource, RedisConfig, UserSnapshot,
    create_cache_backend,
};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::redis::Redis;
use tokio::sync::{Mutex, OnceCell};

// Shared Redis container for all tests
static SHARED_REDIS: OnceCell<(ContainerAsync<Redis>, String)> = OnceCell::const_new();

// FLUSHDB empties the whole database, so tests using it run one at a time.
static FLUSH_LOCK: Mutex<()> = Mutex::const_new(());

async fn get_redis_url() -> String {
    let (_, url) = SHARED_REDIS
        .get_or_init(|| async {
            let container = Redis::default()
                .start()
                .await
                .expect("start redis container");

            let host_port = container.get_host_port_ipv4(6379).await.expect("get port");
            let url = format!("redis://127.0.0.1:{}", host_port);

            (container, url)
        })
        .await;

    url.clone()
}

async fn redis_cache() -> CacheBackend {
    let config = RedisConfig {
        enabled: true,
        url: get_redis_url().await,
        pool_size: 4,
        timeout_ms: 2000,
    };
    create_cache_backend(&config).await.expect("redis backend")
}

#[tokio::test]
async fn test_redis_set_get_ttl() {
    let _guard = FLUSH_LOCK.lock().await;
    let cache = redis_cache().await;
    assert!(cache.is_redis_available().await);
    assert_eq!(cache.stats().mode, "redis");

    cache
        .set("user:redis_a", b"{}".to_vec(), Duration::from_secs(3600))
        .await
        .unwrap();
    let value = cache.get("user:redis_a").await.unwrap();
    assert_eq!(value.as_deref().map(|v| v.as_slice()), Some(&b"{}"[..]));

    let ttl = cache.ttl("user:redis_a").await.unwrap().unwrap();
    assert!(ttl > Duration::from_secs(3590) && ttl <= Duration::from_secs(3600));
    assert!(cache.ttl("user:redis_missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_redis_flush_empties_database() {
    let _guard = FLUSH_LOCK.lock().await;
    let cache = redis_cache().await;
    cache
        .set("user:flush_a", b"1".to_vec(), Duration::from_secs(60))
        .await
        .unwrap();
    cache
        .set("other:flush_b", b"2".to_vec(), Duration::from_secs(60))
        .await
        .unwrap();

    cache.flush().await.unwrap();
    assert!(cache.get("user:flush_a").await.unwrap().is_none());
    assert!(cache.get("other:flush_b").await.unwrap().is_none());
}

#[tokio::test]
async fn test_instances_share_entries() {
    let _guard = FLUSH_LOCK.lock().await;
    let storage = Arc::new(InMemoryAccountStorage::new());
    let hasher = PasswordHasher::new(PasswordConfig {
        bcrypt_cost: 4,
        ..Default::default()
    });

    let first = AccountService::new(
        storage.clone(),
        redis_cache().await,
        hasher.clone(),
        AccountSettings::default(),
    );
    let second = AccountService::new(
        storage.clone(),
        redis_cache().await,
        hasher,
        AccountSettings::default(),
    );

    first.register("shared_user", "pw").await.unwrap();
    first.add_hobby("shared_user", "chess").await.unwrap();

    // Written by the first instance, read by the second without the store.
    let before = storage.operation_counts();
    let outcome = second.login("shared_user", "pw").await.unwrap();
    assert_eq!(outcome.source, LoginSource::Cache);
    assert_eq!(outcome.hobbies, vec!["chess"]);
    assert_eq!(storage.operation_counts().finds, before.finds);

    let data = second
        .cache()
        .get("user:shared_user")
        .await
        .unwrap()
        .unwrap();
    let snapshot = UserSnapshot::from_bytes(&data).unwrap();
    assert_eq!(snapshot.name.as_deref(), Some("shared_user"));
}

#[tokio::test]
async fn test_unreachable_redis_fails_per_request() {
    let config = RedisConfig {
        enabled: true,
        url: "redis://127.0.0.1:1".to_string(),
        pool_size: 1,
        timeout_ms: 200,
    };
    let cache = create_cache_backend(&config)
        .await
        .expect("pool is created even if redis is down");

    assert!(!cache.is_redis_available().await);
    assert!(cache.get("user:anyone").await.is_err());
}
