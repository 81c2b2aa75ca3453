mod common;

use std::collections::HashSet;
use std::sync::Arc;
use ttl_shortener::domain::clock::ManualClock;
use ttl_shortener::domain::entities::ClickMeta;
use ttl_shortener::domain::errors::CreationError;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_claims_of_one_code_have_one_winner() {
    let clock = ManualClock::new(common::start_time());
    let state = common::create_test_state(&clock);

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let registry = Arc::clone(&state.registry);
            tokio::spawn(async move {
                registry
                    .create(&format!("https://example.com/{i}"), None, Some("contested"))
                    .await
            })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(e) => assert_eq!(e, CreationError::ShortcodeTaken("contested".to_string())),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(state.registry.len().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_generated_codes_are_unique() {
    let clock = ManualClock::new(common::start_time());
    let state = common::create_test_state(&clock);

    let handles: Vec<_> = (0..200)
        .map(|i| {
            let registry = Arc::clone(&state.registry);
            tokio::spawn(async move {
                registry
                    .create(&format!("https://example.com/{i}"), None, None)
                    .await
            })
        })
        .collect();

    let mut codes = HashSet::new();
    for handle in handles {
        let record = handle.await.unwrap().unwrap();
        assert!(codes.insert(record.code));
    }

    assert_eq!(codes.len(), 200);
    assert_eq!(state.registry.len().await.unwrap(), 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolutions_are_all_counted() {
    let clock = ManualClock::new(common::start_time());
    let state = common::create_test_state(&clock);
    common::create_test_link(&state, "hot", "https://example.com/hot", None).await;

    let handles: Vec<_> = (0..500)
        .map(|_| {
            let resolver = Arc::clone(&state.resolver);
            tokio::spawn(async move { resolver.resolve("hot", ClickMeta::default()).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "https://example.com/hot");
    }

    let summary = state.analytics.summarize("hot").await.unwrap();
    assert_eq!(summary.click_count, 500);
    assert_eq!(summary.clicks.len(), 500);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_clicks_on_different_codes_do_not_interfere() {
    let clock = ManualClock::new(common::start_time());
    let state = common::create_test_state(&clock);
    let codes = ["aaaa", "bbbb", "cccc", "dddd"];
    for code in codes {
        common::create_test_link(&state, code, "https://example.com", None).await;
    }

    let handles: Vec<_> = (0..400)
        .map(|i| {
            let resolver = Arc::clone(&state.resolver);
            let code = codes[i % codes.len()];
            tokio::spawn(async move { resolver.resolve(code, ClickMeta::default()).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    for code in codes {
        let summary = state.analytics.summarize(code).await.unwrap();
        assert_eq!(summary.click_count, 100);
    }
}
