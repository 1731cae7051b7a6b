//! Concurrency test: many simultaneous requests share one lazy lookup.

use std::time::{Duration, Instant};

use jndi_datasource::customers::Customer;

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_customers() {
    let server = common::start_server().await;
    common::seed_customers(&server.app, &[(1, "Alice"), (2, "Bob"), (3, "Carol")]).await;

    // Seeding resolved the lazy handle already; start from that count
    let lookups_before = server.app.registry.lookup_count();
    assert_eq!(lookups_before, 1);

    let concurrency = 20;
    let requests_per_task = 10;

    let client = reqwest::Client::new();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for _ in 0..concurrency {
        let client = client.clone();
        let url = server.url("/customers");
        tasks.push(tokio::spawn(async move {
            let mut ok = 0;
            for _ in 0..requests_per_task {
                let res = client.get(&url).send().await.unwrap();
                assert_eq!(res.status(), 200);
                let customers: Vec<Customer> = res.json().await.unwrap();
                assert_eq!(customers.len(), 3);
                ok += 1;
            }
            ok
        }));
    }

    let mut total = 0;
    for task in tasks {
        total += task.await.unwrap();
    }

    assert_eq!(total, concurrency * requests_per_task);
    assert_eq!(server.app.registry.lookup_count(), lookups_before);
    assert!(start.elapsed() < Duration::from_secs(30));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_use_looks_up_once() {
    let server = common::start_server().await;
    assert_eq!(server.app.registry.lookup_count(), 0);

    let client = reqwest::Client::new();
    let mut tasks = Vec::new();
    for _ in 0..16 {
        let client = client.clone();
        let url = server.url("/customers");
        tasks.push(tokio::spawn(async move {
            // Table does not exist; only the lookup matters here
            client.get(&url).send().await.unwrap().status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), 500);
    }

    assert_eq!(server.app.registry.lookup_count(), 1);
    assert!(server.app.data_source.is_resolved());
}
