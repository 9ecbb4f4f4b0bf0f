//! Cross-module behavior against a mock server: the error slot across
//! endpoint calls, retry timing, multi-page emitters and batch collection.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use futures_util::StreamExt;
use wiremock::{
    matchers::{body_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use scryfall::{Card, CardIdentifier, ScryfallClient, ScryfallConfig, SearchOptions};

fn test_client(server: &MockServer) -> ScryfallClient {
    ScryfallClient::with_config(ScryfallConfig {
        api_url: server.uri(),
        ..ScryfallConfig::default()
    })
    .unwrap()
}

fn creature(id: u32, cmc: f64) -> serde_json::Value {
    serde_json::json!({
        "id": format!("creature-{id}"),
        "name": format!("Creature {id}"),
        "set": "kld",
        "cmc": cmc,
        "type_line": "Creature — Beast"
    })
}

/// Mount `/cards/search` as three pages of three creatures each.
async fn mount_creature_pages(server: &MockServer, page2_hits: u64, page3_hits: u64) {
    let page = |n: u32, has_more: bool, server: &MockServer| {
        let first = (n - 1) * 3 + 1;
        let mut body = serde_json::json!({
            "object": "list",
            "total_cards": 9,
            "has_more": has_more,
            "data": (first..first + 3)
                .map(|i| creature(i, f64::from(i)))
                .collect::<Vec<_>>()
        });
        if has_more {
            body["next_page"] = serde_json::Value::String(format!(
                "{}/cards/search?q=type%3Acreature&page={}",
                server.uri(),
                n + 1
            ));
        }
        body
    };

    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(1, true, server)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(2, true, server)))
        .expect(page2_hits)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(3, false, server)))
        .expect(page3_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn emitter_delivers_every_page_in_sort_order() {
    let server = MockServer::start().await;
    mount_creature_pages(&server, 1, 1).await;
    let client = test_client(&server);

    let seen = Arc::new(Mutex::new(Vec::<f64>::new()));
    let data_log = Arc::clone(&seen);
    let ended = Arc::new(Mutex::new(false));
    let end_flag = Arc::clone(&ended);

    client
        .cards()
        .search("type:creature", &SearchOptions::default())
        .on_data(move |card: Card| {
            let mut log = data_log.lock().unwrap();
            let cmc = card.cmc.unwrap();
            if let Some(last) = log.last() {
                assert!(cmc >= *last);
            }
            assert_eq!(card.set, "kld");
            log.push(cmc);
        })
        .on_end(move || *end_flag.lock().unwrap() = true)
        .on_cancel(|| panic!("not cancelled"))
        .on_error(|_| panic!("no error expected"))
        .emit()
        .await;

    assert_eq!(seen.lock().unwrap().len(), 9);
    assert!(*ended.lock().unwrap());
    assert!(client.last_error().is_none());
}

#[tokio::test]
async fn cancelling_after_a_fixed_count_stops_the_emitter() {
    let server = MockServer::start().await;
    mount_creature_pages(&server, 1, 0).await;
    let client = test_client(&server);

    let remaining = Arc::new(Mutex::new(4u32));
    let counter = Arc::clone(&remaining);
    let cancelled = Arc::new(Mutex::new(false));
    let cancel_flag = Arc::clone(&cancelled);

    let pager = client
        .cards()
        .search("type:creature", &SearchOptions::default());
    let handle = pager.handle();
    pager
        .on_data(move |_: Card| {
            let mut left = counter.lock().unwrap();
            *left -= 1;
            if *left == 0 {
                handle.cancel();
            }
        })
        .on_end(|| panic!("cancel must preempt end"))
        .on_cancel(move || *cancel_flag.lock().unwrap() = true)
        .emit()
        .await;

    assert_eq!(*remaining.lock().unwrap(), 0);
    assert!(*cancelled.lock().unwrap());
    assert!(client.last_error().is_none());
}

#[tokio::test]
async fn a_second_page_start_yields_different_items() {
    let server = MockServer::start().await;
    mount_creature_pages(&server, 1, 0).await;
    let client = test_client(&server);

    let first_of_page_one = Arc::new(Mutex::new(None::<String>));
    let first_slot = Arc::clone(&first_of_page_one);
    let pager = client
        .cards()
        .search("type:creature", &SearchOptions::default());
    let handle = pager.handle();
    pager
        .on_data(move |card: Card| {
            first_slot.lock().unwrap().get_or_insert(card.id);
            handle.cancel();
        })
        .emit()
        .await;

    let second_page = client
        .cards()
        .search(
            "type:creature",
            &SearchOptions {
                page: Some(2),
                ..SearchOptions::default()
            },
        )
        .cancel_after_page()
        .wait_for_all()
        .await;

    let first = first_of_page_one.lock().unwrap().clone().unwrap();
    assert_eq!(second_page.len(), 3);
    assert_ne!(first, second_page[0].id);
}

#[tokio::test]
async fn pull_mode_stops_fetching_once_abandoned() {
    let server = MockServer::start().await;
    mount_creature_pages(&server, 0, 0).await;
    let client = test_client(&server);

    let pager = client
        .cards()
        .search("type:creature", &SearchOptions::default());
    let stream = pager.all();
    tokio::pin!(stream);

    let mut pulled = Vec::new();
    while let Some(card) = stream.next().await {
        pulled.push(card.name);
        if pulled.len() == 2 {
            break;
        }
    }

    assert_eq!(pulled, vec!["Creature 1", "Creature 2"]);
}

#[tokio::test]
async fn the_error_slot_tracks_the_most_recent_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards/multiverse/369030"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "object": "error", "status": 404, "code": "not_found", "details": "no such card"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/mtgo/48338"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "abc", "name": "Blood Scrivener", "set": "dgm"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);

    assert!(client.cards().by_multiverse_id(369_030).await.is_none());
    assert_eq!(client.last_error().unwrap().status(), Some(404));

    assert!(client.cards().by_mtgo_id(48_338).await.is_some());
    assert!(client.last_error().is_none());
}

#[tokio::test]
async fn forced_retry_exceeds_the_configured_backoff_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards/multiverse/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "abc", "name": "Ankh of Mishra"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.set_retry(3, 50);
    let mut policy = client.retry_policy();
    policy.forced = true;
    client.set_retry_policy(policy);

    let started = Instant::now();
    assert!(client.cards().by_multiverse_id(1).await.is_none());
    assert!(started.elapsed() > Duration::from_millis(3 * 50));
    assert!(client.last_error().is_some());

    let mut policy = client.retry_policy();
    policy.forced = false;
    client.set_retry_policy(policy);

    assert!(client.cards().by_multiverse_id(1).await.is_some());
    assert!(client.last_error().is_none());
}

#[tokio::test]
async fn collection_preserves_input_order_across_chunks() {
    let server = MockServer::start().await;
    let identifiers: Vec<_> = (1..=80).map(CardIdentifier::by_multiverse_id).collect();

    let chunk_body = |ids: std::ops::RangeInclusive<u32>| {
        serde_json::json!({
            "identifiers": ids
                .map(|id| serde_json::json!({ "multiverse_id": id }))
                .collect::<Vec<_>>()
        })
    };
    let chunk_data = |ids: std::ops::RangeInclusive<u32>| {
        serde_json::json!({
            "object": "list",
            "not_found": [],
            "data": ids
                .map(|id| serde_json::json!({
                    "id": format!("card-{id}"),
                    "name": format!("Card {id}"),
                    "multiverse_ids": [id]
                }))
                .collect::<Vec<_>>()
        })
    };

    Mock::given(method("POST"))
        .and(path("/cards/collection"))
        .and(body_json(chunk_body(1..=75)))
        .respond_with(ResponseTemplate::new(200).set_body_json(chunk_data(1..=75)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cards/collection"))
        .and(body_json(chunk_body(76..=80)))
        .respond_with(ResponseTemplate::new(200).set_body_json(chunk_data(76..=80)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let results = client.cards().collection(&identifiers).wait_for_all().await;

    assert_eq!(results.len(), 80);
    for (index, card) in results.iter().enumerate() {
        let requested = u32::try_from(index).unwrap() + 1;
        assert!(card.multiverse_ids.contains(&requested));
    }
    assert!(results.not_found.is_empty());
    assert!(client.last_error().is_none());
}

#[tokio::test]
async fn an_invalid_search_is_empty_in_bulk_mode_with_the_error_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "object": "error",
            "status": 400,
            "code": "bad_request",
            "details": "cmc>cmc is not a valid comparison"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let results = client
        .cards()
        .search("cmc>cmc", &SearchOptions::default())
        .cancel_after_page()
        .wait_for_all()
        .await;

    assert!(results.is_empty());
    assert_eq!(client.last_error().unwrap().status(), Some(400));
}
