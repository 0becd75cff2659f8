use rust_decimal_macros::dec;
use serde_json::json;
use stockdesk_client::{
    ApiClient, AppStore, ClientConfig, ClientError, InventoryDetailView, InventoryListView,
    InventoryQuery, LoadState, Tone,
};
use stockdesk_core::InventoryId;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig::new(&server.uri()).unwrap().with_token("test-token");
    ApiClient::new(config).unwrap()
}

fn inventory_body() -> serde_json::Value {
    json!({
        "_id": "inv-1",
        "name": "Year-end count",
        "warehouse": { "_id": "w-1", "name": "Main depot" },
        "items": [
            {
                "product": { "_id": "p-1", "name": "Drill", "quantity": 150, "priceBeforeDiscount": 500 },
                "reservedQuantity": 30,
                "countedQuantity": 115
            },
            {
                "product": { "_id": "p-2", "name": "Gloves", "quantity": 100, "priceBeforeDiscount": 50 },
                "reservedQuantity": 0,
                "countedQuantity": 105
            },
            {
                "product": { "_id": "p-3", "name": "Labels", "quantity": 80 },
                "reservedQuantity": 10,
                "countedQuantity": 72
            }
        ]
    })
}

#[tokio::test]
async fn fetches_and_reconciles_inventory() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventories/inv-1"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(inventory_body()))
        .expect(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let count = api
        .get_inventory(&InventoryId::parse("inv-1").unwrap())
        .await
        .unwrap();

    assert_eq!(count.name, "Year-end count");
    assert_eq!(count.warehouse.as_deref(), Some("Main depot"));

    let rows = count.reconcile_rows();
    assert_eq!(rows[0].reconciliation.deficit_cost, dec!(17500));
    assert_eq!(rows[1].reconciliation.deficit, -5);
    // Unpriced product: shortage exists but costs nothing.
    assert_eq!(rows[2].reconciliation.deficit, 8);
    assert!(rows[2].reconciliation.deficit_cost.is_zero());

    let totals = count.totals();
    assert_eq!(totals.deficit, 38);
    assert_eq!(totals.deficit_cost, dec!(17250));
}

#[tokio::test]
async fn missing_inventory_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventories/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api
        .get_inventory(&InventoryId::parse("missing").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound));
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventories/inv-1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api
        .get_inventory(&InventoryId::parse("inv-1").unwrap())
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_quantities_are_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventories/inv-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "inv-1",
            "items": [{ "product": { "quantity": "lots" } }]
        })))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api
        .get_inventory(&InventoryId::parse("inv-1").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn negative_price_is_a_domain_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventories/inv-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "inv-1",
            "items": [{ "product": { "quantity": 3, "priceBeforeDiscount": -1 } }]
        })))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let err = api
        .get_inventory(&InventoryId::parse("inv-1").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Domain(_)));
}

#[tokio::test]
async fn detail_view_shows_generic_failure_and_empty_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventories/inv-1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let view = InventoryDetailView::load(&api, &InventoryId::parse("inv-1").unwrap()).await;
    assert_eq!(view.state().error(), Some("failed to load"));
    assert!(view.is_empty());
    assert!(view.totals().is_none());
}

#[tokio::test]
async fn detail_view_renders_rows_with_tones() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventories/inv-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": inventory_body() })))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let view = InventoryDetailView::load(&api, &InventoryId::parse("inv-1").unwrap()).await;

    assert!(matches!(view.state(), LoadState::Loaded(_)));
    let tones: Vec<_> = view.rows().iter().map(|r| r.tone).collect();
    assert_eq!(tones, [Tone::Danger, Tone::Success, Tone::Danger]);
    assert_eq!(view.totals().unwrap().line_count, 3);
}

#[tokio::test]
async fn list_view_pages_and_searches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventories"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "_id": "inv-1", "name": "A", "itemCount": 3 },
                { "_id": "inv-2", "name": "B", "itemCount": 1 }
            ],
            "page": 1,
            "limit": 2,
            "total": 3,
            "totalPages": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/inventories"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "_id": "inv-3", "name": "C" }],
            "page": 2,
            "limit": 2,
            "total": 3,
            "totalPages": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/inventories"))
        .and(query_param("search", "depot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "_id": "inv-9", "name": "Depot count" }],
            "page": 1,
            "totalPages": 1
        })))
        .with_priority(1)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let mut view = InventoryListView::with_query(InventoryQuery::first_page(2));

    view.load(&api).await;
    assert_eq!(view.items().len(), 2);

    assert!(view.next_page(&api).await);
    assert_eq!(view.query().page, 2);
    assert_eq!(view.items()[0].id.as_str(), "inv-3");
    assert!(!view.next_page(&api).await);

    assert!(view.previous_page(&api).await);
    assert_eq!(view.query().page, 1);

    view.search(&api, "depot").await;
    assert_eq!(view.query().page, 1);
    assert_eq!(view.items().len(), 1);
    assert_eq!(view.items()[0].name, "Depot count");
}

#[tokio::test]
async fn store_publishes_unread_count_and_keeps_it_on_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/messages/unread-count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 4 })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/messages/unread-count"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = client_for(&server);
    let store = AppStore::new();
    let reader = store.subscribe_unread();

    assert_eq!(store.refresh_unread(&api).await.unwrap(), 4);
    assert_eq!(reader.get(), 4);

    assert!(store.refresh_unread(&api).await.is_err());
    assert_eq!(store.unread_count(), 4);
}

#[tokio::test]
async fn connectivity_reflects_health_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let api = client_for(&server);
    assert!(api.check_connectivity().await);

    let unreachable = ApiClient::new(ClientConfig::new("http://127.0.0.1:9").unwrap()).unwrap();
    assert!(!unreachable.check_connectivity().await);
}
