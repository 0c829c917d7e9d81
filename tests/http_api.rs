mod common;

use std::sync::Arc;

use anylist::config::ApiConfig;
use anylist::listing::{
    FetchError, FilterSet, FilterValue, HttpListingApi, ListingApi, ListingCoordinator,
    ListingResponse, RequestParams, Transforms,
};
use common::free_port;
use common::mock_backend::{MockBackend, MockResponse};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Pokemon {
    name: String,
}

type Listing = ListingResponse<Pokemon>;

fn api_for(url: String) -> HttpListingApi<Listing> {
    HttpListingApi::new(&ApiConfig {
        base_url: url,
        timeout_seconds: 5,
        connect_timeout_seconds: 1,
    })
    .unwrap()
}

#[tokio::test]
async fn sends_params_as_query_and_decodes_listing() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(
            r#"{"items": [{"name": "charmander"}, {"name": "vulpix"}], "totalItemsCount": 12, "pageNumber": 2}"#,
        ))
        .await;

    let api = api_for(backend.listing_url());
    let params = RequestParams::from(FilterSet::new().with("legendary", false).with("pageNumber", 2u32))
        .with("types", vec![FilterValue::from("fire"), FilterValue::from("water")]);
    let listing = api.get_all(params).await.unwrap();

    assert_eq!(listing.items.len(), 2);
    assert_eq!(listing.items[0].name, "charmander");
    assert_eq!(listing.total_items_count, Some(12));
    assert_eq!(listing.page_number, Some(2));

    let requests = backend.captured_requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "/api/pokemons");
    assert_eq!(requests[0].values("legendary"), vec!["false"]);
    assert_eq!(requests[0].values("pageNumber"), vec!["2"]);
    assert_eq!(requests[0].values("types"), vec!["fire", "water"]);
}

#[tokio::test]
async fn empty_params_send_no_query() {
    let backend = MockBackend::start().await;
    let api = api_for(backend.listing_url());

    let listing = api.get_all(RequestParams::new()).await.unwrap();
    assert!(listing.items.is_empty());
    assert_eq!(listing.total_items_count, None);

    let requests = backend.captured_requests().await;
    assert!(requests[0].query.is_empty());
}

#[tokio::test]
async fn total_count_aliases_are_accepted() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"items": [], "totalCount": 40}"#))
        .await;
    backend
        .enqueue_response(MockResponse::json(r#"{"items": [], "count": 7}"#))
        .await;

    let api = api_for(backend.listing_url());
    let first = api.get_all(RequestParams::new()).await.unwrap();
    let second = api.get_all(RequestParams::new()).await.unwrap();
    assert_eq!(first.total_items_count, Some(40));
    assert_eq!(second.total_items_count, Some(7));
}

#[tokio::test]
async fn error_status_carries_body() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::error(503, "maintenance window"))
        .await;

    let api = api_for(backend.listing_url());
    let err = api.get_all(RequestParams::new()).await.unwrap_err();
    match err {
        FetchError::Status { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance window");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn error_status_without_body_uses_reason() {
    let backend = MockBackend::start().await;
    backend.enqueue_response(MockResponse::error(404, "")).await;

    let api = api_for(backend.listing_url());
    let err = api.get_all(RequestParams::new()).await.unwrap_err();
    assert_eq!(err.to_string(), "Upstream error: 404 - Not Found");
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(r#"{"results": "nope"}"#))
        .await;

    let api = api_for(backend.listing_url());
    let err = api.get_all(RequestParams::new()).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let api = api_for(format!("http://127.0.0.1:{}/api/pokemons", free_port()));
    let err = api.get_all(RequestParams::new()).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = HttpListingApi::<Listing>::new(&ApiConfig {
        base_url: "not a url".to_string(),
        ..Default::default()
    });
    assert!(matches!(result, Err(FetchError::InvalidEndpoint { .. })));
}

#[tokio::test]
async fn coordinator_publishes_transformed_http_listing() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::json(
            r#"{"items": [{"name": "eevee"}], "totalItemsCount": 1}"#,
        ))
        .await;

    let api: Arc<dyn ListingApi<RequestParams, Listing>> = Arc::new(api_for(backend.listing_url()));
    let transforms = Transforms::identity()
        .request(|filters: FilterSet| RequestParams::from(filters))
        .response(|listing: Listing| {
            listing
                .items
                .into_iter()
                .map(|pokemon| pokemon.name)
                .collect::<Vec<_>>()
        });
    let coordinator = ListingCoordinator::with_transforms(api, transforms);

    let names = coordinator
        .fetch_once(FilterSet::new().with("name", "ee"))
        .await
        .unwrap();
    assert_eq!(names, vec!["eevee"]);
    assert_eq!(coordinator.latest(), Some(vec!["eevee".to_string()]));
    assert!(!coordinator.loading_gate().is_loading());

    let requests = backend.captured_requests().await;
    assert_eq!(requests[0].values("name"), vec!["ee"]);
}

#[tokio::test]
async fn coordinator_surfaces_http_failure_message() {
    let backend = MockBackend::start().await;
    backend
        .enqueue_response(MockResponse::error(500, "database unavailable"))
        .await;

    let api: Arc<dyn ListingApi<RequestParams, Listing>> = Arc::new(api_for(backend.listing_url()));
    let coordinator = ListingCoordinator::new(api);

    let result = coordinator.fetch_once(RequestParams::new()).await;
    assert!(result.is_err());
    assert_eq!(
        coordinator.error_channel().message().as_deref(),
        Some("Upstream error: 500 - database unavailable")
    );
    assert!(coordinator.latest().is_none());
}
