//! End-to-end tests: a real listener on an ephemeral port, driven through the
//! typed client.

use beers_client::{BeersClient, ClientError};
use beers_hex::{BeerService, inbound::HttpServer};
use beers_repo::InMemoryRepo;
use beers_types::{BeerId, BeerRepository, CreateBeerRequest};
use exchange_rates::{CurrencyCode, PivotCurrencyService, StaticQuotes};

/// Serves the router on 127.0.0.1:0 and returns its base URL.
async fn spawn_server<R: BeerRepository>(repo: R) -> String {
    // 1 EUR = 1.18 USD
    let quotes = StaticQuotes::new().with_quote(CurrencyCode::EUR, 1.0 / 1.18);
    let service = BeerService::new(repo, PivotCurrencyService::new(quotes));
    let router = HttpServer::new(service).router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

fn beer(id: i64, currency: &str) -> CreateBeerRequest {
    CreateBeerRequest {
        id: BeerId::new(id),
        name: "Golden".to_string(),
        brewery: "Kross".to_string(),
        country: "Chile".to_string(),
        price: 10.5,
        currency: currency.to_string(),
    }
}

#[tokio::test]
async fn test_catalog_round_trip() {
    let client = BeersClient::new(spawn_server(InMemoryRepo::new()).await);

    assert!(client.health().await.unwrap());

    let created = client.create_beer(&beer(2, "EUR")).await.unwrap();
    assert_eq!(created.id(), BeerId::new(2));
    client.create_beer(&beer(1, "USD")).await.unwrap();

    let fetched = client.get_beer(BeerId::new(2)).await.unwrap();
    assert_eq!(fetched.name(), "Golden");
    assert_eq!(fetched.currency(), "EUR");

    let ids: Vec<BeerId> = client
        .list_beers()
        .await
        .unwrap()
        .iter()
        .map(|b| b.id())
        .collect();
    assert_eq!(ids, vec![BeerId::new(1), BeerId::new(2)]);
}

#[tokio::test]
async fn test_box_price_through_client() {
    let client = BeersClient::new(spawn_server(InMemoryRepo::new()).await);
    client.create_beer(&beer(1, "EUR")).await.unwrap();

    let quote = client
        .box_price(BeerId::new(1), Some(10), Some("usd"))
        .await
        .unwrap();
    assert_eq!(quote.currency, "USD");
    assert_eq!(quote.quantity, 10);
    assert!((quote.total_price - 123.9).abs() < 1e-9);

    // Defaults: one unit in USD
    let single = client.box_price(BeerId::new(1), None, None).await.unwrap();
    assert_eq!(single.quantity, 1);
    assert!((single.total_price - 12.39).abs() < 1e-9);

    // No conversion when the beer is already priced in the target currency
    let local = client
        .box_price(BeerId::new(1), Some(2), Some("EUR"))
        .await
        .unwrap();
    assert_eq!(local.total_price, 21.0);
    assert!(local.exchange_rate.is_none());
}

#[tokio::test]
async fn test_api_errors_surface_codes() {
    let client = BeersClient::new(spawn_server(InMemoryRepo::new()).await);
    client.create_beer(&beer(1, "EUR")).await.unwrap();

    let err = client.create_beer(&beer(1, "EUR")).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 409, .. }));
    assert_eq!(err.code(), Some("BEER_ALREADY_EXISTS"));

    let err = client.get_beer(BeerId::new(99)).await.unwrap_err();
    assert_eq!(err.code(), Some("BEER_NOT_FOUND"));

    let err = client.create_beer(&beer(5, "XYZ")).await.unwrap_err();
    assert_eq!(err.code(), Some("INVALID_CURRENCY"));

    let err = client
        .box_price(BeerId::new(1), Some(0), None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_currencies_listed() {
    let client = BeersClient::new(spawn_server(InMemoryRepo::new()).await);

    let codes = client.currencies().await.unwrap();

    assert_eq!(codes.len(), CurrencyCode::all().len());
    assert!(codes.iter().any(|c| c == "EUR"));
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn test_sqlite_catalog_survives_restart() {
    use beers_repo::SqliteRepo;

    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("beers.db").display());

    let repo = SqliteRepo::new(&url).await.unwrap();
    let client = BeersClient::new(spawn_server(repo).await);
    client.create_beer(&beer(7, "CLP")).await.unwrap();

    // A second server over the same file sees the stored beer
    let reopened = SqliteRepo::new(&url).await.unwrap();
    let client = BeersClient::new(spawn_server(reopened).await);
    let fetched = client.get_beer(BeerId::new(7)).await.unwrap();
    assert_eq!(fetched.currency(), "CLP");
}
