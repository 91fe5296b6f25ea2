use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;
use std::time::Duration;
use whale_vybe_bot::vybe::{Config, DataProvider, VybeClient};
use whale_vybe_bot::{BotError, TransferTarget};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WALLET: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";
const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

fn client(server: &MockServer) -> VybeClient {
    let mut config = Config::new("test-key").with_api_url(&server.uri());
    config.retry_delay = Duration::from_millis(10);
    config.timeout = Duration::from_millis(500);
    config.rate_limit_burst = 20;
    config.rate_limit_per_sec = 100.0;
    VybeClient::new(config).unwrap()
}

#[tokio::test]
async fn holdings_are_fetched_with_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/account/token-balance/{}", WALLET)))
        .and(header("X-API-KEY", "test-key"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ownerAddress": WALLET,
            "totalTokenValueUsd": "2500.5",
            "data": [
                {
                    "mintAddress": USDC,
                    "symbol": "USDC",
                    "name": "USD Coin",
                    "amount": "2500.5",
                    "priceUsd": "1",
                    "valueUsd": "2500.5"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let holdings = client(&server).fetch_wallet_holdings(WALLET).await.unwrap();

    assert_eq!(holdings.owner, WALLET);
    assert_eq!(holdings.tokens.len(), 1);
    assert_eq!(holdings.tokens[0].label(), "USDC");
    assert_eq!(holdings.tokens[0].amount, Decimal::from_str("2500.5").unwrap());
}

#[tokio::test]
async fn server_error_is_retried_exactly_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/token/{}", USDC)))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(2)
        .mount(&server)
        .await;

    let err = client(&server).fetch_token_info(USDC).await.unwrap_err();
    assert!(matches!(err, BotError::UpstreamUnavailable(_)), "{err:?}");
}

#[tokio::test]
async fn transient_failure_recovers_on_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/instruction-names"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/token/instruction-names"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Transfer", "Burn"])))
        .expect(1)
        .mount(&server)
        .await;

    let names = client(&server).fetch_instruction_names().await.unwrap();
    assert_eq!(names, vec!["Transfer", "Burn"]);
}

#[tokio::test]
async fn timeout_counts_as_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/account/token-balance/{}", WALLET)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_wallet_holdings(WALLET)
        .await
        .unwrap_err();
    assert!(matches!(err, BotError::UpstreamUnavailable(_)), "{err:?}");
}

#[tokio::test]
async fn rate_limit_reports_retry_after_without_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/transfers"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .fetch_recent_transfers(&TransferTarget::Mint(USDC.into()), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, BotError::RateLimited { retry_after_secs: 7 }), "{err:?}");
}

#[tokio::test]
async fn rate_limit_without_header_uses_default_wait() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = client(&server).fetch_instruction_names().await.unwrap_err();
    assert!(matches!(err, BotError::RateLimited { retry_after_secs: 30 }), "{err:?}");
}

#[tokio::test]
async fn client_errors_map_to_invalid_input() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/token/{}", USDC)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Token not found"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/account/token-balance/{}", WALLET)))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Invalid wallet address"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);

    let err = client.fetch_token_info(USDC).await.unwrap_err();
    assert!(matches!(err, BotError::NotFound(ref m) if m == "Token not found"), "{err:?}");

    let err = client.fetch_wallet_holdings(WALLET).await.unwrap_err();
    assert!(
        matches!(err, BotError::InvalidAddress(ref m) if m == "Invalid wallet address"),
        "{err:?}"
    );
}

#[tokio::test]
async fn rejected_api_key_is_internal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).fetch_instruction_names().await.unwrap_err();
    assert!(matches!(err, BotError::Internal(_)), "{err:?}");
}

#[tokio::test]
async fn undecodable_body_is_internal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).fetch_instruction_names().await.unwrap_err();
    assert!(matches!(err, BotError::Internal(_)), "{err:?}");
}

#[tokio::test]
async fn wallet_transfers_are_queried_by_wallet_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/token/transfers"))
        .and(query_param("walletAddress", WALLET))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transfers": [
                {
                    "signature": "sig1",
                    "mintAddress": USDC,
                    "senderAddress": WALLET,
                    "receiverAddress": USDC,
                    "calculatedAmount": 12.5,
                    "valueUsd": "12.5",
                    "blockTime": 1717000000
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let transfers = client(&server)
        .fetch_recent_transfers(&TransferTarget::Wallet(WALLET.into()), 10)
        .await
        .unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].amount, Some(Decimal::from_str("12.5").unwrap()));
}

#[tokio::test]
async fn empty_token_object_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/token/{}", USDC)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = client(&server).fetch_token_info(USDC).await.unwrap_err();
    assert!(matches!(err, BotError::NotFound(_)), "{err:?}");
}
