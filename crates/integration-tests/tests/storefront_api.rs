//! Storefront endpoint tests: catalog, cart, auth and checkout.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use game_store_integration_tests::{TestServer, valid_checkout_form};
use game_store_storefront::checkout::FailurePolicy;
use reqwest::StatusCode;
use serde_json::{Value, json};

fn slugs(games: &Value) -> Vec<&str> {
    games
        .as_array()
        .expect("array of games")
        .iter()
        .map(|g| g["slug"].as_str().expect("slug"))
        .collect()
}

fn assert_money(value: &Value, expected: f64) {
    let actual = value.as_f64().expect("money is a JSON number");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_owned()));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = TestServer::start().await;
    let response = server
        .client
        .get(server.url("/health"))
        .header("x-request-id", "trace-abc")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-abc"
    );
}

// =============================================================================
// Catalog
// =============================================================================

#[tokio::test]
async fn test_list_games_defaults_to_popularity() {
    let server = TestServer::start().await;
    let (status, games) = server.get("/games").await;

    assert_eq!(status, StatusCode::OK);
    let slugs = slugs(&games);
    assert_eq!(slugs.len(), 12);
    assert_eq!(slugs.first(), Some(&"arena-breakers"));
}

#[tokio::test]
async fn test_search_and_sort() {
    let server = TestServer::start().await;

    let (_, games) = server.get("/games?q=HOLLOW").await;
    let mut found = slugs(&games);
    found.sort_unstable();
    assert_eq!(found, ["dragons-hollow", "harvest-hollow"]);

    let (_, games) = server.get("/games?genre=racing&sort=price_asc").await;
    assert_eq!(
        slugs(&games),
        ["neon-skyline-racer", "turbo-drift-legends"]
    );
}

#[tokio::test]
async fn test_unknown_sort_is_rejected() {
    let server = TestServer::start().await;
    let (status, _) = server.get("/games?sort=cheapest").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deals_and_free() {
    let server = TestServer::start().await;

    let (status, deals) = server.get("/games/deals").await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        deals
            .as_array()
            .unwrap()
            .iter()
            .all(|g| g["discount"].as_f64().is_some_and(|d| d > 0.0))
    );
    assert_eq!(slugs(&deals).len(), 6);

    let (_, free) = server.get("/games/free").await;
    let mut free = slugs(&free);
    free.sort_unstable();
    assert_eq!(free, ["arena-breakers", "pixel-rumble"]);
}

#[tokio::test]
async fn test_game_detail() {
    let server = TestServer::start().await;

    let (status, game) = server.get("/games/starfall-odyssey").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(game["id"], "1");
    assert_eq!(game["stock"], 25);

    let (status, body) = server.get("/games/no-such-game").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_home_sections() {
    let server = TestServer::start().await;
    let (status, home) = server.get("/home").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(home["trending"].as_array().unwrap().len(), 7);
    assert_eq!(slugs(&home["free"]).len(), 2);

    let genres: Vec<&str> = home["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["genre"].as_str().unwrap())
        .collect();
    assert!(!genres.contains(&"Free to Play"));
    assert_eq!(genres.first(), Some(&"Action"));
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_starts_empty() {
    let server = TestServer::start().await;
    let (status, cart) = server.get("/cart").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["itemCount"], 0);
    assert_money(&cart["total"], 0.0);
}

#[tokio::test]
async fn test_add_merges_lines_and_totals_include_tax() {
    let server = TestServer::start().await;

    server.post("/cart/add", &json!({ "slug": "harvest-hollow" })).await;
    let (status, cart) = server
        .post("/cart/add", &json!({ "slug": "harvest-hollow" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    let items = cart["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 2);
    assert_money(&cart["subtotal"], 39.98);
    assert_money(&cart["tax"], 3.1984);
    assert_money(&cart["total"], 43.1784);

    let (_, count) = server.get("/cart/count").await;
    assert_eq!(count["count"], 2);
}

#[tokio::test]
async fn test_add_uses_discounted_price() {
    let server = TestServer::start().await;
    let (_, cart) = server
        .post("/cart/add", &json!({ "slug": "starfall-odyssey" }))
        .await;

    assert_money(&cart["items"][0]["unitPrice"], 47.992);
}

#[tokio::test]
async fn test_add_out_of_stock_conflicts() {
    let server = TestServer::start().await;
    let (status, _) = server
        .post("/cart/add", &json!({ "slug": "silent-circuit" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, count) = server.get("/cart/count").await;
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn test_add_unknown_game_is_not_found() {
    let server = TestServer::start().await;
    let (status, _) = server.post("/cart/add", &json!({ "slug": "nope" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_clamps_to_stock_and_zero_removes() {
    let server = TestServer::start().await;
    server
        .post("/cart/add", &json!({ "slug": "neon-skyline-racer" }))
        .await;

    let (_, cart) = server
        .post("/cart/update", &json!({ "gameId": "11", "quantity": 50 }))
        .await;
    assert_eq!(cart["items"][0]["quantity"], 3);

    let (_, cart) = server
        .post("/cart/update", &json!({ "gameId": "11", "quantity": 0 }))
        .await;
    assert_eq!(cart["items"], json!([]));
}

#[tokio::test]
async fn test_update_missing_line_is_noop() {
    let server = TestServer::start().await;
    let (status, cart) = server
        .post("/cart/update", &json!({ "gameId": "99", "quantity": 2 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["itemCount"], 0);
}

#[tokio::test]
async fn test_remove_and_clear() {
    let server = TestServer::start().await;
    server.post("/cart/add", &json!({ "slug": "harvest-hollow" })).await;
    server.post("/cart/add", &json!({ "slug": "iron-bastion" })).await;

    let (_, cart) = server
        .post("/cart/remove", &json!({ "gameId": "6" }))
        .await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["gameId"], "7");

    let (_, cart) = server.post("/cart/clear", &json!({})).await;
    assert_eq!(cart["itemCount"], 0);
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_success_clears_cart() {
    let server = TestServer::start().await;
    server.post("/cart/add", &json!({ "slug": "harvest-hollow" })).await;

    let (status, order) = server.post("/checkout", &valid_checkout_form()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(order["orderId"].as_str().unwrap().starts_with("GS-"));
    assert_money(&order["total"], 21.5892);

    let (_, cart) = server.get("/cart").await;
    assert_eq!(cart["itemCount"], 0);
}

#[tokio::test]
async fn test_checkout_validation_errors() {
    let server = TestServer::start().await;
    server.post("/cart/add", &json!({ "slug": "harvest-hollow" })).await;

    let mut form = valid_checkout_form();
    form["cardNumber"] = json!("4242");
    form["cvc"] = json!("12");

    let (status, body) = server.post("/checkout", &form).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["cardNumber"], "Card number must be 16 digits.");
    assert_eq!(body["errors"]["cvc"], "CVC must be 3 digits.");
    assert!(body["errors"].get("email").is_none());

    let (_, count) = server.get("/cart/count").await;
    assert_eq!(count["count"], 1);
}

#[tokio::test]
async fn test_checkout_empty_cart() {
    let server = TestServer::start().await;
    let (status, _) = server.post("/checkout", &valid_checkout_form()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_checkout_payment_failure_keeps_cart_for_resubmit() {
    let server = TestServer::with_policy(FailurePolicy::Always).await;
    server.post("/cart/add", &json!({ "slug": "harvest-hollow" })).await;

    let (status, body) = server.post("/checkout", &valid_checkout_form()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Payment failed");
    assert_eq!(body["retryable"], true);

    let (_, count) = server.get("/cart/count").await;
    assert_eq!(count["count"], 1);

    // A restarted server accepts payments; the kept cart goes through
    let server = server.restart().await;
    let (status, order) = server.post("/checkout", &valid_checkout_form()).await;

    assert_eq!(status, StatusCode::OK);
    assert_money(&order["total"], 21.5892);
    let (_, count) = server.get("/cart/count").await;
    assert_eq!(count["count"], 0);
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn test_login_with_demo_account() {
    let server = TestServer::start().await;

    let (status, me) = server.get("/auth/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["authenticated"], false);
    assert!(me["user"].is_null());

    let (status, me) = server
        .post(
            "/auth/login",
            &json!({ "email": "user@example.com", "password": "password123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["authenticated"], true);
    assert_eq!(me["user"]["email"], "user@example.com");

    let (_, me) = server.post("/auth/logout", &json!({})).await;
    assert_eq!(me["authenticated"], false);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let server = TestServer::start().await;

    let (status, body) = server
        .post(
            "/auth/login",
            &json!({ "email": "user@example.com", "password": "wrong-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password.");

    let (status, body) = server
        .post("/auth/login", &json!({ "email": "not-an-email", "password": "" }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["email"], "Please enter a valid email.");
    assert_eq!(body["errors"]["password"], "Password is required.");

    let (_, me) = server.get("/auth/me").await;
    assert_eq!(me["authenticated"], false);
}

#[tokio::test]
async fn test_signup_logs_in() {
    let server = TestServer::start().await;

    let (status, me) = server
        .post(
            "/auth/signup",
            &json!({ "name": "Grace", "email": "grace@example.com", "password": "hopper1906" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["user"]["name"], "Grace");

    let (status, body) = server
        .post(
            "/auth/signup",
            &json!({ "name": "G", "email": "grace@example.com", "password": "short" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["name"].is_string());
    assert!(body["errors"]["password"].is_string());
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_cart_and_auth_survive_restart() {
    let server = TestServer::start().await;
    server.post("/cart/add", &json!({ "slug": "iron-bastion" })).await;
    server.post("/cart/add", &json!({ "slug": "iron-bastion" })).await;
    server
        .post(
            "/auth/login",
            &json!({ "email": "user@example.com", "password": "password123" }),
        )
        .await;

    let server = server.restart().await;

    let (_, count) = server.get("/cart/count").await;
    assert_eq!(count["count"], 2);
    let (_, me) = server.get("/auth/me").await;
    assert_eq!(me["authenticated"], true);
}
