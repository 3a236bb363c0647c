//! End-to-end tests: requests through the router against an in-memory agency.

use std::{str::FromStr, sync::Arc};

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use estate_agency::{AdminSeed, Agency, AgencySettings, Mailer};
use estate_core::{memory::MemoryStore, password::hash_password};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

const ADMIN: (&str, &str) = ("admin", "lyns2024");
const RAVI: (&str, &str) = ("ravi", "secret");

async fn app() -> Router {
  let settings = AgencySettings::new(AdminSeed {
    full_name:     "Lyndon".into(),
    email:         "lyndon@example.com".into(),
    password_hash: hash_password(ADMIN.1).unwrap(),
  });
  let agency = Agency::open(MemoryStore::new(), Mailer::log_only(), settings)
    .await
    .unwrap()
    .value;
  api_router(Arc::new(agency))
}

fn basic((user, pass): (&str, &str)) -> String {
  format!("Basic {}", B64.encode(format!("{user}:{pass}")))
}

async fn call(
  app: &Router,
  method: &str,
  uri: &str,
  creds: Option<(&str, &str)>,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  if let Some(creds) = creds {
    builder = builder.header(header::AUTHORIZATION, basic(creds));
  }
  let body = match body {
    Some(json) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(json.to_string())
    }
    None => Body::empty(),
  };
  let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

fn decimal(value: &Value) -> Decimal {
  match value {
    Value::String(s) => Decimal::from_str(s).unwrap(),
    other => Decimal::from_str(&other.to_string()).unwrap(),
  }
}

async fn with_partner() -> Router {
  let app = app().await;
  let (status, _) = call(
    &app,
    "POST",
    "/users",
    Some(ADMIN),
    Some(json!({
      "username": RAVI.0,
      "password": RAVI.1,
      "role": "Partner",
      "full_name": "Ravi Kumar",
      "email": "ravi@example.com",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  app
}

fn client_body(name: &str, assigned_to: &str) -> Value {
  json!({
    "name": name,
    "contact": "9800000000",
    "client_type": "Sale",
    "property_category": "Commercial",
    "property_type": "Office",
    "budget_min": 50,
    "budget_max": 80,
    "budget_currency": "₹ Lakhs",
    "location_preference": ["Powai"],
    "assigned_to": assigned_to,
  })
}

// ── Authentication ──────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_credentials_get_a_challenge() {
  let app = app().await;
  let resp = app
    .clone()
    .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  let challenge = resp.headers().get(header::WWW_AUTHENTICATE).unwrap();
  assert!(challenge.to_str().unwrap().starts_with("Basic"));
}

#[tokio::test]
async fn wrong_password_is_generic() {
  let app = app().await;
  let (status, body) = call(&app, "GET", "/me", Some(("admin", "nope")), None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(body["error"], "invalid username or password");

  let (status, unknown) = call(&app, "GET", "/me", Some(("ghost", "nope")), None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
  assert_eq!(unknown, body);
}

#[tokio::test]
async fn me_returns_the_actor() {
  let app = app().await;
  let (status, body) = call(&app, "GET", "/me", Some(ADMIN), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["username"], "admin");
  assert_eq!(body["role"], "Admin");
  assert_eq!(body["full_name"], "Lyndon");
}

// ── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn user_management_is_admin_only() {
  let app = with_partner().await;

  let (status, _) = call(&app, "GET", "/users", Some(RAVI), None).await;
  assert_eq!(status, StatusCode::FORBIDDEN);

  let (status, users) = call(&app, "GET", "/users", Some(ADMIN), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(users.as_array().unwrap().len(), 2);
  assert!(users[0].get("password_hash").is_none());

  let (status, partners) = call(&app, "GET", "/partners", Some(RAVI), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(partners[0]["full_name"], "Ravi Kumar");
}

#[tokio::test]
async fn admin_account_cannot_be_deleted() {
  let app = app().await;
  let (status, body) = call(&app, "DELETE", "/users/admin", Some(ADMIN), None).await;
  assert_eq!(status, StatusCode::CONFLICT);
  assert!(body["error"].as_str().unwrap().contains("admin"));
}

#[tokio::test]
async fn disabled_partner_is_locked_out() {
  let app = with_partner().await;
  let (status, body) = call(
    &app,
    "POST",
    "/users/ravi/status",
    Some(ADMIN),
    Some(json!({ "status": "Inactive" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["status"], "Inactive");

  let (status, _) = call(&app, "GET", "/me", Some(RAVI), None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ── Clients ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_list_clients() {
  let app = with_partner().await;

  let (status, created) = call(
    &app,
    "POST",
    "/clients",
    Some(ADMIN),
    Some(client_body("Asha", "Ravi Kumar")),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["data"]["client_id"], "C0001");
  assert_eq!(created["data"]["status"], "New Lead");
  assert_eq!(created["warnings"], json!([]));

  call(&app, "POST", "/clients", Some(ADMIN), Some(client_body("Vikram", "Unassigned"))).await;

  let (_, mine) = call(&app, "GET", "/clients", Some(RAVI), None).await;
  assert_eq!(mine.as_array().unwrap().len(), 1);
  assert_eq!(mine[0]["name"], "Asha");

  let (_, all) = call(&app, "GET", "/clients", Some(ADMIN), None).await;
  assert_eq!(all.as_array().unwrap().len(), 2);
  // Read back in the same shape it was posted in.
  assert_eq!(all[0]["location_preference"], json!(["Powai"]));
}

#[tokio::test]
async fn invalid_client_is_a_bad_request() {
  let app = app().await;
  let mut body = client_body("Asha", "Unassigned");
  body["location_preference"] = json!([]);
  let (status, err) = call(&app, "POST", "/clients", Some(ADMIN), Some(body)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(err["error"].as_str().unwrap().contains("location"));
}

#[tokio::test]
async fn partner_updates_client_status() {
  let app = with_partner().await;
  call(&app, "POST", "/clients", Some(ADMIN), Some(client_body("Asha", "Ravi Kumar"))).await;

  let (status, body) = call(
    &app,
    "POST",
    "/clients/C0001/status",
    Some(RAVI),
    Some(json!({ "status": "Site Visit Done" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["data"]["status"], "Site Visit Done");

  let (status, _) = call(
    &app,
    "POST",
    "/clients/C0404/status",
    Some(RAVI),
    Some(json!({ "status": "Contacted" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Deals ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn closing_a_deal_is_visible_everywhere() {
  let app = with_partner().await;
  call(&app, "POST", "/clients", Some(ADMIN), Some(client_body("Asha", "Ravi Kumar"))).await;

  let (status, deal) = call(
    &app,
    "POST",
    "/deals",
    Some(ADMIN),
    Some(json!({
      "client_id": "C0001",
      "brokerage_from_owner": 25000,
      "brokerage_from_client": 25000,
      "number_of_brokers": 1,
      "partner_name": "Ravi Kumar",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(deal["data"]["deal_id"], "D0001");
  assert_eq!(decimal(&deal["data"]["your_share"]), Decimal::from(45_000));
  assert_eq!(decimal(&deal["data"]["partner_share"]), Decimal::from(5_000));
  assert_eq!(deal["data"]["listing_id"], "N/A");

  let (_, clients) = call(&app, "GET", "/clients", Some(ADMIN), None).await;
  assert_eq!(clients[0]["status"], "Deal Closed");

  let (_, mine) = call(&app, "GET", "/deals", Some(RAVI), None).await;
  assert_eq!(mine.as_array().unwrap().len(), 1);

  let (status, paid) = call(
    &app,
    "POST",
    "/deals/D0001/payment",
    Some(ADMIN),
    Some(json!({ "payment_status": "Paid" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(paid["data"]["payment_status"], "Paid");
}

#[tokio::test]
async fn partners_cannot_close_deals() {
  let app = with_partner().await;
  let (status, _) = call(
    &app,
    "POST",
    "/deals",
    Some(RAVI),
    Some(json!({
      "client_id": "C0001",
      "brokerage_from_owner": 1,
      "brokerage_from_client": 1,
      "number_of_brokers": 1,
      "partner_name": "Ravi Kumar",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn commission_preview() {
  let app = app().await;
  let (status, body) = call(
    &app,
    "POST",
    "/commission/preview",
    Some(ADMIN),
    Some(json!({
      "brokerage_from_owner": 30000,
      "brokerage_from_client": 20000,
      "number_of_brokers": 3,
    })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(decimal(&body["rounded"]["per_broker"]), Decimal::from(16_667));
  let exact = &body["exact"];
  assert_eq!(
    decimal(&exact["primary_share"]) + decimal(&exact["partner_share"]),
    decimal(&exact["per_broker"])
  );

  let (status, _) = call(
    &app,
    "POST",
    "/commission/preview",
    Some(ADMIN),
    Some(json!({
      "brokerage_from_owner": 100,
      "brokerage_from_client": 100,
      "number_of_brokers": 0,
    })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Listings & reports ──────────────────────────────────────────────────────

#[tokio::test]
async fn listing_flow() {
  let app = with_partner().await;
  let (status, created) = call(
    &app,
    "POST",
    "/listings",
    Some(ADMIN),
    Some(json!({
      "address": "Shop 4, Lake Road",
      "location": "Powai",
      "property_category": "Commercial",
      "property_type": "Shop/Showroom",
      "bhk_or_size": "600 sq ft",
      "price": 2,
      "price_currency": "₹ Crores",
      "area_sqft": 600,
      "broker_name": "Mehta",
      "broker_contact": "9811111111",
      "visible_to_partner": "Yes",
      "assigned_to": "Ravi Kumar",
    })),
  )
  .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["data"]["listing_id"], "L0001");
  assert_eq!(created["data"]["visible_to_partner"], "Yes");
  call(&app, "POST", "/clients", Some(ADMIN), Some(client_body("Asha", "Ravi Kumar"))).await;

  let (status, _) = call(
    &app,
    "POST",
    "/listings/L0001/status",
    Some(RAVI),
    Some(json!({ "status": "Shown to Client", "shown_to_clients": ["Someone Else"] })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, shown) = call(
    &app,
    "POST",
    "/listings/L0001/status",
    Some(RAVI),
    Some(json!({ "status": "Shown to Client", "shown_to_clients": ["Asha"] })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(shown["data"]["listing_status"], "Shown to Client");
  assert_eq!(shown["data"]["shown_to_clients"], json!(["Asha"]));

  let (status, _) = call(&app, "DELETE", "/listings/L0001", Some(RAVI), None).await;
  assert_eq!(status, StatusCode::FORBIDDEN);
  let (status, _) = call(&app, "DELETE", "/listings/L0001", Some(ADMIN), None).await;
  assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn summary_scope_follows_role() {
  let app = with_partner().await;
  call(&app, "POST", "/clients", Some(ADMIN), Some(client_body("Asha", "Ravi Kumar"))).await;

  let (_, admin) = call(&app, "GET", "/reports/summary", Some(ADMIN), None).await;
  assert_eq!(admin["scope"], "admin");
  assert_eq!(admin["total_clients"], 1);

  let (_, partner) = call(&app, "GET", "/reports/summary", Some(RAVI), None).await;
  assert_eq!(partner["scope"], "partner");
  assert_eq!(partner["my_clients"], 1);
}
