mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{call, json, test_app};

#[tokio::test]
async fn account_create_delete_then_not_found() {
  let app = test_app().await;

  let (status, body) = call(
    &app,
    Method::POST,
    "/account",
    Some(json!({ "firstName": "A", "lastName": "B" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let account = json(&body);
  let id = account["id"].as_i64().unwrap();
  assert!(id > 0);
  assert_eq!(account["firstName"], "A");
  assert_eq!(account["lastName"], "B");
  assert!(!account["number"].as_str().unwrap().is_empty());
  assert_eq!(account["balance"], 0);

  let uri = format!("/account/{}", id);
  let (status, body) = call(&app, Method::DELETE, &uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json(&body), json!("ok"));

  let (status, body) = call(&app, Method::GET, &uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(json(&body)["error"], format!("account {} not found", id));
}

#[tokio::test]
async fn account_update_round_trip() {
  let app = test_app().await;

  let (_, body) = call(
    &app,
    Method::POST,
    "/account",
    Some(json!({ "firstName": "A", "lastName": "B" })),
  )
  .await;
  let created = json(&body);
  let uri = format!("/account/{}", created["id"]);

  let (status, _) = call(
    &app,
    Method::POST,
    &uri,
    Some(json!({ "firstName": "C", "lastName": "D", "number": "acc-1", "balance": -20 })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);

  let (status, body) = call(&app, Method::GET, &uri, None).await;
  assert_eq!(status, StatusCode::OK);
  let updated = json(&body);
  assert_eq!(updated["id"], created["id"]);
  assert_eq!(updated["firstName"], "C");
  assert_eq!(updated["number"], "acc-1");
  assert_eq!(updated["balance"], -20);

  let (status, body) = call(&app, Method::GET, "/account", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json(&body).as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn errors_use_json_envelope() {
  let app = test_app().await;

  let (status, body) = call(&app, Method::GET, "/account/not-a-number", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(json(&body), json!({ "error": "invalid id format" }));

  let (status, body) = call(&app, Method::DELETE, "/account/12", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(json(&body), json!({ "error": "account 12 not found" }));

  let (status, body) = call(&app, Method::PATCH, "/account", None).await;
  assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
  assert_eq!(json(&body), json!({ "error": "method not allowed: PATCH" }));
}
