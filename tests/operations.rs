//! End-to-end dispatcher tests over the in-memory store
//!
//! Operations enter as wire-shaped JSON documents, exactly as the endpoint
//! would deliver them, and results are checked both as typed values and as
//! serialized JSON.

use std::sync::Arc;

use serde_json::{Value, json};

use shopfloor::auth::decode_token;
use shopfloor::error::ErrorCode;
use shopfloor::ops::{Operation, OperationOutput, dispatch};
use shopfloor::state::AppState;
use shopfloor::store::MemStore;

fn test_state() -> AppState {
    AppState::with_store(Arc::new(MemStore::new()), "test-secret")
}

fn op(doc: Value) -> Operation {
    serde_json::from_value(doc).expect("operation document should parse")
}

async fn run(state: &AppState, doc: Value) -> OperationOutput {
    dispatch(state, op(doc)).await.expect("operation should succeed")
}

async fn run_err(state: &AppState, doc: Value) -> ErrorCode {
    dispatch(state, op(doc)).await.expect_err("operation should fail").code
}

#[tokio::test]
async fn pen_scenario_total_price() {
    let state = test_state();

    run(
        &state,
        json!({
            "operation": "addProduct",
            "arguments": { "name": "Pen", "price": "1.5", "qty": 10 }
        }),
    )
    .await;

    let out = run(
        &state,
        json!({
            "operation": "addOrder",
            "arguments": {
                "products": "Pen", "qty": 3, "price": "1.5",
                "store": "A", "orderGroup": "G1"
            }
        }),
    )
    .await;

    let order_json = serde_json::to_value(&out).unwrap();
    assert_eq!(order_json["totalPrice"], json!("4.5"));
    assert_eq!(order_json["products"], json!("Pen"));
    assert_eq!(order_json["orderGroup"], json!("G1"));
}

#[tokio::test]
async fn add_order_missing_field_writes_nothing() {
    let state = test_state();

    let code = run_err(
        &state,
        json!({
            "operation": "addOrder",
            "arguments": {
                "products": "Pen", "qty": 3, "price": "1.5",
                "store": "", "orderGroup": "G1"
            }
        }),
    )
    .await;
    assert_eq!(code, ErrorCode::MissingFields);

    let out = run(&state, json!({ "operation": "orders" })).await;
    assert_eq!(serde_json::to_value(&out).unwrap(), json!([]));
}

#[tokio::test]
async fn orders_come_back_newest_first() {
    let state = test_state();

    for group in ["G1", "G2", "G3"] {
        run(
            &state,
            json!({
                "operation": "addOrder",
                "arguments": {
                    "products": "Pen", "qty": 1, "price": "2",
                    "store": "A", "orderGroup": group
                }
            }),
        )
        .await;
    }

    let out = run(&state, json!({ "operation": "orders" })).await;
    let listed = serde_json::to_value(&out).unwrap();
    let groups: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["orderGroup"].as_str().unwrap())
        .collect();
    assert_eq!(groups, vec!["G3", "G2", "G1"]);
}

#[tokio::test]
async fn register_twice_conflicts_and_hash_never_serializes() {
    let state = test_state();

    let out = run(
        &state,
        json!({
            "operation": "register",
            "arguments": { "username": "bat", "password": "hunter2" }
        }),
    )
    .await;
    let cred_json = serde_json::to_value(&out).unwrap();
    assert_eq!(cred_json["username"], json!("bat"));
    assert!(cred_json.get("password").is_none());
    assert!(cred_json.get("passwordHash").is_none());
    assert!(cred_json.get("password_hash").is_none());

    let code = run_err(
        &state,
        json!({
            "operation": "register",
            "arguments": { "username": "bat", "password": "other" }
        }),
    )
    .await;
    assert_eq!(code, ErrorCode::DuplicateUser);
}

#[tokio::test]
async fn login_success_returns_decodable_one_hour_token() {
    let state = test_state();

    run(
        &state,
        json!({
            "operation": "register",
            "arguments": { "username": "bat", "password": "hunter2" }
        }),
    )
    .await;

    let out = run(
        &state,
        json!({
            "operation": "login",
            "arguments": { "username": "bat", "password": "hunter2" }
        }),
    )
    .await;

    let payload = serde_json::to_value(&out).unwrap();
    let token = payload["token"].as_str().unwrap();
    let user_id = payload["user"]["id"].as_i64().unwrap();

    let claims = decode_token(token, "test-secret").unwrap();
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn login_failures_are_indistinguishable_at_the_boundary() {
    let state = test_state();

    run(
        &state,
        json!({
            "operation": "register",
            "arguments": { "username": "bat", "password": "hunter2" }
        }),
    )
    .await;

    // Wrong password for a real user
    let wrong_pw = dispatch(
        &state,
        op(json!({
            "operation": "login",
            "arguments": { "username": "bat", "password": "wrong" }
        })),
    )
    .await
    .unwrap_err();

    // Unknown username
    let unknown = dispatch(
        &state,
        op(json!({
            "operation": "login",
            "arguments": { "username": "nobody", "password": "wrong" }
        })),
    )
    .await
    .unwrap_err();

    assert_eq!(wrong_pw.code, ErrorCode::InvalidCredentials);
    assert_eq!(unknown.code, ErrorCode::InvalidCredentials);
    assert_eq!(wrong_pw.message, unknown.message);
}

#[tokio::test]
async fn company_crud_round_trip() {
    let state = test_state();

    let out = run(
        &state,
        json!({
            "operation": "addCompany",
            "arguments": {
                "name": "Acme", "store": "Main",
                "registerCode": "RC-1", "phone": "555-0100"
            }
        }),
    )
    .await;
    let created = serde_json::to_value(&out).unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["registerCode"], json!("RC-1"));
    assert!(created["createdAt"].is_string());

    let out = run(
        &state,
        json!({
            "operation": "updateCompany",
            "arguments": { "id": id, "phone": "555-0199" }
        }),
    )
    .await;
    let updated = serde_json::to_value(&out).unwrap();
    assert_eq!(updated["phone"], json!("555-0199"));
    assert_eq!(updated["name"], json!("Acme"));

    let out = run(&state, json!({ "operation": "company", "arguments": { "id": id } })).await;
    assert_eq!(serde_json::to_value(&out).unwrap()["id"], json!(id));

    let out = run(
        &state,
        json!({ "operation": "deleteCompany", "arguments": { "id": id } }),
    )
    .await;
    assert_eq!(serde_json::to_value(&out).unwrap(), json!(true));

    // Typed absence after deletion, false for a second delete
    let out = run(&state, json!({ "operation": "company", "arguments": { "id": id } })).await;
    assert_eq!(serde_json::to_value(&out).unwrap(), Value::Null);
    let out = run(
        &state,
        json!({ "operation": "deleteCompany", "arguments": { "id": id } }),
    )
    .await;
    assert_eq!(serde_json::to_value(&out).unwrap(), json!(false));
}

#[tokio::test]
async fn update_with_unknown_id_is_null_not_error() {
    let state = test_state();

    let out = run(
        &state,
        json!({
            "operation": "updateProduct",
            "arguments": { "id": 404, "qty": 1 }
        }),
    )
    .await;
    assert_eq!(serde_json::to_value(&out).unwrap(), Value::Null);

    let out = run(
        &state,
        json!({
            "operation": "updateCompany",
            "arguments": { "id": 404, "phone": "555-0000" }
        }),
    )
    .await;
    assert_eq!(serde_json::to_value(&out).unwrap(), Value::Null);
}

#[tokio::test]
async fn total_price_cannot_be_supplied_by_the_caller() {
    // The operation shape has no totalPrice argument; a document carrying
    // one must not leak into the derived value.
    let state = test_state();

    let out = run(
        &state,
        json!({
            "operation": "addOrder",
            "arguments": {
                "products": "Pen", "qty": 2, "price": "3",
                "store": "A", "orderGroup": "G1",
                "totalPrice": "999"
            }
        }),
    )
    .await;
    assert_eq!(serde_json::to_value(&out).unwrap()["totalPrice"], json!("6"));
}
