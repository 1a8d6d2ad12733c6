//! Persisted entity types and their input shapes
//!
//! Wire field names are camelCase. The credential's `password_hash` is
//! carried on the in-process value but never serialized to a client.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub store: String,
    pub register_code: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    pub name: String,
    pub store: String,
    pub register_code: String,
    pub phone: String,
}

/// Partial field set for in-place company updates; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub store: Option<String>,
    pub register_code: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub price: Decimal,
    pub qty: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub price: Decimal,
    pub qty: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<Decimal>,
    pub qty: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub products: String,
    pub qty: i32,
    pub price: Decimal,
    /// Derived server-side as `price * qty`, never accepted from a caller
    pub total_price: Decimal,
    pub order_date: DateTime<Utc>,
    pub store: String,
    pub order_group: String,
}

/// Fully validated order row, ready to persist
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub products: String,
    pub qty: i32,
    pub price: Decimal,
    pub total_price: Decimal,
    pub order_date: DateTime<Utc>,
    pub store: String,
    pub order_group: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Credential {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Successful login result: a signed token plus the credential record
#[derive(Debug, Clone, Serialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: Credential,
}
