//! Order resolvers
//!
//! Orders are append-only: once created they have no update or delete path.
//! The total is always derived server-side from unit price and quantity.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::error::{AppError, ErrorCode, ServiceResult};
use crate::models::{NewOrder, Order};
use crate::state::AppState;

pub async fn list(state: &AppState) -> ServiceResult<Vec<Order>> {
    Ok(state.store.list_orders().await?)
}

/// Create an order. All five business fields must be present and non-falsy,
/// checked before any computation or store write.
pub async fn add(
    state: &AppState,
    products: String,
    qty: i32,
    price: Decimal,
    store: String,
    order_group: String,
) -> ServiceResult<Order> {
    if products.trim().is_empty()
        || store.trim().is_empty()
        || order_group.trim().is_empty()
        || qty < 1
        || price <= Decimal::ZERO
    {
        return Err(AppError::new(ErrorCode::MissingFields).into());
    }

    let total_price = price * Decimal::from(qty);

    let order = state
        .store
        .create_order(NewOrder {
            products,
            qty,
            price,
            total_price,
            order_date: Utc::now(),
            store,
            order_group,
        })
        .await?;

    tracing::info!(id = order.id, %order.total_price, "order created");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::store::MemStore;
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState::with_store(Arc::new(MemStore::new()), "test-secret")
    }

    async fn add_pen_order(state: &AppState, qty: i32) -> ServiceResult<Order> {
        add(
            state,
            "Pen".to_string(),
            qty,
            Decimal::new(15, 1), // 1.5
            "A".to_string(),
            "G1".to_string(),
        )
        .await
    }

    #[tokio::test]
    async fn total_is_price_times_qty_exactly() {
        let state = test_state();
        let order = add_pen_order(&state, 3).await.unwrap();
        assert_eq!(order.total_price, Decimal::new(45, 1)); // 4.5
        assert_eq!(order.price, Decimal::new(15, 1));
        assert_eq!(order.qty, 3);
    }

    #[tokio::test]
    async fn missing_field_rejected_before_any_write() {
        let state = test_state();
        let err = add(
            &state,
            "Pen".to_string(),
            3,
            Decimal::new(15, 1),
            "".to_string(), // falsy store
            "G1".to_string(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::App(ref app) if app.code == ErrorCode::MissingFields
        ));
        assert!(list(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn zero_qty_and_zero_price_are_falsy() {
        let state = test_state();
        assert!(add_pen_order(&state, 0).await.is_err());
        let err = add(
            &state,
            "Pen".to_string(),
            1,
            Decimal::ZERO,
            "A".to_string(),
            "G1".to_string(),
        )
        .await;
        assert!(err.is_err());
        assert!(list(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn order_date_is_stamped_at_creation() {
        let state = test_state();
        let before = Utc::now();
        let order = add_pen_order(&state, 1).await.unwrap();
        let after = Utc::now();
        assert!(order.order_date >= before && order.order_date <= after);
    }
}
