//! Product resolvers

use rust_decimal::Decimal;

use crate::error::{AppError, ServiceResult};
use crate::models::{Product, ProductInput, ProductPatch};
use crate::state::AppState;

pub async fn list(state: &AppState) -> ServiceResult<Vec<Product>> {
    Ok(state.store.list_products().await?)
}

pub async fn add(state: &AppState, input: ProductInput) -> ServiceResult<Product> {
    if input.name.trim().is_empty() {
        return Err(AppError::validation("product name is required").into());
    }
    if input.price < Decimal::ZERO {
        return Err(AppError::validation("price must not be negative").into());
    }
    if input.qty < 0 {
        return Err(AppError::validation("qty must not be negative").into());
    }
    let product = state.store.create_product(input).await?;
    tracing::info!(id = product.id, "product created");
    Ok(product)
}

pub async fn update(
    state: &AppState,
    id: i64,
    patch: ProductPatch,
) -> ServiceResult<Option<Product>> {
    if patch.price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(AppError::validation("price must not be negative").into());
    }
    if patch.qty.is_some_and(|q| q < 0) {
        return Err(AppError::validation("qty must not be negative").into());
    }
    Ok(state.store.update_product(id, patch).await?)
}

pub async fn delete(state: &AppState, id: i64) -> ServiceResult<bool> {
    let removed = state.store.delete_product(id).await?;
    if removed {
        tracing::info!(id, "product deleted");
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState::with_store(Arc::new(MemStore::new()), "test-secret")
    }

    fn pen() -> ProductInput {
        ProductInput {
            name: "Pen".to_string(),
            image: None,
            price: Decimal::new(15, 1),
            qty: 10,
            comment: None,
        }
    }

    #[tokio::test]
    async fn add_then_update_partial() {
        let state = test_state();
        let created = add(&state, pen()).await.unwrap();
        assert_eq!(created.qty, 10);

        let patch = ProductPatch {
            qty: Some(7),
            ..Default::default()
        };
        let updated = update(&state, created.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.qty, 7);
        assert_eq!(updated.name, "Pen");
        assert_eq!(updated.price, Decimal::new(15, 1));
    }

    #[tokio::test]
    async fn negative_price_rejected_before_write() {
        let state = test_state();
        let mut bad = pen();
        bad.price = Decimal::new(-1, 0);
        assert!(add(&state, bad).await.is_err());
        assert!(list(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_id_absence_and_false() {
        let state = test_state();
        assert!(
            update(&state, 404, ProductPatch::default())
                .await
                .unwrap()
                .is_none()
        );
        assert!(!delete(&state, 404).await.unwrap());
    }
}
