//! Company resolvers

use crate::error::{AppError, ServiceResult};
use crate::models::{Company, CompanyInput, CompanyPatch};
use crate::state::AppState;

pub async fn list(state: &AppState) -> ServiceResult<Vec<Company>> {
    Ok(state.store.list_companies().await?)
}

pub async fn get(state: &AppState, id: i64) -> ServiceResult<Option<Company>> {
    Ok(state.store.find_company(id).await?)
}

pub async fn add(state: &AppState, input: CompanyInput) -> ServiceResult<Company> {
    if input.name.trim().is_empty()
        || input.store.trim().is_empty()
        || input.register_code.trim().is_empty()
        || input.phone.trim().is_empty()
    {
        return Err(AppError::validation("all company fields are required").into());
    }
    let company = state.store.create_company(input).await?;
    tracing::info!(id = company.id, "company created");
    Ok(company)
}

/// Applies the supplied fields in place; a miss answers with the typed
/// absence, never an error.
pub async fn update(
    state: &AppState,
    id: i64,
    patch: CompanyPatch,
) -> ServiceResult<Option<Company>> {
    Ok(state.store.update_company(id, patch).await?)
}

/// Destructive op: a miss answers `false`, not an error
pub async fn delete(state: &AppState, id: i64) -> ServiceResult<bool> {
    let removed = state.store.delete_company(id).await?;
    if removed {
        tracing::info!(id, "company deleted");
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

    fn input(name: &str) -> CompanyInput {
        CompanyInput {
            name: name.to_string(),
            store: "Main".to_string(),
            register_code: "RC-1".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    #[tokio::test]
    async fn add_rejects_blank_required_field() {
        let state = test_state();
        let mut bad = input("Acme");
        bad.phone = "  ".to_string();
        assert!(add(&state, bad).await.is_err());
        assert!(list(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_applies_partial_fields() {
        let state = test_state();
        let created = add(&state, input("Acme")).await.unwrap();

        let patch = CompanyPatch {
            phone: Some("555-0199".to_string()),
            ..Default::default()
        };
        let updated = update(&state, created.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.phone, "555-0199");
        assert_eq!(updated.name, "Acme");
    }

    #[tokio::test]
    async fn miss_is_absence_for_update_and_false_for_delete() {
        let state = test_state();
        assert!(
            update(&state, 404, CompanyPatch::default())
                .await
                .unwrap()
                .is_none()
        );
        assert!(!delete(&state, 404).await.unwrap());
    }
}
