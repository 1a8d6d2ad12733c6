//! Typed operations and the dispatcher
//!
//! The endpoint hands [`dispatch`] an already-parsed [`Operation`]; the
//! dispatcher routes it to the matching resolver, catches any failure and
//! maps it onto the typed error channel. Successful results pass through
//! unchanged, and nothing is retried.

mod company;
mod credential;
mod order;
mod product;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorCode, ServiceResult};
use crate::models::{
    AuthPayload, Company, CompanyInput, CompanyPatch, Credential, Order, Product, ProductInput,
    ProductPatch,
};
use crate::state::AppState;
use rust_decimal::Decimal;

/// The full operation surface: four queries and nine mutations
#[derive(Debug, Deserialize)]
#[serde(tag = "operation", content = "arguments", rename_all = "camelCase")]
pub enum Operation {
    Companies,
    Orders,
    Products,
    Company {
        id: i64,
    },
    AddCompany(CompanyInput),
    #[serde(rename_all = "camelCase")]
    UpdateCompany {
        id: i64,
        name: Option<String>,
        store: Option<String>,
        register_code: Option<String>,
        phone: Option<String>,
    },
    DeleteCompany {
        id: i64,
    },
    #[serde(rename_all = "camelCase")]
    AddOrder {
        products: String,
        qty: i32,
        price: Decimal,
        store: String,
        order_group: String,
    },
    AddProduct(ProductInput),
    #[serde(rename_all = "camelCase")]
    UpdateProduct {
        id: i64,
        name: Option<String>,
        image: Option<String>,
        price: Option<Decimal>,
        qty: Option<i32>,
        comment: Option<String>,
    },
    DeleteProduct {
        id: i64,
    },
    Register {
        username: String,
        password: String,
    },
    Login {
        username: String,
        password: String,
    },
}

/// Typed operation result
///
/// `Company(None)` / `Product(None)` serialize as `null` — the typed
/// absence for a miss on a non-destructive operation. Destructive
/// operations answer with a boolean instead.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    Companies(Vec<Company>),
    Orders(Vec<Order>),
    Products(Vec<Product>),
    Company(Option<Company>),
    Product(Option<Product>),
    Order(Order),
    Credential(Credential),
    Auth(AuthPayload),
    Deleted(bool),
}

/// Route an operation to its resolver and map failures to the error channel.
///
/// Business-rule errors pass through; store failures and anything untyped
/// are collapsed to generic answers. `UserNotFound` is rewritten here so a
/// login miss and a bad password are indistinguishable from outside.
pub async fn dispatch(state: &AppState, op: Operation) -> Result<OperationOutput, AppError> {
    route(state, op).await.map_err(|err| {
        let app: AppError = err.into();
        if app.code == ErrorCode::UserNotFound {
            AppError::new(ErrorCode::InvalidCredentials)
        } else {
            app
        }
    })
}

async fn route(state: &AppState, op: Operation) -> ServiceResult<OperationOutput> {
    match op {
        Operation::Companies => company::list(state).await.map(OperationOutput::Companies),
        Operation::Orders => order::list(state).await.map(OperationOutput::Orders),
        Operation::Products => product::list(state).await.map(OperationOutput::Products),
        Operation::Company { id } => company::get(state, id).await.map(OperationOutput::Company),
        Operation::AddCompany(input) => company::add(state, input)
            .await
            .map(|c| OperationOutput::Company(Some(c))),
        Operation::UpdateCompany {
            id,
            name,
            store,
            register_code,
            phone,
        } => {
            let patch = CompanyPatch {
                name,
                store,
                register_code,
                phone,
            };
            company::update(state, id, patch)
                .await
                .map(OperationOutput::Company)
        }
        Operation::DeleteCompany { id } => company::delete(state, id)
            .await
            .map(OperationOutput::Deleted),
        Operation::AddOrder {
            products,
            qty,
            price,
            store,
            order_group,
        } => order::add(state, products, qty, price, store, order_group)
            .await
            .map(OperationOutput::Order),
        Operation::AddProduct(input) => product::add(state, input)
            .await
            .map(|p| OperationOutput::Product(Some(p))),
        Operation::UpdateProduct {
            id,
            name,
            image,
            price,
            qty,
            comment,
        } => {
            let patch = ProductPatch {
                name,
                image,
                price,
                qty,
                comment,
            };
            product::update(state, id, patch)
                .await
                .map(OperationOutput::Product)
        }
        Operation::DeleteProduct { id } => product::delete(state, id)
            .await
            .map(OperationOutput::Deleted),
        Operation::Register { username, password } => {
            credential::register(state, &username, &password)
                .await
                .map(OperationOutput::Credential)
        }
        Operation::Login { username, password } => credential::login(state, &username, &password)
            .await
            .map(OperationOutput::Auth),
    }
}
