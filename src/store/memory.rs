//! In-memory store double
//!
//! Mirrors the PostgreSQL backend's observable behavior, including the
//! unique constraint on usernames and newest-first order listing. Used by
//! the test suites and usable as a throwaway dev backend.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::{Store, StoreError};
use crate::models::{
    Company, CompanyInput, CompanyPatch, Credential, NewOrder, Order, Product, ProductInput,
    ProductPatch,
};

#[derive(Default)]
struct Tables {
    companies: Vec<Company>,
    products: Vec<Product>,
    orders: Vec<Order>,
    credentials: Vec<Credential>,
    next_company_id: i64,
    next_product_id: i64,
    next_order_id: i64,
    next_credential_id: i64,
}

/// In-memory [`Store`] implementation
#[derive(Default)]
pub struct MemStore {
    tables: Mutex<Tables>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[async_trait]
impl Store for MemStore {
    async fn create_company(&self, input: CompanyInput) -> Result<Company, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let company = Company {
            id: next(&mut tables.next_company_id),
            name: input.name,
            store: input.store,
            register_code: input.register_code,
            phone: input.phone,
            created_at: Utc::now(),
        };
        tables.companies.push(company.clone());
        Ok(company)
    }

    async fn find_company(&self, id: i64) -> Result<Option<Company>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.companies.iter().find(|c| c.id == id).cloned())
    }

    async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.companies.clone())
    }

    async fn update_company(
        &self,
        id: i64,
        patch: CompanyPatch,
    ) -> Result<Option<Company>, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(company) = tables.companies.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            company.name = name;
        }
        if let Some(store) = patch.store {
            company.store = store;
        }
        if let Some(register_code) = patch.register_code {
            company.register_code = register_code;
        }
        if let Some(phone) = patch.phone {
            company.phone = phone;
        }
        Ok(Some(company.clone()))
    }

    async fn delete_company(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.companies.len();
        tables.companies.retain(|c| c.id != id);
        Ok(tables.companies.len() < before)
    }

    async fn create_product(&self, input: ProductInput) -> Result<Product, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let product = Product {
            id: next(&mut tables.next_product_id),
            name: input.name,
            image: input.image,
            price: input.price,
            qty: input.qty,
            comment: input.comment,
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.products.clone())
    }

    async fn update_product(
        &self,
        id: i64,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let Some(product) = tables.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(image) = patch.image {
            product.image = Some(image);
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(qty) = patch.qty {
            product.qty = qty;
        }
        if let Some(comment) = patch.comment {
            product.comment = Some(comment);
        }
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        Ok(tables.products.len() < before)
    }

    async fn create_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let order = Order {
            id: next(&mut tables.next_order_id),
            products: order.products,
            qty: order.qty,
            price: order.price,
            total_price: order.total_price,
            order_date: order.order_date,
            store: order.store,
            order_group: order.order_group,
        };
        tables.orders.push(order.clone());
        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut orders = tables.orders.clone();
        // Newest first; id breaks ties between equal timestamps
        orders.sort_by(|a, b| (b.order_date, b.id).cmp(&(a.order_date, a.id)));
        Ok(orders)
    }

    async fn create_credential(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Credential, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.credentials.iter().any(|c| c.username == username) {
            return Err(StoreError::UniqueViolation {
                constraint: "credentials_username_key".to_string(),
            });
        }
        let credential = Credential {
            id: next(&mut tables.next_credential_id),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.credentials.push(credential.clone());
        Ok(credential)
    }

    async fn find_credential_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .credentials
            .iter()
            .find(|c| c.username == username)
            .cloned())
    }
}
