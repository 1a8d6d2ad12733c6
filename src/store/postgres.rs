//! PostgreSQL store backed by sqlx

use async_trait::async_trait;
use sqlx::PgPool;

use super::{Store, StoreError};
use crate::models::{
    Company, CompanyInput, CompanyPatch, Credential, NewOrder, Order, Product, ProductInput,
    ProductPatch,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Store implementation over a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and run embedded migrations (installs the unique index on
    /// `credentials.username` that closes the registration race).
    pub async fn connect(database_url: &str) -> Result<Self, BoxError> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                };
            }
        }
        StoreError::Backend(e.into())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_company(&self, input: CompanyInput) -> Result<Company, StoreError> {
        let company = sqlx::query_as(
            "INSERT INTO companies (name, store, register_code, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.store)
        .bind(&input.register_code)
        .bind(&input.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(company)
    }

    async fn find_company(&self, id: i64) -> Result<Option<Company>, StoreError> {
        let company = sqlx::query_as("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        let companies = sqlx::query_as("SELECT * FROM companies ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    async fn update_company(
        &self,
        id: i64,
        patch: CompanyPatch,
    ) -> Result<Option<Company>, StoreError> {
        let company = sqlx::query_as(
            "UPDATE companies SET
                 name = COALESCE($2, name),
                 store = COALESCE($3, store),
                 register_code = COALESCE($4, register_code),
                 phone = COALESCE($5, phone)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.store)
        .bind(patch.register_code)
        .bind(patch.phone)
        .fetch_optional(&self.pool)
        .await?;
        Ok(company)
    }

    async fn delete_company(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_product(&self, input: ProductInput) -> Result<Product, StoreError> {
        let product = sqlx::query_as(
            "INSERT INTO products (name, image, price, qty, comment)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.image)
        .bind(input.price)
        .bind(input.qty)
        .bind(&input.comment)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as("SELECT * FROM products ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn update_product(
        &self,
        id: i64,
        patch: ProductPatch,
    ) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as(
            "UPDATE products SET
                 name = COALESCE($2, name),
                 image = COALESCE($3, image),
                 price = COALESCE($4, price),
                 qty = COALESCE($5, qty),
                 comment = COALESCE($6, comment)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.image)
        .bind(patch.price)
        .bind(patch.qty)
        .bind(patch.comment)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn delete_product(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let order = sqlx::query_as(
            "INSERT INTO orders (products, qty, price, total_price, order_date, store, order_group)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(&order.products)
        .bind(order.qty)
        .bind(order.price)
        .bind(order.total_price)
        .bind(order.order_date)
        .bind(&order.store)
        .bind(&order.order_group)
        .fetch_one(&self.pool)
        .await?;
        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let orders = sqlx::query_as("SELECT * FROM orders ORDER BY order_date DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(orders)
    }

    async fn create_credential(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Credential, StoreError> {
        let credential = sqlx::query_as(
            "INSERT INTO credentials (username, password_hash)
             VALUES ($1, $2)
             RETURNING *",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(credential)
    }

    async fn find_credential_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, StoreError> {
        let credential = sqlx::query_as("SELECT * FROM credentials WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(credential)
    }
}
