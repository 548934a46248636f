use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    db::{DbPool, OrmConn},
    entity::invoices::{ActiveModel, Column, Entity as Invoices},
    models::{Invoice, InvoiceInput, NewInvoice},
};

use super::{InvoiceStore, StoreError};

/// PostgreSQL store: mutations go through SeaORM, reads through the sqlx pool.
#[derive(Clone)]
pub struct PgInvoiceStore {
    orm: OrmConn,
    pool: DbPool,
}

impl PgInvoiceStore {
    pub fn new(orm: OrmConn, pool: DbPool) -> Self {
        Self { orm, pool }
    }
}

// Ids are UUID columns; Postgres would reject a malformed one, so do we.
fn parse_id(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw.trim()).map_err(|_| StoreError::InvalidId(raw.to_string()))
}

#[async_trait]
impl InvoiceStore for PgInvoiceStore {
    async fn insert(&self, invoice: NewInvoice) -> Result<String, StoreError> {
        let active = ActiveModel {
            id: NotSet,
            customer_id: Set(parse_id(&invoice.customer_id)?),
            amount: Set(invoice.amount_cents),
            status: Set(invoice.status.as_str().to_string()),
            date: Set(invoice.date),
        };
        let result = Invoices::insert(active).exec(&self.orm).await?;
        Ok(result.last_insert_id.to_string())
    }

    async fn update(&self, id: &str, input: InvoiceInput) -> Result<u64, StoreError> {
        let id = parse_id(id)?;
        let customer_id = parse_id(&input.customer_id)?;
        let result = Invoices::update_many()
            .col_expr(Column::CustomerId, Expr::value(customer_id))
            .col_expr(Column::Amount, Expr::value(input.amount_cents))
            .col_expr(Column::Status, Expr::value(input.status.as_str().to_string()))
            .filter(Column::Id.eq(id))
            .exec(&self.orm)
            .await?;
        Ok(result.rows_affected)
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        let id = parse_id(id)?;
        let result = Invoices::delete_by_id(id).exec(&self.orm).await?;
        Ok(result.rows_affected)
    }

    async fn list(&self) -> Result<Vec<Invoice>, StoreError> {
        let items = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id::text AS id,
                   customer_id::text AS customer_id,
                   amount::bigint AS amount,
                   status,
                   date
            FROM invoices
            ORDER BY date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
