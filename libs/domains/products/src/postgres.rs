use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{product, product_option},
    error::ProductResult,
    models::{Product, ProductFilter, ProductOption},
    repository::{ProductOptionRepository, ProductRepository},
};

/// PostgreSQL product repository
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn exists(&self, id: Uuid) -> ProductResult<bool> {
        Ok(product::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .is_some())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let mut query = product::Entity::find();

        if let Some(name) = filter.name() {
            query = query.filter(product::Column::Name.eq(name));
        }

        let models = query
            .order_by_asc(product::Column::Name)
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let model = product::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn create(&self, input: Product) -> ProductResult<u64> {
        let id = input.id;
        let active_model: product::ActiveModel = input.into();

        let rows = product::Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await?;

        tracing::info!(product_id = %id, "Created product");
        Ok(rows)
    }

    async fn update(&self, input: Product) -> ProductResult<u64> {
        let id = input.id;
        let active_model: product::ActiveModel = input.into();

        let result = product::Entity::update_many()
            .set(active_model)
            .filter(product::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        tracing::info!(product_id = %id, rows = result.rows_affected, "Updated product");
        Ok(result.rows_affected)
    }

    async fn delete_with_options(&self, id: Uuid) -> ProductResult<u64> {
        let txn = self.db.begin().await?;

        let options = product_option::Entity::delete_many()
            .filter(product_option::Column::ProductId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let products = product::Entity::delete_by_id(id)
            .exec(&txn)
            .await?
            .rows_affected;

        txn.commit().await?;

        tracing::info!(product_id = %id, removed_options = options, "Deleted product");
        Ok(products + options)
    }
}

/// PostgreSQL product option repository
#[derive(Clone)]
pub struct PgProductOptionRepository {
    db: DatabaseConnection,
}

impl PgProductOptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductOptionRepository for PgProductOptionRepository {
    async fn exists(&self, id: Uuid) -> ProductResult<bool> {
        Ok(product_option::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .is_some())
    }

    async fn list_for_product(&self, product_id: Uuid) -> ProductResult<Vec<ProductOption>> {
        let models = product_option::Entity::find()
            .filter(product_option::Column::ProductId.eq(product_id))
            .order_by_asc(product_option::Column::Name)
            .order_by_asc(product_option::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_for_product(
        &self,
        product_id: Uuid,
        option_id: Uuid,
    ) -> ProductResult<Option<ProductOption>> {
        let model = product_option::Entity::find_by_id(option_id)
            .filter(product_option::Column::ProductId.eq(product_id))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn create(&self, input: ProductOption) -> ProductResult<u64> {
        let (id, product_id) = (input.id, input.product_id);
        let active_model: product_option::ActiveModel = input.into();

        let rows = product_option::Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await?;

        tracing::info!(option_id = %id, product_id = %product_id, "Created product option");
        Ok(rows)
    }

    async fn update(&self, input: ProductOption) -> ProductResult<u64> {
        let (id, product_id) = (input.id, input.product_id);
        let active_model: product_option::ActiveModel = input.into();

        let result = product_option::Entity::update_many()
            .set(active_model)
            .filter(product_option::Column::Id.eq(id))
            .filter(product_option::Column::ProductId.eq(product_id))
            .exec(&self.db)
            .await?;

        tracing::info!(option_id = %id, rows = result.rows_affected, "Updated product option");
        Ok(result.rows_affected)
    }

    async fn delete(&self, product_id: Uuid, option_id: Uuid) -> ProductResult<u64> {
        let result = product_option::Entity::delete_many()
            .filter(product_option::Column::Id.eq(option_id))
            .filter(product_option::Column::ProductId.eq(product_id))
            .exec(&self.db)
            .await?;

        tracing::info!(option_id = %option_id, product_id = %product_id, "Deleted product option");
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn product_model(name: &str) -> product::Model {
        product::Model {
            id: Uuid::now_v7(),
            name: name.to_string(),
            description: "A fine product".to_string(),
            price: Decimal::new(999, 2),
            delivery_price: Decimal::ONE,
        }
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_maps_model() {
        let model = product_model("Widget");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model.clone()]])
            .into_connection();

        let repo = PgProductRepository::new(db);
        let product = repo.get_by_id(model.id).await.unwrap().unwrap();

        assert_eq!(product.name, "Widget");
        assert_eq!(product.price, Decimal::new(999, 2));
    }

    #[tokio::test]
    async fn test_exists_false_when_no_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<product::Model>::new()])
            .into_connection();

        let repo = PgProductRepository::new(db);
        assert!(!repo.exists(Uuid::now_v7()).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(0)])
            .into_connection();

        let repo = PgProductRepository::new(db);
        let rows = repo.update(product_model("Widget").into()).await.unwrap();

        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn test_delete_with_options_runs_in_transaction() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(2), exec(1)])
            .into_connection();

        let repo = PgProductRepository::new(db.clone());
        assert_eq!(repo.delete_with_options(id).await.unwrap(), 3);

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1, "both deletes share one transaction");

        let sql: Vec<&str> = log[0].statements().iter().map(|s| s.sql.as_str()).collect();
        assert_eq!(sql.len(), 4);
        assert_eq!(sql[0], "BEGIN");
        assert!(sql[1].starts_with(r#"DELETE FROM "product_options""#));
        assert!(sql[1].contains(r#""product_options"."product_id" ="#));
        assert!(sql[2].starts_with(r#"DELETE FROM "products""#));
        assert!(sql[2].contains(r#""products"."id" ="#));
        assert_eq!(sql[3], "COMMIT");
    }

    fn logged_sql(db: DatabaseConnection) -> Vec<String> {
        db.into_transaction_log()
            .iter()
            .flat_map(|txn| txn.statements().iter().map(|s| s.sql.clone()))
            .collect()
    }

    fn option_model(product_id: Uuid) -> ProductOption {
        ProductOption {
            id: Uuid::now_v7(),
            product_id,
            name: "Red".to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_option_update_filters_on_id_and_product() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(1)])
            .into_connection();

        let repo = PgProductOptionRepository::new(db.clone());
        let rows = repo.update(option_model(Uuid::now_v7())).await.unwrap();
        assert_eq!(rows, 1);

        let sql = logged_sql(db);
        assert_eq!(sql.len(), 1);
        assert!(sql[0].starts_with(r#"UPDATE "product_options""#));
        assert!(sql[0].contains(r#""product_options"."id" ="#));
        assert!(sql[0].contains(r#""product_options"."product_id" ="#));
    }

    #[tokio::test]
    async fn test_option_delete_filters_on_id_and_product() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(1)])
            .into_connection();

        let repo = PgProductOptionRepository::new(db.clone());
        let rows = repo.delete(Uuid::now_v7(), Uuid::now_v7()).await.unwrap();
        assert_eq!(rows, 1);

        let sql = logged_sql(db);
        assert_eq!(sql.len(), 1);
        assert!(sql[0].starts_with(r#"DELETE FROM "product_options""#));
        assert!(sql[0].contains(r#""product_options"."id" ="#));
        assert!(sql[0].contains(r#""product_options"."product_id" ="#));
    }

    #[tokio::test]
    async fn test_db_errors_surface_as_unhandled() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom(
                "insert or update on table \"product_options\" violates foreign key constraint"
                    .to_string(),
            )])
            .into_connection();

        let repo = PgProductOptionRepository::new(db);
        let err = repo
            .create(option_model(Uuid::now_v7()))
            .await
            .unwrap_err();

        assert!(matches!(err, ProductError::Unhandled(msg) if msg.contains("foreign key")));
    }

    #[tokio::test]
    async fn test_list_for_product_maps_models() {
        let product_id = Uuid::now_v7();
        let option = product_option::Model {
            id: Uuid::now_v7(),
            product_id,
            name: "Red".to_string(),
            description: "Bright red".to_string(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![option.clone()]])
            .into_connection();

        let repo = PgProductOptionRepository::new(db);
        let options = repo.list_for_product(product_id).await.unwrap();

        assert_eq!(options.len(), 1);
        assert_eq!(options[0].product_id, product_id);
        assert_eq!(options[0].description, "Bright red");
    }
}
