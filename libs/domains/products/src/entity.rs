//! SeaORM entities for the `products` and `product_options` tables.

pub mod product {
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "products")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub description: String,
        #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
        pub price: Decimal,
        #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
        pub delivery_price: Decimal,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::product_option::Entity")]
        Options,
    }

    impl Related<super::product_option::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Options.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::Product {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                name: model.name,
                description: model.description,
                price: model.price,
                delivery_price: model.delivery_price,
            }
        }
    }

    impl From<crate::models::Product> for ActiveModel {
        fn from(product: crate::models::Product) -> Self {
            ActiveModel {
                id: Set(product.id),
                name: Set(product.name),
                description: Set(product.description),
                price: Set(product.price),
                delivery_price: Set(product.delivery_price),
            }
        }
    }
}

pub mod product_option {
    use sea_orm::ActiveValue::Set;
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "product_options")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub product_id: Uuid,
        pub name: String,
        pub description: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::product::Entity",
            from = "Column::ProductId",
            to = "super::product::Column::Id",
            on_delete = "Cascade"
        )]
        Product,
    }

    impl Related<super::product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::ProductOption {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                product_id: model.product_id,
                name: model.name,
                description: model.description,
            }
        }
    }

    impl From<crate::models::ProductOption> for ActiveModel {
        fn from(option: crate::models::ProductOption) -> Self {
            ActiveModel {
                id: Set(option.id),
                product_id: Set(option.product_id),
                name: Set(option.name),
                description: Set(option.description),
            }
        }
    }
}
