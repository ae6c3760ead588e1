//! Storage accessor for the `employees` table.
//!
//! Errors are handed back as the raw [`DbErr`]; callers decide how to present
//! them.

use entity::employees;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, PaginatorTrait, QueryOrder, Set,
};

/// An employee that has passed validation but has no id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub position: String,
}

/// Every employee, oldest first.
pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<employees::Model>, DbErr> {
    employees::Entity::find()
        .order_by_asc(employees::Column::Id)
        .all(db)
        .await
}

/// Insert one row and return it with the id the store assigned.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    employee: NewEmployee,
) -> Result<employees::Model, DbErr> {
    employees::ActiveModel {
        id: NotSet,
        name: Set(employee.name),
        position: Set(employee.position),
    }
    .insert(db)
    .await
}

pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    employees::Entity::find().count(db).await
}

#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{Database, DatabaseConnection};

    use super::*;

    async fn migrated() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    fn new_employee(name: &str, position: &str) -> NewEmployee {
        NewEmployee {
            name: name.into(),
            position: position.into(),
        }
    }

    #[tokio::test]
    async fn empty_table_lists_nothing() {
        let db = migrated().await;
        assert!(list_all(&db).await.unwrap().is_empty());
        assert_eq!(count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_and_lists_in_insertion_order() {
        let db = migrated().await;
        let ada = insert(&db, new_employee("Ada Lovelace", "Engineer"))
            .await
            .unwrap();
        let grace = insert(&db, new_employee("Grace Hopper", "Rear Admiral"))
            .await
            .unwrap();

        assert_eq!(ada.id, 1);
        assert_eq!(grace.id, 2);
        assert_eq!(ada.name, "Ada Lovelace");
        assert_eq!(ada.position, "Engineer");

        let all = list_all(&db).await.unwrap();
        assert_eq!(all, vec![ada, grace]);
        assert_eq!(count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn missing_table_surfaces_the_store_error() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let err = insert(&db, new_employee("Ada", "Engineer"))
            .await
            .expect_err("insert without schema must fail");
        assert!(err.to_string().contains("no such table"));
        assert!(list_all(&db).await.is_err());
    }
}
