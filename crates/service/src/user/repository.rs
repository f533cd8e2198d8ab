use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use models::user;

use super::domain::User;
use crate::errors::ServiceError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert using the externally issued id as primary key.
    async fn register(&self, user: &User) -> Result<(), ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<User, ServiceError>;
    async fn get_all(&self) -> Result<Vec<User>, ServiceError>;
}

/// SeaORM-backed repository implementation.
/// The connection is shared with the other repositories of the process.
pub struct SeaOrmUserRepository {
    pub db: Arc<DatabaseConnection>,
}

impl SeaOrmUserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self { Self { db } }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn register(&self, user: &User) -> Result<(), ServiceError> {
        user::Entity::insert(user.to_insertable())
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(ServiceError::db)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<User, ServiceError> {
        user::Entity::find_by_id(id.to_string())
            .one(self.db.as_ref())
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("User"))
    }

    async fn get_all(&self) -> Result<Vec<User>, ServiceError> {
        user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(ServiceError::db)
    }
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct State {
        rows: Vec<User>,
        fail_register: bool,
        register_calls: usize,
    }

    #[derive(Default)]
    pub struct MockUserRepository {
        state: Mutex<State>,
    }

    impl MockUserRepository {
        pub fn new() -> Self { Self::default() }

        fn state(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(|e| e.into_inner())
        }

        /// Make `register` fail as a driver error would.
        pub fn set_fail_register(&self, fail: bool) { self.state().fail_register = fail; }

        pub fn register_calls(&self) -> usize { self.state().register_calls }

        pub fn len(&self) -> usize { self.state().rows.len() }

        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn register(&self, user: &User) -> Result<(), ServiceError> {
            let mut st = self.state();
            st.register_calls += 1;
            if st.fail_register {
                return Err(ServiceError::Db("database error".into()));
            }
            if st.rows.iter().any(|u| u.id == user.id) {
                return Err(ServiceError::Db(format!("duplicate key: {}", user.id)));
            }
            st.rows.push(user.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &str) -> Result<User, ServiceError> {
            self.state()
                .rows
                .iter()
                .find(|u| u.id == id)
                .cloned()
                .ok_or_else(|| ServiceError::not_found("User"))
        }

        async fn get_all(&self) -> Result<Vec<User>, ServiceError> {
            Ok(self.state().rows.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, Transaction};

    fn transaction_log(db: Arc<DatabaseConnection>) -> Vec<Transaction> {
        match Arc::try_unwrap(db) {
            Ok(conn) => conn.into_transaction_log(),
            Err(_) => panic!("connection still shared"),
        }
    }

    fn john() -> User {
        User { id: "1".into(), name: "John Doe".into(), email: "john@example.com".into(), role: "user".into() }
    }

    #[tokio::test]
    async fn register_inserts_external_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 1 }])
            .into_connection();
        let repo = SeaOrmUserRepository::new(Arc::new(db));

        repo.register(&john()).await.unwrap();
        assert_eq!(
            transaction_log(repo.db),
            vec![Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"INSERT INTO "users" ("id", "name", "email", "role") VALUES ($1, $2, $3, $4)"#,
                ["1".into(), "John Doe".into(), "john@example.com".into(), "user".into()],
            )]
        );
    }

    #[tokio::test]
    async fn register_surfaces_duplicate_key() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("duplicate key value violates unique constraint".into())])
            .into_connection();
        let repo = SeaOrmUserRepository::new(Arc::new(db));
        assert!(matches!(repo.register(&john()).await, Err(ServiceError::Db(_))));
    }

    #[tokio::test]
    async fn find_by_id_found_and_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![john()], Vec::<User>::new()])
            .into_connection();
        let repo = SeaOrmUserRepository::new(Arc::new(db));

        assert_eq!(repo.find_by_id("1").await.unwrap().name, "John Doe");
        let err = repo.find_by_id("2").await.unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn get_all_maps_rows() {
        let jane = User { id: "2".into(), name: "Jane Doe".into(), email: "jane@example.com".into(), role: "admin".into() };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![john(), jane]])
            .into_connection();
        let repo = SeaOrmUserRepository::new(Arc::new(db));

        let users = repo.get_all().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].role, "admin");
    }

    #[tokio::test]
    async fn get_all_surfaces_driver_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("database error".into())])
            .into_connection();
        let repo = SeaOrmUserRepository::new(Arc::new(db));
        assert!(repo.get_all().await.is_err());
    }

    #[tokio::test]
    async fn repositories_share_one_connection() {
        use crate::product::{ProductRepository, SeaOrmProductRepository};

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![john()]])
                .append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 0 }])
                .into_connection(),
        );
        let users = SeaOrmUserRepository::new(db.clone());
        let products = SeaOrmProductRepository::new(db.clone());

        assert_eq!(users.get_all().await.unwrap().len(), 1);
        assert_eq!(products.delete(3).await.unwrap(), 0);

        drop(users);
        drop(products);
        assert_eq!(transaction_log(db).len(), 2);
    }
}
