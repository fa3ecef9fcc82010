use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Add entity tables with `with_table()` (or one of the table-set shortcuts), then call
/// `build()` to create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Work};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Work)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the user and refresh token tables.
    pub fn with_auth_tables(self) -> Self {
        self.with_table(User).with_table(RefreshToken)
    }

    /// Adds every table a work and its relations live in.
    ///
    /// Tables added in dependency order:
    /// - User
    /// - Work
    /// - Asset
    /// - Tag
    /// - WorkTag
    /// - Comment
    /// - Favorite
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new()
    ///     .with_work_tables()
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_work_tables(self) -> Self {
        self.with_table(User)
            .with_table(Work)
            .with_table(Asset)
            .with_table(Tag)
            .with_table(WorkTag)
            .with_table(Comment)
            .with_table(Favorite)
    }

    /// Adds every table in the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_work_tables().with_table(RefreshToken)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
