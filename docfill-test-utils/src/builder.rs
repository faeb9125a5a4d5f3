//! Declarative test setup.
//!
//! Tables, fixtures & mock endpoints are queued on the builder and created in `build()`.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, fixtures::factory::FieldSpec, TestContext};

type MockBuilder = Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>;

/// Builder for test environments
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_docfill_tables: bool,

    users: Vec<bool>,                                         // is_admin
    models: Vec<(String, String, Vec<FieldSpec>)>,            // (model, description, fields)
    records: Vec<(String, serde_json::Value)>,                // (model, values)
    access_rules: Vec<(String, Option<i32>, bool, bool)>,     // (model, user_id, read, write)

    mock_builders: Vec<MockBuilder>,
    builder_endpoints: Vec<(serde_json::Value, usize)>,       // (response, expected_requests)
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_docfill_tables: false,
            users: Vec::new(),
            models: Vec::new(),
            records: Vec::new(),
            access_rules: Vec::new(),
            mock_builders: Vec::new(),
            builder_endpoints: Vec::new(),
        }
    }

    /// Creates every docfill table in foreign key order
    pub fn with_docfill_tables(mut self) -> Self {
        self.include_docfill_tables = true;
        self
    }

    /// Creates the table of a single entity
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Inserts a user, users get IDs in insertion order starting at 1
    pub fn with_user(mut self, is_admin: bool) -> Self {
        self.users.push(is_admin);
        self
    }

    pub fn with_model(
        mut self,
        model: impl Into<String>,
        description: impl Into<String>,
        fields: Vec<FieldSpec>,
    ) -> Self {
        self.models.push((model.into(), description.into(), fields));
        self
    }

    /// Inserts a record, records get IDs in insertion order starting at 1
    pub fn with_record(mut self, model: impl Into<String>, values: serde_json::Value) -> Self {
        self.records.push((model.into(), values));
        self
    }

    pub fn with_access(
        mut self,
        model: impl Into<String>,
        user_id: Option<i32>,
        perm_read: bool,
        perm_write: bool,
    ) -> Self {
        self.access_rules
            .push((model.into(), user_id, perm_read, perm_write));
        self
    }

    /// Adds a `POST /docbuilder` endpoint answering with the provided body
    pub fn with_builder_endpoint(mut self, response: serde_json::Value, expected: usize) -> Self {
        self.builder_endpoints.push((response, expected));
        self
    }

    /// Adds a custom mock endpoint to the document server
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut test = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_docfill_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::AppUser),
                schema.create_table_from_entity(entity::prelude::ModelAccess),
                schema.create_table_from_entity(entity::prelude::DataModel),
                schema.create_table_from_entity(entity::prelude::DataField),
                schema.create_table_from_entity(entity::prelude::DataRecord),
                schema.create_table_from_entity(entity::prelude::Attachment),
                schema.create_table_from_entity(entity::prelude::Template),
            ]);
        }

        all_tables.extend(self.tables);
        test.with_tables(all_tables).await?;

        for is_admin in self.users {
            test.user().insert_user(is_admin).await?;
        }

        for (model, description, fields) in self.models {
            test.record()
                .insert_model(&model, &description, fields)
                .await?;
        }

        for (model, values) in self.records {
            test.record().insert_record(&model, values).await?;
        }

        for (model, user_id, perm_read, perm_write) in self.access_rules {
            test.user()
                .insert_access(&model, user_id, perm_read, perm_write)
                .await?;
        }

        // Custom endpoints first so tests can queue an error response before a success
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut test.server));
        }

        for (response, expected) in self.builder_endpoints {
            mocks.push(test.doc_server().create_builder_endpoint(response, expected));
        }

        test.mocks.extend(mocks);

        Ok(test)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
