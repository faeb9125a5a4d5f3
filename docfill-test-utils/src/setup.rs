/// Builds a [`TestContext`](crate::TestContext) with database tables created
///
/// Without arguments every docfill table is created, otherwise only the tables of the
/// provided entities.
///
/// ```ignore
/// let mut test = test_setup_with_tables!()?;
/// let test = test_setup_with_tables!(entity::prelude::AppUser)?;
/// ```
#[macro_export]
macro_rules! test_setup_with_tables {
    // Pattern 1: No entities provided
    () => {{
        $crate::TestBuilder::new()
            .with_docfill_tables()
            .build()
            .await
    }};

    // Pattern 2: Entities provided
    ($($entity:expr),+ $(,)?) => {{
        $crate::TestBuilder::new()
            $(.with_table($entity))+
            .build()
            .await
    }};
}
