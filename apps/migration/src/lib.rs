//! Schema migrations for the Blogicum database.

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_users_table;
mod m20240601_000002_create_categories_table;
mod m20240601_000003_create_posts_table;
mod m20240601_000004_create_comments_table;
mod m20240601_000005_create_index_at_posts;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_users_table::Migration),
            Box::new(m20240601_000002_create_categories_table::Migration),
            Box::new(m20240601_000003_create_posts_table::Migration),
            Box::new(m20240601_000004_create_comments_table::Migration),
            Box::new(m20240601_000005_create_index_at_posts::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_by_name() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 5);
    }
}
