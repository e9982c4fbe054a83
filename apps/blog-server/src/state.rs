//! Application state - shared across all handlers.

use std::sync::Arc;

use blogicum_core::ports::{
    CategoryRepository, CommentRepository, PasswordService, PostRepository, UserRepository,
};
use blogicum_core::services::{AccountService, CommentService, ListingService, PostService};
use blogicum_infra::InMemoryStore;
use blogicum_infra::database::DatabaseConfig;

#[cfg(feature = "postgres")]
use blogicum_infra::database::{
    DatabaseConnections, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresPostRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub listing: ListingService,
    pub posts: PostService,
    pub comments: CommentService,
    pub accounts: AccountService,
}

/// One implementation of every repository port.
struct Repositories {
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            users: store.clone(),
            categories: store.clone(),
            posts: store.clone(),
            comments: store,
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: &DatabaseConnections) -> Self {
        let db = &connections.main;
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
        }
    }
}

impl AppState {
    /// Build the state on PostgreSQL when configured and reachable, otherwise
    /// on an in-memory store.
    pub async fn new(
        db_config: Option<&DatabaseConfig>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        let repositories = Self::repositories(db_config).await;
        tracing::info!("Application state initialized");
        Self::from_repositories(repositories, passwords)
    }

    /// State backed by `store`.
    pub fn in_memory(store: Arc<InMemoryStore>, passwords: Arc<dyn PasswordService>) -> Self {
        Self::from_repositories(Repositories::in_memory(store), passwords)
    }

    fn from_repositories(repos: Repositories, passwords: Arc<dyn PasswordService>) -> Self {
        Self {
            listing: ListingService::new(
                repos.users.clone(),
                repos.categories.clone(),
                repos.posts.clone(),
            ),
            posts: PostService::new(
                repos.users.clone(),
                repos.categories.clone(),
                repos.posts.clone(),
                repos.comments.clone(),
            ),
            comments: CommentService::new(
                repos.users.clone(),
                repos.categories,
                repos.posts,
                repos.comments,
            ),
            accounts: AccountService::new(repos.users, passwords),
        }
    }

    #[cfg(feature = "postgres")]
    async fn repositories(db_config: Option<&DatabaseConfig>) -> Repositories {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Repositories::in_memory(Arc::new(InMemoryStore::new()));
        };

        match DatabaseConnections::init(config).await {
            Ok(connections) => Repositories::postgres(&connections),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Failed to connect to database. Using in-memory fallback."
                );
                Repositories::in_memory(Arc::new(InMemoryStore::new()))
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(_db_config: Option<&DatabaseConfig>) -> Repositories {
        tracing::info!("Running without postgres feature - using in-memory store");
        Repositories::in_memory(Arc::new(InMemoryStore::new()))
    }
}
