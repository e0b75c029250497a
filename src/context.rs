//! Store context
//!
//! One [`StoreContext`] owns the HTTP client, the credential provider and a
//! store per dashboard resource. Presentation code is handed the context (or
//! clones of individual stores) instead of reaching for global state.

use crate::auth::CredentialProvider;
use crate::config::AppConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::resource::{names, BlogPost, Project, Testimonial, User};
use crate::store::{DetailStore, PaginatedStore, RecentStore, ResourceFetcher, StoreItem};
use std::sync::Arc;
use tracing::debug;

/// Every store the dashboard uses
#[derive(Debug, Clone)]
pub struct StoreContext {
    config: AppConfig,
    client: Arc<HttpClient>,
    credentials: Arc<dyn CredentialProvider>,

    /// Active projects (public portfolio)
    pub active_projects: PaginatedStore<Project>,
    /// Featured projects (home page)
    pub featured_projects: PaginatedStore<Project>,
    /// Admin user list
    pub users: PaginatedStore<User>,
    /// Approved testimonials
    pub testimonials: PaginatedStore<Testimonial>,
    /// Blog posts
    pub blog_posts: PaginatedStore<BlogPost>,
    /// Latest testimonials for the home page section
    pub recent_testimonials: RecentStore<Testimonial>,
    /// Project detail view
    pub project_details: DetailStore<Project>,
}

impl StoreContext {
    /// Build the client and all stores from `config`
    pub fn new(config: AppConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        config.validate()?;
        let client = Arc::new(HttpClient::with_config(config.http_config())?);
        let fetcher = |name: &str| -> Result<ResourceFetcher> {
            Ok(ResourceFetcher::new(
                config.resource(name)?,
                Arc::clone(&client),
                Arc::clone(&credentials),
            ))
        };

        let active_projects = PaginatedStore::with_fetcher(fetcher(names::PROJECTS)?);
        let featured_projects = PaginatedStore::with_fetcher(fetcher(names::FEATURED_PROJECTS)?);
        let users = PaginatedStore::with_fetcher(fetcher(names::USERS)?);
        let testimonials = PaginatedStore::with_fetcher(fetcher(names::TESTIMONIALS)?);
        let blog_posts = PaginatedStore::with_fetcher(fetcher(names::BLOG_POSTS)?);
        let recent_testimonials = RecentStore::new(fetcher(names::RECENT_TESTIMONIALS)?);
        let project_details = DetailStore::new(fetcher(names::PROJECT)?);

        debug!("Store context ready for {}", config.api_url);
        Ok(Self {
            config,
            client,
            credentials,
            active_projects,
            featured_projects,
            users,
            testimonials,
            blog_posts,
            recent_testimonials,
            project_details,
        })
    }

    /// Configuration the context was built from
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared credential provider
    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    /// New paginated store for any configured resource
    pub fn paginated<T: StoreItem>(&self, name: &str) -> Result<PaginatedStore<T>> {
        Ok(PaginatedStore::new(
            self.config.resource(name)?,
            Arc::clone(&self.client),
            Arc::clone(&self.credentials),
        ))
    }

    /// New recent-list store for any configured resource
    pub fn recent<T: StoreItem>(&self, name: &str) -> Result<RecentStore<T>> {
        Ok(RecentStore::new(ResourceFetcher::new(
            self.config.resource(name)?,
            Arc::clone(&self.client),
            Arc::clone(&self.credentials),
        )))
    }

    /// Fetch the first page of every public list concurrently
    ///
    /// The user list is left alone; it needs a signed-in admin.
    pub async fn load_public(&self) {
        let recent_limit = self.recent_testimonials.resource().default_limit;
        futures::join!(
            self.active_projects.fetch_first(),
            self.featured_projects.fetch_first(),
            self.testimonials.fetch_first(),
            self.blog_posts.fetch_first(),
            self.recent_testimonials.fetch(recent_limit),
        );
    }
}
