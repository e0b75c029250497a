//! Resource descriptors and the built-in table

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not pick one
pub const DEFAULT_PAGE_LIMIT: u32 = 4;

/// Number of items the recent-list endpoints return by default
pub const DEFAULT_RECENT_LIMIT: u32 = 3;

/// Names of the built-in resources
pub mod names {
    /// Active projects
    pub const PROJECTS: &str = "projects";
    /// Featured projects
    pub const FEATURED_PROJECTS: &str = "featured-projects";
    /// Admin user list (authenticated)
    pub const USERS: &str = "users";
    /// Approved testimonials
    pub const TESTIMONIALS: &str = "testimonials";
    /// Blog posts
    pub const BLOG_POSTS: &str = "blog-posts";
    /// Most recent testimonials
    pub const RECENT_TESTIMONIALS: &str = "recent-testimonials";
    /// Single project by id
    pub const PROJECT: &str = "project";

    /// All built-in names, in listing order
    pub const ALL: [&str; 7] = [
        PROJECTS,
        FEATURED_PROJECTS,
        USERS,
        TESTIMONIALS,
        BLOG_POSTS,
        RECENT_TESTIMONIALS,
        PROJECT,
    ];
}

/// Where a resource lives and how to read it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDef {
    /// Identifier used in config and on the command line
    pub name: String,

    /// Plural noun used in user-facing messages (e.g. "featured projects")
    pub label: String,

    /// Path relative to the API base URL
    pub path: String,

    /// Envelope key holding the items
    pub response_key: String,

    /// Whether requests need a bearer token
    #[serde(default)]
    pub requires_auth: bool,

    /// Page size when none is given
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_PAGE_LIMIT
}

impl ResourceDef {
    /// Create an anonymous resource definition
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        path: impl Into<String>,
        response_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            path: path.into(),
            response_key: response_key.into(),
            requires_auth: false,
            default_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Require a bearer token
    #[must_use]
    pub fn authenticated(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Set the default page size
    #[must_use]
    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit.max(1);
        self
    }

    /// Path of one record under this resource
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path.trim_end_matches('/'), id)
    }

    /// Look up a built-in resource by name
    pub fn builtin(name: &str) -> Option<Self> {
        let def = match name {
            names::PROJECTS => Self::new(name, "projects", "projects/active", "projects"),
            names::FEATURED_PROJECTS => {
                Self::new(name, "featured projects", "projects/featured", "projects")
            }
            names::USERS => Self::new(name, "users", "auth/admin/users", "users").authenticated(),
            names::TESTIMONIALS => Self::new(
                name,
                "testimonials",
                "testimonials/approved",
                "testimonials",
            ),
            names::BLOG_POSTS => Self::new(name, "blog posts", "blogs", "blogs"),
            names::RECENT_TESTIMONIALS => Self::new(
                name,
                "testimonials",
                "testimonials/recent",
                "testimonials",
            )
            .with_default_limit(DEFAULT_RECENT_LIMIT),
            names::PROJECT => Self::new(name, "project", "projects", "project"),
            _ => return None,
        };
        Some(def)
    }

    /// Every built-in resource
    pub fn builtins() -> Vec<Self> {
        names::ALL.iter().filter_map(|n| Self::builtin(n)).collect()
    }
}
