//! CLI runner - executes commands

use crate::auth::{CredentialProvider, SessionCredentials, StaticToken};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::AppConfig;
use crate::context::StoreContext;
use crate::error::Result;
use crate::resource::{Identified, ResourceDef};
use crate::store::FetchOutcome;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let context = self.context()?;
        match &self.cli.command {
            Commands::Resources => self.resources(&context),
            Commands::List {
                resource,
                page,
                limit,
                more,
            } => self.list(&context, resource, *page, *limit, *more).await,
            Commands::Recent { limit } => self.recent(&context, *limit).await,
            Commands::Project { id } => self.project(&context, id).await,
        }
    }

    /// Build config and credentials from files, environment and flags
    fn context(&self) -> Result<StoreContext> {
        let mut config = AppConfig::load(self.cli.config.as_deref())?;
        if let Some(ref url) = self.cli.api_url {
            config.api_url.clone_from(url);
        }

        let credentials: Arc<dyn CredentialProvider> = match (&self.cli.token, &config.token_file)
        {
            (Some(token), _) => Arc::new(StaticToken::new(token.clone())),
            (None, Some(path)) => Arc::new(SessionCredentials::with_token_file(path)),
            (None, None) => Arc::new(SessionCredentials::new()),
        };

        StoreContext::new(config, credentials)
    }

    fn resources(&self, context: &StoreContext) -> Result<()> {
        let resources = context.config().resources();
        match self.cli.format {
            OutputFormat::Json => print_json(&resources),
            OutputFormat::Pretty => {
                for def in &resources {
                    println!("{}", describe(def));
                }
                Ok(())
            }
        }
    }

    async fn list(
        &self,
        context: &StoreContext,
        name: &str,
        page: u32,
        limit: Option<u32>,
        more: u32,
    ) -> Result<()> {
        let store = context.paginated::<Value>(name)?;
        let limit = limit.unwrap_or(store.resource().default_limit);

        info!("Fetching {} page {} (limit {})", name, page, limit);
        store.try_fetch_page(page, limit).await?;

        for _ in 0..more {
            if store.try_load_more().await? == FetchOutcome::Skipped {
                info!("No more pages of {}", name);
                break;
            }
        }

        let state = store.state();
        match self.cli.format {
            OutputFormat::Json => print_json(&json!({
                "resource": name,
                "current_page": state.current_page,
                "total_pages": state.total_pages,
                "items": state.items,
            })),
            OutputFormat::Pretty => {
                println!(
                    "{}: page {}/{}, {} items",
                    store.resource().label,
                    state.current_page,
                    state.total_pages,
                    state.items.len()
                );
                for item in &state.items {
                    println!("  {:<26} {}", item.key(), headline(item));
                }
                Ok(())
            }
        }
    }

    async fn recent(&self, context: &StoreContext, limit: Option<u32>) -> Result<()> {
        let store = &context.recent_testimonials;
        let limit = limit.unwrap_or(store.resource().default_limit);
        store.try_fetch(limit).await?;

        let state = store.state();
        match self.cli.format {
            OutputFormat::Json => print_json(&state.items),
            OutputFormat::Pretty => {
                for t in &state.items {
                    let rating = "*".repeat(t.rating.clamp(0.0, 5.0).round() as usize);
                    println!("{} {:<5} {}", t.name, rating, t.content);
                }
                Ok(())
            }
        }
    }

    async fn project(&self, context: &StoreContext, id: &str) -> Result<()> {
        let store = &context.project_details;
        store.try_fetch(id).await?;

        let Some(project) = store.state().item else {
            return Ok(());
        };
        match self.cli.format {
            OutputFormat::Json => print_json(&project),
            OutputFormat::Pretty => {
                println!("{} ({})", project.title, project.key());
                println!("{}", project.description);
                if !project.technologies.is_empty() {
                    println!("tech: {}", project.technologies.join(", "));
                }
                if let Some(link) = project.demo_link() {
                    println!("demo: {link}");
                }
                if let Some(link) = project.source_link() {
                    println!("code: {link}");
                }
                Ok(())
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn describe(def: &ResourceDef) -> String {
    let auth = if def.requires_auth { " (auth)" } else { "" };
    format!(
        "{:<22} /{:<24} key={} limit={}{}",
        def.name, def.path, def.response_key, def.default_limit, auth
    )
}

/// Best human-readable field of an untyped record
fn headline(item: &Value) -> &str {
    ["title", "name", "email"]
        .iter()
        .find_map(|field| item.get(*field).and_then(Value::as_str))
        .unwrap_or_default()
}
