//! Resource definitions and models
//!
//! A [`ResourceDef`] says where a collection lives on the backend and how
//! its responses are keyed. The models are the record types the dashboard
//! lists; stores never look inside them beyond [`Identified::key`].

mod models;
mod types;

pub use models::{BlogPost, Category, Identified, Project, RecordId, Testimonial, User};
pub use types::{names, ResourceDef, DEFAULT_PAGE_LIMIT, DEFAULT_RECENT_LIMIT};
