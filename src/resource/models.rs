//! Record types served by the backend

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Records with a stable key for rendering lists
pub trait Identified {
    /// Identity of the record
    fn key(&self) -> &str;
}

/// Record identity, flattened into a model
///
/// Read from `_id` or `id`; records carrying both (Mongo documents with
/// virtuals) prefer `_id`. Written back as `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// The identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for RecordId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("id", &self.0)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Keys {
            #[serde(rename = "_id")]
            object_id: Option<String>,
            id: Option<String>,
        }

        let keys = Keys::deserialize(deserializer)?;
        keys.object_id
            .or(keys.id)
            .map(RecordId)
            .ok_or_else(|| serde::de::Error::missing_field("_id"))
    }
}

/// Project category: one slug or several
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    /// Single category
    One(String),
    /// Several categories
    Many(Vec<String>),
}

impl Category {
    /// Check whether the project is filed under `slug`
    pub fn contains(&self, slug: &str) -> bool {
        match self {
            Category::One(c) => c == slug,
            Category::Many(cs) => cs.iter().any(|c| c == slug),
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Many(Vec::new())
    }
}

/// Portfolio project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(flatten)]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub code_url: Option<String>,
}

impl Project {
    /// Public demo link, whichever field the backend filled
    pub fn demo_link(&self) -> Option<&str> {
        self.live_url.as_deref().or(self.demo_url.as_deref())
    }

    /// Source link, whichever field the backend filled
    pub fn source_link(&self) -> Option<&str> {
        self.github_url.as_deref().or(self.code_url.as_deref())
    }
}

/// Dashboard user (admin listing)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Client testimonial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(flatten)]
    pub id: RecordId,
    #[serde(default)]
    pub user: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub content: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(flatten)]
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl Identified for Project {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Identified for User {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Identified for Testimonial {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Identified for BlogPost {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// Untyped records key on `id`, then `_id`
impl Identified for Value {
    fn key(&self) -> &str {
        self.get("id")
            .or_else(|| self.get("_id"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}
