//! Authentication module
//!
//! Stores never log users in or out themselves. They ask a
//! [`CredentialProvider`] for a bearer token before calling an
//! authenticated resource and notify it when the server answers 401.
//!
//! Providers: [`NoCredentials`], [`StaticToken`], [`SessionCredentials`].

mod session;
mod types;

pub use session::SessionCredentials;
pub use types::{CredentialProvider, NoCredentials, StaticToken};
