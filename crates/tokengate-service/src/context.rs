//! Request context carrying the validated claims of the caller.

use uuid::Uuid;

use tokengate_auth::Claims;
use tokengate_entity::{Role, Scope};

/// Context for the current authenticated request.
///
/// Built by the HTTP layer once the bearer token has been validated and
/// passed into service methods so that every operation knows who is acting
/// and with which capabilities. Role and scopes are the ones embedded in the
/// token, not re-read from storage.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Validated token claims.
    pub claims: Claims,
    /// Caller key the request was rate limited under.
    pub client: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(claims: Claims, client: impl Into<String>) -> Self {
        Self {
            claims,
            client: client.into(),
        }
    }

    /// The authenticated user's ID.
    pub fn user_id(&self) -> Uuid {
        self.claims.sub
    }

    /// Role carried by the token.
    pub fn role(&self) -> Role {
        self.claims.role
    }

    /// Scopes carried by the token.
    pub fn scopes(&self) -> &[Scope] {
        &self.claims.scopes
    }
}
