//! Endpoint classes and their request ceilings.

use std::fmt;
use std::time::Duration;

/// A request ceiling: at most `limit` requests per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatePolicy {
    /// Requests admitted per window.
    pub limit: u32,
    /// Window length.
    pub window: Duration,
}

impl RatePolicy {
    /// A policy of `limit` requests per minute.
    pub const fn per_minute(limit: u32) -> Self {
        Self {
            limit,
            window: Duration::from_secs(60),
        }
    }
}

/// Rate-limited endpoint classes. Each has its own budget per caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Service banner and health.
    ServiceInfo,
    /// Account registration.
    Register,
    /// Credential exchange for a token.
    Login,
    /// "Who am I" lookup.
    CurrentIdentity,
    /// Product reads.
    ReadResource,
    /// Product creation and update.
    WriteResource,
    /// Product deletion.
    DeleteResource,
    /// Admin listing of users.
    AdminList,
    /// Admin user deletion and elevation.
    AdminMutate,
}

impl Endpoint {
    /// All endpoint classes.
    pub const ALL: [Endpoint; 9] = [
        Endpoint::ServiceInfo,
        Endpoint::Register,
        Endpoint::Login,
        Endpoint::CurrentIdentity,
        Endpoint::ReadResource,
        Endpoint::WriteResource,
        Endpoint::DeleteResource,
        Endpoint::AdminList,
        Endpoint::AdminMutate,
    ];

    /// The ceiling applied to this endpoint class.
    pub const fn policy(self) -> RatePolicy {
        match self {
            Endpoint::ServiceInfo => RatePolicy::per_minute(100),
            Endpoint::Register => RatePolicy::per_minute(5),
            Endpoint::Login => RatePolicy::per_minute(10),
            Endpoint::CurrentIdentity => RatePolicy::per_minute(50),
            Endpoint::ReadResource => RatePolicy::per_minute(30),
            Endpoint::WriteResource => RatePolicy::per_minute(10),
            Endpoint::DeleteResource => RatePolicy::per_minute(5),
            Endpoint::AdminList => RatePolicy::per_minute(20),
            Endpoint::AdminMutate => RatePolicy::per_minute(5),
        }
    }

    /// Stable name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Endpoint::ServiceInfo => "service_info",
            Endpoint::Register => "register",
            Endpoint::Login => "login",
            Endpoint::CurrentIdentity => "current_identity",
            Endpoint::ReadResource => "read_resource",
            Endpoint::WriteResource => "write_resource",
            Endpoint::DeleteResource => "delete_resource",
            Endpoint::AdminList => "admin_list",
            Endpoint::AdminMutate => "admin_mutate",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
