//! Caller identity used to stamp audit columns.

/// Identity of the caller behind the current request.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityService: Send + Sync {
    fn username(&self) -> String;
    fn timezone_offset(&self) -> i32;
    fn token(&self) -> String;
}

/// Identity resolved once per request and passed to the service by value.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RequestIdentity {
    pub username: String,
    pub timezone_offset: i32,
    pub token: String,
}

impl IdentityService for RequestIdentity {
    fn username(&self) -> String { self.username.clone() }

    fn timezone_offset(&self) -> i32 { self.timezone_offset }

    fn token(&self) -> String { self.token.clone() }
}
