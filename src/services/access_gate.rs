/// Shared operator secret, compared verbatim. Deliberately weak: no
/// hashing, lockout, or rate limiting. Not a real security boundary.
pub const ADMIN_SECRET: &str = "guesthouseadmin";

pub fn verify_secret(input: &str) -> bool {
    input == ADMIN_SECRET
}

/// Per-visit operator session. Starts unauthenticated; flips on a matching
/// secret; resets when the operator leaves the dashboard. Never persisted.
#[derive(Debug, Default)]
pub struct AdminSession {
    authenticated: bool,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, input: &str) -> bool {
        self.authenticated = verify_secret(input);
        self.authenticated
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}
