//! Route access decisions.

/// Access level of a console page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Sign-in pages; signed-in operators are sent to the dashboard.
    Public,
    /// Everything behind the login.
    Private,
}

/// What to do with a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

impl Access {
    pub const DASHBOARD: &'static str = "/admin/dashboard";
    pub const LOGIN: &'static str = "/admin/login";

    /// Decide for a request given whether a session exists.
    pub fn decide(&self, authenticated: bool) -> GuardDecision {
        match (self, authenticated) {
            (Access::Public, true) => GuardDecision::Redirect(Self::DASHBOARD),
            (Access::Private, false) => GuardDecision::Redirect(Self::LOGIN),
            _ => GuardDecision::Allow,
        }
    }
}
