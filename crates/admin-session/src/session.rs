//! The session context.

use std::fmt::Display;

use crate::guard::{Access, GuardDecision};
use crate::store::TokenStore;
use crate::{AuthToken, SessionError, TokenKind};

/// Result of a sign-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// There was nothing to sign out of; storage was cleared anyway.
    NoSession,
    /// The server acknowledged the sign-out.
    SignedOut(TokenKind),
    /// The server could not be told; the local session was still cleared.
    SignedOutLocally { kind: TokenKind, reason: String },
}

impl LogoutOutcome {
    /// Where to send the operator afterwards.
    pub fn redirect(&self) -> &'static str {
        match self {
            LogoutOutcome::NoSession => TokenKind::Access.login_route(),
            LogoutOutcome::SignedOut(kind) | LogoutOutcome::SignedOutLocally { kind, .. } => {
                kind.login_route()
            }
        }
    }

    /// Message for the operator, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            LogoutOutcome::NoSession => None,
            LogoutOutcome::SignedOut(_) => Some("Successfully logged out!"),
            LogoutOutcome::SignedOutLocally { .. } => {
                Some("Couldn't reach the server, logged out locally.")
            }
        }
    }
}

/// Owner of the console's auth state.
///
/// Constructed once and handed to whatever needs to read or change the
/// session. Set on login, cleared on logout, read by every guarded view.
#[derive(Debug)]
pub struct SessionContext<S> {
    store: S,
}

impl<S: TokenStore> SessionContext<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store a freshly issued token.
    pub fn login(&mut self, token: AuthToken) -> Result<(), SessionError> {
        self.store.save(token.kind(), token.value())?;
        tracing::info!(kind = %token.kind(), "session started");
        Ok(())
    }

    /// The active token; admin tokens take precedence over access tokens.
    pub fn current(&self) -> Result<Option<AuthToken>, SessionError> {
        for kind in TokenKind::PRECEDENCE {
            if let Some(value) = self.store.load(kind)? {
                match AuthToken::new(value, kind) {
                    Ok(token) => return Ok(Some(token)),
                    Err(_) => tracing::warn!(%kind, "ignoring blank stored token"),
                }
            }
        }
        Ok(None)
    }

    /// The active token, or [`SessionError::NotAuthenticated`].
    pub fn require(&self) -> Result<AuthToken, SessionError> {
        self.current()?.ok_or(SessionError::NotAuthenticated)
    }

    /// Check if a session exists. Storage failures count as signed out.
    pub fn is_authenticated(&self) -> bool {
        self.current_or_none().is_some()
    }

    /// Check if the active session is an admin session.
    pub fn is_admin(&self) -> bool {
        self.current_or_none().is_some_and(|t| t.is_admin())
    }

    /// Decide whether a page may render.
    pub fn guard(&self, access: Access) -> GuardDecision {
        access.decide(self.is_authenticated())
    }

    /// Sign out without notifying a server.
    pub fn logout(&mut self) -> Result<LogoutOutcome, SessionError> {
        self.logout_with(|_| Ok::<(), std::convert::Infallible>(()))
    }

    /// Sign out, telling the server first through `notify`.
    ///
    /// Local state is cleared whatever `notify` returns.
    pub fn logout_with<F, E>(&mut self, notify: F) -> Result<LogoutOutcome, SessionError>
    where
        F: FnOnce(&AuthToken) -> Result<(), E>,
        E: Display,
    {
        let token = match self.current_or_none() {
            Some(token) => token,
            None => {
                self.store.clear_all()?;
                return Ok(LogoutOutcome::NoSession);
            }
        };

        let outcome = match notify(&token) {
            Ok(()) => LogoutOutcome::SignedOut(token.kind()),
            Err(e) => {
                tracing::warn!(error = %e, "remote logout failed, clearing local session");
                LogoutOutcome::SignedOutLocally {
                    kind: token.kind(),
                    reason: e.to_string(),
                }
            }
        };

        self.store.clear_all()?;
        tracing::info!(kind = %token.kind(), "session ended");
        Ok(outcome)
    }

    fn current_or_none(&self) -> Option<AuthToken> {
        self.current()
            .map_err(|e| tracing::warn!(error = %e, "failed to read session token"))
            .ok()
            .flatten()
    }
}
