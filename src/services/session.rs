//! Session service
//!
//! Owns the process-wide session: who is logged in, if anyone. Every
//! transition that succeeds is persisted through the [`IdentityStore`] so a
//! restart can pick the session back up via [`SessionService::restore_session`].

use tracing::{info, warn};

use crate::audit::{AuditEntry, AuditLogger, Operation};
use crate::error::PaySphereResult;
use crate::models::Principal;
use crate::storage::seed;
use crate::storage::IdentityStore;

use super::auth::{CredentialVerifier, SignupForm};

/// Current authentication state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(Principal),
}

/// Result of reading the persisted session at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored(Principal),
    /// Nothing persisted, or a previous logout cleared it
    Absent,
    /// The store could not be read; the session stays logged out
    Degraded { reason: String },
}

impl RestoreOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, Self::Restored(_))
    }
}

/// Login, signup and logout over an identity store
pub struct SessionService<I> {
    identity: I,
    verifier: CredentialVerifier,
    /// The account login resolves to, and the template signups copy
    account: Principal,
    state: SessionState,
    audit: Option<AuditLogger>,
}

impl<I: IdentityStore> SessionService<I> {
    /// Create a logged-out service for the demo account.
    ///
    /// Nothing is read from `identity` until [`restore_session`] is called.
    ///
    /// [`restore_session`]: Self::restore_session
    pub fn new(identity: I, verifier: CredentialVerifier) -> Self {
        Self {
            identity,
            verifier,
            account: seed::demo_principal(),
            state: SessionState::LoggedOut,
            audit: None,
        }
    }

    /// Write session transitions to `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The logged-in principal, if any
    pub fn current(&self) -> Option<&Principal> {
        match &self.state {
            SessionState::LoggedIn(principal) => Some(principal),
            SessionState::LoggedOut => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    /// Log in with the account's email and password.
    ///
    /// On a credential mismatch the state is left as it was and the error
    /// does not say which field was wrong. If the principal cannot be
    /// persisted the login fails as a whole.
    pub fn login(&mut self, email: &str, password: &str) -> PaySphereResult<Principal> {
        if let Err(e) = self.verifier.verify(email, password) {
            warn!("Login failed: invalid credentials");
            return Err(e);
        }

        let principal = self.account.clone();
        self.identity.save(&principal)?;
        self.state = SessionState::LoggedIn(principal.clone());

        info!(principal = %principal.id, "Logged in");
        self.audit(AuditEntry::session(
            Operation::Login,
            principal.id.to_string(),
            Some(principal.email.clone()),
        ));
        Ok(principal)
    }

    /// Create a new principal from the account template and log it in.
    ///
    /// Name and email are stored exactly as given. Input is not validated
    /// here and existing emails are not checked; use
    /// [`signup_with_form`](Self::signup_with_form) for validated input. The
    /// password is accepted but never stored. Only a persistence failure
    /// can make this fail.
    pub fn signup(
        &mut self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> PaySphereResult<Principal> {
        let principal = Principal::from_template(&self.account, name, email);
        self.identity.save(&principal)?;
        self.state = SessionState::LoggedIn(principal.clone());

        info!(principal = %principal.id, "Signed up");
        self.audit(AuditEntry::session(
            Operation::Signup,
            principal.id.to_string(),
            Some(principal.email.clone()),
        ));
        Ok(principal)
    }

    /// Validate the form, then sign up with its fields
    pub fn signup_with_form(&mut self, form: &SignupForm) -> PaySphereResult<Principal> {
        form.validate()?;
        self.signup(&form.name, &form.email, &form.password)
    }

    /// Log out and clear the persisted principal.
    ///
    /// The in-memory state is logged out even if clearing the store fails.
    /// Logging out while already logged out is a no-op and does not touch
    /// the store.
    pub fn logout(&mut self) -> PaySphereResult<()> {
        let SessionState::LoggedIn(principal) = std::mem::take(&mut self.state) else {
            return Ok(());
        };
        self.identity.clear()?;

        info!(principal = %principal.id, "Logged out");
        self.audit(AuditEntry::session(
            Operation::Logout,
            principal.id.to_string(),
            Some(principal.email),
        ));
        Ok(())
    }

    /// Adopt whatever session was persisted before the last shutdown.
    ///
    /// A store that cannot be read degrades to logged out rather than failing.
    pub fn restore_session(&mut self) -> RestoreOutcome {
        match self.identity.load() {
            Ok(Some(principal)) => {
                info!(principal = %principal.id, "Session restored");
                self.state = SessionState::LoggedIn(principal.clone());
                RestoreOutcome::Restored(principal)
            }
            Ok(None) => {
                self.state = SessionState::LoggedOut;
                RestoreOutcome::Absent
            }
            Err(e) => {
                warn!(error = %e, "Session could not be restored");
                self.state = SessionState::LoggedOut;
                RestoreOutcome::Degraded {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            logger.log_or_warn(&entry);
        }
    }
}
