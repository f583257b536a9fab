//! Credentials and signup form handling
//!
//! Login checks against a single account whose password is held only as an
//! Argon2id PHC hash. The signup form carries raw passwords and is zeroed
//! on drop.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{PaySphereError, PaySphereResult};
use crate::storage::seed;

/// Argon2id with a small memory cost: login runs on the UI thread
fn hasher() -> PaySphereResult<Argon2<'static>> {
    let params = Params::new(8192, 2, 1, None)
        .map_err(|e| PaySphereError::Config(format!("Invalid Argon2 parameters: {}", e)))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Checks login credentials against one known account
#[derive(Debug, Clone)]
pub struct CredentialVerifier {
    /// Compared byte for byte
    email: String,
    /// PHC string
    password_hash: String,
}

impl CredentialVerifier {
    /// Build a verifier, hashing `password` with a fresh salt
    pub fn new(email: &str, password: &str) -> PaySphereResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = hasher()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PaySphereError::Config(format!("Failed to hash password: {}", e)))?
            .to_string();

        Ok(Self {
            email: email.to_string(),
            password_hash,
        })
    }

    /// Verifier for the demo account
    pub fn demo() -> PaySphereResult<Self> {
        Self::new(seed::DEMO_EMAIL, seed::DEMO_PASSWORD)
    }

    /// Succeeds only if both fields match.
    ///
    /// Both checks always run and a mismatch in either yields the same
    /// `Authentication` error.
    pub fn verify(&self, email: &str, password: &str) -> PaySphereResult<()> {
        let parsed = PasswordHash::new(&self.password_hash)
            .map_err(|e| PaySphereError::Storage(format!("Stored password hash is corrupt: {}", e)))?;

        let email_ok = email == self.email;
        let password_ok = hasher()?
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();

        if email_ok && password_ok {
            Ok(())
        } else {
            Err(PaySphereError::invalid_credentials())
        }
    }
}

/// Score a password from 0 (empty) to 4 (strong)
pub fn password_strength(password: &str) -> u8 {
    let len = password.chars().count();
    if len == 0 {
        return 0;
    }
    if len < 6 {
        return 1;
    }
    if len < 8 {
        return 2;
    }

    let lower = password.chars().any(|c| c.is_lowercase());
    let upper = password.chars().any(|c| c.is_uppercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    if lower && upper && digit {
        4
    } else {
        3
    }
}

/// Something of the form `a@b.c` appears in the text
fn looks_like_email(text: &str) -> bool {
    text.char_indices()
        .filter(|(_, c)| *c == '@')
        .any(|(at, _)| {
            let has_local = text[..at]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_whitespace());
            let domain = text[at + 1..]
                .split(char::is_whitespace)
                .next()
                .unwrap_or("");
            let has_dot = domain
                .char_indices()
                .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
            has_local && has_dot
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

/// One failed signup field check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: SignupField,
    pub message: &'static str,
}

/// Raw input from the signup page
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

impl SignupForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Every failed check, in field order
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let mut fail = |field, message| errors.push(FieldError { field, message });

        let name = self.name.trim();
        if name.is_empty() {
            fail(SignupField::Name, "Name is required");
        } else if name.chars().count() < 2 {
            fail(SignupField::Name, "Name must be at least 2 characters");
        }

        let email = self.email.trim();
        if email.is_empty() {
            fail(SignupField::Email, "Email is required");
        } else if !looks_like_email(email) {
            fail(SignupField::Email, "Please enter a valid email");
        }

        if self.password.is_empty() {
            fail(SignupField::Password, "Password is required");
        } else if self.password.chars().count() < 6 {
            fail(SignupField::Password, "Password must be at least 6 characters");
        }

        if self.confirm_password != self.password {
            fail(SignupField::ConfirmPassword, "Passwords do not match");
        }

        errors
    }

    /// All failures collected into one `Validation` error
    pub fn validate(&self) -> PaySphereResult<()> {
        let errors = self.field_errors();
        if errors.is_empty() {
            return Ok(());
        }

        let message = errors
            .iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        Err(PaySphereError::Validation(message))
    }

    pub fn strength(&self) -> u8 {
        password_strength(&self.password)
    }
}
