use thiserror::Error;

use crate::config::AuthSettings;

/// Credentials accepted by the three sign-in gates of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Admin panel login, compared by exact string equality.
    Admin { email: String, password: String },
    /// Reporter sign-in via institutional email suffix.
    InstitutionalEmail { email: String },
    /// One-time passcode entry. Only shape is checked: fixed length, all
    /// digits. There is no real delivery or verification backend.
    Otp { code: String },
}

/// Sign-in rejection. Retryable indefinitely: no lockout, no backoff.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password. Please try again.")]
    InvalidAdminCredentials,
    #[error("Please use your institutional email address ({domain})")]
    NonInstitutionalEmail { domain: String },
    #[error("Please enter a valid {length}-digit OTP")]
    MalformedOtp { length: usize },
}

/// Capability seam for credential checks.
///
/// The engine only ever asks "are these credentials acceptable"; anything
/// resembling real authentication lives behind this trait in an external
/// collaborator.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, credentials: &Credentials) -> bool;
}

/// Demo verifier driven entirely by configuration.
///
/// Reproduces the board's hard-coded gates: one fixed admin credential
/// pair, one institutional email suffix, and an OTP length check.
#[derive(Debug, Clone)]
pub struct FixedCredentialVerifier {
    settings: AuthSettings,
}

impl FixedCredentialVerifier {
    pub fn new(settings: AuthSettings) -> Self {
        Self { settings }
    }

    /// Like [`CredentialVerifier::verify`], but a rejection carries the
    /// message shown to the user.
    pub fn check(&self, credentials: &Credentials) -> Result<(), AuthError> {
        if self.verify(credentials) {
            return Ok(());
        }
        Err(match credentials {
            Credentials::Admin { .. } => AuthError::InvalidAdminCredentials,
            Credentials::InstitutionalEmail { .. } => AuthError::NonInstitutionalEmail {
                domain: self.settings.email_domain.clone(),
            },
            Credentials::Otp { .. } => AuthError::MalformedOtp {
                length: self.settings.otp_length,
            },
        })
    }
}

impl CredentialVerifier for FixedCredentialVerifier {
    fn verify(&self, credentials: &Credentials) -> bool {
        match credentials {
            Credentials::Admin { email, password } => {
                *email == self.settings.admin_email && *password == self.settings.admin_password
            }
            Credentials::InstitutionalEmail { email } => {
                email.ends_with(&self.settings.email_domain)
            }
            Credentials::Otp { code } => {
                code.len() == self.settings.otp_length
                    && code.chars().all(|c| c.is_ascii_digit())
            }
        }
    }
}
