//! Sign-in / sign-up flow as a tagged-variant state machine.
//!
//! The identity provider performs the actual checks; this machine only
//! tracks which screen is showing and validates local input before the
//! provider is called.
//!
//! Transition table:
//!
//! | from                 | event                                   | to        |
//! |----------------------|-----------------------------------------|-----------|
//! | Entry                | EmailSubmitted                          | Password  |
//! | Entry                | OAuthCompleted                          | Complete  |
//! | Password { New }     | PasswordAccepted { needs_verification } | Verify    |
//! | Password { New }     | PasswordAccepted { .. }                 | Welcome   |
//! | Password { Existing }| PasswordAccepted { .. }                 | Complete  |
//! | Password             | Back                                    | Entry     |
//! | Verify               | Back                                    | Password  |
//! | Verify               | CodeVerified                            | Welcome   |
//! | Welcome              | WelcomeDismissed                        | Complete  |
//! | any                  | AlreadySignedIn                         | Complete  |

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum password length accepted before calling the provider.
pub const MIN_PASSWORD_CHARS: usize = 6;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Whether the provider already knows the submitted email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserKind {
    New,
    Existing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum AuthStep {
    Entry,
    Password { user: UserKind },
    Verify,
    Welcome,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// Provider lookup finished for `email`.
    EmailSubmitted { email: String, exists: bool },
    /// Provider accepted the credentials.
    PasswordAccepted { needs_verification: bool },
    CodeVerified,
    WelcomeDismissed,
    OAuthCompleted,
    AlreadySignedIn,
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFlowError {
    InvalidEmail(String),
    PasswordTooShort { min: usize },
    PasswordMismatch,
    InvalidTransition { step: AuthStep, event: &'static str },
}

impl Display for AuthFlowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(value) => write!(f, "invalid email: `{value}`"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordMismatch => write!(f, "passwords don't match"),
            Self::InvalidTransition { step, event } => {
                write!(f, "event `{event}` is not valid in step {step:?}")
            }
        }
    }
}

impl Error for AuthFlowError {}

/// Checks an email address shape before contacting the provider.
pub fn validate_email(email: &str) -> Result<(), AuthFlowError> {
    if EMAIL_RE.is_match(email.trim()) {
        Ok(())
    } else {
        Err(AuthFlowError::InvalidEmail(email.to_string()))
    }
}

/// Auth screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFlow {
    step: AuthStep,
    email: Option<String>,
}

impl Default for AuthFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthFlow {
    pub fn new() -> Self {
        Self {
            step: AuthStep::Entry,
            email: None,
        }
    }

    pub fn step(&self) -> &AuthStep {
        &self.step
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.step == AuthStep::Complete
    }

    /// Validates password input for the current step.
    ///
    /// New users must repeat the password; existing users pass `None`.
    pub fn check_password(
        &self,
        password: &str,
        confirm: Option<&str>,
    ) -> Result<(), AuthFlowError> {
        let user = match self.step {
            AuthStep::Password { user } => user,
            _ => return Err(self.invalid("check_password")),
        };
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AuthFlowError::PasswordTooShort {
                min: MIN_PASSWORD_CHARS,
            });
        }
        if user == UserKind::New && confirm != Some(password) {
            return Err(AuthFlowError::PasswordMismatch);
        }
        Ok(())
    }

    /// Applies one event and returns the new step.
    pub fn apply(&mut self, event: AuthEvent) -> Result<&AuthStep, AuthFlowError> {
        let next = match (&self.step, event) {
            (_, AuthEvent::AlreadySignedIn) => AuthStep::Complete,
            (AuthStep::Entry, AuthEvent::EmailSubmitted { email, exists }) => {
                validate_email(&email)?;
                self.email = Some(email.trim().to_string());
                AuthStep::Password {
                    user: if exists {
                        UserKind::Existing
                    } else {
                        UserKind::New
                    },
                }
            }
            (AuthStep::Entry, AuthEvent::OAuthCompleted) => AuthStep::Complete,
            (
                AuthStep::Password {
                    user: UserKind::New,
                },
                AuthEvent::PasswordAccepted { needs_verification },
            ) => {
                if needs_verification {
                    AuthStep::Verify
                } else {
                    AuthStep::Welcome
                }
            }
            (
                AuthStep::Password {
                    user: UserKind::Existing,
                },
                AuthEvent::PasswordAccepted { .. },
            ) => AuthStep::Complete,
            (AuthStep::Password { .. }, AuthEvent::Back) => {
                self.email = None;
                AuthStep::Entry
            }
            // Only new users reach Verify; the email stays filled in.
            (AuthStep::Verify, AuthEvent::Back) => AuthStep::Password {
                user: UserKind::New,
            },
            (AuthStep::Verify, AuthEvent::CodeVerified) => AuthStep::Welcome,
            (AuthStep::Welcome, AuthEvent::WelcomeDismissed) => AuthStep::Complete,
            (_, event) => return Err(self.invalid(event_name(&event))),
        };
        self.step = next;
        Ok(&self.step)
    }

    fn invalid(&self, event: &'static str) -> AuthFlowError {
        AuthFlowError::InvalidTransition {
            step: self.step.clone(),
            event,
        }
    }
}

fn event_name(event: &AuthEvent) -> &'static str {
    match event {
        AuthEvent::EmailSubmitted { .. } => "email_submitted",
        AuthEvent::PasswordAccepted { .. } => "password_accepted",
        AuthEvent::CodeVerified => "code_verified",
        AuthEvent::WelcomeDismissed => "welcome_dismissed",
        AuthEvent::OAuthCompleted => "oauth_completed",
        AuthEvent::AlreadySignedIn => "already_signed_in",
        AuthEvent::Back => "back",
    }
}
