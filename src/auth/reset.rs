//! Password-reset flow.
//!
//! A three-stage machine: request a code for a registered email, verify the
//! code, then set a new password. The verification code is a fixed demo value
//! shown to the user on screen; there is no mail delivery. Each stage
//! advances only on successful validation, and `back` returns to the previous
//! stage keeping the email.

use std::time::Duration;

use thiserror::Error;

use crate::{auth::UserDirectory, checkout::is_valid_email};

/// The fixed verification code shown to the user in the demo flow.
pub const DEMO_VERIFICATION_CODE: &str = "123456";

/// Default simulated delay for the emailed-code steps.
pub const STEP_DELAY: Duration = Duration::from_secs(1);

/// Errors reported by the reset flow.
///
/// All of these return control to the form with a message; none of them
/// advance the stage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResetError {
    /// The email field is empty or not address-shaped.
    #[error("Email is invalid")]
    InvalidEmail,

    /// No registered user carries this email.
    #[error("No account found with this email address.")]
    UnknownEmail,

    /// The code is not 6 characters long.
    #[error("Code must be 6 digits")]
    CodeFormat,

    /// The code does not match the issued code.
    #[error("Invalid verification code. Please try again.")]
    CodeMismatch,

    /// The new password is shorter than 6 characters.
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    /// The confirmation does not match the new password.
    #[error("Passwords do not match")]
    ConfirmationMismatch,

    /// The transition does not apply at the current stage.
    #[error("this step is not available at the current stage")]
    WrongStage,
}

/// A discrete step within the reset flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetStage {
    /// Waiting for the account email.
    #[default]
    AwaitingCode,

    /// Waiting for the verification code.
    AwaitingVerification,

    /// Waiting for the new password.
    AwaitingNewPassword,

    /// Password updated; the flow is finished.
    Done,
}

/// The password-reset state machine.
#[derive(Debug, Default)]
pub struct PasswordResetFlow {
    stage: ResetStage,
    email: Option<String>,
    step_delay: Option<Duration>,
}

impl PasswordResetFlow {
    /// Start a fresh flow with the default step delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh flow with a custom step delay. Tests pass
    /// [`Duration::ZERO`].
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            step_delay: Some(delay),
            ..Self::default()
        }
    }

    /// Current stage.
    pub fn stage(&self) -> ResetStage {
        self.stage
    }

    /// The email the flow was requested for, once stage one has passed.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Stage one: request a verification code for `email`.
    ///
    /// # Errors
    ///
    /// - [`ResetError::WrongStage`]: the flow is past this step.
    /// - [`ResetError::InvalidEmail`]: the email is empty or malformed.
    /// - [`ResetError::UnknownEmail`]: no registered user has this email;
    ///   the stage does not change.
    pub async fn submit_email(
        &mut self,
        directory: &UserDirectory,
        email: &str,
    ) -> Result<(), ResetError> {
        if self.stage != ResetStage::AwaitingCode {
            return Err(ResetError::WrongStage);
        }

        let email = email.trim();
        if email.is_empty() || !is_valid_email(email) {
            return Err(ResetError::InvalidEmail);
        }

        tokio::time::sleep(self.step_delay.unwrap_or(STEP_DELAY)).await;

        if directory.find(email).is_none() {
            return Err(ResetError::UnknownEmail);
        }

        tracing::debug!(email, "verification code issued");

        self.email = Some(email.to_owned());
        self.stage = ResetStage::AwaitingVerification;

        Ok(())
    }

    /// Stage two: verify the emailed code.
    ///
    /// # Errors
    ///
    /// - [`ResetError::WrongStage`]: the flow is not at the verification
    ///   step.
    /// - [`ResetError::CodeFormat`]: the code is not 6 characters.
    /// - [`ResetError::CodeMismatch`]: the code does not match; the stage
    ///   does not change.
    pub async fn submit_code(&mut self, code: &str) -> Result<(), ResetError> {
        if self.stage != ResetStage::AwaitingVerification {
            return Err(ResetError::WrongStage);
        }

        let code = code.trim();
        if code.chars().count() != 6 {
            return Err(ResetError::CodeFormat);
        }

        tokio::time::sleep(self.step_delay.unwrap_or(STEP_DELAY)).await;

        if code != DEMO_VERIFICATION_CODE {
            return Err(ResetError::CodeMismatch);
        }

        self.stage = ResetStage::AwaitingNewPassword;

        Ok(())
    }

    /// Stage three: set the new password.
    ///
    /// On success the stored password for the flow's email is overwritten
    /// and the flow is done.
    ///
    /// # Errors
    ///
    /// - [`ResetError::WrongStage`]: the flow is not at the new-password
    ///   step, or the email vanished from the directory mid-flow.
    /// - [`ResetError::PasswordTooShort`]: fewer than 6 characters.
    /// - [`ResetError::ConfirmationMismatch`]: confirmation differs.
    pub fn submit_password(
        &mut self,
        directory: &mut UserDirectory,
        new_password: &str,
        confirmation: &str,
    ) -> Result<(), ResetError> {
        if self.stage != ResetStage::AwaitingNewPassword {
            return Err(ResetError::WrongStage);
        }

        if new_password.trim().is_empty() || new_password.chars().count() < 6 {
            return Err(ResetError::PasswordTooShort);
        }

        if new_password != confirmation {
            return Err(ResetError::ConfirmationMismatch);
        }

        let Some(email) = self.email.as_deref() else {
            return Err(ResetError::WrongStage);
        };

        if !directory.set_password(email, new_password) {
            return Err(ResetError::WrongStage);
        }

        tracing::info!(email, "password reset completed");

        self.stage = ResetStage::Done;

        Ok(())
    }

    /// Return to the previous stage, keeping the email.
    ///
    /// A no-op at the first stage and after completion.
    pub fn back(&mut self) {
        self.stage = match self.stage {
            ResetStage::AwaitingVerification => ResetStage::AwaitingCode,
            ResetStage::AwaitingNewPassword => ResetStage::AwaitingVerification,
            ResetStage::AwaitingCode | ResetStage::Done => self.stage,
        };
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use testresult::TestResult;

    use crate::storage::MemoryStore;

    use super::*;

    fn directory_with_ada() -> UserDirectory {
        let mut directory = UserDirectory::load(Arc::new(MemoryStore::new()));
        if directory
            .register("Ada Lovelace", "ada@example.com", "difference")
            .is_err()
        {
            unreachable!("empty directory cannot reject a first registration");
        }

        directory
    }

    fn flow() -> PasswordResetFlow {
        PasswordResetFlow::with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn unknown_email_keeps_the_stage() {
        let directory = directory_with_ada();
        let mut reset = flow();

        let result = reset.submit_email(&directory, "nobody@example.com").await;

        assert_eq!(result, Err(ResetError::UnknownEmail));
        assert_eq!(reset.stage(), ResetStage::AwaitingCode);
    }

    #[tokio::test]
    async fn known_email_advances_and_records_the_email() -> TestResult {
        let directory = directory_with_ada();
        let mut reset = flow();

        reset.submit_email(&directory, "ada@example.com").await?;

        assert_eq!(reset.stage(), ResetStage::AwaitingVerification);
        assert_eq!(reset.email(), Some("ada@example.com"));

        Ok(())
    }

    #[tokio::test]
    async fn wrong_code_keeps_the_stage() -> TestResult {
        let directory = directory_with_ada();
        let mut reset = flow();
        reset.submit_email(&directory, "ada@example.com").await?;

        assert_eq!(
            reset.submit_code("654321").await,
            Err(ResetError::CodeMismatch)
        );
        assert_eq!(
            reset.submit_code("12345").await,
            Err(ResetError::CodeFormat)
        );
        assert_eq!(reset.stage(), ResetStage::AwaitingVerification);

        Ok(())
    }

    #[tokio::test]
    async fn correct_code_advances() -> TestResult {
        let directory = directory_with_ada();
        let mut reset = flow();
        reset.submit_email(&directory, "ada@example.com").await?;

        reset.submit_code(DEMO_VERIFICATION_CODE).await?;

        assert_eq!(reset.stage(), ResetStage::AwaitingNewPassword);

        Ok(())
    }

    #[tokio::test]
    async fn full_flow_overwrites_the_password() -> TestResult {
        let mut directory = directory_with_ada();
        let mut reset = flow();

        reset.submit_email(&directory, "ada@example.com").await?;
        reset.submit_code(DEMO_VERIFICATION_CODE).await?;
        reset.submit_password(&mut directory, "analytical", "analytical")?;

        assert_eq!(reset.stage(), ResetStage::Done);
        assert!(directory.verify("ada@example.com", "analytical").is_some());
        assert!(directory.verify("ada@example.com", "difference").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn password_rules_are_enforced() -> TestResult {
        let mut directory = directory_with_ada();
        let mut reset = flow();
        reset.submit_email(&directory, "ada@example.com").await?;
        reset.submit_code(DEMO_VERIFICATION_CODE).await?;

        assert_eq!(
            reset.submit_password(&mut directory, "short", "short"),
            Err(ResetError::PasswordTooShort)
        );
        assert_eq!(
            reset.submit_password(&mut directory, "analytical", "analytical2"),
            Err(ResetError::ConfirmationMismatch)
        );
        assert_eq!(reset.stage(), ResetStage::AwaitingNewPassword);

        Ok(())
    }

    #[tokio::test]
    async fn back_returns_one_stage_and_keeps_the_email() -> TestResult {
        let directory = directory_with_ada();
        let mut reset = flow();
        reset.submit_email(&directory, "ada@example.com").await?;

        reset.back();

        assert_eq!(reset.stage(), ResetStage::AwaitingCode);
        assert_eq!(reset.email(), Some("ada@example.com"));

        Ok(())
    }

    #[tokio::test]
    async fn steps_reject_out_of_order_calls() {
        let mut directory = directory_with_ada();
        let mut reset = flow();

        assert_eq!(
            reset.submit_code(DEMO_VERIFICATION_CODE).await,
            Err(ResetError::WrongStage)
        );
        assert_eq!(
            reset.submit_password(&mut directory, "analytical", "analytical"),
            Err(ResetError::WrongStage)
        );
    }
}
