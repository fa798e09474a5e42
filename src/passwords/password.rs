use std::fmt::Debug;

use semval::prelude::*;

/// Argon2 accepts longer inputs, but anything past this is almost certainly
/// not a real password.
const MAX_PASSWORD_LENGTH: usize = 512;

/// A user's plaintext password.
///
/// Strength is not enforced; any non-empty value up to the maximum length is
/// accepted.
pub struct Password(String);

impl Password {
    /// Construct an unvalidated password so that an enclosing object can be
    /// validated as a whole.
    pub fn unvalidated(password: String) -> Self {
        Self(password)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PasswordInvalidity {
    Empty,
    /// The value exceeds the contained maximum length.
    MaxLength(usize),
}

impl Validate for Password {
    type Invalidity = PasswordInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(self.0.is_empty(), PasswordInvalidity::Empty)
            .invalidate_if(
                self.0.len() > MAX_PASSWORD_LENGTH,
                PasswordInvalidity::MaxLength(MAX_PASSWORD_LENGTH),
            )
            .into()
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"*".repeat(8)).finish()
    }
}
