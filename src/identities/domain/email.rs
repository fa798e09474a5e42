use semval::prelude::*;

/// An email address used to identify a user.
#[derive(Debug, Eq, PartialEq)]
pub struct Email(String);

impl Email {
    /// Create an unvalidated email so that an enclosing object can be
    /// validated as a whole.
    pub fn unvalidated(address: String) -> Self {
        Self(address.trim().to_owned())
    }

    pub fn address(&self) -> &str {
        &self.0
    }

    /// The address used for uniqueness and lookups.
    ///
    /// Only the domain of an address is case insensitive, so the local part is
    /// kept as provided. Addresses may contain multiple `@` symbols and the
    /// last one delimits the domain.
    pub fn normalized(&self) -> String {
        match self.0.rsplit_once('@') {
            Some((local_part, domain)) => format!("{}@{}", local_part, domain.to_lowercase()),
            None => self.0.clone(),
        }
    }

    fn has_domain(&self) -> bool {
        matches!(self.0.rsplit_once('@'), Some((_, domain)) if !domain.is_empty())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EmailInvalidity {
    /// The address does not have a domain portion.
    MissingDomain,

    /// The address is missing the `@` symbol separating the local and domain
    /// parts.
    MissingSeparator,
}

impl Validate for Email {
    type Invalidity = EmailInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(!self.0.contains('@'), EmailInvalidity::MissingSeparator)
            .invalidate_if(!self.has_domain(), EmailInvalidity::MissingDomain)
            .into()
    }
}
