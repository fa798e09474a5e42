use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use super::EntryType;

/// Data provided by a client to create a category.
#[derive(Debug, Deserialize, Validate)]
pub struct NewCategoryData {
    /// Clients generate category IDs, so a missing ID is an error.
    pub id: Option<Uuid>,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Owner of the category. Defaults to the requesting user.
    pub user_id: Option<Uuid>,

    #[serde(rename = "type")]
    pub entry_type: EntryType,

    #[validate(length(max = 32))]
    pub color: Option<String>,
}

/// A validated category owned by a user.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCategory {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub entry_type: EntryType,
    pub color: Option<String>,
}

impl NewCategory {
    pub fn from_data(owner_id: Uuid, data: NewCategoryData) -> Result<Self, ValidationErrors> {
        let mut errors = match data.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let id = match data.id {
            Some(id) if !id.is_nil() => id,
            _ => {
                errors.add("id", ValidationError::new("required"));

                Uuid::nil()
            }
        };

        if !errors.errors().is_empty() {
            return Err(errors);
        }

        Ok(Self {
            id,
            name: data.name.trim().to_owned(),
            user_id: owner_id,
            entry_type: data.entry_type,
            color: data.color,
        })
    }
}

/// Replacement values for a category's mutable fields.
#[derive(Clone, Debug, Deserialize, PartialEq, Validate)]
pub struct CategoryUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 32))]
    pub color: Option<String>,
}
