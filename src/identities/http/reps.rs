use semval::context::Context as ValidationContext;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    identities::domain::{email::EmailInvalidity, users::NewUserData, users::NewUserInvalidity},
    models,
    passwords::PasswordInvalidity,
};

#[derive(Deserialize)]
pub struct NewUserRequest {
    #[serde(default)]
    id: Option<Uuid>,
    email: String,
    password: String,
}

impl From<NewUserRequest> for NewUserData {
    fn from(rep: NewUserRequest) -> Self {
        Self {
            id: rep.id,
            email: rep.email,
            password: rep.password,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "isFirstLogin")]
    pub is_first_login: bool,
}

impl User {
    pub fn first_login(user: &models::User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_first_login: true,
        }
    }

    pub fn returning(user: &models::User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_first_login: false,
        }
    }
}

#[derive(Serialize)]
pub struct NewUserResponse {
    pub status: &'static str,
    pub user: User,
}

#[derive(Default, Serialize)]
pub struct NewUserValidationError {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    email: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    password: Vec<String>,
}

impl From<ValidationContext<NewUserInvalidity>> for NewUserValidationError {
    fn from(validation: ValidationContext<NewUserInvalidity>) -> Self {
        let mut response = NewUserValidationError {
            message: "Invalid registration data.".to_owned(),
            ..Default::default()
        };

        for invalidity in validation.into_iter() {
            match invalidity {
                NewUserInvalidity::Email(email_invalidity) => match email_invalidity {
                    EmailInvalidity::MissingDomain => {
                        response.email.push("Email is missing a domain.".to_owned())
                    }
                    EmailInvalidity::MissingSeparator => response
                        .email
                        .push("Email is missing an '@' symbol.".to_owned()),
                },
                NewUserInvalidity::Password(password_invalidity) => match password_invalidity {
                    PasswordInvalidity::Empty => response
                        .password
                        .push("A password is required.".to_owned()),
                    PasswordInvalidity::MaxLength(max) => response.password.push(format!(
                        "Passwords may not contain more than {} characters.",
                        max
                    )),
                },
            }
        }

        response
    }
}
