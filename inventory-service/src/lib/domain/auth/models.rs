use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::validation::required_text;
use crate::domain::validation::ValidationErrors;

/// Raw login credentials that passed the blank checks.
///
/// The username is deliberately not parsed into a [`Username`] here: a malformed
/// username must fail like an unknown one.
#[derive(Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl LoginCommand {
    /// # Errors
    /// Field errors for a missing or blank `username` or `password`
    pub fn parse(
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let username = required_text(&mut errors, "username", username);
        let password = required_text(&mut errors, "password", password);

        match (username, password) {
            (Some(username), Some(password)) => Ok(Self { username, password }),
            _ => Err(errors),
        }
    }
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in_ms: i64,
    pub username: String,
}

impl LoginResult {
    pub const TOKEN_TYPE: &'static str = "Bearer";
}

/// The caller behind a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub user_id: UserId,
    pub username: Username,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_blank_fields() {
        let errors = LoginCommand::parse(Some("  ".to_string()), None).unwrap_err();
        assert!(errors.has_field("username"));
        assert!(errors.has_field("password"));
    }

    #[test]
    fn test_parse_keeps_credentials_verbatim() {
        let command =
            LoginCommand::parse(Some(" alice ".to_string()), Some(" pw 1 ".to_string())).unwrap();
        assert_eq!(command.username, " alice ");
        assert_eq!(command.password, " pw 1 ");
        assert!(!format!("{:?}", command).contains("pw 1"));
    }
}
