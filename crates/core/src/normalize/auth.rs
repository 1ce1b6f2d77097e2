use serde_json::Value;

use super::fields::first_text;
use crate::model::{AuthSession, UserProfile};

const TOKEN_KEYS: &[&str] = &["token", "accessToken", "access_token"];

/// Pull the access token and user out of a login/register response.
///
/// Looks at the top level first, then inside a `data` envelope.
#[must_use]
pub fn extract_auth_session(response: &Value) -> AuthSession {
    let scopes = [Some(response), response.get("data")];
    let scopes = scopes.iter().flatten();

    let access_token = scopes
        .clone()
        .find_map(|scope| first_text(scope, TOKEN_KEYS))
        .filter(|token| !token.trim().is_empty());
    let user = scopes
        .filter_map(|scope| scope.get("user"))
        .find_map(user_profile);

    AuthSession { access_token, user }
}

fn user_profile(record: &Value) -> Option<UserProfile> {
    let full_name = first_text(record, &["fullName", "full_name", "name"]);
    let email = first_text(record, &["email"]);
    if full_name.is_none() && email.is_none() {
        return None;
    }
    Some(UserProfile {
        full_name: full_name.unwrap_or_default(),
        email: email.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn top_level_token_and_user() {
        let session = extract_auth_session(&json!({
            "token": "jwt-1",
            "user": { "fullName": "Nguyễn Văn A", "email": "an@example.com" }
        }));
        assert_eq!(session.access_token.as_deref(), Some("jwt-1"));
        let user = session.user.unwrap();
        assert_eq!(user.full_name, "Nguyễn Văn A");
        assert_eq!(user.email, "an@example.com");
    }

    #[test]
    fn token_inside_data_envelope() {
        let session = extract_auth_session(&json!({
            "message": "ok",
            "data": { "accessToken": "jwt-2", "user": { "email": "b@example.com" } }
        }));
        assert_eq!(session.access_token.as_deref(), Some("jwt-2"));
        assert_eq!(session.user.unwrap().full_name, "");
    }

    #[test]
    fn missing_token_is_none() {
        let session = extract_auth_session(&json!({ "token": "  ", "user": {} }));
        assert_eq!(session, AuthSession::default());
    }
}
