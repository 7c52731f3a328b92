use crate::api::ApiClient;
use crate::types::Session;

pub const DEMO_CREDENTIAL: &str = "9999999999";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Login failed. Please try again.")]
    LoginFailed,
}

/// Raw login form fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub session_id: String,
    pub phone_number: String,
}

impl LoginForm {
    /// Blank fields fall back to the demo credential. No format checks.
    pub fn resolve(&self) -> Session {
        Session {
            session_id: or_demo(&self.session_id),
            phone_number: or_demo(&self.phone_number),
        }
    }

    /// Log in and, on success, adopt the (possibly demo) credentials as the
    /// active session.
    pub async fn submit(&self, api: &ApiClient) -> Result<Session, AuthError> {
        let session = self.resolve();
        api.login(&session.session_id, &session.phone_number)
            .await
            .map_err(|_| AuthError::LoginFailed)?;
        api.session().establish(session.clone());
        Ok(session)
    }
}

fn or_demo(value: &str) -> String {
    if value.trim().is_empty() {
        DEMO_CREDENTIAL.to_string()
    } else {
        value.to_string()
    }
}
