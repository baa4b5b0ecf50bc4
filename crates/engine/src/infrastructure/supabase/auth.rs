//! Bearer-token verification against the hosted identity provider.

use async_trait::async_trait;
use lorekeeper_domain::UserId;
use reqwest::StatusCode;
use serde::Deserialize;

use super::rest::SupabaseClient;
use crate::infrastructure::ports::{AuthError, IdentityPort};

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: UserId,
}

pub struct SupabaseAuth {
    client: SupabaseClient,
}

impl SupabaseAuth {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityPort for SupabaseAuth {
    async fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        let url = format!("{}/auth/v1/user", self.client.base_url());

        let response = self
            .client
            .http()
            .get(url)
            .header("apikey", self.client.service_key())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let user: AuthUser = response
                    .json()
                    .await
                    .map_err(|e| AuthError::Unavailable(format!("unreadable user: {e}")))?;
                Ok(user.id)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::InvalidToken),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AuthError::Unavailable(format!("{status}: {body}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn auth_for(server: &MockServer) -> SupabaseAuth {
        SupabaseAuth::new(SupabaseClient::new(&server.uri(), "service-key"))
    }

    #[tokio::test]
    async fn valid_token_yields_user_id() {
        let server = MockServer::start().await;
        let uuid = Uuid::new_v4();
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .and(header("apikey", "service-key"))
            .and(header("authorization", "Bearer user-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "id": uuid, "email": "gm@example.com" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let user = auth_for(&server)
            .verify_token("user-token")
            .await
            .expect("verify");

        assert_eq!(user, UserId::from_uuid(uuid));
    }

    #[tokio::test]
    async fn rejected_token_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "msg": "bad jwt" })))
            .mount(&server)
            .await;

        let result = auth_for(&server).verify_token("expired").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn provider_failure_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = auth_for(&server).verify_token("whatever").await;

        assert!(matches!(result, Err(AuthError::Unavailable(_))));
    }
}
