//! Login against the auth backend.

use serde::{Deserialize, Serialize};

use crate::api::ApiResponse;
use crate::client::HttpClient;
use crate::config::ApiCategory;
use crate::error::ClientError;
use crate::http::HttpMethod;
use crate::options::RequestOptions;
use crate::transport::Transport;

pub const LOGIN_PATH: &str = "/api/user/login";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginParams {
    pub username: String,
    pub password: String,
}

/// Account record returned by a successful login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(rename = "DeletedAt")]
    pub deleted_at: Option<String>,
    pub access_token: String,
    pub aff_code: String,
    pub aff_count: i64,
    pub aff_history_quota: i64,
    pub aff_quota: i64,
    pub display_name: String,
    pub email: String,
    pub github_id: String,
    pub group: String,
    pub id: i64,
    pub inviter_id: i64,
    pub password: String,
    pub quota: i64,
    pub request_count: i64,
    pub role: i64,
    pub status: i64,
    pub telegram_id: String,
    pub used_quota: i64,
    pub username: String,
    pub verification_code: String,
    pub wechat_id: String,
}

/// `POST /api/user/login` on the auth backend.
///
/// Wrong credentials come back as `Ok` with a non-zero `code`.
pub async fn login<T: Transport>(
    client: &HttpClient<T>,
    params: &LoginParams,
) -> Result<ApiResponse<User>, ClientError> {
    let options = RequestOptions::new()
        .api_category(ApiCategory::AUTH)
        .json(params)?;
    client.request_as(HttpMethod::Post, LOGIN_PATH, options).await
}
