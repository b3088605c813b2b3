//! Cloud application market listing on the data backend.

use serde::{Deserialize, Serialize};

use crate::api::{Page, PageParams};
use crate::client::HttpClient;
use crate::error::ClientError;
use crate::http::HttpMethod;
use crate::options::RequestOptions;
use crate::query::Query;
use crate::transport::Transport;

pub const CLOUD_APP_MARKET_PATH: &str = "/parse/classes/models";

/// A model entry in the cloud application market.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudApp {
    #[serde(rename = "objectId")]
    pub object_id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub modelscope_path: String,
    pub modelsize: String,
    pub path: String,
    pub tags: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// `GET /parse/classes/models` on the default backend. Paging parameters
/// come first in the query, followed by `filters` in their own order.
pub async fn cloud_app_market_list<T: Transport>(
    client: &HttpClient<T>,
    page: &PageParams,
    filters: Query,
) -> Result<Page<CloudApp>, ClientError> {
    let mut query = page.to_query();
    query.extend(filters);
    client
        .request_as(
            HttpMethod::Get,
            CLOUD_APP_MARKET_PATH,
            RequestOptions::new().query(query),
        )
        .await
}
