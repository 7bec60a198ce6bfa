use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use crate::config::NewsConfig;
use crate::error::Result;
use crate::models::NewsResponse;

/// Anything that can answer a headlines query.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    async fn top_headlines(&self, query: &str) -> Result<NewsResponse>;
}

/// Client for the news API `top-headlines` endpoint
#[derive(Clone)]
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    sources: Vec<String>,
}

impl NewsApiClient {
    pub fn new(config: &NewsConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            sources: config.sources.clone(),
        })
    }

    pub fn top_headlines_url(&self, query: &str) -> String {
        format!(
            "{}/top-headlines?sources={}&q={}&apiKey={}",
            self.base_url,
            self.sources.join(","),
            urlencoding::encode(query),
            self.api_key
        )
    }

    fn masked(&self, url: &str) -> String {
        if self.api_key.is_empty() {
            url.to_string()
        } else {
            url.replace(&self.api_key, "***API_KEY***")
        }
    }
}

#[async_trait]
impl HeadlineSource for NewsApiClient {
    async fn top_headlines(&self, query: &str) -> Result<NewsResponse> {
        let url = self.top_headlines_url(query);
        info!("Fetching top headlines: {}", self.masked(&url));

        let response = self.client.get(&url).send().await?;
        info!("Received response status: {}", response.status());

        // Error statuses still carry a JSON body with the reason.
        let body = response.text().await?;
        debug!("Response body: {}", body);

        NewsResponse::from_json(&body)
    }
}
