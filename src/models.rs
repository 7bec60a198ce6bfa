use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// Body returned by the `top-headlines` endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_results: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub articles: Vec<Article>,
    /// Only set when `status` is "error"
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl NewsResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url_to_image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub published_at: String,
}

// The news API sends `null` for missing authors, descriptions and images.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Slash-command payload; also used for the plain redirect query.
#[derive(Debug, Default, Deserialize)]
pub struct SlackRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SlackResponse {
    pub response_type: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Attachment {
    pub author_name: String,
    pub title: String,
    pub title_link: String,
    pub text: String,
    pub image_url: String,
}

impl SlackResponse {
    /// Posts the article to the whole channel rather than just the caller.
    pub fn from_article(article: Article) -> Self {
        Self {
            response_type: "in_channel".to_string(),
            text: article.title.clone(),
            attachments: vec![Attachment {
                author_name: article.author,
                title: article.title,
                title_link: article.url,
                text: article.description,
                image_url: article.url_to_image,
            }],
        }
    }
}
