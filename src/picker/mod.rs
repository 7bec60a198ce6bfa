pub mod chooser;
pub mod client;

pub use chooser::{IndexChooser, SharedRng};
pub use client::{HeadlineSource, NewsApiClient};

use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{Article, NewsResponse};

/// Articles are only ever picked from the head of the ranking.
pub const TOP_ARTICLES: usize = 5;

/// Fetches headlines for a query and picks one of the top articles.
#[derive(Clone)]
pub struct ArticlePicker {
    source: Arc<dyn HeadlineSource>,
    chooser: Arc<dyn IndexChooser>,
}

impl ArticlePicker {
    pub fn new(source: Arc<dyn HeadlineSource>, chooser: Arc<dyn IndexChooser>) -> Self {
        Self { source, chooser }
    }

    pub async fn pick(&self, query: &str) -> Result<Article> {
        let response = self.source.top_headlines(query).await?;
        select_article(response, self.chooser.as_ref())
    }
}

/// Validate an upstream response and pick one of its top articles.
pub fn select_article(response: NewsResponse, chooser: &dyn IndexChooser) -> Result<Article> {
    if response.is_error() {
        warn!(
            code = ?response.code,
            "News API returned an error: {}",
            response.message.as_deref().unwrap_or_default()
        );
        return Err(Error::upstream(response.code, response.message));
    }
    if response.total_results == 0 || response.articles.is_empty() {
        return Err(Error::NoResults);
    }

    // totalResults counts matches upstream, which can exceed the page we got.
    let top = usize::try_from(response.total_results)
        .unwrap_or(usize::MAX)
        .min(TOP_ARTICLES)
        .min(response.articles.len());
    let index = chooser.choose(top);
    debug!("Picked article {} of top {}", index, top);

    response
        .articles
        .into_iter()
        .nth(index)
        .ok_or(Error::NoResults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlackResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed(usize);

    impl IndexChooser for Fixed {
        fn choose(&self, _upper: usize) -> usize {
            self.0
        }
    }

    /// Records the largest `upper` it was asked for.
    #[derive(Default)]
    struct Recording(AtomicUsize);

    impl IndexChooser for Recording {
        fn choose(&self, upper: usize) -> usize {
            self.0.fetch_max(upper, Ordering::SeqCst);
            upper - 1
        }
    }

    struct StaticSource(NewsResponse);

    #[async_trait]
    impl HeadlineSource for StaticSource {
        async fn top_headlines(&self, _query: &str) -> Result<NewsResponse> {
            Ok(self.0.clone())
        }
    }

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            url: format!("https://example.com/{}", title.to_lowercase()),
            ..Default::default()
        }
    }

    fn response(total_results: u64, titles: &[&str]) -> NewsResponse {
        NewsResponse {
            status: "ok".to_string(),
            total_results,
            articles: titles.iter().map(|t| article(t)).collect(),
            code: None,
            message: None,
        }
    }

    #[test]
    fn test_index_bounded_by_top_five() {
        let rng = SharedRng::seeded(1);
        let titles: Vec<String> = (0..20).map(|i| format!("T{i}")).collect();
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();

        for total in 1..=20u64 {
            let len = (total as usize).min(titles.len());
            let allowed: Vec<&str> = titles[..len.min(TOP_ARTICLES)].to_vec();
            for _ in 0..50 {
                let picked = select_article(response(total, &titles[..len]), &rng).unwrap();
                assert!(allowed.contains(&picked.title.as_str()), "{total}: {}", picked.title);
            }
        }
    }

    #[test]
    fn test_upper_bound_uses_total_results() {
        let chooser = Recording::default();
        let picked = select_article(response(3, &["A", "B", "C", "D", "E"]), &chooser).unwrap();
        assert_eq!(chooser.0.load(Ordering::SeqCst), 3);
        assert_eq!(picked.title, "C");
    }

    #[test]
    fn test_upper_bound_uses_article_count() {
        let chooser = Recording::default();
        let picked = select_article(response(100, &["A", "B"]), &chooser).unwrap();
        assert_eq!(chooser.0.load(Ordering::SeqCst), 2);
        assert_eq!(picked.title, "B");
    }

    #[test]
    fn test_no_results() {
        let result = select_article(response(0, &["A"]), &Fixed(0));
        assert!(matches!(result, Err(Error::NoResults)));

        let result = select_article(response(4, &[]), &Fixed(0));
        assert!(matches!(result, Err(Error::NoResults)));
    }

    #[test]
    fn test_error_status_wins_over_articles() {
        let mut resp = response(5, &["A", "B", "C", "D", "E"]);
        resp.status = "error".to_string();
        resp.code = Some("rateLimited".to_string());

        match select_article(resp, &Fixed(0)) {
            Err(Error::Upstream { code, .. }) => assert_eq!(code, "rateLimited"),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_forced_index_maps_into_slack_payload() {
        let source = StaticSource(response(5, &["A", "B", "C", "D", "E"]));
        let picker = ArticlePicker::new(Arc::new(source), Arc::new(Fixed(2)));

        let article = picker.pick("anything").await.unwrap();
        let payload = SlackResponse::from_article(article);
        assert_eq!(payload.text, "C");
        assert_eq!(payload.attachments.len(), 1);
        assert_eq!(payload.attachments[0].title_link, "https://example.com/c");
    }
}
