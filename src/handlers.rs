use crate::error::{Error, Result};
use crate::models::{SlackRequest, SlackResponse};
use crate::picker::ArticlePicker;
use axum::{
    Extension, Form,
    extract::rejection::FormRejection,
    http::{StatusCode, header},
    response::{IntoResponse, Json},
};
use tracing::{debug, info, warn};

type FormInput = std::result::Result<Form<SlackRequest>, FormRejection>;

/// An unreadable form is served as an empty query rather than rejected.
fn query_text(input: FormInput) -> String {
    match input {
        Ok(Form(request)) => request.text,
        Err(e) => {
            warn!("Error parsing request data, continuing: {}", e);
            SlackRequest::default().text
        }
    }
}

/// Health check handler
pub async fn health_check() -> &'static str {
    debug!("Health check endpoint called");
    "OK"
}

/// Redirects the caller to a random top article for the `text` query
pub async fn article_redirect(
    Extension(picker): Extension<ArticlePicker>,
    input: FormInput,
) -> Result<impl IntoResponse> {
    let text = query_text(input);
    info!("Redirect endpoint called with query: {:?}", text);

    let article = picker.pick(&text).await?;
    if article.url.trim().is_empty() {
        return Err(Error::MissingUrl {
            title: article.title,
        });
    }

    info!("Redirecting to {}", article.url);
    Ok((StatusCode::FOUND, [(header::LOCATION, article.url)]))
}

/// Slash-command handler
/// Accepts `text` from the query string or a form body and answers with a chat message
pub async fn article_for_slack(
    Extension(picker): Extension<ArticlePicker>,
    input: FormInput,
) -> Result<Json<SlackResponse>> {
    let text = query_text(input);
    info!("Slack endpoint called with query: {:?}", text);

    let article = picker.pick(&text).await?;

    info!("Returning article to Slack: {}", article.title);
    Ok(Json(SlackResponse::from_article(article)))
}
