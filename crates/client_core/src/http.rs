use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    domain::{BlurRadius, Effect, ImagePayload},
    protocol::{IMAGE_FIELD, RADIUS_FIELD},
};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::remote::{interpret_response, RemoteError, RemoteEffectClient};

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("invalid effect service url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("effect service url must be http or https, got `{0}`")]
    UnsupportedScheme(String),
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Talks to the effect service: `POST {base}/{effect}` with a multipart body.
#[derive(Debug, Clone)]
pub struct HttpEffectClient {
    http: Client,
    base_url: Url,
}

impl HttpEffectClient {
    pub fn new(base_url: &str) -> Result<Self, ClientBuildError> {
        Self::with_http(base_url, Client::new())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientBuildError> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_http(base_url, http)
    }

    fn with_http(base_url: &str, http: Client) -> Result<Self, ClientBuildError> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, effect: Effect) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(effect.id());
        }
        url
    }

    async fn post_effect(&self, effect: Effect, form: Form) -> Result<String, RemoteError> {
        let url = self.endpoint(effect);
        debug!(%effect, %url, "posting image to effect service");

        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                warn!(%effect, error = %err, "effect request failed before a response");
                RemoteError::Transport(err.to_string())
            })?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| RemoteError::Transport(err.to_string()))?;

        debug!(
            %effect,
            status = status.as_u16(),
            bytes = body.len(),
            "effect service replied"
        );
        interpret_response(status.as_u16(), &body)
    }
}

pub fn parse_base_url(raw: &str) -> Result<Url, ClientBuildError> {
    let url = Url::parse(raw.trim()).map_err(|source| ClientBuildError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ClientBuildError::UnsupportedScheme(url.scheme().to_string()));
    }
    Ok(url)
}

fn image_form(image: &ImagePayload) -> Result<Form, RemoteError> {
    let mime = mime_guess::from_path(&image.filename).first_or_octet_stream();
    let part = Part::bytes(image.bytes.to_vec())
        .file_name(image.filename.clone())
        .mime_str(mime.essence_str())
        .map_err(|err| RemoteError::Transport(format!("invalid image part: {err}")))?;
    Ok(Form::new().part(IMAGE_FIELD, part))
}

#[async_trait]
impl RemoteEffectClient for HttpEffectClient {
    async fn downscale(&self, image: &ImagePayload) -> Result<String, RemoteError> {
        self.post_effect(Effect::Downscale, image_form(image)?).await
    }

    async fn upscale(&self, image: &ImagePayload) -> Result<String, RemoteError> {
        self.post_effect(Effect::Upscale, image_form(image)?).await
    }

    async fn denoise(&self, image: &ImagePayload) -> Result<String, RemoteError> {
        self.post_effect(Effect::Denoise, image_form(image)?).await
    }

    async fn blur(&self, image: &ImagePayload, radius: BlurRadius) -> Result<String, RemoteError> {
        let form = image_form(image)?.text(RADIUS_FIELD, radius.to_string());
        self.post_effect(Effect::Blur, form).await
    }
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
