//! Where the asteroid CSV comes from.
//!
//! The pipeline only sees a [`CsvSource`]; the browser build plugs in
//! [`HttpSource`], tests and embedders use [`StaticSource`].

use futures::future::LocalBoxFuture;
use log::{debug, info};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::config::CSV_PATH;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoadError {
    #[error("no browser window available")]
    NoWindow,
    #[error("request for '{path}' failed: {reason}")]
    Network { path: String, reason: String },
    #[error("'{path}' answered with HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("could not read body of '{path}': {reason}")]
    Body { path: String, reason: String },
}

/// Produces the raw CSV text for one pipeline run.
pub trait CsvSource {
    fn fetch(&self) -> LocalBoxFuture<'_, Result<String, LoadError>>;
}

/// Fetches the CSV over HTTP relative to the page.
#[derive(Debug, Clone)]
pub struct HttpSource {
    path: String,
}

impl HttpSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    async fn fetch_text(&self) -> Result<String, LoadError> {
        let window = web_sys::window().ok_or(LoadError::NoWindow)?;
        debug!("Fetching {}", self.path);

        let response = JsFuture::from(window.fetch_with_str(&self.path))
            .await
            .map_err(|e| LoadError::Network {
                path: self.path.clone(),
                reason: describe_js_error(&e),
            })?;
        let response: Response = response.dyn_into().map_err(|e| LoadError::Network {
            path: self.path.clone(),
            reason: describe_js_error(&e),
        })?;

        if !response.ok() {
            return Err(LoadError::Status {
                path: self.path.clone(),
                status: response.status(),
            });
        }

        let body_error = |e: JsValue| LoadError::Body {
            path: self.path.clone(),
            reason: describe_js_error(&e),
        };
        let promise: js_sys::Promise = response.text().map_err(body_error)?;
        let text = JsFuture::from(promise).await.map_err(body_error)?;
        let text = text.as_string().ok_or_else(|| LoadError::Body {
            path: self.path.clone(),
            reason: "body is not text".to_string(),
        })?;

        info!("Loaded {} bytes from {}", text.len(), self.path);
        Ok(text)
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(CSV_PATH)
    }
}

impl CsvSource for HttpSource {
    fn fetch(&self) -> LocalBoxFuture<'_, Result<String, LoadError>> {
        Box::pin(self.fetch_text())
    }
}

/// Serves CSV text that is already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl CsvSource for StaticSource {
    fn fetch(&self) -> LocalBoxFuture<'_, Result<String, LoadError>> {
        let text = self.text.clone();
        Box::pin(async move { Ok(text) })
    }
}

fn describe_js_error(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
