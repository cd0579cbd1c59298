pub mod endpoints;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{DamError, Result};
use crate::session::Session;

/// HTTP client wrapper for the DAM REST API.
#[derive(Debug, Clone)]
pub struct DamHttpClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl DamHttpClient {
    pub fn new(base_url: &str, session: Session) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Absolute URL for a backend path or an already-absolute file URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.authorization() {
            Some(value) => req.header(reqwest::header::AUTHORIZATION, value),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let resp = self.authorize(req).send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            warn!(status, "request failed");
            return Err(DamError::from_status(status, body));
        }
        Ok(resp)
    }

    /// GET a JSON document without interpreting its shape.
    pub async fn get_value(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let url = self.url(path);
        debug!(%url, ?query, "GET");
        let resp = self.send(self.client.get(&url).query(query)).await?;
        resp.json::<Value>().await.map_err(DamError::Request)
    }

    /// POST a JSON body and decode the JSON reply.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "POST");
        let resp = self.send(self.client.post(&url).json(body)).await?;
        resp.json::<T>().await.map_err(DamError::Request)
    }

    /// PATCH a JSON body and decode the JSON reply.
    pub async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "PATCH");
        let resp = self.send(self.client.patch(&url).json(body)).await?;
        resp.json::<T>().await.map_err(DamError::Request)
    }

    /// POST a multipart form and decode the JSON reply.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "POST multipart");
        let resp = self.send(self.client.post(&url).multipart(form)).await?;
        resp.json::<T>().await.map_err(DamError::Request)
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}
