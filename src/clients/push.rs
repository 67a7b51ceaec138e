// src/clients/push.rs

use serde::Serialize;

use crate::common::error::AppError;

#[derive(Debug, Serialize)]
struct PushMessage<'a> {
    to: &'a str,
    title: &'a str,
    body: &'a str,
}

// Cliente do serviço de push (formato Expo: to/title/body).
#[derive(Clone)]
pub struct PushClient {
    http: reqwest::Client,
    api_url: String,
}

impl PushClient {
    pub fn new(api_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
        }
    }

    pub async fn send(&self, to: &str, title: &str, body: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(&self.api_url)
            .json(&PushMessage { to, title, body })
            .send()
            .await
            .map_err(|e| AppError::InternalServerError(anyhow::Error::new(e)))?;

        if !response.status().is_success() {
            return Err(AppError::InternalServerError(anyhow::anyhow!(
                "o serviço de push respondeu {}",
                response.status()
            )));
        }
        Ok(())
    }
}
