// src/clients/mail.rs

use serde::Serialize;

use crate::common::error::AppError;

#[derive(Debug, Serialize)]
struct ResetPasswordMail<'a> {
    email: &'a str,
    token: &'a str,
}

// Cliente do serviço de e-mail transacional (redefinição de senha).
#[derive(Clone)]
pub struct MailClient {
    http: reqwest::Client,
    api_url: String,
}

impl MailClient {
    pub fn new(api_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
        }
    }

    pub async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(&self.api_url)
            .json(&ResetPasswordMail { email, token })
            .send()
            .await
            .map_err(|_| AppError::EmailSendFailure)?;

        if !response.status().is_success() {
            return Err(AppError::EmailSendFailure);
        }
        Ok(())
    }
}
