// src/clients/storage.rs

use chrono::Utc;
use uuid::Uuid;

use crate::common::error::AppError;

// Tipo do objeto enviado; define content-type e a pasta no bucket.
#[derive(Debug, Clone, Copy)]
pub enum UploadKind {
    Image,
    Pdf,
}

impl UploadKind {
    pub fn content_type(self) -> &'static str {
        match self {
            UploadKind::Image => "image/jpeg",
            UploadKind::Pdf => "application/pdf",
        }
    }

    fn folder(self) -> &'static str {
        match self {
            UploadKind::Image => "",
            UploadKind::Pdf => "contratos/",
        }
    }
}

// Cliente fino para o bucket de objetos (API compatível com GCS).
// Os objetos são públicos para leitura; a URL retornada vai direto ao banco.
#[derive(Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    api_url: String,
    bucket: String,
    token: String,
    base_path: String,
}

impl StorageClient {
    pub fn new(api_url: String, bucket: String, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            bucket,
            token,
            base_path: "aluguelapp/".to_string(),
        }
    }

    // Nome do objeto: pasta + uuid + data do dia, como o app sempre gerou.
    fn object_name(&self, kind: UploadKind) -> String {
        format!(
            "{}{}{}{}",
            self.base_path,
            kind.folder(),
            Uuid::new_v4().simple(),
            Utc::now().date_naive()
        )
    }

    pub async fn upload(&self, bytes: Vec<u8>, kind: UploadKind) -> Result<String, AppError> {
        let object_name = self.object_name(kind);
        let upload_url = format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.api_url, self.bucket, object_name
        );

        let response = self
            .http
            .post(&upload_url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, kind.content_type())
            .body(bytes)
            .send()
            .await
            .map_err(|e| AppError::StorageUpload(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::StorageUpload(format!(
                "o storage respondeu {}",
                response.status()
            )));
        }

        Ok(format!(
            "https://storage.googleapis.com/{}/{}",
            self.bucket, object_name
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_vai_para_a_pasta_de_contratos() {
        let client = StorageClient::new(
            "https://storage.example.com".to_string(),
            "e-aluguel".to_string(),
            "token".to_string(),
        );
        let name = client.object_name(UploadKind::Pdf);
        assert!(name.starts_with("aluguelapp/contratos/"));
    }

    #[test]
    fn imagem_fica_na_raiz_do_prefixo() {
        let client = StorageClient::new(
            "https://storage.example.com".to_string(),
            "e-aluguel".to_string(),
            "token".to_string(),
        );
        let name = client.object_name(UploadKind::Image);
        assert!(name.starts_with("aluguelapp/"));
        assert!(!name.contains("contratos"));
    }
}
