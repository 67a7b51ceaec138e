use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// A taxonomia distingue sempre NotFound (entidade ausente, 404) de
// Forbidden (entidade existe mas pertence a outro usuário, 403).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Requisição inválida: {0}")]
    BadRequest(String),

    #[error("Erro ao processar o upload")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Inquilino já cadastrado")]
    TenantAlreadyExists,

    #[error("CPF do fiador já cadastrado")]
    GuarantorAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Refresh token não encontrado")]
    RefreshTokenNotFound,

    #[error("Refresh token já utilizado")]
    RefreshTokenAlreadyUsed,

    #[error("Refresh token expirado")]
    RefreshTokenExpired,

    #[error("Usuário não encontrado")]
    UserNotFound,

    // O nome da entidade entra na mensagem da resposta.
    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    #[error("Usuário não tem permissão para acessar {0}")]
    Forbidden(&'static str),

    #[error("A duração do contrato deve ser de pelo menos 1 mês")]
    ContractDurationTooShort,

    #[error("Erro ao criar as parcelas: {0}")]
    InstallmentCreation(String),

    #[error("Contrato incompleto: {0}")]
    ContractIncomplete(&'static str),

    #[error("Falha ao enviar o e-mail de redefinição de senha")]
    EmailSendFailure,

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro ao gerar o PDF: {0}")]
    PdfRender(String),

    #[error("Erro no upload para o storage: {0}")]
    StorageUpload(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Multipart(e) => (
                StatusCode::BAD_REQUEST,
                format!("Erro ao processar o upload: {}", e),
            ),
            AppError::ContractDurationTooShort
            | AppError::InstallmentCreation(_)
            | AppError::ContractIncomplete(_)
            | AppError::EmailSendFailure => (StatusCode::BAD_REQUEST, self.to_string()),

            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::TenantAlreadyExists => (
                StatusCode::CONFLICT,
                "Já existe um inquilino com este CPF.".to_string(),
            ),
            AppError::GuarantorAlreadyExists => (
                StatusCode::CONFLICT,
                "Já existe um fiador com este CPF.".to_string(),
            ),

            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "E-mail ou senha inválidos.".to_string(),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),

            AppError::RefreshTokenNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::RefreshTokenAlreadyUsed | AppError::RefreshTokenExpired => {
                (StatusCode::FORBIDDEN, self.to_string())
            }

            AppError::UserNotFound => {
                (StatusCode::NOT_FOUND, "Usuário não encontrado.".to_string())
            }
            AppError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{} não encontrado(a).", entity))
            }
            AppError::Forbidden(entity) => (
                StatusCode::FORBIDDEN,
                format!("Usuário não tem permissão para acessar {}.", entity),
            ),

            // A mensagem da causa vai no corpo, como no serviço original.
            AppError::FontNotFound(_)
            | AppError::PdfRender(_)
            | AppError::StorageUpload(_) => {
                tracing::error!("Erro na geração/armazenamento de documento: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }

            // Todos os outros erros viram 500 genérico; o tracing loga o detalhe.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distingue_not_found_de_forbidden() {
        let nf = AppError::NotFound("Propriedade").into_response();
        let fb = AppError::Forbidden("a propriedade").into_response();
        assert_eq!(nf.status(), StatusCode::NOT_FOUND);
        assert_eq!(fb.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn duracao_de_contrato_vira_400() {
        let resp = AppError::ContractDurationTooShort.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn token_invalido_vira_401() {
        let resp = AppError::InvalidToken.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
