// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    clients::MailClient,
    common::error::AppError,
    db::OwnerRepository,
    models::auth::{
        Claims, Owner, RegisterOwnerPayload, ResetClaims, ResetPasswordConfirmPayload,
        TokenPairResponse,
    },
};

const RESET_TOKEN_KIND: &str = "reset_password";

#[derive(Clone)]
pub struct AuthService {
    owner_repo: OwnerRepository,
    mail_client: MailClient,
    pool: PgPool,
    jwt_secret: String,
    jwt_issuer: String,
    access_ttl_minutes: i64,
    refresh_ttl_days: i64,
}

impl AuthService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner_repo: OwnerRepository,
        mail_client: MailClient,
        pool: PgPool,
        jwt_secret: String,
        jwt_issuer: String,
        access_ttl_minutes: i64,
        refresh_ttl_days: i64,
    ) -> Self {
        Self {
            owner_repo,
            mail_client,
            pool,
            jwt_secret,
            jwt_issuer,
            access_ttl_minutes,
            refresh_ttl_days,
        }
    }

    pub async fn register(
        &self,
        payload: &RegisterOwnerPayload,
    ) -> Result<(Owner, TokenPairResponse), AppError> {
        // Hashing fora do executor async para não travar o runtime
        let password_clone = payload.password.clone();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let owner = self
            .owner_repo
            .create(
                &payload.email,
                &hashed_password,
                &payload.name,
                &payload.phone,
                &payload.cpf,
                payload.birth_date,
            )
            .await?;

        let tokens = self.issue_token_pair(owner.id).await?;
        tracing::info!("✅ Novo locador cadastrado: {}", owner.email);
        Ok((owner, tokens))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPairResponse, AppError> {
        let owner = self
            .owner_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = owner.password_hash.clone();
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.issue_token_pair(owner.id).await
    }

    // Rotação de uso único: o token recebido é consumido e um novo par sai
    // na mesma transação. Reuso de token consumido é recusado com 403.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPairResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        let stored = self
            .owner_repo
            .find_refresh_token(&mut *tx, refresh_token)
            .await?
            .ok_or(AppError::RefreshTokenNotFound)?;

        if stored.used {
            return Err(AppError::RefreshTokenAlreadyUsed);
        }
        if stored.expires_at < Utc::now().timestamp() {
            return Err(AppError::RefreshTokenExpired);
        }

        self.owner_repo
            .mark_refresh_token_used(&mut *tx, stored.id)
            .await?;

        let (access_token, expires_at) = encode_access_token(
            &self.jwt_secret,
            &self.jwt_issuer,
            stored.owner_id,
            self.access_ttl_minutes,
        )?;

        let new_refresh = generate_refresh_token();
        let refresh_expires_at =
            (Utc::now() + chrono::Duration::days(self.refresh_ttl_days)).timestamp();
        self.owner_repo
            .create_refresh_token(&mut *tx, stored.owner_id, &new_refresh, refresh_expires_at)
            .await?;

        tx.commit().await?;

        Ok(TokenPairResponse {
            token_type: "Bearer",
            access_token,
            expires_at,
            refresh_token: new_refresh,
            refresh_token_expires_at: refresh_expires_at,
        })
    }

    pub async fn validate_token(&self, token: &str) -> Result<Owner, AppError> {
        let claims = decode_access_claims(&self.jwt_secret, &self.jwt_issuer, token)?;
        self.owner_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    // Sempre responde como sucesso, exista ou não a conta. Evita que o
    // endpoint sirva de oráculo de e-mails cadastrados.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let Some(owner) = self.owner_repo.find_by_email(email).await? else {
            tracing::info!("Pedido de redefinição para e-mail desconhecido ignorado");
            return Ok(());
        };

        let token = encode_reset_token(&self.jwt_secret, &self.jwt_issuer, &owner.email)?;
        self.mail_client
            .send_password_reset(&owner.email, &token)
            .await?;
        tracing::info!("✅ E-mail de redefinição de senha enviado");
        Ok(())
    }

    pub async fn reset_password_confirm(
        &self,
        payload: &ResetPasswordConfirmPayload,
    ) -> Result<(), AppError> {
        if payload.new_password != payload.confirm_password {
            return Err(AppError::BadRequest(
                "As senhas informadas não coincidem.".to_string(),
            ));
        }

        // Token de reset ruim é erro do pedido (400), não de autenticação
        let claims = decode_reset_claims(&self.jwt_secret, &self.jwt_issuer, &payload.token)
            .map_err(|_| {
                AppError::BadRequest("Token de redefinição inválido ou expirado.".to_string())
            })?;

        let owner = self
            .owner_repo
            .find_by_email(&claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let password_clone = payload.new_password.clone();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.owner_repo
            .update_password(owner.id, &hashed_password)
            .await?;
        tracing::info!("✅ Senha redefinida via e-mail para o locador {}", owner.id);
        Ok(())
    }

    pub async fn change_password(&self, owner_id: Uuid, password: &str) -> Result<(), AppError> {
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        self.owner_repo
            .update_password(owner_id, &hashed_password)
            .await
    }

    // Apaga a conta e todo o grafo de dados dela numa única transação.
    pub async fn delete_account(&self, owner_id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        self.owner_repo.delete_cascade(&mut *tx, owner_id).await?;
        tx.commit().await?;
        tracing::info!("🔥 Conta e dados do locador {} removidos", owner_id);
        Ok(())
    }

    async fn issue_token_pair(&self, owner_id: Uuid) -> Result<TokenPairResponse, AppError> {
        let (access_token, expires_at) = encode_access_token(
            &self.jwt_secret,
            &self.jwt_issuer,
            owner_id,
            self.access_ttl_minutes,
        )?;

        let refresh_token = generate_refresh_token();
        let refresh_expires_at =
            (Utc::now() + chrono::Duration::days(self.refresh_ttl_days)).timestamp();
        self.owner_repo
            .create_refresh_token(&self.pool, owner_id, &refresh_token, refresh_expires_at)
            .await?;

        Ok(TokenPairResponse {
            token_type: "Bearer",
            access_token,
            expires_at,
            refresh_token,
            refresh_token_expires_at: refresh_expires_at,
        })
    }
}

// Refresh token opaco: dois UUIDs v4 concatenados, sem hífens.
fn generate_refresh_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

fn encode_access_token(
    secret: &str,
    issuer: &str,
    owner_id: Uuid,
    ttl_minutes: i64,
) -> Result<(String, i64), AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::minutes(ttl_minutes);

    let claims = Claims {
        iss: issuer.to_string(),
        sub: owner_id,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;
    Ok((token, expires_at.timestamp()))
}

fn decode_access_claims(secret: &str, issuer: &str, token: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.set_issuer(&[issuer]);
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map_err(|_| AppError::InvalidToken)?;
    Ok(token_data.claims)
}

// Token de redefinição: 30 minutos, marcado com "type" para não ser
// aceito como token de acesso.
fn encode_reset_token(secret: &str, issuer: &str, email: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = ResetClaims {
        iss: issuer.to_string(),
        sub: email.to_string(),
        exp: (now + chrono::Duration::minutes(30)).timestamp() as usize,
        iat: now.timestamp() as usize,
        kind: RESET_TOKEN_KIND.to_string(),
    };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

fn decode_reset_claims(secret: &str, issuer: &str, token: &str) -> Result<ResetClaims, AppError> {
    let mut validation = Validation::default();
    validation.set_issuer(&[issuer]);
    let token_data = decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map_err(|_| AppError::InvalidToken)?;

    if token_data.claims.kind != RESET_TOKEN_KIND {
        return Err(AppError::InvalidToken);
    }
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "segredo-de-teste";
    const ISSUER: &str = "e-aluguel";

    #[test]
    fn token_de_acesso_roundtrip() {
        let owner_id = Uuid::new_v4();
        let (token, expires_at) = encode_access_token(SECRET, ISSUER, owner_id, 15).unwrap();

        let claims = decode_access_claims(SECRET, ISSUER, &token).unwrap();
        assert_eq!(claims.sub, owner_id);
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.exp as i64, expires_at);
    }

    #[test]
    fn issuer_errado_e_recusado() {
        let (token, _) = encode_access_token(SECRET, ISSUER, Uuid::new_v4(), 15).unwrap();
        let result = decode_access_claims(SECRET, "outro-issuer", &token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn token_de_reset_nao_serve_como_acesso() {
        let reset = encode_reset_token(SECRET, ISSUER, "a@b.com").unwrap();
        let result = decode_access_claims(SECRET, ISSUER, &reset);
        // O sub do reset é um e-mail, não um Uuid: a decodificação falha.
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn token_de_reset_roundtrip() {
        let token = encode_reset_token(SECRET, ISSUER, "locador@exemplo.com").unwrap();
        let claims = decode_reset_claims(SECRET, ISSUER, &token).unwrap();
        assert_eq!(claims.sub, "locador@exemplo.com");
        assert_eq!(claims.kind, "reset_password");
    }

    #[test]
    fn refresh_token_tem_64_caracteres() {
        let token = generate_refresh_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
