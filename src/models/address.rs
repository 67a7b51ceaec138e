// src/models/address.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// Endereço embutido em Owner, Property, Tenant e Guarantor.
// Com #[sqlx(flatten)] as colunas ficam na própria tabela da entidade,
// e com #[serde(flatten)] os campos aparecem direto no JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[schema(example = "Rua das Acácias")]
    pub street: Option<String>,

    #[schema(example = "Centro")]
    pub neighborhood: Option<String>,

    #[schema(example = 120)]
    pub number: Option<i32>,

    #[schema(example = "72000-000")]
    pub zip_code: Option<String>,

    #[schema(example = "Brasília")]
    pub city: Option<String>,

    #[schema(example = "DF")]
    pub state: Option<String>,
}

impl Address {
    // "rua X, 12, no bairro Y, 72000-000 em Cidade/UF" — usado nos documentos.
    pub fn legal_description(&self) -> String {
        format!(
            "rua {}, {}, no bairro {}, {} em {}/{}",
            self.street.as_deref().unwrap_or("não informada"),
            self.number.map_or("s/n".to_string(), |n| n.to_string()),
            self.neighborhood.as_deref().unwrap_or("não informado"),
            self.zip_code.as_deref().unwrap_or("CEP não informado"),
            self.city.as_deref().unwrap_or("cidade não informada"),
            self.state.as_deref().unwrap_or("UF"),
        )
    }
}
