use serde::{Deserialize, Deserializer};

// Campos de PATCH com semântica esparsa: `Option<Option<T>>` distingue
// "campo ausente" (None -> não altera) de "campo null" (Some(None) -> limpa).
// Uso: #[serde(default, deserialize_with = "double_option")]
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        photo_url: Option<Option<String>>,
    }

    #[test]
    fn campo_ausente_nao_altera() {
        let p: Patch = serde_json::from_str("{}").unwrap();
        assert!(p.photo_url.is_none());
    }

    #[test]
    fn campo_null_limpa() {
        let p: Patch = serde_json::from_str(r#"{"photo_url": null}"#).unwrap();
        assert_eq!(p.photo_url, Some(None));
    }

    #[test]
    fn campo_presente_define() {
        let p: Patch = serde_json::from_str(r#"{"photo_url": "https://x/y.jpg"}"#).unwrap();
        assert_eq!(p.photo_url, Some(Some("https://x/y.jpg".to_string())));
    }
}
