use serde::{Deserialize, Deserializer};

/// One viewable document as reported by the file service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentRef {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl DocumentRef {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }

    pub fn has_address(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.url.as_str()
        } else {
            self.name.as_str()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DocumentRef;

    #[test]
    fn blank_url_has_no_address() {
        assert!(!DocumentRef::new("   ", "empty.pdf").has_address());
        assert!(DocumentRef::new("/files/a.pdf", "a.pdf").has_address());
    }

    #[test]
    fn display_name_falls_back_to_url() {
        let doc = DocumentRef::new("/files/a.pdf", "");
        assert_eq!(doc.display_name(), "/files/a.pdf");
    }
}
