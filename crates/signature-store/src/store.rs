use crate::backend::KeyValueStore;
use crate::error::StoreError;
use chrono::Utc;
use shared_types::SavedSignature;
use uuid::Uuid;

/// Key holding the JSON array of saved signatures
pub const SIGNATURES_KEY: &str = "saved_signatures";

pub type Result<T> = std::result::Result<T, StoreError>;

/// Reads a stored signature record.
///
/// An absent or unparseable record is an empty collection, never an error.
pub fn parse_or_empty(raw: Option<&str>) -> Vec<SavedSignature> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<SavedSignature>>(raw) {
        Ok(signatures) => signatures,
        Err(e) => {
            tracing::warn!("Ignoring unreadable signature record: {}", e);
            Vec::new()
        }
    }
}

/// The collection of saved signatures, in insertion order.
pub struct SignatureStore<B> {
    backend: B,
}

impl<B: KeyValueStore> SignatureStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn list(&self) -> Result<Vec<SavedSignature>> {
        let raw = self.backend.get(SIGNATURES_KEY)?;
        Ok(parse_or_empty(raw.as_deref()))
    }

    pub fn get(&self, id: &str) -> Result<Option<SavedSignature>> {
        Ok(self.list()?.into_iter().find(|s| s.id == id))
    }

    /// Name offered for the next signature: "Signature N"
    pub fn next_default_name(&self) -> Result<String> {
        Ok(default_name(self.list()?.len()))
    }

    /// Appends a new signature and returns it.
    ///
    /// A blank `name` falls back to [`next_default_name`](Self::next_default_name).
    /// `created_at` never goes backwards relative to earlier records, even if
    /// the wall clock does.
    pub fn save(&mut self, name: &str, data: &str) -> Result<SavedSignature> {
        let mut signatures = self.list()?;

        let mut id = Uuid::new_v4().to_string();
        while signatures.iter().any(|s| s.id == id) {
            id = Uuid::new_v4().to_string();
        }

        let now = Utc::now().timestamp_millis();
        let created_at = signatures
            .iter()
            .map(|s| s.created_at)
            .max()
            .map_or(now, |latest| now.max(latest));

        let name = match name.trim() {
            "" => default_name(signatures.len()),
            trimmed => trimmed.to_string(),
        };

        let signature = SavedSignature {
            id,
            name,
            data: data.to_string(),
            created_at,
        };
        signatures.push(signature.clone());
        self.write(&signatures)?;

        tracing::info!("Saved signature '{}' ({})", signature.name, signature.id);
        Ok(signature)
    }

    /// Removes the signature with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let signatures = self.list()?;
        let before = signatures.len();
        let remaining: Vec<SavedSignature> =
            signatures.into_iter().filter(|s| s.id != id).collect();

        if remaining.len() == before {
            tracing::debug!("No saved signature with id {}", id);
            return Ok(false);
        }

        self.write(&remaining)?;
        tracing::info!("Deleted signature {}", id);
        Ok(true)
    }

    fn write(&mut self, signatures: &[SavedSignature]) -> Result<()> {
        let json = serde_json::to_string(signatures)?;
        self.backend.set(SIGNATURES_KEY, &json)
    }
}

fn default_name(existing: usize) -> String {
    format!("Signature {}", existing + 1)
}
