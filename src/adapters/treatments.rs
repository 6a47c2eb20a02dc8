use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::application::ports::TreatmentCatalogPort;

/// Catálogo plaga → tratamiento recomendado, cargado una vez al arrancar
/// desde un JSON plano. La ausencia del fichero no es un error: se sigue
/// con un catálogo vacío.
pub struct JsonTreatmentCatalog {
    advice: HashMap<String, String>,
}

impl JsonTreatmentCatalog {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            warn!("Fichero de tratamientos ausente ({path}), catálogo vacío");
            return Ok(Self {
                advice: HashMap::new(),
            });
        }

        let raw = std::fs::read_to_string(path)?;
        let advice: HashMap<String, String> = serde_json::from_str(&raw)?;
        info!("Catálogo de tratamientos: {} entradas", advice.len());
        Ok(Self { advice })
    }

    pub fn len(&self) -> usize {
        self.advice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.advice.is_empty()
    }
}

#[async_trait]
impl TreatmentCatalogPort for JsonTreatmentCatalog {
    async fn advice_for(&self, label: &str) -> Option<String> {
        self.advice.get(label).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_an_empty_catalog() {
        let catalog = JsonTreatmentCatalog::load("does/not/exist/treat.json").unwrap();
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn lookup_by_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("treat.json");
        std::fs::write(
            &path,
            r#"{"aphid": "Use neem oil spray.", "cutworm": "Apply collars around stems."}"#,
        )
        .unwrap();

        let catalog = JsonTreatmentCatalog::load(&path.to_string_lossy()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.advice_for("aphid").await.as_deref(),
            Some("Use neem oil spray.")
        );
        assert!(catalog.advice_for("locust").await.is_none());
    }

    #[test]
    fn malformed_json_is_a_startup_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("treat.json");
        std::fs::write(&path, b"{not json").unwrap();
        assert!(JsonTreatmentCatalog::load(&path.to_string_lossy()).is_err());
    }
}
