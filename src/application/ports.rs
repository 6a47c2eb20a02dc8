use async_trait::async_trait;
use image::RgbImage;

use crate::domain::{detection::Detection, errors::DomainResult, model::ModelDescription};

#[async_trait]
pub trait DetectorPort: Send + Sync {
    async fn infer(&self, image: &RgbImage) -> DomainResult<Vec<Detection>>;
    /// Sustituye la lista de clases activa. Si hay una sesión de inferencia
    /// viva, las nuevas etiquetas se propagan a ella; si no, se guardan para
    /// las sesiones futuras.
    async fn set_classes(&self, classes: Vec<String>) -> DomainResult<()>;
    async fn describe(&self) -> ModelDescription;
}

#[async_trait]
pub trait AnnotatorPort: Send + Sync {
    /// Dibuja las detecciones sobre una copia de la imagen y la devuelve
    /// codificada como JPEG.
    async fn annotate(&self, image: &RgbImage, detections: &[Detection])
        -> DomainResult<Vec<u8>>;
}

#[async_trait]
pub trait TreatmentCatalogPort: Send + Sync {
    async fn advice_for(&self, label: &str) -> Option<String>;
}
