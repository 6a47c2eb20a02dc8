use serde::{Deserialize, Serialize};

use crate::domain::{detection::Detection, page::ContactSubmission};

/// Una detección tal y como la consume el frontend: índice estable dentro
/// de la respuesta, caja xyxy en píxeles y, si el catálogo lo conoce,
/// el tratamiento recomendado para la etiqueta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionEntry {
    pub index: usize,
    pub label: String,
    pub score: f32,
    pub bbox: [f32; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
}

impl DetectionEntry {
    pub fn from_detection(index: usize, det: &Detection, treatment: Option<String>) -> Self {
        Self {
            index,
            label: det.label.clone(),
            score: det.score,
            bbox: det.xyxy(),
            treatment,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectResponse {
    pub count: usize,
    pub summary: String,
    /// Aviso informativo cuando no se detecta nada; no es un error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub annotated_jpeg_base64: String,
    pub detections: Vec<DetectionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<ContactRequest> for ContactSubmission {
    fn from(r: ContactRequest) -> Self {
        ContactSubmission {
            name: r.name,
            email: r.email,
            subject: r.subject,
            message: r.message,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetClassesRequest {
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}
