use std::path::PathBuf;
use std::sync::Arc;

use base64::{prelude::BASE64_STANDARD, Engine};
use tracing::warn;

use crate::{
    application::{
        dto::{DetectResponse, DetectionEntry},
        ports::{AnnotatorPort, DetectorPort, TreatmentCatalogPort},
    },
    domain::{
        detection::summarize_detections,
        errors::{DomainError, DomainResult},
        model::ModelDescription,
        page::{AboutImage, ContactFormState, ContactSubmission, ABOUT_GALLERY},
    },
};

pub const NO_PESTS_NOTICE: &str = "No pests detected. Try another image with visible insects.";

/// Caso de uso principal: decodificar la imagen subida, inferir, anotar y
/// montar la respuesta que consume la página de detección.
#[derive(Clone)]
pub struct DetectionService {
    detector: Arc<dyn DetectorPort>,
    annotator: Arc<dyn AnnotatorPort>,
    treatments: Arc<dyn TreatmentCatalogPort>,
}

impl DetectionService {
    pub fn new(
        detector: Arc<dyn DetectorPort>,
        annotator: Arc<dyn AnnotatorPort>,
        treatments: Arc<dyn TreatmentCatalogPort>,
    ) -> Self {
        Self {
            detector,
            annotator,
            treatments,
        }
    }

    pub async fn detect(&self, image_bytes: &[u8]) -> DomainResult<DetectResponse> {
        let image = image::load_from_memory(image_bytes)
            .map_err(|e| DomainError::InvalidInput(format!("could not decode image: {e}")))?
            .to_rgb8();

        let detections = self.detector.infer(&image).await?;

        let jpeg = self.annotator.annotate(&image, &detections).await?;
        let annotated_jpeg_base64 = BASE64_STANDARD.encode(jpeg);

        let mut entries = Vec::with_capacity(detections.len());
        for (index, det) in detections.iter().enumerate() {
            let treatment = self.treatments.advice_for(&det.label).await;
            entries.push(DetectionEntry::from_detection(index, det, treatment));
        }

        let notice = if entries.is_empty() {
            Some(NO_PESTS_NOTICE.to_string())
        } else {
            None
        };

        Ok(DetectResponse {
            count: entries.len(),
            summary: summarize_detections(&detections),
            notice,
            annotated_jpeg_base64,
            detections: entries,
        })
    }

    pub async fn set_classes(&self, classes: Vec<String>) -> DomainResult<()> {
        self.detector.set_classes(classes).await
    }

    pub async fn describe_model(&self) -> ModelDescription {
        self.detector.describe().await
    }
}

/// Contenido de las páginas informativas: galería de "About" y formulario
/// de contacto.
#[derive(Clone)]
pub struct SiteService {
    static_dir: PathBuf,
}

impl SiteService {
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: static_dir.into(),
        }
    }

    /// Comprueba imagen por imagen; una ruta que no resuelve produce un
    /// aviso para esa entrada y el resto de la galería sigue adelante.
    pub fn gallery(&self) -> Vec<AboutImage> {
        ABOUT_GALLERY
            .iter()
            .map(|(title, file)| {
                let full = self.static_dir.join(file);
                let available = full.is_file();
                if !available {
                    warn!("Imagen de galería ausente: {}", full.display());
                }
                AboutImage {
                    title: title.to_string(),
                    path: format!("/{file}"),
                    available,
                }
            })
            .collect()
    }

    pub fn submit_contact(&self, submission: &ContactSubmission) -> ContactFormState {
        submission.submit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::RgbImage;
    use std::collections::HashMap;
    use std::io::Cursor;

    use crate::domain::{
        detection::Detection,
        model::{ModelId, ModelVariant},
    };

    /// Detector de prueba que devuelve una lista fija, en orden.
    struct StubDetector {
        detections: Vec<Detection>,
    }

    #[async_trait]
    impl DetectorPort for StubDetector {
        async fn infer(&self, _image: &RgbImage) -> DomainResult<Vec<Detection>> {
            Ok(self.detections.clone())
        }

        async fn set_classes(&self, _classes: Vec<String>) -> DomainResult<()> {
            Ok(())
        }

        async fn describe(&self) -> ModelDescription {
            ModelDescription {
                model: ModelId {
                    name: "stub".into(),
                    onnx_path: "stub.onnx".into(),
                },
                variant: ModelVariant::Standard,
                classes: vec![],
                tasks: ModelVariant::Standard.task_map(),
            }
        }
    }

    struct StubAnnotator;

    #[async_trait]
    impl AnnotatorPort for StubAnnotator {
        async fn annotate(
            &self,
            _image: &RgbImage,
            _detections: &[Detection],
        ) -> DomainResult<Vec<u8>> {
            Ok(vec![0xff, 0xd8, 0xff, 0xd9])
        }
    }

    struct MapTreatments(HashMap<String, String>);

    #[async_trait]
    impl TreatmentCatalogPort for MapTreatments {
        async fn advice_for(&self, label: &str) -> Option<String> {
            self.0.get(label).cloned()
        }
    }

    fn det(label: &str, score: f32) -> Detection {
        Detection {
            x1: 10.0,
            y1: 10.0,
            x2: 50.0,
            y2: 60.0,
            score,
            class_id: 0,
            label: label.to_string(),
        }
    }

    fn png_bytes() -> Vec<u8> {
        let img = RgbImage::from_pixel(8, 8, image::Rgb([40, 160, 40]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn service(detections: Vec<Detection>, treatments: HashMap<String, String>) -> DetectionService {
        DetectionService::new(
            Arc::new(StubDetector { detections }),
            Arc::new(StubAnnotator),
            Arc::new(MapTreatments(treatments)),
        )
    }

    #[tokio::test]
    async fn zero_detections_yields_notice_and_empty_list() {
        let svc = service(vec![], HashMap::new());
        let res = svc.detect(&png_bytes()).await.unwrap();
        assert_eq!(res.count, 0);
        assert!(res.detections.is_empty());
        assert_eq!(res.notice.as_deref(), Some(NO_PESTS_NOTICE));
    }

    #[tokio::test]
    async fn entries_preserve_inference_order() {
        let svc = service(
            vec![det("aphid", 0.9), det("larva", 0.8), det("beetle", 0.7)],
            HashMap::new(),
        );
        let res = svc.detect(&png_bytes()).await.unwrap();
        assert_eq!(res.count, 3);
        assert!(res.notice.is_none());
        let labels: Vec<_> = res.detections.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, ["aphid", "larva", "beetle"]);
        assert_eq!(res.detections[0].index, 0);
        assert_eq!(res.detections[2].index, 2);
    }

    #[tokio::test]
    async fn treatment_advice_is_attached_when_known() {
        let mut treatments = HashMap::new();
        treatments.insert("aphid".to_string(), "Use neem oil spray.".to_string());
        let svc = service(vec![det("aphid", 0.9), det("larva", 0.8)], treatments);
        let res = svc.detect(&png_bytes()).await.unwrap();
        assert_eq!(
            res.detections[0].treatment.as_deref(),
            Some("Use neem oil spray.")
        );
        assert!(res.detections[1].treatment.is_none());
    }

    #[tokio::test]
    async fn garbage_bytes_are_rejected_as_invalid_input() {
        let svc = service(vec![], HashMap::new());
        let err = svc.detect(b"definitely not an image").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn gallery_reports_missing_files_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("results.png"), b"png").unwrap();
        let svc = SiteService::new(dir.path());
        let gallery = svc.gallery();
        assert_eq!(gallery.len(), ABOUT_GALLERY.len());
        assert!(gallery[0].available, "results.png existe");
        assert!(gallery[1..].iter().all(|img| !img.available));
    }
}
