use async_trait::async_trait;
use image::RgbImage;
use std::path::Path;
use std::sync::RwLock;
use tracing::info;

use crate::adapters::onnx::{labels, yolo_engine::OnnxYoloEngine};
use crate::application::ports::DetectorPort;
use crate::domain::{
    detection::Detection,
    errors::{DomainError, DomainResult},
    model::{sanitize_classes, ModelDescription, ModelId, ModelVariant, YoloParams},
};

/// Fachada sobre el motor ONNX. Decide la variante una única vez al
/// construirse (nada de mutar el propio tipo en caliente) y mantiene la
/// lista de clases activa y la sesión perezosa tras un RwLock.
pub struct YoloFacade {
    model: ModelId,
    variant: ModelVariant,
    params: YoloParams,
    classes: RwLock<Vec<String>>,
    engine: RwLock<Option<OnnxYoloEngine>>,
}

impl YoloFacade {
    /// Valida que los pesos existan (error fatal de configuración si no) y
    /// elige la variante según el nombre base del fichero. La sesión ONNX
    /// se crea en la primera inferencia.
    pub fn from_weights(model: ModelId, params: YoloParams) -> DomainResult<Self> {
        if model.onnx_path.trim().is_empty() {
            return Err(DomainError::InvalidInput("onnx_path empty".into()));
        }
        if !Path::new(&model.onnx_path).exists() {
            return Err(DomainError::NotFound(format!(
                "model file not found: {}",
                model.onnx_path
            )));
        }

        let variant = ModelVariant::from_weights(&model.onnx_path);
        info!(
            "Modelo '{}' ({:?}) con pesos {}",
            model.name, variant, model.onnx_path
        );

        Ok(Self {
            model,
            variant,
            params,
            classes: RwLock::new(labels::default_classes()),
            engine: RwLock::new(None),
        })
    }

    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    fn infer_sync(&self, image: &RgbImage) -> DomainResult<Vec<Detection>> {
        let mut guard = self
            .engine
            .write()
            .map_err(|_| DomainError::OperationFailed("Lock del motor fallido".into()))?;

        if guard.is_none() {
            info!("Cargando sesión ONNX: {}", self.model.onnx_path);
            let classes = self
                .classes
                .read()
                .map_err(|_| DomainError::OperationFailed("Lock de clases fallido".into()))?
                .clone();
            let engine = OnnxYoloEngine::load(&self.model.onnx_path, classes)
                .map_err(|e| DomainError::OperationFailed(format!("could not load model: {e}")))?;
            *guard = Some(engine);
        }

        let Some(engine) = guard.as_mut() else {
            return Err(DomainError::OperationFailed("motor no disponible".into()));
        };

        engine
            .infer(image, &self.params)
            .map_err(|e| DomainError::Inference(e.to_string()))
    }

    fn set_classes_sync(&self, classes: Vec<String>) -> DomainResult<()> {
        let classes = sanitize_classes(classes);

        {
            let mut stored = self
                .classes
                .write()
                .map_err(|_| DomainError::OperationFailed("Lock de clases fallido".into()))?;
            *stored = classes.clone();
        }

        // Propagación a la sesión viva; si aún no hay sesión las clases
        // quedan guardadas para la siguiente.
        if let Ok(mut guard) = self.engine.write() {
            if let Some(engine) = guard.as_mut() {
                engine.set_labels(classes);
            }
        }

        Ok(())
    }

    fn describe_sync(&self) -> ModelDescription {
        let classes = self
            .classes
            .read()
            .map(|c| c.clone())
            .unwrap_or_default();
        ModelDescription {
            model: self.model.clone(),
            variant: self.variant,
            classes,
            tasks: self.variant.task_map(),
        }
    }
}

#[async_trait]
impl DetectorPort for YoloFacade {
    async fn infer(&self, image: &RgbImage) -> DomainResult<Vec<Detection>> {
        self.infer_sync(image)
    }

    async fn set_classes(&self, classes: Vec<String>) -> DomainResult<()> {
        self.set_classes_sync(classes)
    }

    async fn describe(&self) -> ModelDescription {
        self.describe_sync()
    }
}
