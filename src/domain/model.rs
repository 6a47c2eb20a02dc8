use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelId {
    pub name: String,       // logical name, e.g. "yolov8n"
    pub onnx_path: String,  // filesystem path
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoloParams {
    pub input_size: u32,        // 640 typical
    pub conf_threshold: f32,    // 0..1
    pub iou_threshold: f32,     // 0..1
    pub max_detections: usize,  // e.g. 300
}

impl Default for YoloParams {
    fn default() -> Self {
        Self {
            input_size: 640,
            conf_threshold: 0.25,
            iou_threshold: 0.45,
            max_detections: 100,
        }
    }
}

/// Variante del detector, elegida una única vez al construir la fachada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelVariant {
    Standard,
    OpenVocabulary,
}

impl ModelVariant {
    /// Regla de selección: si el nombre base del fichero de pesos (sin ruta
    /// ni extensión) contiene la subcadena "world", se usa la variante de
    /// vocabulario abierto. La comparación es sensible a mayúsculas.
    pub fn from_weights(onnx_path: &str) -> Self {
        let stem = Path::new(onnx_path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        if stem.contains("world") {
            ModelVariant::OpenVocabulary
        } else {
            ModelVariant::Standard
        }
    }

    pub fn task_map(&self) -> &'static [TaskEntry] {
        match self {
            ModelVariant::Standard => &STANDARD_TASK_MAP,
            ModelVariant::OpenVocabulary => &WORLD_TASK_MAP,
        }
    }
}

/// Objetivos lógicos que un modelo puede cubrir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    Classify,
    Detect,
    Segment,
    Pose,
    Obb,
}

/// Componentes concretos que el motor debe instanciar para cada tarea.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TaskRoles {
    pub model: &'static str,
    pub trainer: Option<&'static str>,
    pub validator: &'static str,
    pub predictor: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TaskEntry {
    pub task: Task,
    pub roles: TaskRoles,
}

pub const STANDARD_TASK_MAP: [TaskEntry; 5] = [
    TaskEntry {
        task: Task::Classify,
        roles: TaskRoles {
            model: "classification-model",
            trainer: Some("classification-trainer"),
            validator: "classification-validator",
            predictor: "classification-predictor",
        },
    },
    TaskEntry {
        task: Task::Detect,
        roles: TaskRoles {
            model: "detection-model",
            trainer: Some("detection-trainer"),
            validator: "detection-validator",
            predictor: "detection-predictor",
        },
    },
    TaskEntry {
        task: Task::Segment,
        roles: TaskRoles {
            model: "segmentation-model",
            trainer: Some("segmentation-trainer"),
            validator: "segmentation-validator",
            predictor: "segmentation-predictor",
        },
    },
    TaskEntry {
        task: Task::Pose,
        roles: TaskRoles {
            model: "pose-model",
            trainer: Some("pose-trainer"),
            validator: "pose-validator",
            predictor: "pose-predictor",
        },
    },
    TaskEntry {
        task: Task::Obb,
        roles: TaskRoles {
            model: "obb-model",
            trainer: Some("obb-trainer"),
            validator: "obb-validator",
            predictor: "obb-predictor",
        },
    },
];

// La variante de vocabulario abierto sólo cubre detección y no entrena.
pub const WORLD_TASK_MAP: [TaskEntry; 1] = [TaskEntry {
    task: Task::Detect,
    roles: TaskRoles {
        model: "world-detection-model",
        trainer: None,
        validator: "detection-validator",
        predictor: "detection-predictor",
    },
}];

/// Elimina toda entrada igual al marcador de fondo (un único espacio en
/// blanco) conservando el orden del resto.
pub fn sanitize_classes(classes: Vec<String>) -> Vec<String> {
    classes.into_iter().filter(|c| c != " ").collect()
}

/// Descripción del modelo activo, tal y como la expone la API.
#[derive(Debug, Clone, Serialize)]
pub struct ModelDescription {
    pub model: ModelId,
    pub variant: ModelVariant,
    pub classes: Vec<String>,
    pub tasks: &'static [TaskEntry],
}
