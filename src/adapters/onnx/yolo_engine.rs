use anyhow::Result;
use image::{imageops::FilterType, RgbImage};
use ndarray::{s, Array4, ArrayViewD, Axis, IxDyn};
#[cfg(feature = "cuda")]
use ort::execution_providers::CUDAExecutionProvider;
use ort::session::Session;
use ort::value::Value;
use std::fs;

use crate::domain::detection::Detection;
use crate::domain::model::YoloParams;

/// Sesión ONNX de un modelo YOLO de detección. El motor no conoce la
/// variante: recibe la lista de etiquetas activa desde la fachada.
pub struct OnnxYoloEngine {
    session: Session,
    labels: Vec<String>,
}

impl OnnxYoloEngine {
    pub fn load(path: &str, labels: Vec<String>) -> Result<Self> {
        let builder = Session::builder()?.with_intra_threads(4)?;

        // CUDA es opcional: si está disponible se registra, si no continuamos en CPU.
        #[cfg(feature = "cuda")]
        let builder = {
            let cuda = CUDAExecutionProvider::default().build();
            match builder.clone().with_execution_providers([cuda]) {
                Ok(with_cuda) => with_cuda,
                Err(_) => builder,
            }
        };

        // Con `ort` sin default-features, usamos commit_from_memory.
        let model_bytes = fs::read(path)?;
        let session = builder.commit_from_memory(&model_bytes)?;

        Ok(Self { session, labels })
    }

    /// Etiquetas usadas para nombrar las cajas de las próximas inferencias.
    pub fn set_labels(&mut self, labels: Vec<String>) {
        self.labels = labels;
    }

    pub fn infer(&mut self, rgb: &RgbImage, params: &YoloParams) -> Result<Vec<Detection>> {
        let imgsz = params.input_size as usize;
        let resized = image::imageops::resize(rgb, imgsz as u32, imgsz as u32, FilterType::Nearest);

        let mut input = Array4::<f32>::zeros((1, 3, imgsz, imgsz));
        for (x, y, pixel) in resized.enumerate_pixels() {
            input[[0, 0, y as usize, x as usize]] = pixel[0] as f32 / 255.0;
            input[[0, 1, y as usize, x as usize]] = pixel[1] as f32 / 255.0;
            input[[0, 2, y as usize, x as usize]] = pixel[2] as f32 / 255.0;
        }

        let input_shape = vec![1, 3, imgsz as i64, imgsz as i64];
        let input_tensor = Value::from_array((input_shape, input.into_raw_vec()))?;

        let outputs = self.session.run(ort::inputs![input_tensor])?;
        let (shape_out, data_out) = outputs[0].try_extract_tensor::<f32>()?;

        let dims: Vec<usize> = shape_out.into_iter().map(|&x| x as usize).collect();
        let array_view = ArrayViewD::from_shape(IxDyn(&dims), data_out)?;
        let view = array_view.index_axis(Axis(0), 0);

        // Salida [4 + nc, N]: caja cxcywh en las cuatro primeras filas,
        // puntuación por clase en el resto.
        let num_candidates = view.shape()[1];
        let sx = rgb.width() as f32 / imgsz as f32;
        let sy = rgb.height() as f32 / imgsz as f32;

        let mut detections = Vec::new();

        for i in 0..num_candidates {
            let scores = view.slice(s![4.., i]);
            let Some((class_id, &max_score)) = scores
                .indexed_iter()
                .max_by(|(_, a), (_, b)| a.total_cmp(b))
            else {
                continue;
            };

            if max_score > params.conf_threshold {
                let cx = view[[0, i]];
                let cy = view[[1, i]];
                let w = view[[2, i]];
                let h = view[[3, i]];

                detections.push(Detection {
                    x1: (cx - w / 2.0) * sx,
                    y1: (cy - h / 2.0) * sy,
                    x2: (cx + w / 2.0) * sx,
                    y2: (cy + h / 2.0) * sy,
                    score: max_score,
                    class_id,
                    label: self
                        .labels
                        .get(class_id)
                        .cloned()
                        .unwrap_or_else(|| "object".to_string()),
                });
            }
        }

        detections.sort_unstable_by(|a, b| b.score.total_cmp(&a.score));
        let kept = non_max_suppression(detections, params.iou_threshold);
        Ok(kept.into_iter().take(params.max_detections).collect())
    }
}

fn iou(a: &Detection, b: &Detection) -> f32 {
    let x1 = a.x1.max(b.x1);
    let y1 = a.y1.max(b.y1);
    let x2 = a.x2.min(b.x2);
    let y2 = a.y2.min(b.y2);
    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter <= 0.0 {
        return 0.0;
    }
    let area_a = (a.x2 - a.x1).max(0.0) * (a.y2 - a.y1).max(0.0);
    let area_b = (b.x2 - b.x1).max(0.0) * (b.y2 - b.y1).max(0.0);
    inter / (area_a + area_b - inter + f32::EPSILON)
}

/// Supresión de no-máximos voraz. Espera los candidatos ya ordenados por
/// puntuación descendente.
fn non_max_suppression(candidates: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    let mut picked: Vec<Detection> = Vec::new();
    for det in candidates {
        if picked.iter().all(|p| iou(&det, p) < iou_threshold) {
            picked.push(det);
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(x1: f32, y1: f32, x2: f32, y2: f32, score: f32) -> Detection {
        Detection {
            x1,
            y1,
            x2,
            y2,
            score,
            class_id: 0,
            label: "pest".to_string(),
        }
    }

    #[test]
    fn iou_of_disjoint_boxes_is_zero() {
        let a = det(0.0, 0.0, 10.0, 10.0, 0.9);
        let b = det(20.0, 20.0, 30.0, 30.0, 0.8);
        assert_eq!(iou(&a, &b), 0.0);
    }

    #[test]
    fn iou_of_identical_boxes_is_one() {
        let a = det(0.0, 0.0, 10.0, 10.0, 0.9);
        assert!((iou(&a, &a) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn nms_drops_heavy_overlaps_and_keeps_the_rest() {
        let candidates = vec![
            det(0.0, 0.0, 10.0, 10.0, 0.9),
            det(1.0, 1.0, 11.0, 11.0, 0.8), // solapa con la primera
            det(50.0, 50.0, 60.0, 60.0, 0.7),
        ];
        let kept = non_max_suppression(candidates, 0.45);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].score, 0.9);
        assert_eq!(kept[1].score, 0.7);
    }
}
