use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub score: f32,
    pub class_id: usize,
    pub label: String,
}

impl Detection {
    /// Coordenadas xyxy en píxeles, convención esquina superior-izquierda /
    /// esquina inferior-derecha.
    pub fn xyxy(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

pub fn summarize_detections(detections: &[Detection]) -> String {
    let mut counts = HashMap::new();
    for det in detections {
        *counts.entry(&det.label).or_insert(0) += 1;
    }
    let mut parts: Vec<_> = counts
        .iter()
        .map(|(label, count)| format!("{} {}", count, label))
        .collect();
    parts.sort();
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(label: &str) -> Detection {
        Detection {
            x1: 1.0,
            y1: 2.0,
            x2: 30.0,
            y2: 40.0,
            score: 0.9,
            class_id: 0,
            label: label.to_string(),
        }
    }

    #[test]
    fn summary_counts_by_label() {
        let dets = vec![det("aphid"), det("larva"), det("aphid")];
        assert_eq!(summarize_detections(&dets), "1 larva, 2 aphid");
    }

    #[test]
    fn summary_empty() {
        assert_eq!(summarize_detections(&[]), "");
    }

    #[test]
    fn xyxy_order() {
        assert_eq!(det("aphid").xyxy(), [1.0, 2.0, 30.0, 40.0]);
    }
}
