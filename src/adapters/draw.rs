use ab_glyph::{FontVec, PxScale};
use async_trait::async_trait;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::warn;

use crate::application::ports::AnnotatorPort;
use crate::domain::{
    detection::Detection,
    errors::{DomainError, DomainResult},
};

const BOX_COLOR: [u8; 3] = [46, 204, 64];
const TEXT_COLOR: [u8; 3] = [255, 255, 255];
const LABEL_FONT_SIZE: f32 = 16.0;
const LABEL_TEXT_HEIGHT: i32 = 18;
const LABEL_CHAR_WIDTH: f32 = 8.0; // anchura media por carácter, estimada
const JPEG_QUALITY: u8 = 80;

/// Dibuja las cajas de detección sobre la imagen y la codifica como JPEG.
/// La fuente para las etiquetas es un recurso opcional: si el fichero no
/// está, se dibujan sólo los rectángulos.
pub struct BoxAnnotator {
    font: Option<FontVec>,
}

impl BoxAnnotator {
    pub fn new(font_path: &str) -> Self {
        let font = match std::fs::read(font_path) {
            Ok(bytes) => match FontVec::try_from_vec(bytes) {
                Ok(font) => Some(font),
                Err(_) => {
                    warn!("Fuente ilegible, etiquetas desactivadas: {font_path}");
                    None
                }
            },
            Err(_) => {
                warn!("Fuente no encontrada, etiquetas desactivadas: {font_path}");
                None
            }
        };
        Self { font }
    }

    fn draw_detection(&self, image: &mut RgbImage, det: &Detection) {
        let (w, h) = (image.width() as i32, image.height() as i32);

        let x1 = (det.x1.floor() as i32).clamp(0, w - 1);
        let y1 = (det.y1.floor() as i32).clamp(0, h - 1);
        let x2 = (det.x2.ceil() as i32).clamp(0, w - 1);
        let y2 = (det.y2.ceil() as i32).clamp(0, h - 1);

        if x1 >= x2 || y1 >= y2 {
            return;
        }

        // Borde de dos píxeles.
        let outer = Rect::at(x1, y1).of_size((x2 - x1) as u32, (y2 - y1) as u32);
        draw_hollow_rect_mut(image, outer, Rgb(BOX_COLOR));
        if x2 - x1 > 2 && y2 - y1 > 2 {
            let inner = Rect::at(x1 + 1, y1 + 1).of_size((x2 - x1 - 2) as u32, (y2 - y1 - 2) as u32);
            draw_hollow_rect_mut(image, inner, Rgb(BOX_COLOR));
        }

        let Some(font) = &self.font else {
            return;
        };

        let label = format!("{} {:.2}", det.label, det.score);
        let text_width = (label.len() as f32 * LABEL_CHAR_WIDTH) as i32;
        let label_x = x1;
        let label_y = (y1 - LABEL_TEXT_HEIGHT).max(0);
        let label_width = text_width.min(w - label_x).max(0) as u32;

        if label_width > 0 {
            let background = Rect::at(label_x, label_y).of_size(label_width, LABEL_TEXT_HEIGHT as u32);
            draw_filled_rect_mut(image, background, Rgb(BOX_COLOR));
            draw_text_mut(
                image,
                Rgb(TEXT_COLOR),
                label_x + 1,
                label_y + 1,
                PxScale::from(LABEL_FONT_SIZE),
                font,
                &label,
            );
        }
    }

    fn annotate_sync(&self, image: &RgbImage, detections: &[Detection]) -> DomainResult<Vec<u8>> {
        let mut annotated = image.clone();
        for det in detections {
            self.draw_detection(&mut annotated, det);
        }

        let mut buf = Vec::new();
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
        encoder
            .encode_image(&annotated)
            .map_err(|e| DomainError::OperationFailed(format!("jpeg encode: {e}")))?;
        Ok(buf)
    }
}

impl Default for BoxAnnotator {
    fn default() -> Self {
        Self::new("assets/DejaVuSans.ttf")
    }
}

#[async_trait]
impl AnnotatorPort for BoxAnnotator {
    async fn annotate(&self, image: &RgbImage, detections: &[Detection])
        -> DomainResult<Vec<u8>> {
        self.annotate_sync(image, detections)
    }
}
