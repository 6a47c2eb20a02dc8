use crate::application::services::{DetectionService, SiteService};
use std::sync::Arc;

/// Estado compartido para los manejadores HTTP de Axum.
/// Siguiendo la Arquitectura Hexagonal, el estado contiene los servicios (Casos de Uso).
#[derive(Clone)]
pub struct HttpState {
    /// Servicio de detección: decodifica, infiere y anota la imagen subida.
    pub detection: Arc<DetectionService>,
    /// Servicio de páginas informativas: galería y formulario de contacto.
    pub site: Arc<SiteService>,
}
