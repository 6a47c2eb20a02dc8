mod adapters;
mod application;
mod domain;

use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::adapters::{
    draw::BoxAnnotator,
    http::{router, state::HttpState},
    onnx::facade::YoloFacade,
    treatments::JsonTreatmentCatalog,
};
use crate::application::services::{DetectionService, SiteService};
use crate::domain::model::{ModelId, YoloParams};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Inicializar logs (RUST_LOG=info por defecto)
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!("🔧 Inicializando adaptadores de infraestructura...");

    // 2. Instanciar Adaptadores (Capa de Infraestructura)
    // Los pesos son un recurso obligatorio: si no resuelven, arrancar falla aquí.
    let weights = env_or("PEST_MODEL_PATH", "models/yolov8n.onnx");
    let model = ModelId {
        name: Path::new(&weights)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "yolo".to_string()),
        onnx_path: weights,
    };
    let facade = Arc::new(YoloFacade::from_weights(model, YoloParams::default())?);

    let annotator = Arc::new(BoxAnnotator::new(&env_or(
        "PEST_FONT_PATH",
        "assets/DejaVuSans.ttf",
    )));
    let treatments = Arc::new(JsonTreatmentCatalog::load(&env_or(
        "PEST_TREATMENTS_PATH",
        "treat.json",
    ))?);

    // 3. Instanciar Servicios (Capa de Aplicación - Casos de Uso)
    let detection = Arc::new(DetectionService::new(facade, annotator, treatments));
    let static_dir = env_or("PEST_STATIC_DIR", "static");
    let site = Arc::new(SiteService::new(&static_dir));

    // 4. Configurar el Estado de la API
    let state = HttpState { detection, site };

    // 5. Configurar el Router de Axum y Archivos Estáticos
    let app = router(state).fallback_service(ServeDir::new(&static_dir));

    // 6. Lanzar el Servidor
    let port = 8090;
    let addr = format!("0.0.0.0:{}", port);

    tracing::info!("🚀 Panel de detección de plagas en http://{}", addr);
    tracing::info!("📂 Archivos estáticos servidos desde '{}'", static_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
