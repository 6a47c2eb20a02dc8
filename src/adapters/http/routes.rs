use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::adapters::http::state::HttpState;
use crate::application::dto::{ContactRequest, OkResponse, SetClassesRequest};
use crate::domain::{
    errors::DomainError,
    page::{ContactFormState, ContactSubmission, Page},
};

fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DomainError::OperationFailed(_) | DomainError::Inference(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn allowed_upload(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ext == "jpg" || ext == "jpeg" || ext == "png"
        })
        .unwrap_or(false)
}

pub async fn page_content(State(st): State<HttpState>, Path(page): Path<Page>) -> impl IntoResponse {
    let body = match page {
        Page::Home => json!({
            "title": "AI Powered Pest Management System",
            "subtitle": "Upload farm images to detect insects early and reduce pesticide use.",
            "how_it_works": [
                "Upload farm images to detect insects.",
                "YOLO object detection finds pests and draws their bounding boxes.",
                "Targeted interventions reduce overall pesticide use."
            ],
            "benefits": [
                "Early detection prevents widespread effects.",
                "Remote accessibility: use from anywhere.",
                "Cost-effective: reduces manual inspection.",
                "Community support: share insights and learn together."
            ],
            "hero_images": ["/l.jpg", "/h.jpeg"]
        }),
        Page::Detection => json!({
            "title": "Pest Detection",
            "subtitle": "Upload an image to detect insects.",
            "accepted_types": ["jpg", "jpeg", "png"]
        }),
        Page::About => json!({
            "title": "About This Project",
            "description": "AI-based pest detection using YOLO behind a web dashboard, \
                            built to support smart farming and early pest management.",
            "gallery": st.site.gallery()
        }),
        Page::Contact => json!({
            "title": "Contact Us",
            "description": "Feel free to reach out for questions, collaborations, or feedback!"
        }),
    };
    Json(body)
}

pub async fn detect(State(st): State<HttpState>, mut multipart: Multipart) -> impl IntoResponse {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("image") {
            let file_name = field.file_name().unwrap_or_default().to_string();
            match field.bytes().await {
                Ok(bytes) => upload = Some((file_name, bytes.to_vec())),
                Err(e) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(json!({ "error": format!("upload failed: {e}") })),
                    )
                        .into_response()
                }
            }
            break;
        }
    }

    let Some((file_name, bytes)) = upload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing 'image' field" })),
        )
            .into_response();
    };

    if !allowed_upload(&file_name) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "unsupported file type, expected jpg, jpeg or png" })),
        )
            .into_response();
    }

    match st.detection.detect(&bytes).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => (status_for(&e), Json(json!({ "error": e.to_string() }))).into_response(),
    }
}

pub async fn submit_contact(
    State(st): State<HttpState>,
    Json(req): Json<ContactRequest>,
) -> impl IntoResponse {
    let submission: ContactSubmission = req.into();
    match st.site.submit_contact(&submission) {
        ContactFormState::SubmittedValid => Json(json!({
            "ok": true,
            "message": "Thank you for reaching out! We will get back to you soon."
        }))
        .into_response(),
        _ => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "ok": false,
                "error": "Please fill out all fields before submitting."
            })),
        )
            .into_response(),
    }
}

pub async fn model_info(State(st): State<HttpState>) -> impl IntoResponse {
    Json(st.detection.describe_model().await)
}

pub async fn set_classes(
    State(st): State<HttpState>,
    Json(req): Json<SetClassesRequest>,
) -> impl IntoResponse {
    match st.detection.set_classes(req.classes).await {
        Ok(()) => Json(OkResponse { ok: true }).into_response(),
        Err(e) => (status_for(&e), Json(json!({ "error": e.to_string() }))).into_response(),
    }
}
