use serde::{Deserialize, Serialize};

/// Páginas del panel. El conjunto es cerrado: la deserialización rechaza
/// cualquier otro valor, así que no existe "página desconocida" en tiempo
/// de ejecución.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    Detection,
    About,
    Contact,
}

/// Imágenes de referencia de la página "About". Las rutas son relativas al
/// directorio de estáticos; si alguna falta se avisa por imagen, nunca se
/// aborta la página completa.
pub const ABOUT_GALLERY: [(&str, &str); 6] = [
    ("Detection Results", "results.png"),
    ("Training Batch", "train_batch2.jpg"),
    ("Validation Batch", "val_batch2_labels.jpg"),
    ("F1 Curve", "F1_curve.png"),
    ("PR Curve", "PR_curve.png"),
    ("Confusion Matrix", "confusion_matrix.png"),
];

#[derive(Debug, Clone, Serialize)]
pub struct AboutImage {
    pub title: String,
    pub path: String,
    pub available: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Estado del formulario de contacto. Terminal por renderizado: no hay
/// reintentos ni persistencia de envíos anteriores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactFormState {
    Idle,
    SubmittedValid,
    SubmittedInvalid,
}

impl ContactSubmission {
    pub fn submit(&self) -> ContactFormState {
        let complete = !self.name.is_empty()
            && !self.email.is_empty()
            && !self.subject.is_empty()
            && !self.message.is_empty();
        if complete {
            ContactFormState::SubmittedValid
        } else {
            ContactFormState::SubmittedInvalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, subject: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn all_fields_present_is_valid() {
        let sub = submission("Ada", "ada@example.com", "Pests", "Found aphids");
        assert_eq!(sub.submit(), ContactFormState::SubmittedValid);
    }

    #[test]
    fn each_single_empty_field_is_invalid() {
        let cases = [
            submission("", "ada@example.com", "Pests", "Found aphids"),
            submission("Ada", "", "Pests", "Found aphids"),
            submission("Ada", "ada@example.com", "", "Found aphids"),
            submission("Ada", "ada@example.com", "Pests", ""),
        ];
        for sub in cases {
            assert_eq!(sub.submit(), ContactFormState::SubmittedInvalid);
        }
    }

    #[test]
    fn page_names_parse_into_the_closed_set() {
        let page: Page = serde_json::from_str("\"detection\"").unwrap();
        assert_eq!(page, Page::Detection);
        assert!(serde_json::from_str::<Page>("\"settings\"").is_err());
    }
}
