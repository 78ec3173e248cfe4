use crate::services::ImagePart;
use crate::startup::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

/// Multipart field that carries the upload.
pub const IMAGE_FIELD: &str = "image";

/// Used when the part carries no `Content-Type`.
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Fixed instruction sent ahead of every image.
pub const ALT_TEXT_INSTRUCTION: &str = "Describe this image concisely and helpfully for a \
visually impaired person. Include the most important elements and the context of the scene. \
Be objective and avoid embellishment. Maximum 100 words.";

#[derive(Debug, Serialize, Deserialize)]
pub struct AltTextResponse {
    pub alt_text: String,
}

/// The file part of the form, fully buffered.
#[derive(Debug)]
pub struct UploadedImage {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// Find the `image` file part. Fields without a filename are plain form data and are skipped.
async fn read_image_field(multipart: &mut Multipart) -> Result<UploadedImage, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if file_name.is_empty() {
            return Err(AppError::BadRequest(anyhow::anyhow!("No image selected.")));
        }

        let mime_type = field
            .content_type()
            .unwrap_or(FALLBACK_MIME_TYPE)
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| {
                AppError::BadRequest(anyhow::anyhow!("Failed to read image bytes: {}", e))
            })?
            .to_vec();

        return Ok(UploadedImage {
            file_name,
            mime_type,
            data,
        });
    }

    Err(AppError::BadRequest(anyhow::anyhow!("No image uploaded.")))
}

/// `POST /generate_alt_text`
pub async fn generate_alt_text(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AltTextResponse>, AppError> {
    // A body that is not multipart at all cannot contain the image.
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Rejected non-multipart request");
        AppError::BadRequest(anyhow::anyhow!("No image uploaded."))
    })?;

    let upload = read_image_field(&mut multipart).await?;

    tracing::info!(
        file_name = %upload.file_name,
        mime_type = %upload.mime_type,
        size = upload.data.len(),
        "Generating alt text"
    );

    let image = ImagePart {
        mime_type: upload.mime_type,
        data: upload.data,
    };

    let response = state
        .vision_provider
        .generate(ALT_TEXT_INSTRUCTION, &image)
        .await
        // Logged once, when the error is rendered into a response.
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to process image: {}", e)))?;

    tracing::info!(
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "Alt text generated"
    );

    Ok(Json(AltTextResponse {
        alt_text: response.text,
    }))
}
