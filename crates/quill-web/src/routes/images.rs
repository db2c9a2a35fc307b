use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use quill_client::ClientError;
use tracing::warn;

use crate::error::WebError;
use crate::middleware::session::{close_session, SiteState};

pub fn routes(_state: SiteState) -> Router<SiteState> {
    Router::new().route("/api/v1/images", post(upload_image))
}

struct ImageFile {
    filename: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

async fn read_image(mut multipart: Multipart) -> Result<ImageFile, WebError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| WebError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let contentType = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| WebError::BadRequest(e.to_string()))?;
        return Ok(ImageFile {
            filename,
            content_type: contentType,
            bytes: bytes.to_vec(),
        });
    }
    Err(WebError::BadRequest("no image field in upload".into()))
}

/// Forwards an editor image upload to the backend with the session's token.
async fn upload_image(
    State(state): State<SiteState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let mut store = state.cookie_store(&headers);

    let result = async {
        let token = state.session_token(&mut store)?;
        let image = read_image(multipart).await?;
        let uploaded = state
            .api
            .upload_image(
                &token,
                &image.filename,
                image.content_type.as_deref(),
                image.bytes,
            )
            .await?;
        Ok::<_, WebError>(uploaded)
    }
    .await;

    let mut response = match result {
        Ok(uploaded) => Json(uploaded).into_response(),
        Err(e) => {
            if let WebError::Client(ClientError::Unauthorized) = e {
                close_session(&mut store);
            }
            warn!("image upload failed: {e}");
            e.into_response()
        }
    };
    store.apply(response.headers_mut());
    response
}
