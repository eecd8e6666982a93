//! QR code pointing visitors at the ticket page.

use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use crate::state::AppState;

/// Pixels per QR module.
const MODULE_SIZE: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum QrRenderError {
    #[error("Failed to encode QR data: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Failed to write PNG: {0}")]
    Image(#[from] image::ImageError),
}

/// Render `url` as a black-on-white PNG with a quiet zone.
pub fn render_qr_png(url: &str) -> Result<Vec<u8>, QrRenderError> {
    let code = QrCode::new(url.as_bytes())?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_SIZE, MODULE_SIZE)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

pub async fn qr_code(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let url = &state.config().server.public_url;
    match render_qr_png(url) {
        Ok(png) => (StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Err(e) => {
            tracing::error!(url = %url, "Failed to render QR code: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
