//! OpenAPI document assembly.

use crate::api::handlers;
use crate::api::models::uploads::{UploadEvent, UploadReceipt};
use crate::errors::ErrorBody;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::uploads::handle_upload),
    components(schemas(UploadEvent, UploadReceipt, ErrorBody)),
    tags((name = "uploads", description = "Payload upload and storage"))
)]
pub struct ApiDoc;
