use crate::helpers::file_storage::extension_for;
use crate::helpers::{FileStorage, JsonResponse, Namespace};
use actix_files::NamedFile;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{get, web, HttpRequest, Result};

/// Extension of a raw image upload, taken from its content type.
pub(crate) fn upload_extension(req: &HttpRequest, body: &[u8]) -> Result<&'static str> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let extension = extension_for(content_type).ok_or_else(|| {
        JsonResponse::<()>::build().bad_request(format!("Unsupported image type `{}`", content_type))
    })?;
    if body.is_empty() {
        return Err(JsonResponse::<()>::build().bad_request("Image is empty"));
    }

    Ok(extension)
}

#[tracing::instrument(name = "Serve stored file.", skip(storage))]
#[get("/{namespace}/{key}")]
pub async fn file_handler(
    path: web::Path<(String, String)>,
    storage: web::Data<FileStorage>,
) -> Result<NamedFile> {
    let (namespace, key) = path.into_inner();
    let not_found = || JsonResponse::<()>::build().not_found("File not found");

    let namespace = namespace.parse::<Namespace>().map_err(|_| not_found())?;
    let path = storage.path(namespace, &key).map_err(|_| not_found())?;

    NamedFile::open_async(path).await.map_err(|_| not_found())
}
