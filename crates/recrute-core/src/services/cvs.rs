use std::path::Path;

use recrute_types::Cv;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use tracing::debug;

use super::segment;
use crate::api;
use crate::error::{SessionError, SessionResult};
use crate::session::SessionManager;

/// Upload size accepted by the API (10 MiB).
pub const MAX_CV_BYTES: usize = 10 * 1024 * 1024;

/// Résumés of the signed-in candidate (`/cvs`).
pub struct CvsApi<'a> {
    session: &'a SessionManager,
}

impl<'a> CvsApi<'a> {
    pub fn new(session: &'a SessionManager) -> Self {
        Self { session }
    }

    /// Uploads a PDF résumé for server-side extraction.
    ///
    /// Non-PDF files and files over [`MAX_CV_BYTES`] are rejected before any
    /// request is made.
    pub async fn upload(&self, file: &Path, metadata: Option<&Value>) -> SessionResult<Cv> {
        let is_pdf = file
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(SessionError::Validation("a PDF file is required".to_string()));
        }

        let bytes = tokio::fs::read(file)
            .await
            .map_err(|source| SessionError::File {
                path: file.to_path_buf(),
                source,
            })?;
        if bytes.len() > MAX_CV_BYTES {
            return Err(SessionError::Validation(
                "file too large (max 10 MB)".to_string(),
            ));
        }

        let file_name = file
            .file_name()
            .map_or_else(|| "cv.pdf".to_string(), |n| n.to_string_lossy().into_owned());
        debug!(file = %file_name, size = bytes.len(), "uploading cv");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let mut form = Form::new().part("file", part);
        if let Some(metadata) = metadata {
            form = form.text("metadata", metadata.to_string());
        }

        let request = self.session.api().post("/cvs/upload").multipart(form);
        let response = self.session.send(request).await?;
        api::decode_json(response).await
    }

    pub async fn mine(&self) -> SessionResult<Vec<Cv>> {
        let response = self
            .session
            .send(self.session.api().get("/cvs/my-cvs"))
            .await?;
        api::decode_list(response).await
    }

    pub async fn get(&self, cv_id: &str) -> SessionResult<Cv> {
        let path = format!("/cvs/{}", segment(cv_id));
        let response = self.session.send(self.session.api().get(&path)).await?;
        api::decode_json(response).await
    }

    pub async fn delete(&self, cv_id: &str) -> SessionResult<()> {
        let path = format!("/cvs/{}", segment(cv_id));
        self.session.send(self.session.api().delete(&path)).await?;
        Ok(())
    }

    /// Re-indexes a structured CV for semantic search.
    pub async fn index(&self, cv_id: &str, cv_json: &Value, metadata: &Value) -> SessionResult<()> {
        let request = self.session.api().post("/cvs/index").json(&json!({
            "cv_id": cv_id,
            "cv_json": cv_json,
            "metadata": metadata,
        }));
        self.session.send(request).await?;
        Ok(())
    }
}
