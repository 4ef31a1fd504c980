use axum::{
    extract::{FromRequest, Multipart, Request},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::types::forms::{CustomerForm, UploadedFile};

/// Multipart customer submission: `name_customer`, `email` and an optional `file`.
pub struct CustomerSubmission(pub CustomerForm);

impl<S> FromRequest<S> for CustomerSubmission
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let mut form = CustomerForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(IntoResponse::into_response)?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("name_customer") => {
                    form.name = Some(field.text().await.map_err(IntoResponse::into_response)?);
                }
                Some("email") => {
                    form.email = Some(field.text().await.map_err(IntoResponse::into_response)?);
                }
                Some("file") => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(IntoResponse::into_response)?;
                    // browsers send an unnamed empty part when nothing was picked
                    if !file_name.is_empty() {
                        form.file = Some(UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        });
                    }
                }
                other => {
                    debug!(field = ?other, "ignoring unknown customer form field");
                }
            }
        }
        Ok(CustomerSubmission(form))
    }
}
