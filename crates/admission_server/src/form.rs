//! Multipart body decoding into a submission form.

use admission_core::{fields, AdmissionError, PhotoUpload, SubmissionForm};
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use log::debug;

/// Drains `multipart` into a [`SubmissionForm`].
///
/// Unknown fields are ignored. Only the first `photo` part with a non-empty
/// file name is kept; file parts under any other name are dropped.
pub async fn read_submission(mut multipart: Multipart) -> Result<SubmissionForm, AdmissionError> {
    let mut form = SubmissionForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let file_name = field.file_name().map(str::to_owned);

        if name == fields::PHOTO {
            let bytes = field.bytes().await.map_err(malformed)?;
            match file_name {
                Some(file_name) if !file_name.is_empty() && form.photo.is_none() => {
                    form.photo = Some(PhotoUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
                _ => {}
            }
            continue;
        }

        if file_name.is_some() {
            debug!("event=form_read module=server status=skipped reason=unexpected_file");
            continue;
        }

        let value = field.text().await.map_err(malformed)?;
        if !form.set_text(&name, value) {
            debug!("event=form_read module=server status=skipped reason=unknown_field");
        }
    }

    Ok(form)
}

fn malformed(err: MultipartError) -> AdmissionError {
    AdmissionError::MalformedForm(err.body_text())
}
