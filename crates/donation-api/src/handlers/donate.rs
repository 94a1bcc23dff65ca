//! Donation form and submission handlers

use axum::extract::{Multipart, State};
use axum::response::Html;
use donation_core::{fields, DonationForm, DonationSubmission};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /donate
/// Serve the donation form
pub async fn donation_form(State(state): State<AppState>) -> Html<String> {
    Html(state.form_page().to_string())
}

/// POST /donate
/// Accept a donation: store the image, classify it, acknowledge the donor
pub async fn submit_donation(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<String, ApiError> {
    let submission = read_submission(&mut multipart).await?;

    let image_path = state.uploads().save(&submission.food_image).await?;
    let freshness = state.predictor().predict(&image_path).await?;

    tracing::info!(
        name = %submission.name,
        food_type = %submission.food_type,
        path = %image_path.display(),
        size = submission.food_image.data.len(),
        predictor = state.predictor().name(),
        freshness = %freshness,
        "Donation received"
    );

    Ok(submission.acknowledgement(&freshness))
}

/// Read every part of the request before anything is written, so an
/// incomplete submission never reaches the upload directory.
async fn read_submission(multipart: &mut Multipart) -> Result<DonationSubmission, ApiError> {
    let mut form = DonationForm::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == fields::FOOD_IMAGE {
            // A plain text part, or a file input the browser submitted with
            // nothing selected (`filename=""`), is not an upload
            match field.file_name().filter(|f| !f.is_empty()).map(str::to_string) {
                Some(filename) => {
                    let data = field.bytes().await?;
                    form.set_image(filename, data);
                }
                None => tracing::debug!("Ignoring food_image part without a file"),
            }
        } else {
            let value = field.text().await?;
            if !form.set_text(&name, value) {
                tracing::trace!(field = %name, "Ignoring unknown form field");
            }
        }
    }

    Ok(form.finish()?)
}
