use super::super::Model;
use calorie_shared::model::size_label;
use yew::prelude::*;

/// Contents of the upload area: the current preview, or the upload prompt.
pub fn render_preview_area(model: &Model) -> Html {
    if let Some(preview) = model.controller.preview() {
        return html! {
            <div class="preview-frame">
                <img id="actual-image-preview"
                    src={preview.data_url.clone()}
                    alt="Food preview"
                    title={format!("{} x {}", preview.width, preview.height)} />
            </div>
        };
    }

    if model.controller.is_analyzing() {
        return html! {
            <div class="loading-preview">
                <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
                <p>{"Loading preview..."}</p>
            </div>
        };
    }

    html! {
        <div class="upload-placeholder">
            <i class="fa-solid fa-cloud-arrow-up"></i>
            <p>{"Click to upload or drag and drop"}</p>
            <p class="file-types">{ limit_hint(model.config.intake.max_upload_bytes) }</p>
        </div>
    }
}

fn limit_hint(max_upload_bytes: Option<u64>) -> String {
    match max_upload_bytes {
        Some(limit) => format!("PNG, JPG up to {}", size_label(limit)),
        None => "PNG, JPG".to_string(),
    }
}
