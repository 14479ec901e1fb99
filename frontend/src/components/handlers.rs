use super::super::{Model, Msg};
use super::utils::first_file;
use calorie_shared::{AnalysisError, FileMeta, InferenceError, UploadedImage};
use gloo_file::File as GlooFile;
use gloo_file::futures::read_as_bytes;
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

pub fn handle_file_selected(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    let meta = FileMeta::new(file.name(), file.raw_mime_type(), file.size());

    let cycle = match model.controller.begin(&meta) {
        Ok(cycle) => cycle,
        Err(err) => {
            log::warn!("Selection {} rejected: {}", meta.name, err.kind());
            return true;
        }
    };

    let pipeline = model.pipeline.clone();
    let link = ctx.link().clone();

    spawn_local(async move {
        let outcome = match read_as_bytes(&file).await {
            Ok(bytes) => {
                let upload = UploadedImage::new(&meta, bytes);
                let preview_link = link.clone();
                pipeline
                    .run(&upload, move |preview| {
                        preview_link.send_message(Msg::PreviewReady(cycle, preview))
                    })
                    .await
            }
            Err(e) => {
                let err = InferenceError::Read {
                    name: meta.name.clone(),
                    reason: e.to_string(),
                };
                log::error!("Cycle {}: {}", cycle, err);
                Err(AnalysisError::from(err))
            }
        };

        link.send_message(Msg::CycleFinished(cycle, outcome));
    });

    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(file) = event
        .data_transfer()
        .and_then(|data_transfer| data_transfer.files())
        .as_ref()
        .and_then(first_file)
    {
        ctx.link().send_message(Msg::FileSelected(file));
    }

    true
}
