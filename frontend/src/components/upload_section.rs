use super::super::{Model, Msg};
use super::preview_area::render_preview_area;
use super::utils::{debounce, first_file};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

const FILE_INPUT_ID: &str = "file-input";
const CAMERA_INPUT_ID: &str = "camera-input";

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().as_ref().and_then(first_file);

        // Cleared so picking the same file again still fires `change`.
        input.set_value("");

        file.map(Msg::FileSelected)
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    html! {
        <div class="upload-section">
            <input
                type="file"
                id={FILE_INPUT_ID}
                accept="image/*"
                style="display: none;"
                onchange={handle_change.clone()}
            />
            <input
                type="file"
                id={CAMERA_INPUT_ID}
                accept="image/*"
                capture="environment"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, || trigger_input(FILE_INPUT_ID))}
            >
                { render_preview_area(model) }
            </div>

            <button
                id="camera-button"
                class="analyze-btn"
                onclick={debounce(300, || trigger_input(CAMERA_INPUT_ID))}
            >
                <i class="fa-solid fa-camera"></i>{" Take Photo"}
            </button>
        </div>
    }
}

fn trigger_input(id: &str) {
    let input = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id));

    if let Some(input) = input {
        if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
            html_input.click();
        }
    }
}
