mod components;
mod runtime;

use calorie_shared::{
    AnalysisConfig, AnalysisError, CalorieResult, CycleId, ImagePreview, WorkflowController,
};
use components::handlers;
use components::header::render_header;
use components::results::{render_analyzing, render_results};
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_file::File as GlooFile;
use runtime::WebPipeline;
use std::rc::Rc;
use web_sys::DragEvent;
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // Input events
    FileSelected(GlooFile),
    HandleDrop(DragEvent),
    SetDragging(bool),

    // Analysis cycle
    PreviewReady(CycleId, ImagePreview),
    CycleFinished(CycleId, Result<CalorieResult, AnalysisError>),
}

// Main component
pub struct Model {
    controller: WorkflowController,
    pipeline: Rc<WebPipeline>,
    config: Rc<AnalysisConfig>,
    is_dragging: bool,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let config = runtime::load_config();
        Self {
            controller: WorkflowController::new(config.intake.clone()),
            pipeline: Rc::new(runtime::build_pipeline(&config)),
            config: Rc::new(config),
            is_dragging: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(file) => handlers::handle_file_selected(self, ctx, file),
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            Msg::PreviewReady(cycle, preview) => self.controller.show_preview(cycle, preview),
            Msg::CycleFinished(cycle, outcome) => self.controller.finish(cycle, outcome),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                    { render_upload_section(self, ctx) }
                    { render_error_message(self) }
                    { render_analyzing(self) }
                    { render_results(self) }
                </main>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.controller.reset();
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Food calorie calculator starting...");
    yew::Renderer::<Model>::new().render();
}
