use super::super::Model;
use yew::prelude::*;

pub fn render_analyzing(model: &Model) -> Html {
    if model.controller.is_analyzing() {
        html! {
            <div class="analyzing-indicator">
                <i class="fa-solid fa-spinner fa-spin"></i>
                <span class="pulse">{" Analyzing your food..."}</span>
            </div>
        }
    } else {
        html! {}
    }
}

pub fn render_results(model: &Model) -> Html {
    let Some(result) = model.controller.state().result() else {
        return html! {};
    };

    html! {
        <div class="results-container">
            <h2>{"Analysis Results"}</h2>
            <div class="result-item">
                <div class="result-label">{"Detected Food:"}</div>
                <div class="result-value">{ result.detected_food.clone() }</div>
            </div>
            <div class="result-item">
                <div class="result-label">{"Confidence:"}</div>
                <div class="result-value">{ result.confidence_label() }</div>
            </div>
            <div class="result-item">
                <div class="result-label">{"Detected Objects:"}</div>
                <div class="result-value">{ result.objects_label() }</div>
            </div>
            <div class="result-item calories">
                <div class="result-label">{"Estimated Calories:"}</div>
                <div class="result-value">{ format!("{} kcal", result.calories) }</div>
            </div>
        </div>
    }
}
