use yew::prelude::*;

pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-utensils"></i>{" Food Calorie Calculator"}</h1>
            <p class="subtitle">{"Upload a photo of your food to estimate calories"}</p>
        </header>
    }
}
