//! About-the-project page.

use leptos::prelude::*;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="about-page">
            <h1 class="about-page__headline">"About The Project"</h1>
            <p class="about-page__body">
                <span class="name-highlight">"A Fleet Among Angels"</span>
                " is a student game project: a grid-based space combat game with a hub world, "
                "an AI opponent, and persistent player accounts."
            </p>
            <p class="about-page__body">
                "This site hosts the project log and the playable demo. Sign in to reach the demo."
            </p>
        </div>
    }
}
