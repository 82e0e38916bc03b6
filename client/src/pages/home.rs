//! Landing page.

use leptos::prelude::*;

use crate::util::auth::AUTHENTICATED_ROUTE;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <h1 class="home-page__title">"A Fleet Among Angels"</h1>
            <p class="home-page__tagline">
                "A turn-based space tactics game. Command your ship, read the grid, outlast the fleet."
            </p>
            <a href=AUTHENTICATED_ROUTE class="home-page__play">"PLAY DEMO"</a>
        </div>
    }
}
