//! Authenticated landing page hosting the demo placeholder.

use leptos::prelude::*;

use crate::components::session_gate::SessionGate;
use crate::util::auth::SIGN_IN_ROUTE;

#[component]
pub fn DemoPage() -> impl IntoView {
    view! {
        <div class="demo-page">
            <h1 class="demo-page__headline">"Demo Placeholder"</h1>
            <p class="demo-page__body">
                "Placeholder line above the demo screen. The screen will lead into the login/user auth and then the main menu."
            </p>
            <div class="demo-page__screen">
                <h2 class="demo-page__title">"Demo"</h2>
            </div>
            <SessionGate
                anonymous=|| view! { <a href=SIGN_IN_ROUTE class="demo-page__sign-in">"Sign in to play"</a> }
                placeholder=|| view! { <p class="demo-page__loading">"Checking session..."</p> }
            >
                <button class="demo-page__play">"PLAY DEMO"</button>
            </SessionGate>
        </div>
    }
}
