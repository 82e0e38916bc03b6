//! Site navigation bar with the session-gated sign-in / sign-out affordance.

use leptos::prelude::*;

use crate::components::session_gate::SessionGate;
use crate::net::identity::HttpIdentityProvider;
use crate::state::auth::Session;
use crate::util::auth::{AUTHENTICATED_ROUTE, SIGN_IN_ROUTE};

#[component]
pub fn NavBar() -> impl IntoView {
    view! {
        <nav class="navbar">
            <div class="navbar__links">
                <a href="/" class="navbar__link navbar__link--home">"Home"</a>
                <a href="/AboutTheProject" class="navbar__link">"About"</a>
                <a href="/Progress" class="navbar__link">"Progress"</a>
            </div>
            <div class="navbar__logo"></div>
            <div class="navbar__links">
                <a href=AUTHENTICATED_ROUTE class="navbar__demo">"PLAY DEMO"</a>
                <SessionGate anonymous=|| {
                    view! { <a href=SIGN_IN_ROUTE class="navbar__link">"Sign In"</a> }
                }>
                    <SignOutButton/>
                </SessionGate>
            </div>
        </nav>
    }
}

/// Sign-out control shown to a signed-in user, with their label.
#[component]
fn SignOutButton() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let provider = expect_context::<HttpIdentityProvider>();
    let busy = RwSignal::new(false);

    let label = move || {
        session
            .get()
            .identity()
            .map(|identity| identity.label().to_owned())
            .unwrap_or_default()
    };

    let on_sign_out = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            if let Err(e) = crate::util::auth::sign_out(&provider, &session).await {
                leptos::logging::warn!("sign-out failed: {e}");
            }
            busy.set(false);
        });

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (provider, session);
            busy.set(false);
        }
    };

    view! {
        <span class="navbar__user">{label}</span>
        <button class="navbar__sign-out" disabled=move || busy.get() on:click=on_sign_out>
            "Sign Out"
        </button>
    }
}
