//! Sign-in page: email + password form and the federated popup button.
//!
//! SYSTEM CONTEXT
//! ==============
//! Form state lives in a page-local `RwSignal<SignInDraft>`. On success the
//! flow publishes the session and navigates to the authenticated route; on
//! failure the mapped message is shown and the entered email is kept.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::identity::HttpIdentityProvider;
use crate::state::auth::Session;
use crate::state::credentials::SignInDraft;
use crate::util::auth::SIGN_UP_ROUTE;

#[component]
pub fn SignInPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let provider = expect_context::<HttpIdentityProvider>();
    let draft = RwSignal::new(SignInDraft::default());
    let navigate = use_navigate();

    let on_submit = {
        let navigate = navigate.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let Some(credentials) = draft.try_update(SignInDraft::begin_submit).flatten() else {
                return;
            };

            #[cfg(feature = "hydrate")]
            {
                let navigate = navigate.clone();
                leptos::task::spawn_local(async move {
                    let go = move |path: &str| navigate(path, leptos_router::NavigateOptions::default());
                    let result = crate::util::auth::sign_in(&provider, &session, go, &credentials).await;
                    draft.try_update(|d| d.finish_submit(result.err().map(|e| crate::util::auth::sign_in_message(&e))));
                });
            }

            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (&navigate, credentials, provider, session);
                draft.update(|d| d.finish_submit(None));
            }
        }
    };

    let federated_busy = RwSignal::new(false);
    let on_google = move |_| {
        if federated_busy.get() {
            return;
        }
        federated_busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let go = move |path: &str| navigate(path, leptos_router::NavigateOptions::default());
                if let Err(e) = crate::util::auth::sign_in_federated(&provider, &session, go).await {
                    leptos::logging::error!("Failed to sign in: {e}");
                }
                federated_busy.try_set(false);
            });
        }

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = &navigate;
            federated_busy.set(false);
        }
    };

    let submitting = move || draft.with(|d| d.submitting);
    let error = move || draft.with(|d| d.error.clone());

    view! {
        <div class="sign-in-page">
            <div class="sign-in-card">
                <h1 class="sign-in-card__title">"A Fleet Among Angels"</h1>
                <form class="sign-in-form" on:submit=on_submit>
                    <input
                        class="sign-in-form__email"
                        type="email"
                        placeholder="Email"
                        required
                        prop:value=move || draft.with(|d| d.email.clone())
                        on:input=move |ev| draft.update(|d| d.email = event_target_value(&ev))
                    />
                    <input
                        class="sign-in-form__password"
                        type="password"
                        placeholder="Password"
                        required
                        prop:value=move || draft.with(|d| d.password.clone())
                        on:input=move |ev| draft.update(|d| d.password = event_target_value(&ev))
                    />
                    <button class="sign-in-form__submit" type="submit" disabled=submitting>
                        {move || if submitting() { "Signing In..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || error().is_some()>
                    <p class="sign-in-card__error">{move || error().unwrap_or_default()}</p>
                </Show>
                <p class="sign-in-card__or">"or"</p>
                <button class="sign-in-card__google" disabled=move || federated_busy.get() on:click=on_google>
                    "Sign In With Google"
                </button>
                <a href=SIGN_UP_ROUTE class="sign-in-card__sign-up">"Don't have an account? Sign Up"</a>
            </div>
        </div>
    }
}
