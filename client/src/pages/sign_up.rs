//! Sign-up page with live password-policy feedback.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every password keystroke goes through `SignUpDraft::set_password`, which
//! recomputes the policy checks. The submit button is disabled until the
//! policy passes, and `begin_submit` refuses as well, so account creation is
//! never called with a rejected password.

#[cfg(test)]
#[path = "sign_up_test.rs"]
mod sign_up_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::password_checklist::PasswordChecklist;
use crate::net::identity::HttpIdentityProvider;
use crate::state::auth::Session;
use crate::state::credentials::SignUpDraft;
use crate::util::auth::SIGN_IN_ROUTE;

fn password_input_class(draft: &SignUpDraft) -> &'static str {
    if draft.shows_invalid() {
        "sign-up-form__password invalid"
    } else {
        "sign-up-form__password"
    }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let provider = expect_context::<HttpIdentityProvider>();
    let draft = RwSignal::new(SignUpDraft::default());
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(credentials) = draft.try_update(SignUpDraft::begin_submit).flatten() else {
            return;
        };

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let go = move |path: &str| navigate(path, leptos_router::NavigateOptions::default());
                let result = crate::util::auth::sign_up(&provider, &session, go, &credentials).await;
                if let Err(e) = &result {
                    leptos::logging::error!("sign-up failed: {e}");
                }
                draft.try_update(|d| d.finish_submit(result.err().map(|e| crate::util::auth::sign_up_message(&e))));
            });
        }

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&navigate, credentials, provider, session);
            draft.update(|d| d.finish_submit(None));
        }
    };

    let checks = Signal::derive(move || draft.with(SignUpDraft::checks));
    let error = move || draft.with(|d| d.error.clone());

    view! {
        <div class="sign-up-page">
            <div class="sign-up-card">
                <h1 class="sign-up-card__title">"A Fleet Among Angels"</h1>
                <form class="sign-up-form" on:submit=on_submit>
                    <input
                        class="sign-up-form__email"
                        type="email"
                        placeholder="Email"
                        required
                        prop:value=move || draft.with(|d| d.email.clone())
                        on:input=move |ev| draft.update(|d| d.email = event_target_value(&ev))
                    />
                    <input
                        class=move || draft.with(password_input_class)
                        type="password"
                        placeholder="Password"
                        required
                        prop:value=move || draft.with(|d| d.password().to_owned())
                        on:input=move |ev| draft.update(|d| d.set_password(event_target_value(&ev)))
                    />
                    <PasswordChecklist checks=checks/>
                    <button
                        class="sign-up-form__submit"
                        type="submit"
                        disabled=move || !draft.with(SignUpDraft::can_submit)
                    >
                        "Sign Up"
                    </button>
                </form>
                <Show when=move || error().is_some()>
                    <p class="sign-up-card__error">{move || error().unwrap_or_default()}</p>
                </Show>
                <a href=SIGN_IN_ROUTE class="sign-up-card__sign-in">"Already have an account? Sign In"</a>
            </div>
        </div>
    }
}
