//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::net::identity::HttpIdentityProvider;
use crate::pages::{
    about::AboutPage, demo::DemoPage, home::HomePage, progress::ProgressPage, sign_in::SignInPage,
    sign_up::SignUpPage,
};
use crate::state::auth::Session;

/// How often the browser re-reads the server session.
#[cfg(feature = "hydrate")]
const SESSION_REFRESH_INTERVAL: std::time::Duration = std::time::Duration::from_secs(30);

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session signal and the identity provider, then keeps the
/// session in step with the server while the app runs in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(Session::default());
    let provider = HttpIdentityProvider;
    provide_context(session);
    provide_context(provider);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        crate::util::auth::watch_session(&provider, &session, || async {
            gloo_timers::future::sleep(SESSION_REFRESH_INTERVAL).await;
            true
        })
        .await;
    });

    view! {
        <Title text="A Fleet Among Angels"/>

        <Router>
            <NavBar/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("AboutTheProject") view=AboutPage/>
                <Route path=StaticSegment("Progress") view=ProgressPage/>
                <Route path=StaticSegment("Demo") view=DemoPage/>
                <Route path=StaticSegment("SignIn") view=SignInPage/>
                <Route path=StaticSegment("SignUp") view=SignUpPage/>
            </Routes>
        </Router>
    }
}
