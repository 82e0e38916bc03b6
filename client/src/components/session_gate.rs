//! Session-gated view switch.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the `RwSignal<Session>` context and renders exactly one of its three
//! variants. The variant is memoized so a session refresh that keeps the same
//! variant does not rebuild the children.

#[cfg(test)]
#[path = "session_gate_test.rs"]
mod session_gate_test;

use leptos::prelude::*;

use crate::state::auth::Session;
use crate::util::auth::{GateVariant, gate_variant};

/// Memoized variant for `session`; reruns only when the variant changes.
pub fn gate_variant_memo(session: RwSignal<Session>) -> Memo<GateVariant> {
    Memo::new(move |_| gate_variant(&session.get()))
}

/// Render `children` for a signed-in user, `anonymous` otherwise, and
/// `placeholder` until the provider has reported.
#[component]
pub fn SessionGate(
    children: ChildrenFn,
    #[prop(into)] anonymous: ViewFn,
    #[prop(optional, into)] placeholder: ViewFn,
) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let variant = gate_variant_memo(session);

    move || match variant.get() {
        GateVariant::Placeholder => placeholder.run(),
        GateVariant::Anonymous => anonymous.run(),
        GateVariant::Authenticated => children(),
    }
}
