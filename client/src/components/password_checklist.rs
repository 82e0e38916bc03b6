//! Live pass/fail checklist for the password policy.

#[cfg(test)]
#[path = "password_checklist_test.rs"]
mod password_checklist_test;

use leptos::prelude::*;

use crate::util::password::{PasswordChecks, PasswordRule};

fn indicator(passed: bool) -> &'static str {
    if passed { "\u{2705}" } else { "\u{274c}" }
}

fn rule_class(passed: bool) -> &'static str {
    if passed {
        "password-rule password-rule--pass"
    } else {
        "password-rule password-rule--fail"
    }
}

/// One row per policy rule, recomputed whenever `checks` changes.
#[component]
pub fn PasswordChecklist(#[prop(into)] checks: Signal<PasswordChecks>) -> impl IntoView {
    view! {
        <div class="password-strength">
            {PasswordRule::ALL
                .into_iter()
                .map(|rule| {
                    let passed = move || checks.get().passes(rule);
                    view! {
                        <div class=move || rule_class(passed())>
                            {move || indicator(passed())}
                            " "
                            {rule.label()}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
