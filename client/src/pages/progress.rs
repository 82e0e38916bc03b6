//! Development log page.

use leptos::prelude::*;

/// Completed milestones, newest last.
const MILESTONES: [&str; 4] = [
    "Core gameplay mechanics: Movement and attacks have been implemented as well as the grid.",
    "Enemy AI has been implemented and the player can play against it.",
    "Health bars for both player and AI.",
    "Database implementation is in the works.",
];

/// `(month, entries)` for the record of changes.
const CHANGES: [(&str, &[&str]); 1] = [(
    "August",
    &["Space hub that serves as the Main Menu", "Character concept art and backstory creation"],
)];

#[component]
pub fn ProgressPage() -> impl IntoView {
    view! {
        <div class="progress-page">
            <div class="progress-page__header">
                <h1 class="progress-page__title">"Progress & Development"</h1>
            </div>
            <div class="progress-page__body">
                <p>
                    <span class="name-highlight">"A Fleet Among Angels"</span>
                    " is actively under development. The game is still in the "
                    <strong>"early stages"</strong>
                    " of development."
                </p>
                <p>"We are actively working to have the game done by the end of the year. Here is some of our progress:"</p>
                <ul class="progress-page__milestones">
                    {MILESTONES.into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
                </ul>
                <h2 class="progress-page__record">"Record of Changes"</h2>
                {CHANGES
                    .into_iter()
                    .map(|(month, entries)| {
                        view! {
                            <section class="progress-page__month">
                                <h3>{format!("{month}:")}</h3>
                                {entries
                                    .iter()
                                    .map(|entry| view! { <p class="progress-page__entry">{format!("-- {entry} --")}</p> })
                                    .collect_view()}
                            </section>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
