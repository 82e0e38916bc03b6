//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared `RwSignal<Session>` context; none of them
//! write to it directly.

pub mod nav_bar;
pub mod password_checklist;
pub mod session_gate;
