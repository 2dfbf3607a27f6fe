//! Shared Widgets
//!
//! Small pieces every page renders, plus the timer hooks that tie polling
//! and tab-visibility refreshes to a page's lifetime.

use gloo_timers::callback::Interval;
use leptos::prelude::*;

use crate::browser;
use crate::context::AppContext;
use crate::view_model::{Badge, ProgressView};

// ========================
// Hooks
// ========================

/// Call `tick` every `ms` until the calling component is disposed
pub fn use_interval(ms: u32, tick: impl FnMut() + 'static) {
    // dropping the Interval cancels it; the stored value drops with the owner
    let _timer = StoredValue::new_local(Interval::new(ms, tick));
}

/// Call `on_visible` whenever the tab comes back into view
pub fn use_tab_visible(on_visible: impl FnMut() + 'static) {
    match browser::on_tab_visible(on_visible) {
        Ok(listener) => {
            let _listener = StoredValue::new_local(listener);
        }
        Err(e) => log::warn!("[APP] visibility listener not installed: {}", e),
    }
}

// ========================
// Widgets
// ========================

#[component]
pub fn UrgencyBadge(badge: Badge) -> impl IntoView {
    view! {
        <span class=badge.class>{badge.icon} " " {badge.label}</span>
    }
}

/// Labelled progress bar used on need cards
#[component]
pub fn ProgressBar(progress: ProgressView) -> impl IntoView {
    view! {
        <div class="progress-section">
            <div class="progress-info">
                <span class="progress-label">"Progress"</span>
                <span class="progress-percentage">{progress.label()}</span>
            </div>
            <div class="progress-bar">
                <div class="progress-fill" style=progress.width_style()></div>
            </div>
        </div>
    }
}

#[component]
pub fn EmptyState(
    #[prop(into)] icon: String,
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="empty-state">
            <div class="empty-icon"><i class=icon></i></div>
            <h3>{title}</h3>
            <p>{message}</p>
            {children.map(|children| children())}
        </div>
    }
}

/// Load failure panel with a retry action
#[component]
pub fn ErrorState(
    #[prop(into)] title: String,
    message: String,
    #[prop(into)] on_retry: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="error-state">
            <div class="error-icon"><i class="fas fa-exclamation-triangle"></i></div>
            <h3>{title}</h3>
            <p>{message}</p>
            <button class="btn btn-primary" on:click=move |_| on_retry.run(())>
                <i class="fas fa-redo"></i>
                " Try Again"
            </button>
        </div>
    }
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="toast-stack">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class="toast toast-success">
                            <i class="fas fa-check-circle"></i>
                            <span>{toast.message}</span>
                            <button class="toast-close" on:click=move |_| ctx.dismiss_toast(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[component]
pub fn LoadingOverlay() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class=move || if ctx.is_loading() { "loading-overlay" } else { "loading-overlay hidden" }>
            <div class="spinner"></div>
        </div>
    }
}
