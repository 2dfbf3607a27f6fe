//! Application Context
//!
//! Shared state provided via Leptos Context API. Built once by the root
//! component; every page reads the API client, timings and notification
//! surfaces from here.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::api::ApiClient;
use crate::config::ClientConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<ClientConfig>,
    api: StoredValue<ApiClient, LocalStorage>,
    /// Visible notifications, oldest first
    pub toasts: RwSignal<Vec<Toast>>,
    next_toast: StoredValue<u64>,
    /// Number of actions currently holding the loading overlay
    overlay: RwSignal<u32>,
}

impl AppContext {
    pub fn new(config: ClientConfig, api: ApiClient) -> Self {
        Self {
            config: StoredValue::new(config),
            api: StoredValue::new_local(api),
            toasts: RwSignal::new(Vec::new()),
            next_toast: StoredValue::new(0),
            overlay: RwSignal::new(0),
        }
    }

    /// Cheap clone; the underlying HTTP client is shared
    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    pub fn with_config<R>(&self, f: impl FnOnce(&ClientConfig) -> R) -> R {
        self.config.with_value(f)
    }

    // ========================
    // Toasts
    // ========================

    /// Success notification, removed again after the configured delay
    pub fn toast(&self, message: impl Into<String>) {
        self.next_toast.update_value(|n| *n += 1);
        let id = self.next_toast.get_value();
        let message = message.into();
        self.toasts.update(|toasts| toasts.push(Toast { id, message }));

        let ctx = *self;
        Timeout::new(self.with_config(|c| c.toast_ms), move || ctx.dismiss_toast(id)).forget();
    }

    /// Remove a toast; a no-op when it already expired or the app is gone
    pub fn dismiss_toast(&self, id: u64) {
        self.toasts.try_update(|toasts| toasts.retain(|t| t.id != id));
    }

    // ========================
    // Loading Overlay
    // ========================

    /// Show the overlay until the returned guard drops
    pub fn show_loading(&self) -> LoadingGuard {
        self.overlay.update(|n| *n += 1);
        LoadingGuard { overlay: self.overlay }
    }

    pub fn is_loading(&self) -> bool {
        self.overlay.get() > 0
    }
}

#[must_use]
pub struct LoadingGuard {
    overlay: RwSignal<u32>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.overlay.try_update(|n| *n = n.saturating_sub(1));
    }
}
