//! Relief Connect App
//!
//! Root component. Builds the shared context once and mounts the page that
//! matches the document's path.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::browser;
use crate::components::{DashboardPage, DonorPage, LoadingOverlay, ToastStack, VolunteerPage};
use crate::config::ClientConfig;
use crate::context::AppContext;

/// Which page controller a document gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Donor,
    Volunteer,
    Landing,
}

impl Page {
    /// `/donor` and `/donor.html` both select the donor page; anything
    /// unrecognized gets the landing view
    pub fn from_path(path: &str) -> Self {
        let name = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
        match name.strip_suffix(".html").unwrap_or(name) {
            "dashboard" => Page::Dashboard,
            "donor" => Page::Donor,
            "volunteer" => Page::Volunteer,
            _ => Page::Landing,
        }
    }
}

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let page = Page::from_path(&browser::pathname());
    let api = ApiClient::new(config.api_base_or(&browser::origin()));
    log::info!("[APP] Mounting {:?} page, API at {}", page, api.url(""));

    // Provide context to all children
    provide_context(AppContext::new(config, api));

    view! {
        <div class="app-layout">
            {match page {
                Page::Dashboard => view! { <DashboardPage /> }.into_any(),
                Page::Donor => view! { <DonorPage /> }.into_any(),
                Page::Volunteer => view! { <VolunteerPage /> }.into_any(),
                Page::Landing => view! { <Landing /> }.into_any(),
            }}
            <ToastStack />
            <LoadingOverlay />
        </div>
    }
}

#[component]
fn Landing() -> impl IntoView {
    view! {
        <main class="landing">
            <h1>"AidConnect"</h1>
            <p>"Connecting relief camps with the people who can help."</p>
            <nav class="landing-links">
                <a class="btn btn-primary" href="/donor.html"><i class="fas fa-heart"></i> " I want to donate"</a>
                <a class="btn btn-outline" href="/volunteer.html"><i class="fas fa-hands-helping"></i> " I am a volunteer"</a>
                <a class="btn btn-ghost" href="/dashboard.html"><i class="fas fa-chart-line"></i> " Impact dashboard"</a>
            </nav>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_path() {
        assert_eq!(Page::from_path("/dashboard.html"), Page::Dashboard);
        assert_eq!(Page::from_path("/dashboard"), Page::Dashboard);
        assert_eq!(Page::from_path("/donor.html"), Page::Donor);
        assert_eq!(Page::from_path("/volunteer/"), Page::Volunteer);
    }

    #[test]
    fn test_unknown_paths_land() {
        assert_eq!(Page::from_path("/"), Page::Landing);
        assert_eq!(Page::from_path("/index.html"), Page::Landing);
        assert_eq!(Page::from_path(""), Page::Landing);
        assert_eq!(Page::from_path("/admin.html"), Page::Landing);
    }

    #[test]
    fn test_page_matched_on_last_segment() {
        assert_eq!(Page::from_path("/relief/donor.html"), Page::Donor);
    }
}
