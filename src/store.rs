//! Page State Stores
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Each page owns one
//! store; nothing is shared between pages.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::{DashboardData, UrgencyFilter};
use crate::models::{DashboardStats, Need};

/// `Idle → Loading → {Rendered | Failed}`, back to `Loading` on every refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Rendered,
    Failed(String),
}

impl LoadPhase {
    /// Phase to enter when a load starts. A rendered list stays on screen
    /// while a background refresh runs.
    pub fn on_load_start(&self) -> LoadPhase {
        match self {
            LoadPhase::Rendered => LoadPhase::Rendered,
            _ => LoadPhase::Loading,
        }
    }
}

/// What a needs list container should show
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    /// Nothing loaded yet
    Placeholder,
    Empty,
    Items,
    Error(String),
}

impl ListView {
    /// A refresh keeps showing the last result until it settles
    pub fn of(phase: &LoadPhase, len: usize) -> Self {
        match phase {
            LoadPhase::Failed(message) => ListView::Error(message.clone()),
            LoadPhase::Idle => ListView::Placeholder,
            LoadPhase::Loading if len == 0 => ListView::Placeholder,
            _ if len == 0 => ListView::Empty,
            _ => ListView::Items,
        }
    }
}

#[derive(Clone, Debug, Default, Store)]
pub struct DashboardState {
    pub stats: DashboardStats,
    pub active_needs: Vec<Need>,
    pub fulfilled_needs: Vec<Need>,
    /// Local time of the last successful refresh
    pub last_updated: Option<String>,
    pub phase: LoadPhase,
    pub refreshing: bool,
}

#[derive(Clone, Debug, Default, Store)]
pub struct DonorState {
    /// Needs currently on screen
    pub needs: Vec<Need>,
    pub phase: LoadPhase,
    pub urgency: UrgencyFilter,
    /// Last settled (debounced) search text
    pub search: String,
}

#[derive(Clone, Debug, Default, Store)]
pub struct VolunteerState {
    /// Last fetched list; also the source of the CSV export
    pub needs: Vec<Need>,
    pub phase: LoadPhase,
    pub refreshing: bool,
}

pub type DashboardStore = Store<DashboardState>;
pub type DonorStore = Store<DonorState>;
pub type VolunteerStore = Store<VolunteerState>;

// ========================
// Store Helper Functions
// ========================

/// Apply a successful dashboard load and stamp its local time
pub fn store_apply_dashboard(store: &DashboardStore, data: DashboardData, stamp: String) {
    store.stats().set(data.stats);
    store.active_needs().set(data.active_needs);
    store.fulfilled_needs().set(data.fulfilled_needs);
    store.last_updated().set(Some(stamp));
    store.phase().set(LoadPhase::Rendered);
    store.refreshing().set(false);
}

/// Table container view; failures leave the phase alone so the last good
/// table, or the placeholder, stays up
pub fn dashboard_view(store: &DashboardStore) -> ListView {
    let rows = store.active_needs().with(Vec::len) + store.fulfilled_needs().with(Vec::len);
    ListView::of(&store.phase().get(), rows)
}

/// Replace the volunteer's list after a successful load
pub fn store_set_volunteer_needs(store: &VolunteerStore, needs: Vec<Need>) {
    store.needs().set(needs);
    store.phase().set(LoadPhase::Rendered);
}

/// Replace the donor's list after a successful load
pub fn store_set_donor_needs(store: &DonorStore, needs: Vec<Need>) {
    store.needs().set(needs);
    store.phase().set(LoadPhase::Rendered);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_shows_empty_state_once_rendered() {
        assert_eq!(ListView::of(&LoadPhase::Rendered, 0), ListView::Empty);
        assert_eq!(ListView::of(&LoadPhase::Rendered, 3), ListView::Items);
    }

    #[test]
    fn test_first_load_shows_placeholder() {
        assert_eq!(ListView::of(&LoadPhase::Idle, 0), ListView::Placeholder);
        assert_eq!(ListView::of(&LoadPhase::Loading, 0), ListView::Placeholder);
    }

    #[test]
    fn test_refresh_keeps_items_visible() {
        assert_eq!(ListView::of(&LoadPhase::Loading, 2), ListView::Items);
    }

    #[test]
    fn test_load_start_transitions() {
        assert_eq!(LoadPhase::Idle.on_load_start(), LoadPhase::Loading);
        assert_eq!(LoadPhase::Failed("x".into()).on_load_start(), LoadPhase::Loading);
        assert_eq!(LoadPhase::Rendered.on_load_start(), LoadPhase::Rendered);
    }

    #[test]
    fn test_dashboard_empty_only_after_a_load() {
        let store: DashboardStore = Store::new(DashboardState::default());
        assert_eq!(dashboard_view(&store), ListView::Placeholder);

        store.phase().update(|phase| *phase = phase.on_load_start());
        assert_eq!(dashboard_view(&store), ListView::Placeholder);

        store_apply_dashboard(&store, DashboardData::default(), "10:00:00".into());
        assert_eq!(dashboard_view(&store), ListView::Empty);
        assert!(!store.refreshing().get_untracked());
    }

    #[test]
    fn test_failure_wins() {
        let phase = LoadPhase::Failed("Connection error".into());
        assert_eq!(ListView::of(&phase, 5), ListView::Error("Connection error".into()));
    }
}
