//! Dashboard Page
//!
//! Four counters and a table of every need, refreshed on a timer. Load
//! failures are logged and the last good view stays on screen.

use chrono::{Local, Utc};
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use super::common::use_interval;
use crate::context::AppContext;
use crate::format::time_in;
use crate::guard::LoadSequence;
use crate::store::{
    dashboard_view, store_apply_dashboard, DashboardState, DashboardStateStoreFields, DashboardStore, ListView,
};
use crate::view_model::{dashboard_rows, DashboardRowView};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store: DashboardStore = Store::new(DashboardState::default());
    let sequence = LoadSequence::new();

    let load = move || {
        let ticket = sequence.begin();
        store.phase().update(|phase| *phase = phase.on_load_start());
        spawn_local(async move {
            let result = ctx.api().load_dashboard().await;
            if !sequence.is_current(ticket) {
                log::debug!("[DASHBOARD] Dropping superseded response");
                return;
            }
            match result {
                Ok(data) => {
                    log::info!(
                        "[DASHBOARD] Loaded {} active, {} fulfilled",
                        data.active_needs.len(),
                        data.fulfilled_needs.len()
                    );
                    store_apply_dashboard(&store, data, time_in(&Utc::now(), &Local));
                }
                Err(e) => log::error!("[DASHBOARD] Error loading dashboard data: {}", e),
            }
        });
    };

    load();
    use_interval(ctx.with_config(|c| c.dashboard_refresh_ms), load);

    let refresh = move |_| {
        store.refreshing().set(true);
        load();
    };

    // Row keys below include every field the server may change, so a
    // refreshed row re-renders instead of being reused
    let rows = move || {
        store.active_needs().with(|active| {
            store
                .fulfilled_needs()
                .with(|fulfilled| dashboard_rows(active, fulfilled, &Local))
        })
    };
    let table_view = Memo::new(move |_| dashboard_view(&store));

    view! {
        <div class="dashboard-page">
            <div class="dashboard-header">
                <h1>"Impact Dashboard"</h1>
                <div class="dashboard-controls">
                    <span class="last-updated">
                        "Last updated: "
                        {move || store.last_updated().get().unwrap_or_else(|| "--".to_string())}
                    </span>
                    <button class="btn btn-outline" on:click=refresh>
                        <i class="fas fa-sync-alt"></i>
                        " "
                        {move || if store.refreshing().get() { "Refreshing..." } else { "Refresh" }}
                    </button>
                </div>
            </div>

            <div class="stats-grid">
                <StatCard
                    class="stat-card active"
                    icon="fas fa-hands-helping"
                    label="Active Needs"
                    value=Signal::derive(move || store.stats().get().active_needs_count)
                />
                <StatCard
                    class="stat-card fulfilled"
                    icon="fas fa-check-circle"
                    label="Needs Fulfilled"
                    value=Signal::derive(move || store.stats().get().fulfilled_needs_count)
                />
                <StatCard
                    class="stat-card donations"
                    icon="fas fa-gift"
                    label="Total Donations"
                    value=Signal::derive(move || store.stats().get().total_donations)
                />
                <StatCard
                    class="stat-card critical"
                    icon="fas fa-exclamation-triangle"
                    label="Critical Needs"
                    value=Signal::derive(move || store.stats().get().critical_needs_count)
                />
            </div>

            <div class="table-container">
                <table class="needs-table">
                    <thead>
                        <tr>
                            <th>"Item"</th>
                            <th>"Required"</th>
                            <th>"Donated"</th>
                            <th>"Remaining"</th>
                            <th>"Progress"</th>
                            <th>"Status"</th>
                            <th>"Volunteer"</th>
                            <th>"Last Updated"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=rows
                            key=|row| (row.key.clone(), row.remaining, row.donated, row.progress.label(), row.updated.clone())
                            children=|row| view! { <NeedRow row=row /> }
                        />
                    </tbody>
                </table>
                <div class=move || {
                    if table_view.get() == ListView::Placeholder { "table-loading" } else { "table-loading hidden" }
                }>
                    <i class="fas fa-spinner fa-spin"></i>
                    <p>"Loading dashboard..."</p>
                </div>
                <div class=move || {
                    if table_view.get() == ListView::Empty { "table-empty" } else { "table-empty hidden" }
                }>
                    <i class="fas fa-inbox"></i>
                    <p>"No relief needs recorded yet"</p>
                </div>
            </div>
        </div>
    }
}

#[component]
fn StatCard(
    class: &'static str,
    icon: &'static str,
    label: &'static str,
    #[prop(into)] value: Signal<u64>,
) -> impl IntoView {
    view! {
        <div class=class>
            <div class="stat-icon"><i class=icon></i></div>
            <div class="stat-content">
                <span class="stat-value">{move || value.get()}</span>
                <span class="stat-label">{label}</span>
            </div>
        </div>
    }
}

#[component]
fn NeedRow(row: DashboardRowView) -> impl IntoView {
    view! {
        <tr class=row.row_class>
            <td>{row.item_name}</td>
            <td>{row.required}</td>
            <td>{row.donated}</td>
            <td>{row.remaining}</td>
            <td>
                <div class="table-progress">
                    <div class="table-progress-bar">
                        <div class="table-progress-fill" style=row.progress.width_style()></div>
                    </div>
                    <span class="table-progress-text">{row.progress.label()}</span>
                </div>
            </td>
            <td><span class=row.status_class>{row.status_label}</span></td>
            <td>{row.volunteer_name}</td>
            <td>{row.updated}</td>
        </tr>
    }
}
