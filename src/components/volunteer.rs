//! Volunteer Page
//!
//! Request form, the volunteer's active needs with their pledges, and the
//! quick actions (CSV export, share). The last fetched list is kept in the
//! page store and is what the export serializes.

use chrono::{Local, Utc};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use super::common::{use_interval, EmptyState, ErrorState, UrgencyBadge};
use super::donations_section::{ContactDonorsModal, PledgesSection};
use super::need_form::NeedForm;
use crate::browser::{self, ShareData, ShareOutcome};
use crate::context::AppContext;
use crate::error::ApiError;
use crate::export::{export_file_name, needs_to_csv, CSV_MIME};
use crate::guard::LoadSequence;
use crate::store::{
    store_set_volunteer_needs, ListView, LoadPhase, VolunteerState, VolunteerStateStoreFields, VolunteerStore,
};
use crate::view_model::{donor_contacts, DonorContact, VolunteerCardView};

const NEEDS_LIST_ID: &str = "needsList";
const SCROLL_DELAY_MS: u32 = 500;

const SHARE_TITLE: &str = "AidConnect - Help Relief Efforts";
const SHARE_TEXT: &str =
    "🆘 Help Needed! Check out these relief requests on AidConnect and make a difference in someone's life.";

fn load_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Server(message) => format!("Failed to load needs: {}", message),
        _ => "Failed to load your relief requests. Please check your connection and try again.".to_string(),
    }
}

fn donor_page_url(origin: &str) -> String {
    format!("{}/donor.html", origin.trim_end_matches('/'))
}

/// Card data plus the donors reachable for it
#[derive(Debug, Clone, PartialEq)]
struct RequestCard {
    view: VolunteerCardView,
    contacts: Vec<DonorContact>,
    has_pledges: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct ContactDialog {
    item_name: String,
    contacts: Vec<DonorContact>,
}

#[component]
pub fn VolunteerPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store: VolunteerStore = Store::new(VolunteerState::default());
    let sequence = LoadSequence::new();
    let contact_dialog = RwSignal::new(None::<ContactDialog>);

    let load = move || {
        let ticket = sequence.begin();
        store.phase().update(|phase| *phase = phase.on_load_start());
        log::info!("[VOLUNTEER] Loading volunteer needs");

        spawn_local(async move {
            let result = ctx.api().list_active_needs().await;
            if !sequence.is_current(ticket) {
                log::debug!("[VOLUNTEER] Dropping superseded response");
                return;
            }
            match result {
                Ok(needs) => {
                    log::info!("[VOLUNTEER] Displaying {} needs", needs.len());
                    store_set_volunteer_needs(&store, needs);
                }
                Err(e) => {
                    log::error!("[VOLUNTEER] Error fetching needs: {}", e);
                    store.phase().set(LoadPhase::Failed(load_failure_message(&e)));
                }
            }
            store.refreshing().set(false);
        });
    };

    load();
    use_interval(ctx.with_config(|c| c.volunteer_refresh_ms), move || {
        log::debug!("[VOLUNTEER] Auto-refreshing needs");
        load();
    });

    let refresh = move |_| {
        log::info!("[VOLUNTEER] Manual refresh clicked");
        store.refreshing().set(true);
        load();
    };

    let on_created = Callback::new(move |_: ()| {
        load();
        Timeout::new(SCROLL_DELAY_MS, || browser::scroll_into_view(NEEDS_LIST_ID)).forget();
    });

    let delete_need = move |id: String| {
        if !browser::confirm("Are you sure you want to delete this relief request?\n\nThis action cannot be undone.") {
            return;
        }
        log::info!("[VOLUNTEER] Deleting need {}", id);
        spawn_local(async move {
            let _loading = ctx.show_loading();
            match ctx.api().delete_need(&id).await {
                Ok(deleted) => {
                    log::info!("[VOLUNTEER] Need {} deleted: {:?}", id, deleted.message);
                    ctx.toast("✅ Relief request deleted successfully");
                    load();
                }
                Err(e) => {
                    log::error!("[VOLUNTEER] Error deleting need {}: {}", id, e);
                    browser::alert(&e.action_alert());
                }
            }
        });
    };

    let contact_donors = move |(item_name, contacts): (String, Vec<DonorContact>)| match contacts.len() {
        0 => browser::alert("No donor phone numbers available"),
        1 => {
            if let Err(e) = browser::open_in_new_tab(&contacts[0].link) {
                log::error!("[VOLUNTEER] Could not open chat link: {}", e);
            }
        }
        _ => contact_dialog.set(Some(ContactDialog { item_name, contacts })),
    };

    let export = move |_| {
        let csv = store.needs().with_untracked(|needs| {
            (!needs.is_empty()).then(|| needs_to_csv(needs, &Local))
        });
        let Some(csv) = csv else {
            browser::alert("📋 No data to export");
            return;
        };
        let file_name = export_file_name(Utc::now().date_naive());
        match browser::download_text(&csv, &file_name, CSV_MIME) {
            Ok(()) => {
                log::info!("[VOLUNTEER] Exported {}", file_name);
                ctx.toast("📁 Data exported successfully!");
            }
            Err(e) => {
                log::error!("[VOLUNTEER] Export error: {}", e);
                browser::alert("❌ Export failed");
            }
        }
    };

    let share = move |_| {
        let data = ShareData {
            title: SHARE_TITLE.to_string(),
            text: SHARE_TEXT.to_string(),
            url: donor_page_url(&browser::origin()),
        };
        spawn_local(async move {
            match browser::share_or_copy(&data).await {
                Ok(ShareOutcome::Shared) => log::info!("[VOLUNTEER] Shared donor page link"),
                Ok(ShareOutcome::CopiedLink) => ctx.toast("🔗 Share link copied to clipboard!"),
                Ok(ShareOutcome::CopiedText) => ctx.toast("🔗 Share text copied to clipboard!"),
                Err(e) => log::error!("[VOLUNTEER] Share failed: {}", e),
            }
        });
    };

    let list_view = Memo::new(move |_| ListView::of(&store.phase().get(), store.needs().with(Vec::len)));
    let cards = move || {
        let now = Utc::now();
        store.needs().with(|needs| {
            needs
                .iter()
                .map(|need| RequestCard {
                    view: VolunteerCardView::from_need(need, now, &Local),
                    contacts: donor_contacts(need),
                    has_pledges: !need.donations.is_empty(),
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="volunteer-page">
            <section class="form-container">
                <h2>"Post a Relief Need"</h2>
                <NeedForm on_created=on_created />
            </section>

            <section class="quick-actions">
                <button id="exportData" class="btn btn-outline" on:click=export>
                    <i class="fas fa-file-csv"></i>
                    " Export CSV"
                </button>
                <button id="shareNeeds" class="btn btn-outline" on:click=share>
                    <i class="fas fa-share-alt"></i>
                    " Share with Donors"
                </button>
            </section>

            <section class="needs-container">
                <div class="section-header">
                    <h2>"Your Active Requests"</h2>
                    <button id="refreshNeeds" class="btn btn-outline" on:click=refresh>
                        {move || if store.refreshing().get() {
                            view! { <i class="fas fa-sync fa-spin"></i> " Refreshing..." }.into_any()
                        } else {
                            view! { <i class="fas fa-sync"></i> " Refresh" }.into_any()
                        }}
                    </button>
                </div>

                <div id=NEEDS_LIST_ID class="needs-list">
                    {move || match list_view.get() {
                        ListView::Placeholder => view! {
                            <div class="loading-state">
                                <i class="fas fa-spinner fa-spin"></i>
                                <p>"Loading your requests..."</p>
                            </div>
                        }.into_any(),
                        ListView::Empty => view! {
                            <EmptyState
                                icon="fas fa-clipboard-list"
                                title="No Active Requests"
                                message="Start by adding your first relief request above. It will appear here for donors to see."
                            />
                        }.into_any(),
                        ListView::Error(message) => view! {
                            <ErrorState title="Unable to Load Requests" message=message on_retry=move |_| load() />
                        }.into_any(),
                        ListView::Items => view! {
                            <For
                                each=cards
                                key=|card| {
                                    (
                                        card.view.id.clone(),
                                        card.view.remaining,
                                        card.view.donated,
                                        card.view.status_label.clone(),
                                        card.view.pledges.len(),
                                        card.view.posted.clone(),
                                    )
                                }
                                children=move |card| {
                                    view! {
                                        <RequestCardView
                                            card=card
                                            on_delete=delete_need
                                            on_contact=contact_donors
                                        />
                                    }
                                }
                            />
                        }.into_any(),
                    }}
                </div>
            </section>

            {move || contact_dialog.get().map(|dialog| view! {
                <ContactDonorsModal
                    item_name=dialog.item_name
                    contacts=dialog.contacts
                    on_close=move |_| contact_dialog.set(None)
                />
            })}
        </div>
    }
}

#[component]
fn RequestCardView(
    card: RequestCard,
    #[prop(into)] on_delete: Callback<String>,
    #[prop(into)] on_contact: Callback<(String, Vec<DonorContact>)>,
) -> impl IntoView {
    let RequestCard { view: card, contacts, has_pledges } = card;
    let delete_id = card.id.clone();
    let item_name = card.item_name.clone();

    view! {
        <div class=card.card_class data-need-id=card.id>
            <div class="need-header">
                <h3>{card.item_name}</h3>
                <UrgencyBadge badge=card.badge />
            </div>

            <div class="need-details">
                <div class="detail-row">
                    <div class="need-detail">
                        <span class="label">"Required"</span>
                        <span class="value">{card.required}</span>
                    </div>
                    <div class="need-detail">
                        <span class="label">"Donated"</span>
                        <span class="value donated">{card.donated}</span>
                    </div>
                    <div class="need-detail">
                        <span class="label">"Remaining"</span>
                        <span class="value remaining">{card.remaining}</span>
                    </div>
                    <div class="need-detail">
                        <span class="label">"Status"</span>
                        <span class=card.status_class>{card.status_label}</span>
                    </div>
                </div>
            </div>

            <div class="progress-section">
                <div class="progress-header">
                    <span class="progress-label">"Donation Progress"</span>
                    <span class="progress-percentage">{card.progress.label()}</span>
                </div>
                <div class="progress-bar">
                    <div class="progress-fill" style=card.progress.width_style()></div>
                </div>
            </div>

            {card.description.map(|description| view! {
                <div class="need-description">
                    <strong>"Description:"</strong> " " {description}
                </div>
            })}

            <PledgesSection pledges=card.pledges />

            <div class="need-meta">
                <div class="posted-info">
                    <i class="fas fa-clock"></i>
                    {format!(" Posted {}", card.posted)}
                </div>
            </div>

            <div class="need-actions">
                <button class="btn btn-ghost btn-small" on:click=move |_| on_delete.run(delete_id.clone())>
                    <i class="fas fa-trash"></i>
                    " Delete"
                </button>
                {has_pledges.then(|| view! {
                    <button
                        class="btn btn-primary btn-small"
                        on:click=move |_| on_contact.run((item_name.clone(), contacts.clone()))
                    >
                        <i class="fas fa-phone"></i>
                        " Contact Donors"
                    </button>
                })}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_messages() {
        assert_eq!(
            load_failure_message(&ApiError::Server("db offline".into())),
            "Failed to load needs: db offline"
        );
        assert_eq!(
            load_failure_message(&ApiError::Network("offline".into())),
            "Failed to load your relief requests. Please check your connection and try again."
        );
    }

    #[test]
    fn test_donor_page_url() {
        assert_eq!(donor_page_url("https://relief.example"), "https://relief.example/donor.html");
        assert_eq!(donor_page_url("https://relief.example/"), "https://relief.example/donor.html");
    }
}
