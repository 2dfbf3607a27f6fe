//! Donor Page
//!
//! Catalog of open needs with an urgency filter and a debounced text search.
//! Polls on a timer, refreshes when the tab becomes visible again, and opens
//! the pledge modal for any need with quantity left.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use super::common::{use_interval, use_tab_visible, EmptyState, ErrorState, ProgressBar, UrgencyBadge};
use super::pledge_modal::{PledgeModal, PledgeSuccessModal};
use crate::api::UrgencyFilter;
use crate::context::AppContext;
use crate::guard::{Debounce, LoadSequence};
use crate::store::{store_set_donor_needs, DonorState, DonorStateStoreFields, DonorStore, ListView, LoadPhase};
use crate::view_model::{needs_count_label, ContactCardView, DonorCardView, PledgeTarget};

#[component]
pub fn DonorPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store: DonorStore = Store::new(DonorState::default());
    let sequence = LoadSequence::new();
    let search_debounce = StoredValue::new(Debounce::<String>::default());

    let pledging = RwSignal::new(None::<PledgeTarget>);
    let receipt = RwSignal::new(None::<ContactCardView>);
    let receipt_timer = StoredValue::new_local(None::<Timeout>);

    let load = move || {
        let urgency = store.urgency().get_untracked();
        let search = store.search().get_untracked();
        let ticket = sequence.begin();
        store.phase().update(|phase| *phase = phase.on_load_start());
        log::info!("[DONOR] Loading needs - filter: {}, search: {:?}", urgency.value(), search);

        spawn_local(async move {
            let result = ctx.api().list_available_needs(urgency, &search).await;
            if !sequence.is_current(ticket) {
                log::debug!("[DONOR] Dropping superseded response");
                return;
            }
            match result {
                Ok(needs) => {
                    log::info!("[DONOR] Displaying {} needs", needs.len());
                    store_set_donor_needs(&store, needs);
                }
                Err(e) => {
                    log::error!("[DONOR] Error loading needs: {}", e);
                    store.phase().set(LoadPhase::Failed(e.panel_message()));
                }
            }
        });
    };

    load();
    use_interval(ctx.with_config(|c| c.donor_refresh_ms), move || {
        log::debug!("[DONOR] Auto-refreshing needs");
        load();
    });
    use_tab_visible(move || {
        log::debug!("[DONOR] Tab became visible, refreshing needs");
        load();
    });

    let on_search = move |ev| {
        let text = event_target_value(&ev);
        let Some(generation) = search_debounce.try_update_value(|d| d.push(text)) else {
            return;
        };
        let delay = ctx.with_config(|c| c.search_debounce_ms);
        Timeout::new(delay, move || {
            if let Some(text) = search_debounce.try_update_value(|d| d.fire(generation)).flatten() {
                store.search().set(text);
                load();
            }
        })
        .forget();
    };

    let select_filter = move |filter: UrgencyFilter| {
        store.urgency().set(filter);
        load();
    };

    let open_pledge = Callback::new(move |target: PledgeTarget| {
        log::info!("[DONOR] Pledging against need {}", target.need_id);
        pledging.set(Some(target));
    });
    let close_pledge = Callback::new(move |_: ()| pledging.set(None));
    let on_pledged = Callback::new(move |contact: ContactCardView| {
        receipt.set(Some(contact));
        let delay = ctx.with_config(|c| c.success_modal_ms);
        // replacing the handle cancels any earlier countdown
        receipt_timer.set_value(Some(Timeout::new(delay, move || {
            receipt.try_set(None);
        })));
        load();
    });
    let close_receipt = Callback::new(move |_: ()| receipt.set(None));

    let list_view = Memo::new(move |_| ListView::of(&store.phase().get(), store.needs().with(Vec::len)));
    let cards = move || store.needs().with(|needs| needs.iter().map(DonorCardView::from_need).collect::<Vec<_>>());

    view! {
        <div class="donor-page">
            <div class="section-header">
                <div>
                    <h2>"Active Relief Needs"</h2>
                    <p id="needsCount" class="needs-count">
                        {move || {
                            match list_view.get() {
                                ListView::Items | ListView::Empty => needs_count_label(store.needs().with(Vec::len)),
                                _ => String::new(),
                            }
                        }}
                    </p>
                </div>
                <button class="btn btn-outline" on:click=move |_| {
                    log::info!("[DONOR] Manual refresh clicked");
                    load();
                }>
                    <i class="fas fa-sync-alt"></i>
                    " Refresh"
                </button>
            </div>

            <div class="filters">
                <input
                    type="search"
                    id="searchNeeds"
                    class="search-input"
                    placeholder="Search for items..."
                    on:input=on_search
                />
                <div class="filter-tags">
                    {UrgencyFilter::ALL
                        .into_iter()
                        .map(|filter| {
                            let tag_class = move || {
                                if store.urgency().get() == filter { "filter-tag active" } else { "filter-tag" }
                            };
                            view! {
                                <button class=tag_class on:click=move |_| select_filter(filter)>
                                    {filter.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>

            <div id="needsList" class="needs-grid">
                {move || match list_view.get() {
                    ListView::Placeholder => view! {
                        <div class="loading-state">
                            <i class="fas fa-spinner fa-spin"></i>
                            <p>"Loading needs..."</p>
                        </div>
                    }.into_any(),
                    ListView::Empty => view! {
                        <EmptyState
                            icon="fas fa-heart-crack"
                            title="No Active Needs"
                            message="All current relief requests have been fulfilled! Check back soon for new ways to help."
                        >
                            <a href="dashboard.html" class="btn btn-outline">
                                <i class="fas fa-chart-line"></i>
                                " View Impact Dashboard"
                            </a>
                        </EmptyState>
                    }.into_any(),
                    ListView::Error(message) => view! {
                        <ErrorState title="Unable to Load Needs" message=message on_retry=move |_| load() />
                    }.into_any(),
                    ListView::Items => view! {
                        <For
                            each=cards
                            key=|card| (card.id.clone(), card.remaining, card.required, card.progress.label())
                            children=move |card| view! { <NeedCard card=card on_pledge=open_pledge /> }
                        />
                    }.into_any(),
                }}
            </div>

            {move || pledging.get().map(|target| view! {
                <PledgeModal target=target on_close=close_pledge on_pledged=on_pledged />
            })}
            {move || receipt.get().map(|contact| view! {
                <PledgeSuccessModal contact=contact on_close=close_receipt />
            })}
        </div>
    }
}

#[component]
fn NeedCard(card: DonorCardView, #[prop(into)] on_pledge: Callback<PledgeTarget>) -> impl IntoView {
    view! {
        <div class=card.card_class data-need-id=card.id>
            <div class="need-card-header">
                <h3>{card.item_name}</h3>
                <UrgencyBadge badge=card.badge />
            </div>

            <div class="need-meta">
                <div class="need-quantity">
                    <strong>"Still needed:"</strong>
                    {format!(" {} out of {}", card.remaining, card.required)}
                </div>
                <div class="need-volunteer">
                    "Posted by: " <strong>{card.volunteer_name}</strong>
                </div>
            </div>

            <ProgressBar progress=card.progress />

            <div class="volunteer-contact">
                <h4><i class="fas fa-user"></i> " Contact Volunteer"</h4>
                <div class="contact-details">
                    {card
                        .contacts
                        .into_iter()
                        .map(|line| view! {
                            <div class="contact-item">
                                <i class=line.icon></i>
                                <span>{line.text}</span>
                            </div>
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="card-actions">
                {match card.pledge {
                    Some(target) => view! {
                        <button class="btn btn-primary" on:click=move |_| on_pledge.run(target.clone())>
                            <i class="fas fa-heart"></i>
                            " Pledge Donation"
                        </button>
                    }.into_any(),
                    None => view! { <div class="fulfilled-badge">"✅ Fulfilled"</div> }.into_any(),
                }}
            </div>
        </div>
    }
}
