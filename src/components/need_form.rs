//! New Need Form Component
//!
//! Volunteer form for posting a relief request, guarded against double
//! submission.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::guard::SubmitGuard;
use crate::validation::RequestForm;

/// Urgency options
const URGENCY_OPTIONS: &[(&str, &str)] = &[
    ("critical", "🔴 Critical - Needed immediately"),
    ("high", "🟡 High - Needed within 24 hours"),
    ("medium", "🟢 Medium - Needed within a few days"),
];

const DUPLICATE_MARKER: &str = "Similar request already exists";

/// Alert text for a rejected submission
fn submit_failure_alert(err: &ApiError) -> String {
    match err {
        ApiError::Server(message) if message.contains(DUPLICATE_MARKER) => {
            "⚠️ You already submitted a similar request recently. Please wait before submitting again.".to_string()
        }
        other => other.action_alert(),
    }
}

/// Form for posting a new need; `on_created` runs after the server accepts it
#[component]
pub fn NeedForm(#[prop(into)] on_created: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let guard = SubmitGuard::new();
    let form = RwSignal::new(RequestForm::default());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(permit) = guard.try_begin() else {
            log::warn!("[VOLUNTEER] Form already being submitted, ignoring");
            return;
        };
        let request = match form.with_untracked(RequestForm::validate) {
            Ok(request) => request,
            Err(e) => {
                browser::alert(&format!("❌ {}", e));
                return;
            }
        };

        log::info!("[VOLUNTEER] Posting need: {} x{}", request.item_name, request.quantity);
        spawn_local(async move {
            let _permit = permit;
            let _loading = ctx.show_loading();
            match ctx.api().create_need(&request).await {
                Ok(created) => {
                    log::info!("[VOLUNTEER] Need created: {:?} {:?}", created.need_id, created.message);
                    ctx.toast("✅ Relief need posted successfully! Donors can now see your request.");
                    form.try_set(RequestForm::default());
                    on_created.run(());
                }
                Err(e) => {
                    log::error!("[VOLUNTEER] Error submitting form: {}", e);
                    browser::alert(&submit_failure_alert(&e));
                }
            }
        });
    };

    view! {
        <form id="needForm" class="need-form" on:submit=submit>
            <div class="form-section">
                <h3><i class="fas fa-user"></i> " Your Details"</h3>
                <div class="form-row">
                    <div class="form-group">
                        <label for="volunteerName">"Your Name *"</label>
                        <input
                            type="text"
                            id="volunteerName"
                            placeholder="Full name"
                            prop:value=move || form.with(|f| f.volunteer_name.clone())
                            on:input=move |ev| form.update(|f| f.volunteer_name = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="volunteerPhone">"Phone Number *"</label>
                        <input
                            type="tel"
                            id="volunteerPhone"
                            placeholder="+1 (234) 567-8901"
                            prop:value=move || form.with(|f| f.volunteer_phone.clone())
                            on:input=move |ev| form.update(|f| f.volunteer_phone = event_target_value(&ev))
                        />
                    </div>
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label for="volunteerEmail">"Email"</label>
                        <input
                            type="email"
                            id="volunteerEmail"
                            placeholder="Optional"
                            prop:value=move || form.with(|f| f.volunteer_email.clone())
                            on:input=move |ev| form.update(|f| f.volunteer_email = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="volunteerLocation">"Location"</label>
                        <input
                            type="text"
                            id="volunteerLocation"
                            placeholder="Relief camp or drop-off point"
                            prop:value=move || form.with(|f| f.volunteer_location.clone())
                            on:input=move |ev| form.update(|f| f.volunteer_location = event_target_value(&ev))
                        />
                    </div>
                </div>
            </div>

            <div class="form-section">
                <h3><i class="fas fa-box"></i> " What Is Needed"</h3>
                <div class="form-row">
                    <div class="form-group">
                        <label for="itemName">"Supply Item *"</label>
                        <input
                            type="text"
                            id="itemName"
                            placeholder="e.g. Blankets, Water bottles"
                            prop:value=move || form.with(|f| f.item_name.clone())
                            on:input=move |ev| form.update(|f| f.item_name = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="quantity">"Quantity *"</label>
                        <input
                            type="number"
                            id="quantity"
                            min="1"
                            max="10000"
                            prop:value=move || form.with(|f| f.quantity.clone())
                            on:input=move |ev| form.update(|f| f.quantity = event_target_value(&ev))
                        />
                    </div>
                </div>
                <div class="form-group">
                    <label for="urgency">"Urgency Level *"</label>
                    <select
                        id="urgency"
                        prop:value=move || form.with(|f| f.urgency.clone())
                        on:change=move |ev| form.update(|f| f.urgency = event_target_value(&ev))
                    >
                        <option value="">"Select urgency"</option>
                        {URGENCY_OPTIONS.iter().map(|(value, label)| view! {
                            <option value=*value>{*label}</option>
                        }).collect_view()}
                    </select>
                </div>
                <div class="form-group">
                    <label for="description">"Description"</label>
                    <textarea
                        id="description"
                        rows="3"
                        placeholder="Sizes, brands, delivery details..."
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    ></textarea>
                </div>
            </div>

            <button type="submit" class="btn btn-primary btn-large" disabled=move || guard.is_busy()>
                {move || if guard.is_busy() {
                    view! { <i class="fas fa-spinner fa-spin"></i> " Submitting..." }.into_any()
                } else {
                    view! { <i class="fas fa-paper-plane"></i> " Post Relief Need" }.into_any()
                }}
            </button>
        </form>
    }
}
