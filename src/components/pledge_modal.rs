//! Pledge Modals
//!
//! The donor's pledge form and the confirmation shown once the server
//! accepts it.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser;
use crate::context::AppContext;
use crate::guard::SubmitGuard;
use crate::models::DonationMethod;
use crate::validation::PledgeForm;
use crate::view_model::{ContactCardView, PledgeTarget};

/// Pledge form for one need. `on_pledged` receives the volunteer's contact
/// details after the server accepts the pledge.
#[component]
pub fn PledgeModal(
    target: PledgeTarget,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_pledged: Callback<ContactCardView>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let guard = SubmitGuard::new();
    let form = RwSignal::new(PledgeForm::default());
    let need_id = target.need_id.clone();

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(permit) = guard.try_begin() else {
            log::debug!("[DONOR] Pledge already in flight, ignoring submit");
            return;
        };
        let request = match form.with_untracked(|f| f.validate(&need_id)) {
            Ok(request) => request,
            Err(e) => {
                browser::alert(&format!("❌ {}", e));
                return;
            }
        };

        log::info!("[DONOR] Submitting pledge of {} for need {}", request.pledged_quantity, request.need_id);
        spawn_local(async move {
            let _permit = permit;
            match ctx.api().pledge_donation(&request).await {
                Ok(receipt) => {
                    log::info!(
                        "[DONOR] Pledge accepted: {:?}, {:?} still needed",
                        receipt.donation_id,
                        receipt.remaining_quantity
                    );
                    let contact = ContactCardView::from_contact(receipt.volunteer_contact.as_ref());
                    on_close.run(());
                    on_pledged.run(contact);
                }
                Err(e) => {
                    log::error!("[DONOR] Pledge failed: {}", e);
                    browser::alert(&e.action_alert());
                }
            }
        });
    };

    view! {
        <div class="modal-overlay">
            <div class="modal-content">
                <div class="modal-header">
                    <h3>"🎁 Pledge Donation: " {target.item_name.clone()}</h3>
                    <button class="modal-close" on:click=move |_| on_close.run(())>"×"</button>
                </div>
                <form class="donor-form" on:submit=submit>
                    <div class="form-group">
                        <label for="donorName">"Your Name " <span class="required">"*"</span></label>
                        <input
                            type="text"
                            id="donorName"
                            placeholder="Enter your full name"
                            prop:value=move || form.with(|f| f.donor_name.clone())
                            on:input=move |ev| form.update(|f| f.donor_name = event_target_value(&ev))
                        />
                    </div>

                    <div class="form-group">
                        <label for="donorPhone">"Phone Number " <span class="required">"*"</span></label>
                        <input
                            type="tel"
                            id="donorPhone"
                            placeholder="Your contact number"
                            prop:value=move || form.with(|f| f.donor_phone.clone())
                            on:input=move |ev| form.update(|f| f.donor_phone = event_target_value(&ev))
                        />
                    </div>

                    <div class="form-group">
                        <label for="donorEmail">"Email Address " <span class="optional">"(Optional)"</span></label>
                        <input
                            type="email"
                            id="donorEmail"
                            placeholder="your.email@example.com"
                            prop:value=move || form.with(|f| f.donor_email.clone())
                            on:input=move |ev| form.update(|f| f.donor_email = event_target_value(&ev))
                        />
                    </div>

                    <div class="form-group">
                        <label for="pledgedQuantity">
                            "Quantity to Donate " <span class="required">"*"</span>
                            {format!(" (Max: {})", target.max_quantity)}
                        </label>
                        <input
                            type="number"
                            id="pledgedQuantity"
                            min="1"
                            max=target.max_quantity.to_string()
                            placeholder="Enter quantity"
                            prop:value=move || form.with(|f| f.quantity.clone())
                            on:input=move |ev| form.update(|f| f.quantity = event_target_value(&ev))
                        />
                    </div>

                    <div class="form-group">
                        <label for="donationMethod">"Donation Method " <span class="required">"*"</span></label>
                        <select
                            id="donationMethod"
                            prop:value=move || form.with(|f| f.donation_method.clone())
                            on:change=move |ev| form.update(|f| f.donation_method = event_target_value(&ev))
                        >
                            <option value="">"Select method"</option>
                            {DonationMethod::ALL
                                .into_iter()
                                .map(|method| view! { <option value=method.value()>{method.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="deliveryNotes">"Delivery Notes " <span class="optional">"(Optional)"</span></label>
                        <textarea
                            id="deliveryNotes"
                            rows="3"
                            placeholder="Any special instructions or preferred contact times..."
                            prop:value=move || form.with(|f| f.delivery_notes.clone())
                            on:input=move |ev| form.update(|f| f.delivery_notes = event_target_value(&ev))
                        ></textarea>
                    </div>

                    <div class="modal-actions">
                        <button type="button" class="btn btn-ghost" on:click=move |_| on_close.run(())>"Cancel"</button>
                        <button type="submit" class="btn btn-primary" disabled=move || guard.is_busy()>
                            <i class="fas fa-heart"></i>
                            {move || if guard.is_busy() { " Submitting..." } else { " Confirm Pledge" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

/// Confirmation with the volunteer's contact details
#[component]
pub fn PledgeSuccessModal(contact: ContactCardView, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    view! {
        <div class="modal-overlay success-modal">
            <div class="modal-content">
                <div class="success-header">
                    <div class="success-icon">"🎉"</div>
                    <h3>"Pledge Confirmed!"</h3>
                </div>
                <div class="success-body">
                    <p>"Thank you for your generous donation pledge!"</p>
                    <div class="contact-info">
                        <h4>"Volunteer Contact:"</h4>
                        <p><strong>"Name:"</strong> " " {contact.name}</p>
                        <p><strong>"Phone:"</strong> " " {contact.phone}</p>
                        <p><strong>"Email:"</strong> " " {contact.email}</p>
                        {contact.location.map(|location| view! {
                            <p><strong>"Location:"</strong> " " {location}</p>
                        })}
                    </div>
                    <p class="note">"The volunteer will contact you soon to coordinate the donation delivery."</p>
                </div>
                <div class="modal-actions">
                    <button class="btn btn-primary" on:click=move |_| on_close.run(())>"Close"</button>
                </div>
            </div>
        </div>
    }
}
