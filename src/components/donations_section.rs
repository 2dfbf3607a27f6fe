//! Donor Pledges
//!
//! Pledge list shown on each volunteer card, and the modal offering one
//! WhatsApp link per donor.

use leptos::prelude::*;

use crate::browser;
use crate::view_model::{DonorContact, PledgeView};

/// Confirm, then hand the number to the phone dialer
fn call_donor(name: &str, phone: &str) {
    if !browser::confirm(&format!("Call {} at {}?", name, phone)) {
        return;
    }
    if let Err(e) = browser::navigate(&format!("tel:{}", phone)) {
        log::error!("[VOLUNTEER] Could not start call: {}", e);
    }
}

#[component]
pub fn PledgesSection(pledges: Vec<PledgeView>) -> impl IntoView {
    if pledges.is_empty() {
        return view! {
            <div class="donations-section">
                <h4><i class="fas fa-heart"></i> " Donor Pledges"</h4>
                <div class="no-donations">
                    <p>"No pledges received yet. Share your need to get donors!"</p>
                </div>
            </div>
        }
        .into_any();
    }

    let count = pledges.len();
    view! {
        <div class="donations-section">
            <h4><i class="fas fa-heart"></i> {format!(" Donor Pledges ({})", count)}</h4>
            <div class="donations-list">
                {pledges.into_iter().map(|pledge| view! { <PledgeCard pledge=pledge /> }).collect_view()}
            </div>
        </div>
    }
    .into_any()
}

#[component]
fn PledgeCard(pledge: PledgeView) -> impl IntoView {
    match pledge {
        PledgeView::Reference(id) => view! {
            <div class="donation-card donation-ref">
                <i class="fas fa-receipt"></i>
                <span>{format!(" Pledge #{}", id)}</span>
            </div>
        }
        .into_any(),
        PledgeView::Pledge { donor_name, quantity_label, phone, email, method_label, pledged_on, notes, .. } => {
            let call_name = donor_name.clone();
            let call_phone = phone.clone();
            view! {
                <div class="donation-card">
                    <div class="donor-info">
                        <div class="donor-header">
                            <strong>{donor_name}</strong>
                            <span class="pledge-amount">{quantity_label}</span>
                        </div>
                        <div class="donor-contact">
                            <div class="contact-item">
                                <i class="fas fa-phone"></i>
                                <span>{phone}</span>
                                <button
                                    class="btn-copy"
                                    title="Call donor"
                                    on:click=move |_| call_donor(&call_name, &call_phone)
                                >
                                    <i class="fas fa-phone-alt"></i>
                                </button>
                            </div>
                            {email.map(|email| view! {
                                <div class="contact-item">
                                    <i class="fas fa-envelope"></i>
                                    <span>{email}</span>
                                </div>
                            })}
                        </div>
                        <div class="donation-details">
                            <div class="detail-item"><strong>"Method:"</strong> " " {method_label}</div>
                            <div class="detail-item"><strong>"Pledged:"</strong> " " {pledged_on}</div>
                            {notes.map(|notes| view! {
                                <div class="detail-item"><strong>"Notes:"</strong> " " {notes}</div>
                            })}
                        </div>
                    </div>
                </div>
            }
            .into_any()
        }
    }
}

/// One chat link per donor of a need
#[component]
pub fn ContactDonorsModal(
    item_name: String,
    contacts: Vec<DonorContact>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="modal-overlay">
            <div class="modal-content">
                <div class="modal-header">
                    <h3>{format!("📞 Contact Donors: {}", item_name)}</h3>
                    <button class="modal-close" on:click=move |_| on_close.run(())>"×"</button>
                </div>
                <div class="contact-donors-list">
                    {contacts
                        .into_iter()
                        .map(|contact| view! {
                            <div class="contact-donor-row">
                                <div>
                                    <strong>{contact.donor_name}</strong>
                                    <span class="donor-phone">{contact.phone}</span>
                                </div>
                                <a class="btn btn-primary btn-small" href=contact.link target="_blank" rel="noopener">
                                    <i class="fab fa-whatsapp"></i>
                                    " WhatsApp"
                                </a>
                            </div>
                        })
                        .collect_view()}
                </div>
                <div class="modal-actions">
                    <button class="btn btn-ghost" on:click=move |_| on_close.run(())>"Close"</button>
                </div>
            </div>
        </div>
    }
}
