//! UI Components
//!
//! One page component per document, plus the widgets they share.

mod common;
mod dashboard;
mod donations_section;
mod donor;
mod need_form;
mod pledge_modal;
mod volunteer;

pub use common::{LoadingOverlay, ToastStack};
pub use dashboard::DashboardPage;
pub use donor::DonorPage;
pub use volunteer::VolunteerPage;
