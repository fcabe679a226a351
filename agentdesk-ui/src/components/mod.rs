//! UI Components
//!
//! Reusable building blocks shared by the pages.

pub mod form;
pub mod guard;
pub mod loading;
pub mod nav;
pub mod stat_card;
pub mod toast;

pub use form::{ErrorBanner, SubmitButton};
pub use guard::Protected;
pub use loading::{ListPlaceholder, Loading};
pub use nav::Nav;
pub use stat_card::{StatCards, StatusBadge};
pub use toast::Toast;
