//! Page-level helpers: navigation toggle, modals and the booking form.
//!
//! Everything hangs off an explicit [`SiteContext`] instead of shared
//! global state.

use std::collections::HashMap;

pub const BOOKING_MODAL: &str = "booking-modal";
pub const BOOKING_CONFIRMATION: &str =
    "Your request has been received. We will contact you within 24 hours.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl BookingForm {
    pub fn reset(&mut self) {
        *self = BookingForm::default();
    }
}

#[derive(Debug, Default)]
pub struct SiteContext {
    nav_open: bool,
    /// modal id → `aria-hidden`
    modals: HashMap<String, bool>,
    pub booking: BookingForm,
}

impl SiteContext {
    /// Context with the given modals registered (all hidden).
    pub fn with_modals<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            modals: ids.into_iter().map(|id| (id.into(), true)).collect(),
            ..Self::default()
        }
    }

    pub fn toggle_nav(&mut self) -> bool {
        self.nav_open = !self.nav_open;
        self.nav_open
    }

    pub fn nav_open(&self) -> bool {
        self.nav_open
    }

    /// Unknown ids are ignored.
    pub fn open_modal(&mut self, id: &str) {
        if let Some(hidden) = self.modals.get_mut(id) {
            *hidden = false;
        }
    }

    pub fn close_modal(&mut self, id: &str) {
        if let Some(hidden) = self.modals.get_mut(id) {
            *hidden = true;
        }
    }

    /// `aria-hidden` value of a modal, `None` if it is not on the page.
    pub fn aria_hidden(&self, id: &str) -> Option<bool> {
        self.modals.get(id).copied()
    }

    /// Confirm a booking request: closes the booking modal, resets the form
    /// and returns the message to show.
    pub fn submit_booking(&mut self) -> &'static str {
        self.close_modal(BOOKING_MODAL);
        self.booking.reset();
        BOOKING_CONFIRMATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_toggles_back_and_forth() {
        let mut site = SiteContext::default();
        assert!(site.toggle_nav());
        assert!(!site.toggle_nav());
    }

    #[test]
    fn modals_open_and_close_by_id() {
        let mut site = SiteContext::with_modals([BOOKING_MODAL]);
        assert_eq!(site.aria_hidden(BOOKING_MODAL), Some(true));

        site.open_modal(BOOKING_MODAL);
        assert_eq!(site.aria_hidden(BOOKING_MODAL), Some(false));

        site.open_modal("missing");
        assert_eq!(site.aria_hidden("missing"), None);

        site.close_modal(BOOKING_MODAL);
        assert_eq!(site.aria_hidden(BOOKING_MODAL), Some(true));
    }

    #[test]
    fn booking_submit_confirms_and_resets() {
        let mut site = SiteContext::with_modals([BOOKING_MODAL]);
        site.open_modal(BOOKING_MODAL);
        site.booking = BookingForm {
            name: "Ann".into(),
            email: "ann@example.org".into(),
            message: "Thursday?".into(),
        };

        let msg = site.submit_booking();

        assert_eq!(msg, BOOKING_CONFIRMATION);
        assert_eq!(site.aria_hidden(BOOKING_MODAL), Some(true));
        assert_eq!(site.booking, BookingForm::default());
    }
}
