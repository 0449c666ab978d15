//! Pure mapping from [`ViewState`] to what the page shows.
//!
//! Adapters render a [`Presentation`] and [`FormControls`]; they never inspect
//! the state directly. The card styling is cosmetic and fully determined by
//! the record's email and status.

use super::{CreditRecord, CreditStatus, ViewPhase, ViewState};

/// Prompt shown before anything has been submitted.
pub const PLACEHOLDER_TEXT: &str = "Your credit score result will appear here.";
/// Text shown next to the loading indicator.
pub const LOADING_TEXT: &str = "Analyzing records...";

const SUBMIT_LABEL: &str = "Check Score";
const SUBMIT_LABEL_BUSY: &str = "Checking...";
const IMAGE_BASE_URL: &str = "https://picsum.photos/seed";

/// Utility classes for the result card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPalette {
    /// Classes for the status badge.
    pub status_class: &'static str,
    /// Classes for the card border.
    pub border_class: &'static str,
}

impl CardPalette {
    /// Palette for a given status.
    #[must_use]
    pub const fn for_status(status: CreditStatus) -> Self {
        match status {
            CreditStatus::Ok => Self {
                status_class: "text-green-400 bg-green-900/50",
                border_class: "border-green-500/30",
            },
            CreditStatus::NotOk => Self {
                status_class: "text-red-400 bg-red-900/50",
                border_class: "border-red-500/30",
            },
        }
    }
}

/// Everything the result card displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    /// Record holder's name.
    pub name: String,
    /// Record email as stored.
    pub email: String,
    /// Credit status.
    pub status: CreditStatus,
    /// Placeholder image reference seeded by the email.
    pub image_url: String,
    /// Badge and border classes.
    pub palette: CardPalette,
}

impl ResultCard {
    /// Derive the card for a record.
    ///
    /// # Examples
    /// ```
    /// use concreds::domain::{CreditRecord, CreditStatus, ResultCard};
    ///
    /// let record = CreditRecord::try_from_parts("bb@bb.com", "Bailey Brown", CreditStatus::NotOk)
    ///     .expect("valid record");
    /// let card = ResultCard::from_record(&record);
    /// assert_eq!(card.image_url, "https://picsum.photos/seed/bb@bb.com/500/300?grayscale");
    /// ```
    #[must_use]
    pub fn from_record(record: &CreditRecord) -> Self {
        let status = record.credit_status();
        let suffix = if status.is_ok() { "" } else { "?grayscale" };
        Self {
            name: record.name().to_owned(),
            email: record.email().to_string(),
            status,
            image_url: format!("{IMAGE_BASE_URL}/{}/500/300{suffix}", record.email()),
            palette: CardPalette::for_status(status),
        }
    }
}

/// The four mutually exclusive contents of the result area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    /// Idle prompt.
    Placeholder,
    /// Loading indicator.
    Loading,
    /// Inline error banner.
    ErrorBanner {
        /// Message to display.
        message: String,
    },
    /// Found record.
    ResultCard(ResultCard),
}

/// Derive the result-area presentation from a state.
#[must_use]
pub fn present(state: &ViewState) -> Presentation {
    match (state.phase(), state.result(), state.error_message()) {
        (ViewPhase::Loading, _, _) => Presentation::Loading,
        (_, Some(record), _) => Presentation::ResultCard(ResultCard::from_record(record)),
        (_, None, Some(message)) => Presentation::ErrorBanner {
            message: message.to_owned(),
        },
        (_, None, None) => Presentation::Placeholder,
    }
}

/// State of the email input and submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormControls {
    /// Current field text.
    pub value: String,
    /// Whether input and button are disabled.
    pub disabled: bool,
    /// Button caption.
    pub submit_label: &'static str,
}

/// Derive form control state; controls lock while a lookup is pending.
#[must_use]
pub fn form_controls(state: &ViewState) -> FormControls {
    let busy = state.is_loading();
    FormControls {
        value: state.query_email().to_owned(),
        disabled: busy,
        submit_label: if busy { SUBMIT_LABEL_BUSY } else { SUBMIT_LABEL },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LookupOutcome;
    use rstest::{fixture, rstest};

    #[fixture]
    fn alex() -> CreditRecord {
        CreditRecord::try_from_parts("aa@aa.com", "Alex Anderson", CreditStatus::Ok)
            .expect("valid record")
    }

    #[rstest]
    fn idle_state_shows_placeholder() {
        let state = ViewState::default();
        assert_eq!(present(&state), Presentation::Placeholder);
        let controls = form_controls(&state);
        assert!(!controls.disabled);
        assert_eq!(controls.submit_label, "Check Score");
    }

    #[rstest]
    fn loading_state_locks_the_form() {
        let mut state = ViewState::default();
        state.set_query("aa@aa.com");
        state.begin_lookup();
        assert_eq!(present(&state), Presentation::Loading);
        let controls = form_controls(&state);
        assert!(controls.disabled);
        assert_eq!(controls.submit_label, "Checking...");
        assert_eq!(controls.value, "aa@aa.com");
    }

    #[rstest]
    fn error_state_shows_banner() {
        let mut state = ViewState::default();
        state.reject("Please enter an email address.");
        assert_eq!(
            present(&state),
            Presentation::ErrorBanner {
                message: "Please enter an email address.".to_owned()
            }
        );
    }

    #[rstest]
    fn ok_record_gets_green_card_in_colour(alex: CreditRecord) {
        let mut state = ViewState::default();
        state.resolve(LookupOutcome::Found(alex));
        let Presentation::ResultCard(card) = present(&state) else {
            panic!("expected a result card");
        };
        assert_eq!(card.name, "Alex Anderson");
        assert_eq!(card.email, "aa@aa.com");
        assert_eq!(card.image_url, "https://picsum.photos/seed/aa@aa.com/500/300");
        assert_eq!(card.palette, CardPalette::for_status(CreditStatus::Ok));
        assert_eq!(card.palette.border_class, "border-green-500/30");
    }

    #[rstest]
    #[case(CreditStatus::Ok, "text-green-400 bg-green-900/50")]
    #[case(CreditStatus::NotOk, "text-red-400 bg-red-900/50")]
    fn palette_tracks_status(#[case] status: CreditStatus, #[case] expected: &str) {
        assert_eq!(CardPalette::for_status(status).status_class, expected);
    }

    #[rstest]
    fn card_derivation_is_deterministic(alex: CreditRecord) {
        assert_eq!(ResultCard::from_record(&alex), ResultCard::from_record(&alex));
    }
}
