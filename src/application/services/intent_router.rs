use crate::domain::entities::{BookingDraft, BookingFields, BookingState};

/// How the current turn should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    KnowledgeQuery,
    BookingSubmission,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::KnowledgeQuery => "knowledge_query",
            Intent::BookingSubmission => "booking_submission",
        }
    }
}

/// Routes a turn to retrieval or to booking slot-filling. An incomplete
/// draft takes precedence over free text: once a booking has started, the
/// session keeps collecting fields until it completes.
pub struct IntentRouter;

impl IntentRouter {
    pub fn classify(fields: &BookingFields, draft: Option<&BookingDraft>) -> Intent {
        if !fields.is_empty() {
            return Intent::BookingSubmission;
        }

        if let Some(draft) = draft {
            if matches!(draft.state(), BookingState::Collecting(_)) {
                return Intent::BookingSubmission;
            }
        }

        Intent::KnowledgeQuery
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message_routes_to_knowledge() {
        let fields = BookingFields::default();
        assert_eq!(
            IntentRouter::classify(&fields, None),
            Intent::KnowledgeQuery
        );
    }

    #[test]
    fn test_partial_fields_route_to_booking() {
        let fields = BookingFields {
            name: Some("Sujan".to_string()),
            ..Default::default()
        };
        assert_eq!(
            IntentRouter::classify(&fields, None),
            Intent::BookingSubmission
        );
    }

    #[test]
    fn test_open_draft_wins_over_free_text_question() {
        let mut draft = BookingDraft::new();
        draft.apply(&BookingFields {
            name: Some("Sujan".to_string()),
            ..Default::default()
        });

        let fields = BookingFields::default();
        assert_eq!(
            IntentRouter::classify(&fields, Some(&draft)),
            Intent::BookingSubmission
        );
    }

    #[test]
    fn test_empty_draft_is_still_collecting() {
        let draft = BookingDraft::new();
        let fields = BookingFields::default();
        assert_eq!(
            IntentRouter::classify(&fields, Some(&draft)),
            Intent::BookingSubmission
        );
    }
}
