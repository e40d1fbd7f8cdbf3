// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

/// Status filter the review views pass when fetching applications.
pub const REVIEW_STATUS_FILTER: &str = "in_review,review_done,declined";

/// Which screen a status is being displayed on. The raw vocabulary is wider
/// than either screen needs, so display collapses it differently per context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusContext {
    Review,
    Resolution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanonicalStatus {
    Draft,
    InReview,
    ReviewDone,
    Handled,
    Declined,
    Cancelled,
    Unknown,
}

impl CanonicalStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InReview => "in_review",
            Self::ReviewDone => "review_done",
            Self::Handled => "handled",
            Self::Declined => "declined",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    pub const fn message_key(self) -> &'static str {
        match self {
            Self::Draft => "Application.statuses.draft",
            Self::InReview => "Application.statuses.in_review",
            Self::ReviewDone => "Application.statuses.review_done",
            Self::Handled => "Application.statuses.handled",
            Self::Declined => "Application.statuses.declined",
            Self::Cancelled => "Application.statuses.cancelled",
            Self::Unknown => "Application.statuses.unknown",
        }
    }
}

/// Maps a raw upstream status into the canonical display status for the given
/// context. Total: anything outside the known vocabulary becomes `Unknown`
/// instead of failing, since display must survive unexpected upstream data.
pub fn normalize(raw: &str, context: StatusContext) -> CanonicalStatus {
    match (raw, context) {
        ("draft", _) => CanonicalStatus::Draft,
        ("declined", _) => CanonicalStatus::Declined,
        ("cancelled", _) => CanonicalStatus::Cancelled,
        ("in_review", StatusContext::Review) => CanonicalStatus::InReview,
        ("review_done", StatusContext::Review) => CanonicalStatus::ReviewDone,
        // Anything past the review stage reads as a finished review.
        ("allocating" | "allocated" | "validated" | "handled" | "sent", StatusContext::Review) => {
            CanonicalStatus::ReviewDone
        }
        // On the resolution report only handled applications stand apart;
        // everything still in flight reads as awaiting resolution.
        ("in_review" | "review_done" | "allocating" | "allocated", StatusContext::Resolution) => {
            CanonicalStatus::InReview
        }
        ("validated" | "handled" | "sent", StatusContext::Resolution) => CanonicalStatus::Handled,
        _ => CanonicalStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_context_collapses_post_review_statuses() {
        let cases = [
            ("draft", CanonicalStatus::Draft),
            ("in_review", CanonicalStatus::InReview),
            ("review_done", CanonicalStatus::ReviewDone),
            ("allocating", CanonicalStatus::ReviewDone),
            ("allocated", CanonicalStatus::ReviewDone),
            ("validated", CanonicalStatus::ReviewDone),
            ("handled", CanonicalStatus::ReviewDone),
            ("sent", CanonicalStatus::ReviewDone),
            ("declined", CanonicalStatus::Declined),
            ("cancelled", CanonicalStatus::Cancelled),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize(raw, StatusContext::Review), expected, "{raw}");
        }
    }

    #[test]
    fn resolution_context_collapses_around_handling() {
        let cases = [
            ("draft", CanonicalStatus::Draft),
            ("in_review", CanonicalStatus::InReview),
            ("review_done", CanonicalStatus::InReview),
            ("allocating", CanonicalStatus::InReview),
            ("allocated", CanonicalStatus::InReview),
            ("validated", CanonicalStatus::Handled),
            ("handled", CanonicalStatus::Handled),
            ("sent", CanonicalStatus::Handled),
            ("declined", CanonicalStatus::Declined),
            ("cancelled", CanonicalStatus::Cancelled),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize(raw, StatusContext::Resolution), expected, "{raw}");
        }
    }

    #[test]
    fn unrecognized_statuses_fall_back_instead_of_failing() {
        assert_eq!(normalize("", StatusContext::Review), CanonicalStatus::Unknown);
        assert_eq!(
            normalize("mystery_state", StatusContext::Resolution),
            CanonicalStatus::Unknown
        );
    }

    #[test]
    fn message_keys_follow_the_canonical_name() {
        assert_eq!(
            CanonicalStatus::ReviewDone.message_key(),
            "Application.statuses.review_done"
        );
        assert_eq!(
            CanonicalStatus::Unknown.message_key(),
            "Application.statuses.unknown"
        );
    }
}
