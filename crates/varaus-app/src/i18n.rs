// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeMap;

const ENGLISH: &[(&str, &str)] = &[
    ("common.volumeUnit", "units"),
    ("common.close", "Close"),
    ("common.loading", "Loading..."),
    ("Application.allApplications", "All applications"),
    ("Application.headings.customer", "Customer"),
    ("Application.headings.participants", "Participants"),
    ("Application.headings.applicantType", "Applicant type"),
    ("Application.headings.applicationCount", "Applied reservations"),
    ("Application.headings.reviewStatus", "Review status"),
    ("Application.headings.applicationStatus", "Application status"),
    ("Application.headings.applicantName", "Applicant"),
    ("Application.headings.recommendations", "Recommendations"),
    ("Application.applicantTypes.individual", "Individual"),
    ("Application.applicantTypes.association", "Association"),
    ("Application.applicantTypes.community", "Community"),
    ("Application.applicantTypes.company", "Company"),
    ("Application.statuses.draft", "Draft"),
    ("Application.statuses.in_review", "In review"),
    ("Application.statuses.review_done", "Review done"),
    ("Application.statuses.handled", "Handled"),
    ("Application.statuses.declined", "Declined"),
    ("Application.statuses.cancelled", "Cancelled"),
    ("Application.statuses.unknown", "Unknown"),
    ("ApplicationRound.resolutionNumber", "Resolution {no}"),
    ("ApplicationRound.orphanApplications", "Without allocations"),
    ("ApplicationRound.handledApplications", "Handled"),
    (
        "ApplicationRound.unallocatedApplications",
        "applications without allocations",
    ),
    (
        "ApplicationRound.timeframeFuture",
        "Application period opens {date}",
    ),
    (
        "ApplicationRound.timeframeCurrent",
        "Application period open until {date}",
    ),
    (
        "ApplicationRound.timeframePast",
        "Application period ended {date}",
    ),
    ("Recommendation.headings.resolution", "Resolution"),
    ("Recommendation.headings.reservationUnit", "Reservation unit"),
    ("Recommendation.noRecommendations", "No recommendations"),
    ("errors.functionFailed", "Operation failed"),
    ("errors.applicationRoundNotFound", "Application round not found"),
    ("errors.errorFetchingData", "Error fetching data"),
    ("errors.errorFetchingApplications", "Error fetching applications"),
];

/// Label catalog. Lookup never fails: a key without an entry comes back as
/// the key itself, so a missing label degrades to something greppable instead
/// of crashing display.
#[derive(Debug, Clone)]
pub struct Messages {
    entries: BTreeMap<&'static str, &'static str>,
}

impl Messages {
    pub fn builtin() -> Self {
        Self {
            entries: ENGLISH.iter().copied().collect(),
        }
    }

    pub fn translate(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(text) => (*text).to_owned(),
            None => key.to_owned(),
        }
    }

    pub fn translate_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let mut text = self.translate(key);
        for (name, value) in params {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_resolve_to_labels() {
        let messages = Messages::builtin();
        assert_eq!(messages.translate("common.volumeUnit"), "units");
        assert_eq!(
            messages.translate("Application.applicantTypes.individual"),
            "Individual"
        );
    }

    #[test]
    fn unknown_keys_come_back_verbatim() {
        let messages = Messages::builtin();
        assert_eq!(
            messages.translate("Application.applicantTypes."),
            "Application.applicantTypes."
        );
        assert_eq!(messages.translate("no.such.key"), "no.such.key");
    }

    #[test]
    fn params_substitute_into_placeholders() {
        let messages = Messages::builtin();
        assert_eq!(
            messages.translate_with("ApplicationRound.resolutionNumber", &[("no", "????")]),
            "Resolution ????"
        );
        assert_eq!(
            messages.translate_with(
                "ApplicationRound.timeframeCurrent",
                &[("date", "2026-01-31")]
            ),
            "Application period open until 2026-01-31"
        );
    }
}
