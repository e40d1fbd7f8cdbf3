// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::fields::TableRecord;
use crate::format::{count_and_duration, format_number};
use crate::i18n::Messages;
use crate::ids::{ApplicationEventScheduleId, ApplicationId};
use crate::model::{ApplicantType, Application, ProcessedAllocationResult, SortOrder};
use crate::process::is_validated;
use crate::status::{StatusContext, normalize};

/// Raw application statuses the applications list dims as already handled.
pub const HANDLED_STATUSES: [&str; 3] = ["validated", "handled", "declined"];

/// Where activating a row navigates. Route strings are rendered at the
/// presentation edge; rows without a destination yield nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    Application(ApplicationId),
    Recommendation(ApplicationEventScheduleId),
}

pub struct Column<R> {
    /// Message key for the column heading.
    pub title: &'static str,
    /// Field path the column sorts and filters on.
    pub key: &'static str,
    pub transform: Option<fn(&R, &Messages) -> String>,
}

impl<R: TableRecord> Column<R> {
    pub fn render(&self, record: &R, messages: &Messages) -> String {
        match self.transform {
            Some(transform) => transform(record, messages),
            None => record.field(self.key).display(),
        }
    }
}

pub struct CellConfig<R> {
    pub cols: Vec<Column<R>>,
    /// Unique row identity; `None` marks a row without one (never selectable).
    pub index: fn(&R) -> Option<i64>,
    /// Default sort field and direction.
    pub sorting: &'static str,
    pub order: SortOrder,
    pub row_link: fn(&R) -> Option<RowTarget>,
}

/// The applicant column of the unallocated view: individuals show their
/// contact person, everyone else their organisation.
pub fn applicant_name(application: &Application) -> String {
    if application.applicant_type == Some(ApplicantType::Individual) {
        let person = application.contact_person.as_ref();
        let first = person.map(|person| person.first_name.as_str()).unwrap_or("");
        let last = person.map(|person| person.last_name.as_str()).unwrap_or("");
        format!("{first} {last}").trim().to_owned()
    } else {
        application
            .organisation
            .as_ref()
            .map(|organisation| organisation.name.clone())
            .unwrap_or_default()
    }
}

fn applicant_type_label(application: &Application, messages: &Messages) -> String {
    match application.applicant_type {
        Some(applicant_type) => messages.translate(&format!(
            "Application.applicantTypes.{}",
            applicant_type.as_str()
        )),
        None => String::new(),
    }
}

/// Columns of the applications list.
pub fn applications_columns() -> CellConfig<Application> {
    CellConfig {
        cols: vec![
            Column {
                title: "Application.headings.customer",
                key: "organisation.name",
                transform: None,
            },
            Column {
                title: "Application.headings.participants",
                key: "organisation.activeMembersCount",
                transform: Some(|application, messages| {
                    let members = application
                        .organisation
                        .as_ref()
                        .and_then(|organisation| organisation.active_members_count);
                    format_number(members, &messages.translate("common.volumeUnit"))
                }),
            },
            Column {
                title: "Application.headings.applicantType",
                key: "applicantType",
                transform: Some(applicant_type_label),
            },
            Column {
                title: "Application.headings.applicationCount",
                key: "aggregatedData.reservationsTotal",
                transform: Some(|application, messages| {
                    let aggregates = application.aggregated_data;
                    count_and_duration(
                        aggregates.and_then(|aggregates| aggregates.reservations_total),
                        &messages.translate("common.volumeUnit"),
                        aggregates.and_then(|aggregates| aggregates.min_duration_total),
                    )
                }),
            },
            Column {
                title: "Application.headings.reviewStatus",
                key: "status",
                transform: Some(|application, messages| {
                    let status = normalize(&application.status, StatusContext::Review);
                    messages.translate(status.message_key())
                }),
            },
        ],
        index: |application| Some(application.id.get()),
        sorting: "organisation.name",
        order: SortOrder::Asc,
        row_link: |application| Some(RowTarget::Application(application.id)),
    }
}

/// Columns of the resolution report's unallocated tab.
pub fn unallocated_columns() -> CellConfig<Application> {
    CellConfig {
        cols: vec![
            Column {
                title: "Application.headings.applicantName",
                key: "organisation.name",
                transform: Some(|application, _| applicant_name(application)),
            },
            Column {
                title: "Application.headings.applicantType",
                key: "applicantType",
                transform: Some(applicant_type_label),
            },
            Column {
                title: "Application.headings.recommendations",
                key: "id",
                transform: Some(|_, messages| {
                    messages.translate("Recommendation.noRecommendations")
                }),
            },
        ],
        index: |application| Some(application.id.get()),
        sorting: "organisation.name",
        order: SortOrder::Asc,
        row_link: |application| Some(RowTarget::Application(application.id)),
    }
}

/// Columns of the resolution report's allocated tab.
pub fn allocated_columns() -> CellConfig<ProcessedAllocationResult> {
    CellConfig {
        cols: vec![
            Column {
                title: "Application.headings.applicantName",
                key: "organisationName",
                transform: None,
            },
            Column {
                title: "Application.headings.applicantType",
                key: "applicantType",
                transform: None,
            },
            Column {
                title: "Recommendation.headings.resolution",
                key: "appliedReservationsTotal",
                transform: Some(|result, messages| {
                    if is_validated(&result.event_status) {
                        count_and_duration(
                            result.applied_reservations_total,
                            &messages.translate("common.volumeUnit"),
                            result.applied_min_duration_total,
                        )
                    } else {
                        messages.translate("Recommendation.noRecommendations")
                    }
                }),
            },
        ],
        index: |result| result.application_event_schedule_id.map(|id| id.get()),
        sorting: "organisationName",
        order: SortOrder::Asc,
        row_link: |result| {
            result
                .application_event_schedule_id
                .map(RowTarget::Recommendation)
        },
    }
}
