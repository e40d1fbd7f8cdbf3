// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

use crate::model::{Application, ProcessedAllocationResult};

/// A raw field value pulled out of a record by path. `Empty` stands in for
/// missing parents, absent optionals, and empty strings alike, so transforms
/// and filters never have to distinguish why a value is not there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(i64),
}

impl CellValue {
    pub fn text(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value.to_owned())
        }
    }

    pub fn number(value: Option<i64>) -> Self {
        match value {
            Some(value) => Self::Number(value),
            None => Self::Empty,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(value) => value.clone(),
            Self::Number(value) => value.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The token facet derivation and filter membership agree on.
    pub fn filter_token(&self) -> String {
        self.display()
    }

    pub fn cmp_value(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => left.cmp(right),
            (Self::Text(left), Self::Text(right)) => {
                left.to_lowercase().cmp(&right.to_lowercase())
            }
            _ => self
                .display()
                .to_lowercase()
                .cmp(&other.display().to_lowercase()),
        }
    }
}

/// Safe path access into a record: absent intermediate objects and unknown
/// paths yield `Empty` instead of panicking, since upstream records arrive
/// partially populated.
pub trait TableRecord {
    fn field(&self, path: &str) -> CellValue;
}

impl TableRecord for Application {
    fn field(&self, path: &str) -> CellValue {
        match path {
            "id" => CellValue::Number(self.id.get()),
            "applicantType" => match self.applicant_type {
                Some(applicant_type) => CellValue::text(applicant_type.as_str()),
                None => CellValue::Empty,
            },
            "status" => CellValue::text(&self.status),
            "organisation.name" => match &self.organisation {
                Some(organisation) => CellValue::text(&organisation.name),
                None => CellValue::Empty,
            },
            "organisation.activeMembersCount" => match &self.organisation {
                Some(organisation) => CellValue::number(organisation.active_members_count),
                None => CellValue::Empty,
            },
            "contactPerson.firstName" => match &self.contact_person {
                Some(person) => CellValue::text(&person.first_name),
                None => CellValue::Empty,
            },
            "contactPerson.lastName" => match &self.contact_person {
                Some(person) => CellValue::text(&person.last_name),
                None => CellValue::Empty,
            },
            "aggregatedData.reservationsTotal" => match &self.aggregated_data {
                Some(aggregates) => CellValue::number(aggregates.reservations_total),
                None => CellValue::Empty,
            },
            "aggregatedData.minDurationTotal" => match &self.aggregated_data {
                Some(aggregates) => CellValue::number(aggregates.min_duration_total),
                None => CellValue::Empty,
            },
            _ => CellValue::Empty,
        }
    }
}

impl TableRecord for ProcessedAllocationResult {
    fn field(&self, path: &str) -> CellValue {
        match path {
            "applicationId" => CellValue::Number(self.application_id.get()),
            "applicationEventScheduleId" => {
                CellValue::number(self.application_event_schedule_id.map(|id| id.get()))
            }
            "applicantType" => match self.applicant_type {
                Some(applicant_type) => CellValue::text(applicant_type.as_str()),
                None => CellValue::Empty,
            },
            "organisationName" => CellValue::text(&self.organisation_name),
            "unitName" => CellValue::text(&self.unit_name),
            "eventStatus" => CellValue::text(&self.event_status),
            "appliedReservationsTotal" => CellValue::number(self.applied_reservations_total),
            "appliedMinDurationTotal" => CellValue::number(self.applied_min_duration_total),
            _ => CellValue::Empty,
        }
    }
}
