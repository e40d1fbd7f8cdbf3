// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApplicantType {
    Individual,
    Association,
    Community,
    Company,
}

impl ApplicantType {
    pub const ALL: [Self; 4] = [
        Self::Individual,
        Self::Association,
        Self::Community,
        Self::Company,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Association => "association",
            Self::Community => "community",
            Self::Company => "company",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "individual" => Some(Self::Individual),
            "association" => Some(Self::Association),
            "community" => Some(Self::Community),
            "company" => Some(Self::Company),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The two row collections of the resolution report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupTab {
    Unallocated,
    Allocated,
}

impl GroupTab {
    pub const ALL: [Self; 2] = [Self::Unallocated, Self::Allocated];

    pub const fn message_key(self) -> &'static str {
        match self {
            Self::Unallocated => "ApplicationRound.orphanApplications",
            Self::Allocated => "ApplicationRound.handledApplications",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
    pub name: String,
    pub active_members_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPerson {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationAggregates {
    pub reservations_total: Option<i64>,
    pub min_duration_total: Option<i64>,
}

/// A submitted booking request. Read-only here; the review tooling never
/// mutates applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub applicant_type: Option<ApplicantType>,
    pub organisation: Option<Organisation>,
    pub contact_person: Option<ContactPerson>,
    pub status: String,
    pub aggregated_data: Option<ApplicationAggregates>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRound {
    pub id: ApplicationRoundId,
    pub name: String,
    pub service_sector_id: ServiceSectorId,
    pub application_period_begin: OffsetDateTime,
    pub application_period_end: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationEvent {
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedAggregates {
    pub applied_reservations_total: Option<i64>,
    pub applied_min_duration_total: Option<i64>,
}

/// One scheduling slot produced by the external allocation run. A schedule id
/// of `None` marks an unallocated candidate. Several results may share an
/// application id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub application_id: ApplicationId,
    pub application_event_schedule_id: Option<ApplicationEventScheduleId>,
    pub applicant_type: Option<ApplicantType>,
    pub organisation_name: String,
    pub unit_name: String,
    pub application_event: ApplicationEvent,
    pub application_aggregated_data: Option<AppliedAggregates>,
}

/// A raw allocation result flattened into a display row. Derived in memory
/// only; `application_event_schedule_id` stays the row identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedAllocationResult {
    pub application_id: ApplicationId,
    pub application_event_schedule_id: Option<ApplicationEventScheduleId>,
    pub applicant_type: Option<ApplicantType>,
    pub organisation_name: String,
    pub unit_name: String,
    pub event_status: String,
    pub applied_reservations_total: Option<i64>,
    pub applied_min_duration_total: Option<i64>,
}

/// A named cluster of rows for sectioned display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group<R> {
    pub id: i64,
    pub data: Vec<R>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applicant_type_round_trips_through_strings() {
        for applicant_type in ApplicantType::ALL {
            assert_eq!(
                ApplicantType::parse(applicant_type.as_str()),
                Some(applicant_type)
            );
        }
        assert_eq!(ApplicantType::parse("co-op"), None);
    }

    #[test]
    fn sort_order_flips_both_ways() {
        assert_eq!(SortOrder::Asc.flipped(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.flipped(), SortOrder::Asc);
    }
}
