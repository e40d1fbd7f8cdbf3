// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use crate::ids::ApplicationId;
use crate::model::{AllocationResult, Application, Group, ProcessedAllocationResult};

/// Event statuses that count as resolved on the allocated tab.
pub const VALIDATED_EVENT_STATUSES: [&str; 1] = ["validated"];

pub fn is_validated(event_status: &str) -> bool {
    VALIDATED_EVENT_STATUSES.contains(&event_status)
}

/// Flattens raw allocation results into display rows. Identity is the
/// schedule id: exact duplicates collapse to their first occurrence, rows
/// without one (unallocated candidates) are all kept, and input order is
/// preserved, so repeated runs over the same input are structurally identical.
pub fn process_allocation_results(raw: &[AllocationResult]) -> Vec<ProcessedAllocationResult> {
    let mut seen = BTreeSet::new();
    let mut processed = Vec::with_capacity(raw.len());
    for result in raw {
        if let Some(schedule_id) = result.application_event_schedule_id
            && !seen.insert(schedule_id)
        {
            continue;
        }
        processed.push(ProcessedAllocationResult {
            application_id: result.application_id,
            application_event_schedule_id: result.application_event_schedule_id,
            applicant_type: result.applicant_type,
            organisation_name: result.organisation_name.clone(),
            unit_name: result.unit_name.clone(),
            event_status: result.application_event.status.clone(),
            applied_reservations_total: result
                .application_aggregated_data
                .and_then(|aggregates| aggregates.applied_reservations_total),
            applied_min_duration_total: result
                .application_aggregated_data
                .and_then(|aggregates| aggregates.applied_min_duration_total),
        });
    }
    processed
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub allocated: Vec<Application>,
    pub unallocated: Vec<Application>,
}

/// Splits applications by membership of their id in the processed results.
/// This is a set-membership partition over the results passed in, not a
/// status check; callers must recompute it whenever the results change. An
/// application with any processed result counts as allocated, including
/// partially allocated ones.
pub fn partition_unallocated(
    applications: &[Application],
    processed: &[ProcessedAllocationResult],
) -> Partition {
    let allocated_ids: BTreeSet<ApplicationId> = processed
        .iter()
        .map(|result| result.application_id)
        .collect();

    let mut allocated = Vec::new();
    let mut unallocated = Vec::new();
    for application in applications {
        if allocated_ids.contains(&application.id) {
            allocated.push(application.clone());
        } else {
            unallocated.push(application.clone());
        }
    }
    Partition {
        allocated,
        unallocated,
    }
}

/// Wraps rows in the one group single-table views render, id 1 even when
/// there are no rows.
pub fn single_group<R: Clone>(rows: &[R]) -> Vec<Group<R>> {
    vec![Group {
        id: 1,
        data: rows.to_vec(),
    }]
}

/// Clusters processed results by reservation unit for sectioned rendering.
/// Groups appear in order of each unit's first occurrence, rows keep input
/// order within their group, and ids run 1..n. Empty input gives an empty
/// list, not one empty group.
pub fn group_by_unit(
    results: &[ProcessedAllocationResult],
) -> Vec<Group<ProcessedAllocationResult>> {
    let mut buckets: Vec<(String, Vec<ProcessedAllocationResult>)> = Vec::new();
    for result in results {
        match buckets
            .iter_mut()
            .find(|(unit_name, _)| *unit_name == result.unit_name)
        {
            Some((_, rows)) => rows.push(result.clone()),
            None => buckets.push((result.unit_name.clone(), vec![result.clone()])),
        }
    }
    buckets
        .into_iter()
        .enumerate()
        .map(|(position, (_, data))| Group {
            id: position as i64 + 1,
            data,
        })
        .collect()
}

/// The allocated tab's view filter: only validated rows. Non-validated rows
/// stay in the unfiltered collection; this never deletes anything upstream.
pub fn validated_only(results: &[ProcessedAllocationResult]) -> Vec<ProcessedAllocationResult> {
    results
        .iter()
        .filter(|result| is_validated(&result.event_status))
        .cloned()
        .collect()
}
