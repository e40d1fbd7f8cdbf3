// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::fields::TableRecord;
use crate::i18n::Messages;
use crate::status::{StatusContext, normalize};

/// Whether a facet keeps the "no value" sentinel among its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyValues {
    Exclude,
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetOrder {
    FirstSeen,
    Sorted,
}

pub struct FacetSpec {
    /// Message key for the facet heading.
    pub title: &'static str,
    /// Field path the facet collects values from.
    pub key: &'static str,
    pub order: FacetOrder,
    pub empty_values: EmptyValues,
    pub label: fn(&str, &Messages) -> String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub title: String,
    pub key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    pub title: String,
    pub filters: Vec<FilterOption>,
}

/// Derives the selectable filter values per facet from the current dataset.
/// Values are distinct within a facet and ordered per each [`FacetSpec`]'s
/// mode, so repeated calls over the same input produce identical output.
pub fn derive_facets<R: TableRecord>(
    records: &[R],
    specs: &[FacetSpec],
    messages: &Messages,
) -> Vec<FilterConfig> {
    specs
        .iter()
        .map(|spec| {
            let mut values: Vec<String> = Vec::new();
            for record in records {
                let value = record.field(spec.key);
                if spec.empty_values == EmptyValues::Exclude && value.is_empty() {
                    continue;
                }
                let token = value.filter_token();
                if !values.contains(&token) {
                    values.push(token);
                }
            }
            if spec.order == FacetOrder::Sorted {
                values.sort();
            }
            FilterConfig {
                title: messages.translate(spec.title),
                filters: values
                    .into_iter()
                    .map(|value| FilterOption {
                        title: (spec.label)(&value, messages),
                        key: spec.key,
                        value,
                    })
                    .collect(),
            }
        })
        .collect()
}

fn applicant_type_option_label(value: &str, messages: &Messages) -> String {
    messages.translate(&format!("Application.applicantTypes.{value}"))
}

fn status_option_label(value: &str, messages: &Messages) -> String {
    messages.translate(normalize(value, StatusContext::Review).message_key())
}

fn verbatim_label(value: &str, _messages: &Messages) -> String {
    value.to_owned()
}

/// Facets of the applications list: applicant type (empty skipped) and raw
/// status labelled by its normalized review status.
pub fn applications_facets() -> Vec<FacetSpec> {
    vec![
        FacetSpec {
            title: "Application.headings.applicantType",
            key: "applicantType",
            order: FacetOrder::FirstSeen,
            empty_values: EmptyValues::Exclude,
            label: applicant_type_option_label,
        },
        FacetSpec {
            title: "Application.headings.applicationStatus",
            key: "status",
            order: FacetOrder::FirstSeen,
            empty_values: EmptyValues::Keep,
            label: status_option_label,
        },
    ]
}

/// Facets of the resolution report's unallocated tab.
pub fn unallocated_facets() -> Vec<FacetSpec> {
    vec![FacetSpec {
        title: "Application.headings.applicantType",
        key: "applicantType",
        order: FacetOrder::Sorted,
        empty_values: EmptyValues::Keep,
        label: applicant_type_option_label,
    }]
}

/// Facets of the resolution report's allocated tab.
pub fn allocated_facets() -> Vec<FacetSpec> {
    vec![
        FacetSpec {
            title: "Application.headings.applicantType",
            key: "applicantType",
            order: FacetOrder::Sorted,
            empty_values: EmptyValues::Keep,
            label: applicant_type_option_label,
        },
        FacetSpec {
            title: "Recommendation.headings.reservationUnit",
            key: "unitName",
            order: FacetOrder::Sorted,
            empty_values: EmptyValues::Keep,
            label: verbatim_label,
        },
    ]
}
