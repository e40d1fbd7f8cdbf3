// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use url::Url;

use varaus_app::{
    AllocationResult, AppliedAggregates, ApplicantType, Application, ApplicationAggregates,
    ApplicationEvent, ApplicationEventScheduleId, ApplicationId, ApplicationRound,
    ApplicationRoundId, ContactPerson, FetchError, Organisation, ServiceSectorId,
};

/// Blocking client for the booking-service REST API. Construction validates
/// the configured base URL; the fetch methods map HTTP failures onto the
/// [`FetchError`] taxonomy so callers can tell a missing round from a broken
/// connection.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let parsed =
            Url::parse(&base_url).with_context(|| format!("invalid api.base_url {base_url:?}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.base_url must use http or https, got {:?}",
                parsed.scheme()
            );
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches one application round by id. A 404 becomes
    /// [`FetchError::NotFound`]; every other failure is transport.
    pub fn application_round(
        &self,
        id: ApplicationRoundId,
    ) -> Result<ApplicationRound, FetchError> {
        let response = self
            .http
            .get(format!(
                "{}/v1/application_round/{}/",
                self.base_url,
                id.get()
            ))
            .send()
            .map_err(|error| connection_error(&self.base_url, &error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let parsed: RoundDto = response
            .json()
            .map_err(|error| decode_error("application round", &error))?;
        parsed.into_model()
    }

    /// Fetches the applications of a round, server-filtered to the given
    /// comma-separated raw statuses.
    pub fn applications(
        &self,
        round: ApplicationRoundId,
        status_filter: &str,
    ) -> Result<Vec<Application>, FetchError> {
        let response = self
            .http
            .get(format!(
                "{}/v1/application/?application_round={}&status={}",
                self.base_url,
                round.get(),
                status_filter
            ))
            .send()
            .map_err(|error| connection_error(&self.base_url, &error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let parsed: Vec<ApplicationDto> = response
            .json()
            .map_err(|error| decode_error("application list", &error))?;
        Ok(parsed.into_iter().map(Application::from).collect())
    }

    /// Fetches the allocation results produced for a round within one service
    /// sector.
    pub fn allocation_results(
        &self,
        round: ApplicationRoundId,
        sector: ServiceSectorId,
    ) -> Result<Vec<AllocationResult>, FetchError> {
        let response = self
            .http
            .get(format!(
                "{}/v1/allocation_result/?application_round_id={}&service_sector_id={}",
                self.base_url,
                round.get(),
                sector.get()
            ))
            .send()
            .map_err(|error| connection_error(&self.base_url, &error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let parsed: Vec<AllocationResultDto> = response
            .json()
            .map_err(|error| decode_error("allocation result list", &error))?;
        Ok(parsed.into_iter().map(AllocationResult::from).collect())
    }
}

fn connection_error(base_url: &str, error: &reqwest::Error) -> FetchError {
    FetchError::Transport(format!("cannot reach {base_url} ({error})"))
}

fn decode_error(what: &str, error: &reqwest::Error) -> FetchError {
    FetchError::Transport(format!("decode {what}: {error}"))
}

fn status_error(status: StatusCode, body: &str) -> FetchError {
    if status == StatusCode::NOT_FOUND {
        return FetchError::NotFound;
    }

    if let Ok(parsed) = serde_json::from_str::<DetailEnvelope>(body)
        && let Some(detail) = parsed.detail
        && !detail.is_empty()
    {
        return FetchError::Transport(format!("server error ({}): {detail}", status.as_u16()));
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains('{') {
        return FetchError::Transport(format!("server error ({}): {trimmed}", status.as_u16()));
    }

    FetchError::Transport(format!("server returned {}", status.as_u16()))
}

fn parse_timestamp(raw: &str, field: &str) -> Result<OffsetDateTime, FetchError> {
    OffsetDateTime::parse(raw, &Rfc3339)
        .map_err(|error| FetchError::Transport(format!("decode {field}: {error}")))
}

#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    detail: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoundDto {
    id: i64,
    name: Option<String>,
    service_sector_id: i64,
    application_period_begin: String,
    application_period_end: String,
}

impl RoundDto {
    fn into_model(self) -> Result<ApplicationRound, FetchError> {
        Ok(ApplicationRound {
            id: ApplicationRoundId::new(self.id),
            name: self.name.unwrap_or_default(),
            service_sector_id: ServiceSectorId::new(self.service_sector_id),
            application_period_begin: parse_timestamp(
                &self.application_period_begin,
                "applicationPeriodBegin",
            )?,
            application_period_end: parse_timestamp(
                &self.application_period_end,
                "applicationPeriodEnd",
            )?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationDto {
    id: i64,
    applicant_type: Option<String>,
    organisation: Option<OrganisationDto>,
    contact_person: Option<ContactPersonDto>,
    status: Option<String>,
    aggregated_data: Option<AggregatesDto>,
}

impl From<ApplicationDto> for Application {
    fn from(dto: ApplicationDto) -> Self {
        Self {
            id: ApplicationId::new(dto.id),
            applicant_type: dto.applicant_type.as_deref().and_then(ApplicantType::parse),
            organisation: dto.organisation.map(Organisation::from),
            contact_person: dto.contact_person.map(ContactPerson::from),
            status: dto.status.unwrap_or_default(),
            aggregated_data: dto.aggregated_data.map(ApplicationAggregates::from),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrganisationDto {
    name: Option<String>,
    active_members_count: Option<i64>,
}

impl From<OrganisationDto> for Organisation {
    fn from(dto: OrganisationDto) -> Self {
        Self {
            name: dto.name.unwrap_or_default(),
            active_members_count: dto.active_members_count,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContactPersonDto {
    first_name: Option<String>,
    last_name: Option<String>,
}

impl From<ContactPersonDto> for ContactPerson {
    fn from(dto: ContactPersonDto) -> Self {
        Self {
            first_name: dto.first_name.unwrap_or_default(),
            last_name: dto.last_name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregatesDto {
    reservations_total: Option<i64>,
    min_duration_total: Option<i64>,
}

impl From<AggregatesDto> for ApplicationAggregates {
    fn from(dto: AggregatesDto) -> Self {
        Self {
            reservations_total: dto.reservations_total,
            min_duration_total: dto.min_duration_total,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllocationResultDto {
    application_id: i64,
    application_event_schedule_id: Option<i64>,
    applicant_type: Option<String>,
    organisation_name: Option<String>,
    unit_name: Option<String>,
    application_event: Option<EventDto>,
    application_aggregated_data: Option<AppliedDto>,
}

impl From<AllocationResultDto> for AllocationResult {
    fn from(dto: AllocationResultDto) -> Self {
        Self {
            application_id: ApplicationId::new(dto.application_id),
            application_event_schedule_id: dto
                .application_event_schedule_id
                .map(ApplicationEventScheduleId::new),
            applicant_type: dto.applicant_type.as_deref().and_then(ApplicantType::parse),
            organisation_name: dto.organisation_name.unwrap_or_default(),
            unit_name: dto.unit_name.unwrap_or_default(),
            application_event: ApplicationEvent {
                status: dto
                    .application_event
                    .and_then(|event| event.status)
                    .unwrap_or_default(),
            },
            application_aggregated_data: dto.application_aggregated_data.map(|applied| {
                AppliedAggregates {
                    applied_reservations_total: applied.applied_reservations_total,
                    applied_min_duration_total: applied.applied_min_duration_total,
                }
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EventDto {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppliedDto {
    applied_reservations_total: Option<i64>,
    applied_min_duration_total: Option<i64>,
}
