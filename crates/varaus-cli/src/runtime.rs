// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;
use varaus_api::Client;
use varaus_app::{
    AllocationResult, Application, ApplicationRound, ApplicationRoundId, FetchError,
    ServiceSectorId,
};
use varaus_testkit::{RoundFixture, fixture_now, round_fixture};
use varaus_tui::RoundRuntime;

/// Live runtime: every load goes to the booking service.
pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl RoundRuntime for ApiRuntime {
    fn load_round(&mut self, id: ApplicationRoundId) -> Result<ApplicationRound, FetchError> {
        self.client.application_round(id)
    }

    fn load_applications(
        &mut self,
        round: ApplicationRoundId,
        status_filter: &str,
    ) -> Result<Vec<Application>, FetchError> {
        self.client.applications(round, status_filter)
    }

    fn load_allocation_results(
        &mut self,
        round: ApplicationRoundId,
        sector: ServiceSectorId,
    ) -> Result<Vec<AllocationResult>, FetchError> {
        self.client.allocation_results(round, sector)
    }
}

/// Offline runtime over one seeded fixture. Any other round id reports
/// not-found, the same answer the live API would give. The clock is pinned so
/// the application-period summary reads the same in every demo session.
pub struct DemoRuntime {
    fixture: RoundFixture,
}

impl DemoRuntime {
    pub fn new(seed: u64) -> Self {
        Self {
            fixture: round_fixture(seed),
        }
    }

    pub fn round_id(&self) -> ApplicationRoundId {
        self.fixture.round.id
    }
}

impl RoundRuntime for DemoRuntime {
    fn load_round(&mut self, id: ApplicationRoundId) -> Result<ApplicationRound, FetchError> {
        if id != self.fixture.round.id {
            return Err(FetchError::NotFound);
        }
        Ok(self.fixture.round.clone())
    }

    fn load_applications(
        &mut self,
        round: ApplicationRoundId,
        status_filter: &str,
    ) -> Result<Vec<Application>, FetchError> {
        if round != self.fixture.round.id {
            return Err(FetchError::NotFound);
        }
        let wanted: Vec<&str> = status_filter
            .split(',')
            .map(str::trim)
            .filter(|status| !status.is_empty())
            .collect();
        Ok(self
            .fixture
            .applications
            .iter()
            .filter(|application| wanted.contains(&application.status.as_str()))
            .cloned()
            .collect())
    }

    fn load_allocation_results(
        &mut self,
        round: ApplicationRoundId,
        _sector: ServiceSectorId,
    ) -> Result<Vec<AllocationResult>, FetchError> {
        if round != self.fixture.round.id {
            return Err(FetchError::NotFound);
        }
        Ok(self.fixture.allocation_results.clone())
    }

    fn now(&self) -> OffsetDateTime {
        fixture_now()
    }
}
