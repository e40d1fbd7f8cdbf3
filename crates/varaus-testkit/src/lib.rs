// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::{Date, Duration, Month, OffsetDateTime, Time};
use varaus_app::{
    AllocationResult, AppliedAggregates, ApplicantType, Application, ApplicationAggregates,
    ApplicationEvent, ApplicationEventScheduleId, ApplicationId, ApplicationRound,
    ApplicationRoundId, ContactPerson, Organisation, ServiceSectorId,
};

const CLUB_ACTIVITIES: [&str; 12] = [
    "Chess",
    "Paddle",
    "Rowing",
    "Archery",
    "Theatre",
    "Choir",
    "Badminton",
    "Ceramics",
    "Fencing",
    "Photography",
    "Climbing",
    "Judo",
];

const CLUB_SUFFIXES: [&str; 6] = [
    "Club",
    "Society",
    "Association",
    "Collective",
    "Circle",
    "Guild",
];

const DISTRICTS: [&str; 6] = [
    "Harbour",
    "Riverside",
    "Old Town",
    "Northside",
    "Lakeside",
    "Westend",
];

const FIRST_NAMES: [&str; 14] = [
    "Aino", "Eero", "Helmi", "Ilmari", "Kaisa", "Lauri", "Maija", "Onni", "Sanni", "Tuomas",
    "Veera", "Juhani", "Elsa", "Mikko",
];
const LAST_NAMES: [&str; 14] = [
    "Virtanen",
    "Korhonen",
    "Nieminen",
    "Laine",
    "Heikkinen",
    "Koskinen",
    "Järvinen",
    "Lehtonen",
    "Salminen",
    "Tuominen",
    "Rantanen",
    "Mattila",
    "Saarinen",
    "Hiltunen",
];

const UNIT_NAMES: [&str; 10] = [
    "North Hall",
    "Riverside Pavilion",
    "Harbour Gym",
    "Old Mill Studio",
    "Central Sports Hall",
    "Lakeview Court",
    "Granite Hall",
    "Cedar Room",
    "South Annex",
    "Garden Pavilion",
];

const ROUND_SEASONS: [&str; 4] = ["Spring", "Summer", "Autumn", "Winter"];
const ROUND_CATEGORIES: [&str; 4] = ["sports halls", "meeting rooms", "studios", "youth spaces"];

// Repetition weights the draw; generated data should mostly sit in the
// under-review vocabulary with the occasional already-handled row.
const APPLICATION_STATUSES: [&str; 8] = [
    "in_review",
    "in_review",
    "in_review",
    "review_done",
    "review_done",
    "declined",
    "validated",
    "handled",
];
const EVENT_STATUSES: [&str; 6] = [
    "validated",
    "validated",
    "validated",
    "approved",
    "failed",
    "declined",
];

const MIN_DURATIONS: [i64; 6] = [900, 1800, 2700, 3600, 5400, 7200];

const REFERENCE_YEAR: i32 = 2026;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator for application rounds, applications and allocation
/// results. Same seed, same data; demo mode and the test suites both lean on
/// that.
#[derive(Debug, Clone)]
pub struct RoundFaker {
    rng: DeterministicRng,
    next_schedule_id: i64,
}

impl RoundFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_schedule_id: 1,
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn application_round(&mut self, id: ApplicationRoundId) -> ApplicationRound {
        let season = self.pick(&ROUND_SEASONS);
        let category = self.pick(&ROUND_CATEGORIES);
        let begin = self.random_datetime_between(
            midnight_utc(REFERENCE_YEAR, Month::January, 2),
            midnight_utc(REFERENCE_YEAR, Month::March, 1),
        );
        let end = begin + Duration::days(i64::from(self.int_range_i32(45, 120)));

        ApplicationRound {
            id,
            name: format!("{season} {REFERENCE_YEAR} {category}"),
            service_sector_id: ServiceSectorId::new(i64::from(self.int_range_i32(1, 4))),
            application_period_begin: begin,
            application_period_end: end,
        }
    }

    pub fn application(&mut self, id: ApplicationId) -> Application {
        let applicant_type = if self.int_range_i32(1, 8) == 1 {
            None
        } else {
            Some(ApplicantType::ALL[self.rng.int_n(ApplicantType::ALL.len())])
        };

        let organisation = match applicant_type {
            Some(ApplicantType::Individual) | None => None,
            Some(_) => Some(self.organisation()),
        };
        let contact_person = if organisation.is_none() || self.rng.bool() {
            Some(self.contact_person())
        } else {
            None
        };

        let aggregated_data = if self.int_range_i32(1, 4) == 1 {
            None
        } else {
            Some(ApplicationAggregates {
                reservations_total: Some(i64::from(self.int_range_i32(1, 40))),
                min_duration_total: Some(MIN_DURATIONS[self.rng.int_n(MIN_DURATIONS.len())]),
            })
        };

        Application {
            id,
            applicant_type,
            organisation,
            contact_person,
            status: self.pick(&APPLICATION_STATUSES).to_owned(),
            aggregated_data,
        }
    }

    pub fn applications(&mut self, count: usize) -> Vec<Application> {
        (1..=count as i64)
            .map(|id| self.application(ApplicationId::new(id)))
            .collect()
    }

    /// Generates allocation results for roughly two thirds of the given
    /// applications, one or two results each. Every emitted result references
    /// an application from the input; schedule ids are unique when present.
    pub fn allocation_results_for(
        &mut self,
        applications: &[Application],
    ) -> Vec<AllocationResult> {
        let mut results = Vec::new();
        for application in applications {
            if self.int_range_i32(1, 3) == 1 {
                continue;
            }
            let count = self.int_range_i32(1, 2);
            for _ in 0..count {
                results.push(self.allocation_result_for(application));
            }
        }
        results
    }

    pub fn allocation_result_for(&mut self, application: &Application) -> AllocationResult {
        let schedule_id = if self.int_range_i32(1, 5) == 1 {
            None
        } else {
            let id = self.next_schedule_id;
            self.next_schedule_id += 1;
            Some(ApplicationEventScheduleId::new(id))
        };

        AllocationResult {
            application_id: application.id,
            application_event_schedule_id: schedule_id,
            applicant_type: application.applicant_type,
            organisation_name: application
                .organisation
                .as_ref()
                .map(|organisation| organisation.name.clone())
                .unwrap_or_default(),
            unit_name: self.pick(&UNIT_NAMES).to_owned(),
            application_event: ApplicationEvent {
                status: self.pick(&EVENT_STATUSES).to_owned(),
            },
            application_aggregated_data: Some(AppliedAggregates {
                applied_reservations_total: Some(i64::from(self.int_range_i32(1, 30))),
                applied_min_duration_total: Some(
                    MIN_DURATIONS[self.rng.int_n(MIN_DURATIONS.len())],
                ),
            }),
        }
    }

    fn organisation(&mut self) -> Organisation {
        let name = if self.rng.bool() {
            format!(
                "{} {} {}",
                self.pick(&DISTRICTS),
                self.pick(&CLUB_ACTIVITIES),
                self.pick(&CLUB_SUFFIXES),
            )
        } else {
            format!(
                "{} {}",
                self.pick(&CLUB_ACTIVITIES),
                self.pick(&CLUB_SUFFIXES)
            )
        };
        let active_members_count = if self.int_range_i32(1, 4) == 1 {
            None
        } else {
            Some(i64::from(self.int_range_i32(5, 400)))
        };
        Organisation {
            name,
            active_members_count,
        }
    }

    fn contact_person(&mut self) -> ContactPerson {
        ContactPerson {
            first_name: self.pick(&FIRST_NAMES).to_owned(),
            last_name: self.pick(&LAST_NAMES).to_owned(),
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range_i32(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = i64::from(max) - i64::from(min) + 1;
        let offset = (self.rng.next_u64() % (span as u64)) as i64;
        (i64::from(min) + offset) as i32
    }

    fn random_datetime_between(
        &mut self,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> OffsetDateTime {
        let start_ts = start.unix_timestamp();
        let end_ts = end.unix_timestamp();
        if end_ts <= start_ts {
            return start;
        }
        let span = (end_ts - start_ts) as u64;
        let offset = self.rng.next_u64() % (span + 1);
        OffsetDateTime::from_unix_timestamp(start_ts + offset as i64).expect("valid unix timestamp")
    }
}

/// A complete dataset for one review round.
#[derive(Debug, Clone)]
pub struct RoundFixture {
    pub round: ApplicationRound,
    pub applications: Vec<Application>,
    pub allocation_results: Vec<AllocationResult>,
}

pub fn round_fixture(seed: u64) -> RoundFixture {
    let mut faker = RoundFaker::new(seed);
    let round = faker.application_round(ApplicationRoundId::new(1));
    let applications = faker.applications(24);
    let allocation_results = faker.allocation_results_for(&applications);
    RoundFixture {
        round,
        applications,
        allocation_results,
    }
}

/// Reference clock for demo sessions, chosen to land inside or near the
/// generated application periods.
pub fn fixture_now() -> OffsetDateTime {
    midnight_utc(REFERENCE_YEAR, Month::February, 19) + Duration::hours(12)
}

fn midnight_utc(year: i32, month: Month, day: u8) -> OffsetDateTime {
    let date = Date::from_calendar_date(year, month, day).expect("valid calendar date");
    let midnight = Time::from_hms(0, 0, 0).expect("valid midnight");
    date.with_time(midnight).assume_utc()
}
