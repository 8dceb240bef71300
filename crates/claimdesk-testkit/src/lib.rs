// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use claimdesk_app::{
    ClaimId, ClaimRecord, ClaimsSource, FilterCriteria, WhiplashFilter, parse_amount,
    parse_form_date,
};
use time::macros::format_description;
use time::{Date, Duration, Month};

const REFERENCE_YEAR: i32 = 2024;
const ACCIDENT_WINDOW_DAYS: i64 = 3 * 365;

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

    fn int_range_i64(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        let span = (high - low + 1) as u64;
        low + (self.next_u64() % span) as i64
    }

    fn chance(&mut self, percent: u64) -> bool {
        self.next_u64() % 100 < percent
    }
}

/// Deterministic claim generator for demos and tests.
#[derive(Debug, Clone)]
pub struct ClaimFaker {
    rng: DeterministicRng,
}

impl ClaimFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn claim(&mut self, id: i64) -> ClaimRecord {
        let days_back = self.rng.int_range_i64(0, ACCIDENT_WINDOW_DAYS);
        let accident = reference_date() - Duration::days(days_back);
        let whiplash = self.rng.chance(40);
        let settlement_pence = self.rng.int_range_i64(50_000, 2_500_000);
        let health_pence = if self.rng.chance(60) {
            self.rng.int_range_i64(2_000, 400_000)
        } else {
            0
        };
        let reduction_pence = if self.rng.chance(25) {
            self.rng.int_range_i64(1_000, settlement_pence / 5)
        } else {
            0
        };

        ClaimRecord {
            id: ClaimId::new(id),
            accident_date: format_date(accident),
            settlement_value: pence_to_pounds(settlement_pence),
            whiplash,
            special_health_expenses: pence_to_pounds(health_pence),
            special_reduction: pence_to_pounds(reduction_pence),
        }
    }

    pub fn claims(&mut self, count: usize) -> Vec<ClaimRecord> {
        (1..=count as i64).map(|id| self.claim(id)).collect()
    }
}

/// A fixed, readable claim for assertions.
pub fn sample_claim(id: i64) -> ClaimRecord {
    ClaimRecord {
        id: ClaimId::new(id),
        accident_date: "2024-03-14".to_owned(),
        settlement_value: 2500.0,
        whiplash: id % 2 == 1,
        special_health_expenses: 120.5,
        special_reduction: 0.0,
    }
}

pub fn sample_claims(ids: &[i64]) -> Vec<ClaimRecord> {
    ids.iter().copied().map(sample_claim).collect()
}

/// Success body of the filter endpoint.
pub fn claims_body(claims: &[ClaimRecord]) -> Result<String> {
    let encoded = serde_json::to_string(claims).context("encode claims body")?;
    Ok(format!("{{\"claims\":{encoded}}}"))
}

/// Failure body of the filter endpoint.
pub fn error_body(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

/// In-memory stand-in for the filter endpoint, applying the same criteria the
/// finance server understands.
#[derive(Debug, Clone)]
pub struct DemoSource {
    claims: Vec<ClaimRecord>,
    failure: Option<String>,
}

impl DemoSource {
    pub fn new(claims: Vec<ClaimRecord>) -> Self {
        Self {
            claims,
            failure: None,
        }
    }

    pub fn seeded(seed: u64, count: usize) -> Self {
        Self::new(ClaimFaker::new(seed).claims(count))
    }

    pub fn failing(message: &str) -> Self {
        Self {
            claims: Vec::new(),
            failure: Some(message.to_owned()),
        }
    }

    pub fn claims(&self) -> &[ClaimRecord] {
        &self.claims
    }
}

impl ClaimsSource for DemoSource {
    fn filter_claims(&self, criteria: &FilterCriteria) -> Result<Vec<ClaimRecord>> {
        if let Some(message) = &self.failure {
            return Err(anyhow!("{message}"));
        }

        let start = parse_form_date("start date", criteria.get("start_date").unwrap_or(""))?;
        let end = parse_form_date("end date", criteria.get("end_date").unwrap_or(""))?;
        let min = parse_amount("minimum settlement", criteria.get("min_settlement").unwrap_or(""))?;
        let max = parse_amount("maximum settlement", criteria.get("max_settlement").unwrap_or(""))?;
        let whiplash = WhiplashFilter::parse(criteria.get("whiplash").unwrap_or(""))
            .ok_or_else(|| anyhow!("unknown whiplash filter"))?;

        let mut matched = Vec::new();
        for claim in &self.claims {
            // An unreadable accident date only matters when a date bound is set.
            let accident = parse_form_date("accident date", &claim.accident_date)
                .ok()
                .flatten();
            if accident.is_none() && (start.is_some() || end.is_some()) {
                continue;
            }
            if let (Some(start), Some(accident)) = (start, accident)
                && accident < start
            {
                continue;
            }
            if let (Some(end), Some(accident)) = (end, accident)
                && accident > end
            {
                continue;
            }
            if min.is_some_and(|min| claim.settlement_value < min)
                || max.is_some_and(|max| claim.settlement_value > max)
                || !whiplash.matches(claim.whiplash)
            {
                continue;
            }
            matched.push(claim.clone());
        }
        Ok(matched)
    }
}

fn reference_date() -> Date {
    Date::from_calendar_date(REFERENCE_YEAR, Month::January, 1).unwrap_or(Date::MIN)
}

fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

fn pence_to_pounds(pence: i64) -> f64 {
    pence as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::{ClaimFaker, DemoSource, claims_body, error_body, sample_claims};
    use claimdesk_app::{ClaimsSource, FilterCriteria};

    #[test]
    fn new_deterministic_seed() {
        let mut left = ClaimFaker::new(42);
        let mut right = ClaimFaker::new(42);
        assert_eq!(left.claims(5), right.claims(5));
    }

    #[test]
    fn generated_claims_are_plausible() {
        let mut faker = ClaimFaker::new(7);
        for claim in faker.claims(50) {
            assert!(claim.settlement_value >= 500.0);
            assert!(claim.special_reduction <= claim.settlement_value);
            assert_eq!(claim.accident_date.len(), 10, "{}", claim.accident_date);
        }
    }

    #[test]
    fn demo_source_applies_whiplash_and_amount_filters() -> anyhow::Result<()> {
        let source = DemoSource::new(sample_claims(&[1, 2, 3]));
        let whiplash_only = source.filter_claims(&FilterCriteria::from_entries([(
            "whiplash", "yes",
        )]))?;
        let ids = whiplash_only
            .iter()
            .map(|claim| claim.id.get())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 3]);

        let none = source.filter_claims(&FilterCriteria::from_entries([(
            "min_settlement",
            "9999",
        )]))?;
        assert!(none.is_empty());
        Ok(())
    }

    #[test]
    fn demo_source_applies_date_window() -> anyhow::Result<()> {
        let source = DemoSource::new(sample_claims(&[1]));
        let after = source.filter_claims(&FilterCriteria::from_entries([(
            "start_date",
            "2024-04-01",
        )]))?;
        assert!(after.is_empty());

        let within = source.filter_claims(&FilterCriteria::from_entries([
            ("start_date", "2024-03-01"),
            ("end_date", "2024-03-31"),
        ]))?;
        assert_eq!(within.len(), 1);
        Ok(())
    }

    #[test]
    fn undated_claim_does_not_break_the_query() -> anyhow::Result<()> {
        let mut claims = sample_claims(&[1, 2]);
        claims[1].accident_date = "unknown".to_owned();
        let source = DemoSource::new(claims);

        let all = source.filter_claims(&FilterCriteria::new())?;
        assert_eq!(all.len(), 2);

        let dated = source.filter_claims(&FilterCriteria::from_entries([(
            "start_date",
            "2024-01-01",
        )]))?;
        let ids = dated.iter().map(|claim| claim.id.get()).collect::<Vec<_>>();
        assert_eq!(ids, vec![1]);
        Ok(())
    }

    #[test]
    fn failing_source_reports_message() {
        let error = DemoSource::failing("DB down")
            .filter_claims(&FilterCriteria::new())
            .expect_err("failing source should fail");
        assert_eq!(error.to_string(), "DB down");
    }

    #[test]
    fn bodies_match_endpoint_shapes() -> anyhow::Result<()> {
        let body = claims_body(&sample_claims(&[5]))?;
        assert!(body.starts_with(r#"{"claims":[{"id":5,"accident_date":"2024-03-14","#));
        assert_eq!(error_body("DB down"), r#"{"error":"DB down"}"#);
        Ok(())
    }
}
