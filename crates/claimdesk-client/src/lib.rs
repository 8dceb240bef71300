// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, anyhow, bail};
use claimdesk_app::{ClaimRecord, ClaimsSource, Endpoints, FilterCriteria};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::{ACCEPT, COOKIE};
use reqwest::redirect::Policy;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const SESSION_COOKIE_NAME: &str = "sessionid";
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response format";
pub const GENERIC_SERVER_ERROR: &str = "Server error occurred";

/// Blocking client for the finance filter endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    endpoints: Endpoints,
    timeout: Duration,
    session_cookie: Option<String>,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            bail!("server.timeout must be positive");
        }
        let endpoints = Endpoints::new(base_url)?;

        // Django answers an unauthenticated request with a redirect to the
        // login page; surface that instead of parsing the login HTML.
        let http = HttpClient::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|error| anyhow!("build HTTP client: {error}"))?;

        Ok(Self {
            endpoints,
            timeout,
            session_cookie: None,
            http,
        })
    }

    pub fn with_session_cookie(mut self, session: Option<&str>) -> Self {
        self.session_cookie = session
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn base_url(&self) -> &str {
        self.endpoints.base().as_str()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn has_session(&self) -> bool {
        self.session_cookie.is_some()
    }

    pub fn filter_url(&self, criteria: &FilterCriteria) -> Result<Url> {
        self.endpoints.filter_claims(criteria)
    }

    /// Fetches the claims matching `criteria`.
    ///
    /// The error's message is what the dashboard shows the user: the server's
    /// own `error` text when it sent one, otherwise a short generic line.
    pub fn filter_claims(&self, criteria: &FilterCriteria) -> Result<Vec<ClaimRecord>> {
        let url = self.filter_url(criteria)?;
        debug!(%url, "requesting filtered claims");

        let mut request = self.http.get(url).header(ACCEPT, "application/json");
        if let Some(session) = &self.session_cookie {
            request = request.header(COOKIE, format!("{SESSION_COOKIE_NAME}={session}"));
        }
        let response = request
            .send()
            .map_err(|error| connection_error(self.base_url(), self.timeout, error))?;

        let status = response.status();
        if status.is_redirection() {
            bail!(
                "not signed in to {} -- set [server].session_cookie or CLAIMDESK_SESSION and retry",
                self.base_url()
            );
        }

        let body = response
            .text()
            .map_err(|error| body_read_error(self.base_url(), self.timeout, error))?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "filter endpoint returned an error");
            return Err(clean_error_response(status, &body));
        }

        decode_claims(&body)
    }
}

impl ClaimsSource for Client {
    fn filter_claims(&self, criteria: &FilterCriteria) -> Result<Vec<ClaimRecord>> {
        Client::filter_claims(self, criteria)
    }
}

#[derive(Debug, Deserialize)]
struct FilterResponse {
    claims: Option<Vec<ClaimRecord>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

fn decode_claims(body: &str) -> Result<Vec<ClaimRecord>> {
    match serde_json::from_str::<FilterResponse>(body) {
        Ok(FilterResponse {
            claims: Some(claims),
        }) => Ok(claims),
        Ok(FilterResponse { claims: None }) => {
            debug!("filter response has no claims field");
            Err(anyhow!(INVALID_RESPONSE_MESSAGE))
        }
        Err(error) => {
            debug!(%error, "filter response is not valid JSON");
            Err(anyhow!(INVALID_RESPONSE_MESSAGE))
        }
    }
}

fn connection_error(base_url: &str, timeout: Duration, error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        return anyhow!(
            "{base_url} did not answer within {}ms -- raise [server].timeout or retry",
            timeout.as_millis()
        );
    }
    anyhow!("cannot reach {base_url} -- is the finance server running? ({error})")
}

fn body_read_error(base_url: &str, timeout: Duration, error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        return connection_error(base_url, timeout, error);
    }
    anyhow!("{base_url} closed the connection mid-response -- retry the filter ({error})")
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(error) = parsed.error
        && !error.trim().is_empty()
    {
        return anyhow!("{}", error.trim());
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && trimmed.len() < 100 && !trimmed.contains(['{', '<']) {
        return anyhow!("{GENERIC_SERVER_ERROR} ({}): {trimmed}", status.as_u16());
    }

    anyhow!("{GENERIC_SERVER_ERROR} ({})", status.as_u16())
}
