// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use claimdesk_app::{ClaimRecord, ClaimsSource, FilterCriteria, FilterRequest};
use claimdesk_client::Client;
use claimdesk_testkit::DemoSource;
use claimdesk_tui::{AppRuntime, InternalEvent};
use std::sync::mpsc::Sender;
use std::thread;
use tracing::debug;

/// Talks to the finance server. Filter requests run on a worker thread so the
/// terminal stays responsive while the server answers.
pub struct HttpRuntime {
    client: Client,
}

impl HttpRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl AppRuntime for HttpRuntime {
    fn filter_claims(&mut self, criteria: &FilterCriteria) -> Result<Vec<ClaimRecord>> {
        self.client.filter_claims(criteria)
    }

    fn spawn_filter(&mut self, request: FilterRequest, tx: Sender<InternalEvent>) -> Result<()> {
        let client = self.client.clone();
        thread::Builder::new()
            .name("claimdesk-filter".to_owned())
            .spawn(move || {
                let outcome = client
                    .filter_claims(&request.criteria)
                    .map_err(|error| error.to_string());
                // The UI may have exited already; nothing is waiting then.
                let _ = tx.send(InternalEvent::FilterCompleted {
                    request_id: request.request_id,
                    outcome,
                });
            })
            .context("spawn filter worker")?;
        debug!("filter worker started");
        Ok(())
    }
}

pub struct DemoRuntime {
    source: DemoSource,
}

impl DemoRuntime {
    pub fn new(source: DemoSource) -> Self {
        Self { source }
    }
}

impl AppRuntime for DemoRuntime {
    fn filter_claims(&mut self, criteria: &FilterCriteria) -> Result<Vec<ClaimRecord>> {
        self.source.filter_claims(criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::{DemoRuntime, HttpRuntime};
    use anyhow::Result;
    use claimdesk_app::{FilterCriteria, FilterRequest};
    use claimdesk_client::Client;
    use claimdesk_testkit::{DemoSource, sample_claims};
    use claimdesk_tui::{AppRuntime, InternalEvent};
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn demo_runtime_posts_completion_inline() -> Result<()> {
        let mut runtime = DemoRuntime::new(DemoSource::new(sample_claims(&[1, 2])));
        let (tx, rx) = mpsc::channel();
        runtime.spawn_filter(
            FilterRequest {
                request_id: 3,
                criteria: FilterCriteria::from_entries([("whiplash", "no")]),
            },
            tx,
        )?;

        let event = rx.try_recv()?;
        let InternalEvent::FilterCompleted {
            request_id,
            outcome,
        } = event
        else {
            panic!("expected filter completion, got {event:?}");
        };
        assert_eq!(request_id, 3);
        let ids = outcome
            .expect("demo filter succeeds")
            .iter()
            .map(|claim| claim.id.get())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![2]);
        Ok(())
    }

    #[test]
    fn http_runtime_reports_unreachable_server_through_channel() -> Result<()> {
        let client = Client::new("http://127.0.0.1:1", Duration::from_millis(200))?;
        let mut runtime = HttpRuntime::new(client);
        let (tx, rx) = mpsc::channel();
        runtime.spawn_filter(
            FilterRequest {
                request_id: 1,
                criteria: FilterCriteria::new(),
            },
            tx,
        )?;

        let event = rx.recv_timeout(Duration::from_secs(5))?;
        let InternalEvent::FilterCompleted { outcome, .. } = event else {
            panic!("expected filter completion, got {event:?}");
        };
        assert!(outcome.is_err());
        Ok(())
    }
}
