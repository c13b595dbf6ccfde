//! One reconciliation run: login, fetch, scan, plan, relocate.
//!
//! # Design
//! - The full task set is materialised before the source directory is read.
//! - Logout is attempted whether or not the fetch succeeded; its failure is
//!   only logged.
//! - Nothing is moved when any step before relocation fails.

use anyhow::Context;
use dsweep_config::SyncConfig;
use dsweep_core::{TaskFetcher, TaskSet};
use dsweep_fsops::{Reconciler, Relocation, RelocationPlan};
use dsweep_station::StationSession;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::client::{CliError, CliResult};

/// Counters describing the fetched task set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct TaskSummary {
    pub(crate) accepted: usize,
    pub(crate) dropped: usize,
    pub(crate) replaced: usize,
}

impl TaskSummary {
    fn of(tasks: &TaskSet) -> Self {
        Self {
            accepted: tasks.len(),
            dropped: tasks.dropped(),
            replaced: tasks.replaced(),
        }
    }
}

/// Everything a run decided and did.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SweepOutcome {
    pub(crate) run_id: Uuid,
    pub(crate) dry_run: bool,
    pub(crate) tasks: TaskSummary,
    pub(crate) retained: usize,
    pub(crate) planned: Vec<Relocation>,
    pub(crate) moved: Vec<Relocation>,
}

pub(crate) async fn sweep(
    config: &SyncConfig,
    run_id: Uuid,
    dry_run: bool,
) -> CliResult<SweepOutcome> {
    let paging = config
        .paging()
        .map_err(|err| CliError::validation(err.describe()))?;

    let session = StationSession::login(config)
        .await
        .context("failed to log in to download station")
        .map_err(CliError::failure)?;
    let fetcher = TaskFetcher::new(session.task_source(config.retry_limit), paging);
    let fetched = fetcher.fetch_all().await;
    if let Err(err) = session.logout().await {
        warn!(error = %err, "download station logout failed");
    }
    let tasks = fetched
        .context("failed to fetch download station tasks")
        .map_err(CliError::failure)?;
    let summary = TaskSummary::of(&tasks);
    info!(
        accepted = summary.accepted,
        dropped = summary.dropped,
        replaced = summary.replaced,
        "task list fetched"
    );

    let reconciler = Reconciler::from_config(config);
    let entries = reconciler
        .scan()
        .context("failed to scan source directory")
        .map_err(CliError::failure)?;
    let plan = reconciler.plan(&tasks, entries);
    info!(
        retained = plan.retained,
        orphaned = plan.len(),
        "reconciliation planned"
    );

    let moved = if dry_run {
        info!(planned = plan.len(), "dry run; leaving entries in place");
        Vec::new()
    } else {
        relocate(&reconciler, &plan)?
    };

    Ok(SweepOutcome {
        run_id,
        dry_run,
        tasks: summary,
        retained: plan.retained,
        planned: plan.steps,
        moved,
    })
}

fn relocate(reconciler: &Reconciler, plan: &RelocationPlan) -> CliResult<Vec<Relocation>> {
    let report = reconciler
        .apply(plan)
        .context("failed to relocate orphaned entries")
        .map_err(CliError::failure)?;
    Ok(report.moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use dsweep_station::wire::{AUTH_PATH, TASK_PATH};
    use dsweep_test_support::fixtures::{
        empty_success, list_response, login_response, rejected_response, task_json,
    };
    use dsweep_test_support::fs::{EntryKind, SweepTree, entry_names};
    use httpmock::prelude::*;

    fn config_for(server: &MockServer, tree: &SweepTree) -> anyhow::Result<SyncConfig> {
        Ok(SyncConfig::new(
            server.base_url().parse()?,
            "admin",
            "secret",
            tree.source(),
            tree.destination(),
        )
        .with_request_timeout(Duration::from_secs(2))
        .validate()?)
    }

    fn mock_auth(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET).path(AUTH_PATH).query_param("method", "login");
            then.status(200).json_body(login_response("sid-1"));
        });
        server.mock(|when, then| {
            when.method(GET).path(AUTH_PATH).query_param("method", "logout");
            then.status(200).json_body(empty_success());
        })
    }

    fn mock_tasks(server: &MockServer, tasks: &[serde_json::Value]) {
        let body = list_response(tasks);
        server.mock(move |when, then| {
            when.method(GET).path(TASK_PATH).query_param("offset", "0");
            then.status(200).json_body(body);
        });
        server.mock(|when, then| {
            when.method(GET).path(TASK_PATH).query_param("offset", "10");
            then.status(200).json_body(list_response(&[]));
        });
    }

    #[tokio::test]
    async fn sweep_moves_untracked_entries() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        let tree = SweepTree::new()?;
        tree.populate_source(&[
            ("Movie.A", EntryKind::Dir),
            ("Movie.B", EntryKind::Dir),
            ("Movie.C", EntryKind::File),
            (".DS_Store", EntryKind::File),
        ])?;
        let logout = mock_auth(&server);
        mock_tasks(
            &server,
            &[task_json("Movie.A", "seeding"), task_json("Movie.C", "error")],
        );

        let outcome = sweep(&config_for(&server, &tree)?, Uuid::new_v4(), false)
            .await
            .map_err(|err| anyhow::anyhow!(err.display_message()))?;

        logout.assert();
        assert_eq!(
            outcome.tasks,
            TaskSummary {
                accepted: 1,
                dropped: 1,
                replaced: 0
            }
        );
        assert_eq!(outcome.retained, 1);
        assert_eq!(outcome.moved.len(), 2);
        assert_eq!(entry_names(tree.source())?, vec![".DS_Store", "Movie.A"]);
        assert_eq!(entry_names(tree.destination())?, vec!["Movie.B", "Movie.C"]);
        Ok(())
    }

    #[tokio::test]
    async fn dry_run_leaves_entries_in_place() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        let tree = SweepTree::new()?;
        tree.populate_source(&[("Movie.B", EntryKind::Dir)])?;
        mock_auth(&server);
        mock_tasks(&server, &[]);

        let outcome = sweep(&config_for(&server, &tree)?, Uuid::new_v4(), true)
            .await
            .map_err(|err| anyhow::anyhow!(err.display_message()))?;

        assert!(outcome.dry_run);
        assert_eq!(outcome.planned.len(), 1);
        assert!(outcome.moved.is_empty());
        assert_eq!(entry_names(tree.source())?, vec!["Movie.B"]);
        assert!(entry_names(tree.destination())?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unrecognized_status_aborts_before_scanning() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        let tree = SweepTree::new()?;
        tree.populate_source(&[("Movie.B", EntryKind::Dir)])?;
        let logout = mock_auth(&server);
        mock_tasks(&server, &[task_json("Movie.Z", "archiving")]);

        let err = sweep(&config_for(&server, &tree)?, Uuid::new_v4(), false)
            .await
            .err()
            .ok_or_else(|| anyhow::anyhow!("sweep should fail"))?;

        logout.assert();
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().contains("archiving"));
        assert_eq!(entry_names(tree.source())?, vec!["Movie.B"]);
        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_fails_without_listing() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        let tree = SweepTree::new()?;
        server.mock(|when, then| {
            when.method(GET).path(AUTH_PATH).query_param("method", "login");
            then.status(200).json_body(rejected_response(400));
        });
        let list = server.mock(|when, then| {
            when.method(GET).path(TASK_PATH);
            then.status(200).json_body(list_response(&[]));
        });

        let err = sweep(&config_for(&server, &tree)?, Uuid::new_v4(), false)
            .await
            .err()
            .ok_or_else(|| anyhow::anyhow!("login should fail"))?;

        list.assert_calls(0);
        assert_eq!(err.exit_code(), 3);
        assert!(
            err.display_message()
                .starts_with("failed to log in to download station: station login rejected")
        );
        Ok(())
    }

    #[tokio::test]
    async fn logout_failure_does_not_fail_the_run() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        let tree = SweepTree::new()?;
        server.mock(|when, then| {
            when.method(GET).path(AUTH_PATH).query_param("method", "login");
            then.status(200).json_body(login_response("sid-1"));
        });
        server.mock(|when, then| {
            when.method(GET).path(AUTH_PATH).query_param("method", "logout");
            then.status(500);
        });
        mock_tasks(&server, &[]);

        let outcome = sweep(&config_for(&server, &tree)?, Uuid::new_v4(), false)
            .await
            .map_err(|err| anyhow::anyhow!(err.display_message()))?;

        assert!(outcome.planned.is_empty());
        Ok(())
    }
}
