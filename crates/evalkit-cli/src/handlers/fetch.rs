//! Fetch command handler.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use evalkit_core::{DatasetHubPort, RepoKind, RepoRef, SnapshotRequest};
use evalkit_fetch::{CliProgressPrinter, FetchAction, FetchPlan, FetchReport, SnapshotFetcher};
use evalkit_hf::{DefaultHfClient, HubClientConfig, resolve_token};
use indicatif::HumanBytes;
use tracing::debug;

use crate::error::CliError;

/// Arguments for the fetch command.
#[derive(Debug, Clone)]
pub struct FetchArgs {
    pub repo_id: String,
    pub repo_type: RepoKind,
    pub patterns: Vec<String>,
    pub ignore: Vec<String>,
    pub local_dir: PathBuf,
    pub revision: String,
    pub token: Option<String>,
    pub endpoint: String,
    pub force: bool,
    pub dry_run: bool,
}

/// Execute the fetch command.
///
/// With `dry_run` only the plan is printed; otherwise the selected files are
/// transferred with a progress display on stderr and a summary on stdout.
pub async fn execute(args: FetchArgs) -> Result<()> {
    let request = build_request(&args)?;
    let config = HubClientConfig::new()
        .with_endpoint(args.endpoint.as_str())
        .with_user_agent(concat!("evalkit/", env!("CARGO_PKG_VERSION")))
        .with_optional_token(resolve_token(args.token));
    let client = DefaultHfClient::new(&config).map_err(CliError::from)?;
    let hub: Arc<dyn DatasetHubPort> = Arc::new(client);

    debug!(repo = %request.repo, revision = %request.revision, "starting fetch");
    let fetcher = SnapshotFetcher::new(hub);

    if args.dry_run {
        let plan = fetcher.plan(&request).await.map_err(CliError::from)?;
        print!("{}", render_plan(&plan));
        return Ok(());
    }

    let (printer, callback) = CliProgressPrinter::new().into_callback();
    let result = fetcher.with_progress(callback).fetch(&request).await;
    if let Ok(mut printer) = printer.lock() {
        printer.finish();
    }

    let report = result.map_err(CliError::from)?;
    print!("{}", render_report(&report));
    Ok(())
}

/// Build the snapshot request from command arguments.
pub fn build_request(args: &FetchArgs) -> Result<SnapshotRequest, CliError> {
    let repo = RepoRef::new(args.repo_type, &args.repo_id)?;
    if args.patterns.is_empty() {
        return Err(CliError::Arguments(
            "At least one --pattern is required".to_string(),
        ));
    }

    Ok(
        SnapshotRequest::new(repo, args.patterns[0].as_str(), args.local_dir.clone())
            .with_allow_patterns(args.patterns.iter().cloned())
            .with_ignore_patterns(args.ignore.iter().cloned())
            .with_revision(args.revision.as_str())
            .with_force(args.force),
    )
}

/// Dry-run listing: one line per selected file, then a summary.
pub fn render_plan(plan: &FetchPlan) -> String {
    let mut out = String::new();
    for entry in &plan.entries {
        let marker = match entry.action {
            FetchAction::Download => "download",
            FetchAction::UpToDate => "current ",
        };
        let _ = writeln!(
            out,
            "{marker}  {}  ({})",
            entry.file.path,
            HumanBytes(entry.file.size)
        );
    }

    let downloads = plan.downloads().count();
    let _ = writeln!(
        out,
        "{} file(s) to download ({}), {} up to date in {} at {}",
        downloads,
        HumanBytes(plan.download_bytes()),
        plan.up_to_date_count(),
        plan.local_dir.display(),
        short_sha(&plan.commit_sha)
    );
    out
}

/// Summary printed after a completed fetch.
pub fn render_report(report: &FetchReport) -> String {
    format!(
        "Downloaded {} file(s) ({}), {} already up to date, into {} at {}\n",
        report.downloaded.len(),
        HumanBytes(report.bytes),
        report.up_to_date.len(),
        report.local_dir.display(),
        short_sha(&report.commit_sha)
    )
}

fn short_sha(sha: &str) -> &str {
    sha.get(..12).unwrap_or(sha)
}
