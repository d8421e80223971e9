//! The Promoter: make one app version the production version.
//!
//! A promotion is gated on an explicit operator confirmation (with
//! the version's changelog shown when one exists) and classifies the
//! platform's answer: promoted, rejected with reasons, or "activation
//! required" — the app has not passed its first public review yet,
//! which routes through the app-review checks instead of failing
//! outright.

use crate::api::{ApiClient, PromoteOutcome};
use crate::changelog;
use crate::config::AppLink;
use crate::console::Console;
use crate::error::{RelayError, Result};
use std::path::Path;

pub fn promote(
    api: &ApiClient,
    console: &mut dyn Console,
    project_dir: &Path,
    version: Option<&str>,
    emit_migrate_hint: bool,
) -> Result<()> {
    let Some(version) = version else {
        console.line("Error: no version selected. Usage: `relay promote 1.0.0`.\n");
        return Ok(());
    };

    api.check()?;
    let link = AppLink::load(project_dir)?;
    let app = api.app(link.id)?;
    let entry = changelog::for_version(project_dir, version)?;

    console.line(&format!(
        "Preparing to promote version {version} of your app \"{}\".\n",
        app.title
    ));

    let should_continue = match &entry {
        Some(text) => {
            console.line(&format!("Changelog found for {version}!"));
            console.line(&format!("\n---\n{text}\n---\n"));
            console.confirm(
                "Would you like to continue promoting with this changelog?",
                false,
            )?
        }
        None => {
            console.line(
                "Warning! Changelog not found. Add a `## <version>` section to \
                 CHANGELOG.md with user-facing descriptions.\n",
            );
            console.confirm(
                "Would you like to continue promoting without a changelog?",
                false,
            )?
        }
    };
    if !should_continue {
        // Deliberate abort, not a silent no-op.
        return Err(RelayError::Cancelled);
    }

    let spinner = console.spinner(&format!("Verifying and promoting {version}"));
    match api.promote_version(app.id, version, entry.as_deref())? {
        PromoteOutcome::Promoted => {
            spinner.done();
            console.line("  Promotion successful!\n");
            if emit_migrate_hint {
                console.line(
                    "Optionally, run the `relay migrate` command to move users to this version.",
                );
            }
            Ok(())
        }
        PromoteOutcome::RejectedWithErrors(reasons) => {
            Err(RelayError::PromotionRejected(reasons))
        }
        PromoteOutcome::ActivationRequired { url } => {
            drop(spinner);
            run_app_review_checks(api, console, app.id, version)?;
            console.line(
                "\nGood news! Your app passes validation and has the required \
                 number of testers and active users.\n",
            );
            console.line(&format!(
                "The next step is to visit: {url} to request public activation \
                 of your app.\n"
            ));
            Ok(())
        }
    }
}

/// The activation path: "not yet approved" is a distinct state, not a
/// terminal failure. A failing check list becomes the final error; the
/// promotion is never retried automatically.
fn run_app_review_checks(
    api: &ApiClient,
    console: &mut dyn Console,
    app_id: u64,
    version: &str,
) -> Result<()> {
    console.line("\nRunning app review checks.\n");
    let failed = api.app_review_run(app_id, version)?;
    if !failed.is_empty() {
        return Err(RelayError::ReviewFailed(failed));
    }
    Ok(())
}
