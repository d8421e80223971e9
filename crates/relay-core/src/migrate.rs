//! The Migrator: move traffic between two app versions.
//!
//! Migrations are asynchronous on the platform side (typically 5-10
//! minutes); this only queues one. The single wrinkle is the
//! promote-first decision: migrating 100% of a public app's users to
//! a version that is not production is usually a mistake, so the
//! operator is offered a promotion before the migration goes out.

use crate::api::{ApiClient, App, MigrateBody, RolloutBody};
use crate::config::AppLink;
use crate::console::Console;
use crate::error::Result;
use crate::package;
use crate::promote;
use crate::rollout::{self, MigrateOptions};
use std::path::Path;

pub const DEFAULT_PERCENT: &str = "100%";

pub fn migrate(
    api: &ApiClient,
    console: &mut dyn Console,
    project_dir: &Path,
    from_version: Option<&str>,
    to_version: Option<&str>,
    percent_arg: &str,
    opts: &MigrateOptions,
) -> Result<()> {
    let (Some(from), Some(to)) = (from_version, to_version) else {
        console.line(
            "Must provide both old and new version like `relay migrate 1.0.0 1.0.1`.\n",
        );
        return Ok(());
    };

    let percent = rollout::parse_percent(percent_arg);
    // Usage errors fire before any remote call.
    rollout::check_user_percent(percent, opts.user.as_deref())?;

    let link = AppLink::load(project_dir)?;
    let app = api.app(link.id)?;

    maybe_promote_first(api, console, project_dir, to, percent, &app)?;

    let (rollout_body, spinner_text) = match &opts.user {
        Some(user) => {
            console.line(&format!(
                "Getting ready to migrate \"{user}\" in your app \"{}\" from {from} to {to}.\n",
                app.title
            ));
            (
                RolloutBody::User { user: user.clone() },
                format!("Starting migration from {from} to {to} for {user}"),
            )
        }
        None => {
            let shown = match percent {
                Some(p) => format!("{p}%"),
                None => percent_arg.trim().to_string(),
            };
            console.line(&format!(
                "Getting ready to migrate your app \"{}\" from {from} to {to}.\n",
                app.title
            ));
            (
                RolloutBody::Percent { percent },
                format!("Starting migration from {from} to {to} for {shown}"),
            )
        }
    };

    let zip_file = if opts.update_migrations {
        console.line("Packaging migration code from the working directory.\n");
        Some(package::encode(&package::build(project_dir)?))
    } else {
        None
    };

    let body = MigrateBody {
        rollout: rollout_body,
        zip_file,
    };

    let spinner = console.spinner(&spinner_text);
    api.migrate_version(app.id, from, to, &body)?;
    spinner.done();

    console.line(
        "\nMigration successfully queued, please check `relay history` to track \
         the status. Migrations usually take between 5-10 minutes.",
    );
    Ok(())
}

/// Offer a promotion before an everyone-migration to a non-production
/// version of a public app. Declining is not an error; the migration
/// simply proceeds against the unpromoted version.
fn maybe_promote_first(
    api: &ApiClient,
    console: &mut dyn Console,
    project_dir: &Path,
    to_version: &str,
    percent: Option<i64>,
    app: &App,
) -> Result<()> {
    if percent != Some(100) || !app.public || app.latest_version.as_deref() == Some(to_version) {
        return Ok(());
    }

    console.line(&format!(
        "You're trying to migrate all the users to {to_version}, which is not \
         the current production version."
    ));
    let promote_first = console.confirm(
        &format!("Do you want to promote {to_version} to production first?"),
        true,
    )?;
    if promote_first {
        // Internal invocation: the migrate hint would be self-referential.
        promote::promote(api, console, project_dir, Some(to_version), false)?;
    }
    Ok(())
}
