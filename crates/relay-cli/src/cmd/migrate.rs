use crate::console::TermConsole;
use relay_core::rollout::MigrateOptions;
use std::path::Path;

pub fn run(
    project_dir: &Path,
    from_version: Option<&str>,
    to_version: Option<&str>,
    percent: &str,
    user: Option<String>,
    update_migrations: bool,
) -> anyhow::Result<()> {
    let api = super::api_client()?;
    let mut console = TermConsole::new();
    let opts = MigrateOptions {
        user,
        update_migrations,
    };
    relay_core::migrate::migrate(
        &api,
        &mut console,
        project_dir,
        from_version,
        to_version,
        percent,
        &opts,
    )?;
    Ok(())
}
