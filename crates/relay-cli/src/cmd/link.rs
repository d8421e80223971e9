use anyhow::Context;
use relay_core::config::AppLink;
use std::path::Path;

pub fn run(project_dir: &Path, app_id: u64) -> anyhow::Result<()> {
    let path = AppLink { id: app_id }
        .save(project_dir)
        .context("failed to write app link")?;
    println!("Linked app {app_id}: wrote {}.", path.display());
    println!("Next: `relay promote <version>` when a version is ready for production.");
    Ok(())
}
