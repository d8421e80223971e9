use crate::console::TermConsole;
use std::path::Path;

pub fn run(project_dir: &Path, version: Option<&str>) -> anyhow::Result<()> {
    let api = super::api_client()?;
    let mut console = TermConsole::new();
    relay_core::promote::promote(&api, &mut console, project_dir, version, true)?;
    Ok(())
}
