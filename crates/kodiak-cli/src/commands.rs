use anyhow::{Context, Result};
use comfy_table::Table;
use kodiak_archive::extension_formats;
use kodiak_project::{ArchiveReport, InitReport, Project, ProjectConfig};
use tracing::info;

use crate::cli::{ArchiveArgs, InitArgs};
use crate::summary::apply_table_style;

pub fn run_init(args: &InitArgs) -> Result<InitReport> {
    let config = ProjectConfig::default().with_duplicates(args.duplicates.into());
    info!(
        directory = %args.directory.display(),
        archive = %args.archive.display(),
        duplicates = %config.duplicates,
        "Initialising project"
    );
    Project::new(&args.directory, config)
        .init(&args.archive)
        .with_context(|| format!("initialise project in {}", args.directory.display()))
}

pub fn run_archive(args: &ArchiveArgs) -> Result<ArchiveReport> {
    let project = Project::open(&args.project_root, ProjectConfig::default())
        .with_context(|| format!("open project from {}", args.project_root.display()))?;
    project
        .archive()
        .with_context(|| format!("archive project {}", project.layout().root().display()))
}

pub fn run_formats() {
    let mut table = Table::new();
    table.set_header(vec!["Extension", "Format"]);
    apply_table_style(&mut table);
    for (extension, format) in extension_formats() {
        table.add_row(vec![extension.to_string(), format.label().to_string()]);
    }
    println!("{table}");
}
