//! `appgen model` - generate the classes for one entity.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use appgen_adapters::{
    FilesystemNamespaceResolver, LocalFilesystem, ModelDefinitionLoader, PhpRenderer,
};
use appgen_core::{
    application::{EmissionReport, ModelService, ScaffoldService},
    domain::{ArtifactKind, EmissionPlan, SpecificationRecord},
};

use crate::{
    cli::ModelArgs,
    commands::wizard,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// JSON shape of a dry run.
#[derive(Debug, Serialize)]
struct DryRun {
    run_id: Uuid,
    dry_run: bool,
    files: Vec<PlannedEntry>,
}

#[derive(Debug, Serialize)]
struct PlannedEntry {
    path: PathBuf,
    artifact: ArtifactKind,
}

impl DryRun {
    fn from_plan(plan: &EmissionPlan) -> Self {
        Self {
            run_id: plan.run_id(),
            dry_run: true,
            files: plan
                .files()
                .map(|f| PlannedEntry {
                    path: plan.target_of(f),
                    artifact: f.artifact,
                })
                .collect(),
        }
    }
}

#[instrument(skip_all, fields(spec = ?args.spec, dry_run = args.dry_run))]
pub fn execute(args: ModelArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let app_dir = config.resolve_app_dir(args.app_dir.as_deref());
    let settings = config.generator_settings()?;
    let resolver = FilesystemNamespaceResolver::new(&app_dir, &config.model.namespaces);
    let models = ModelService::new(Box::new(resolver), settings);

    let record = load_record(&args, &config, &models, &output)?;

    let scaffold = ScaffoldService::new(
        Box::new(PhpRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    let plan = scaffold.plan(&record, &app_dir)?;

    if args.dry_run {
        return report_plan(&plan, &output);
    }

    let report = scaffold.emit(&plan)?;
    info!(run_id = %report.run_id, files = report.files.len(), "Model generated");
    report_written(&record, &report, &output)
}

fn load_record(
    args: &ModelArgs,
    config: &AppConfig,
    models: &ModelService,
    output: &OutputManager,
) -> CliResult<SpecificationRecord> {
    match &args.spec {
        Some(path) => {
            let input = ModelDefinitionLoader::new().load(path)?;
            Ok(models.assemble(&input)?)
        }
        None => {
            let namespace = config
                .model
                .namespaces
                .first()
                .map(String::as_str)
                .unwrap_or("App\\Model");
            wizard::run(models, namespace, output)
        }
    }
}

fn report_plan(plan: &EmissionPlan, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&DryRun::from_plan(plan))?;
        return Ok(());
    }

    output.header(&format!("Would write {} files:", plan.file_count()))?;
    for file in plan.files() {
        output.print(&format!("  {}", plan.target_of(file).display()))?;
    }
    Ok(())
}

fn report_written(
    record: &SpecificationRecord,
    report: &EmissionReport,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        output.json(report)?;
        return Ok(());
    }

    output.header(&format!("Generated {}", record.entity_class()))?;
    for file in &report.files {
        if file.overwritten {
            output.warning(&format!("overwrote {}", file.path.display()))?;
        } else {
            output.success(&format!("created {}", file.path.display()))?;
        }
    }
    output.info(&format!("{} files written", report.files.len()))?;
    Ok(())
}
