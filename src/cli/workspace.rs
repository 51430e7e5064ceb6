use serde::Serialize;

use crate::prefill::PrefillReport;
use crate::store::Store;
use crate::types::Workspace;

use super::{init_provisioner, init_store};

#[derive(Serialize)]
struct CreatedWorkspace<'a> {
    workspace: &'a Workspace,
    prefill: &'a PrefillReport,
}

fn print_report(report: &PrefillReport) {
    println!(
        "  views:         {} copied, {} skipped",
        report.views.views_copied, report.views.views_skipped
    );
    println!(
        "  view rows:     {} copied, {} dropped",
        report.views.rows_copied, report.views.rows_dropped
    );
    println!(
        "  favorites:     {} copied, {} skipped ({} folders)",
        report.favorites.favorites_copied,
        report.favorites.favorites_skipped,
        report.favorites.folders_copied
    );
    println!("  webhooks:      {}", report.webhooks_copied);
    println!("  feature flags: {}", report.feature_flags_copied);
}

pub fn run_workspace_create(data_dir: String, name: String, json: bool) -> anyhow::Result<()> {
    let provisioner = init_provisioner(&data_dir)?;
    let (workspace, report) = provisioner.create_workspace(&name)?;

    if json {
        let output = CreatedWorkspace {
            workspace: &workspace,
            prefill: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!(
        "Created workspace \"{}\" ({})",
        workspace.display_name, workspace.id
    );
    print_report(&report);
    println!();

    Ok(())
}

pub fn run_workspace_list(data_dir: String, json: bool) -> anyhow::Result<()> {
    let store = init_store(&data_dir)?;
    let workspaces = store.list_workspaces("", 10000)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&workspaces)?);
        return Ok(());
    }

    if workspaces.is_empty() {
        println!("No workspaces");
        return Ok(());
    }

    for ws in &workspaces {
        let status = if ws.is_template {
            "template".to_string()
        } else {
            match ws.prefilled_at {
                Some(at) => format!("prefilled {}", at.format("%Y-%m-%d %H:%M")),
                None => "not prefilled".to_string(),
            }
        };
        println!("{}  {}  ({})", ws.id, ws.display_name, status);
    }

    Ok(())
}

pub fn run_workspace_prefill(data_dir: String, id: String, json: bool) -> anyhow::Result<()> {
    let provisioner = init_provisioner(&data_dir)?;
    let report = provisioner.prefill(&id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("Prefilled workspace {id}");
    print_report(&report);
    println!();

    Ok(())
}
