//! `docsteer analyze`

use anyhow::Result;
use colored::*;
use docsteer_core::WorkspaceContext;

use crate::router::Session;

pub async fn execute(session: &Session, json: bool) -> Result<()> {
    let service = session.service(session.catalog_path(None)).await;
    let context = service.analyze_workspace().await?;
    service.dispose();

    if json {
        println!("{}", serde_json::to_string_pretty(&context)?);
    } else {
        print_context(session, &context);
    }
    Ok(())
}

fn print_context(session: &Session, context: &WorkspaceContext) {
    let root = session
        .workspace_root
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    session
        .console
        .print_header(&format!("Workspace {}", root));

    for line in context.summary().lines() {
        match line.split_once(": ") {
            Some((label, value)) => println!("{} {}", format!("{}:", label).cyan(), value),
            None => println!("{}", line),
        }
    }
}
