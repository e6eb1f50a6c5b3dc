//! `docsteer recommend`

use anyhow::Result;
use colored::*;
use docsteer_core::{RecommendationOptions, ScoredDocument};

use crate::args::RecommendArgs;
use crate::router::Session;

/// Apply command-line overrides on top of the configured options
pub fn options_from(defaults: RecommendationOptions, args: &RecommendArgs) -> RecommendationOptions {
    let mut options = defaults;
    if let Some(max_results) = args.max_results {
        options = options.with_max_results(max_results);
    }
    if let Some(min_score) = args.min_score {
        options = options.with_min_score(min_score);
    }
    if args.exclude_installed {
        options = options.exclude_installed();
    }
    options
}

pub async fn execute(session: &Session, args: &RecommendArgs) -> Result<()> {
    let catalog = session.require_catalog(args.catalog.as_deref())?;
    let options = options_from(session.config.recommendations, args);

    let service = session.service(Some(catalog)).await;
    let recommendations = service.get_recommendations(&options).await?;
    service.dispose();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        session
            .console
            .warn("No documents match this workspace closely enough");
        return Ok(());
    }

    session.console.print_header("Recommended steering documents");
    for (index, scored) in recommendations.iter().enumerate() {
        print_recommendation(index + 1, scored);
    }
    Ok(())
}

fn print_recommendation(rank: usize, scored: &ScoredDocument) {
    let installed = if scored.is_installed {
        format!(" {}", "(installed)".dimmed())
    } else {
        String::new()
    };
    println!(
        "{:>2}. {} {} {}{}",
        rank,
        scored.document.name.bold(),
        format!("[{}]", scored.score).green(),
        scored.document.category.dimmed(),
        installed
    );
    for reason in &scored.reasons {
        println!(
            "      {} {}",
            format!("+{:<3}", reason.weight).cyan(),
            reason.description
        );
    }
}
