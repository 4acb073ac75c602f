use crate::infra::{demo_catalog, parse_status, InMemoryRecordStore};
use chem_refine::error::AppError;
use chem_refine::workflows::refinement::{
    determine_product_status, CollectionStatus, ProductWithIngredients, RefinementService,
    RefinementStats,
};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RefinementReportArgs {
    /// Maximum number of products to list
    #[arg(long, default_value_t = 50)]
    pub(crate) limit: usize,
    /// Number of products to skip before listing
    #[arg(long, default_value_t = 0)]
    pub(crate) offset: usize,
    /// Restrict the listing to collection statuses (collected, refining, completed)
    #[arg(long = "status", value_parser = parse_status)]
    pub(crate) statuses: Vec<CollectionStatus>,
    /// Include every finding per ingredient, not just the rollup
    #[arg(long)]
    pub(crate) list_issues: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the auto-fix sweep and only print the initial evaluation
    #[arg(long)]
    pub(crate) skip_fixes: bool,
}

fn demo_service() -> Arc<RefinementService<InMemoryRecordStore>> {
    let store = Arc::new(InMemoryRecordStore::seeded(demo_catalog()));
    Arc::new(RefinementService::new(store))
}

pub(crate) async fn run_refinement_report(args: RefinementReportArgs) -> Result<(), AppError> {
    let RefinementReportArgs {
        limit,
        offset,
        statuses,
        list_issues,
    } = args;

    let service = demo_service();

    match service.refinement_stats().await {
        Ok(stats) => render_stats(&stats),
        Err(err) => println!("Dashboard snapshot unavailable: {err}"),
    }

    let products = match service
        .products_for_refinement(limit, offset, &statuses)
        .await
    {
        Ok(products) => products,
        Err(err) => {
            println!("Refinement queue unavailable: {err}");
            return Ok(());
        }
    };

    render_queue(&products, list_issues);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = demo_service();

    println!("Data refinement demo");
    match service.refinement_stats().await {
        Ok(stats) => render_stats(&stats),
        Err(err) => println!("Dashboard snapshot unavailable: {err}"),
    }

    let products = match service.products_for_refinement(50, 0, &[]).await {
        Ok(products) => products,
        Err(err) => {
            println!("Refinement queue unavailable: {err}");
            return Ok(());
        }
    };
    render_queue(&products, true);

    if args.skip_fixes {
        return Ok(());
    }

    println!("\nApplying deterministic fixes");
    let mut applied_total = 0;
    for product in &products {
        for entry in &product.ingredients {
            if !entry.issues.iter().any(|issue| issue.auto_fixable) {
                continue;
            }
            match service
                .apply_auto_refinement(&entry.ingredient.id, &entry.issues)
                .await
            {
                Ok(outcome) => {
                    applied_total += outcome.applied;
                    println!(
                        "- {}: {} fix(es) applied, {} finding(s) left for review",
                        entry.ingredient.id.0, outcome.applied, outcome.skipped
                    );
                }
                Err(err) => println!("- {}: fix rejected ({err})", entry.ingredient.id.0),
            }
        }
    }
    println!("Fixes applied: {applied_total}");

    println!("\nAfter the sweep");
    match service.refinement_stats().await {
        Ok(stats) => render_stats(&stats),
        Err(err) => println!("Dashboard snapshot unavailable: {err}"),
    }

    Ok(())
}

fn render_stats(stats: &RefinementStats) {
    println!(
        "Catalog: {} products / {} ingredient rows",
        stats.total_products, stats.total_ingredients
    );
    println!(
        "Rollup: {} error | {} warning | {} suggestion | {} completed",
        stats.error_count, stats.warning_count, stats.suggestion_count, stats.completed_count
    );
}

fn render_queue(products: &[ProductWithIngredients], list_issues: bool) {
    if products.is_empty() {
        println!("\nRefinement queue: empty");
        return;
    }

    println!("\nRefinement queue");
    for product in products {
        let rollup = determine_product_status(product);
        println!(
            "- {} [{}] {} ({} finding(s), collection status {})",
            product.product.id.0,
            rollup.status.label(),
            product.product.name,
            rollup.issue_count,
            product.product.status.label()
        );

        if !list_issues {
            continue;
        }
        for entry in &product.ingredients {
            for issue in &entry.issues {
                let fix_note = match (&issue.suggested_value, issue.auto_fixable) {
                    (Some(suggested), true) => format!(" -> '{suggested}'"),
                    _ => String::new(),
                };
                println!(
                    "    {} [{}] {} ({}){}",
                    entry.ingredient.id.0,
                    issue.severity.label(),
                    issue.title,
                    issue.field.column(),
                    fix_note
                );
            }
        }
    }
}
