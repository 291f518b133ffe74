//! System status dashboard command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display system status dashboard.
///
/// Shows provider counts, template slot totals, booking counts, and
/// version.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    // Gather stats
    let providers = state.profile_service.list().await?;
    let with_availability = providers
        .iter()
        .filter(|p| !p.availability.is_empty())
        .count();
    let total_slots: usize = providers.iter().map(|p| p.availability.slot_count()).sum();

    let (total_bookings,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings")
        .fetch_one(&state.db_pool.reader)
        .await?;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "providers": {
                "total": providers.len(),
                "with_availability": with_availability,
            },
            "availability_slots": total_slots,
            "bookings": total_bookings,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} BookMe v{}",
        style("📅").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Providers ──").dim());
    println!("  Total:             {}", style(providers.len()).bold());
    println!(
        "  With availability: {}",
        style(with_availability).green()
    );
    println!();

    println!("  {}", style("── Activity ──").dim());
    println!("  Template slots: {}", style(total_slots).bold());
    println!("  Bookings:       {}", style(total_bookings).bold());
    println!();

    println!("  {}", style("── Storage ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!();

    Ok(())
}
