// Looks a player up by region and tag and prints their recent results and Elo.
//
//     AUSMASH_API_KEY=... cargo run --example player_lookup -- NSW Jim

use ausmash::logging::init_logging;
use ausmash::{AusmashClient, AusmashError, Config, DateRange};
use futures::{StreamExt, TryStreamExt};
use tracing::info;

const RECENT_RESULTS: usize = 5;

#[tokio::main]
async fn main() -> Result<(), AusmashError> {
    let mut args = std::env::args().skip(1);
    let (Some(region), Some(name)) = (args.next(), args.next()) else {
        eprintln!("usage: player_lookup <region> <tag>");
        std::process::exit(2);
    };

    let config = Config::load().await?;
    let (log_file, _guard) = init_logging(&config, false)?;
    info!("Logging to {log_file}");

    let client = AusmashClient::new(config)?;
    let player = client.find_player(&region, &name).await?;
    println!("{} (#{})", player.display_name(), player.id);

    let results: Vec<_> = client
        .player_results(player.id, DateRange::all())?
        .into_stream()
        .take(RECENT_RESULTS)
        .try_collect()
        .await?;
    for result in results {
        let tournament = result.tournament.map(|t| t.name).unwrap_or_default();
        let event = result.event.map(|e| e.name).unwrap_or_default();
        println!("  {:>4}  {tournament} / {event}", result.placing);
    }

    for elo in client.player_elo(player.id).await? {
        println!(
            "  {}: {} ({:?}), peak {}",
            elo.game.informal_name(),
            elo.elo,
            elo.badge(),
            elo.peak().map_or_else(|| "-".to_string(), |p| p.to_string())
        );
    }

    Ok(())
}
