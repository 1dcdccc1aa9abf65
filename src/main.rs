use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use trailplan::{GenerateRequest, Planner, PlannerConfig, Poi, TravelerProfile};

struct CliArgs {
    pool_path: String,
    days: i64,
    budget: Option<i64>,
    profile_path: Option<String>,
    config_path: Option<String>,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = env::args().skip(1);
    let mut pool_path = None;
    let mut days = None;
    let mut budget = None;
    let mut profile_path = None;
    let mut config_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--days" => days = Some(args.next().context("--days needs a value")?.parse()?),
            "--budget" => budget = Some(args.next().context("--budget needs a value")?.parse()?),
            "--profile" => profile_path = args.next(),
            "--config" => config_path = args.next(),
            "--help" | "-h" => {
                println!(
                    "Usage: trailplan <pool.json> --days N [--budget B] [--profile profile.json] [--config trailplan.toml]"
                );
                std::process::exit(0);
            }
            other if pool_path.is_none() => pool_path = Some(other.to_string()),
            other => bail!("unexpected argument: {other}"),
        }
    }

    Ok(CliArgs {
        pool_path: pool_path.context("missing POI pool file argument")?,
        days: days.context("missing --days")?,
        budget,
        profile_path,
        config_path,
    })
}

fn main() -> Result<()> {
    let args = parse_args()?;

    let config = PlannerConfig::load(args.config_path.as_deref())?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let pool: Vec<Poi> = serde_json::from_str(
        &fs::read_to_string(&args.pool_path)
            .with_context(|| format!("reading POI pool from {}", args.pool_path))?,
    )
    .context("parsing POI pool JSON")?;

    let profile: Option<TravelerProfile> = match &args.profile_path {
        Some(path) => Some(
            serde_json::from_str(
                &fs::read_to_string(path).with_context(|| format!("reading profile from {path}"))?,
            )
            .context("parsing profile JSON")?,
        ),
        None => None,
    };

    let planner = Planner::from_config(&config);
    let itinerary = planner
        .generate(
            "cli",
            &pool,
            profile.as_ref(),
            GenerateRequest {
                days_count: args.days,
                max_budget: args.budget,
                name: format!("{}-day trip", args.days),
            },
        )
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!("{} ({} days)", itinerary.name, itinerary.days_count);
    for day in &itinerary.days {
        println!("Day {}:", day.day_number);
        if day.visits.is_empty() {
            println!("  (free day)");
        }
        for visit in &day.visits {
            println!(
                "  {}. {} ({:.1} h)",
                visit.order_index, visit.poi.name, visit.duration_hours
            );
        }
    }

    println!("\nTotal visit time: {:.1} h", itinerary.total_duration_hours);
    match itinerary.total_cost {
        Some(cost) => println!("Estimated cost: {cost}"),
        None => println!("Estimated cost: n/a"),
    }

    let stats = planner.logistics("cli", itinerary.id)?;
    match (stats.total_distance_km, stats.total_duration_min) {
        (Some(km), Some(min)) => println!("Driving: {km:.1} km, about {min} min"),
        _ => println!("Driving: n/a (not enough located stops)"),
    }

    println!("\nPacking checklist:\n{}", itinerary.equipment);
    Ok(())
}
