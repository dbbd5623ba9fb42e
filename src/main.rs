use agecompute::config::InsightConfig;
use agecompute::{AgeEngine, InsightClient, InsightRequest, report};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Parser;
use serde_json::json;

/// Compute 周岁, 虚岁, 生肖 and lunar dates for a birth date.
#[derive(Parser, Debug)]
#[command(name = "agecompute", version)]
struct Args {
    /// Birth date, YYYY-MM-DD
    #[arg(default_value = "1995-01-01")]
    birth_date: String,

    /// Compute as of this date instead of today, YYYY-MM-DD
    #[arg(long)]
    today: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Skip the narrative service
    #[arg(long)]
    no_insight: bool,
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date {raw:?}, expected YYYY-MM-DD"))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let birth = parse_date(&args.birth_date)?;
    let now: NaiveDateTime = match &args.today {
        Some(raw) => parse_date(raw)?.and_time(Default::default()),
        None => Local::now().naive_local(),
    };

    // Calculate age
    let facts = AgeEngine::new().compute_age_facts(birth, now);
    log::info!("computed age facts for {birth} as of {now}");

    let insight = if args.no_insight {
        None
    } else {
        let client = InsightClient::new(InsightConfig::from_env()?)?;
        let req = InsightRequest {
            birth_date: birth.format("%Y-%m-%d").to_string(),
            international_age: facts.international_age,
            nominal_age: facts.nominal_age,
            zodiac: facts.zodiac_animal,
        };
        Some(client.insight_or_fallback(&req).await)
    };

    if args.json {
        let out = json!({ "facts": facts, "insight": insight });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "{}",
            report::render_report(&birth.to_string(), &facts, insight.as_ref())
        );
    }

    Ok(())
}
