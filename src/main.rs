//! Cyclear CLI
//!
//! Usage:
//!   cyclear --title "..." --tags "a,b,c" --visual '{"is_sharp":true}'   # Score + price
//!   cyclear --input generated.json                                       # Full analysis
//!   cyclear --serve                                                      # HTTP API server
//!   cyclear ... --json                                                   # JSON output

use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use cyclear::core::{
    estimate_for, run_server, JsonFileStore, ListingAnalyzer, PricingEngine, QualityScorer,
    SnapshotStore, TagNormalizer,
};
use cyclear::types::{
    AnalysisRequest, GeneratedContent, ListingAnalysis, ListingSignals, MarketSignals,
    PriceRecommendation, PricingInput, ScoreBreakdown, VisualSignals,
};
use cyclear::{Config, Result, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "cyclear",
    version = VERSION,
    about = "Cyclear - listing quality score, tags and price recommendation",
    long_about = "Cyclear scores a marketplace listing (LQS 0-100) across three modules\n\
                  and recommends a price band from that score.\n\n\
                  Modules:\n  \
                  Visual Impulse  (35) - sharpness, composition, texture, lifestyle\n  \
                  SEO Foundation  (35) - title, tag density, relevance, long tail, assets\n  \
                  Zeitgeist       (30) - best-seller similarity, velocity, season\n\n\
                  Modes:\n  \
                  default   Score + price from command-line fields\n  \
                  --input   Full analysis of a content generator JSON file\n  \
                  --serve   HTTP API server mode"
)]
struct Args {
    /// Listing title
    #[arg(long, default_value = "")]
    title: String,

    /// Candidate tags, comma separated
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    /// Visual signals as a JSON object
    #[arg(long, default_value = "{}")]
    visual: String,

    /// Number of listing images
    #[arg(long, default_value_t = 1)]
    images: u32,

    /// Listing has a video
    #[arg(long)]
    video: bool,

    /// Competitor price (0 = unknown)
    #[arg(long, default_value_t = 0.0)]
    competitor: f64,

    /// Category price floor (defaults to config)
    #[arg(long)]
    category_min: Option<f64>,

    /// Category price ceiling (defaults to config)
    #[arg(long)]
    category_max: Option<f64>,

    /// Monthly demand indices, current month first, comma separated
    #[arg(long, value_delimiter = ',')]
    seasonality: Vec<f64>,

    /// Market velocity for the Zeitgeist module
    #[arg(long)]
    velocity: Option<f64>,

    /// In-season bonus for the Zeitgeist module
    #[arg(long)]
    in_season: Option<f64>,

    /// Content generator output (JSON) for a full analysis
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Listing id used for snapshots in --input mode
    #[arg(long, default_value = "cli")]
    listing_id: String,

    /// Treat the listing as a competitor (anchor on its observed price)
    #[arg(long)]
    competitor_listing: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Address for --serve (defaults to config)
    #[arg(long)]
    addr: Option<String>,

    /// TOML config file (falls back to $CYCLEAR_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for snapshots (defaults to config)
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Disable snapshot storage
    #[arg(long)]
    no_snapshot: bool,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show component breakdown and feedback
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(if args.serve { "info" } else { "warn" });

    if args.no_color {
        colored::control::set_override(false);
    }

    let result = if args.serve {
        run_serve(&args).await
    } else if let Some(ref path) = args.input {
        run_analysis(path, &args)
    } else {
        run_direct(&args)
    };

    if let Err(e) = result {
        error!(error = %e, "cyclear failed");
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(2);
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(dir) = &args.snapshot_dir {
        config.server.snapshot_dir = dir.clone();
    }
    if let Some(addr) = &args.addr {
        config.server.addr = addr.clone();
    }
    Ok(config)
}

fn market(args: &Args) -> MarketSignals {
    let defaults = MarketSignals::default();
    MarketSignals {
        velocity: args.velocity.unwrap_or(defaults.velocity),
        in_season: args.in_season.unwrap_or(defaults.in_season),
    }
}

/// Run the HTTP API
async fn run_serve(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let store: Option<Arc<dyn SnapshotStore>> = if args.no_snapshot {
        None
    } else {
        Some(Arc::new(JsonFileStore::new(config.server.snapshot_dir.clone())))
    };
    run_server(&config.server.addr, &config, store).await
}

/// Tags → score → price from command-line fields
fn run_direct(args: &Args) -> Result<()> {
    let config = load_config(args)?;

    let visual_value: serde_json::Value = serde_json::from_str(&args.visual)?;
    let tags = TagNormalizer::with_config(config.tags.clone()).normalize(&args.tags, &args.title);

    let listing = ListingSignals {
        visual: VisualSignals::from_value(&visual_value),
        title: args.title.clone(),
        tags: tags.clone(),
        image_count: args.images,
        has_video: args.video,
    };
    let score = QualityScorer::with_config(config.scoring.clone()).score(&listing, &market(args));

    let input = PricingInput {
        lqs_score: score.rounded_total(),
        competitor_price: args.competitor,
        category_min: args.category_min.unwrap_or(config.pricing.category_min),
        category_max: args.category_max.unwrap_or(config.pricing.category_max),
        seasonality: args.seasonality.clone(),
    };
    let price = PricingEngine::with_config(config.pricing.clone()).calculate(&input)?;
    debug!(?input, "Priced from CLI input");

    if args.json {
        let out = serde_json::json!({ "tags": tags, "score": score, "price": price });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_header();
        print_tags(&tags);
        print_score(&score, args.verbose);
        print_price(&price);
    }
    Ok(())
}

/// Full analysis of a content generator file
fn run_analysis(path: &Path, args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;

    // Either {"request": {...}, "content": {...}} or bare generator output
    let (request, content) = match raw.get("content") {
        Some(content) => {
            let request: AnalysisRequest = match raw.get("request") {
                Some(r) => serde_json::from_value(r.clone())?,
                None => request_from_args(args),
            };
            (request, GeneratedContent::from_value(content))
        }
        None => (request_from_args(args), GeneratedContent::from_value(&raw)),
    };

    let analysis = ListingAnalyzer::new(&config).analyze(&request, &content)?;

    let snapshot_path = if args.no_snapshot {
        None
    } else {
        let store = JsonFileStore::new(config.server.snapshot_dir.clone());
        Some(store.save(&analysis.to_snapshot(chrono::Utc::now()))?)
    };

    if args.json {
        let out = serde_json::json!({
            "analysis": analysis,
            "traffic": estimate_for(&analysis),
            "snapshot_path": snapshot_path,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_header();
        print_analysis(&analysis, args.verbose);
        if let Some(path) = snapshot_path {
            println!("{} {}", "Snapshot saved:".dimmed(), path);
        }
    }
    Ok(())
}

fn request_from_args(args: &Args) -> AnalysisRequest {
    let title = if args.title.is_empty() {
        "New Product".to_string()
    } else {
        args.title.clone()
    };
    AnalysisRequest {
        listing_id: args.listing_id.clone(),
        product_title: title,
        image_count: args.images,
        has_video: args.video,
        is_competitor: args.competitor_listing,
        market: market(args),
    }
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_header() {
    println!();
    println!("{}", format!("Cyclear LQS v{}", VERSION).bold());
    println!("{}", "─".repeat(48).dimmed());
}

fn print_tags(tags: &[String]) {
    println!("{} ({})", "Tags".bold(), tags.len());
    for tag in tags {
        println!("  • {}", tag);
    }
    println!();
}

fn score_color(total: f64) -> colored::Color {
    if total >= 75.0 {
        colored::Color::Green
    } else if total >= 50.0 {
        colored::Color::Yellow
    } else {
        colored::Color::Red
    }
}

fn print_score(score: &ScoreBreakdown, verbose: bool) {
    let total = format!("{:.1}/100", score.total).color(score_color(score.total)).bold();
    println!("{} {}", "LQS".bold(), total);
    println!("  Visual Impulse  {:>5.1}/35", score.visual_impulse);
    println!("  SEO Foundation  {:>5.1}/35", score.seo_foundation);
    println!("  Zeitgeist       {:>5.1}/30", score.zeitgeist);
    if score.is_trendsetter {
        println!("  {}", "★ Trendsetter".magenta().bold());
    }

    if verbose {
        let d = &score.visual_details;
        println!(
            "  {}",
            format!(
                "sharpness={:.1} simplicity={:.1} texture={:.1} lifestyle={:.1}",
                d.sharpness, d.simplicity, d.texture, d.lifestyle
            )
            .dimmed()
        );
        for item in &score.feedback {
            println!("  {} {}", "→".yellow(), item);
        }
    }
    println!();
}

fn print_price(price: &PriceRecommendation) {
    println!("{}", "Price".bold());
    println!(
        "  {:.2}  {}  {:.2}",
        price.min,
        format!("[{:.2}]", price.optimal).green().bold(),
        price.max
    );
    println!("  {}", price.reason.dimmed());
    println!();
}

fn print_analysis(analysis: &ListingAnalysis, verbose: bool) {
    println!("{} {}", "Listing".bold(), analysis.listing_id);
    println!("  {}", analysis.title);
    println!();
    print_tags(&analysis.tags);
    print_score(&analysis.score, verbose);
    print_price(&analysis.price);

    if verbose {
        let traffic = estimate_for(analysis);
        println!("{} ~{} visits", "Traffic".bold(), traffic.total_visits);
        for source in &traffic.sources {
            println!("  {:<18} {:>6}", source.name, source.value);
        }
        println!();
        println!("{} {}", "Fingerprint".dimmed(), analysis.fingerprint.dimmed());
    }
}
