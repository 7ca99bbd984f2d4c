//! scorebar — Binary Entrypoint
//! Status-bar score reports and match start/end notifications for the
//! LiveScore public feed. Stdout is displayed verbatim by the bar, so
//! every failure path degrades to a short token instead of crashing.

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scorebar::favorites::{self, Favorites};
use scorebar::feed::LiveScoreClient;
use scorebar::notify::DesktopNotifier;
use scorebar::policy::Sport;
use scorebar::render::Palette;
use scorebar::{report, watch};

#[derive(Parser)]
#[command(name = "scorebar", version, about = "Live scores for your status bar", long_about = None)]
struct Cli {
    /// Sport to report on
    #[arg(value_enum)]
    sport: Sport,

    /// With no mode, only the sport glyph is printed
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Print the full score report for today
    Full {
        /// Report on the prior period instead (yesterday for tennis, the
        /// past week for soccer)
        #[arg(value_enum)]
        period: Option<Period>,
    },
    /// Diff live favorite matches against the saved snapshot and send
    /// desktop notifications for starts and ends; prints nothing
    CheckNotify,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Period {
    Yesterday,
}

/// Logs go to stderr so stdout stays clean for the bar; quiet unless
/// RUST_LOG asks for output.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn load_favorites() -> Favorites {
    favorites::load_default().unwrap_or_else(|e| {
        tracing::debug!(error = ?e, "favorites unavailable, rendering without stars");
        Favorites::default()
    })
}

async fn build_report(sport: Sport, period: Option<Period>) -> String {
    let favorites = load_favorites();
    let palette = Palette::ANSI;
    let result = match LiveScoreClient::new() {
        Ok(client) => match period {
            None => report::today_report(&client, sport, &palette, &favorites).await,
            Some(Period::Yesterday) => {
                report::past_report(&client, sport, &palette, &favorites).await
            }
        },
        Err(e) => Err(e),
    };
    result.unwrap_or_else(|e| format!("{} error: {}", sport.glyph(), e))
}

#[tokio::main]
async fn main() {
    // Load .env in local setups; no-op elsewhere. Lets SCOREBAR_* paths
    // come from a file next to the bar config.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    match cli.mode {
        None => println!("{}", cli.sport.glyph()),
        Some(Mode::Full { period }) => println!("{}", build_report(cli.sport, period).await),
        Some(Mode::CheckNotify) => match LiveScoreClient::new() {
            Ok(client) => {
                watch::run_check(&client, cli.sport, &DesktopNotifier::from_env()).await;
            }
            Err(e) => tracing::warn!(error = ?e, "notification check aborted"),
        },
    }
}
