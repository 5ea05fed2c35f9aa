//! flashscope - Transient Request-Scoped Flash Storage
//!
//! Demo binary: simulates a session's request pipeline and prints what each
//! request sees in its flash store, so the hand-off and expiration timing
//! can be watched end to end.

use flashscope::scope::{MemorySession, RequestContext, ScopeConfig, ScopeController};
use flashscope::store::FlashValue;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Demo configuration
struct Config {
    /// Number of empty follow-up requests after the hand-off
    follow_ups: u32,
    /// Enable the sweep-unused policy
    sweep_unused: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            follow_ups: 2,
            sweep_unused: false,
        }
    }
}

impl Config {
    /// Parse configuration from command-line arguments
    fn from_args() -> Self {
        let mut config = Config::default();
        let args: Vec<String> = std::env::args().collect();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--follow-ups" | "-n" => {
                    if i + 1 < args.len() {
                        config.follow_ups = args[i + 1].parse().unwrap_or_else(|_| {
                            eprintln!("Error: invalid follow-up count");
                            std::process::exit(1);
                        });
                        i += 2;
                    } else {
                        eprintln!("Error: --follow-ups requires a value");
                        std::process::exit(1);
                    }
                }
                "--sweep-unused" | "-s" => {
                    config.sweep_unused = true;
                    i += 1;
                }
                "--help" => {
                    print_help();
                    std::process::exit(0);
                }
                "--version" | "-v" => {
                    println!("flashscope version {}", flashscope::VERSION);
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                    print_help();
                    std::process::exit(1);
                }
            }
        }

        config
    }
}

fn print_help() {
    println!(
        r#"
flashscope - Transient Request-Scoped Flash Storage

Simulates a session's request pipeline: a POST stores a flash notice, the
redirected GET reads it, and follow-up requests show the entry expiring.

USAGE:
    flashscope [OPTIONS]

OPTIONS:
    -n, --follow-ups <N>    Extra empty requests after the hand-off (default: 2)
    -s, --sweep-unused      Flag all entries at request entry, so anything
                            not read or kept lives for exactly one request
    -v, --version           Print version information
        --help              Print this help message
"#
    );
}

/// Runs one simulated request and reports the flash contents it observed.
async fn run_request(
    label: &str,
    controller: &ScopeController,
    session: &Arc<MemorySession>,
    action: impl FnOnce(Arc<flashscope::FlashStore>),
) {
    let ctx = RequestContext::new(session.clone());
    controller
        .around(&ctx, || async {
            let store = controller.store_for(&ctx);

            let seen: Vec<(String, FlashValue)> = store.iter().collect();
            if seen.is_empty() {
                println!("{label}: flash is empty");
            } else {
                for (key, value) in &seen {
                    println!("{label}: flash[{key}] = {value}");
                }
            }

            action(store);
            Ok::<_, Infallible>(())
        })
        .await
        .expect("demo handlers are infallible");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_args();

    // Set up logging
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .init();

    println!(
        "flashscope v{} - request hand-off demo (sweep_unused: {})\n",
        flashscope::VERSION,
        config.sweep_unused
    );

    let session = Arc::new(MemorySession::new());
    let controller = ScopeController::with_config(ScopeConfig {
        sweep_unused: config.sweep_unused,
    });

    run_request("POST /profile", &controller, &session, |store| {
        store.put("notice", "profile updated");
        info!("stored flash notice for the next request");
    })
    .await;

    // Note: the iteration in run_request reads (and therefore flags) every
    // entry, so the notice expires at the end of this request.
    run_request("GET /profile", &controller, &session, |_| {}).await;

    for i in 0..config.follow_ups {
        let label = format!("GET /other ({})", i + 1);
        run_request(&label, &controller, &session, |_| {}).await;
    }

    let stats = controller.stats();
    println!(
        "\n{} requests handled, {} sweeps, {} persist failures",
        stats.requests, stats.sweeps, stats.persist_failures
    );

    Ok(())
}
