//! Prints a week of the planner, as well as the daily tasks.
//!
//! The store URLs are read from `WEEKPLAN_TASK_API_URL` and `WEEKPLAN_DAILY_TASK_API_URL`.
//! Set `RUST_LOG` to see more details about the requests.

use clap::Parser;

use week_planner::client::Client;
use week_planner::utils::{print_pool, print_week};
use week_planner::week::WeekOffset;
use week_planner::Planner;

/// Print a week of tasks and the daily tasks
#[derive(Parser, Debug)]
#[command(name = "weekplan", version, about)]
struct Cli {
    /// Week to show: 0 is the current week, -1 the previous one, 1 the next one
    #[arg(default_value_t = 0, allow_hyphen_values = true)]
    offset: WeekOffset,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let client = match Client::from_env() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("Invalid store settings: {}", err);
            std::process::exit(2);
        },
    };
    log::info!("Using tasks from {}", client.settings().task_api());

    let mut planner = match Planner::new(client) {
        Ok(planner) => planner,
        Err(err) => {
            eprintln!("Unable to compute the current week: {}", err);
            std::process::exit(1);
        },
    };
    if let Err(err) = planner.navigate(cli.offset).await {
        log::error!("Unable to load week {}: {}", cli.offset, err);
    }

    print_week(&planner);
    print_pool(planner.pool());
}
