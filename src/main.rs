use clap::Parser;
use dotenv::dotenv;
use tokio::io::BufReader;
use tracing::info;
use reservations_console::config::Config;
use reservations_console::console::Console;
use reservations_console::controller::router_endpoints;
use reservations_console::repositories::reservation_repo::HttpReservationRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    info!("Starting reservations console ({}) against {}", config.environment, config.api_base_url);

    let repo = HttpReservationRepo::new(&config.api_base_url);
    let mut console = Console::new(repo, router_endpoints());

    console
        .run(&config.path, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}
