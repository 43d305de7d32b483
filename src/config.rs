use clap::Parser;

#[derive(Parser, Clone, Debug)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    /// Base URL of the reservation backend, without the `/api/reservation` suffix
    #[clap(env, long, default_value = "http://localhost:8080")]
    pub api_base_url: String,

    /// Path to open on start, e.g. `reservation`
    #[clap(default_value = "")]
    pub path: String,
}
