//! # Describo Dashboard Entry Point
//!
//! ```text
//! describo-dashboard [PATH...]
//! ```
//!
//! Boots the state layer and prints the session, the store collection and
//! the route guard's answer for every `PATH` as JSON.

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    describo_dashboard::init_tracing();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    describo_dashboard::run(paths).await
}
