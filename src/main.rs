use dotenv::dotenv;
use log::{error, info};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use stock_dashboard::commands::{parse_command, Command, HELP};
use stock_dashboard::config::Config;
use stock_dashboard::dashboard::{Dashboard, DashboardOptions};
use stock_dashboard::services::api::HttpStockSource;
use stock_dashboard::view::terminal::stdout_view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();
    info!("Logger initialized. Starting the dashboard...");

    let config = Config::from_env()?;
    let source = Arc::new(HttpStockSource::new(&config.base_url, config.http_timeout)?);
    let view = stdout_view(&config.range_buttons);

    let mut dashboard = Dashboard::new(source, view, DashboardOptions::from(&config));
    dashboard.start();
    println!("{}", HELP);

    let (tx, mut events) = mpsc::unbounded_channel();

    // Terminal input plays the role of clicks.
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    break;
                }
            };
            match parse_command(&line) {
                Ok(Command::Event(event)) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Ok(Command::Help) => println!("{}", HELP),
                Ok(Command::Quit) => break,
                Ok(Command::Empty) => {}
                Err(message) => println!("{} (type 'help')", message),
            }
        }
    });

    dashboard.run(&mut events).await;
    info!("Dashboard stopped");
    Ok(())
}
