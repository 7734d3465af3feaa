use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use console_core::{AdminGateway, CredentialStore, HttpGateway, TeamsPage};
use tracing::info;

mod config;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    if let Some(token) = args.token {
        settings.api_token = Some(token);
    }

    let credentials = CredentialStore::new();
    if let Some(token) = &settings.api_token {
        credentials.set_token(token.clone()).await;
    }
    let base_url = config::normalize_base_url(&settings.api_base_url);
    let gateway = Arc::new(HttpGateway::new(base_url, credentials));

    let page = TeamsPage::new(Arc::clone(&gateway) as Arc<dyn AdminGateway>);
    page.load_all().await;
    let snapshot = page.snapshot().await;
    info!(teams = snapshot.teams.items.len(), "page loaded");

    println!(
        "{} team(s), {} employee(s), {} department(s), {} project(s)",
        snapshot.teams.items.len(),
        snapshot.employees.items.len(),
        snapshot.departments.items.len(),
        snapshot.projects.items.len(),
    );
    for error in [
        &snapshot.teams.error,
        &snapshot.employees.error,
        &snapshot.departments.error,
        &snapshot.projects.error,
    ]
    .into_iter()
    .flatten()
    {
        println!("partial load: {error}");
    }
    for team in &snapshot.teams.items {
        println!(
            "team {}: leader {}, department {}, {} member(s)",
            team.name,
            team.leader.full_name(),
            team.department.name,
            team.members.len(),
        );
    }

    match gateway.upcoming_events(settings.events_limit).await {
        Ok(events) => {
            for event in events {
                println!("upcoming: {} on {}", event.title, event.date.format("%Y-%m-%d"));
            }
        }
        Err(err) => println!("events unavailable: {}", err.message()),
    }

    page.teardown().await;
    Ok(())
}
