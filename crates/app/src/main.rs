//! Laced storefront client - demo entry point.
//!
//! Wires the reqwest transport and the file-based token slot into a
//! [`ShopClient`], restores or opens a session, and lists the catalog.
//! Configuration comes from the environment: `LACED_BASE_URL`,
//! `LACED_EMAIL`, `LACED_PASSWORD`.

use std::sync::Arc;

use laced_application::{ClientConfig, ShopClient};
use laced_domain::{CatalogFilter, Credentials};
use laced_infrastructure::{FileTokenStorage, ReqwestTransport};
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let base_url = std::env::var("LACED_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:4200/api/".to_string());
    let config = ClientConfig::new(Url::parse(&base_url)?);

    let storage = FileTokenStorage::default_path()
        .map_or_else(|| FileTokenStorage::new("laced-session.json".into()), FileTokenStorage::new);
    let transport = Arc::new(ReqwestTransport::new(&config)?);
    let client = ShopClient::new(&config, transport, Arc::new(storage));

    if client.auth().restore().await {
        info!("restored previous session");
    } else if let (Ok(email), Ok(password)) =
        (std::env::var("LACED_EMAIL"), std::env::var("LACED_PASSWORD"))
    {
        client.auth().login(&Credentials { email, password }).await?;
    } else {
        info!("no stored session and no credentials; browsing anonymously");
    }

    let sneakers = client.catalog().list(&CatalogFilter::default()).await?;
    println!("{} sneakers in the catalog", sneakers.len());
    for sneaker in sneakers.iter().take(5) {
        println!("  {} {} ({:.2})", sneaker.brand, sneaker.title, sneaker.price);
    }

    Ok(())
}
