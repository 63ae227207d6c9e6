//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire config, logging and the store together the way a host would.
//! - Run one create/add/list/remove/delete pass for a given external id.

use clap::Parser;
use log::info;
use std::process::ExitCode;
use std::sync::Arc;
use wishlist_core::{
    core_version, init_logging, Category, CollectionStore, CoreConfig, ItemRequest,
    WishlistService,
};

#[derive(Parser)]
#[command(name = "wishlist_cli")]
#[command(about = "Runs one create/add/list/remove/delete pass against an in-memory store")]
#[command(version)]
struct Cli {
    /// External id of the wishlist owner
    #[arg(default_value = "alice")]
    external_id: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli.external_id) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("wishlist_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(external_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = CoreConfig::from_env()?;
    init_logging(&config)?;
    println!("wishlist_core version={}", core_version());
    println!("wishlist_core log_dir={}", config.log_dir.display());

    let service = WishlistService::new(Arc::new(CollectionStore::new()));

    let outcome = service.create_collection(external_id)?;
    println!("create_collection outcome={outcome:?}");

    let request = ItemRequest::new("Fringe Festival Pass", Category::Event);
    let item_id = service.add_item(external_id, request.clone())?;
    println!("add_item id={item_id}");

    let replay = ItemRequest {
        id: Some(item_id),
        ..request
    };
    match service.add_item(external_id, replay) {
        Ok(_) => println!("add_item duplicate=accepted"),
        Err(err) => println!("add_item duplicate=rejected reason=\"{err}\""),
    }

    let view = service.get_items(external_id, Some(Category::Event))?;
    println!("{}", serde_json::to_string_pretty(&view)?);

    service.remove_item_by_id(external_id, item_id)?;
    service.delete_collection(external_id)?;
    println!(
        "delete_collection exists_after={}",
        service.store().exists(view.owner)
    );

    info!("event=cli_smoke module=cli status=ok");
    Ok(())
}
