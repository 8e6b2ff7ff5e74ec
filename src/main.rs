mod actors;
mod app_system;
mod cache;
mod clients;
mod domain;
mod error;
mod messages;
mod search;
mod views;

#[cfg(test)]
mod mock_framework;

use tracing::{info, Instrument};

use crate::app_system::{setup_tracing, ConsoleSystem};
use crate::cache::UserCache;
use crate::domain::User;
use crate::views::{EditFlow, EditState, ListView};

fn seed_users() -> Vec<User> {
    vec![
        User::new("user_1", "George", "Bluth", "george.bluth@example.com", "https://img.example.com/1.jpg"),
        User::new("user_2", "Janet", "Weaver", "janet.weaver@example.com", "https://img.example.com/2.jpg"),
        User::new("user_3", "Emma", "Wong", "emma.wong@example.com", "https://img.example.com/3.jpg"),
        User::new("user_4", "Eve", "Holt", "eve.holt@example.com", "https://img.example.com/4.jpg"),
        User::new("user_5", "Charles", "Morris", "charles.morris@example.com", "https://img.example.com/5.jpg"),
        User::new("user_6", "Tracey", "Ramos", "tracey.ramos@example.com", "https://img.example.com/6.jpg"),
        User::new("user_7", "Michael", "Lawson", "michael.lawson@example.com", "https://img.example.com/7.jpg"),
        User::new("user_8", "Lindsay", "Ferguson", "lindsay.ferguson@example.com", "https://img.example.com/8.jpg"),
    ]
}

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting user console");

    let mut system = ConsoleSystem::new(seed_users(), 6);
    let mut cache = UserCache::new();
    let mut view = ListView::new();

    // Browse both pages.
    let span = tracing::info_span!("list_browsing");
    async {
        view.load_page(1, &cache, &system.directory_client)
            .await
            .map_err(|e| e.to_string())?;
        info!(
            page = view.current_page(),
            total_pages = view.total_pages(),
            visible = view.visible().len(),
            "Loaded user list"
        );

        view.set_search("we");
        info!(matches = view.visible().len(), "Filtered by search term");
        view.set_search("");

        view.load_page(2, &cache, &system.directory_client)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    // Edit a user and watch the change survive renavigation.
    let span = tracing::info_span!("user_editing");
    async {
        let mut flow = EditFlow::open("user_2".to_string(), &cache, &system.directory_client).await;
        flow.set_first_name("Jan");
        flow.submit(&mut cache, &system.directory_client, &system.signals_tx)
            .await
            .map_err(|e| e.to_string())?;

        if let EditState::Saved { user } = flow.state() {
            info!(user_id = %flow.id(), first_name = %user.first_name, "Edit confirmed");
        }
        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    if let Some(signal) = system.signals_rx.recv().await {
        if view.apply_signal(signal) {
            view.load_page(view.current_page(), &cache, &system.directory_client)
                .await
                .map_err(|e| e.to_string())?;
        }
        if let Some(notice) = view.take_notice() {
            info!(%notice, "Notice shown");
        }
    }

    // Delete a user from page 1.
    let span = tracing::info_span!("user_deletion");
    async {
        view.load_page(1, &cache, &system.directory_client)
            .await
            .map_err(|e| e.to_string())?;
        view.delete_user(
            "user_1",
            &mut cache,
            &system.directory_client,
            &system.signals_tx,
        )
        .await
        .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    if let Some(signal) = system.signals_rx.recv().await {
        if view.apply_signal(signal) {
            view.load_page(view.current_page(), &cache, &system.directory_client)
                .await
                .map_err(|e| e.to_string())?;
        }
        if let Some(notice) = view.take_notice() {
            info!(%notice, "Notice shown");
        }
    }

    info!(
        remaining = view.visible().len(),
        total_pages = view.total_pages(),
        "Session complete"
    );

    system.shutdown().await
}
