use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use tracing::{error, info};

use reunite::config::Settings;
use reunite::{App, Credentials, FoundItemDraft, LostItemDraft};

/// Walk the demo flow end to end: seed lost reports, submit a matching
/// found report, wait for the delayed scan, then run the handover chat.
#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Reunite lost-and-found board...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    let scan_delay = settings.matching.scan_delay_ms;
    let reply_delay = settings.chat.reply_delay_ms;
    let (app, mut matches_rx) = App::new(settings);

    // Reporter signs in with an institutional email plus OTP.
    app.sign_in(&Credentials::InstitutionalEmail {
        email: "john.doe@nirmauni.ac.in".to_string(),
    })
    .expect("institutional email should be accepted");
    app.sign_in(&Credentials::Otp {
        code: "123456".to_string(),
    })
    .expect("six-digit OTP should be accepted");

    // Seed the board with the demo lost reports.
    app.submit_lost_item(LostItemDraft {
        item_name: "Blue Backpack".to_string(),
        description: "Navy blue Jansport backpack with laptop inside".to_string(),
        location: Some("Library 3rd floor".to_string()),
        date: NaiveDate::from_ymd_opt(2025, 10, 28).expect("valid date"),
        time: NaiveTime::from_hms_opt(14, 30, 0),
        image: None,
        reported_by: "John Doe".to_string(),
    })
    .await
    .expect("demo lost item should validate");

    app.submit_lost_item(LostItemDraft {
        item_name: "iPhone 13".to_string(),
        description: "Black iPhone 13 with cracked screen protector".to_string(),
        location: Some("Cafeteria".to_string()),
        date: NaiveDate::from_ymd_opt(2025, 10, 29).expect("valid date"),
        time: None,
        image: None,
        reported_by: "Jane Smith".to_string(),
    })
    .await
    .expect("demo lost item should validate");

    // A finder turns in a backpack.
    app.submit_found_item(FoundItemDraft {
        item_name: "Blue Backpack".to_string(),
        description: "Navy blue backpack found near study area".to_string(),
        location: "Library 3rd floor".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 10, 28).expect("valid date"),
        time: NaiveTime::from_hms_opt(15, 0, 0).expect("valid time"),
        image: "unsplash:photo-1553062407-98eeb64c6a62".to_string(),
        found_by: "Mike Johnson".to_string(),
    })
    .await
    .expect("demo found item should validate");

    info!("Waiting for the delayed match scan...");

    let notification = tokio::time::timeout(
        Duration::from_millis(scan_delay + 1000),
        matches_rx.recv(),
    )
    .await
    .ok()
    .flatten()
    .expect("the backpack should match");

    info!(
        "Potential match: {} <-> {} ({}% confidence)",
        notification.matched.lost_item.item_name,
        notification.matched.found_item.item_name,
        notification.matched.match_confidence
    );

    // Open the chat and negotiate the handover.
    let session = app.open_session(notification.matched);
    session
        .send("Can we meet at the library entrance at 5pm?")
        .await
        .expect("session is open");

    tokio::time::sleep(Duration::from_millis(reply_delay + 500)).await;

    for message in session.messages().await {
        info!(
            "[{}] {:?}: {}",
            message.timestamp.format("%H:%M"),
            message.sender,
            message.display_text()
        );
    }

    session.share_contact().await.expect("session is open");
    session.mark_reunited().await;

    let summary = session.summary().await;
    info!(
        "Session {} closed after {} messages (contact shared: {})",
        summary.session_id, summary.message_count, summary.contact_shared
    );

    // Admin view of the final board.
    let admin = Credentials::Admin {
        email: "lostfound@lostfound.com".to_string(),
        password: "admin@lostfound".to_string(),
    };
    app.sign_in(&admin).expect("demo admin credentials");

    let board = app.board_snapshot().await;
    info!(
        "Board: {} lost, {} found, {} matched",
        board.lost_count, board.found_count, board.matched_count
    );

    app.close();
}
