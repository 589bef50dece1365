// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lighter Footprints command-line client
//!
//! Logs in as a participant, loads their view model, and runs one action
//! against it.

use anyhow::Context;
use clap::{Parser, Subcommand};
use lighterprints_client::{
    config::Config,
    services::{spawn_ticker, ActionOutcome},
    views, Session, ViewModel,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "lighterprints", about = "Lighter Footprints participant client")]
struct Cli {
    #[arg(long, env = "LIGHTERPRINTS_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "LIGHTERPRINTS_EMAIL")]
    email: Option<String>,

    #[arg(long, env = "LIGHTERPRINTS_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show challenges, group feed and time left
    Show,
    /// Perform an available challenge
    Perform { activity_id: u64 },
    /// Post a chat message to the group
    Chat { message: String },
    /// Comment on a group activity entry
    Comment { target_id: u64, message: String },
    /// Like a group activity entry
    Like { target_id: u64 },
    /// Show the group score
    Score,
    /// Keep the countdown running until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if cli.email.is_some() {
        config.email = cli.email;
    }
    if cli.password.is_some() {
        config.password = cli.password;
    }
    tracing::info!(base_url = %config.base_url, "Starting Lighter Footprints client");

    let session = Session::login(&config).await.context("Login failed")?;

    match cli.command {
        Command::Show => {}
        Command::Perform { activity_id } => {
            report(&session, session.perform_activity(activity_id).await).await?
        }
        Command::Chat { message } => {
            report(&session, session.post_chat_message(&message).await).await?
        }
        Command::Comment { target_id, message } => {
            report(&session, session.post_comment(target_id, &message).await).await?
        }
        Command::Like { target_id } => report(&session, session.like(target_id).await).await?,
        Command::Score => {
            for score in session.group_score().await? {
                println!(
                    "Total points: {}  Average per person: {}  To next level: {}",
                    score.total_points, score.average_points_per_person, score.points_to_next_level
                );
            }
            return Ok(());
        }
        Command::Watch => {
            watch(&session, config.tick_period).await?;
            return Ok(());
        }
    }

    print_view(&*session.view().await);
    Ok(())
}

async fn report(
    session: &Session,
    result: lighterprints_client::Result<ActionOutcome>,
) -> anyhow::Result<()> {
    match result {
        Ok(outcome) => {
            tracing::info!(?outcome, "Action finished");
            Ok(())
        }
        Err(err) => {
            let message = session
                .view()
                .await
                .error_message()
                .map(str::to_string)
                .unwrap_or_else(|| err.display_message());
            Err(anyhow::anyhow!("{} ({})", message, err))
        }
    }
}

async fn watch(session: &Session, period: std::time::Duration) -> anyhow::Result<()> {
    let ticker = spawn_ticker(session.state(), period);
    let mut report = tokio::time::interval(period);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = report.tick() => {
                let countdown = session.view().await.countdown();
                println!("{:02}:{:02} left", countdown.hours_left, countdown.minutes_left);
            }
        }
    }
    ticker.abort();
    Ok(())
}

fn print_view(view: &ViewModel) {
    let snapshot = view.snapshot();
    let countdown = view.countdown();

    if let Some(name) = &snapshot.group_name {
        println!("Group: {}", name);
    }
    println!(
        "Time left: {:02}:{:02}",
        countdown.hours_left, countdown.minutes_left
    );
    println!(
        "Updated: {}",
        view.refreshed_at().format("%Y-%m-%d %H:%M:%S UTC")
    );

    println!("\nChallenges:");
    for activity in view.unlocked_challenges() {
        println!(
            "  [{}] {} ({})",
            activity.pk,
            activity.label(),
            views::activity_status_css(activity)
        );
    }
    let locked = view.locked_challenges().len();
    if locked > 0 {
        println!("  {} locked", locked);
    }
    if !view.has_available_activities() {
        println!("  Nothing available right now");
    }

    if view.has_chat_messages() {
        println!("\nChat:");
        for message in view.chat_messages() {
            println!(
                "  {} | {}",
                message.timestamp().unwrap_or("-"),
                message.body()
            );
        }
    }

    println!("\nRecent group activity:");
    for entry in view.sidebar_group_activities() {
        let liked = if view.is_liked(entry.pk) { " ♥" } else { "" };
        println!(
            "  [{}] {} {}{}",
            entry.pk,
            views::group_activity_template(entry),
            entry
                .display_name
                .as_deref()
                .or(entry.message.as_deref())
                .unwrap_or_default(),
            liked
        );
    }

    if let Some(last) = view.last_performed_activity() {
        println!("\nLast performed: {}", last.label());
    }
    if let Some(error) = view.error_message() {
        println!("\nError: {}", error);
    }
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lighterprints_client=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
