//! BannerBot Telegram Bot
//!
//! Main application entry point

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use teloxide::dispatching::UpdateHandler;
use teloxide::{prelude::*, types::Update, utils::command::BotCommands};
use tracing::{error, info, warn};

use BannerBot::{
    config::Settings,
    database::{self, BannerStore, DatabaseService},
    engine::Compositor,
    handlers::{
        access_gate,
        callbacks::{callback_chat_id, handle_callback_query},
        handle_command, handle_message, report_error, Command,
    },
    server::{self, AppState},
    services::ServiceFactory,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the file writer on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", BannerBot::info());

    info!("Connecting to database...");
    let db = match database::connect(&settings.database).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Database is unreachable, aborting");
            return Err(e.into());
        }
    };
    let store: Arc<dyn BannerStore> = Arc::new(DatabaseService::new(db));

    info!("Loading templates and fonts...");
    let compositor = match Compositor::new(&settings.banner) {
        Ok(compositor) => Arc::new(compositor),
        Err(e) => {
            error!(error = %e, "Banner renderer could not be initialized, aborting");
            return Err(e.into());
        }
    };

    let server_config = settings.server.clone();
    let bot = Bot::new(&settings.bot.token);

    info!("Initializing services...");
    let services = Arc::new(ServiceFactory::new(settings, store.clone(), compositor)?);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![services.clone()])
        .default_handler(|upd| async move {
            warn!(update_id = upd.id.0, "Unhandled update");
        })
        .build();
    let shutdown_token = dispatcher.shutdown_token();

    let bot_running = Arc::new(AtomicBool::new(true));
    let running = bot_running.clone();
    tokio::spawn(async move {
        info!("Starting bot with polling mode...");
        dispatcher.dispatch().await;
        running.store(false, Ordering::SeqCst);
        warn!("Bot dispatcher stopped");
    });

    let cleanup_services = services.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = cleanup_services.cleanup().await;
            if removed > 0 {
                info!(removed = removed, "Expired banner flows removed");
            }

            let health = cleanup_services.health_check().await;
            if !health.is_healthy() {
                warn!(issues = ?health.get_issues(), active_flows = health.active_flows, "Service health degraded");
            }
        }
    });

    info!("BannerBot is ready!");

    let state = AppState::new(store, bot_running);
    server::serve(&server_config, state, shutdown_signal()).await?;

    if let Ok(stopped) = shutdown_token.shutdown() {
        stopped.await;
    }
    info!("BannerBot has been shut down.");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    dptree::entry()
        // Banned users and storage outages stop here
        .filter_async(access_gate)
        .branch(
            Update::filter_message()
                .branch(dptree::entry().filter_command::<Command>().endpoint(handle_commands))
                .branch(dptree::endpoint(handle_messages)),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callbacks))
}

/// Handle bot commands
async fn handle_commands(bot: Bot, msg: Message, cmd: Command, services: Arc<ServiceFactory>) -> HandlerResult {
    let services = (*services).clone();
    let chat_id = msg.chat.id;
    let user_id = msg.from.as_ref().map(|u| u.id.0 as i64);

    if let Err(e) = handle_command(bot.clone(), msg, cmd, services).await {
        report_error(&bot, chat_id, user_id, &e).await;
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(bot: Bot, msg: Message, services: Arc<ServiceFactory>) -> HandlerResult {
    let services = (*services).clone();
    let chat_id = msg.chat.id;
    let user_id = msg.from.as_ref().map(|u| u.id.0 as i64);

    if let Err(e) = handle_message(bot.clone(), msg, services).await {
        report_error(&bot, chat_id, user_id, &e).await;
        return Err(e.into());
    }

    Ok(())
}

/// Handle callback queries
async fn handle_callbacks(bot: Bot, query: CallbackQuery, services: Arc<ServiceFactory>) -> HandlerResult {
    let services = (*services).clone();
    let chat_id = callback_chat_id(&query);
    let user_id = query.from.id.0 as i64;

    if let Err(e) = handle_callback_query(bot.clone(), query, services).await {
        report_error(&bot, chat_id, Some(user_id), &e).await;
        return Err(e.into());
    }

    Ok(())
}
