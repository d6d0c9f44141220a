use poise::serenity_prelude as serenity;
use std::sync::atomic::Ordering;
use tracing::{error, info};

pub async fn handle_event<'a>(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'a, crate::Data, crate::Error>,
    data: &crate::Data,
) -> Result<(), crate::Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot, .. } => {
            info!("connected as {}", data_about_bot.user.name);

            // One ingestion run per invocation; Ready can fire again on a
            // reconnect, so guard against a second pass.
            if !data.run_started.swap(true, Ordering::SeqCst) {
                match crate::engine::run::run_daily(ctx, data).await {
                    Ok(()) => info!("daily run complete"),
                    Err(e) => error!("daily run failed: {}", e),
                }
                ctx.shard.shutdown_clean();
            }
        }
        _ => {}
    }
    Ok(())
}
