use chrono::{Datelike, Days, Local, NaiveDate};
use poise::serenity_prelude as serenity;
use tracing::{info, warn};

use crate::data::countries::Country;
use crate::engine::compose;
use crate::engine::extract::{self, ChannelMessage, HISTORY_WINDOW};
use crate::engine::scoring::{self, Award, RankTable};

/// One full ingestion run: every configured country in sequence, one
/// extract -> score -> merge -> compose -> deliver cycle each, then a single
/// store write and a publish. A failing country is logged and skipped so the
/// rest of the run still happens.
pub async fn run_daily(ctx: &serenity::Context, data: &crate::Data) -> Result<(), crate::Error> {
    let table = RankTable::default();
    let today = Local::now().date_naive();

    for cfg in &data.config.countries {
        let country = Country::from_config(cfg);
        if let Err(e) = run_country(ctx, data, &country, cfg.map_id(), &table, today).await {
            warn!("skipping {}: {}", country.key, e);
        }
    }

    {
        let board = data.scores.read().await;
        board.save(&data.scores_path).await?;
    }
    info!("scores written to {}", data.scores_path.display());

    if let Err(e) = crate::clients::publisher::push_scores(&data.scores_path).await {
        warn!("publishing scores failed: {}", e);
    }
    Ok(())
}

async fn run_country(
    ctx: &serenity::Context,
    data: &crate::Data,
    country: &Country,
    map_id: Option<&str>,
    table: &RankTable,
    today: NaiveDate,
) -> Result<(), crate::Error> {
    let channel = serenity::ChannelId::new(country.channel_id);
    let bot_id = ctx.cache.current_user().id;

    let history: Vec<ChannelMessage> = channel
        .messages(
            &ctx.http,
            serenity::GetMessages::new().limit(HISTORY_WINDOW as u8),
        )
        .await?
        .into_iter()
        .map(|m| ChannelMessage {
            author_is_self: m.author.id == bot_id,
            text: m.content,
        })
        .collect();

    let token = extract::find_challenge_token(&history);
    let (awards, scored) = match &token {
        Some(token) => {
            let telemetry = match data.geoguessr.challenge_scores(token).await {
                Ok(t) => t,
                Err(e) => {
                    warn!("{}: no telemetry for challenge {}: {}", country.key, token, e);
                    Vec::new()
                }
            };
            let scored = scoring::score_players(&telemetry, &data.users, table);
            (scored.iter().map(|p| p.award()).collect(), scored)
        }
        None => {
            // Old channels carry composite result messages instead of a
            // challenge link; ingest the newest one posted by the bot.
            let awards = history
                .iter()
                .filter(|m| m.author_is_self)
                .find_map(|m| {
                    let (key, players) = extract::parse_legacy_results(&m.text);
                    match key {
                        Some(key) if key == country.key && !players.is_empty() => {
                            Some(legacy_awards(&players, table))
                        }
                        _ => None,
                    }
                })
                .unwrap_or_default();
            if awards.is_empty() {
                warn!("{}: no challenge reference in the last {} messages", country.key, HISTORY_WINDOW);
                return Ok(());
            }
            (awards, Vec::new())
        }
    };

    let merge_key = match &token {
        Some(token) => format!("{}:{}", token, today),
        None => format!("legacy:{}:{}", country.key, today),
    };
    {
        let mut board = data.scores.write().await;
        if !board.merge_once(&merge_key, &country.key, &awards) {
            warn!("{}: challenge {} already merged this run", country.key, merge_key);
        }
    }
    info!("{}: merged {} award(s)", country.key, awards.len());

    let day = today.day();
    channel
        .say(&ctx.http, compose::result_announcement(country, day, &scored))
        .await?;
    {
        let board = data.scores.read().await;
        channel
            .say(&ctx.http, compose::leaderboard_text(country, board.top(&country.key, 4)))
            .await?;
    }

    let next_day = today
        .checked_add_days(Days::new(1))
        .map(|d| d.day())
        .unwrap_or(day + 1);
    let next_token = match map_id {
        Some(map_id) => match data
            .geoguessr
            .create_challenge(map_id, data.config.time_limit)
            .await
        {
            Ok(t) => Some(t),
            Err(e) => {
                warn!("{}: creating next challenge failed: {}", country.key, e);
                None
            }
        },
        None => None,
    };
    // Reuse today's challenge when no new one could be created.
    let announce_token = next_token.or_else(|| token.clone());
    if let Some(announce_token) = announce_token {
        let text = compose::next_challenge_announcement(
            country,
            next_day,
            &compose::challenge_url(&announce_token),
        );
        let message = channel.say(&ctx.http, text).await?;
        let thread = serenity::CreateThread::new(format!("Daily Challenge {}", next_day));
        if let Err(e) = channel
            .create_thread_from_message(&ctx.http, message.id, thread)
            .await
        {
            warn!("{}: could not open discussion thread: {}", country.key, e);
        }
    }

    Ok(())
}

/// Point awards for the legacy path. The legacy format only ever lists the
/// podium plus fourth place, so positions past the rank table are dropped
/// rather than floored.
fn legacy_awards(players: &[String], table: &RankTable) -> Vec<Award> {
    players
        .iter()
        .take(table.points.len())
        .enumerate()
        .map(|(position, user)| Award {
            user: user.clone(),
            points: table.points_for(position),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_awards_follow_the_rank_table() {
        let players: Vec<String> = ["@a", "@b", "@c", "@d"].iter().map(|s| s.to_string()).collect();
        let awards = legacy_awards(&players, &RankTable::default());
        assert_eq!(awards.len(), 3);
        assert_eq!(awards[0], Award { user: "@a".to_string(), points: 4 });
        assert_eq!(awards[2], Award { user: "@c".to_string(), points: 2 });
    }

    #[test]
    fn legacy_awards_for_no_players_is_empty() {
        assert!(legacy_awards(&[], &RankTable::default()).is_empty());
    }
}
