use crate::data::countries::Country;
use crate::data::scores::ScoreEntry;
use crate::engine::scoring::ResolvedPlayer;

const MEDALS: [&str; 3] = ["\u{1F947}", "\u{1F948}", "\u{1F949}"];
// Fourth place gets chocolate.
const FOURTH: &str = "\u{1F36B}";

/// Today's result announcement: header plus up to three medal lines in
/// descending score order. Zero players degrade to the bare header.
pub fn result_announcement(country: &Country, day: u32, scored: &[ResolvedPlayer]) -> String {
    let mut out = format!(
        "{} Daily Challenge {} - {}",
        country.flag, day, country.display_name
    );
    for (medal, player) in MEDALS.iter().zip(scored.iter()) {
        out.push_str(&format!(
            "\n{} {} - {}",
            medal, player.display_identity, player.score
        ));
    }
    out
}

/// Provisional cumulative standings: up to four entries from the persisted,
/// sorted leaderboard, with a distinct marker for fourth place.
pub fn leaderboard_text(country: &Country, entries: &[ScoreEntry]) -> String {
    let mut out = format!("{} Leaderboard - {}", country.flag, country.display_name);
    for (position, entry) in entries.iter().take(4).enumerate() {
        let marker = MEDALS.get(position).copied().unwrap_or(FOURTH);
        out.push_str(&format!("\n{} {} - {} pts", marker, entry.user, entry.pts));
    }
    out
}

/// Announcement for the next day's challenge. `challenge_url` is the freshly
/// created challenge when creation succeeded, today's URL otherwise.
pub fn next_challenge_announcement(country: &Country, next_day: u32, challenge_url: &str) -> String {
    format!(
        "{} Daily Challenge {} - {}\n{}",
        country.flag, next_day, country.display_name, challenge_url
    )
}

pub fn challenge_url(token: &str) -> String {
    format!("https://www.geoguessr.com/challenge/{}", token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country() -> Country {
        Country {
            key: "france".to_string(),
            display_name: "France".to_string(),
            flag: "\u{1F1EB}\u{1F1F7}".to_string(),
            channel_id: 42,
            map_url: "https://www.geoguessr.com/maps/france".to_string(),
        }
    }

    fn player(name: &str, score: i64) -> ResolvedPlayer {
        ResolvedPlayer {
            player_id: None,
            display_identity: name.to_string(),
            score,
            points: 0,
        }
    }

    #[test]
    fn result_announcement_lists_top_three_with_medals() {
        let scored = vec![
            player("<@1>", 24000),
            player("<@2>", 21000),
            player("bob", 18000),
            player("carol", 9000),
        ];
        let text = result_announcement(&country(), 29, &scored);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "\u{1F1EB}\u{1F1F7} Daily Challenge 29 - France");
        assert_eq!(lines[1], "\u{1F947} <@1> - 24000");
        assert_eq!(lines[2], "\u{1F948} <@2> - 21000");
        assert_eq!(lines[3], "\u{1F949} bob - 18000");
        // Fourth place is not part of the announcement.
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn result_announcement_with_no_players_is_header_only() {
        let text = result_announcement(&country(), 29, &[]);
        assert_eq!(text, "\u{1F1EB}\u{1F1F7} Daily Challenge 29 - France");
    }

    #[test]
    fn announcement_round_trips_through_the_legacy_parser() {
        let scored = vec![player("@alice", 24000), player("@bob", 21000)];
        let text = result_announcement(&country(), 12, &scored);
        let (key, players) = crate::engine::extract::parse_legacy_results(&text);
        assert_eq!(key.as_deref(), Some("france"));
        assert_eq!(players.len(), 2);
    }

    #[test]
    fn leaderboard_marks_fourth_place_distinctly() {
        let entries = vec![
            ScoreEntry { user: "a".to_string(), pts: 12 },
            ScoreEntry { user: "b".to_string(), pts: 9 },
            ScoreEntry { user: "c".to_string(), pts: 5 },
            ScoreEntry { user: "d".to_string(), pts: 4 },
            ScoreEntry { user: "e".to_string(), pts: 1 },
        ];
        let text = leaderboard_text(&country(), &entries);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[4].starts_with(FOURTH));
        assert!(!text.contains("- 1 pts"));
    }

    #[test]
    fn next_challenge_announcement_carries_day_and_url() {
        let text = next_challenge_announcement(&country(), 30, "https://www.geoguessr.com/challenge/xyz");
        assert_eq!(
            text,
            "\u{1F1EB}\u{1F1F7} Daily Challenge 30 - France\nhttps://www.geoguessr.com/challenge/xyz"
        );
    }
}
