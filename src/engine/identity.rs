use crate::data::users::UserMapping;

/// Resolves a game-service player id to a chat identity. Mapped players get
/// a Discord mention; unmapped players keep their in-game name. The table is
/// small, so a linear scan is fine; the first matching row wins when the
/// table carries duplicates.
pub fn resolve(player_id: Option<&str>, fallback_name: &str, mappings: &[UserMapping]) -> String {
    if let Some(id) = player_id {
        if let Some(m) = mappings.iter().find(|m| m.user_id == id) {
            return format!("<@{}>", m.discord_id);
        }
    }
    fallback_name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<UserMapping> {
        vec![
            UserMapping { user_id: "g-1".to_string(), discord_id: 111 },
            UserMapping { user_id: "g-2".to_string(), discord_id: 222 },
            UserMapping { user_id: "g-1".to_string(), discord_id: 999 },
        ]
    }

    #[test]
    fn mapped_player_becomes_a_mention() {
        assert_eq!(resolve(Some("g-2"), "nick", &table()), "<@222>");
    }

    #[test]
    fn unmapped_player_falls_back_to_raw_name() {
        assert_eq!(resolve(Some("42"), "MysteryGuesser", &table()), "MysteryGuesser");
    }

    #[test]
    fn missing_player_id_falls_back_to_raw_name() {
        assert_eq!(resolve(None, "anon", &table()), "anon");
    }

    #[test]
    fn duplicate_rows_resolve_to_the_first_match() {
        assert_eq!(resolve(Some("g-1"), "nick", &table()), "<@111>");
    }
}
