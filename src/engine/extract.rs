use regex::Regex;
use std::sync::OnceLock;

use crate::data::countries::normalize_country;

/// One record of channel history, newest first, as handed over by the chat
/// client. Only the shape the extractor needs.
#[derive(Debug, Clone)]
pub struct ChannelMessage {
    pub author_is_self: bool,
    pub text: String,
}

/// How far back the extractor looks in a channel.
pub const HISTORY_WINDOW: usize = 20;

static CHALLENGE_URL_RE: OnceLock<Regex> = OnceLock::new();
static LEGACY_HEADER_RE: OnceLock<Regex> = OnceLock::new();
static LEGACY_MENTION_RE: OnceLock<Regex> = OnceLock::new();

fn challenge_url_re() -> &'static Regex {
    CHALLENGE_URL_RE
        .get_or_init(|| Regex::new(r"https?://[\w.-]+/challenge/([A-Za-z0-9]+)").unwrap())
}

fn legacy_header_re() -> &'static Regex {
    LEGACY_HEADER_RE.get_or_init(|| Regex::new(r"Daily Challenge \d+ - (.+)").unwrap())
}

fn legacy_mention_re() -> &'static Regex {
    LEGACY_MENTION_RE.get_or_init(|| Regex::new(r"@[\w!\s-]+").unwrap())
}

/// Scans recent history newest-first and returns the token of the most
/// recent well-formed challenge URL, or None when the window has none.
pub fn find_challenge_token(messages: &[ChannelMessage]) -> Option<String> {
    for msg in messages.iter().take(HISTORY_WINDOW) {
        if let Some(caps) = challenge_url_re().captures(&msg.text) {
            return Some(caps[1].to_string());
        }
    }
    None
}

fn is_flag_glyph(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

const RANK_GLYPHS: [char; 4] = ['\u{1F947}', '\u{1F948}', '\u{1F949}', '\u{1F36B}'];

/// Legacy composite-message parser, kept for old-format channels. Pulls the
/// country key from a flag-glyph header line and ordered @-mentions from the
/// 🥇/🥈/🥉/🍫 rank lines. Anything that doesn't match the grammar exactly
/// yields empty results, which callers treat as "nothing to ingest".
pub fn parse_legacy_results(text: &str) -> (Option<String>, Vec<String>) {
    let mut country = None;
    let mut players = Vec::new();

    for line in text.lines() {
        let first = match line.chars().next() {
            Some(c) => c,
            None => continue,
        };

        if is_flag_glyph(first) {
            if let Some(caps) = legacy_header_re().captures(line) {
                country = Some(normalize_country(&caps[1]));
            }
        }

        if RANK_GLYPHS.contains(&first) {
            if let Some(m) = legacy_mention_re().find(line) {
                players.push(m.as_str().to_string());
            }
        }
    }

    (country, players)
}
