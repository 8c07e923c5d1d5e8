// murmur/murmur-core-client
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::messaging::models::{Mention, TextSpan};
use crate::domain::shared::models::{UnicodeScalarIndex, UserId};
use crate::domain::users::models::User;

/// `@` followed by words separated by single spaces.
static MENTION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@(\w+(?: \w+)*)").expect("Invalid mention pattern"));

/// Returns up to `limit` users whose name matches `partial` case-insensitively. Users whose name
/// starts with `partial` come before users whose name merely contains it. Within each group the
/// order of `directory` is kept.
pub fn extract_mention_suggestions(partial: &str, directory: &[User], limit: usize) -> Vec<User> {
    let needle = partial.trim_start_matches('@').trim().to_lowercase();

    if needle.is_empty() {
        return directory.iter().take(limit).cloned().collect();
    }

    let (prefix_matches, substring_matches): (Vec<_>, Vec<_>) = directory
        .iter()
        .filter_map(|user| {
            let name = user.name.to_lowercase();
            if name.starts_with(&needle) {
                Some((true, user))
            } else if name.contains(&needle) {
                Some((false, user))
            } else {
                None
            }
        })
        .partition(|(is_prefix_match, _)| *is_prefix_match);

    prefix_matches
        .into_iter()
        .chain(substring_matches)
        .take(limit)
        .map(|(_, user)| user.clone())
        .collect()
}

/// Splits `line` into plain text and mention spans.
///
/// Mentions with a range are applied as they are. For mentions without a range, every `@Name`
/// run in the remaining text is matched against the directory names of these mentioned users,
/// trying the longest run first and dropping trailing words until a name matches. Runs that
/// don't match a mentioned user stay plain text.
pub fn resolve_mention_spans(line: &str, mentions: &[Mention], directory: &[User]) -> Vec<TextSpan> {
    let mut anchored = mentions
        .iter()
        .filter_map(|mention| {
            let range = utf8_range(line, mention.range.as_ref()?)?;
            Some((range, &mention.user))
        })
        .collect::<Vec<_>>();
    anchored.sort_by_key(|(range, _)| range.start);

    let unanchored = mentions
        .iter()
        .filter(|mention| mention.range.is_none())
        .filter_map(|mention| directory.iter().find(|user| user.id == mention.user))
        .collect::<Vec<_>>();

    let mut spans = vec![];
    let mut cursor = 0;

    for (range, user_id) in anchored {
        // Overlapping ranges
        if range.start < cursor {
            continue;
        }
        scan_unanchored_mentions(&line[cursor..range.start], &unanchored, &mut spans);
        spans.push(TextSpan::Mention {
            user: user_id.clone(),
            text: line[range.clone()].to_string(),
        });
        cursor = range.end;
    }

    scan_unanchored_mentions(&line[cursor..], &unanchored, &mut spans);
    spans
}

/// Returns the `@partial` token the user is currently typing at the end of `draft` (without
/// the `@`), or `None` if the draft doesn't end with one.
pub fn partial_mention_token(draft: &str) -> Option<&str> {
    token_start(draft).map(|idx| &draft[idx + 1..])
}

/// Replaces the `@partial` token at the end of `draft` with the name of `user`. Returns the new
/// draft together with the mention pointing at the inserted `@Name`.
pub fn complete_mention(draft: &str, user: &User) -> Option<(String, Mention)> {
    let idx = token_start(draft)?;
    let start = UnicodeScalarIndex::from_utf8_offset(draft, idx);
    let end = UnicodeScalarIndex::new(start.value() + 1 + user.name.chars().count());

    let completed = format!("{}@{} ", &draft[..idx], user.name);

    Some((
        completed,
        Mention {
            user: user.id.clone(),
            range: Some(start..end),
        },
    ))
}

/// Moves the ranges of `mentions` by `offset` scalar values to the left, e.g. after leading
/// whitespace was trimmed from the text. Mentions whose range would start before the text are
/// dropped.
pub fn shift_mentions(mentions: Vec<Mention>, offset: usize) -> Vec<Mention> {
    mentions
        .into_iter()
        .filter_map(|mention| {
            let Some(range) = mention.range else {
                return Some(mention);
            };
            let start = range.start.value().checked_sub(offset)?;
            let end = range.end.value().checked_sub(offset)?;
            Some(Mention {
                user: mention.user,
                range: Some(UnicodeScalarIndex::new(start)..UnicodeScalarIndex::new(end)),
            })
        })
        .collect()
}

fn token_start(draft: &str) -> Option<usize> {
    let idx = draft.rfind('@')?;

    let preceded_by_whitespace = draft[..idx]
        .chars()
        .next_back()
        .map(char::is_whitespace)
        .unwrap_or(true);
    let is_word = draft[idx + 1..]
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_');

    (preceded_by_whitespace && is_word).then_some(idx)
}

fn utf8_range(line: &str, range: &Range<UnicodeScalarIndex>) -> Option<Range<usize>> {
    let start = range.start.to_utf8_offset(line)?;
    let end = range.end.to_utf8_offset(line)?;
    (start < end && line[start..].starts_with('@')).then_some(start..end)
}

fn scan_unanchored_mentions(segment: &str, users: &[&User], spans: &mut Vec<TextSpan>) {
    let mut cursor = 0;

    for captures in MENTION_REGEX.captures_iter(segment) {
        let (Some(token), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        let candidate_ends = name
            .as_str()
            .match_indices(' ')
            .map(|(idx, _)| idx)
            .chain([name.as_str().len()])
            .collect::<Vec<_>>();

        let matched_user = candidate_ends.into_iter().rev().find_map(|end| {
            let candidate = &name.as_str()[..end];
            users
                .iter()
                .find(|user| user.name == candidate)
                .map(|user| (end, &user.id))
        });

        let Some((end, user_id)) = matched_user else {
            continue;
        };

        let mention_end = name.start() + end;
        push_text(spans, &segment[cursor..token.start()]);
        push_mention(spans, user_id, &segment[token.start()..mention_end]);
        cursor = mention_end;
    }

    push_text(spans, &segment[cursor..]);
}

fn push_text(spans: &mut Vec<TextSpan>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(TextSpan::Text(last)) = spans.last_mut() {
        last.push_str(text);
        return;
    }
    spans.push(TextSpan::Text(text.to_string()));
}

fn push_mention(spans: &mut Vec<TextSpan>, user_id: &UserId, text: &str) {
    spans.push(TextSpan::Mention {
        user: user_id.clone(),
        text: text.to_string(),
    });
}
