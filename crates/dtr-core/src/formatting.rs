//! Formatting of relayed messages.

use chrono::{DateTime, Local};

use crate::domain::SourceMessage;

/// Render the header + body shown on the destination side:
/// bold author name, literal `" в "` plus the local hour:minute, then the
/// body verbatim on the next line. Telegram renders the `**` pairs in
/// Markdown parse mode.
pub fn format_relayed(author: &str, created_at: DateTime<Local>, body: &str) -> String {
    format!("**{author}** в {}:\n{body}", created_at.format("%H:%M"))
}

/// Convenience over [`format_relayed`] for a whole source message.
pub fn format_source_message(msg: &SourceMessage) -> String {
    format_relayed(&msg.author_name, msg.created_at, &msg.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 10, h, m, 0).unwrap()
    }

    #[test]
    fn bold_author_time_and_body() {
        let s = format_relayed("Alice", local(14, 5), "hello");
        assert_eq!(s, "**Alice** в 14:05:\nhello");
    }

    #[test]
    fn minutes_and_hours_are_zero_padded() {
        let s = format_relayed("Bob", local(9, 3), "hi");
        assert_eq!(s, "**Bob** в 09:03:\nhi");
    }

    #[test]
    fn empty_body_keeps_header_and_newline() {
        let s = format_relayed("Alice", local(14, 5), "");
        assert_eq!(s, "**Alice** в 14:05:\n");
    }

    #[test]
    fn body_is_not_escaped() {
        let s = format_relayed("Alice", local(14, 5), "a *b* <c>");
        assert!(s.ends_with("\na *b* <c>"));
    }
}
