use autopulse::api::{CmdMessage, MessageLevel};
use autopulse::model::Article;
use chrono::{DateTime, Utc};
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const CATEGORY_WIDTH: usize = 12;
const FEATURED_MARKER: &str = "★";
const DRAFT_MARKER: &str = "draft";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Public listing: the featured article on top, then the rest.
pub(super) fn print_listing(featured: Option<&Article>, others: &[Article]) {
    let now = Utc::now();
    if let Some(article) = featured {
        println!("{}", render_row(article, &format!("{} ", FEATURED_MARKER), now).bold());
        if !others.is_empty() {
            println!();
        }
    }
    for article in others {
        println!("{}", render_row(article, "  ", now));
    }
}

/// Admin table: every article, drafts marked.
pub(super) fn print_admin_table(articles: &[Article]) {
    if articles.is_empty() {
        println!("No articles found.");
        return;
    }
    let now = Utc::now();
    for article in articles {
        let row = render_row(article, "  ", now);
        let id = format!("{:<10}", truncate_to_width(&article.id, 10));
        if article.published {
            println!("{} {}", id.dimmed(), row);
        } else {
            println!("{} {} {}", id.dimmed(), row, DRAFT_MARKER.red());
        }
    }
}

pub(super) fn print_article(article: &Article) {
    println!("{}", article.title.bold());
    println!(
        "{} | {} | {}",
        article.category.yellow(),
        article.author,
        article.date_portion().dimmed()
    );
    if !article.keywords.is_empty() {
        println!("{}", article.keywords.join(", ").dimmed());
    }
    println!("--------------------------------");
    println!("{}", article.content);
}

fn render_row(article: &Article, prefix: &str, now: DateTime<Utc>) -> String {
    let category = format!(
        "{:<width$}",
        truncate_to_width(&article.category, CATEGORY_WIDTH),
        width = CATEGORY_WIDTH
    );
    let time = format_time_ago(article.published_at(), now);

    let fixed = prefix.width() + CATEGORY_WIDTH + 1 + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let title = truncate_to_width(&article.title, available);
    let padding = available.saturating_sub(title.width());

    format!(
        "{}{} {}{}{}",
        prefix,
        category.cyan(),
        title,
        " ".repeat(padding),
        time.dimmed()
    )
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let text = match timestamp {
        Some(ts) => {
            let duration = now.signed_duration_since(ts);
            Formatter::new().convert(duration.to_std().unwrap_or_default())
        }
        None => "unknown date".to_string(),
    };
    format!("{:>width$}", text, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("車車車車", 5).width(), 5);
    }

    #[test]
    fn time_column_is_right_aligned() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        let then = Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap();
        let text = format_time_ago(Some(then), now);
        assert_eq!(text.width(), TIME_WIDTH);
        assert!(text.ends_with("2 days ago"));
        assert!(format_time_ago(None, now).ends_with("unknown date"));
    }
}
