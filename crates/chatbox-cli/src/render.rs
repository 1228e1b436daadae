use chatbox_core::{AiModel, ApiKeys, Conversation, Message, ProviderId, Role};
use chrono::{DateTime, Local, Utc};

const PREVIEW_CHARS: usize = 40;

pub fn format_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Shorten `text` to `max` characters on a single line.
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max).collect();
        format!("{cut}...")
    }
}

pub fn render_message(message: &Message) -> String {
    let who = match message.role {
        Role::User => "you",
        Role::Assistant => "assistant",
    };
    format!(
        "[{}] {who}:\n{}",
        format_time(&message.timestamp),
        message.content
    )
}

pub fn render_conversations(conversations: &[Conversation], active_id: Option<&str>) -> String {
    if conversations.is_empty() {
        return "No conversations yet.".into();
    }

    conversations
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let marker = if Some(c.id.as_str()) == active_id { "*" } else { " " };
            format!(
                "{marker}{:>3}. {}  [{}]\n       {}",
                i + 1,
                c.title,
                format_date(&c.timestamp),
                preview(&c.last_message, PREVIEW_CHARS)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_models(models: &[AiModel], selected_id: &str) -> String {
    models
        .iter()
        .map(|m| {
            let marker = if m.id == selected_id { "*" } else { " " };
            format!(
                "{marker} {:<16} {} ({}) - {} [{:?}]",
                m.id, m.name, m.provider, m.description, m.tag
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per known provider. Secrets are never printed.
pub fn render_keys(keys: &ApiKeys) -> String {
    ProviderId::all()
        .into_iter()
        .map(|p| {
            let status = if keys.has_usable_key(p.key()) {
                "configured".to_string()
            } else {
                format!("not set (e.g. {})", p.placeholder())
            };
            format!("  {:<10} {:<22} {status}", p.key(), p.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
