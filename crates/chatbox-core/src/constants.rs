//! Centralized constants: storage keys, limits and canned text.

// ─── Storage ──────────────────────────────────────────────────────────────────

pub mod storage {
    /// Key of the provider → secret JSON object.
    pub const API_KEYS_KEY: &str = "ai-chat-api-keys";
    /// Key of the conversation summary JSON array.
    pub const CONVERSATIONS_KEY: &str = "ai-chat-conversations";
    /// Directory name under the platform config/data dirs.
    pub const APP_DIR: &str = "chatbox";
}

// ─── Conversations ────────────────────────────────────────────────────────────

pub mod conversation {
    /// Titles keep this many characters of the first message.
    pub const TITLE_MAX_CHARS: usize = 50;
    pub const TITLE_ELLIPSIS: &str = "...";
}

// ─── Simulator ────────────────────────────────────────────────────────────────

pub mod simulator {
    pub const MIN_DELAY_MS: u64 = 1000;
    pub const MAX_DELAY_MS: u64 = 3000;

    pub const OPENINGS: &[&str] = &[
        "Hi! I'm your AI assistant. How can I help you today?",
        "I understand your question. Let me think about the best answer for you.",
        "That's an excellent question. Based on what I know, I can tell you that...",
        "Thanks for sharing that with me. My suggestion would be...",
        "Interesting point of view. From my perspective as an AI...",
    ];

    pub const DISCLAIMER: &str = "This is a simulated response because the app is running in demo mode. To use real models, configure your API key in the settings.";
}

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    pub const DEFAULT_MODEL: &str = "gpt-4-turbo";
}

// ─── Notifications ────────────────────────────────────────────────────────────

pub mod notices {
    pub const KEY_REQUIRED_TITLE: &str = "API key required";
    pub const KEY_REQUIRED_BODY: &str = "Please configure your API key in the settings.";
    pub const SEND_FAILED_TITLE: &str = "Error";
    pub const SEND_FAILED_BODY: &str = "There was a problem processing your message.";
    pub const KEYS_SAVED_TITLE: &str = "Settings saved";
    pub const KEYS_SAVED_BODY: &str = "Your API keys were saved.";
}
