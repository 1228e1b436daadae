use chatbox_core::ProviderId;

/// Which conversation a `/select` or `/delete` refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 1-based position in the `/list` output.
    Index(usize),
    Id(String),
}

impl Target {
    fn parse(arg: &str) -> Self {
        match arg.parse::<usize>() {
            Ok(n) if n > 0 => Target::Index(n),
            _ => Target::Id(arg.to_string()),
        }
    }
}

/// Result of processing a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Display a message to the user.
    Message(String),
    /// Quit the application.
    Quit,
    /// Start a fresh conversation.
    NewConversation,
    /// List saved conversations.
    ListConversations,
    SelectConversation(Target),
    DeleteConversation(Target),
    /// List the model catalog.
    ListModels,
    /// Change the model.
    ModelChanged(String),
    /// Show which providers have a key configured.
    ShowKeys,
    /// Store `secret` for `provider`. An empty secret clears it.
    SetKey { provider: String, secret: String },
    /// Not a command - treat as regular input.
    NotACommand,
}

pub fn handle_command(input: &str) -> CommandResult {
    let input = input.trim();
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/help" | "/h" => show_help(),
        "/exit" | "/quit" | "/q" => CommandResult::Quit,

        // Conversation commands
        "/new" => CommandResult::NewConversation,
        "/list" | "/conversations" | "/history" => CommandResult::ListConversations,
        "/select" | "/open" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /select <number|conversation-id>".into())
            } else {
                CommandResult::SelectConversation(Target::parse(arg))
            }
        }
        "/delete" | "/rm" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /delete <number|conversation-id>".into())
            } else {
                CommandResult::DeleteConversation(Target::parse(arg))
            }
        }

        // Model commands
        "/models" => CommandResult::ListModels,
        "/model" => {
            if arg.is_empty() {
                CommandResult::Message("Usage: /model <model-id>  (see /models)".into())
            } else {
                CommandResult::ModelChanged(arg.to_string())
            }
        }

        // Key commands
        "/keys" => CommandResult::ShowKeys,
        "/key" => parse_key(arg),

        "/version" => CommandResult::Message(format!("Chatbox v{}", env!("CARGO_PKG_VERSION"))),

        // Unknown command
        _ => {
            if input.starts_with('/') {
                CommandResult::Message(format!("Unknown command: {cmd}. Type /help for commands."))
            } else {
                CommandResult::NotACommand
            }
        }
    }
}

fn parse_key(arg: &str) -> CommandResult {
    let mut parts = arg.splitn(2, char::is_whitespace);
    let provider = parts.next().unwrap_or("").to_lowercase();
    let secret = parts.next().unwrap_or("").trim();

    if provider.is_empty() {
        let providers: Vec<&str> = ProviderId::all().iter().map(|p| p.key()).collect();
        return CommandResult::Message(format!(
            "Usage: /key <provider> <secret>\nProviders: {}",
            providers.join(", ")
        ));
    }
    if ProviderId::from_key(&provider).is_none() {
        return CommandResult::Message(format!("Unknown provider: {provider}"));
    }

    CommandResult::SetKey {
        provider,
        secret: secret.to_string(),
    }
}

fn show_help() -> CommandResult {
    let help_text = "\
╭─ Chatbox Commands ─────────────────────────────────────────────╮

  CONVERSATIONS
    /new                      Start a fresh conversation
    /list                     List saved conversations
    /select <n|id>            Make a conversation active
    /delete <n|id>            Delete a conversation

  MODELS
    /models                   List available models
    /model <id>               Change model

  API KEYS
    /keys                     Show configured providers
    /key <provider> <secret>  Save a key (empty secret clears it)

  OTHER
    /help, /h                 Show this help message
    /version                  Show version information
    /exit, /quit, /q          Quit the application

  Anything else is sent as a message.

╰────────────────────────────────────────────────────────────────╯";

    CommandResult::Message(help_text.into())
}
