use anyhow::{Context, Result};
use chatbox_core::error::Result as ChatResult;
use chatbox_core::llm::catalog;
use chatbox_core::{ChatController, ChatError, ChatEvent, NoticeLevel, SendOutcome};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::commands::{self, CommandResult, Target};
use crate::render;

// ── Single-prompt mode ──────────────────────────────────────────────────

pub async fn run_single_prompt(controller: &ChatController, prompt: &str) -> Result<()> {
    match controller.send_message(prompt).await? {
        SendOutcome::Delivered { reply, .. } => println!("{reply}"),
        SendOutcome::Discarded => {}
    }
    Ok(())
}

// ── Interactive mode ────────────────────────────────────────────────────

/// Print controller events until every controller handle is dropped.
pub fn spawn_event_printer(mut event_rx: mpsc::UnboundedReceiver<ChatEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            print_event(event);
        }
    })
}

/// Read commands from `input` until `/quit` or EOF. Sends run on their own
/// task so other commands stay usable while a reply is pending.
///
/// At EOF a pending reply is awaited; `/quit` abandons it.
pub async fn run_repl<R>(controller: Arc<ChatController>, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    print_banner(&controller).await;

    let mut pending: Option<JoinHandle<()>> = None;
    let mut quit = false;
    let mut lines = input.lines();
    loop {
        print_prompt();
        let Some(line) = lines.next_line().await.context("failed to read input")? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match commands::handle_command(input) {
            CommandResult::Quit => {
                quit = true;
                break;
            }
            CommandResult::NotACommand => {
                if controller.is_loading().await {
                    eprintln!("Still waiting for the previous reply.");
                    continue;
                }
                pending = Some(tokio::spawn(send(controller.clone(), input.to_string())));
            }
            other => apply_command(&controller, other).await,
        }
    }

    if let Some(handle) = pending {
        if quit {
            handle.abort();
        }
        let _ = handle.await;
    }
    Ok(())
}

async fn print_banner(controller: &ChatController) {
    let snapshot = controller.snapshot().await;
    println!(
        "Chatbox v{} - model: {}. Type /help for commands.",
        env!("CARGO_PKG_VERSION"),
        snapshot.selected_model.name
    );
    if !snapshot.can_send {
        print_key_hint(&snapshot.selected_model.provider);
    }
}

fn print_key_hint(provider: &chatbox_core::ProviderId) {
    println!(
        "No {} key configured. Use /key {} <secret> to add one.",
        provider.name(),
        provider.key()
    );
}

fn print_prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn print_event(event: ChatEvent) {
    match event {
        ChatEvent::Notify(notice) => {
            let tag = match notice.level {
                NoticeLevel::Info => "info",
                NoticeLevel::Error => "error",
            };
            eprintln!("[{tag}] {}: {}", notice.title, notice.description);
        }
        ChatEvent::Thinking => eprintln!("assistant is typing..."),
        ChatEvent::ReplyDiscarded { .. } => {
            eprintln!("(a reply arrived after its conversation was closed and was dropped)")
        }
        ChatEvent::Updated => {}
    }
}

async fn send(controller: Arc<ChatController>, content: String) {
    match controller.send_message(&content).await {
        Ok(SendOutcome::Delivered { .. }) => {
            let snapshot = controller.snapshot().await;
            if let Some(reply) = snapshot.messages.last() {
                println!("\n{}\n", render::render_message(reply));
                print_prompt();
            }
        }
        Ok(SendOutcome::Discarded) => {}
        // Reported through a notice.
        Err(ChatError::GateRejected { .. }) | Err(ChatError::SimulationFailed(_)) => {}
        Err(ChatError::SendInFlight) => eprintln!("Still waiting for the previous reply."),
        Err(e) => eprintln!("Error: {e}"),
    }
}

async fn apply_command(controller: &ChatController, result: CommandResult) {
    match result {
        CommandResult::Message(msg) => println!("{msg}"),
        CommandResult::NewConversation => {
            controller.new_conversation().await;
            println!("Started a new conversation.");
        }
        CommandResult::ListConversations => {
            let snapshot = controller.snapshot().await;
            println!(
                "{}",
                render::render_conversations(
                    &snapshot.conversations,
                    snapshot.active_conversation_id.as_deref()
                )
            );
        }
        CommandResult::SelectConversation(target) => match select(controller, target).await {
            Ok(title) => println!("Switched to: {title}"),
            Err(e) => eprintln!("Error: {e}"),
        },
        CommandResult::DeleteConversation(target) => match delete(controller, target).await {
            Ok(title) => println!("Deleted: {title}"),
            Err(e) => eprintln!("Error: {e}"),
        },
        CommandResult::ListModels => {
            let snapshot = controller.snapshot().await;
            println!(
                "{}",
                render::render_models(&catalog(), &snapshot.selected_model.id)
            );
        }
        CommandResult::ModelChanged(id) => match controller.change_model_by_id(&id).await {
            Ok(model) => {
                println!("Model changed to: {}", model.name);
                if !controller.can_send().await {
                    print_key_hint(&model.provider);
                }
            }
            Err(e) => eprintln!("Error: {e}"),
        },
        CommandResult::ShowKeys => {
            let snapshot = controller.snapshot().await;
            println!("{}", render::render_keys(&snapshot.api_keys));
        }
        CommandResult::SetKey { provider, secret } => {
            let mut keys = controller.snapshot().await.api_keys;
            keys.update(&provider, secret);
            controller.save_api_keys(keys).await;
        }
        CommandResult::Quit | CommandResult::NotACommand => {}
    }
}

/// Map a `/list` position or raw id to `(id, title)`.
async fn resolve(controller: &ChatController, target: Target) -> ChatResult<(String, String)> {
    let snapshot = controller.snapshot().await;
    let found = match &target {
        Target::Index(n) => n.checked_sub(1).and_then(|i| snapshot.conversations.get(i)),
        Target::Id(id) => snapshot.conversations.iter().find(|c| &c.id == id),
    };
    found
        .map(|c| (c.id.clone(), c.title.clone()))
        .ok_or_else(|| {
            let key = match target {
                Target::Index(n) => n.to_string(),
                Target::Id(id) => id,
            };
            ChatError::not_found("Conversation", key)
        })
}

async fn select(controller: &ChatController, target: Target) -> ChatResult<String> {
    let (id, title) = resolve(controller, target).await?;
    controller.select_conversation(&id).await?;
    Ok(title)
}

async fn delete(controller: &ChatController, target: Target) -> ChatResult<String> {
    let (id, title) = resolve(controller, target).await?;
    controller.delete_conversation(&id).await?;
    Ok(title)
}
