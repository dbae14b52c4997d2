use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::mpsc;

use peerchat_api::ApiError;
use peerchat_client::{
    ChatController, ClientError, SendOutcome, StartupStatus, StateEvent,
};
use peerchat_types::Message;

/// Run the interactive chat loop.
pub async fn run(
    controller: ChatController,
    mut events: mpsc::UnboundedReceiver<StateEvent>,
    server: &str,
) -> Result<()> {
    println!("{}", "💬 Peerchat".bright_cyan().bold());
    println!("{}", format!("Server: {}", server).bright_black());
    println!(
        "{}",
        "Type /help for commands, 'exit' or 'quit' to leave\n".bright_black()
    );

    match controller.startup().await {
        Ok(StartupStatus::SignedIn(user)) => {
            println!("{} Welcome back, {}!", "✓".bright_green(), user.username.bright_green().bold());
        }
        Ok(StartupStatus::Anonymous) => {
            println!("{}", "Sign in with /login <user> <pass> or /register <user> <pass>".bright_black());
        }
        Err(e) => {
            eprintln!(
                "{} Could not validate the stored session: {}",
                "⚠️".yellow(),
                e
            );
        }
    }
    drain_notices(&mut events);

    let mut rl = DefaultEditor::new()?;

    loop {
        let prompt = prompt_for(&controller).await;
        let readline = rl.readline(&prompt);

        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                if line == "exit" || line == "quit" {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }
                rl.add_history_entry(&line)?;
                dispatch(&controller, &line).await;
                drain_notices(&mut events);
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    Ok(())
}

async fn prompt_for(controller: &ChatController) -> String {
    match controller.current_user().await {
        Some(me) => match controller.selected_peer().await {
            Some(peer) => format!(
                "{} {} ",
                format!("[{} → {}]", me.username, peer.username).bright_magenta(),
                ">".bright_green().bold()
            ),
            None => format!(
                "{} {} ",
                format!("[{}]", me.username).bright_magenta(),
                ">".bright_green().bold()
            ),
        },
        None => format!("{} ", "[signed out] >".bright_black()),
    }
}

async fn dispatch(controller: &ChatController, line: &str) {
    if let Some(rest) = line.strip_prefix("/login ") {
        auth(controller, rest, false).await;
    } else if let Some(rest) = line.strip_prefix("/register ") {
        auth(controller, rest, true).await;
    } else if line == "/users" {
        show_users(controller).await;
    } else if let Some(name) = line.strip_prefix("/chat ") {
        open_chat(controller, name.trim()).await;
    } else if line == "/refresh" {
        match controller.refresh_peers().await {
            Ok(()) => show_users(controller).await,
            Err(e) => report(controller, e).await,
        }
    } else if line == "/whoami" {
        match controller.current_user().await {
            Some(me) => println!("{} {} (id {})", "👤".bright_cyan(), me.username, me.id),
            None => println!("{}", "Not signed in".bright_black()),
        }
    } else if line == "/logout" {
        controller.logout().await;
        println!("{} Signed out", "✓".bright_green());
    } else if line == "/help" {
        print_help();
    } else if line == "/login" || line == "/register" {
        eprintln!("{} Usage: {} <username> <password>", "❌".bright_red(), line);
    } else if line == "/chat" {
        eprintln!("{} Usage: /chat <username>", "❌".bright_red());
    } else if line.starts_with('/') {
        eprintln!("{} Unknown command: {} (try /help)", "❌".bright_red(), line);
    } else {
        send(controller, line).await;
    }
}

async fn auth(controller: &ChatController, rest: &str, register: bool) {
    let mut parts = rest.split_whitespace();
    let (Some(username), Some(password)) = (parts.next(), parts.next()) else {
        let cmd = if register { "/register" } else { "/login" };
        eprintln!("{} Usage: {} <username> <password>", "❌".bright_red(), cmd);
        return;
    };

    let result = if register {
        controller.register(username, password).await
    } else {
        controller.login(username, password).await
    };

    match result {
        Ok(user) => {
            println!("{} Signed in as {}", "✓".bright_green(), user.username.bright_green().bold());
            show_users(controller).await;
        }
        Err(e) => eprintln!("{} {}", "❌".bright_red(), e),
    }
}

async fn show_users(controller: &ChatController) {
    let peers = controller.peers().await;
    if peers.is_empty() {
        println!("{}", "No other users yet".bright_black());
        return;
    }
    let selected = controller.selected_peer().await;
    println!("{} Users:", "👥".bright_cyan());
    for peer in peers {
        let marker = if selected.as_ref().map(|p| p.id) == Some(peer.id) {
            "●".bright_green()
        } else {
            "○".bright_black()
        };
        println!("  {} {}", marker, peer.username);
    }
    println!("{}", "Open a conversation with /chat <username>".bright_black());
}

async fn open_chat(controller: &ChatController, name: &str) {
    let Some(peer) = controller.find_peer(name).await else {
        eprintln!("{} No user named '{}' (try /users or /refresh)", "❌".bright_red(), name);
        return;
    };

    match controller.select_peer(peer.clone()).await {
        Ok(()) => {
            let me = controller.current_user().await;
            let conversation = controller.conversation().await;
            println!(
                "{} Conversation with {}:",
                "💬".bright_cyan(),
                peer.username.bright_blue().bold()
            );
            if conversation.is_empty() {
                println!("{}", "  (no messages yet)".bright_black());
            }
            for message in &conversation {
                print_message(message, me.as_ref().map(|u| u.username.as_str()));
            }
        }
        Err(e) => report(controller, e).await,
    }
}

async fn send(controller: &ChatController, content: &str) {
    match controller.send(content).await {
        Ok(SendOutcome::Sent) => {
            let me = controller.current_user().await;
            if let Some(message) = controller.conversation().await.last() {
                print_message(message, me.as_ref().map(|u| u.username.as_str()));
            }
        }
        Ok(SendOutcome::Skipped) => {
            if controller.selected_peer().await.is_none() {
                println!(
                    "{}",
                    "Select a user to start chatting (/users, /chat <username>)".bright_black()
                );
            }
        }
        Err(e) => report(controller, e).await,
    }
}

/// Print a controller error, distinguishing a forced sign-out from a
/// transient failure.
async fn report(_controller: &ChatController, error: ClientError) {
    match error {
        ClientError::Api(ApiError::Unauthorized) => {
            eprintln!("{} Session expired - signed out", "⚠️".yellow());
        }
        other => eprintln!("{} {}", "❌".bright_red(), other),
    }
}

fn print_message(message: &Message, me: Option<&str>) {
    let time = message
        .local_time()
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| message.timestamp.clone());
    let sender = if Some(message.sender.as_str()) == me {
        message.sender.bright_green().bold()
    } else {
        message.sender.bright_blue().bold()
    };
    println!("  {} {}: {}", time.bright_black(), sender, message.content);
}

fn print_help() {
    println!("{} Commands:", "💡".bright_cyan());
    println!("  /register <user> <pass>  - Create an account and sign in");
    println!("  /login <user> <pass>     - Sign in");
    println!("  /users                   - List users to chat with");
    println!("  /chat <username>         - Open a conversation");
    println!("  /refresh                 - Re-fetch the user list");
    println!("  /whoami                  - Show the signed-in user");
    println!("  /logout                  - Sign out");
    println!("  <text>                   - Send to the open conversation");
    println!("  exit, quit               - Leave");
}

fn drain_notices(events: &mut mpsc::UnboundedReceiver<StateEvent>) {
    while let Ok(event) = events.try_recv() {
        if let StateEvent::Transient(notice) = event {
            eprintln!("{} {}", "⚠️".yellow(), notice);
        }
    }
}
