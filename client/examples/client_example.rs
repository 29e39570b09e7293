use std::env;

use wordfeud_client::{ClientConfig, Resignation, WordfeudClient};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Host, user agent and an optional session to resume come from WORDFEUD_* variables
    let config = ClientConfig::from_env()?;
    let resuming = config.session_token.is_some();
    let mut client = WordfeudClient::new(config)?;
    println!("Talking to {}", client.config().api_base);

    if !resuming {
        let email = env::var("WORDFEUD_EMAIL")?;
        let password = env::var("WORDFEUD_PASSWORD")?;
        let user = client.login_email(&email, &password)?;
        println!("Logged in: {}", user);
    }

    if let Some(token) = client.session_token() {
        println!("Resume later with WORDFEUD_SESSION_ID={}", token);
    }

    // Pending invites, running games and friends
    let status = client.status()?;
    println!("Status: {}", status);

    let games = client.games()?;
    let game_ids: Vec<i64> = games
        .as_array()
        .map(|games| {
            games
                .iter()
                .filter_map(|game| game.get("id").and_then(|id| id.as_i64()))
                .collect()
        })
        .unwrap_or_default();
    println!("{} running games: {:?}", game_ids.len(), game_ids);

    if let Some(&game_id) = game_ids.first() {
        let game = client.game(game_id)?;
        println!("Game {}: {}", game_id, game);

        let messages = client.chat_messages(game_id)?;
        println!("Chat in game {}: {}", game_id, messages);

        // Server rejections come back as errors carrying the reason
        match client.skip_turn(game_id) {
            Ok(_) => println!("Passed in game {}", game_id),
            Err(e) => println!("Could not pass: {:?}", e.discriminator()),
        }

        // ...except for resigning, which reports a refusal as a value
        if env::var("WORDFEUD_RESIGN").is_ok() {
            match client.resign(game_id)? {
                Resignation::Resigned => println!("Resigned game {}", game_id),
                Resignation::Refused(reason) => println!("Resign refused: {}", reason),
            }
        }
    }

    let friends = client.friends()?;
    println!("Friends: {}", friends);

    client.logout();
    println!("Logged out");

    Ok(())
}
