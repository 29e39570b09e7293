use std::env;

use wordfeud_client::{BoardType, ClientConfig, Error, Rejection, Ruleset, WordfeudClient};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let client = WordfeudClient::new(ClientConfig::from_env()?)?;

    let invitee = env::args()
        .nth(1)
        .ok_or("usage: invite_example <username> [ruleset] [normal|random]")?;
    let ruleset: Ruleset = match env::args().nth(2) {
        Some(arg) => arg.parse()?,
        None => Ruleset::English,
    };
    let board_type: BoardType = match env::args().nth(3) {
        Some(arg) => arg.parse()?,
        None => BoardType::default(),
    };

    let found = client.search_user(&invitee)?;
    println!("Search results for {}: {}", invitee, found);

    match client.invite(&invitee, ruleset, board_type) {
        Ok(content) => println!(
            "Invited {} (ruleset {} = {}, board type {} = {}): {}",
            invitee,
            ruleset,
            ruleset.code(),
            board_type,
            board_type.code(),
            content
        ),
        Err(Error::Rejected(Rejection::DuplicateInvite)) => {
            println!("{} already has an invite from you", invitee)
        }
        Err(e) => return Err(e.into()),
    }

    // Accept whatever invites are waiting for us
    let status = client.status()?;
    let invite_ids: Vec<i64> = status
        .get("invites_received")
        .and_then(|invites| invites.as_array())
        .map(|invites| {
            invites
                .iter()
                .filter_map(|invite| invite.get("id").and_then(|id| id.as_i64()))
                .collect()
        })
        .unwrap_or_default();

    for invite_id in invite_ids {
        match client.accept_invite(invite_id) {
            Ok(()) => println!("Accepted invite {}", invite_id),
            Err(e) => println!("Could not accept invite {}: {}", invite_id, e),
        }
    }

    Ok(())
}
