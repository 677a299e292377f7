use std::error::Error;
use std::io;

use text_to_mouth::{ChatClient, Config, MouthLink, Opener, Session, UpstreamError};

pub fn handle_chat<O: Opener>(opener: O, config: &Config) -> Result<(), Box<dyn Error>> {
    let api_key = config.api_key.clone().ok_or(UpstreamError::MissingApiKey)?;
    let client = ChatClient::new(api_key)?
        .with_model(&config.model)
        .with_base_url(&config.base_url);
    println!("Using model: {} on {} ({} baud)", client.model(), config.port, config.baud);

    // Disconnects (and closes the mouth) however the session ends.
    let mut link = MouthLink::with_options(opener, config.link_options()).enter(&config.port, config.baud);

    let stdin = io::stdin();
    let stats = Session::new(&mut *link, client)
        .with_assistant_name(&config.assistant_name)
        .run(stdin.lock(), io::stdout())?;
    log::debug!(
        "{} prompts, {} replies, {} failed requests",
        stats.prompts,
        stats.replies,
        stats.failures
    );
    Ok(())
}
