use std::error::Error;

use text_to_mouth::{Config, LinkError, MouthLink, Opener};

pub fn handle_say<O: Opener>(opener: O, config: &Config, text: &str) -> Result<(), Box<dyn Error>> {
    let mut link = MouthLink::with_options(opener, config.link_options()).enter(&config.port, config.baud);
    if !link.connected() {
        return Err(LinkError::NotConnected.into());
    }

    println!("Saying: {}", text);
    if link.animate(text) {
        link.wait();
    }
    Ok(())
}
