use std::error::Error;

use text_to_mouth::{Viseme, map_text, preview};

pub fn handle_map(text: &str, as_json: bool, raw: bool) -> Result<(), Box<dyn Error>> {
    let shapes: Vec<Viseme> = if raw { map_text(text) } else { preview(text) };

    if as_json {
        println!("{}", serde_json::to_string(&shapes)?);
    } else {
        let line = shapes
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}", line);
    }
    Ok(())
}
