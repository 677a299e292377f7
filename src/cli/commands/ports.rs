use std::error::Error;

use text_to_mouth::list_ports;

pub fn handle_ports(as_json: bool) -> Result<(), Box<dyn Error>> {
    let ports = list_ports()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&ports)?);
        return Ok(());
    }

    if ports.is_empty() {
        println!("No serial ports found.");
    } else {
        println!("Available serial ports:");
        for port in &ports {
            println!("  {} - {}", port.name, port.kind);
        }
    }
    Ok(())
}
