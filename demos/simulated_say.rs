use std::time::Duration;

use text_to_mouth::{ConsoleOpener, LinkOptions, MouthLink, preview};

fn main() {
    println!("Text To Mouth Library Example");
    println!("=============================");

    let text = "Hello! This is a simulated mouth.";
    let shapes: Vec<String> = preview(text).iter().map(|v| v.to_string()).collect();
    println!("Shapes for {:?}: {}", text, shapes.join(" "));
    println!();

    // nothing to reset on the console face
    let options = LinkOptions {
        settle: Duration::ZERO,
        ..LinkOptions::default()
    };
    let mut mouth = MouthLink::with_options(ConsoleOpener, options).enter("face", 9600);
    if !mouth.connected() {
        eprintln!("Could not open the simulated face");
        return;
    }

    mouth.animate(text);
    // a second request while the first is running is dropped
    mouth.animate("This is ignored.");
    mouth.wait();

    println!("Example completed successfully!");
}
