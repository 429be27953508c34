//! Drive the launcher from a terminal: type `j` to toggle press mode, then
//! `a`/`d` (followed by Enter) to fling the carousel. EOF quits.
//!
//! ```bash
//! RUST_LOG=kiosk_carousel=debug cargo run --example stdin_launcher
//! ```

use std::io::BufRead;

use kiosk_carousel::prelude::*;

fn main() -> Result<(), LauncherError> {
    let launcher = Launcher::new().on_event(|event| match event {
        CarouselEvent::PressModeChanged(true) => println!("Press mode enabled (A/D to scroll)"),
        CarouselEvent::PressModeChanged(false) => println!("Press mode disabled"),
        CarouselEvent::CenterChanged { index } => println!("Current app: {}", index),
    });

    let sender = launcher.sender();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            for c in line.chars() {
                if sender.send(Event::char(c)).is_err() {
                    return;
                }
            }
        }
    });

    launcher.run()
}
