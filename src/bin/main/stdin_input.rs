use std::{
    io::{self, BufRead},
    sync::mpsc::{self, Receiver, TryRecvError},
    thread,
};

use log::{debug, warn};
use redreader_core::input::{InputEvent, QueuedInput};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Command {
    Input(InputEvent),
    Quit,
}

pub(super) const HELP: &str =
    "p play/pause  b back 10  f forward 10  +/- speed  1-3 presets  q quit";

pub(super) fn parse_command(line: &str) -> Option<Command> {
    let command = match line.trim() {
        "p" | "" => Command::Input(InputEvent::TogglePlay),
        "b" => Command::Input(InputEvent::SeekBack),
        "f" => Command::Input(InputEvent::SeekForward),
        "+" => Command::Input(InputEvent::SpeedUp),
        "-" => Command::Input(InputEvent::SpeedDown),
        "1" => Command::Input(InputEvent::SpeedPreset(0)),
        "2" => Command::Input(InputEvent::SpeedPreset(1)),
        "3" => Command::Input(InputEvent::SpeedPreset(2)),
        "q" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Line commands read on a background thread and handed to the tick loop.
pub(super) struct StdinCommands {
    rx: Receiver<Command>,
}

impl StdinCommands {
    pub(super) fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                match parse_command(&line) {
                    Some(command) => {
                        if tx.send(command).is_err() {
                            break;
                        }
                    }
                    None => warn!("input: unknown command {:?}", line.trim()),
                }
            }
            debug!("input: stdin closed");
        });

        Self { rx }
    }

    /// Moves every received command into `input`. Returns `false` once the
    /// reader should quit, either on `q` or when stdin is closed.
    pub(super) fn forward(&self, input: &mut QueuedInput) -> bool {
        forward_from(&self.rx, input)
    }
}

fn forward_from(rx: &Receiver<Command>, input: &mut QueuedInput) -> bool {
    loop {
        match rx.try_recv() {
            Ok(Command::Input(event)) => {
                input.push(event);
            }
            Ok(Command::Quit) | Err(TryRecvError::Disconnected) => return false,
            Err(TryRecvError::Empty) => return true,
        }
    }
}
