use std::io::{self, BufRead};
use std::thread;
use std::time::Duration;

use reflex_core::config::GameConfig;
use reflex_core::gameplay::delay::RngDelay;
use reflex_core::gameplay::events::{GameEvent, RoundOutcome, Signal};
use reflex_core::gameplay::machine::GameMachine;
use reflex_core::input::events::{Command, InputEvent};
use reflex_core::input::{InputQueue, InputSender, Received};
use reflex_core::store::FileStore;
use reflex_core::time::clock::{Clock, SystemClock};
use reflex_core::Difficulty;

use crate::report;

pub fn run(
    config: GameConfig,
    store: FileStore,
    difficulty: Difficulty,
    rounds: u32,
) -> anyhow::Result<()> {
    let clock = SystemClock::new();
    let recent_window = config.recent_window;
    let mut machine = GameMachine::new(config, clock, RngDelay::from_thread_rng(), store);
    machine.select_difficulty(difficulty);

    let (sender, queue) = InputQueue::channel();
    spawn_stdin_reader(sender, clock)?;

    println!("Difficulty: {difficulty}. Press Enter on GO. `q` + Enter quits.");

    'rounds: for round in 1..=rounds {
        println!();
        println!("Round {round}/{rounds}: press Enter to start");
        if next_command(&queue) != Command::Tap {
            break;
        }

        render(&machine.start());
        while !machine.state().is_idle() {
            let timeout = machine
                .next_deadline()
                .map(|deadline| Duration::from_millis(deadline.saturating_sub(clock.now_ms())));

            match queue.pop_timeout(timeout) {
                Received::TimedOut => render(&machine.poll()),
                Received::Event(InputEvent {
                    command: Command::Tap,
                    timestamp,
                }) => {
                    // Judged against the state the player saw when the tap was read.
                    render(&machine.tap_at(timestamp));
                    render(&machine.poll());
                }
                Received::Event(InputEvent {
                    command: Command::Quit,
                    ..
                })
                | Received::Closed => {
                    println!("Round abandoned.");
                    break 'rounds;
                }
            }
        }
    }

    println!();
    print!("{}", report::stats(machine.record(), recent_window));
    Ok(())
}

fn next_command(queue: &InputQueue) -> Command {
    match queue.pop_timeout(None) {
        Received::Event(event) => event.command,
        Received::TimedOut | Received::Closed => Command::Quit,
    }
}

fn spawn_stdin_reader(sender: InputSender, clock: SystemClock) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let command = if line.trim().eq_ignore_ascii_case("q") {
                    Command::Quit
                } else {
                    Command::Tap
                };
                let event = InputEvent {
                    timestamp: clock.now_ms(),
                    command,
                };
                if !sender.push(event) || command == Command::Quit {
                    return;
                }
            }
            // EOF behaves like quitting.
            sender.push(InputEvent {
                timestamp: clock.now_ms(),
                command: Command::Quit,
            });
        })?;
    Ok(())
}

fn render(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::CountdownTick(n) => println!("  {n}..."),
            GameEvent::SignalChanged(Signal::Wait) => println!("  [ WAIT ]  red, hold it..."),
            GameEvent::SignalChanged(Signal::Go) => println!("  [  GO  ]  GREEN, press Enter!"),
            GameEvent::RoundFinished(RoundOutcome::TooEarly) => {
                println!("  Too early! You pressed before green.")
            }
            GameEvent::RoundFinished(RoundOutcome::Reacted {
                attempt,
                streak,
                new_best_streak,
            }) => {
                let best = if *new_best_streak { ", new best streak" } else { "" };
                println!(
                    "  {} ms  {}  (streak {streak}{best})",
                    attempt.reaction_time_ms, attempt.rank
                );
            }
            GameEvent::Haptic(pattern) => log::debug!("haptic {pattern:?}"),
            GameEvent::RecordReset => println!("  Record cleared."),
            GameEvent::ScreenChanged(screen) => log::debug!("screen {screen:?}"),
        }
    }
}
