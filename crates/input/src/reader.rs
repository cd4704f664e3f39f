//! Background thread reading terminal events.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};

use crate::map::{should_quit, transition_for};
use crate::queue::{InputEvent, KeySender};
use crate::release::ReleaseTimeout;

/// How long one poll waits before checking for timed-out keys.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Start the input thread.
///
/// The thread exits after forwarding a quit request, when the queue's consumer
/// has gone away, or on a terminal read error.
pub fn spawn_reader(sender: KeySender, release: ReleaseTimeout) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("blocky-input".into())
        .spawn(move || {
            if let Err(e) = run_reader(&sender, release) {
                log::warn!("input thread stopped: {e}");
                sender.send(InputEvent::Quit);
            }
        })
}

fn run_reader(sender: &KeySender, mut release: ReleaseTimeout) -> io::Result<()> {
    loop {
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release && should_quit(key) {
                    sender.send(InputEvent::Quit);
                    return Ok(());
                }
                if let Some(transition) = transition_for(key) {
                    release.observe(transition, Instant::now());
                    if !sender.key(transition) {
                        return Ok(());
                    }
                }
            }
        }

        for transition in release.expire(Instant::now()) {
            log::trace!("synthesized release of {:?}", transition.key);
            if !sender.key(transition) {
                return Ok(());
            }
        }
    }
}
