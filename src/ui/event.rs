//! Event handling module for the application
//!
//! Terminal input is polled on a background thread and forwarded through a
//! channel, interleaved with regular ticks that drive the fade-in
//! animation. The main thread handles one event at a time, so every state
//! change runs to completion before the next input is seen.
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEventKind};
use log::error;

/// Events that can be processed by the application
#[derive(Debug, Clone, Copy)]
pub enum Event
{
    /// Regular time tick for animations
    Tick,
    /// Key press
    Key(KeyEvent),
    /// Mouse wheel moved down
    ScrollDown,
    /// Mouse wheel moved up
    ScrollUp,
    /// Terminal resize event with new dimensions
    Resize(u16, u16),
}

/// Handles terminal events
///
/// Polls crossterm on a separate thread and provides a way to receive
/// events through a channel.
pub struct EventHandler
{
    /// Receiver side of the event channel
    event_receiver: mpsc::Receiver<Event>,
    /// Sender for shutting the thread down gracefully
    // The receiver is moved to the thread
    shutdown_sender: mpsc::Sender<()>,
    /// Handle to join the thread on drop
    // Option so the handle can be moved out in `drop`
    thread_handle: Option<JoinHandle<()>>,
}

impl EventHandler
{
    /// Creates a new event handler with the specified tick rate
    ///
    /// # Arguments
    ///
    /// * `tick_rate` - The duration between tick events
    #[must_use]
    pub fn new(tick_rate: Duration) -> Self
    {
        let (event_sender, event_receiver) = mpsc::channel();
        let (shutdown_sender, shutdown_receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            let mut last_tick = Instant::now();

            loop
            {
                if shutdown_receiver.try_recv().is_ok()
                {
                    break;
                }

                // If more time than tick_rate has passed, don't wait at all
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());

                let polled = match event::poll(timeout)
                {
                    Ok(ready) => ready,
                    Err(err) =>
                    {
                        error!("Error polling events: {err}");
                        break;
                    }
                };

                if polled
                {
                    let forwarded = match event::read()
                    {
                        // Only presses; releases and repeats would double up input
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press =>
                        {
                            Some(Event::Key(key))
                        }
                        Ok(CrosstermEvent::Mouse(mouse)) => match mouse.kind
                        {
                            MouseEventKind::ScrollDown => Some(Event::ScrollDown),
                            MouseEventKind::ScrollUp => Some(Event::ScrollUp),
                            _ => None,
                        },
                        Ok(CrosstermEvent::Resize(width, height)) =>
                        {
                            Some(Event::Resize(width, height))
                        }
                        Ok(_) => None,
                        Err(err) =>
                        {
                            error!("Error reading event: {err}");
                            break;
                        }
                    };

                    // Break the loop if sending fails (receiver dropped)
                    if let Some(event) = forwarded
                    {
                        if event_sender.send(event).is_err()
                        {
                            break;
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate
                {
                    if event_sender.send(Event::Tick).is_err()
                    {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            event_receiver,
            shutdown_sender,
            thread_handle: Some(handle),
        }
    }

    /// Gets the next event from the event channel
    ///
    /// This method blocks until an event is available
    ///
    /// # Errors
    ///
    /// Returns an error if the channel is disconnected.
    pub fn next(&self) -> Result<Event>
    {
        self.event_receiver
            .recv()
            .context("Event channel disconnected")
    }
}

impl Drop for EventHandler
{
    fn drop(&mut self)
    {
        // Ignore if already closed
        let _ = self.shutdown_sender.send(());

        if let Some(handle) = self.thread_handle.take()
        {
            let _ = handle.join();
        }
    }
}
