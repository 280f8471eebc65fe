//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: session state machine
//! - [`Driver`]: Platform-specific I/O and clock

use hawkins_core::Beeper;

use crate::{App, AppAction, Driver};

/// Generic runtime that orchestrates an [`App`] through a [`Driver`].
///
/// Each cycle waits for input or the App's next deadline, whichever comes
/// first, feeds the event to the App and then ticks it. Every session
/// operation therefore completes before the next wait begins.
pub struct Runtime<D, B>
where
    D: Driver,
{
    driver: D,
    app: App<D::Instant, B>,
}

impl<D, B> Runtime<D, B>
where
    D: Driver,
    B: Beeper,
{
    /// Create a new runtime with the given driver and App.
    pub fn new(driver: D, app: App<D::Instant, B>) -> Self {
        Self { driver, app }
    }

    /// Run the main event loop until the App asks to quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let deadline = self.app.next_deadline();
        let event = self.driver.poll_event(deadline).await?;
        let now = self.driver.now();

        let mut actions = match event {
            Some(event) => self.app.handle(event, now),
            None => Vec::new(),
        };
        actions.extend(self.app.tick(now));

        self.process_actions(actions)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit. Consecutive render requests collapse
    /// into one frame.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        if actions.contains(&AppAction::Quit) {
            return Ok(true);
        }
        if actions.contains(&AppAction::Render) {
            self.driver.render(&self.app)?;
        }
        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App<D::Instant, B> {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App<D::Instant, B> {
        &mut self.app
    }

    /// Get a reference to the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Take the driver and App back.
    pub fn into_parts(self) -> (D, App<D::Instant, B>) {
        (self.driver, self.app)
    }
}
