//! Application layer for the Hawkins signal terminal.
//!
//! Pure state machines and a generic runtime, enabling deterministic
//! simulation testing with the same code that runs in the terminal.
//!
//! # Components
//!
//! - [`Session`]: the state store (sanity, possession, transmission, gestures)
//! - [`MorseEncoder`]: cancellable timed transmission
//! - [`SanityWatch`] and [`Alarm`]: time-driven drain, watchdog and warning
//! - [`App`]: routes input and time to the above
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod alarm;
mod app;
mod change;
mod driver;
mod encoder;
mod event;
mod input;
pub mod recovery;
mod runtime;
mod session;
pub mod view;
mod watch;

pub use action::AppAction;
pub use alarm::Alarm;
pub use app::App;
pub use change::{EndCause, SessionChange};
pub use driver::Driver;
pub use encoder::MorseEncoder;
pub use event::AppEvent;
pub use input::KeyInput;
pub use recovery::Gesture;
pub use runtime::Runtime;
pub use session::{Session, SessionSnapshot, SubscriptionId};
pub use watch::SanityWatch;
