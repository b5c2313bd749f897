mod countdown;
mod session;

pub use countdown::{Countdown, Tick};
pub use session::{Phase, PomodoroTimer};
