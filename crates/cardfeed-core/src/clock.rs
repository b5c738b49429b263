//! Datetime display
//!
//! [`ClockTicker`] writes the current local date and time into the
//! [`Element::DateTime`] element once at start and then on every interval
//! tick until stopped.

use std::fmt::Display;
use std::time::Duration;

use chrono::{DateTime, Local, Locale, TimeZone};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::surface::{Element, SharedSurface, Surface};

/// Source of the current time
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Local>;

    /// Locale the time is displayed in
    fn locale(&self) -> Locale {
        Locale::POSIX
    }
}

/// Wall clock in the user's locale
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    locale: Locale,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            locale: system_locale(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn locale(&self) -> Locale {
        self.locale
    }
}

/// Locale of the running process, POSIX when unknown
pub fn system_locale() -> Locale {
    let Some(name) = sys_locale::get_locale() else {
        return Locale::POSIX;
    };

    parse_locale(&name).unwrap_or_else(|| {
        debug!(locale = %name, "Unsupported locale, using POSIX");
        Locale::POSIX
    })
}

/// Map `de-DE`, `de_DE.UTF-8` or `sr_RS@latin` style names to a locale
pub fn parse_locale(name: &str) -> Option<Locale> {
    let name = name.split(['.', '@']).next().unwrap_or(name).replace('-', "_");
    match name.as_str() {
        "" | "C" => Some(Locale::POSIX),
        name => Locale::try_from(name).ok(),
    }
}

/// `<date> <time>` in the locale's preferred representations
pub fn format_datetime<Tz>(now: &DateTime<Tz>, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{} {}",
        now.format_localized("%x", locale),
        now.format_localized("%X", locale)
    )
}

/// Write the current time to the datetime element once
///
/// A missing element is not an error for the clock; the write is skipped.
pub fn refresh<S: Surface, C: Clock + ?Sized>(surface: &SharedSurface<S>, clock: &C) {
    let text = format_datetime(&clock.now(), clock.locale());
    if let Err(e) = surface.lock().set_text(Element::DateTime, &text) {
        debug!("Skipping clock update: {}", e);
    }
}

/// Handle of a running clock task
#[derive(Debug)]
pub struct ClockTicker {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ClockTicker {
    /// Spawn the clock task on the current tokio runtime
    pub fn start<S, C>(surface: SharedSurface<S>, clock: C, interval: Duration) -> Self
    where
        S: Surface + Send + 'static,
        C: Clock,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            // First tick completes immediately
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => refresh(&surface, &clock),
                }
            }
            debug!("Clock task stopped");
        });

        info!(interval_ms = interval.as_millis() as u64, "Clock started");
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the task and wait for it to finish
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
