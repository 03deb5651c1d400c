// Idle screensaver - "Touch to Start" overlay after inactivity
//
// Independent of whichever screen is showing. Every qualifying input signal
// restarts the idle timer; when the timer fires without an intervening
// reset, the overlay is shown. The next input hides it and restarts the
// timer.
//
// Each restart bumps a generation counter and the timer message carries the
// generation it was armed with, so a tick that raced a reset is ignored.

use crate::events::{AppEvent, InputSignal};
use crate::timer::{TimerId, TimerSet};
use std::time::Duration;
use tokio::sync::mpsc;

/// Idle threshold used when the configured one is zero
pub const DEFAULT_IDLE_THRESHOLD: Duration = Duration::from_millis(30_000);

/// Idle timer message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleTick {
    pub generation: u64,
}

/// What the caller should do with an input after the screensaver saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Normal input: pass it on to the screen underneath
    PassThrough,
    /// The input woke the kiosk; the overlay swallowed it
    Dismissed,
}

pub struct Screensaver {
    threshold: Duration,
    idle: bool,
    generation: u64,
    timer: Option<TimerId>,
    timers: TimerSet<AppEvent>,
}

impl Screensaver {
    /// Install the screensaver and start the idle timer
    ///
    /// Must be called from within a tokio runtime. A zero threshold would
    /// blank the kiosk on every frame, so it falls back to the default.
    pub fn mount(threshold: Duration, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        let threshold = if threshold.is_zero() {
            tracing::warn!(
                "Idle threshold of zero, using {:?}",
                DEFAULT_IDLE_THRESHOLD
            );
            DEFAULT_IDLE_THRESHOLD
        } else {
            threshold
        };
        let mut saver = Self {
            threshold,
            idle: false,
            generation: 0,
            timer: None,
            timers: TimerSet::new(tx),
        };
        saver.reset();
        saver
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn is_idle(&self) -> bool {
        self.idle
    }

    /// Clear idle and restart the timer from zero
    pub fn reset(&mut self) {
        if let Some(id) = self.timer.take() {
            self.timers.cancel(id);
        }
        self.idle = false;
        self.generation += 1;
        let tick = IdleTick {
            generation: self.generation,
        };
        self.timer = Some(self.timers.schedule(self.threshold, tick));
    }

    /// Any qualifying input signal
    pub fn on_input(&mut self, signal: InputSignal) -> InputOutcome {
        let was_idle = self.idle;
        self.reset();
        if was_idle {
            tracing::debug!("Screensaver dismissed by {:?}", signal);
            InputOutcome::Dismissed
        } else {
            InputOutcome::PassThrough
        }
    }

    /// Idle timer fired; returns true if the overlay is now shown
    pub fn on_tick(&mut self, tick: IdleTick) -> bool {
        if tick.generation != self.generation || self.idle {
            return false;
        }
        self.timer = None;
        self.idle = true;
        tracing::debug!("Kiosk idle after {:?}", self.threshold);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    async fn run_for(
        saver: &mut Screensaver,
        rx: &mut mpsc::UnboundedReceiver<AppEvent>,
        ms: u64,
    ) {
        settle().await;
        tokio::time::advance(Duration::from_millis(ms)).await;
        settle().await;
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::Idle(tick) = event {
                saver.on_tick(tick);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn overlay_after_threshold_and_click_dismisses() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut saver = Screensaver::mount(Duration::from_millis(20_000), tx);

        run_for(&mut saver, &mut rx, 19_999).await;
        assert!(!saver.is_idle());

        run_for(&mut saver, &mut rx, 1).await;
        assert!(saver.is_idle());

        assert_eq!(
            saver.on_input(InputSignal::PointerPress),
            InputOutcome::Dismissed
        );
        assert!(!saver.is_idle());

        // Timer restarted from the tap
        run_for(&mut saver, &mut rx, 19_999).await;
        assert!(!saver.is_idle());
        run_for(&mut saver, &mut rx, 1).await;
        assert!(saver.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn input_resets_elapsed_time() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut saver = Screensaver::mount(Duration::from_millis(1_000), tx);

        for _ in 0..5 {
            run_for(&mut saver, &mut rx, 900).await;
            assert_eq!(
                saver.on_input(InputSignal::PointerMove),
                InputOutcome::PassThrough
            );
        }
        assert!(!saver.is_idle());

        run_for(&mut saver, &mut rx, 1_000).await;
        assert!(saver.is_idle());
        assert_eq!(
            saver.on_input(InputSignal::KeyPress),
            InputOutcome::Dismissed
        );
        assert!(!saver.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_threshold_falls_back_to_default() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut saver = Screensaver::mount(Duration::ZERO, tx);
        assert_eq!(saver.threshold(), DEFAULT_IDLE_THRESHOLD);

        run_for(&mut saver, &mut rx, 29_999).await;
        assert!(!saver.is_idle());
        run_for(&mut saver, &mut rx, 1).await;
        assert!(saver.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_tick_is_ignored() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut saver = Screensaver::mount(DEFAULT_IDLE_THRESHOLD, tx);
        saver.on_input(InputSignal::TouchStart);
        assert!(!saver.on_tick(IdleTick { generation: 1 }));
        assert!(!saver.is_idle());
        assert!(saver.on_tick(IdleTick { generation: 2 }));
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_cancels_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let saver = Screensaver::mount(Duration::from_millis(100), tx);
        drop(saver);
        tokio::time::advance(Duration::from_millis(500)).await;
        settle().await;
        assert!(rx.try_recv().is_err());
    }
}
