//! GPIO-backed indicator panel.
//!
//! Four LEDs plus the buzzer, each on its own push-pull output.  Generic
//! over [`embedded_hal::digital::OutputPin`] so the same driver runs on
//! real GPIOs and on mock pins in host tests.

use embedded_hal::digital::{OutputPin, PinState};

use crate::app::ports::PanelPort;
use crate::panel::PanelFrame;

/// Drives the five panel outputs from a rendered [`PanelFrame`].
pub struct GpioPanel<P: OutputPin> {
    run: P,
    warn: P,
    fault: P,
    done: P,
    buzzer: P,
}

impl<P: OutputPin> GpioPanel<P> {
    /// All outputs are driven low immediately.
    pub fn new(mut run: P, mut warn: P, mut fault: P, mut done: P, mut buzzer: P) -> Self {
        let _ = run.set_low();
        let _ = warn.set_low();
        let _ = fault.set_low();
        let _ = done.set_low();
        let _ = buzzer.set_low();
        Self {
            run,
            warn,
            fault,
            done,
            buzzer,
        }
    }
}

impl<P: OutputPin> PanelPort for GpioPanel<P> {
    fn apply(&mut self, frame: &PanelFrame) {
        // A failed pin write leaves that channel stale for one tick; the
        // next frame rewrites every channel anyway.
        let _ = self.run.set_state(PinState::from(frame.run));
        let _ = self.warn.set_state(PinState::from(frame.warn));
        let _ = self.fault.set_state(PinState::from(frame.fault));
        let _ = self.done.set_state(PinState::from(frame.done));
        let _ = self.buzzer.set_state(PinState::from(frame.buzzer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Records the last driven level.
    #[derive(Debug, Default, Clone, Copy)]
    struct MockPin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn construction_drives_all_low() {
        let panel = GpioPanel::new(
            MockPin { high: true },
            MockPin { high: true },
            MockPin { high: true },
            MockPin { high: true },
            MockPin { high: true },
        );
        assert!(!panel.run.high);
        assert!(!panel.buzzer.high);
    }

    #[test]
    fn apply_mirrors_frame() {
        let mut panel = GpioPanel::new(
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
            MockPin::default(),
        );
        let frame = PanelFrame {
            run: true,
            warn: false,
            fault: true,
            done: false,
            buzzer: true,
        };
        panel.apply(&frame);
        assert!(panel.run.high);
        assert!(!panel.warn.high);
        assert!(panel.fault.high);
        assert!(!panel.done.high);
        assert!(panel.buzzer.high);
    }
}
