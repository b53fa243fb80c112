//! [`HidTransport`] over a `usb-device` stack with a `usbd-hid` keyboard class.

use core::cell::RefCell;

use usb_device::bus::UsbBus;
use usb_device::device::{UsbDevice, UsbDeviceState};
use usbd_hid::descriptor::KeyboardReport;
use usbd_hid::hid_class::HIDClass;

use crate::sequencer::HidTransport;
use crate::types::KeyReport;

/// Boot-style keyboard on a polled USB device.
///
/// The device is polled on every readiness check, so the startup
/// [`wait_until_ready`](crate::MacroSequencer::wait_until_ready) loop is what
/// drives enumeration. Outside of moves the host loop should also call
/// [`poll`](Self::poll) each cycle.
///
/// A report the endpoint cannot take right away is dropped, the same as a
/// send attempted while not ready.
pub struct UsbKeyboard<'a, B: UsbBus> {
    device: RefCell<UsbDevice<'a, B>>,
    class: RefCell<HIDClass<'a, B>>,
}

impl<'a, B: UsbBus> UsbKeyboard<'a, B> {
    /// Wraps a built device and its keyboard class.
    ///
    /// The class should be created with `KeyboardReport::desc()`.
    pub fn new(device: UsbDevice<'a, B>, class: HIDClass<'a, B>) -> Self {
        Self {
            device: RefCell::new(device),
            class: RefCell::new(class),
        }
    }

    /// Services the USB stack once.
    ///
    /// # Returns
    /// `true` if the host is configured and reports can be sent.
    pub fn poll(&self) -> bool {
        let mut device = self.device.borrow_mut();
        let mut class = self.class.borrow_mut();
        device.poll(&mut [&mut *class]);
        device.state() == UsbDeviceState::Configured
    }

    /// Releases the device and class.
    pub fn into_parts(self) -> (UsbDevice<'a, B>, HIDClass<'a, B>) {
        (self.device.into_inner(), self.class.into_inner())
    }

    fn push(&self, report: &KeyboardReport) {
        if self.class.borrow().push_input(report).is_err() {
            #[cfg(feature = "defmt")]
            defmt::trace!("endpoint busy, report dropped");
        }
    }
}

impl<B: UsbBus> HidTransport for UsbKeyboard<'_, B> {
    fn is_ready(&self) -> bool {
        self.poll()
    }

    fn send_keys(&mut self, report: &KeyReport) {
        self.push(&KeyboardReport::from(report));
    }

    fn release_all(&mut self) {
        self.push(&KeyboardReport::from(&KeyReport::EMPTY));
    }
}
