//! HID keyboard usage IDs.
//!
//! Only the keys the reference layout binds are named here. Any other usage ID
//! can be wrapped directly with [`KeyCode`].

/// A single HID keyboard usage ID (usage page 0x07).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode(pub u8);

impl KeyCode {
    /// The "no key" usage; unused report slots carry this value.
    pub const NONE: KeyCode = KeyCode(0x00);

    /// Usage 0x04, letter A.
    pub const A: KeyCode = KeyCode(0x04);
    /// Usage 0x07, letter D.
    pub const D: KeyCode = KeyCode(0x07);
    /// Usage 0x0D, letter J.
    pub const J: KeyCode = KeyCode(0x0D);
    /// Usage 0x0E, letter K.
    pub const K: KeyCode = KeyCode(0x0E);
    /// Usage 0x10, letter M.
    pub const M: KeyCode = KeyCode(0x10);
    /// Usage 0x11, letter N.
    pub const N: KeyCode = KeyCode(0x11);
    /// Usage 0x16, letter S.
    pub const S: KeyCode = KeyCode(0x16);
    /// Usage 0x1A, letter W.
    pub const W: KeyCode = KeyCode(0x1A);
    /// Usage 0x33, `;` and `:`.
    pub const SEMICOLON: KeyCode = KeyCode(0x33);
    /// Usage 0x36, `,` and `<`.
    pub const COMMA: KeyCode = KeyCode(0x36);

    /// Returns the raw usage ID.
    #[inline]
    pub const fn usage(self) -> u8 {
        self.0
    }
}

impl From<u8> for KeyCode {
    fn from(usage: u8) -> Self {
        KeyCode(usage)
    }
}

impl From<KeyCode> for u8 {
    fn from(key: KeyCode) -> Self {
        key.0
    }
}
