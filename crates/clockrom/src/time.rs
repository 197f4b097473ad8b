//! Minute index to 12-hour clock digits.

use std::fmt;

use romcraft::errors::ArgumentError;

/// Minutes in one turn of a 12-hour dial.
pub const MINUTES_PER_CYCLE: u32 = 720;

/// The four digits shown on the HH:MM display.
///
/// Hours run 1..=12: `hours_tens` is 0 or 1, and `hours_units` is 0 only when
/// the hour is 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDigits {
    pub hours_tens: u8,
    pub hours_units: u8,
    pub minutes_tens: u8,
    pub minutes_units: u8,
}

impl TimeDigits {
    /// Digits for minute `index` of the cycle, where index 0 is 1:00.
    pub fn from_minute_index(index: u32) -> Result<Self, ArgumentError> {
        if index >= MINUTES_PER_CYCLE {
            return Err(ArgumentError::MinuteIndexOutOfRange(index));
        }

        let mut i = index;
        let mut digits = TimeDigits {
            hours_tens: 0,
            hours_units: 0,
            minutes_tens: 0,
            minutes_units: 0,
        };

        while i > 599 {
            i -= 600;
            digits.hours_tens += 1;
        }
        while i > 59 {
            i -= 60;
            digits.hours_units += 1;
        }
        while i > 9 {
            i -= 10;
            digits.minutes_tens += 1;
        }
        digits.minutes_units = i as u8;

        // hours count from 1
        digits.hours_units += 1;
        if digits.hours_units == 10 {
            digits.hours_units = 0;
            digits.hours_tens += 1;
        }

        Ok(digits)
    }

    /// Hours packed one digit per nibble, tens in the high nibble.
    pub fn hour_bcd(&self) -> u8 {
        self.hours_units | (self.hours_tens << 4)
    }

    /// Minutes packed one digit per nibble, tens in the high nibble.
    pub fn minute_bcd(&self) -> u8 {
        self.minutes_units | (self.minutes_tens << 4)
    }

    /// Displayed hour, 1..=12.
    pub fn hour(&self) -> u8 {
        self.hours_tens * 10 + self.hours_units
    }

    pub fn minute(&self) -> u8 {
        self.minutes_tens * 10 + self.minutes_units
    }
}

impl fmt::Display for TimeDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
    }
}

/// Minute index shown for counter value `counter` when the display is
/// advanced by `offset` minutes. Any `offset` is accepted; whole cycles drop out.
pub fn display_index(counter: u32, offset: u32) -> u32 {
    (counter % MINUTES_PER_CYCLE + offset % MINUTES_PER_CYCLE) % MINUTES_PER_CYCLE
}
