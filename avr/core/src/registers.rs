//! ADC register set and the hardware access seam

use crate::variant::Variant;

/// The 8-bit control registers of the ADC block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Multiplexer selection: reference, justification, channel
    Admux,
    /// Control and status A: enable, start, flags, prescaler
    Adcsra,
    /// Control and status B: trigger source and `MUX5`
    Adcsrb,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Register {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Register::Admux => defmt::write!(fmt, "ADMUX"),
            Register::Adcsra => defmt::write!(fmt, "ADCSRA"),
            Register::Adcsrb => defmt::write!(fmt, "ADCSRB"),
        }
    }
}

/// Raw access to one ADC register block.
///
/// Implementations must not reorder accesses: the driver relies on each
/// `write` reaching the hardware before the next `read`. Reads take `&mut self`
/// because status reads have side effects on real hardware and in simulation.
pub trait Registers {
    /// Read a control register
    fn read(&mut self, reg: Register) -> u8;

    /// Write a control register
    fn write(&mut self, reg: Register, value: u8);

    /// Read the 16-bit conversion result (ADCL then ADCH)
    fn read_data(&mut self) -> u16;

    /// Read-modify-write a register.
    ///
    /// Writing ADCSRA back clears `ADIF` if it was set, the same as the
    /// `ADCSRA |= ...` idiom on the device.
    fn modify<F>(&mut self, reg: Register, f: F)
    where
        F: FnOnce(u8) -> u8,
    {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    /// Set the bits in `mask`
    fn set_bits(&mut self, reg: Register, mask: u8) {
        self.modify(reg, |v| v | mask);
    }

    /// Clear the bits in `mask`
    fn clear_bits(&mut self, reg: Register, mask: u8) {
        self.modify(reg, |v| v & !mask);
    }
}

impl<T: Registers + ?Sized> Registers for &mut T {
    fn read(&mut self, reg: Register) -> u8 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: Register, value: u8) {
        (**self).write(reg, value)
    }

    fn read_data(&mut self) -> u16 {
        (**self).read_data()
    }
}

/// A [`Registers`] backend wired to the ADC block of one device variant.
///
/// The driver only accepts a backend whose `Variant` matches its own, so a
/// register sequence for one chip cannot be sent to another chip's addresses.
pub trait DeviceRegisters: Registers {
    /// Chip family the backend addresses
    type Variant: Variant;
}

impl<T: DeviceRegisters + ?Sized> DeviceRegisters for &mut T {
    type Variant = T::Variant;
}

/// ADMUX bits
pub mod admux {
    /// Reference selection bit 1
    pub const REFS1: u8 = 1 << 7;
    /// Reference selection bit 0
    pub const REFS0: u8 = 1 << 6;
    /// Left-adjust result
    pub const ADLAR: u8 = 1 << 5;
    /// Mux bit 4 (ATmega2560)
    pub const MUX4: u8 = 1 << 4;
    /// Mux bit 3
    pub const MUX3: u8 = 1 << 3;
    /// Reference field
    pub const REFS_MASK: u8 = REFS1 | REFS0;
}

/// ADCSRA bits
pub mod adcsra {
    /// ADC enable
    pub const ADEN: u8 = 1 << 7;
    /// Start conversion
    pub const ADSC: u8 = 1 << 6;
    /// Auto trigger enable
    pub const ADATE: u8 = 1 << 5;
    /// Free running select (ATmega8 name for bit 5)
    pub const ADFR: u8 = ADATE;
    /// Conversion complete flag, cleared by writing one
    pub const ADIF: u8 = 1 << 4;
    /// Conversion complete interrupt enable
    pub const ADIE: u8 = 1 << 3;
    /// Prescaler field
    pub const ADPS_MASK: u8 = 0b0000_0111;
}

/// ADCSRB bits
pub mod adcsrb {
    /// Mux bit 5 (ATmega2560), selects ADC8..ADC15
    pub const MUX5: u8 = 1 << 3;
    /// Auto trigger source field; zero is free running
    pub const ADTS_MASK: u8 = 0b0000_0111;
}

/// Maximum value of the 10-bit conversion result
pub const SAMPLE_MAX: u16 = 0x03FF;

/// Shift that turns a left-adjusted result into a right-aligned one
pub const LEFT_ADJUST_SHIFT: u32 = 6;

#[cfg(test)]
mod tests {
    use super::*;

    struct Bank([u8; 3]);

    impl Registers for Bank {
        fn read(&mut self, reg: Register) -> u8 {
            self.0[reg as usize]
        }

        fn write(&mut self, reg: Register, value: u8) {
            self.0[reg as usize] = value;
        }

        fn read_data(&mut self) -> u16 {
            0
        }
    }

    #[test]
    fn test_bit_helpers() {
        let mut bank = Bank([0; 3]);
        bank.set_bits(Register::Adcsra, adcsra::ADEN | adcsra::ADPS_MASK);
        assert_eq!(bank.read(Register::Adcsra), 0b1000_0111);

        bank.clear_bits(Register::Adcsra, adcsra::ADPS_MASK);
        assert_eq!(bank.read(Register::Adcsra), adcsra::ADEN);

        bank.modify(Register::Admux, |v| v | admux::REFS0);
        assert_eq!(bank.read(Register::Admux), admux::REFS0);
        assert_eq!(bank.read(Register::Adcsrb), 0);
    }

    #[test]
    fn test_mutable_reference_forwarding() {
        let mut bank = Bank([0; 3]);
        {
            let mut borrowed = &mut bank;
            borrowed.set_bits(Register::Adcsrb, adcsrb::MUX5);
        }
        assert_eq!(bank.read(Register::Adcsrb), adcsrb::MUX5);
    }
}
