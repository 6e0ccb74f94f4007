use embedded_hal::digital::OutputPin;

/// A bank of `N` output pins driven together from the bits of one byte.
pub struct OutputArray<P: OutputPin, const N: usize>([P; N]);

impl<P: OutputPin, const N: usize> OutputArray<P, N> {
    pub fn new(outputs: [P; N]) -> Self {
        Self(outputs)
    }

    /// Drive the lowest `N` bits onto the pins, least significant first.
    #[inline]
    pub fn set_from_bits(&mut self, mut bits: u8) {
        for output in &mut self.0 {
            // on some hardware (but not here), setting a bit can fail; the
            // bus has no failure path once a transaction has started
            let _ = output.set_state(((bits & 1) == 1).into());
            bits >>= 1;
        }
    }
}
