use log::warn;

/// Two boolean annotation properties packed as `(first << 1) | second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairState(u8);

impl PairState {
    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub fn from_flags(first: bool, second: bool) -> Self {
        Self((u8::from(first) << 1) | u8::from(second))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn first(self) -> bool {
        self.0 & 0b10 != 0
    }

    pub fn second(self) -> bool {
        self.0 & 0b01 != 0
    }

    pub fn flags(self) -> (bool, bool) {
        (self.first(), self.second())
    }
}

/// A fixed circular order over the four pair states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleCycle {
    order: [PairState; 4],
}

/// Extension lines: both, first only, second only, none.
pub const EXTENSION_LINES: ToggleCycle = ToggleCycle::new([0b11, 0b10, 0b01, 0b00]);

/// Arrow ends: both standard, first alternate, second alternate, both alternate.
pub const ARROWS: ToggleCycle = ToggleCycle::new([0b00, 0b10, 0b01, 0b11]);

impl ToggleCycle {
    pub const fn new(order: [u8; 4]) -> Self {
        Self {
            order: [
                PairState(order[0]),
                PairState(order[1]),
                PairState(order[2]),
                PairState(order[3]),
            ],
        }
    }

    pub fn first(&self) -> PairState {
        self.order[0]
    }

    /// State after `current`. A state outside the cycle restarts it.
    pub fn next(&self, current: PairState) -> PairState {
        match self.order.iter().position(|&s| s == current) {
            Some(i) => self.order[(i + 1) % self.order.len()],
            None => {
                warn!("toggle state {:#04b} is not in the cycle, restarting", current.0);
                self.first()
            }
        }
    }
}

pub fn next_extension_line_state(current: PairState) -> PairState {
    EXTENSION_LINES.next(current)
}

pub fn next_arrow_state(current: PairState) -> PairState {
    ARROWS.next(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_states() -> impl Iterator<Item = PairState> {
        (0..4).map(PairState::new)
    }

    #[test]
    fn test_pack_unpack() {
        assert_eq!(PairState::from_flags(true, false).bits(), 0b10);
        assert_eq!(PairState::from_flags(false, true).bits(), 0b01);
        assert_eq!(PairState::new(0b11).flags(), (true, true));
        assert_eq!(PairState::new(0b00).flags(), (false, false));
    }

    #[test]
    fn test_extension_line_order() {
        let mut state = PairState::new(0b11);
        let mut seen = vec![];
        for _ in 0..4 {
            state = next_extension_line_state(state);
            seen.push(state.bits());
        }
        assert_eq!(seen, vec![0b10, 0b01, 0b00, 0b11]);
    }

    #[test]
    fn test_arrow_order() {
        let mut state = PairState::new(0b00);
        let mut seen = vec![];
        for _ in 0..4 {
            state = next_arrow_state(state);
            seen.push(state.bits());
        }
        assert_eq!(seen, vec![0b10, 0b01, 0b11, 0b00]);
    }

    #[test]
    fn test_four_steps_close_the_cycle() {
        for cycle in [EXTENSION_LINES, ARROWS] {
            for start in all_states() {
                let mut state = start;
                for _ in 0..4 {
                    state = cycle.next(state);
                    assert_ne!(state, cycle.next(state));
                }
                assert_eq!(state, start);
            }
        }
    }

    #[test]
    fn test_unknown_state_restarts_cycle() {
        assert_eq!(EXTENSION_LINES.next(PairState::new(7)).bits(), 0b11);
        assert_eq!(ARROWS.next(PairState::new(4)).bits(), 0b00);
    }
}
