use bitfield::bitfield;

bitfield! {
    /// R1 response bitset.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct R1Response(u8);
    impl Debug;
    pub in_idle_state, _: 0;
    pub erase_reset, _: 1;
    pub illegal_command, _: 2;
    pub command_crc_error, _: 3;
    pub erase_sequence_error, _: 4;
    pub address_error, _: 5;
    pub parameter_error, _: 6;
    pub start_bit, _: 7;
}

impl R1Response {
    /// Card is ready, no error bits.
    pub const READY_STATE: R1Response = R1Response(0x00);
    /// Card is in idle state, no error bits.
    pub const IN_IDLE_STATE: R1Response = R1Response(0x01);

    /// A response always starts with a zero bit.
    pub fn is_valid(&self) -> bool {
        !self.start_bit()
    }

    /// Any of the error bits are set.
    pub fn has_error(&self) -> bool {
        self.0 & 0x7E != 0
    }
}

bitfield! {
    /// Second byte of the R2 response (card status).
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct R2Status(u8);
    impl Debug;
    pub card_is_locked, _: 0;
    pub lock_unlock_failed, _: 1;
    pub error, _: 2;
    pub card_controller_error, _: 3;
    pub card_ecc_failed, _: 4;
    pub write_protect_violation, _: 5;
    pub erase_param, _: 6;
    pub out_of_range, _: 7;
}

/// R2 response: R1 byte followed by a card status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct R2Response {
    pub r1: R1Response,
    pub status: R2Status,
}

/// R3 (OCR) and R7 (interface condition) response: R1 byte and a 32-bit payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct R3R7Response {
    pub r1: R1Response,
    pub payload: u32,
}

/// Response, tagged by shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    R1(R1Response),
    R2(R2Response),
    R3(R3R7Response),
    R7(R3R7Response),
}

impl Response {
    /// R1 part, present in every shape.
    pub fn r1(&self) -> R1Response {
        match self {
            Response::R1(r1) => *r1,
            Response::R2(r) => r.r1,
            Response::R3(r) | Response::R7(r) => r.r1,
        }
    }
}

/// Shape of the response to expect after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    R1,
    R2,
    R3,
    R7,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r1_flags() {
        let r1 = R1Response(0b0010_0101);

        assert!(r1.is_valid());
        assert!(r1.in_idle_state());
        assert!(r1.illegal_command());
        assert!(r1.address_error());
        assert!(!r1.parameter_error());
        assert!(r1.has_error());
    }

    #[test]
    fn r1_idle_is_not_an_error() {
        assert!(!R1Response::IN_IDLE_STATE.has_error());
        assert!(!R1Response::READY_STATE.has_error());
        assert!(!R1Response(0xFF).is_valid());
    }

    #[test]
    fn r2_flags() {
        let status = R2Status(0b1000_0010);

        assert!(status.out_of_range());
        assert!(status.lock_unlock_failed());
        assert!(!status.card_is_locked());
    }

    #[test]
    fn response_r1_of_every_shape() {
        let r1 = R1Response(0x01);

        assert_eq!(Response::R1(r1).r1(), r1);
        assert_eq!(Response::R2(R2Response { r1, status: R2Status(0) }).r1(), r1);
        assert_eq!(Response::R7(R3R7Response { r1, payload: 0x1AA }).r1(), r1);
    }
}
