use crate::{consts::commands, crc::command_crc};

/// Command frame size on the wire.
pub const FRAME_SIZE: usize = 6;

/// Command frame.
pub type Frame = [u8; FRAME_SIZE];

/// Card command: 6-bit opcode and 32-bit argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    opcode: u8,
    arg: u32,
}

impl Command {
    /// Creates a new [`Command`], opcode is truncated to 6 bits.
    pub const fn new(opcode: u8, arg: u32) -> Self {
        Command {
            opcode: opcode & commands::CMD_MASK,
            arg,
        }
    }

    /// Opcode.
    pub const fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Argument.
    pub const fn arg(&self) -> u32 {
        self.arg
    }

    /// Frame: start bits and opcode, argument big-endian, CRC-7 with end bit.
    pub fn frame(&self) -> Frame {
        let arg = self.arg.to_be_bytes();
        let body = [commands::CMD_BASE | self.opcode, arg[0], arg[1], arg[2], arg[3]];

        [body[0], body[1], body[2], body[3], body[4], command_crc(&body)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crc::crc7;

    #[test]
    fn go_idle_frame() {
        assert_eq!(
            Command::new(commands::CMD0, 0).frame(),
            [0x40, 0x00, 0x00, 0x00, 0x00, 0x95]
        );
    }

    #[test]
    fn send_if_cond_frame() {
        assert_eq!(
            Command::new(commands::CMD8, 0x1AA).frame(),
            [0x48, 0x00, 0x00, 0x01, 0xAA, 0x87]
        );
    }

    #[test]
    fn frame_layout() {
        for opcode in [0u8, 9, 17, 24, 41, 55, 63] {
            for arg in [0u32, 0x0102_0304, 0x4000_0000, 0xFFFF_FFFF] {
                let frame = Command::new(opcode, arg).frame();

                assert_eq!(frame[0], 0x40 | opcode);
                assert_eq!(frame[1..5], arg.to_be_bytes());
                assert_eq!(frame[5], (crc7(&frame[..5]) << 1) | 1);
            }
        }
    }

    #[test]
    fn acmd_flag_is_not_framed() {
        let cmd = Command::new(commands::ACMD41, 0);

        assert_eq!(cmd.opcode(), 41);
        assert_eq!(cmd.frame()[0], 0x69);
    }
}
