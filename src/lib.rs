//! SD card protocol engine for SPI mode, written in Embedded Rust.
//!
//! This crate brings an SD card from power on to the transfer state and
//! moves 512-byte sectors and card registers over an SPI bus, framed by a
//! chip select line. Only block addressed (SDHC/SDXC, version 2) cards are
//! supported.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod cid;
mod command;
mod config;
mod consts;
mod crc;
mod csd;
mod ocr;
mod response;
mod scr;
mod ssr;


pub use crate::{
    cid::{Cid, CidData},
    command::{Command, Frame, FRAME_SIZE},
    config::{DefaultSdMmcSpiConfig, SdMmcSpiConfig},
    consts::BLOCK_SIZE,
    crc::{command_crc, crc16, crc7},
    csd::{CapacityProvider, Csd, CsdData, CsdV1, CsdV2},
    ocr::Ocr,
    response::{R1Response, R2Response, R2Status, R3R7Response, Response, ResponseKind},
    scr::{Scr, ScrData},
    ssr::{Ssr, SsrData},
};
pub use diskio::{
    BlockSize, DiskioDevice, Error as DiskioError, IoctlCmd, Lba, Status, StatusFlag,
};

use crate::consts::{args, commands, tokens, BLOCK_SIZE_U64};

use core::{cell::RefCell, marker::PhantomData};
use embedded_hal::blocking::{delay::DelayMs, spi::Transfer};
use size::Size;
use switch_hal::OutputSwitch;

/// [`SdMmcSpi`] result error.
///
/// `T` - transport error type.
/// `S` - select switch type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<T, S> {
    /// Error from the SPI peripheral.
    Transport(T),
    /// Couldn't set a select.
    SelectError(S),
    /// No valid response to this command, or the card never left the idle state.
    TimeoutCommand(u8),
    /// Unexpected R1 status (command, status).
    UnexpectedResponse(u8, u8),
    /// SEND_IF_COND echo doesn't match the check pattern.
    InterfaceConditionMismatch(u32),
    /// Card doesn't know SEND_IF_COND, version 1 cards are not supported.
    UnsupportedCard,
    /// Card is byte addressed (standard capacity), which is not supported.
    ByteAddressingUnsupported,
    /// No data start token when reading data from the card.
    TimeoutReadBuffer,
    /// Card answered with a data error token instead of a data block.
    DataErrorToken(u8),
    /// No response when waiting for the card to not be busy.
    TimeoutWaitAvailable,
    /// Card rejected written data, holds the data response token.
    WriteRejected(u8),
    /// CRC mismatch (card, host).
    CrcError(u16, u16),
    /// Can't perform this operation with the card in this state.
    BadState,
    /// Erase is not implemented.
    EraseNotSupported,
}

/// One sector.
pub type Sector = [u8; BLOCK_SIZE];

/// Error type alias.
type ErrorFor<T> = <T as DiskioDevice>::HardwareError;

/// SD Card SPI driver.
///
/// `Spi` - SPI.
/// `Cs` - Chip select output switch.
/// `Delay` - Millisecond delay.
/// `Config` - Config implementation of driver config trait.
pub struct SdMmcSpi<Spi, Cs, Delay, Config>
where
    Spi: Transfer<u8>,
    Cs: OutputSwitch,
    Delay: DelayMs<u32>,
    Config: SdMmcSpiConfig,
{
    spi: RefCell<Spi>,
    cs: RefCell<Cs>,
    delay: Delay,
    status: Status,
    ocr: Ocr,
    sector_count: u64,
    config: PhantomData<Config>,
}

impl<Spi, Cs, Delay, Config> SdMmcSpi<Spi, Cs, Delay, Config>
where
    Spi: Transfer<u8>,
    Cs: OutputSwitch,
    Delay: DelayMs<u32>,
    Config: SdMmcSpiConfig,
    Spi::Error: core::fmt::Debug,
    Cs::Error: core::fmt::Debug,
{
    /// Init sequence value.
    const INIT_SET_VALUE: u8 = 0xFF;
    /// Init sequence size, at least 74 clocks.
    const INIT_SET_SIZE: usize = 10;

    /// Creates a new [`SdMmcSpi<Spi, Cs, Delay, Config>`].
    ///
    /// `spi` - SPI instance.
    /// `cs` - chip select output switch.
    /// `delay` - delay provider.
    pub fn new(spi: Spi, cs: Cs, delay: Delay) -> Self {
        SdMmcSpi {
            spi: RefCell::new(spi),
            cs: RefCell::new(cs),
            delay,
            status: StatusFlag::NotInitialized.into(),
            ocr: Ocr(0),
            sector_count: 0,
            config: PhantomData::<Config>,
        }
    }

    /// Releases the bus and the chip select.
    pub fn free(self) -> (Spi, Cs, Delay) {
        (self.spi.into_inner(), self.cs.into_inner(), self.delay)
    }

    /// Card went through initialization.
    pub fn is_initialized(&self) -> bool {
        !self.status.contains(StatusFlag::NotInitialized)
    }

    /// Count of sectors, known after initialization.
    pub fn sector_count(&self) -> u64 {
        self.sector_count
    }

    /// Card capacity, known after initialization.
    pub fn card_capacity(&self) -> Size {
        Size::from_bytes(self.sector_count * BLOCK_SIZE_U64)
    }

    /// OCR read during initialization.
    pub fn ocr(&self) -> Ocr {
        self.ocr
    }

    /// Validate buffer for read/write.
    fn validate_buffer_len(buf_len: usize) -> Result<(), DiskioError<ErrorFor<Self>>> {
        if buf_len == 0 || buf_len % BLOCK_SIZE != 0 {
            error!(
                "SD invalid buffer, length: {}, block size: {}",
                buf_len, BLOCK_SIZE
            );
            Err(DiskioError::InvalidArgument)
        } else {
            Ok(())
        }
    }

    /// Validate that every block of the buffer is addressable, returns the first block index.
    fn validate_lba(lba: Lba, buf_len: usize) -> Result<u32, DiskioError<ErrorFor<Self>>> {
        let last = lba.checked_add((buf_len / BLOCK_SIZE) as Lba - 1);

        match last.map(u32::try_from) {
            Some(Ok(_)) => Ok(lba as u32),
            _ => {
                error!(
                    "SD invalid address, lba: {}, blocks: {}",
                    lba,
                    buf_len / BLOCK_SIZE
                );
                Err(DiskioError::InvalidArgument)
            }
        }
    }

    /// Validate initialzed.
    fn validate_initialized(&self) -> Result<(), DiskioError<ErrorFor<Self>>> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(DiskioError::NotInitialized)
        }
    }

    /// Ensure the card is in the transfer state.
    fn ensure_initialized(&self) -> Result<(), ErrorFor<Self>> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(Error::BadState)
        }
    }

    /// Activate chip select.
    fn select(&self) -> Result<(), ErrorFor<Self>> {
        self.cs.borrow_mut().on().map_err(Error::SelectError)
    }

    /// Deactivate chip select.
    fn unselect(&self) -> Result<(), ErrorFor<Self>> {
        self.cs.borrow_mut().off().map_err(Error::SelectError)
    }

    /// CS scope.
    fn cs_scope<O, F>(&self, f: F) -> Result<O, ErrorFor<Self>>
    where
        F: FnOnce(&Self) -> Result<O, ErrorFor<Self>>,
    {
        self.select()?;
        let result = f(self);
        self.unselect()?;

        result
    }

    /// Send one byte and receive one byte.
    fn transfer(&self, data: u8) -> Result<u8, ErrorFor<Self>> {
        self.spi
            .borrow_mut()
            .transfer(&mut [data])
            .map(|b| b[0])
            .map_err(Error::Transport)
    }

    /// Exchange a buffer in place.
    fn transfer_slice(&self, data: &mut [u8]) -> Result<(), ErrorFor<Self>> {
        self.spi
            .borrow_mut()
            .transfer(data)
            .map(|_| ())
            .map_err(Error::Transport)
    }

    /// Receive a byte from the SD card by clocking in an 0xFF byte.
    fn receive(&self) -> Result<u8, ErrorFor<Self>> {
        self.transfer(tokens::AVAILABLE)
    }

    /// Send a byte to the SD card.
    fn send(&self, data: u8) -> Result<(), ErrorFor<Self>> {
        self.transfer(data).map(|_| ())
    }

    /// Receive a slice from the SD card in one exchange, clocking out 0xFF filler.
    fn receive_slice(&self, data: &mut [u8]) -> Result<(), ErrorFor<Self>> {
        data.fill(tokens::AVAILABLE);
        self.transfer_slice(data)
    }

    /// Send a slice to the SD card.
    fn send_slice(&self, data: &[u8]) -> Result<(), ErrorFor<Self>> {
        for byte in data.iter() {
            self.send(*byte)?;
        }

        Ok(())
    }

    /// Wait for token.
    fn wait_for_token<F: Fn(u8) -> bool>(
        &self,
        token_validator: F,
        attempts: usize,
        error: ErrorFor<Self>,
    ) -> Result<u8, ErrorFor<Self>> {
        for _ in 0..attempts {
            let token = self.receive()?;

            if token_validator(token) {
                return Ok(token);
            }
        }

        Err(error)
    }

    /// Wait available state of card.
    fn wait_available_state(&self) -> Result<(), ErrorFor<Self>> {
        self.wait_for_token(
            |token| token == tokens::AVAILABLE,
            Config::WAIT_AVAILABLE_ATTEMPTS,
            Error::TimeoutWaitAvailable,
        )
        .map(|_| ())
    }

    /// Send command frame, the response is left on the bus.
    fn send_frame(&self, cmd: u8, arg: u32) -> Result<(), ErrorFor<Self>> {
        let mut frame = Command::new(cmd, arg).frame();

        self.transfer_slice(&mut frame)
    }

    /// Poll for the R1 byte of a response.
    fn read_r1(&self, cmd: u8) -> Result<R1Response, ErrorFor<Self>> {
        for _ in 0..Config::READ_R1_ATTEMPTS {
            let r1 = R1Response(self.receive()?);

            if r1.is_valid() {
                return Ok(r1);
            }
        }

        Err(Error::TimeoutCommand(cmd & commands::CMD_MASK))
    }

    /// Read R2 response.
    fn read_r2(&self, cmd: u8) -> Result<R2Response, ErrorFor<Self>> {
        let r1 = self.read_r1(cmd)?;
        let status = R2Status(self.receive()?);

        Ok(R2Response { r1, status })
    }

    /// Read R3 or R7 response.
    fn read_r3r7(&self, cmd: u8) -> Result<R3R7Response, ErrorFor<Self>> {
        let r1 = self.read_r1(cmd)?;
        let mut payload = [0; 4];

        self.receive_slice(&mut payload)?;

        Ok(R3R7Response {
            r1,
            payload: u32::from_be_bytes(payload),
        })
    }

    /// Send the APP_CMD prefix if needed, then the command itself.
    fn issue(&self, cmd: u8, arg: u32) -> Result<(), ErrorFor<Self>> {
        if (cmd & commands::ACMD_FLAG) != 0 {
            self.send_frame(commands::CMD55, 0x0000_0000)?;
            self.read_r1(commands::CMD55)?;
        }

        self.send_frame(cmd, arg)
    }

    /// Send command with R1 response.
    fn command_r1(&self, cmd: u8, arg: u32) -> Result<R1Response, ErrorFor<Self>> {
        self.issue(cmd, arg)?;
        self.read_r1(cmd)
    }

    /// Send command with R2 response.
    fn command_r2(&self, cmd: u8, arg: u32) -> Result<R2Response, ErrorFor<Self>> {
        self.issue(cmd, arg)?;
        self.read_r2(cmd)
    }

    /// Send command with R3 or R7 response.
    fn command_r3r7(&self, cmd: u8, arg: u32) -> Result<R3R7Response, ErrorFor<Self>> {
        self.issue(cmd, arg)?;
        self.read_r3r7(cmd)
    }

    /// Send command that has to leave the card in the ready state.
    fn command_ready(&self, cmd: u8, arg: u32) -> Result<(), ErrorFor<Self>> {
        let r1 = self.command_r1(cmd, arg)?;

        if r1 != R1Response::READY_STATE {
            return Err(Error::UnexpectedResponse(cmd & commands::CMD_MASK, r1.0));
        }

        Ok(())
    }

    /// Read data.
    fn read_data(&self, data: &mut [u8]) -> Result<(), ErrorFor<Self>> {
        let token = self.wait_for_token(
            |token| token != tokens::AVAILABLE,
            Config::READ_TOKEN_ATTEMPTS,
            Error::TimeoutReadBuffer,
        )?;

        if token != tokens::DATA_START_BLOCK {
            return Err(Error::DataErrorToken(token));
        }

        self.receive_slice(data)?;

        let card_crc = (u16::from(self.receive()?) << 8) | u16::from(self.receive()?);

        if Config::VERIFY_READ_CRC {
            let host_crc = crc16(data);

            if card_crc != host_crc {
                return Err(Error::CrcError(card_crc, host_crc));
            }
        }

        Ok(())
    }

    /// Write data.
    fn write_data(&self, token: u8, data: &[u8]) -> Result<(), ErrorFor<Self>> {
        let host_crc = crc16(data);

        self.send(tokens::AVAILABLE)?;
        self.send(token)?;
        self.send_slice(data)?;
        self.send((host_crc >> 8) as u8)?;
        self.send(host_crc as u8)?;

        let response = self.receive()?;

        if (response & tokens::DATA_RES_MASK) != tokens::DATA_RES_ACCEPTED {
            return Err(Error::WriteRejected(response));
        }

        Ok(())
    }

    /// Read a register sent as a data block.
    fn read_register(&self, cmd: u8, data: &mut [u8]) -> Result<(), ErrorFor<Self>> {
        self.command_ready(cmd, 0x0000_0000)?;
        self.read_data(data)
    }

    /// Read OCR.
    fn read_ocr(&self) -> Result<Ocr, ErrorFor<Self>> {
        let r3 = self.command_r3r7(commands::CMD58, 0x0000_0000)?;

        if r3.r1.has_error() {
            return Err(Error::UnexpectedResponse(commands::CMD58, r3.r1.0));
        }

        Ok(Ocr::from(r3.payload))
    }

    /// Read CSD.
    fn read_csd(&self) -> Result<Csd, ErrorFor<Self>> {
        let mut csd_data: CsdData = Default::default();

        self.read_register(commands::CMD9, &mut csd_data)?;

        Ok(Csd::from(csd_data))
    }

    /// Read one block into `buf`.
    fn read_block(&self, index: u32, buf: &mut [u8]) -> Result<(), ErrorFor<Self>> {
        self.cs_scope(|s| {
            s.command_ready(commands::CMD17, index)?;
            s.read_data(buf)
        })
    }

    /// Write one block from `buf`.
    fn write_block(&self, index: u32, buf: &[u8]) -> Result<(), ErrorFor<Self>> {
        self.cs_scope(|s| {
            s.command_ready(commands::CMD24, index)?;
            s.write_data(tokens::DATA_START_BLOCK, buf)?;
            s.wait_available_state()
        })
    }

    /// At least 74 clocks with the card deselected and DI high.
    fn power_up(&mut self) -> Result<(), ErrorFor<Self>> {
        self.unselect()?;

        for _ in 0..Self::INIT_SET_SIZE {
            self.send(Self::INIT_SET_VALUE)?;
        }

        self.delay.delay_ms(Config::POWER_UP_DELAY_MS);

        Ok(())
    }

    /// Enter SD to SPI mode.
    fn go_idle(&self) -> Result<(), ErrorFor<Self>> {
        info!("Enter to SPI mode for SD");

        let r1 = self.cs_scope(|s| s.command_r1(commands::CMD0, 0x0000_0000))?;

        if r1 != R1Response::IN_IDLE_STATE {
            warn!("Wrong response from CMD{}: {:#x}", commands::CMD0, r1.0);
            return Err(Error::UnexpectedResponse(commands::CMD0, r1.0));
        }

        Ok(())
    }

    /// Verify SD Memory Card interface operating condition.
    fn send_if_cond(&self) -> Result<(), ErrorFor<Self>> {
        info!("Verifing SD Memory Card interface operating condition");

        let r7 = self.cs_scope(|s| s.command_r3r7(commands::CMD8, args::IF_COND_PATTERN))?;

        if r7.r1.illegal_command() {
            error!("SD card version 1 is not supported");
            return Err(Error::UnsupportedCard);
        }

        if r7.r1.has_error() {
            return Err(Error::UnexpectedResponse(commands::CMD8, r7.r1.0));
        }

        if (r7.payload & args::IF_COND_ECHO_MASK) != args::IF_COND_PATTERN {
            warn!("Wrong echo from CMD{}: {:#x}", commands::CMD8, r7.payload);
            return Err(Error::InterfaceConditionMismatch(r7.payload));
        }

        Ok(())
    }

    /// Sends host capacity support information and activates.
    fn send_op_comd(&mut self) -> Result<(), ErrorFor<Self>> {
        info!("Sending host capacity support information and activates");

        for attempt in 0..Config::INIT_ATTEMPTS {
            let r1 = self.cs_scope(|s| s.command_r1(commands::ACMD41, args::HCS))?;

            if r1 == R1Response::READY_STATE {
                info!("SD left idle state, attempt: {}", attempt + 1);
                return Ok(());
            }

            self.delay.delay_ms(Config::INIT_RETRY_DELAY_MS);
        }

        Err(Error::TimeoutCommand(commands::ACMD41 & commands::CMD_MASK))
    }

    /// Check addressing mode, only block addressed cards are supported.
    fn check_addressing(&mut self) -> Result<(), ErrorFor<Self>> {
        info!("Checking SD addressing mode");

        let ocr = self.cs_scope(|s| s.read_ocr())?;

        if !ocr.is_block_addressed() {
            self.cs_scope(|s| s.command_ready(commands::CMD16, BLOCK_SIZE as u32))?;
            error!("SD byte addressing is not supported");
            return Err(Error::ByteAddressingUnsupported);
        }

        self.ocr = ocr;

        Ok(())
    }

    /// Initialize SD.
    ///
    /// Runs the whole handshake, also on an initialized card.
    pub fn init(&mut self) -> Result<(), ErrorFor<Self>> {
        info!("SD initialize started");

        self.status = StatusFlag::NotInitialized.into();
        self.ocr = Ocr(0);
        self.sector_count = 0;

        let result = self.handshake();

        self.status = match &result {
            Ok(_) => {
                info!(
                    "SD successfully initialized, sectors: {}, capacity: {}",
                    self.sector_count,
                    defmt::Debug2Format(&self.card_capacity())
                );
                Status::default()
            }
            Err(err) => {
                error!("Failed to initialize SD: {}", defmt::Debug2Format(err));
                StatusFlag::ErrorOccured | StatusFlag::NotInitialized
            }
        };

        result
    }

    fn handshake(&mut self) -> Result<(), ErrorFor<Self>> {
        self.power_up()?;
        self.go_idle()?;
        self.send_if_cond()?;
        self.send_op_comd()?;
        self.check_addressing()?;

        self.sector_count = self.cs_scope(|s| s.read_csd())?.card_capacity_blocks();

        Ok(())
    }

    /// Issue a raw command and read a response of the given shape.
    pub fn send_command(
        &self,
        cmd: u8,
        arg: u32,
        kind: ResponseKind,
    ) -> Result<Response, ErrorFor<Self>> {
        self.cs_scope(|s| {
            Ok(match kind {
                ResponseKind::R1 => Response::R1(s.command_r1(cmd, arg)?),
                ResponseKind::R2 => Response::R2(s.command_r2(cmd, arg)?),
                ResponseKind::R3 => Response::R3(s.command_r3r7(cmd, arg)?),
                ResponseKind::R7 => Response::R7(s.command_r3r7(cmd, arg)?),
            })
        })
    }

    /// Read one sector.
    pub fn read_sector(&self, index: u32) -> Result<Sector, ErrorFor<Self>> {
        let mut sector = [0; BLOCK_SIZE];

        self.read_sector_into(index, &mut sector)?;

        Ok(sector)
    }

    /// Read one sector into `sector`.
    pub fn read_sector_into(&self, index: u32, sector: &mut Sector) -> Result<(), ErrorFor<Self>> {
        self.ensure_initialized()?;
        self.read_block(index, sector)
    }

    /// Write one sector.
    pub fn write_sector(&self, index: u32, sector: &Sector) -> Result<(), ErrorFor<Self>> {
        self.ensure_initialized()?;
        self.write_block(index, sector)
    }

    /// Erase one sector, not implemented.
    pub fn erase_sector(&self, index: u32) -> Result<(), ErrorFor<Self>> {
        error!("SD erase is not supported, sector: {}", index);
        Err(Error::EraseNotSupported)
    }

    /// Read Card Identification register.
    pub fn read_identification(&self) -> Result<Cid, ErrorFor<Self>> {
        self.ensure_initialized()?;

        let mut cid_data: CidData = Default::default();
        self.cs_scope(|s| s.read_register(commands::CMD10, &mut cid_data))?;

        Ok(Cid::from(cid_data))
    }

    /// Read Card Specific Data register.
    pub fn read_capacity_descriptor(&self) -> Result<Csd, ErrorFor<Self>> {
        self.ensure_initialized()?;
        self.cs_scope(|s| s.read_csd())
    }

    /// Read Operation Conditions Register.
    pub fn read_operating_conditions(&self) -> Result<Ocr, ErrorFor<Self>> {
        self.ensure_initialized()?;
        self.cs_scope(|s| s.read_ocr())
    }

    /// Read SD Configuration register.
    pub fn read_configuration_descriptor(&self) -> Result<Scr, ErrorFor<Self>> {
        self.ensure_initialized()?;

        let mut scr_data: ScrData = Default::default();
        self.cs_scope(|s| s.read_register(commands::ACMD51, &mut scr_data))?;

        Ok(Scr::from(scr_data))
    }

    /// Read SD Status register.
    pub fn read_status(&self) -> Result<Ssr, ErrorFor<Self>> {
        self.ensure_initialized()?;

        let mut ssr_data: SsrData = [0; 64];
        self.cs_scope(|s| {
            let r2 = s.command_r2(commands::ACMD13, 0x0000_0000)?;

            if r2.r1 != R1Response::READY_STATE {
                return Err(Error::UnexpectedResponse(
                    commands::ACMD13 & commands::CMD_MASK,
                    r2.r1.0,
                ));
            }

            if r2.status.0 != 0 {
                return Err(Error::UnexpectedResponse(
                    commands::ACMD13 & commands::CMD_MASK,
                    r2.status.0,
                ));
            }

            s.read_data(&mut ssr_data)
        })?;

        Ok(Ssr::from(ssr_data))
    }

    /// Read card status (SEND_STATUS).
    pub fn read_card_status(&self) -> Result<R2Response, ErrorFor<Self>> {
        self.ensure_initialized()?;
        self.cs_scope(|s| s.command_r2(commands::CMD13, 0x0000_0000))
    }
}

impl<Spi, Cs, Delay, Config> DiskioDevice for SdMmcSpi<Spi, Cs, Delay, Config>
where
    Spi: Transfer<u8>,
    Cs: OutputSwitch,
    Delay: DelayMs<u32>,
    Config: SdMmcSpiConfig,
    Spi::Error: core::fmt::Debug,
    Cs::Error: core::fmt::Debug,
{
    type HardwareError = Error<Spi::Error, Cs::Error>;

    fn status(&self) -> Status {
        self.status
    }

    fn reset(&mut self) {
        info!("SD reset invoked");
        self.status = StatusFlag::NotInitialized.into();
    }

    fn initialize(&mut self) -> Result<(), DiskioError<Self::HardwareError>> {
        if self.is_initialized() {
            warn!("SD already is initialized");
            return Err(DiskioError::AlreadyInitialized);
        }

        self.init().map_err(DiskioError::Hardware)
    }

    fn read(&self, buf: &mut [u8], lba: Lba) -> Result<(), DiskioError<Self::HardwareError>> {
        Self::validate_buffer_len(buf.len())?;
        let first = Self::validate_lba(lba, buf.len())?;
        self.validate_initialized()?;

        for (offset, chunk) in buf.chunks_mut(BLOCK_SIZE).enumerate() {
            self.read_block(first + offset as u32, chunk)
                .map_err(DiskioError::Hardware)?;
        }

        Ok(())
    }

    fn write(&self, buf: &[u8], lba: Lba) -> Result<(), DiskioError<Self::HardwareError>> {
        Self::validate_buffer_len(buf.len())?;
        let first = Self::validate_lba(lba, buf.len())?;
        self.validate_initialized()?;

        for (offset, chunk) in buf.chunks(BLOCK_SIZE).enumerate() {
            self.write_block(first + offset as u32, chunk)
                .map_err(DiskioError::Hardware)?;
        }

        Ok(())
    }

    fn ioctl(&self, cmd: IoctlCmd) -> Result<(), DiskioError<Self::HardwareError>> {
        match cmd {
            IoctlCmd::CtrlSync => self
                .cs_scope(|s| s.wait_available_state())
                .map_err(DiskioError::Hardware),
            IoctlCmd::GetBlockSize(block_size) => {
                *block_size = BLOCK_SIZE;
                Ok(())
            }
            _ => Err(DiskioError::NotSupported),
        }
    }
}
