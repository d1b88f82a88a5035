//! Preambles and command codes

/// First word of every transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Preamble {
    /// Next word is a command code
    Command = 0x6000,
    /// Following words are data written to the controller
    Write = 0x0000,
    /// One dummy word, then data read from the controller
    Read = 0x1000,
}

impl Preamble {
    /// Raw wire value
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Parse a wire value
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x6000 => Some(Preamble::Command),
            0x0000 => Some(Preamble::Write),
            0x1000 => Some(Preamble::Read),
            _ => None,
        }
    }
}

/// IT8951 command codes
///
/// `Tcon*` codes are built into the controller, the rest are the I80
/// user-defined commands of the stock firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Command {
    /// Leave standby/sleep, start the clocks
    SysRun = 0x0001,
    /// Enter standby
    Standby = 0x0002,
    /// Enter sleep
    Sleep = 0x0003,
    /// Read a register: 1 arg (address), then a data read
    RegisterRead = 0x0010,
    /// Write a register: 2 args (address, value)
    RegisterWrite = 0x0011,
    /// Trigger a burst memory read into the FIFO
    MemBurstReadTrigger = 0x0012,
    /// Start reading the burst FIFO
    MemBurstReadStart = 0x0013,
    /// Burst write to memory
    MemBurstWrite = 0x0014,
    /// End a burst access
    MemBurstEnd = 0x0015,
    /// Start a full image load: 1 arg (load header)
    LoadImage = 0x0020,
    /// Start an area image load: 5 args (load header, x, y, w, h)
    LoadImageArea = 0x0021,
    /// Terminate any image load
    LoadImageEnd = 0x0022,
    /// Refresh an area from the default buffer: 5 args (x, y, w, h, mode)
    DisplayArea = 0x0034,
    /// Refresh an area from an explicit buffer: 7 args (x, y, w, h, mode, addr low, addr high)
    DisplayBufferArea = 0x0037,
    /// VCOM get/set: sub-command, then the value for a set
    Vcom = 0x0039,
    /// Query the device information block
    GetDeviceInfo = 0x0302,
}

impl Command {
    /// Raw wire value
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Parse a wire value
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0001 => Some(Command::SysRun),
            0x0002 => Some(Command::Standby),
            0x0003 => Some(Command::Sleep),
            0x0010 => Some(Command::RegisterRead),
            0x0011 => Some(Command::RegisterWrite),
            0x0012 => Some(Command::MemBurstReadTrigger),
            0x0013 => Some(Command::MemBurstReadStart),
            0x0014 => Some(Command::MemBurstWrite),
            0x0015 => Some(Command::MemBurstEnd),
            0x0020 => Some(Command::LoadImage),
            0x0021 => Some(Command::LoadImageArea),
            0x0022 => Some(Command::LoadImageEnd),
            0x0034 => Some(Command::DisplayArea),
            0x0037 => Some(Command::DisplayBufferArea),
            0x0039 => Some(Command::Vcom),
            0x0302 => Some(Command::GetDeviceInfo),
            _ => None,
        }
    }
}

/// Sub-command of [`Command::Vcom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum VcomCommand {
    /// Read the programmed VCOM
    Get = 0,
    /// Program a new VCOM
    Set = 1,
}

impl VcomCommand {
    /// Raw wire value
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}
