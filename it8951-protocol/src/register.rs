//! IT8951 register map
//!
//! Registers are 16 bits wide and addressed by a 16-bit offset in one of
//! three spaces. Fields wider than 16 bits span two registers: the low word
//! at `addr`, the high word at `addr + 2`.

/// Display register space (register RW access)
pub const DISPLAY_REG_BASE: u16 = 0x1000;

/// LUT0 engine width/height
pub const LUT0EWHR: u16 = DISPLAY_REG_BASE;
/// LUT0 XY
pub const LUT0XYR: u16 = DISPLAY_REG_BASE + 0x40;
/// LUT0 base address
pub const LUT0BADDR: u16 = DISPLAY_REG_BASE + 0x80;
/// LUT0 mode and frame number
pub const LUT0MFN: u16 = DISPLAY_REG_BASE + 0xC0;
/// LUT0 and LUT1 active flag
pub const LUT01AF: u16 = DISPLAY_REG_BASE + 0x114;

/// Update parameter 0 setting
pub const UP0SR: u16 = DISPLAY_REG_BASE + 0x134;
/// Update parameter 1 setting (1bpp mode select lives in the high word)
pub const UP1SR: u16 = DISPLAY_REG_BASE + 0x138;
/// LUT0 alpha blend and fill rectangle value
pub const LUT0ABFRV: u16 = DISPLAY_REG_BASE + 0x13C;
/// Update buffer base address
pub const UPBBADDR: u16 = DISPLAY_REG_BASE + 0x17C;
/// LUT0 image buffer X/Y offset
pub const LUT0IMXY: u16 = DISPLAY_REG_BASE + 0x180;
/// Status of all LUT engines: zero when the update engine is idle
pub const LUTAFSR: u16 = DISPLAY_REG_BASE + 0x224;
/// Bitmap (1bpp) image color table: foreground in the high byte, background in the low byte
pub const BGVR: u16 = DISPLAY_REG_BASE + 0x250;

/// System register space
pub const SYS_REG_BASE: u16 = 0x0000;

/// I80 command/parameter control (bit 0 enables packed pixel writes)
pub const I80CPCR: u16 = SYS_REG_BASE + 0x04;

/// Driving capability control, see `enhance_driving_capability`
pub const DRIVING_CAPABILITY: u16 = SYS_REG_BASE + 0x38;

/// Memory converter register space
pub const MCSR_BASE: u16 = 0x0200;

/// Memory converter status
pub const MCSR: u16 = MCSR_BASE;
/// Load image start address (32 bits: LISAR low, LISAR + 2 high)
pub const LISAR: u16 = MCSR_BASE + 0x0008;

/// Bit in the high word of [`UP1SR`] selecting 1bpp display mode
pub const UP1SR_1BPP_MODE: u16 = 1 << 2;

/// [`I80CPCR`] value enabling packed pixel writes
pub const I80CPCR_PACKED_WRITE: u16 = 0x0001;

/// Value written to [`DRIVING_CAPABILITY`] to sharpen blurred panels
pub const DRIVING_CAPABILITY_ENHANCED: u16 = 0x0602;

/// Address of the high word of a 32-bit register pair
pub const fn high_word(addr: u16) -> u16 {
    addr.wrapping_add(2)
}

/// Pack the 1bpp color table entry for [`BGVR`]
pub fn bitmap_color_table(background: u8, foreground: u8) -> u16 {
    ((foreground as u16) << 8) | background as u16
}
