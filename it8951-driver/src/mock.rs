//! Simulated IT8951 for host tests
//!
//! The mock pins and bus share one [`State`] which decodes the byte stream
//! per chip-select scope the way the controller does, keeps a register
//! file, VCOM, the device information block, image loads and display
//! commands.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{RefCell, RefMut};

use it8951_hal::{Delay, InputPin, OutputPin, SpiBus, SpiConfig};
use it8951_protocol::device_info::string_to_words;
use it8951_protocol::register::{high_word, LISAR, LUTAFSR, UP1SR, UP1SR_1BPP_MODE, BGVR};
use it8951_protocol::{Command, DeviceInfo, Preamble, VcomCommand};

use crate::bus::{Bus, Pins};
use crate::device::It8951;

/// Error returned by the mock bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiFault;

/// Pin and delay activity, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Cs(bool),
    Rst(bool),
    DelayMs(u32),
    DelayUs(u32),
    /// Word clocked out by the host, logged with `trace_words`
    Tx(u16),
    /// Word clocked in by the host, logged with `trace_words`
    Rx(u16),
}

/// Power state set by the power-mode commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Power {
    Off,
    Run,
    Standby,
    Sleep,
}

/// One image load between a load-start and load-end command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Load {
    pub header: u16,
    /// x, y, width, height of an area load
    pub area: Option<[u16; 4]>,
    pub words: Vec<u16>,
    /// LISAR contents when the load started
    pub target_address: u32,
    pub ended: bool,
}

/// One display command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayCall {
    pub command: Command,
    pub args: Vec<u16>,
    /// 1bpp mode bit of UP1SR when the command arrived
    pub one_bpp: bool,
    /// BGVR when the command arrived
    pub bgvr: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Deselected,
    Preamble,
    Command,
    Write,
    Read { dummy_pending: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Idle,
    RegisterRead,
    RegisterAddress,
    RegisterValue(u16),
    VcomSubcommand,
    VcomValue,
    LoadHeader,
    LoadArea(Vec<u16>),
    Loading,
    Display(Command, Vec<u16>),
}

/// Controller state shared by the mock transport
pub struct State {
    // controller
    pub info: DeviceInfo,
    pub registers: BTreeMap<u16, u16>,
    pub vcom: u16,
    pub vcom_writes: usize,
    pub power: Power,
    pub commands: Vec<u16>,
    pub loads: Vec<Load>,
    pub displays: Vec<DisplayCall>,
    pub dummy_reads: usize,
    pub stray_words: usize,

    // transport
    pub wire: Vec<u8>,
    pub events: Vec<Event>,
    pub spi_config: Option<SpiConfig>,
    pub cs_high: bool,
    pub rst_high: bool,

    // fault injection
    pub fail_configure: bool,
    pub fail_writes: bool,
    pub hrdy_low_polls: u32,
    pub hrdy_stuck: bool,
    /// HRDY goes low for this many polls after every word
    pub hrdy_low_after_word: u32,
    pub trace_words: bool,
    pub display_busy_polls: u32,
    pub display_stuck: bool,
    pub lisar_readback_xor: u16,
    pub dummy_word: u16,

    scope: Scope,
    pending: Pending,
    read_queue: VecDeque<u16>,
    current_load: Option<Load>,
    half_word: Option<u8>,
}

impl State {
    fn new(info: DeviceInfo) -> Self {
        Self {
            info,
            registers: BTreeMap::new(),
            vcom: 1530,
            vcom_writes: 0,
            power: Power::Off,
            commands: Vec::new(),
            loads: Vec::new(),
            displays: Vec::new(),
            dummy_reads: 0,
            stray_words: 0,
            wire: Vec::new(),
            events: Vec::new(),
            spi_config: None,
            cs_high: false,
            rst_high: false,
            fail_configure: false,
            fail_writes: false,
            hrdy_low_polls: 0,
            hrdy_stuck: false,
            hrdy_low_after_word: 0,
            trace_words: false,
            display_busy_polls: 0,
            display_stuck: false,
            lisar_readback_xor: 0,
            dummy_word: 0xDEAD,
            scope: Scope::Deselected,
            pending: Pending::Idle,
            read_queue: VecDeque::new(),
            current_load: None,
            half_word: None,
        }
    }

    pub fn register(&self, address: u16) -> u16 {
        self.registers.get(&address).copied().unwrap_or(0)
    }

    /// Commands the controller received, decoded
    pub fn command_log(&self) -> Vec<Command> {
        self.commands
            .iter()
            .filter_map(|&code| Command::from_u16(code))
            .collect()
    }

    fn lisar(&self) -> u32 {
        (self.register(high_word(LISAR)) as u32) << 16 | self.register(LISAR) as u32
    }

    fn read_register(&mut self, address: u16) -> u16 {
        if address == LUTAFSR {
            if self.display_stuck {
                return 1;
            }
            if self.display_busy_polls > 0 {
                self.display_busy_polls -= 1;
                return 1;
            }
            return 0;
        }
        let value = self.register(address);
        if address == LISAR {
            value ^ self.lisar_readback_xor
        } else {
            value
        }
    }

    fn select(&mut self) {
        self.cs_high = false;
        self.events.push(Event::Cs(false));
        self.scope = Scope::Preamble;
        self.half_word = None;
    }

    fn deselect(&mut self) {
        self.cs_high = true;
        self.events.push(Event::Cs(true));
        self.scope = Scope::Deselected;
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.wire.extend_from_slice(bytes);
        for &byte in bytes {
            match self.half_word.take() {
                None => self.half_word = Some(byte),
                Some(high) => {
                    let word = u16::from_be_bytes([high, byte]);
                    self.word_done(Event::Tx(word));
                    self.on_word(word);
                }
            }
        }
    }

    fn read_bytes(&mut self, buf: &mut [u8]) {
        for pair in buf.chunks_mut(2) {
            let word = self.next_read_word();
            self.word_done(Event::Rx(word));
            let bytes = word.to_be_bytes();
            pair.copy_from_slice(&bytes[..pair.len()]);
        }
    }

    fn next_read_word(&mut self) -> u16 {
        match self.scope {
            Scope::Read { dummy_pending: true } => {
                self.scope = Scope::Read {
                    dummy_pending: false,
                };
                self.dummy_reads += 1;
                self.dummy_word
            }
            Scope::Read { .. } => self.read_queue.pop_front().unwrap_or(0),
            _ => {
                self.stray_words += 1;
                0
            }
        }
    }

    fn word_done(&mut self, event: Event) {
        if self.trace_words {
            self.events.push(event);
        }
        self.hrdy_low_polls = self.hrdy_low_after_word;
    }

    fn on_word(&mut self, word: u16) {
        match self.scope {
            Scope::Preamble => {
                self.scope = match Preamble::from_u16(word) {
                    Some(Preamble::Command) => Scope::Command,
                    Some(Preamble::Write) => Scope::Write,
                    Some(Preamble::Read) => Scope::Read {
                        dummy_pending: true,
                    },
                    None => {
                        self.stray_words += 1;
                        Scope::Deselected
                    }
                };
            }
            Scope::Command => self.on_command(word),
            Scope::Write => self.on_data(word),
            Scope::Read { .. } | Scope::Deselected => self.stray_words += 1,
        }
    }

    fn on_command(&mut self, code: u16) {
        self.commands.push(code);
        let Some(command) = Command::from_u16(code) else {
            return;
        };
        self.pending = match command {
            Command::SysRun => {
                self.power = Power::Run;
                Pending::Idle
            }
            Command::Standby => {
                self.power = Power::Standby;
                Pending::Idle
            }
            Command::Sleep => {
                self.power = Power::Sleep;
                Pending::Idle
            }
            Command::RegisterRead => Pending::RegisterRead,
            Command::RegisterWrite => Pending::RegisterAddress,
            Command::Vcom => Pending::VcomSubcommand,
            Command::GetDeviceInfo => {
                self.read_queue.extend(self.info.to_words());
                Pending::Idle
            }
            Command::LoadImage => Pending::LoadHeader,
            Command::LoadImageArea => Pending::LoadArea(Vec::new()),
            Command::LoadImageEnd => {
                if let Some(mut load) = self.current_load.take() {
                    load.ended = true;
                    self.loads.push(load);
                }
                Pending::Idle
            }
            Command::DisplayArea | Command::DisplayBufferArea => {
                Pending::Display(command, Vec::new())
            }
            _ => Pending::Idle,
        };
    }

    fn on_data(&mut self, word: u16) {
        let pending = core::mem::replace(&mut self.pending, Pending::Idle);
        self.pending = match pending {
            Pending::Idle => {
                self.stray_words += 1;
                Pending::Idle
            }
            Pending::RegisterRead => {
                let value = self.read_register(word);
                self.read_queue.push_back(value);
                Pending::Idle
            }
            Pending::RegisterAddress => Pending::RegisterValue(word),
            Pending::RegisterValue(address) => {
                self.registers.insert(address, word);
                Pending::Idle
            }
            Pending::VcomSubcommand => {
                if word == VcomCommand::Set.as_u16() {
                    Pending::VcomValue
                } else {
                    self.read_queue.push_back(self.vcom);
                    Pending::Idle
                }
            }
            Pending::VcomValue => {
                self.vcom = word;
                self.vcom_writes += 1;
                Pending::Idle
            }
            Pending::LoadHeader => {
                self.start_load(word, None);
                Pending::Loading
            }
            Pending::LoadArea(mut args) => {
                args.push(word);
                if args.len() == 5 {
                    self.start_load(args[0], Some([args[1], args[2], args[3], args[4]]));
                    Pending::Loading
                } else {
                    Pending::LoadArea(args)
                }
            }
            Pending::Loading => {
                if let Some(load) = self.current_load.as_mut() {
                    load.words.push(word);
                }
                Pending::Loading
            }
            Pending::Display(command, mut args) => {
                args.push(word);
                let expected = if command == Command::DisplayArea { 5 } else { 7 };
                if args.len() == expected {
                    let one_bpp = self.register(high_word(UP1SR)) & UP1SR_1BPP_MODE != 0;
                    let bgvr = self.register(BGVR);
                    self.displays.push(DisplayCall {
                        command,
                        args,
                        one_bpp,
                        bgvr,
                    });
                    Pending::Idle
                } else {
                    Pending::Display(command, args)
                }
            }
        };
    }

    fn start_load(&mut self, header: u16, area: Option<[u16; 4]>) {
        self.current_load = Some(Load {
            header,
            area,
            words: Vec::new(),
            target_address: self.lisar(),
            ended: false,
        });
    }
}

/// Handle on the simulated controller
pub struct Sim {
    state: Rc<RefCell<State>>,
}

impl Sim {
    pub fn new(info: DeviceInfo) -> Self {
        Self {
            state: Rc::new(RefCell::new(State::new(info))),
        }
    }

    /// Panel at buffer address 0x001236E0 with the given LUT version
    pub fn panel(width: u16, height: u16, lut: &str) -> Self {
        Self::new(DeviceInfo {
            panel_width: width,
            panel_height: height,
            memory_address_low: 0x36E0,
            memory_address_high: 0x0012,
            firmware_version: string_to_words("SWv_0.1.1"),
            lut_version: string_to_words(lut),
        })
    }

    pub fn state(&self) -> RefMut<'_, State> {
        self.state.borrow_mut()
    }

    pub fn pins(&self) -> Pins<MockSpi, MockCs, MockRst, MockBusy, MockDelay> {
        Pins {
            spi: MockSpi(self.state.clone()),
            cs: MockCs(self.state.clone()),
            rst: MockRst(self.state.clone()),
            busy: MockBusy(self.state.clone()),
            delay: MockDelay(self.state.clone()),
        }
    }
}

pub type MockBus = Bus<MockSpi, MockCs, MockRst, MockBusy, MockDelay>;
pub type MockEpd = It8951<MockSpi, MockCs, MockRst, MockBusy, MockDelay>;

pub struct MockSpi(Rc<RefCell<State>>);

impl SpiBus for MockSpi {
    type Error = SpiFault;

    fn configure(&mut self, config: &SpiConfig) -> Result<(), SpiFault> {
        let mut state = self.0.borrow_mut();
        if state.fail_configure {
            return Err(SpiFault);
        }
        state.spi_config = Some(*config);
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), SpiFault> {
        let mut state = self.0.borrow_mut();
        if state.fail_writes {
            return Err(SpiFault);
        }
        state.write_bytes(data);
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), SpiFault> {
        self.0.borrow_mut().read_bytes(buf);
        Ok(())
    }
}

pub struct MockCs(Rc<RefCell<State>>);

impl OutputPin for MockCs {
    fn set_high(&mut self) {
        self.0.borrow_mut().deselect();
    }

    fn set_low(&mut self) {
        self.0.borrow_mut().select();
    }

    fn is_set_high(&self) -> bool {
        self.0.borrow().cs_high
    }
}

pub struct MockRst(Rc<RefCell<State>>);

impl OutputPin for MockRst {
    fn set_high(&mut self) {
        let mut state = self.0.borrow_mut();
        state.rst_high = true;
        state.events.push(Event::Rst(true));
    }

    fn set_low(&mut self) {
        let mut state = self.0.borrow_mut();
        state.rst_high = false;
        state.events.push(Event::Rst(false));
    }

    fn is_set_high(&self) -> bool {
        self.0.borrow().rst_high
    }
}

pub struct MockBusy(Rc<RefCell<State>>);

impl InputPin for MockBusy {
    fn is_high(&self) -> bool {
        let mut state = self.0.borrow_mut();
        if state.hrdy_stuck {
            return false;
        }
        if state.hrdy_low_polls > 0 {
            state.hrdy_low_polls -= 1;
            return false;
        }
        true
    }
}

pub struct MockDelay(Rc<RefCell<State>>);

impl Delay for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().events.push(Event::DelayMs(ms));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().events.push(Event::DelayUs(us));
    }
}
