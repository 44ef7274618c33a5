//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use std::io::Read;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::emulator::error::{EmulatorError, LoadError};
use crate::emulator::font::{self, FONT, FONT_START};
use crate::emulator::framebuffer::Framebuffer;
use crate::emulator::instruction::*;
use crate::emulator::keypad::{Keypad, NUM_KEYS};
use crate::util::bit_splitter::BitSplitter;

pub const MEM_SIZE: usize = 4096;
pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const PC_START: u16 = 0x200;
/// The largest program image that fits between `PC_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEM_SIZE - PC_START as usize;
/// Sprites are at most 15 rows tall.
const MAX_SPRITE_HEIGHT: usize = 15;
const FLAG: usize = 0xF;

/// Whether the machine should be given more cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    Halted,
}

/// What a single call to [`Emulator::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// The instruction was fetched and executed.
    Executed(Instruction),
    /// The machine is paused, nothing happened.
    Idle,
}

#[derive(Debug, Clone)]
pub struct Emulator {
    memory: [u8; MEM_SIZE],
    registers: [u8; NUM_REGISTERS],
    delay_timer: u8,
    sound_timer: u8,
    i: u16,
    program_counter: u16,
    stack_pointer: usize,
    stack: [u16; STACK_SIZE],
    opcode: u16,
    framebuffer: Framebuffer,
    keypad: Keypad,
    run_state: RunState,
    rng: StdRng,
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Emulator {

    /// Create a new emulator with a randomly seeded random source
    pub fn new() -> Emulator {
        Emulator::with_rng(StdRng::from_entropy())
    }

    /// Create a new emulator whose `CXNN` results are reproducible
    pub fn with_seed(seed: u64) -> Emulator {
        Emulator::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Emulator {
        let mut memory = [0; MEM_SIZE];

        // Load font
        let font_start = FONT_START as usize;
        memory[font_start..font_start + FONT.len()].copy_from_slice(&FONT);

        Emulator {
            memory,
            registers: [0; NUM_REGISTERS],
            delay_timer: 0,
            sound_timer: 0,
            i: 0,
            program_counter: PC_START,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            opcode: 0,
            framebuffer: Framebuffer::new(),
            keypad: Keypad::new(),
            run_state: RunState::Running,
            rng,
        }
    }

    /// Copy a program into memory at 0x200.
    ///
    /// Nothing is written if the program does not fit.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }

        let start = PC_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        log::info!("Loaded {} byte program at {:#05x}", program.len(), PC_START);
        Ok(())
    }

    /// Read a whole program image from `reader` and load it, see [`Emulator::load`].
    pub fn load_from_reader<R: Read>(&mut self, reader: R) -> Result<(), LoadError> {
        // One byte past the limit is enough to tell that it is too large
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE);
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut program)?;
        self.load(&program)
    }

    /// Fetch the instruction at the program counter, advance past it and execute it.
    ///
    /// Fatal errors halt the machine before they are returned.
    /// Non-fatal errors are returned as well, but the machine is left ready for the next cycle.
    pub fn step(&mut self) -> Result<Cycle, EmulatorError> {
        match self.run_state {
            RunState::Halted => return Err(EmulatorError::Halted),
            RunState::Paused => return Ok(Cycle::Idle),
            RunState::Running => {}
        }

        // Each opcode is two bytes
        let address = self.program_counter;
        let opcode = self.fetch(address).map_err(|e| self.report(e))?;
        self.opcode = opcode;
        self.program_counter += 2;

        let instruction = Instruction::from_u16(opcode)
            .ok_or(EmulatorError::UnknownOpcode { opcode, address })
            .map_err(|e| self.report(e))?;

        log::trace!("{:#05x}: {:?}", address, instruction);

        self.execute_single(instruction).map_err(|e| self.report(e))?;
        Ok(Cycle::Executed(instruction))
    }

    fn fetch(&self, address: u16) -> Result<u16, EmulatorError> {
        let pc = address as usize;
        if pc + 1 >= MEM_SIZE {
            return Err(EmulatorError::ProgramCounterOutOfBounds { address });
        }
        Ok(BitSplitter::new(self.memory[pc], self.memory[pc + 1]).as_u16())
    }

    /// Log an error, and halt if it is fatal.
    fn report(&mut self, error: EmulatorError) -> EmulatorError {
        if error.is_fatal() {
            log::error!("{}, halting", error);
            self.run_state = RunState::Halted;
        } else {
            log::warn!("{}", error);
        }
        error
    }

    /// Decrement both timers, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// Execute instructions in order, stopping at the first error
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), EmulatorError> {
        for instruction in instructions {
            self.execute_single(*instruction)?;
        }
        Ok(())
    }

    /// Execute a single instruction, as if the program counter had just moved past it
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<(), EmulatorError> {
        match instruction {

            // Clear the screen
            Instruction::ClearScreen => self.framebuffer.clear(),

            // Return to the previous call site via the stack.
            Instruction::Return => {
                if self.stack_pointer == 0 {
                    return Err(EmulatorError::StackUnderflow {
                        address: self.current_address(),
                    });
                }
                self.stack_pointer -= 1;
                self.program_counter = self.stack[self.stack_pointer]; // Jump back via stack
            }

            // Go to a specific memory address
            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                if self.stack_pointer == STACK_SIZE {
                    return Err(EmulatorError::StackOverflow {
                        address: self.current_address(),
                        depth: STACK_SIZE,
                    });
                }
                self.stack[self.stack_pointer] = self.program_counter; // Store return address
                self.stack_pointer += 1;
                self.program_counter = addr; // Jump to addr
            }

            // If the register equals the constant, skip the next instruction
            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                self.skip_if(self.reg(x) == n);
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                self.skip_if(self.reg(x) != n);
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.reg(x) == self.reg(y));
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = n;
            }

            // Wraps, and leaves VF alone
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.reg(x).wrapping_add(n);
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.registers[x as usize] = self.reg(y);
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.registers[x as usize] |= self.reg(y);
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.registers[x as usize] &= self.reg(y);
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.registers[x as usize] ^= self.reg(y);
            }

            // VF is 1 on carry
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_with_flag(x, sum, carry);
            }

            // VF is 1 when there is no borrow
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_with_flag(x, vx.wrapping_sub(vy), vx >= vy);
            }

            Instruction::BitshiftRight(Reg(x)) => {
                let vx = self.reg(x);
                self.set_with_flag(x, vx >> 1, vx & 1 == 1);
            }

            // VF is 1 when there is no borrow
            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_with_flag(x, vy.wrapping_sub(vx), vy >= vx);
            }

            Instruction::BitshiftLeft(Reg(x)) => {
                let vx = self.reg(x);
                self.set_with_flag(x, vx << 1, vx >> 7 == 1);
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.reg(x) != self.reg(y));
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                self.program_counter = self.registers[0] as u16 + addr;
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                self.registers[x as usize] = self.rng.gen::<u8>() & n;
            }

            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {

                // VF is cleared first, so DFYN and DXFN draw at coordinate 0
                self.registers[FLAG] = 0;
                let x_coord = self.reg(x) as usize;
                let y_coord = self.reg(y) as usize;

                // Get sprite, each row is 8 bits
                let height = (sprite_height as usize).min(MAX_SPRITE_HEIGHT);
                let mut sprite = [0; MAX_SPRITE_HEIGHT];
                for (row, byte) in sprite.iter_mut().take(height).enumerate() {
                    *byte = self.memory[self.indexed(row)];
                }

                // Set VF collision flag
                if self.framebuffer.draw_sprite(x_coord, y_coord, &sprite[..height]) {
                    self.registers[FLAG] = 1;
                }
            }

            // Keys outside of the keypad are never considered, in either direction
            Instruction::IfKeyEqVx(Reg(x)) => {
                let key = self.reg(x);
                self.skip_if(self.keypad.is_pressed(key));
            }

            Instruction::IfKeyNeqVx(Reg(x)) => {
                let key = self.reg(x);
                self.skip_if((key as usize) < NUM_KEYS && !self.keypad.is_pressed(key));
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.registers[x as usize] = self.delay_timer;
            }

            // Wait for a key press by running this instruction again until one shows up
            Instruction::SetRegToGetKey(Reg(x)) => match self.keypad.first_pressed() {
                Some(key) => self.registers[x as usize] = key,
                None => self.program_counter = self.current_address(),
            },

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.delay_timer = self.reg(x);
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.sound_timer = self.reg(x);
            }

            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(self.reg(x) as u16);
            }

            // Set i to character address. Each font element is 5 bytes tall.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = font::glyph_addr(self.reg(x));
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let value = self.reg(x);
                let digits = [value / 100, value / 10 % 10, value % 10];
                for (offset, digit) in digits.iter().enumerate() {
                    let addr = self.indexed(offset);
                    self.memory[addr] = *digit;
                }
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                for reg_no in 0..=x as usize {
                    let addr = self.indexed(reg_no);
                    self.memory[addr] = self.registers[reg_no];
                }
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                for reg_no in 0..=x as usize {
                    self.registers[reg_no] = self.memory[self.indexed(reg_no)];
                }
            }
        };

        Ok(())
    }

    fn reg(&self, x: u8) -> u8 {
        self.registers[x as usize]
    }

    /// Write the result first, so that VF ends up holding the flag even when it is the target.
    fn set_with_flag(&mut self, x: u8, value: u8, flag: bool) {
        self.registers[x as usize] = value;
        self.registers[FLAG] = flag as u8;
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter += 2;
        }
    }

    /// Memory address `offset` bytes past I. Addresses wrap around the end of memory.
    fn indexed(&self, offset: usize) -> usize {
        (self.i as usize + offset) % MEM_SIZE
    }

    /// Address of the instruction being executed.
    fn current_address(&self) -> u16 {
        self.program_counter.wrapping_sub(2)
    }

    pub fn pause(&mut self) {
        if self.run_state == RunState::Running {
            log::info!("Pausing at {:#05x}", self.program_counter);
            self.run_state = RunState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.run_state == RunState::Paused {
            log::info!("Resuming at {:#05x}", self.program_counter);
            self.run_state = RunState::Running;
        }
    }

    /// Stop the machine for good. Further cycles are refused.
    pub fn halt(&mut self) {
        if self.run_state != RunState::Halted {
            log::info!("Halting at {:#05x}", self.program_counter);
            self.run_state = RunState::Halted;
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn memory(&self) -> &[u8; MEM_SIZE] {
        &self.memory
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn index_register(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    /// The return addresses currently on the call stack, oldest first.
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.stack_pointer]
    }

    /// The most recently fetched opcode word.
    pub fn current_opcode(&self) -> u16 {
        self.opcode
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    /// A nonzero sound timer means a tone should be playing.
    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// For presenters, to mark the framebuffer as shown.
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// For input sources, to update which keys are held.
    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }
}
