/*!

A CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

The machine is a deterministic state machine. Something outside of it calls
[`Emulator::step`](emulator::Emulator::step) to run one instruction and, at a separate pace,
[`Emulator::tick_timers`](emulator::Emulator::tick_timers). It never blocks. The "wait for key"
instruction simply runs again on the next cycle until a key is held.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
You can then use the keys 0-9 and a-f to give input, but which ones to use depend on the CHIP-8 program.
Space pauses, Esc quits.

# Library

The main way of running a program is to load instructions as bytes.

```rust
use chip_8_vm::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let program = [0x61, 0x05, 0x71, 0x03];
emulator.load(&program).unwrap();
emulator.step().unwrap();
emulator.step().unwrap();
assert_eq!(emulator.registers()[1], 8);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip_8_vm::emulator::Emulator;
use chip_8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();
assert_eq!(emulator.program_counter(), 0x250);
```

## Custom input and output

To hook up a keyboard, a screen and a speaker, implement `EmulatorInput` and `EmulatorOutput`.
Take a look at `src/emulator/input.rs` and `src/emulator/output.rs` to see how to implement them,
then hand them to a `Driver`, which paces cycles and timers for you.

```ignore
use chip_8_vm::emulator::{Driver, DriverConfig, Emulator};

let mut driver = Driver::new(Emulator::new(), MyInput::new(), MyOutput::new(), DriverConfig::default());
driver.run()?;
```

This is how the crossterm frontend is built.
*/

pub mod emulator;
pub mod util;
