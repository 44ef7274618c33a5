//! Whole programs, run through the public interface only.

use chip_8_vm::emulator::framebuffer::{SCREEN_HEIGHT, SCREEN_WIDTH};
use chip_8_vm::emulator::input::DummyInput;
use chip_8_vm::emulator::instruction::{Const, Instruction, Reg};
use chip_8_vm::emulator::output::DummyOutput;
use chip_8_vm::emulator::{Cycle, Driver, DriverConfig, Emulator, EmulatorError, LoadError, RunState};
use pretty_assertions::assert_eq;

fn run(program: &[u8], cycles: usize) -> Emulator {
    let mut emulator = Emulator::with_seed(7);
    emulator.load(program).unwrap();
    for _ in 0..cycles {
        emulator.step().unwrap();
    }
    emulator
}

#[test]
fn load_then_add() {
    let emulator = run(&[0x61, 0x05, 0x71, 0x03], 2);
    assert_eq!(emulator.registers()[1], 8);
    assert_eq!(emulator.program_counter(), 0x204);
}

#[test]
fn return_with_empty_stack_is_fatal() {
    let mut emulator = Emulator::new();
    emulator.load(&[0x00, 0xEE]).unwrap();
    let error = emulator.step().unwrap_err();
    assert!(error.is_fatal());
    assert_eq!(error, EmulatorError::StackUnderflow { address: 0x200 });
    assert_eq!(emulator.program_counter(), 0x202);
    assert_eq!(emulator.run_state(), RunState::Halted);
}

#[test]
fn delay_timer_floors_at_zero() {
    let mut emulator = run(&[0x65, 0x05, 0xF5, 0x15], 2);
    assert_eq!(emulator.delay_timer(), 5);
    for tick in 1..=7u8 {
        emulator.tick_timers();
        assert_eq!(emulator.delay_timer(), 5u8.saturating_sub(tick));
    }
    assert_eq!(emulator.delay_timer(), 0);
}

#[test]
fn subroutine_draws_digits_with_bcd() {
    let program = [
        0x60, 0x9C, // 0x200: V0 = 156
        0xA3, 0x00, // 0x202: I = 0x300
        0xF0, 0x33, // 0x204: BCD of V0 at I
        0xF2, 0x65, // 0x206: V0..=V2 = hundreds, tens, ones
        0x63, 0x00, // 0x208: V3 = 0 (x)
        0x64, 0x00, // 0x20A: V4 = 0 (y)
        0x22, 0x12, // 0x20C: call 0x212
        0x12, 0x10, // 0x20E: done, loop forever
        0x12, 0x10, // 0x210
        0xF1, 0x29, // 0x212: I = glyph of V1 (tens)
        0xD3, 0x45, // 0x214: draw at (V3, V4)
        0x00, 0xEE, // 0x216: return
    ];
    let emulator = run(&program, 10);
    assert_eq!(&emulator.memory()[0x300..0x303], &[1, 5, 6]);
    assert_eq!(&emulator.registers()[..3], &[1, 5, 6]);
    assert_eq!(emulator.program_counter(), 0x20E);
    assert!(emulator.stack().is_empty());

    // The glyph for 5 starts with a full row, then a single pixel on the left
    let fb = emulator.framebuffer();
    assert!((0..4).all(|x| fb.get(x, 0)));
    assert!(fb.get(0, 1));
    assert!(!fb.get(1, 1));
    assert_eq!(emulator.registers()[0xF], 0);
}

#[test]
fn skips_jump_over_the_next_instruction() {
    let program = [
        0x61, 0x07, // V1 = 7
        0x31, 0x07, // skip if V1 == 7
        0x62, 0x01, // V2 = 1 (skipped)
        0x63, 0x01, // V3 = 1
    ];
    let emulator = run(&program, 3);
    assert_eq!(emulator.registers()[2], 0);
    assert_eq!(emulator.registers()[3], 1);
    assert_eq!(emulator.program_counter(), 0x208);
}

#[test]
fn unknown_opcode_is_reported_and_skipped() {
    let mut emulator = Emulator::new();
    emulator.load(&[0x8A, 0xB8, 0x61, 0x01]).unwrap();
    let error = emulator.step().unwrap_err();
    assert!(!error.is_fatal());
    assert_eq!(error, EmulatorError::UnknownOpcode { opcode: 0x8AB8, address: 0x200 });
    assert_eq!(
        emulator.step(),
        Ok(Cycle::Executed(Instruction::SetRegToConst(Reg(1), Const(1))))
    );
}

#[test]
fn register_skips_ignore_the_low_nibble() {
    let program = [
        0x51, 0x21, // skip if V1 == V2
        0x63, 0x01, // V3 = 1 (skipped)
        0x64, 0x01, // V4 = 1
        0x91, 0x2F, // skip if V1 != V2
        0x65, 0x01, // V5 = 1
    ];
    let emulator = run(&program, 4);
    assert_eq!(emulator.registers()[3], 0);
    assert_eq!(emulator.registers()[4], 1);
    assert_eq!(emulator.registers()[5], 1);
    assert_eq!(emulator.program_counter(), 0x20A);
}

#[test]
fn oversized_program_is_refused() {
    let mut emulator = Emulator::new();
    let program = vec![0x12; 4096 - 512 + 1];
    assert!(matches!(emulator.load(&program), Err(LoadError::TooLarge { .. })));
    assert_eq!(emulator.memory()[0x200], 0);
}

#[test]
fn driver_presents_final_screen() {
    let program = [
        0x60, 0x3C, // V0 = 60
        0x61, 0x1E, // V1 = 30
        0xA2, 0x0A, // I = 0x20A
        0xD0, 0x13, // draw 3 rows at (60, 30)
        0x12, 0x08, // loop forever
        0xFF, 0xFF, 0xFF, // sprite
    ];
    let mut emulator = Emulator::new();
    emulator.load(&program).unwrap();
    let mut driver = Driver::new(emulator, DummyInput, DummyOutput::new(), DriverConfig::default());
    assert_eq!(driver.run_frames(5), Ok(RunState::Running));
    assert_eq!(driver.output().frames(), 1);

    let screen = driver.output().screen().unwrap();
    assert!(screen.get(SCREEN_WIDTH - 1, SCREEN_HEIGHT - 1));
    assert!(screen.get(60, 30));
    assert!(!screen.get(0, 30));
    assert!(!screen.get(60, 0));
    let lit = screen.rows().flat_map(|row| row.iter()).filter(|&&on| on).count();
    assert_eq!(lit, 4 * 2);
}
