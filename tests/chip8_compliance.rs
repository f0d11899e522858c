use chip8_interpreter_rs::chip8_interpreter::config::{
    FLAG_REGISTER, FONT_BYTES, PROGRAM_START, SCREEN_WIDTH,
};
use chip8_interpreter_rs::{
    create_state, execute_opcode, key_down, load_quirks_profile, reset_state, set_key_state, step,
    tick_timers, Chip8Error, MachineState, StepStatus, MODERN_QUIRKS, ORIGINAL_QUIRKS,
    STANDARD_QUIRKS,
};

fn load_program(state: &mut MachineState, opcodes: &[u16]) {
    for (i, opcode) in opcodes.iter().enumerate() {
        let address = PROGRAM_START + i * 2;
        state.memory[address..address + 2].copy_from_slice(&opcode.to_be_bytes());
    }
}

fn pixel(state: &MachineState, x: usize, y: usize) -> u8 {
    state.graphics[x + y * SCREEN_WIDTH]
}

#[test]
fn eight_xy4_adds_with_carry() {
    let mut state = create_state();
    state.registers[1] = 0xFF;
    state.registers[2] = 0x02;

    execute_opcode(&mut state, 0x8124, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.registers[1], 0x01);
    assert_eq!(state.registers[FLAG_REGISTER], 1);

    state.registers[1] = 0x10;
    state.registers[2] = 0x20;
    execute_opcode(&mut state, 0x8124, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.registers[1], 0x30);
    assert_eq!(state.registers[FLAG_REGISTER], 0);
}

#[test]
fn eight_xy5_clears_flag_on_borrow() {
    let mut state = create_state();
    state.registers[1] = 0x02;
    state.registers[2] = 0x05;

    execute_opcode(&mut state, 0x8125, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.registers[1], 0xFD);
    assert_eq!(state.registers[FLAG_REGISTER], 0);

    state.registers[1] = 0x05;
    state.registers[2] = 0x02;
    execute_opcode(&mut state, 0x8125, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.registers[1], 0x03);
    assert_eq!(state.registers[FLAG_REGISTER], 1);
}

#[test]
fn eight_xy6_captures_low_bit() {
    let mut state = create_state();
    state.registers[1] = 0b0000_0011;

    execute_opcode(&mut state, 0x8106, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.registers[1], 0b0000_0001);
    assert_eq!(state.registers[FLAG_REGISTER], 1);
}

#[test]
fn eight_xy7_subtracts_vx_from_vy() {
    let mut state = create_state();
    state.registers[1] = 0x02;
    state.registers[2] = 0x05;

    execute_opcode(&mut state, 0x8127, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.registers[1], 0x03);
    assert_eq!(state.registers[FLAG_REGISTER], 1);

    state.registers[1] = 0x05;
    state.registers[2] = 0x02;
    execute_opcode(&mut state, 0x8127, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.registers[1], 0xFD);
    assert_eq!(state.registers[FLAG_REGISTER], 0);
}

#[test]
fn eight_xye_captures_high_bit() {
    let mut state = create_state();
    state.registers[1] = 0x81;

    execute_opcode(&mut state, 0x810E, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.registers[1], 0x02);
    assert_eq!(state.registers[FLAG_REGISTER], 1);
}

#[test]
fn flag_overwrites_result_when_vf_is_destination() {
    let mut state = create_state();
    state.registers[FLAG_REGISTER] = 0x01;
    state.registers[1] = 0x02;

    execute_opcode(&mut state, 0x8F15, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.registers[FLAG_REGISTER], 0);
}

#[test]
fn original_shifts_read_vy() {
    let mut state = create_state();
    state.registers[1] = 0x00;
    state.registers[2] = 0x03;

    execute_opcode(&mut state, 0x8126, ORIGINAL_QUIRKS).unwrap();

    assert_eq!(state.registers[1], 0x01);
    assert_eq!(state.registers[2], 0x03);
    assert_eq!(state.registers[FLAG_REGISTER], 1);

    state.registers[2] = 0x80;
    execute_opcode(&mut state, 0x812E, ORIGINAL_QUIRKS).unwrap();

    assert_eq!(state.registers[1], 0x00);
    assert_eq!(state.registers[FLAG_REGISTER], 1);
}

#[test]
fn seven_xnn_wraps_and_leaves_flag_alone() {
    let mut state = create_state();
    state.registers[0] = 0xFF;
    state.registers[FLAG_REGISTER] = 0x55;

    execute_opcode(&mut state, 0x7002, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.registers[0], 0x01);
    assert_eq!(state.registers[FLAG_REGISTER], 0x55);
}

#[test]
fn drawing_a_sprite_twice_restores_the_frame() {
    let mut state = create_state();
    state.registers[0] = 10;
    state.registers[1] = 5;
    state.index = 0;
    let blank = state.graphics;

    execute_opcode(&mut state, 0xD015, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.registers[FLAG_REGISTER], 0);
    assert!(state.draw_flag);
    assert_eq!(pixel(&state, 10, 5), 1);
    assert_eq!(pixel(&state, 13, 5), 1);
    assert_eq!(pixel(&state, 14, 5), 0);

    execute_opcode(&mut state, 0xD015, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.graphics, blank);
    assert_eq!(state.registers[FLAG_REGISTER], 1);
    assert_eq!(state.index, 0);
}

#[test]
fn clear_then_draw_leaves_only_the_sprite() {
    let mut state = create_state();
    state.graphics = [1; 64 * 32];
    state.registers[2] = 0x1;

    execute_opcode(&mut state, 0x00E0, STANDARD_QUIRKS).unwrap();
    execute_opcode(&mut state, 0xF229, STANDARD_QUIRKS).unwrap();
    execute_opcode(&mut state, 0xD005, STANDARD_QUIRKS).unwrap();

    let glyph = &FONT_BYTES[5..10];
    let mut expected = [0u8; 64 * 32];
    for (row, bits) in glyph.iter().enumerate() {
        for bit in 0..8 {
            expected[bit + row * SCREEN_WIDTH] = (bits >> (7 - bit)) & 1;
        }
    }
    assert_eq!(state.graphics, expected);
    assert_eq!(state.registers[FLAG_REGISTER], 0);
}

#[test]
fn sprites_clip_at_the_right_edge() {
    let mut state = create_state();
    state.registers[0] = 62;
    state.registers[1] = 0;
    state.index = 0;

    execute_opcode(&mut state, 0xD011, STANDARD_QUIRKS).unwrap();

    assert_eq!(pixel(&state, 62, 0), 1);
    assert_eq!(pixel(&state, 63, 0), 1);
    assert_eq!(pixel(&state, 0, 0), 0);
    assert_eq!(pixel(&state, 1, 0), 0);
}

#[test]
fn modern_sprites_wrap_around_edges() {
    let mut state = create_state();
    state.registers[0] = 62;
    state.registers[1] = 31;
    state.index = 0;

    execute_opcode(&mut state, 0xD012, MODERN_QUIRKS).unwrap();

    assert_eq!(pixel(&state, 63, 31), 1);
    assert_eq!(pixel(&state, 0, 31), 1);
    assert_eq!(pixel(&state, 62, 0), 1);
}

#[test]
fn draw_coordinates_wrap_before_drawing() {
    let mut state = create_state();
    state.registers[0] = 64 + 3;
    state.registers[1] = 32 + 1;
    state.index = 0;

    execute_opcode(&mut state, 0xD011, STANDARD_QUIRKS).unwrap();

    assert_eq!(pixel(&state, 3, 1), 1);
}

#[test]
fn fx55_fx65_round_trip_advances_index() {
    let mut state = create_state();
    state.registers[..4].copy_from_slice(&[1, 2, 3, 4]);
    state.index = 0x300;

    execute_opcode(&mut state, 0xF355, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.memory[0x300..0x304], [1, 2, 3, 4]);
    assert_eq!(state.memory[0x304], 0);
    assert_eq!(state.index, 0x304);

    state.registers = [0; 16];
    state.index = 0x300;
    execute_opcode(&mut state, 0xF365, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.registers[..4], [1, 2, 3, 4]);
    assert_eq!(state.registers[4], 0);
    assert_eq!(state.index, 0x304);
}

#[test]
fn modern_load_store_keeps_index() {
    let mut state = create_state();
    state.index = 0x300;

    execute_opcode(&mut state, 0xF355, MODERN_QUIRKS).unwrap();
    execute_opcode(&mut state, 0xF365, MODERN_QUIRKS).unwrap();

    assert_eq!(state.index, 0x300);
}

#[test]
fn fx33_stores_bcd_digits() {
    let mut state = create_state();
    state.registers[2] = 157;
    state.index = 0x300;

    execute_opcode(&mut state, 0xF233, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.memory[0x300..0x303], [1, 5, 7]);
    assert_eq!(state.index, 0x300);
}

#[test]
fn call_then_return_resumes_after_call_site() {
    let mut state = create_state();
    load_program(&mut state, &[0x2206, 0x6001, 0x0000, 0x00EE]);

    assert_eq!(step(&mut state, STANDARD_QUIRKS).unwrap(), StepStatus::Executed);
    assert_eq!(state.pc, 0x206);
    assert_eq!(state.stack_pointer, 1);

    step(&mut state, STANDARD_QUIRKS).unwrap();
    assert_eq!(state.pc, 0x202);
    assert_eq!(state.stack_pointer, 0);

    step(&mut state, STANDARD_QUIRKS).unwrap();
    assert_eq!(state.registers[0], 1);
}

#[test]
fn jumps_do_not_add_the_fetch_increment() {
    let mut state = create_state();
    load_program(&mut state, &[0x1ABC]);

    step(&mut state, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.pc, 0xABC);
}

#[test]
fn bnnn_offsets_by_v0_or_vx() {
    let mut state = create_state();
    state.registers[0] = 0x04;
    state.registers[3] = 0x02;
    load_program(&mut state, &[0xB310]);

    step(&mut state, STANDARD_QUIRKS).unwrap();
    assert_eq!(state.pc, 0x314);

    state.pc = 0x200;
    step(&mut state, MODERN_QUIRKS).unwrap();
    assert_eq!(state.pc, 0x312);
}

#[test]
fn skips_advance_by_four_or_two() {
    let cases = [
        (0x3142, 0x204),
        (0x3143, 0x202),
        (0x4143, 0x204),
        (0x4142, 0x202),
        (0x5120, 0x204),
        (0x5130, 0x202),
        (0x9130, 0x204),
        (0x9120, 0x202),
    ];

    for (opcode, expected_pc) in cases {
        let mut state = create_state();
        state.registers[1] = 0x42;
        state.registers[2] = 0x42;
        state.registers[3] = 0x07;
        load_program(&mut state, &[opcode]);

        step(&mut state, STANDARD_QUIRKS).unwrap();

        assert_eq!(state.pc, expected_pc, "opcode {opcode:04X}");
    }
}

#[test]
fn key_skips_follow_keypad() {
    let mut state = create_state();
    state.registers[1] = 0xA;
    set_key_state(&mut state, 0xA, true);
    let start_pc = state.pc;

    execute_opcode(&mut state, 0xE19E, STANDARD_QUIRKS).unwrap();
    assert_eq!(state.pc, start_pc + 2);

    execute_opcode(&mut state, 0xE1A1, STANDARD_QUIRKS).unwrap();
    assert_eq!(state.pc, start_pc + 2);

    set_key_state(&mut state, 0xA, false);
    execute_opcode(&mut state, 0xE1A1, STANDARD_QUIRKS).unwrap();
    assert_eq!(state.pc, start_pc + 4);
}

#[test]
fn unknown_opcodes_fault_without_side_effects() {
    let invalid = [
        0x0000, 0x00FD, 0x0123, 0x5121, 0x8128, 0x812F, 0x9121, 0xE1FF, 0xF1FF,
    ];

    for opcode in invalid {
        let mut state = create_state();
        state.registers[1] = 0x11;
        load_program(&mut state, &[opcode]);
        let mut expected = state.clone();

        let result = step(&mut state, STANDARD_QUIRKS);

        assert!(
            matches!(result, Err(Chip8Error::InvalidOpcode { opcode: op, pc: 0x200 }) if op == opcode),
            "opcode {opcode:04X}: {result:?}"
        );
        expected.opcode = opcode;
        assert_eq!(state, expected);
    }
}

#[test]
fn seventeenth_nested_call_overflows_the_stack() {
    let mut state = create_state();
    load_program(&mut state, &[0x2200]);

    for _ in 0..16 {
        step(&mut state, STANDARD_QUIRKS).unwrap();
    }
    assert_eq!(state.stack_pointer, 16);

    let result = step(&mut state, STANDARD_QUIRKS);

    assert!(matches!(result, Err(Chip8Error::StackOverflow { pc: 0x200 })));
    assert_eq!(state.stack_pointer, 16);
    assert_eq!(state.pc, 0x200);
}

#[test]
fn return_with_empty_stack_underflows() {
    let mut state = create_state();
    load_program(&mut state, &[0x00EE]);

    let result = step(&mut state, STANDARD_QUIRKS);

    assert!(matches!(result, Err(Chip8Error::StackUnderflow { pc: 0x200 })));
    assert!(result.unwrap_err().is_fault());
    assert_eq!(state.pc, 0x200);
    assert_eq!(state.stack_pointer, 0);
}

#[test]
fn fx0a_suspends_until_a_new_key_down() {
    let mut state = create_state();
    load_program(&mut state, &[0xF30A, 0x6001]);
    set_key_state(&mut state, 0x5, true);

    assert_eq!(
        step(&mut state, STANDARD_QUIRKS).unwrap(),
        StepStatus::WaitingForKey
    );
    assert_eq!(state.pc, 0x202);
    assert_eq!(
        step(&mut state, STANDARD_QUIRKS).unwrap(),
        StepStatus::WaitingForKey
    );
    assert_eq!(state.pc, 0x202);
    assert_eq!(state.registers[3], 0);

    key_down(&mut state, 0x7);

    assert_eq!(state.registers[3], 0x7);
    assert!(state.keys[0x7]);
    assert!(!state.is_waiting_for_key());
    assert_eq!(step(&mut state, STANDARD_QUIRKS).unwrap(), StepStatus::Executed);
    assert_eq!(state.registers[0], 1);
}

#[test]
fn memory_access_past_the_end_faults() {
    let mut state = create_state();
    state.registers[0] = 157;
    state.index = 0xFFE;
    load_program(&mut state, &[0xF033, 0xF155, 0xD015]);
    let memory_before = state.memory;

    let result = step(&mut state, STANDARD_QUIRKS);

    assert!(matches!(
        result,
        Err(Chip8Error::MemoryOutOfBounds { address: 0x1000, pc: 0x200 })
    ));
    assert_eq!(state.memory, memory_before);
    assert_eq!(state.pc, 0x200);

    state.index = 0xFFF;
    state.pc = 0x202;
    assert!(matches!(
        step(&mut state, STANDARD_QUIRKS),
        Err(Chip8Error::MemoryOutOfBounds { .. })
    ));
    assert_eq!(state.index, 0xFFF);

    state.pc = 0x204;
    assert!(matches!(
        step(&mut state, STANDARD_QUIRKS),
        Err(Chip8Error::MemoryOutOfBounds { .. })
    ));
    assert!(state.graphics.iter().all(|pixel| *pixel == 0));
}

#[test]
fn fx1e_wraps_at_sixteen_bits() {
    let mut state = create_state();
    state.index = 0xFFFF;
    state.registers[1] = 2;

    execute_opcode(&mut state, 0xF11E, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.index, 0x0001);
}

#[test]
fn fetch_past_the_end_of_memory_faults() {
    let mut state = create_state();
    state.pc = 0xFFF;

    let result = step(&mut state, STANDARD_QUIRKS);

    assert!(matches!(
        result,
        Err(Chip8Error::ProgramCounterOutOfBounds(0xFFF))
    ));
}

#[test]
fn fx29_points_at_glyph() {
    let mut state = create_state();
    state.registers[1] = 0xA;

    execute_opcode(&mut state, 0xF129, STANDARD_QUIRKS).unwrap();
    assert_eq!(state.index, 50);

    state.registers[1] = 0x1B;
    execute_opcode(&mut state, 0xF129, STANDARD_QUIRKS).unwrap();
    assert_eq!(state.index, 0x1B * 5);
}

#[test]
fn skip_at_top_of_address_space_wraps_pc() {
    let mut state = create_state();
    state.registers[1] = 0x42;
    state.pc = 0xFFFE;

    execute_opcode(&mut state, 0x3142, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.pc, 0x0000);
}

#[test]
fn cxnn_masks_random_byte() {
    let mut state = create_state();

    for _ in 0..100 {
        execute_opcode(&mut state, 0xC10F, STANDARD_QUIRKS).unwrap();
        assert!(state.registers[1] <= 0x0F);
    }

    execute_opcode(&mut state, 0xC100, STANDARD_QUIRKS).unwrap();
    assert_eq!(state.registers[1], 0);
}

#[test]
fn timer_opcodes_move_values() {
    let mut state = create_state();
    state.registers[1] = 30;
    state.registers[2] = 4;

    execute_opcode(&mut state, 0xF115, STANDARD_QUIRKS).unwrap();
    execute_opcode(&mut state, 0xF218, STANDARD_QUIRKS).unwrap();
    execute_opcode(&mut state, 0xF307, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.delay_timer, 30);
    assert_eq!(state.sound_timer, 4);
    assert_eq!(state.registers[3], 30);
}

#[test]
fn step_does_not_tick_timers() {
    let mut state = create_state();
    state.sound_timer = 5;
    load_program(&mut state, &[0x6001]);

    step(&mut state, STANDARD_QUIRKS).unwrap();

    assert_eq!(state.delay_timer, 60);
    assert_eq!(state.sound_timer, 5);
}

#[test]
fn beep_fires_once_when_sound_timer_runs_out() {
    let mut state = create_state();
    state.sound_timer = 2;
    let mut beeps = 0;

    for _ in 0..4 {
        tick_timers(&mut state, STANDARD_QUIRKS, Some(&mut || beeps += 1));
    }

    assert_eq!(beeps, 1);
    assert_eq!(state.sound_timer, 0);
    assert_eq!(state.delay_timer, 56);
}

#[test]
fn reset_restores_boot_layout() {
    let mut state = create_state();
    load_program(&mut state, &[0x6001, 0xA300, 0xD005]);
    for _ in 0..3 {
        step(&mut state, STANDARD_QUIRKS).unwrap();
    }

    reset_state(&mut state);

    assert_eq!(state, create_state());
    assert_eq!(state.pc, 0x200);
    assert_eq!(state.delay_timer, 60);
    assert_eq!(state.memory[..80], FONT_BYTES);
}

#[test]
fn quirk_profiles_resolve_by_name() {
    assert_eq!(load_quirks_profile("standard").unwrap(), STANDARD_QUIRKS);
    assert_eq!(load_quirks_profile("original").unwrap(), ORIGINAL_QUIRKS);
    assert_eq!(load_quirks_profile("modern").unwrap(), MODERN_QUIRKS);
    assert!(load_quirks_profile("schip").is_err());
}
