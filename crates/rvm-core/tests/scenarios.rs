use rvm_core::samples;
use rvm_core::{
    HaltReason, HostTable, Instruction as I, Operand, Program, ProgramLoader, Transcript, Value,
    VirtualMachine, VmConfig, VmError,
};
use rvm_host::{standard_table, ScriptedInput};

// Build a VM wired to scripted input and a transcript of printed lines.
fn scripted(program: Program, responses: Vec<i64>) -> (VirtualMachine, Transcript) {
    let out = Transcript::new();
    let hosts = standard_table(ScriptedInput::new(responses), out.clone());
    let vm = VirtualMachine::new(VmConfig::new(), program, hosts, out.clone());
    (vm, out)
}

fn fib_output() -> Vec<&'static str> {
    vec!["0", "1", "1", "2", "3", "5"]
}

#[test]
fn straight_line_arithmetic_prints_15() {
    let out = Transcript::new();
    let mut vm = VirtualMachine::new(VmConfig::new(), samples::arithmetic(), HostTable::new(), out.clone());
    vm.run().expect("execution failed");
    assert_eq!(out.lines(), vec!["15"]);
}

#[test]
fn conditional_branch_on_sign() {
    // r0 = v; r8 = v < 0; branch to the matching message.
    let program = |v: i64| {
        Program::new(vec![
            /* 0 */ I::store(v, 0),
            /* 1 */ I::store(0, 1),
            /* 2 */ I::store("Not a negative number", 5),
            /* 3 */ I::store("Is a negative number", 6),
            /* 4 */ I::less_than(0, 1, 8),
            /* 5 */ I::jump_if_true(8, 8),
            /* 6 */ I::print(5),
            /* 7 */ I::exit(),
            /* 8 */ I::print(6),
            /* 9 */ I::exit(),
        ])
    };

    for (v, expected) in [(-10, "Is a negative number"), (10, "Not a negative number")] {
        let out = Transcript::new();
        let mut vm = VirtualMachine::new(VmConfig::new(), program(v), HostTable::new(), out.clone());
        let report = vm.run().expect("execution failed");
        assert_eq!(report.halt, HaltReason::Exit);
        assert_eq!(out.lines(), vec![expected]);
    }
}

#[test]
fn sign_check_sample_reads_host_input() {
    for (input, expected) in [(-10, "Is a negative number"), (10, "Not a negative number")] {
        let (mut vm, out) = scripted(samples::sign_check(), vec![input]);
        vm.run().expect("execution failed");
        assert_eq!(out.lines(), vec![expected]);
    }
}

#[test]
fn fibonacci_loop_prints_sequence() {
    let (mut vm, out) = scripted(samples::fibonacci_loop(), vec![5]);
    let report = vm.run().expect("execution failed");
    assert_eq!(report.halt, HaltReason::Exit);
    assert_eq!(out.lines(), fib_output());
}

#[test]
fn fibonacci_via_subroutine_matches_loop() {
    let (mut vm, out) = scripted(samples::fibonacci_call(), vec![5]);
    let report = vm.run().expect("execution failed");
    assert_eq!(report.halt, HaltReason::Exit);
    assert_eq!(out.lines(), fib_output());
    assert_eq!(vm.call_depth(), 0);
    assert_eq!(vm.frame_pointer(), 0);
    assert!(vm.data_stack().is_empty());
}

#[test]
fn call_method_on_number_is_not_callable() {
    let program = Program::new(vec![
        I::load_global(samples::HOST_PRINT, 1),
        I::store(5, 0),
        I::call_method(0, vec![0], None),
        I::call_method(1, vec![0], None),
    ]);
    let (mut vm, out) = scripted(program, vec![]);
    let err = vm.run().unwrap_err();
    assert!(matches!(err, VmError::NotCallable(0)));
    assert!(out.is_empty());
}

#[test]
fn runs_are_deterministic() {
    let run = || {
        let (mut vm, out) = scripted(samples::fibonacci_call(), vec![8]);
        vm.run().expect("execution failed");
        (out.lines(), vm.registers().snapshot())
    };
    let (first_out, first_regs) = run();
    let (second_out, second_regs) = run();
    assert_eq!(first_out, second_out);
    assert_eq!(first_regs, second_regs);
    assert_eq!(first_out.last().map(String::as_str), Some("21"));
}

#[test]
fn push_then_pop_round_trips_every_kind() {
    let literals = [
        Operand::Int(-4),
        Operand::Bool(true),
        Operand::Text("text".into()),
        Operand::address(3),
    ];
    let program: Vec<I> = literals
        .iter()
        .flat_map(|literal| [I::store(literal.clone(), 0), I::push(0), I::pop(1)])
        .collect();

    let mut vm = VirtualMachine::new(VmConfig::new(), program, HostTable::new(), Transcript::new());
    for literal in &literals {
        vm.step().expect("store");
        vm.step().expect("push");
        assert_eq!(vm.data_stack().len(), 1);
        vm.step().expect("pop");
        assert!(vm.data_stack().is_empty());
        assert_eq!(vm.register(1).expect("r1"), &literal.to_value());
    }
}

#[test]
fn host_handles_round_trip_through_stack() {
    let hosts = standard_table(ScriptedInput::default(), Transcript::new());
    let program = vec![I::load_global(1, 0), I::push(0), I::pop(1)];
    let mut vm = VirtualMachine::new(VmConfig::new(), program, hosts, Transcript::new());
    vm.run().expect("execution failed");
    assert_eq!(vm.register(1).expect("r1"), vm.register(0).expect("r0"));
    assert!(matches!(vm.register(1).expect("r1"), Value::Host(_)));
}

#[test]
fn callee_stack_values_are_discarded_on_return() {
    let program = vec![
        /* 0 */ I::store(99, 0),
        /* 1 */ I::push(0),
        /* 2 */ I::store(7, 1),
        /* 3 */ I::push(1),
        /* 4 */ I::store(Operand::address(8), 2),
        /* 5 */ I::call_func(2, 1),
        /* 6 */ I::pop(3),
        /* 7 */ I::exit(),
        /* 8 */ I::push(1),
        /* 9 */ I::push(1),
        /* 10 */ I::add(1, 1, 4),
        /* 11 */ I::push(4),
        /* 12 */ I::ret(),
    ];
    let mut vm = VirtualMachine::new(VmConfig::new(), program, HostTable::new(), Transcript::new());

    for _ in 0..6 {
        vm.step().expect("step failed");
    }
    assert_eq!(vm.frame_pointer(), 1);
    assert_eq!(vm.call_depth(), 1);

    for _ in 0..5 {
        vm.step().expect("step failed");
    }
    assert_eq!(vm.pc(), 6);
    assert_eq!(vm.frame_pointer(), 0);
    assert_eq!(vm.data_stack().as_slice(), &[Value::Number(99), Value::Number(14)]);

    vm.run().expect("execution failed");
    assert_eq!(vm.register(3).expect("r3"), &Value::Number(14));
    assert_eq!(vm.data_stack().as_slice(), &[Value::Number(99)]);
}

#[test]
fn callee_cannot_pop_below_its_frame() {
    let program = vec![
        /* 0 */ I::store(1, 0),
        /* 1 */ I::push(0),
        /* 2 */ I::store(2, 1),
        /* 3 */ I::push(1),
        /* 4 */ I::store(Operand::address(7), 2),
        /* 5 */ I::call_func(2, 0),
        /* 6 */ I::exit(),
        /* 7 */ I::pop(3),
        /* 8 */ I::push(0),
        /* 9 */ I::ret(),
    ];
    let mut vm = VirtualMachine::new(VmConfig::new(), program, HostTable::new(), Transcript::new());

    let err = vm.run().unwrap_err();
    assert!(matches!(err, VmError::StackUnderflow));
    assert_eq!(vm.pc(), 8);
    assert_eq!(vm.frame_pointer(), 2);
    assert_eq!(vm.call_depth(), 1);
    assert_eq!(vm.data_stack().as_slice(), &[Value::Number(1), Value::Number(2)]);
    assert_eq!(vm.register(3).expect("r3"), &Value::Number(0));
}

#[test]
fn nested_calls_resume_after_each_call_site() {
    let program = vec![
        /* 0 */ I::store(Operand::address(9), 0),
        /* 1 */ I::store(Operand::address(14), 1),
        /* 2 */ I::store(1, 2),
        /* 3 */ I::store(50, 6),
        /* 4 */ I::push(6),
        /* 5 */ I::push(2),
        /* 6 */ I::call_func(0, 1),
        /* 7 */ I::pop(5),
        /* 8 */ I::exit(),
        // outer(x) = inner(x), keeping x as a local
        /* 9 */ I::pop(3),
        /* 10 */ I::push(3),
        /* 11 */ I::push(3),
        /* 12 */ I::call_func(1, 1),
        /* 13 */ I::ret(),
        // inner(x) = x + x
        /* 14 */ I::pop(4),
        /* 15 */ I::add(4, 4, 4),
        /* 16 */ I::push(4),
        /* 17 */ I::ret(),
    ];
    let mut vm = VirtualMachine::new(VmConfig::new(), program, HostTable::new(), Transcript::new());

    // (call site, depth, frame pointer) on entry; (resume pc, frame pointer) on return
    let mut entered = Vec::new();
    let mut resumed = Vec::new();
    while !vm.is_halted() {
        let before = vm.call_depth();
        let at = vm.pc();
        vm.step().expect("step failed");
        if vm.call_depth() > before {
            entered.push((at, vm.call_depth(), vm.frame_pointer()));
        }
        if vm.call_depth() < before {
            resumed.push((vm.pc(), vm.frame_pointer()));
        }
    }

    assert_eq!(entered, vec![(6, 1, 1), (12, 2, 2)]);
    assert_eq!(resumed, vec![(13, 1), (7, 0)]);
    assert_eq!(vm.register(5).expect("r5"), &Value::Number(2));
    assert_eq!(vm.data_stack().as_slice(), &[Value::Number(50)]);
    assert_eq!(vm.call_depth(), 0);
}

#[test]
fn bundled_program_files_match_samples() {
    let root = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos");
    for name in samples::NAMES {
        let path = std::path::Path::new(root).join(format!("{}.json", name));
        let loaded = ProgramLoader::load(&path).expect("demo file loads");
        assert_eq!(Some(loaded), samples::by_name(name), "{}", name);
    }
}
