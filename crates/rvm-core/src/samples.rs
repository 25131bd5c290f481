//! Sample Programs
//!
//! Small programs exercising each opcode family. The interactive ones expect
//! a host table with a prompt function at [`HOST_PROMPT`] and a print
//! function at [`HOST_PRINT`].

use crate::bytecode::{Instruction as I, Operand};
use crate::program::Program;

/// Host table slot of the line-reading prompt
pub const HOST_PROMPT: usize = 0;
/// Host table slot of the line printer
pub const HOST_PRINT: usize = 1;

/// Names accepted by [`by_name`]
pub const NAMES: [&str; 4] = ["arithmetic", "sign", "fib-loop", "fib-call"];

pub fn by_name(name: &str) -> Option<Program> {
    match name {
        "arithmetic" => Some(arithmetic()),
        "sign" => Some(sign_check()),
        "fib-loop" => Some(fibonacci_loop()),
        "fib-call" => Some(fibonacci_call()),
        _ => None,
    }
}

/// Prints `15`. Needs no host functions.
pub fn arithmetic() -> Program {
    Program::new(vec![
        I::store(5, 0),
        I::store(10, 1),
        I::add(0, 1, 0),
        I::print(0),
    ])
}

/// Prompts for a number and reports whether it is negative.
pub fn sign_check() -> Program {
    Program::new(vec![
        /* 0 */ I::load_global(HOST_PROMPT, 0),
        /* 1 */ I::load_global(HOST_PRINT, 1),
        /* 2 */ I::store("Enter a number: ", 2),
        /* 3 */ I::call_method(0, vec![2], Some(3)),
        /* 4 */ I::store(0, 4),
        /* 5 */ I::store("Not a negative number", 5),
        /* 6 */ I::store("Is a negative number", 6),
        /* 7 */ I::less_than(3, 4, 8),
        /* 8 */ I::jump_if_true(8, 11),
        /* 9 */ I::call_method(1, vec![5], None),
        /* 10 */ I::exit(),
        /* 11 */ I::call_method(1, vec![6], None),
        /* 12 */ I::exit(),
    ])
}

/// Prompts for `n` and prints the Fibonacci sequence up to index `n`
/// using a plain loop.
///
/// Registers: r2 = 1, r3 = prev, r4 = curr, r5 = i, r7 = n, r8 = next.
pub fn fibonacci_loop() -> Program {
    Program::new(vec![
        /* 0 */ I::load_global(HOST_PROMPT, 0),
        /* 1 */ I::load_global(HOST_PRINT, 1),
        /* 2 */ I::store("Enter a number: ", 6),
        /* 3 */ I::call_method(0, vec![6], Some(7)),
        /* 4 */ I::store(1, 2),
        /* 5 */ I::store(0, 3),
        /* 6 */ I::store(1, 4),
        /* 7 */ I::store(2, 5),
        /* 8 */ I::call_method(1, vec![3], None),
        /* 9 */ I::call_method(1, vec![4], None),
        /* 10 */ I::add(3, 4, 8),
        /* 11 */ I::set(4, 3),
        /* 12 */ I::set(8, 4),
        /* 13 */ I::call_method(1, vec![8], None),
        /* 14 */ I::add(5, 2, 5),
        /* 15 */ I::less_than_equals(5, 7, 9),
        /* 16 */ I::jump_if_true(9, 10),
        /* 17 */ I::exit(),
    ])
}

/// Entry point of the step function in [`fibonacci_call`]
pub const FIB_STEP_ADDRESS: usize = 22;

/// Same output as [`fibonacci_loop`], but each step calls a subroutine that
/// takes `(prev, curr)` on the data stack and returns `prev + curr`.
pub fn fibonacci_call() -> Program {
    Program::new(vec![
        /* 0 */ I::load_global(HOST_PROMPT, 0),
        /* 1 */ I::load_global(HOST_PRINT, 1),
        /* 2 */ I::store("Enter a number: ", 6),
        /* 3 */ I::call_method(0, vec![6], Some(7)),
        /* 4 */ I::store(1, 2),
        /* 5 */ I::store(0, 3),
        /* 6 */ I::store(1, 4),
        /* 7 */ I::store(2, 5),
        /* 8 */ I::store(Operand::address(FIB_STEP_ADDRESS), 9),
        /* 9 */ I::call_method(1, vec![3], None),
        /* 10 */ I::call_method(1, vec![4], None),
        /* 11 */ I::push(3),
        /* 12 */ I::push(4),
        /* 13 */ I::call_func(9, 2),
        /* 14 */ I::pop(8),
        /* 15 */ I::set(4, 3),
        /* 16 */ I::set(8, 4),
        /* 17 */ I::call_method(1, vec![8], None),
        /* 18 */ I::add(5, 2, 5),
        /* 19 */ I::less_than_equals(5, 7, 11),
        /* 20 */ I::jump_if_true(11, 11),
        /* 21 */ I::exit(),
        // step(prev, curr) -> prev + curr
        /* 22 */ I::pop(11),
        /* 23 */ I::pop(10),
        /* 24 */ I::add(10, 11, 10),
        /* 25 */ I::push(10),
        /* 26 */ I::ret(),
    ])
}
