//! Virtual Machine Core
//!
//! Defines the register VM and its fetch-decode-execute loop.
//!
//! Each cycle fetches the instruction at the program counter, advances the
//! counter, decodes the opcode and runs its handler. Handlers validate every
//! operand before mutating anything, so a failing instruction leaves the
//! machine as it found it (apart from the advanced counter) and halts it.

use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::bytecode::{Instruction, OpCode};
use crate::config::VmConfig;
use crate::error::{VmError, VmResult};
use crate::host::{HostTable, OutputSink};
use crate::program::Program;

use super::frame::{CallStack, Frame};
use super::registers::RegisterFile;
use super::stack::DataStack;
use super::value::Value;

/// Why the VM stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// EXIT executed
    Exit,
    /// Program counter ran past the last instruction
    EndOfProgram,
    /// An instruction failed
    Fault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmState {
    Running,
    Halted(HaltReason),
}

/// Result of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub halt: HaltReason,
    /// Instructions executed since construction
    pub steps: u64,
}

/// Register virtual machine
pub struct VirtualMachine {
    config: VmConfig,
    program: Rc<Program>,

    registers: RegisterFile,
    stack: DataStack,
    calls: CallStack,
    fp: usize,

    hosts: HostTable,
    output: Box<dyn OutputSink>,

    pc: usize,
    state: VmState,
    steps: u64,
}

impl VirtualMachine {
    /// Create a new VM instance, ready to run from instruction 0
    pub fn new(
        config: VmConfig,
        program: impl Into<Program>,
        hosts: HostTable,
        output: impl OutputSink + 'static,
    ) -> Self {
        VirtualMachine {
            registers: RegisterFile::new(config.register_count),
            stack: DataStack::new(),
            calls: CallStack::new(),
            fp: 0,
            program: Rc::new(program.into()),
            hosts,
            output: Box::new(output),
            pc: 0,
            state: VmState::Running,
            steps: 0,
            config,
        }
    }

    /// Execute until EXIT, the end of the program, or an error.
    ///
    /// Calling `run` on a halted machine returns immediately.
    pub fn run(&mut self) -> VmResult<RunReport> {
        while self.state == VmState::Running {
            self.step()?;
        }
        let halt = match self.state {
            VmState::Halted(reason) => reason,
            VmState::Running => HaltReason::EndOfProgram,
        };
        debug!(?halt, steps = self.steps, "vm halted");
        Ok(RunReport {
            halt,
            steps: self.steps,
        })
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> VmResult<()> {
        if self.state != VmState::Running {
            return Ok(());
        }

        let program = Rc::clone(&self.program);
        let pc = self.pc;
        let Some(instr) = program.fetch(pc) else {
            self.state = VmState::Halted(HaltReason::EndOfProgram);
            return Ok(());
        };

        let result = self.check_budget().and_then(|()| {
            self.pc += 1;
            self.steps += 1;
            self.dispatch(instr)
        });

        if let Err(err) = &result {
            self.state = VmState::Halted(HaltReason::Fault);
            warn!(pc, opcode = %instr.opcode, error = %err, "instruction failed");
        }
        result
    }

    fn check_budget(&self) -> VmResult<()> {
        match self.config.max_steps {
            Some(limit) if self.steps >= limit => Err(VmError::StepLimitExceeded(limit)),
            _ => Ok(()),
        }
    }

    /// Decode and execute (dispatch only)
    fn dispatch(&mut self, instr: &Instruction) -> VmResult<()> {
        let op = instr.decode()?;
        trace!(pc = self.pc - 1, opcode = %op, "dispatch");

        match op {
            OpCode::Store => {
                let value = instr.arg1(op)?.to_value();
                self.registers.set(instr.target_index(op)?, value)
            }
            OpCode::Set => {
                let value = self.registers.get(instr.arg1_index(op)?)?.clone();
                self.registers.set(instr.target_index(op)?, value)
            }

            OpCode::Add => {
                let (a, b) = self.registers.numbers(instr.arg1_index(op)?, instr.arg2_index(op)?, op)?;
                let sum = a.checked_add(b).ok_or(VmError::ArithmeticOverflow)?;
                self.registers.set(instr.target_index(op)?, Value::Number(sum))
            }

            OpCode::Equals => {
                let lhs = self.registers.get(instr.arg1_index(op)?)?;
                let rhs = self.registers.get(instr.arg2_index(op)?)?;
                let equal = lhs.equals(rhs).ok_or(VmError::TypeMismatch {
                    opcode: op.mnemonic(),
                    expected: "matching Number, Boolean or Text",
                    left: lhs.kind(),
                    right: rhs.kind(),
                })?;
                self.registers.set(instr.target_index(op)?, Value::Boolean(equal))
            }
            OpCode::LessThan | OpCode::LessThanEquals => {
                let (a, b) = self.registers.numbers(instr.arg1_index(op)?, instr.arg2_index(op)?, op)?;
                let result = if op == OpCode::LessThan { a < b } else { a <= b };
                self.registers.set(instr.target_index(op)?, Value::Boolean(result))
            }

            OpCode::Push => {
                let value = self.registers.get(instr.arg1_index(op)?)?.clone();
                self.stack.push(value);
                Ok(())
            }
            OpCode::Pop => {
                let target = instr.target_index(op)?;
                self.registers.check(target)?;
                // Slots below the frame pointer belong to the caller.
                if self.stack.len() <= self.fp {
                    return Err(VmError::StackUnderflow);
                }
                let value = self.stack.pop()?;
                self.registers.set(target, value)
            }

            OpCode::Jump => {
                self.pc = instr.target_index(op)?;
                Ok(())
            }
            OpCode::JumpIfTrue | OpCode::JumpIfFalse => {
                let target = instr.target_index(op)?;
                let wanted = op == OpCode::JumpIfTrue;
                // Only an exact Boolean match jumps.
                if self.registers.get(instr.arg1_index(op)?)? == &Value::Boolean(wanted) {
                    self.pc = target;
                }
                Ok(())
            }
            OpCode::CallFunc => self.call_func(instr, op),
            OpCode::Return => self.ret(),

            OpCode::LoadGlobal => {
                let host = self.hosts.resolve(instr.arg1_index(op)?)?;
                self.registers.set(instr.target_index(op)?, Value::Host(host))
            }
            OpCode::CallMethod => self.call_method(instr, op),
            OpCode::Print => {
                let line = self.registers.get(instr.arg1_index(op)?)?.to_string();
                self.output.write_line(&line)
            }

            OpCode::Exit => {
                self.state = VmState::Halted(HaltReason::Exit);
                Ok(())
            }
        }
    }

    /// CALL_FUNC: save (return pc, frame pointer), open a frame over the top
    /// `argCount` stack entries and jump to the function address.
    fn call_func(&mut self, instr: &Instruction, op: OpCode) -> VmResult<()> {
        let register = instr.arg1_index(op)?;
        let address = match self.registers.get(register)? {
            Value::Address(addr) => *addr,
            _ => return Err(VmError::InvalidFunctionAddress(register)),
        };

        let argc = instr.arg_count;
        if self.stack.len() < argc {
            return Err(VmError::StackUnderflow);
        }
        if let Some(limit) = self.config.max_call_depth {
            if self.calls.depth() >= limit {
                return Err(VmError::CallDepthExceeded(limit));
            }
        }

        self.calls.push(Frame {
            return_pc: self.pc,
            saved_fp: self.fp,
        });
        self.fp = self.stack.len() - argc;
        self.pc = address;
        debug!(address, argc, fp = self.fp, depth = self.calls.depth(), "call");
        Ok(())
    }

    /// RETURN: pop the return value, drop the callee frame, restore the
    /// frame pointer then the program counter, and hand the value back.
    fn ret(&mut self) -> VmResult<()> {
        if self.calls.is_empty() {
            return Err(VmError::CallStackUnderflow);
        }
        if self.stack.len() <= self.fp {
            return Err(VmError::StackUnderflow);
        }

        let value = self.stack.pop()?;
        self.stack.truncate(self.fp)?;
        let frame = self.calls.pop()?;
        self.fp = frame.saved_fp;
        self.pc = frame.return_pc;
        self.stack.push(value);
        debug!(return_pc = self.pc, fp = self.fp, depth = self.calls.depth(), "return");
        Ok(())
    }

    /// CALL_METHOD: invoke a host function with register arguments
    fn call_method(&mut self, instr: &Instruction, op: OpCode) -> VmResult<()> {
        let register = instr.arg1_index(op)?;
        let host = match self.registers.get(register)? {
            Value::Host(host) => *host,
            _ => return Err(VmError::NotCallable(register)),
        };

        let args = instr
            .args
            .iter()
            .map(|&index| self.registers.get(index).cloned())
            .collect::<VmResult<Vec<_>>>()?;
        if let Some(target) = instr.target {
            self.registers.check(target)?;
        }

        let result = self.hosts.invoke(host, &args)?;
        match (instr.target, result) {
            (Some(target), Some(value)) => self.registers.set(target, value),
            _ => Ok(()),
        }
    }

    /// Index of the next instruction to fetch
    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn frame_pointer(&self) -> usize {
        self.fp
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn register(&self, index: usize) -> VmResult<&Value> {
        self.registers.get(index)
    }

    pub fn data_stack(&self) -> &DataStack {
        &self.stack
    }

    pub fn call_depth(&self) -> usize {
        self.calls.depth()
    }

    pub fn state(&self) -> VmState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state != VmState::Running
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}
