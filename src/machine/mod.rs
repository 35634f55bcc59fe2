//! The switchyard machine: one VM instance and its execution engine.
//!
//! A machine owns a growable memory, an instruction pointer, a relative
//! base register and a FIFO input queue. [`Machine::run`] executes the
//! fetch-decode-execute loop until the program halts, fails, or blocks on
//! an empty input queue.
//!
//! Blocking is the crate's suspension contract: an Input instruction that
//! finds the queue empty returns control to the caller *without consuming
//! the instruction word*, so a later `run` re-decodes the same Input and
//! resumes transparently once the orchestrator has fed more values. The
//! orchestrators in `pipeline` and `network` are built entirely on this
//! contract.

pub mod decode;

use crate::core::{
    Address, InputQueue, MachineError, MachineResult, Memory, MemoryOperation, Word,
    DEFAULT_ADDRESS_CEILING,
};
use decode::{Instruction, Mode, Opcode};

/// Execution status of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineStatus {
    /// The machine can make progress.
    Running,
    /// An Input instruction found the queue empty; the machine resumes
    /// from the same instruction once input arrives.
    BlockedOnInput,
    /// A Halt instruction executed. Terminal.
    Halted,
}

impl MachineStatus {
    /// Whether the machine will never make progress again.
    #[inline]
    pub fn is_halted(&self) -> bool {
        matches!(self, MachineStatus::Halted)
    }
}

/// Result of one [`Machine::run`] call.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Outputs produced during this call, in emission order. Not
    /// cumulative across calls.
    pub outputs: Vec<Word>,
    /// Status the machine was left in.
    pub status: MachineStatus,
    /// Instructions executed during this call.
    pub steps: u64,
}

/// Configuration for a machine.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    /// Maximum instructions per `run` call (0 = unlimited). Bounds a
    /// program that loops without halting or blocking.
    pub max_steps: u64,
    /// Ceiling on the materialized address space.
    pub address_ceiling: Address,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_steps: 10_000_000,
            address_ceiling: DEFAULT_ADDRESS_CEILING,
        }
    }
}

/// One virtual machine instance.
///
/// Constructed from a copied program image, so instances never alias and
/// are fully independent of each other.
#[derive(Debug, Clone)]
pub struct Machine {
    memory: Memory,
    ip: Address,
    relative_base: Word,
    inputs: InputQueue,
    status: MachineStatus,
    config: MachineConfig,
}

impl Machine {
    /// Create a machine from a program image and initial inputs.
    pub fn new(image: &[Word], inputs: &[Word]) -> Self {
        Self::with_config(image, inputs, MachineConfig::default())
    }

    /// Create a machine with a custom configuration.
    pub fn with_config(image: &[Word], inputs: &[Word], config: MachineConfig) -> Self {
        Self {
            memory: Memory::with_ceiling(image, config.address_ceiling),
            ip: 0,
            relative_base: 0,
            inputs: InputQueue::from_values(inputs),
            status: MachineStatus::Running,
            config,
        }
    }

    /// Append values to the input queue.
    pub fn feed(&mut self, values: &[Word]) {
        self.inputs.extend(values);
    }

    /// Read a memory cell, for result extraction after a run.
    pub fn peek(&self, addr: Word) -> MachineResult<Word> {
        self.memory.read_for(addr, MemoryOperation::Peek)
    }

    /// Overwrite a memory cell, for patching an image before a run.
    pub fn poke(&mut self, addr: Word, value: Word) -> MachineResult<()> {
        self.memory.write_for(addr, value, MemoryOperation::Poke)
    }

    /// Current status.
    #[inline]
    pub fn status(&self) -> MachineStatus {
        self.status
    }

    /// Current instruction pointer.
    #[inline]
    pub fn ip(&self) -> Address {
        self.ip
    }

    /// Current relative base register.
    #[inline]
    pub fn relative_base(&self) -> Word {
        self.relative_base
    }

    /// Number of values waiting in the input queue.
    #[inline]
    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Run until the machine halts, blocks on input, or fails.
    ///
    /// Returns the outputs emitted during this call and the status the
    /// machine was left in. Calling `run` on a halted machine, or on a
    /// blocked machine whose queue is still empty, returns immediately
    /// with no outputs and unchanged state.
    pub fn run(&mut self) -> MachineResult<RunResult> {
        let mut outputs = Vec::new();
        let mut steps: u64 = 0;

        if self.status.is_halted() {
            return Ok(RunResult { outputs, status: self.status, steps });
        }
        self.status = MachineStatus::Running;

        loop {
            if self.config.max_steps > 0 && steps >= self.config.max_steps {
                return Err(MachineError::StepLimitExceeded { limit: self.config.max_steps });
            }

            let inst = self.fetch()?;
            match self.execute(inst, &mut outputs)? {
                Step::Continue => {}
                Step::Suspend => {
                    self.status = MachineStatus::BlockedOnInput;
                    break;
                }
                Step::Halt => {
                    self.status = MachineStatus::Halted;
                    steps += 1;
                    break;
                }
            }
            steps += 1;
        }

        Ok(RunResult { outputs, status: self.status, steps })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Fetch & Decode
    // ═══════════════════════════════════════════════════════════════════

    /// Decode the instruction at the instruction pointer and verify that
    /// its declared operand words lie within the materialized image.
    fn fetch(&self) -> MachineResult<Instruction> {
        let word = self.memory.read(self.ip as Word)?;
        let inst = Instruction::decode(word, self.ip)?;

        let required = inst.opcode.operand_count();
        let available = self.memory.len().saturating_sub(self.ip + 1);
        if required > available {
            return Err(MachineError::TruncatedInstruction {
                opcode: inst.opcode.name(),
                required,
                available,
                ip: self.ip,
            });
        }

        Ok(inst)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Operand Resolution
    // ═══════════════════════════════════════════════════════════════════

    /// The raw operand word at position `n` of the current instruction.
    fn raw_operand(&self, n: usize) -> MachineResult<Word> {
        self.memory.read((self.ip + 1 + n) as Word)
    }

    /// Resolve operand `n` to a value to read.
    fn operand_value(&self, inst: &Instruction, n: usize) -> MachineResult<Word> {
        let raw = self.raw_operand(n)?;
        match inst.mode(n) {
            Mode::Position => self.memory.read(raw),
            Mode::Immediate => Ok(raw),
            Mode::Relative => self.memory.read(self.relative_base + raw),
        }
    }

    /// Resolve operand `n` to an address to write. Immediate mode is
    /// never a legal write target.
    fn operand_target(&self, inst: &Instruction, n: usize) -> MachineResult<Word> {
        let raw = self.raw_operand(n)?;
        match inst.mode(n) {
            Mode::Position => Ok(raw),
            Mode::Relative => Ok(self.relative_base + raw),
            Mode::Immediate => Err(MachineError::ImmediateWriteTarget { ip: self.ip }),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Dispatch
    // ═══════════════════════════════════════════════════════════════════

    fn execute(&mut self, inst: Instruction, outputs: &mut Vec<Word>) -> MachineResult<Step> {
        match inst.opcode {
            Opcode::Add => self.binary(&inst, |a, b| a + b),
            Opcode::Multiply => self.binary(&inst, |a, b| a * b),
            Opcode::LessThan => self.binary(&inst, |a, b| Word::from(a < b)),
            Opcode::Equals => self.binary(&inst, |a, b| Word::from(a == b)),

            Opcode::JumpIfTrue => self.jump(&inst, |condition| condition != 0),
            Opcode::JumpIfFalse => self.jump(&inst, |condition| condition == 0),

            Opcode::Input => {
                // Suspend without consuming the instruction word, so a
                // later run re-decodes this same Input.
                let Some(value) = self.inputs.pop() else {
                    return Ok(Step::Suspend);
                };
                let target = self.operand_target(&inst, 0)?;
                self.memory.write(target, value)?;
                self.advance(&inst);
                Ok(Step::Continue)
            }

            Opcode::Output => {
                outputs.push(self.operand_value(&inst, 0)?);
                self.advance(&inst);
                Ok(Step::Continue)
            }

            Opcode::AdjustRelativeBase => {
                self.relative_base += self.operand_value(&inst, 0)?;
                self.advance(&inst);
                Ok(Step::Continue)
            }

            Opcode::Halt => Ok(Step::Halt),
        }
    }

    /// Apply a binary operation to the first two operands and store the
    /// result through the third.
    fn binary(
        &mut self,
        inst: &Instruction,
        apply: impl Fn(Word, Word) -> Word,
    ) -> MachineResult<Step> {
        let lhs = self.operand_value(inst, 0)?;
        let rhs = self.operand_value(inst, 1)?;
        let target = self.operand_target(inst, 2)?;
        self.memory.write(target, apply(lhs, rhs))?;
        self.advance(inst);
        Ok(Step::Continue)
    }

    /// Conditional jump: transfer control when the predicate holds for
    /// the first operand, else fall through.
    fn jump(
        &mut self,
        inst: &Instruction,
        taken: impl Fn(Word) -> bool,
    ) -> MachineResult<Step> {
        let condition = self.operand_value(inst, 0)?;
        let target = self.operand_value(inst, 1)?;
        if taken(condition) {
            if target < 0 {
                return Err(MachineError::NegativeAddress {
                    addr: target,
                    operation: MemoryOperation::Jump,
                });
            }
            self.ip = target as Address;
        } else {
            self.advance(inst);
        }
        Ok(Step::Continue)
    }

    /// Advance past the instruction word and its operands.
    #[inline]
    fn advance(&mut self, inst: &Instruction) {
        self.ip += 1 + inst.opcode.operand_count();
    }
}

/// Control-flow outcome of a single executed instruction.
enum Step {
    Continue,
    Suspend,
    Halt,
}
