use numtree_expr::{BinOpKind, UnaryOpKind};

/// Bytecode instructions executed by the [`Vm`](crate::Vm).
///
/// The virtual machine is a plain stack machine: loads push one value, unary operations replace
/// the top value, and binary operations pop the top two values (right operand on top) and push
/// their result. A well-formed program leaves exactly one value on the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    /// Load a constant value onto the stack.
    LoadConst(f64),

    /// Load the value of the input column at the given index onto the stack.
    LoadVar(usize),

    /// Performs the unary operation on the top stack value.
    Unary(UnaryOpKind),

    /// Performs the binary operation on the second-to-top and top stack values.
    Binary(BinOpKind),
}

impl Instruction {
    /// Returns the change in stack depth caused by executing this instruction.
    pub fn stack_effect(&self) -> isize {
        match self {
            Self::LoadConst(_) | Self::LoadVar(_) => 1,
            Self::Unary(_) => 0,
            Self::Binary(_) => -1,
        }
    }

    /// Returns the number of values this instruction needs on the stack.
    pub fn operands(&self) -> usize {
        match self {
            Self::LoadConst(_) | Self::LoadVar(_) => 0,
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
        }
    }
}

/// A sequence of instructions in post-order.
///
/// Chunks are the nodes the [`VmBackend`](crate::VmBackend) builds trees out of: the chunk of a
/// subtree is the concatenation of its children's chunks followed by the instruction of its own
/// operator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk {
    /// The instructions in this chunk.
    pub instructions: Vec<Instruction>,
}

impl Chunk {
    /// Creates a chunk containing a single instruction.
    pub fn single(instruction: Instruction) -> Self {
        Self { instructions: vec![instruction] }
    }

    /// Appends an instruction to the end of this chunk.
    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Appends all instructions of `other` to the end of this chunk.
    pub fn append(&mut self, mut other: Chunk) {
        self.instructions.append(&mut other.instructions);
    }

    /// Returns the number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the chunk has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl FromIterator<Instruction> for Chunk {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self { instructions: iter.into_iter().collect() }
    }
}
