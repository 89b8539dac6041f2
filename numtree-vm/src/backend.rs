use crate::{error::MalformedChunk, instruction::{Chunk, Instruction}, vm::Vm};
use numtree_compiler::Backend;
use numtree_error::Error;
use numtree_expr::{BinOpKind, UnaryOpKind};

/// The bytecode [`Backend`]. Builds [`Chunk`]s and finishes them into a [`Vm`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VmBackend;

/// Returns the chunk of `operand` followed by the unary operation.
fn unary_chunk(mut operand: Chunk, op: UnaryOpKind) -> Chunk {
    operand.push(Instruction::Unary(op));
    operand
}

/// Returns the chunks of `lhs` and `rhs` followed by the binary operation.
fn binary_chunk(mut lhs: Chunk, rhs: Chunk, op: BinOpKind) -> Chunk {
    lhs.append(rhs);
    lhs.push(Instruction::Binary(op));
    lhs
}

/// Checks that the chunk leaves exactly one value on the stack without underflowing it, and that
/// it only reads input columns below `arity`. Returns the maximum stack depth reached.
pub fn validate(chunk: &Chunk, arity: usize) -> Result<usize, Error> {
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    for (i, instruction) in chunk.instructions.iter().enumerate() {
        if let Instruction::LoadVar(index) = instruction {
            if *index >= arity {
                return Err(Error::unspanned(MalformedChunk {
                    reason: format!(
                        "instruction {} reads input column {}, but the program has {} inputs",
                        i, index, arity,
                    ),
                }));
            }
        }

        if depth < instruction.operands() {
            return Err(Error::unspanned(MalformedChunk {
                reason: format!(
                    "instruction {} needs {} values, but the stack holds {}",
                    i, instruction.operands(), depth,
                ),
            }));
        }

        depth = depth.saturating_add_signed(instruction.stack_effect());
        max_depth = max_depth.max(depth);
    }

    if depth != 1 {
        return Err(Error::unspanned(MalformedChunk {
            reason: format!("the program leaves {} values on the stack instead of 1", depth),
        }));
    }

    Ok(max_depth)
}

impl Backend for VmBackend {
    type Node = Chunk;
    type Compiled = Vm;

    fn constant(&self, value: f64) -> Chunk {
        Chunk::single(Instruction::LoadConst(value))
    }

    fn variable(&self, index: usize) -> Chunk {
        Chunk::single(Instruction::LoadVar(index))
    }

    fn negate(&self, operand: Chunk) -> Chunk {
        unary_chunk(operand, UnaryOpKind::Neg)
    }

    fn sqrt(&self, operand: Chunk) -> Chunk {
        unary_chunk(operand, UnaryOpKind::Sqrt)
    }

    fn sin(&self, operand: Chunk) -> Chunk {
        unary_chunk(operand, UnaryOpKind::Sin)
    }

    fn cos(&self, operand: Chunk) -> Chunk {
        unary_chunk(operand, UnaryOpKind::Cos)
    }

    fn exp(&self, operand: Chunk) -> Chunk {
        unary_chunk(operand, UnaryOpKind::Exp)
    }

    fn ln(&self, operand: Chunk) -> Chunk {
        unary_chunk(operand, UnaryOpKind::Ln)
    }

    fn add(&self, lhs: Chunk, rhs: Chunk) -> Chunk {
        binary_chunk(lhs, rhs, BinOpKind::Add)
    }

    fn subtract(&self, lhs: Chunk, rhs: Chunk) -> Chunk {
        binary_chunk(lhs, rhs, BinOpKind::Sub)
    }

    fn multiply(&self, lhs: Chunk, rhs: Chunk) -> Chunk {
        binary_chunk(lhs, rhs, BinOpKind::Mul)
    }

    fn divide(&self, lhs: Chunk, rhs: Chunk) -> Chunk {
        binary_chunk(lhs, rhs, BinOpKind::Div)
    }

    fn pow(&self, base: Chunk, exponent: Chunk) -> Chunk {
        binary_chunk(base, exponent, BinOpKind::Pow)
    }

    fn log(&self, argument: Chunk, base: Chunk) -> Chunk {
        binary_chunk(argument, base, BinOpKind::Log)
    }

    fn finish(&self, root: Chunk, arity: usize) -> Result<Vm, Error> {
        let max_stack = validate(&root, arity)?;
        tracing::debug!(instructions = root.len(), max_stack, arity, "finished bytecode chunk");
        Ok(Vm::new(root, arity, max_stack))
    }
}
