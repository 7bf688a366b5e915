use crate::model::{MatchingBlock, Opcode, Tag};

/// Turn sorted matching blocks (sentinel included) into a gapless edit script.
///
/// The result covers `0..len(old)` and `0..len(new)` exactly; consecutive
/// opcodes are contiguous on both sides.
pub fn opcodes_from_blocks(blocks: &[MatchingBlock]) -> Vec<Opcode> {
    let mut opcodes = Vec::with_capacity(blocks.len() * 2);
    let mut i = 0usize;
    let mut j = 0usize;

    for block in blocks {
        let tag = match (i < block.a, j < block.b) {
            (true, true) => Some(Tag::Replace),
            (true, false) => Some(Tag::Delete),
            (false, true) => Some(Tag::Insert),
            (false, false) => None,
        };
        if let Some(tag) = tag {
            opcodes.push(Opcode::new(tag, i, block.a, j, block.b));
        }

        i = block.a + block.size;
        j = block.b + block.size;

        if block.size > 0 {
            opcodes.push(Opcode::new(Tag::Equal, block.a, i, block.b, j));
        }
    }

    opcodes
}
