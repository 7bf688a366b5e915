use crate::model::{ContextSize, Hunk, Opcode, Tag};

/// Group an edit script into hunks with at most `context` lines of
/// surrounding unchanged content.
///
/// Unchanged runs longer than twice the context split the script into
/// separate hunks. A trailing hunk made of a single equal opcode is never
/// emitted, so identical inputs yield no hunks. With zero context only the
/// changes themselves are kept. With [`ContextSize::All`] nothing is
/// trimmed and at most one hunk is produced.
pub fn group_opcodes(opcodes: &[Opcode], context: ContextSize) -> Vec<Hunk> {
    let n = context.lines();
    let split_span = n.saturating_mul(2);

    let mut codes = if opcodes.is_empty() {
        vec![Opcode::new(Tag::Equal, 0, 1, 0, 1)]
    } else {
        opcodes.to_vec()
    };

    if let Some(first) = codes.first_mut()
        && first.is_equal()
    {
        first.i1 = first.i1.max(first.i2.saturating_sub(n));
        first.j1 = first.j1.max(first.j2.saturating_sub(n));
    }
    if let Some(last) = codes.last_mut()
        && last.is_equal()
    {
        last.i2 = last.i2.min(last.i1.saturating_add(n));
        last.j2 = last.j2.min(last.j1.saturating_add(n));
    }

    let mut groups = Vec::new();
    let mut group: Hunk = Vec::new();

    for mut code in codes {
        if code.is_equal() && code.old_len() > split_span {
            push_nonempty(
                &mut group,
                Opcode::new(
                    Tag::Equal,
                    code.i1,
                    code.i2.min(code.i1.saturating_add(n)),
                    code.j1,
                    code.j2.min(code.j1.saturating_add(n)),
                ),
            );
            if !group.is_empty() {
                groups.push(std::mem::take(&mut group));
            }
            code.i1 = code.i1.max(code.i2.saturating_sub(n));
            code.j1 = code.j1.max(code.j2.saturating_sub(n));
        }
        push_nonempty(&mut group, code);
    }

    if !group.is_empty() && !(group.len() == 1 && group[0].is_equal()) {
        groups.push(group);
    }

    groups
}

/// Zero-width equal opcodes only show up when the context is zero; they carry
/// nothing a renderer could print.
fn push_nonempty(group: &mut Hunk, code: Opcode) {
    if code.is_equal() && code.old_len() == 0 && code.new_len() == 0 {
        return;
    }
    group.push(code);
}
