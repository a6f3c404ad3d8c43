use core::fmt;

use crate::Tree;

// Block layout used by the host format:
//
// name
// {
// 	key = value
// 	child
// 	{
// 	}
// }
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(self, f, 0)
    }
}

fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("\t")?;
    }
    Ok(())
}

fn write_block(tree: &Tree, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    indent(f, depth)?;
    writeln!(f, "{}", tree.name())?;
    indent(f, depth)?;
    f.write_str("{\n")?;

    for entry in tree.values() {
        indent(f, depth + 1)?;
        writeln!(f, "{} = {}", entry.key(), entry.value())?;
    }
    for node in tree.nodes() {
        write_block(node, f, depth + 1)?;
    }

    indent(f, depth)?;
    f.write_str("}\n")
}
