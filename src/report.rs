//! Terminal rendering of an enriched hook tree.
//!
//! Separate from the resolver so hookscope can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use crate::hooks::HookNode;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print the enriched tree to stdout.
pub fn report(hooks: &[HookNode]) {
    let mut stdout = io::stdout().lock();
    let _ = report_to(&mut stdout, hooks);
}

/// Print the enriched tree to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(writer: &mut W, hooks: &[HookNode]) -> io::Result<()> {
    for hook in hooks {
        write_hook(writer, hook, 0)?;
    }

    let total = count_hooks(hooks);
    let named = count_named(hooks);
    writeln!(writer)?;
    writeln!(
        writer,
        "{} {} of {} hooks named",
        SUCCESS_MARK.green(),
        named,
        total
    )
}

fn write_hook<W: Write>(writer: &mut W, hook: &HookNode, depth: usize) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    let variable = match &hook.hook_variable_name {
        Some(name) => name.green().bold().to_string(),
        None => "-".dimmed().to_string(),
    };

    let location = hook.hook_source.as_ref().and_then(|source| {
        let file_name = source.file_name.as_deref()?;
        let line = source.line_number?;
        Some(format!("({}:{})", file_name, line))
    });

    match location {
        Some(location) => writeln!(
            writer,
            "{}{} \u{2192} {} {}",
            indent,
            hook.name.cyan(),
            variable,
            location.dimmed()
        )?,
        None => writeln!(writer, "{}{} \u{2192} {}", indent, hook.name.cyan(), variable)?,
    }

    for sub_hook in &hook.sub_hooks {
        write_hook(writer, sub_hook, depth + 1)?;
    }
    Ok(())
}

fn count_hooks(hooks: &[HookNode]) -> usize {
    hooks
        .iter()
        .map(|hook| 1 + count_hooks(&hook.sub_hooks))
        .sum()
}

fn count_named(hooks: &[HookNode]) -> usize {
    hooks
        .iter()
        .map(|hook| {
            usize::from(hook.hook_variable_name.is_some()) + count_named(&hook.sub_hooks)
        })
        .sum()
}
