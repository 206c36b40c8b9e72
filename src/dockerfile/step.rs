//! Turning one raw history command into a Dockerfile instruction

/// Marks history entries that only changed image metadata
pub const NOP_MARKER: &str = "#(nop) ";

/// Shell prefix the engine records for executed steps
pub const SHELL_PREFIX: &str = "/bin/sh -c ";

/// Indentation used in front of reflowed `&&` chains
pub const DEFAULT_INDENT: usize = 8;

/// Convert a raw `created_by` string into an unnormalized instruction.
///
/// Metadata-only entries (`ADD`, `CMD`, `ENV`, ...) carry the instruction
/// after the `#(nop) ` marker and are returned as-is. Everything else was
/// executed by the shell and becomes a `RUN`. A marker with nothing after it
/// yields an empty instruction.
pub fn format_step(raw: &str) -> String {
    match raw.split_once(NOP_MARKER) {
        Some((_, rest)) => rest.to_string(),
        None => format!("RUN {}", raw),
    }
}

/// Collapse whitespace, drop the shell prefix and break `&&` chains onto
/// their own indented lines.
pub fn normalize(line: &str, indent: usize) -> String {
    let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
    let unwrapped = collapsed.replace(SHELL_PREFIX, "");
    let separator = format!("\n{}&&", " ".repeat(indent));
    unwrapped.replace(" &&", "&&").replace("&&", &separator)
}

/// Full formatting of a history command: [`format_step`] then [`normalize`]
pub fn instruction(raw: &str, indent: usize) -> String {
    normalize(&format_step(raw), indent)
}
