//! Tree view of the catalog for `mkpm --list`.
//!
//! Listing never touches the install root: no lookup, fetch or manifest read.

use std::io::{self, Write};

use super::Registry;

/// Write every package, version and declared dependency to `out`.
///
/// ```text
/// + Foo
/// |    Type: Lib
/// |  + Version:
/// |  |  + 1.0
/// |  |  |   Platform: Linux
/// |  |  |   Depends on: Bar(2.0)
/// ```
pub fn list_packages<W: Write>(registry: &Registry, out: &mut W) -> io::Result<()> {
    for entry in registry.entries() {
        writeln!(out, "+ {}", entry.name)?;
        writeln!(out, "|    Type: {}", entry.kind)?;
        writeln!(out, "|  + Version:")?;

        for record in &entry.versions {
            writeln!(out, "|  |  + {}", record.version)?;
            if let Some(platform) = &record.platform {
                writeln!(out, "|  |  |   Platform: {platform}")?;
            }
            for dep in &record.dependencies {
                writeln!(out, "|  |  |   Depends on: {}({})", dep.name, dep.version)?;
            }
        }
    }
    Ok(())
}
