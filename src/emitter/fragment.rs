//! Pieces shared by every make fragment.

use std::fmt::Write;

/// `export FLAGS += -I $(PACKAGES)/<include_dir>`
pub fn write_include_export(out: &mut String, include_dir: &str) {
    let _ = writeln!(out, "export FLAGS += \\");
    let _ = writeln!(out, "  -I $(PACKAGES)/{include_dir}");
    out.push('\n');
}

/// `.PHONY: <name>` followed by `<name>: <prerequisites...>`.
pub fn write_phony_target(out: &mut String, name: &str, prerequisites: &[String]) {
    let _ = writeln!(out, ".PHONY: {name}");
    out.push_str(name);
    out.push(':');
    for prerequisite in prerequisites {
        out.push(' ');
        out.push_str(prerequisite);
    }
    out.push('\n');
}
