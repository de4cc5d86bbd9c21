//! Common utilities for benchmarks

use confdoc_core::FormatTag;
use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};
use std::fmt::Write;

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Every format with a structured parser
pub const STRUCTURED_FORMATS: [FormatTag; 4] = [
    FormatTag::Json,
    FormatTag::Toml,
    FormatTag::Yaml,
    FormatTag::Properties,
];

/// Generate a commented document with `sections` groups of five keys.
///
/// Properties documents are flat, so their keys carry the section prefix.
pub fn create_document(format: FormatTag, sections: usize) -> String {
    let mut out = String::new();
    match format {
        FormatTag::Json => {
            out.push_str("{\n");
            for s in 0..sections {
                let _ = writeln!(out, "  // Section {s}");
                let _ = writeln!(out, "  \"section{s}\": {{");
                let _ = writeln!(out, "    // Port for section {s}");
                let _ = writeln!(out, "    \"port\": {},", 25000 + s);
                let _ = writeln!(out, "    \"name\": \"server-{s}\",");
                let _ = writeln!(out, "    \"enabled\": {},", s % 2 == 0);
                let _ = writeln!(out, "    \"ratio\": 0.{s},");
                let _ = writeln!(out, "    \"tags\": [\"a\", \"b\", \"c\"],");
                let comma = if s + 1 < sections { "," } else { "" };
                let _ = writeln!(out, "  }}{comma}");
            }
            out.push_str("}\n");
        },
        FormatTag::Toml => {
            for s in 0..sections {
                let _ = writeln!(out, "# Section {s}\n[section{s}]");
                let _ = writeln!(out, "# Port for section {s}\nport = {}", 25000 + s);
                let _ = writeln!(out, "name = \"server-{s}\" # display name");
                let _ = writeln!(out, "enabled = {}", s % 2 == 0);
                let _ = writeln!(out, "ratio = 0.{s}");
                let _ = writeln!(out, "tags = [\"a\", \"b\", \"c\"]\n");
            }
        },
        FormatTag::Yaml => {
            for s in 0..sections {
                let _ = writeln!(out, "# Section {s}\nsection{s}:");
                let _ = writeln!(out, "  # Port for section {s}\n  port: {}", 25000 + s);
                let _ = writeln!(out, "  name: server-{s} # display name");
                let _ = writeln!(out, "  enabled: {}", if s % 2 == 0 { "yes" } else { "no" });
                let _ = writeln!(out, "  ratio: 0.{s}");
                let _ = writeln!(out, "  tags:\n    - a\n    - b\n    - c\n");
            }
        },
        FormatTag::Properties | FormatTag::Text => {
            for s in 0..sections {
                let _ = writeln!(out, "# Port for section {s}\nsection{s}.port={}", 25000 + s);
                let _ = writeln!(out, "section{s}.name=server-{s}");
                let _ = writeln!(out, "section{s}.enabled={}", s % 2 == 0);
                let _ = writeln!(out, "section{s}.ratio=0.{s}");
                let _ = writeln!(out, "section{s}.motd: Welcome to section {s}\n");
            }
        },
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_documents_parse_cleanly() {
        for format in STRUCTURED_FORMATS {
            let text = create_document(format, 3);
            let outcome = confdoc_formats::parse_with(&text, format, &confdoc_formats::ParseOptions::strict())
                .unwrap_or_else(|e| panic!("{format} fixture failed: {e}"));
            assert!(!outcome.document.comments.is_empty(), "{format} fixture has comments");
        }
    }
}
