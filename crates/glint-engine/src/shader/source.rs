use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One programmable pipeline stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
        }
    }

    /// The GL shader-object type for this stage.
    pub(crate) fn gl_type(self) -> u32 {
        match self {
            ShaderKind::Vertex => glow::VERTEX_SHADER,
            ShaderKind::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShaderKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "vertex" => Ok(ShaderKind::Vertex),
            "fragment" => Ok(ShaderKind::Fragment),
            _ => Err(()),
        }
    }
}

/// Marker prefix introducing a section in a combined shader asset.
const SECTION_MARKER: &str = "#shader";

/// What to do with a `#shader` line whose kind keyword is not recognized.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum MarkerPolicy {
    /// Log a warning, drop the marker line, keep routing to the current
    /// section.
    #[default]
    IgnoreUnknown,
    /// Fail the parse with [`ShaderAssetError::UnknownSection`].
    Reject,
}

/// Error from parsing a combined shader asset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShaderAssetError {
    #[error("unknown shader section {keyword:?} on line {line}")]
    UnknownSection { keyword: String, line: usize },
}

/// The two per-stage sources split out of one combined asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    fn section_mut(&mut self, kind: ShaderKind) -> &mut String {
        match kind {
            ShaderKind::Vertex => &mut self.vertex,
            ShaderKind::Fragment => &mut self.fragment,
        }
    }
}

/// Splits a combined shader asset into per-stage sources.
///
/// A line whose first token is `#shader <kind>` switches the current
/// section; every other line is appended verbatim (newline restored) to the
/// section most recently switched to. Lines seen before the first marker
/// belong to no section and are dropped, so a headerless asset parses to two
/// empty sources rather than an error. Multiple sections of the same kind
/// concatenate in order.
pub fn parse_shader_asset(
    text: &str,
    policy: MarkerPolicy,
) -> Result<ShaderSources, ShaderAssetError> {
    let mut sources = ShaderSources::default();
    let mut current: Option<ShaderKind> = None;

    for (idx, line) in text.lines().enumerate() {
        if let Some(rest) = line.trim_start().strip_prefix(SECTION_MARKER) {
            let keyword = rest.trim();
            match keyword.parse::<ShaderKind>() {
                Ok(kind) => current = Some(kind),
                Err(()) => match policy {
                    MarkerPolicy::IgnoreUnknown => {
                        log::warn!(
                            "ignoring unknown shader section {keyword:?} on line {}",
                            idx + 1
                        );
                    }
                    MarkerPolicy::Reject => {
                        return Err(ShaderAssetError::UnknownSection {
                            keyword: keyword.to_string(),
                            line: idx + 1,
                        });
                    }
                },
            }
            continue;
        }

        if let Some(kind) = current {
            let section = sources.section_mut(kind);
            section.push_str(line);
            section.push('\n');
        }
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASSET: &str = "#shader vertex\n\
                         void main() { gl_Position = vec4(0.0); }\n\
                         #shader fragment\n\
                         out vec4 color;\n\
                         void main() { color = vec4(1.0); }\n";

    fn parse(text: &str) -> ShaderSources {
        parse_shader_asset(text, MarkerPolicy::Reject).unwrap()
    }

    #[test]
    fn splits_into_two_sections() {
        let sources = parse(ASSET);
        assert_eq!(sources.vertex, "void main() { gl_Position = vec4(0.0); }\n");
        assert_eq!(
            sources.fragment,
            "out vec4 color;\nvoid main() { color = vec4(1.0); }\n"
        );
    }

    #[test]
    fn round_trips_content_lines_in_order() {
        let sources = parse(ASSET);
        let rejoined = format!("{}{}", sources.vertex, sources.fragment);
        let expected: String = ASSET
            .lines()
            .filter(|l| !l.starts_with("#shader"))
            .map(|l| format!("{l}\n"))
            .collect();
        assert_eq!(rejoined, expected);
    }

    #[test]
    fn drops_lines_before_first_marker() {
        let text = format!("// stray comment\nint orphan;\n{ASSET}");
        let sources = parse(&text);
        assert!(!sources.vertex.contains("orphan"));
        assert!(!sources.fragment.contains("orphan"));
        assert_eq!(sources, parse(ASSET));
    }

    #[test]
    fn headerless_asset_yields_empty_sources() {
        let sources = parse("void main() {}\n");
        assert!(sources.vertex.is_empty());
        assert!(sources.fragment.is_empty());
    }

    #[test]
    fn unknown_marker_rejected_by_policy() {
        let err = parse_shader_asset("#shader geometry\nfoo;\n", MarkerPolicy::Reject).unwrap_err();
        assert_eq!(
            err,
            ShaderAssetError::UnknownSection {
                keyword: "geometry".to_string(),
                line: 1,
            }
        );
    }

    #[test]
    fn unknown_marker_ignored_keeps_current_section() {
        let text = "#shader vertex\na;\n#shader geometry\nb;\n";
        let sources = parse_shader_asset(text, MarkerPolicy::IgnoreUnknown).unwrap();
        // The bogus marker line itself is dropped; following lines still
        // belong to the vertex section.
        assert_eq!(sources.vertex, "a;\nb;\n");
        assert!(sources.fragment.is_empty());
    }

    #[test]
    fn repeated_sections_concatenate() {
        let text = "#shader vertex\na;\n#shader fragment\nf;\n#shader vertex\nb;\n";
        let sources = parse(text);
        assert_eq!(sources.vertex, "a;\nb;\n");
        assert_eq!(sources.fragment, "f;\n");
    }

    #[test]
    fn preserves_blank_and_indented_lines() {
        let text = "#shader vertex\n\n    indented();\n";
        let sources = parse(text);
        assert_eq!(sources.vertex, "\n    indented();\n");
    }

    #[test]
    fn kind_keywords_parse() {
        assert_eq!("vertex".parse(), Ok(ShaderKind::Vertex));
        assert_eq!("fragment".parse(), Ok(ShaderKind::Fragment));
        assert!("geometry".parse::<ShaderKind>().is_err());
        assert!("VERTEX".parse::<ShaderKind>().is_err());
    }
}
