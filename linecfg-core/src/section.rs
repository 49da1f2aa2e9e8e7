//! Region capture by prefix containment.
//!
//! A dump has no nesting syntax: an element's lines are identified by a
//! literal containment path. Given path `/c/slb/virt` and id `12`, the region
//! consists of the line equal to `/c/slb/virt 12`, every line containing
//! `/c/slb/virt 12/` (nested child headers), and any interleaved line that
//! belongs to no top-level element at all (option lines such as `ena` or
//! `rip 10.0.0.1`). Capture stops at the next top-level line of another
//! element, and may restart later: one element's lines are not guaranteed to
//! be contiguous in the dump.

/// A captured logical region of configuration lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    lines: Vec<String>,
}

impl Section {
    /// Rebuild a section from previously captured (and possibly rewritten) text.
    pub fn from_text(text: &str) -> Self {
        Section {
            lines: text
                .lines()
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when the locator found nothing; callers must check this, since
    /// [`Section::text`] is never an empty string.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Captured lines joined with `\n`, always newline-terminated.
    pub fn text(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// Capture the region belonging to `{path} {id}`.
///
/// `top_marker` is the prefix shared by every top-level element header in the
/// dialect (for Alteon-style dumps, `/c/`); a line containing the marker but
/// not `path` ends the capture. Blank lines are dropped from the result.
pub fn locate<S: AsRef<str>>(lines: &[S], top_marker: &str, path: &str, id: &str) -> Section {
    let header = format!("{path} {id}");
    let nested = format!("{header}/");

    let mut captured: Vec<String> = Vec::new();
    let mut capture = false;
    for line in lines {
        let line = line.as_ref();
        let belongs = line == header || line.contains(&nested);
        if !capture {
            if belongs {
                capture = true;
                captured.push(line.to_string());
            }
        } else if belongs {
            captured.push(line.to_string());
        } else if line.contains(top_marker) && !line.contains(path) {
            // Top-level header of a different element kind.
            capture = false;
        } else if !line.contains(path) {
            // Option line scoped to the current element by proximity.
            captured.push(line.to_string());
        } else {
            // Same kind, different id.
            capture = false;
        }
    }

    captured.retain(|l| !l.is_empty());
    Section { lines: captured }
}
