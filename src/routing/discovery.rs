//! Controller discovery over a source tree.
//!
//! # Responsibilities
//! - Walk a directory tree and select candidate source units
//! - Extract the namespace a unit declares
//! - Derive the fully-qualified controller id of each unit
//!
//! # Unit Convention
//! ```text
//! src/app/controllers/user_controller.rs
//!     pub const NAMESPACE: &str = "app::controllers";
//!     pub struct UserController { .. }
//!
//! → type name   UserController   (file stem, UpperCamelCase)
//! → namespace   app::controllers (first NAMESPACE const, if any)
//! → id          app::controllers::UserController
//! ```
//!
//! # Design Decisions
//! - Discovery only selects; controllers still come from the explicit registry
//! - `mod.rs` files are skipped like hidden files, so a `controllers/mod.rs`
//!   that only declares submodules never becomes a unit
//! - Candidates are sorted by path so registration order is stable across platforms
//! - Namespace extraction is a best-effort lexical scan, not a parse
//! - Only the first namespace declaration counts

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::routing::error::RouterError;

/// Separator between namespace and type name in a controller id.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Default extension of source units.
pub const DEFAULT_EXTENSION: &str = "rs";

const NAMESPACE_ITEM: &str = "const NAMESPACE";

/// Stem of module files (`mod.rs`), which declare modules rather than controllers.
const MODULE_STEM: &str = "mod";

/// What to do when a discovered unit names an unknown controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryPolicy {
    /// Fail with [`RouterError::ControllerNotFound`].
    #[default]
    Strict,
    /// Log a warning and skip the unit.
    Lenient,
}

/// A source unit found during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredUnit {
    pub path: PathBuf,
    pub namespace: Option<String>,
    pub type_name: String,
}

impl DiscoveredUnit {
    /// `namespace::TypeName`, or just `TypeName` without a namespace.
    pub fn qualified_id(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}{NAMESPACE_SEPARATOR}{}", self.type_name),
            None => self.type_name.clone(),
        }
    }
}

/// Collect every candidate unit under `root`, sorted by path.
pub fn collect_candidates(root: &Path, extension: &str) -> Result<Vec<PathBuf>, RouterError> {
    if !root.is_dir() {
        return Err(RouterError::InvalidDirectory {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let entries = fs::read_dir(&dir).map_err(|source| RouterError::InvalidFile {
            path: dir.clone(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| RouterError::InvalidFile {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|source| RouterError::InvalidFile {
                path: path.clone(),
                source,
            })?;

            if file_type.is_dir() {
                stack.push(path);
            } else if is_candidate(&path, extension) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// A file qualifies if its extension matches, its name is not hidden and
/// its stem is not the module file name `mod`.
pub fn is_candidate(path: &Path, extension: &str) -> bool {
    let extension_matches = path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext == extension);

    let hidden = path
        .file_name()
        .and_then(OsStr::to_str)
        .map_or(true, |name| name.starts_with('.'));

    let module_file = path
        .file_stem()
        .and_then(OsStr::to_str)
        .is_some_and(|stem| stem == MODULE_STEM);

    extension_matches && !hidden && !module_file
}

/// Read a unit and derive its namespace and type name.
pub fn inspect_unit(path: &Path) -> Result<DiscoveredUnit, RouterError> {
    let source = fs::read_to_string(path).map_err(|source| RouterError::InvalidFile {
        path: path.to_path_buf(),
        source,
    })?;

    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or_default();

    Ok(DiscoveredUnit {
        path: path.to_path_buf(),
        namespace: extract_namespace(&source),
        type_name: type_name_from_stem(stem),
    })
}

/// Find the first `const NAMESPACE` item and concatenate its string literals
/// up to the terminating `;`.
///
/// Line comments are ignored. Returns `None` when there is no declaration,
/// when it is never terminated, or when it is empty.
pub fn extract_namespace(source: &str) -> Option<String> {
    let mut declaration: Option<String> = None;

    for line in source.lines() {
        let code = strip_line_comment(line);

        match declaration.as_mut() {
            Some(pending) => {
                pending.push(' ');
                pending.push_str(code);
            }
            None => match find_item(code) {
                Some(start) => declaration = Some(code[start..].to_string()),
                None => continue,
            },
        }

        if let Some(pending) = &declaration {
            if let Some(end) = pending.find(';') {
                let namespace = string_literals(&pending[..end]);
                return (!namespace.is_empty()).then_some(namespace);
            }
        }
    }

    None
}

/// `user_controller` → `UserController`. Stems already in UpperCamelCase are kept.
pub fn type_name_from_stem(stem: &str) -> String {
    stem.split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Cut a line at the first `//` that is not inside a string literal.
fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut escaped = false;

    for (index, &b) in bytes.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
        } else if b == b'"' {
            in_string = true;
        } else if b == b'/' && bytes.get(index + 1) == Some(&b'/') {
            return &line[..index];
        }
    }

    line
}

fn find_item(code: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(found) = code[offset..].find(NAMESPACE_ITEM) {
        let start = offset + found;
        let end = start + NAMESPACE_ITEM.len();

        let before_ok = code[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_ident_char(c));
        let after_ok = code[end..].chars().next().map_or(true, |c| !is_ident_char(c));

        if before_ok && after_ok {
            return Some(start);
        }
        offset = end;
    }
    None
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn string_literals(declaration: &str) -> String {
    let mut out = String::new();
    let mut in_string = false;
    let mut escaped = false;

    for c in declaration.chars() {
        if !in_string {
            if c == '"' {
                in_string = true;
            }
            continue;
        }

        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '"' {
            in_string = false;
        } else {
            out.push(c);
        }
    }

    out
}
