//! Validation checks over stacked fragments and their source files.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::assembler::DocumentAssembler;
use crate::error::StockpileError;
use crate::id::DocumentId;
use crate::stack::Fragment;

use super::warning::{Diagnostic, ValidationResult};

/// Events contributed by a fragment holding nothing but its wrapper.
const WRAPPER_EVENTS: usize = 2;

/// Warn about ids shared by more than one fragment.
///
/// Stacking still succeeds, but only the first fragment with a given id can
/// be targeted.
pub fn check_duplicate_ids(fragments: &[Fragment]) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen: BTreeMap<&DocumentId, Vec<&Fragment>> = BTreeMap::new();

    for fragment in fragments {
        seen.entry(&fragment.id).or_default().push(fragment);
    }

    for (id, owners) in seen {
        if owners.len() < 2 {
            continue;
        }

        let sources: Vec<String> = owners
            .iter()
            .filter_map(|f| f.source.as_ref())
            .map(|s| s.display().to_string())
            .collect();
        let message = if sources.is_empty() {
            format!("#{} is used by {} fragments", id, owners.len())
        } else {
            format!("#{} is used by {} fragments: {}", id, owners.len(), sources.join(", "))
        };

        result.push(
            Diagnostic::warning("stockpile::validate::duplicate-id", message)
                .with_help("Rename the files so every fragment id is unique"),
        );
    }

    result
}

/// Warn about fragments with no SVG content inside the wrapper.
pub fn check_empty_fragments(fragments: &[Fragment]) -> ValidationResult {
    let mut result = ValidationResult::new();

    for fragment in fragments {
        if fragment.events == 0 {
            result.push(
                Diagnostic::warning(
                    "stockpile::validate::no-svg-root",
                    format!("#{} has no <svg> root in the SVG namespace", fragment.id),
                )
                .with_help("Declare xmlns=\"http://www.w3.org/2000/svg\" on the root element"),
            );
        } else if fragment.events <= WRAPPER_EVENTS {
            result.push(Diagnostic::warning(
                "stockpile::validate::empty-fragment",
                format!("#{} has no content", fragment.id),
            ));
        }
    }

    result
}

/// Assemble one file, turning failures into diagnostics.
pub fn check_source(path: &Path, assembler: &DocumentAssembler) -> (Option<Fragment>, ValidationResult) {
    let mut result = ValidationResult::new();

    let id = match DocumentId::from_path(path) {
        Ok(id) => id,
        Err(e) => {
            result.push(diagnostic_for(path, &e));
            return (None, result);
        }
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            result.push(Diagnostic::error(
                "stockpile::validate::io",
                format!("{}: {}", path.display(), e),
            ));
            return (None, result);
        }
    };

    match assembler.assemble(&id, BufReader::new(file)) {
        Ok(events) => {
            let fragment = Fragment {
                id,
                source: Some(path.to_path_buf()),
                events: events.len(),
            };
            (Some(fragment), result)
        }
        Err(e) => {
            result.push(diagnostic_for(path, &e));
            (None, result)
        }
    }
}

fn diagnostic_for(path: &Path, error: &StockpileError) -> Diagnostic {
    match error {
        StockpileError::InvalidIdentifier { help, .. } => {
            let diagnostic = Diagnostic::error(
                "stockpile::validate::invalid-id",
                format!("{}: {}", path.display(), error),
            );
            match help {
                Some(help) => diagnostic.with_help(help.clone()),
                None => diagnostic,
            }
        }
        StockpileError::MalformedXml { .. } => Diagnostic::error(
            "stockpile::validate::malformed-xml",
            format!("{}: {}", path.display(), error),
        ),
        other => Diagnostic::error(
            "stockpile::validate::io",
            format!("{}: {}", path.display(), other),
        ),
    }
}
