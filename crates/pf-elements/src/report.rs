//! Human-readable change messages for the report log.

use crate::status::LinkStatus;

/// Leading indent of status-change lines in the report.
const INDENT: &str = "          ";

/// Format a status transition, e.g.
/// `          Pipe P1 status changed from OPEN to CLOSED`.
///
/// Old and new may be equal; the line is still produced.
pub fn status_change(type_label: &str, name: &str, old: LinkStatus, new: LinkStatus) -> String {
    format!(
        "{INDENT}{type_label} {name} status changed from {} to {}",
        old.label(),
        new.label()
    )
}
