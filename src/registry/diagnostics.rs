//! Advisory checks over the catalog's screen metadata.

use std::collections::BTreeSet;
use std::fmt;
use tracing::warn;

use crate::models::ExitType;

use super::Metascreens;

/// A screen listing the same exit type more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitTypeWarning {
    pub screen: String,
    pub kind: ExitType,
}

impl fmt::Display for ExitTypeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate exit type: {} {}", self.screen, self.kind)
    }
}

impl Metascreens {
    /// Flag screens whose exit list repeats an exit type.
    ///
    /// Every repeated occurrence yields one warning, which is also logged.
    pub fn check_exit_types(&self) -> Vec<ExitTypeWarning> {
        let mut warnings = Vec::new();
        for (name, handle) in &self.names {
            let mut seen = BTreeSet::new();
            for exit in self.screen(*handle).exits() {
                if !seen.insert(exit.kind) {
                    let warning = ExitTypeWarning { screen: name.clone(), kind: exit.kind };
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }
        warnings
    }
}
