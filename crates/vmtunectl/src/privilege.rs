//! Root check for actions that write kernel tunables

use vmtune_common::VmTuneError;

use crate::cli::Action;

pub fn is_root() -> bool {
    nix::unistd::geteuid().is_root()
}

/// Refuse privileged actions up front, before any kernel surface is touched
pub fn ensure_privileged(action: Action, is_root: bool) -> Result<(), VmTuneError> {
    if action.requires_root() && !is_root {
        return Err(VmTuneError::PermissionDenied {
            action: action.flag().to_string(),
        });
    }
    Ok(())
}
