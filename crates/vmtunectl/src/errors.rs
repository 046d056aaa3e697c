//! Error codes and exit status for vmtunectl

use std::io::Write;

use vmtune_common::VmTuneError;

use crate::display::Theme;

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for every failure: missing privilege, kernel I/O, bad arguments
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Map a command result to the process exit status
pub fn exit_code(result: &anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(_) => EXIT_GENERAL_ERROR,
    }
}

/// Print an error, plus a sudo hint when privilege was the problem
pub fn report_error<W: Write>(err: &anyhow::Error, theme: Theme, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", theme.error(&format!("Error: {:#}", err)))?;

    match err.downcast_ref::<VmTuneError>() {
        Some(VmTuneError::PermissionDenied { action }) => {
            writeln!(out, "Try: sudo vmtunectl {}", action)?;
        }
        Some(VmTuneError::KernelWrite { .. }) => {
            writeln!(out, "Check that the kernel exposes this control and that you are root")?;
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&Ok(())), 0);
        assert_eq!(exit_code(&Err(anyhow::anyhow!("boom"))), 1);
    }

    #[test]
    fn test_permission_hint() {
        let err = anyhow::Error::new(VmTuneError::PermissionDenied {
            action: "--gaming".to_string(),
        });
        let mut buf = Vec::new();
        report_error(&err, Theme::plain(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("requires root privileges"));
        assert!(text.contains("Try: sudo vmtunectl --gaming"));
    }
}
