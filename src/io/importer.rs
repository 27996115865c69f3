// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STEP file importer

use super::step::{parse_step_file, StepFile};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a .step/.stp file from disk and scan it
pub fn import_step_file<P: AsRef<Path>>(path: P) -> Result<StepFile> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read STEP file: {}", path.display()))?;

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_step_file(&filename, &source)
        .with_context(|| format!("Failed to parse STEP file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_import_step_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            "ISO-10303-21;\nHEADER;\nFILE_DESCRIPTION(('x'),'2;1');\nFILE_NAME('a');\n\
             FILE_SCHEMA(('AP214'));\nENDSEC;\nDATA;\n\
             #1 = CARTESIAN_POINT('',(1.0,2.0,3.0));\nENDSEC;\nEND-ISO-10303-21;"
        )?;

        let step = import_step_file(file.path())?;
        assert_eq!(step.entities.len(), 1);
        assert_eq!(step.points.len(), 1);

        Ok(())
    }

    #[test]
    fn test_import_rejects_non_step() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "solid cube\nendsolid cube")?;

        let err = import_step_file(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid STEP file format"));

        Ok(())
    }

    #[test]
    fn test_import_missing_file() {
        assert!(import_step_file("/nonexistent/part.step").is_err());
    }
}
