// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel API for a slicing session

use crate::error::{Error, Result};
use crate::geometry::{build_solid, Mesh};
use crate::io::{parse_step_file, serialize, EntityValidation, StepFile, SvgExportConfig};
use crate::profile::{extract_profile, CuttingPlaneConfig, ExtractedProfile};
use std::path::Path;

/// A loaded part and the solid standing in for it
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub step: StepFile,
    pub mesh: Mesh,
    pub entities: EntityValidation,
}

/// Slicing session handle.
///
/// Holds at most one live model; loading another replaces model and mesh
/// wholesale. Extracted profiles accumulate in extraction order until the
/// caller removes them. Independent kernels share no state.
#[derive(Debug, Default)]
pub struct Kernel {
    model: Option<LoadedModel>,
    profiles: Vec<ExtractedProfile>,
}

impl Kernel {
    /// Create an empty session
    pub fn init() -> Self {
        tracing::debug!("kernel initialized");
        Self::default()
    }

    /// Parse STEP text and build its approximate solid.
    ///
    /// Unsupported entity types are logged, not rejected; see
    /// [`Kernel::load_step_strict`].
    pub fn load_step(&mut self, filename: &str, content: &str) -> Result<&StepFile> {
        let step = parse_step_file(filename, content)?;
        Ok(self.install(step))
    }

    /// Like [`Kernel::load_step`] but fails on unsupported entity types.
    /// The current model is kept when loading fails.
    pub fn load_step_strict(&mut self, filename: &str, content: &str) -> Result<&StepFile> {
        let step = parse_step_file(filename, content)?;

        let validation = step.entity_validation();
        if !validation.valid {
            return Err(Error::UnsupportedEntities(validation.unsupported_entities));
        }

        Ok(self.install(step))
    }

    /// Read and load a STEP file from disk, with the same lenient entity
    /// handling as [`Kernel::load_step`]
    pub fn load_step_file<P: AsRef<Path>>(&mut self, path: P) -> anyhow::Result<&StepFile> {
        let step = crate::io::import_step_file(path)?;
        Ok(self.install(step))
    }

    /// Every load path ends here: unsupported entities are checked and
    /// logged once, then the solid is built and the model replaced.
    fn install(&mut self, step: StepFile) -> &StepFile {
        let entities = step.entity_validation();
        if !entities.valid {
            tracing::warn!(
                filename = %step.filename,
                unsupported = ?entities.unsupported_entities,
                "STEP file contains unsupported entities"
            );
        }

        let mesh = build_solid(&step.bounding_box, &step.solid_hints(), &step.positions());
        tracing::info!(
            filename = %step.filename,
            entities = step.entities.len(),
            triangles = mesh.triangle_count(),
            "model loaded"
        );

        let model = self.model.insert(LoadedModel { step, mesh, entities });
        &model.step
    }

    pub fn model(&self) -> Option<&StepFile> {
        self.model.as_ref().map(|m| &m.step)
    }

    /// Entity support check recorded when the live model was loaded
    pub fn entity_validation(&self) -> Option<&EntityValidation> {
        self.model.as_ref().map(|m| &m.entities)
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.model.as_ref().map(|m| &m.mesh)
    }

    /// Slice the live mesh and append the resulting profile
    pub fn extract(&mut self, config: &CuttingPlaneConfig) -> Result<&ExtractedProfile> {
        let model = self.model.as_ref().ok_or(Error::NoModelLoaded)?;
        let profile = extract_profile(&model.mesh, config);

        tracing::info!(
            id = %profile.id,
            curves = profile.curves.len(),
            "profile extracted"
        );
        self.profiles.push(profile);
        Ok(&self.profiles[self.profiles.len() - 1])
    }

    pub fn profiles(&self) -> &[ExtractedProfile] {
        &self.profiles
    }

    pub fn clear_profiles(&mut self) {
        self.profiles.clear();
    }

    /// Remove a profile by id, returning it if present
    pub fn remove_profile(&mut self, id: &str) -> Option<ExtractedProfile> {
        let index = self.profiles.iter().position(|p| p.id == id)?;
        Some(self.profiles.remove(index))
    }

    /// Serialize every accumulated profile.
    ///
    /// Without an explicit `filename` the loaded model's name goes into the
    /// metadata.
    pub fn export_svg(&self, config: &SvgExportConfig, filename: Option<&str>) -> Result<String> {
        let filename = filename.or_else(|| self.model().map(|s| s.filename.as_str()));
        serialize(&self.profiles, config, filename)
    }
}
