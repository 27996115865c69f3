// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! WASM bindings using wasm-bindgen
//!
//! Structured values cross the boundary as JSON strings so the viewer side
//! can deserialize them without generated typings.

use crate::io::{self, SvgExportConfig};
use crate::kernel::Kernel;
use crate::profile::CuttingPlaneConfig;
use crate::validation;
use wasm_bindgen::prelude::*;

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

#[wasm_bindgen]
pub struct WasmKernel {
    inner: Kernel,
}

#[wasm_bindgen]
impl WasmKernel {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmKernel {
        WasmKernel {
            inner: Kernel::init(),
        }
    }

    /// Load STEP text; returns the parsed file as JSON
    pub fn load_step(&mut self, filename: &str, content: &str) -> Result<String, JsValue> {
        let step = self
            .inner
            .load_step(filename, content)
            .map_err(|e| js_error("Load error", e))?;

        serde_json::to_string(step).map_err(|e| js_error("JSON serialization error", e))
    }

    /// `{valid, unsupportedEntities}` for the loaded model, or `null`
    pub fn entity_validation(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.entity_validation())
            .map_err(|e| js_error("JSON serialization error", e))
    }

    /// Flat `[x, y, z, ...]` triangle soup of the loaded solid
    pub fn mesh_positions(&self) -> Vec<f32> {
        self.inner.mesh().map(|m| m.positions()).unwrap_or_default()
    }

    /// Slice with a JSON `CuttingPlaneConfig`; returns the profile as JSON
    pub fn extract(&mut self, config_json: &str) -> Result<String, JsValue> {
        let config: CuttingPlaneConfig =
            serde_json::from_str(config_json).map_err(|e| js_error("Invalid plane config", e))?;
        let profile = self
            .inner
            .extract(&config)
            .map_err(|e| js_error("Extract error", e))?;

        serde_json::to_string(profile).map_err(|e| js_error("JSON serialization error", e))
    }

    /// All profiles extracted so far, as a JSON array
    pub fn profiles(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.inner.profiles())
            .map_err(|e| js_error("JSON serialization error", e))
    }

    pub fn remove_profile(&mut self, id: &str) -> bool {
        self.inner.remove_profile(id).is_some()
    }

    pub fn clear_profiles(&mut self) {
        self.inner.clear_profiles();
    }

    /// Export accumulated profiles with a JSON `SvgExportConfig`
    pub fn export_svg(&self, config_json: &str) -> Result<String, JsValue> {
        let config: SvgExportConfig =
            serde_json::from_str(config_json).map_err(|e| js_error("Invalid export config", e))?;

        self.inner
            .export_svg(&config, None)
            .map_err(|e| js_error("Export error", e))
    }

    /// Suggested download name for the current model's SVG
    pub fn output_filename(&self) -> Option<String> {
        self.inner
            .model()
            .map(|step| io::output_filename(&step.filename))
    }
}

impl Default for WasmKernel {
    fn default() -> Self {
        Self::new()
    }
}

/// Check SVG text against the default machine profile; returns JSON
#[wasm_bindgen]
pub fn validate_svg(svg: &str) -> Result<String, JsValue> {
    serde_json::to_string(&validation::validate_svg(svg))
        .map_err(|e| js_error("JSON serialization error", e))
}

/// Structural STEP check used before accepting an upload
#[wasm_bindgen]
pub fn validate_step(content: &str) -> bool {
    io::validate_step(content)
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
