//! WASM bindings for lightmap-uv.
//!
//! This module provides JavaScript-friendly APIs for use in the browser.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

/// Unwrap options.
#[wasm_bindgen]
pub struct UnwrapOptions {
    inner: crate::UnwrapConfig,
}

#[wasm_bindgen]
impl UnwrapOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> UnwrapOptions {
        UnwrapOptions {
            inner: crate::UnwrapConfig::default(),
        }
    }

    #[wasm_bindgen(setter)]
    pub fn set_island_margin(&mut self, value: f64) {
        self.inner.island_margin = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_projection_limit(&mut self, value: f64) {
        self.inner.projection_limit = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_area_weight(&mut self, value: f64) {
        self.inner.area_weight = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_remove_doubles(&mut self, value: bool) {
        self.inner.remove_doubles = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_share_space(&mut self, value: bool) {
        self.inner.share_space = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_fill_holes(&mut self, value: bool) {
        self.inner.fill_holes = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_fill_holes_quality(&mut self, value: u32) {
        self.inner.fill_holes_quality = value;
    }
}

impl Default for UnwrapOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Unwrap result.
#[wasm_bindgen]
pub struct UnwrapResult {
    inner: crate::UnwrapOutput,
}

#[wasm_bindgen]
impl UnwrapResult {
    /// The full result as JSON.
    pub fn to_json(&self) -> Result<String, JsError> {
        self.inner.to_json().map_err(|e| JsError::new(&e.to_string()))
    }

    /// OBJ text with the lightmap channel as texture coordinates.
    pub fn to_obj(&self) -> Result<String, JsError> {
        self.inner.to_obj().map_err(|e| JsError::new(&e.to_string()))
    }

    /// PNG bytes of the packed layout.
    pub fn preview_png(&self, size: u32) -> Result<Vec<u8>, JsError> {
        self.inner.preview_png(size).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Lightmap UVs of one mesh as a flat array.
    pub fn lightmap_uvs(&self, mesh: usize) -> Option<js_sys::Float32Array> {
        let mesh = self.inner.meshes.get(mesh)?;
        let flat: Vec<f32> = mesh.lightmap_uvs.iter().flatten().copied().collect();
        Some(js_sys::Float32Array::from(&flat[..]))
    }

    /// Index buffer of one mesh.
    pub fn indices(&self, mesh: usize) -> Option<js_sys::Uint32Array> {
        let mesh = self.inner.meshes.get(mesh)?;
        Some(js_sys::Uint32Array::from(&mesh.indices[..]))
    }

    #[wasm_bindgen(getter)]
    pub fn world_to_texel_ratio(&self) -> f64 {
        self.inner.world_to_texel_ratio
    }

    #[wasm_bindgen(getter)]
    pub fn mesh_count(&self) -> usize {
        self.inner.meshes.len()
    }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.inner.total_vertices()
    }

    #[wasm_bindgen(getter)]
    pub fn island_count(&self) -> usize {
        self.inner.total_islands()
    }
}

/// Unwrap a JSON scene.
///
/// JSON format:
/// ```json
/// {
///   "meshes": [
///     { "name": "floor", "positions": [[0, 0, 0], [1, 0, 0], [1, 0, 1]], "indices": [0, 1, 2] }
///   ]
/// }
/// ```
///
/// `options` overrides settings stored in the scene.
#[wasm_bindgen]
pub fn unwrap_scene_json(json: &str, options: Option<UnwrapOptions>) -> Result<UnwrapResult, JsError> {
    let scene = crate::load_scene_from_bytes(json.as_bytes())
        .map_err(|e| JsError::new(&format!("Invalid scene: {}", e)))?;

    let config = match options {
        Some(options) => options.inner,
        None => scene.config.clone().unwrap_or_default(),
    };

    let output = crate::unwrap_meshes(&scene.meshes, config)
        .map_err(|e| JsError::new(&e.to_string()))?;

    Ok(UnwrapResult { inner: output })
}
