//! Museum model loading: fetch the GLB over the network with streaming
//! progress, parse it, and flatten every mesh into one renderer-ready
//! vertex/index soup with world transforms baked in.

use anyhow::{anyhow, Context, Result};
use fnv::FnvHashMap;
use glam::{Mat4, Vec3};
use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::constants::MODEL_SCALE;
use crate::render::ModelVertex;

/// Flattened model geometry ready for GPU upload.
pub struct ModelData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

fn js_err(e: impl std::fmt::Debug) -> anyhow::Error {
    anyhow!("{:?}", e)
}

/// Fetch `url`, reporting received/total progress as a fraction in [0, 1].
///
/// When the server sends no Content-Length the callback only fires with
/// 1.0 at the end.
pub async fn fetch_bytes(url: &str, mut on_progress: impl FnMut(f32)) -> Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !resp.ok() {
        return Err(anyhow!("fetch failed: HTTP {} for {}", resp.status(), url));
    }

    let total = resp
        .headers()
        .get("Content-Length")
        .ok()
        .flatten()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);

    let body = resp
        .body()
        .ok_or_else(|| anyhow!("response has no body"))?;
    let reader: web::ReadableStreamDefaultReader =
        body.get_reader().dyn_into().map_err(js_err)?;

    let mut bytes = Vec::new();
    loop {
        let chunk = JsFuture::from(reader.read()).await.map_err(js_err)?;
        let done = js_sys::Reflect::get(&chunk, &JsValue::from_str("done"))
            .map_err(js_err)?
            .as_bool()
            .unwrap_or(true);
        if done {
            break;
        }
        let value = js_sys::Reflect::get(&chunk, &JsValue::from_str("value")).map_err(js_err)?;
        let array = Uint8Array::new(&value);
        let offset = bytes.len();
        bytes.resize(offset + array.length() as usize, 0);
        array.copy_to(&mut bytes[offset..]);
        if total > 0.0 {
            on_progress((bytes.len() as f64 / total).min(1.0) as f32);
        }
    }
    on_progress(1.0);
    log::info!("[loader] fetched {} bytes from {}", bytes.len(), url);
    Ok(bytes)
}

/// Parse GLB bytes and flatten all meshes, applying node transforms and
/// the authored model transform (uniform scale, origin position).
pub fn parse_model(bytes: &[u8]) -> Result<ModelData> {
    let (doc, buffers, _images) =
        gltf::import_slice(bytes).context("failed to parse museum GLB")?;

    // Base color per material index; the museum model reuses materials
    // heavily so cache the lookups.
    let mut material_colors: FnvHashMap<Option<usize>, [f32; 3]> = FnvHashMap::default();

    let mut data = ModelData {
        vertices: Vec::new(),
        indices: Vec::new(),
    };
    let root = Mat4::from_scale(Vec3::splat(MODEL_SCALE));

    let scene = doc
        .default_scene()
        .or_else(|| doc.scenes().next())
        .ok_or_else(|| anyhow!("GLB contains no scene"))?;
    for node in scene.nodes() {
        flatten_node(&node, root, &buffers, &mut material_colors, &mut data);
    }
    log::info!(
        "[loader] model parsed: {} vertices, {} indices",
        data.vertices.len(),
        data.indices.len()
    );
    Ok(data)
}

fn flatten_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    material_colors: &mut FnvHashMap<Option<usize>, [f32; 3]>,
    out: &mut ModelData,
) {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let world = parent * local;

    if let Some(mesh) = node.mesh() {
        for prim in mesh.primitives() {
            append_primitive(&prim, world, buffers, material_colors, out);
        }
    }
    for child in node.children() {
        flatten_node(&child, world, buffers, material_colors, out);
    }
}

fn append_primitive(
    prim: &gltf::Primitive,
    world: Mat4,
    buffers: &[gltf::buffer::Data],
    material_colors: &mut FnvHashMap<Option<usize>, [f32; 3]>,
    out: &mut ModelData,
) {
    let reader = prim.reader(|buffer| Some(&buffers[buffer.index()][..]));
    let Some(positions) = reader.read_positions() else {
        return;
    };
    let positions: Vec<[f32; 3]> = positions.collect();
    let normals: Vec<[f32; 3]> = reader
        .read_normals()
        .map(|n| n.collect())
        .unwrap_or_default();

    let color = *material_colors
        .entry(prim.material().index())
        .or_insert_with(|| {
            let c = prim
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();
            [c[0], c[1], c[2]]
        });

    // Normals rotate with the inverse transpose; renormalized per vertex.
    let normal_matrix = world.inverse().transpose();
    let base = out.vertices.len() as u32;
    for (i, p) in positions.iter().enumerate() {
        let position = world.transform_point3(Vec3::from_array(*p));
        let normal = normals
            .get(i)
            .map(|n| {
                normal_matrix
                    .transform_vector3(Vec3::from_array(*n))
                    .normalize_or_zero()
            })
            .unwrap_or(Vec3::Y);
        out.vertices.push(ModelVertex {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
        });
    }
    match reader.read_indices() {
        Some(indices) => out.indices.extend(indices.into_u32().map(|i| base + i)),
        // Non-indexed primitive: triangles in vertex order.
        None => out
            .indices
            .extend((0..positions.len() as u32).map(|i| base + i)),
    }
}
