// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::volume::ImageVolume;
use crate::interpolators::raycast::RayCastInterpolator;
use crate::math::constants::{Float, Index3, Matrix3f, Matrix4f, Vector3f};
use crate::math::transform::Transform;
use crate::samplers::{make_plane_sampler, PlaneFilterMode};
use crate::volumes::const_image::ConstantImage;
use crate::volumes::grid_image::GridImage;

#[derive(Debug)]
pub enum ConfigLoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
    Volume(String),
}

impl From<std::io::Error> for ConfigLoadError {
    fn from(err: std::io::Error) -> Self {
        ConfigLoadError::Io(err)
    }
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigLoadError::Io(e) => write!(f, "io error: {}", e),
            ConfigLoadError::Parse(msg) => write!(f, "parse error: {}", msg),
            ConfigLoadError::MissingField(field) => write!(f, "missing field: {}", field),
            ConfigLoadError::Volume(msg) => write!(f, "volume error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigLoadError {}

pub struct ConfigLoadResult {
    pub interpolator: RayCastInterpolator,
    pub volume: Arc<dyn ImageVolume>,
    pub filter_mode: PlaneFilterMode,
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConfigLoadResult, ConfigLoadError> {
    let path = path.as_ref();
    log::info!("Starting reading ray cast config from: {}.", path.display());
    let xml = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_config(&xml, base_dir)
}

#[derive(Default)]
struct VolumeSpec {
    kind: String,
    filename: Option<String>,
    size: Option<Index3>,
    value: Float,
    spacing: Option<Vector3f>,
    origin: Option<Vector3f>,
    direction: Option<Matrix3f>,
}

#[derive(Default)]
struct ConfigState {
    defaults: HashMap<String, String>,
    in_volume: bool,
    in_transform: bool,
    volume: Option<VolumeSpec>,
    focal_point: Option<Vector3f>,
    threshold: Option<Float>,
    filter_mode: Option<PlaneFilterMode>,
    transform: Option<Transform>,
}

/// Parse a `<raycast>` document. Relative volume paths resolve against `base_dir`.
pub fn parse_config(xml: &str, base_dir: &Path) -> Result<ConfigLoadResult, ConfigLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut state = ConfigState::default();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => handle_element(&e, false, &mut state)?,
            Ok(Event::Empty(e)) => handle_element(&e, true, &mut state)?,
            Ok(Event::End(e)) => {
                match e.name().as_ref() {
                    b"volume" => state.in_volume = false,
                    b"transform" => state.in_transform = false,
                    _ => {}
                }
            }
            Err(e) => {
                return Err(ConfigLoadError::Parse(e.to_string()));
            }
            _ => {}
        }

        buf.clear();
    }

    let spec = state.volume.take().ok_or(ConfigLoadError::MissingField("volume"))?;
    let volume = build_volume(spec, base_dir)?;
    let focal_point = state.focal_point.ok_or(ConfigLoadError::MissingField("focal_point"))?;
    let filter_mode = state.filter_mode.unwrap_or_default();

    let mut interpolator = RayCastInterpolator::new(volume.clone())
        .with_plane_sampler(make_plane_sampler(filter_mode))
        .with_focal_point(focal_point)
        .with_threshold(state.threshold.unwrap_or(0.0));
    if let Some(transform) = state.transform {
        interpolator.set_transform(Arc::new(transform));
    }

    Ok(ConfigLoadResult {
        interpolator,
        volume,
        filter_mode,
    })
}

fn handle_element(e: &BytesStart, empty: bool, state: &mut ConfigState) -> Result<(), ConfigLoadError> {
    let attrs = read_attributes(e, &state.defaults);
    match e.name().as_ref() {
        b"raycast" => {}
        b"default" => {
            if let (Some(k), Some(v)) = (attrs.get("name"), attrs.get("value")) {
                state.defaults.insert(k.clone(), v.clone());
            }
        }
        b"volume" => {
            let mut spec = VolumeSpec {
                kind: attrs.get("type").cloned().unwrap_or_else(|| "vol".to_string()),
                filename: attrs.get("filename").cloned(),
                ..VolumeSpec::default()
            };
            if let Some(size) = attrs.get("size") {
                spec.size = Some(parse_size(size)?);
            }
            if let Some(value) = attrs.get("value") {
                spec.value = parse_float(value)?;
            }
            state.volume = Some(spec);
            state.in_volume = !empty;
        }
        b"spacing" | b"origin" | b"direction" if state.in_volume => {
            let value = attrs.get("value").ok_or(ConfigLoadError::MissingField("volume geometry value"))?;
            if let Some(spec) = state.volume.as_mut() {
                match e.name().as_ref() {
                    b"spacing" => spec.spacing = Some(parse_vec3(value)?),
                    b"origin" => spec.origin = Some(parse_vec3(value)?),
                    _ => spec.direction = Some(Matrix3f::from_row_slice(&parse_floats(value, 9)?)),
                }
            }
        }
        b"focal_point" => {
            let value = attrs.get("value").ok_or(ConfigLoadError::MissingField("focal_point.value"))?;
            state.focal_point = Some(parse_vec3(value)?);
        }
        b"threshold" => {
            let value = attrs.get("value").ok_or(ConfigLoadError::MissingField("threshold.value"))?;
            state.threshold = Some(parse_float(value)?);
        }
        b"sampler" => {
            let name = attrs.get("type").map(|s| s.as_str()).unwrap_or("bilinear");
            let mode = PlaneFilterMode::parse(name).unwrap_or_else(|| {
                log::warn!("Unsupported sampler '{}', falling back to bilinear.", name);
                PlaneFilterMode::Bilinear
            });
            state.filter_mode = Some(mode);
        }
        b"transform" => {
            state.transform = Some(Transform::default());
            state.in_transform = !empty;
        }
        b"translate" | b"rotate" | b"scale" | b"matrix" if state.in_transform => {
            let step = parse_transform_step(e.name().as_ref(), &attrs)?;
            let current = state.transform.unwrap_or_default();
            state.transform = Some(step.compose(&current));
        }
        other => {
            log::warn!("Ignoring unknown config element <{}>.", String::from_utf8_lossy(other));
        }
    }
    Ok(())
}

fn parse_transform_step(name: &[u8], attrs: &HashMap<String, String>) -> Result<Transform, ConfigLoadError> {
    let component = |key: &str, default: Float| -> Result<Float, ConfigLoadError> {
        match attrs.get(key) {
            Some(v) => parse_float(v),
            None => Ok(default),
        }
    };

    match name {
        b"translate" => Ok(Transform::translate(Vector3f::new(
            component("x", 0.0)?, component("y", 0.0)?, component("z", 0.0)?))),
        b"scale" => {
            let s = if let Some(u) = attrs.get("value") {
                let u = parse_float(u)?;
                Vector3f::new(u, u, u)
            } else {
                Vector3f::new(component("x", 1.0)?, component("y", 1.0)?, component("z", 1.0)?)
            };
            Ok(Transform::scale(s))
        }
        b"rotate" => {
            let axis = Vector3f::new(component("x", 0.0)?, component("y", 0.0)?, component("z", 0.0)?);
            let angle = component("angle", 0.0)?;
            Ok(Transform::rotate(axis, angle))
        }
        _ => {
            let value = attrs.get("value").ok_or(ConfigLoadError::MissingField("matrix.value"))?;
            Ok(Transform::new(Matrix4f::from_row_slice(&parse_floats(value, 16)?)))
        }
    }
}

fn build_volume(spec: VolumeSpec, base_dir: &Path) -> Result<Arc<dyn ImageVolume>, ConfigLoadError> {
    match spec.kind.as_str() {
        "vol" => {
            let filename = spec.filename.ok_or(ConfigLoadError::MissingField("volume.filename"))?;
            let path = resolve_path(base_dir, &filename);
            let mut image = GridImage::from_file(&path.to_string_lossy()).map_err(ConfigLoadError::Volume)?;
            if let Some(spacing) = spec.spacing {
                image.set_spacing(spacing);
            }
            if let Some(origin) = spec.origin {
                image.set_origin(origin);
            }
            if let Some(direction) = spec.direction {
                image.set_direction(direction).map_err(ConfigLoadError::Volume)?;
            }
            Ok(Arc::new(image))
        }
        "constant" => {
            let size = spec.size.ok_or(ConfigLoadError::MissingField("volume.size"))?;
            let mut image = ConstantImage::new(size, spec.value);
            if let Some(spacing) = spec.spacing {
                image = image.with_spacing(spacing);
            }
            if let Some(origin) = spec.origin {
                image = image.with_origin(origin);
            }
            if let Some(direction) = spec.direction {
                image = image.with_direction(direction).map_err(ConfigLoadError::Volume)?;
            }
            Ok(Arc::new(image))
        }
        other => Err(ConfigLoadError::Parse(format!("unsupported volume type: {}", other))),
    }
}

fn resolve_path(base_dir: &Path, filename: &str) -> PathBuf {
    let path = Path::new(filename);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn read_attributes(e: &BytesStart, defaults: &HashMap<String, String>) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = resolve_value(&attr.unescape_value().unwrap_or_default(), defaults);
        attrs.insert(key, value);
    }
    attrs
}

fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut names: Vec<&String> = defaults.keys().collect();
    // Longest first, so `$thr2` is not consumed by `$thr`.
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut out = raw.to_string();
    for name in names {
        out = out.replace(&format!("${}", name), &defaults[name]);
    }
    out
}

fn parse_float(value: &str) -> Result<Float, ConfigLoadError> {
    value.trim().parse::<Float>().map_err(|_| ConfigLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_usize(value: &str) -> Result<usize, ConfigLoadError> {
    value.trim().parse::<usize>().map_err(|_| ConfigLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_floats(value: &str, count: usize) -> Result<Vec<Float>, ConfigLoadError> {
    let values = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(parse_float)
        .collect::<Result<Vec<Float>, ConfigLoadError>>()?;
    if values.len() != count {
        return Err(ConfigLoadError::Parse(format!("expected {} values, got {}: {}", count, values.len(), value)));
    }
    Ok(values)
}

fn parse_vec3(value: &str) -> Result<Vector3f, ConfigLoadError> {
    let v = parse_floats(value, 3)?;
    Ok(Vector3f::new(v[0], v[1], v[2]))
}

fn parse_size(value: &str) -> Result<Index3, ConfigLoadError> {
    let mut parts = value.split(',').map(|s| s.trim()).filter(|s| !s.is_empty());
    let mut size = [0usize; 3];
    for slot in size.iter_mut() {
        let part = parts.next().ok_or_else(|| ConfigLoadError::Parse(format!("invalid size: {}", value)))?;
        *slot = parse_usize(part)?;
    }
    Ok(size)
}
