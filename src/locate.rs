//! Source Locator for component directories.
//!
//! A component directory is either in direct-source form (an `index` entry
//! file, optionally with dedicated declaration and style files) or in
//! compiled-artifact form (`<name>.props.*`, `<name>.component.*`,
//! `<name>.styles.*` siblings carrying the original source in an embedded
//! source map). The form is decided by which marker files are present.

use base64::Engine;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::LocatorConfig;
use crate::error::{DocgenError, DocgenResult};

const INLINE_MAP_MARKER: &str = "sourceMappingURL=data:application/json";
const BASE64_MARKER: &str = "base64,";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceForm {
    Direct,
    Compiled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole {
    Props,
    Behavior,
    Styles,
}

impl ArtifactRole {
    fn from_marker(segment: &str) -> Option<Self> {
        match segment {
            "props" => Some(ArtifactRole::Props),
            "component" => Some(ArtifactRole::Behavior),
            "styles" => Some(ArtifactRole::Styles),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComponentSources {
    pub form: SourceForm,
    pub props_source: Option<String>,
    pub behavior_source: Option<String>,
    pub style_source: Option<String>,
}

impl ComponentSources {
    /// Style source, falling back to the behavior source when no dedicated one exists.
    pub fn style_or_behavior(&self) -> Option<&str> {
        self.style_source
            .as_deref()
            .or(self.behavior_source.as_deref())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOCATE
// ═══════════════════════════════════════════════════════════════════════════════

/// Produce the properties, behavior and style sources for one component directory.
pub fn locate(dir: &Path, config: &LocatorConfig) -> DocgenResult<ComponentSources> {
    let files = list_files(dir)?;

    let sources = if let Some(entry) = find_named(&files, &config.entry_files) {
        locate_direct(entry, &files, config)?
    } else if files.iter().any(|f| artifact_role(f).is_some()) {
        locate_compiled(&files)?
    } else {
        return Err(DocgenError::MissingSource(dir.to_path_buf()));
    };

    if sources.props_source.is_none() && sources.behavior_source.is_none() {
        return Err(DocgenError::MissingSource(dir.to_path_buf()));
    }

    debug!(component = %dir.display(), form = ?sources.form, "located component sources");
    Ok(sources)
}

/// True when `dir` carries either source representation.
pub fn is_component_dir(dir: &Path, config: &LocatorConfig) -> bool {
    match list_files(dir) {
        Ok(files) => {
            find_named(&files, &config.entry_files).is_some()
                || files
                    .iter()
                    .any(|f| matches!(artifact_role(f), Some((_, ArtifactRole::Props | ArtifactRole::Behavior))))
        }
        Err(_) => false,
    }
}

fn locate_direct(
    entry: &Path,
    files: &[PathBuf],
    config: &LocatorConfig,
) -> DocgenResult<ComponentSources> {
    let behavior = read_text(entry)?;

    let props = match find_named(files, &config.declaration_files) {
        Some(decl) => read_text(decl)?,
        None => behavior.clone(),
    };

    let style = match find_named(files, &config.style_files) {
        Some(style) => Some(read_text(style)?),
        None => None,
    };

    Ok(ComponentSources {
        form: SourceForm::Direct,
        props_source: Some(props),
        behavior_source: Some(behavior),
        style_source: style,
    })
}

fn locate_compiled(files: &[PathBuf]) -> DocgenResult<ComponentSources> {
    let mut props = Vec::new();
    let mut behavior = Vec::new();
    let mut styles = Vec::new();

    for file in files {
        match artifact_role(file) {
            Some((_, ArtifactRole::Props)) => props.push(file.clone()),
            Some((_, ArtifactRole::Behavior)) => behavior.push(file.clone()),
            Some((_, ArtifactRole::Styles)) => styles.push(file.clone()),
            None => {}
        }
    }
    for candidates in [&mut props, &mut behavior, &mut styles] {
        prefer_source_maps(candidates);
    }

    Ok(ComponentSources {
        form: SourceForm::Compiled,
        props_source: read_first_compiled(&props)?,
        behavior_source: read_first_compiled(&behavior)?,
        style_source: read_first_compiled(&styles)?,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// ARTIFACTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Split `button.props.js.map` into (`button`, Props). The role marker is the
/// first dot-separated segment after the stem.
pub fn artifact_role(path: &Path) -> Option<(String, ArtifactRole)> {
    let file_name = path.file_name()?.to_str()?;
    let segments: Vec<&str> = file_name.split('.').collect();
    if segments.len() < 3 {
        return None;
    }
    segments
        .iter()
        .enumerate()
        .skip(1)
        .take(segments.len() - 2)
        .find_map(|(i, seg)| {
            ArtifactRole::from_marker(seg).map(|role| (segments[..i].join("."), role))
        })
}

#[derive(Deserialize)]
struct SourceMapPayload {
    #[serde(rename = "sourcesContent", default)]
    sources_content: Vec<Option<String>>,
}

/// Read a compiled artifact and recover the original source it embeds.
pub fn read_compiled_artifact(path: &Path) -> DocgenResult<String> {
    let text = fs::read_to_string(path).map_err(|e| DocgenError::malformed(path, e.to_string()))?;
    decode_embedded_source(path, &text)
}

/// Read a properties artifact: a component directory, a compiled `.props.`
/// file (its `.map` sibling is tried too) or a plain declaration file.
pub fn read_props_artifact(path: &Path, config: &LocatorConfig) -> DocgenResult<Option<String>> {
    if path.is_dir() {
        return Ok(locate(path, config)?.props_source);
    }
    if artifact_role(path).is_some() {
        let mut candidates = vec![path.to_path_buf()];
        let mut sibling = path.as_os_str().to_owned();
        sibling.push(".map");
        let sibling = PathBuf::from(sibling);
        if sibling.is_file() {
            candidates.push(sibling);
        }
        prefer_source_maps(&mut candidates);
        return read_first_compiled(&candidates);
    }
    read_text(path).map(Some)
}

/// Read the first of several paths the ancestor index holds for one stem.
pub fn read_props_candidates(
    candidates: &[PathBuf],
    config: &LocatorConfig,
) -> DocgenResult<Option<String>> {
    match candidates {
        [] => Ok(None),
        [single] => read_props_artifact(single, config),
        _ => read_first_compiled(candidates),
    }
}

/// Bare source-map payloads (`*.map`) ahead of compiled code, otherwise
/// keeping the existing order.
pub fn prefer_source_maps(paths: &mut [PathBuf]) {
    paths.sort_by_key(|p| p.extension().and_then(|e| e.to_str()) != Some("map"));
}

/// Decode the first candidate that carries an embedded source. A failure is
/// only reported when no candidate decodes; the first one is kept.
pub fn read_first_compiled(candidates: &[PathBuf]) -> DocgenResult<Option<String>> {
    let mut failure = None;
    for path in candidates {
        match read_compiled_artifact(path) {
            Ok(source) => return Ok(Some(source)),
            Err(e) => {
                debug!(artifact = %path.display(), error = %e, "artifact candidate did not decode");
                if failure.is_none() {
                    failure = Some(e);
                }
            }
        }
    }
    failure.map_or(Ok(None), Err)
}

pub fn decode_embedded_source(path: &Path, text: &str) -> DocgenResult<String> {
    let trimmed = text.trim_start();
    let payload_json = if trimmed.starts_with('{') {
        trimmed.to_string()
    } else {
        let marker = text
            .rfind(INLINE_MAP_MARKER)
            .ok_or_else(|| DocgenError::malformed(path, "no embedded source map"))?;
        let tail = &text[marker..];
        let start = tail
            .find(BASE64_MARKER)
            .ok_or_else(|| DocgenError::malformed(path, "inline source map is not base64"))?
            + BASE64_MARKER.len();
        let encoded: String = tail[start..]
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != '*')
            .collect();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| DocgenError::malformed(path, format!("base64: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| DocgenError::malformed(path, e.to_string()))?
    };

    let payload: SourceMapPayload = serde_json::from_str(&payload_json)
        .map_err(|e| DocgenError::malformed(path, format!("source map: {}", e)))?;

    payload
        .sources_content
        .into_iter()
        .next()
        .flatten()
        .ok_or_else(|| DocgenError::malformed(path, "source map has no sourcesContent"))
}

// ═══════════════════════════════════════════════════════════════════════════════
// HELPERS
// ═══════════════════════════════════════════════════════════════════════════════

fn list_files(dir: &Path) -> DocgenResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|_| DocgenError::MissingSource(dir.to_path_buf()))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// First file whose name matches `names`, honouring the order of `names`.
fn find_named<'f>(files: &'f [PathBuf], names: &[String]) -> Option<&'f PathBuf> {
    names.iter().find_map(|name| {
        files
            .iter()
            .find(|f| f.file_name().and_then(|n| n.to_str()) == Some(name.as_str()))
    })
}

fn read_text(path: &Path) -> DocgenResult<String> {
    fs::read_to_string(path).map_err(|e| DocgenError::malformed(path, e.to_string()))
}
