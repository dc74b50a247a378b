//! Core domain types: collected documents, route tree, doc entries.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// DocumentRecord
// ---------------------------------------------------------------------------

/// A document read from the site tree during collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// Path relative to the site root, using the platform separator.
    pub path: String,
    /// Raw file contents, untouched.
    pub content: String,
}

// ---------------------------------------------------------------------------
// DocEntry
// ---------------------------------------------------------------------------

/// A titled document discovered in the route tree, rendered as one index line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocEntry {
    /// Route path used as the link target (the version-docs mapping key).
    pub path: String,
    /// Display title (never empty).
    pub title: String,
    /// Optional description; empty when absent.
    #[serde(default)]
    pub description: String,
    /// Document identifier; empty when absent.
    #[serde(default)]
    pub id: String,
}

// ---------------------------------------------------------------------------
// SiteMetadata
// ---------------------------------------------------------------------------

/// The part of the host's site configuration used by the index export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMetadata {
    /// Site title, rendered as the level-1 heading.
    #[serde(default)]
    pub title: String,
    /// Optional tagline paragraph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Site origin, e.g. `https://docs.example.com`.
    #[serde(default)]
    pub url: String,
    /// Base path appended verbatim to `url`, e.g. `/`.
    #[serde(default)]
    pub base_url: String,
}

impl SiteMetadata {
    /// `url` and `base_url` concatenated as-is (duplicate slashes are kept).
    pub fn full_base_url(&self) -> String {
        format!("{}{}", self.url, self.base_url)
    }

    /// The tagline, if present and non-empty.
    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref().filter(|t| !t.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Route tree
// ---------------------------------------------------------------------------

/// One node of the host-supplied route tree.
///
/// Every field the scanner reads is optional, and a field of the wrong JSON
/// type (or `null`) counts as absent. Anything else the host emits
/// (components, exact flags, ...) is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteNode {
    /// Route path, e.g. `/` or `/docs/intro`.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Plugin that registered this route.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub plugin: Option<RoutePlugin>,
    /// Nested child routes; non-object children are dropped.
    #[serde(default, deserialize_with = "lenient_routes", skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteNode>,
    /// Props handed to the route component.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub props: Option<RouteProps>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutePlugin {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteProps {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionProps>,
}

/// Props of a docs version route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionProps {
    /// Document path → metadata object, in host order.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub docs: Option<Map<String, Value>>,
}

impl RouteNode {
    /// Build a route list from arbitrary JSON.
    ///
    /// A non-array yields an empty list and array items that are not route
    /// objects are skipped, so no route tree shape is ever rejected.
    pub fn list_from_value(value: Value) -> Vec<RouteNode> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .filter(Value::is_object)
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Name of the owning plugin, if any.
    pub fn plugin_name(&self) -> Option<&str> {
        self.plugin.as_ref()?.name.as_deref()
    }

    /// The version-docs mapping exposed by this node, if any.
    pub fn version_docs(&self) -> Option<&Map<String, Value>> {
        self.props.as_ref()?.version.as_ref()?.docs.as_ref()
    }
}

/// Decode a field, falling back to its default when the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_routes<'de, D>(deserializer: D) -> std::result::Result<Vec<RouteNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(RouteNode::list_from_value)
}

/// Metadata for one document in a version-docs mapping.
///
/// Built leniently: fields of the wrong JSON type count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub id: Option<String>,
    pub unversioned_id: Option<String>,
}

impl DocMetadata {
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(String::from);
        Self {
            title: field("title"),
            description: field("description"),
            id: field("id"),
            unversioned_id: field("unversionedId"),
        }
    }

    /// Convert into an index entry, or `None` when the title is missing or empty.
    pub fn into_entry(self, path: &str) -> Option<DocEntry> {
        let title = self.title.filter(|t| !t.is_empty())?;
        let id = self
            .id
            .filter(|s| !s.is_empty())
            .or_else(|| self.unversioned_id.filter(|s| !s.is_empty()))
            .unwrap_or_default();

        Some(DocEntry {
            path: path.to_string(),
            title,
            description: self.description.unwrap_or_default(),
            id,
        })
    }
}

// ---------------------------------------------------------------------------
// RenderedArtifacts
// ---------------------------------------------------------------------------

/// The two rendered export blobs of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    /// Index export (`llms.txt`).
    pub index: String,
    /// Full-text export (`llms-full.txt`).
    pub full: String,
}

impl RenderedArtifacts {
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    pub fn full_len(&self) -> usize {
        self.full.len()
    }
}
