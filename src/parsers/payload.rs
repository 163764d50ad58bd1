//! Photo extraction from the embedded `__NEXT_DATA__` payload.
//!
//! The listing data lives under `props.pageProps.componentProps.gdpClientCache`,
//! an object of opaque cache keys whose values may wrap a `property` entity.
//! Intermediate keys that are absent count as empty objects; a key that is
//! present with the wrong JSON type (`null` included) is an extraction failure.

use crate::error::ScrapeError;
use serde_json::{Map, Value};

/// Keys leading from the payload root to the client cache
pub const CACHE_PATH: [&str; 4] = ["props", "pageProps", "componentProps", "gdpClientCache"];

/// Parses the anchor text as JSON
pub fn parse(text: &str) -> Result<Value, ScrapeError> {
    serde_json::from_str(text).map_err(|e| {
        ::log::warn!("Embedded payload is not valid JSON: {}", e);
        ScrapeError::MalformedPayload(e)
    })
}

/// Walks [`CACHE_PATH`] and returns the cache mapping, or `None` when any
/// step along the way is absent. A step holding `null` is a type mismatch,
/// not an absence.
pub fn client_cache(payload: &Value) -> Result<Option<&Map<String, Value>>, ScrapeError> {
    let mut current = as_object(payload, "$")?;
    let mut path = String::new();

    for key in CACHE_PATH {
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(key);

        match current.get(key) {
            None => {
                ::log::debug!("`{}` is absent, treating the cache as empty", path);
                return Ok(None);
            }
            Some(next) => current = as_object(next, &path)?,
        }
    }

    Ok(Some(current))
}

/// Collects photo URLs from the first cache entry that yields any.
///
/// Entries are visited in document order. Later entries are never looked
/// at once one has produced a URL, even if they hold more photos.
pub fn extract_photo_urls(payload: &Value) -> Result<Vec<String>, ScrapeError> {
    let Some(cache) = client_cache(payload)? else {
        return Ok(Vec::new());
    };
    let cache_path = CACHE_PATH.join(".");

    for (key, entry) in cache {
        // Non-object entries (query metadata and the like) never hold a property
        let Some(property) = entry.as_object().and_then(|e| e.get("property")) else {
            continue;
        };
        let entry_path = format!("{}.{}", cache_path, key);

        let urls = property_photo_urls(property, &format!("{}.property", entry_path))?;
        ::log::debug!("Cache entry {} yielded {} photo URLs", key, urls.len());

        if !urls.is_empty() {
            return Ok(urls);
        }
    }

    Ok(Vec::new())
}

/// URLs for every photo of one property entity, in photo order
pub fn property_photo_urls(property: &Value, path: &str) -> Result<Vec<String>, ScrapeError> {
    let property = as_object(property, path)?;

    let Some(photos) = property.get("photos") else {
        return Ok(Vec::new());
    };
    let photos_path = format!("{}.photos", path);
    let photos = as_array(photos, &photos_path)?;

    let mut urls = Vec::with_capacity(photos.len());
    for (i, photo) in photos.iter().enumerate() {
        if let Some(url) = photo_url(photo, &format!("{}[{}]", photos_path, i))? {
            urls.push(url.to_string());
        }
    }

    Ok(urls)
}

/// The URL for one photo record.
///
/// Prefers the last `mixedSources.jpeg` variant, which the upstream data
/// orders from smallest to largest. That ordering is an observed convention,
/// not something the payload guarantees. Falls back to a direct `url`.
pub fn photo_url<'a>(photo: &'a Value, path: &str) -> Result<Option<&'a str>, ScrapeError> {
    let photo = as_object(photo, path)?;

    if let Some(sources) = photo.get("mixedSources") {
        let sources_path = format!("{}.mixedSources", path);
        let sources = as_object(sources, &sources_path)?;

        if let Some(jpeg) = sources.get("jpeg") {
            let jpeg_path = format!("{}.jpeg", sources_path);
            let variants = as_array(jpeg, &jpeg_path)?;

            let Some(largest) = variants.last() else {
                return Err(ScrapeError::Extraction {
                    message: format!("no jpeg variants at `{}`", jpeg_path),
                });
            };

            let largest_path = format!("{}[{}]", jpeg_path, variants.len() - 1);
            let largest = as_object(largest, &largest_path)?;
            let url = largest
                .get("url")
                .ok_or_else(|| ScrapeError::missing_key(&largest_path, "url"))?;

            return as_str(url, &format!("{}.url", largest_path)).map(Some);
        }
    }

    match photo.get("url") {
        Some(url) => as_str(url, &format!("{}.url", path)).map(Some),
        None => Ok(None),
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ScrapeError> {
    value
        .as_object()
        .ok_or_else(|| ScrapeError::unexpected_type(path, "an object", value))
}

fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, ScrapeError> {
    value
        .as_array()
        .ok_or_else(|| ScrapeError::unexpected_type(path, "an array", value))
}

fn as_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, ScrapeError> {
    value
        .as_str()
        .ok_or_else(|| ScrapeError::unexpected_type(path, "a string", value))
}
