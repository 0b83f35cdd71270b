//! System font resolution for text rendering.
//!
//! Fonts come from the host system via fontdb and are cached for the
//! process lifetime. A missing face is not an error: rendering degrades to
//! approximate metrics so headless environments without the requested
//! family still produce deterministic layout.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::{
    collections::{HashMap, HashSet},
    fs,
    sync::{Mutex, OnceLock},
};

use crate::model::FontWeight;

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    weight: FontWeight,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// All font family names available on this system, sorted.
pub fn list_font_families() -> Vec<String> {
    let mut set = HashSet::new();
    for face in db().faces() {
        for (name, _) in &face.families {
            set.insert(name.clone());
        }
    }
    let mut out: Vec<_> = set.into_iter().collect();
    out.sort();
    out
}

/// Resolves a family and weight to a cached system font, or `None` when the
/// system offers nothing usable.
pub fn get_font_for(family: &str, weight: FontWeight) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let key = FontKey {
        family: family.to_string(),
        weight,
    };

    if let Some(cached) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return *cached;
    }

    let resolved: Option<&'static Font<'static>> = load_font_from_system(family, weight)
        .map(|font| &*Box::leak(Box::new(font)));

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, resolved);
    resolved
}

fn load_font_from_system(family: &str, weight: FontWeight) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        // Named families fall back to sans-serif rather than failing.
        other => vec![Family::Name(other), Family::SansSerif],
    };

    let query = Query {
        families: &families,
        weight: match weight {
            FontWeight::Light => Weight::LIGHT,
            FontWeight::Normal => Weight::NORMAL,
            FontWeight::Bold => Weight::BOLD,
        },
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_lookups_agree() {
        // Whatever the system has, resolution must be stable per key.
        let first = get_font_for("Space Grotesk", FontWeight::Bold).is_some();
        let second = get_font_for("Space Grotesk", FontWeight::Bold).is_some();
        assert_eq!(first, second);
    }
}
