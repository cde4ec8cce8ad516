use super::{open_source, parse_number, read_rows};
use crate::models::Section;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SectionRow {
    #[serde(rename = "From Station Code", default)]
    from_code: String,
    #[serde(rename = "From Station Name", default)]
    from_name: String,
    #[serde(rename = "To Station Code", default)]
    to_code: String,
    #[serde(rename = "To Station Name", default)]
    to_name: String,
    #[serde(rename = "Distance (km)", default)]
    distance_km: String,
    #[serde(rename = "Average Travel Time (mins)", default)]
    travel_min: String,
}

impl SectionRow {
    fn into_section(self) -> Option<Section> {
        let section = Section::real(
            (self.from_code.as_str(), self.from_name.as_str()),
            (self.to_code.as_str(), self.to_name.as_str()),
            parse_number(&self.distance_km).unwrap_or(0.0),
            parse_number(&self.travel_min).unwrap_or(0.0),
        );
        (!section.is_degenerate()).then_some(section)
    }
}

/// Read real sections from a headed CSV stream, dropping rows with empty or
/// identical endpoint codes
pub fn read_sections<R: Read>(reader: R, source: &str) -> Vec<Section> {
    let sections: Vec<Section> = read_rows::<SectionRow, _>(reader, source)
        .into_iter()
        .filter_map(SectionRow::into_section)
        .collect();
    log::debug!("{source}: loaded {} real sections", sections.len());
    sections
}

/// Load real sections from `path`; an unavailable file yields no sections
#[must_use]
pub fn load_sections(path: &Path) -> Vec<Section> {
    match open_source(path) {
        Some(file) => read_sections(file, &path.display().to_string()),
        None => Vec::new(),
    }
}
