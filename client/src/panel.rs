use std::collections::HashMap;

use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

/// Static region-record document, fetched fresh on every panel open.
const RECORDS_URL: &str = "./assets/data/countries.json";

/// Sentinel shown for stats of a region missing from the record source.
const UNKNOWN: &str = "Unknown";

/// Element ids of the details panel. The host page owns the markup; the
/// widget only writes into these fixed hooks.
const PANEL_ID: &str = "country-panel";
const NAME_ID: &str = "country-name";
const POPULATION_ID: &str = "country-pop";
const GDP_ID: &str = "country-gdp";
const MILITARY_ID: &str = "country-mil";
const RESOURCES_ID: &str = "country-res";

/// One entry of the record document. The stat fields stay as raw JSON values
/// because the source mixes numbers and strings; both display bare.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionRecord {
    pub population: serde_json::Value,
    pub gdp: serde_json::Value,
    pub military: serde_json::Value,
    pub resources: Vec<String>,
}

pub type RegionRecords = HashMap<String, RegionRecord>;

/// The five display strings written into the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelFields {
    pub name: String,
    pub population: String,
    pub gdp: String,
    pub military: String,
    pub resources: String,
}

/// Render a record lookup into display text. A miss keeps the identifier as
/// the title and fills every stat with the "Unknown" sentinel.
pub fn panel_fields(id: &str, record: Option<&RegionRecord>) -> PanelFields {
    match record {
        Some(record) => PanelFields {
            name: id.to_string(),
            population: display_value(&record.population),
            gdp: display_value(&record.gdp),
            military: display_value(&record.military),
            resources: record.resources.join(", "),
        },
        None => PanelFields {
            name: id.to_string(),
            population: UNKNOWN.to_string(),
            gdp: UNKNOWN.to_string(),
            military: UNKNOWN.to_string(),
            resources: UNKNOWN.to_string(),
        },
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Fetch the record document and populate the panel for `id`. One request per
/// call, no de-duplication: responses from rapid clicks may resolve out of
/// order, which is accepted. On transport or parse failure the panel keeps
/// its previous content and visibility.
pub fn open(id: String) {
    spawn_local(async move {
        match fetch_records().await {
            Ok(records) => {
                let fields = panel_fields(&id, records.get(id.as_str()));
                show(&fields);
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("Failed to load country data: {e}").into());
            }
        }
    });
}

/// Hide the panel. Idempotent, one consolidated handler.
pub fn close() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(panel) = document.get_element_by_id(PANEL_ID) {
        let classes = panel.class_list();
        classes.remove_1("visible").ok();
        classes.add_1("hidden").ok();
    }
}

async fn fetch_records() -> Result<RegionRecords, String> {
    let resp = gloo_net::http::Request::get(RECORDS_URL)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;

    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }

    resp.json::<RegionRecords>()
        .await
        .map_err(|e| format!("parse error: {e}"))
}

fn show(fields: &PanelFields) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    set_text(&document, NAME_ID, &fields.name);
    set_text(&document, POPULATION_ID, &fields.population);
    set_text(&document, GDP_ID, &fields.gdp);
    set_text(&document, MILITARY_ID, &fields.military);
    set_text(&document, RESOURCES_ID, &fields.resources);

    if let Some(panel) = document.get_element_by_id(PANEL_ID) {
        let classes = panel.class_list();
        classes.remove_1("hidden").ok();
        classes.add_1("visible").ok();
    }
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

#[cfg(test)]
mod tests {
    use super::{RegionRecord, RegionRecords, panel_fields};
    use serde_json::json;

    fn records(value: serde_json::Value) -> RegionRecords {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn hit_renders_stats_and_joined_resources() {
        let records = records(json!({
            "Xland": {
                "population": 10,
                "gdp": 20,
                "military": 5,
                "resources": ["water", "oil"]
            }
        }));

        let fields = panel_fields("Xland", records.get("Xland"));

        assert_eq!(fields.name, "Xland");
        assert_eq!(fields.population, "10");
        assert_eq!(fields.gdp, "20");
        assert_eq!(fields.military, "5");
        assert_eq!(fields.resources, "water, oil");
    }

    #[test]
    fn miss_renders_identifier_and_unknown_sentinels() {
        let records = records(json!({}));

        let fields = panel_fields("Atlantis", records.get("Atlantis"));

        assert_eq!(fields.name, "Atlantis");
        assert_eq!(fields.population, "Unknown");
        assert_eq!(fields.gdp, "Unknown");
        assert_eq!(fields.military, "Unknown");
        assert_eq!(fields.resources, "Unknown");
    }

    #[test]
    fn string_stats_display_without_quotes() {
        let record: RegionRecord = serde_json::from_value(json!({
            "population": "8.1M",
            "gdp": "412B",
            "military": 120_000,
            "resources": ["timber"]
        }))
        .unwrap();

        let fields = panel_fields("Yland", Some(&record));

        assert_eq!(fields.population, "8.1M");
        assert_eq!(fields.gdp, "412B");
        assert_eq!(fields.military, "120000");
        assert_eq!(fields.resources, "timber");
    }

    #[test]
    fn empty_resource_list_joins_to_empty_text() {
        let record: RegionRecord = serde_json::from_value(json!({
            "population": 1,
            "gdp": 2,
            "military": 3,
            "resources": []
        }))
        .unwrap();

        let fields = panel_fields("Zland", Some(&record));
        assert_eq!(fields.resources, "");
    }
}
