//! WASM bindings for slopy-engine.
//!
//! Exposes free-slot computation to JavaScript via `wasm-bindgen`. Lists cross
//! the boundary as JSON strings: range lists are arrays of `"H-H"` strings, and
//! users are `{user_id, busy, preferred}` objects.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slopy-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/slopy_engine_wasm.wasm
//! ```

use slopy_engine::{SlotMatching, TimeRange, UserDay};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

fn parse_texts(json: &str) -> Result<Vec<String>, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid ranges JSON: {}", e)))
}

/// `TimeRange` deserializes from its `"H-H"` text, so this validates every entry.
fn parse_ranges(json: &str) -> Result<Vec<TimeRange>, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid ranges JSON: {}", e)))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn engine_error(e: slopy_engine::ScheduleError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Free slots for one user.
///
/// `busy_json` and `preferred_json` are JSON arrays of `"H-H"` strings; an empty
/// preferred array means no preference. Returns a JSON array of `"H-H"` strings.
#[wasm_bindgen(js_name = "freeSlots")]
pub fn free_slots(busy_json: &str, preferred_json: &str) -> Result<String, JsValue> {
    let busy = parse_texts(busy_json)?;
    let preferred = parse_texts(preferred_json)?;

    let slots = slopy_engine::single_user_free_slots(&busy, &preferred).map_err(engine_error)?;
    to_json(&slots)
}

/// Mutual free slots across users.
///
/// `users_json` is a JSON array of `{user_id, busy, preferred}` objects whose
/// ranges are already filtered to one day. Only slots identical for every user
/// are kept; with `overlap`, every minute all users have free is kept instead.
/// Returns a JSON array of `"H-H"` strings.
#[wasm_bindgen(js_name = "mutualFreeSlots")]
pub fn mutual_free_slots(users_json: &str, overlap: bool) -> Result<String, JsValue> {
    let users: Vec<UserDay> = serde_json::from_str(users_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid users JSON: {}", e)))?;
    let matching = if overlap {
        SlotMatching::Overlap
    } else {
        SlotMatching::Exact
    };

    let slots = slopy_engine::mutual_free_slots(&users, matching).map_err(engine_error)?;
    to_json(&slots)
}

/// Free ranges covering the day minus the given busy ranges.
#[wasm_bindgen(js_name = "complement")]
pub fn complement(busy_json: &str) -> Result<String, JsValue> {
    let busy = parse_ranges(busy_json)?;
    to_json(&slopy_engine::complement(&busy))
}

/// Overlaps between two range lists.
#[wasm_bindgen(js_name = "intersect")]
pub fn intersect(a_json: &str, b_json: &str) -> Result<String, JsValue> {
    let a = parse_ranges(a_json)?;
    let b = parse_ranges(b_json)?;
    to_json(&slopy_engine::intersect(&a, &b))
}
