use serde_json::Value;

use super::scalar;

/// Headline figures, most specific first. Dotted paths descend into objects.
const PRIORITY_PATHS: [&str; 6] = [
    "projection.roi_percentage",
    "roi_percentage",
    "winners.highest_roi",
    "breakeven_multiplier",
    "saved.roi_percentage",
    "three_year_costs",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in order of priority, then falls
/// back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    for path in PRIORITY_PATHS {
        if let Some(val) = lookup(result_obj, path).filter(|v| !v.is_null()) {
            println!("{}", scalar(val));
            return;
        }
    }

    if let Some(errors) = result_obj.get("errors").and_then(Value::as_array) {
        println!("{}", if errors.is_empty() { "valid" } else { "invalid" });
        return;
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar(val));
            return;
        }
    }

    println!("{}", scalar(result_obj));
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |v, key| v.get(key))
}
