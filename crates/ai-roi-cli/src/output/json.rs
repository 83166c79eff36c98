use serde_json::Value;
use std::io::{self, Write};

/// Stream pretty JSON to stdout. A closed pipe (`airoi demo | head`) is
/// not an error.
pub fn print_json(value: &Value) {
    if let Err(e) = write_json(&mut io::stdout().lock(), value) {
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("JSON output error: {}", e);
        }
    }
}

fn write_json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_keeps_decimal_strings() {
        let mut buf = Vec::new();
        write_json(&mut buf, &json!({ "roi_percentage": "50.0", "payback_months": "36+" })).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\"roi_percentage\": \"50.0\""));
        assert!(text.ends_with("}\n"));
    }
}
