// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label text.

extern crate alloc;

use alloc::string::{String, ToString};

/// Formats a tick value for display.
///
/// Uses the shortest representation that round-trips, with `-0` shown as `0`.
pub fn format_tick_value(value: f64) -> String {
    if value == 0.0 {
        return String::from("0");
    }
    value.to_string()
}

/// Renders a label template for `value`.
///
/// `<%=value%>` tags (whitespace inside the tag allowed) are replaced by the
/// formatted value. Tags naming anything else render empty, and an unclosed
/// tag is kept verbatim.
pub fn render_template(template: &str, value: f64) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("<%=") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 3..];
        let Some(close) = after_open.find("%>") else {
            out.push_str(&rest[open..]);
            return out;
        };
        if after_open[..close].trim() == "value" {
            out.push_str(&format_tick_value(value));
        }
        rest = &after_open[close + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn template_substitutes_value() {
        assert_eq!(render_template("<%=value%>", 20.0), "20");
        assert_eq!(render_template("$<%= value %>k", 2.5), "$2.5k");
        assert_eq!(render_template("<%=value%> / <%=value%>", 1.0), "1 / 1");
    }

    #[test]
    fn template_edge_cases() {
        assert_eq!(render_template("plain", 3.0), "plain");
        assert_eq!(render_template("<%=other%>x", 3.0), "x");
        assert_eq!(render_template("a <%=value", 3.0), "a <%=value");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(format_tick_value(-0.0), "0");
        assert_eq!(format_tick_value(-12.5), "-12.5");
    }
}
